use std::sync::Arc;

use booking_assist::booking::catalog::{Shop, default_roster};
use booking_assist::booking::flows;
use booking_assist::config::UiConfig;
use booking_assist::pickers::DemoBookedTimes;
use booking_assist::render::CliRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = UiConfig::default();
    let shop = Shop::demo();
    let flow = Arc::new(flows::first_visit(&shop)?);

    eprintln!("💈 Booking Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Barbearia: {}", shop.name);
    eprintln!("   Fluxo: {}", flow.name());
    eprintln!("   Digite sua resposta e pressione Enter.\n");

    let source = Arc::new(DemoBookedTimes::new(config.demo_lookup_latency));
    let runner = CliRunner::new(config, source, default_roster());
    runner.run(flow, &shop.name).await
}
