//! Configuration types.

use std::time::Duration;

/// Tunables for the terminal frontend.
///
/// Pacing delays are presentational only; the interpreter itself always
/// transitions synchronously.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Delay between a free-text submission and the next bot messages.
    pub text_pacing: Duration,
    /// Delay between an option or widget submission and the next bot messages.
    pub option_pacing: Duration,
    /// Placeholder shown for the free-text input.
    pub text_placeholder: String,
    /// Simulated latency of the demo booked-times source.
    pub demo_lookup_latency: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            text_pacing: Duration::from_millis(250),
            option_pacing: Duration::from_millis(200),
            text_placeholder: "Escreva sua resposta...".to_string(),
            demo_lookup_latency: Duration::from_millis(350),
        }
    }
}
