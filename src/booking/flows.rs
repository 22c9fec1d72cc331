//! Built-in conversation flows.

use std::collections::HashMap;

use crate::error::FlowError;
use crate::flow::{Flow, FlowSpec, OptionSpec, Slot, StepSpec};

use super::catalog::Shop;

/// Build the first-visit booking flow for the given shop.
///
/// Seven steps: greeting and name, phone, service menu, date/time picker,
/// barber picker, notification opt-in, farewell. The service menu is derived
/// from the shop's catalog, one option per service.
pub fn first_visit(shop: &Shop) -> Result<Flow, FlowError> {
    let service_options: Vec<OptionSpec> = shop
        .services
        .iter()
        .map(|s| OptionSpec {
            text: s.menu_label(),
            value: s.name.clone(),
        })
        .collect();

    let steps = vec![
        StepSpec::new(
            "1",
            "Olá, tudo bem? Seja bem-vindo(a)! Sou o assistente virtual do(a) {{shop}} e cuido dos agendamentos dele(a), ok?",
        )
        .with_message2("Pra começar, qual é o seu nome e sobrenome?")
        .with_next("2"),
        StepSpec::new("2", "Tudo bem {{name}}? Muito prazer!")
            .with_message2(
                "Qual é o seu número de telefone? Assim consigo entrar em contato se precisar falar com você sobre o agendamento.",
            )
            .with_next("3"),
        StepSpec::new("3", "Beleza! Agora me conta, qual serviço você quer agendar hoje?")
            .with_options(service_options)
            .with_next("4"),
        StepSpec::new("4", "Boa escolha! 🔥 Que dia e horário você quer marcar?")
            .with_widget("date-time")
            .with_next("5"),
        StepSpec::new("5", "Agora escolha um dos nossos profissionais para te atender!")
            .with_widget("barber")
            .with_next("6"),
        StepSpec::new(
            "6",
            "Quer que eu ative as notificações pra te lembrar do horário e te avisar se tiver alguma mudança?",
        )
        .with_options(vec![
            OptionSpec {
                text: "🔔 Sim, quero receber lembretes".into(),
                value: "sim".into(),
            },
            OptionSpec {
                text: "🚫 Não, pode deixar sem".into(),
                value: "nao".into(),
            },
        ])
        .with_next("7"),
        StepSpec::new("7", "Perfeito, {{name}}! Tudo certinho com o seu agendamento 💪")
            .with_message2(
                "Pode conferir ele quando quiser lá no menu, na opção “Meus agendamentos”. Valeu por agendar com a gente! Até logo!",
            )
            .terminal(),
    ];

    let captures = HashMap::from([
        ("1".to_string(), Slot::Name),
        ("2".to_string(), Slot::Phone),
        ("3".to_string(), Slot::Service),
        ("4".to_string(), Slot::Time),
        ("5".to_string(), Slot::Barber),
        ("6".to_string(), Slot::Notifications),
    ]);

    Flow::load(FlowSpec {
        name: "primeira visita".into(),
        steps,
        captures,
    })
}
