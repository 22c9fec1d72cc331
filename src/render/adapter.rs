//! Projection of interpreter state into the input affordance the frontend
//! should offer.

use crate::flow::{ChoiceOption, ConversationSession, ResponseKind, WidgetKind};

/// What the frontend should present for the session's current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    /// Conversation complete; nothing further to show.
    None,
    /// An explicit control that re-triggers entry of the current step.
    /// Presentational nudge only; it never changes state.
    Advance,
    /// One button per option, in declaration order.
    Options(Vec<ChoiceOption>),
    /// The embedded date/time picker.
    DateTimePicker,
    /// The embedded staff picker.
    BarberPicker,
    /// Free-text input.
    TextInput,
}

/// Decide the affordance for the session's current state.
///
/// Rules are evaluated in order: a finished conversation shows nothing; a
/// session not awaiting input shows only the advance nudge; otherwise the
/// active step's response kind decides.
pub fn affordance(session: &ConversationSession) -> Affordance {
    let step = session.current_step();
    if step.terminal {
        return Affordance::None;
    }
    if !session.awaiting_input() {
        return Affordance::Advance;
    }
    match &step.response {
        ResponseKind::Options(options) => Affordance::Options(options.clone()),
        ResponseKind::Widget(WidgetKind::DateTime) => Affordance::DateTimePicker,
        ResponseKind::Widget(WidgetKind::Barber) => Affordance::BarberPicker,
        ResponseKind::FreeText => Affordance::TextInput,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::flow::{Flow, FlowSpec, OptionSpec, Slot, StepSpec};

    fn session_for(steps: Vec<StepSpec>, captures: HashMap<String, Slot>) -> ConversationSession {
        let flow = Flow::load(FlowSpec {
            name: "teste".into(),
            steps,
            captures,
        })
        .unwrap();
        ConversationSession::start(Arc::new(flow), "Loja")
    }

    #[test]
    fn free_text_step_offers_text_input() {
        let session = session_for(
            vec![
                StepSpec::new("1", "Nome?").with_next("2"),
                StepSpec::new("2", "fim").terminal(),
            ],
            HashMap::from([("1".to_string(), Slot::Name)]),
        );
        assert_eq!(affordance(&session), Affordance::TextInput);
    }

    #[test]
    fn option_step_offers_buttons_in_declaration_order() {
        let session = session_for(
            vec![
                StepSpec::new("1", "Serviço?")
                    .with_options(vec![
                        OptionSpec {
                            text: "Corte".into(),
                            value: "corte".into(),
                        },
                        OptionSpec {
                            text: "Barba".into(),
                            value: "barba".into(),
                        },
                    ])
                    .with_next("2"),
                StepSpec::new("2", "fim").terminal(),
            ],
            HashMap::from([("1".to_string(), Slot::Service)]),
        );
        let Affordance::Options(options) = affordance(&session) else {
            panic!("expected an option menu");
        };
        assert_eq!(options[0].text, "Corte");
        assert_eq!(options[1].text, "Barba");
    }

    #[test]
    fn widget_steps_offer_their_pickers() {
        let mut session = session_for(
            vec![
                StepSpec::new("1", "Quando?").with_widget("date-time").with_next("2"),
                StepSpec::new("2", "Quem?").with_widget("barber").with_next("3"),
                StepSpec::new("3", "fim").terminal(),
            ],
            HashMap::from([
                ("1".to_string(), Slot::Time),
                ("2".to_string(), Slot::Barber),
            ]),
        );
        assert_eq!(affordance(&session), Affordance::DateTimePicker);

        session.submit_widget("05/03/26 - 10:00", "05/03/26 - 10:00");
        assert_eq!(affordance(&session), Affordance::BarberPicker);
    }

    #[test]
    fn terminal_step_offers_nothing() {
        let mut session = session_for(
            vec![
                StepSpec::new("1", "Nome?").with_next("2"),
                StepSpec::new("2", "Até logo!").terminal(),
            ],
            HashMap::from([("1".to_string(), Slot::Name)]),
        );
        session.submit_text("Ana");
        assert_eq!(affordance(&session), Affordance::None);
    }
}
