//! The flow interpreter: walks a validated flow, renders bot messages into
//! the transcript, and captures user responses into slots.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::definition::{Flow, ResponseKind, Step, StepId};
use super::slots::SlotValues;
use super::template;
use super::transcript::{Sender, Transcript};

/// One live scripted conversation.
///
/// A session owns its entire runtime state: current step, captured slots,
/// transcript, and the awaiting-input flag. It is created per conversation
/// and discarded when the conversation ends; nothing is shared between
/// sessions or persisted.
///
/// Transitions are synchronous: a `submit_*` call that passes its
/// preconditions captures the response, advances to the successor step, and
/// emits that step's messages before returning. Any pacing delay belongs to
/// the render layer.
pub struct ConversationSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    flow: Arc<Flow>,
    shop_name: String,
    /// Position of the active step in the flow's declaration order. Always
    /// valid: it only ever takes values produced by the flow itself.
    current: usize,
    slots: SlotValues,
    transcript: Transcript,
    awaiting_input: bool,
    emitted: HashSet<StepId>,
}

impl ConversationSession {
    /// Start a conversation at the flow's first step and emit its messages.
    pub fn start(flow: Arc<Flow>, shop_name: impl Into<String>) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            flow,
            shop_name: shop_name.into(),
            current: 0,
            slots: SlotValues::default(),
            transcript: Transcript::new(),
            awaiting_input: false,
            emitted: HashSet::new(),
        };
        session.enter_step();
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    /// The active step.
    pub fn current_step(&self) -> &Step {
        &self.flow.steps()[self.current]
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn slots(&self) -> &SlotValues {
        &self.slots
    }

    pub fn awaiting_input(&self) -> bool {
        self.awaiting_input
    }

    /// Whether the conversation has reached a terminal step.
    pub fn is_complete(&self) -> bool {
        self.current_step().terminal
    }

    /// Submit a free-text response for the active step.
    ///
    /// Ignored (with a diagnostic log) when no input is awaited or when the
    /// active step expects an option or widget response instead.
    pub fn submit_text(&mut self, text: &str) {
        let step = self.current_step().clone();
        if !self.accepts(&step, matches!(step.response, ResponseKind::FreeText), "text") {
            return;
        }
        self.transcript.push(Sender::User, text);
        if let Some(slot) = step.slot {
            self.slots.set(slot, text);
        }
        self.awaiting_input = false;
        self.advance();
    }

    /// Submit an option choice for the active step.
    ///
    /// The transcript shows `display_text`; the slot stores `value`, which is
    /// an internal token never surfaced to the user.
    pub fn submit_option(&mut self, value: &str, display_text: &str) {
        let step = self.current_step().clone();
        if !self.accepts(
            &step,
            matches!(step.response, ResponseKind::Options(_)),
            "option",
        ) {
            return;
        }
        self.transcript.push(Sender::User, display_text);
        if let Some(slot) = step.slot {
            self.slots.set(slot, value);
        }
        self.awaiting_input = false;
        self.advance();
    }

    /// Submit an embedded-widget confirmation for the active step.
    ///
    /// `rendered_message` is the human-readable text produced by the widget;
    /// `slot_value` is what gets captured.
    pub fn submit_widget(&mut self, rendered_message: &str, slot_value: &str) {
        let step = self.current_step().clone();
        if !self.accepts(
            &step,
            matches!(step.response, ResponseKind::Widget(_)),
            "widget",
        ) {
            return;
        }
        self.transcript.push(Sender::User, rendered_message);
        if let Some(slot) = step.slot {
            self.slots.set(slot, slot_value);
        }
        self.awaiting_input = false;
        self.advance();
    }

    /// Re-run step entry for the current step without changing state.
    ///
    /// Used by the render layer's explicit "advance" control; safe because
    /// step entry is idempotent.
    pub fn resume(&mut self) {
        self.enter_step();
    }

    /// Precondition check shared by the `submit_*` entry points. A violation
    /// is a render-layer defect, never a user-visible error: log and drop.
    fn accepts(&self, step: &Step, kind_matches: bool, kind: &str) -> bool {
        if !self.awaiting_input {
            tracing::warn!(
                session = %self.id,
                step = %step.id,
                kind,
                "Submission dropped: no input awaited"
            );
            return false;
        }
        if !kind_matches {
            tracing::warn!(
                session = %self.id,
                step = %step.id,
                kind,
                "Submission dropped: response kind does not match the active step"
            );
            return false;
        }
        true
    }

    /// Move to the successor step and perform its entry.
    fn advance(&mut self) {
        match self.flow.successor_position(self.current) {
            Some(next) => {
                self.current = next;
                self.enter_step();
            }
            None => {
                // Load validation guarantees every non-terminal step has a
                // successor; reaching this arm otherwise means a flow defect.
                let step = self.current_step();
                if !step.terminal {
                    tracing::warn!(
                        session = %self.id,
                        step = %step.id,
                        "No successor for non-terminal step; staying put"
                    );
                }
            }
        }
    }

    /// Perform step entry for the current step, exactly once per step id.
    ///
    /// A step whose messages were already emitted only refreshes the
    /// awaiting-input flag.
    fn enter_step(&mut self) {
        let step = self.current_step().clone();
        if self.emitted.contains(&step.id) {
            self.awaiting_input = !step.terminal;
            return;
        }

        let first = template::render(&step.message1, &self.slots, &self.shop_name);
        if !first.is_empty() {
            self.transcript.push(Sender::Bot, first);
        }
        if let Some(second) = &step.message2 {
            let second = template::render(second, &self.slots, &self.shop_name);
            self.transcript.push(Sender::Bot, second);
        }
        self.emitted.insert(step.id.clone());

        self.awaiting_input = !step.terminal;
        if step.terminal {
            tracing::debug!(session = %self.id, step = %step.id, "Conversation complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::flow::definition::{FlowSpec, OptionSpec, StepSpec};
    use crate::flow::slots::Slot;
    use crate::flow::transcript::TranscriptEntry;

    fn ask_name_phone_flow() -> Arc<Flow> {
        let spec = FlowSpec {
            name: "cadastro".into(),
            steps: vec![
                StepSpec::new("1", "Bem-vindo à {{shop}}!")
                    .with_message2("Qual é o seu nome?")
                    .with_next("2"),
                StepSpec::new("2", "Prazer, {{name}}! Qual é o seu telefone?").with_next("3"),
                StepSpec::new("3", "Obrigado, {{name}}! Até logo.").terminal(),
            ],
            captures: HashMap::from([
                ("1".to_string(), Slot::Name),
                ("2".to_string(), Slot::Phone),
            ]),
        };
        Arc::new(Flow::load(spec).unwrap())
    }

    fn service_options_flow() -> Arc<Flow> {
        let spec = FlowSpec {
            name: "servico".into(),
            steps: vec![
                StepSpec::new("1", "Qual serviço?")
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
                StepSpec::new("2", "Fechado!").terminal(),
            ],
            captures: HashMap::from([("1".to_string(), Slot::Service)]),
        };
        Arc::new(Flow::load(spec).unwrap())
    }

    fn widget_flow() -> Arc<Flow> {
        let spec = FlowSpec {
            name: "horario".into(),
            steps: vec![
                StepSpec::new("1", "Que dia e horário?")
                    .with_widget("date-time")
                    .with_next("2"),
                StepSpec::new("2", "Marcado!").terminal(),
            ],
            captures: HashMap::from([("1".to_string(), Slot::Time)]),
        };
        Arc::new(Flow::load(spec).unwrap())
    }

    fn bot(text: &str) -> TranscriptEntry {
        TranscriptEntry {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    fn user(text: &str) -> TranscriptEntry {
        TranscriptEntry {
            sender: Sender::User,
            text: text.into(),
        }
    }

    #[test]
    fn start_emits_first_step_messages_in_order() {
        let session = ConversationSession::start(ask_name_phone_flow(), "Barbearia Central");
        assert_eq!(
            session.transcript().entries(),
            &[
                bot("Bem-vindo à Barbearia Central!"),
                bot("Qual é o seu nome?"),
            ]
        );
        assert!(session.awaiting_input());
        assert_eq!(session.current_step().id, "1");
    }

    #[test]
    fn text_walkthrough_captures_slots_and_interpolates() {
        let mut session = ConversationSession::start(ask_name_phone_flow(), "Barbearia Central");

        session.submit_text("Ana");
        assert_eq!(session.slots().name, "Ana");
        assert_eq!(session.current_step().id, "2");
        assert_eq!(
            session.transcript().last().unwrap(),
            &bot("Prazer, Ana! Qual é o seu telefone?")
        );

        session.submit_text("11999999999");
        assert_eq!(session.slots().phone, "11999999999");
        assert_eq!(session.current_step().id, "3");
        assert_eq!(
            session.transcript().last().unwrap(),
            &bot("Obrigado, Ana! Até logo.")
        );
        assert!(session.is_complete());
        assert!(!session.awaiting_input());
    }

    #[test]
    fn terminal_step_is_permanent() {
        let mut session = ConversationSession::start(ask_name_phone_flow(), "X");
        session.submit_text("Ana");
        session.submit_text("11999999999");
        assert!(session.is_complete());

        let len = session.transcript().len();
        session.submit_text("alguém aí?");
        session.submit_option("corte", "Corte");
        session.submit_widget("mensagem", "valor");
        session.resume();

        assert_eq!(session.current_step().id, "3");
        assert_eq!(session.transcript().len(), len);
        assert!(!session.awaiting_input());
    }

    #[test]
    fn single_message_step_appends_exactly_one_entry() {
        let mut session = ConversationSession::start(ask_name_phone_flow(), "X");
        let before = session.transcript().len();
        session.submit_text("Ana");
        // one user entry plus exactly one bot entry for step 2
        assert_eq!(session.transcript().len(), before + 2);
    }

    #[test]
    fn option_submission_shows_text_and_stores_value() {
        let mut session = ConversationSession::start(service_options_flow(), "X");
        session.submit_option("barba", "Barba");
        assert_eq!(session.slots().service, "barba");
        assert_eq!(session.transcript().entries()[1], user("Barba"));
        assert!(session.is_complete());
    }

    #[test]
    fn widget_submission_shows_message_and_stores_value() {
        let mut session = ConversationSession::start(widget_flow(), "X");
        session.submit_widget("05/03/26 - 10:00", "05/03/26 - 10:00");
        assert_eq!(session.slots().time, "05/03/26 - 10:00");
        assert_eq!(session.transcript().entries()[1], user("05/03/26 - 10:00"));
        assert!(session.is_complete());
    }

    #[test]
    fn text_submission_to_option_step_is_a_noop() {
        let mut session = ConversationSession::start(service_options_flow(), "X");
        let len = session.transcript().len();

        session.submit_text("quero corte");

        assert_eq!(session.current_step().id, "1");
        assert_eq!(session.transcript().len(), len);
        assert_eq!(session.slots().service, "");
        assert!(session.awaiting_input());
    }

    #[test]
    fn option_submission_to_widget_step_is_a_noop() {
        let mut session = ConversationSession::start(widget_flow(), "X");
        let len = session.transcript().len();

        session.submit_option("10:00", "10:00");

        assert_eq!(session.current_step().id, "1");
        assert_eq!(session.transcript().len(), len);
        assert_eq!(session.slots().time, "");
    }

    #[test]
    fn resume_never_duplicates_messages() {
        let mut session = ConversationSession::start(ask_name_phone_flow(), "X");
        let len = session.transcript().len();
        session.resume();
        session.resume();
        assert_eq!(session.transcript().len(), len);
        assert!(session.awaiting_input());
    }

    #[test]
    fn revisited_step_does_not_reemit_messages() {
        // Step 2 loops back to step 1; the guard keeps the transcript clean.
        let spec = FlowSpec {
            name: "loop".into(),
            steps: vec![
                StepSpec::new("1", "Nome?").with_next("2"),
                StepSpec::new("2", "Confirma?").with_next("1"),
            ],
            captures: HashMap::from([
                ("1".to_string(), Slot::Name),
                ("2".to_string(), Slot::Notifications),
            ]),
        };
        let flow = Arc::new(Flow::load(spec).unwrap());
        let mut session = ConversationSession::start(flow, "X");

        session.submit_text("Ana");
        session.submit_text("sim");

        // Back on step 1, awaiting input, but its message was not re-emitted.
        assert_eq!(session.current_step().id, "1");
        assert!(session.awaiting_input());
        let bot_entries: Vec<_> = session
            .transcript()
            .entries()
            .iter()
            .filter(|e| e.sender == Sender::Bot)
            .collect();
        assert_eq!(bot_entries.len(), 2);
    }

    #[test]
    fn empty_first_message_appends_nothing() {
        let spec = FlowSpec {
            name: "mudo".into(),
            steps: vec![
                StepSpec::new("1", "{{name}}").with_next("2"),
                StepSpec::new("2", "fim").terminal(),
            ],
            captures: HashMap::from([("1".to_string(), Slot::Name)]),
        };
        let flow = Arc::new(Flow::load(spec).unwrap());
        let session = ConversationSession::start(flow, "X");
        // "{{name}}" renders to the unset slot's empty string, so nothing is
        // appended for step 1.
        assert!(session.transcript().is_empty());
        assert!(session.awaiting_input());
    }

    #[test]
    fn sessions_do_not_share_state() {
        let flow = ask_name_phone_flow();
        let mut a = ConversationSession::start(flow.clone(), "X");
        let b = ConversationSession::start(flow, "X");

        a.submit_text("Ana");
        assert_eq!(a.slots().name, "Ana");
        assert_eq!(b.slots().name, "");
        assert_ne!(a.id(), b.id());
    }
}
