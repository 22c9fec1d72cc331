//! The scripted-conversation core: flow definitions, slots, message
//! templates, the transcript, and the interpreter session.
//!
//! A [`Flow`] is an ordered, immutable collection of steps loaded once and
//! shared across a conversation. A [`ConversationSession`] walks it: on step
//! entry it renders the step's message templates into the transcript, then
//! waits for a user response (free text, option choice, or widget
//! confirmation), captures it into a slot, and advances.

pub mod definition;
pub mod session;
pub mod slots;
pub mod template;
pub mod transcript;

pub use definition::{
    ChoiceOption, Flow, FlowSpec, OptionSpec, ResponseKind, Step, StepId, StepSpec, WidgetKind,
};
pub use session::ConversationSession;
pub use slots::{Slot, SlotValues};
pub use transcript::{Sender, Transcript, TranscriptEntry};
