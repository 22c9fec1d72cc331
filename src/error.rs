//! Error types for Booking Assist.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Picker error: {0}")]
    Picker(#[from] PickerError),
}

/// Structural problems in a flow definition, detected at load time.
///
/// A flow that loads cleanly can never raise one of these mid-conversation;
/// the definition is immutable after load.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Flow {name} has no steps")]
    EmptyFlow { name: String },

    #[error("Duplicate step id {id} in flow {name}")]
    DuplicateStep { name: String, id: String },

    #[error("Step {id} declares successor {next}, which does not exist")]
    UnresolvedNext { id: String, next: String },

    #[error("Non-terminal step {id} has no successor")]
    NoSuccessor { id: String },

    #[error("Step {id} declares both an option menu and the {widget} widget")]
    ConflictingInput { id: String, widget: String },

    #[error("Step {id} references unknown widget {tag}")]
    UnknownWidget { id: String, tag: String },

    #[error("Non-terminal step {id} has no capture slot")]
    MissingSlot { id: String },

    #[error("Capture table references unknown step id {id}")]
    UnknownCaptureStep { id: String },

    #[error("Failed to parse flow definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Widget confirmation errors.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("Nothing selected to confirm")]
    NothingSelected,

    #[error("Selected time {time} is not a valid HH:MM slot")]
    InvalidTime { time: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
