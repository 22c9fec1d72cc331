//! The variable store: a closed set of booking slots captured during a
//! conversation.

use serde::{Deserialize, Serialize};

/// A named field captured from the user during a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Name,
    Phone,
    Service,
    Time,
    Notifications,
    Barber,
}

impl Slot {
    /// The placeholder token that resolves to this slot in message templates.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Service => "service",
            Self::Time => "time",
            Self::Notifications => "notifications",
            Self::Barber => "barber",
        }
    }

    /// Parse a template token back into a slot.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "name" => Some(Self::Name),
            "phone" => Some(Self::Phone),
            "service" => Some(Self::Service),
            "time" => Some(Self::Time),
            "notifications" => Some(Self::Notifications),
            "barber" => Some(Self::Barber),
            _ => None,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Captured values for every slot, initialized empty.
///
/// Written only by the interpreter, at most one slot per conversation turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotValues {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub time: String,
    pub notifications: String,
    pub barber: String,
}

impl SlotValues {
    /// Current value of a slot; empty string when unset.
    pub fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Name => &self.name,
            Slot::Phone => &self.phone,
            Slot::Service => &self.service,
            Slot::Time => &self.time,
            Slot::Notifications => &self.notifications,
            Slot::Barber => &self.barber,
        }
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        let value = value.into();
        match slot {
            Slot::Name => self.name = value,
            Slot::Phone => self.phone = value,
            Slot::Service => self.service = value,
            Slot::Time => self.time = value,
            Slot::Notifications => self.notifications = value,
            Slot::Barber => self.barber = value,
        }
    }

    /// Whether the user opted into appointment reminders.
    pub fn wants_notifications(&self) -> bool {
        self.notifications == "sim"
    }
}
