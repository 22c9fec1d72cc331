//! Barber picker model: roster filtering and selection.

use crate::booking::catalog::Barber;
use crate::error::PickerError;

/// Interactive state of the staff-member widget.
#[derive(Debug)]
pub struct BarberPicker {
    roster: Vec<Barber>,
    query: String,
    selected: Option<String>,
}

impl BarberPicker {
    pub fn new(roster: Vec<Barber>) -> Self {
        Self {
            roster,
            query: String::new(),
            selected: None,
        }
    }

    /// Start with a roster entry pre-selected. Unknown ids leave the picker
    /// unselected.
    pub fn with_initial(roster: Vec<Barber>, id: &str) -> Self {
        let mut picker = Self::new(roster);
        picker.select(id);
        picker
    }

    pub fn roster(&self) -> &[Barber] {
        &self.roster
    }

    /// Set the search query used by [`filtered`](Self::filtered).
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Roster entries matching the query, case-insensitively, over name and
    /// bio. An empty query matches everyone.
    pub fn filtered(&self) -> Vec<&Barber> {
        let q = self.query.trim().to_lowercase();
        self.roster
            .iter()
            .filter(|b| {
                q.is_empty()
                    || b.name.to_lowercase().contains(&q)
                    || b.bio.to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Select a roster entry by id. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) {
        if self.roster.iter().any(|b| b.id == id) {
            self.selected = Some(id.to_string());
        }
    }

    pub fn selected(&self) -> Option<&Barber> {
        self.selected
            .as_deref()
            .and_then(|id| self.roster.iter().find(|b| b.id == id))
    }

    /// The confirmed choice plus the pre-formatted chat message.
    pub fn confirm(&self) -> Result<(Barber, String), PickerError> {
        let barber = self.selected().cloned().ok_or(PickerError::NothingSelected)?;
        let message = format!("Barbeiro escolhido: {}", barber.name);
        Ok((barber, message))
    }
}
