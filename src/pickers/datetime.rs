//! Date/time picker model: the slot grid, the booked-times lookup, and
//! confirmation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::PickerError;

/// Source of already-booked time strings for a given date.
///
/// Implementations typically query a scheduling backend. The picker treats a
/// failed lookup as "nothing booked" rather than blocking the flow.
#[async_trait]
pub trait BookedTimesSource: Send + Sync {
    async fn booked_times(&self, date: NaiveDate) -> anyhow::Result<Vec<String>>;
}

/// All offerable times: 09:00 through 17:30 in 30-minute slots.
pub fn time_grid() -> Vec<String> {
    let mut times = Vec::with_capacity(18);
    for hour in 9..=17 {
        for minute in [0, 30] {
            times.push(format!("{hour:02}:{minute:02}"));
        }
    }
    times
}

/// Ticket identifying one booked-times lookup.
///
/// Only the ticket from the most recent date selection is applied; a newer
/// selection supersedes anything still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    date: NaiveDate,
}

impl LookupTicket {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A confirmed date/time selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedSlot {
    /// Combined date and time.
    pub at: NaiveDateTime,
    /// The selected time string, e.g. `"10:30"`.
    pub time: String,
    /// Pre-formatted chat message: `"dd/MM/yy - HH:mm"`.
    pub message: String,
}

/// Interactive state of the date/time widget.
#[derive(Debug, Default)]
pub struct DayTimePicker {
    selected_date: Option<NaiveDate>,
    selected_time: Option<String>,
    booked: Vec<String>,
    generation: u64,
    loading: bool,
}

impl DayTimePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-selected date. The booked-times lookup for it still
    /// has to be run by the caller.
    pub fn with_initial_date(date: NaiveDate) -> Self {
        Self {
            selected_date: Some(date),
            ..Self::default()
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn booked_times(&self) -> &[String] {
        &self.booked
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Select a date and start a booked-times lookup for it.
    ///
    /// Clears any previously selected time. A lookup still in flight for an
    /// earlier selection is superseded: its result will be discarded when
    /// applied.
    pub fn begin_date(&mut self, date: NaiveDate) -> LookupTicket {
        self.selected_date = Some(date);
        self.selected_time = None;
        self.loading = true;
        self.generation += 1;
        LookupTicket {
            generation: self.generation,
            date,
        }
    }

    /// Apply the result of a lookup started with [`begin_date`].
    ///
    /// Stale tickets are discarded, never merged. A failed lookup degrades
    /// to an empty booked set.
    pub fn apply_lookup(&mut self, ticket: LookupTicket, result: anyhow::Result<Vec<String>>) {
        if ticket.generation != self.generation {
            tracing::debug!(date = %ticket.date, "Discarding stale booked-times lookup");
            return;
        }
        self.booked = match result {
            Ok(times) => times,
            Err(e) => {
                tracing::warn!(
                    date = %ticket.date,
                    error = %e,
                    "Booked-times lookup failed; treating all times as free"
                );
                Vec::new()
            }
        };
        self.loading = false;
    }

    /// Select a date and run the lookup against the given source.
    pub async fn select_date(&mut self, date: NaiveDate, source: &dyn BookedTimesSource) {
        let ticket = self.begin_date(date);
        let result = source.booked_times(date).await;
        self.apply_lookup(ticket, result);
    }

    /// Times still offerable for the selected date: the grid minus whatever
    /// is booked. Empty while no date is selected.
    pub fn available_times(&self) -> Vec<String> {
        if self.selected_date.is_none() {
            return Vec::new();
        }
        time_grid()
            .into_iter()
            .filter(|t| !self.booked.contains(t))
            .collect()
    }

    /// Pick one of the available times. Booked or unknown times are ignored.
    pub fn select_time(&mut self, time: &str) {
        if self.available_times().iter().any(|t| t == time) {
            self.selected_time = Some(time.to_string());
        }
    }

    /// The confirmed selection: combined date-time, the time string, and the
    /// pre-formatted chat message.
    pub fn confirm(&self) -> Result<ConfirmedSlot, PickerError> {
        let date = self.selected_date.ok_or(PickerError::NothingSelected)?;
        let time = self
            .selected_time
            .clone()
            .ok_or(PickerError::NothingSelected)?;
        let parsed = NaiveTime::parse_from_str(&time, "%H:%M")
            .map_err(|_| PickerError::InvalidTime { time: time.clone() })?;
        let message = format!("{} - {}", date.format("%d/%m/%y"), time);
        Ok(ConfirmedSlot {
            at: NaiveDateTime::new(date, parsed),
            time,
            message,
        })
    }
}

/// Deterministic demo source: a small day-seeded table of busy times, with a
/// simulated latency.
pub struct DemoBookedTimes {
    latency: Duration,
}

impl DemoBookedTimes {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl BookedTimesSource for DemoBookedTimes {
    async fn booked_times(&self, date: NaiveDate) -> anyhow::Result<Vec<String>> {
        tokio::time::sleep(self.latency).await;
        let booked: &[&str] = match date.day() % 4 {
            0 => &["09:00", "11:30"],
            1 => &["10:00", "10:30", "15:00"],
            2 => &["12:00", "13:30"],
            _ => &["09:30", "14:00"],
        };
        Ok(booked.iter().map(|s| s.to_string()).collect())
    }
}
