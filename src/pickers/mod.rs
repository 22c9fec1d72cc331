//! Embedded picker widgets: the rich inputs a step can require instead of
//! free text or a fixed option menu.

pub mod barber;
pub mod datetime;

pub use barber::BarberPicker;
pub use datetime::{
    BookedTimesSource, ConfirmedSlot, DayTimePicker, DemoBookedTimes, LookupTicket, time_grid,
};
