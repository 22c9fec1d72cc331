//! Booking domain: the static business catalog and the built-in
//! conversation flows.

pub mod catalog;
pub mod flows;

pub use catalog::{Barber, Service, Shop, default_roster};
