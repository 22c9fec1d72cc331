//! Frontend-facing layer: affordance projection and the terminal runner.

pub mod adapter;
pub mod cli;

pub use adapter::{Affordance, affordance};
pub use cli::CliRunner;
