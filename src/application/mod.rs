//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! holding the rendered form, per-row input state and the active mode.

pub mod state;

pub use state::*;
