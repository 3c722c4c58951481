//! simplitrac - Expense Form Library
//!
//! Renders an ordered list of field labels into a form of label and text
//! input rows, shown in the terminal and exported as static artifacts.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
