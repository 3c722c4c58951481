pub mod models;
pub mod services;
pub mod markup;
pub mod errors;

pub use models::*;
pub use services::*;
pub use markup::*;
pub use errors::*;
