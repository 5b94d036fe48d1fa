//! Transaction functionality
//!
//! This module validates transfer requests before they are signed and
//! prepares the inputs for the external transaction builder.

mod amount;
mod selection;
pub mod types;
mod validation;

pub use amount::*;
pub use selection::*;
pub use types::*;
pub use validation::*;
