//! Data hooks for the console's REST resources.

mod queries;

pub use queries::*;
