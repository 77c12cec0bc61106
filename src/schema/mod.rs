//! Schema module - data model for candidate programs, targets, and fitness.

mod config;
mod fitness;
mod table;
mod tree;

pub use config::*;
pub use fitness::*;
pub use table::*;
pub use tree::*;
