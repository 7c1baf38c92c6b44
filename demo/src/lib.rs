//! hograph demo library.
//!
//! Walkthroughs of the storage facades against an in-memory graph:
//!
//! - `scenario`: the runnable scenarios and their transcripts
//! - `format`: table and help output

mod error;
mod format;
mod scenario;

pub use error::{DemoError, DemoResult};
pub use format::{format_table, print_help};
pub use scenario::{Scenario, Transcript};
