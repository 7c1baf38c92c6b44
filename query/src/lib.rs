//! hograph Query
//!
//! Compile and execute paths over the lowered encoding.
//!
//! Responsibilities:
//! - Describe paths as ordered, variable-bound element patterns
//! - Reject paths whose neighbors cannot be joined
//! - Enumerate every satisfying assignment of each path
//! - Project `variable.property` columns and sort rows stably

mod compiler;
mod error;
mod executor;
mod path;
mod projection;
mod table;

pub use compiler::{compile, CompiledPath, End, PathOp};
pub use error::{PathError, PathResult};
pub use executor::PathExecutor;
pub use path::{Path, PathElement};
pub use projection::Projection;
pub use table::PathTable;
