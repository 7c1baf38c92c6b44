//! hograph Pattern
//!
//! Sparse patterns over stored elements and the matcher that resolves them.
//!
//! Responsibilities:
//! - Describe partial elements (labels, a subset of properties, members)
//! - Refuse element patterns naming members that were never stored
//! - Reject patterns that contradict themselves
//! - Enumerate matching elements in store order
//! - Apply the first-match or unique-match policy
//! - Carry variable bindings for path traversal

mod binding;
mod error;
mod matcher;
mod pattern;

pub use binding::{Binding, Bindings};
pub use error::{PatternError, PatternResult};
pub use matcher::{MatchPolicy, Matcher};
pub use pattern::{EdgePattern, IntoPattern, Pattern};
