//! Execution engine and repair search for handheld boot code.
//!
//! A run starts at position 0 with a zero accumulator and stops either when
//! control would return to a position it has already visited or when it
//! leaves the program.

pub mod history;
pub mod machine;
pub mod search;

pub use history::History;
pub use machine::{execute_to_end, run, Machine, Outcome, Step};
pub use search::{find_fix, find_fix_detailed, Fix};

use serde::{Deserialize, Serialize};

/// The two ways a run can stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndCondition {
    /// Control is about to return to a visited position
    DuplicateInstruction,
    /// Control left the program
    NoMoreInstructions,
}
