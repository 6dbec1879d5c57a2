//! Search for the single flip that lets a looping program terminate.

use crate::machine::run;
use crate::EndCondition;
use handheld_core::{Error, Result};
use handheld_ir::{Instruction, Mutator, Program};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// The winning flip and the accumulator it terminates with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub index: usize,
    pub original: Instruction,
    pub replacement: Instruction,
    pub accumulator: i64,
    /// Candidates evaluated, including the winning one
    pub candidates_tried: usize,
}

/// Try every `nop`/`jmp` flip in ascending index order and return the first
/// one that runs off the end of the program.
#[instrument(skip(program), fields(len = program.len()))]
pub fn find_fix_detailed(program: &Program) -> Result<Fix> {
    let mutator = Mutator::new(program);
    debug!("Evaluating up to {} candidates", mutator.candidate_count());

    let mut tried = 0;
    for candidate in mutator.candidates() {
        let candidate = candidate?;
        tried += 1;

        let result = run(&candidate.program, EndCondition::NoMoreInstructions);
        debug!(
            index = candidate.index,
            replacement = %candidate.replacement,
            terminated = result.is_some(),
            "evaluated candidate"
        );

        if let Some(accumulator) = result {
            info!(
                "Flipping {} at {} to {} terminates with accumulator {}",
                candidate.original, candidate.index, candidate.replacement, accumulator
            );
            return Ok(Fix {
                index: candidate.index,
                original: candidate.original,
                replacement: candidate.replacement,
                accumulator,
                candidates_tried: tried,
            });
        }
    }

    Err(Error::NoFixFound { candidates: tried })
}

/// Accumulator of the first terminating flip candidate.
pub fn find_fix(program: &Program) -> Result<i64> {
    find_fix_detailed(program).map(|fix| fix.accumulator)
}
