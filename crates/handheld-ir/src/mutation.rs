//! Single-instruction flip mutations for boot code programs.

use crate::instruction::Instruction;
use crate::program::Program;
use handheld_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A program with exactly one instruction flipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub index: usize,
    pub original: Instruction,
    pub replacement: Instruction,
    pub program: Program,
}

/// Generates flip candidates of a program
pub struct Mutator<'a> {
    program: &'a Program,
}

impl<'a> Mutator<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Number of candidates `candidates` will yield
    pub fn candidate_count(&self) -> usize {
        self.program.mutable_indices().count()
    }

    /// Flip the instruction at `index` into a full program copy.
    pub fn flip_at(&self, index: usize) -> Result<Candidate> {
        let mut instructions = self.program.instructions().to_vec();
        let slot = instructions.get_mut(index).ok_or_else(|| Error::UnflippableInstruction {
            index: Some(index),
            instruction: format!("<index {} out of {}>", index, self.program.len()),
        })?;
        let original = *slot;
        let replacement = original.flip().map_err(|_| Error::UnflippableInstruction {
            index: Some(index),
            instruction: original.to_string(),
        })?;
        *slot = replacement;
        trace!(index, %original, %replacement, "flipped instruction");

        Ok(Candidate {
            index,
            original,
            replacement,
            program: Program::new(instructions),
        })
    }

    /// Lazily yields one candidate per `nop`/`jmp`, in ascending index order.
    pub fn candidates(&self) -> impl Iterator<Item = Result<Candidate>> + '_ {
        self.program
            .mutable_indices()
            .map(move |index| self.flip_at(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction::{Acc, Jump, NoOp};

    fn sample() -> Program {
        vec![NoOp(0), Acc(1), Jump(4), Acc(3), Jump(-3)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_candidates_in_index_order() {
        let program = sample();
        let mutator = Mutator::new(&program);
        assert_eq!(mutator.candidate_count(), 3);

        let candidates: Vec<Candidate> = mutator.candidates().collect::<Result<_>>().unwrap();
        let indices: Vec<usize> = candidates.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 2, 4]);

        assert_eq!(candidates[0].original, NoOp(0));
        assert_eq!(candidates[0].replacement, Jump(0));
        assert_eq!(candidates[2].program.get(4), Some(NoOp(-3)));
        assert_eq!(candidates[2].program.get(0), Some(NoOp(0)));
    }

    #[test]
    fn test_each_candidate_differs_in_one_place() {
        let program = sample();
        let mutator = Mutator::new(&program);

        for candidate in mutator.candidates() {
            let candidate = candidate.unwrap();
            let differing: Vec<usize> = (0..program.len())
                .filter(|&i| program.get(i) != candidate.program.get(i))
                .collect();
            assert_eq!(differing, vec![candidate.index]);
        }
    }

    #[test]
    fn test_no_candidates_for_all_acc_program() {
        let program: Program = vec![Acc(1), Acc(-1)].into_iter().collect();
        let mutator = Mutator::new(&program);
        assert_eq!(mutator.candidate_count(), 0);
        assert_eq!(mutator.candidates().count(), 0);
    }

    #[test]
    fn test_flip_at_acc_fails_with_index() {
        let program = sample();
        let err = Mutator::new(&program).flip_at(3).unwrap_err();
        assert!(matches!(
            err,
            Error::UnflippableInstruction { index: Some(3), ref instruction } if instruction == "acc +3"
        ));
    }

    #[test]
    fn test_flip_at_matches_with_replacement() {
        let program = sample();
        let candidate = Mutator::new(&program).flip_at(2).unwrap();
        assert_eq!(candidate.original, Jump(4));
        assert_eq!(candidate.replacement, NoOp(4));
        assert_eq!(Some(candidate.program), program.with_replacement(2, NoOp(4)));
    }

    #[test]
    fn test_flip_at_out_of_range_fails() {
        let program = sample();
        let err = Mutator::new(&program).flip_at(5).unwrap_err();
        assert!(matches!(err, Error::UnflippableInstruction { index: Some(5), .. }));
    }
}
