//! Program structure for boot code.

use crate::instruction::Instruction;
use handheld_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ordered, immutable sequence of instructions indexed from 0
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.instructions.get(index).copied()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.instructions.iter().copied()
    }

    /// Indices of every `nop` and `jmp`, in ascending order
    pub fn mutable_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.instructions
            .iter()
            .enumerate()
            .filter(|(_, inst)| inst.is_mutable())
            .map(|(index, _)| index)
    }

    /// Copy of this program with the instruction at `index` replaced
    pub fn with_replacement(&self, index: usize, instruction: Instruction) -> Option<Program> {
        if index >= self.len() {
            return None;
        }
        let mut instructions = self.instructions.clone();
        instructions[index] = instruction;
        Some(Program::new(instructions))
    }
}

/// Parse program text, one instruction per line. Blank lines are skipped.
pub fn parse_program(text: &str) -> Result<Program> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| Instruction::parse(line).map_err(|e| e.at_line(idx + 1)))
        .collect::<Result<Vec<_>>>()
        .map(Program::new)
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_program(s)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Program::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in &self.instructions {
            writeln!(f, "{}", inst)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction::{Acc, Jump, NoOp};

    const SAMPLE: &str = "nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6
";

    #[test]
    fn test_parse_program() {
        let program = parse_program(SAMPLE).unwrap();
        assert_eq!(program.len(), 9);
        assert_eq!(program.get(0), Some(NoOp(0)));
        assert_eq!(program.get(4), Some(Jump(-3)));
        assert_eq!(program.get(8), Some(Acc(6)));
        assert_eq!(program.get(9), None);
    }

    #[test]
    fn test_parse_program_skips_blank_lines() {
        let program = parse_program("\nacc +1\n   \njmp -1\n\n").unwrap();
        assert_eq!(program.instructions(), &[Acc(1), Jump(-1)]);

        assert!(parse_program("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_program_reports_line_number() {
        let err = parse_program("acc +1\n\nnop +0\nmul +2\n").unwrap_err();
        match err {
            Error::InvalidInstruction { line, text, .. } => {
                assert_eq!(line, 4);
                assert_eq!(text, "mul +2");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_mutable_indices() {
        let program = parse_program(SAMPLE).unwrap();
        let indices: Vec<_> = program.mutable_indices().collect();
        assert_eq!(indices, vec![0, 2, 4, 7]);

        let all_acc: Program = vec![Acc(1), Acc(2)].into_iter().collect();
        assert_eq!(all_acc.mutable_indices().count(), 0);
    }

    #[test]
    fn test_with_replacement() {
        let program = parse_program(SAMPLE).unwrap();
        let patched = program.with_replacement(7, NoOp(-4)).unwrap();

        assert_eq!(patched.get(7), Some(NoOp(-4)));
        assert_eq!(program.get(7), Some(Jump(-4)));
        assert_eq!(patched.len(), program.len());
        for idx in (0..program.len()).filter(|&i| i != 7) {
            assert_eq!(patched.get(idx), program.get(idx));
        }

        assert!(program.with_replacement(9, NoOp(0)).is_none());
    }

    #[test]
    fn test_display_renders_canonical_text() {
        let program = parse_program(SAMPLE).unwrap();
        assert_eq!(program.to_string(), SAMPLE);
    }

    #[test]
    fn test_program_serialization() {
        let program: Program = vec![Jump(1), Acc(-2)].into_iter().collect();
        let json = serde_json::to_string(&program).unwrap();
        let deserialized: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, program);
    }
}
