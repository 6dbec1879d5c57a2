//! Static checks for boot code programs.
//!
//! These are lints: they never change how a program executes.

use crate::instruction::Instruction;
use crate::program::Program;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Jump lands before the start or beyond the end of the program
    JumpOutOfRange { target: i64 },
    /// `jmp +0` never makes progress
    SelfLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub index: usize,
    pub instruction: Instruction,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::JumpOutOfRange { target } => write!(
                f,
                "{} at {} jumps to {}, outside the program",
                self.instruction, self.index, target
            ),
            DiagnosticKind::SelfLoop => write!(f, "{} at {} loops on itself", self.instruction, self.index),
        }
    }
}

/// Collect diagnostics for a program. Landing exactly one past the last
/// instruction is a clean exit and is not reported.
pub fn validate_program(program: &Program) -> Vec<Diagnostic> {
    let len = program.len() as i64;

    program
        .iter()
        .enumerate()
        .filter_map(|(index, instruction)| {
            let Instruction::Jump(offset) = instruction else {
                return None;
            };
            let kind = if offset == 0 {
                DiagnosticKind::SelfLoop
            } else {
                let target = index as i64 + i64::from(offset);
                if (0..=len).contains(&target) {
                    return None;
                }
                DiagnosticKind::JumpOutOfRange { target }
            };
            Some(Diagnostic {
                index,
                instruction,
                kind,
            })
        })
        .collect()
}
