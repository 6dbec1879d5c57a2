//! Instruction model for the handheld boot code.
//!
//! Programs are flat lists of `nop`, `acc` and `jmp` instructions, each with
//! a signed operand. This crate covers parsing, the per-instruction state
//! transition and the single-flip mutations used to repair looping programs.

pub mod instruction;
pub mod mutation;
pub mod program;
pub mod validation;

pub use instruction::{Instruction, Opcode, State};
pub use mutation::{Candidate, Mutator};
pub use program::{parse_program, Program};
pub use validation::{validate_program, Diagnostic, DiagnosticKind};
