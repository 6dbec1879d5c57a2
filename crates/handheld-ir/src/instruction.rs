//! Instruction set for the handheld boot code.

use handheld_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Machine state: the next position to execute and the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct State {
    pub position: i64,
    pub accumulator: i64,
}

impl State {
    pub fn new(position: i64, accumulator: i64) -> Self {
        Self {
            position,
            accumulator,
        }
    }

    /// Position 0, accumulator 0
    pub fn initial() -> Self {
        Self::default()
    }

    /// Returns the position as an index into a program of `len` instructions,
    /// or `None` when control has left the program.
    pub fn index_within(&self, len: usize) -> Option<usize> {
        usize::try_from(self.position).ok().filter(|&index| index < len)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos={} acc={}", self.position, self.accumulator)
    }
}

/// Instruction opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    Nop,
    Acc,
    Jmp,
}

impl Opcode {
    pub const ALL: [Opcode; 3] = [Opcode::Nop, Opcode::Acc, Opcode::Jmp];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Acc => "acc",
            Opcode::Jmp => "jmp",
        }
    }

    /// Returns true if this opcode can be flipped into another one
    pub fn is_mutable(&self) -> bool {
        matches!(self, Opcode::Nop | Opcode::Jmp)
    }
}

impl FromStr for Opcode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Opcode::ALL
            .into_iter()
            .find(|opcode| opcode.mnemonic() == s)
            .ok_or_else(|| Error::invalid_instruction(0, s, format!("unknown mnemonic '{}'", s)))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single instruction together with its signed operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    NoOp(i32),
    Acc(i32),
    Jump(i32),
}

impl Instruction {
    pub fn new(opcode: Opcode, value: i32) -> Self {
        match opcode {
            Opcode::Nop => Instruction::NoOp(value),
            Opcode::Acc => Instruction::Acc(value),
            Opcode::Jmp => Instruction::Jump(value),
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::NoOp(_) => Opcode::Nop,
            Instruction::Acc(_) => Opcode::Acc,
            Instruction::Jump(_) => Opcode::Jmp,
        }
    }

    pub fn value(&self) -> i32 {
        match *self {
            Instruction::NoOp(v) | Instruction::Acc(v) | Instruction::Jump(v) => v,
        }
    }

    pub fn is_mutable(&self) -> bool {
        self.opcode().is_mutable()
    }

    /// Compute the state after executing this instruction.
    ///
    /// Positions are not range checked here; leaving the program is the
    /// caller's concern.
    pub fn execute(&self, state: State) -> State {
        match *self {
            Instruction::NoOp(_) => State::new(state.position + 1, state.accumulator),
            Instruction::Acc(v) => State::new(state.position + 1, state.accumulator + i64::from(v)),
            Instruction::Jump(v) => State::new(state.position + i64::from(v), state.accumulator),
        }
    }

    /// Swap `nop` and `jmp`, keeping the operand.
    ///
    /// Flipping an `acc` is a contract violation and always fails with
    /// [`Error::UnflippableInstruction`].
    pub fn flip(&self) -> Result<Instruction> {
        match *self {
            Instruction::NoOp(v) => Ok(Instruction::Jump(v)),
            Instruction::Jump(v) => Ok(Instruction::NoOp(v)),
            Instruction::Acc(_) => Err(Error::UnflippableInstruction {
                index: None,
                instruction: self.to_string(),
            }),
        }
    }

    /// Parse one line of the form `<mnemonic> <signed-integer>`.
    pub fn parse(line: &str) -> Result<Instruction> {
        let mut tokens = line.split_whitespace();
        let (mnemonic, operand) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(mnemonic), Some(operand), None) => (mnemonic, operand),
            _ => {
                return Err(Error::invalid_instruction(
                    0,
                    line,
                    "expected `<mnemonic> <signed integer>`",
                ))
            }
        };

        let opcode = mnemonic
            .parse::<Opcode>()
            .map_err(|_| Error::invalid_instruction(0, line, format!("unknown mnemonic '{}'", mnemonic)))?;
        let value = operand.parse::<i32>().map_err(|e| {
            Error::invalid_instruction(0, line, format!("invalid operand '{}': {}", operand, e))
        })?;

        Ok(Instruction::new(opcode, value))
    }
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Instruction::parse(s)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.opcode(), self.value())
    }
}
