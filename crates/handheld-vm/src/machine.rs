//! Execution engine for boot code programs.

use crate::history::History;
use crate::EndCondition;
use handheld_ir::{Program, State};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction ran and control moved to a position not seen before
    Continue(State),
    /// The instruction just run sends control back to a visited position
    Revisit(State),
    /// Control is outside the program
    Halted(State),
}

impl Step {
    pub fn state(&self) -> State {
        match *self {
            Step::Continue(state) | Step::Revisit(state) | Step::Halted(state) => state,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Step::Continue(_))
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub condition: EndCondition,
    pub state: State,
    /// Number of instructions executed
    pub steps: usize,
}

/// A single run over a borrowed program
pub struct Machine<'a> {
    program: &'a Program,
    state: State,
    history: History,
    steps: usize,
    finished: Option<Step>,
}

impl<'a> Machine<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            state: State::initial(),
            history: History::new(program.len()),
            steps: 0,
            finished: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Execute one instruction. Once a terminal step is reached it is
    /// returned again on every further call.
    pub fn step(&mut self) -> Step {
        if let Some(done) = self.finished {
            return done;
        }

        let current = self
            .state
            .index_within(self.program.len())
            .and_then(|index| self.program.get(index));
        let Some(instruction) = current else {
            return self.finish(Step::Halted(self.state));
        };

        let next = instruction.execute(self.state);
        self.steps += 1;
        trace!(from = %self.state, to = %next, %instruction, "step");
        self.state = next;

        if self.history.contains(next.position) {
            return self.finish(Step::Revisit(next));
        }
        self.history.insert(next.position);
        Step::Continue(next)
    }

    fn finish(&mut self, step: Step) -> Step {
        self.finished = Some(step);
        step
    }

    /// Run until either end condition is reached.
    pub fn run_to_end(&mut self) -> Outcome {
        loop {
            let step = self.step();
            if !step.is_terminal() {
                continue;
            }
            let condition = match step {
                Step::Revisit(_) => EndCondition::DuplicateInstruction,
                _ => EndCondition::NoMoreInstructions,
            };
            return Outcome {
                condition,
                state: step.state(),
                steps: self.steps,
            };
        }
    }

    /// States in execution order, starting with the initial state and ending
    /// with the state at which the run stopped.
    pub fn trace(mut self) -> impl Iterator<Item = State> + 'a {
        let mut pending = Some(self.state);
        std::iter::from_fn(move || {
            let current = pending.take()?;
            if self.finished.is_none() {
                let step = self.step();
                if !matches!(step, Step::Halted(_)) {
                    pending = Some(step.state());
                }
            }
            Some(current)
        })
    }
}

/// Run a program from the initial state and report which end condition it hit.
#[instrument(level = "debug", skip(program), fields(len = program.len()))]
pub fn execute_to_end(program: &Program) -> Outcome {
    let mut machine = Machine::new(program);
    let outcome = machine.run_to_end();
    trace!(
        condition = ?outcome.condition,
        steps = outcome.steps,
        visited = machine.history().visited_count(),
        "run finished"
    );
    outcome
}

/// Accumulator at termination if the run ended with `target`, otherwise `None`.
pub fn run(program: &Program, target: EndCondition) -> Option<i64> {
    let outcome = execute_to_end(program);
    (outcome.condition == target).then_some(outcome.state.accumulator)
}
