//! Lines produced by a run.

use std::fmt;

/// How a run ended without an action failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The step budget ran out while still running
    MaxSteps(usize),
    /// A step finished the run early
    Finished { step: usize },
    /// The consumer cancelled the run
    Cancelled { step: usize },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxSteps(max) => write!(f, "Terminated: Reached max steps ({})", max),
            Self::Finished { step } => write!(f, "Terminated: Finished at step {}", step),
            Self::Cancelled { step } => write!(f, "Terminated: Cancelled at step {}", step),
        }
    }
}

/// One line of run output. `Display` renders the transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// A step completed, possibly with a contained failure as its result
    Step { step: usize, result: String },
    /// A step failed and the run stopped in the `Error` state
    Failed { step: usize, message: String },
    Terminated(Termination),
    /// The run never started
    Rejected(String),
}

impl RunEvent {
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::Step { step, .. } | Self::Failed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Whether this is the last event of a run
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Step { .. })
    }
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step { step, result } => write!(f, "Step {}: {}", step, result),
            Self::Failed { step, message } => {
                write!(f, "Step {}: Execution error: {}", step, message)
            }
            Self::Terminated(termination) => termination.fmt(f),
            Self::Rejected(message) => write!(f, "Error: {}", message),
        }
    }
}
