//! Agent state management.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Execution state of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentState {
    #[default]
    Idle,
    Running,
    Finished,
    Error,
}

impl AgentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Error)
    }

    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Error => "ERROR",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Finished,
            3 => Self::Error,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atomically shared [`AgentState`], tagged with the generation of the run
/// that last entered `Running`.
///
/// Transitions out of `Running` name the generation they belong to, so a run
/// that ended can never move the state of a run that started after it.
#[derive(Debug, Default)]
pub(crate) struct ExecutionState(AtomicU64);

const STATE_BITS: u32 = 8;
const STATE_MASK: u64 = (1 << STATE_BITS) - 1;

fn pack(generation: u64, state: AgentState) -> u64 {
    (generation << STATE_BITS) | state as u64
}

fn unpack(raw: u64) -> (u64, AgentState) {
    (raw >> STATE_BITS, AgentState::from_u8((raw & STATE_MASK) as u8))
}

impl ExecutionState {
    pub(crate) fn get(&self) -> AgentState {
        unpack(self.0.load(Ordering::Acquire)).1
    }

    fn swap(&self, current: u64, next: u64) -> Result<(), u64> {
        self.0
            .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
    }

    /// `Idle -> Running` under a new generation, which is returned.
    /// On failure returns the observed state.
    pub(crate) fn try_begin(&self) -> Result<u64, AgentState> {
        let mut raw = self.0.load(Ordering::Acquire);
        loop {
            let (generation, state) = unpack(raw);
            if state != AgentState::Idle {
                return Err(state);
            }
            let next = generation.wrapping_add(1);
            match self.swap(raw, pack(next, AgentState::Running)) {
                Ok(()) => return Ok(next),
                Err(observed) => raw = observed,
            }
        }
    }

    /// `Running -> Finished` for the given run
    pub(crate) fn finish(&self, generation: u64) -> bool {
        self.swap(
            pack(generation, AgentState::Running),
            pack(generation, AgentState::Finished),
        )
        .is_ok()
    }

    /// `Running -> Error` for the given run
    pub(crate) fn fail(&self, generation: u64) -> bool {
        self.swap(
            pack(generation, AgentState::Running),
            pack(generation, AgentState::Error),
        )
        .is_ok()
    }

    /// Terminal (or already idle) back to `Idle`; rejected while running.
    pub(crate) fn reset(&self) -> Result<(), AgentState> {
        let mut raw = self.0.load(Ordering::Acquire);
        loop {
            let (generation, state) = unpack(raw);
            if state == AgentState::Running {
                return Err(state);
            }
            match self.swap(raw, pack(generation, AgentState::Idle)) {
                Ok(()) => return Ok(()),
                Err(observed) => raw = observed,
            }
        }
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentMetrics {
    /// Steps started, including the one that failed
    pub steps: usize,
    pub tool_calls: usize,
    /// Reasoning failures that were contained by the loop
    pub contained_failures: usize,
    pub execution_time_ms: u64,
}

impl AgentMetrics {
    pub fn record_step(&mut self) {
        self.steps += 1;
    }

    pub fn record_tool_calls(&mut self, count: usize) {
        self.tool_calls += count;
    }

    pub fn record_contained_failure(&mut self) {
        self.contained_failures += 1;
    }

    pub fn avg_step_time_ms(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        self.execution_time_ms as f64 / self.steps as f64
    }
}
