#![forbid(unsafe_code)]

//! Replayed controller input.

use std::collections::VecDeque;

use osk_backend::{BackendError, BackendResult, InputSource};
use osk_core::InputSample;

/// [`InputSource`] that hands out a fixed script, then empty samples.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<InputSample>,
    sampled: usize,
    fail_init: bool,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(samples: impl IntoIterator<Item = InputSample>) -> Self {
        Self {
            script: samples.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn push(&mut self, sample: InputSample) {
        self.script.push_back(sample);
    }

    /// Samples still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Number of `sample` calls so far.
    #[must_use]
    pub const fn sampled(&self) -> usize {
        self.sampled
    }
}

impl InputSource for ScriptedInput {
    fn initialize(&mut self) -> BackendResult<()> {
        if self.fail_init {
            Err(BackendError::Rejected("no joypad"))
        } else {
            Ok(())
        }
    }

    fn sample(&mut self) -> InputSample {
        self.sampled += 1;
        self.script.pop_front().unwrap_or(InputSample::EMPTY)
    }
}
