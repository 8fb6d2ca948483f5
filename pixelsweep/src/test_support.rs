//! Test-only samplers and runners with deterministic behavior.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ffi::OsString;

use anyhow::{Result, anyhow};

use crate::io::process::ProcessRunner;
use crate::sampler::Sampler;

/// Sampler that cycles through scripted values, ignoring the requested range.
///
/// An empty script falls back to the range minimum.
pub struct FixedSampler {
    reals: Vec<f64>,
    ints: Vec<i64>,
    real_pos: usize,
    int_pos: usize,
}

impl FixedSampler {
    pub fn new(reals: Vec<f64>, ints: Vec<i64>) -> Self {
        Self {
            reals,
            ints,
            real_pos: 0,
            int_pos: 0,
        }
    }
}

impl Sampler for FixedSampler {
    fn uniform_real(&mut self, min: f64, _max: f64) -> f64 {
        if self.reals.is_empty() {
            return min;
        }
        let value = self.reals[self.real_pos % self.reals.len()];
        self.real_pos += 1;
        value
    }

    fn uniform_int(&mut self, min: i64, _max: i64) -> i64 {
        if self.ints.is_empty() {
            return min;
        }
        let value = self.ints[self.int_pos % self.ints.len()];
        self.int_pos += 1;
        value
    }
}

/// Runner that records every command and fails the calls at the given
/// zero-based indices.
#[derive(Default)]
pub struct ScriptedRunner {
    fail_on: BTreeSet<usize>,
    calls: RefCell<Vec<Vec<OsString>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fail_on: indices.into_iter().collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Commands received so far, in call order, rendered lossily as UTF-8.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .map(|call| {
                call.iter()
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect()
            })
            .collect()
    }

    /// Commands received so far, exactly as passed to the runner.
    pub fn raw_calls(&self) -> Vec<Vec<OsString>> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, command: &[OsString]) -> Result<()> {
        let mut calls = self.calls.borrow_mut();
        let index = calls.len();
        calls.push(command.to_vec());
        if self.fail_on.contains(&index) {
            return Err(anyhow!("scripted failure #{index}"));
        }
        Ok(())
    }
}
