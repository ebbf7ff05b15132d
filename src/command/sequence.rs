// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered command sequences with short-circuit execution.
//!
//! Multi-step operations such as zone cleaning rely on each step's side
//! effect being in place before the next step is sent. A
//! [`CommandSequence`] runs its steps one at a time and stops at the first
//! failure; the remaining steps are never sent.

use crate::command::{Command, RawCommand};
use crate::error::ProtocolError;
use crate::protocol::DeviceTransport;

/// Steps of one operation plus the message logged if any of them fails.
///
/// # Examples
///
/// ```
/// use mirobo_lib::command::{ChargeCommand, CommandSequence};
///
/// let seq = CommandSequence::single("Unable to return home", &ChargeCommand);
/// assert_eq!(seq.len(), 1);
/// assert_eq!(seq.failure_message(), "Unable to return home");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSequence {
    failure_message: &'static str,
    steps: Vec<RawCommand>,
}

impl CommandSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            failure_message,
            steps: Vec::new(),
        }
    }

    /// Creates a one-step sequence.
    #[must_use]
    pub fn single(failure_message: &'static str, command: &impl Command) -> Self {
        Self::new(failure_message).then(command)
    }

    /// Appends a step.
    #[must_use]
    pub fn then(mut self, command: &impl Command) -> Self {
        self.steps.push(command.to_raw());
        self
    }

    /// Returns the message logged on failure.
    #[must_use]
    pub fn failure_message(&self) -> &'static str {
        self.failure_message
    }

    /// Returns the steps in send order.
    #[must_use]
    pub fn steps(&self) -> &[RawCommand] {
        &self.steps
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if there are no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sends every step in order, aborting at the first failure.
    ///
    /// The failing step is logged with this sequence's failure message and
    /// the fault kind; later steps are skipped.
    pub async fn run<T: DeviceTransport>(&self, transport: &T) -> SequenceOutcome {
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(method = step.method(), params = ?step.params_ref(), "Sending raw command");

            if let Err(error) = transport
                .raw_command(step.method(), step.params_ref())
                .await
            {
                tracing::error!(
                    fault = %error.kind(),
                    method = step.method(),
                    step = index,
                    skipped = self.steps.len() - index - 1,
                    "{}: {error}",
                    self.failure_message
                );
                return SequenceOutcome::Aborted {
                    step: index,
                    method: step.method().to_string(),
                    error,
                };
            }
        }
        SequenceOutcome::Completed
    }
}

/// Result of running a [`CommandSequence`].
#[derive(Debug)]
pub enum SequenceOutcome {
    /// Every step succeeded.
    Completed,
    /// A step failed and the rest were not sent.
    Aborted {
        /// Zero-based index of the failing step.
        step: usize,
        /// Method of the failing step.
        method: String,
        /// The transport error.
        error: ProtocolError,
    },
}

impl SequenceOutcome {
    /// Returns `true` if every step succeeded.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
