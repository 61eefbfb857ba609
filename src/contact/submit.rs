//! Submission seam for the contact form.

use std::time::Duration;

use crate::ErrorCode;
use crate::consts;
use crate::timer;

use super::ContactSubmission;

/// Errors produced by a [`Submitter`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The receiver refused the message.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The receiver could not be reached.
    #[error("submission service unavailable: {0}")]
    Unavailable(String),
}

impl SubmitError {
    /// Message shown to the visitor; internal detail stays in logs.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "Your message could not be accepted. Please check it and try again.",
            Self::Unavailable(_) => "Your message could not be sent right now. Please try again later.",
        }
    }
}

impl ErrorCode for SubmitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "E_SUBMIT_REJECTED",
            Self::Unavailable(_) => "E_SUBMIT_UNAVAILABLE",
        }
    }
}

/// Acknowledgment of a delivered message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Text shown to the visitor.
    pub message: String,
}

/// Delivers a validated contact submission. Enables mocking in tests.
#[async_trait::async_trait(?Send)]
pub trait Submitter {
    /// Deliver `submission`.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitError`] if the receiver refuses or is unreachable.
    async fn submit(&self, submission: &ContactSubmission) -> Result<Receipt, SubmitError>;
}

/// Stand-in for a backend: waits a fixed delay, then always succeeds.
#[derive(Clone, Copy, Debug)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(consts::DEFAULT_SUBMIT_DELAY_MS))
    }
}

impl SimulatedSubmitter {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait::async_trait(?Send)]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, submission: &ContactSubmission) -> Result<Receipt, SubmitError> {
        log::info!(
            "contact: simulating delivery from {} ({} chars) over {}ms",
            submission.email,
            submission.message.chars().count(),
            self.delay.as_millis()
        );
        timer::sleep(self.delay).await;
        Ok(Receipt { message: consts::SUCCESS_MESSAGE.to_owned() })
    }
}
