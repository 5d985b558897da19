use std::fmt::Display;

/// Whether a [`Feedback`] reports a success or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// The single status line shown after a mutation attempt.
///
/// Overwritten by the next completed operation and never expires on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FeedbackKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FeedbackKind::Error,
        }
    }

    /// Error feedback for a failed gateway call, rendered as `Error: <message>`.
    pub fn failure(err: &impl Display) -> Self {
        Self::error(format!("Error: {err}"))
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}
