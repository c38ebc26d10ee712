//! Transient [`Notification`]s surfaced to the visitor.

use std::time::Duration;

use derive_more::Display;

/// Transient notification shown over the page.
///
/// Auto-dismisses after a fixed delay instead of demanding an interaction.
#[derive(Clone, Debug)]
pub struct Notification {
    /// [`Kind`] of this [`Notification`].
    pub kind: Kind,

    /// Human-readable message of this [`Notification`].
    pub message: String,

    /// Delay after which this [`Notification`] dismisses itself.
    pub dismiss_after: Duration,
}

impl Notification {
    /// Creates a new [`Kind::Success`] [`Notification`].
    pub fn success(
        message: impl Into<String>,
        dismiss_after: Duration,
    ) -> Self {
        Self {
            kind: Kind::Success,
            message: message.into(),
            dismiss_after,
        }
    }

    /// Creates a new [`Kind::Failure`] [`Notification`].
    pub fn failure(
        message: impl Into<String>,
        dismiss_after: Duration,
    ) -> Self {
        Self {
            kind: Kind::Failure,
            message: message.into(),
            dismiss_after,
        }
    }

    /// Waits out the display delay of this [`Notification`] and drops it.
    pub async fn dismissed(self) {
        tokio::time::sleep(self.dismiss_after).await;
    }
}

/// Kind of a [`Notification`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Kind {
    /// Something completed as the visitor hoped.
    #[display("success")]
    Success,

    /// Something failed, yet the page stays browsable.
    #[display("failure")]
    Failure,
}
