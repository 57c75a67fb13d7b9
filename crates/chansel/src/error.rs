// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Select errors.

use thiserror::Error;

/// Result alias used across the crate.
pub type SelectResult<T> = Result<T, SelectError>;

/// Why a select operation or a handle query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    /// A handle was queried before its select finished resolving.
    #[error("case is not ready (forgot to await the select?)")]
    NotReady,

    /// The value of a read case was requested, but another case matched.
    #[error("cannot get the value of a non-matching case")]
    NotMatching,

    /// The channel was closed.
    ///
    /// For a read case this only surfaces from the value accessor: the case
    /// itself matched legitimately. For a write case it aborts resolution.
    #[error("channel closed")]
    ChannelClosed,

    /// The caller's cancel token fired before any case completed.
    #[error("select was cancelled")]
    Cancelled,

    /// A blocking select was resolved with nothing to wait on.
    #[error("select has no cases to wait on")]
    NoCases,
}

impl SelectError {
    /// True for errors that signal misuse of a handle rather than a
    /// runtime outcome.
    pub fn is_misuse(&self) -> bool {
        matches!(self, SelectError::NotReady | SelectError::NotMatching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_message_mentions_await() {
        assert!(SelectError::NotReady.to_string().contains("await"));
    }

    #[test]
    fn misuse_classification() {
        assert!(SelectError::NotReady.is_misuse());
        assert!(SelectError::NotMatching.is_misuse());
        assert!(!SelectError::ChannelClosed.is_misuse());
        assert!(!SelectError::Cancelled.is_misuse());
        assert!(!SelectError::NoCases.is_misuse());
    }
}
