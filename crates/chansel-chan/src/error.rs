// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Channel errors.

use thiserror::Error;

/// The channel was closed before the value could be sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("send on a closed channel")]
pub struct SendError<T>(pub T);

/// The channel is closed and drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("receive on a closed and empty channel")]
pub struct RecvError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrySendError<T> {
    /// Buffer is full.
    #[error("channel is full")]
    Full(T),
    /// Channel closed.
    #[error("channel is closed")]
    Closed(T),
}

impl<T> TrySendError<T> {
    /// Recover the value that could not be sent.
    pub fn into_inner(self) -> T {
        match self {
            TrySendError::Full(v) | TrySendError::Closed(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryRecvError {
    /// No message available right now.
    #[error("channel is empty")]
    Empty,
    /// Channel closed and drained.
    #[error("channel is closed")]
    Closed,
}
