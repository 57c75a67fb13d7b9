// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Result handles returned when a case is registered.
//!
//! Each handle shares a write-once slot with its case. The select publishes
//! into the slot when it marks the case ready; until then every query fails
//! with `NotReady`. After publication the slot never changes, so repeated
//! queries agree.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{SelectError, SelectResult};

/// Final state of a read case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReadOutcome<T> {
    /// Another case matched.
    Missed,
    /// Matched with an item taken from the channel.
    Value(T),
    /// Matched because the channel was closed and drained.
    Closed,
}

pub(crate) type ReadSlot<T> = Arc<OnceLock<ReadOutcome<T>>>;
pub(crate) type MatchSlot = Arc<OnceLock<bool>>;

fn matching_of(slot: &OnceLock<bool>) -> SelectResult<bool> {
    slot.get().copied().ok_or(SelectError::NotReady)
}

/// Handle to a registered read.
pub struct ReadHandle<T> {
    slot: ReadSlot<T>,
}

impl<T> ReadHandle<T> {
    pub(crate) fn new(slot: ReadSlot<T>) -> Self {
        Self { slot }
    }

    /// Whether the select has finished resolving.
    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Whether this read was the selected case.
    ///
    /// A read on a closed, drained channel counts as a match.
    pub fn is_matching(&self) -> SelectResult<bool> {
        match self.slot.get() {
            None => Err(SelectError::NotReady),
            Some(ReadOutcome::Missed) => Ok(false),
            Some(_) => Ok(true),
        }
    }

    /// The received item, or `ChannelClosed` if the match was a closure.
    pub fn value(&self) -> SelectResult<&T> {
        self.try_value()?.ok_or(SelectError::ChannelClosed)
    }

    /// Like [`value`](Self::value), but a closure match yields `Ok(None)`.
    pub fn try_value(&self) -> SelectResult<Option<&T>> {
        match self.slot.get() {
            None => Err(SelectError::NotReady),
            Some(ReadOutcome::Missed) => Err(SelectError::NotMatching),
            Some(ReadOutcome::Closed) => Ok(None),
            Some(ReadOutcome::Value(v)) => Ok(Some(v)),
        }
    }
}

impl<T> Clone for ReadHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadHandle")
            .field("outcome", &self.slot.get())
            .finish()
    }
}

/// Handle to a registered write.
#[derive(Debug, Clone)]
pub struct WriteHandle {
    slot: MatchSlot,
}

impl WriteHandle {
    pub(crate) fn new(slot: MatchSlot) -> Self {
        Self { slot }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Whether the value was written to the channel.
    pub fn is_matching(&self) -> SelectResult<bool> {
        matching_of(&self.slot)
    }
}

/// Handle to the default (fallback) case.
#[derive(Debug, Clone)]
pub struct DefaultHandle {
    slot: MatchSlot,
}

impl DefaultHandle {
    pub(crate) fn new(slot: MatchSlot) -> Self {
        Self { slot }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Whether no channel case could complete without waiting.
    pub fn is_matching(&self) -> SelectResult<bool> {
        matching_of(&self.slot)
    }
}
