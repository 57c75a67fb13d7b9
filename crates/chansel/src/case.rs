// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Cases: one registered operation each.
//!
//! Two-phase protocol. `wait_ready` suspends until the channel hints that
//! the operation may succeed (or is closed). `try_complete` then makes the
//! non-blocking attempt; `Ok(false)` means a peer took the opportunity first
//! and the select must wait again.

use std::future::Future;

use futures::future::BoxFuture;
use log::debug;

use crate::cancel::CancelToken;
use crate::capability::{ChannelReader, ChannelWriter};
use crate::error::{SelectError, SelectResult};
use crate::handle::{
    DefaultHandle, MatchSlot, ReadHandle, ReadOutcome, ReadSlot, WriteHandle,
};

/// A finished readiness wait, routed back to its case by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub index: usize,
    /// `false` means the channel side is permanently closed.
    pub ready: bool,
}

/// The wait was abandoned through its cancel token. Never means "closed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cancelled;

pub(crate) type WaitFuture<'s> = BoxFuture<'s, Result<Outcome, Cancelled>>;

pub(crate) trait Case: Send {
    fn wait_ready<'s>(&'s self, index: usize, cancel: &'s CancelToken) -> WaitFuture<'s>;

    /// Finalize after a wait. `Ok(false)`: retry the wait.
    fn try_complete(&mut self, ready: bool) -> SelectResult<bool>;

    /// Finalize without waiting. `Ok(false)`: not satisfiable right now.
    fn try_complete_poll(&mut self) -> SelectResult<bool>;

    /// Publish the result to the caller's handle.
    fn mark_ready(&mut self);
}

async fn race_cancel<F>(index: usize, cancel: &CancelToken, wait: F) -> Result<Outcome, Cancelled>
where
    F: Future<Output = bool>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Cancelled),
        ready = wait => Ok(Outcome { index, ready }),
    }
}

pub(crate) struct ReadCase<'a, R, T> {
    reader: &'a R,
    outcome: Option<ReadOutcome<T>>,
    slot: ReadSlot<T>,
}

impl<'a, R, T> ReadCase<'a, R, T>
where
    R: ChannelReader<T>,
{
    pub fn new(reader: &'a R) -> (Self, ReadHandle<T>) {
        let slot = ReadSlot::default();
        let case = Self {
            reader,
            outcome: None,
            slot: slot.clone(),
        };
        (case, ReadHandle::new(slot))
    }

    fn take(&mut self) -> bool {
        match self.reader.try_read() {
            Some(value) => {
                self.outcome = Some(ReadOutcome::Value(value));
                true
            }
            None => false,
        }
    }
}

impl<'a, R, T> Case for ReadCase<'a, R, T>
where
    R: ChannelReader<T>,
    T: Send + Sync,
{
    fn wait_ready<'s>(&'s self, index: usize, cancel: &'s CancelToken) -> WaitFuture<'s> {
        let reader = self.reader;
        Box::pin(race_cancel(index, cancel, reader.wait_to_read()))
    }

    fn try_complete(&mut self, ready: bool) -> SelectResult<bool> {
        if !ready {
            // Closed and drained: a legitimate match with no value.
            self.outcome = Some(ReadOutcome::Closed);
            return Ok(true);
        }
        Ok(self.take())
    }

    fn try_complete_poll(&mut self) -> SelectResult<bool> {
        if self.take() {
            return Ok(true);
        }
        if self.reader.is_closed() {
            self.outcome = Some(ReadOutcome::Closed);
            return Ok(true);
        }
        Ok(false)
    }

    fn mark_ready(&mut self) {
        let outcome = self.outcome.take().unwrap_or(ReadOutcome::Missed);
        let _ = self.slot.set(outcome);
    }
}

pub(crate) struct WriteCase<'a, W, T> {
    writer: &'a W,
    /// Held until a write succeeds.
    value: Option<T>,
    matching: bool,
    slot: MatchSlot,
}

impl<'a, W, T> WriteCase<'a, W, T>
where
    W: ChannelWriter<T>,
{
    pub fn new(writer: &'a W, value: T) -> (Self, WriteHandle) {
        let slot = MatchSlot::default();
        let case = Self {
            writer,
            value: Some(value),
            matching: false,
            slot: slot.clone(),
        };
        (case, WriteHandle::new(slot))
    }

    fn put(&mut self) -> bool {
        let Some(value) = self.value.take() else {
            return self.matching;
        };
        match self.writer.try_write(value) {
            Ok(()) => {
                self.matching = true;
                true
            }
            Err(value) => {
                self.value = Some(value);
                false
            }
        }
    }
}

impl<'a, W, T> Case for WriteCase<'a, W, T>
where
    W: ChannelWriter<T>,
    T: Send,
{
    fn wait_ready<'s>(&'s self, index: usize, cancel: &'s CancelToken) -> WaitFuture<'s> {
        let writer = self.writer;
        Box::pin(race_cancel(index, cancel, writer.wait_to_write()))
    }

    fn try_complete(&mut self, ready: bool) -> SelectResult<bool> {
        if !ready {
            debug!("write target closed while waiting");
            return Err(SelectError::ChannelClosed);
        }
        Ok(self.put())
    }

    fn try_complete_poll(&mut self) -> SelectResult<bool> {
        if self.put() {
            return Ok(true);
        }
        if self.writer.is_closed() {
            debug!("write target already closed");
            return Err(SelectError::ChannelClosed);
        }
        Ok(false)
    }

    fn mark_ready(&mut self) {
        let _ = self.slot.set(self.matching);
    }
}

/// Fallback case. Has no channel; the select decides whether it matched.
#[derive(Debug)]
pub(crate) struct DefaultCase {
    matching: bool,
    slot: MatchSlot,
}

impl DefaultCase {
    pub fn new() -> Self {
        Self {
            matching: false,
            slot: MatchSlot::default(),
        }
    }

    pub fn handle(&self) -> DefaultHandle {
        DefaultHandle::new(self.slot.clone())
    }

    pub fn set_matching(&mut self) {
        self.matching = true;
    }

    pub fn mark_ready(&mut self) {
        let _ = self.slot.set(self.matching);
    }

    #[cfg(test)]
    fn slot(&self) -> &MatchSlot {
        &self.slot
    }
}
