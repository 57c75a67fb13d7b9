// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Select: resolve a group of cases to exactly one match.
//!
//! With a default case the select never waits: cases are polled once in
//! (shuffled) order and the default wins if none completes. Without one, all
//! cases wait concurrently under a fresh child cancel token; the first wait to
//! finish cancels its siblings and its case makes a non-blocking attempt. A
//! lost race starts a new round.

use futures::future::select_all;
use log::{debug, trace};
use rand::seq::SliceRandom;

use crate::cancel::CancelToken;
use crate::capability::{ChannelReader, ChannelWriter};
use crate::case::{Cancelled, Case, DefaultCase, Outcome, ReadCase, WriteCase};
use crate::config::SelectConfig;
use crate::error::{SelectError, SelectResult};
use crate::handle::{DefaultHandle, ReadHandle, WriteHandle};

/// A one-shot select over runtime-registered cases.
///
/// ```ignore
/// let mut select = Select::new();
/// let msgs = select.read(&rx);
/// let acks = select.write(&ack_tx, Ack);
/// select.wait().await?;
/// if msgs.is_matching()? {
///     handle(msgs.value()?);
/// }
/// ```
pub struct Select<'a> {
    cases: Vec<Box<dyn Case + 'a>>,
    default: Option<DefaultCase>,
    config: SelectConfig,
}

impl<'a> Select<'a> {
    pub fn new() -> Self {
        Self::with_config(SelectConfig::default())
    }

    pub fn with_config(config: SelectConfig) -> Self {
        Self {
            cases: Vec::new(),
            default: None,
            config,
        }
    }

    /// Register a read from `reader`.
    pub fn read<R, T>(&mut self, reader: &'a R) -> ReadHandle<T>
    where
        R: ChannelReader<T>,
        T: Send + Sync + 'a,
    {
        let (case, handle) = ReadCase::new(reader);
        self.cases.push(Box::new(case));
        handle
    }

    /// Register a write of `value` to `writer`.
    pub fn write<W, T>(&mut self, writer: &'a W, value: T) -> WriteHandle
    where
        W: ChannelWriter<T>,
        T: Send + 'a,
    {
        let (case, handle) = WriteCase::new(writer, value);
        self.cases.push(Box::new(case));
        handle
    }

    /// Register the fallback case. Calling this again returns the same case.
    pub fn default_case(&mut self) -> DefaultHandle {
        self.default.get_or_insert_with(DefaultCase::new).handle()
    }

    /// Turn the per-resolution fairness shuffle on or off.
    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.config.shuffle = shuffle;
    }

    /// Number of registered channel cases (the default is not counted).
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Resolve without an external cancel signal.
    pub async fn wait(self) -> SelectResult<()> {
        self.wait_with_cancel(&CancelToken::new()).await
    }

    /// Resolve, giving up with `Cancelled` once `cancel` fires.
    ///
    /// On error no handle becomes ready.
    pub async fn wait_with_cancel(mut self, cancel: &CancelToken) -> SelectResult<()> {
        if self.config.shuffle {
            self.shuffle();
        }
        if self.default.is_some() {
            self.resolve_now()
        } else {
            self.resolve_blocking(cancel).await
        }
    }

    fn shuffle(&mut self) {
        trace!("shuffling {} cases", self.cases.len());
        self.cases.shuffle(&mut rand::thread_rng());
    }

    fn resolve_now(&mut self) -> SelectResult<()> {
        let mut matched = false;
        for case in self.cases.iter_mut() {
            if case.try_complete_poll()? {
                matched = true;
                break;
            }
        }

        if let Some(default) = self.default.as_mut() {
            if !matched {
                debug!("no case ready, taking default");
                default.set_matching();
            }
        }
        self.mark_ready();
        Ok(())
    }

    async fn resolve_blocking(&mut self, cancel: &CancelToken) -> SelectResult<()> {
        if self.cases.is_empty() {
            return Err(SelectError::NoCases);
        }

        let mut round = 0usize;
        loop {
            round += 1;
            trace!("select round {round}: waiting on {} cases", self.cases.len());

            let first = {
                let scope = cancel.child();
                let waits = self
                    .cases
                    .iter()
                    .enumerate()
                    .map(|(index, case)| case.wait_ready(index, &scope));
                let (first, _, rest) = select_all(waits).await;
                scope.cancel();
                drop(rest);
                first
            };

            let Outcome { index, ready } = first.map_err(|Cancelled| SelectError::Cancelled)?;
            if self.cases[index].try_complete(ready)? {
                trace!("select resolved to case {index} after {round} rounds");
                self.mark_ready();
                return Ok(());
            }
            debug!("case {index} lost the race, waiting again");
        }
    }

    fn mark_ready(&mut self) {
        for case in self.cases.iter_mut() {
            case.mark_ready();
        }
        if let Some(default) = self.default.as_mut() {
            default.mark_ready();
        }
    }
}

impl Default for Select<'_> {
    fn default() -> Self {
        Self::new()
    }
}
