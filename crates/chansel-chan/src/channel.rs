// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Async MPMC channels.
//!
//! A mutex-guarded queue plus one notifier per side. Readiness waits never
//! take or put anything, so any number of selects can watch one channel.
//! Closing is explicit (`Sender::close`) or happens when the last sender
//! drops; items buffered before the close stay readable.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chansel::{ChannelReader, ChannelWriter};
use tokio::sync::Notify;

use crate::error::{RecvError, SendError, TryRecvError, TrySendError};

/// Create a channel holding at most `n` items (at least one).
pub fn buffered<T>(n: usize) -> (Sender<T>, Receiver<T>) {
    with_capacity(Some(n.max(1)))
}

/// Create a channel without a capacity limit.
pub fn unbounded<T>() -> (Sender<T>, Receiver<T>) {
    with_capacity(None)
}

fn with_capacity<T>(capacity: Option<usize>) -> (Sender<T>, Receiver<T>) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State {
            queue: VecDeque::new(),
            closed: false,
            senders: 1,
        }),
        capacity,
        readers: Notify::new(),
        writers: Notify::new(),
    });
    (
        Sender {
            shared: shared.clone(),
        },
        Receiver { shared },
    )
}

struct Shared<T> {
    state: Mutex<State<T>>,
    capacity: Option<usize>,
    /// Woken when an item arrives or the channel closes.
    readers: Notify,
    /// Woken when room frees up or the channel closes.
    writers: Notify,
}

struct State<T> {
    queue: VecDeque<T>,
    closed: bool,
    senders: usize,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // No invariant spans a panic inside the critical sections.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn has_room(&self, state: &State<T>) -> bool {
        self.capacity.map_or(true, |cap| state.queue.len() < cap)
    }

    fn close(&self) {
        self.lock().closed = true;
        self.readers.notify_waiters();
        self.writers.notify_waiters();
    }
}

/// Sending half of a channel. Clone for more producers.
pub struct Sender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Sender<T> {
    /// Send, waiting for room if the buffer is full.
    pub async fn send(&self, val: T) -> Result<(), SendError<T>> {
        let mut val = val;
        loop {
            if !self.wait_writable().await {
                return Err(SendError(val));
            }
            match self.try_send(val) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(v)) => val = v,
                Err(TrySendError::Closed(v)) => return Err(SendError(v)),
            }
        }
    }

    /// Non-blocking send attempt.
    pub fn try_send(&self, val: T) -> Result<(), TrySendError<T>> {
        {
            let mut state = self.shared.lock();
            if state.closed {
                return Err(TrySendError::Closed(val));
            }
            if !self.shared.has_room(&state) {
                return Err(TrySendError::Full(val));
            }
            state.queue.push_back(val);
        }
        self.shared.readers.notify_waiters();
        Ok(())
    }

    /// Wait until there is room (`true`) or the channel is closed (`false`).
    pub async fn wait_writable(&self) -> bool {
        loop {
            let mut notified = pin!(self.shared.writers.notified());
            notified.as_mut().enable();
            {
                let state = self.shared.lock();
                if state.closed {
                    return false;
                }
                if self.shared.has_room(&state) {
                    return true;
                }
            }
            notified.await;
        }
    }

    /// Close the channel for every sender and receiver.
    pub fn close(&self) {
        self.shared.close();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `None` for unbounded channels.
    pub fn capacity(&self) -> Option<usize> {
        self.shared.capacity
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        self.shared.lock().senders += 1;
        Sender {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        let last = {
            let mut state = self.shared.lock();
            state.senders -= 1;
            state.senders == 0
        };
        if last {
            self.shared.close();
        }
    }
}

/// Receiving half of a channel. Clone for more consumers.
pub struct Receiver<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Receiver<T> {
    /// Receive, waiting for an item. Fails once closed and drained.
    pub async fn recv(&self) -> Result<T, RecvError> {
        loop {
            if !self.wait_readable().await {
                return Err(RecvError);
            }
            match self.try_recv() {
                Ok(val) => return Ok(val),
                Err(TryRecvError::Empty) => continue,
                Err(TryRecvError::Closed) => return Err(RecvError),
            }
        }
    }

    /// Non-blocking receive attempt.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        let popped = {
            let mut state = self.shared.lock();
            match state.queue.pop_front() {
                Some(val) => val,
                None if state.closed => return Err(TryRecvError::Closed),
                None => return Err(TryRecvError::Empty),
            }
        };
        self.shared.writers.notify_waiters();
        Ok(popped)
    }

    /// Wait until an item may be available (`true`) or the channel is
    /// closed and drained (`false`).
    pub async fn wait_readable(&self) -> bool {
        loop {
            let mut notified = pin!(self.shared.readers.notified());
            notified.as_mut().enable();
            {
                let state = self.shared.lock();
                if !state.queue.is_empty() {
                    return true;
                }
                if state.closed {
                    return false;
                }
            }
            notified.await;
        }
    }

    /// True once the channel is closed and nothing is left to read.
    pub fn is_closed(&self) -> bool {
        let state = self.shared.lock();
        state.closed && state.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        Receiver {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Send> ChannelReader<T> for Receiver<T> {
    fn wait_to_read(&self) -> impl Future<Output = bool> + Send + '_ {
        self.wait_readable()
    }

    fn try_read(&self) -> Option<T> {
        self.try_recv().ok()
    }

    fn is_closed(&self) -> bool {
        Receiver::is_closed(self)
    }
}

impl<T: Send> ChannelWriter<T> for Sender<T> {
    fn wait_to_write(&self) -> impl Future<Output = bool> + Send + '_ {
        self.wait_writable()
    }

    fn try_write(&self, value: T) -> Result<(), T> {
        self.try_send(value).map_err(TrySendError::into_inner)
    }

    fn is_closed(&self) -> bool {
        Sender::is_closed(self)
    }
}
