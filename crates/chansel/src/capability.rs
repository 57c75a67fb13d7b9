// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Channel capabilities.
//!
//! The select core never touches channel internals. It only needs a
//! readiness wait, a non-blocking attempt, and a closed query on each side.
//! The non-blocking attempt is the linearization point: it must either fully
//! succeed or leave the channel untouched, since many selects may race on
//! the same channel.

use std::future::Future;
use std::sync::Arc;

/// Consumer side of a channel.
pub trait ChannelReader<T>: Sync {
    /// Wait until an item may be available or the channel is closed and
    /// drained. Resolves to `false` only in the latter case.
    ///
    /// `true` is a hint: another reader may take the item first.
    fn wait_to_read(&self) -> impl Future<Output = bool> + Send + '_;

    /// Take an item without waiting.
    fn try_read(&self) -> Option<T>;

    /// True once the channel is closed and nothing is left to read.
    fn is_closed(&self) -> bool;
}

/// Producer side of a channel.
pub trait ChannelWriter<T>: Sync {
    /// Wait until there is room for an item or the channel is closed.
    /// Resolves to `false` once the channel is closed.
    fn wait_to_write(&self) -> impl Future<Output = bool> + Send + '_;

    /// Put an item without waiting. On failure the item is handed back.
    fn try_write(&self, value: T) -> Result<(), T>;

    /// True once no more writes are possible.
    fn is_closed(&self) -> bool;
}

impl<T, C: ChannelReader<T>> ChannelReader<T> for &C {
    fn wait_to_read(&self) -> impl Future<Output = bool> + Send + '_ {
        (**self).wait_to_read()
    }

    fn try_read(&self) -> Option<T> {
        (**self).try_read()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<T, C: ChannelReader<T> + Send> ChannelReader<T> for Arc<C> {
    fn wait_to_read(&self) -> impl Future<Output = bool> + Send + '_ {
        (**self).wait_to_read()
    }

    fn try_read(&self) -> Option<T> {
        (**self).try_read()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<T, C: ChannelWriter<T>> ChannelWriter<T> for &C {
    fn wait_to_write(&self) -> impl Future<Output = bool> + Send + '_ {
        (**self).wait_to_write()
    }

    fn try_write(&self, value: T) -> Result<(), T> {
        (**self).try_write(value)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<T, C: ChannelWriter<T> + Send> ChannelWriter<T> for Arc<C> {
    fn wait_to_write(&self) -> impl Future<Output = bool> + Send + '_ {
        (**self).wait_to_write()
    }

    fn try_write(&self, value: T) -> Result<(), T> {
        (**self).try_write(value)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
