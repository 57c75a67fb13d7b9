// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Buffered and unbounded MPMC channels that plug into `chansel::Select`.
//!
//! ```ignore
//! let (tx, rx) = chansel_chan::buffered(8);
//! let mut select = chansel::Select::new();
//! let got = select.read(&rx);
//! ```

pub mod channel;
pub mod error;

pub use channel::{buffered, unbounded, Receiver, Sender};
pub use error::{RecvError, SendError, TryRecvError, TrySendError};
