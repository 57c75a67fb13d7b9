// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Dynamic multi-way select over channels.
//!
//! Register any number of reads and writes (plus an optional default) on a
//! [`Select`], resolve it, then ask each handle whether it was the one.
//! Exactly one case matches per resolution, even when other selects race on
//! the same channels.
//!
//! Components:
//! - capability — what a channel must offer (readiness wait, try-op, closed)
//! - cancel — cooperative cancel tokens, also used to bound a select's wait
//! - case — read/write/default cases and their two-phase protocol
//! - handle — caller-facing result handles
//! - select — the orchestrator: fairness shuffle, blocking race, retry, poll
//! - config/error — options and the error taxonomy

pub mod cancel;
pub mod capability;
mod case;
pub mod config;
pub mod error;
pub mod handle;
pub mod select;

pub use cancel::CancelToken;
pub use capability::{ChannelReader, ChannelWriter};
pub use config::SelectConfig;
pub use error::{SelectError, SelectResult};
pub use handle::{DefaultHandle, ReadHandle, WriteHandle};
pub use select::Select;
