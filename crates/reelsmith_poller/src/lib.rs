//! Polling reconciliation loop.
//!
//! One recurring timer drives the whole task list. Each tick queries every
//! non-terminal task in list order, one at a time, and merges each answer
//! before issuing the next query. Query failures are logged and the task keeps
//! its last known state. The timer restarts whenever the task list changes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod poller;

pub use poller::{PollConfig, Poller, PollerHandle, TickSummary};
