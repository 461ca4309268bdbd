//! Run lifecycle and the synchronous transport driver.
//!
//! [`TransportRun`] is the primary user-facing API: it validates a
//! [`RunConfig`], builds the geometry, creates the diagnostic store
//! (failing fast if it cannot), and then drives events synchronously —
//! one event at a time, one track at a time, one step at a time. The
//! explicit [`RunState`] machine keeps the lifecycle honest whether the
//! driver here or an external hosting engine advances it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod lifecycle;
pub mod metrics;
pub mod run;

pub use command::RunCommand;
pub use config::{ConfigError, RunConfig};
pub use lifecycle::{RunState, RunStateError};
pub use metrics::RunMetrics;
pub use run::{RunError, RunReport, TransportRun};
