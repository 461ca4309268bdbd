//! Diagnostic recording and the persisted store.
//!
//! [`StepRecorder`] is invoked once per simulated step; it buffers a
//! [`DiagnosticRecord`] whenever the step's material is on the watched
//! list, and exclusively owns the lifecycle of the persisted store.
//! Records buffer in memory for the whole run and are flushed exactly
//! once at shutdown — never per step.
//!
//! # Architecture
//!
//! - [`StoreWriter`] buffers rows and writes them to any `Write` sink
//! - [`StoreReader`] reads them back from any `Read` source
//! - All I/O uses a custom binary codec (no serde dependency)
//!
//! # Format
//!
//! ```text
//! [MAGIC "MOTT"] [VERSION u8] [StoreHeader]
//! [histogram flag + optional Histogram]
//! [record count u64] [DiagnosticRecord 1] ... [DiagnosticRecord N]
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod recorder;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use recorder::StepRecorder;
pub use store::{StoreReader, StoreWriter};
pub use types::{DiagnosticRecord, Histogram, StoreHeader};

/// Magic bytes at the start of every store file.
pub const MAGIC: [u8; 4] = *b"MOTT";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
