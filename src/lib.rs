//! Statistics stream recording and replay over MCAP.
//!
//! This crate persists a time-series of named scalar measurements to an MCAP
//! log container and reads it back, using a split-record scheme:
//!
//! - A compact **names** record (label list + version tag), appended only
//!   when the label set changes
//! - A **values** record (numbers + version tag), appended on every sample
//!
//! The two physical sub-streams live on sibling topics (`<prefix>/names`,
//! `<prefix>/values`) and are re-correlated on read through a version
//! registry, so a values record always resolves to the exact label list that
//! was in force when it was written, regardless of how the two channels
//! interleave in the file.
//!
//! Payloads are CDR-encoded `plotjuggler_msgs` structs, so the produced files
//! are directly loadable by tools that understand that schema.
//!
//! # Example
//!
//! ```no_run
//! use statstream::{Record, RecordReader, RecordWriter, WriterOptions};
//!
//! # fn main() -> statstream::Result<()> {
//! let mut writer = RecordWriter::create("stats.mcap", "robot/stats", WriterOptions::new())?;
//!
//! let mut record = Record::new();
//! record.labels_mut().extend(["x".to_string(), "y".to_string()]);
//! record.values_mut().extend([1.0, 2.0]);
//! record.set_stamp(1_000_000_000);
//! writer.write(&mut record)?; // emits one names record, one values record
//!
//! record.values_mut()[0] = 3.0;
//! writer.write(&mut record)?; // same version: values record only
//! writer.finish()?;
//!
//! let mut reader = RecordReader::open("stats.mcap", "robot/stats")?;
//! while let Some(sample) = reader.next_record()? {
//!     println!("{:?} = {:?}", sample.labels(), sample.values());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel; // Topic derivation and schema registration data
pub mod error; // Error taxonomy and Result alias
pub mod reader; // Container reader adapter (correlation protocol)
pub mod record; // Logical record: labels + values + version + stamp
pub mod registry; // Version tag -> label list mapping (reader side)
pub mod wire; // CDR wire structs and encode/decode helpers
pub mod writer; // Container writer adapter (emission protocol)

pub use channel::ChannelKind;
pub use error::{Error, Result};
pub use reader::RecordReader;
pub use record::Record;
pub use registry::VersionRegistry;
pub use writer::{Compression, RecordWriter, WriterOptions};
