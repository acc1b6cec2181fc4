//! Container writer adapter.
//!
//! The writer owns the two output channels and enforces the emission
//! protocol: a names record for version V is appended strictly before the
//! first values record that claims V, and at most once per distinct V per
//! session. The protocol is driven entirely by the record's dirty flag, so
//! callers must mutate the version only through the record's own mutators.
//!
//! Either both necessary sub-records of a write are appended or the call
//! fails before returning; there is no partial-success mode.

use crate::channel::{ChannelKind, MESSAGE_ENCODING, SCHEMA_ENCODING, WRITER_PROFILE};
use crate::error::Result;
use crate::record::Record;
use crate::wire::{self, Header, StatisticsNames, StatisticsValues};
use mcap::records::MessageHeader;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// Compression applied to the container.
///
/// `None` forces unchunked, uncompressed, immediately-durable writes.
/// `Zstd` enables chunked, compressed writes; appends may then be batched
/// inside the container until a chunk boundary, so flush/durability
/// semantics follow the container's chunking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No chunking, no compression
    #[default]
    None,
    /// Zstandard-compressed chunks
    Zstd,
}

/// Writer session configuration.
#[derive(Debug, Clone, Default)]
pub struct WriterOptions {
    /// Container compression
    pub compression: Compression,
}

impl WriterOptions {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression (builder pattern).
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

/// One registered output channel plus its write cursor.
struct ChannelBinding {
    channel_id: u16,
    sequence: u32,
}

impl ChannelBinding {
    fn register(
        writer: &mut mcap::Writer<BufWriter<File>>,
        kind: ChannelKind,
        topic_prefix: &str,
    ) -> Result<Self> {
        let schema_id =
            writer.add_schema(kind.type_name(), SCHEMA_ENCODING, kind.schema().as_bytes())?;
        let channel_id = writer.add_channel(
            schema_id,
            &kind.topic(topic_prefix),
            MESSAGE_ENCODING,
            &BTreeMap::new(),
        )?;
        Ok(ChannelBinding {
            channel_id,
            sequence: 0,
        })
    }
}

/// Writer session for one statistics stream.
///
/// Single-threaded and synchronous: every call either completes or fails
/// before returning. The session owns its container handle exclusively;
/// dropping it finalizes the container index (errors on that path are
/// ignored, call [`finish`](RecordWriter::finish) to observe them).
pub struct RecordWriter {
    writer: mcap::Writer<BufWriter<File>>,
    names: ChannelBinding,
    values: ChannelBinding,
}

impl RecordWriter {
    /// Create a container at `path` and register the names/values channels
    /// under `topic_prefix`.
    ///
    /// Fails with [`Error::Io`](crate::Error::Io) if the destination cannot
    /// be created, or [`Error::Container`](crate::Error::Container) if the
    /// container rejects channel or schema registration.
    pub fn create(
        path: impl AsRef<Path>,
        topic_prefix: &str,
        options: WriterOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = BufWriter::new(File::create(path)?);

        let write_options = mcap::WriteOptions::new().profile(WRITER_PROFILE);
        let write_options = match options.compression {
            Compression::None => write_options.compression(None).use_chunks(false),
            Compression::Zstd => write_options.compression(Some(mcap::Compression::Zstd)),
        };
        let mut writer = write_options.create(file)?;

        let names = ChannelBinding::register(&mut writer, ChannelKind::Names, topic_prefix)?;
        let values = ChannelBinding::register(&mut writer, ChannelKind::Values, topic_prefix)?;

        debug!(
            path = %path.display(),
            prefix = topic_prefix,
            compression = ?options.compression,
            "opened statistics writer"
        );

        Ok(RecordWriter {
            writer,
            names,
            values,
        })
    }

    /// Append one logical record.
    ///
    /// If the record's version has not been persisted yet, a names record
    /// (labels + version + stamp) is appended first and the record marked
    /// clean; a values record (values + version + stamp) is then appended
    /// unconditionally.
    pub fn write(&mut self, record: &mut Record) -> Result<()> {
        if record.is_version_dirty() {
            let payload = wire::encode(&StatisticsNames {
                header: Header::with_stamp(record.stamp()),
                names: record.labels().to_vec(),
                names_version: record.version(),
            })?;
            Self::append(&mut self.writer, &mut self.names, &payload)?;
            record.mark_version_clean();
            trace!(version = record.version(), "announced names for version");
        }

        let payload = wire::encode(&StatisticsValues {
            header: Header::with_stamp(record.stamp()),
            values: record.values().to_vec(),
            names_version: record.version(),
        })?;
        Self::append(&mut self.writer, &mut self.values, &payload)?;
        Ok(())
    }

    /// Force buffered container state to the backing store without closing
    /// the session. Does not finalize the container index; that happens in
    /// [`finish`](RecordWriter::finish).
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Finalize the container index and close the session.
    pub fn finish(mut self) -> Result<()> {
        self.writer.finish()?;
        Ok(())
    }

    fn append(
        writer: &mut mcap::Writer<BufWriter<File>>,
        binding: &mut ChannelBinding,
        payload: &[u8],
    ) -> Result<()> {
        // Provenance time for the physical record, taken at encode time;
        // independent of the stamp inside the payload.
        let log_time = now_nanos();
        writer.write_to_known_channel(
            &MessageHeader {
                channel_id: binding.channel_id,
                sequence: binding.sequence,
                log_time,
                publish_time: log_time,
            },
            payload,
        )?;
        binding.sequence = binding.sequence.wrapping_add(1);
        Ok(())
    }
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_options_builder() {
        let options = WriterOptions::new().with_compression(Compression::Zstd);
        assert_eq!(options.compression, Compression::Zstd);
        assert_eq!(WriterOptions::default().compression, Compression::None);
    }

    #[test]
    fn test_now_nanos_is_monotone_enough() {
        let a = now_nanos();
        let b = now_nanos();
        assert!(b >= a);
        assert!(a > 0);
    }
}
