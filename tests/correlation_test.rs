//! Correlation-protocol tests against hand-crafted containers.
//!
//! The reader's correlation contract is exercised here with containers
//! written through the `mcap` crate directly, so malformed streams (unknown
//! versions, conflicting re-announcements, foreign channels) can be produced
//! that the writer adapter would never emit.

use mcap::records::MessageHeader;
use statstream::channel::{ChannelKind, MESSAGE_ENCODING, SCHEMA_ENCODING, WRITER_PROFILE};
use statstream::wire::{self, Header, StatisticsNames, StatisticsValues};
use statstream::{Error, RecordReader};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tempfile::TempDir;

/// Minimal hand-rolled container writer for crafting test streams.
struct RawLog {
    writer: mcap::Writer<BufWriter<File>>,
}

impl RawLog {
    fn create(path: &Path) -> Self {
        let writer = mcap::WriteOptions::new()
            .profile(WRITER_PROFILE)
            .compression(None)
            .use_chunks(false)
            .create(BufWriter::new(File::create(path).unwrap()))
            .unwrap();
        RawLog { writer }
    }

    fn add_stat_channel(&mut self, kind: ChannelKind, prefix: &str) -> u16 {
        self.add_channel(kind.type_name(), kind.schema(), &kind.topic(prefix))
    }

    fn add_channel(&mut self, type_name: &str, schema: &str, topic: &str) -> u16 {
        let schema_id = self
            .writer
            .add_schema(type_name, SCHEMA_ENCODING, schema.as_bytes())
            .unwrap();
        self.writer
            .add_channel(schema_id, topic, MESSAGE_ENCODING, &BTreeMap::new())
            .unwrap()
    }

    fn append(&mut self, channel_id: u16, payload: &[u8]) {
        self.writer
            .write_to_known_channel(
                &MessageHeader {
                    channel_id,
                    sequence: 0,
                    log_time: 0,
                    publish_time: 0,
                },
                payload,
            )
            .unwrap();
    }

    fn finish(mut self) {
        self.writer.finish().unwrap();
    }
}

fn names_payload(version: u32, names: &[&str]) -> Vec<u8> {
    wire::encode(&StatisticsNames {
        header: Header::with_stamp(0),
        names: names.iter().map(|s| s.to_string()).collect(),
        names_version: version,
    })
    .unwrap()
}

fn values_payload(version: u32, values: &[f64]) -> Vec<u8> {
    wire::encode(&StatisticsValues {
        header: Header::with_stamp(0),
        values: values.to_vec(),
        names_version: version,
    })
    .unwrap()
}

// ============================================================================
// Malformed streams
// ============================================================================

#[test]
fn test_unknown_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unknown.mcap");

    let mut log = RawLog::create(&path);
    log.add_stat_channel(ChannelKind::Names, "s");
    let values_ch = log.add_stat_channel(ChannelKind::Values, "s");
    // Values record whose version was never announced
    log.append(values_ch, &values_payload(99, &[1.0]));
    log.finish();

    let mut reader = RecordReader::open(&path, "s").unwrap();
    let err = reader.next_record().unwrap_err();
    assert!(matches!(err, Error::UnknownVersion { version: 99 }));
}

#[test]
fn test_conflicting_reannouncement_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conflict.mcap");

    let mut log = RawLog::create(&path);
    let names_ch = log.add_stat_channel(ChannelKind::Names, "s");
    let values_ch = log.add_stat_channel(ChannelKind::Values, "s");
    log.append(names_ch, &names_payload(1, &["a"]));
    log.append(names_ch, &names_payload(1, &["b"]));
    log.append(values_ch, &values_payload(1, &[1.0]));
    log.finish();

    let mut reader = RecordReader::open(&path, "s").unwrap();
    let err = reader.next_record().unwrap_err();
    assert!(matches!(err, Error::VersionConflict { version: 1 }));
}

#[test]
fn test_identical_reannouncement_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("replay.mcap");

    let mut log = RawLog::create(&path);
    let names_ch = log.add_stat_channel(ChannelKind::Names, "s");
    let values_ch = log.add_stat_channel(ChannelKind::Values, "s");
    log.append(names_ch, &names_payload(1, &["a"]));
    log.append(names_ch, &names_payload(1, &["a"]));
    log.append(values_ch, &values_payload(1, &[2.5]));
    log.finish();

    let mut reader = RecordReader::open(&path, "s").unwrap();
    let sample = reader.next_record().unwrap().unwrap();
    assert_eq!(sample.labels(), ["a"]);
    assert_eq!(sample.values(), [2.5]);
}

// ============================================================================
// Interleaving
// ============================================================================

#[test]
fn test_out_of_version_order_interleave_resolves() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("interleave.mcap");

    // Both announcements land before either values record; the values
    // records then arrive in reverse version order
    let mut log = RawLog::create(&path);
    let names_ch = log.add_stat_channel(ChannelKind::Names, "s");
    let values_ch = log.add_stat_channel(ChannelKind::Values, "s");
    log.append(names_ch, &names_payload(1, &["a"]));
    log.append(names_ch, &names_payload(2, &["a", "b"]));
    log.append(values_ch, &values_payload(2, &[1.0, 2.0]));
    log.append(values_ch, &values_payload(1, &[3.0]));
    log.finish();

    let mut reader = RecordReader::open(&path, "s").unwrap();

    let first = reader.next_record().unwrap().unwrap();
    assert_eq!(first.version(), 2);
    assert_eq!(first.labels(), ["a", "b"]);

    let second = reader.next_record().unwrap().unwrap();
    assert_eq!(second.version(), 1);
    assert_eq!(second.labels(), ["a"]);

    assert!(reader.next_record().unwrap().is_none());
}

#[test]
fn test_trailing_names_yield_no_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tail.mcap");

    let mut log = RawLog::create(&path);
    let names_ch = log.add_stat_channel(ChannelKind::Names, "s");
    let values_ch = log.add_stat_channel(ChannelKind::Values, "s");
    log.append(names_ch, &names_payload(1, &["a"]));
    log.append(values_ch, &values_payload(1, &[1.0]));
    // Announcement with no values record after it
    log.append(names_ch, &names_payload(2, &["a", "b"]));
    log.finish();

    let mut reader = RecordReader::open(&path, "s").unwrap();
    assert!(reader.next_record().unwrap().is_some());
    // The trailing names record is consumed while scanning for values
    assert!(reader.next_record().unwrap().is_none());
    assert_eq!(reader.versions_seen(), 2);
}

// ============================================================================
// Channel resolution
// ============================================================================

#[test]
fn test_foreign_channels_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("foreign.mcap");

    let mut log = RawLog::create(&path);
    let names_ch = log.add_stat_channel(ChannelKind::Names, "s");
    let values_ch = log.add_stat_channel(ChannelKind::Values, "s");
    let other_ch = log.add_channel("other_msgs/msg/Junk", "string junk\n", "other/topic");

    log.append(other_ch, b"unrelated bytes");
    log.append(names_ch, &names_payload(1, &["a"]));
    log.append(other_ch, b"more unrelated bytes");
    log.append(values_ch, &values_payload(1, &[4.0]));
    log.finish();

    let mut reader = RecordReader::open(&path, "s").unwrap();
    let sample = reader.next_record().unwrap().unwrap();
    assert_eq!(sample.labels(), ["a"]);
    assert_eq!(sample.values(), [4.0]);
    assert!(reader.next_record().unwrap().is_none());
}

#[test]
fn test_prefix_match_is_exact_not_substring() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exact.mcap");

    // Topics under a *different* prefix that still end in /names, /values
    let mut log = RawLog::create(&path);
    log.add_stat_channel(ChannelKind::Names, "other/stats");
    log.add_stat_channel(ChannelKind::Values, "other/stats");
    log.finish();

    let err = RecordReader::open(&path, "robot/stats").unwrap_err();
    match err {
        Error::MissingChannel(topic) => assert_eq!(topic, "robot/stats/names"),
        other => panic!("expected MissingChannel, got {other:?}"),
    }
}

#[test]
fn test_missing_values_channel_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("half.mcap");

    let mut log = RawLog::create(&path);
    log.add_stat_channel(ChannelKind::Names, "s");
    log.finish();

    let err = RecordReader::open(&path, "s").unwrap_err();
    assert!(matches!(err, Error::MissingChannel(topic) if topic == "s/values"));
}
