//! Container reader adapter.
//!
//! The reader walks the container's message stream in stored order,
//! classifies each message by its channel (names vs values), and correlates
//! the two sub-streams through a [`VersionRegistry`]: every names record
//! binds a version tag to a label list, and every values record is resolved
//! against that binding before it is surfaced as a logical [`Record`].
//!
//! This is the versioned-lookup policy: it retains every distinct label list
//! for the session's lifetime and is correct under any physical interleave
//! of the two channels. Resolving a values record against a version that was
//! never announced, or re-announcing a version with different labels, is a
//! fatal stream-format error; continuing would silently mis-attribute labels
//! to values.

use crate::channel::ChannelKind;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::registry::VersionRegistry;
use crate::wire::{self, StatisticsNames, StatisticsValues};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// One still-encoded message from the container, classified by channel.
#[derive(Debug)]
struct RawMessage {
    kind: ChannelKind,
    data: Vec<u8>,
}

/// Reader session for one statistics stream.
///
/// Single-threaded and synchronous. The physical stream is consumed in
/// stored order; [`next_record`](RecordReader::next_record) returns one
/// merged logical record per call and `None` once the stream is exhausted.
#[derive(Debug)]
pub struct RecordReader {
    messages: VecDeque<RawMessage>,
    registry: VersionRegistry,
}

impl RecordReader {
    /// Open the container at `path` and bind the names/values channels
    /// declared under `topic_prefix`.
    ///
    /// Channel resolution uses the container's summary section when present
    /// (failing fast if either topic is missing); without a summary it falls
    /// back to classifying messages by topic during the linear scan.
    ///
    /// Fails with [`Error::Io`](crate::Error::Io) if the source cannot be
    /// read, or [`Error::Container`](crate::Error::Container) if the summary
    /// or the message stream is malformed.
    pub fn open(path: impl AsRef<Path>, topic_prefix: &str) -> Result<Self> {
        let path = path.as_ref();
        let buf = fs::read(path)?;

        let names_topic = ChannelKind::Names.topic(topic_prefix);
        let values_topic = ChannelKind::Values.topic(topic_prefix);

        match mcap::Summary::read(&buf)? {
            Some(summary) => {
                for topic in [&names_topic, &values_topic] {
                    if !summary.channels.values().any(|c| c.topic == **topic) {
                        return Err(Error::MissingChannel(topic.clone()));
                    }
                }
            }
            None => {
                debug!(path = %path.display(), "no summary section, using linear scan");
            }
        }

        let mut messages = VecDeque::new();
        let mut skipped = 0usize;
        for message in mcap::MessageStream::new(&buf)? {
            let message = message?;
            let kind = if message.channel.topic == names_topic {
                ChannelKind::Names
            } else if message.channel.topic == values_topic {
                ChannelKind::Values
            } else {
                // Unrelated channel
                skipped += 1;
                continue;
            };
            messages.push_back(RawMessage {
                kind,
                data: message.data.into_owned(),
            });
        }

        debug!(
            path = %path.display(),
            prefix = topic_prefix,
            messages = messages.len(),
            skipped,
            "opened statistics reader"
        );

        Ok(RecordReader {
            messages,
            registry: VersionRegistry::new(),
        })
    }

    /// Advance to the next logical record.
    ///
    /// Names records update the version registry as they are passed;
    /// the first values record encountered is resolved against the registry
    /// and returned merged with its label list. Returns `Ok(None)` once the
    /// physical stream is exhausted with no further values record.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownVersion`](crate::Error::UnknownVersion) if a values
    ///   record references a version never announced
    /// - [`Error::VersionConflict`](crate::Error::VersionConflict) if a
    ///   names record reuses a version tag with different labels
    /// - [`Error::Codec`](crate::Error::Codec) if a payload cannot be decoded
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        while let Some(raw) = self.messages.pop_front() {
            match raw.kind {
                ChannelKind::Names => {
                    let msg: StatisticsNames = wire::decode(&raw.data)?;
                    trace!(
                        version = msg.names_version,
                        labels = msg.names.len(),
                        "names announcement"
                    );
                    self.registry.insert(msg.names_version, msg.names)?;
                }
                ChannelKind::Values => {
                    let msg: StatisticsValues = wire::decode(&raw.data)?;
                    let labels = self
                        .registry
                        .get(msg.names_version)
                        .ok_or(Error::UnknownVersion {
                            version: msg.names_version,
                        })?;
                    return Ok(Some(Record::from_parts(
                        labels.to_vec(),
                        msg.values,
                        msg.names_version,
                        msg.header.stamp.as_nanos(),
                    )));
                }
            }
        }
        Ok(None)
    }

    /// True while unconsumed physical messages remain.
    ///
    /// A `true` result does not guarantee another logical record: the
    /// remainder may consist solely of names records.
    pub fn has_next(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Number of distinct label-list versions announced so far.
    pub fn versions_seen(&self) -> usize {
        self.registry.len()
    }
}
