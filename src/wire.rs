//! CDR wire structs and encode/decode helpers.
//!
//! These structs mirror the `plotjuggler_msgs` message definitions field for
//! field; the `ros2msg` literals in [`crate::channel`] are their authoritative
//! description. Field-level binary layout (alignment, sequence length
//! prefixes, the 4-byte encapsulation header) is delegated to the `cdr`
//! crate and treated as opaque here.
//!
//! # Message shapes
//!
//! ```text
//! names:  header { stamp { sec: i32, nanosec: u32 }, frame_id: string }
//!         names: sequence<string>
//!         names_version: u32
//!
//! values: header { stamp { sec: i32, nanosec: u32 }, frame_id: string }
//!         values: sequence<f64>
//!         names_version: u32
//! ```

use crate::error::Result;
use cdr::{CdrLe, Infinite};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Nanoseconds per second, for stamp conversions.
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Two-integer timestamp (`builtin_interfaces/Time`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    /// Seconds component, valid over all int32 values
    pub sec: i32,
    /// Nanoseconds component, valid in `[0, 10^9)`
    pub nanosec: u32,
}

impl Time {
    /// Split a nanosecond epoch stamp into (seconds, nanoseconds).
    pub fn from_nanos(stamp_ns: u64) -> Self {
        Time {
            sec: (stamp_ns / NANOS_PER_SEC) as i32,
            nanosec: (stamp_ns % NANOS_PER_SEC) as u32,
        }
    }

    /// Recombine into a nanosecond epoch stamp.
    ///
    /// A negative seconds component (pre-epoch, or a malformed payload)
    /// saturates to zero seconds instead of wrapping.
    pub fn as_nanos(self) -> u64 {
        u64::try_from(self.sec).unwrap_or(0) * NANOS_PER_SEC + self.nanosec as u64
    }
}

/// Standard stamped-message header (`std_msgs/Header`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Sample timestamp carried inside the payload
    pub stamp: Time,
    /// Frame identifier; unused by this crate beyond pass-through
    pub frame_id: String,
}

impl Header {
    /// Header with the given nanosecond stamp and an empty frame id.
    pub fn with_stamp(stamp_ns: u64) -> Self {
        Header {
            stamp: Time::from_nanos(stamp_ns),
            frame_id: String::new(),
        }
    }
}

/// `plotjuggler_msgs/msg/StatisticsNames` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsNames {
    /// Stamp + frame id
    pub header: Header,
    /// Ordered label list; positionally correlated with values
    pub names: Vec<String>,
    /// Version tag identifying this exact label list
    pub names_version: u32,
}

/// `plotjuggler_msgs/msg/StatisticsValues` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsValues {
    /// Stamp + frame id
    pub header: Header,
    /// Sample values; `values[i]` belongs to the label at the same index
    /// under `names_version`
    pub values: Vec<f64>,
    /// Version tag of the label list these values correspond to
    pub names_version: u32,
}

/// CDR-encode a payload struct, encapsulation header included.
pub fn encode<T: Serialize>(payload: &T) -> Result<Vec<u8>> {
    Ok(cdr::serialize::<_, _, CdrLe>(payload, Infinite)?)
}

/// Decode a CDR byte buffer produced by [`encode`] (or any CDR writer
/// emitting the standard encapsulation header).
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    Ok(cdr::deserialize::<T>(data)?)
}
