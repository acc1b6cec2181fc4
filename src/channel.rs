//! Topic derivation and schema registration data.
//!
//! Each logical record kind maps to exactly one container channel per open
//! session. Topics are derived from a caller-supplied prefix plus a fixed
//! suffix, and each channel is declared with a `ros2msg` schema so consumers
//! can self-describe the stream. The two schema literals below are the
//! authoritative definition of the wire layout; they must round-trip through
//! the codec unchanged across versions of this crate.

/// Encoding label registered for schemas.
pub const SCHEMA_ENCODING: &str = "ros2msg";

/// Encoding label registered for channel messages.
pub const MESSAGE_ENCODING: &str = "ros2msg";

/// Profile string recorded in the container header.
pub const WRITER_PROFILE: &str = "ros2msg";

/// Topic suffix for the names channel.
pub const NAMES_TOPIC_SUFFIX: &str = "/names";

/// Topic suffix for the values channel.
pub const VALUES_TOPIC_SUFFIX: &str = "/values";

/// The two physical record kinds making up a statistics stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Label list + version tag, appended only when the label set changes
    Names,
    /// Sample values + version tag, appended on every write
    Values,
}

impl ChannelKind {
    /// Full topic for this kind under the given prefix.
    pub fn topic(self, prefix: &str) -> String {
        let mut topic = String::with_capacity(prefix.len() + self.suffix().len());
        topic.push_str(prefix);
        topic.push_str(self.suffix());
        topic
    }

    /// Fixed topic suffix for this kind.
    pub fn suffix(self) -> &'static str {
        match self {
            ChannelKind::Names => NAMES_TOPIC_SUFFIX,
            ChannelKind::Values => VALUES_TOPIC_SUFFIX,
        }
    }

    /// Fully-qualified message type name registered with the schema.
    pub fn type_name(self) -> &'static str {
        match self {
            ChannelKind::Names => "plotjuggler_msgs/msg/StatisticsNames",
            ChannelKind::Values => "plotjuggler_msgs/msg/StatisticsValues",
        }
    }

    /// `ros2msg` schema text declared for this kind's channel.
    pub fn schema(self) -> &'static str {
        match self {
            ChannelKind::Names => NAMES_SCHEMA,
            ChannelKind::Values => VALUES_SCHEMA,
        }
    }
}

const NAMES_SCHEMA: &str = r#"
# header
std_msgs/Header header

# Statistics names
string[] names
uint32 names_version #This is increased each time names change

================================================================================
MSG: std_msgs/Header
# Standard metadata for higher-level stamped data types.
# This is generally used to communicate timestamped data
# in a particular coordinate frame.

# Two-integer timestamp that is expressed as seconds and nanoseconds.
builtin_interfaces/Time stamp

# Transform frame with which this data is associated.
string frame_id

================================================================================
MSG: builtin_interfaces/Time
# This message communicates ROS Time defined here:
# https://design.ros2.org/articles/clock_and_time.html

# The seconds component, valid over all int32 values.
int32 sec

# The nanoseconds component, valid in the range [0, 10e9).
uint32 nanosec
"#;

const VALUES_SCHEMA: &str = r#"
# header
std_msgs/Header header

# Statistics
float64[] values
uint32 names_version # The values vector corresponds to the name vector with the same name

================================================================================
MSG: std_msgs/Header
# Standard metadata for higher-level stamped data types.
# This is generally used to communicate timestamped data
# in a particular coordinate frame.

# Two-integer timestamp that is expressed as seconds and nanoseconds.
builtin_interfaces/Time stamp

# Transform frame with which this data is associated.
string frame_id

================================================================================
MSG: builtin_interfaces/Time
# This message communicates ROS Time defined here:
# https://design.ros2.org/articles/clock_and_time.html

# The seconds component, valid over all int32 values.
int32 sec

# The nanoseconds component, valid in the range [0, 10e9).
uint32 nanosec
"#;
