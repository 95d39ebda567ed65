//! Headers, timestamps and colors.

use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wall-clock timestamp split into seconds and nanoseconds since the Unix epoch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Time {
    /// Whole seconds.
    pub sec: i32,
    /// Nanoseconds past `sec`, always below one second.
    pub nanosec: u32,
}

impl Time {
    /// Current wall-clock time. A clock set before the epoch reads as zero.
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Time {
            sec: i32::try_from(elapsed.as_secs()).unwrap_or(i32::MAX),
            nanosec: elapsed.subsec_nanos(),
        }
    }
}

/// Standard metadata for stamped messages.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header {
    /// Acquisition time of the data.
    pub stamp: Time,
    /// Reference frame the data is expressed in.
    pub frame_id: String,
}

impl Header {
    /// Header stamped with the current time.
    pub fn now(frame_id: impl Into<String>) -> Self {
        Header {
            stamp: Time::now(),
            frame_id: frame_id.into(),
        }
    }
}

/// RGBA color with components in `[0, 1]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorRGBA {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl ColorRGBA {
    /// Construct a color from its components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        ColorRGBA { r, g, b, a }
    }
}

impl From<[f32; 4]> for ColorRGBA {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        ColorRGBA { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_now_is_after_epoch() {
        let t = Time::now();
        assert!(t.sec > 0);
        assert!(t.nanosec < 1_000_000_000);
    }

    #[test]
    fn test_header_now_keeps_frame() {
        let header = Header::now("map");
        assert_eq!(header.frame_id, "map");
        assert!(header.stamp > Time::default());
    }
}
