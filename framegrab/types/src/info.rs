/*!
    Stream metadata probed when a video file is opened.
*/

use std::fmt;
use std::time::Duration;

/**
    A frame rate expressed as an exact fraction.

    Containers carry frame rates as rationals (e.g. 30000/1001 for 29.97 fps);
    keeping the fraction avoids rounding until a float is actually needed.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational number.

        # Panics

        Panics if `den` is zero.
    */
    #[inline]
    pub const fn new(num: i32, den: i32) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    /**
        Convert to f64.
    */
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl From<(i32, i32)> for Rational {
    fn from((num, den): (i32, i32)) -> Self {
        Self::new(num, den)
    }
}

/**
    Metadata about a video stream, captured once when the file is opened.

    All fields are declared values from the container; none are re-validated
    against the decoded stream. In particular `frame_count` is what the
    container claims, which badly muxed files can get wrong.
*/
#[derive(Clone, Debug)]
pub struct VideoInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames the container declares.
    pub frame_count: u64,
    /// Declared frame rate.
    pub frame_rate: Rational,
    /// Total stream duration.
    pub duration: Duration,
    /// Short codec name (e.g. "h264").
    pub codec_name: String,
    /// Descriptive codec name (e.g. "H.264 / AVC / MPEG-4 AVC").
    pub codec_long_name: String,
}

impl VideoInfo {
    /**
        Declared frame rate as frames per second.
    */
    pub fn fps(&self) -> f64 {
        self.frame_rate.to_f64()
    }

    /**
        Byte length of one band-major RGB frame at this resolution.
    */
    pub fn frame_len(&self) -> usize {
        3 * self.width as usize * self.height as usize
    }
}

impl fmt::Display for VideoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Codec: {} ({}); Time: {:.2} s ({} frames @ {:.1} Hz); Size (w x h): {} x {} pixels",
            self.codec_long_name,
            self.codec_name,
            self.duration.as_secs_f64(),
            self.frame_count,
            self.fps(),
            self.width,
            self.height,
        )
    }
}
