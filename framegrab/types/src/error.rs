/*!
    Error types for the framegrab crate ecosystem.
*/

use std::fmt;

/**
    Error type for the framegrab crate ecosystem.

    Every variant is a direct surface of an underlying failure; there is no
    retry or recovery behind any of them.
*/
#[derive(Debug)]
pub enum Error {
    /// I/O error (file missing, unreadable, permission denied)
    Io(std::io::Error),
    /// The container has no usable video stream or stream metadata
    MissingStream { message: String },
    /// The stream's codec has no available decoder
    UnsupportedCodec { message: String },
    /// Decode or conversion failure reported by the codec layer
    Codec { message: String },
    /// Frame buffer or context allocation failure
    Allocation { message: String },
    /// Malformed or mismatched data (bad buffer shape, invalid parameter)
    InvalidData { message: String },
    /// Frame index past the end of the stream
    FrameOutOfRange { index: u64, count: u64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingStream { message } => write!(f, "missing stream: {message}"),
            Self::UnsupportedCodec { message } => write!(f, "unsupported codec: {message}"),
            Self::Codec { message } => write!(f, "codec error: {message}"),
            Self::Allocation { message } => write!(f, "allocation failure: {message}"),
            Self::InvalidData { message } => write!(f, "invalid data: {message}"),
            Self::FrameOutOfRange { index, count } => {
                write!(f, "frame index {index} out of range (stream has {count} frames)")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Error {
    /**
        Create a missing stream error with the given message.
    */
    pub fn missing_stream(message: impl Into<String>) -> Self {
        Self::MissingStream {
            message: message.into(),
        }
    }

    /**
        Create an unsupported codec error with the given message.
    */
    pub fn unsupported_codec(message: impl Into<String>) -> Self {
        Self::UnsupportedCodec {
            message: message.into(),
        }
    }

    /**
        Create a codec error with the given message.
    */
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /**
        Create an allocation error with the given message.
    */
    pub fn allocation(message: impl Into<String>) -> Self {
        Self::Allocation {
            message: message.into(),
        }
    }

    /**
        Create an invalid data error with the given message.
    */
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /**
        Create a frame index error for the given index and frame count.
    */
    pub fn out_of_range(index: u64, count: u64) -> Self {
        Self::FrameOutOfRange { index, count }
    }

    /**
        Returns true if this is a frame index error.
    */
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::FrameOutOfRange { .. })
    }
}

/**
    Result type alias for the framegrab crate ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;
