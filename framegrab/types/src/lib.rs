/*!
    Shared types for the framegrab crate ecosystem.

    This crate defines the vocabulary that crosses crate boundaries. It has no
    dependency on FFmpeg bindings, so consumers of decoded data can depend on
    it without linking FFmpeg.

    # Core Types

    - [`VideoInfo`] and [`Rational`] - Stream metadata probed at open time
    - [`Frame`] - One decoded frame in band-major `(3, height, width)` layout
    - [`FrameBuffer`] - A whole clip as a `(frames, 3, height, width)` buffer

    # Error Handling

    - [`Error`] and [`Result`] - Common error types

    # Memory Layout

    Decoders and scalers produce packed pixel rows, i.e. plane-major
    `(height, width, bands)` data. Consumers that process one colour band at
    a time want band-major `(bands, height, width)` data where each band is
    contiguous. [`Frame::from_rgb24`] performs that transpose once, on the
    way out of the decoder; everything downstream works band-major.
*/

mod error;
mod frame;
mod info;

pub use error::{Error, Result};
pub use frame::{Frame, FrameBuffer, BANDS};
pub use info::{Rational, VideoInfo};
