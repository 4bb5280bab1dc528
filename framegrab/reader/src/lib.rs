/*!
    Video frame reading for the framegrab crate ecosystem.

    This crate turns a video file into band-major RGB frames. It is a thin
    adapter: demuxing, decoding and colour conversion are all delegated to
    FFmpeg via `ffmpeg-next`; this crate sequences those calls and reshapes
    the output into the `(frames, 3, height, width)` layout consumers expect.

    # Example

    ```ignore
    use framegrab_reader::VideoReader;

    let reader = VideoReader::open("clip.mp4")?;
    println!("{}", reader.info());

    // Stream frames one at a time
    for frame in reader.frames()? {
        let frame = frame?;
        let red = frame.band(0);
        // ...
    }

    // Or load the whole clip at once
    let buffer = reader.read_all()?;
    assert_eq!(
        buffer.shape(),
        (reader.frame_count(), 3, reader.height(), reader.width()),
    );
    ```

    # Error Handling

    Every failure is a direct surface of an underlying FFmpeg failure or an
    out-of-range frame index. There is no retry and no recovery; errors
    propagate immediately to the caller.
*/

pub use framegrab_types::{Error, Frame, FrameBuffer, Rational, Result, VideoInfo};

mod iter;
mod reader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use iter::FrameIter;
pub use reader::VideoReader;

use std::sync::Once;

static INIT: Once = Once::new();

/// One-time FFmpeg setup. Native log output is silenced so decoder chatter
/// does not end up on stderr.
pub(crate) fn ensure_init() {
    INIT.call_once(|| {
        let _ = ffmpeg_next::init();
        ffmpeg_next::util::log::set_level(ffmpeg_next::util::log::Level::Quiet);
    });
}
