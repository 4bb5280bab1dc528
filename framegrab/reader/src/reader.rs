/*!
    Container probing and whole-clip reads.
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use ffmpeg_next::codec::context::Context as CodecContext;
use ffmpeg_next::format;
use ffmpeg_next::media;

use framegrab_types::{Error, FrameBuffer, Rational, Result, VideoInfo};

use crate::iter::FrameIter;

/**
    A video file opened for frame reading.

    Opening probes the container for stream metadata and then releases all
    FFmpeg state; decoding happens in [`FrameIter`], which owns its own
    demuxer and decoder. The reader itself is cheap to hold and clone, and
    any number of independent iterations can run over the same file.
*/
#[derive(Clone, Debug)]
pub struct VideoReader {
    path: PathBuf,
    info: VideoInfo,
}

impl VideoReader {
    /**
        Open a video file and probe its metadata.

        # Errors

        - [`Error::Io`] if the file cannot be opened or read.
        - [`Error::MissingStream`] if the container has no video stream.
        - [`Error::UnsupportedCodec`] if no decoder exists for the stream's
          codec.
    */
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        crate::ensure_init();
        let path = path.as_ref().to_path_buf();
        let info = probe(&path)?;
        log::debug!("opened {}: {}", path.display(), info);
        Ok(Self { path, info })
    }

    /// Path this reader was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Probed stream metadata.
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// Number of frames the container declares.
    pub fn frame_count(&self) -> u64 {
        self.info.frame_count
    }

    /// Declared frame rate.
    pub fn frame_rate(&self) -> Rational {
        self.info.frame_rate
    }

    /// Declared frame rate as frames per second.
    pub fn fps(&self) -> f64 {
        self.info.fps()
    }

    /// Total stream duration.
    pub fn duration(&self) -> Duration {
        self.info.duration
    }

    /// Short codec name (e.g. "h264").
    pub fn codec_name(&self) -> &str {
        &self.info.codec_name
    }

    /// Descriptive codec name.
    pub fn codec_long_name(&self) -> &str {
        &self.info.codec_long_name
    }

    /**
        Start iterating over the file's frames.

        Each call opens a fresh demuxer and decoder, so iterations are
        independent of each other and of the reader.
    */
    pub fn frames(&self) -> Result<FrameIter> {
        FrameIter::open(&self.path, &self.info)
    }

    /**
        Decode the whole clip into a `(frames, 3, height, width)` buffer.

        The buffer shape always matches the declared metadata. If the
        container declared more frames than the stream actually yields, the
        remaining slots stay zeroed; if it declared fewer, the extra frames
        are dropped. Both cases are logged.

        # Errors

        - [`Error::Allocation`] if the clip buffer cannot be allocated.
        - Any error from [`VideoReader::frames`] or frame decoding.
    */
    pub fn read_all(&self) -> Result<FrameBuffer> {
        let mut buffer = FrameBuffer::new(self.info.frame_count, self.info.height, self.info.width)?;

        let mut filled = 0u64;
        for frame in self.frames()? {
            let frame = frame?;
            if filled >= buffer.frame_count() {
                log::warn!(
                    "{}: stream yields more frames than the declared {}; extra frames dropped",
                    self.path.display(),
                    buffer.frame_count(),
                );
                break;
            }
            buffer.fill_frame(filled, &frame)?;
            filled += 1;
        }

        if filled < buffer.frame_count() {
            log::warn!(
                "{}: decoded {} of {} declared frames; remaining slots left zeroed",
                self.path.display(),
                filled,
                buffer.frame_count(),
            );
        }

        Ok(buffer)
    }
}

/**
    Open a container for demuxing, mapping FFmpeg's open failure onto an
    I/O error where it is one.
*/
pub(crate) fn open_input(path: &Path) -> Result<format::context::Input> {
    format::input(&path).map_err(|e| match e {
        ffmpeg_next::Error::Other { errno } => Error::Io(std::io::Error::from_raw_os_error(errno)),
        other => Error::invalid_data(other.to_string()),
    })
}

/**
    Probe a container: locate the video stream, resolve its decoder and
    capture the declared metadata. All FFmpeg contexts are dropped before
    returning.
*/
fn probe(path: &Path) -> Result<VideoInfo> {
    let ictx = open_input(path)?;

    let stream = ictx
        .streams()
        .best(media::Type::Video)
        .ok_or_else(|| Error::missing_stream(format!("no video stream in {}", path.display())))?;

    let decoder_ctx = CodecContext::from_parameters(stream.parameters())
        .map_err(|e| Error::codec(e.to_string()))?;
    let decoder = decoder_ctx
        .decoder()
        .video()
        .map_err(|e| Error::unsupported_codec(e.to_string()))?;

    let (codec_name, codec_long_name) = match decoder.codec() {
        Some(codec) => (codec.name().to_string(), codec.description().to_string()),
        None => (String::new(), String::new()),
    };

    let frame_rate = resolve_frame_rate(&stream);

    // Container duration is in AV_TIME_BASE (microsecond) units.
    let duration = if ictx.duration() > 0 {
        Duration::from_micros(ictx.duration() as u64)
    } else {
        Duration::ZERO
    };

    let declared = stream.frames();
    let frame_count = if declared > 0 {
        declared as u64
    } else {
        // Some containers leave nb_frames unset; estimate from duration.
        (duration.as_secs_f64() * frame_rate.to_f64()).round() as u64
    };

    Ok(VideoInfo {
        width: decoder.width(),
        height: decoder.height(),
        frame_count,
        frame_rate,
        duration,
        codec_name,
        codec_long_name,
    })
}

fn resolve_frame_rate(stream: &ffmpeg_next::format::stream::Stream<'_>) -> Rational {
    let avg = stream.avg_frame_rate();
    if avg.denominator() != 0 && avg.numerator() > 0 {
        return Rational::new(avg.numerator(), avg.denominator());
    }
    let real = stream.rate();
    if real.denominator() != 0 && real.numerator() > 0 {
        return Rational::new(real.numerator(), real.denominator());
    }
    Rational::new(0, 1)
}
