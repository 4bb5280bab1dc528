/*!
    Lazy frame iteration.
*/

use std::path::Path;

use ffmpeg_next::codec::context::Context as CodecContext;
use ffmpeg_next::decoder::Video as VideoDecoder;
use ffmpeg_next::format::{self, Pixel};
use ffmpeg_next::frame::Video as RawFrame;
use ffmpeg_next::media;
use ffmpeg_next::software::scaling::{Context as Scaler, Flags as ScalerFlags};

use framegrab_types::{Error, Frame, Result, VideoInfo};

/**
    Iterator over the frames of one video file.

    Owns a dedicated demuxer, decoder and RGB24 scaler; dropping the
    iterator releases all of them. Frames come out in decode order as
    band-major [`Frame`]s at the source resolution.

    Iteration stops at the declared frame count even if the stream yields
    more, so positions always stay within the metadata the file was opened
    with. [`FrameIter::read_frame`] is the explicit-call variant that fails
    with [`Error::FrameOutOfRange`] instead of returning `None` once the
    stream is exhausted.
*/
pub struct FrameIter {
    input: format::context::Input,
    decoder: VideoDecoder,
    scaler: Scaler,
    stream_index: usize,
    width: u32,
    height: u32,
    next_index: u64,
    total: u64,
    eof_sent: bool,
    done: bool,
    decoded: RawFrame,
    scaled: RawFrame,
}

impl FrameIter {
    pub(crate) fn open(path: &Path, info: &VideoInfo) -> Result<Self> {
        crate::ensure_init();
        let input = crate::reader::open_input(path)?;

        let (stream_index, parameters) = {
            let stream = input.streams().best(media::Type::Video).ok_or_else(|| {
                Error::missing_stream(format!("no video stream in {}", path.display()))
            })?;
            (stream.index(), stream.parameters())
        };

        let decoder_ctx =
            CodecContext::from_parameters(parameters).map_err(|e| Error::codec(e.to_string()))?;
        let decoder = decoder_ctx
            .decoder()
            .video()
            .map_err(|e| Error::unsupported_codec(e.to_string()))?;

        // Converts whatever the codec emits into packed RGB24 at the
        // source resolution.
        let scaler = Scaler::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            decoder.width(),
            decoder.height(),
            ScalerFlags::BICUBIC,
        )
        .map_err(|e| Error::allocation(format!("RGB24 scaler: {e}")))?;

        Ok(Self {
            input,
            decoder,
            scaler,
            stream_index,
            width: info.width,
            height: info.height,
            next_index: 0,
            total: info.frame_count,
            eof_sent: false,
            done: false,
            decoded: RawFrame::empty(),
            scaled: RawFrame::empty(),
        })
    }

    /// Index of the next frame this iterator will produce.
    pub fn current(&self) -> u64 {
        self.next_index
    }

    /// Total number of frames the stream declares.
    pub fn total(&self) -> u64 {
        self.total
    }

    /**
        Decode and return the next frame.

        # Errors

        - [`Error::FrameOutOfRange`] once the stream is exhausted.
        - [`Error::Codec`] on decode failure.
    */
    pub fn read_frame(&mut self) -> Result<Frame> {
        if self.exhausted() || !self.pump()? {
            return Err(Error::out_of_range(self.next_index, self.total));
        }
        self.convert_current()
    }

    /**
        Skip the next frame without converting or copying its pixel data.

        Decoding still happens (inter-coded frames need their references),
        but the RGB conversion and band-major transpose are skipped.

        # Errors

        Same as [`FrameIter::read_frame`].
    */
    pub fn advance(&mut self) -> Result<()> {
        if self.exhausted() || !self.pump()? {
            return Err(Error::out_of_range(self.next_index, self.total));
        }
        self.next_index += 1;
        Ok(())
    }

    fn exhausted(&self) -> bool {
        self.done || self.next_index >= self.total
    }

    /**
        Pull the next decoded frame for our stream into `self.decoded`.
        Returns `false` once the stream is exhausted.
    */
    fn pump(&mut self) -> Result<bool> {
        loop {
            match self.decoder.receive_frame(&mut self.decoded) {
                Ok(()) => return Ok(true),
                Err(ffmpeg_next::Error::Eof) => {
                    self.done = true;
                    return Ok(false);
                }
                Err(ffmpeg_next::Error::Other { errno })
                    if errno == ffmpeg_next::util::error::EAGAIN => {}
                Err(e) => return Err(Error::codec(e.to_string())),
            }

            // Decoder wants more input: feed the next video packet, or
            // signal end of stream and drain.
            if !self.feed()? {
                self.done = true;
                return Ok(false);
            }
        }
    }

    /**
        Feed the decoder the next packet from the video stream. Returns
        `false` once the demuxer is exhausted and EOF has already been sent.
    */
    fn feed(&mut self) -> Result<bool> {
        for (stream, packet) in self.input.packets() {
            if stream.index() != self.stream_index {
                continue;
            }
            self.decoder
                .send_packet(&packet)
                .map_err(|e| Error::codec(e.to_string()))?;
            return Ok(true);
        }

        if !self.eof_sent {
            self.decoder
                .send_eof()
                .map_err(|e| Error::codec(e.to_string()))?;
            self.eof_sent = true;
            return Ok(true);
        }

        Ok(false)
    }

    /**
        Scale `self.decoded` to RGB24 and transpose it into a band-major
        [`Frame`], advancing the position.
    */
    fn convert_current(&mut self) -> Result<Frame> {
        self.scaler
            .run(&self.decoded, &mut self.scaled)
            .map_err(|e| Error::codec(e.to_string()))?;

        let frame = Frame::from_rgb24(
            self.scaled.data(0),
            self.scaled.stride(0),
            self.width,
            self.height,
            self.next_index,
        )?;
        self.next_index += 1;
        Ok(frame)
    }
}

impl Iterator for FrameIter {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted() {
            return None;
        }
        match self.pump() {
            Ok(true) => Some(self.convert_current()),
            Ok(false) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::fmt::Debug for FrameIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameIter")
            .field("stream_index", &self.stream_index)
            .field("next_index", &self.next_index)
            .field("total", &self.total)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::VideoReader;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    fn assert_uniform(frame: &Frame, [r, g, b]: [u8; 3]) {
        assert!(frame.band(0).iter().all(|&v| v == r), "red band");
        assert!(frame.band(1).iter().all(|&v| v == g), "green band");
        assert!(frame.band(2).iter().all(|&v| v == b), "blue band");
    }

    #[test]
    fn iterator_yields_declared_frames() {
        let path = fixtures::write_clip(&[RED, GREEN, BLUE]);
        let reader = VideoReader::open(&path).unwrap();
        assert_eq!(reader.frame_count(), 3);
        assert_eq!(reader.width(), fixtures::CLIP_WIDTH);
        assert_eq!(reader.height(), fixtures::CLIP_HEIGHT);

        let frames = reader
            .frames()
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(frames.len(), 3);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index(), i as u64);
            assert_eq!(frame.width(), fixtures::CLIP_WIDTH);
            assert_eq!(frame.height(), fixtures::CLIP_HEIGHT);
        }
        assert_uniform(&frames[0], RED);
        assert_uniform(&frames[1], GREEN);
        assert_uniform(&frames[2], BLUE);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn read_past_last_frame_is_out_of_range() {
        let path = fixtures::write_clip(&[RED, GREEN]);
        let reader = VideoReader::open(&path).unwrap();
        let mut iter = reader.frames().unwrap();
        assert_eq!(iter.total(), 2);

        iter.read_frame().unwrap();
        iter.read_frame().unwrap();
        assert_eq!(iter.current(), iter.total());

        let e = iter.read_frame().unwrap_err();
        assert!(e.is_out_of_range(), "got {e:?}");
        // Exhaustion is permanent.
        assert!(iter.read_frame().unwrap_err().is_out_of_range());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn advance_skips_to_later_frames() {
        let path = fixtures::write_clip(&[RED, GREEN, BLUE]);
        let reader = VideoReader::open(&path).unwrap();
        let mut iter = reader.frames().unwrap();

        iter.advance().unwrap();
        iter.advance().unwrap();
        let frame = iter.read_frame().unwrap();
        assert_eq!(frame.index(), 2);
        assert_uniform(&frame, BLUE);

        assert!(iter.advance().unwrap_err().is_out_of_range());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_clip_has_no_frames() {
        let path = fixtures::write_clip(&[]);
        let reader = VideoReader::open(&path).unwrap();
        assert_eq!(reader.frame_count(), 0);

        let mut iter = reader.frames().unwrap();
        assert!(iter.next().is_none());
        assert!(iter.read_frame().unwrap_err().is_out_of_range());

        std::fs::remove_file(&path).ok();
    }
}
