/*!
    Band-major frame data.
*/

use crate::{Error, Result};

/// Number of colour bands in a decoded frame (R, G, B).
pub const BANDS: usize = 3;

/**
    One decoded video frame in band-major `(3, height, width)` layout.

    Each colour band is a contiguous `height * width` run of bytes, so a
    single band can be handed out as a plain slice. This is the transpose of
    what scalers produce (packed `(height, width, 3)` rows), and the copy
    happens exactly once, in [`Frame::from_rgb24`].
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: u64,
}

impl Frame {
    /**
        Build a frame from packed RGB24 rows.

        `packed` holds `(height, width, 3)` data with rows `stride` bytes
        apart; scaler output is usually padded, so `stride` may exceed
        `3 * width`. The pixel data is transposed into band-major order.

        # Errors

        - [`Error::InvalidData`] if `stride` or `packed` is too small for
          the given dimensions.
        - [`Error::Allocation`] if the band-major buffer cannot be allocated.
    */
    pub fn from_rgb24(
        packed: &[u8],
        stride: usize,
        width: u32,
        height: u32,
        index: u64,
    ) -> Result<Self> {
        let w = width as usize;
        let h = height as usize;

        if stride < BANDS * w {
            return Err(Error::invalid_data(format!(
                "row stride {stride} too small for width {width}"
            )));
        }
        if h > 0 && packed.len() < stride * (h - 1) + BANDS * w {
            return Err(Error::invalid_data(format!(
                "packed buffer has {} bytes, need at least {} for {}x{}",
                packed.len(),
                stride * (h - 1) + BANDS * w,
                width,
                height,
            )));
        }

        let band_len = w * h;
        let mut data = Vec::new();
        data.try_reserve_exact(BANDS * band_len)
            .map_err(|_| Error::allocation(format!("band-major frame {width}x{height}")))?;
        data.resize(BANDS * band_len, 0);

        for y in 0..h {
            let row = &packed[y * stride..y * stride + BANDS * w];
            for x in 0..w {
                let offset = y * w + x;
                data[offset] = row[BANDS * x];
                data[band_len + offset] = row[BANDS * x + 1];
                data[2 * band_len + offset] = row[BANDS * x + 2];
            }
        }

        Ok(Self {
            data,
            width,
            height,
            index,
        })
    }

    /**
        Build a frame from data that is already band-major.

        # Errors

        [`Error::InvalidData`] if `data` is not exactly
        `3 * height * width` bytes.
    */
    pub fn from_band_major(data: Vec<u8>, width: u32, height: u32, index: u64) -> Result<Self> {
        let expected = BANDS * width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::invalid_data(format!(
                "band-major buffer has {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height,
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            index,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Zero-based index of this frame within its stream.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The whole band-major buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /**
        One colour band as a contiguous `height * width` slice.

        # Panics

        Panics if `band >= 3`.
    */
    pub fn band(&self, band: usize) -> &[u8] {
        assert!(band < BANDS, "band index out of range");
        let band_len = self.width as usize * self.height as usize;
        &self.data[band * band_len..(band + 1) * band_len]
    }

    /**
        A single sample.

        # Panics

        Panics if `band`, `y` or `x` is out of range.
    */
    pub fn pixel(&self, band: usize, y: u32, x: u32) -> u8 {
        assert!(y < self.height && x < self.width, "pixel out of range");
        self.band(band)[y as usize * self.width as usize + x as usize]
    }

    /// Consume the frame, returning the band-major buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/**
    A whole clip as one contiguous `(frames, 3, height, width)` byte buffer.

    The shape is fixed at allocation time from the stream's declared
    dimensions; filling a slot with a frame of any other size is an error,
    never a silent resize.
*/
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    data: Vec<u8>,
    frames: u64,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /**
        Allocate a zeroed buffer for `frames` frames of `height` x `width`.

        # Errors

        [`Error::Allocation`] if the buffer cannot be allocated, or if the
        requested shape does not even fit in a `usize` byte count. Clip
        buffers get large (frames x 3 x height x width bytes), so this is a
        failure the caller is expected to handle rather than an abort. The
        frame count comes straight from container metadata, which can
        declare any number at all.
    */
    pub fn new(frames: u64, height: u32, width: u32) -> Result<Self> {
        let total = usize::try_from(frames)
            .ok()
            .and_then(|n| n.checked_mul(BANDS))
            .and_then(|n| n.checked_mul(height as usize))
            .and_then(|n| n.checked_mul(width as usize))
            .ok_or_else(|| {
                Error::allocation(format!(
                    "frame buffer ({frames}, 3, {height}, {width}) exceeds addressable memory"
                ))
            })?;
        let mut data = Vec::new();
        data.try_reserve_exact(total).map_err(|_| {
            Error::allocation(format!(
                "frame buffer ({frames}, 3, {height}, {width}) = {total} bytes"
            ))
        })?;
        data.resize(total, 0);
        Ok(Self {
            data,
            frames,
            width,
            height,
        })
    }

    /// Buffer shape as `(frames, bands, height, width)`.
    pub fn shape(&self) -> (u64, u32, u32, u32) {
        (self.frames, BANDS as u32, self.height, self.width)
    }

    /// Number of frame slots.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    fn frame_len(&self) -> usize {
        BANDS * self.width as usize * self.height as usize
    }

    /**
        Band-major data of one frame slot.

        # Errors

        [`Error::FrameOutOfRange`] if `index` is past the last slot.
    */
    pub fn frame(&self, index: u64) -> Result<&[u8]> {
        if index >= self.frames {
            return Err(Error::out_of_range(index, self.frames));
        }
        let len = self.frame_len();
        let start = index as usize * len;
        Ok(&self.data[start..start + len])
    }

    /**
        Copy a frame into the slot at `index`.

        # Errors

        - [`Error::FrameOutOfRange`] if `index` is past the last slot.
        - [`Error::InvalidData`] if the frame's dimensions do not match the
          buffer's declared width and height.
    */
    pub fn fill_frame(&mut self, index: u64, frame: &Frame) -> Result<()> {
        if index >= self.frames {
            return Err(Error::out_of_range(index, self.frames));
        }
        if frame.width() != self.width || frame.height() != self.height {
            return Err(Error::invalid_data(format!(
                "frame is {}x{}, buffer expects {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height,
            )));
        }
        let len = self.frame_len();
        let start = index as usize * len;
        self.data[start..start + len].copy_from_slice(frame.data());
        Ok(())
    }

    /// The whole buffer as one flat slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the flat byte vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

// Ensure frame data can cross thread boundaries
static_assertions::assert_impl_all!(Frame: Send, Sync);
static_assertions::assert_impl_all!(FrameBuffer: Send, Sync);
