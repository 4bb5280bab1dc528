/*!
    Separable Gaussian smoothing.
*/

use framegrab_types::{Error, Frame, Result, BANDS};

use crate::kernel::gaussian_kernel;

/**
    A pixel sample depth the smoother can operate on.

    Implemented for `u8` and `u16`. Conversion back from the floating-point
    accumulator rounds and saturates to the sample range.
*/
pub trait Sample: Copy + sealed::Sealed {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl Sample for u8 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, u8::MAX as f64) as u8
    }
}

impl Sample for u16 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, u16::MAX as f64) as u16
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/**
    Gaussian smoother with independent horizontal and vertical radii.

    The 2-D convolution is separable, so it runs as a horizontal pass
    followed by a vertical pass through an `f64` intermediate, which keeps
    precision until the final rounding. Borders are handled by replicating
    the edge sample.

    Kernels are precomputed at construction, so one smoother can be reused
    across many images.
*/
#[derive(Clone, Debug)]
pub struct GaussianSmooth {
    radius_x: usize,
    radius_y: usize,
    sigma: f64,
    kernel_x: Vec<f64>,
    kernel_y: Vec<f64>,
}

impl GaussianSmooth {
    /// Sigma used by [`GaussianSmooth::default`].
    pub const DEFAULT_SIGMA: f64 = 0.25;

    /**
        Create a smoother with the given radii and sigma.

        # Errors

        [`Error::InvalidData`] if `sigma` is not strictly positive.
    */
    pub fn new(radius_x: usize, radius_y: usize, sigma: f64) -> Result<Self> {
        if !(sigma > 0.0) {
            return Err(Error::invalid_data(format!(
                "sigma must be positive, got {sigma}"
            )));
        }
        Ok(Self {
            radius_x,
            radius_y,
            sigma,
            kernel_x: gaussian_kernel(radius_x, sigma),
            kernel_y: gaussian_kernel(radius_y, sigma),
        })
    }

    /// Horizontal kernel radius.
    pub fn radius_x(&self) -> usize {
        self.radius_x
    }

    /// Vertical kernel radius.
    pub fn radius_y(&self) -> usize {
        self.radius_y
    }

    /// Kernel sigma.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /**
        Smooth a single-band image of `width` x `height` samples from `src`
        into `dst`.

        # Errors

        [`Error::InvalidData`] if either slice is not exactly
        `width * height` samples.
    */
    pub fn smooth<T: Sample>(
        &self,
        src: &[T],
        dst: &mut [T],
        width: u32,
        height: u32,
    ) -> Result<()> {
        let w = width as usize;
        let h = height as usize;

        if src.len() != w * h {
            return Err(Error::invalid_data(format!(
                "source has {} samples, expected {} for {}x{}",
                src.len(),
                w * h,
                width,
                height,
            )));
        }
        if dst.len() != w * h {
            return Err(Error::invalid_data(format!(
                "destination has {} samples, expected {} for {}x{}",
                dst.len(),
                w * h,
                width,
                height,
            )));
        }
        if w == 0 || h == 0 {
            return Ok(());
        }

        // Horizontal pass into the f64 intermediate.
        let mut mid = vec![0.0f64; w * h];
        let rx = self.radius_x as isize;
        for y in 0..h {
            let row = &src[y * w..(y + 1) * w];
            for x in 0..w {
                let mut acc = 0.0;
                for (k, weight) in self.kernel_x.iter().enumerate() {
                    let sx = clamp_index(x as isize + k as isize - rx, w);
                    acc += weight * row[sx].to_f64();
                }
                mid[y * w + x] = acc;
            }
        }

        // Vertical pass back to integer samples.
        let ry = self.radius_y as isize;
        for y in 0..h {
            for x in 0..w {
                let mut acc = 0.0;
                for (k, weight) in self.kernel_y.iter().enumerate() {
                    let sy = clamp_index(y as isize + k as isize - ry, h);
                    acc += weight * mid[sy * w + x];
                }
                dst[y * w + x] = T::from_f64(acc);
            }
        }

        Ok(())
    }

    /**
        Smooth every colour band of a band-major video frame, returning a
        new frame with the same dimensions and index.
    */
    pub fn smooth_frame(&self, frame: &Frame) -> Result<Frame> {
        let band_len = frame.width() as usize * frame.height() as usize;
        if band_len == 0 {
            return Ok(frame.clone());
        }
        let mut data = vec![0u8; BANDS * band_len];

        for (band, out) in data.chunks_mut(band_len).enumerate() {
            self.smooth(frame.band(band), out, frame.width(), frame.height())?;
        }

        Frame::from_band_major(data, frame.width(), frame.height(), frame.index())
    }
}

impl Default for GaussianSmooth {
    /// Radius 1 in both directions with the historical default sigma.
    fn default() -> Self {
        Self {
            radius_x: 1,
            radius_y: 1,
            sigma: Self::DEFAULT_SIGMA,
            kernel_x: gaussian_kernel(1, Self::DEFAULT_SIGMA),
            kernel_y: gaussian_kernel(1, Self::DEFAULT_SIGMA),
        }
    }
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
