/*!
    Gaussian image smoothing for the framegrab crate ecosystem.

    Separable Gaussian convolution over single-band images, with independent
    horizontal and vertical radii and a shared sigma. Works on 8-bit and
    16-bit samples through the [`Sample`] trait.

    # Example

    ```
    use framegrab_smooth::GaussianSmooth;

    let smoother = GaussianSmooth::new(1, 1, 1.0)?;

    let src: Vec<u8> = vec![0; 64 * 64];
    let mut dst = vec![0u8; 64 * 64];
    smoother.smooth(&src, &mut dst, 64, 64)?;
    # Ok::<(), framegrab_types::Error>(())
    ```

    Band-major video frames from `framegrab-reader` can be smoothed whole
    with [`GaussianSmooth::smooth_frame`], which runs the filter over each
    colour band.
*/

pub use framegrab_types::{Error, Result};

mod gaussian;
mod kernel;

pub use gaussian::{GaussianSmooth, Sample};
pub use kernel::gaussian_kernel;
