/*!
    1-D Gaussian kernel construction.
*/

/**
    Build a normalised 1-D Gaussian kernel of length `2 * radius + 1`.

    Weights follow `exp(-x^2 / (2 * sigma^2))` for integer offsets
    `x in [-radius, radius]`, scaled so the kernel sums to one. A radius of
    zero yields the identity kernel `[1.0]`.
*/
pub fn gaussian_kernel(radius: usize, sigma: f64) -> Vec<f64> {
    debug_assert!(sigma > 0.0, "sigma must be positive");

    let r = radius as isize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f64> = (-r..=r)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();

    let sum: f64 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}
