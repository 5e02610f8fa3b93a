//! Gaussian blur for the cover shadow layer.
//!
//! Operates in place on a premultiplied RGBA8 layer, one separable
//! convolution per axis with a fixed-point kernel. Edge taps are clamped to
//! the border pixel so the shadow does not darken toward the canvas edges.

use crate::foundation::{
    core::Canvas,
    error::{FolioError, FolioResult},
};

const Q16_ONE: u32 = 1 << 16;
const Q16_HALF: u64 = 1 << 15;

/// Blur a premultiplied RGBA8 shadow layer in place.
///
/// `radius` and `sigma` come paired from the cover style; a radius of zero
/// leaves the layer untouched.
pub fn blur_shadow_layer(
    pixels: &mut [u8],
    canvas: Canvas,
    radius: u32,
    sigma: f32,
) -> FolioResult<()> {
    let expected = (canvas.width as usize)
        .checked_mul(canvas.height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| FolioError::render("shadow layer size overflow"))?;
    if pixels.len() != expected {
        return Err(FolioError::render(
            "shadow layer buffer does not match its canvas",
        ));
    }

    let kernel = gaussian_weights_q16(radius, sigma)?;
    if kernel.len() == 1 {
        return Ok(());
    }

    let w = canvas.width as usize;
    let h = canvas.height as usize;
    let mut scratch = vec![0u8; pixels.len()];
    // Rows first, then columns over the intermediate.
    convolve_axis(pixels, &mut scratch, w, h, 4, w * 4, &kernel);
    convolve_axis(&scratch, pixels, h, w, w * 4, 4, &kernel);
    Ok(())
}

/// Symmetric Gaussian kernel in Q16, pinned to sum exactly to one so a
/// uniform layer passes through unchanged.
fn gaussian_weights_q16(radius: u32, sigma: f32) -> FolioResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![Q16_ONE]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FolioError::render("shadow blur sigma must be positive"));
    }

    let r = radius as usize;
    let inv = -1.0 / (2.0 * f64::from(sigma) * f64::from(sigma));
    let half: Vec<f64> = (0..=r).map(|d| ((d * d) as f64 * inv).exp()).collect();
    let total: f64 = half[0] + 2.0 * half[1..].iter().sum::<f64>();

    let mut weights = vec![0u32; 2 * r + 1];
    let mut assigned: u32 = 0;
    for d in 1..=r {
        let q = ((half[d] / total) * f64::from(Q16_ONE)).round() as u32;
        weights[r - d] = q;
        weights[r + d] = q;
        assigned += 2 * q;
    }
    // The center tap absorbs the quantization remainder.
    weights[r] = Q16_ONE.saturating_sub(assigned);
    Ok(weights)
}

/// One separable pass: convolve `lanes` runs of `len` pixels, where `step`
/// advances along the run and `lane_step` jumps between runs. Taps outside
/// the run are clamped to its first/last pixel.
fn convolve_axis(
    src: &[u8],
    dst: &mut [u8],
    len: usize,
    lanes: usize,
    step: usize,
    lane_step: usize,
    kernel: &[u32],
) {
    let reach = (kernel.len() / 2) as isize;
    let last = len as isize - 1;
    for lane in 0..lanes {
        let base = lane * lane_step;
        for i in 0..len {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let tap = (i as isize + k as isize - reach).clamp(0, last) as usize;
                let at = base + tap * step;
                for c in 0..4 {
                    acc[c] += u64::from(weight) * u64::from(src[at + c]);
                }
            }
            let out = base + i * step;
            for c in 0..4 {
                dst[out + c] = ((acc[c] + Q16_HALF) >> 16).min(255) as u8;
            }
        }
    }
}
