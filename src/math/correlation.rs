//! Zero-mean normalized cross-correlation
//!
//! Scores lie in `[-1, 1]`: 1 for identical structure, 0 for unrelated, -1 for
//! inverted. Subtracting the mean and dividing by the energy makes the score
//! insensitive to uniform brightness and contrast changes.

use crate::io::error::{ReassemblyError, Result};
use ndarray::{Array2, ArrayView2};

// Below this energy product a patch is treated as flat
const FLAT_ENERGY_EPSILON: f64 = 1e-9;

/// Mean-removed copy of an array together with its energy (sum of squares)
fn centered(view: &ArrayView2<'_, f64>) -> (Array2<f64>, f64) {
    let mean = view.mean().unwrap_or(0.0);
    let centered = view.mapv(|v| v - mean);
    let energy = centered.iter().map(|v| v * v).sum();
    (centered, energy)
}

/// Correlation of two equally shaped, mean-removed arrays
///
/// Flat inputs carry no structure to correlate and score 0.
fn correlate_centered(a: &Array2<f64>, a_energy: f64, b: &Array2<f64>, b_energy: f64) -> f64 {
    let denominator = (a_energy * b_energy).sqrt();
    if denominator <= FLAT_ENERGY_EPSILON {
        return 0.0;
    }

    let numerator: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let score = numerator / denominator;
    if score.is_finite() {
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Normalized cross-correlation of two arrays of the same shape
///
/// # Errors
///
/// Returns `ShapeMismatch` if the shapes differ or are empty
pub fn normalized_cross_correlation(a: &Array2<f64>, b: &Array2<f64>) -> Result<f64> {
    if a.dim() != b.dim() || a.is_empty() {
        return Err(ReassemblyError::ShapeMismatch {
            operation: "correlation",
            tile: None,
            expected: a.dim(),
            found: b.dim(),
        });
    }

    let (a_centered, a_energy) = centered(&a.view());
    let (b_centered, b_energy) = centered(&b.view());
    Ok(correlate_centered(
        &a_centered,
        a_energy,
        &b_centered,
        b_energy,
    ))
}

/// Best correlation of `template` over every placement inside `image`
///
/// Equivalent to taking the maximum of a `TM_CCOEFF_NORMED` response map.
/// When both arrays share a shape there is exactly one placement.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the template is empty or does not fit inside
/// the image
pub fn match_template_max(image: &Array2<f64>, template: &Array2<f64>) -> Result<f64> {
    let (image_height, image_width) = image.dim();
    let (height, width) = template.dim();

    if template.is_empty() || height > image_height || width > image_width {
        return Err(ReassemblyError::ShapeMismatch {
            operation: "template matching",
            tile: None,
            expected: (height, width),
            found: (image_height, image_width),
        });
    }

    let (template_centered, template_energy) = centered(&template.view());

    let mut best = f64::NEG_INFINITY;
    for patch in image.windows((height, width)) {
        let (patch_centered, patch_energy) = centered(&patch);
        let score = correlate_centered(
            &template_centered,
            template_energy,
            &patch_centered,
            patch_energy,
        );
        best = best.max(score);
    }

    Ok(best)
}
