//! Parallel evaluation of one density over many parameter samples
//!
//! Population samplers evaluate the same mass grid for every hyperparameter
//! draw. Rows are independent (each carries its own normalization), so they
//! are filled in parallel with rayon.

use ndarray::{Array2, ArrayView1, AsArray, Axis, Ix1};
use rayon::prelude::*;

use crate::error::MassModelError;
use crate::mass::Density;

/// Densities of every sample at every point of `m`
///
/// # Returns
///
/// An array of shape `(samples.len(), m.len())`; row `i` is
/// `samples[i].pdf(m)`.
///
/// # Errors
///
/// The error of a failing sample. When several samples fail, which error is
/// reported is unspecified.
///
/// # Example
///
/// ```rust
/// use popmass::batch::density_matrix;
/// use popmass::PowerLawParams;
///
/// let samples: Vec<PowerLawParams> = [2.5, 3.0, 3.5]
///     .iter()
///     .map(|&alpha| PowerLawParams::default().with_alpha(alpha))
///     .collect();
/// let p = density_matrix(&samples, &[10.0, 20.0, 40.0]).unwrap();
/// assert_eq!(p.dim(), (3, 3));
/// ```
pub fn density_matrix<'a, D, V>(samples: &[D], m: V) -> Result<Array2<f64>, MassModelError>
where
    D: Density + Sync,
    V: AsArray<'a, f64, Ix1>,
{
    let m: ArrayView1<f64> = m.into();
    let mut out = Array2::zeros((samples.len(), m.len()));

    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(samples.par_iter())
        .try_for_each(|(mut row, sample)| {
            let p = sample.pdf(m)?;
            row.assign(&p);
            Ok::<(), MassModelError>(())
        })?;

    tracing::debug!(
        samples = samples.len(),
        points = m.len(),
        "evaluated density matrix"
    );
    Ok(out)
}
