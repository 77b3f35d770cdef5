//! Mass-ratio density conditioned on the primary mass
//!
//! `p(q | m1) ∝ q^β S(m1 q)`, where the smoothing kernel acts on the
//! secondary mass `m1 q`. The normalization therefore depends on `m1` and is
//! recomputed for every primary mass, always on the shared
//! [`MASS_RATIO_GRID`].

use ndarray::{Array1, ArrayView1, AsArray, Ix1, Zip};

use super::shapes::MassRatioPowerLaw;
use super::smoothing::Smoothing;
use super::validate;
use crate::error::MassModelError;
use crate::quadrature::MASS_RATIO_GRID;

const MODEL: &str = "powerlaw_massratio";

struct SmoothedMassRatio {
    shape: MassRatioPowerLaw,
    smoothing: Smoothing,
}

impl SmoothedMassRatio {
    fn new(beta: f64, mmin: f64, delta: f64) -> Result<Self, MassModelError> {
        Ok(SmoothedMassRatio {
            shape: MassRatioPowerLaw::new(beta)?,
            smoothing: Smoothing::new(mmin, delta)?,
        })
    }

    #[inline]
    fn eval(&self, q: f64, m1: f64) -> f64 {
        self.shape.eval_smoothed(q, m1, &self.smoothing)
    }

    fn normalization(&self, m1: f64) -> Result<f64, MassModelError> {
        MASS_RATIO_GRID.normalization(MODEL, |q| self.eval(q, m1))
    }
}

/// Normalized mass-ratio density at every `q` for one primary mass `m1`
///
/// # Errors
///
/// - [`MassModelError::InvalidParameter`] for `beta <= -1`, `delta <= 0` or a
///   non-positive `m1`.
/// - [`MassModelError::DegenerateNormalization`] when `m1 q` never exceeds
///   `mmin` on `(0, 1]`, i.e. `m1 <= mmin`.
///
/// # Examples
///
/// ```rust
/// use popmass::powerlaw_massratio;
///
/// let light = powerlaw_massratio(&[0.5], 30.0, 1.0, 5.0, 5.0).unwrap();
/// let heavy = powerlaw_massratio(&[0.5], 60.0, 1.0, 5.0, 5.0).unwrap();
/// assert!(light[0].is_finite() && light[0] > 0.0);
/// assert_ne!(light[0], heavy[0]);
/// ```
pub fn powerlaw_massratio<'a, V>(
    q: V,
    m1: f64,
    beta: f64,
    mmin: f64,
    delta: f64,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    validate::positive("m1", m1)?;
    let shape = SmoothedMassRatio::new(beta, mmin, delta)?;
    let norm = shape.normalization(m1)?;
    let q: ArrayView1<f64> = q.into();
    Ok(q.mapv(|x| shape.eval(x, m1) / norm))
}

/// Normalized mass-ratio density of `q[i]` given primary mass `m1[i]`
///
/// Each element carries its own normalization.
///
/// # Errors
///
/// As [`powerlaw_massratio`], plus [`MassModelError::LengthMismatch`] when
/// the two arrays differ in length.
pub fn powerlaw_massratio_paired<'a, 'b, V, W>(
    q: V,
    m1: W,
    beta: f64,
    mmin: f64,
    delta: f64,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
    W: AsArray<'b, f64, Ix1>,
{
    let q: ArrayView1<f64> = q.into();
    let m1: ArrayView1<f64> = m1.into();
    if q.len() != m1.len() {
        return Err(MassModelError::LengthMismatch {
            left: "q",
            left_len: q.len(),
            right: "m1",
            right_len: m1.len(),
        });
    }
    let shape = SmoothedMassRatio::new(beta, mmin, delta)?;

    let mut out = Array1::zeros(q.len());
    let mut failure = None;
    Zip::from(&mut out)
        .and(&q)
        .and(&m1)
        .for_each(|p, &qi, &m1i| {
            if failure.is_some() {
                return;
            }
            let norm = validate::positive("m1", m1i).and_then(|_| shape.normalization(m1i));
            match norm {
                Ok(norm) => *p = shape.eval(qi, m1i) / norm,
                Err(err) => failure = Some(err),
            }
        });

    match failure {
        Some(err) => Err(err),
        None => Ok(out),
    }
}
