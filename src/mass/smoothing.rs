//! Smooth low-mass turn-on
//!
//! The kernel ramps a hard cutoff at `mmin` up to one over `[mmin, mmin + delta]`:
//!
//! ```text
//! S(m) = 0                                   m <= mmin
//! S(m) = 1 / (1 + exp(1/s - 1/(1 - s)))      mmin < m < mmin + delta,  s = (m - mmin) / delta
//! S(m) = 1                                   m >= mmin + delta
//! ```
//!
//! The point `m == mmin` itself evaluates to exactly 0.

use ndarray::{Array1, ArrayView1, AsArray, Ix1};

use super::validate;
use crate::error::MassModelError;

/// Validated smoothing window `[mmin, mmin + delta]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    mmin: f64,
    delta: f64,
}

impl Smoothing {
    pub fn new(mmin: f64, delta: f64) -> Result<Self, MassModelError> {
        validate::finite("mmin", mmin)?;
        validate::positive("delta", delta)?;
        Ok(Smoothing { mmin, delta })
    }

    pub fn mmin(&self) -> f64 {
        self.mmin
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Kernel value at `m`, always in `[0, 1]`
    #[inline]
    pub fn eval(&self, m: f64) -> f64 {
        if m >= self.mmin + self.delta {
            1.0
        } else if m > self.mmin {
            let shifted = (m - self.mmin) / self.delta;
            // Overflows to ±inf near the window edges, which saturates to 0 or 1
            let exponent = 1.0 / shifted - 1.0 / (1.0 - shifted);
            1.0 / (1.0 + exponent.exp())
        } else {
            0.0
        }
    }
}

/// Evaluate the smoothing kernel at every mass in `m`
///
/// # Errors
///
/// [`MassModelError::InvalidParameter`] if `delta <= 0` or `mmin` is not finite.
///
/// # Examples
///
/// ```rust
/// use popmass::smoothing;
///
/// let p = smoothing(&[4.0, 5.0, 7.5, 10.0], 5.0, 5.0).unwrap();
/// assert_eq!(p.to_vec(), vec![0.0, 0.0, 0.5, 1.0]);
/// ```
pub fn smoothing<'a, V>(m: V, mmin: f64, delta: f64) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    let kernel = Smoothing::new(mmin, delta)?;
    let m: ArrayView1<f64> = m.into();
    Ok(m.mapv(|x| kernel.eval(x)))
}

/// Scalar form of [`smoothing`], identical to a one-element evaluation
pub fn smoothing_at(m: f64, mmin: f64, delta: f64) -> Result<f64, MassModelError> {
    Ok(Smoothing::new(mmin, delta)?.eval(m))
}
