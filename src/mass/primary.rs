//! Normalized primary-mass densities
//!
//! Each model evaluates its smoothed shape on a [`QuadratureGrid`] over the
//! support, sums it with the rectangle rule and divides the shape at the
//! query masses by that constant. Query masses are independent of the grid.
//!
//! Two mixture conventions are provided and are numerically distinct:
//!
//! - [`plpeak`] normalizes the smoothed power law and the smoothed peak
//!   separately, then mixes the two densities.
//! - [`plpeak_lvk`] mixes the unsmoothed shapes, smooths the mixture and
//!   normalizes it once.

use ndarray::{Array1, ArrayView1, AsArray, Ix1};

use super::shapes::{Gaussian, PowerLawPeakMixture, Shape, Smoothed, TruncatedPowerLaw};
use super::smoothing::Smoothing;
use super::validate;
use crate::error::MassModelError;
use crate::quadrature::QuadratureGrid;

/// Upper quadrature bound used for the Gaussian peak when none is given.
///
/// The peak has infinite support; this only truncates the normalization integral.
pub const DEFAULT_PEAK_MMAX: f64 = 100.0;

/// Normalize `shape` on `grid` and evaluate it at `m`
pub(crate) fn normalized<'a, V, S>(
    model: &'static str,
    grid: &QuadratureGrid,
    m: V,
    shape: &S,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
    S: Shape,
{
    let norm = grid.normalization(model, |x| shape.eval(x))?;
    let m: ArrayView1<f64> = m.into();
    Ok(m.mapv(|x| shape.eval(x) / norm))
}

/// Smoothed truncated power law, normalized over `[mmin, mmax]`
///
/// Reference parameters are `alpha = 3.5, mmax = 90, mmin = 5, delta = 5`
/// (see [`crate::PowerLawParams::default`]).
///
/// # Examples
///
/// ```rust
/// use popmass::powerlaw_smoothed;
///
/// let p = powerlaw_smoothed(&[4.0, 20.0, 95.0], 3.5, 90.0, 5.0, 5.0).unwrap();
/// assert_eq!(p[0], 0.0);
/// assert!(p[1] > 0.0);
/// assert_eq!(p[2], 0.0);
/// ```
pub fn powerlaw_smoothed<'a, V>(
    m: V,
    alpha: f64,
    mmax: f64,
    mmin: f64,
    delta: f64,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    let shape = Smoothed::new(
        TruncatedPowerLaw::new(alpha, mmin, mmax)?,
        Smoothing::new(mmin, delta)?,
    );
    normalized(
        "powerlaw_smoothed",
        &QuadratureGrid::mass(mmin, mmax),
        m,
        &shape,
    )
}

/// Two smoothed power-law segments joined at `mbreak = mmin + b (mmax - mmin)`
///
/// Masses below `mbreak` follow `alpha1`, masses at or above it follow
/// `alpha2`. Each segment keeps its own closed-form power-law constant over
/// the full support, and the stitched shape is normalized jointly with one
/// quadrature pass, so the density can jump at the break.
pub fn broken_powerlaw_smoothed<'a, V>(
    m: V,
    alpha1: f64,
    alpha2: f64,
    mmax: f64,
    mmin: f64,
    delta: f64,
    b: f64,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    validate::powerlaw_index("alpha1", alpha1)?;
    validate::powerlaw_index("alpha2", alpha2)?;
    validate::unit_interval("b", b)?;
    let smoothing = Smoothing::new(mmin, delta)?;
    let shape = BrokenPowerLaw {
        below: Smoothed::new(TruncatedPowerLaw::new(alpha1, mmin, mmax)?, smoothing),
        above: Smoothed::new(TruncatedPowerLaw::new(alpha2, mmin, mmax)?, smoothing),
        mbreak: mmin + b * (mmax - mmin),
    };
    normalized(
        "broken_powerlaw_smoothed",
        &QuadratureGrid::mass(mmin, mmax),
        m,
        &shape,
    )
}

struct BrokenPowerLaw {
    below: Smoothed<TruncatedPowerLaw>,
    above: Smoothed<TruncatedPowerLaw>,
    mbreak: f64,
}

impl Shape for BrokenPowerLaw {
    #[inline]
    fn eval(&self, m: f64) -> f64 {
        if m < self.mbreak {
            self.below.eval(m)
        } else {
            self.above.eval(m)
        }
    }
}

/// Smoothed Gaussian peak, normalized over `[mmin, mmax]`
///
/// `mmax` only bounds the normalization integral (conventionally
/// [`DEFAULT_PEAK_MMAX`]); query masses above it still receive the
/// Gaussian density.
pub fn peak_smoothed<'a, V>(
    m: V,
    mu: f64,
    sigma: f64,
    mmin: f64,
    delta: f64,
    mmax: f64,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    validate::support(mmin, mmax)?;
    let shape = Smoothed::new(Gaussian::new(mu, sigma)?, Smoothing::new(mmin, delta)?);
    normalized(
        "peak_smoothed",
        &QuadratureGrid::mass(mmin, mmax),
        m,
        &shape,
    )
}

/// Power law + peak: `(1 - w) powerlaw_smoothed + w peak_smoothed`
///
/// Both components are normalized independently before mixing. The peak is
/// normalized up to [`DEFAULT_PEAK_MMAX`], not up to `mmax`, so `mmin` must
/// lie below that bound.
#[allow(clippy::too_many_arguments)]
pub fn plpeak<'a, V>(
    m: V,
    alpha: f64,
    mmin: f64,
    mmax: f64,
    delta: f64,
    mu: f64,
    sigma: f64,
    w: f64,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    validate::unit_interval("w", w)?;
    let smoothing = Smoothing::new(mmin, delta)?;
    let powerlaw = Smoothed::new(TruncatedPowerLaw::new(alpha, mmin, mmax)?, smoothing);
    let peak = Smoothed::new(Gaussian::new(mu, sigma)?, smoothing);
    if mmin >= DEFAULT_PEAK_MMAX {
        return Err(MassModelError::invalid(
            "mmin",
            mmin,
            "must be below the peak quadrature bound 100",
        ));
    }

    let m: ArrayView1<f64> = m.into();
    let powerlaw = normalized(
        "powerlaw_smoothed",
        &QuadratureGrid::mass(mmin, mmax),
        m,
        &powerlaw,
    )?;
    let peak = normalized(
        "peak_smoothed",
        &QuadratureGrid::mass(mmin, DEFAULT_PEAK_MMAX),
        m,
        &peak,
    )?;
    Ok((1.0 - w) * powerlaw + w * peak)
}

/// LVK power law + peak: `((1 - weight) powerlaw + weight peak) × smoothing`, normalized once over `[mmin, mmax]`
#[allow(clippy::too_many_arguments)]
pub fn plpeak_lvk<'a, V>(
    m: V,
    alpha: f64,
    mmin: f64,
    mmax: f64,
    delta: f64,
    mu: f64,
    sigma: f64,
    weight: f64,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    let mixture = PowerLawPeakMixture::new(
        TruncatedPowerLaw::new(alpha, mmin, mmax)?,
        Gaussian::new(mu, sigma)?,
        weight,
    )?;
    let shape = Smoothed::new(mixture, Smoothing::new(mmin, delta)?);
    normalized("plpeak_lvk", &QuadratureGrid::mass(mmin, mmax), m, &shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn masses() -> Vec<f64> {
        (0..=120).map(|i| 2.0 + i as f64 * 0.8).collect()
    }

    #[test]
    fn test_powerlaw_smoothed_grid_sum_is_one() {
        let grid = QuadratureGrid::mass(5.0, 90.0);
        let p = powerlaw_smoothed(grid.nodes(), 3.5, 90.0, 5.0, 5.0).unwrap();
        assert_relative_eq!(p.sum() * grid.spacing(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_powerlaw_smoothed_zero_outside_support() {
        let p = powerlaw_smoothed(&[0.0, 4.0, 5.0, 90.5, 200.0], 3.5, 90.0, 5.0, 5.0).unwrap();
        assert!(p.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_powerlaw_smoothed_degenerate_support() {
        assert!(matches!(
            powerlaw_smoothed(&[10.0], 3.5, 5.0, 5.0, 5.0),
            Err(MassModelError::InvalidParameter { param: "mmin", .. })
        ));
    }

    #[test]
    fn test_broken_powerlaw_matches_single_when_indices_agree() {
        let m = masses();
        let broken = broken_powerlaw_smoothed(&m, 2.7, 2.7, 90.0, 5.0, 5.0, 0.4).unwrap();
        let single = powerlaw_smoothed(&m, 2.7, 90.0, 5.0, 5.0).unwrap();
        for (a, b) in broken.iter().zip(single.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_broken_powerlaw_routes_break_to_upper_segment() {
        let (mmin, mmax, b) = (5.0, 90.0, 0.5);
        let mbreak = mmin + b * (mmax - mmin);
        let p = broken_powerlaw_smoothed(&[mbreak], 3.5, 1.5, mmax, mmin, 5.0, b).unwrap();
        let upper = TruncatedPowerLaw::new(1.5, mmin, mmax).unwrap().eval(mbreak);
        let lower = TruncatedPowerLaw::new(3.5, mmin, mmax).unwrap().eval(mbreak);
        let below = broken_powerlaw_smoothed(&[mbreak - 1e-9], 3.5, 1.5, mmax, mmin, 5.0, b)
            .unwrap();
        // Same normalization, so the ratio across the break is the ratio of segment shapes
        assert_relative_eq!(p[0] / below[0], upper / lower, max_relative = 1e-6);
    }

    #[test]
    fn test_broken_powerlaw_reports_segment_index() {
        assert!(matches!(
            broken_powerlaw_smoothed(&[10.0], 3.5, 1.0, 90.0, 5.0, 5.0, 0.5),
            Err(MassModelError::InvalidParameter { param: "alpha2", .. })
        ));
        assert!(matches!(
            broken_powerlaw_smoothed(&[10.0], 3.5, 2.0, 90.0, 5.0, 5.0, 1.5),
            Err(MassModelError::InvalidParameter { param: "b", .. })
        ));
    }

    #[test]
    fn test_peak_smoothed_extends_past_integration_bound() {
        let p = peak_smoothed(&[35.0, 105.0], 35.0, 5.0, 5.0, 5.0, DEFAULT_PEAK_MMAX).unwrap();
        assert!(p[0] > 0.0);
        assert!(p[1] > 0.0);
    }

    #[test]
    fn test_peak_smoothed_far_outside_support_is_degenerate() {
        let err = peak_smoothed(&[10.0], 5000.0, 1.0, 5.0, 5.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            MassModelError::DegenerateNormalization {
                model: "peak_smoothed",
                ..
            }
        ));
    }

    #[test]
    fn test_plpeak_weight_extremes() {
        let m = masses();
        let pl = powerlaw_smoothed(&m, 3.5, 90.0, 5.0, 5.0).unwrap();
        let pk = peak_smoothed(&m, 35.0, 5.0, 5.0, 5.0, DEFAULT_PEAK_MMAX).unwrap();
        assert_eq!(plpeak(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 0.0).unwrap(), pl);
        assert_eq!(plpeak(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 1.0).unwrap(), pk);
    }

    #[test]
    fn test_plpeak_mmin_above_peak_bound() {
        match plpeak(&[130.0, 160.0], 3.5, 120.0, 200.0, 5.0, 150.0, 5.0, 0.2) {
            Err(MassModelError::InvalidParameter { param, value, reason }) => {
                assert_eq!(param, "mmin");
                assert_eq!(value, 120.0);
                assert_eq!(reason, "must be below the peak quadrature bound 100");
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
        // The same support is fine for the jointly normalized mixture
        assert!(plpeak_lvk(&[130.0, 160.0], 3.5, 120.0, 200.0, 5.0, 150.0, 5.0, 0.2).is_ok());
    }

    #[test]
    fn test_plpeak_checks_peak_before_powerlaw() {
        // Peak parameters are checked even though the power-law ones are valid
        assert!(matches!(
            plpeak(&[10.0, 40.0], 3.5, 5.0, 90.0, 5.0, f64::NAN, 5.0, 0.2),
            Err(MassModelError::InvalidParameter { param: "mu", .. })
        ));
        assert!(matches!(
            plpeak(&[10.0, 40.0], 3.5, 5.0, 90.0, 5.0, 35.0, 0.0, 0.2),
            Err(MassModelError::InvalidParameter { param: "sigma", .. })
        ));
    }

    #[test]
    fn test_plpeak_lvk_rejects_zero_mmin() {
        match plpeak_lvk(&[10.0, 40.0], 3.5, 0.0, 90.0, 5.0, 35.0, 5.0, 0.2) {
            Err(MassModelError::InvalidParameter { param, reason, .. }) => {
                assert_eq!((param, reason), ("mmin", "must be positive"));
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_plpeak_lvk_pure_powerlaw() {
        let m = masses();
        let lvk = plpeak_lvk(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 0.0).unwrap();
        let pl = powerlaw_smoothed(&m, 3.5, 90.0, 5.0, 5.0).unwrap();
        for (a, b) in lvk.iter().zip(pl.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_mixture_conventions_differ() {
        let m = [20.0, 35.0, 60.0];
        let two_pass = plpeak(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 0.3).unwrap();
        let lvk = plpeak_lvk(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 0.3).unwrap();
        assert!(two_pass
            .iter()
            .zip(lvk.iter())
            .any(|(a, b)| (a - b).abs() > 1e-6 * a.abs()));
    }
}
