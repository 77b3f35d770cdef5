//! Unsmoothed shape functions and their smoothed, unnormalized products
//!
//! | Shape | Density | Support |
//! |-------|---------|---------|
//! | [`TruncatedPowerLaw`] | `m^-α (α-1) / (mmin^(1-α) - mmax^(1-α))` | `[mmin, mmax]` |
//! | [`Gaussian`] | `exp(-(m-μ)²/2σ²) / (√(2π) σ)` | ℝ |
//! | [`MassRatioPowerLaw`] | `q^β (β+1)` | `(0, 1]` |
//!
//! The power laws are normalized analytically over their support. Once they
//! are multiplied by the [`Smoothing`] kernel they no longer integrate to
//! one, which is what the quadrature in [`super::primary`] and
//! [`super::ratio`] corrects.

use std::f64::consts::PI;

use ndarray::{Array1, ArrayView1, AsArray, Ix1};

use super::smoothing::Smoothing;
use super::validate;
use crate::error::MassModelError;

/// A pointwise, unnormalized mass shape
pub trait Shape {
    fn eval(&self, m: f64) -> f64;
}

/// Power law `m^-alpha` truncated to `[mmin, mmax]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedPowerLaw {
    alpha: f64,
    mmin: f64,
    mmax: f64,
    norm: f64,
}

impl TruncatedPowerLaw {
    /// `alpha == 1` is rejected: the closed-form normalization divides by zero there.
    /// So is `mmin <= 0`, where `mmin^(1-alpha)` is zero, infinite or NaN.
    pub fn new(alpha: f64, mmin: f64, mmax: f64) -> Result<Self, MassModelError> {
        validate::powerlaw_index("alpha", alpha)?;
        validate::powerlaw_support(mmin, mmax)?;
        let norm = (alpha - 1.0) / (mmin.powf(1.0 - alpha) - mmax.powf(1.0 - alpha));
        Ok(TruncatedPowerLaw {
            alpha,
            mmin,
            mmax,
            norm,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Shape for TruncatedPowerLaw {
    #[inline]
    fn eval(&self, m: f64) -> f64 {
        if m < self.mmin || m > self.mmax {
            0.0
        } else {
            m.powf(-self.alpha) * self.norm
        }
    }
}

/// Gaussian density with location `mu` and scale `sigma`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    mu: f64,
    sigma: f64,
}

impl Gaussian {
    pub fn new(mu: f64, sigma: f64) -> Result<Self, MassModelError> {
        validate::finite("mu", mu)?;
        validate::positive("sigma", sigma)?;
        Ok(Gaussian { mu, sigma })
    }
}

impl Shape for Gaussian {
    #[inline]
    fn eval(&self, m: f64) -> f64 {
        let z = m - self.mu;
        (-0.5 * z * z / (self.sigma * self.sigma)).exp() / ((2.0 * PI).sqrt() * self.sigma)
    }
}

/// LVK mixture of a truncated power law and a Gaussian, mixed before smoothing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawPeakMixture {
    powerlaw: TruncatedPowerLaw,
    peak: Gaussian,
    weight: f64,
}

impl PowerLawPeakMixture {
    pub fn new(
        powerlaw: TruncatedPowerLaw,
        peak: Gaussian,
        weight: f64,
    ) -> Result<Self, MassModelError> {
        validate::unit_interval("weight", weight)?;
        Ok(PowerLawPeakMixture {
            powerlaw,
            peak,
            weight,
        })
    }
}

impl Shape for PowerLawPeakMixture {
    #[inline]
    fn eval(&self, m: f64) -> f64 {
        (1.0 - self.weight) * self.powerlaw.eval(m) + self.weight * self.peak.eval(m)
    }
}

/// A shape tapered by the low-mass smoothing kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed<S> {
    shape: S,
    smoothing: Smoothing,
}

impl<S: Shape> Smoothed<S> {
    pub fn new(shape: S, smoothing: Smoothing) -> Self {
        Smoothed { shape, smoothing }
    }
}

impl<S: Shape> Shape for Smoothed<S> {
    #[inline]
    fn eval(&self, m: f64) -> f64 {
        self.shape.eval(m) * self.smoothing.eval(m)
    }
}

/// Mass-ratio power law `q^beta` on `(0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassRatioPowerLaw {
    beta: f64,
}

impl MassRatioPowerLaw {
    /// Requires `beta > -1` for `(beta + 1)` to normalize the density.
    pub fn new(beta: f64) -> Result<Self, MassModelError> {
        validate::massratio_index(beta)?;
        Ok(MassRatioPowerLaw { beta })
    }

    #[inline]
    pub fn eval(&self, q: f64) -> f64 {
        if q <= 0.0 || q > 1.0 {
            0.0
        } else {
            q.powf(self.beta) * (self.beta + 1.0)
        }
    }

    /// Unnormalized density of `q` given the primary mass `m1`, smoothed at the secondary mass `m1 q`
    #[inline]
    pub fn eval_smoothed(&self, q: f64, m1: f64, smoothing: &Smoothing) -> f64 {
        self.eval(q) * smoothing.eval(m1 * q)
    }
}

fn map_shape<'a, V, S>(m: V, shape: &S) -> Array1<f64>
where
    V: AsArray<'a, f64, Ix1>,
    S: Shape,
{
    let m: ArrayView1<f64> = m.into();
    m.mapv(|x| shape.eval(x))
}

/// Truncated power law evaluated at every mass in `m`; zero outside `[mmin, mmax]`
///
/// # Errors
///
/// [`MassModelError::InvalidParameter`] for `alpha == 1` or `mmin >= mmax`.
pub fn powerlaw_truncated<'a, V>(
    m: V,
    alpha: f64,
    mmin: f64,
    mmax: f64,
) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    let shape = TruncatedPowerLaw::new(alpha, mmin, mmax)?;
    Ok(map_shape(m, &shape))
}

/// Gaussian density evaluated at every mass in `m`
pub fn peak<'a, V>(m: V, mu: f64, sigma: f64) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    let shape = Gaussian::new(mu, sigma)?;
    Ok(map_shape(m, &shape))
}

/// Mass-ratio power law evaluated at every `q`; zero outside `(0, 1]`
pub fn powerlaw_massratio_truncated<'a, V>(q: V, beta: f64) -> Result<Array1<f64>, MassModelError>
where
    V: AsArray<'a, f64, Ix1>,
{
    let shape = MassRatioPowerLaw::new(beta)?;
    let q: ArrayView1<f64> = q.into();
    Ok(q.mapv(|x| shape.eval(x)))
}
