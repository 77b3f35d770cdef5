//! Parameter sets for the normalized models
//!
//! Each set carries the reference defaults and deserializes from partial
//! JSON (missing fields fall back to the defaults), so a sampler can store
//! hyperparameter draws directly.

use ndarray::{Array1, AsArray, Ix1};
use serde::{Deserialize, Serialize};

use super::primary::{
    broken_powerlaw_smoothed, peak_smoothed, plpeak, plpeak_lvk, powerlaw_smoothed,
    DEFAULT_PEAK_MMAX,
};
use super::ratio::powerlaw_massratio;
use crate::error::MassModelError;

/// A normalized density with fixed parameters
pub trait Density {
    /// Evaluate the density at every point of `m`
    fn pdf<'a, V>(&self, m: V) -> Result<Array1<f64>, MassModelError>
    where
        V: AsArray<'a, f64, Ix1>;

    /// Evaluate the density at a single point
    fn pdf_at(&self, m: f64) -> Result<f64, MassModelError> {
        Ok(self.pdf(&[m])?[0])
    }
}

/// Smoothed truncated power law, see [`powerlaw_smoothed`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerLawParams {
    pub alpha: f64,
    pub mmin: f64,
    pub mmax: f64,
    pub delta: f64,
}

impl Default for PowerLawParams {
    fn default() -> Self {
        Self {
            alpha: 3.5,
            mmin: 5.0,
            mmax: 90.0,
            delta: 5.0,
        }
    }
}

impl PowerLawParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_support(mut self, mmin: f64, mmax: f64) -> Self {
        self.mmin = mmin;
        self.mmax = mmax;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }
}

impl Density for PowerLawParams {
    fn pdf<'a, V>(&self, m: V) -> Result<Array1<f64>, MassModelError>
    where
        V: AsArray<'a, f64, Ix1>,
    {
        powerlaw_smoothed(m, self.alpha, self.mmax, self.mmin, self.delta)
    }
}

/// Broken power law, see [`broken_powerlaw_smoothed`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokenPowerLawParams {
    pub alpha1: f64,
    pub alpha2: f64,
    pub mmin: f64,
    pub mmax: f64,
    pub delta: f64,
    /// Break position as a fraction of `mmax - mmin`
    pub b: f64,
}

impl Default for BrokenPowerLawParams {
    fn default() -> Self {
        Self {
            alpha1: 3.5,
            alpha2: 2.5,
            mmin: 5.0,
            mmax: 90.0,
            delta: 5.0,
            b: 0.5,
        }
    }
}

impl BrokenPowerLawParams {
    /// Mass at which the second segment takes over
    pub fn mbreak(&self) -> f64 {
        self.mmin + self.b * (self.mmax - self.mmin)
    }
}

impl Density for BrokenPowerLawParams {
    fn pdf<'a, V>(&self, m: V) -> Result<Array1<f64>, MassModelError>
    where
        V: AsArray<'a, f64, Ix1>,
    {
        broken_powerlaw_smoothed(
            m,
            self.alpha1,
            self.alpha2,
            self.mmax,
            self.mmin,
            self.delta,
            self.b,
        )
    }
}

/// Smoothed Gaussian peak, see [`peak_smoothed`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakParams {
    pub mu: f64,
    pub sigma: f64,
    pub mmin: f64,
    pub delta: f64,
    /// Upper bound of the normalization integral
    pub mmax: f64,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            mu: 35.0,
            sigma: 5.0,
            mmin: 5.0,
            delta: 5.0,
            mmax: DEFAULT_PEAK_MMAX,
        }
    }
}

impl Density for PeakParams {
    fn pdf<'a, V>(&self, m: V) -> Result<Array1<f64>, MassModelError>
    where
        V: AsArray<'a, f64, Ix1>,
    {
        peak_smoothed(m, self.mu, self.sigma, self.mmin, self.delta, self.mmax)
    }
}

/// Power law + peak parameters
///
/// As a [`Density`] this evaluates [`plpeak`] (independently normalized
/// components). Wrap it in [`Lvk`] for the jointly normalized
/// [`plpeak_lvk`] convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerLawPeakParams {
    pub alpha: f64,
    pub mmin: f64,
    pub mmax: f64,
    pub delta: f64,
    pub mu: f64,
    pub sigma: f64,
    /// Fraction of the population in the peak
    #[serde(alias = "w")]
    pub weight: f64,
}

impl Default for PowerLawPeakParams {
    fn default() -> Self {
        Self {
            alpha: 3.5,
            mmin: 5.0,
            mmax: 90.0,
            delta: 5.0,
            mu: 35.0,
            sigma: 5.0,
            weight: 0.2,
        }
    }
}

impl PowerLawPeakParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_peak(mut self, mu: f64, sigma: f64) -> Self {
        self.mu = mu;
        self.sigma = sigma;
        self
    }

    pub fn lvk(self) -> Lvk {
        Lvk(self)
    }
}

impl Density for PowerLawPeakParams {
    fn pdf<'a, V>(&self, m: V) -> Result<Array1<f64>, MassModelError>
    where
        V: AsArray<'a, f64, Ix1>,
    {
        plpeak(
            m,
            self.alpha,
            self.mmin,
            self.mmax,
            self.delta,
            self.mu,
            self.sigma,
            self.weight,
        )
    }
}

/// LVK power law + peak: mix, smooth, then normalize once
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Lvk(pub PowerLawPeakParams);

impl Density for Lvk {
    fn pdf<'a, V>(&self, m: V) -> Result<Array1<f64>, MassModelError>
    where
        V: AsArray<'a, f64, Ix1>,
    {
        let p = &self.0;
        plpeak_lvk(
            m, p.alpha, p.mmin, p.mmax, p.delta, p.mu, p.sigma, p.weight,
        )
    }
}

/// Mass-ratio power law conditioned on a primary mass, see [`powerlaw_massratio`]
///
/// As a [`Density`] the input is the mass ratio `q`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassRatioParams {
    pub m1: f64,
    pub beta: f64,
    pub mmin: f64,
    pub delta: f64,
}

impl Default for MassRatioParams {
    fn default() -> Self {
        Self {
            m1: 30.0,
            beta: 1.0,
            mmin: 5.0,
            delta: 5.0,
        }
    }
}

impl MassRatioParams {
    pub fn with_primary(mut self, m1: f64) -> Self {
        self.m1 = m1;
        self
    }
}

impl Density for MassRatioParams {
    fn pdf<'a, V>(&self, q: V) -> Result<Array1<f64>, MassModelError>
    where
        V: AsArray<'a, f64, Ix1>,
    {
        powerlaw_massratio(q, self.m1, self.beta, self.mmin, self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_models() {
        let pl = PowerLawParams::default();
        assert_eq!((pl.alpha, pl.mmin, pl.mmax, pl.delta), (3.5, 5.0, 90.0, 5.0));
        let bpl = BrokenPowerLawParams::default();
        assert_eq!(bpl.mbreak(), 47.5);
        let plp = PowerLawPeakParams::default();
        assert_eq!((plp.mu, plp.sigma, plp.weight), (35.0, 5.0, 0.2));
    }

    #[test]
    fn test_density_dispatch() {
        let m = [8.0, 20.0, 40.0];
        let params = PowerLawParams::default().with_alpha(2.5);
        assert_eq!(
            params.pdf(&m).unwrap(),
            powerlaw_smoothed(&m, 2.5, 90.0, 5.0, 5.0).unwrap()
        );

        let mix = PowerLawPeakParams::default();
        assert_eq!(
            mix.lvk().pdf(&m).unwrap(),
            plpeak_lvk(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 0.2).unwrap()
        );
        assert_ne!(mix.pdf(&m).unwrap(), mix.lvk().pdf(&m).unwrap());
    }

    #[test]
    fn test_pdf_at_matches_array() {
        let params = BrokenPowerLawParams::default();
        let p = params.pdf(&[12.0, 60.0]).unwrap();
        assert_eq!(params.pdf_at(12.0).unwrap(), p[0]);
        assert_eq!(params.pdf_at(60.0).unwrap(), p[1]);
    }

    #[test]
    fn test_pdf_at_propagates_errors() {
        let params = PeakParams {
            sigma: 0.0,
            ..PeakParams::default()
        };
        assert!(params.pdf_at(30.0).is_err());
    }
}
