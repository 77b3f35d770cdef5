//! Compact-object mass and mass-ratio population densities
//!
//! The models are built in layers:
//!
//! 1. [`Smoothing`]: a sigmoid turn-on over `[mmin, mmin + delta]`.
//! 2. Shapes: [`TruncatedPowerLaw`], [`Gaussian`] and [`MassRatioPowerLaw`].
//! 3. [`Smoothed`] products of a shape and the kernel (unnormalized).
//! 4. Normalized models, integrated on a fixed [`crate::quadrature::QuadratureGrid`].
//!
//! | Model | Normalization |
//! |-------|---------------|
//! | [`powerlaw_smoothed`] | one pass over `[mmin, mmax]` |
//! | [`broken_powerlaw_smoothed`] | one joint pass over both segments |
//! | [`peak_smoothed`] | one pass over `[mmin, mmax]`, `mmax = 100` by convention |
//! | [`plpeak`] | power law and peak normalized separately, then mixed |
//! | [`plpeak_lvk`] | mixed, smoothed, then one pass |
//! | [`powerlaw_massratio`] | one pass over `(0, 1]` per primary mass |
//!
//! All functions validate their scalar parameters before evaluating any
//! point and never return NaN or infinite densities in place of an error.
//!
//! ```rust
//! use popmass::prelude::*;
//!
//! let m = [10.0, 35.0, 60.0];
//! let two_pass = plpeak(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 0.2).unwrap();
//! let lvk = plpeak_lvk(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 0.2).unwrap();
//! assert_ne!(two_pass, lvk);
//! ```

mod params;
mod primary;
mod ratio;
mod shapes;
mod smoothing;
mod validate;


pub use params::{
    BrokenPowerLawParams, Density, Lvk, MassRatioParams, PeakParams, PowerLawParams,
    PowerLawPeakParams,
};
pub use primary::{
    broken_powerlaw_smoothed, peak_smoothed, plpeak, plpeak_lvk, powerlaw_smoothed,
    DEFAULT_PEAK_MMAX,
};
pub use ratio::{powerlaw_massratio, powerlaw_massratio_paired};
pub use shapes::{
    peak, powerlaw_massratio_truncated, powerlaw_truncated, Gaussian, MassRatioPowerLaw,
    PowerLawPeakMixture, Shape, Smoothed, TruncatedPowerLaw,
};
pub use smoothing::{smoothing, smoothing_at, Smoothing};
