//! Normalized mass and mass-ratio densities for compact-binary population inference.
//!
//! The crate evaluates the "power law + peak" family of primary-mass models
//! and the smoothed mass-ratio power law. Every normalized model is computed
//! fresh on each call from a fixed 1000-node rectangle-rule quadrature, so
//! evaluation is deterministic and free of shared mutable state.
//!
//! ```rust
//! use popmass::prelude::*;
//!
//! let m = [8.0, 25.0, 35.0, 70.0];
//! let p = plpeak(&m, 3.5, 5.0, 90.0, 5.0, 35.0, 5.0, 0.2)?;
//! assert!(p.iter().all(|v| v.is_finite() && *v > 0.0));
//!
//! let q = powerlaw_massratio(&[0.5], 30.0, 1.0, 5.0, 5.0)?;
//! assert!(q[0] > 0.0);
//! # Ok::<(), popmass::MassModelError>(())
//! ```

pub mod batch;
pub mod error;
pub mod mass;
pub mod quadrature;

pub use error::MassModelError;
pub use mass::*;

pub mod prelude {
    pub use crate::batch::density_matrix;
    pub use crate::error::MassModelError;
    pub use crate::mass::{
        broken_powerlaw_smoothed, peak, peak_smoothed, plpeak, plpeak_lvk, powerlaw_massratio,
        powerlaw_massratio_paired, powerlaw_massratio_truncated, powerlaw_smoothed,
        powerlaw_truncated, smoothing, smoothing_at, BrokenPowerLawParams, Density, Lvk,
        MassRatioParams, PeakParams, PowerLawParams, PowerLawPeakParams,
    };
}
