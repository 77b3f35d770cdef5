//! Fail-fast checks on scalar model parameters
//!
//! Every public density validates its scalars here before touching any
//! array. The source models accepted `delta <= 0`, `alpha = 1` and similar
//! inputs and silently produced NaN or infinite densities; these checks
//! turn them into [`MassModelError::InvalidParameter`].

use crate::error::MassModelError;

pub(crate) fn finite(param: &'static str, value: f64) -> Result<(), MassModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MassModelError::invalid(param, value, "must be finite"))
    }
}

pub(crate) fn positive(param: &'static str, value: f64) -> Result<(), MassModelError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MassModelError::invalid(
            param,
            value,
            "must be positive and finite",
        ))
    }
}

/// `mmin < mmax`, both finite
pub(crate) fn support(mmin: f64, mmax: f64) -> Result<(), MassModelError> {
    finite("mmin", mmin)?;
    finite("mmax", mmax)?;
    if mmin < mmax {
        Ok(())
    } else {
        Err(MassModelError::invalid(
            "mmin",
            mmin,
            "must be less than mmax",
        ))
    }
}

/// `0 < mmin < mmax`, as the power-law constant needs `mmin^(1-alpha)` finite and nonzero
pub(crate) fn powerlaw_support(mmin: f64, mmax: f64) -> Result<(), MassModelError> {
    finite("mmin", mmin)?;
    if mmin <= 0.0 {
        return Err(MassModelError::invalid("mmin", mmin, "must be positive"));
    }
    support(mmin, mmax)
}

pub(crate) fn unit_interval(param: &'static str, value: f64) -> Result<(), MassModelError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MassModelError::invalid(param, value, "must lie in [0, 1]"))
    }
}

/// The closed-form normalization `(alpha - 1) / (mmin^(1-alpha) - mmax^(1-alpha))` is singular at 1
pub(crate) fn powerlaw_index(param: &'static str, alpha: f64) -> Result<(), MassModelError> {
    finite(param, alpha)?;
    if alpha == 1.0 {
        Err(MassModelError::invalid(
            param,
            alpha,
            "closed-form normalization is singular at 1",
        ))
    } else {
        Ok(())
    }
}

/// `(beta + 1)` is only a valid normalization on `(0, 1]` for `beta > -1`
pub(crate) fn massratio_index(beta: f64) -> Result<(), MassModelError> {
    finite("beta", beta)?;
    if beta > -1.0 {
        Ok(())
    } else {
        Err(MassModelError::invalid(
            "beta",
            beta,
            "must be greater than -1",
        ))
    }
}
