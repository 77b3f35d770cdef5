//! Fixed-grid quadrature used to normalize the smoothed mass densities
//!
//! Every normalized model integrates its unnormalized shape with the
//! rectangle rule on a grid of [`GRID_POINTS`] equally spaced nodes:
//!
//! ```text
//! N = Σ f(xᵢ) × (x₁ - x₀)
//! ```
//!
//! The grid is rebuilt for each call from the model's support, except for
//! the mass-ratio grid on `(0, 1]`, which does not depend on any parameter
//! and is shared process-wide through [`MASS_RATIO_GRID`].

use lazy_static::lazy_static;
use ndarray::{s, Array1};

use crate::error::MassModelError;

/// Number of nodes used for every normalization integral
pub const GRID_POINTS: usize = 1000;

lazy_static! {
    /// 1000 nodes on `(0, 1]`, i.e. `linspace(0, 1, 1001)` without the origin
    pub static ref MASS_RATIO_GRID: QuadratureGrid = QuadratureGrid::unit_interval();
}

/// An ordered grid of equally spaced nodes with its spacing
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureGrid {
    nodes: Array1<f64>,
    spacing: f64,
}

impl QuadratureGrid {
    /// Grid of `n` nodes spanning `[start, stop]`, both endpoints included
    pub fn linear(start: f64, stop: f64, n: usize) -> Self {
        Self::from_nodes(linspace(start, stop, n))
    }

    /// Grid of [`GRID_POINTS`] nodes spanning a mass support `[mmin, mmax]`
    pub fn mass(mmin: f64, mmax: f64) -> Self {
        Self::linear(mmin, mmax, GRID_POINTS)
    }

    fn unit_interval() -> Self {
        let nodes = linspace(0.0, 1.0, GRID_POINTS + 1).slice_move(s![1..]);
        Self::from_nodes(nodes)
    }

    fn from_nodes(nodes: Array1<f64>) -> Self {
        let spacing = if nodes.len() > 1 {
            nodes[1] - nodes[0]
        } else {
            0.0
        };
        QuadratureGrid { nodes, spacing }
    }

    pub fn nodes(&self) -> &Array1<f64> {
        &self.nodes
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rectangle-rule integral of `f` over the grid
    #[inline]
    pub fn integrate<F>(&self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.nodes.iter().map(|&x| f(x)).sum::<f64>() * self.spacing
    }

    /// Integrate `f` and reject integrals that cannot serve as a normalization constant
    pub fn normalization<F>(&self, model: &'static str, f: F) -> Result<f64, MassModelError>
    where
        F: Fn(f64) -> f64,
    {
        checked_normalization(model, self.integrate(f))
    }
}

/// `n` equally spaced values over `[start, stop]`
///
/// Nodes are `start + i × step` and the last node is pinned to `stop`, so a
/// support bound evaluated on the grid is hit exactly.
pub fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            Array1::from_shape_fn(n, |i| {
                if i == n - 1 {
                    stop
                } else {
                    start + step * i as f64
                }
            })
        }
    }
}

pub(crate) fn checked_normalization(model: &'static str, norm: f64) -> Result<f64, MassModelError> {
    if !norm.is_finite() || norm < f64::MIN_POSITIVE {
        tracing::warn!(model, norm, "normalization integral is degenerate");
        return Err(MassModelError::DegenerateNormalization { model, value: norm });
    }
    tracing::trace!(model, norm, "computed normalization");
    Ok(norm)
}
