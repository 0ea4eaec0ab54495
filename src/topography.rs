//! Topographic surfaces.
//!
//! Interpolating scattered topography is left to the caller: anything that
//! can answer an elevation query implements [`TopographySurface`].

use crate::error::{GravsynthError, Result};
use crate::math::{linspace, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A surface that reports ground elevation at horizontal positions.
pub trait TopographySurface {
    /// Returns the elevation at `(x, y)`, or `None` outside the surface footprint.
    fn elevation(&self, x: f64, y: f64) -> Option<f64>;
}

impl<F> TopographySurface for F
where
    F: Fn(f64, f64) -> Option<f64>,
{
    fn elevation(&self, x: f64, y: f64) -> Option<f64> {
        self(x, y)
    }
}

/// Bowl-shaped synthetic topography: `z = -depth * exp(-(x^2 + y^2) / width^2)`.
///
/// Defined over the square `[-extent, extent]` on both horizontal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussianDepression {
    depth: f64,
    width: f64,
    extent: f64,
}

impl GaussianDepression {
    /// Creates a new depression.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::Configuration`] if `width` or `extent` is not
    /// strictly positive and finite, or `depth` is not finite.
    pub fn new(depth: f64, width: f64, extent: f64) -> Result<Self> {
        if !depth.is_finite() {
            return Err(GravsynthError::Configuration(format!(
                "topography depth must be finite, got {depth}"
            )));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(GravsynthError::Configuration(format!(
                "topography width must be positive, got {width}"
            )));
        }
        if !(extent.is_finite() && extent > 0.0) {
            return Err(GravsynthError::Configuration(format!(
                "topography extent must be positive, got {extent}"
            )));
        }
        Ok(Self {
            depth,
            width,
            extent,
        })
    }

    /// Returns the half-width of the square footprint.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    fn height(&self, x: f64, y: f64) -> f64 {
        -self.depth * (-(x * x + y * y) / (self.width * self.width)).exp()
    }

    /// Samples the surface on an `n x n` grid spanning the footprint.
    ///
    /// Points are ordered with `y` varying fastest: all `y` samples for the
    /// first `x`, then the next `x`, and so on.
    #[must_use]
    pub fn sample_grid(&self, n: usize) -> Vec<Point3> {
        let axis = linspace(-self.extent, self.extent, n);
        axis.iter()
            .flat_map(|&x| axis.iter().map(move |&y| (x, y)))
            .map(|(x, y)| Point3::new(x, y, self.height(x, y)))
            .collect()
    }
}

impl TopographySurface for GaussianDepression {
    fn elevation(&self, x: f64, y: f64) -> Option<f64> {
        (x.abs() <= self.extent && y.abs() <= self.extent).then(|| self.height(x, y))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> GaussianDepression {
        GaussianDepression::new(15.0, 80.0, 200.0).unwrap()
    }

    #[test]
    fn deepest_at_origin() {
        assert_relative_eq!(reference().elevation(0.0, 0.0).unwrap(), -15.0);
    }

    #[test]
    fn decays_with_distance() {
        let topo = reference();
        let z = topo.elevation(80.0, 0.0).unwrap();
        assert_relative_eq!(z, -15.0 * (-1.0f64).exp(), epsilon = 1e-12);
        assert!(topo.elevation(200.0, 200.0).unwrap() > -1e-3);
    }

    #[test]
    fn outside_footprint_is_none() {
        assert!(reference().elevation(200.5, 0.0).is_none());
        assert!(reference().elevation(0.0, -201.0).is_none());
    }

    #[test]
    fn grid_ordering_and_size() {
        let grid = reference().sample_grid(41);
        assert_eq!(grid.len(), 41 * 41);
        assert_relative_eq!(grid[0].x, -200.0);
        assert_relative_eq!(grid[0].y, -200.0);
        assert_relative_eq!(grid[1].x, -200.0);
        assert_relative_eq!(grid[1].y, -190.0, epsilon = 1e-9);
        assert_relative_eq!(grid[41].x, -190.0, epsilon = 1e-9);
        let center = grid[20 * 41 + 20];
        assert_relative_eq!(center.z, -15.0, epsilon = 1e-9);
    }

    #[test]
    fn closure_is_a_surface() {
        let flat = |_x: f64, _y: f64| Some(2.5);
        assert_relative_eq!(flat.elevation(10.0, -3.0).unwrap(), 2.5);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(GaussianDepression::new(15.0, 0.0, 200.0).is_err());
        assert!(GaussianDepression::new(15.0, 80.0, -1.0).is_err());
        assert!(GaussianDepression::new(f64::NAN, 80.0, 200.0).is_err());
    }
}
