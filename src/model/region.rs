use crate::error::{GravsynthError, Result};
use crate::math::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geometric region used to select cells of a property model.
///
/// The two shapes treat their boundary differently: a [`Region::Block`]
/// excludes points lying on any face (open interval on every axis), while a
/// [`Region::Sphere`] includes points lying exactly on its surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region {
    /// Axis-aligned block, open on all six faces.
    Block {
        /// Lower bounds `(xmin, ymin, zmin)`.
        min: Point3,
        /// Upper bounds `(xmax, ymax, zmax)`.
        max: Point3,
    },

    /// Closed ball.
    Sphere {
        /// Center of the ball.
        center: Point3,
        /// Radius (must be non-negative).
        radius: f64,
    },
}

impl Region {
    /// Creates a block region from `(xmin, xmax, ymin, ymax, zmin, zmax)`.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::Configuration`] if any lower bound exceeds its
    /// upper bound or a bound is NaN.
    pub fn block(bounds: [f64; 6]) -> Result<Self> {
        let [xmin, xmax, ymin, ymax, zmin, zmax] = bounds;
        let region = Self::Block {
            min: Point3::new(xmin, ymin, zmin),
            max: Point3::new(xmax, ymax, zmax),
        };
        region.validate()?;
        Ok(region)
    }

    /// Creates a sphere region.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::Configuration`] if the radius is negative or NaN.
    pub fn sphere(center: Point3, radius: f64) -> Result<Self> {
        let region = Self::Sphere { center, radius };
        region.validate()?;
        Ok(region)
    }

    /// Checks the region parameters.
    ///
    /// Variants can be built directly, so painting re-validates every region
    /// before touching the output.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::Configuration`] for inverted or NaN block
    /// bounds, and for a negative or NaN sphere radius.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Block { min, max } => {
                for (axis, (lo, hi)) in ["x", "y", "z"].iter().zip(min.iter().zip(max.iter())) {
                    if lo.is_nan() || hi.is_nan() || lo > hi {
                        return Err(GravsynthError::Configuration(format!(
                            "block {axis} bounds are inverted or undefined: min = {lo}, max = {hi}"
                        )));
                    }
                }
                Ok(())
            }
            Self::Sphere { radius, .. } => {
                if *radius >= 0.0 {
                    Ok(())
                } else {
                    Err(GravsynthError::Configuration(format!(
                        "sphere radius must be non-negative, got {radius}"
                    )))
                }
            }
        }
    }

    /// Returns whether `point` lies inside the region.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        match self {
            Self::Block { min, max } => {
                point.x > min.x
                    && point.x < max.x
                    && point.y > min.y
                    && point.y < max.y
                    && point.z > min.z
                    && point.z < max.z
            }
            Self::Sphere { center, radius } => (point - center).norm() <= *radius,
        }
    }

    /// Short shape name, used in log output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Block { .. } => "block",
            Self::Sphere { .. } => "sphere",
        }
    }
}
