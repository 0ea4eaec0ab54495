//! Model visualization.
//!
//! Rendering belongs to an injected [`PlotSink`]; this module prepares what it
//! draws: a y-normal cross-section through the active cells and the color
//! limits spanning the model.

use crate::error::{GravsynthError, Result};
use crate::math::{Point3, TOLERANCE};

/// Receives a finished model plot. Nothing is read back.
pub trait PlotSink {
    /// Renders the plot.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, plot: &ModelPlot) -> Result<()>;
}

/// Value range mapped onto the color scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorLimits {
    pub min: f64,
    pub max: f64,
}

impl ColorLimits {
    /// Spans the finite values of `model`.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::InvalidInput`] if `model` has no finite value.
    pub fn from_model(model: &[f64]) -> Result<Self> {
        let mut finite = model.iter().copied().filter(|v| v.is_finite());
        let first = finite.next().ok_or_else(|| {
            GravsynthError::InvalidInput("model has no finite values to scale colors".into())
        })?;
        let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Ok(Self { min, max })
    }
}

/// One cell of a cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSample {
    pub x: f64,
    pub z: f64,
    pub value: f64,
}

/// The active cells lying on one y level of the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    /// The y coordinate of the level the samples lie on.
    pub y: f64,
    /// Samples sorted by x, then z.
    pub samples: Vec<SectionSample>,
}

impl CrossSection {
    /// Extracts the cells on the cell-center y level nearest to `y`.
    ///
    /// When two levels are equally near, the higher one is used.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::ShapeMismatch`] if `model` and `cells` differ
    /// in length, or [`GravsynthError::InvalidInput`] if there are no cells.
    pub fn normal_y(cells: &[Point3], model: &[f64], y: f64) -> Result<Self> {
        if cells.len() != model.len() {
            return Err(GravsynthError::ShapeMismatch {
                expected: cells.len(),
                actual: model.len(),
            });
        }

        let level = cells
            .iter()
            .map(|c| c.y)
            .fold(None::<f64>, |best, candidate| match best {
                None => Some(candidate),
                Some(current) => {
                    let d_best = (current - y).abs();
                    let d_cand = (candidate - y).abs();
                    if d_cand < d_best - TOLERANCE
                        || ((d_cand - d_best).abs() <= TOLERANCE && candidate > current)
                    {
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            })
            .ok_or_else(|| GravsynthError::InvalidInput("no cells to section".into()))?;

        let mut samples: Vec<SectionSample> = cells
            .iter()
            .zip(model)
            .filter(|(c, _)| (c.y - level).abs() <= TOLERANCE)
            .map(|(c, &value)| SectionSample {
                x: c.x,
                z: c.z,
                value,
            })
            .collect();
        samples.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.z.total_cmp(&b.z)));

        Ok(Self { y: level, samples })
    }
}

/// Everything a sink needs to draw the model slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPlot {
    pub section: CrossSection,
    pub limits: ColorLimits,
    pub title: String,
    pub x_label: String,
    pub z_label: String,
    pub colorbar_label: String,
    pub colormap: String,
}
