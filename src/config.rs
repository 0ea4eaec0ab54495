//! Scenario configuration.
//!
//! [`ScenarioConfig::default`] reproduces the reference survey: a 15 m deep
//! Gaussian depression, a 17-station line 5 m above ground, a low-density
//! block and a high-density sphere in a zero background.

use std::path::PathBuf;

use crate::error::Result;
use crate::math::Point3;
use crate::model::{ModelPainter, PaintOperation, Region};
use crate::survey::{Component, ReceiverLine};
use crate::topography::GaussianDepression;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Synthetic topography parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopographyConfig {
    pub depth: f64,
    pub width: f64,
    pub extent: f64,
    /// Samples per axis of the saved topography grid.
    pub samples: usize,
}

impl Default for TopographyConfig {
    fn default() -> Self {
        Self {
            depth: 15.0,
            width: 80.0,
            extent: 200.0,
            samples: 41,
        }
    }
}

impl TopographyConfig {
    /// Builds the surface.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for non-positive width or extent.
    pub fn surface(&self) -> Result<GaussianDepression> {
        GaussianDepression::new(self.depth, self.width, self.extent)
    }
}

/// Receiver layout and measured components.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurveyConfig {
    pub line: ReceiverLine,
    pub components: Vec<Component>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            line: ReceiverLine::default(),
            components: vec![Component::Gz],
        }
    }
}

/// Density contrast model: background plus ordered paint operations (g/cc).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelConfig {
    pub background: f64,
    pub operations: Vec<PaintOperation>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            background: 0.0,
            operations: vec![
                PaintOperation::new(
                    Region::Block {
                        min: Point3::new(-50.0, -15.0, -50.0),
                        max: Point3::new(-20.0, 15.0, -30.0),
                    },
                    -0.2,
                ),
                PaintOperation::new(
                    Region::Sphere {
                        center: Point3::new(35.0, 0.0, -40.0),
                        radius: 15.0,
                    },
                    0.2,
                ),
            ],
        }
    }
}

impl ModelConfig {
    /// Returns a painter applying the operations in configured order.
    #[must_use]
    pub fn painter(&self) -> ModelPainter {
        ModelPainter::new(self.background).with_operations(self.operations.iter().copied())
    }
}

/// Labels and slice position of the model plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotConfig {
    pub slice_y: f64,
    pub title: String,
    pub x_label: String,
    pub z_label: String,
    pub colorbar_label: String,
    pub colormap: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            slice_y: 0.0,
            title: "Model slice at y = 0 m".into(),
            x_label: "x (m)".into(),
            z_label: "z (m)".into(),
            colorbar_label: "g/cm^3".into(),
            colormap: "viridis".into(),
        }
    }
}

/// Where and whether to save the topography and observed data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputConfig {
    /// Off by default.
    pub save: bool,
    pub directory: PathBuf,
    pub topography_file: String,
    pub data_file: String,
    /// Noise amplitude as a fraction of the largest absolute datum.
    pub noise_fraction: f64,
    pub noise_seed: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save: false,
            directory: PathBuf::from("../data/"),
            topography_file: "gravity_topo.txt".into(),
            data_file: "gravity_data.obs".into(),
            noise_fraction: 0.01,
            noise_seed: 737,
        }
    }
}

impl OutputConfig {
    #[must_use]
    pub fn topography_path(&self) -> PathBuf {
        self.directory.join(&self.topography_file)
    }

    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.directory.join(&self.data_file)
    }
}

/// Complete description of a synthetic survey run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScenarioConfig {
    pub topography: TopographyConfig,
    pub survey: SurveyConfig,
    pub model: ModelConfig,
    pub plot: PlotConfig,
    pub output: OutputConfig,
}

impl ScenarioConfig {
    #[must_use]
    pub fn with_topography(mut self, topography: TopographyConfig) -> Self {
        self.topography = topography;
        self
    }

    #[must_use]
    pub fn with_survey(mut self, survey: SurveyConfig) -> Self {
        self.survey = survey;
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_plot(mut self, plot: PlotConfig) -> Self {
        self.plot = plot;
        self
    }

    /// Enables saving into `directory`.
    #[must_use]
    pub fn saving_to(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.save = true;
        self.output.directory = directory.into();
        self
    }
}
