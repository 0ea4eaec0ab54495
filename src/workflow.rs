//! End-to-end synthetic survey run.

use std::path::PathBuf;

use nalgebra::DMatrix;
use tracing::{debug, info};

use crate::config::ScenarioConfig;
use crate::error::{GravsynthError, Result};
use crate::io::{points_table, Persistence, TextTableWriter};
use crate::math::Point3;
use crate::mesh::{ActiveCells, MeshProvider};
use crate::noise::with_noise;
use crate::plot::{ColorLimits, CrossSection, ModelPlot, PlotSink};
use crate::simulation::ForwardSimulation;
use crate::survey::Survey;

/// Files written by a run with saving enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFiles {
    pub topography: PathBuf,
    pub data: PathBuf,
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct SurveyOutput {
    /// Sampled topography grid.
    pub topography: Vec<Point3>,
    pub survey: Survey,
    pub cells: ActiveCells,
    /// Density contrast per active cell.
    pub model: Vec<f64>,
    /// Predicted data, noise free.
    pub dpred: Vec<f64>,
    pub saved: Option<SavedFiles>,
}

/// Builds a synthetic gravity survey and forward-models it.
///
/// The mesh and the forward simulation are supplied by the caller. Plotting
/// only happens when a [`PlotSink`] is attached. Saving is controlled by
/// [`OutputConfig::save`](crate::config::OutputConfig::save) and goes through
/// the attached [`Persistence`], or a [`TextTableWriter`] if none is attached.
pub struct SyntheticSurvey<'a> {
    config: &'a ScenarioConfig,
    plotter: Option<&'a mut dyn PlotSink>,
    persistence: Option<&'a dyn Persistence>,
}

impl<'a> SyntheticSurvey<'a> {
    /// Creates a run for `config` with no plotter and the default writer.
    #[must_use]
    pub fn new(config: &'a ScenarioConfig) -> Self {
        Self {
            config,
            plotter: None,
            persistence: None,
        }
    }

    /// Renders the model slice into `plotter` before simulating.
    #[must_use]
    pub fn with_plotter(mut self, plotter: &'a mut dyn PlotSink) -> Self {
        self.plotter = Some(plotter);
        self
    }

    /// Saves outputs through `persistence` instead of the default writer.
    #[must_use]
    pub fn with_persistence(mut self, persistence: &'a dyn Persistence) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Runs the survey.
    ///
    /// # Errors
    ///
    /// Returns configuration errors for malformed scenario parameters, a
    /// shape mismatch if the mesh provider's count disagrees with its cells,
    /// and passes on collaborator failures unchanged.
    pub fn execute(
        &mut self,
        mesh: &dyn MeshProvider,
        simulation: &dyn ForwardSimulation,
    ) -> Result<SurveyOutput> {
        let config = self.config;

        let surface = config.topography.surface()?;
        let topography = surface.sample_grid(config.topography.samples);
        let survey = config
            .survey
            .line
            .survey(&surface, config.survey.components.clone())?;
        info!(
            receivers = survey.receivers().len(),
            components = survey.components().len(),
            "Built survey"
        );

        let cells = mesh.active_cells()?;
        let model = config
            .model
            .painter()
            .execute_expecting(cells.centers(), mesh.active_cell_count())?;
        info!(
            cells = cells.len(),
            operations = config.model.operations.len(),
            "Painted density model"
        );

        if let Some(plotter) = self.plotter.as_deref_mut() {
            // inactive cells stay in the slice as NaN gaps
            let full = cells.inject(&model, f64::NAN)?;
            let plot = ModelPlot {
                section: CrossSection::normal_y(
                    cells.mesh_centers(),
                    &full,
                    config.plot.slice_y,
                )?,
                limits: ColorLimits::from_model(&model)?,
                title: config.plot.title.clone(),
                x_label: config.plot.x_label.clone(),
                z_label: config.plot.z_label.clone(),
                colorbar_label: config.plot.colorbar_label.clone(),
                colormap: config.plot.colormap.clone(),
            };
            debug!(
                samples = plot.section.samples.len(),
                y = plot.section.y,
                "Rendering model slice"
            );
            plotter.render(&plot)?;
        }

        let dpred = simulation.dpred(&survey, &cells, &model)?;
        info!(data = dpred.len(), "Forward simulation complete");

        let saved = if config.output.save {
            let writer: &dyn Persistence = self.persistence.unwrap_or(&TextTableWriter);
            Some(save(config, writer, &topography, &survey, &dpred)?)
        } else {
            None
        };

        Ok(SurveyOutput {
            topography,
            survey,
            cells,
            model,
            dpred,
            saved,
        })
    }
}

fn save(
    config: &ScenarioConfig,
    writer: &dyn Persistence,
    topography: &[Point3],
    survey: &Survey,
    dpred: &[f64],
) -> Result<SavedFiles> {
    let output = &config.output;
    let files = SavedFiles {
        topography: output.topography_path(),
        data: output.data_path(),
    };

    if dpred.len() != survey.n_data() {
        return Err(GravsynthError::ShapeMismatch {
            expected: survey.n_data(),
            actual: dpred.len(),
        });
    }
    let observed = with_noise(dpred, output.noise_fraction, output.noise_seed);
    let data = observation_table(survey, &observed);

    writer.write_topography(&files.topography, topography)?;
    writer.write_table(&files.data, &data)?;

    info!(
        topography = %files.topography.display(),
        data = %files.data.display(),
        "Saved survey output"
    );
    Ok(files)
}

/// Rows `x y z d_1 .. d_n`, one per receiver, one data column per component.
///
/// `data` is receiver-major: all components of the first receiver, then the
/// next receiver.
fn observation_table(survey: &Survey, data: &[f64]) -> DMatrix<f64> {
    let n_components = survey.components().len();
    let columns: Vec<Vec<f64>> = (0..n_components)
        .map(|c| data.iter().skip(c).step_by(n_components).copied().collect())
        .collect();
    let columns: Vec<&[f64]> = columns.iter().map(Vec::as_slice).collect();
    points_table(&survey.locations(), &columns)
}
