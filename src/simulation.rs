use crate::error::Result;
use crate::mesh::ActiveCells;
use crate::survey::Survey;

/// Forward-models survey data from a property model.
///
/// The integral-equation kernel lives outside this crate; implementations
/// wrap it. `model` holds one value per entry of `cells`, in the same order.
pub trait ForwardSimulation {
    /// Returns the predicted data, one value per survey datum.
    ///
    /// Data are receiver-major: every component of the first receiver, then
    /// every component of the next.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation fails. The workflow passes it on
    /// unchanged.
    fn dpred(&self, survey: &Survey, cells: &ActiveCells, model: &[f64]) -> Result<Vec<f64>>;
}
