//! Active cells of an externally built mesh.
//!
//! Mesh construction and refinement are handled elsewhere; this module only
//! keeps the ordered centers of the cells that hold model values, plus enough
//! bookkeeping to map an active-cell model back onto the full mesh.

use crate::error::{GravsynthError, Result};
use crate::math::Point3;
use crate::topography::TopographySurface;

/// Supplies the ordered active cell centers of a mesh.
///
/// The order of [`active_cell_centers`](Self::active_cell_centers) is the
/// index order of every property model built over the mesh.
pub trait MeshProvider {
    /// Returns the active cell centers in model order.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot produce the cells.
    fn active_cell_centers(&self) -> Result<Vec<Point3>>;

    /// Returns the number of active cells a model must have.
    fn active_cell_count(&self) -> usize;

    /// Returns the active cells with their full-mesh bookkeeping.
    ///
    /// The default treats the returned centers as the whole mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot produce the cells.
    fn active_cells(&self) -> Result<ActiveCells> {
        Ok(ActiveCells::all(self.active_cell_centers()?))
    }
}

/// Ordered active cells and their positions within the full mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCells {
    centers: Vec<Point3>,
    indices: Vec<usize>,
    mesh_centers: Vec<Point3>,
}

impl ActiveCells {
    /// Treats every cell as active.
    #[must_use]
    pub fn all(centers: Vec<Point3>) -> Self {
        Self {
            indices: (0..centers.len()).collect(),
            mesh_centers: centers.clone(),
            centers,
        }
    }

    /// Keeps the cells whose `mask` entry is `true`, in mesh order.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::ShapeMismatch`] if `mask` and `centers`
    /// differ in length.
    pub fn from_mask(centers: &[Point3], mask: &[bool]) -> Result<Self> {
        if mask.len() != centers.len() {
            return Err(GravsynthError::ShapeMismatch {
                expected: centers.len(),
                actual: mask.len(),
            });
        }
        Ok(Self::select(centers, mask))
    }

    /// Keeps the cells whose center lies strictly below `surface`.
    ///
    /// Cells outside the surface footprint are inactive.
    #[must_use]
    pub fn below_surface(centers: &[Point3], surface: &impl TopographySurface) -> Self {
        let mask: Vec<bool> = centers
            .iter()
            .map(|c| surface.elevation(c.x, c.y).is_some_and(|ground| c.z < ground))
            .collect();
        Self::select(centers, &mask)
    }

    fn select(centers: &[Point3], mask: &[bool]) -> Self {
        let (indices, active): (Vec<usize>, Vec<Point3>) = centers
            .iter()
            .zip(mask)
            .enumerate()
            .filter(|(_, (_, &keep))| keep)
            .map(|(i, (c, _))| (i, *c))
            .unzip();
        Self {
            centers: active,
            indices,
            mesh_centers: centers.to_vec(),
        }
    }

    /// Returns the active cell centers in model order.
    #[must_use]
    pub fn centers(&self) -> &[Point3] {
        &self.centers
    }

    /// Returns the full-mesh index of each active cell.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of active cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Returns `true` if no cell is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Number of cells in the full mesh, active or not.
    #[must_use]
    pub fn total(&self) -> usize {
        self.mesh_centers.len()
    }

    /// Centers of every mesh cell, active or not, in mesh order.
    ///
    /// This is the index order of [`inject`](Self::inject)'s output.
    #[must_use]
    pub fn mesh_centers(&self) -> &[Point3] {
        &self.mesh_centers
    }

    /// Expands an active-cell model onto the full mesh, writing `fill` into
    /// inactive cells (NaN hides them in plots).
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::ShapeMismatch`] if `model` does not have one
    /// value per active cell.
    pub fn inject(&self, model: &[f64], fill: f64) -> Result<Vec<f64>> {
        if model.len() != self.len() {
            return Err(GravsynthError::ShapeMismatch {
                expected: self.len(),
                actual: model.len(),
            });
        }
        let mut full = vec![fill; self.total()];
        for (&index, &value) in self.indices.iter().zip(model) {
            full[index] = value;
        }
        Ok(full)
    }
}

impl MeshProvider for ActiveCells {
    fn active_cell_centers(&self) -> Result<Vec<Point3>> {
        Ok(self.centers.clone())
    }

    fn active_cell_count(&self) -> usize {
        self.len()
    }

    fn active_cells(&self) -> Result<ActiveCells> {
        Ok(self.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn column() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 2.5),
            p(0.0, 0.0, -2.5),
            p(0.0, 0.0, -7.5),
            p(500.0, 0.0, -7.5),
        ]
    }

    #[test]
    fn mask_keeps_order_and_indices() {
        let cells = ActiveCells::from_mask(&column(), &[false, true, true, false]).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells.total(), 4);
        assert_eq!(cells.indices(), &[1, 2]);
        assert_eq!(cells.centers()[0], p(0.0, 0.0, -2.5));
    }

    #[test]
    fn mask_length_mismatch() {
        let err = ActiveCells::from_mask(&column(), &[true]).unwrap_err();
        assert!(matches!(
            err,
            GravsynthError::ShapeMismatch {
                expected: 4,
                actual: 1
            }
        ));
    }

    #[test]
    fn below_flat_surface() {
        let ground = |x: f64, _y: f64| (x.abs() <= 100.0).then_some(0.0);
        let cells = ActiveCells::below_surface(&column(), &ground);
        assert_eq!(cells.indices(), &[1, 2]);
    }

    #[test]
    fn cell_on_surface_is_inactive() {
        let ground = |_x: f64, _y: f64| Some(-2.5);
        let cells = ActiveCells::below_surface(&column(), &ground);
        assert_eq!(cells.indices(), &[2, 3]);
    }

    #[test]
    fn inject_fills_inactive_cells() {
        let cells = ActiveCells::from_mask(&column(), &[false, true, true, false]).unwrap();
        let full = cells.inject(&[0.1, 0.2], f64::NAN).unwrap();
        assert_eq!(full.len(), 4);
        assert!(full[0].is_nan());
        assert!((full[1] - 0.1).abs() < f64::EPSILON);
        assert!((full[2] - 0.2).abs() < f64::EPSILON);
        assert!(full[3].is_nan());
    }

    #[test]
    fn inject_rejects_wrong_model_length() {
        let cells = ActiveCells::all(column());
        assert!(cells.inject(&[0.0; 3], 0.0).is_err());
    }

    #[test]
    fn provider_reports_consistent_count() {
        let cells = ActiveCells::all(column());
        assert_eq!(cells.active_cell_count(), 4);
        assert_eq!(cells.active_cell_centers().unwrap().len(), 4);
    }

    #[test]
    fn provider_keeps_mask_bookkeeping() {
        let cells = ActiveCells::from_mask(&column(), &[true, false, true, false]).unwrap();
        let provided = cells.active_cells().unwrap();
        assert_eq!(provided.indices(), &[0, 2]);
        assert_eq!(provided.total(), 4);
    }

    #[test]
    fn mesh_centers_line_up_with_injected_model() {
        let cells = ActiveCells::from_mask(&column(), &[false, true, true, false]).unwrap();
        let full = cells.inject(&[0.1, 0.2], f64::NAN).unwrap();
        assert_eq!(cells.mesh_centers(), column().as_slice());
        assert_eq!(cells.mesh_centers().len(), full.len());
        for (&index, center) in cells.indices().iter().zip(cells.centers()) {
            assert_eq!(cells.mesh_centers()[index], *center);
            assert!(!full[index].is_nan());
        }
    }
}
