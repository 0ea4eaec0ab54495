use tracing::debug;

use crate::error::{GravsynthError, Result};
use crate::math::Point3;

use super::Region;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A region paired with the value written into every cell it contains.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaintOperation {
    /// Cells selected by this region receive `value`.
    pub region: Region,
    /// Fill value (e.g. density contrast in g/cc).
    pub value: f64,
}

impl PaintOperation {
    /// Creates a new paint operation.
    #[must_use]
    pub fn new(region: Region, value: f64) -> Self {
        Self { region, value }
    }
}

/// Builds a property model over an ordered set of active cells.
///
/// Every cell starts at the background value. Operations are then applied in
/// the order they were added, each overwriting the cells its region contains,
/// so where regions overlap the last operation wins. Each operation is a full
/// pass over the cells.
#[derive(Debug, Clone, Default)]
pub struct ModelPainter {
    background: f64,
    operations: Vec<PaintOperation>,
}

impl ModelPainter {
    /// Creates a painter with the given background value and no operations.
    #[must_use]
    pub fn new(background: f64) -> Self {
        Self {
            background,
            operations: Vec::new(),
        }
    }

    /// Appends an operation; it is applied after all previously added ones.
    #[must_use]
    pub fn with_operation(mut self, region: Region, value: f64) -> Self {
        self.operations.push(PaintOperation::new(region, value));
        self
    }

    /// Appends a sequence of operations, preserving their order.
    #[must_use]
    pub fn with_operations(mut self, operations: impl IntoIterator<Item = PaintOperation>) -> Self {
        self.operations.extend(operations);
        self
    }

    /// Returns the background value.
    #[must_use]
    pub fn background(&self) -> f64 {
        self.background
    }

    /// Returns the operations in application order.
    #[must_use]
    pub fn operations(&self) -> &[PaintOperation] {
        &self.operations
    }

    /// Paints the model, returning one value per cell in `cells` order.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::Configuration`] if any region is malformed.
    /// Regions are checked before the output is allocated.
    pub fn execute(&self, cells: &[Point3]) -> Result<Vec<f64>> {
        for op in &self.operations {
            op.region.validate()?;
        }

        let mut model = vec![self.background; cells.len()];
        for op in &self.operations {
            let mut painted = 0usize;
            for (value, cell) in model.iter_mut().zip(cells) {
                if op.region.contains(cell) {
                    *value = op.value;
                    painted += 1;
                }
            }
            debug!(
                region = op.region.kind(),
                value = op.value,
                painted,
                "Applied paint operation"
            );
        }
        Ok(model)
    }

    /// Like [`execute`](Self::execute), but first checks that the number of
    /// cells is the number the caller allocates against.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::ShapeMismatch`] if `cells.len() != expected`,
    /// or a configuration error from [`execute`](Self::execute).
    pub fn execute_expecting(&self, cells: &[Point3], expected: usize) -> Result<Vec<f64>> {
        if cells.len() != expected {
            return Err(GravsynthError::ShapeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        self.execute(cells)
    }
}

/// Paints `operations` in order over `cells`, starting from `background`.
///
/// # Errors
///
/// Returns [`GravsynthError::Configuration`] if any region is malformed.
pub fn paint(cells: &[Point3], background: f64, operations: &[PaintOperation]) -> Result<Vec<f64>> {
    ModelPainter::new(background)
        .with_operations(operations.iter().copied())
        .execute(cells)
}
