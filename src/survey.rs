//! Receivers and survey geometry.

use std::fmt;

use crate::error::{GravsynthError, Result};
use crate::math::{linspace, Point3};
use crate::topography::TopographySurface;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gravity field component measured at a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Component {
    Gx,
    Gy,
    /// Vertical component of the gravity anomaly.
    Gz,
}

impl Component {
    /// Conventional lowercase name (`"gz"` etc).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Gx => "gx",
            Self::Gy => "gy",
            Self::Gz => "gz",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single observation location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Receiver {
    pub location: Point3,
}

/// Receivers and the field components simulated at each of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    receivers: Vec<Receiver>,
    components: Vec<Component>,
}

impl Survey {
    /// Creates a survey.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::Configuration`] if no component is requested.
    pub fn new(receivers: Vec<Receiver>, components: Vec<Component>) -> Result<Self> {
        if components.is_empty() {
            return Err(GravsynthError::Configuration(
                "survey needs at least one field component".into(),
            ));
        }
        Ok(Self {
            receivers,
            components,
        })
    }

    #[must_use]
    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Receiver locations in order.
    #[must_use]
    pub fn locations(&self) -> Vec<Point3> {
        self.receivers.iter().map(|r| r.location).collect()
    }

    /// Number of data a simulation produces: one per receiver and component.
    #[must_use]
    pub fn n_data(&self) -> usize {
        self.receivers.len() * self.components.len()
    }
}

/// A straight line of receivers along x, draped a fixed height above ground.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReceiverLine {
    pub x_start: f64,
    pub x_end: f64,
    pub count: usize,
    pub y: f64,
    /// Height above the topographic surface.
    pub height: f64,
}

impl Default for ReceiverLine {
    fn default() -> Self {
        Self {
            x_start: -80.0,
            x_end: 80.0,
            count: 17,
            y: 0.0,
            height: 5.0,
        }
    }
}

impl ReceiverLine {
    /// Places the receivers over `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`GravsynthError::Configuration`] if the line has no receivers
    /// or a receiver falls outside the surface footprint.
    pub fn receivers(&self, surface: &impl TopographySurface) -> Result<Vec<Receiver>> {
        if self.count == 0 {
            return Err(GravsynthError::Configuration(
                "receiver line needs at least one receiver".into(),
            ));
        }
        linspace(self.x_start, self.x_end, self.count)
            .into_iter()
            .map(|x| {
                let ground = surface.elevation(x, self.y).ok_or_else(|| {
                    GravsynthError::Configuration(format!(
                        "receiver at ({x}, {}) lies outside the topography",
                        self.y
                    ))
                })?;
                Ok(Receiver {
                    location: Point3::new(x, self.y, ground + self.height),
                })
            })
            .collect()
    }

    /// Builds a survey of this line measuring `components`.
    ///
    /// # Errors
    ///
    /// See [`receivers`](Self::receivers) and [`Survey::new`].
    pub fn survey(
        &self,
        surface: &impl TopographySurface,
        components: Vec<Component>,
    ) -> Result<Survey> {
        Survey::new(self.receivers(surface)?, components)
    }
}
