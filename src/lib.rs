pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod mesh;
pub mod model;
pub mod noise;
pub mod plot;
pub mod simulation;
pub mod survey;
pub mod topography;
pub mod workflow;

pub use error::{GravsynthError, Result};
