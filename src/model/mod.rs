//! Property models painted from geometric regions.

mod painter;
mod region;

pub use painter::{paint, ModelPainter, PaintOperation};
pub use region::Region;
