// The visual half: fading shapes and the raster they are painted onto.

pub mod registry;
pub mod shape;
pub mod surface;

pub use registry::ShapeRegistry;
pub use shape::{Shape, ShapeKind};
pub use surface::Surface;
