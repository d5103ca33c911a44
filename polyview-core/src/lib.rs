/// Polyview Core Library - geometry, transforms and projection for the wireframe viewer
///
/// This library holds the stateless core: the indexed mesh model, homogeneous
/// 4x4 transforms, OBJ reading and writing, the procedural mesh generators and
/// the screen projections. `viewer` ties them into one session for the front ends.

pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod revolution;
pub mod solids;
pub mod surface;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::{centroid, Face, Mesh, Point};
pub use obj::{load_obj, parse_obj, save_obj, to_obj};
pub use projection::{render_frame, Camera, Frame, ProjectionMode};
pub use revolution::{parse_profile, revolve, Axis};
pub use solids::{Solid, SolidLibrary};
pub use surface::{build_surface, Domain, SurfaceFunction};
pub use transform::{Transform, TransformParams, TransformStep};
pub use viewer::{Selection, Viewer};
