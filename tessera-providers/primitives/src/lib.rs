//! Analytic primitive provider implementing `GeometryProvider`.
//!
//! Parts are axis-aligned boxes or spheres with closed-form minimum
//! distances, described by a line-based text format:
//!
//! ```text
//! # comment
//! box <name> <min_x> <min_y> <min_z> <max_x> <max_y> <max_z>
//! sphere <name> <center_x> <center_y> <center_z> <radius>
//! ```

mod assembly;
mod errors;
mod parse;
mod primitive;

pub use crate::{
    assembly::{PrimitiveAssembly, PrimitivePart},
    errors::{AssemblyError, AssemblyErrorCode},
    primitive::Primitive,
};
