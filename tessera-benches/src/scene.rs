//! Seeded synthetic assemblies of scattered boxes and spheres.

use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tessera_providers_primitives::{Primitive, PrimitiveAssembly, PrimitivePart};
use thiserror::Error;

/// Shape of a synthetic assembly.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Number of parts to place.
    pub part_count: usize,
    /// Edge length of the cube the parts are scattered in.
    pub extent: f64,
    /// Largest sphere radius or box half-width.
    pub max_size: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl SceneConfig {
    /// Scatters `part_count` unit-sized parts in a cube scaled so that each
    /// part touches a handful of neighbours on average.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "part counts in benchmarks are far below 2^52"
    )]
    #[expect(
        clippy::float_arithmetic,
        reason = "cube edge grows with the cube root of the part count"
    )]
    pub fn scattered(part_count: usize, seed: u64) -> Self {
        Self {
            part_count,
            extent: 2.0 * (part_count as f64).cbrt(),
            max_size: 1.0,
            seed,
        }
    }
}

/// Invalid [`SceneConfig`] values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// No parts were requested.
    #[error("scene must contain at least one part")]
    NoParts,
    /// A size parameter was zero, negative or non-finite.
    #[error("{parameter} must be positive and finite")]
    InvalidSize {
        /// Name of the offending field.
        parameter: &'static str,
    },
}

/// Builds an assembly named `synthetic` from `config`.
///
/// Every third part is a box; the rest are spheres. The same seed always
/// yields the same assembly.
///
/// # Errors
/// Returns [`SceneError`] when the configuration is unusable.
#[expect(
    clippy::float_arithmetic,
    reason = "part placement scales random offsets into the scene cube"
)]
pub fn generate_scene(config: &SceneConfig) -> Result<PrimitiveAssembly, SceneError> {
    if config.part_count == 0 {
        return Err(SceneError::NoParts);
    }
    for (parameter, value) in [("extent", config.extent), ("max_size", config.max_size)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(SceneError::InvalidSize { parameter });
        }
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let parts = (0..config.part_count)
        .map(|index| {
            let centre = Point3::new(
                rng.gen_range(0.0..config.extent),
                rng.gen_range(0.0..config.extent),
                rng.gen_range(0.0..config.extent),
            );
            let size = rng.gen_range((0.25 * config.max_size)..=config.max_size);
            let shape = if index % 3 == 0 {
                let half = Vector3::repeat(size);
                Primitive::cuboid(centre - half, centre + half)
            } else {
                Primitive::sphere(centre, size)
            };
            PrimitivePart::new(format!("part-{index}"), shape)
        })
        .collect();
    Ok(PrimitiveAssembly::new("synthetic", parts))
}
