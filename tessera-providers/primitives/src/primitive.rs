//! Closed-form geometry for boxes and spheres.

use nalgebra::{Point3, Vector3};
use tessera_core::Bounds;

/// A solid analytic shape.
///
/// # Examples
/// ```
/// use nalgebra::Point3;
/// use tessera_providers_primitives::Primitive;
///
/// let cube = Primitive::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
/// let ball = Primitive::sphere(Point3::new(3.0, 0.5, 0.5), 1.0);
/// assert_eq!(cube.distance(&ball), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Axis-aligned box spanning `min` to `max`.
    Cuboid {
        /// Minimum corner.
        min: Point3<f64>,
        /// Maximum corner.
        max: Point3<f64>,
    },
    /// Ball with the given centre and radius.
    Sphere {
        /// Centre point.
        center: Point3<f64>,
        /// Radius.
        radius: f64,
    },
}

impl Primitive {
    /// Creates an axis-aligned box.
    #[must_use]
    pub fn cuboid(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self::Cuboid { min, max }
    }

    /// Creates a sphere.
    #[must_use]
    pub fn sphere(center: Point3<f64>, radius: f64) -> Self {
        Self::Sphere { center, radius }
    }

    /// Describes why the shape cannot be measured, if it cannot.
    ///
    /// Non-finite coordinates, inverted boxes and negative radii are
    /// degenerate. Zero-extent shapes are points and remain valid.
    #[must_use]
    pub fn defect(&self) -> Option<String> {
        match self {
            Self::Cuboid { min, max } => {
                if !min.iter().chain(max.iter()).all(|value| value.is_finite()) {
                    return Some("box corners must be finite".to_owned());
                }
                (0..3)
                    .find(|&axis| min[axis] > max[axis])
                    .map(|axis| format!("box is inverted on axis {}", ['x', 'y', 'z'][axis]))
            }
            Self::Sphere { center, radius } => {
                if !center.iter().all(|value| value.is_finite()) || !radius.is_finite() {
                    Some("sphere centre and radius must be finite".to_owned())
                } else if *radius < 0.0 {
                    Some(format!("sphere radius {radius} is negative"))
                } else {
                    None
                }
            }
        }
    }

    /// Returns the exact axis-aligned bounds of the shape.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let (min, max) = match self {
            Self::Cuboid { min, max } => (*min, *max),
            Self::Sphere { center, radius } => {
                let extent = Vector3::repeat(*radius);
                (center - extent, center + extent)
            }
        };
        Bounds::new(min.coords.into(), max.coords.into())
    }

    /// Returns the minimum Euclidean distance between the two shapes, `0.0`
    /// when they touch or overlap.
    ///
    /// The result is only meaningful when neither shape has a
    /// [`defect`](Self::defect).
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        match (self, other) {
            (
                Self::Cuboid { min, max },
                Self::Cuboid {
                    min: other_min,
                    max: other_max,
                },
            ) => {
                let gap = Vector3::from_fn(|axis, _| {
                    (other_min[axis] - max[axis])
                        .max(min[axis] - other_max[axis])
                        .max(0.0)
                });
                gap.norm()
            }
            (
                Self::Sphere { center, radius },
                Self::Sphere {
                    center: other_center,
                    radius: other_radius,
                },
            ) => ((center - other_center).norm() - radius - other_radius).max(0.0),
            (Self::Cuboid { min, max }, Self::Sphere { center, radius })
            | (Self::Sphere { center, radius }, Self::Cuboid { min, max }) => {
                let closest = Point3::from(Vector3::from_fn(|axis, _| {
                    center[axis].clamp(min[axis], max[axis])
                }));
                ((center - closest).norm() - radius).max(0.0)
            }
        }
    }
}
