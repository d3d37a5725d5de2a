//! Geometry provider abstractions for the Tessera core runtime.

use crate::error::GeometryError;

/// Abstraction over an ordered collection of solid parts that can report the
/// exact minimum distance between any two of them.
///
/// Part identity is the index in `0..len()`. The geometry itself stays opaque
/// behind the provider; the core only ever asks for names, distances and,
/// optionally, conservative bounds.
///
/// # Examples
/// ```
/// use tessera_core::{GeometryError, GeometryProvider};
///
/// /// Points on a line; the distance is the absolute difference.
/// struct Beads(Vec<f64>);
///
/// impl GeometryProvider for Beads {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "beads" }
///     fn part_name(&self, index: usize) -> Option<&str> {
///         (index < self.0.len()).then_some("bead")
///     }
///     fn distance(&self, left: usize, right: usize) -> Result<f64, GeometryError> {
///         let a = self.0.get(left).ok_or(GeometryError::OutOfBounds { index: left })?;
///         let b = self.0.get(right).ok_or(GeometryError::OutOfBounds { index: right })?;
///         Ok((a - b).abs())
///     }
/// }
///
/// let beads = Beads(vec![0.0, 2.5]);
/// assert_eq!(beads.len(), 2);
/// assert_eq!(beads.distance(0, 1)?, 2.5);
/// assert!(beads.bounds(0).is_none());
/// let parts = beads.parts()?;
/// assert_eq!(parts[1].id(), 1);
/// # Ok::<(), GeometryError>(())
/// ```
pub trait GeometryProvider {
    /// Returns the number of parts in the assembly.
    fn len(&self) -> usize;

    /// Returns whether the assembly contains no parts.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable label for the assembly.
    fn name(&self) -> &str;

    /// Returns the display name of the part at `index`.
    ///
    /// Names are not required to be unique; the contact analyzer makes them
    /// unique before they become graph-node keys.
    fn part_name(&self, index: usize) -> Option<&str>;

    /// Computes the exact minimum Euclidean distance between two parts.
    ///
    /// Touching or interpenetrating parts report `0.0`.
    ///
    /// # Errors
    /// Implementations return [`GeometryError::OutOfBounds`] for invalid
    /// indices and [`GeometryError::Degenerate`] for geometry that cannot be
    /// measured. Callers reject negative and non-finite results.
    fn distance(&self, left: usize, right: usize) -> Result<f64, GeometryError>;

    /// Returns conservative axis-aligned bounds for the part at `index`.
    ///
    /// The bounds must enclose the part, so the gap between two bounds never
    /// exceeds the true distance between the parts. The default returns
    /// `None`, which disables pruning for the part.
    fn bounds(&self, _index: usize) -> Option<Bounds> {
        None
    }

    /// Lists the parts in index order.
    ///
    /// # Errors
    /// Returns [`GeometryError::OutOfBounds`] when a name is missing for an
    /// index below [`len`](Self::len).
    fn parts(&self) -> Result<Vec<Part>, GeometryError> {
        (0..self.len())
            .map(|index| {
                self.part_name(index)
                    .map(|name| Part::new(index, name))
                    .ok_or(GeometryError::OutOfBounds { index })
            })
            .collect()
    }
}

/// A part as listed by a [`GeometryProvider`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    id: usize,
    name: String,
}

impl Part {
    /// Creates a part record.
    #[must_use]
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the part's index in the assembly.
    #[rustfmt::skip]
    #[must_use]
    pub fn id(&self) -> usize { self.id }

    /// Returns the display name supplied by the provider.
    #[rustfmt::skip]
    #[must_use]
    pub fn name(&self) -> &str { &self.name }
}

/// Axis-aligned bounding box used to skip exact queries for distant pairs.
///
/// # Examples
/// ```
/// use tessera_core::Bounds;
///
/// let a = Bounds::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
/// let b = Bounds::new([4.0, 5.0, 0.5], [6.0, 6.0, 2.0]);
/// assert_eq!(a.gap(&b), 5.0);
/// assert_eq!(a.gap(&a), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: [f64; 3],
    max: [f64; 3],
}

impl Bounds {
    /// Creates bounds from opposite corners.
    #[must_use]
    pub const fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Returns the minimum corner.
    #[rustfmt::skip]
    #[must_use]
    pub const fn min(&self) -> [f64; 3] { self.min }

    /// Returns the maximum corner.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max(&self) -> [f64; 3] { self.max }

    /// Returns whether every corner coordinate is finite.
    ///
    /// Bounds that are not finite are never used for pruning.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|value| value.is_finite())
    }

    /// Returns the Euclidean gap between two boxes, `0.0` when they overlap
    /// or touch.
    ///
    /// The result is a lower bound on the distance between any shapes the
    /// boxes enclose.
    #[must_use]
    pub fn gap(&self, other: &Self) -> f64 {
        let squared: f64 = (0..3)
            .map(|axis| {
                let ahead = other.min[axis] - self.max[axis];
                let behind = self.min[axis] - other.max[axis];
                let gap = ahead.max(behind).max(0.0);
                gap * gap
            })
            .sum();
        squared.sqrt()
    }
}
