//! The [`PrimitiveAssembly`] geometry provider.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    sync::Arc,
};

use tessera_core::{Bounds, GeometryError, GeometryProvider};
use tracing::{debug, instrument};

use crate::{errors::AssemblyError, parse::parse_line, primitive::Primitive};

/// A named primitive within an assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitivePart {
    name: String,
    shape: Primitive,
}

impl PrimitivePart {
    /// Creates a part.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: Primitive) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Returns the display name.
    #[rustfmt::skip]
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the shape.
    #[rustfmt::skip]
    #[must_use]
    pub fn shape(&self) -> &Primitive { &self.shape }
}

/// An ordered list of analytic parts answering exact distance queries.
///
/// Degenerate shapes load without complaint and fail with
/// [`GeometryError::Degenerate`] once queried. They report no bounds, so they
/// are never pruned away before the query.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use tessera_core::GeometryProvider;
/// use tessera_providers_primitives::PrimitiveAssembly;
///
/// let text = "box Base 0 0 0 2 2 1\nsphere Ball 1 1 2 1\n";
/// let assembly = PrimitiveAssembly::try_from_reader("demo", Cursor::new(text))?;
/// assert_eq!(assembly.len(), 2);
/// assert_eq!(assembly.distance(0, 1)?, 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct PrimitiveAssembly {
    name: String,
    parts: Vec<PrimitivePart>,
}

impl PrimitiveAssembly {
    /// Creates an assembly from parts already in memory.
    #[must_use]
    pub fn new(name: impl Into<String>, parts: Vec<PrimitivePart>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    /// Parses an assembly description.
    ///
    /// # Errors
    /// Returns [`AssemblyError::Io`] when reading fails and
    /// [`AssemblyError::InvalidFormat`] for the first malformed line.
    pub fn try_from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, AssemblyError> {
        let name = name.into();
        let mut parts = Vec::new();
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.map_err(|source| AssemblyError::Io {
                origin: name.clone(),
                source,
            })?;
            if let Some(part) = parse_line(index + 1, &line)? {
                parts.push(part);
            }
        }
        debug!(assembly = %name, parts = parts.len(), "assembly parsed");
        Ok(Self { name, parts })
    }

    /// Opens and parses an assembly file. The assembly is named after the
    /// file stem.
    ///
    /// # Errors
    /// Returns [`AssemblyError::Io`] when the file cannot be opened or read
    /// and [`AssemblyError::InvalidFormat`] for the first malformed line.
    #[instrument(name = "primitives.load", err, skip(path), fields(path = %path.as_ref().display()))]
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, AssemblyError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AssemblyError::Io {
            origin: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned());
        Self::try_from_reader(name, file).map_err(|error| match error {
            AssemblyError::Io { source, .. } => AssemblyError::Io {
                origin: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Returns the parts in index order.
    #[rustfmt::skip]
    #[must_use]
    pub fn primitives(&self) -> &[PrimitivePart] { &self.parts }

    fn measurable(&self, index: usize) -> Result<&Primitive, GeometryError> {
        let part = self
            .parts
            .get(index)
            .ok_or(GeometryError::OutOfBounds { index })?;
        match part.shape.defect() {
            Some(reason) => Err(GeometryError::Degenerate {
                index,
                reason: Arc::from(reason),
            }),
            None => Ok(&part.shape),
        }
    }
}

impl GeometryProvider for PrimitiveAssembly {
    fn len(&self) -> usize {
        self.parts.len()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn part_name(&self, index: usize) -> Option<&str> {
        self.parts.get(index).map(PrimitivePart::name)
    }

    fn distance(&self, left: usize, right: usize) -> Result<f64, GeometryError> {
        let a = self.measurable(left)?;
        let b = self.measurable(right)?;
        Ok(a.distance(b))
    }

    fn bounds(&self, index: usize) -> Option<Bounds> {
        let shape = self.parts.get(index)?.shape();
        match shape.defect() {
            Some(_) => None,
            None => Some(shape.bounds()),
        }
    }
}
