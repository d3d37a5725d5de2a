use tessera_core::{Bounds, GeometryError, GeometryProvider};

/// Unit-length rods lying on the x axis, identified by their start offsets.
#[derive(Clone)]
pub struct Rods {
    starts: Vec<f64>,
    names: Vec<String>,
}

impl Rods {
    #[must_use]
    pub fn new(names: &[&str], starts: Vec<f64>) -> Self {
        Self {
            starts,
            names: names.iter().map(|name| (*name).to_owned()).collect(),
        }
    }
}

impl GeometryProvider for Rods {
    fn len(&self) -> usize {
        self.starts.len()
    }

    fn name(&self) -> &str {
        "rods"
    }

    fn part_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    fn distance(&self, left: usize, right: usize) -> Result<f64, GeometryError> {
        let a = self
            .starts
            .get(left)
            .ok_or(GeometryError::OutOfBounds { index: left })?;
        let b = self
            .starts
            .get(right)
            .ok_or(GeometryError::OutOfBounds { index: right })?;
        Ok(((a - b).abs() - 1.0).max(0.0))
    }

    fn bounds(&self, index: usize) -> Option<Bounds> {
        let start = *self.starts.get(index)?;
        Some(Bounds::new([start, 0.0, 0.0], [start + 1.0, 0.0, 0.0]))
    }
}
