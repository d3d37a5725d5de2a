//! The validated contact matrix and its summary statistics.
//!
//! A [`ContactMatrix`] is square, symmetric, binary and has a unit diagonal,
//! and it carries one unique name per index. Every constructor checks these
//! invariants, so holders of a matrix never need to re-check them.

use std::collections::HashMap;

use crate::error::ValidationError;

/// Symmetric binary matrix recording which parts touch.
///
/// # Examples
/// ```
/// use tessera_core::ContactMatrix;
///
/// let matrix = ContactMatrix::try_new(
///     vec!["A".into(), "B".into(), "C".into()],
///     vec![vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]],
/// )?;
/// assert_eq!(matrix.size(), 3);
/// assert!(matrix.is_contact(0, 1));
/// assert!(!matrix.is_contact(0, 2));
/// assert_eq!(matrix.contact_count(), 2);
/// # Ok::<(), tessera_core::ValidationError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMatrix {
    size: usize,
    cells: Vec<u8>,
    names: Vec<String>,
}

impl ContactMatrix {
    /// Builds a matrix from explicit rows after validating every invariant.
    ///
    /// # Errors
    /// Returns the [`ValidationError`] for the first violated invariant,
    /// checked in this order: non-empty, name count, squareness, binary
    /// values, unit diagonal, symmetry, unique names.
    pub fn try_new(names: Vec<String>, rows: Vec<Vec<u8>>) -> Result<Self, ValidationError> {
        let size = rows.len();
        if size == 0 {
            return Err(ValidationError::Empty);
        }
        if names.len() != size {
            return Err(ValidationError::NameCountMismatch {
                names: names.len(),
                rows: size,
            });
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ValidationError::NotSquare {
                    row,
                    expected: size,
                    actual: values.len(),
                });
            }
            if let Some((column, value)) = values.iter().enumerate().find(|(_, value)| **value > 1) {
                return Err(ValidationError::NonBinary {
                    row,
                    column,
                    value: value.to_string(),
                });
            }
            cells.extend(values);
        }
        let matrix = Self { size, cells, names };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Builds a matrix from one contact flag per unordered pair `(i, j)`,
    /// `i < j`, listed in row-major order.
    pub(crate) fn from_pair_contacts(
        names: Vec<String>,
        contacts: &[bool],
    ) -> Result<Self, ValidationError> {
        let size = names.len();
        if size == 0 {
            return Err(ValidationError::Empty);
        }
        let mut matrix = Self {
            size,
            cells: vec![0_u8; size * size],
            names,
        };
        for index in 0..size {
            matrix.set(index, index, 1);
        }
        for ((row, column), contact) in upper_triangle(size).zip(contacts.iter().copied()) {
            let value = u8::from(contact);
            matrix.set(row, column, value);
            matrix.set(column, row, value);
        }
        matrix.validate()?;
        Ok(matrix)
    }

    fn set(&mut self, row: usize, column: usize, value: u8) {
        if row < self.size
            && column < self.size
            && let Some(cell) = self.cells.get_mut(row * self.size + column)
        {
            *cell = value;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for index in 0..self.size {
            if self.get(index, index) != Some(1) {
                return Err(ValidationError::DiagonalNotUnit { index });
            }
        }
        for (row, column) in upper_triangle(self.size) {
            if self.get(row, column) != self.get(column, row) {
                return Err(ValidationError::Asymmetric { row, column });
            }
        }
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(self.size);
        for (index, name) in self.names.iter().enumerate() {
            if let Some(first) = seen.insert(name.as_str(), index) {
                return Err(ValidationError::DuplicateName {
                    name: name.clone(),
                    first,
                    second: index,
                });
            }
        }
        Ok(())
    }

    /// Returns the number of parts.
    #[rustfmt::skip]
    #[must_use]
    pub fn size(&self) -> usize { self.size }

    /// Returns the part names in index order.
    #[rustfmt::skip]
    #[must_use]
    pub fn names(&self) -> &[String] { &self.names }

    /// Returns the name of the part at `index`.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Returns the index carrying `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    /// Returns the cell at (`row`, `column`).
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        if row >= self.size || column >= self.size {
            return None;
        }
        self.cells.get(row * self.size + column).copied()
    }

    /// Returns whether two distinct parts touch. The diagonal is not a contact.
    #[must_use]
    pub fn is_contact(&self, row: usize, column: usize) -> bool {
        row != column && self.get(row, column) == Some(1)
    }

    /// Returns one row of the matrix.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        if index >= self.size {
            return None;
        }
        self.cells.chunks_exact(self.size).nth(index)
    }

    /// Iterates over the rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.size)
    }

    /// Counts off-diagonal contacts, each unordered pair once.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.rows()
            .enumerate()
            .map(|(index, row)| row.iter().skip(index + 1).filter(|value| **value == 1).count())
            .sum()
    }

    /// Summarises the matrix.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::ContactMatrix;
    ///
    /// let matrix = ContactMatrix::try_new(
    ///     vec!["A".into(), "B".into(), "C".into()],
    ///     vec![vec![1, 1, 0], vec![1, 1, 0], vec![0, 0, 1]],
    /// )?;
    /// let stats = matrix.stats();
    /// assert_eq!(stats.contact_count, 1);
    /// assert_eq!(stats.isolated_count, 1);
    /// assert_eq!(stats.max_connections, 1);
    /// # Ok::<(), tessera_core::ValidationError>(())
    /// ```
    #[must_use]
    pub fn stats(&self) -> MatrixStats {
        // Each row holds its own diagonal 1.
        let degrees: Vec<usize> = self
            .rows()
            .map(|row| row.iter().filter(|value| **value == 1).count().saturating_sub(1))
            .collect();
        let contact_count = self.contact_count();
        let possible = self.size * self.size.saturating_sub(1) / 2;
        let density = if possible == 0 {
            0.0
        } else {
            contact_count as f64 / possible as f64
        };
        MatrixStats {
            part_count: self.size,
            contact_count,
            density,
            min_connections: degrees.iter().copied().min().unwrap_or(0),
            max_connections: degrees.iter().copied().max().unwrap_or(0),
            mean_connections: degrees.iter().sum::<usize>() as f64 / self.size as f64,
            isolated_count: degrees.iter().filter(|degree| **degree == 0).count(),
        }
    }
}

/// Aggregate figures describing a [`ContactMatrix`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatrixStats {
    /// Number of parts.
    pub part_count: usize,
    /// Number of touching part pairs.
    pub contact_count: usize,
    /// Share of possible pairs that touch, `0.0` with fewer than two parts.
    pub density: f64,
    /// Fewest contacts of any part.
    pub min_connections: usize,
    /// Most contacts of any part.
    pub max_connections: usize,
    /// Average contacts per part.
    pub mean_connections: f64,
    /// Parts without any contact.
    pub isolated_count: usize,
}

/// Iterates over `(row, column)` with `row < column` in row-major order.
pub(crate) fn upper_triangle(size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..size).flat_map(move |row| ((row + 1)..size).map(move |column| (row, column)))
}
