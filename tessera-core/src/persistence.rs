//! Comma-separated text serialisation of contact matrices.
//!
//! The header row holds an empty corner cell followed by the part names; each
//! following row holds a part name and its `0`/`1` cells. Import re-checks
//! every matrix invariant, so a file that loads is always a valid matrix.

use std::io;

use tracing::debug;

use crate::{error::ValidationError, matrix::ContactMatrix};

/// Serialises a matrix. Rows end with `\n`; fields containing a comma, a
/// double quote or a line break are quoted with inner quotes doubled.
///
/// # Examples
/// ```
/// use tessera_core::{ContactMatrix, export_csv};
///
/// let matrix = ContactMatrix::try_new(
///     vec!["A".into(), "B, left".into()],
///     vec![vec![1, 1], vec![1, 1]],
/// )?;
/// assert_eq!(export_csv(&matrix), ",A,\"B, left\"\nA,1,1\n\"B, left\",1,1\n");
/// # Ok::<(), tessera_core::ValidationError>(())
/// ```
#[must_use]
pub fn export_csv(matrix: &ContactMatrix) -> String {
    let mut out = String::new();
    for name in matrix.names() {
        out.push(',');
        push_field(&mut out, name);
    }
    out.push('\n');
    for (name, row) in matrix.names().iter().zip(matrix.rows()) {
        push_field(&mut out, name);
        for value in row {
            out.push(',');
            out.push(if *value == 1 { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

/// Writes [`export_csv`] output to `writer`.
///
/// # Errors
/// Returns any error raised by the writer.
pub fn write_csv<W: io::Write>(matrix: &ContactMatrix, mut writer: W) -> io::Result<()> {
    writer.write_all(export_csv(matrix).as_bytes())?;
    writer.flush()
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Parses and validates a matrix written by [`export_csv`].
///
/// Both `\n` and `\r\n` line endings are accepted and blank lines are
/// skipped.
///
/// # Errors
/// Returns the [`ValidationError`] naming the first violated rule: quoting,
/// header shape, row count, row labels, squareness, binary cells, then the
/// matrix invariants checked by [`ContactMatrix::try_new`].
///
/// # Examples
/// ```
/// use tessera_core::{ValidationError, import_csv};
///
/// let matrix = import_csv(",A,B\r\nA,1,0\r\nB,0,1\r\n")?;
/// assert_eq!(matrix.names(), ["A", "B"]);
///
/// let err = import_csv(",A,B,C\nA,1,1,0\nB,1,1,1\nC,0,0,1\n").unwrap_err();
/// assert_eq!(err.to_string(), "row 1 is not symmetric with column 2");
/// # Ok::<(), ValidationError>(())
/// ```
pub fn import_csv(input: &str) -> Result<ContactMatrix, ValidationError> {
    let mut records = parse_records(input)?.into_iter();
    let header = records.next().ok_or(ValidationError::MissingHeader)?;
    let mut header = header.into_iter();
    let corner = header.next().unwrap_or_default();
    if !corner.is_empty() {
        return Err(ValidationError::HeaderCorner { found: corner });
    }
    let names: Vec<String> = header.collect();
    let records: Vec<Vec<String>> = records.collect();
    if names.len() != records.len() {
        return Err(ValidationError::NameCountMismatch {
            names: names.len(),
            rows: records.len(),
        });
    }

    let size = names.len();
    let mut rows = Vec::with_capacity(size);
    for (row, (expected, record)) in names.iter().zip(records).enumerate() {
        let mut fields = record.into_iter();
        let label = fields.next().unwrap_or_default();
        if label != *expected {
            return Err(ValidationError::RowLabelMismatch {
                row,
                expected: expected.clone(),
                actual: label,
            });
        }
        let cells: Vec<String> = fields.collect();
        if cells.len() != size {
            return Err(ValidationError::NotSquare {
                row,
                expected: size,
                actual: cells.len(),
            });
        }
        let values = cells
            .into_iter()
            .enumerate()
            .map(|(column, cell)| match cell.as_str() {
                "0" => Ok(0_u8),
                "1" => Ok(1_u8),
                _ => Err(ValidationError::NonBinary {
                    row,
                    column,
                    value: cell,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(values);
    }

    let matrix = ContactMatrix::try_new(names, rows)?;
    debug!(parts = matrix.size(), "contact matrix imported");
    Ok(matrix)
}

#[derive(Clone, Copy)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    AfterQuote,
}

/// Splits the input into records of unquoted field values.
fn parse_records(input: &str) -> Result<Vec<Vec<String>>, ValidationError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted_record = false;
    let mut line = 1_usize;
    let mut quote_line = line;
    let mut state = State::FieldStart;
    let mut chars = input.chars().peekable();

    let mut finish_record = |record: &mut Vec<String>, quoted: bool| {
        let blank = !quoted && record.len() == 1 && record[0].is_empty();
        let taken = std::mem::take(record);
        if !blank {
            records.push(taken);
        }
    };

    while let Some(ch) = chars.next() {
        state = match (state, ch) {
            (State::Quoted, '"') => State::AfterQuote,
            (State::Quoted, other) => {
                if other == '\n' {
                    line += 1;
                }
                field.push(other);
                State::Quoted
            }
            (State::AfterQuote, '"') => {
                field.push('"');
                State::Quoted
            }
            (State::FieldStart, '"') => {
                quoted_record = true;
                quote_line = line;
                State::Quoted
            }
            (State::Unquoted, '"') => return Err(ValidationError::MalformedField { line }),
            (_, ',') => {
                record.push(std::mem::take(&mut field));
                State::FieldStart
            }
            (_, '\r') if chars.peek() == Some(&'\n') => continue,
            (_, '\n') => {
                record.push(std::mem::take(&mut field));
                finish_record(&mut record, quoted_record);
                quoted_record = false;
                line += 1;
                State::FieldStart
            }
            (State::AfterQuote, _) | (_, '\r') => {
                return Err(ValidationError::MalformedField { line });
            }
            (State::FieldStart | State::Unquoted, other) => {
                field.push(other);
                State::Unquoted
            }
        };
    }

    match state {
        State::Quoted => return Err(ValidationError::UnterminatedQuote { line: quote_line }),
        State::FieldStart if record.is_empty() && field.is_empty() => {}
        State::FieldStart | State::Unquoted | State::AfterQuote => {
            record.push(field);
            finish_record(&mut record, quoted_record);
        }
    }
    Ok(records)
}
