//! Line parser for the primitive assembly format.

use nalgebra::Point3;

use crate::{assembly::PrimitivePart, errors::AssemblyError, primitive::Primitive};

/// Parses one line. Blank lines and `#` comments yield `None`.
pub(crate) fn parse_line(line: usize, text: &str) -> Result<Option<PrimitivePart>, AssemblyError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let invalid = |reason: String| AssemblyError::InvalidFormat { line, reason };

    let mut tokens = text.split_whitespace();
    let kind = tokens.next().unwrap_or_default();
    let name = tokens
        .next()
        .ok_or_else(|| invalid(format!("`{kind}` needs a part name")))?;
    let values = tokens
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| invalid(format!("`{token}` is not a number")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let shape = match (kind, values.as_slice()) {
        ("box", &[min_x, min_y, min_z, max_x, max_y, max_z]) => Primitive::cuboid(
            Point3::new(min_x, min_y, min_z),
            Point3::new(max_x, max_y, max_z),
        ),
        ("sphere", &[x, y, z, radius]) => Primitive::sphere(Point3::new(x, y, z), radius),
        ("box", found) => {
            return Err(invalid(format!("box expects 6 numbers but found {}", found.len())));
        }
        ("sphere", found) => {
            return Err(invalid(format!("sphere expects 4 numbers but found {}", found.len())));
        }
        (other, _) => return Err(invalid(format!("unknown part kind `{other}`"))),
    };
    Ok(Some(PrimitivePart::new(name, shape)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("# a comment")]
    #[case("  # indented comment")]
    fn skips_blank_and_comment_lines(#[case] text: &str) {
        assert!(parse_line(1, text).expect("line must parse").is_none());
    }

    #[test]
    fn parses_box_and_sphere() {
        let part = parse_line(1, "box Base 0 0 0 10 10 2")
            .expect("line must parse")
            .expect("line describes a part");
        assert_eq!(part.name(), "Base");
        assert_eq!(
            part.shape(),
            &Primitive::cuboid(Point3::origin(), Point3::new(10.0, 10.0, 2.0))
        );

        let part = parse_line(2, "sphere\tKnob 5 5 12 1.5")
            .expect("line must parse")
            .expect("line describes a part");
        assert_eq!(
            part.shape(),
            &Primitive::sphere(Point3::new(5.0, 5.0, 12.0), 1.5)
        );
    }

    #[test]
    fn non_finite_numbers_are_accepted_at_load() {
        let part = parse_line(1, "sphere Odd 0 0 0 NaN")
            .expect("line must parse")
            .expect("line describes a part");
        assert!(part.shape().defect().is_some());
    }

    #[rstest]
    #[case("cone Tip 0 0 0 1", "unknown part kind `cone`")]
    #[case("box", "`box` needs a part name")]
    #[case("box Base 0 0 0 1 1", "box expects 6 numbers but found 5")]
    #[case("sphere Ball 0 0 0", "sphere expects 4 numbers but found 3")]
    #[case("sphere Ball 0 0 zero 1", "`zero` is not a number")]
    fn malformed_lines_name_the_problem(#[case] text: &str, #[case] reason: &str) {
        let err = parse_line(7, text).expect_err("line must be rejected");
        match err {
            AssemblyError::InvalidFormat { line, reason: found } => {
                assert_eq!(line, 7);
                assert_eq!(found, reason);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
