//! Path data parsing.
//!
//! SVG path syntax: https://www.w3.org/TR/SVG/paths.html#PathDataBNF

use crate::command::{ArcSegment, Axis, CurveKind, Segment};
use crate::error::{Result, SvgpdError};
use crate::lexer::{Cursor, LexError};
use crate::pathdata::PathData;
use crate::point::Point;

const COMMAND_LETTERS: &str = "mzlhvcsqtaMZLHVCSQTA";

/// Parse SVG path data into an attached command sequence. Empty or blank
/// input gives an empty sequence.
pub fn parse_path(d: &str) -> Result<PathData> {
    let mut pd = PathData::new();
    for (letter, params) in PathParser::new(d).tokens()? {
        let segment = parse_segment(letter, params)?;
        if pd.is_empty() && !matches!(segment, Segment::MoveTo { .. }) {
            return Err(SvgpdError::MissingMoveto {
                fragment: fragment(letter, params),
            });
        }
        pd.append(segment)?;
    }
    Ok(pd)
}

struct PathParser<'a> {
    input: &'a str,
}

impl<'a> PathParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Split the input at command letters. Each token is a letter and the
    /// parameter text up to the next letter.
    fn tokens(&self) -> Result<Vec<(char, &'a str)>> {
        let mut tokens = Vec::new();
        let mut current: Option<(char, usize)> = None;

        for (pos, c) in self.input.char_indices() {
            if COMMAND_LETTERS.contains(c) {
                match current {
                    Some((letter, start)) => tokens.push((letter, &self.input[start..pos])),
                    None => {
                        let leading = &self.input[..pos];
                        if !leading.trim().is_empty() {
                            return Err(SvgpdError::MissingMoveto {
                                fragment: leading.trim().to_string(),
                            });
                        }
                    }
                }
                current = Some((c, pos + c.len_utf8()));
            } else if c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E') {
                let from = current.map_or(0, |(_, start)| start.saturating_sub(1));
                return Err(SvgpdError::UnknownCommand {
                    command: c,
                    fragment: self.input[from..].trim().to_string(),
                });
            }
        }

        match current {
            Some((letter, start)) => tokens.push((letter, &self.input[start..])),
            None if !self.input.trim().is_empty() => {
                return Err(SvgpdError::MissingMoveto {
                    fragment: self.input.trim().to_string(),
                });
            }
            None => {}
        }
        Ok(tokens)
    }
}

fn fragment(letter: char, params: &str) -> String {
    format!("{}{}", letter, params)
}

/// Consume the parameters of one command.
fn parse_segment(letter: char, params: &str) -> Result<Segment> {
    let rel = letter.is_ascii_lowercase();
    let lex_err = |e: LexError| e.into_path_error(&fragment(letter, params));

    let mut cursor = Cursor::new(params);
    cursor.skip_whitespace();
    if cursor.peek() == Some(',') {
        return Err(lex_err(LexError::Separator("comma before the first parameter")));
    }

    let segment = match letter.to_ascii_uppercase() {
        'Z' => {
            if !cursor.is_eof() {
                return Err(SvgpdError::InvalidParameters {
                    reason: "close path takes no parameters".into(),
                    fragment: fragment(letter, params).trim().to_string(),
                });
            }
            Segment::ClosePath { rel }
        }
        'M' => Segment::MoveTo {
            rel,
            points: list(&mut cursor, point).map_err(lex_err)?,
        },
        'L' => Segment::LineTo {
            rel,
            points: list(&mut cursor, point).map_err(lex_err)?,
        },
        'H' | 'V' => Segment::AxisLineTo {
            rel,
            axis: if letter.eq_ignore_ascii_case(&'H') {
                Axis::Horizontal
            } else {
                Axis::Vertical
            },
            values: list(&mut cursor, Cursor::number).map_err(lex_err)?,
        },
        'A' => Segment::Arc {
            rel,
            arcs: list(&mut cursor, arc).map_err(lex_err)?,
        },
        upper => {
            let kind = match upper {
                'C' => CurveKind::Cubic,
                'S' => CurveKind::SmoothCubic,
                'Q' => CurveKind::Quadratic,
                _ => CurveKind::SmoothQuadratic,
            };
            let points = list(&mut cursor, point).map_err(lex_err)?;
            if points.len() % kind.group_size() != 0 {
                return Err(SvgpdError::InvalidParameters {
                    reason: format!(
                        "expected a multiple of {} points, got {}",
                        kind.group_size(),
                        points.len()
                    ),
                    fragment: fragment(letter, params).trim().to_string(),
                });
            }
            Segment::CurveTo { rel, kind, points }
        }
    };
    Ok(segment)
}

/// One or more items separated by comma-wsp, up to the end of the input.
fn list<'a, T>(
    cursor: &mut Cursor<'a>,
    item: impl Fn(&mut Cursor<'a>) -> std::result::Result<T, LexError>,
) -> std::result::Result<Vec<T>, LexError> {
    let mut items = Vec::new();
    while !cursor.is_eof() {
        items.push(item(cursor)?);
        cursor.separator_before_next()?;
    }
    if items.is_empty() {
        return Err(LexError::Expected("at least one parameter"));
    }
    Ok(items)
}

fn point(cursor: &mut Cursor<'_>) -> std::result::Result<Point, LexError> {
    let x = cursor.number()?;
    cursor.skip_comma_wsp()?;
    let y = cursor.number()?;
    Ok(Point::new(x, y))
}

fn arc(cursor: &mut Cursor<'_>) -> std::result::Result<ArcSegment, LexError> {
    let rx = cursor.number()?;
    cursor.skip_comma_wsp()?;
    let ry = cursor.number()?;
    cursor.skip_comma_wsp()?;
    let x_axis_rotation = cursor.number()?;
    cursor.skip_comma_wsp()?;
    let large_arc = cursor.flag()?;
    cursor.skip_comma_wsp()?;
    let sweep = cursor.flag()?;
    cursor.skip_comma_wsp()?;
    let to = point(cursor)?;
    Ok(ArcSegment {
        rx,
        ry,
        x_axis_rotation,
        large_arc,
        sweep,
        to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(src: &str, precision: u8) -> String {
        parse_path(src).unwrap().render(precision)
    }

    #[test]
    fn test_tokens() {
        let tokens = PathParser::new("M 10,20 l5 5z").tokens().unwrap();
        assert_eq!(tokens, vec![('M', " 10,20 "), ('l', "5 5"), ('z', "")]);
        assert!(PathParser::new("  \n").tokens().unwrap().is_empty());
    }

    #[test]
    fn test_abutting_numbers() {
        assert_eq!(round_trip("M 2.0.0", 0), "M 2,0");
        assert_eq!(round_trip("m1 0", 0), "m 1,0");
        assert_eq!(
            round_trip("m 10 20 10-10-10,0 l 20,0 20 -60 -10 0", 0),
            "m 10,20 10,-10 -10,0 l 20,0 20,-60 -10,0"
        );
    }

    #[test]
    fn test_exponents_are_not_commands() {
        assert_eq!(round_trip("M 1e1,2E-1 L .5e+1 0", 6), "M 10,0.2 L 5,0");
    }

    #[test]
    fn test_arc_flags() {
        assert_eq!(
            round_trip("M 30,45 a 20 20 0 11 20,0", 6),
            "M 30,45 a 20 20 0 1 1 20,0"
        );
        assert_eq!(
            round_trip("M 30,45 a20,20,0,1,0,20,0", 6),
            "M 30,45 a 20 20 0 1 0 20,0"
        );
    }

    #[test]
    fn test_errors() {
        let err = parse_path("L 10,10").unwrap_err();
        assert!(matches!(err, SvgpdError::MissingMoveto { .. }));

        let err = parse_path("10,10 M 0,0").unwrap_err();
        assert!(matches!(err, SvgpdError::MissingMoveto { .. }));

        let err = parse_path("M 0,0 X 1").unwrap_err();
        assert!(matches!(err, SvgpdError::UnknownCommand { command: 'X', .. }));

        let err = parse_path("M 0,0 L 1").unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));

        let err = parse_path("M 0,0 C 1,1 2,2").unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));

        let err = parse_path("M 0,0 L").unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));

        let err = parse_path("M 0,0 L 1,,1").unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));

        let err = parse_path("M ,0,0").unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));

        let err = parse_path("M 0,0 1,1,").unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));

        let err = parse_path("M 0,0 z 1").unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));

        let err = parse_path("M 0,0 a 20 20 0 1").unwrap_err();
        assert!(matches!(err, SvgpdError::MissingArcFlags { .. }));

        let err = parse_path("M 0,0 a 20 20 0 2 1 5,5").unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));

        let err = parse_path("M 0,0 L 1e,1").unwrap_err();
        match err {
            SvgpdError::InvalidNumber { token, fragment } => {
                assert_eq!(token, "1e");
                assert_eq!(fragment, "L 1e,1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
