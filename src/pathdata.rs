//! Command sequences: absolutize, transform and normalize.

use std::fmt;
use std::str::FromStr;

use crate::command::{Command, CommandData, Segment};
use crate::error::{Result, SvgpdError};
use crate::number::precision;
use crate::path::parse_path;
use crate::point::Point;
use crate::transform::Transform;

/// What to do with `H`/`V` commands when transforming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HvLinetoPolicy {
    #[default]
    Reject,
    ConvertToLineto,
}

/// What to do with `A` commands when transforming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcPolicy {
    #[default]
    Reject,
    ConvertToCurves,
    /// Re-derive the arc parameters from the mapped ellipse. Exact for
    /// similarity transforms only.
    Reparameterize,
}

/// How [`PathData::transform`] handles commands that have no exact image
/// under a general affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformOptions {
    pub hv_lineto: HvLinetoPolicy,
    pub elliptical_arc: ArcPolicy,
}

impl TransformOptions {
    /// Reject `H`, `V` and `A` commands.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Convert `H`/`V` to line-tos and arcs to curves. Exact for any transform.
    pub fn convert_all() -> Self {
        Self {
            hv_lineto: HvLinetoPolicy::ConvertToLineto,
            elliptical_arc: ArcPolicy::ConvertToCurves,
        }
    }

    /// Convert `H`/`V` to line-tos and keep arcs as arcs.
    pub fn approximate() -> Self {
        Self {
            hv_lineto: HvLinetoPolicy::ConvertToLineto,
            elliptical_arc: ArcPolicy::Reparameterize,
        }
    }
}

/// Normalization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeOptions {
    /// Render coordinates relative to the current point
    pub repr_relative: bool,
    /// Convert `H`/`V` to `L`
    pub collapse_hv_lineto: bool,
    /// Convert `A` to `C`
    pub collapse_elliptical_arc: bool,
    /// Keep implicit line-tos in move-to commands, and fold a line-to into
    /// the move-to before it
    pub allow_implicit_lineto: bool,
}

/// An ordered sequence of attached commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<Command>,
    absolutized: bool,
    /// Absolute target of the last move-to, where a close-path returns.
    subpath_start: Point,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `segment` at the current end of the sequence.
    pub fn append(&mut self, segment: Segment) -> Result<()> {
        let (count, group_size) = segment.arity();
        if !matches!(segment, Segment::ClosePath { .. }) && (count == 0 || count % group_size != 0)
        {
            return Err(SvgpdError::InvalidParameters {
                reason: format!(
                    "expected a positive multiple of {} data, got {}",
                    group_size, count
                ),
                fragment: segment.letter().to_string(),
            });
        }

        let Some(last) = self.commands.last() else {
            if !matches!(segment, Segment::MoveTo { .. }) {
                return Err(SvgpdError::MissingMoveto {
                    fragment: segment.letter().to_string(),
                });
            }
            self.absolutized = !segment.is_relative();
            self.push_attached(Command::attach(
                segment,
                Point::default(),
                Point::default(),
                true,
            ));
            return Ok(());
        };

        let start = last.end_point();
        if segment.is_relative() {
            self.absolutized = false;
        }
        let cmd = Command::attach(segment, start, self.subpath_start, false);
        self.push_attached(cmd);
        Ok(())
    }

    fn push_attached(&mut self, cmd: Command) {
        if let Some(p) = cmd.moveto_point() {
            self.subpath_start = p;
        }
        self.commands.push(cmd);
    }

    /// Re-read the last move-to target after the commands were rewritten.
    fn refresh_subpath_start(&mut self) {
        self.subpath_start = self
            .commands
            .iter()
            .rev()
            .find_map(Command::moveto_point)
            .unwrap_or_default();
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether every command holds absolute data.
    pub fn is_absolutized(&self) -> bool {
        self.absolutized
    }

    /// Rewrite every command with absolute coordinates and render it that way.
    pub fn absolutize(&mut self) {
        self.absolutize_with(false);
    }

    /// Absolutize as a step of another operation: keeps each command's
    /// `repr_relative` flag so the result renders the way it was written.
    fn absolutize_with(&mut self, internal: bool) {
        let Some(first) = self.commands.first() else {
            return;
        };
        let mut cur = first.start_point();
        for cmd in &mut self.commands {
            cur = cmd.absolutize(cur, internal);
        }
        self.absolutized = true;
    }

    /// Map every coordinate through `t`.
    ///
    /// `H`/`V` and `A` commands are handled as `options` says; with a
    /// rejecting policy the sequence is left untouched and
    /// [`SvgpdError::ConversionRequired`] names the first offending command.
    pub fn transform(&mut self, t: &Transform, options: &TransformOptions) -> Result<()> {
        for cmd in &self.commands {
            let rejected = match cmd.data() {
                CommandData::AxisLineTo(..) => options.hv_lineto == HvLinetoPolicy::Reject,
                CommandData::Arc(_) => options.elliptical_arc == ArcPolicy::Reject,
                _ => false,
            };
            if rejected {
                return Err(SvgpdError::ConversionRequired {
                    command: cmd.letter(),
                });
            }
        }

        if !self.absolutized {
            self.absolutize_with(true);
        }

        for cmd in &mut self.commands {
            if options.elliptical_arc == ArcPolicy::ConvertToCurves {
                cmd.convert_to_curves();
            }
            cmd.transform(t);
        }
        self.refresh_subpath_start();
        Ok(())
    }

    /// Canonicalize the sequence: absolute data, explicit line-tos, and one
    /// command per run of the same command.
    pub fn normalize(&mut self, options: &NormalizeOptions) {
        self.absolutize_with(true);

        let mut normalized: Vec<Command> = Vec::with_capacity(self.commands.len());
        for mut cmd in self.commands.drain(..) {
            if options.collapse_hv_lineto {
                cmd.convert_to_lineto();
            }
            if options.collapse_elliptical_arc {
                cmd.convert_to_curves();
            }

            let implicit = if options.allow_implicit_lineto {
                None
            } else {
                split_implicit_lineto(&mut cmd)
            };
            push_merged(&mut normalized, cmd, options.allow_implicit_lineto);
            if let Some(lineto) = implicit {
                push_merged(&mut normalized, lineto, options.allow_implicit_lineto);
            }
        }

        for cmd in &mut normalized {
            cmd.set_repr_relative(options.repr_relative);
        }
        self.commands = normalized;
        self.refresh_subpath_start();
    }

    /// Commands rendered with at most `precision` fractional digits, joined
    /// by single spaces.
    pub fn render(&self, precision: u8) -> String {
        self.commands
            .iter()
            .map(|cmd| cmd.render(precision))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Move every point but the first of a multi-point move-to into a new
/// line-to that follows it.
fn split_implicit_lineto(cmd: &mut Command) -> Option<Command> {
    let CommandData::MoveTo { points, .. } = &mut cmd.data else {
        return None;
    };
    if points.len() < 2 {
        return None;
    }
    let rest = points.split_off(1);
    let start = points[0];
    Some(Command {
        rel: cmd.rel,
        repr_relative: cmd.repr_relative,
        start,
        data: CommandData::LineTo(rest),
    })
}

fn push_merged(commands: &mut Vec<Command>, cmd: Command, allow_implicit_lineto: bool) {
    let Some(last) = commands.last_mut() else {
        commands.push(cmd);
        return;
    };

    match (&mut last.data, cmd.data) {
        (CommandData::LineTo(points), CommandData::LineTo(more)) => points.extend(more),
        (CommandData::MoveTo { points, .. }, CommandData::LineTo(more)) if allow_implicit_lineto => {
            points.extend(more)
        }
        (CommandData::CurveTo(kind, points), CommandData::CurveTo(other, more)) if *kind == other => {
            points.extend(more)
        }
        (CommandData::Arc(items), CommandData::Arc(more)) => items.extend(more),
        (CommandData::AxisLineTo(axis, values), CommandData::AxisLineTo(other, more))
            if *axis == other =>
        {
            if let Some(&v) = more.last() {
                *values = vec![v];
            }
        }
        (CommandData::ClosePath(_), CommandData::ClosePath(_)) => {}
        (_, data) => commands.push(Command { data, ..cmd }),
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(precision()))
    }
}

impl FromStr for PathData {
    type Err = SvgpdError;

    fn from_str(s: &str) -> Result<Self> {
        parse_path(s)
    }
}

impl<'a> IntoIterator for &'a PathData {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{ArcSegment, Axis, CurveKind};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| c.into()).collect()
    }

    #[test]
    fn test_append_requires_moveto() {
        let mut pd = PathData::new();
        let err = pd
            .append(Segment::LineTo {
                rel: false,
                points: pts(&[(1.0, 1.0)]),
            })
            .unwrap_err();
        assert!(matches!(err, SvgpdError::MissingMoveto { .. }));
        assert!(pd.is_empty());
    }

    #[test]
    fn test_append_checks_arity() {
        let mut pd = PathData::new();
        pd.append(Segment::MoveTo {
            rel: false,
            points: pts(&[(0.0, 0.0)]),
        })
        .unwrap();
        let err = pd
            .append(Segment::CurveTo {
                rel: false,
                kind: CurveKind::Cubic,
                points: pts(&[(1.0, 1.0), (2.0, 2.0)]),
            })
            .unwrap_err();
        assert!(matches!(err, SvgpdError::InvalidParameters { .. }));
        assert_eq!(pd.len(), 1);
    }

    #[test]
    fn test_append_threads_points() {
        let mut pd = PathData::new();
        pd.append(Segment::MoveTo {
            rel: true,
            points: pts(&[(10.0, 20.0), (10.0, -10.0)]),
        })
        .unwrap();
        pd.append(Segment::AxisLineTo {
            rel: true,
            axis: Axis::Vertical,
            values: vec![60.0],
        })
        .unwrap();
        pd.append(Segment::ClosePath { rel: false }).unwrap();

        let cmds = pd.commands();
        assert_eq!(cmds[1].start_point(), Point::new(20.0, 10.0));
        assert_eq!(cmds[1].end_point(), Point::new(20.0, 70.0));
        assert_eq!(cmds[2].start_point(), Point::new(20.0, 70.0));
        assert_eq!(cmds[2].end_point(), Point::new(10.0, 20.0));
        assert!(!pd.is_absolutized());
    }

    #[test]
    fn test_close_after_long_run() {
        let mut pd = PathData::new();
        pd.append(Segment::MoveTo {
            rel: false,
            points: pts(&[(0.0, 0.0)]),
        })
        .unwrap();
        pd.append(Segment::MoveTo {
            rel: true,
            points: pts(&[(5.0, 5.0)]),
        })
        .unwrap();
        for _ in 0..50_000 {
            pd.append(Segment::LineTo {
                rel: true,
                points: pts(&[(1.0, 1.0)]),
            })
            .unwrap();
        }
        pd.append(Segment::ClosePath { rel: true }).unwrap();

        let close = &pd.commands()[pd.len() - 1];
        assert_eq!(close.start_point(), Point::new(50_005.0, 50_005.0));
        assert_eq!(close.end_point(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_close_after_transform_uses_mapped_moveto() {
        let mut pd = PathData::new();
        pd.append(Segment::MoveTo {
            rel: false,
            points: pts(&[(1.0, 2.0)]),
        })
        .unwrap();
        pd.append(Segment::LineTo {
            rel: false,
            points: pts(&[(3.0, 4.0)]),
        })
        .unwrap();
        pd.transform(&Transform::translate(10.0, 0.0), &TransformOptions::strict())
            .unwrap();
        pd.append(Segment::ClosePath { rel: false }).unwrap();
        assert_eq!(pd.commands()[2].end_point(), Point::new(11.0, 2.0));
    }

    #[test]
    fn test_simple_normalize() {
        let mut pd = PathData::new();
        pd.append(Segment::MoveTo {
            rel: true,
            points: pts(&[(0.0, 0.0)]),
        })
        .unwrap();
        for p in [(1.0, 0.0), (0.0, 1.0)] {
            pd.append(Segment::LineTo {
                rel: true,
                points: pts(&[p]),
            })
            .unwrap();
        }
        pd.normalize(&NormalizeOptions::default());
        assert_eq!(pd.render(6), "M 0,0 L 1,0 1,1");
        assert!(pd.is_absolutized());
    }

    #[test]
    fn test_normalize_empty() {
        let mut pd = PathData::new();
        pd.normalize(&NormalizeOptions::default());
        assert!(pd.is_empty());
        assert_eq!(pd.render(6), "");
    }

    #[test]
    fn test_transform_rejects_before_mutation() {
        let mut pd = PathData::new();
        pd.append(Segment::MoveTo {
            rel: true,
            points: pts(&[(1.0, 2.0)]),
        })
        .unwrap();
        pd.append(Segment::Arc {
            rel: true,
            arcs: vec![ArcSegment {
                rx: 5.0,
                ry: 5.0,
                x_axis_rotation: 0.0,
                large_arc: false,
                sweep: true,
                to: Point::new(10.0, 0.0),
            }],
        })
        .unwrap();
        let before = pd.clone();

        let err = pd
            .transform(&Transform::translate(1.0, 1.0), &TransformOptions::strict())
            .unwrap_err();
        assert!(matches!(err, SvgpdError::ConversionRequired { command: 'a' }));
        assert_eq!(pd, before);

        pd.transform(&Transform::translate(1.0, 1.0), &TransformOptions::convert_all())
            .unwrap();
        assert_eq!(pd.commands()[1].letter(), 'C');
        assert_eq!(pd.commands()[1].end_point(), Point::new(12.0, 3.0));
    }
}
