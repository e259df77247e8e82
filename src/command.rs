//! Path-data commands.
//!
//! A [`Segment`] is one command as written: its letter case and parameters,
//! with no geometry. [`PathData::append`](crate::PathData::append) attaches a
//! segment to the end of a sequence, which supplies the start point and turns
//! it into a [`Command`].

use std::fmt;

use crate::arc::EllipticalArcItem;
use crate::number::{format_number, precision};
use crate::point::Point;
use crate::transform::Transform;

/// The four Bézier curve commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// C/c
    Cubic,
    /// S/s
    SmoothCubic,
    /// Q/q
    Quadratic,
    /// T/t
    SmoothQuadratic,
}

impl CurveKind {
    /// Points per curve.
    pub fn group_size(self) -> usize {
        match self {
            Self::Cubic => 3,
            Self::SmoothCubic | Self::Quadratic => 2,
            Self::SmoothQuadratic => 1,
        }
    }

    fn letter(self) -> char {
        match self {
            Self::Cubic => 'C',
            Self::SmoothCubic => 'S',
            Self::Quadratic => 'Q',
            Self::SmoothQuadratic => 'T',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// H/h
    Horizontal,
    /// V/v
    Vertical,
}

/// Parameters of one arc, as written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub rx: f64,
    pub ry: f64,
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

/// A command as written, before it is attached to a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// M/m - Move to, with implicit line-tos
    MoveTo { rel: bool, points: Vec<Point> },
    /// L/l - Line to
    LineTo { rel: bool, points: Vec<Point> },
    /// C/c, S/s, Q/q, T/t - Bézier curves, `kind.group_size()` points each
    CurveTo {
        rel: bool,
        kind: CurveKind,
        points: Vec<Point>,
    },
    /// H/h, V/v - Axis-aligned line to
    AxisLineTo {
        rel: bool,
        axis: Axis,
        values: Vec<f64>,
    },
    /// A/a - Elliptical arc
    Arc { rel: bool, arcs: Vec<ArcSegment> },
    /// Z/z - Close path
    ClosePath { rel: bool },
}

impl Segment {
    pub fn is_relative(&self) -> bool {
        match self {
            Segment::MoveTo { rel, .. }
            | Segment::LineTo { rel, .. }
            | Segment::CurveTo { rel, .. }
            | Segment::AxisLineTo { rel, .. }
            | Segment::Arc { rel, .. }
            | Segment::ClosePath { rel } => *rel,
        }
    }

    pub fn letter(&self) -> char {
        let upper = match self {
            Segment::MoveTo { .. } => 'M',
            Segment::LineTo { .. } => 'L',
            Segment::CurveTo { kind, .. } => kind.letter(),
            Segment::AxisLineTo { axis, .. } => axis_letter(*axis),
            Segment::Arc { .. } => 'A',
            Segment::ClosePath { .. } => 'Z',
        };
        with_case(upper, self.is_relative())
    }

    /// Data units carried, and how many make up one group.
    pub(crate) fn arity(&self) -> (usize, usize) {
        match self {
            Segment::MoveTo { points, .. } | Segment::LineTo { points, .. } => (points.len(), 1),
            Segment::CurveTo { kind, points, .. } => (points.len(), kind.group_size()),
            Segment::AxisLineTo { values, .. } => (values.len(), 1),
            Segment::Arc { arcs, .. } => (arcs.len(), 1),
            Segment::ClosePath { .. } => (0, 1),
        }
    }
}

/// The data of an attached command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandData {
    /// `leading` is set on the first command of a sequence, whose first point
    /// is absolute even in `m`.
    MoveTo { points: Vec<Point>, leading: bool },
    LineTo(Vec<Point>),
    CurveTo(CurveKind, Vec<Point>),
    AxisLineTo(Axis, Vec<f64>),
    /// Arc endpoints are always absolute.
    Arc(Vec<EllipticalArcItem>),
    /// The target of the governing move-to.
    ClosePath(Point),
}

/// A command attached to a sequence, with its absolute start point.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub(crate) rel: bool,
    pub(crate) repr_relative: bool,
    pub(crate) start: Point,
    pub(crate) data: CommandData,
}

impl Command {
    /// Attach `segment` at `start`. `subpath_start` is the target of the most
    /// recent move-to, used by close-path.
    pub(crate) fn attach(
        segment: Segment,
        start: Point,
        subpath_start: Point,
        leading: bool,
    ) -> Self {
        let rel = segment.is_relative();
        let (start, data) = match segment {
            Segment::MoveTo { points, .. } => {
                let start = match points.first() {
                    Some(&first) if leading => first,
                    _ => start,
                };
                (start, CommandData::MoveTo { points, leading })
            }
            Segment::LineTo { points, .. } => (start, CommandData::LineTo(points)),
            Segment::CurveTo { kind, points, .. } => (start, CommandData::CurveTo(kind, points)),
            Segment::AxisLineTo { axis, values, .. } => {
                (start, CommandData::AxisLineTo(axis, values))
            }
            Segment::Arc { arcs, .. } => {
                let mut from = start;
                let items = arcs
                    .iter()
                    .map(|arc| {
                        let to = if rel { from + arc.to } else { arc.to };
                        let item = EllipticalArcItem::new(
                            arc.rx,
                            arc.ry,
                            arc.x_axis_rotation,
                            arc.large_arc,
                            arc.sweep,
                            from,
                            to,
                        );
                        from = to;
                        item
                    })
                    .collect();
                (start, CommandData::Arc(items))
            }
            Segment::ClosePath { .. } => (start, CommandData::ClosePath(subpath_start)),
        };

        Self {
            rel,
            repr_relative: rel,
            start,
            data,
        }
    }

    /// The letter of the stored data: lowercase when it is relative.
    pub fn letter(&self) -> char {
        with_case(self.upper_letter(), self.rel)
    }

    /// The letter used when rendering.
    pub fn display_letter(&self) -> char {
        with_case(self.upper_letter(), self.rel || self.repr_relative)
    }

    fn upper_letter(&self) -> char {
        match &self.data {
            CommandData::MoveTo { .. } => 'M',
            CommandData::LineTo(_) => 'L',
            CommandData::CurveTo(kind, _) => kind.letter(),
            CommandData::AxisLineTo(axis, _) => axis_letter(*axis),
            CommandData::Arc(_) => 'A',
            CommandData::ClosePath(_) => 'Z',
        }
    }

    pub fn data(&self) -> &CommandData {
        &self.data
    }

    pub fn is_relative(&self) -> bool {
        self.rel
    }

    /// Whether absolute data is rendered relative to the current point.
    pub fn repr_relative(&self) -> bool {
        self.repr_relative
    }

    pub fn set_repr_relative(&mut self, value: bool) {
        self.repr_relative = value;
    }

    pub fn start_point(&self) -> Point {
        self.start
    }

    /// The current point after this command.
    pub fn end_point(&self) -> Point {
        match &self.data {
            CommandData::MoveTo { points, leading } => {
                if self.rel {
                    let skip = usize::from(*leading);
                    points.iter().skip(skip).fold(self.start, |acc, &p| acc + p)
                } else {
                    points.last().copied().unwrap_or(self.start)
                }
            }
            CommandData::LineTo(points) => self.end_of_groups(points, 1),
            CommandData::CurveTo(kind, points) => self.end_of_groups(points, kind.group_size()),
            CommandData::AxisLineTo(axis, values) => {
                let moved = if self.rel {
                    values.iter().sum::<f64>()
                } else {
                    match values.last() {
                        Some(&v) => v,
                        None => return self.start,
                    }
                };
                match (axis, self.rel) {
                    (Axis::Horizontal, true) => Point::new(self.start.x + moved, self.start.y),
                    (Axis::Horizontal, false) => Point::new(moved, self.start.y),
                    (Axis::Vertical, true) => Point::new(self.start.x, self.start.y + moved),
                    (Axis::Vertical, false) => Point::new(self.start.x, moved),
                }
            }
            CommandData::Arc(items) => items.last().map_or(self.start, |item| item.to()),
            CommandData::ClosePath(target) => *target,
        }
    }

    fn end_of_groups(&self, points: &[Point], group_size: usize) -> Point {
        if self.rel {
            points
                .chunks(group_size)
                .filter_map(|group| group.last())
                .fold(self.start, |acc, &p| acc + p)
        } else {
            points.last().copied().unwrap_or(self.start)
        }
    }

    /// The absolute target of a move-to; `None` for other commands.
    pub fn moveto_point(&self) -> Option<Point> {
        match &self.data {
            CommandData::MoveTo { points, leading } => {
                let first = *points.first()?;
                Some(if self.rel && !leading {
                    self.start + first
                } else {
                    first
                })
            }
            _ => None,
        }
    }

    pub fn is_leading(&self) -> bool {
        matches!(self.data, CommandData::MoveTo { leading: true, .. })
    }

    /// Rewrite relative data as absolute, starting from `start`, and return
    /// the end point. `internal` keeps the `repr_relative` display flag.
    pub(crate) fn absolutize(&mut self, start: Point, internal: bool) -> Point {
        self.repr_relative &= internal;
        if !self.is_leading() {
            self.start = start;
        }
        if !self.rel {
            return self.end_point();
        }

        let mut cur = self.start;
        match &mut self.data {
            CommandData::MoveTo { points, leading } => {
                for p in points.iter_mut().skip(usize::from(*leading)) {
                    *p += cur;
                    cur = *p;
                }
            }
            CommandData::LineTo(points) => absolutize_groups(points, 1, cur),
            CommandData::CurveTo(kind, points) => {
                absolutize_groups(points, kind.group_size(), cur)
            }
            CommandData::AxisLineTo(axis, values) => {
                let mut cur = match axis {
                    Axis::Horizontal => cur.x,
                    Axis::Vertical => cur.y,
                };
                for v in values.iter_mut() {
                    *v += cur;
                    cur = *v;
                }
            }
            CommandData::Arc(_) | CommandData::ClosePath(_) => {}
        }

        self.rel = false;
        self.end_point()
    }

    /// Map every coordinate through `t`. The data must be absolute.
    /// Horizontal and vertical line-tos become line-tos first.
    pub(crate) fn transform(&mut self, t: &Transform) {
        self.convert_to_lineto();
        self.start.transform(t);
        match &mut self.data {
            CommandData::MoveTo { points, .. }
            | CommandData::LineTo(points)
            | CommandData::CurveTo(_, points) => {
                for p in points.iter_mut() {
                    p.transform(t);
                }
            }
            CommandData::Arc(items) => {
                for item in items.iter_mut() {
                    item.transform(t);
                }
            }
            CommandData::ClosePath(target) => target.transform(t),
            CommandData::AxisLineTo(..) => {}
        }
    }

    /// Turn an `H`/`V` command into an `L` command anchored at the same start
    /// point. The result carries one point per value, not a single end point,
    /// so `h 10 20` becomes a two-point `l` and every vertex is kept. Other
    /// commands are left alone.
    pub fn convert_to_lineto(&mut self) {
        if let CommandData::AxisLineTo(axis, values) = &self.data {
            let points = values
                .iter()
                .map(|&v| match (axis, self.rel) {
                    (Axis::Horizontal, true) => Point::new(v, 0.0),
                    (Axis::Horizontal, false) => Point::new(v, self.start.y),
                    (Axis::Vertical, true) => Point::new(0.0, v),
                    (Axis::Vertical, false) => Point::new(self.start.x, v),
                })
                .collect();
            self.data = CommandData::LineTo(points);
        }
    }

    /// Turn an `A` command into a `C` command approximating each arc. The
    /// curve points are absolute; a relative arc keeps rendering relative.
    pub fn convert_to_curves(&mut self) {
        if let CommandData::Arc(items) = &self.data {
            let points = items.iter().flat_map(|item| item.to_cubic_points()).collect();
            self.data = CommandData::CurveTo(CurveKind::Cubic, points);
            self.repr_relative |= self.rel;
            self.rel = false;
        }
    }

    /// The rendered data, one word per group: a curve's points together, a
    /// single point, a scalar, or an arc item.
    pub fn words(&self, precision: u8) -> Vec<String> {
        // Absolute data shown relative to the running current point.
        let relativize = !self.rel && self.repr_relative;

        match &self.data {
            CommandData::MoveTo { points, leading } => {
                let mut cur = self.start;
                points
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| {
                        let shown = if relativize && !(i == 0 && *leading) {
                            p - cur
                        } else {
                            p
                        };
                        cur = p;
                        shown.render(precision)
                    })
                    .collect()
            }
            CommandData::LineTo(points) => self.group_words(points, 1, relativize, precision),
            CommandData::CurveTo(kind, points) => {
                self.group_words(points, kind.group_size(), relativize, precision)
            }
            CommandData::AxisLineTo(axis, values) => {
                let mut cur = match axis {
                    Axis::Horizontal => self.start.x,
                    Axis::Vertical => self.start.y,
                };
                values
                    .iter()
                    .map(|&v| {
                        let shown = if relativize { v - cur } else { v };
                        cur = v;
                        format_number(shown, precision)
                    })
                    .collect()
            }
            CommandData::Arc(items) => items
                .iter()
                .map(|item| item.render(precision, self.rel || self.repr_relative))
                .collect(),
            CommandData::ClosePath(_) => Vec::new(),
        }
    }

    fn group_words(
        &self,
        points: &[Point],
        group_size: usize,
        relativize: bool,
        precision: u8,
    ) -> Vec<String> {
        let mut cur = self.start;
        points
            .chunks(group_size)
            .map(|group| {
                let words: Vec<String> = group
                    .iter()
                    .map(|&p| (if relativize { p - cur } else { p }).render(precision))
                    .collect();
                if let Some(&last) = group.last() {
                    cur = last;
                }
                words.join(" ")
            })
            .collect()
    }

    /// The letter followed by the data words, separated by single spaces.
    pub fn render(&self, precision: u8) -> String {
        let mut out = String::new();
        out.push(self.display_letter());
        for word in self.words(precision) {
            out.push(' ');
            out.push_str(&word);
        }
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(precision()))
    }
}

fn absolutize_groups(points: &mut [Point], group_size: usize, mut cur: Point) {
    for group in points.chunks_mut(group_size) {
        for p in group.iter_mut() {
            *p += cur;
        }
        if let Some(&last) = group.last() {
            cur = last;
        }
    }
}

fn axis_letter(axis: Axis) -> char {
    match axis {
        Axis::Horizontal => 'H',
        Axis::Vertical => 'V',
    }
}

fn with_case(upper: char, rel: bool) -> char {
    if rel { upper.to_ascii_lowercase() } else { upper }
}
