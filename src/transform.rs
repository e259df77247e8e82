//! 2D affine transforms.
//!
//! A [`Transform`] is the matrix
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```
//!
//! mapping `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.

use std::fmt;
use std::ops::Mul;

use crate::error::{Result, SvgpdError};
use crate::number::{format_number, precision};
use crate::point::Point;

/// Determinants closer to zero than this are treated as singular.
pub const DETERMINANT_TOLERANCE: f64 = 1e-7;

/// A transform function as written in a `transform` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
    Matrix,
}

impl FunctionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "translate" => Self::Translate,
            "scale" => Self::Scale,
            "rotate" => Self::Rotate,
            "skewX" => Self::SkewX,
            "skewY" => Self::SkewY,
            "matrix" => Self::Matrix,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::Matrix => "matrix",
        }
    }

    fn arity_description(self) -> &'static str {
        match self {
            Self::Translate | Self::Scale => "1 or 2 arguments",
            Self::Rotate => "1 or 3 arguments",
            Self::SkewX | Self::SkewY => "1 argument",
            Self::Matrix => "6 arguments",
        }
    }
}

/// The literal function a transform was built from, kept for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformFunction {
    pub kind: FunctionKind,
    pub args: Vec<f64>,
}

impl TransformFunction {
    /// `name(arg, arg, ...)` with at most `precision` fractional digits.
    pub fn render(&self, precision: u8) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|&n| format_number(n, precision))
            .collect();
        format!("{}({})", self.kind.name(), args.join(", "))
    }
}

/// An affine transform.
///
/// Equality and arithmetic only look at the six coefficients; the optional
/// [`TransformFunction`] is a display hint.
#[derive(Debug, Clone)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    function: Option<TransformFunction>,
}

impl Transform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            function: None,
        }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty).with_function(FunctionKind::Translate, &[tx, ty])
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0).with_function(FunctionKind::Scale, &[sx, sy])
    }

    /// Rotation by `deg` degrees about the origin.
    pub fn rotate(deg: f64) -> Self {
        let (sin, cos) = deg.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0).with_function(FunctionKind::Rotate, &[deg])
    }

    /// Rotation by `deg` degrees about `(cx, cy)`.
    pub fn rotate_about(deg: f64, cx: f64, cy: f64) -> Self {
        let t = Self::translate(cx, cy)
            .compose(&Self::rotate(deg))
            .compose(&Self::translate(-cx, -cy));
        t.with_function(FunctionKind::Rotate, &[deg, cx, cy])
    }

    pub fn skew_x(deg: f64) -> Self {
        Self::new(1.0, 0.0, deg.to_radians().tan(), 1.0, 0.0, 0.0)
            .with_function(FunctionKind::SkewX, &[deg])
    }

    pub fn skew_y(deg: f64) -> Self {
        Self::new(1.0, deg.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
            .with_function(FunctionKind::SkewY, &[deg])
    }

    pub fn matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self::new(a, b, c, d, e, f).with_function(FunctionKind::Matrix, &[a, b, c, d, e, f])
    }

    /// Build a transform from a transform-list function and its literal
    /// arguments. Omitted optional arguments take their SVG defaults, but the
    /// display hint keeps the arguments as written.
    pub fn from_function(kind: FunctionKind, args: &[f64]) -> Result<Self> {
        let t = match (kind, args) {
            (FunctionKind::Translate, &[tx]) => Self::translate(tx, 0.0),
            (FunctionKind::Translate, &[tx, ty]) => Self::translate(tx, ty),
            (FunctionKind::Scale, &[s]) => Self::scale(s, s),
            (FunctionKind::Scale, &[sx, sy]) => Self::scale(sx, sy),
            (FunctionKind::Rotate, &[deg]) => Self::rotate(deg),
            (FunctionKind::Rotate, &[deg, cx, cy]) => Self::rotate_about(deg, cx, cy),
            (FunctionKind::SkewX, &[deg]) => Self::skew_x(deg),
            (FunctionKind::SkewY, &[deg]) => Self::skew_y(deg),
            (FunctionKind::Matrix, &[a, b, c, d, e, f]) => Self::matrix(a, b, c, d, e, f),
            _ => {
                return Err(SvgpdError::InvalidTransform {
                    reason: format!(
                        "{} takes {}, got {}",
                        kind.name(),
                        kind.arity_description(),
                        args.len()
                    ),
                    fragment: TransformFunction {
                        kind,
                        args: args.to_vec(),
                    }
                    .render(precision()),
                });
            }
        };
        Ok(t.with_function(kind, args))
    }

    fn with_function(mut self, kind: FunctionKind, args: &[f64]) -> Self {
        self.function = Some(TransformFunction {
            kind,
            args: args.to_vec(),
        });
        self
    }

    /// The function this transform was built from, if any.
    pub fn function(&self) -> Option<&TransformFunction> {
        self.function.as_ref()
    }

    /// Map a point through this transform.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// `self ∘ other`: the transform that applies `other` first, then `self`.
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform::new(
            self.a * other.a + self.c * other.b,
            self.b * other.a + self.d * other.b,
            self.a * other.c + self.c * other.d,
            self.b * other.c + self.d * other.d,
            self.a * other.e + self.c * other.f + self.e,
            self.b * other.e + self.d * other.f + self.f,
        )
    }

    /// Fold a transform list into one transform. Later entries apply first,
    /// as in an SVG `transform` attribute.
    pub fn concat<'a>(ts: impl IntoIterator<Item = &'a Transform>) -> Transform {
        ts.into_iter()
            .fold(Transform::identity(), |acc, t| acc.compose(t))
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn inverse(&self) -> Result<Transform> {
        let det = self.determinant();
        if det.abs() < DETERMINANT_TOLERANCE {
            return Err(SvgpdError::DegenerateTransform { determinant: det });
        }

        Ok(Transform::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
            (self.c * self.f - self.d * self.e) / det,
            (self.b * self.e - self.a * self.f) / det,
        ))
    }

    /// Whether the linear part is a rotation, possibly mirrored, with a
    /// uniform scale. Circles map to circles exactly under such transforms.
    pub fn is_similarity(&self) -> bool {
        let orthogonal = (self.a * self.c + self.b * self.d).abs();
        let col1 = self.a.hypot(self.b);
        let col2 = self.c.hypot(self.d);
        orthogonal < DETERMINANT_TOLERANCE && (col1 - col2).abs() < DETERMINANT_TOLERANCE
    }

    /// The display hint, or `matrix(...)` with the coefficients.
    pub fn render(&self, precision: u8) -> String {
        match &self.function {
            Some(function) => function.render(precision),
            None => TransformFunction {
                kind: FunctionKind::Matrix,
                args: vec![self.a, self.b, self.c, self.d, self.e, self.f],
            }
            .render(precision),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a
            && self.b == other.b
            && self.c == other.c
            && self.d == other.d
            && self.e == other.e
            && self.f == other.f
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, other: Transform) -> Transform {
        self.compose(&other)
    }
}

impl Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, other: &Transform) -> Transform {
        self.compose(other)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(precision()))
    }
}
