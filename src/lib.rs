//! svgpdtools - SVG path data and transform-list tools
//!
//! Parses the `d` and `transform` attributes of SVG `<path>` elements into a
//! command model that can be absolutized, mapped through affine transforms
//! and normalized, then renders it back to compact text.
//!
//! ```
//! use svgpdtools::{NormalizeOptions, parse_path};
//!
//! let mut pd = parse_path("m 0,0 l 10,0 l 0,10").unwrap();
//! pd.normalize(&NormalizeOptions::default());
//! assert_eq!(pd.render(6), "M 0,0 L 10,0 10,10");
//! ```

mod arc;
mod command;
mod error;
mod lexer;
mod number;
mod path;
mod pathdata;
mod point;
mod svg;
mod transform;
mod transform_list;
mod view;

pub use arc::*;
pub use command::*;
pub use error::*;
pub use number::*;
pub use path::*;
pub use pathdata::*;
pub use point::*;
pub use svg::*;
pub use transform::*;
pub use transform_list::*;
pub use view::*;

/// Parse path data. Same as [`parse_path`].
pub fn pathdata_from_str(d: &str) -> Result<PathData> {
    parse_path(d)
}

/// Parse a transform list and fold it into one transform.
pub fn transform_from_str(src: &str) -> Result<Transform> {
    parse_transform(src)
}
