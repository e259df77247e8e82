//! Streaming passes over the `<path>` elements of an SVG document.
//!
//! Everything but `<path>` start tags is copied through untouched; there is
//! no document tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

use crate::error::{Result, SvgpdError};
use crate::number::DEFAULT_PRECISION;
use crate::path::parse_path;
use crate::pathdata::{ArcPolicy, HvLinetoPolicy, NormalizeOptions, TransformOptions};
use crate::transform::Transform;
use crate::transform_list::parse_transform;
use crate::view::PathView;

/// Options for [`normalize_svg`].
#[derive(Debug, Clone)]
pub struct SvgNormalizeOptions {
    pub normalize: NormalizeOptions,
    /// Apply each path's `transform` attribute to its data and drop the
    /// attribute
    pub collapse_transform_attribute: bool,
    /// Fractional digits in the rewritten data (default: 6)
    pub precision: u8,
}

impl Default for SvgNormalizeOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            collapse_transform_attribute: false,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Rewrite the `d` attribute of every `<path>` in `input` with normalized
/// path data.
pub fn normalize_svg(input: &str, options: &SvgNormalizeOptions) -> Result<String> {
    let mut reader = Reader::from_str(input);
    let mut writer = Writer::new(Vec::new());

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(start) if is_path(&start) => {
                let line = line_at(input, position);
                writer.write_event(Event::Start(normalize_path(&start, line, options)?))?;
            }
            Event::Empty(start) if is_path(&start) => {
                let line = line_at(input, position);
                writer.write_event(Event::Empty(normalize_path(&start, line, options)?))?;
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    let output = String::from_utf8(writer.into_inner()).map_err(|e| e.utf8_error())?;
    Ok(output)
}

/// Every `<path>` element of `input`, in document order.
pub fn collect_paths(input: &str) -> Result<Vec<PathView>> {
    let mut reader = Reader::from_str(input);
    let mut views = Vec::new();

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(start) | Event::Empty(start) if is_path(&start) => {
                let mut view = PathView {
                    line: Some(line_at(input, position)),
                    ..Default::default()
                };
                for (key, value) in path_attributes(&start)? {
                    match key.as_str() {
                        "d" => view.d = value,
                        "transform" => view.transform = Some(value),
                        _ => view.attrs.push((key, value)),
                    }
                }
                views.push(view);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(views)
}

fn is_path(start: &BytesStart) -> bool {
    start.local_name().as_ref() == b"path"
}

/// 1-based line number of byte offset `position`.
fn line_at(input: &str, position: usize) -> usize {
    let end = position.min(input.len());
    input.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn path_attributes(start: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SvgpdError::InvalidSvg(format!("Invalid attribute: {}", e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        attrs.push((key.to_string(), value.into_owned()));
    }
    Ok(attrs)
}

fn normalize_path(
    start: &BytesStart,
    line: usize,
    options: &SvgNormalizeOptions,
) -> Result<BytesStart<'static>> {
    let attrs = path_attributes(start)?;

    let transform = if options.collapse_transform_attribute {
        attrs
            .iter()
            .find(|(key, _)| key == "transform")
            .map(|(_, value)| parse_transform(value))
            .transpose()?
    } else {
        None
    };

    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut out = BytesStart::new(name);
    for (key, value) in &attrs {
        match key.as_str() {
            "d" => {
                let d = normalize_d(value, transform.as_ref(), options)?;
                debug!(line, d = %d, "normalized path");
                out.push_attribute(("d", d.as_str()));
            }
            "transform" if transform.is_some() => {
                debug!(line, transform = %value, "collapsed transform attribute");
            }
            _ => out.push_attribute((key.as_str(), value.as_str())),
        }
    }
    Ok(out)
}

fn normalize_d(d: &str, transform: Option<&Transform>, options: &SvgNormalizeOptions) -> Result<String> {
    let mut pd = parse_path(d)?;

    if let Some(t) = transform {
        // Arcs survive as arcs only under maps that keep circles circular.
        let elliptical_arc = if options.normalize.collapse_elliptical_arc || !t.is_similarity() {
            ArcPolicy::ConvertToCurves
        } else {
            ArcPolicy::Reparameterize
        };
        pd.transform(
            t,
            &TransformOptions {
                hv_lineto: HvLinetoPolicy::ConvertToLineto,
                elliptical_arc,
            },
        )?;
    }

    pd.normalize(&options.normalize);
    Ok(pd.render(options.precision))
}
