use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgpdError {
    #[error("Unknown command `{command}`: {fragment}")]
    UnknownCommand { command: char, fragment: String },

    #[error("Illegal number token `{token}`: {fragment}")]
    InvalidNumber { token: String, fragment: String },

    #[error("Incorrect set of parameters ({reason}): {fragment}")]
    InvalidParameters { reason: String, fragment: String },

    #[error("Short of arc flag tokens: {fragment}")]
    MissingArcFlags { fragment: String },

    #[error("Path data must begin with a moveto command: {fragment}")]
    MissingMoveto { fragment: String },

    #[error("Invalid transform list ({reason}): {fragment}")]
    InvalidTransform { reason: String, fragment: String },

    #[error(
        "Cannot apply an affine transform to a `{command}` command as is; \
         convert H/V lineto commands to lineto, convert elliptical arcs to curves, \
         convert both, or accept re-parameterized (approximate) elliptical arcs"
    )]
    ConversionRequired { command: char },

    #[error("Degenerate transform: determinant {determinant} is too close to zero")]
    DegenerateTransform { determinant: f64 },

    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid SVG: {0}")]
    InvalidSvg(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SvgpdError>;
