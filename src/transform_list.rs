//! Parsing of the `transform` attribute.
//!
//! ```text
//! transform-list: wsp* (function (comma-wsp? function)*)? wsp*
//! function:       name wsp* '(' wsp* number (comma-wsp number)* wsp* ')'
//! ```

use crate::error::{Result, SvgpdError};
use crate::lexer::{Cursor, LexError};
use crate::transform::{FunctionKind, Transform};

/// Parse a transform list into its functions, in written order. Each
/// transform keeps the function it was written as for display.
pub fn parse_transform_list(src: &str) -> Result<Vec<Transform>> {
    let lex_err = |e: LexError| e.into_transform_error(src);
    let mut cursor = Cursor::new(src);

    cursor.skip_whitespace();
    if cursor.peek() == Some(',') {
        return Err(lex_err(LexError::Separator("comma before the first function")));
    }

    let mut transforms = Vec::new();
    while !cursor.is_eof() {
        transforms.push(function(&mut cursor, src)?);
        cursor.separator_before_next().map_err(lex_err)?;
    }
    Ok(transforms)
}

/// Parse a transform list and fold it into one transform. An empty list is
/// the identity.
pub fn parse_transform(src: &str) -> Result<Transform> {
    Ok(Transform::concat(&parse_transform_list(src)?))
}

fn function(cursor: &mut Cursor<'_>, src: &str) -> Result<Transform> {
    let lex_err = |e: LexError| e.into_transform_error(src);
    let invalid = |reason: String| SvgpdError::InvalidTransform {
        reason,
        fragment: src.trim().to_string(),
    };

    let name = cursor.take_while(|c| c.is_ascii_alphabetic());
    if name.is_empty() {
        return Err(invalid(match cursor.peek() {
            Some(c) => format!("expected a function name, got `{}`", c),
            None => "expected a function name".into(),
        }));
    }
    let kind = FunctionKind::from_name(name)
        .ok_or_else(|| invalid(format!("unknown transform function `{}`", name)))?;

    cursor.skip_whitespace();
    if cursor.next() != Some('(') {
        return Err(invalid(format!("expected `(` after `{}`", name)));
    }
    cursor.skip_whitespace();

    let mut args = vec![cursor.number().map_err(lex_err)?];
    loop {
        let comma = cursor.skip_comma_wsp().map_err(lex_err)?;
        match cursor.peek() {
            Some(')') if !comma => {
                cursor.next();
                break;
            }
            Some(')') => return Err(invalid("comma before `)`".into())),
            None => return Err(invalid(format!("unbalanced parentheses in `{}`", name))),
            Some(_) => args.push(cursor.number().map_err(lex_err)?),
        }
    }

    Transform::from_function(kind, &args)
}
