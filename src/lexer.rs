//! Low-level scanning shared by the path-data and transform-list parsers.

use std::fmt;

use crate::error::SvgpdError;

/// A scanning failure, without the context of the command it occurred in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LexError {
    /// Nothing that could start the expected token.
    Expected(&'static str),
    /// A number token that does not form a valid number.
    InvalidNumber(String),
    /// Comma misuse between tokens.
    Separator(&'static str),
    /// An arc flag other than `0` or `1`.
    InvalidFlag(char),
    /// The input ended before all arc flags were read.
    MissingFlags,
}

impl LexError {
    pub(crate) fn into_path_error(self, fragment: &str) -> SvgpdError {
        let fragment = fragment.trim().to_string();
        match self {
            LexError::InvalidNumber(token) => SvgpdError::InvalidNumber { token, fragment },
            LexError::MissingFlags => SvgpdError::MissingArcFlags { fragment },
            other => SvgpdError::InvalidParameters {
                reason: other.to_string(),
                fragment,
            },
        }
    }

    pub(crate) fn into_transform_error(self, fragment: &str) -> SvgpdError {
        let fragment = fragment.trim().to_string();
        match self {
            LexError::InvalidNumber(token) => SvgpdError::InvalidNumber { token, fragment },
            other => SvgpdError::InvalidTransform {
                reason: other.to_string(),
                fragment,
            },
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::Expected(what) => write!(f, "expected {}", what),
            LexError::InvalidNumber(token) => write!(f, "illegal number token `{}`", token),
            LexError::Separator(what) => f.write_str(what),
            LexError::InvalidFlag(c) => write!(f, "a flag token should be 0 or 1, got `{}`", c),
            LexError::MissingFlags => f.write_str("short of flag tokens"),
        }
    }
}

/// Where the number scanner is within a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Start,
    Sign,
    /// `.` with no digits yet
    Dot,
    Integer,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

pub(crate) fn is_wsp(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub(crate) fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&f) {
            self.next();
        }
        &self.input[start..self.pos]
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_wsp) {
            self.next();
        }
    }

    /// Skip `wsp* ','? wsp*`. Returns whether a comma was consumed.
    pub(crate) fn skip_comma_wsp(&mut self) -> Result<bool, LexError> {
        self.skip_whitespace();
        let comma = self.peek() == Some(',');
        if comma {
            self.next();
            self.skip_whitespace();
            if self.peek() == Some(',') {
                return Err(LexError::Separator("more than one comma between tokens"));
            }
        }
        Ok(comma)
    }

    /// Skip the separator between two tokens of a list. A comma must be
    /// followed by another token.
    pub(crate) fn separator_before_next(&mut self) -> Result<(), LexError> {
        if self.skip_comma_wsp()? && self.is_eof() {
            return Err(LexError::Separator("comma without a following token"));
        }
        Ok(())
    }

    /// Scan one number at the cursor. Numbers end at the first character that
    /// cannot continue them, so `1-2` and `1.5.5` are two numbers each.
    pub(crate) fn number(&mut self) -> Result<f64, LexError> {
        let start = self.pos;
        let mut state = NumberState::Start;

        while let Some(c) = self.peek() {
            let next = match (state, c) {
                (NumberState::Start, '+' | '-') => NumberState::Sign,
                (NumberState::Exponent, '+' | '-') => NumberState::ExponentSign,
                (NumberState::Start | NumberState::Sign | NumberState::Integer, '0'..='9') => {
                    NumberState::Integer
                }
                (NumberState::Dot | NumberState::Fraction, '0'..='9') => NumberState::Fraction,
                (
                    NumberState::Exponent | NumberState::ExponentSign | NumberState::ExponentDigits,
                    '0'..='9',
                ) => NumberState::ExponentDigits,
                (NumberState::Start | NumberState::Sign, '.') => NumberState::Dot,
                (NumberState::Integer, '.') => NumberState::Fraction,
                (NumberState::Integer | NumberState::Fraction, 'e' | 'E') => NumberState::Exponent,
                (
                    NumberState::Start
                    | NumberState::Sign
                    | NumberState::Dot
                    | NumberState::Exponent
                    | NumberState::ExponentSign,
                    'e' | 'E',
                ) => {
                    self.next();
                    return Err(LexError::InvalidNumber(self.input[start..self.pos].into()));
                }
                _ => break,
            };
            state = next;
            self.next();
        }

        let token = &self.input[start..self.pos];
        match state {
            NumberState::Start => Err(LexError::Expected("number")),
            NumberState::Integer | NumberState::Fraction | NumberState::ExponentDigits => token
                .parse()
                .map_err(|_| LexError::InvalidNumber(token.into())),
            _ => Err(LexError::InvalidNumber(token.into())),
        }
    }

    /// Scan one arc flag. Flags need no separator, so `11` is two flags.
    pub(crate) fn flag(&mut self) -> Result<bool, LexError> {
        match self.peek() {
            Some('0') => {
                self.next();
                Ok(false)
            }
            Some('1') => {
                self.next();
                Ok(true)
            }
            Some(c) => Err(LexError::InvalidFlag(c)),
            None => Err(LexError::MissingFlags),
        }
    }
}
