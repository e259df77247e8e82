//! Number formatting for path data output.
//!
//! Every `Display` implementation in this crate formats its numbers through
//! [`format_number`] with the process-wide precision returned by
//! [`precision`]. The precision is shared global state: changing it affects
//! every later render on every thread. Set it once before rendering, or use
//! the explicit `render(precision)` methods which never read it.

use std::sync::atomic::{AtomicU8, Ordering};

/// Precision used when none has been configured.
pub const DEFAULT_PRECISION: u8 = 6;

static PRECISION: AtomicU8 = AtomicU8::new(DEFAULT_PRECISION);

/// Set the maximum number of fractional digits used by `Display` output.
pub fn set_precision(value: u8) {
    PRECISION.store(value, Ordering::Relaxed);
}

/// The maximum number of fractional digits used by `Display` output.
pub fn precision() -> u8 {
    PRECISION.load(Ordering::Relaxed)
}

/// Format a number with at most `precision` fractional digits.
///
/// Trailing zeros and a trailing decimal point are removed, and a negative
/// zero is written as `0`. With `precision` 0, halves round to even.
pub fn format_number(n: f64, precision: u8) -> String {
    if precision == 0 {
        return collapse_negative_zero(format!("{}", n.round_ties_even()));
    }

    // The shortest round-trip text is used as is when it is short enough.
    let mut buffer = ryu::Buffer::new();
    let shortest = buffer.format(n);
    let fits = !shortest.contains(['e', 'E'])
        && match shortest.split_once('.') {
            Some((_, fraction)) => fraction.len() <= precision as usize,
            None => true,
        };

    let s = if fits {
        shortest.to_string()
    } else {
        format!("{:.prec$}", n, prec = precision as usize)
    };

    collapse_negative_zero(trim_fraction(s))
}

fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

fn collapse_negative_zero(s: String) -> String {
    if s == "-0" { "0".into() } else { s }
}
