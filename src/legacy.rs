//! C-style entry points returning a single `i32`.
//!
//! A non-negative return is the number of successful conversions; a negative
//! return is the [`ScanError::code`] of the error that stopped the scan.
//!
//! # Example
//!
//! ```
//! use overscan::legacy::oversscanf;
//! use overscan::{Arg, Base};
//!
//! let mut roman = 0i32;
//! let mut value = 0i32;
//! let count = oversscanf("XIV", "%Ro", &mut [Arg::from(&mut roman)]);
//! assert_eq!((count, roman), (1, 14));
//!
//! let status = oversscanf("123", "%Cv", &mut [Arg::from(&mut value), Arg::from(Base(37))]);
//! assert_eq!(status, -4);
//! ```
//!
//! # Using the macros
//!
//! ```
//! use overscan::{oversscanf, Base};
//!
//! let mut a: i32 = 0;
//! let mut b: u32 = 0;
//! let count = oversscanf!("FF", "%CV", &mut a, Base(16));
//! assert_eq!((count, a), (1, 255));
//!
//! // only "10" is collected, and it lacks the terminating 1
//! let count = oversscanf!("102", "%Zr", &mut b);
//! assert_eq!(count, -4);
//! ```

use std::io::BufRead;

use crate::cursor::StreamCursor;
use crate::engine::{scan_buffer, scan_stream};
use crate::error::ScanError;
use crate::target::Arg;

fn status(result: Result<usize, ScanError>) -> i32 {
    match result {
        Ok(count) => i32::try_from(count).unwrap_or(i32::MAX),
        Err(e) => e.code(),
    }
}

/// Scans a stream, C style.
///
/// # Returns
///
/// * Non-negative: number of successful conversions
/// * `-1`: empty stream or empty format
/// * `-2`: invalid character in a numeral
/// * `-3`: numeral overflow
/// * `-4`: malformed numeral, invalid base or unsupported directive
/// * `-5`: arguments do not match the directives
pub fn overfscanf<R: BufRead>(
    stream: &mut StreamCursor<R>,
    format: &str,
    args: &mut [Arg<'_>],
) -> i32 {
    status(scan_stream(stream, format, args))
}

/// Scans a string, C style. Return values are the same as [`overfscanf`].
///
/// # Example
///
/// ```
/// use overscan::legacy::oversscanf;
/// use overscan::Arg;
///
/// let mut z: u32 = 0;
/// assert_eq!(oversscanf("1001", "%Zr", &mut [Arg::from(&mut z)]), 1);
/// assert_eq!(z, 1);
/// ```
pub fn oversscanf(input: &str, format: &str, args: &mut [Arg<'_>]) -> i32 {
    status(scan_buffer(input, format, args))
}

/// Macro for C-style string scanning with variadic arguments.
///
/// Destinations are written `&mut x`; the base of a `%Cv`/`%CV` directive is
/// written [`Base(n)`](crate::Base) right after its destination.
///
/// # Example
///
/// ```
/// use overscan::{oversscanf, Base};
///
/// let mut year: i32 = 0;
/// let mut hex: i32 = 0;
/// let count = oversscanf!("MMXXIV", "%Ro", &mut year);
/// assert_eq!((count, year), (1, 2024));
///
/// let count = oversscanf!("-7f", "%Cv", &mut hex, Base(16));
/// assert_eq!((count, hex), (1, -127));
/// ```
#[macro_export]
macro_rules! oversscanf {
    ($input:expr, $fmt:expr $(,)?) => {{
        $crate::legacy::oversscanf($input, $fmt, &mut [])
    }};
    ($input:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {{
        $crate::legacy::oversscanf($input, $fmt, &mut [$($crate::Arg::from($arg)),+])
    }};
}

/// Macro for C-style stream scanning with variadic arguments.
///
/// # Example
///
/// ```
/// use overscan::{overfscanf, StreamCursor};
///
/// let mut stream = StreamCursor::new("CDXLIV".as_bytes());
/// let mut value: i32 = 0;
/// assert_eq!(overfscanf!(&mut stream, "%Ro", &mut value), 1);
/// assert_eq!(value, 444);
/// ```
#[macro_export]
macro_rules! overfscanf {
    ($stream:expr, $fmt:expr $(,)?) => {{
        $crate::legacy::overfscanf($stream, $fmt, &mut [])
    }};
    ($stream:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {{
        $crate::legacy::overfscanf($stream, $fmt, &mut [$($crate::Arg::from($arg)),+])
    }};
}
