//! Extended `scanf`-style scanning with numeral directives.
//!
//! On top of the classic single-character conversions this crate reads three
//! kinds of numerals that `scanf` has no conversion for.
//!
//! # Supported Directives
//!
//! ## Numeral Directives
//! - `%Ro` - Roman numeral (`I V X L C D M`) into an `i32`
//! - `%Zr` - Zeckendorf (Fibonacci) code ending in a terminating `1`, into a `u32`
//! - `%Cv` - Signed integer in a caller-given base 2..=36, digits `0-9a-z`, into an `i32`
//! - `%CV` - Same as `%Cv` with digits `0-9A-Z`
//!
//! Base-N letters are folded to the directive's case, so `%Cv` also reads `FF`.
//!
//! Each numeral directive consumes the longest run of bytes from its alphabet
//! and leaves the byte that ended the run for whatever reads next. An empty run
//! skips the directive without counting it. A run that does not decode aborts
//! the whole scan.
//!
//! ## Delegated Conversions
//! - `%d`, `%i`, `%u`, `%o`, `%x`, `%X` - Integers
//! - `%f`, `%F`, `%e`, `%E`, `%g`, `%G`, `%a`, `%A` - Floating-point number
//! - `%s` - Sequence of non-whitespace characters
//! - `%c` - One byte, whitespace included
//! - `%n` - Bytes consumed so far (not counted)
//! - `%%` - A literal percent sign (takes no argument)
//!
//! ## Literal Text
//! Any other format text is skipped; it is not matched against the input.
//!
//! # Example
//!
//! ```
//! use overscan::{scan_buffer, Arg, Base, ScanError};
//!
//! let mut roman = 0i32;
//! let mut zeck = 0u32;
//! let mut hex = 0i32;
//! let count = scan_buffer(
//!     "XIV0011ff",
//!     "%Ro%Zr%Cv",
//!     &mut [Arg::from(&mut roman), Arg::from(&mut zeck), Arg::from(&mut hex), Arg::from(Base(16))],
//! );
//! assert_eq!(count, Ok(3));
//! assert_eq!((roman, zeck, hex), (14, 3, 255));
//!
//! let result = scan_buffer("12", "%Cv", &mut [Arg::from(&mut hex), Arg::from(Base(37))]);
//! assert_eq!(result, Err(ScanError::InvalidFormat));
//! ```
//!
//! # Error Handling
//!
//! Scans return `Result<usize, ScanError>`:
//! - `Ok(count)` - Number of directives that stored a value
//! - `Err(ScanError::EmptyInput)` / `Err(ScanError::EmptyFormat)` - Nothing to scan
//! - `Err(ScanError::InvalidChar)` - Byte outside a numeral's alphabet
//! - `Err(ScanError::Overflow)` - Numeral does not fit its destination
//! - `Err(ScanError::InvalidFormat)` - Malformed numeral, bad base or unsupported directive
//! - `Err(ScanError::ArgumentMismatch { .. })` - Arguments do not line up with directives
//!
//! Values stored before an error stay stored. The [`legacy`] module folds the
//! same outcomes into C-style `i32` returns.

pub mod cursor;
pub mod delegate;
mod engine;
pub mod error;
pub mod format;
pub mod legacy;
pub mod numeral;
mod target;


pub use self::cursor::{BufferCursor, Cursor, StreamCursor};
pub use self::engine::{scan, scan_buffer, scan_stream};
pub use self::error::{ScanError, ScanResult};
pub use self::format::{Directive, FormatProgram};
pub use self::target::{Arg, Base, ScanTarget, ScanValue};
