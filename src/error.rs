//! Error kinds reported by the scanner.

use thiserror::Error;

/// Errors that abort a scan.
///
/// Every variant maps to a stable negative code (see [`ScanError::code`]) so the
/// C-style entry points in [`crate::legacy`] can fold the result into one `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The input stream or buffer held no bytes at all, or a decoder was handed
    /// an empty run.
    #[error("empty input")]
    EmptyInput,
    /// The format string was empty.
    #[error("empty format string")]
    EmptyFormat,
    /// A byte outside the current directive's alphabet.
    #[error("invalid character in numeral")]
    InvalidChar,
    /// Arithmetic overflow while decoding a numeral.
    #[error("numeral overflows its destination type")]
    Overflow,
    /// Malformed numeral or directive: missing Zeckendorf terminator, base out
    /// of range, lone sign, dangling `%`, unsupported conversion.
    #[error("invalid format")]
    InvalidFormat,
    /// The argument list does not line up with the directives.
    #[error("argument {index} does not match its directive")]
    ArgumentMismatch {
        /// Zero-based position in the argument list.
        index: usize,
    },
}

impl ScanError {
    /// The negative status code for this error.
    pub fn code(self) -> i32 {
        match self {
            ScanError::EmptyInput | ScanError::EmptyFormat => -1,
            ScanError::InvalidChar => -2,
            ScanError::Overflow => -3,
            ScanError::InvalidFormat => -4,
            ScanError::ArgumentMismatch { .. } => -5,
        }
    }
}

/// A type alias for Results with [`ScanError`].
pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_negative_and_stable() {
        assert_eq!(ScanError::EmptyInput.code(), -1);
        assert_eq!(ScanError::EmptyFormat.code(), -1);
        assert_eq!(ScanError::InvalidChar.code(), -2);
        assert_eq!(ScanError::Overflow.code(), -3);
        assert_eq!(ScanError::InvalidFormat.code(), -4);
        assert_eq!(ScanError::ArgumentMismatch { index: 3 }.code(), -5);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ScanError::ArgumentMismatch { index: 2 }.to_string(),
            "argument 2 does not match its directive"
        );
        assert_eq!(ScanError::Overflow.to_string(), "numeral overflows its destination type");
    }
}
