//! Classic single-character conversions for directives the scanner does not
//! decode itself.
//!
//! Supported: `%d %i %u %o %x %X`, the floating-point family
//! `%f %F %e %E %g %G %a %A`, `%s`, `%c`, `%n` and `%%`. Every conversion
//! except `%c` and `%n` skips leading whitespace first.
//! Reads go through the same [`Cursor`] as the numeral directives, so the next
//! directive continues exactly where the conversion stopped.
//!
//! Integers that do not fit their destination saturate at its bounds, as
//! `strtol` does. The unsigned conversions accept a leading `-` and negate
//! modulo 2^32, as `strtoul` does.
//!
//! A matching failure, `%%` against a byte other than `%` included, stores
//! nothing and the scan goes on with the next directive.

use log::debug;

use crate::cursor::Cursor;
use crate::error::{ScanError, ScanResult};
use crate::target::ScanValue;

/// What a delegated conversion produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A value for the directive's slot. `counted` is false for `%n`, which
    /// does not add to the conversion count.
    Value { value: ScanValue, counted: bool },
    /// Nothing to store: `%%`, a matching failure or end of input.
    Nothing,
}

impl Outcome {
    fn counted(value: ScanValue) -> Self {
        Outcome::Value {
            value,
            counted: true,
        }
    }
}

/// Returns true if `conversion` is handled by [`convert`].
pub fn is_supported(conversion: char) -> bool {
    matches!(
        conversion,
        'd' | 'i'
            | 'u'
            | 'o'
            | 'x'
            | 'X'
            | 'f'
            | 'F'
            | 'e'
            | 'E'
            | 'g'
            | 'G'
            | 'a'
            | 'A'
            | 's'
            | 'c'
            | 'n'
            | '%'
    )
}

/// Runs one delegated conversion against `cursor`.
///
/// `scan_start` is the cursor position at the start of the current scan and is
/// used by `%n`. A matching failure is not an error: it yields
/// [`Outcome::Nothing`] and leaves the offending byte unread. Conversion
/// characters outside the supported set are [`ScanError::InvalidFormat`].
pub fn convert<C: Cursor>(
    cursor: &mut C,
    conversion: char,
    scan_start: usize,
) -> ScanResult<Outcome> {
    let outcome = match conversion {
        'd' => {
            cursor.skip_whitespace();
            read_integer(cursor, 10).map(|n| Outcome::counted(ScanValue::I32(n.to_i32())))
        }
        'i' => {
            cursor.skip_whitespace();
            read_integer(cursor, 0).map(|n| Outcome::counted(ScanValue::I32(n.to_i32())))
        }
        'u' | 'o' | 'x' | 'X' => {
            let radix = match conversion {
                'u' => 10,
                'o' => 8,
                _ => 16,
            };
            cursor.skip_whitespace();
            read_integer(cursor, radix).map(|n| Outcome::counted(ScanValue::U32(n.to_u32())))
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'a' | 'A' => {
            cursor.skip_whitespace();
            read_float(cursor).map(|v| Outcome::counted(ScanValue::F32(v)))
        }
        's' => {
            cursor.skip_whitespace();
            read_string(cursor).map(|s| Outcome::counted(ScanValue::String(s)))
        }
        // one byte, not one UTF-8 character; bytes above 0x7f map to U+0080..U+00FF
        'c' => cursor
            .consume()
            .map(|b| Outcome::counted(ScanValue::Char(char::from(b)))),
        'n' => Some(Outcome::Value {
            value: ScanValue::Position(cursor.position().saturating_sub(scan_start)),
            counted: false,
        }),
        '%' => {
            cursor.skip_whitespace();
            if cursor.peek() == Some(b'%') {
                cursor.consume();
            }
            Some(Outcome::Nothing)
        }
        other => {
            debug!("unsupported delegated conversion %{other}");
            return Err(ScanError::InvalidFormat);
        }
    };

    Ok(outcome.unwrap_or_else(|| {
        debug!("delegated conversion %{conversion} matched nothing");
        Outcome::Nothing
    }))
}

/// A parsed integer before it is narrowed to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Integer {
    negative: bool,
    /// Saturates at `u64::MAX` when the digits do not fit.
    magnitude: u64,
}

impl Integer {
    /// Clamps to `i32::MIN..=i32::MAX`.
    fn to_i32(self) -> i32 {
        let magnitude = i64::try_from(self.magnitude).unwrap_or(i64::MAX);
        let value = if self.negative { -magnitude } else { magnitude };
        value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Saturates at `u32::MAX`; a negative value that fits wraps like `strtoul`.
    fn to_u32(self) -> u32 {
        match u32::try_from(self.magnitude) {
            Ok(v) if self.negative => v.wrapping_neg(),
            Ok(v) => v,
            Err(_) => u32::MAX,
        }
    }
}

/// Reads an integer in `radix`; a radix of 0 picks 16 for a `0x` prefix, 8 for
/// a leading `0` and 10 otherwise, as `%i` does.
///
/// A sign with no digits after it is pushed back. Every digit of the run is
/// consumed even once the value has saturated.
fn read_integer<C: Cursor>(cursor: &mut C, radix: u32) -> Option<Integer> {
    let mut sign = None;
    if let Some(ch @ (b'+' | b'-')) = cursor.peek() {
        cursor.consume();
        sign = Some(ch);
    }

    let mut radix = radix;
    let mut leading_zero = false;
    if (radix == 0 || radix == 16) && cursor.peek() == Some(b'0') {
        cursor.consume();
        leading_zero = true;
        if matches!(cursor.peek(), Some(b'x' | b'X')) {
            cursor.consume();
            radix = 16;
        } else if radix == 0 {
            radix = 8;
        }
    }
    if radix == 0 {
        radix = 10;
    }

    let digits = cursor.take_while(|b| char::from(b).is_digit(radix));
    if digits.is_empty() && !leading_zero {
        if let Some(ch) = sign {
            cursor.push_back(&[ch]);
        }
        return None;
    }

    let values = digits.iter().filter_map(|&b| char::from(b).to_digit(radix));
    let radix = u64::from(radix);
    let (cutoff, cutlim) = (u64::MAX / radix, u64::MAX % radix);
    let mut magnitude: u64 = 0;
    let mut overflow = false;
    for digit in values.map(u64::from) {
        if overflow || magnitude > cutoff || (magnitude == cutoff && digit > cutlim) {
            overflow = true;
            continue;
        }
        magnitude = magnitude * radix + digit;
    }
    if overflow {
        debug!("integer conversion saturated after {} digits", digits.len());
        magnitude = u64::MAX;
    }

    Some(Integer {
        negative: sign == Some(b'-'),
        magnitude,
    })
}

fn read_float<C: Cursor>(cursor: &mut C) -> Option<f32> {
    let mut text = Vec::new();

    if let Some(sign @ (b'+' | b'-')) = cursor.peek() {
        cursor.consume();
        text.push(sign);
    }

    let mut found_digit = false;
    let mut found_dot = false;
    let mut exp_start = None;
    let mut found_exp_digit = false;

    loop {
        match cursor.peek() {
            Some(ch @ b'0'..=b'9') => {
                cursor.consume();
                text.push(ch);
                if exp_start.is_some() {
                    found_exp_digit = true;
                } else {
                    found_digit = true;
                }
            }
            Some(b'.') if !found_dot && exp_start.is_none() => {
                cursor.consume();
                text.push(b'.');
                found_dot = true;
            }
            Some(ch @ (b'e' | b'E')) if found_digit && exp_start.is_none() => {
                exp_start = Some(text.len());
                cursor.consume();
                text.push(ch);
                if let Some(sign @ (b'+' | b'-')) = cursor.peek() {
                    cursor.consume();
                    text.push(sign);
                }
            }
            _ => break,
        }
    }

    if !found_digit {
        cursor.push_back(&text);
        return None;
    }
    if let Some(start) = exp_start {
        if !found_exp_digit {
            cursor.push_back(&text[start..]);
            text.truncate(start);
        }
    }

    std::str::from_utf8(&text).ok()?.parse().ok()
}

fn read_string<C: Cursor>(cursor: &mut C) -> Option<String> {
    let run = cursor.take_while(|b| !b.is_ascii_whitespace());
    if run.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(&run).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::BufferCursor;

    fn run(input: &str, conversion: char) -> (Outcome, usize) {
        let mut cursor = BufferCursor::new(input.as_bytes());
        let outcome = convert(&mut cursor, conversion, 0).unwrap();
        (outcome, cursor.position())
    }

    fn value(input: &str, conversion: char) -> ScanValue {
        match run(input, conversion).0 {
            Outcome::Value { value, .. } => value,
            Outcome::Nothing => panic!("no value for %{conversion} on {input:?}"),
        }
    }

    #[test]
    fn test_decimal() {
        assert_eq!(value("  42", 'd'), ScanValue::I32(42));
        assert_eq!(value("-123x", 'd'), ScanValue::I32(-123));
        assert_eq!(value("+7", 'd'), ScanValue::I32(7));
    }

    #[test]
    fn test_auto_base() {
        assert_eq!(value("123", 'i'), ScanValue::I32(123));
        assert_eq!(value("0755", 'i'), ScanValue::I32(0o755));
        assert_eq!(value("0x1A", 'i'), ScanValue::I32(0x1A));
        assert_eq!(value("0", 'i'), ScanValue::I32(0));
    }

    #[test]
    fn test_unsigned_family() {
        assert_eq!(value("4294967295", 'u'), ScanValue::U32(u32::MAX));
        assert_eq!(value("755", 'o'), ScanValue::U32(0o755));
        assert_eq!(value("1a2b", 'x'), ScanValue::U32(0x1a2b));
        assert_eq!(value("0xDEAD", 'X'), ScanValue::U32(0xDEAD));
    }

    #[test]
    fn test_signed_saturates_at_destination_bounds() {
        assert_eq!(value("4294967297", 'd'), ScanValue::I32(i32::MAX));
        assert_eq!(value("2147483648", 'd'), ScanValue::I32(i32::MAX));
        assert_eq!(value("-2147483648", 'd'), ScanValue::I32(i32::MIN));
        assert_eq!(value("-99999999999", 'i'), ScanValue::I32(i32::MIN));
        assert_eq!(value("0x7fffffffff", 'i'), ScanValue::I32(i32::MAX));
    }

    #[test]
    fn test_saturated_run_is_fully_consumed() {
        let (outcome, pos) = run("99999999999999999999 tail", 'd');
        assert_eq!(
            outcome,
            Outcome::Value {
                value: ScanValue::I32(i32::MAX),
                counted: true
            }
        );
        assert_eq!(pos, 20);
    }

    #[test]
    fn test_unsigned_saturates_and_wraps_negative() {
        assert_eq!(value("4294967296", 'u'), ScanValue::U32(u32::MAX));
        assert_eq!(value("fffffffffffffffffff", 'x'), ScanValue::U32(u32::MAX));
        assert_eq!(value("-1", 'u'), ScanValue::U32(u32::MAX));
        assert_eq!(value("-0x10", 'x'), ScanValue::U32(0u32.wrapping_sub(16)));
    }

    #[test]
    fn test_float() {
        match value("2.75", 'f') {
            ScanValue::F32(x) => assert!((x - 2.75).abs() < 0.001),
            other => panic!("Wrong type: {other:?}"),
        }
        match value("1.5e2", 'g') {
            ScanValue::F32(x) => assert!((x - 150.0).abs() < 0.001),
            other => panic!("Wrong type: {other:?}"),
        }
    }

    #[test]
    fn test_float_dangling_exponent_is_pushed_back() {
        let mut cursor = BufferCursor::new(b"2ex");
        let outcome = convert(&mut cursor, 'f', 0).unwrap();
        assert_eq!(
            outcome,
            Outcome::Value {
                value: ScanValue::F32(2.0),
                counted: true
            }
        );
        assert_eq!(cursor.remaining(), b"ex");
    }

    #[test]
    fn test_string_and_char() {
        assert_eq!(value(" hello world", 's'), ScanValue::String("hello".into()));
        // %c does not skip whitespace
        assert_eq!(value(" A", 'c'), ScanValue::Char(' '));
    }

    #[test]
    fn test_string_keeps_utf8() {
        assert_eq!(value("café au lait", 's'), ScanValue::String("café".into()));
    }

    #[test]
    fn test_position_is_relative_to_scan_start() {
        let mut cursor = BufferCursor::new(b"abcdef");
        cursor.consume();
        cursor.consume();
        cursor.consume();
        let outcome = convert(&mut cursor, 'n', 1).unwrap();
        assert_eq!(
            outcome,
            Outcome::Value {
                value: ScanValue::Position(2),
                counted: false
            }
        );
    }

    #[test]
    fn test_percent() {
        assert_eq!(run(" %1", '%'), (Outcome::Nothing, 2));
        assert_eq!(run("1", '%'), (Outcome::Nothing, 0));
    }

    #[test]
    fn test_matching_failure_keeps_input() {
        let mut cursor = BufferCursor::new(b"-abc");
        assert_eq!(convert(&mut cursor, 'd', 0), Ok(Outcome::Nothing));
        assert_eq!(cursor.remaining(), b"-abc");
        assert_eq!(run("", 's'), (Outcome::Nothing, 0));
        assert_eq!(run("", 'c'), (Outcome::Nothing, 0));
    }

    #[test]
    fn test_unsupported() {
        let mut cursor = BufferCursor::new(b"0x10");
        assert_eq!(convert(&mut cursor, 'p', 0), Err(ScanError::InvalidFormat));
        assert_eq!(convert(&mut cursor, '[', 0), Err(ScanError::InvalidFormat));
        assert!(!is_supported('q'));
        assert!(is_supported('n'));
    }
}
