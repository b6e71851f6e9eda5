//! Numeral decoders for the `%Ro`, `%Zr` and `%Cv`/`%CV` directives.
//!
//! Each decoder takes the byte run collected by the scanner and either returns
//! the decoded value or the [`ScanError`] that aborts the scan. None of them
//! log or touch global state.

use crate::error::{ScanError, ScanResult};

/// Value of a single Roman numeral symbol, or `None` for any other byte.
fn roman_value(symbol: u8) -> Option<i32> {
    match symbol {
        b'I' => Some(1),
        b'V' => Some(5),
        b'X' => Some(10),
        b'L' => Some(50),
        b'C' => Some(100),
        b'D' => Some(500),
        b'M' => Some(1000),
        _ => None,
    }
}

/// Returns true for the seven Roman numeral symbols.
pub fn is_roman_symbol(byte: u8) -> bool {
    roman_value(byte).is_some()
}

/// Decodes a Roman numeral.
///
/// The run is scanned right to left: a symbol is added when it is at least as
/// large as the symbol to its right and subtracted otherwise, which yields the
/// usual subtractive notation (`IV`, `XC`, `CM`) without pair tables.
///
/// # Example
///
/// ```
/// use overscan::numeral::roman_to_decimal;
///
/// assert_eq!(roman_to_decimal(b"MCMXCIV"), Ok(1994));
/// ```
pub fn roman_to_decimal(run: &[u8]) -> ScanResult<i32> {
    if run.is_empty() {
        return Err(ScanError::EmptyInput);
    }

    let mut total: i32 = 0;
    let mut prev_value = 0;

    for &symbol in run.iter().rev() {
        let value = roman_value(symbol).ok_or(ScanError::InvalidChar)?;
        total = if value >= prev_value {
            total.checked_add(value)
        } else {
            total.checked_sub(value)
        }
        .ok_or(ScanError::Overflow)?;
        prev_value = value;
    }

    Ok(total)
}

/// The `n`-th Fibonacci number with `F(0) = 0` and `F(1) = 1`.
///
/// Returns [`ScanError::Overflow`] once the sequence leaves `u32`; `F(47)` is
/// the last value that fits.
pub fn fibonacci(n: u32) -> ScanResult<u32> {
    if n <= 1 {
        return Ok(n);
    }

    let (mut prev, mut curr) = (0u32, 1u32);
    for _ in 2..=n {
        let next = curr.wrapping_add(prev);
        if next < curr {
            return Err(ScanError::Overflow);
        }
        prev = curr;
        curr = next;
    }
    Ok(curr)
}

/// Decodes a Zeckendorf (Fibonacci) code.
///
/// The run must end in the terminating `1`. Every other position `i`, counted
/// from the first byte, contributes `F(i + 2)` when it holds a `1`. Adjacent
/// ones are not rejected; the value is simply the Fibonacci sum.
///
/// # Example
///
/// ```
/// use overscan::numeral::zeckendorf_to_decimal;
///
/// assert_eq!(zeckendorf_to_decimal(b"1001"), Ok(1));
/// assert_eq!(zeckendorf_to_decimal(b"00101"), Ok(3));
/// ```
pub fn zeckendorf_to_decimal(run: &[u8]) -> ScanResult<u32> {
    let (&terminator, digits) = run.split_last().ok_or(ScanError::EmptyInput)?;

    let mut total: u32 = 0;
    for (i, &bit) in digits.iter().enumerate() {
        match bit {
            b'0' => {}
            b'1' => {
                let index = u32::try_from(i + 2).map_err(|_| ScanError::Overflow)?;
                let value = fibonacci(index)?;
                if u32::MAX - value < total {
                    return Err(ScanError::Overflow);
                }
                total += value;
            }
            _ => return Err(ScanError::InvalidChar),
        }
    }

    match terminator {
        b'1' => Ok(total),
        b'0' => Err(ScanError::InvalidFormat),
        _ => Err(ScanError::InvalidChar),
    }
}

/// Returns true if `base` is accepted by [`parse_base_n`].
pub fn is_valid_base(base: i32) -> bool {
    (2..=36).contains(&base)
}

/// Value of one base-N digit. Letters are folded to the selected case first,
/// so both `f` and `F` are 15 in either mode.
fn digit_value(byte: u8, uppercase: bool) -> Option<u32> {
    let folded = if uppercase {
        byte.to_ascii_uppercase()
    } else {
        byte.to_ascii_lowercase()
    };
    match folded {
        b'0'..=b'9' => Some(u32::from(folded - b'0')),
        b'a'..=b'z' => Some(u32::from(folded - b'a') + 10),
        b'A'..=b'Z' => Some(u32::from(folded - b'A') + 10),
        _ => None,
    }
}

/// Decodes a signed integer written in `base` (2 to 36).
///
/// Letters stand for the digits 10 to 35. `uppercase` selects the case the
/// letters are folded to before decoding, so either case is accepted. The
/// magnitude is accumulated against `i32::MAX`
/// before the sign is applied.
///
/// # Example
///
/// ```
/// use overscan::numeral::parse_base_n;
/// use overscan::ScanError;
///
/// assert_eq!(parse_base_n(b"ff", 16, false), Ok(255));
/// assert_eq!(parse_base_n(b"-Z", 36, true), Ok(-35));
/// assert_eq!(parse_base_n(b"10", 37, false), Err(ScanError::InvalidFormat));
/// ```
pub fn parse_base_n(run: &[u8], base: i32, uppercase: bool) -> ScanResult<i32> {
    if run.is_empty() {
        return Err(ScanError::EmptyInput);
    }
    if !is_valid_base(base) {
        return Err(ScanError::InvalidFormat);
    }

    let (negative, digits) = match run.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, run),
    };
    if digits.is_empty() {
        return Err(ScanError::InvalidFormat);
    }

    // `base` is in 2..=36 here
    let radix = base as u32;
    let max = i32::MAX as u32;
    let (cutoff, cutlim) = (max / radix, max % radix);

    let mut acc: u32 = 0;
    for &byte in digits {
        let digit = digit_value(byte, uppercase).ok_or(ScanError::InvalidChar)?;
        if digit >= radix {
            return Err(ScanError::InvalidChar);
        }
        if acc > cutoff || (acc == cutoff && digit > cutlim) {
            return Err(ScanError::Overflow);
        }
        acc = acc * radix + digit;
    }

    let magnitude = acc as i32;
    Ok(if negative { -magnitude } else { magnitude })
}
