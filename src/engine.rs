//! The directive-driven scan loop.

use std::io::BufRead;

use log::{debug, trace};

use crate::cursor::{BufferCursor, Cursor, StreamCursor};
use crate::delegate::{self, Outcome};
use crate::error::{ScanError, ScanResult};
use crate::format::{Directive, FormatProgram};
use crate::numeral;
use crate::target::{Arg, ScanValue};

/// Scans `stream` according to `format`, writing into `args`.
///
/// Returns the number of successful conversions. Bytes the scan did not use,
/// including the byte that ended the last numeral run, stay in `stream`.
pub fn scan_stream<R: BufRead>(
    stream: &mut StreamCursor<R>,
    format: &str,
    args: &mut [Arg<'_>],
) -> ScanResult<usize> {
    scan(stream, format, args)
}

/// Scans an in-memory string according to `format`, writing into `args`.
///
/// # Example
///
/// ```
/// use overscan::{scan_buffer, Arg, Base};
///
/// let mut year = 0i32;
/// let mut code = 0u32;
/// let mut hex = 0i32;
/// let count = scan_buffer(
///     "MCMXCIV 0011 ff",
///     "%Ro %Zr %Cv",
///     &mut [Arg::from(&mut year), Arg::from(&mut code), Arg::from(&mut hex), Arg::from(Base(16))],
/// );
/// assert_eq!(count, Ok(1));
/// assert_eq!(year, 1994);
/// ```
///
/// Only the first directive converts above: literal text in the format is
/// skipped without reading input, so the second run starts at the space.
pub fn scan_buffer(text: &str, format: &str, args: &mut [Arg<'_>]) -> ScanResult<usize> {
    let mut cursor = BufferCursor::new(text.as_bytes());
    scan(&mut cursor, format, args)
}

/// Scans from any [`Cursor`], continuing from its current position.
pub fn scan<C: Cursor>(cursor: &mut C, format: &str, args: &mut [Arg<'_>]) -> ScanResult<usize> {
    let program = FormatProgram::compile(format)?;
    if cursor.peek().is_none() {
        return Err(ScanError::EmptyInput);
    }
    Scanner::new(cursor, args).run(&program)
}

/// Per-call scan state: the cursor, the argument list and the running count.
struct Scanner<'c, 'a, 'b, C> {
    cursor: &'c mut C,
    args: &'a mut [Arg<'b>],
    next_arg: usize,
    start: usize,
    count: usize,
}

impl<'c, 'a, 'b, C: Cursor> Scanner<'c, 'a, 'b, C> {
    fn new(cursor: &'c mut C, args: &'a mut [Arg<'b>]) -> Self {
        let start = cursor.position();
        Scanner {
            cursor,
            args,
            next_arg: 0,
            start,
            count: 0,
        }
    }

    fn run(mut self, program: &FormatProgram) -> ScanResult<usize> {
        for directive in program.directives() {
            trace!("directive {directive:?} at byte {}", self.cursor.position());
            if let Err(e) = self.step(directive) {
                debug!(
                    "scan aborted on {directive:?} after {} conversions: {e}",
                    self.count
                );
                return Err(e);
            }
        }
        Ok(self.count)
    }

    fn step(&mut self, directive: &Directive) -> ScanResult<()> {
        match *directive {
            Directive::Literal(_) => Ok(()),
            Directive::Roman => {
                let slot = self.take_slot()?;
                let run = self.cursor.take_while(numeral::is_roman_symbol);
                if run.is_empty() {
                    debug!("empty Roman run skipped");
                    return Ok(());
                }
                let value = numeral::roman_to_decimal(&run)?;
                self.commit(slot, ScanValue::I32(value))
            }
            Directive::Zeckendorf => {
                let slot = self.take_slot()?;
                let run = self.cursor.take_while(|b| b == b'0' || b == b'1');
                if run.is_empty() {
                    debug!("empty Zeckendorf run skipped");
                    return Ok(());
                }
                let value = numeral::zeckendorf_to_decimal(&run)?;
                self.commit(slot, ScanValue::U32(value))
            }
            Directive::BaseN { uppercase } => {
                let slot = self.take_slot()?;
                let base = self.take_base()?;
                if !numeral::is_valid_base(base) {
                    return Err(ScanError::InvalidFormat);
                }
                let run = self.take_signed_alnum();
                if run.is_empty() {
                    debug!("empty base-{base} run skipped");
                    return Ok(());
                }
                let value = numeral::parse_base_n(&run, base, uppercase)?;
                self.commit(slot, ScanValue::I32(value))
            }
            Directive::Delegated('%') => {
                delegate::convert(&mut *self.cursor, '%', self.start)?;
                Ok(())
            }
            Directive::Delegated(conversion) => {
                if !delegate::is_supported(conversion) {
                    return Err(ScanError::InvalidFormat);
                }
                let slot = self.take_slot()?;
                match delegate::convert(&mut *self.cursor, conversion, self.start)? {
                    Outcome::Value { value, counted } => {
                        self.store(slot, &value)?;
                        if counted {
                            self.count += 1;
                        }
                        Ok(())
                    }
                    Outcome::Nothing => Ok(()),
                }
            }
        }
    }

    /// Collects an optional `-` and the alphanumeric run after it. A `-` with
    /// no alphanumeric byte after it is pushed back and the run is empty.
    fn take_signed_alnum(&mut self) -> Vec<u8> {
        let mut run = Vec::new();
        if self.cursor.peek() == Some(b'-') {
            self.cursor.consume();
            run.push(b'-');
        }
        let digits = self.cursor.take_while(|b| b.is_ascii_alphanumeric());
        if digits.is_empty() {
            self.cursor.push_back(&run);
            return Vec::new();
        }
        run.extend(digits);
        run
    }

    /// Index of the next argument, which must be a slot.
    fn take_slot(&mut self) -> ScanResult<usize> {
        let index = self.next_arg;
        match self.args.get(index) {
            Some(Arg::Slot(_)) => {
                self.next_arg += 1;
                Ok(index)
            }
            _ => Err(ScanError::ArgumentMismatch { index }),
        }
    }

    fn take_base(&mut self) -> ScanResult<i32> {
        let index = self.next_arg;
        match self.args.get(index) {
            Some(Arg::Base(base)) => {
                self.next_arg += 1;
                Ok(*base)
            }
            _ => Err(ScanError::ArgumentMismatch { index }),
        }
    }

    fn store(&mut self, index: usize, value: &ScanValue) -> ScanResult<()> {
        let stored = match self.args.get_mut(index) {
            Some(Arg::Slot(target)) => target.store(value),
            _ => false,
        };
        if stored {
            Ok(())
        } else {
            Err(ScanError::ArgumentMismatch { index })
        }
    }

    fn commit(&mut self, index: usize, value: ScanValue) -> ScanResult<()> {
        self.store(index, &value)?;
        self.count += 1;
        Ok(())
    }
}
