//! Destination slots for scanned values.
//!
//! The argument list of a scan is an ordered slice of [`Arg`]s: each
//! conversion directive takes the next [`Arg::Slot`], and base-N directives
//! additionally take the [`Arg::Base`] that follows their slot.

/// A value produced by a directive, before it is stored into a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanValue {
    /// From `%Ro`, `%Cv`, `%CV`, `%d` and `%i`.
    I32(i32),
    /// From `%Zr`, `%u`, `%o`, `%x` and `%X`.
    U32(u32),
    /// From the floating-point conversions.
    F32(f32),
    /// From `%s`.
    String(String),
    /// From `%c`.
    Char(char),
    /// From `%n`: bytes consumed so far in this scan.
    Position(usize),
}

/// Trait for types that can receive scanned values.
///
/// Implement this trait for custom types that should be usable as scan
/// destinations.
pub trait ScanTarget {
    /// Store a scanned value into this target.
    ///
    /// Returns `true` if the value was stored, `false` if its type does not
    /// fit this target.
    fn store(&mut self, value: &ScanValue) -> bool;
}

impl ScanTarget for i32 {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::I32(v) => {
                *self = *v;
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for i64 {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::I32(v) => {
                *self = i64::from(*v);
                true
            }
            ScanValue::U32(v) => {
                *self = i64::from(*v);
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for u32 {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::U32(v) => {
                *self = *v;
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for u64 {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::U32(v) => {
                *self = u64::from(*v);
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for f32 {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::F32(v) => {
                *self = *v;
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for f64 {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::F32(v) => {
                *self = f64::from(*v);
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for char {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::Char(v) => {
                *self = *v;
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for String {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::String(v) => {
                self.clone_from(v);
                true
            }
            ScanValue::Char(v) => {
                self.clear();
                self.push(*v);
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for Vec<u8> {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::String(v) => {
                *self = v.as_bytes().to_vec();
                true
            }
            ScanValue::Char(v) => {
                self.clear();
                // `%c` reads a single byte, so the char is always below 256
                self.push(*v as u8);
                true
            }
            _ => false,
        }
    }
}

impl ScanTarget for usize {
    fn store(&mut self, value: &ScanValue) -> bool {
        match value {
            ScanValue::Position(v) => {
                *self = *v;
                true
            }
            ScanValue::U32(v) => {
                *self = *v as usize;
                true
            }
            _ => false,
        }
    }
}

/// The radix argument that follows the slot of a `%Cv` or `%CV` directive.
///
/// Kept as a plain `i32` so out-of-range bases reach the scanner and are
/// reported as [`ScanError::InvalidFormat`](crate::ScanError::InvalidFormat).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base(pub i32);

/// One positional scan argument.
pub enum Arg<'a> {
    Slot(&'a mut dyn ScanTarget),
    Base(i32),
}

impl<'a, T: ScanTarget> From<&'a mut T> for Arg<'a> {
    fn from(target: &'a mut T) -> Self {
        Arg::Slot(target)
    }
}

impl From<Base> for Arg<'_> {
    fn from(base: Base) -> Self {
        Arg::Base(base.0)
    }
}

impl std::fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Slot(_) => f.write_str("Slot(..)"),
            Arg::Base(b) => f.debug_tuple("Base").field(b).finish(),
        }
    }
}
