//! Format string compilation.

use crate::error::{ScanError, ScanResult};

/// One parsed unit of a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A run of non-`%` bytes. Skipped without reading input.
    Literal(String),
    /// `%Ro` - Roman numeral into an `i32` slot.
    Roman,
    /// `%Zr` - Zeckendorf code into a `u32` slot.
    Zeckendorf,
    /// `%Cv` or `%CV` - integer in a caller-supplied base into an `i32` slot.
    /// Consumes a destination and then a [`Base`](crate::Base) argument.
    BaseN {
        /// True for `%CV`, whose letter digits are `A-Z`.
        uppercase: bool,
    },
    /// Any other `%c`, handed to the delegate conversions.
    Delegated(char),
}

impl Directive {
    /// Number of arguments this directive takes from the argument list.
    pub fn arity(&self) -> usize {
        match self {
            Directive::Literal(_) => 0,
            Directive::Roman | Directive::Zeckendorf => 1,
            Directive::BaseN { .. } => 2,
            Directive::Delegated('%') => 0,
            Directive::Delegated(_) => 1,
        }
    }
}

/// An ordered, immutable list of directives compiled from one format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatProgram {
    directives: Vec<Directive>,
}

impl FormatProgram {
    /// Compiles `format`.
    ///
    /// The two-letter tags `Ro`, `Zr`, `Cv` and `CV` after `%` select the
    /// numeral directives; any other character after `%` is delegated as is.
    /// Arguments are not counted here.
    ///
    /// # Example
    ///
    /// ```
    /// use overscan::format::{Directive, FormatProgram};
    ///
    /// let program = FormatProgram::compile("%Ro, %CV%d").unwrap();
    /// assert_eq!(
    ///     program.directives(),
    ///     &[
    ///         Directive::Roman,
    ///         Directive::Literal(", ".to_string()),
    ///         Directive::BaseN { uppercase: true },
    ///         Directive::Delegated('d'),
    ///     ]
    /// );
    /// assert_eq!(program.slots(), 4);
    /// ```
    pub fn compile(format: &str) -> ScanResult<FormatProgram> {
        if format.is_empty() {
            return Err(ScanError::EmptyFormat);
        }

        let mut directives = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }
            if !literal.is_empty() {
                directives.push(Directive::Literal(std::mem::take(&mut literal)));
            }

            let tag = chars.next().ok_or(ScanError::InvalidFormat)?;
            let second = chars.peek().copied();
            let directive = match (tag, second) {
                ('R', Some('o')) => Directive::Roman,
                ('Z', Some('r')) => Directive::Zeckendorf,
                ('C', Some('v')) => Directive::BaseN { uppercase: false },
                ('C', Some('V')) => Directive::BaseN { uppercase: true },
                (other, _) => {
                    directives.push(Directive::Delegated(other));
                    continue;
                }
            };
            chars.next();
            directives.push(directive);
        }

        if !literal.is_empty() {
            directives.push(Directive::Literal(literal));
        }

        Ok(FormatProgram { directives })
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Total number of arguments the program consumes.
    pub fn slots(&self) -> usize {
        self.directives.iter().map(Directive::arity).sum()
    }
}
