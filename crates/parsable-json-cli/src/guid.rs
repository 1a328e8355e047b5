use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A 128-bit identifier written as 32 hex digits in `8-4-4-4-12` groups.
///
/// Parsing accepts either case; formatting is always lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid(u128);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGuidError {
    #[error("expected 5 hyphen-separated groups of 8-4-4-4-12 digits")]
    Shape,
    #[error("non-hex character {0:?}")]
    Digit(char),
}

const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

impl Guid {
    pub const fn from_u128(bits: u128) -> Self {
        Self(bits)
    }

    pub const fn as_u128(&self) -> u128 {
        self.0
    }
}

impl FromStr for Guid {
    type Err = ParseGuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = s.split('-').collect();
        if !groups.iter().map(|g| g.len()).eq(GROUPS) {
            return Err(ParseGuidError::Shape);
        }
        let mut bits = 0u128;
        for c in groups.concat().chars() {
            let digit = c.to_digit(16).ok_or(ParseGuidError::Digit(c))?;
            bits = (bits << 4) | u128::from(digit);
        }
        Ok(Self(bits))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = format!("{:032x}", self.0);
        let mut start = 0;
        for (i, len) in GROUPS.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            f.write_str(&hex[start..start + len])?;
            start += len;
        }
        Ok(())
    }
}
