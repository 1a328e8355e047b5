use std::fmt;
use std::str::FromStr;

/// 128-bit identifier in `8-4-4-4-12` hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid(pub u128);

#[derive(Debug, PartialEq, Eq)]
pub struct GuidError;

impl fmt::Display for GuidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected 32 hex digits in 8-4-4-4-12 groups")
    }
}

impl std::error::Error for GuidError {}

impl FromStr for Guid {
    type Err = GuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = s.split('-').collect();
        if !groups.iter().map(|g| g.len()).eq([8usize, 4, 4, 4, 12]) {
            return Err(GuidError);
        }
        let hex = groups.concat();
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GuidError);
        }
        u128::from_str_radix(&hex, 16).map(Guid).map_err(|_| GuidError)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = format!("{:032x}", self.0);
        write!(
            f,
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}
