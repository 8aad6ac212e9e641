//! Uprobe fetch-argument statements
//!
//! A resolved expression such as `+8(+16(%di))` becomes a fetch statement
//! once a target type is appended: `+8(+16(%di)):u64`.
//!
//! Supported types:
//! - `u8`/`u16`/`u32`/`u64`, `s8`/`s16`/`s32`/`s64`: integers
//! - `c8` through `c256`: raw byte strings of 8 to 256 bits

use crate::domain::FetchArgError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Unsigned,
    Signed,
    Chars,
}

impl FetchKind {
    fn prefix(self) -> char {
        match self {
            FetchKind::Unsigned => 'u',
            FetchKind::Signed => 's',
            FetchKind::Chars => 'c',
        }
    }

    fn allows(self, bits: u16) -> bool {
        match self {
            FetchKind::Unsigned | FetchKind::Signed => matches!(bits, 8 | 16 | 32 | 64),
            FetchKind::Chars => matches!(bits, 8 | 16 | 32 | 64 | 128 | 256),
        }
    }
}

/// Target type of a fetch argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchType {
    pub kind: FetchKind,
    pub bits: u16,
}

impl FromStr for FetchType {
    type Err = FetchArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let kind = match chars.next() {
            Some('u') => FetchKind::Unsigned,
            Some('s') => FetchKind::Signed,
            Some('c') => FetchKind::Chars,
            Some(_) => return Err(FetchArgError::UnsupportedKind(s.to_string())),
            None => return Err(FetchArgError::MissingType(s.to_string())),
        };

        let width =
            || FetchArgError::UnsupportedWidth { kind: kind.prefix(), input: s.to_string() };
        let bits: u16 = chars.as_str().parse().map_err(|_| width())?;
        if !kind.allows(bits) {
            return Err(width());
        }

        Ok(Self { kind, bits })
    }
}

impl fmt::Display for FetchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.bits)
    }
}

/// `<expression>:<type>`
#[must_use]
pub fn fetch_statement(expression: &str, fetch_type: FetchType) -> String {
    format!("{expression}:{fetch_type}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_types() {
        let t: FetchType = "u64".parse().unwrap();
        assert_eq!(t, FetchType { kind: FetchKind::Unsigned, bits: 64 });
        assert_eq!("s8".parse::<FetchType>().unwrap().to_string(), "s8");
    }

    #[test]
    fn test_parse_char_types() {
        assert_eq!("c256".parse::<FetchType>().unwrap().bits, 256);
        assert!("u128".parse::<FetchType>().is_err());
    }

    #[test]
    fn test_reject_bad_types() {
        assert_eq!("".parse::<FetchType>(), Err(FetchArgError::MissingType(String::new())));
        assert_eq!(
            "x64".parse::<FetchType>(),
            Err(FetchArgError::UnsupportedKind("x64".to_string()))
        );
        assert!(matches!(
            "u12".parse::<FetchType>(),
            Err(FetchArgError::UnsupportedWidth { kind: 'u', .. })
        ));
        assert!("u".parse::<FetchType>().is_err());
    }

    #[test]
    fn test_fetch_statement() {
        let t: FetchType = "u64".parse().unwrap();
        assert_eq!(fetch_statement("+8(+16(%di))", t), "+8(+16(%di)):u64");
    }
}
