//! Native-currency balances.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Smallest native units per display unit (lamports per SOL).
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Balance of one address, or the explicit marker for a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Balance {
    Known(Decimal),
    Unknown,
}

impl Balance {
    /// Convert an integer amount of lamports into a display balance.
    #[must_use]
    pub fn from_lamports(lamports: u64) -> Self {
        Self::Known(Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL))
    }

    #[must_use]
    pub fn known(&self) -> Option<Decimal> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => write!(f, "{}", value.normalize()),
            Self::Unknown => write!(f, "Error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lamports_convert_exactly() {
        assert_eq!(
            Balance::from_lamports(1_500_000_000),
            Balance::Known(dec!(1.5))
        );
        assert_eq!(Balance::from_lamports(1), Balance::Known(dec!(0.000000001)));
    }

    #[test]
    fn unknown_renders_as_error() {
        assert_eq!(Balance::Unknown.to_string(), "Error");
        assert_eq!(Balance::from_lamports(200_000_000).to_string(), "0.2");
    }
}
