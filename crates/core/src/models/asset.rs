use serde::{Deserialize, Serialize};

/// The category of a tracked asset.
///
/// Combined with the symbol it identifies a position — the same ticker
/// string is not guaranteed unique across asset types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Listed equities
    Stock,
    /// Mutual funds / ETFs
    Fund,
    /// Bonds and other fixed income
    Bond,
    /// Anything else (commodities, REITs, ...)
    Other,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Stock => write!(f, "stock"),
            AssetType::Fund => write!(f, "fund"),
            AssetType::Bond => write!(f, "bond"),
            AssetType::Other => write!(f, "other"),
        }
    }
}

/// Composite key identifying a position: `(asset_type, symbol)`.
///
/// A proper tuple key instead of a concatenated string, so symbols shared
/// across asset types (e.g., a stock and a fund both called "VTI") never
/// collide in position or price maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    pub asset_type: AssetType,
    /// Ticker symbol, uppercased (e.g., "AAPL", "510300")
    pub symbol: String,
}

impl AssetKey {
    pub fn new(asset_type: AssetType, symbol: impl Into<String>) -> Self {
        Self {
            asset_type,
            symbol: symbol.into().to_uppercase(),
        }
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.asset_type, self.symbol)
    }
}
