//! Asset class definitions and per-class return defaults

use serde::{Deserialize, Serialize};

/// The five asset classes a plan allocates contributions across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Stocks,
    Bonds,
    RealEstate,
    Crypto,
    FixedDeposit,
}

impl AssetKind {
    /// All asset kinds in canonical (reporting) order
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Stocks,
        AssetKind::Bonds,
        AssetKind::RealEstate,
        AssetKind::Crypto,
        AssetKind::FixedDeposit,
    ];

    /// Ticker symbol used to estimate a live monthly return.
    /// Real estate, crypto, and fixed deposits have no live source and
    /// always use the fallback rate.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            AssetKind::Stocks => Some("SPY"),
            AssetKind::Bonds => Some("AGG"),
            AssetKind::RealEstate | AssetKind::Crypto | AssetKind::FixedDeposit => None,
        }
    }

    /// Fixed monthly rate substituted when no live estimate is available
    pub fn fallback_monthly_return(&self) -> f64 {
        match self {
            AssetKind::Stocks => 0.01,
            AssetKind::Bonds => 0.003,
            AssetKind::RealEstate => 0.004,
            AssetKind::Crypto => 0.02,
            AssetKind::FixedDeposit => 0.003,
        }
    }

    /// Column/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Stocks => "Stocks",
            AssetKind::Bonds => "Bonds",
            AssetKind::RealEstate => "RealEstate",
            AssetKind::Crypto => "Crypto",
            AssetKind::FixedDeposit => "FixedDeposit",
        }
    }

    /// Index into per-asset arrays (matches `ALL` ordering)
    pub fn index(&self) -> usize {
        match self {
            AssetKind::Stocks => 0,
            AssetKind::Bonds => 1,
            AssetKind::RealEstate => 2,
            AssetKind::Crypto => 3,
            AssetKind::FixedDeposit => 4,
        }
    }
}
