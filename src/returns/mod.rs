//! Return estimation from an external monthly quote source
//!
//! Estimates a periodic (monthly) rate of return per asset class from the
//! two most recent adjusted closes of a monthly time series. Any failure —
//! transport error, non-success status, malformed payload, short series —
//! degrades to "no estimate available" and the caller substitutes a fixed
//! fallback rate; estimation never fails a projection run.
//!
//! One network call per invocation, no retry, no caching. Repeated calls in
//! a session may re-fetch and return different values if the remote series
//! updates mid-session; live rates are a documented source of
//! non-determinism.

mod alpha_vantage;

pub use alpha_vantage::AlphaVantageClient;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::AssetKind;

/// Errors from the external quote source
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote transport error: {0}")]
    Transport(String),

    #[error("quote source returned HTTP {0}")]
    Status(u16),

    #[error("malformed quote payload: {0}")]
    MalformedPayload(String),

    #[error("quote series too short: {0} entries")]
    ShortSeries(usize),
}

/// Seam for the external monthly time-series source
pub trait QuoteSource {
    /// Monthly adjusted closes for a symbol, ordered newest-first
    fn monthly_adjusted_closes(&self, symbol: &str) -> Result<Vec<f64>, QuoteError>;
}

/// Estimate the monthly rate of return for a symbol from the two most
/// recent closes: `(newest - previous) / previous`.
///
/// Returns `None` when no estimate is available, never an error.
pub fn estimate_monthly_return(source: &dyn QuoteSource, symbol: &str) -> Option<f64> {
    let closes = match source.monthly_adjusted_closes(symbol) {
        Ok(closes) => closes,
        Err(e) => {
            warn!("no return estimate for {}: {}", symbol, e);
            return None;
        }
    };

    if closes.len() < 2 {
        warn!("no return estimate for {}: series has {} entries", symbol, closes.len());
        return None;
    }

    let (latest, previous) = (closes[0], closes[1]);
    if previous == 0.0 {
        warn!("no return estimate for {}: previous close is zero", symbol);
        return None;
    }
    Some((latest - previous) / previous)
}

/// Monthly return assumptions per asset class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnAssumptions {
    /// Rates indexed per `AssetKind::ALL`
    rates: [f64; 5],
}

impl ReturnAssumptions {
    /// Assumptions using the documented fallback rate for every class
    pub fn fallbacks() -> Self {
        let mut rates = [0.0; 5];
        for kind in AssetKind::ALL {
            rates[kind.index()] = kind.fallback_monthly_return();
        }
        Self { rates }
    }

    /// Assumptions from explicit rates, indexed per `AssetKind::ALL`
    pub fn from_rates(rates: [f64; 5]) -> Self {
        Self { rates }
    }

    /// Resolve assumptions against a live quote source.
    ///
    /// Asset classes with a ticker symbol attempt a live estimate and fall
    /// back to the fixed rate when none is available; classes without a
    /// live source always use the fallback. Lookups run sequentially, one
    /// fetch per class.
    pub fn from_source(source: &dyn QuoteSource) -> Self {
        let mut assumptions = Self::fallbacks();
        for kind in AssetKind::ALL {
            if let Some(symbol) = kind.symbol() {
                if let Some(rate) = estimate_monthly_return(source, symbol) {
                    assumptions.rates[kind.index()] = rate;
                }
            }
        }
        assumptions
    }

    /// Monthly rate for an asset class
    pub fn rate(&self, kind: AssetKind) -> f64 {
        self.rates[kind.index()]
    }

    /// Override the rate for an asset class
    pub fn set_rate(&mut self, kind: AssetKind, rate: f64) {
        self.rates[kind.index()] = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Quote source stub returning a canned series per symbol
    struct StubSource {
        closes: Vec<f64>,
    }

    impl QuoteSource for StubSource {
        fn monthly_adjusted_closes(&self, _symbol: &str) -> Result<Vec<f64>, QuoteError> {
            Ok(self.closes.clone())
        }
    }

    /// Quote source stub that always fails, e.g. an HTTP 500
    struct FailingSource;

    impl QuoteSource for FailingSource {
        fn monthly_adjusted_closes(&self, _symbol: &str) -> Result<Vec<f64>, QuoteError> {
            Err(QuoteError::Status(500))
        }
    }

    #[test]
    fn test_estimate_from_two_most_recent_closes() {
        let source = StubSource {
            closes: vec![101.0, 100.0, 90.0],
        };
        let rate = estimate_monthly_return(&source, "SPY").unwrap();
        assert_relative_eq!(rate, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_estimate_negative_return() {
        let source = StubSource {
            closes: vec![95.0, 100.0],
        };
        let rate = estimate_monthly_return(&source, "SPY").unwrap();
        assert_relative_eq!(rate, -0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_http_failure_yields_unavailable() {
        assert!(estimate_monthly_return(&FailingSource, "SPY").is_none());
    }

    #[test]
    fn test_single_entry_series_yields_unavailable() {
        let source = StubSource {
            closes: vec![100.0],
        };
        assert!(estimate_monthly_return(&source, "SPY").is_none());
    }

    #[test]
    fn test_zero_previous_close_yields_unavailable() {
        let source = StubSource {
            closes: vec![100.0, 0.0],
        };
        assert!(estimate_monthly_return(&source, "SPY").is_none());
    }

    #[test]
    fn test_fallback_assumptions() {
        let assumptions = ReturnAssumptions::fallbacks();
        for kind in AssetKind::ALL {
            assert_eq!(assumptions.rate(kind), kind.fallback_monthly_return());
        }
    }

    #[test]
    fn test_from_source_substitutes_fallbacks_on_failure() {
        let assumptions = ReturnAssumptions::from_source(&FailingSource);
        for kind in AssetKind::ALL {
            assert_eq!(assumptions.rate(kind), kind.fallback_monthly_return());
        }
    }

    #[test]
    fn test_from_source_uses_live_rates_where_available() {
        let source = StubSource {
            closes: vec![102.0, 100.0],
        };
        let assumptions = ReturnAssumptions::from_source(&source);

        // Stocks and bonds have live symbols and pick up the 2% estimate
        assert_relative_eq!(assumptions.rate(AssetKind::Stocks), 0.02, epsilon = 1e-12);
        assert_relative_eq!(assumptions.rate(AssetKind::Bonds), 0.02, epsilon = 1e-12);
        // The rest have no live source and keep their fallbacks
        assert_eq!(
            assumptions.rate(AssetKind::RealEstate),
            AssetKind::RealEstate.fallback_monthly_return()
        );
        assert_eq!(
            assumptions.rate(AssetKind::Crypto),
            AssetKind::Crypto.fallback_monthly_return()
        );
        assert_eq!(
            assumptions.rate(AssetKind::FixedDeposit),
            AssetKind::FixedDeposit.fallback_monthly_return()
        );
    }

    #[test]
    fn test_set_rate_override() {
        let mut assumptions = ReturnAssumptions::fallbacks();
        assumptions.set_rate(AssetKind::Crypto, 0.0);
        assert_eq!(assumptions.rate(AssetKind::Crypto), 0.0);
        assert_eq!(assumptions.rate(AssetKind::Stocks), 0.01);
    }
}
