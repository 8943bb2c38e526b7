//! Ticker symbols and query parsing helpers shared between feed and UI.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Trait providing search-query parsing for tickers.
pub trait QueryParser {
    /// Parses a comma-separated search query into ticker symbols.
    ///
    /// Each token is trimmed and matched case-insensitively against the
    /// supported symbols. Empty tokens, unrecognized tokens, and repeats are
    /// skipped; an unrecognized token simply cannot match any dataset entry.
    fn parse_query(raw: &str) -> Vec<Ticker>;
}

impl QueryParser for Ticker {
    fn parse_query(raw: &str) -> Vec<Self> {
        let mut tickers = Vec::new();

        for token in raw.split(',') {
            let trimmed_token = token.trim();
            if trimmed_token.is_empty() {
                continue;
            }

            if let Ok(ticker) = trimmed_token.parse::<Self>() {
                if !tickers.contains(&ticker) {
                    tickers.push(ticker);
                }
            }
        }
        tickers
    }
}

/// Set of supported ticker symbols.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    PFE,
    AMZN,
    ADBE,
    IBM,
    MA,
    T,
    HD,
    WMT,
    GS,
    PEP,
    TXN,
    META,
    NFLX,
    V,
    COST,
    AAPL,
    MSFT,
    UNH,
    NVDA,
    LOW,
    NKE,
    HON,
    #[strum(serialize = "BRK.A")]
    #[serde(rename = "BRK.A")]
    BRKA,
    JPM,
    BAC,
    AMD,
    UPS,
    ORCL,
    PG,
    CAT,
    TSLA,
    GE,
    GOOGL,
    DIS,
    SBUX,
    INTC,
    MS,
    CRM,
    XOM,
    CVX,
    PYPL,
    QCOM,
    JNJ,
    CSCO,
    MDT,
    LLY,
    KO,
    ABBV,
    DHR,
}

impl Ticker {
    /// All supported symbols, in a stable order.
    pub const ALL: [Ticker; 49] = [
        Ticker::PFE,
        Ticker::AMZN,
        Ticker::ADBE,
        Ticker::IBM,
        Ticker::MA,
        Ticker::T,
        Ticker::HD,
        Ticker::WMT,
        Ticker::GS,
        Ticker::PEP,
        Ticker::TXN,
        Ticker::META,
        Ticker::NFLX,
        Ticker::V,
        Ticker::COST,
        Ticker::AAPL,
        Ticker::MSFT,
        Ticker::UNH,
        Ticker::NVDA,
        Ticker::LOW,
        Ticker::NKE,
        Ticker::HON,
        Ticker::BRKA,
        Ticker::JPM,
        Ticker::BAC,
        Ticker::AMD,
        Ticker::UPS,
        Ticker::ORCL,
        Ticker::PG,
        Ticker::CAT,
        Ticker::TSLA,
        Ticker::GE,
        Ticker::GOOGL,
        Ticker::DIS,
        Ticker::SBUX,
        Ticker::INTC,
        Ticker::MS,
        Ticker::CRM,
        Ticker::XOM,
        Ticker::CVX,
        Ticker::PYPL,
        Ticker::QCOM,
        Ticker::JNJ,
        Ticker::CSCO,
        Ticker::MDT,
        Ticker::LLY,
        Ticker::KO,
        Ticker::ABBV,
        Ticker::DHR,
    ];
}
