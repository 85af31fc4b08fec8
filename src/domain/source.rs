use serde::Serialize;

/// The procurement APIs a run pulls from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceName {
    Sell2Wales,
    FindATender,
    ContractsFinder,
}

impl SourceName {
    pub const ALL: [SourceName; 3] = [
        SourceName::Sell2Wales,
        SourceName::FindATender,
        SourceName::ContractsFinder,
    ];

    /// Human-readable label for console output
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::Sell2Wales => "Sell2Wales",
            SourceName::FindATender => "Find a Tender",
            SourceName::ContractsFinder => "Contracts Finder",
        }
    }

    /// Key used in the report's `stats` object
    pub fn stats_key(&self) -> &'static str {
        match self {
            SourceName::Sell2Wales => "sell2Wales",
            SourceName::FindATender => "findATender",
            SourceName::ContractsFinder => "contractsFinder",
        }
    }
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
