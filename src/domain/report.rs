use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{NormalizedTender, SourceName};

/// What one source fetch produced
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// Raw records considered, after any pre-filter dedup
    pub raw_count: usize,
    pub filtered_count: usize,
    pub records: Vec<NormalizedTender>,
    /// Requests that failed and were skipped or ended pagination
    pub failed_requests: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStats {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fetched: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_related: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceStats {
    pub fn succeeded(result: &FetchResult) -> Self {
        Self {
            success: true,
            total_fetched: Some(result.raw_count),
            energy_related: Some(result.filtered_count),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            total_fetched: None,
            energy_related: None,
            error: Some(error.into()),
        }
    }
}

/// Per-source stats, serialized as an object keyed in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable(Vec<(SourceName, SourceStats)>);

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: SourceName, stats: SourceStats) {
        match self.0.iter_mut().find(|(name, _)| *name == source) {
            Some(entry) => entry.1 = stats,
            None => self.0.push((source, stats)),
        }
    }

    pub fn get(&self, source: SourceName) -> Option<&SourceStats> {
        self.0
            .iter()
            .find(|(name, _)| *name == source)
            .map(|(_, stats)| stats)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SourceName, SourceStats)> {
        self.0.iter()
    }
}

impl Serialize for StatsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (source, stats) in &self.0 {
            map.serialize_entry(source.stats_key(), stats)?;
        }
        map.end()
    }
}

/// The document written to disk at the end of a run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub last_updated: String,
    pub stats: StatsTable,
    pub tenders: Vec<NormalizedTender>,
    pub total_energy_tenders: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serialize_by_outcome() {
        let ok = FetchResult {
            raw_count: 40,
            filtered_count: 3,
            ..Default::default()
        };

        let json = serde_json::to_value(SourceStats::succeeded(&ok)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "totalFetched": 40, "energyRelated": 3})
        );

        let json = serde_json::to_value(SourceStats::failed("timed out")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "timed out"}));
    }

    #[test]
    fn test_stats_table_keeps_insertion_order() {
        let mut table = StatsTable::new();
        table.insert(SourceName::Sell2Wales, SourceStats::failed("a"));
        table.insert(SourceName::FindATender, SourceStats::failed("b"));
        table.insert(SourceName::ContractsFinder, SourceStats::failed("c"));
        table.insert(SourceName::Sell2Wales, SourceStats::failed("replaced"));

        let json = serde_json::to_string(&table).unwrap();
        let s2w = json.find("sell2Wales").unwrap();
        let fat = json.find("findATender").unwrap();
        let cf = json.find("contractsFinder").unwrap();
        assert!(s2w < fat && fat < cf);

        assert_eq!(
            table.get(SourceName::Sell2Wales).unwrap().error.as_deref(),
            Some("replaced")
        );
    }
}
