use std::any::Any;
use std::thread;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{error, info};

use crate::domain::{AggregateReport, FetchResult, NormalizedTender, SourceName, SourceStats, StatsTable};
use crate::errors::{TenderError, TenderResult};
use crate::sources::SourceRegistry;

/// Runs every registered source and folds the results into one report
pub struct AggregateService {
    registry: SourceRegistry,
}

impl AggregateService {
    pub fn new(registry: SourceRegistry) -> Self {
        Self { registry }
    }

    /// Fetch all sources concurrently, then merge, sort and summarize
    pub fn run(&self) -> AggregateReport {
        let outcomes = self.fetch_all();
        Self::assemble(outcomes, Utc::now())
    }

    /// One scoped thread per source; outcomes come back in registry order.
    /// A panicking source is reported as a failed source.
    pub fn fetch_all(&self) -> Vec<(SourceName, TenderResult<FetchResult>)> {
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .registry
                .sources()
                .iter()
                .map(|source| {
                    let name = source.name();
                    info!(source = %name, "fetching");
                    (name, scope.spawn(move || source.fetch()))
                })
                .collect();

            handles
                .into_iter()
                .map(|(name, handle)| {
                    let outcome = handle
                        .join()
                        .unwrap_or_else(|payload| Err(TenderError::Source(panic_message(payload))));
                    (name, outcome)
                })
                .collect()
        })
    }

    /// Build the report from per-source outcomes taken in merge order
    pub fn assemble(
        outcomes: Vec<(SourceName, TenderResult<FetchResult>)>,
        now: DateTime<Utc>,
    ) -> AggregateReport {
        let mut stats = StatsTable::new();
        let mut tenders = Vec::new();

        for (name, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    info!(
                        source = %name,
                        fetched = result.raw_count,
                        energy_related = result.filtered_count,
                        failed_requests = result.failed_requests,
                        "source complete"
                    );
                    stats.insert(name, SourceStats::succeeded(&result));
                    tenders.extend(result.records);
                }
                Err(e) => {
                    error!(source = %name, error = %e, "source failed");
                    stats.insert(name, SourceStats::failed(e.to_string()));
                }
            }
        }

        sort_by_deadline(&mut tenders);

        AggregateReport {
            last_updated: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            stats,
            total_energy_tenders: tenders.len(),
            tenders,
        }
    }
}

/// Stable sort: dated deadlines ascending, then unparseable ones, then
/// "Not specified"; ties keep their merge order
pub fn sort_by_deadline(tenders: &mut [NormalizedTender]) {
    tenders.sort_by_key(|t| t.deadline_order());
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("fetcher panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("fetcher panicked: {}", msg)
    } else {
        "fetcher panicked".to_string()
    }
}
