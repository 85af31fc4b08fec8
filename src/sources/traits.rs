use crate::domain::{FetchResult, NoticePage, SourceName};
use crate::errors::TenderResult;

/// Fetches one page of notices from a URL
#[cfg_attr(test, mockall::automock)]
pub trait NoticeClient: Send + Sync {
    fn get_page(&self, url: &str) -> TenderResult<NoticePage>;
}

/// A procurement API the aggregator can pull tenders from
#[cfg_attr(test, mockall::automock)]
pub trait TenderSource: Send + Sync {
    /// Identifies this source in stats and on every record
    fn name(&self) -> SourceName;

    /// Enumerate, filter and normalize everything this source offers.
    /// Per-request failures are absorbed; an `Err` means the whole source failed.
    fn fetch(&self) -> TenderResult<FetchResult>;
}
