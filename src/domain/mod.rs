pub mod keywords;
pub mod notice;
pub mod report;
pub mod source;
pub mod tender;

pub use notice::{NoticePage, RawNotice};
pub use report::{AggregateReport, FetchResult, SourceStats, StatsTable};
pub use source::SourceName;
pub use tender::{NormalizedTender, NOT_SPECIFIED};
