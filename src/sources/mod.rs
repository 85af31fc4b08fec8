pub mod api_source;
pub mod contracts_finder;
pub mod fetcher;
pub mod find_a_tender;
pub mod http;
pub mod profile;
pub mod registry;
pub mod sell2wales;
pub mod traits;

pub use api_source::ApiSource;
pub use http::HttpNoticeClient;
pub use registry::SourceRegistry;
pub use traits::{NoticeClient, TenderSource};
