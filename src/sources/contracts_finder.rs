use crate::domain::SourceName;
use crate::sources::profile::{BuyerRule, DedupTiming, DescriptionRule, RequestPlan, SourceProfile};

pub const LINK_TEMPLATE: &str = "https://www.contractsfinder.service.gov.uk/Notice/{id}";

/// Cursor-paginated OCDS search; matches are deduplicated by id after filtering
pub fn profile(start_url: &str, max_records: usize) -> SourceProfile {
    SourceProfile {
        name: SourceName::ContractsFinder,
        plan: RequestPlan::Cursor {
            start_url: start_url.to_string(),
            max_records,
        },
        description: DescriptionRule::TenderThenRelease,
        buyer: BuyerRule::BuyerOnly,
        dedup: DedupTiming::AfterFilter,
        link_template: LINK_TEMPLATE.to_string(),
    }
}
