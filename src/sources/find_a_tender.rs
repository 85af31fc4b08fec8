use crate::domain::SourceName;
use crate::sources::profile::{BuyerRule, DedupTiming, DescriptionRule, RequestPlan, SourceProfile};

pub const LINK_TEMPLATE: &str = "https://www.find-tender.service.gov.uk/Notice/{id}";

/// Cursor-paginated release packages. Pages are assumed unique, so no dedup.
pub fn profile(start_url: &str, max_records: usize) -> SourceProfile {
    SourceProfile {
        name: SourceName::FindATender,
        plan: RequestPlan::Cursor {
            start_url: start_url.to_string(),
            max_records,
        },
        description: DescriptionRule::TenderThenRelease,
        buyer: BuyerRule::BuyerThenParties,
        dedup: DedupTiming::Never,
        link_template: LINK_TEMPLATE.to_string(),
    }
}
