use std::sync::Arc;

use crate::domain::{FetchResult, SourceName};
use crate::errors::TenderResult;
use crate::sources::fetcher::fetch_source;
use crate::sources::profile::SourceProfile;
use crate::sources::traits::{NoticeClient, TenderSource};

/// A procurement API described by a profile and reached through a shared client
pub struct ApiSource {
    profile: SourceProfile,
    client: Arc<dyn NoticeClient>,
}

impl ApiSource {
    pub fn new(profile: SourceProfile, client: Arc<dyn NoticeClient>) -> Self {
        Self { profile, client }
    }
}

impl TenderSource for ApiSource {
    fn name(&self) -> SourceName {
        self.profile.name
    }

    fn fetch(&self) -> TenderResult<FetchResult> {
        fetch_source(&self.profile, self.client.as_ref())
    }
}
