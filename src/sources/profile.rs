//! Per-source settings consumed by the generic fetcher.

use crate::domain::keywords;
use crate::domain::tender::{
    format_value, truncate_chars, DESCRIPTION_LIMIT, NOT_SPECIFIED, NO_TITLE, UNKNOWN_BUYER,
};
use crate::domain::{NormalizedTender, RawNotice, SourceName};

/// How a source's requests are enumerated
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPlan {
    /// One GET per query-parameter cell against a fixed endpoint, no pagination
    Grid {
        base_url: String,
        cells: Vec<Vec<(String, String)>>,
    },
    /// Follow `links.next` from a start URL until it runs out or the cap is reached
    Cursor {
        start_url: String,
        max_records: usize,
    },
}

/// When records sharing an id are collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupTiming {
    BeforeFilter,
    AfterFilter,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionRule {
    TenderOnly,
    /// Tender description, else the release-level one
    TenderThenRelease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyerRule {
    BuyerOnly,
    /// `buyer.name`, else the first party with the `buyer` role
    BuyerThenParties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceProfile {
    pub name: SourceName,
    pub plan: RequestPlan,
    pub description: DescriptionRule,
    pub buyer: BuyerRule,
    pub dedup: DedupTiming,
    /// Public notice link; `{id}` is replaced with the notice id
    pub link_template: String,
}

impl SourceProfile {
    pub fn description_of<'a>(&self, notice: &'a RawNotice) -> Option<&'a str> {
        match self.description {
            DescriptionRule::TenderOnly => notice.tender_description(),
            DescriptionRule::TenderThenRelease => notice.any_description(),
        }
    }

    pub fn buyer_of<'a>(&self, notice: &'a RawNotice) -> Option<&'a str> {
        match self.buyer {
            BuyerRule::BuyerOnly => notice.buyer_name(),
            BuyerRule::BuyerThenParties => notice
                .buyer_name()
                .or_else(|| notice.buyer_party_name()),
        }
    }

    /// Text the keyword matcher runs over: title, a space, description
    pub fn match_text(&self, notice: &RawNotice) -> String {
        format!(
            "{} {}",
            notice.tender_title().unwrap_or_default(),
            self.description_of(notice).unwrap_or_default()
        )
    }

    pub fn is_relevant(&self, notice: &RawNotice) -> bool {
        keywords::matches(&self.match_text(notice))
    }

    pub fn link_for(&self, id: &str) -> String {
        self.link_template.replace("{id}", id)
    }

    pub fn normalize(&self, notice: &RawNotice) -> NormalizedTender {
        let id = notice.id.clone().unwrap_or_default();

        NormalizedTender {
            url: self.link_for(&id),
            id,
            title: notice.tender_title().unwrap_or(NO_TITLE).to_string(),
            description: truncate_chars(
                self.description_of(notice).unwrap_or_default(),
                DESCRIPTION_LIMIT,
            ),
            buyer: self.buyer_of(notice).unwrap_or(UNKNOWN_BUYER).to_string(),
            value: format_value(notice.amount()),
            deadline: notice.end_date().unwrap_or(NOT_SPECIFIED).to_string(),
            source: self.name,
            publish_date: notice.published().unwrap_or(NOT_SPECIFIED).to_string(),
        }
    }
}
