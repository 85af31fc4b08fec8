//! Generic enumerate → dedup → filter → normalize routine shared by every source.

use std::collections::HashMap;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{FetchResult, NoticePage, RawNotice};
use crate::errors::TenderResult;
use crate::sources::profile::{DedupTiming, RequestPlan, SourceProfile};
use crate::sources::traits::NoticeClient;

/// Outcome of a single request
#[derive(Debug)]
pub enum Attempt {
    Fetched(NoticePage),
    Failed(String),
}

impl Attempt {
    pub fn run(client: &dyn NoticeClient, url: &str) -> Self {
        match client.get_page(url) {
            Ok(page) => Attempt::Fetched(page),
            Err(e) => Attempt::Failed(e.to_string()),
        }
    }
}

/// Raw notices gathered by a request plan
#[derive(Debug, Default)]
struct Collected {
    notices: Vec<RawNotice>,
    failed_requests: usize,
}

pub fn fetch_source(profile: &SourceProfile, client: &dyn NoticeClient) -> TenderResult<FetchResult> {
    let collected = match &profile.plan {
        RequestPlan::Grid { base_url, cells } => collect_grid(profile, client, base_url, cells)?,
        RequestPlan::Cursor {
            start_url,
            max_records,
        } => collect_cursor(profile, client, start_url, *max_records),
    };

    let raw = match profile.dedup {
        DedupTiming::BeforeFilter => dedup_by_id(collected.notices),
        DedupTiming::AfterFilter | DedupTiming::Never => collected.notices,
    };
    let raw_count = raw.len();

    let mut matched: Vec<RawNotice> = raw
        .into_iter()
        .filter(|notice| profile.is_relevant(notice))
        .collect();

    if profile.dedup == DedupTiming::AfterFilter {
        matched = dedup_by_id(matched);
    }

    let records: Vec<_> = matched.iter().map(|notice| profile.normalize(notice)).collect();

    debug!(
        source = %profile.name,
        raw = raw_count,
        matched = records.len(),
        failed = collected.failed_requests,
        "source fetch finished"
    );

    Ok(FetchResult {
        raw_count,
        filtered_count: records.len(),
        records,
        failed_requests: collected.failed_requests,
    })
}

fn collect_grid(
    profile: &SourceProfile,
    client: &dyn NoticeClient,
    base_url: &str,
    cells: &[Vec<(String, String)>],
) -> TenderResult<Collected> {
    let mut collected = Collected::default();

    for cell in cells {
        let url = Url::parse_with_params(base_url, cell)?;

        match Attempt::run(client, url.as_str()) {
            Attempt::Fetched(page) => {
                debug!(source = %profile.name, %url, count = page.releases.len(), "fetched cell");
                collected.notices.extend(page.releases);
            }
            Attempt::Failed(reason) => {
                warn!(source = %profile.name, %url, %reason, "request failed, skipping");
                collected.failed_requests += 1;
            }
        }
    }

    Ok(collected)
}

fn collect_cursor(
    profile: &SourceProfile,
    client: &dyn NoticeClient,
    start_url: &str,
    max_records: usize,
) -> Collected {
    let mut collected = Collected::default();
    let mut next = Some(start_url.to_string());

    while let Some(url) = next.take() {
        if collected.notices.len() >= max_records {
            debug!(source = %profile.name, max_records, "record cap reached");
            break;
        }

        match Attempt::run(client, &url) {
            Attempt::Fetched(page) => {
                debug!(source = %profile.name, %url, count = page.releases.len(), "fetched page");
                next = page.next_cursor().map(str::to_string);
                collected.notices.extend(page.releases);

                if next.as_deref() == Some(url.as_str()) {
                    warn!(source = %profile.name, %url, "next link points back at the same page, stopping pagination");
                    next = None;
                }
            }
            Attempt::Failed(reason) => {
                warn!(source = %profile.name, %url, %reason, "request failed, stopping pagination");
                collected.failed_requests += 1;
            }
        }
    }

    collected
}

/// Collapse notices sharing an id. The last one seen wins but keeps the
/// position where that id first appeared. Notices without an id share a key.
pub fn dedup_by_id(notices: Vec<RawNotice>) -> Vec<RawNotice> {
    let mut positions: HashMap<Option<String>, usize> = HashMap::new();
    let mut unique: Vec<RawNotice> = Vec::with_capacity(notices.len());

    for notice in notices {
        match positions.get(&notice.id) {
            Some(&idx) => unique[idx] = notice,
            None => {
                positions.insert(notice.id.clone(), unique.len());
                unique.push(notice);
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceName;
    use crate::errors::TenderError;
    use crate::sources::profile::{BuyerRule, DescriptionRule};
    use crate::sources::traits::MockNoticeClient;
    use crate::sources::{contracts_finder, find_a_tender, sell2wales};
    use chrono::NaiveDate;

    fn release(id: &str, title: &str) -> serde_json::Value {
        serde_json::json!({"id": id, "tender": {"title": title}})
    }

    fn page(releases: Vec<serde_json::Value>, next: Option<&str>) -> NoticePage {
        let mut json = serde_json::json!({ "releases": releases });
        if let Some(next) = next {
            json["links"] = serde_json::json!({ "next": next });
        }
        serde_json::from_value(json).unwrap()
    }

    fn notice(id: &str, title: &str) -> RawNotice {
        serde_json::from_value(release(id, title)).unwrap()
    }

    fn cursor_profile(dedup: DedupTiming, max_records: usize) -> SourceProfile {
        SourceProfile {
            name: SourceName::ContractsFinder,
            plan: RequestPlan::Cursor {
                start_url: "https://api.test/page/0".to_string(),
                max_records,
            },
            description: DescriptionRule::TenderThenRelease,
            buyer: BuyerRule::BuyerOnly,
            dedup,
            link_template: "https://api.test/Notice/{id}".to_string(),
        }
    }

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_dedup_keeps_last_record_at_first_position() {
        let deduped = dedup_by_id(vec![
            notice("a", "first a"),
            notice("b", "only b"),
            notice("a", "second a"),
        ]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id.as_deref(), Some("a"));
        assert_eq!(deduped[0].tender_title(), Some("second a"));
        assert_eq!(deduped[1].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_dedup_collapses_missing_ids() {
        let anonymous: RawNotice = serde_json::from_str(r#"{"tender": {"title": "x"}}"#).unwrap();
        let deduped = dedup_by_id(vec![anonymous.clone(), anonymous]);
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn test_sell2wales_grid_end_to_end() {
        let mut client = MockNoticeClient::new();
        client.expect_get_page().times(24).returning(|url| {
            // Both notices show up in every cell; dedup leaves two
            assert!(url.starts_with("https://api.sell2wales.gov.wales/v1/Notices?"));
            Ok(page(
                vec![
                    release("s2w-1", "Battery storage for schools"),
                    release("s2w-2", "Grounds maintenance"),
                ],
                None,
            ))
        });

        let profile = sell2wales::profile("https://api.sell2wales.gov.wales", anchor());
        let result = fetch_source(&profile, &client).unwrap();

        assert_eq!(result.raw_count, 2);
        assert_eq!(result.filtered_count, 1);
        assert_eq!(result.records.len(), 1);

        let record = &result.records[0];
        assert_eq!(record.id, "s2w-1");
        assert_eq!(record.source, SourceName::Sell2Wales);
        assert_eq!(
            record.url,
            "https://www.sell2wales.gov.wales/search/show/search_view.aspx?ID=s2w-1"
        );
    }

    #[test]
    fn test_grid_skips_failed_cells() {
        let mut client = MockNoticeClient::new();
        client.expect_get_page().times(24).returning(|url| {
            if url.contains("noticeType=2") {
                Err(TenderError::HttpStatus {
                    status: 503,
                    url: url.to_string(),
                })
            } else if url.contains("noticeType=7") && url.contains("dateFrom=03-2025") {
                Ok(page(vec![release("late", "Lithium cells")], None))
            } else {
                Ok(page(vec![], Some("https://ignored.test/next")))
            }
        });

        let profile = sell2wales::profile("https://api.sell2wales.gov.wales", anchor());
        let result = fetch_source(&profile, &client).unwrap();

        assert_eq!(result.failed_requests, 6);
        assert_eq!(result.raw_count, 1);
        assert_eq!(result.filtered_count, 1);
    }

    #[test]
    fn test_grid_with_bad_base_url_fails_the_source() {
        let client = MockNoticeClient::new();
        let profile = sell2wales::profile("not a url", anchor());

        let result = fetch_source(&profile, &client);
        assert!(matches!(result, Err(TenderError::InvalidUrl(_))));
    }

    #[test]
    fn test_cursor_follows_next_until_absent() {
        let mut client = MockNoticeClient::new();
        client
            .expect_get_page()
            .withf(|url| url == "https://api.test/page/0")
            .times(1)
            .returning(|_| {
                Ok(page(
                    vec![release("1", "EV charging points")],
                    Some("https://api.test/page/1"),
                ))
            });
        client
            .expect_get_page()
            .withf(|url| url == "https://api.test/page/1")
            .times(1)
            .returning(|_| Ok(page(vec![release("2", "Road resurfacing")], None)));

        let result = fetch_source(&cursor_profile(DedupTiming::Never, 2000), &client).unwrap();

        assert_eq!(result.raw_count, 2);
        assert_eq!(result.filtered_count, 1);
        assert_eq!(result.records[0].id, "1");
    }

    #[test]
    fn test_cursor_stops_at_record_cap() {
        let mut client = MockNoticeClient::new();
        // Every page offers a further cursor; only two pages may be requested
        client.expect_get_page().times(2).returning(|url| {
            let n: usize = url.rsplit('/').next().unwrap().parse().unwrap();
            let releases = (0..3)
                .map(|i| release(&format!("{}-{}", n, i), "battery"))
                .collect();
            Ok(page(releases, Some(&format!("https://api.test/page/{}", n + 1))))
        });

        let result = fetch_source(&cursor_profile(DedupTiming::Never, 5), &client).unwrap();

        // Whole pages are kept, so the cap is crossed by the final page
        assert_eq!(result.raw_count, 6);
        assert_eq!(result.filtered_count, 6);
    }

    #[test]
    fn test_cursor_failure_keeps_partial_results() {
        let mut client = MockNoticeClient::new();
        client
            .expect_get_page()
            .withf(|url| url == "https://api.test/page/0")
            .times(1)
            .returning(|_| {
                Ok(page(
                    vec![release("1", "Microgrid pilot")],
                    Some("https://api.test/page/1"),
                ))
            });
        client
            .expect_get_page()
            .withf(|url| url == "https://api.test/page/1")
            .times(1)
            .returning(|url| {
                Err(TenderError::HttpStatus {
                    status: 500,
                    url: url.to_string(),
                })
            });

        let result = fetch_source(&cursor_profile(DedupTiming::Never, 2000), &client).unwrap();

        assert_eq!(result.failed_requests, 1);
        assert_eq!(result.raw_count, 1);
        assert_eq!(result.records[0].id, "1");
    }

    #[test]
    fn test_cursor_stops_when_next_repeats_current_page() {
        let mut client = MockNoticeClient::new();
        client
            .expect_get_page()
            .withf(|url| url == "https://api.test/page/0")
            .times(1)
            .returning(|_| Ok(page(vec![], Some("https://api.test/page/0"))));

        let result = fetch_source(&cursor_profile(DedupTiming::Never, 2000), &client).unwrap();

        assert_eq!(result.raw_count, 0);
        assert_eq!(result.failed_requests, 0);
    }

    #[test]
    fn test_contracts_finder_dedups_after_filter() {
        let mut client = MockNoticeClient::new();
        client.expect_get_page().times(1).returning(|_| {
            Ok(page(
                vec![
                    release("cf-1", "Battery supply"),
                    release("cf-1", "Battery supply (amended)"),
                    release("cf-2", "Catering"),
                ],
                None,
            ))
        });

        let profile = contracts_finder::profile("https://cf.test/search", 2000);
        let result = fetch_source(&profile, &client).unwrap();

        assert_eq!(result.raw_count, 3);
        assert_eq!(result.filtered_count, 1);
        assert_eq!(result.records[0].title, "Battery supply (amended)");
        assert_eq!(result.records[0].url, "https://www.contractsfinder.service.gov.uk/Notice/cf-1");
    }

    #[test]
    fn test_find_a_tender_never_dedups() {
        let mut client = MockNoticeClient::new();
        client.expect_get_page().times(1).returning(|_| {
            Ok(page(
                vec![release("fat-1", "Inverter"), release("fat-1", "Inverter")],
                None,
            ))
        });

        let profile = find_a_tender::profile("https://fat.test/packages", 2000);
        let result = fetch_source(&profile, &client).unwrap();

        assert_eq!(result.raw_count, 2);
        assert_eq!(result.filtered_count, 2);
        assert!(result
            .records
            .iter()
            .all(|r| r.url == "https://www.find-tender.service.gov.uk/Notice/fat-1"));
    }
}
