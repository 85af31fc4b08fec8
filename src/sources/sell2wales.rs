use chrono::{Datelike, Months, NaiveDate};

use crate::domain::SourceName;
use crate::sources::profile::{BuyerRule, DedupTiming, DescriptionRule, RequestPlan, SourceProfile};

/// Calendar months queried, counting the current one
pub const MONTHS_BACK: u32 = 6;

/// Notice type codes queried for each month
pub const NOTICE_TYPES: [u32; 4] = [1, 2, 3, 7];

pub const LINK_TEMPLATE: &str =
    "https://www.sell2wales.gov.wales/search/show/search_view.aspx?ID={id}";

/// `MM-YYYY` for the month `months_ago` before `anchor`
pub fn month_stamp(anchor: NaiveDate, months_ago: u32) -> String {
    let date = anchor
        .checked_sub_months(Months::new(months_ago))
        .unwrap_or(anchor);
    format!("{:02}-{}", date.month(), date.year())
}

/// Query parameters for every (month, notice type) cell, months outermost
pub fn grid_cells(anchor: NaiveDate) -> Vec<Vec<(String, String)>> {
    (0..MONTHS_BACK)
        .flat_map(|months_ago| {
            let stamp = month_stamp(anchor, months_ago);
            NOTICE_TYPES.into_iter().map(move |notice_type| {
                vec![
                    ("dateFrom".to_string(), stamp.clone()),
                    ("noticeType".to_string(), notice_type.to_string()),
                    ("outputType".to_string(), "0".to_string()),
                    ("locale".to_string(), "2057".to_string()),
                ]
            })
        })
        .collect()
}

pub fn profile(api_base: &str, anchor: NaiveDate) -> SourceProfile {
    SourceProfile {
        name: SourceName::Sell2Wales,
        plan: RequestPlan::Grid {
            base_url: format!("{}/v1/Notices", api_base.trim_end_matches('/')),
            cells: grid_cells(anchor),
        },
        description: DescriptionRule::TenderOnly,
        buyer: BuyerRule::BuyerOnly,
        dedup: DedupTiming::BeforeFilter,
        link_template: LINK_TEMPLATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_stamp_crosses_year_boundary() {
        let anchor = date(2025, 2, 10);
        assert_eq!(month_stamp(anchor, 0), "02-2025");
        assert_eq!(month_stamp(anchor, 1), "01-2025");
        assert_eq!(month_stamp(anchor, 2), "12-2024");
        assert_eq!(month_stamp(anchor, 5), "09-2024");
    }

    #[test]
    fn test_month_stamp_clamps_short_months() {
        // 31 March minus one month is still February
        assert_eq!(month_stamp(date(2025, 3, 31), 1), "02-2025");
    }

    #[test]
    fn test_grid_has_24_cells_months_outermost() {
        let cells = grid_cells(date(2025, 6, 1));
        assert_eq!(cells.len(), 24);

        assert_eq!(cells[0][0], ("dateFrom".to_string(), "06-2025".to_string()));
        assert_eq!(cells[0][1], ("noticeType".to_string(), "1".to_string()));
        assert_eq!(cells[3][1], ("noticeType".to_string(), "7".to_string()));
        assert_eq!(cells[4][0], ("dateFrom".to_string(), "05-2025".to_string()));
        assert_eq!(cells[23][0], ("dateFrom".to_string(), "01-2025".to_string()));
    }

    #[test]
    fn test_profile_shape() {
        let p = profile("https://api.sell2wales.gov.wales/", date(2025, 6, 1));

        assert_eq!(p.name, SourceName::Sell2Wales);
        assert_eq!(p.dedup, DedupTiming::BeforeFilter);
        match p.plan {
            RequestPlan::Grid { base_url, .. } => {
                assert_eq!(base_url, "https://api.sell2wales.gov.wales/v1/Notices")
            }
            other => panic!("expected grid plan, got {:?}", other),
        }
    }
}
