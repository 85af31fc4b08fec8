//! Lenient model of the OCDS release payloads the procurement APIs return.
//!
//! Every field is optional. Identifiers may arrive as strings or numbers and
//! amounts as numbers or numeric strings; anything else reads as absent.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// One page of results: `{ releases: [...], links: { next } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoticePage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub releases: Vec<RawNotice>,
    #[serde(default)]
    pub links: Option<PageLinks>,
}

impl NoticePage {
    /// Cursor for the following page; an empty string counts as absent
    pub fn next_cursor(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.next.as_deref())
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNotice {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tender: Option<RawTender>,
    #[serde(default)]
    pub buyer: Option<Organisation>,
    #[serde(default)]
    pub parties: Option<Vec<Party>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTender {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub value: Option<TenderValue>,
    #[serde(default)]
    pub tender_period: Option<Period>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenderValue {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Organisation {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl Party {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles
            .as_ref()
            .is_some_and(|roles| roles.iter().any(|r| r == role))
    }
}

/// Non-empty string, treating `""` the same as a missing field
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl RawNotice {
    pub fn tender_title(&self) -> Option<&str> {
        non_empty(self.tender.as_ref().and_then(|t| t.title.as_ref()))
    }

    pub fn tender_description(&self) -> Option<&str> {
        non_empty(self.tender.as_ref().and_then(|t| t.description.as_ref()))
    }

    /// Tender description, else the release-level description
    pub fn any_description(&self) -> Option<&str> {
        self.tender_description()
            .or_else(|| non_empty(self.description.as_ref()))
    }

    pub fn buyer_name(&self) -> Option<&str> {
        non_empty(self.buyer.as_ref().and_then(|b| b.name.as_ref()))
    }

    /// Name of the first party carrying the `buyer` role
    pub fn buyer_party_name(&self) -> Option<&str> {
        self.parties
            .as_ref()?
            .iter()
            .find(|p| p.has_role("buyer"))
            .and_then(|p| non_empty(p.name.as_ref()))
    }

    pub fn amount(&self) -> Option<f64> {
        self.tender
            .as_ref()
            .and_then(|t| t.value.as_ref())
            .and_then(|v| v.amount)
    }

    pub fn end_date(&self) -> Option<&str> {
        non_empty(
            self.tender
                .as_ref()
                .and_then(|t| t.tender_period.as_ref())
                .and_then(|p| p.end_date.as_ref()),
        )
    }

    pub fn published(&self) -> Option<&str> {
        non_empty(self.date.as_ref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawNotice>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawNotice>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Shared fallback for the lenient visitors: swallow values of the wrong shape
macro_rules! ignore_other_shapes {
    ($de:lifetime) => {
        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<$de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_seq<A: SeqAccess<$de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A: MapAccess<$de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    };
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number identifier")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Option<String>, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Option<String>, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Option<String>, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Option<String>, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Option<String>, E> {
            Ok(Some(v.to_string()))
        }

        ignore_other_shapes!('de);
    }

    deserializer.deserialize_any(IdVisitor)
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Option<f64>, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Option<f64>, E> {
            Ok(Some(v as f64))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Option<f64>, E> {
            Ok(Some(v).filter(|a| a.is_finite()))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Option<f64>, E> {
            Ok(v.trim().parse::<f64>().ok().filter(|a| a.is_finite()))
        }

        ignore_other_shapes!('de);
    }

    deserializer.deserialize_any(AmountVisitor)
}
