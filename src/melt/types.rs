use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// A scalar field value as it will appear in output, before escaping.
///
/// Auction exports carry most scalars as strings, but ratings and counts
/// occasionally show up as bare numbers; both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Text(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = Text;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Text, E> {
                Ok(Text::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Text, E> {
                Ok(Text(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

/// One auction listing from the `Items` array.
///
/// Every field is optional; `null` and a missing key are the same thing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    #[serde(rename = "ItemID")]
    pub item_id: Option<Text>,
    #[serde(rename = "Name")]
    pub name: Option<Text>,
    #[serde(rename = "Currently")]
    pub currently: Option<Text>,
    #[serde(rename = "Buy_Price")]
    pub buy_price: Option<Text>,
    #[serde(rename = "First_Bid")]
    pub first_bid: Option<Text>,
    #[serde(rename = "Number_of_Bids")]
    pub number_of_bids: Option<Text>,
    #[serde(rename = "Started")]
    pub started: Option<Text>,
    #[serde(rename = "Ends")]
    pub ends: Option<Text>,
    #[serde(rename = "Description")]
    pub description: Option<Text>,
    #[serde(rename = "Category")]
    pub category: Option<Vec<Option<Text>>>,
    /// Seller location; the export stores it on the item, not the seller
    #[serde(rename = "Location")]
    pub location: Option<Text>,
    #[serde(rename = "Country")]
    pub country: Option<Text>,
    #[serde(rename = "Seller")]
    pub seller: Option<Seller>,
    #[serde(rename = "Bids")]
    pub bids: Option<Vec<BidEntry>>,
}

impl Item {
    /// Human-readable reference for error messages: the ItemID, or the
    /// position in the document when there is none.
    pub fn label(&self, index: usize) -> String {
        match &self.item_id {
            Some(id) => id.0.clone(),
            None => format!("#{}", index),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seller {
    #[serde(rename = "UserID")]
    pub user_id: Option<Text>,
    #[serde(rename = "Rating")]
    pub rating: Option<Text>,
}

/// Wrapper object around each bid, as in `{"Bid": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BidEntry {
    #[serde(rename = "Bid")]
    pub bid: Option<Bid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bid {
    #[serde(rename = "Bidder")]
    pub bidder: Option<Bidder>,
    #[serde(rename = "Time")]
    pub time: Option<Text>,
    #[serde(rename = "Amount")]
    pub amount: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bidder {
    #[serde(rename = "UserID")]
    pub user_id: Option<Text>,
    #[serde(rename = "Location")]
    pub location: Option<Text>,
    #[serde(rename = "Country")]
    pub country: Option<Text>,
    #[serde(rename = "Rating")]
    pub rating: Option<Text>,
}

/// How currency and timestamp values are checked before normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Pass malformed values through whatever the transform produces
    #[default]
    Lenient,
    /// Reject malformed values with `InvalidCurrency` / `InvalidTimestamp`
    Strict,
}

/// What to do with an item that fails to melt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failing item
    #[default]
    Abort,
    /// Drop the failing item (none of its rows are emitted) and continue
    Skip,
}

/// Configuration for the melting process
#[derive(Debug, Clone)]
pub struct MeltConfig {
    /// Column separator between fields of a row
    pub separator: char,

    /// Token written for absent or null fields
    pub null_marker: String,

    /// Top-level key holding the item list
    pub items_key: String,

    pub validation: Validation,

    pub on_error: ErrorPolicy,
}

impl Default for MeltConfig {
    fn default() -> Self {
        MeltConfig {
            separator: '|',
            null_marker: String::from("null"),
            items_key: String::from("Items"),
            validation: Validation::Lenient,
            on_error: ErrorPolicy::Abort,
        }
    }
}
