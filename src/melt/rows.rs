//! Row builders: one per relation, each mapping an item to zero or more rows
//!
//! Builders read the item without modifying it, so they can run in any
//! order and each one applies its own quote escaping.

use crate::error::{MeltError, Result};
use crate::melt::extractor::AuctionMelter;
use crate::melt::normalize::{
    escape_quotes, is_valid_currency, is_valid_timestamp, normalize_currency,
    normalize_timestamp,
};
use crate::melt::relation::Relation;
use crate::melt::types::{Bid, Bidder, Item, MeltConfig, Text, Validation};

/// Assembles one separator-joined, newline-terminated row
struct RowBuilder<'a> {
    config: &'a MeltConfig,
    relation: Relation,
    line: String,
    fields: usize,
}

impl<'a> RowBuilder<'a> {
    fn new(config: &'a MeltConfig, relation: Relation) -> Self {
        RowBuilder {
            config,
            relation,
            line: String::new(),
            fields: 0,
        }
    }

    fn next_field(&mut self) {
        if self.fields > 0 {
            self.line.push(self.config.separator);
        }
        self.fields += 1;
    }

    /// Escaped but unquoted (identifiers, counts, ratings)
    fn bare(&mut self, value: Option<&str>) -> &mut Self {
        self.next_field();
        match value {
            Some(v) => self.line.push_str(&escape_quotes(v)),
            None => self.line.push_str(&self.config.null_marker),
        }
        self
    }

    fn quoted(&mut self, value: Option<&str>) -> &mut Self {
        self.next_field();
        match value {
            Some(v) => {
                self.line.push('"');
                self.line.push_str(&escape_quotes(v));
                self.line.push('"');
            }
            None => self.line.push_str(&self.config.null_marker),
        }
        self
    }

    fn finish(mut self) -> String {
        debug_assert_eq!(self.fields, self.relation.columns().len());
        self.line.push('\n');
        self.line
    }
}

fn text(value: &Option<Text>) -> Option<&str> {
    value.as_ref().map(Text::as_str)
}

fn required<'v>(value: &'v Option<Text>, item: &str, field: &str) -> Result<&'v str> {
    text(value).ok_or_else(|| MeltError::missing_field(item, field))
}

/// A bid entry with its required parts resolved
struct ResolvedBid<'i> {
    index: usize,
    bid: &'i Bid,
    bidder: &'i Bidder,
    bidder_id: &'i str,
}

impl AuctionMelter {
    fn currency(&self, value: &Option<Text>, item: &str, field: &str) -> Result<Option<String>> {
        let Some(value) = text(value) else {
            return Ok(None);
        };
        if self.config().validation == Validation::Strict && !is_valid_currency(value) {
            return Err(MeltError::InvalidCurrency {
                item: item.to_string(),
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        Ok(Some(normalize_currency(value)))
    }

    fn timestamp(&self, value: &Option<Text>, item: &str, field: &str) -> Result<Option<String>> {
        let Some(value) = text(value) else {
            return Ok(None);
        };
        if self.config().validation == Validation::Strict && !is_valid_timestamp(value) {
            return Err(MeltError::InvalidTimestamp {
                item: item.to_string(),
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        Ok(Some(normalize_timestamp(value)))
    }

    fn resolved_bids<'i>(&self, item: &'i Item, label: &str) -> Result<Vec<ResolvedBid<'i>>> {
        let Some(entries) = &item.bids else {
            return Ok(Vec::new());
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| -> Result<ResolvedBid<'i>> {
                let bid = entry.bid.as_ref().ok_or_else(|| {
                    MeltError::missing_field(label, format!("Bids[{}].Bid", index))
                })?;
                let bidder = bid.bidder.as_ref().ok_or_else(|| {
                    MeltError::missing_field(label, format!("Bids[{}].Bid.Bidder", index))
                })?;
                let bidder_id = required(
                    &bidder.user_id,
                    label,
                    &format!("Bids[{}].Bid.Bidder.UserID", index),
                )?;
                Ok(ResolvedBid {
                    index,
                    bid,
                    bidder,
                    bidder_id,
                })
            })
            .collect()
    }

    /// Exactly one item row. `index` is the item's position in its document
    /// and only feeds error messages.
    pub fn item_row(&self, item: &Item, index: usize) -> Result<String> {
        let label = item.label(index);

        let currently = self.currency(&item.currently, &label, "Currently")?;
        let buy_price = self.currency(&item.buy_price, &label, "Buy_Price")?;
        let first_bid = self.currency(&item.first_bid, &label, "First_Bid")?;
        let started = self.timestamp(&item.started, &label, "Started")?;
        let ends = self.timestamp(&item.ends, &label, "Ends")?;
        let seller_id = match &item.seller {
            Some(seller) => Some(required(&seller.user_id, &label, "Seller.UserID")?),
            None => None,
        };

        let mut row = RowBuilder::new(self.config(), Relation::Item);
        row.bare(text(&item.item_id))
            .quoted(text(&item.name))
            .quoted(currently.as_deref())
            .quoted(buy_price.as_deref())
            .quoted(first_bid.as_deref())
            .bare(text(&item.number_of_bids))
            .quoted(started.as_deref())
            .quoted(ends.as_deref())
            .quoted(text(&item.description))
            .quoted(seller_id);
        Ok(row.finish())
    }

    /// One row per category; nothing when the item has no ID or no list
    pub fn category_rows(&self, item: &Item) -> String {
        let (Some(item_id), Some(categories)) = (&item.item_id, &item.category) else {
            return String::new();
        };

        let mut out = String::new();
        for category in categories {
            let mut row = RowBuilder::new(self.config(), Relation::Category);
            row.bare(Some(item_id.as_str())).quoted(text(category));
            out.push_str(&row.finish());
        }
        out
    }

    /// One row per item that has a seller; no deduplication across items
    pub fn seller_rows(&self, item: &Item, index: usize) -> Result<String> {
        let Some(seller) = &item.seller else {
            return Ok(String::new());
        };
        let label = item.label(index);
        let seller_id = required(&seller.user_id, &label, "Seller.UserID")?;

        let mut row = RowBuilder::new(self.config(), Relation::Seller);
        row.quoted(Some(seller_id))
            .quoted(text(&item.location))
            .quoted(text(&item.country))
            .bare(text(&seller.rating));
        Ok(row.finish())
    }

    /// One row per bid, so a bidder shows up once for every bid placed
    pub fn bidder_rows(&self, item: &Item, index: usize) -> Result<String> {
        let label = item.label(index);

        let mut out = String::new();
        for resolved in self.resolved_bids(item, &label)? {
            let bidder = resolved.bidder;
            let mut row = RowBuilder::new(self.config(), Relation::Bidder);
            row.quoted(Some(resolved.bidder_id))
                .quoted(text(&bidder.location))
                .quoted(text(&bidder.country))
                .bare(text(&bidder.rating));
            out.push_str(&row.finish());
        }
        Ok(out)
    }

    pub fn bid_rows(&self, item: &Item, index: usize) -> Result<String> {
        let label = item.label(index);
        let bids = self.resolved_bids(item, &label)?;
        if bids.is_empty() {
            return Ok(String::new());
        }
        let item_id = required(&item.item_id, &label, "ItemID")?;

        let mut out = String::new();
        for resolved in bids {
            let bid = resolved.bid;
            let time_field = format!("Bids[{}].Bid.Time", resolved.index);
            let amount_field = format!("Bids[{}].Bid.Amount", resolved.index);
            let time = self.timestamp(&bid.time, &label, &time_field)?;
            let amount = self.currency(&bid.amount, &label, &amount_field)?;

            let mut row = RowBuilder::new(self.config(), Relation::Bid);
            row.bare(Some(item_id))
                .quoted(Some(resolved.bidder_id))
                .quoted(time.as_deref())
                .quoted(amount.as_deref());
            out.push_str(&row.finish());
        }
        Ok(out)
    }
}
