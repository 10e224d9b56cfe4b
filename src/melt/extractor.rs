use crate::error::{MeltError, Result};
use crate::melt::relation::Relation;
use crate::melt::tables::{MeltStats, Tables};
use crate::melt::types::{ErrorPolicy, Item, MeltConfig};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Melts auction documents into the five load relations
pub struct AuctionMelter {
    config: MeltConfig,
}

impl AuctionMelter {
    pub fn new(config: MeltConfig) -> Self {
        AuctionMelter { config }
    }

    pub fn config(&self) -> &MeltConfig {
        &self.config
    }

    /// Melt a document into fresh tables
    pub fn melt(&self, document: &Value) -> Result<Tables> {
        let mut tables = Tables::new();
        self.melt_document(document, &mut tables)?;
        Ok(tables)
    }

    /// Melt every item under the configured items key, appending to `tables`.
    ///
    /// Each item's rows are built in full before anything is appended, so an
    /// item that fails leaves no trace in the accumulators. Whether a failing
    /// item aborts the document or is skipped depends on `on_error`.
    pub fn melt_document(&self, document: &Value, tables: &mut Tables) -> Result<MeltStats> {
        let items = document
            .get(&self.config.items_key)
            .and_then(Value::as_array)
            .ok_or_else(|| MeltError::MissingItems {
                key: self.config.items_key.clone(),
            })?;

        let mut stats = MeltStats::default();

        for (index, value) in items.iter().enumerate() {
            stats.items_seen += 1;

            match self.melt_value(value, index) {
                Ok(fragment) => {
                    stats.add_rows(&fragment);
                    tables.append(fragment);
                    stats.items_melted += 1;
                }
                Err(err) if self.config.on_error == ErrorPolicy::Skip && err.is_item_error() => {
                    warn!("Skipping item: {}", err);
                    stats.items_skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            "Melted {} of {} items ({} skipped)",
            stats.items_melted, stats.items_seen, stats.items_skipped
        );

        Ok(stats)
    }

    /// Run every row builder over one item
    pub fn melt_item(&self, item: &Item, index: usize) -> Result<Tables> {
        let mut fragment = Tables::new();
        for relation in Relation::ALL {
            let rows = match relation {
                Relation::Item => self.item_row(item, index)?,
                Relation::Category => self.category_rows(item),
                Relation::Bidder => self.bidder_rows(item, index)?,
                Relation::Seller => self.seller_rows(item, index)?,
                Relation::Bid => self.bid_rows(item, index)?,
            };
            fragment.push(relation, &rows);
        }
        Ok(fragment)
    }

    fn melt_value(&self, value: &Value, index: usize) -> Result<Tables> {
        let item = Item::deserialize(value).map_err(|e| MeltError::InvalidItem {
            index,
            message: e.to_string(),
        })?;
        self.melt_item(&item, index)
    }
}
