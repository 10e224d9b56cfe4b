//! # auction-melt
//!
//! Flattens a nested JSON export of auction listings into five
//! delimiter-separated relations (items, categories, sellers, bidders,
//! bids) ready for bulk loading into a relational database.
//!
//! ## Modules
//!
//! - **melt**: row builders, field normalizers and the table accumulator
//! - **driver**: input file discovery, parsing and the per-file loop
//! - **cli**: argument parsing and the run behind the `auction-melt` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use auction_melt::melt::{AuctionMelter, MeltConfig, Relation};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = json!({
//!     "Items": [{
//!         "ItemID": "1",
//!         "Name": "Widget",
//!         "Currently": "$9.99",
//!         "Number_of_Bids": "0",
//!         "Started": "Jan-01-14 00:00:00",
//!         "Ends": "Jan-02-14 00:00:00",
//!         "Seller": {"UserID": "s1", "Rating": "10"}
//!     }]
//! });
//!
//! let melter = AuctionMelter::new(MeltConfig::default());
//! let tables = melter.melt(&document)?;
//!
//! assert_eq!(tables.get(Relation::Seller), "\"s1\"|null|null|10\n");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod driver;
pub mod error;
pub mod melt;

// Re-export commonly used types for convenience
pub use driver::{collect_inputs, melt_files, read_document};
pub use error::{MeltError, Result};
pub use melt::{
    AuctionMelter, ErrorPolicy, MeltConfig, MeltStats, Relation, TableWriter, Tables, Validation,
};
