//! Auction melting - flatten listing JSON into load-ready relations
//!
//! An `AuctionMelter` runs five row builders over every item of a document
//! (item, category, bidder, seller, bid) and appends their rows to a
//! `Tables` accumulator. `TableWriter` appends accumulated tables to the
//! per-relation load files.

pub mod types;
pub mod normalize;
pub mod relation;
pub mod tables;
pub mod extractor;
pub mod rows;
pub mod writer;

pub use types::{Bid, BidEntry, Bidder, ErrorPolicy, Item, MeltConfig, Seller, Text, Validation};
pub use extractor::AuctionMelter;
pub use relation::Relation;
pub use tables::{MeltStats, Tables};
pub use writer::TableWriter;
