//! The five fixed output relations and their column layouts

use std::fmt;

/// One flat output table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    Item,
    Category,
    Seller,
    Bidder,
    Bid,
}

impl Relation {
    /// All relations, in the order their row builders run for each item
    pub const ALL: [Relation; 5] = [
        Relation::Item,
        Relation::Category,
        Relation::Bidder,
        Relation::Seller,
        Relation::Bid,
    ];

    /// Stable slot for per-relation counters
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Relation::Item => "item",
            Relation::Category => "category",
            Relation::Seller => "seller",
            Relation::Bidder => "bidder",
            Relation::Bid => "bid",
        }
    }

    /// Load file this relation is appended to
    pub fn file_name(self) -> &'static str {
        match self {
            Relation::Item => "itemTable.dat",
            Relation::Category => "categoryTable.dat",
            Relation::Seller => "sellerTable.dat",
            Relation::Bidder => "bidderTable.dat",
            Relation::Bid => "bidTable.dat",
        }
    }

    /// Column names in row order
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Relation::Item => &[
                "ItemID",
                "Name",
                "Currently",
                "Buy_Price",
                "First_Bid",
                "Number_of_Bids",
                "Started",
                "Ends",
                "Description",
                "SellerID",
            ],
            Relation::Category => &["ItemID", "Category"],
            Relation::Seller => &["SellerID", "Location", "Country", "Rating"],
            Relation::Bidder => &["BidderID", "Location", "Country", "Rating"],
            Relation::Bid => &["ItemID", "BidderID", "Time", "Amount"],
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
