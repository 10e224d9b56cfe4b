//! Accumulated relation text, one buffer per output table

use crate::melt::relation::Relation;
use std::ops::AddAssign;

/// Rows generated so far for each relation.
///
/// Each buffer holds zero or more complete, newline-terminated rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    items: String,
    categories: String,
    sellers: String,
    bidders: String,
    bids: String,
}

impl Tables {
    pub fn new() -> Self {
        Tables::default()
    }

    pub fn get(&self, relation: Relation) -> &str {
        match relation {
            Relation::Item => &self.items,
            Relation::Category => &self.categories,
            Relation::Seller => &self.sellers,
            Relation::Bidder => &self.bidders,
            Relation::Bid => &self.bids,
        }
    }

    fn get_mut(&mut self, relation: Relation) -> &mut String {
        match relation {
            Relation::Item => &mut self.items,
            Relation::Category => &mut self.categories,
            Relation::Seller => &mut self.sellers,
            Relation::Bidder => &mut self.bidders,
            Relation::Bid => &mut self.bids,
        }
    }

    /// Append rows to one relation
    pub fn push(&mut self, relation: Relation, rows: &str) {
        self.get_mut(relation).push_str(rows);
    }

    /// Move every row of `other` onto the end of this accumulator
    pub fn append(&mut self, other: Tables) {
        for relation in Relation::ALL {
            self.push(relation, other.get(relation));
        }
    }

    pub fn row_count(&self, relation: Relation) -> usize {
        self.get(relation).lines().count()
    }

    pub fn is_empty(&self) -> bool {
        Relation::ALL.iter().all(|r| self.get(*r).is_empty())
    }

    /// Relations paired with their text, in builder order
    pub fn iter(&self) -> impl Iterator<Item = (Relation, &str)> + '_ {
        Relation::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

/// Counters for one melted document (or a whole run, when summed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeltStats {
    pub items_seen: usize,
    pub items_melted: usize,
    pub items_skipped: usize,
    /// Rows appended per relation, indexed by `Relation::index`
    pub rows: [usize; 5],
}

impl MeltStats {
    pub fn row_count(&self, relation: Relation) -> usize {
        self.rows[relation.index()]
    }

    /// Count the rows of a fragment that is about to be appended
    pub fn add_rows(&mut self, fragment: &Tables) {
        for (relation, text) in fragment.iter() {
            self.rows[relation.index()] += text.lines().count();
        }
    }
}

impl AddAssign for MeltStats {
    fn add_assign(&mut self, other: MeltStats) {
        self.items_seen += other.items_seen;
        self.items_melted += other.items_melted;
        self.items_skipped += other.items_skipped;
        for (total, rows) in self.rows.iter_mut().zip(other.rows) {
            *total += rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_relations_apart() {
        let mut tables = Tables::new();
        tables.push(Relation::Item, "1|\"a\"\n");

        let mut other = Tables::new();
        other.push(Relation::Item, "2|\"b\"\n");
        other.push(Relation::Bid, "2|\"u\"|null|null\n");

        tables.append(other);

        assert_eq!(tables.get(Relation::Item), "1|\"a\"\n2|\"b\"\n");
        assert_eq!(tables.row_count(Relation::Bid), 1);
        assert_eq!(tables.row_count(Relation::Seller), 0);
        assert!(!tables.is_empty());
    }

    #[test]
    fn test_stats_sum() {
        let mut total = MeltStats::default();
        total += MeltStats {
            items_seen: 3,
            items_melted: 2,
            items_skipped: 1,
            rows: [2, 3, 2, 0, 1],
        };
        total += MeltStats {
            items_seen: 1,
            items_melted: 1,
            items_skipped: 0,
            rows: [1, 0, 1, 1, 0],
        };
        assert_eq!(
            total,
            MeltStats {
                items_seen: 4,
                items_melted: 3,
                items_skipped: 1,
                rows: [3, 3, 3, 1, 1],
            }
        );
        assert_eq!(total.row_count(Relation::Category), 3);
    }

    #[test]
    fn test_add_rows_counts_per_relation() {
        let mut fragment = Tables::new();
        fragment.push(Relation::Item, "1|\"a\"\n");
        fragment.push(Relation::Category, "1|\"x\"\n1|\"y\"\n");

        let mut stats = MeltStats::default();
        stats.add_rows(&fragment);
        stats.add_rows(&fragment);

        assert_eq!(stats.row_count(Relation::Item), 2);
        assert_eq!(stats.row_count(Relation::Category), 4);
        assert_eq!(stats.row_count(Relation::Bid), 0);
    }
}
