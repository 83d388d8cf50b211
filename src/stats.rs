// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Aggregate statistics over a sales snapshot.
//!
//! Rankings count sale records, not units sold: a product appearing on
//! three sales of one unit each outranks a product on one sale of ten
//! units. Ties keep first-encountered order.

use crate::sale::Sale;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// How many entries each ranking carries at most.
const TOP_N: usize = 3;

/// One ranking entry: a key and how many sale records named it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub name: String,
    pub count: usize,
}

/// Totals and top-3 rankings over a sales snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    /// Sum of `total` over all sales.
    pub total_revenue: Decimal,
    /// Sum of `quantity` over all sales.
    pub total_items: u64,
    /// Products by number of sale records naming them, descending.
    pub top_products: Vec<RankEntry>,
    /// Buyers by number of sale records, descending.
    pub top_buyers: Vec<RankEntry>,
}

/// Computes the summary, or `None` when there are no sales — an empty
/// snapshot never produces a ranking of zero items.
pub fn summarize(sales: &[Sale]) -> Option<SalesSummary> {
    if sales.is_empty() {
        return None;
    }

    let total_revenue = sales.iter().map(Sale::total).sum();
    let total_items = sales.iter().map(|s| u64::from(s.quantity)).sum();

    Some(SalesSummary {
        total_revenue,
        total_items,
        top_products: top_n(sales.iter().map(|s| s.product.as_str()), TOP_N),
        top_buyers: top_n(sales.iter().map(|s| s.username.as_str()), TOP_N),
    })
}

/// Counts occurrences of each key and returns the `n` most frequent.
///
/// Keys are ranked by count descending; equal counts keep the order in
/// which the keys were first encountered (stable sort over a first-seen
/// list).
fn top_n<'a>(keys: impl Iterator<Item = &'a str>, n: usize) -> Vec<RankEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for key in keys {
        let slot = counts.entry(key).or_insert(0);
        if *slot == 0 {
            first_seen.push(key);
        }
        *slot += 1;
    }
    first_seen.sort_by(|a, b| counts[b].cmp(&counts[a]));
    first_seen
        .into_iter()
        .take(n)
        .map(|name| RankEntry {
            name: name.to_string(),
            count: counts[name],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Role, SaleId};
    use rust_decimal_macros::dec;

    fn sale(id: u32, username: &str, product: &str, quantity: u32, price: Decimal) -> Sale {
        Sale::new(SaleId(id), username, product, quantity, price, Role::CLIENT)
    }

    #[test]
    fn empty_snapshot_has_no_summary() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn totals_and_rankings() {
        let sales = [
            sale(1, "userX", "productA", 2, dec!(10)),
            sale(2, "userY", "productA", 1, dec!(10)),
            sale(3, "userX", "productB", 1, dec!(5)),
        ];
        let summary = summarize(&sales).unwrap();

        assert_eq!(summary.total_revenue, dec!(35));
        assert_eq!(summary.total_items, 4);
        assert_eq!(
            summary.top_products,
            vec![
                RankEntry { name: "productA".into(), count: 2 },
                RankEntry { name: "productB".into(), count: 1 },
            ]
        );
        assert_eq!(
            summary.top_buyers,
            vec![
                RankEntry { name: "userX".into(), count: 2 },
                RankEntry { name: "userY".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn ranking_counts_records_not_units() {
        // One bulk sale loses to three single-unit sales.
        let sales = [
            sale(1, "a", "bulk", 10, dec!(1)),
            sale(2, "b", "steady", 1, dec!(1)),
            sale(3, "c", "steady", 1, dec!(1)),
            sale(4, "d", "steady", 1, dec!(1)),
        ];
        let summary = summarize(&sales).unwrap();
        assert_eq!(summary.top_products[0].name, "steady");
        assert_eq!(summary.top_products[0].count, 3);
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let sales = [
            sale(1, "a", "first", 1, dec!(1)),
            sale(2, "b", "second", 1, dec!(1)),
            sale(3, "c", "third", 1, dec!(1)),
            sale(4, "d", "fourth", 1, dec!(1)),
        ];
        let summary = summarize(&sales).unwrap();
        let names: Vec<_> = summary.top_products.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn rankings_are_capped_at_three() {
        let sales: Vec<Sale> = (0..5)
            .map(|i| sale(i, "a", &format!("p{i}"), 1, dec!(1)))
            .collect();
        let summary = summarize(&sales).unwrap();
        assert_eq!(summary.top_products.len(), 3);
        assert_eq!(summary.top_buyers, vec![RankEntry { name: "a".into(), count: 5 }]);
    }
}
