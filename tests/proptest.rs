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

//! Property-based tests for the allocator, the codec, and the
//! statistics aggregator.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use storefront_rs::codec::WriteMode;
use storefront_rs::{IdAllocator, Inventory, Role, SalesLog, stats};
use tempfile::tempdir;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Either issue a fresh ID (`None`) or observe a file-supplied one.
fn arb_alloc_op() -> impl Strategy<Value = Option<u32>> {
    prop_oneof![Just(None), (1u32..1_000).prop_map(Some)]
}

/// Product-ish names that survive `Trim::All` untouched: no leading or
/// trailing whitespace.
fn arb_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z]([A-Za-z0-9 ]{0,13}[A-Za-z0-9])?").unwrap()
}

/// A price with two decimal places between 0.00 and 999.99.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

// =============================================================================
// Allocator Invariants
// =============================================================================

proptest! {
    /// Every issued ID is strictly greater than all IDs issued or
    /// observed before it, for any interleaving of the two operations.
    #[test]
    fn issued_ids_never_collide(ops in prop::collection::vec(arb_alloc_op(), 1..60)) {
        let mut alloc = IdAllocator::new();
        let mut last_issued: Option<u32> = None;
        let mut observed: HashSet<u32> = HashSet::new();

        for op in ops {
            match op {
                None => {
                    let id = alloc.next();
                    if let Some(prev) = last_issued {
                        prop_assert!(id > prev);
                    }
                    prop_assert!(!observed.contains(&id));
                    last_issued = Some(id);
                }
                Some(ext) => {
                    alloc.observe(ext);
                    observed.insert(ext);
                }
            }
        }
    }

    /// A store that loads arbitrary IDs from a file keeps allocating
    /// without ever repeating one of them.
    #[test]
    fn store_add_after_load_never_collides(
        ids in prop::collection::hash_set(1u32..500, 1..10),
    ) {
        let dir = tempdir().unwrap();
        let mut rows = String::from("productID,name,author,category,quantity,price\n");
        for id in &ids {
            rows.push_str(&format!("{id},Item {id},Author,Misc,1,1.00\n"));
        }
        std::fs::write(dir.path().join("Inventory.csv"), rows).unwrap();

        let mut inv = Inventory::new();
        inv.load_csv(dir.path()).unwrap();
        let new_id = inv.add("Fresh", "Author", "Misc", 1, Decimal::ONE).unwrap().id().0;
        prop_assert!(!ids.contains(&new_id));
        prop_assert_eq!(new_id, ids.iter().max().unwrap() + 1);
    }
}

// =============================================================================
// Codec Round-Trip
// =============================================================================

proptest! {
    /// Saving then loading a non-empty inventory reproduces every field.
    #[test]
    fn product_save_load_round_trips(
        items in prop::collection::hash_map(arb_name(), (0u32..100, arb_price()), 1..8),
    ) {
        let dir = tempdir().unwrap();
        let mut original = Inventory::new();
        for (name, (quantity, price)) in &items {
            // Names from a hash map are unique, so adds never reject.
            original.add(name, "Author", "Misc", *quantity, *price).unwrap();
        }
        original.save_csv(dir.path(), WriteMode::Overwrite).unwrap();

        let mut loaded = Inventory::new();
        let skipped = loaded.load_csv(dir.path()).unwrap();
        prop_assert_eq!(skipped, 0);
        prop_assert_eq!(loaded.list(), original.list());
    }
}

// =============================================================================
// Statistics Invariants
// =============================================================================

proptest! {
    /// Revenue and item totals match a direct fold over the snapshot,
    /// and rankings never exceed three entries.
    #[test]
    fn summary_totals_match_fold(
        sales in prop::collection::vec(
            (arb_name(), arb_name(), 1u32..20, arb_price()),
            1..30,
        ),
    ) {
        let mut log = SalesLog::new();
        for (user, product, quantity, price) in &sales {
            log.record(user, product, *quantity, *price, Role::CLIENT);
        }

        let summary = stats::summarize(log.list()).unwrap();
        let expected_revenue: Decimal = log
            .list()
            .iter()
            .map(|s| s.price * Decimal::from(s.quantity))
            .sum();
        let expected_items: u64 = log.list().iter().map(|s| u64::from(s.quantity)).sum();

        prop_assert_eq!(summary.total_revenue, expected_revenue);
        prop_assert_eq!(summary.total_items, expected_items);
        prop_assert!(summary.top_products.len() <= 3);
        prop_assert!(summary.top_buyers.len() <= 3);

        // The top product's count matches a direct recount.
        let top = &summary.top_products[0];
        let recount = log.list().iter().filter(|s| s.product == top.name).count();
        prop_assert_eq!(top.count, recount);
    }
}
