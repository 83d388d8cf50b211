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

//! Sales log.
//!
//! An append-only list of [`Sale`] records in the order they happened.
//! Sales have no uniqueness constraint: every record succeeds and always
//! takes a fresh ID.

use crate::allocator::IdAllocator;
use crate::base::{Role, SaleId};
use crate::codec::{self, LoadOutcome, WriteMode};
use crate::error::StoreError;
use crate::sale::Sale;
use rust_decimal::Decimal;
use std::path::Path;

/// In-memory owner of all sale records.
#[derive(Debug, Default)]
pub struct SalesLog {
    sales: Vec<Sale>,
    ids: IdAllocator,
}

impl SalesLog {
    pub fn new() -> Self {
        Self {
            sales: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Records a sale. Never fails; the buyer's role and the price are
    /// frozen as given.
    pub fn record(
        &mut self,
        username: &str,
        product: &str,
        quantity: u32,
        price: Decimal,
        role: Role,
    ) -> &Sale {
        let id = SaleId(self.ids.next());
        self.sales
            .push(Sale::new(id, username, product, quantity, price, role));
        self.sales.last().unwrap()
    }

    /// All sales in insertion/load order.
    pub fn list(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Writes the whole log to `path`.
    pub fn save_csv(&self, path: &Path, mode: WriteMode) -> Result<(), StoreError> {
        codec::save_table(&self.sales, path, mode)?;
        Ok(())
    }

    /// Appends only the most recent sale to `path`, writing the header
    /// when the file is new. This is the per-purchase write path: small,
    /// and never duplicates rows already on disk.
    pub fn append_latest_csv(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(last) = self.sales.last() {
            codec::save_table(std::slice::from_ref(last), path, WriteMode::Append)?;
        }
        Ok(())
    }

    /// Replaces the log with the file's contents; missing and zero-byte
    /// files leave the current sales in place. Returns the number of
    /// skipped rows.
    pub fn load_csv(&mut self, path: &Path) -> Result<usize, StoreError> {
        match codec::load_table::<Sale>(path)? {
            LoadOutcome::Missing | LoadOutcome::Empty => Ok(0),
            LoadOutcome::Loaded { records, skipped } => {
                for sale in &records {
                    self.ids.observe(sale.id().0);
                }
                self.sales = records;
                Ok(skipped)
            }
        }
    }
}
