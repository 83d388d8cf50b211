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

//! Product inventory store.
//!
//! Owns every [`Product`] in insertion/load order. Product names are
//! unique with a case-sensitive exact match — deliberately stricter than
//! the user registry's case-insensitive rule.
//!
//! Mutation goes through the store (`update`, `decrement_stock`); lookups
//! hand out shared references only, so there is a single mutation path.

use crate::allocator::IdAllocator;
use crate::base::ProductId;
use crate::codec::{self, LoadOutcome, WriteMode};
use crate::error::StoreError;
use crate::product::Product;
use rust_decimal::Decimal;
use std::path::Path;

/// Partial update for [`Inventory::update`]. `None` (or an empty string)
/// leaves the field unchanged.
#[derive(Debug, Default, Clone)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
}

/// In-memory owner of all products.
#[derive(Debug, Default)]
pub struct Inventory {
    products: Vec<Product>,
    ids: IdAllocator,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Adds a product with a freshly allocated ID.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateName`] if a product with exactly this name
    /// (case-sensitive) already exists. The allocator is not advanced on
    /// rejection.
    pub fn add(
        &mut self,
        name: &str,
        author: &str,
        category: &str,
        quantity: u32,
        price: Decimal,
    ) -> Result<&Product, StoreError> {
        if self.find_by_name(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let id = ProductId(self.ids.next());
        self.products
            .push(Product::new(id, name, author, category, quantity, price));
        Ok(self.products.last().unwrap())
    }

    /// Case-sensitive exact-name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Case-insensitive substring match over name, author, and category,
    /// or an exact match on the ID rendered as a string.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.author.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.id().to_string() == query
            })
            .collect()
    }

    /// Applies the non-empty fields of `update` to the product named
    /// `name`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no product matches.
    pub fn update(&mut self, name: &str, update: ProductUpdate) -> Result<(), StoreError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        if let Some(new_name) = update.name.filter(|n| !n.trim().is_empty()) {
            product.name = new_name;
        }
        if let Some(author) = update.author.filter(|a| !a.trim().is_empty()) {
            product.author = author;
        }
        if let Some(category) = update.category.filter(|c| !c.trim().is_empty()) {
            product.category = category;
        }
        if let Some(quantity) = update.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        Ok(())
    }

    /// Removes `amount` units of stock, e.g. during a purchase.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the product is missing,
    /// [`StoreError::InsufficientStock`] if it has fewer than `amount`
    /// units; stock never goes negative.
    pub fn decrement_stock(&mut self, name: &str, amount: u32) -> Result<(), StoreError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        if product.quantity < amount {
            return Err(StoreError::InsufficientStock {
                name: name.to_string(),
                available: product.quantity,
            });
        }
        product.quantity -= amount;
        Ok(())
    }

    /// All products in insertion/load order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Writes the inventory to `path` (see [`codec::save_table`] for the
    /// path and mode rules).
    pub fn save_csv(&self, path: &Path, mode: WriteMode) -> Result<(), StoreError> {
        codec::save_table(&self.products, path, mode)?;
        Ok(())
    }

    /// Replaces the inventory with the file's contents.
    ///
    /// A missing or zero-byte file leaves the current products in place.
    /// On a consumed file the new collection is swapped in whole and the
    /// allocator observes every loaded ID, so later adds never collide.
    /// Returns the number of rows skipped with a warning.
    pub fn load_csv(&mut self, path: &Path) -> Result<usize, StoreError> {
        match codec::load_table::<Product>(path)? {
            LoadOutcome::Missing | LoadOutcome::Empty => Ok(0),
            LoadOutcome::Loaded { records, skipped } => {
                for product in &records {
                    self.ids.observe(product.id().0);
                }
                self.products = records;
                Ok(skipped)
            }
        }
    }
}
