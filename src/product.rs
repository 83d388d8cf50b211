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

//! Product records held by the inventory.

use crate::base::ProductId;
use rust_decimal::Decimal;

/// A catalog item.
///
/// The ID is immutable after construction; every other field can be
/// rewritten through [`Inventory::update`](crate::Inventory::update).
/// The line total is derived, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    pub name: String,
    pub author: String,
    pub category: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            author: author.into(),
            category: category.into(),
            quantity,
            price,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Stock value at the current price, `price × quantity`.
    pub fn total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
