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

//! Sale records.
//!
//! A sale is a point-in-time snapshot: it references the buyer and the
//! product by name only, and freezes the price and the buyer's role as
//! they were at purchase time. Renaming a product later must not rewrite
//! sales history.

use crate::base::{Role, SaleId};
use rust_decimal::Decimal;

/// One purchase event.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    id: SaleId,
    pub username: String,
    pub product: String,
    pub quantity: u32,
    pub price: Decimal,
    pub role: Role,
}

impl Sale {
    pub fn new(
        id: SaleId,
        username: impl Into<String>,
        product: impl Into<String>,
        quantity: u32,
        price: Decimal,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            product: product.into(),
            quantity,
            price,
            role,
        }
    }

    pub fn id(&self) -> SaleId {
        self.id
    }

    /// `price × quantity`, always derived from the current fields.
    pub fn total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_tracks_quantity_changes() {
        let mut s = Sale::new(SaleId(1), "ana", "Dune", 2, dec!(10.00), Role::CLIENT);
        assert_eq!(s.total(), dec!(20.00));
        s.quantity = 5;
        assert_eq!(s.total(), dec!(50.00));
    }
}
