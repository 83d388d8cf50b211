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

//! # Storefront
//!
//! This library manages three record collections — products, sales, and
//! users — held in memory and mirrored to comma-delimited text files.
//!
//! ## Core Components
//!
//! - [`Inventory`], [`UserRegistry`], [`SalesLog`]: in-memory collection
//!   stores, one per entity kind, each owning its records in
//!   insertion/load order together with an ID allocator.
//! - [`codec`]: CSV save/load with tolerant per-row parsing, duplicate-ID
//!   rejection, and directory-vs-file path resolution.
//! - [`stats`]: total revenue, total items, and top-3 product/buyer
//!   rankings over a sales snapshot.
//! - [`StoreError`]: operation- and file-scoped failures; row-scoped
//!   parse problems are skipped with a warning instead.
//!
//! ## Example
//!
//! ```
//! use storefront_rs::Inventory;
//! use rust_decimal_macros::dec;
//!
//! let mut inventory = Inventory::new();
//! let id = inventory
//!     .add("Dune", "Frank Herbert", "Sci-Fi", 3, dec!(12.50))
//!     .unwrap()
//!     .id();
//!
//! let product = inventory.find_by_name("Dune").unwrap();
//! assert_eq!(product.id(), id);
//! assert_eq!(product.total(), dec!(37.50));
//! ```
//!
//! ## Concurrency
//!
//! Everything is single-threaded and synchronous; each store is the sole
//! owner of its entities and every operation runs to completion before
//! the caller proceeds.

mod allocator;
mod base;
pub mod codec;
pub mod error;
mod inventory;
mod product;
mod sale;
mod sales;
pub mod stats;
mod user;
mod users;
pub mod validate;

pub use allocator::IdAllocator;
pub use base::{ProductId, Role, SaleId, UserId};
pub use error::StoreError;
pub use inventory::{Inventory, ProductUpdate};
pub use product::Product;
pub use sale::Sale;
pub use sales::SalesLog;
pub use user::User;
pub use users::{UserRegistry, UserUpdate};
