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

//! Error types for store and codec operations.
//!
//! Row-scoped parse problems are not errors: the codec skips the row,
//! logs a warning, and keeps going. Only operation-scoped conditions
//! (rejected add, missing update target) and filesystem-level failures
//! surface here.

use thiserror::Error;

/// Store and persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An entity with the same name already exists in the store.
    #[error("'{0}' already exists")]
    DuplicateName(String),

    /// No entity matches the given name.
    #[error("'{0}' not found")]
    NotFound(String),

    /// A purchase asked for more units than the product has in stock.
    #[error("insufficient stock for '{name}' ({available} available)")]
    InsufficientStock { name: String, available: u32 },

    /// Filesystem-level failure during save or load.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV writer/reader failure below the row level.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
