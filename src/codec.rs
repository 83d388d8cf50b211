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

//! CSV persistence for the three record tables.
//!
//! Every table is plain comma-delimited UTF-8 with a mandatory header on
//! fresh writes and a fixed column order per entity kind. Loading is
//! tolerant but safe: each data row parses independently, and a row that
//! is short, carries an unparseable number, or repeats an ID already seen
//! in the same pass is skipped with a warning that names the 1-based row
//! (the header counts as row 1). A fully consumed file is returned as a
//! complete buffer so the caller can swap it in atomically instead of
//! clearing its collection up front.
//!
//! # Wire format
//!
//! ```csv
//! saleID,username,product,quantity,price,role,total
//! 1,ana,Dune,2,10.50,2,21.00
//! ```
//!
//! The sale `total` column is redundant: written on save, ignored on
//! load, always derived in memory. The product table has no total column
//! at all.

use crate::base::{ProductId, Role, SaleId, UserId};
use crate::error::StoreError;
use crate::product::Product;
use crate::sale::Sale;
use crate::user::User;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How [`save_table`] treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Rewrite the file from scratch, header first.
    Overwrite,
    /// Append rows; the header is written only when the file is new.
    /// Suits repeated small writes, e.g. one sale per purchase, without
    /// fragmenting the file with duplicate headers.
    Append,
}

/// Result of [`load_table`].
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// No file at the path; the caller keeps its current collection.
    Missing,
    /// The file exists but is zero bytes; the caller keeps its current
    /// collection.
    Empty,
    /// The file was consumed. `records` replaces the caller's collection
    /// wholesale; `skipped` counts rows dropped with a warning.
    Loaded { records: Vec<T>, skipped: usize },
}

/// One persistable entity kind: header, default filename, and the row
/// mapping in both directions.
pub trait CsvTable: Sized {
    /// Column names, in the fixed wire order.
    const HEADER: &'static [&'static str];
    /// Filename appended when the caller hands us a directory.
    const DEFAULT_FILE_NAME: &'static str;
    /// Minimum column count for a row to be worth parsing.
    const MIN_FIELDS: usize;

    /// Positionally deserialized raw row.
    type Row: DeserializeOwned;

    fn from_row(row: Self::Row) -> Self;
    /// Raw ID, for duplicate detection within one load pass.
    fn id_value(&self) -> u32;
    /// Field values in wire order, including derived columns.
    fn to_fields(&self) -> Vec<String>;
}

/// Resolves the caller-supplied path per the extension rule: anything
/// without a `.csv` extension is treated as a directory and the table's
/// default filename is appended.
pub fn resolve_path<T: CsvTable>(path: &Path) -> PathBuf {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        path.to_path_buf()
    } else {
        path.join(T::DEFAULT_FILE_NAME)
    }
}

/// Writes `records` to `path`, creating parent directories as needed.
///
/// Returns the resolved path actually written.
///
/// # Errors
///
/// Fails on filesystem or CSV-writer errors; the in-memory collection is
/// never touched by a save.
pub fn save_table<T: CsvTable>(
    records: &[T],
    path: &Path,
    mode: WriteMode,
) -> Result<PathBuf, StoreError> {
    let path = resolve_path::<T>(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let (file, write_header) = match mode {
        WriteMode::Overwrite => (File::create(&path)?, true),
        WriteMode::Append => {
            let fresh = !path.exists();
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            (file, fresh)
        }
    };

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    if write_header {
        wtr.write_record(T::HEADER)?;
    }
    for record in records {
        wtr.write_record(record.to_fields())?;
    }
    wtr.flush()?;

    info!(path = %path.display(), rows = records.len(), "table saved");
    Ok(path)
}

/// Reads a table from `path`, parsing each data row independently.
///
/// Missing and zero-byte files are soft outcomes, not errors — the
/// caller keeps whatever it already holds. A header-only file loads as
/// an empty collection.
///
/// # Errors
///
/// Only filesystem-level failures (unreadable file mid-stream) abort the
/// call; row-scoped problems are skipped with a warning.
pub fn load_table<T: CsvTable>(path: &Path) -> Result<LoadOutcome<T>, StoreError> {
    let path = resolve_path::<T>(path);
    if !path.is_file() {
        info!(path = %path.display(), "no file found, starting fresh");
        return Ok(LoadOutcome::Missing);
    }
    if fs::metadata(&path)?.len() == 0 {
        info!(path = %path.display(), "file is empty");
        return Ok(LoadOutcome::Empty);
    }

    let file = File::open(&path)?;
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let mut records: Vec<T> = Vec::new();
    let mut seen: HashSet<u32> = HashSet::new();
    let mut skipped = 0usize;

    // Row 1 is the header, so data rows count from 2.
    for (i, result) in rdr.records().enumerate() {
        let row_index = i + 2;
        let mut raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), row = row_index, error = %e, "skipping malformed row");
                skipped += 1;
                continue;
            }
        };
        if raw.len() < T::MIN_FIELDS {
            warn!(
                path = %path.display(),
                row = row_index,
                columns = raw.len(),
                "skipping row with too few columns"
            );
            skipped += 1;
            continue;
        }
        // Legacy files may carry extra trailing columns; drop them
        // before the positional mapping.
        if raw.len() > T::HEADER.len() {
            raw.truncate(T::HEADER.len());
        }

        let row: T::Row = match raw.deserialize(None) {
            Ok(row) => row,
            Err(e) => {
                warn!(path = %path.display(), row = row_index, error = %e, "skipping unparseable row");
                skipped += 1;
                continue;
            }
        };
        let record = T::from_row(row);
        if !seen.insert(record.id_value()) {
            warn!(
                path = %path.display(),
                row = row_index,
                id = record.id_value(),
                "skipping row with duplicate ID"
            );
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    info!(path = %path.display(), rows = records.len(), skipped, "table loaded");
    Ok(LoadOutcome::Loaded { records, skipped })
}

/// Raw product row: `productID,name,author,category,quantity,price`.
#[derive(Debug, Deserialize)]
pub struct ProductRow {
    id: u32,
    name: String,
    author: String,
    category: String,
    quantity: u32,
    price: Decimal,
}

impl CsvTable for Product {
    const HEADER: &'static [&'static str] =
        &["productID", "name", "author", "category", "quantity", "price"];
    const DEFAULT_FILE_NAME: &'static str = "Inventory.csv";
    const MIN_FIELDS: usize = 6;

    type Row = ProductRow;

    fn from_row(row: ProductRow) -> Self {
        Product::new(
            ProductId(row.id),
            row.name,
            row.author,
            row.category,
            row.quantity,
            row.price,
        )
    }

    fn id_value(&self) -> u32 {
        self.id().0
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name.clone(),
            self.author.clone(),
            self.category.clone(),
            self.quantity.to_string(),
            self.price.to_string(),
        ]
    }
}

/// Raw sale row: `saleID,username,product,quantity,price,role,total`.
///
/// The trailing total is optional and discarded; the in-memory value is
/// always derived from price and quantity.
#[derive(Debug, Deserialize)]
pub struct SaleRow {
    id: u32,
    username: String,
    product: String,
    quantity: u32,
    price: Decimal,
    role: u8,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    #[allow(dead_code)]
    total: Option<Decimal>,
}

impl CsvTable for Sale {
    const HEADER: &'static [&'static str] =
        &["saleID", "username", "product", "quantity", "price", "role", "total"];
    const DEFAULT_FILE_NAME: &'static str = "Sales.csv";
    const MIN_FIELDS: usize = 6;

    type Row = SaleRow;

    fn from_row(row: SaleRow) -> Self {
        Sale::new(
            SaleId(row.id),
            row.username,
            row.product,
            row.quantity,
            row.price,
            Role(row.role),
        )
    }

    fn id_value(&self) -> u32 {
        self.id().0
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.username.clone(),
            self.product.clone(),
            self.quantity.to_string(),
            self.price.to_string(),
            self.role.to_string(),
            self.total().to_string(),
        ]
    }
}

/// Raw user row: `userID,name,username,password,role`.
#[derive(Debug, Deserialize)]
pub struct UserRow {
    id: u32,
    name: String,
    username: String,
    password: String,
    role: u8,
}

impl CsvTable for User {
    const HEADER: &'static [&'static str] = &["userID", "name", "username", "password", "role"];
    const DEFAULT_FILE_NAME: &'static str = "Users.csv";
    const MIN_FIELDS: usize = 5;

    type Row = UserRow;

    fn from_row(row: UserRow) -> Self {
        User::new(
            UserId(row.id),
            row.name,
            row.username,
            row.password,
            Role(row.role),
        )
    }

    fn id_value(&self) -> u32 {
        self.id().0
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name.clone(),
            self.username.clone(),
            self.password.clone(),
            self.role.to_string(),
        ]
    }
}
