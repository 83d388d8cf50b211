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

//! User registry.
//!
//! Owns every [`User`] in insertion/load order. The `name` field is the
//! lookup key, unique case-insensitively — checked at creation only,
//! updates are not re-validated.

use crate::allocator::IdAllocator;
use crate::base::{Role, UserId};
use crate::codec::{self, LoadOutcome, WriteMode};
use crate::error::StoreError;
use crate::user::User;
use std::path::Path;

/// Partial update for [`UserRegistry::update`]. `None` (or an empty
/// string) leaves the field unchanged.
#[derive(Debug, Default, Clone)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// In-memory owner of all user accounts.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Vec<User>,
    ids: IdAllocator,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    /// A registry seeded with one administrator and one client, so a
    /// fresh data directory has someone who can log in.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .add("Administrator", "admin", "admin", Role::ADMIN)
            .ok();
        registry.add("Client", "client", "client", Role::CLIENT).ok();
        registry
    }

    /// Adds a user with a freshly allocated ID.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateName`] if a user with this name already
    /// exists, compared case-insensitively.
    pub fn add(
        &mut self,
        name: &str,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<&User, StoreError> {
        if self.find_by_name(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let id = UserId(self.ids.next());
        self.users
            .push(User::new(id, name, username, password, role));
        Ok(self.users.last().unwrap())
    }

    /// Case-insensitive exact-name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive substring match over name and username, or an
    /// exact match on the ID rendered as a string.
    pub fn search(&self, query: &str) -> Vec<&User> {
        let needle = query.to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle)
                    || u.username.to_lowercase().contains(&needle)
                    || u.id().to_string() == query
            })
            .collect()
    }

    /// Applies the non-empty fields of `update` to the user named
    /// `name` (matched case-insensitively).
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no user matches.
    pub fn update(&mut self, name: &str, update: UserUpdate) -> Result<(), StoreError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        if let Some(new_name) = update.name.filter(|n| !n.trim().is_empty()) {
            user.name = new_name;
        }
        if let Some(username) = update.username.filter(|u| !u.trim().is_empty()) {
            user.username = username;
        }
        if let Some(password) = update.password.filter(|p| !p.trim().is_empty()) {
            user.password = password;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        Ok(())
    }

    /// All users in insertion/load order.
    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn save_csv(&self, path: &Path, mode: WriteMode) -> Result<(), StoreError> {
        codec::save_table(&self.users, path, mode)?;
        Ok(())
    }

    /// Replaces the registry with the file's contents; missing and
    /// zero-byte files leave the current users in place. Returns the
    /// number of skipped rows.
    pub fn load_csv(&mut self, path: &Path) -> Result<usize, StoreError> {
        match codec::load_table::<User>(path)? {
            LoadOutcome::Missing | LoadOutcome::Empty => Ok(0),
            LoadOutcome::Loaded { records, skipped } => {
                for user in &records {
                    self.ids.observe(user.id().0);
                }
                self.users = records;
                Ok(skipped)
            }
        }
    }
}
