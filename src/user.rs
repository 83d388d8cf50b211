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

//! User accounts.

use crate::base::{Role, UserId};

/// An account that can log into the console.
///
/// `name` is the de-facto lookup key and must be unique
/// case-insensitively at creation time. The password is stored in
/// plaintext, as the file format dictates.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }
}
