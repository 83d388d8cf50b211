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

//! User registry public API integration tests.

use storefront_rs::{Role, StoreError, UserRegistry, UserUpdate};

fn registry() -> UserRegistry {
    let mut reg = UserRegistry::new();
    reg.add("Alice Chen", "alice", "secret1", Role::ADMIN).unwrap();
    reg.add("Bob Marsh", "bob", "secret2", Role::CLIENT).unwrap();
    reg
}

#[test]
fn add_assigns_increasing_ids() {
    let reg = registry();
    let ids: Vec<u32> = reg.list().iter().map(|u| u.id().0).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn name_uniqueness_is_case_insensitive() {
    // Unlike products, user names collide regardless of case.
    let mut reg = registry();
    let result = reg.add("ALICE CHEN", "alice2", "pw", Role::CLIENT);
    assert!(matches!(result, Err(StoreError::DuplicateName(_))));
    assert_eq!(reg.len(), 2);
}

#[test]
fn find_by_name_is_case_insensitive() {
    let reg = registry();
    assert!(reg.find_by_name("alice chen").is_some());
    assert!(reg.find_by_name("Alice Chen").is_some());
    assert!(reg.find_by_name("Alice").is_none()); // exact name, not prefix
}

#[test]
fn search_matches_name_username_and_id() {
    let reg = registry();

    let by_name: Vec<_> = reg.search("marsh").iter().map(|u| u.username.clone()).collect();
    assert_eq!(by_name, ["bob"]);

    let by_username: Vec<_> = reg.search("ali").iter().map(|u| u.username.clone()).collect();
    assert_eq!(by_username, ["alice"]);

    let by_id = reg.search("2");
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].name, "Bob Marsh");
}

#[test]
fn search_on_empty_registry_returns_empty() {
    let reg = UserRegistry::new();
    assert!(reg.is_empty());
    assert!(reg.search("anyone").is_empty());
}

#[test]
fn update_overwrites_only_provided_fields() {
    let mut reg = registry();
    reg.update(
        "bob marsh", // matched case-insensitively
        UserUpdate {
            password: Some("rotated".into()),
            role: Some(Role::ADMIN),
            ..UserUpdate::default()
        },
    )
    .unwrap();

    let u = reg.find_by_name("Bob Marsh").unwrap();
    assert_eq!(u.password, "rotated");
    assert_eq!(u.role, Role::ADMIN);
    assert_eq!(u.username, "bob");
}

#[test]
fn update_ignores_empty_strings() {
    let mut reg = registry();
    reg.update(
        "Alice Chen",
        UserUpdate {
            username: Some(String::new()),
            ..UserUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(reg.find_by_name("Alice Chen").unwrap().username, "alice");
}

#[test]
fn update_does_not_recheck_uniqueness() {
    // Creation-time check only; a rename may collide.
    let mut reg = registry();
    reg.update(
        "Bob Marsh",
        UserUpdate {
            name: Some("Alice Chen".into()),
            ..UserUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(reg.len(), 2);
}

#[test]
fn update_missing_user_fails() {
    let mut reg = registry();
    let result = reg.update("Nobody", UserUpdate::default());
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn defaults_include_an_admin_and_a_client() {
    let reg = UserRegistry::with_defaults();
    assert_eq!(reg.len(), 2);
    assert!(reg.list().iter().any(|u| u.role == Role::ADMIN));
    assert!(reg.list().iter().any(|u| u.role == Role::CLIENT));
}
