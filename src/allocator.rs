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

//! Per-store identifier allocation.
//!
//! Each collection store owns one [`IdAllocator`]. Fresh entities take
//! their ID from [`next`](IdAllocator::next); entities loaded from a file
//! keep their literal ID and report it through
//! [`observe`](IdAllocator::observe), so later allocations never collide
//! with anything already on disk, even when the file has gaps or is
//! unsorted.

/// Issues unique, strictly increasing positive identifiers.
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Creates an allocator whose first issued ID is `1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issues the next unused ID.
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Records an externally supplied ID, advancing the counter past it.
    pub fn observe(&mut self, id: u32) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::IdAllocator;

    #[test]
    fn starts_at_one() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.next(), 1);
        assert_eq!(alloc.next(), 2);
    }

    #[test]
    fn observe_advances_counter() {
        let mut alloc = IdAllocator::new();
        alloc.observe(7);
        assert_eq!(alloc.next(), 8);
    }

    #[test]
    fn observe_below_counter_is_noop() {
        let mut alloc = IdAllocator::new();
        alloc.observe(10);
        alloc.observe(3);
        assert_eq!(alloc.next(), 11);
    }

    #[test]
    fn observe_out_of_order() {
        // Files may carry unsorted IDs with gaps.
        let mut alloc = IdAllocator::new();
        for id in [5, 2, 9, 4] {
            alloc.observe(id);
        }
        assert_eq!(alloc.next(), 10);
        assert_eq!(alloc.next(), 11);
    }
}
