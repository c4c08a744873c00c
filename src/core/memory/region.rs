// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interval table used by the memory map for address decoding
//!
//! Regions are half-open intervals `[base, end)` kept in a `BTreeMap` keyed
//! by their base. Since stored regions never overlap, the only candidate for
//! any point (or for any new interval's overlap check) is the region with the
//! greatest base at or below it, so both insertion and lookup are a single
//! O(log n) probe.

use std::collections::BTreeMap;

use super::SharedMemory;
use crate::core::error::{MembusError, Result};

/// A mapped component occupying `[base, end)`
#[derive(Clone)]
pub struct Region {
    /// First address of the region
    pub base: u64,
    /// One past the last address of the region
    pub end: u64,
    /// Component receiving accesses inside the region
    pub component: SharedMemory,
}

impl Region {
    /// Check if `address` falls inside this region
    #[inline]
    pub fn contains(&self, address: u64) -> bool {
        self.base <= address && address < self.end
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("base", &format_args!("0x{:08X}", self.base))
            .field("end", &format_args!("0x{:08X}", self.end))
            .finish_non_exhaustive()
    }
}

/// Non-overlapping set of regions with point lookup
#[derive(Debug, Default, Clone)]
pub struct RegionTable {
    regions: BTreeMap<u64, Region>,
}

impl RegionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `[base, end)`, rejecting any intersection with a stored region
    ///
    /// # Errors
    ///
    /// Returns `MembusError::OverlappingRegion` naming the first stored region
    /// the new interval intersects. Empty intervals are rejected as
    /// `MembusError::InvalidSize`.
    pub fn insert(&mut self, base: u64, end: u64, component: SharedMemory) -> Result<()> {
        if end <= base {
            return Err(MembusError::InvalidSize { size: 0 });
        }

        // Nearest region starting below `end`: if anything overlaps, it does.
        if let Some((_, existing)) = self.regions.range(..end).next_back() {
            if existing.end > base {
                return Err(MembusError::OverlappingRegion {
                    base,
                    end,
                    existing_base: existing.base,
                    existing_end: existing.end,
                });
            }
        }

        self.regions.insert(
            base,
            Region {
                base,
                end,
                component,
            },
        );
        Ok(())
    }

    /// Find the region containing `address`
    #[inline]
    pub fn lookup(&self, address: u64) -> Option<&Region> {
        self.regions
            .range(..=address)
            .next_back()
            .map(|(_, region)| region)
            .filter(|region| region.contains(address))
    }

    /// Highest end address over all regions
    pub fn upper_bound(&self) -> Option<u64> {
        self.regions.values().next_back().map(|region| region.end)
    }

    /// Number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Check if the table holds no regions
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate regions in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }
}
