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

//! Memory map (bus)
//!
//! A [`MemoryMap`] partitions its address space into regions, each bound to a
//! component at a base address. Accesses are decoded to the owning component
//! and forwarded with the base subtracted:
//!
//! ```text
//!  global address ── & mask ──► RegionTable::lookup ──► (base, component)
//!                                                            │
//!                          component.read_byte(address - base)
//! ```
//!
//! # Invariants (checked by [`MemoryMap::new`])
//!
//! - every component size is a power of two
//! - every base is aligned to its component's size
//! - no two regions overlap
//!
//! The map's own size is the smallest power of two covering the highest
//! mapped address, so addresses past that wrap back to the start of the map.
//!
//! Components are shared, not owned. Mapping one component into two different
//! maps is allowed; keeping that consistent is up to the caller.

use super::{
    check_size, covering_size, Address, ByteOrder, Memory, Region, RegionTable, SharedMemory,
};
use crate::core::error::{MembusError, Result};

/// Address-decoding bus over a set of memory components
#[derive(Debug, Clone)]
pub struct MemoryMap {
    regions: RegionTable,
    size: u64,
    mask: Address,
    byte_order: ByteOrder,
}

impl MemoryMap {
    /// Build a map from `(base, component)` bindings
    ///
    /// # Errors
    ///
    /// - `MembusError::InvalidSize` if a component reports a size that is not
    ///   a power of two
    /// - `MembusError::InvalidAlignment` if a base is not a multiple of its
    ///   component's size
    /// - `MembusError::OverlappingRegion` if two regions intersect
    ///
    /// # Example
    ///
    /// ```
    /// use membus::core::error::MembusError;
    /// use membus::core::memory::{share, ByteOrder, MemoryMap, Ram};
    ///
    /// let result = MemoryMap::new(
    ///     [
    ///         (0, share(Ram::new(8, ByteOrder::Big).unwrap())),
    ///         (4, share(Ram::new(4, ByteOrder::Big).unwrap())),
    ///     ],
    ///     ByteOrder::Big,
    /// );
    /// assert!(matches!(result, Err(MembusError::OverlappingRegion { .. })));
    /// ```
    pub fn new(
        mapping: impl IntoIterator<Item = (Address, SharedMemory)>,
        byte_order: ByteOrder,
    ) -> Result<Self> {
        let mut regions = RegionTable::new();

        for (base, component) in mapping {
            let base = u64::from(base);
            let size = check_size(component.borrow().len())?;

            if base & (size - 1) != 0 {
                return Err(MembusError::InvalidAlignment { base, size });
            }

            regions.insert(base, base + size, component)?;
            log::debug!("Mapped region [0x{:08X}, 0x{:08X})", base, base + size);
        }

        let size = match regions.upper_bound() {
            Some(end) => covering_size(end)?,
            None => 1,
        };

        log::debug!(
            "Memory map built: {} regions, 0x{:X} bytes, {:?}",
            regions.len(),
            size,
            byte_order
        );

        Ok(Self {
            regions,
            size,
            mask: (size - 1) as Address,
            byte_order,
        })
    }

    /// Decode an address into its component and the component-local address
    ///
    /// # Errors
    ///
    /// Returns `MembusError::UnmappedAddress` (with the masked address) if no
    /// region contains it.
    ///
    /// # Example
    ///
    /// ```
    /// use membus::core::memory::{share, ByteOrder, MemoryMap, Ram};
    ///
    /// let map = MemoryMap::new(
    ///     [(0x100, share(Ram::new(0x100, ByteOrder::Big).unwrap()))],
    ///     ByteOrder::Big,
    /// )
    /// .unwrap();
    ///
    /// let (_, local) = map.decode(0x1F0).unwrap();
    /// assert_eq!(local, 0xF0);
    /// assert!(map.decode(0x10).is_err());
    /// ```
    pub fn decode(&self, address: Address) -> Result<(SharedMemory, Address)> {
        let region = self.region_at(address)?;
        let local = (u64::from(address & self.mask) - region.base) as Address;
        Ok((region.component.clone(), local))
    }

    /// Iterate `(base, end, component)` for every region in address order
    pub fn regions(&self) -> impl Iterator<Item = (u64, u64, &SharedMemory)> {
        self.regions
            .iter()
            .map(|region| (region.base, region.end, &region.component))
    }

    /// Number of mapped regions
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    fn region_at(&self, address: Address) -> Result<&Region> {
        let address = address & self.mask;
        self.regions
            .lookup(u64::from(address))
            .ok_or(MembusError::UnmappedAddress { address })
    }
}

impl Memory for MemoryMap {
    #[inline]
    fn len(&self) -> u64 {
        self.size
    }

    #[inline]
    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[inline]
    fn mask(&self) -> Address {
        self.mask
    }

    fn read_byte(&self, address: Address) -> Result<u8> {
        let region = self.region_at(address)?;
        let local = (u64::from(address & self.mask) - region.base) as Address;
        region.component.borrow().read_byte(local)
    }

    fn write_byte(&mut self, address: Address, value: u8) -> Result<()> {
        let region = self.region_at(address)?;
        let local = (u64::from(address & self.mask) - region.base) as Address;
        region.component.borrow_mut().write_byte(local, value)
    }
}
