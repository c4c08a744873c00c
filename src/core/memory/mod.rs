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

//! Byte-addressable memory components and the bus that ties them together
//!
//! Every component implements the [`Memory`] trait: a power-of-two sized
//! address space with wraparound addressing, single-byte primitives supplied
//! by the component, and 16/32-bit access derived generically from them.
//!
//! # Components
//!
//! | Type          | Backing storage          | Writes        |
//! |---------------|--------------------------|---------------|
//! | [`Rom`]       | immutable byte buffer    | ignored       |
//! | [`Ram`]       | mutable byte buffer      | stored        |
//! | [`MemoryMap`] | other components         | delegated     |
//!
//! # Wraparound
//!
//! All addresses are reduced with `address & (len - 1)`. A multi-byte access
//! is split into single-byte accesses at `address, address + 1, ...`, each
//! wrapped on its own, so a word read at the last byte of a 4-byte space
//! reads bytes 3, 0, 1, 2.
//!
//! # Example
//!
//! ```
//! use membus::core::memory::{share, ByteOrder, Memory, MemoryMap, Ram, Rom, RomOptions};
//!
//! let rom = Rom::from_words(&[0xDEADBEEF], &RomOptions::default()).unwrap();
//! let ram = Ram::new(4, ByteOrder::Big).unwrap();
//!
//! let mut bus = MemoryMap::new([(0, share(rom)), (4, share(ram))], ByteOrder::Big).unwrap();
//!
//! bus.write_word(4, 0x12345678).unwrap();
//! assert_eq!(bus.read_word(0).unwrap(), 0xDEADBEEF);
//! assert_eq!(bus.read_word(4).unwrap(), 0x12345678);
//! assert_eq!(bus.read_word(2).unwrap(), 0xBEEF1234);
//! ```

pub mod map;
pub mod ram;
pub mod region;
pub mod rom;

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use crate::core::error::{MembusError, Result};

pub use map::MemoryMap;
pub use ram::Ram;
pub use region::{Region, RegionTable};
pub use rom::{Rom, RomOptions};

/// Address within a memory component
pub type Address = u32;

/// Largest supported address space (4 GiB)
pub const MAX_SIZE: u64 = 1 << 32;

/// Shared, non-owning handle to a memory component
///
/// A [`MemoryMap`] holds its components through this handle, so the caller
/// can keep a typed `Rc<RefCell<Ram>>` of its own and still hand the same
/// component to the bus.
pub type SharedMemory = Rc<RefCell<dyn Memory>>;

/// Wrap a component into a [`SharedMemory`] handle
pub fn share<M: Memory + 'static>(memory: M) -> SharedMemory {
    Rc::new(RefCell::new(memory))
}

/// Byte order used to assemble multi-byte values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Most significant byte at the lowest address
    #[default]
    Big,
    /// Least significant byte at the lowest address
    Little,
}

impl ByteOrder {
    /// Assemble a 32-bit value from four bytes in address order
    #[inline]
    pub fn decode_word(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        }
    }

    /// Split a 32-bit value into four bytes in address order
    #[inline]
    pub fn encode_word(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }

    /// Assemble a 16-bit value from two bytes in address order
    #[inline]
    pub fn decode_half(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Big => u16::from_be_bytes(bytes),
            ByteOrder::Little => u16::from_le_bytes(bytes),
        }
    }

    /// Split a 16-bit value into two bytes in address order
    #[inline]
    pub fn encode_half(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }
}

/// Byte-addressable, power-of-two sized address space
///
/// Implementors supply [`len`](Memory::len), [`byte_order`](Memory::byte_order)
/// and the two single-byte primitives. Every wider access is provided here in
/// terms of those primitives and must keep the per-byte wraparound behaviour
/// described in the [module docs](self).
///
/// # Example
///
/// ```
/// use membus::core::error::Result;
/// use membus::core::memory::{Address, ByteOrder, Memory};
///
/// /// Reads back the low byte of the address
/// struct Echo;
///
/// impl Memory for Echo {
///     fn len(&self) -> u64 {
///         256
///     }
///
///     fn byte_order(&self) -> ByteOrder {
///         ByteOrder::Little
///     }
///
///     fn read_byte(&self, address: Address) -> Result<u8> {
///         Ok((address & self.mask()) as u8)
///     }
///
///     fn write_byte(&mut self, _address: Address, _value: u8) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// assert_eq!(Echo.read_word(0xFE).unwrap(), 0x0100FFFE);
/// ```
pub trait Memory {
    /// Size of the address space in bytes (always a power of two)
    fn len(&self) -> u64;

    /// Byte order used by the multi-byte accessors
    fn byte_order(&self) -> ByteOrder;

    /// Read one byte at `address & mask`
    ///
    /// # Errors
    ///
    /// Returns `MembusError::UnmappedAddress` if a bus cannot decode the address.
    fn read_byte(&self, address: Address) -> Result<u8>;

    /// Write one byte at `address & mask`
    ///
    /// Read-only components silently discard the value.
    ///
    /// # Errors
    ///
    /// Returns `MembusError::UnmappedAddress` if a bus cannot decode the address.
    fn write_byte(&mut self, address: Address, value: u8) -> Result<()>;

    /// Address mask (`len - 1`)
    #[inline]
    fn mask(&self) -> Address {
        (self.len() - 1) as Address
    }

    /// Always `false` for a valid component; sizes start at one byte
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a 16-bit value from `address` and `address + 1`
    fn read_half(&self, address: Address) -> Result<u16> {
        let mut bytes = [0u8; 2];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_byte(address.wrapping_add(i as Address))?;
        }
        Ok(self.byte_order().decode_half(bytes))
    }

    /// Write a 16-bit value to `address` and `address + 1`
    fn write_half(&mut self, address: Address, value: u16) -> Result<()> {
        let bytes = self.byte_order().encode_half(value);
        for (i, byte) in bytes.into_iter().enumerate() {
            self.write_byte(address.wrapping_add(i as Address), byte)?;
        }
        Ok(())
    }

    /// Read a 32-bit value from `address .. address + 4`
    ///
    /// Each of the four byte addresses is wrapped independently, so a read
    /// straddling the end of the space picks up bytes from its start.
    ///
    /// # Example
    ///
    /// ```
    /// use membus::core::memory::{Memory, Rom, RomOptions};
    ///
    /// let rom = Rom::from_bytes(&[0x11, 0x22, 0x33, 0x44], &RomOptions::default()).unwrap();
    /// assert_eq!(rom.read_word(0).unwrap(), 0x11223344);
    /// assert_eq!(rom.read_word(3).unwrap(), 0x44112233);
    /// ```
    fn read_word(&self, address: Address) -> Result<u32> {
        let mut bytes = [0u8; 4];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_byte(address.wrapping_add(i as Address))?;
        }
        Ok(self.byte_order().decode_word(bytes))
    }

    /// Write a 32-bit value to `address .. address + 4`
    fn write_word(&mut self, address: Address, value: u32) -> Result<()> {
        let bytes = self.byte_order().encode_word(value);
        for (i, byte) in bytes.into_iter().enumerate() {
            self.write_byte(address.wrapping_add(i as Address), byte)?;
        }
        Ok(())
    }

    /// Fill `buf` with consecutive bytes starting at `address`
    fn read_bytes(&self, address: Address, buf: &mut [u8]) -> Result<()> {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(address.wrapping_add(i as Address))?;
        }
        Ok(())
    }

    /// Write `data` to consecutive bytes starting at `address`
    fn write_bytes(&mut self, address: Address, data: &[u8]) -> Result<()> {
        for (i, &byte) in data.iter().enumerate() {
            self.write_byte(address.wrapping_add(i as Address), byte)?;
        }
        Ok(())
    }
}

/// Check that `size` is a usable address-space size
///
/// # Errors
///
/// Returns `MembusError::InvalidSize` unless `size` is a power of two in
/// `1..=MAX_SIZE`.
pub fn check_size(size: u64) -> Result<u64> {
    if size == 0 || !size.is_power_of_two() || size > MAX_SIZE {
        return Err(MembusError::InvalidSize { size });
    }
    Ok(size)
}

/// Smallest valid size able to hold `len` bytes (1 for an empty extent)
pub(crate) fn covering_size(len: u64) -> Result<u64> {
    let size = len.max(1).checked_next_power_of_two().unwrap_or(0);
    check_size(size).map_err(|_| MembusError::InvalidSize { size: len })
}

#[cfg(test)]
mod tests;
