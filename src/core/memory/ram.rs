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

//! Read-write memory

use super::{check_size, Address, ByteOrder, Memory};
use crate::core::error::Result;

/// Read-write memory component
///
/// The initial contents are unspecified. The buffer happens to start zeroed,
/// but callers must write before they read.
#[derive(Debug, Clone)]
pub struct Ram {
    data: Box<[u8]>,
    mask: Address,
    byte_order: ByteOrder,
}

impl Ram {
    /// Size used by [`Ram::default`]
    pub const DEFAULT_SIZE: u64 = 256;

    /// Create a RAM of `size` bytes
    ///
    /// # Errors
    ///
    /// Returns `MembusError::InvalidSize` unless `size` is a power of two
    /// between 1 and 2^32.
    ///
    /// # Example
    ///
    /// ```
    /// use membus::core::memory::{ByteOrder, Memory, Ram};
    ///
    /// let mut ram = Ram::new(1024, ByteOrder::Little).unwrap();
    /// ram.write_word(0x10, 0x12345678).unwrap();
    /// assert_eq!(ram.read_byte(0x10).unwrap(), 0x78);
    ///
    /// assert!(Ram::new(1000, ByteOrder::Little).is_err());
    /// ```
    pub fn new(size: u64, byte_order: ByteOrder) -> Result<Self> {
        let size = check_size(size)? as usize;
        Ok(Self {
            data: vec![0u8; size].into_boxed_slice(),
            mask: (size - 1) as Address,
            byte_order,
        })
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self {
            data: vec![0u8; Self::DEFAULT_SIZE as usize].into_boxed_slice(),
            mask: (Self::DEFAULT_SIZE - 1) as Address,
            byte_order: ByteOrder::Big,
        }
    }
}

impl Memory for Ram {
    #[inline]
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    #[inline]
    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[inline]
    fn mask(&self) -> Address {
        self.mask
    }

    #[inline]
    fn read_byte(&self, address: Address) -> Result<u8> {
        Ok(self.data[(address & self.mask) as usize])
    }

    #[inline]
    fn write_byte(&mut self, address: Address, value: u8) -> Result<()> {
        self.data[(address & self.mask) as usize] = value;
        Ok(())
    }
}
