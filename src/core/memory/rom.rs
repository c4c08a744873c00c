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

//! Read-only memory
//!
//! A ROM is built once from its content and never changes afterwards. Any
//! space past the content is filled with a repeating padding pattern. The
//! pattern is laid over the whole address space starting at byte 0, so the
//! first padding byte is `padding[content.len() % padding.len()]`:
//!
//! ```text
//! content = 01 02 03, padding = AA BB, size = 8
//!
//! offset   0  1  2  3  4  5  6  7
//! pattern  AA BB AA BB AA BB AA BB
//! result   01 02 03 BB AA BB AA BB
//! ```

use std::fs;
use std::path::Path;

use super::{check_size, covering_size, Address, ByteOrder, Memory};
use crate::core::error::{MembusError, Result};

/// Construction options for [`Rom`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomOptions {
    /// Explicit size in bytes; the smallest power of two holding the content if unset
    pub size: Option<u64>,
    /// Byte order for word content and multi-byte reads
    pub byte_order: ByteOrder,
    /// Pattern repeated over the space not covered by content
    pub padding: Vec<u8>,
}

impl Default for RomOptions {
    fn default() -> Self {
        Self {
            size: None,
            byte_order: ByteOrder::Big,
            padding: vec![0xFF],
        }
    }
}

impl RomOptions {
    /// Set an explicit size
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the byte order
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Set the padding pattern
    pub fn with_padding(mut self, padding: impl Into<Vec<u8>>) -> Self {
        self.padding = padding.into();
        self
    }
}

/// Read-only memory component
///
/// Writes are accepted and discarded.
#[derive(Debug, Clone)]
pub struct Rom {
    data: Box<[u8]>,
    mask: Address,
    byte_order: ByteOrder,
}

impl Rom {
    /// Build a ROM from raw bytes
    ///
    /// # Errors
    ///
    /// - `MembusError::InvalidSize` if the explicit size is not a valid power
    ///   of two, or the content is too large for any valid size
    /// - `MembusError::ContentTooLarge` if the content exceeds the explicit size
    /// - `MembusError::EmptyPadding` if padding is needed but the pattern is empty
    ///
    /// # Example
    ///
    /// ```
    /// use membus::core::memory::{Rom, RomOptions};
    ///
    /// let options = RomOptions::default().with_size(8).with_padding([0xAA, 0xBB]);
    /// let rom = Rom::from_bytes(&[0x01, 0x02, 0x03], &options).unwrap();
    /// assert_eq!(rom.as_bytes(), &[0x01, 0x02, 0x03, 0xBB, 0xAA, 0xBB, 0xAA, 0xBB]);
    /// ```
    pub fn from_bytes(content: &[u8], options: &RomOptions) -> Result<Self> {
        let content_len = content.len() as u64;

        let size = match options.size {
            Some(size) => {
                check_size(size)?;
                if content_len > size {
                    return Err(MembusError::ContentTooLarge {
                        content: content_len,
                        size,
                    });
                }
                size
            }
            None => covering_size(content_len)?,
        };

        let size = size as usize;
        if content.len() < size && options.padding.is_empty() {
            return Err(MembusError::EmptyPadding);
        }

        let mut data = Vec::with_capacity(size);
        data.extend_from_slice(content);
        let padding = &options.padding;
        data.extend((content.len()..size).map(|offset| padding[offset % padding.len()]));

        log::debug!(
            "ROM built: {} content bytes, {} bytes total, {:?}",
            content.len(),
            size,
            options.byte_order
        );

        Ok(Self {
            data: data.into_boxed_slice(),
            mask: (size - 1) as Address,
            byte_order: options.byte_order,
        })
    }

    /// Build a ROM from 32-bit words, each encoded with `options.byte_order`
    ///
    /// # Errors
    ///
    /// Same as [`Rom::from_bytes`], measured on the encoded byte length.
    pub fn from_words(content: &[u32], options: &RomOptions) -> Result<Self> {
        let bytes: Vec<u8> = content
            .iter()
            .flat_map(|&word| options.byte_order.encode_word(word))
            .collect();
        Self::from_bytes(&bytes, options)
    }

    /// Load a ROM image from a file
    ///
    /// # Errors
    ///
    /// Returns `MembusError::Io` if the file cannot be read, otherwise the
    /// same errors as [`Rom::from_bytes`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use membus::core::memory::{Rom, RomOptions};
    ///
    /// let rom = Rom::load("boot.bin", &RomOptions::default().with_size(0x1000)).unwrap();
    /// ```
    pub fn load(path: impl AsRef<Path>, options: &RomOptions) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read(path)?;
        log::debug!("Loaded ROM image {} ({} bytes)", path.display(), content.len());
        Self::from_bytes(&content, options)
    }

    /// Full ROM contents, padding included
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Memory for Rom {
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

    fn write_byte(&mut self, address: Address, value: u8) -> Result<()> {
        log::trace!(
            "Attempt to write 0x{:02X} to ROM at 0x{:08X} (ignored)",
            value,
            address & self.mask
        );
        Ok(())
    }
}
