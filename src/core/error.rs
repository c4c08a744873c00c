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

/// Memory subsystem error types
use thiserror::Error;

/// Result type for memory subsystem operations
pub type Result<T> = std::result::Result<T, MembusError>;

/// Main error type for the memory subsystem
///
/// Every variant except `Io` and `Config` is a programming or configuration
/// error detected eagerly: construction checks fail before the object exists,
/// runtime checks fail the triggering call.
#[derive(Error, Debug)]
pub enum MembusError {
    #[error("Invalid memory size: {size} (must be a power of two between 1 and 2^32)")]
    InvalidSize { size: u64 },

    #[error("Component of size 0x{size:X} is not aligned at base 0x{base:08X}")]
    InvalidAlignment { base: u64, size: u64 },

    #[error(
        "Region [0x{base:X}, 0x{end:X}) overlaps mapped region [0x{existing_base:X}, 0x{existing_end:X})"
    )]
    OverlappingRegion {
        base: u64,
        end: u64,
        existing_base: u64,
        existing_end: u64,
    },

    #[error("ROM content of {content} bytes does not fit in {size} bytes")]
    ContentTooLarge { content: u64, size: u64 },

    #[error("ROM padding pattern is empty")]
    EmptyPadding,

    #[error("Unmapped memory access at 0x{address:08X}")]
    UnmappedAddress { address: u32 },

    #[error("Stack underflow: pop on an empty stack")]
    StackUnderflow,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Layout config error: {0}")]
    Config(#[from] ConfigError),
}

/// Layout configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("ROM region {region} must set exactly one of `bytes`, `words` or `image`")]
    RomContent { region: String },
}
