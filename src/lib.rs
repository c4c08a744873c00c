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

//! Address-space memory subsystem for small emulated machines
//!
//! This library provides composable byte-addressable memory components
//! (ROM, RAM) and a memory map that decodes addresses onto them, plus a
//! small 32-bit evaluation stack.
//!
//! # Example
//!
//! ```
//! use membus::core::memory::{share, ByteOrder, Memory, MemoryMap, Ram, Rom, RomOptions};
//!
//! let bios = Rom::from_words(&[0x3C080000, 0x35080010], &RomOptions::default().with_size(0x100)).unwrap();
//! let ram = Ram::new(0x100, ByteOrder::Big).unwrap();
//!
//! let mut bus = MemoryMap::new([(0x000, share(bios)), (0x100, share(ram))], ByteOrder::Big).unwrap();
//!
//! assert_eq!(bus.read_word(0x004).unwrap(), 0x35080010);
//! bus.write_word(0x180, 0xCAFEBABE).unwrap();
//! assert_eq!(bus.read_word(0x180).unwrap(), 0xCAFEBABE);
//! ```

pub mod core;
