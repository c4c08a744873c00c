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

//! Core memory subsystem components
//!
//! This module contains:
//! - Memory trait and components (ROM, RAM, memory map)
//! - 32-bit evaluation stack
//! - Declarative layout configuration
//! - Error types

pub mod config;
pub mod error;
pub mod memory;
pub mod stack;

// Re-export commonly used types
pub use config::LayoutConfig;
pub use error::{ConfigError, MembusError, Result};
pub use memory::{share, ByteOrder, Memory, MemoryMap, Ram, Rom, RomOptions, SharedMemory};
pub use stack::Word32Stack;
