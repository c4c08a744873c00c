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

//! Shared fixtures and assertions for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use membus::core::memory::{share, ByteOrder, Memory, MemoryMap, Ram, Rom, RomOptions, SharedMemory};

/// Install a test logger honouring `RUST_LOG`
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Small machine: 256-byte boot ROM at 0x000, 256-byte RAM at 0x100
pub struct Machine {
    pub bus: MemoryMap,
    pub ram: Rc<RefCell<Ram>>,
}

/// Build the small machine with the given boot program
pub fn machine(program: &[u32], byte_order: ByteOrder) -> Machine {
    let options = RomOptions::default()
        .with_size(0x100)
        .with_byte_order(byte_order);
    let rom = Rom::from_words(program, &options).expect("boot ROM");
    let ram = Rc::new(RefCell::new(
        Ram::new(0x100, byte_order).expect("work RAM"),
    ));

    let bus = MemoryMap::new(
        [(0x000, share(rom)), (0x100, ram.clone() as SharedMemory)],
        byte_order,
    )
    .expect("machine map");

    Machine { bus, ram }
}

/// Assert memory contains expected word at address
pub fn assert_memory_word(memory: &dyn Memory, addr: u32, expected: u32) {
    let actual = memory.read_word(addr).expect("Failed to read memory");
    assert_eq!(
        actual, expected,
        "Memory at 0x{:08X} mismatch: expected 0x{:08X}, got 0x{:08X}",
        addr, expected, actual
    );
}
