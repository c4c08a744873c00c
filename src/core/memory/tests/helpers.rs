// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Helper functions for memory tests

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Creates a RAM of `size` bytes, failing the test on invalid sizes
pub fn ram(size: u64, byte_order: ByteOrder) -> Ram {
    Ram::new(size, byte_order).expect("valid RAM size")
}

/// Creates a RAM already wrapped for sharing, keeping the typed handle
pub fn shared_ram(size: u64, byte_order: ByteOrder) -> Rc<RefCell<Ram>> {
    Rc::new(RefCell::new(ram(size, byte_order)))
}

/// Creates a ROM holding `content` with default options
pub fn rom(content: &[u8]) -> Rom {
    Rom::from_bytes(content, &RomOptions::default()).expect("valid ROM")
}

/// Creates a RAM whose bytes hold their own offset (0, 1, 2, ...)
pub fn counting_ram(size: u64, byte_order: ByteOrder) -> Ram {
    let mut ram = ram(size, byte_order);
    for offset in 0..size {
        ram.write_byte(offset as Address, offset as u8).unwrap();
    }
    ram
}

/// Creates the two-RAM bus used by several tests: `[0, 4)` and `[4, 8)`
pub fn split_bus(byte_order: ByteOrder) -> (MemoryMap, Rc<RefCell<Ram>>, Rc<RefCell<Ram>>) {
    let low = shared_ram(4, byte_order);
    let high = shared_ram(4, byte_order);
    let bus = MemoryMap::new(
        [(0, low.clone() as SharedMemory), (4, high.clone() as SharedMemory)],
        byte_order,
    )
    .expect("valid map");
    (bus, low, high)
}
