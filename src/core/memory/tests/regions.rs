// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Region table tests
//!
//! Tests for interval insertion, overlap rejection and point lookup.

use super::helpers::*;
use super::*;

fn component() -> SharedMemory {
    share(ram(1, ByteOrder::Big))
}

#[test]
fn test_lookup_boundaries() {
    let mut table = RegionTable::new();
    table.insert(0x10, 0x20, component()).unwrap();

    assert!(table.lookup(0x0F).is_none());
    assert_eq!(table.lookup(0x10).map(|r| r.base), Some(0x10));
    assert_eq!(table.lookup(0x1F).map(|r| r.base), Some(0x10));
    assert!(table.lookup(0x20).is_none());
}

#[test]
fn test_lookup_many_regions() {
    let mut table = RegionTable::new();
    for i in 0..64u64 {
        // Leave a one-slot gap after every region
        table.insert(i * 0x200, i * 0x200 + 0x100, component()).unwrap();
    }

    assert_eq!(table.len(), 64);
    assert_eq!(table.upper_bound(), Some(63 * 0x200 + 0x100));

    for i in 0..64u64 {
        let base = i * 0x200;
        assert_eq!(table.lookup(base + 0x80).map(|r| r.base), Some(base));
        assert!(table.lookup(base + 0x180).is_none());
    }
}

#[test]
fn test_overlap_cases() {
    let mut table = RegionTable::new();
    table.insert(0x100, 0x200, component()).unwrap();

    // Straddling the start, the end, fully inside, fully covering
    for (base, end) in [(0xF0, 0x110), (0x1F0, 0x210), (0x140, 0x150), (0x000, 0x400)] {
        assert!(matches!(
            table.insert(base, end, component()),
            Err(MembusError::OverlappingRegion {
                existing_base: 0x100,
                existing_end: 0x200,
                ..
            })
        ));
    }

    // Touching on either side is fine
    table.insert(0x0F0, 0x100, component()).unwrap();
    table.insert(0x200, 0x210, component()).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn test_empty_interval_rejected() {
    let mut table = RegionTable::new();

    assert!(table.insert(0x10, 0x10, component()).is_err());
    assert!(table.is_empty());
    assert_eq!(table.upper_bound(), None);
}

#[test]
fn test_iteration_sorted() {
    let mut table = RegionTable::new();
    table.insert(0x300, 0x400, component()).unwrap();
    table.insert(0x000, 0x100, component()).unwrap();
    table.insert(0x100, 0x200, component()).unwrap();

    let bases: Vec<u64> = table.iter().map(|r| r.base).collect();
    assert_eq!(bases, vec![0x000, 0x100, 0x300]);
    assert_eq!(table.upper_bound(), Some(0x400));
}
