// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Memory Tests
//!
//! This module contains tests for the memory components and the bus,
//! organized into logical categories:
//!
//! - `basic`: `Memory` trait behaviour, size checks and byte order
//! - `rom`: ROM construction, padding and write suppression
//! - `ram`: RAM construction and read/write access
//! - `map`: bus construction invariants and address decoding
//! - `regions`: the interval table behind the bus
//! - `helpers`: Common test utilities
//!
//! Tests cover:
//! - Wraparound addressing for single bytes and straddling words
//! - 8-bit, 16-bit and 32-bit access in both byte orders
//! - Construction-time errors (size, alignment, overlap, content, padding)
//! - Nested maps and shared components

use super::*;
use crate::core::error::MembusError;

mod helpers;
mod regions;
