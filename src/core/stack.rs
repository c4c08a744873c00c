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

//! 32-bit evaluation stack
//!
//! Values are truncated to 32 bits on push, so negative inputs are stored in
//! two's complement: pushing `-50` stores `0xFFFFFFCE`.

use crate::core::error::{MembusError, Result};

/// LIFO stack of 32-bit unsigned values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word32Stack {
    values: Vec<u32>,
}

impl Word32Stack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `value` truncated to 32 bits
    ///
    /// # Example
    ///
    /// ```
    /// use membus::core::stack::Word32Stack;
    ///
    /// let mut stack = Word32Stack::new();
    /// stack.push(-1);
    /// stack.push(0x1_0000_0002);
    /// assert_eq!(stack.pop().unwrap(), 2);
    /// assert_eq!(stack.pop().unwrap(), 0xFFFF_FFFF);
    /// ```
    #[inline]
    pub fn push(&mut self, value: i64) {
        self.values.push(value as u32);
    }

    /// Remove and return the most recently pushed value
    ///
    /// # Errors
    ///
    /// Returns `MembusError::StackUnderflow` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Result<u32> {
        self.values.pop().ok_or(MembusError::StackUnderflow)
    }

    /// Most recently pushed value, without removing it
    pub fn peek(&self) -> Option<u32> {
        self.values.last().copied()
    }

    /// Number of values on the stack
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every value
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = Word32Stack::new();

        stack.push(1);
        stack.push(100);
        stack.push(-50);

        assert_eq!(stack.pop().unwrap(), 0xFFFFFFCE);
        assert_eq!(stack.pop().unwrap(), 100);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek(), Some(1));
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut stack = Word32Stack::new();

        assert!(matches!(stack.pop(), Err(MembusError::StackUnderflow)));
    }

    #[test]
    fn test_pop_after_draining_underflows() {
        let mut stack = Word32Stack::new();
        stack.push(7);

        assert_eq!(stack.pop().unwrap(), 7);
        assert!(stack.is_empty());
        assert!(matches!(stack.pop(), Err(MembusError::StackUnderflow)));
    }

    #[test]
    fn test_push_truncates_to_32_bits() {
        let mut stack = Word32Stack::new();

        stack.push(0xFFFF_FFFF);
        stack.push(0x1_0000_0000);
        stack.push(i64::MIN);
        stack.push(-1);

        assert_eq!(stack.pop().unwrap(), 0xFFFF_FFFF);
        assert_eq!(stack.pop().unwrap(), 0);
        assert_eq!(stack.pop().unwrap(), 0);
        assert_eq!(stack.pop().unwrap(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_peek_and_clear() {
        let mut stack = Word32Stack::new();
        assert_eq!(stack.peek(), None);

        stack.push(3);
        stack.push(4);
        assert_eq!(stack.peek(), Some(4));
        assert_eq!(stack.len(), 2);

        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.peek(), None);
    }
}
