//! Ordered, in-memory sequence of fetched items with a clamped cursor.

use shared::domain::Item;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemStore {
    items: Vec<Item>,
    pointer: usize,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole sequence and rewinds to the first item.
    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
        self.pointer = 0;
    }

    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.pointer)
    }

    /// Moves by `delta`, clamped to the first and last item. No wrap-around.
    pub fn advance(&mut self, delta: isize) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        let target = if delta.is_negative() {
            self.pointer.saturating_sub(delta.unsigned_abs())
        } else {
            self.pointer.saturating_add(delta.unsigned_abs())
        };
        self.pointer = target.min(last);
    }

    /// Drops the item under the cursor. Removing the tail moves the cursor
    /// back onto the new last item.
    pub fn remove_current(&mut self) -> Option<Item> {
        if self.pointer >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(self.pointer);
        if self.pointer >= self.items.len() {
            self.pointer = self.items.len().saturating_sub(1);
        }
        Some(removed)
    }

    /// Cursor position, or `None` while the store is empty.
    pub fn pointer(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.pointer)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/item_store_tests.rs"]
mod tests;
