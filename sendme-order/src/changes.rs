use crate::item::{Item, ItemDraft, ItemError, ItemId};

/// Default item cap per order
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// The order's shopping list: add, edit and remove items under a fixed cap
#[derive(Debug, Clone)]
pub struct ItemCollection {
    items: Vec<Item>,
    max_items: usize,
    last_id: ItemId,
}

impl ItemCollection {
    pub fn new(max_items: usize) -> Self {
        Self {
            items: Vec::new(),
            max_items,
            last_id: 0,
        }
    }

    /// Add an item created at `timestamp_millis`. The id is that timestamp,
    /// bumped past the last issued id when two items share a millisecond.
    pub fn add(&mut self, draft: &ItemDraft, timestamp_millis: u64) -> Result<ItemId, ChangeError> {
        if self.items.len() >= self.max_items {
            tracing::warn!(max_items = self.max_items, "Rejected item: order is full");
            return Err(ChangeError::CapacityReached(self.max_items));
        }

        let id = timestamp_millis.max(self.last_id + 1);
        let item = Item::create(id, draft)?;
        self.last_id = id;

        tracing::debug!(item_id = id, category = %item.category(), "Item added");
        self.items.push(item);
        Ok(id)
    }

    /// Replace an item's contents, keeping its id and position
    pub fn edit(&mut self, item_id: ItemId, draft: &ItemDraft) -> Result<(), ChangeError> {
        let item = self.items.iter_mut()
            .find(|i| i.id() == item_id)
            .ok_or(ChangeError::ItemNotFound(item_id))?;

        item.replace_with(draft)?;
        tracing::debug!(item_id, "Item edited");
        Ok(())
    }

    pub fn remove(&mut self, item_id: ItemId) -> Result<Item, ChangeError> {
        let index = self.items.iter()
            .position(|i| i.id() == item_id)
            .ok_or(ChangeError::ItemNotFound(item_id))?;

        tracing::debug!(item_id, "Item removed");
        Ok(self.items.remove(index))
    }

    pub fn get(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == item_id)
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

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_items
    }
}

impl Default for ItemCollection {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChangeError {
    #[error("You have reached the maximum limit of {0} items.")]
    CapacityReached(usize),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error(transparent)]
    Invalid(#[from] ItemError),
}
