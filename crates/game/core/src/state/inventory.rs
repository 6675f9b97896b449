//! Account inventory.
//!
//! Counts are kept per structured [`ItemKey`]; zero counts are pruned on every
//! removal so iteration only yields owned items.

use std::collections::BTreeMap;

use super::item::{CreatureRef, ItemKey, Rarity};

/// Inventory entry used for serialization and listings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryEntry {
    pub item: ItemKey,
    pub count: u32,
}

/// Errors raised by inventory arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("not enough {item}: need {required}, have {available}")]
    Insufficient {
        item: ItemKey,
        required: u32,
        available: u32,
    },

    #[error("{item} count overflow")]
    Overflow { item: ItemKey },
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<InventoryEntry>", into = "Vec<InventoryEntry>")
)]
pub struct Inventory {
    items: BTreeMap<ItemKey, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: &ItemKey) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: ItemKey, count: u32) -> Result<(), InventoryError> {
        if count == 0 {
            return Ok(());
        }
        let current = self.count(&item);
        let next = current
            .checked_add(count)
            .ok_or_else(|| InventoryError::Overflow { item: item.clone() })?;
        self.items.insert(item, next);
        Ok(())
    }

    pub fn remove(&mut self, item: &ItemKey, count: u32) -> Result<(), InventoryError> {
        let available = self.count(item);
        if available < count {
            return Err(InventoryError::Insufficient {
                item: item.clone(),
                required: count,
                available,
            });
        }
        if available == count {
            self.items.remove(item);
        } else {
            self.items.insert(item.clone(), available - count);
        }
        Ok(())
    }

    /// Applies a signed delta, adding for positive values and removing otherwise.
    pub fn apply_delta(&mut self, item: &ItemKey, delta: i64) -> Result<(), InventoryError> {
        let magnitude = u32::try_from(delta.unsigned_abs())
            .map_err(|_| InventoryError::Overflow { item: item.clone() })?;
        if delta >= 0 {
            self.add(item.clone(), magnitude)
        } else {
            self.remove(item, magnitude)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemKey, u32)> + '_ {
        self.items.iter().map(|(item, count)| (item, *count))
    }

    /// Owned creatures with their counts, most common tier first.
    pub fn creatures(&self) -> impl Iterator<Item = (&CreatureRef, u32)> + '_ {
        self.items
            .iter()
            .filter_map(|(item, count)| item.as_creature().map(|creature| (creature, *count)))
    }

    pub fn creatures_of(&self, rarity: Rarity) -> impl Iterator<Item = (&CreatureRef, u32)> + '_ {
        self.creatures()
            .filter(move |(creature, _)| creature.rarity == rarity)
    }

    pub fn total_creatures(&self) -> u64 {
        self.creatures().map(|(_, count)| u64::from(count)).sum()
    }

    pub fn has_creatures(&self) -> bool {
        self.creatures().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<InventoryEntry>> for Inventory {
    fn from(entries: Vec<InventoryEntry>) -> Self {
        let mut inventory = Inventory::new();
        for entry in entries.into_iter().filter(|entry| entry.count > 0) {
            let merged = inventory.count(&entry.item).saturating_add(entry.count);
            inventory.items.insert(entry.item, merged);
        }
        inventory
    }
}

impl From<Inventory> for Vec<InventoryEntry> {
    fn from(inventory: Inventory) -> Self {
        inventory
            .items
            .into_iter()
            .map(|(item, count)| InventoryEntry { item, count })
            .collect()
    }
}
