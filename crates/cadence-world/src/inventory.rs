//! Inventory operations for avatars.
//!
//! An inventory maps item keys to quantities and is subject to a carry
//! capacity (total item count). All arithmetic is checked.

use std::collections::BTreeMap;

use crate::error::WorldError;

/// Total number of items carried.
///
/// Returns `None` if the sum overflows `u32`.
pub fn total_load(inventory: &BTreeMap<String, u32>) -> Option<u32> {
    inventory
        .values()
        .try_fold(0_u32, |total, qty| total.checked_add(*qty))
}

/// Quantity of `item` held.
pub fn quantity(inventory: &BTreeMap<String, u32>, item: &str) -> u32 {
    inventory.get(item).copied().unwrap_or(0)
}

/// Add `amount` of `item`, failing if the load would exceed `capacity`.
pub fn add_item(
    inventory: &mut BTreeMap<String, u32>,
    capacity: u32,
    item: &str,
    amount: u32,
) -> Result<(), WorldError> {
    let current_load = total_load(inventory).ok_or(WorldError::ArithmeticOverflow {
        context: "inventory load",
    })?;

    let full = || WorldError::InventoryFull {
        item: item.to_owned(),
        attempted: amount,
        current_load,
        capacity,
    };
    let new_load = current_load.checked_add(amount).ok_or_else(full)?;
    if new_load > capacity {
        return Err(full());
    }

    let entry = inventory.entry(item.to_owned()).or_insert(0);
    *entry = entry.checked_add(amount).ok_or(WorldError::ArithmeticOverflow {
        context: "item quantity",
    })?;
    Ok(())
}
