//! Big block depot (sector allocation table).

use super::layout::{ContainerLayout, SectorSlot};

/// Depot contents for `layout`, one slot per sector, padded with free slots
/// to whole depot sectors.
///
/// Layout: the data chain `0 → 1 → … → big_blocks - 1`, an end of chain for
/// the single directory sector at `root_start`, a marker for every depot
/// sector, then free slots.
pub fn depot_slots(layout: &ContainerLayout) -> Vec<SectorSlot> {
    let total = layout.depot_slot_count();
    let mut slots = Vec::with_capacity(total);

    slots.extend((1..layout.big_blocks()).map(SectorSlot::Index));
    // Two consecutive end-of-chain slots (data chain, then directory). This
    // is exactly what reader-compatible files contain; do not collapse it.
    slots.push(SectorSlot::EndOfChain);
    slots.push(SectorSlot::EndOfChain);
    slots.extend((0..layout.list_blocks()).map(|_| SectorSlot::FatMarker));
    slots.resize(total, SectorSlot::Free);

    slots
}

/// Serialized depot, `list_blocks * 512` bytes.
pub fn depot_bytes(layout: &ContainerLayout) -> Vec<u8> {
    depot_slots(layout)
        .into_iter()
        .flat_map(SectorSlot::to_le_bytes)
        .collect()
}

/// Follow the chain starting at `start`, returning the visited sectors.
///
/// Returns `None` if the chain leaves the table, hits a non-chain sentinel,
/// or loops.
pub fn walk_chain(slots: &[SectorSlot], start: u32) -> Option<Vec<u32>> {
    let mut visited = Vec::new();
    let mut current = start;
    loop {
        if visited.len() > slots.len() {
            return None;
        }
        visited.push(current);
        match slots.get(current as usize)? {
            SectorSlot::Index(next) => current = *next,
            SectorSlot::EndOfChain => return Some(visited),
            SectorSlot::Free | SectorSlot::FatMarker => return None,
        }
    }
}
