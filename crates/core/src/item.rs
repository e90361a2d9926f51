//! Waste items and bins.

use arrayvec::ArrayVec;

use crate::types::{
    Category, ItemId, ItemStatus, Rect, BIN_BOTTOM_OFFSET, BIN_COLUMNS, BIN_HEIGHT, BIN_WIDTH,
    WORLD_HEIGHT, WORLD_WIDTH,
};

/// A waste item of the current level.
///
/// Position is not stored here: once released, the physics world owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WasteItem {
    pub id: ItemId,
    pub category: Category,
    /// Sprite variant (1-based).
    pub variant: u8,
    /// World x the item is released at.
    pub spawn_x: f32,
    pub status: ItemStatus,
}

impl WasteItem {
    pub fn new(id: ItemId, category: Category, variant: u8, spawn_x: f32) -> Self {
        Self {
            id,
            category,
            variant,
            spawn_x,
            status: ItemStatus::Pending,
        }
    }
}

/// A bin accepting one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub category: Category,
    pub region: Rect,
}

/// One bin per category, kept in canonical category order.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSet {
    bins: ArrayVec<Bin, 3>,
}

impl BinSet {
    /// Build from arbitrary bins; order is normalised and duplicates keep the first.
    pub fn new(bins: impl IntoIterator<Item = Bin>) -> Self {
        let mut slots: [Option<Bin>; 3] = [None; 3];
        for bin in bins {
            let slot = &mut slots[bin.category.index()];
            if slot.is_none() {
                *slot = Some(bin);
            }
        }
        Self {
            bins: slots.into_iter().flatten().collect(),
        }
    }

    /// The shipped layout: three 100x250 bins along the bottom edge.
    pub fn standard(world_w: f32, world_h: f32) -> Self {
        Self::new(Category::ALL.iter().zip(BIN_COLUMNS).map(|(&category, column)| Bin {
            category,
            region: Rect::from_center(
                world_w * column,
                world_h - BIN_BOTTOM_OFFSET,
                BIN_WIDTH,
                BIN_HEIGHT,
            ),
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter()
    }

    pub fn get(&self, category: Category) -> Option<&Bin> {
        self.bins.iter().find(|b| b.category == category)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

impl Default for BinSet {
    fn default() -> Self {
        Self::standard(WORLD_WIDTH, WORLD_HEIGHT)
    }
}
