use std::collections::BTreeSet;

use super::coord::{Coordinate, GRID_HEIGHT, GRID_WIDTH};
use super::error::{GridError, Result};

/// A set of linear slot indices.
///
/// Ranges are values: every accessor hands out a snapshot and clipping
/// produces a new range, so a caller holding an older range never sees it
/// change underneath them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotRange {
    slots: BTreeSet<usize>,
}

impl SlotRange {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(coord: Coordinate) -> Self {
        Self::range(coord, coord)
    }

    /// Inclusive span over the flattened index between the two coordinates.
    ///
    /// This is linear, not geometric: `(8, 0)..(0, 1)` is just slots 8 and 9.
    pub fn range(a: Coordinate, b: Coordinate) -> Self {
        let lo = a.slot().min(b.slot());
        let hi = a.slot().max(b.slot());
        Self {
            slots: (lo..=hi).collect(),
        }
    }

    /// Every cell of the axis-aligned rectangle spanned by the two corners.
    pub fn rectangle(a: Coordinate, b: Coordinate) -> Self {
        let (x0, x1) = (a.x().min(b.x()), a.x().max(b.x()));
        let (y0, y1) = (a.y().min(b.y()), a.y().max(b.y()));
        let mut slots = BTreeSet::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                slots.insert(y * GRID_WIDTH + x);
            }
        }
        Self { slots }
    }

    pub fn full() -> Self {
        Self::rectangle(Coordinate::ORIGIN, Coordinate::LAST)
    }

    pub fn row(row: i32) -> Result<Self> {
        Ok(Self::rectangle(
            Coordinate::new(0, row)?,
            Coordinate::new(GRID_WIDTH as i32 - 1, row)?,
        ))
    }

    pub fn column(column: i32) -> Result<Self> {
        Ok(Self::rectangle(
            Coordinate::new(column, 0)?,
            Coordinate::new(column, GRID_HEIGHT as i32 - 1)?,
        ))
    }

    pub fn union<'a, I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = &'a SlotRange>,
    {
        let mut slots = BTreeSet::new();
        for range in ranges {
            slots.extend(range.slots.iter().copied());
        }
        Self { slots }
    }

    /// Returns the part of this range that fits a surface of `size` slots.
    pub fn clip_to_size(&self, size: i32) -> Result<Self> {
        validate_surface_size(size)?;
        Ok(Self {
            slots: self.slots.range(..size as usize).copied().collect(),
        })
    }

    /// In-place form of [`SlotRange::clip_to_size`].
    pub fn strip_to_inventory_size(&mut self, size: i32) -> Result<()> {
        validate_surface_size(size)?;
        self.slots.retain(|&slot| slot < size as usize);
        Ok(())
    }

    pub fn slots(&self) -> Vec<usize> {
        self.slots.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.slots.contains(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl From<Coordinate> for SlotRange {
    fn from(coord: Coordinate) -> Self {
        Self::single(coord)
    }
}

pub(crate) fn validate_surface_size(size: i32) -> Result<()> {
    if size < GRID_WIDTH as i32 || size % GRID_WIDTH as i32 != 0 {
        return Err(GridError::InvalidSize {
            what: "size",
            value: size,
            expected: "a positive multiple of 9",
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/grid/range.rs"]
mod tests;
