use super::error::{GridError, Result};

pub const GRID_WIDTH: usize = 9;
pub const GRID_HEIGHT: usize = 6;
pub const GRID_SLOTS: usize = GRID_WIDTH * GRID_HEIGHT;

/// A validated cell of the 9x6 grid.
///
/// Both axes are checked on construction, so every `Coordinate` in
/// circulation maps to a slot in `0..54`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    x: u8,
    y: u8,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };
    pub const LAST: Self = Self {
        x: GRID_WIDTH as u8 - 1,
        y: GRID_HEIGHT as u8 - 1,
    };

    pub fn new(x: i32, y: i32) -> Result<Self> {
        GridError::check("x", x, 0, GRID_WIDTH as i32 - 1)?;
        GridError::check("y", y, 0, GRID_HEIGHT as i32 - 1)?;
        Ok(Self {
            x: x as u8,
            y: y as u8,
        })
    }

    pub fn from_slot(slot: usize) -> Result<Self> {
        if slot >= GRID_SLOTS {
            return Err(GridError::OutOfRange {
                what: "slot",
                value: i32::try_from(slot).unwrap_or(i32::MAX),
                min: 0,
                max: GRID_SLOTS as i32 - 1,
            });
        }
        Ok(Self {
            x: (slot % GRID_WIDTH) as u8,
            y: (slot / GRID_WIDTH) as u8,
        })
    }

    pub fn x(&self) -> usize {
        self.x as usize
    }

    pub fn y(&self) -> usize {
        self.y as usize
    }

    pub fn slot(&self) -> usize {
        self.y() * GRID_WIDTH + self.x()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/coord.rs"]
mod tests;
