//! Grid addressing: the fixed 9x6 coordinate space and slot sets over it.

pub mod coord;
pub mod error;
pub mod range;

pub use coord::{Coordinate, GRID_HEIGHT, GRID_SLOTS, GRID_WIDTH};
pub use error::GridError;
pub use range::SlotRange;
