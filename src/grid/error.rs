use std::fmt;

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate axis or slot number outside the 9x6 grid.
    OutOfRange {
        what: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    /// A surface size that is not a positive multiple of 9, or a row count outside 1..=6.
    InvalidSize {
        what: &'static str,
        value: i32,
        expected: &'static str,
    },
}

impl GridError {
    pub(crate) fn check(what: &'static str, value: i32, min: i32, max: i32) -> Result<()> {
        if value < min || value > max {
            return Err(GridError::OutOfRange {
                what,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfRange {
                what,
                value,
                min,
                max,
            } => write!(
                f,
                "{} has to be in the interval [{}, {}], got {}",
                what, min, max, value
            ),
            GridError::InvalidSize {
                what,
                value,
                expected,
            } => write!(f, "{} has to be {}, got {}", what, expected, value),
        }
    }
}

impl std::error::Error for GridError {}
