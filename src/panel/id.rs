use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identity of one panel surface.
///
/// Ids are handed out from a process-wide counter, so two panels never share
/// one even when their titles and contents are identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

impl SurfaceId {
    pub fn fresh() -> Self {
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(v: u64) -> Self {
        Self(v)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panel/id.rs"]
mod tests;
