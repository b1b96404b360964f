//! Host boundary.
//!
//! The host owns the real container surfaces and delivers their events.
//! Panels only see these two traits, which keeps rendering and event
//! plumbing out of the core.

use crate::component::Icon;
use crate::event::ActorId;
use crate::panel::id::SurfaceId;

/// A host-rendered surface of fixed size.
pub trait Surface {
    fn set_slot(&mut self, slot: usize, icon: Option<&Icon>);
}

pub trait Host {
    /// Creates a titled surface of `size` slots tagged with `id`; every event
    /// the host later reports for it must carry the same id.
    fn create_surface(&mut self, id: SurfaceId, title: &str, size: usize) -> Box<dyn Surface>;

    fn show(&mut self, id: SurfaceId, actor: ActorId);
}

pub mod headless;
#[cfg(feature = "tui")]
pub mod terminal;
