//! Events the host delivers for its surfaces.
//!
//! Surfaces are referenced by `Option<SurfaceId>`: `None` stands for any
//! surface that does not belong to a panel (for example the actor's own
//! inventory below the panel).

use std::collections::BTreeSet;

use crate::panel::id::SurfaceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Actor {
    Player(ActorId),
    /// Anything the host reports that is not an interactive player.
    Other,
}

impl Actor {
    pub fn player(&self) -> Option<ActorId> {
        match self {
            Actor::Player(id) => Some(*id),
            Actor::Other => None,
        }
    }
}

impl From<ActorId> for Actor {
    fn from(id: ActorId) -> Self {
        Actor::Player(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    pub slot: usize,
    pub clicked: Option<SurfaceId>,
    pub top: Option<SurfaceId>,
    pub bottom: Option<SurfaceId>,
    pub actor: Actor,
    pub shift: bool,
    cancelled: bool,
}

impl ClickEvent {
    /// A plain click on `slot` of the top surface.
    pub fn new(slot: usize, surface: Option<SurfaceId>, actor: impl Into<Actor>) -> Self {
        Self {
            slot,
            clicked: surface,
            top: surface,
            bottom: None,
            actor: actor.into(),
            shift: false,
            cancelled: false,
        }
    }

    /// A click on the bottom surface while `top` is shown above it.
    pub fn in_bottom(
        slot: usize,
        top: Option<SurfaceId>,
        bottom: Option<SurfaceId>,
        actor: impl Into<Actor>,
    ) -> Self {
        Self {
            slot,
            clicked: bottom,
            top,
            bottom,
            actor: actor.into(),
            shift: false,
            cancelled: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Whether either surface of the view is `id`.
    pub fn involves(&self, id: SurfaceId) -> bool {
        self.top == Some(id) || self.bottom == Some(id)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEvent {
    /// Raw slots touched by the drag; indices past the top surface address the bottom one.
    pub slots: BTreeSet<usize>,
    pub surface: Option<SurfaceId>,
    pub actor: Actor,
    cancelled: bool,
}

impl DragEvent {
    pub fn new(
        slots: impl IntoIterator<Item = usize>,
        surface: Option<SurfaceId>,
        actor: impl Into<Actor>,
    ) -> Self {
        Self {
            slots: slots.into_iter().collect(),
            surface,
            actor: actor.into(),
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseEvent {
    pub surface: Option<SurfaceId>,
    pub actor: Actor,
}

impl CloseEvent {
    pub fn new(surface: Option<SurfaceId>, actor: impl Into<Actor>) -> Self {
        Self {
            surface,
            actor: actor.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Click(ClickEvent),
    Drag(DragEvent),
    Close(CloseEvent),
}

impl HostEvent {
    pub fn is_cancelled(&self) -> bool {
        match self {
            HostEvent::Click(e) => e.is_cancelled(),
            HostEvent::Drag(e) => e.is_cancelled(),
            HostEvent::Close(_) => false,
        }
    }
}
