//! gridpanel - component-based overlay UIs on host container surfaces
//!
//! Module layout:
//! - grid: 9x6 coordinates and slot ranges
//! - component: display items and buttons placed into slots
//! - panel: the slot -> component grid, interaction policy and callbacks
//! - router: per-open event routing and the host-facing event bus
//! - event: click / drag / close events delivered by the host
//! - host: the host boundary, a headless host and (feature `tui`) a terminal host
//! - config: JSON panel layouts

pub mod component;
pub mod config;
pub mod event;
pub mod grid;
pub mod host;
pub mod panel;
pub mod router;

pub use component::{Button, Component, Icon, Item, Press};
pub use event::{Actor, ActorId, ClickEvent, CloseEvent, DragEvent, HostEvent};
pub use grid::{Coordinate, GridError, SlotRange};
pub use panel::id::SurfaceId;
pub use panel::Panel;
pub use router::{EventBus, InteractionRouter, RouterState, Subscription};
