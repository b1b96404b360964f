//! Interaction routing.
//!
//! Every `Panel::open` registers one [`InteractionRouter`] on the host's
//! [`EventBus`]. The host hands each event to the bus in delivery order and
//! the bus offers it to every active router; a router acts only on events for
//! its own panel surface and actor, and vetoes whatever the panel's policy
//! does not allow.

use slotmap::{new_key_type, SlotMap};

use crate::event::{Actor, ActorId, ClickEvent, CloseEvent, DragEvent, HostEvent};
use crate::panel::id::SurfaceId;
use crate::panel::Panel;

new_key_type! {
    pub struct RouterKey;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouterState {
    Active,
    TornDown,
}

pub struct InteractionRouter {
    panel: Panel,
    surface: SurfaceId,
    actor: ActorId,
    state: RouterState,
}

impl InteractionRouter {
    pub(crate) fn new(panel: Panel, actor: ActorId) -> Self {
        Self {
            surface: panel.id(),
            panel,
            actor,
            state: RouterState::Active,
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    fn is_own_actor(&self, actor: Actor) -> bool {
        self.state == RouterState::Active && actor.player() == Some(self.actor)
    }

    fn is_own_surface(&self, surface: Option<SurfaceId>) -> bool {
        surface == Some(self.surface)
    }

    pub fn handle_click(&mut self, event: &mut ClickEvent) {
        if !self.is_own_actor(event.actor) {
            return;
        }

        if event.shift {
            if !event.involves(self.surface) {
                return;
            }
            if !self.panel.shift_click_allowed() {
                tracing::debug!(surface = %self.surface, slot = event.slot, "shift-click vetoed");
                event.set_cancelled(true);
                return;
            }
        }

        if !self.is_own_surface(event.clicked) {
            tracing::trace!(surface = %self.surface, "click on foreign surface ignored");
            return;
        }

        let allowed = self.panel.is_interaction_allowed(event.slot);
        event.set_cancelled(!allowed);
        tracing::debug!(surface = %self.surface, slot = event.slot, allowed, "click routed");

        self.panel.interact(event);

        if let Some(callback) = self.panel.click_callback() {
            callback(event);
        }
    }

    pub fn handle_drag(&mut self, event: &mut DragEvent) {
        if !self.is_own_actor(event.actor) || !self.is_own_surface(event.surface) {
            return;
        }

        let allowed = self
            .panel
            .all_interaction_allowed(event.slots.iter().copied());
        event.set_cancelled(!allowed);
        tracing::debug!(
            surface = %self.surface,
            slots = event.slots.len(),
            allowed,
            "drag routed"
        );

        if let Some(callback) = self.panel.drag_callback() {
            callback(event);
        }
    }

    /// Returns true when this event tore the router down.
    pub fn handle_close(&mut self, event: &CloseEvent) -> bool {
        if !self.is_own_actor(event.actor) || !self.is_own_surface(event.surface) {
            return false;
        }

        if let Some(callback) = self.panel.close_callback() {
            callback(event);
        }

        self.state = RouterState::TornDown;
        tracing::debug!(surface = %self.surface, actor = self.actor.0, "router torn down");
        true
    }
}

/// Owned registration of one router. Released exactly once: by the first
/// matching close event or by [`EventBus::dispose`].
#[must_use = "dropping a subscription keeps the router registered until its surface closes"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    key: RouterKey,
    surface: SurfaceId,
    actor: ActorId,
}

impl Subscription {
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }
}

/// Fan-out of host events to the active routers.
#[derive(Default)]
pub struct EventBus {
    routers: SlotMap<RouterKey, InteractionRouter>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&mut self, panel: Panel, actor: ActorId) -> Subscription {
        let surface = panel.id();

        // One router per (surface, actor): re-opening replaces the old one.
        let stale: Vec<RouterKey> = self
            .routers
            .iter()
            .filter(|(_, r)| r.surface == surface && r.actor == actor)
            .map(|(key, _)| key)
            .collect();
        for key in stale {
            self.routers.remove(key);
            tracing::debug!(surface = %surface, actor = actor.0, "router replaced by re-open");
        }

        let key = self
            .routers
            .insert(InteractionRouter::new(panel, actor));
        tracing::debug!(surface = %surface, actor = actor.0, "router registered");
        Subscription {
            key,
            surface,
            actor,
        }
    }

    /// Unregisters the router behind `subscription`; false if it had already
    /// been torn down.
    pub fn dispose(&mut self, subscription: Subscription) -> bool {
        match self.routers.remove(subscription.key) {
            Some(_) => {
                tracing::debug!(surface = %subscription.surface, "router disposed");
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, subscription: &Subscription) -> bool {
        self.routers.contains_key(subscription.key)
    }

    pub fn router(&self, subscription: &Subscription) -> Option<&InteractionRouter> {
        self.routers.get(subscription.key)
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    pub fn dispatch_click(&mut self, event: &mut ClickEvent) {
        for router in self.routers.values_mut() {
            router.handle_click(event);
        }
    }

    pub fn dispatch_drag(&mut self, event: &mut DragEvent) {
        for router in self.routers.values_mut() {
            router.handle_drag(event);
        }
    }

    pub fn dispatch_close(&mut self, event: &CloseEvent) {
        self.routers
            .retain(|_, router| !router.handle_close(event));
    }

    pub fn dispatch(&mut self, event: &mut HostEvent) {
        match event {
            HostEvent::Click(e) => self.dispatch_click(e),
            HostEvent::Drag(e) => self.dispatch_drag(e),
            HostEvent::Close(e) => self.dispatch_close(e),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/router.rs"]
mod tests;
