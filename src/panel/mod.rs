//! Panels: a titled, fixed-size grid of components projected onto a host
//! surface, plus the interaction policy and callbacks that drive routing.

pub mod id;
pub mod policy;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::component::Component;
use crate::event::{ActorId, ClickEvent, CloseEvent, DragEvent};
use crate::grid::coord::{GRID_HEIGHT, GRID_WIDTH};
use crate::grid::error::{GridError, Result};
use crate::grid::range::SlotRange;
use crate::host::{Host, Surface};
use crate::router::{EventBus, Subscription};

use id::SurfaceId;
use policy::InteractionPolicy;

pub type ClickCallback = Rc<dyn Fn(&mut ClickEvent)>;
pub type DragCallback = Rc<dyn Fn(&mut DragEvent)>;
pub type CloseCallback = Rc<dyn Fn(&CloseEvent)>;

struct PanelState {
    id: SurfaceId,
    title: CompactString,
    rows: usize,
    surface: Box<dyn Surface>,
    components: FxHashMap<usize, Component>,
    // Bumped on every placement or removal so an in-flight interaction can
    // tell whether its slot was rewritten while the component was out.
    revisions: FxHashMap<usize, u64>,
    policy: InteractionPolicy,
    on_click: Option<ClickCallback>,
    on_drag: Option<DragCallback>,
    on_close: Option<CloseCallback>,
    shift_click_allowed: bool,
}

impl PanelState {
    fn size(&self) -> usize {
        self.rows * GRID_WIDTH
    }

    fn clip(&self, range: &SlotRange) -> Result<SlotRange> {
        range.clip_to_size(self.size() as i32)
    }

    fn bump(&mut self, slot: usize) {
        *self.revisions.entry(slot).or_default() += 1;
    }

    fn revision(&self, slot: usize) -> u64 {
        self.revisions.get(&slot).copied().unwrap_or_default()
    }
}

/// Shared handle to a panel.
///
/// Clones refer to the same panel, so callbacks can capture a handle and
/// edit the panel while an event for it is being routed.
#[derive(Clone)]
pub struct Panel {
    state: Rc<RefCell<PanelState>>,
}

impl Panel {
    pub fn new(host: &mut dyn Host, title: &str, rows: i32) -> Result<Self> {
        if !(1..=GRID_HEIGHT as i32).contains(&rows) {
            return Err(GridError::InvalidSize {
                what: "rows",
                value: rows,
                expected: "in the interval [1, 6]",
            });
        }
        let rows = rows as usize;
        let id = SurfaceId::fresh();
        let surface = host.create_surface(id, title, rows * GRID_WIDTH);
        tracing::debug!(surface = %id, title, rows, "panel created");

        Ok(Self {
            state: Rc::new(RefCell::new(PanelState {
                id,
                title: title.into(),
                rows,
                surface,
                components: FxHashMap::default(),
                revisions: FxHashMap::default(),
                policy: InteractionPolicy::default(),
                on_click: None,
                on_drag: None,
                on_close: None,
                shift_click_allowed: false,
            })),
        })
    }

    /// A handle that does not keep the panel alive, for callbacks stored
    /// inside the panel itself.
    pub fn downgrade(&self) -> WeakPanel {
        WeakPanel {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.state.borrow().id
    }

    pub fn title(&self) -> CompactString {
        self.state.borrow().title.clone()
    }

    pub fn rows(&self) -> usize {
        self.state.borrow().rows
    }

    pub fn size(&self) -> usize {
        self.state.borrow().size()
    }

    /// Places an independent clone of `template` into every slot of `range`
    /// that exists on this panel.
    pub fn set_components(&self, range: &SlotRange, template: &Component) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let range = state.clip(range)?;
        for slot in range.iter() {
            let component = template.clone();
            state.surface.set_slot(slot, Some(&component.render()));
            state.components.insert(slot, component);
            state.bump(slot);
        }
        Ok(())
    }

    pub fn remove_components(&self, range: &SlotRange) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let range = state.clip(range)?;
        for slot in range.iter() {
            state.components.remove(&slot);
            state.surface.set_slot(slot, None);
            state.bump(slot);
        }
        Ok(())
    }

    pub fn set_interaction_policy(&self, range: &SlotRange, allowed: bool) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let range = state.clip(range)?;
        for slot in range.iter() {
            state.policy.set(slot, allowed);
        }
        Ok(())
    }

    pub fn is_interaction_allowed(&self, slot: usize) -> bool {
        self.state.borrow().policy.is_allowed(slot)
    }

    pub(crate) fn all_interaction_allowed(&self, slots: impl IntoIterator<Item = usize>) -> bool {
        self.state.borrow().policy.all_allowed(slots)
    }

    /// Snapshot of the component in `slot`.
    pub fn component(&self, slot: usize) -> Option<Component> {
        self.state.borrow().components.get(&slot).cloned()
    }

    pub fn with_component<R>(&self, slot: usize, f: impl FnOnce(&Component) -> R) -> Option<R> {
        self.state.borrow().components.get(&slot).map(f)
    }

    pub fn on_click(&self, callback: impl Fn(&mut ClickEvent) + 'static) {
        self.state.borrow_mut().on_click = Some(Rc::new(callback));
    }

    pub fn on_drag(&self, callback: impl Fn(&mut DragEvent) + 'static) {
        self.state.borrow_mut().on_drag = Some(Rc::new(callback));
    }

    pub fn on_close(&self, callback: impl Fn(&CloseEvent) + 'static) {
        self.state.borrow_mut().on_close = Some(Rc::new(callback));
    }

    pub fn allow_shift_click(&self) {
        self.state.borrow_mut().shift_click_allowed = true;
    }

    pub fn shift_click_allowed(&self) -> bool {
        self.state.borrow().shift_click_allowed
    }

    /// Routes this panel's events for `actor` through `bus`, then asks the
    /// host to show the surface.
    ///
    /// An actor has at most one router per panel: opening again for the same
    /// actor disposes the earlier router, and its `Subscription` goes inactive.
    pub fn open(&self, host: &mut dyn Host, bus: &mut EventBus, actor: ActorId) -> Subscription {
        let subscription = bus.subscribe(self.clone(), actor);
        host.show(self.id(), actor);
        subscription
    }

    /// Lets the component in `event.slot` react.
    ///
    /// The component is taken out of the panel while its reaction runs so the
    /// reaction may edit the panel; if it rewrote that slot, its edit wins.
    /// The slot is pushed to the surface only when the component now renders
    /// differently, so the host's own handling of the click stays in place.
    pub(crate) fn interact(&self, event: &mut ClickEvent) {
        let slot = event.slot;
        let (taken, revision) = {
            let mut state = self.state.borrow_mut();
            let revision = state.revision(slot);
            (state.components.remove(&slot), revision)
        };
        let Some(mut component) = taken else {
            return;
        };

        let before = component.render();
        component.on_interact(event);

        let mut state = self.state.borrow_mut();
        if state.revision(slot) != revision {
            return;
        }
        let after = component.render();
        if after != before {
            state.surface.set_slot(slot, Some(&after));
        }
        state.components.insert(slot, component);
    }

    pub(crate) fn click_callback(&self) -> Option<ClickCallback> {
        self.state.borrow().on_click.clone()
    }

    pub(crate) fn drag_callback(&self) -> Option<DragCallback> {
        self.state.borrow().on_drag.clone()
    }

    pub(crate) fn close_callback(&self) -> Option<CloseCallback> {
        self.state.borrow().on_close.clone()
    }
}

#[derive(Clone)]
pub struct WeakPanel {
    state: Weak<RefCell<PanelState>>,
}

impl WeakPanel {
    pub fn upgrade(&self) -> Option<Panel> {
        self.state.upgrade().map(|state| Panel { state })
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Panel")
            .field("id", &state.id)
            .field("title", &state.title)
            .field("rows", &state.rows)
            .field("components", &state.components.len())
            .field("shift_click_allowed", &state.shift_click_allowed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panel/mod.rs"]
mod tests;
