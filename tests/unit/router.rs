use super::*;
use crate::component::{Component, Icon};
use crate::grid::SlotRange;
use crate::host::headless::HeadlessHost;
use std::cell::Cell;
use std::rc::Rc;

const ALICE: ActorId = ActorId(1);
const BOB: ActorId = ActorId(2);

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let c = Rc::new(Cell::new(0));
    (Rc::clone(&c), c)
}

fn setup() -> (HeadlessHost, Panel) {
    let mut host = HeadlessHost::new();
    let panel = Panel::new(&mut host, "router", 1).unwrap();
    (host, panel)
}

#[test]
fn router_starts_active_and_tears_down_once() {
    let (_host, panel) = setup();
    let (closes, seen) = counter();
    panel.on_close(move |_| seen.set(seen.get() + 1));

    let mut router = InteractionRouter::new(panel.clone(), ALICE);
    assert_eq!(router.state(), RouterState::Active);
    assert_eq!(router.surface(), panel.id());
    assert_eq!(router.actor(), ALICE);

    let close = CloseEvent::new(Some(panel.id()), ALICE);
    assert!(router.handle_close(&close));
    assert_eq!(router.state(), RouterState::TornDown);
    assert!(!router.handle_close(&close));
    assert_eq!(closes.get(), 1);
}

#[test]
fn torn_down_router_ignores_clicks() {
    let (_host, panel) = setup();
    let mut router = InteractionRouter::new(panel.clone(), ALICE);
    router.handle_close(&CloseEvent::new(Some(panel.id()), ALICE));

    let mut click = ClickEvent::new(0, Some(panel.id()), ALICE);
    router.handle_click(&mut click);
    assert!(!click.is_cancelled());
}

#[test]
fn unrecognized_actor_is_ignored() {
    let (_host, panel) = setup();
    let mut router = InteractionRouter::new(panel.clone(), ALICE);

    let mut click = ClickEvent::new(0, Some(panel.id()), Actor::Other);
    router.handle_click(&mut click);
    assert!(!click.is_cancelled());

    let mut click = ClickEvent::new(0, Some(panel.id()), BOB);
    router.handle_click(&mut click);
    assert!(!click.is_cancelled());

    assert!(!router.handle_close(&CloseEvent::new(Some(panel.id()), Actor::Other)));
    assert_eq!(router.state(), RouterState::Active);
}

#[test]
fn shift_click_vetoed_from_either_surface_unless_allowed() {
    let (_host, panel) = setup();
    panel
        .set_interaction_policy(&SlotRange::full(), true)
        .unwrap();
    let (hits, seen) = counter();
    panel
        .set_components(
            &SlotRange::full(),
            &Component::button(Icon::new("b"), move |_| seen.set(seen.get() + 1)),
        )
        .unwrap();
    let mut router = InteractionRouter::new(panel.clone(), ALICE);

    let mut top = ClickEvent::new(0, Some(panel.id()), ALICE).with_shift();
    router.handle_click(&mut top);
    assert!(top.is_cancelled());

    let mut bottom = ClickEvent::in_bottom(0, Some(panel.id()), None, ALICE).with_shift();
    router.handle_click(&mut bottom);
    assert!(bottom.is_cancelled());
    assert_eq!(hits.get(), 0);

    // A shift-click in a view that does not involve this panel is not ours.
    let mut foreign = ClickEvent::new(0, None, ALICE).with_shift();
    router.handle_click(&mut foreign);
    assert!(!foreign.is_cancelled());

    panel.allow_shift_click();
    let mut top = ClickEvent::new(0, Some(panel.id()), ALICE).with_shift();
    router.handle_click(&mut top);
    assert!(!top.is_cancelled());
    assert_eq!(hits.get(), 1);

    // Allowed shift-click in the bottom surface falls through untouched.
    let mut bottom = ClickEvent::in_bottom(0, Some(panel.id()), None, ALICE).with_shift();
    router.handle_click(&mut bottom);
    assert!(!bottom.is_cancelled());
    assert_eq!(hits.get(), 1);
}

#[test]
fn click_callback_runs_even_when_vetoed() {
    let (_host, panel) = setup();
    let (calls, seen) = counter();
    panel.on_click(move |event| {
        assert!(event.is_cancelled());
        seen.set(seen.get() + 1);
    });
    let mut router = InteractionRouter::new(panel.clone(), ALICE);

    let mut click = ClickEvent::new(5, Some(panel.id()), ALICE);
    router.handle_click(&mut click);
    assert!(click.is_cancelled());
    assert_eq!(calls.get(), 1);
}

#[test]
fn callback_can_lift_the_veto() {
    let (_host, panel) = setup();
    panel.on_click(|event| event.set_cancelled(false));
    let mut router = InteractionRouter::new(panel.clone(), ALICE);

    let mut click = ClickEvent::new(5, Some(panel.id()), ALICE);
    router.handle_click(&mut click);
    assert!(!click.is_cancelled());
}

#[test]
fn drag_requires_every_slot_allowed() {
    let (_host, panel) = setup();
    let slot3 = SlotRange::single(crate::grid::Coordinate::new(3, 0).unwrap());
    panel.set_interaction_policy(&slot3, true).unwrap();
    let (drags, seen) = counter();
    panel.on_drag(move |_| seen.set(seen.get() + 1));
    let mut router = InteractionRouter::new(panel.clone(), ALICE);

    let mut drag = DragEvent::new([3, 4], Some(panel.id()), ALICE);
    router.handle_drag(&mut drag);
    assert!(drag.is_cancelled());

    let mut drag = DragEvent::new([3], Some(panel.id()), ALICE);
    router.handle_drag(&mut drag);
    assert!(!drag.is_cancelled());
    assert_eq!(drags.get(), 2);

    let mut foreign = DragEvent::new([3, 4], None, ALICE);
    router.handle_drag(&mut foreign);
    assert!(!foreign.is_cancelled());
    assert_eq!(drags.get(), 2);
}

#[test]
fn bus_subscribe_dispose_and_reopen() {
    let (mut host, panel) = setup();
    let mut bus = EventBus::new();
    assert!(bus.is_empty());

    let first = panel.open(&mut host, &mut bus, ALICE);
    assert!(bus.is_active(&first));
    assert_eq!(bus.router(&first).unwrap().state(), RouterState::Active);

    // Re-opening for the same actor replaces the router.
    let second = panel.open(&mut host, &mut bus, ALICE);
    assert!(!bus.is_active(&first));
    assert!(bus.is_active(&second));
    assert_eq!(bus.len(), 1);

    let other = panel.open(&mut host, &mut bus, BOB);
    assert_eq!(bus.len(), 2);
    assert_eq!(other.actor(), BOB);
    assert_eq!(other.surface(), panel.id());

    assert!(!bus.dispose(first));
    assert!(bus.dispose(second));
    assert_eq!(bus.len(), 1);
    assert_eq!(host.shown().len(), 3);
}

#[test]
fn bus_dispatch_removes_closed_routers_only() {
    let (mut host, panel) = setup();
    let mut bus = EventBus::new();
    let alice = panel.open(&mut host, &mut bus, ALICE);
    let bob = panel.open(&mut host, &mut bus, BOB);

    let mut close = HostEvent::Close(CloseEvent::new(Some(panel.id()), ALICE));
    bus.dispatch(&mut close);
    assert!(!bus.is_active(&alice));
    assert!(bus.is_active(&bob));

    let mut click = HostEvent::Click(ClickEvent::new(0, Some(panel.id()), BOB));
    bus.dispatch(&mut click);
    assert!(click.is_cancelled());

    let mut click = HostEvent::Click(ClickEvent::new(0, Some(panel.id()), ALICE));
    bus.dispatch(&mut click);
    assert!(!click.is_cancelled());
}
