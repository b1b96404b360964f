use std::io;
use std::path::Path;
use std::rc::Rc;

use gridpanel::config::{Actions, LayoutConfig};
use gridpanel::host::terminal::TerminalHost;
use gridpanel::{ActorId, Component, Coordinate, EventBus, Icon, Panel, Press, SlotRange};

mod logging;

fn toggle(press: &mut Press<'_>) {
    let on = press.icon.symbol == "on";
    *press.icon = Icon::new(if on { "off" } else { "on" }).with_label("toggle");
    tracing::info!(slot = press.event.slot, on = !on, "toggled");
}

fn count(press: &mut Press<'_>) {
    press.icon.amount = press.icon.amount.saturating_add(1);
}

fn actions() -> Actions {
    let mut actions = Actions::default();
    actions.insert("toggle".to_string(), Rc::new(toggle));
    actions.insert("count".to_string(), Rc::new(count));
    actions
}

fn demo_panel(host: &mut TerminalHost) -> Result<Panel, Box<dyn std::error::Error>> {
    let panel = Panel::new(host, "gridpanel demo", 3)?;

    panel.set_components(&SlotRange::row(0)?, &Component::item(Icon::new("#")))?;
    panel.set_components(
        &SlotRange::single(Coordinate::new(1, 1)?),
        &Component::button(Icon::new("off").with_label("toggle"), toggle),
    )?;
    panel.set_components(
        &SlotRange::single(Coordinate::new(3, 1)?),
        &Component::button(Icon::new("+"), count),
    )?;

    let weak = panel.downgrade();
    panel.set_components(
        &SlotRange::single(Coordinate::new(7, 1)?),
        &Component::button(Icon::new("clr"), move |_press| {
            let Some(panel) = weak.upgrade() else {
                return;
            };
            if let Ok(row) = SlotRange::row(2) {
                if let Err(err) = panel.remove_components(&row) {
                    tracing::warn!(error = %err, "clear failed");
                }
            }
        }),
    )?;

    panel.set_interaction_policy(&SlotRange::row(2)?, true)?;
    panel.allow_shift_click();
    panel.on_click(|event| {
        tracing::debug!(slot = event.slot, vetoed = event.is_cancelled(), "click");
    });
    panel.on_close(|_| tracing::info!("demo panel closed"));
    Ok(panel)
}

fn main() -> io::Result<()> {
    let logging = logging::init();

    let mut host = TerminalHost::new(ActorId(1));
    host.put_in_inventory(0, Icon::new("o").with_amount(8));
    host.put_in_inventory(1, Icon::new("*"));
    let mut bus = EventBus::new();

    let panel = match std::env::args().nth(1) {
        Some(path) => LayoutConfig::load(Path::new(&path))
            .and_then(|layout| layout.build(&mut host, &actions()))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        None => demo_panel(&mut host).map_err(|e| io::Error::other(e.to_string()))?,
    };

    let viewer = host.viewer();
    let _subscription = panel.open(&mut host, &mut bus, viewer);
    host.run(&mut bus)?;

    if let Some(logging) = &logging {
        tracing::info!(log_dir = %logging.log_dir().display(), "demo finished");
    }
    Ok(())
}
