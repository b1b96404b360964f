use super::*;
use crate::event::{ActorId, ClickEvent};
use crate::host::headless::HeadlessHost;
use std::io::Write;
use std::rc::Rc;

const SHOP: &str = r##"{
    "title": "Shop",
    "rows": 3,
    "allow_shift_click": true,
    "components": [
        { "range": "full", "icon": { "symbol": "#" } },
        { "range": { "single": { "x": 4, "y": 1 } }, "icon": { "symbol": "$", "amount": 5 }, "action": "buy" },
        { "range": { "single": { "x": 0, "y": 1 } }, "icon": { "symbol": "?" }, "action": "missing" }
    ],
    "policies": [
        { "range": { "row": 2 }, "allowed": true },
        { "range": { "union": [{ "column": 0 }, { "rectangle": { "from": [7, 0], "to": [8, 1] } }] }, "allowed": false }
    ]
}"##;

fn buy(press: &mut crate::component::Press<'_>) {
    press.icon.amount -= 1;
}

fn buy_actions() -> Actions {
    let mut actions = Actions::default();
    actions.insert("buy".to_string(), Rc::new(buy));
    actions
}

#[test]
fn range_config_covers_every_constructor() {
    let cases = [
        (RangeConfig::Single { x: 1, y: 1 }, SlotRange::single(Coordinate::new(1, 1).unwrap())),
        (
            RangeConfig::Linear { from: [8, 0], to: [0, 1] },
            SlotRange::range(Coordinate::new(8, 0).unwrap(), Coordinate::new(0, 1).unwrap()),
        ),
        (
            RangeConfig::Rectangle { from: [8, 0], to: [0, 1] },
            SlotRange::rectangle(Coordinate::new(8, 0).unwrap(), Coordinate::new(0, 1).unwrap()),
        ),
        (RangeConfig::Row(2), SlotRange::row(2).unwrap()),
        (RangeConfig::Column(3), SlotRange::column(3).unwrap()),
        (RangeConfig::Full, SlotRange::full()),
    ];
    for (config, expected) in cases {
        assert_eq!(config.to_range().unwrap(), expected, "{config:?}");
    }

    let bad = RangeConfig::Union(vec![RangeConfig::Row(0), RangeConfig::Single { x: 9, y: 0 }]);
    assert!(matches!(bad.to_range(), Err(GridError::OutOfRange { .. })));
}

#[test]
fn build_applies_components_policies_and_flags() {
    let layout = LayoutConfig::from_json(SHOP).unwrap();
    let mut host = HeadlessHost::new();
    let panel = layout.build(&mut host, &buy_actions()).unwrap();

    assert_eq!(panel.title(), "Shop");
    assert_eq!(panel.size(), 27);
    assert!(panel.shift_click_allowed());

    // Later entries overwrite the filler.
    let buy = panel.component(13).unwrap();
    assert!(buy.is_interactive());
    assert_eq!(buy.render().amount, 5);

    // Unknown actions degrade to plain items.
    assert!(!panel.component(9).unwrap().is_interactive());
    assert_eq!(host.slot(panel.id(), 26).unwrap().symbol, "#");

    assert!(panel.is_interaction_allowed(20));
    assert!(!panel.is_interaction_allowed(18));
    assert!(!panel.is_interaction_allowed(4));

    panel.interact(&mut ClickEvent::new(13, Some(panel.id()), ActorId(1)));
    assert_eq!(host.slot(panel.id(), 13).unwrap().amount, 4);
}

#[test]
fn invalid_rows_surface_as_grid_errors() {
    let layout = LayoutConfig::from_json(r#"{ "title": "x", "rows": 7 }"#).unwrap();
    let err = layout.build(&mut HeadlessHost::new(), &Actions::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Grid(GridError::InvalidSize { .. })));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        LayoutConfig::from_json(r#"{ "rows": 1 }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SHOP.as_bytes()).unwrap();

    let layout = LayoutConfig::load(file.path()).unwrap();
    assert_eq!(layout.rows, 3);
    assert_eq!(layout.components.len(), 3);

    let missing = LayoutConfig::load(&file.path().with_extension("nope"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}

#[test]
fn json_round_trip_keeps_the_layout() {
    let layout = LayoutConfig::from_json(SHOP).unwrap();
    let again = LayoutConfig::from_json(&layout.to_json().unwrap()).unwrap();
    assert_eq!(layout, again);
}
