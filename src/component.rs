//! Components: the visual and behavioral units placed into panel slots.

use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::event::ClickEvent;

/// What the host draws in a slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub symbol: CompactString,
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub label: CompactString,
    #[serde(default = "default_amount")]
    pub amount: u8,
}

fn default_amount() -> u8 {
    1
}

impl Icon {
    pub fn new(symbol: impl Into<CompactString>) -> Self {
        Self {
            symbol: symbol.into(),
            label: CompactString::default(),
            amount: default_amount(),
        }
    }

    pub fn with_label(mut self, label: impl Into<CompactString>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_amount(mut self, amount: u8) -> Self {
        self.amount = amount;
        self
    }
}

/// Passed to a button reaction. The icon is the pressed button's own, so
/// changes show up on its next render.
pub struct Press<'a> {
    pub event: &'a mut ClickEvent,
    pub icon: &'a mut Icon,
}

pub type Reaction = Rc<dyn Fn(&mut Press<'_>)>;

/// Display-only component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    icon: Icon,
}

impl Item {
    pub fn new(icon: Icon) -> Self {
        Self { icon }
    }
}

/// Component with a reaction to clicks.
#[derive(Clone)]
pub struct Button {
    icon: Icon,
    reaction: Reaction,
}

impl Button {
    pub fn new(icon: Icon, reaction: impl Fn(&mut Press<'_>) + 'static) -> Self {
        Self::with_reaction(icon, Rc::new(reaction))
    }

    pub fn with_reaction(icon: Icon, reaction: Reaction) -> Self {
        Self { icon, reaction }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

/// A slot's occupant.
///
/// `Clone` yields an independent instance: clones share a button's reaction
/// but never its icon, so a toggle in one slot leaves the others alone.
#[derive(Clone, Debug)]
pub enum Component {
    Item(Item),
    Button(Button),
}

impl Component {
    pub fn item(icon: Icon) -> Self {
        Component::Item(Item::new(icon))
    }

    pub fn button(icon: Icon, reaction: impl Fn(&mut Press<'_>) + 'static) -> Self {
        Component::Button(Button::new(icon, reaction))
    }

    pub fn render(&self) -> Icon {
        self.icon().clone()
    }

    pub fn icon(&self) -> &Icon {
        match self {
            Component::Item(item) => &item.icon,
            Component::Button(button) => &button.icon,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Component::Button(_))
    }

    pub fn on_interact(&mut self, event: &mut ClickEvent) {
        match self {
            Component::Item(_) => {}
            Component::Button(button) => {
                let reaction = Rc::clone(&button.reaction);
                reaction(&mut Press {
                    event,
                    icon: &mut button.icon,
                });
            }
        }
    }
}

impl From<Item> for Component {
    fn from(item: Item) -> Self {
        Component::Item(item)
    }
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Component::Button(button)
    }
}

#[cfg(test)]
#[path = "../tests/unit/component.rs"]
mod tests;
