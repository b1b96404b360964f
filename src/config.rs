//! Declarative panel layouts loaded from JSON.
//!
//! ```json
//! {
//!   "title": "Shop",
//!   "rows": 3,
//!   "components": [
//!     { "range": { "row": 0 }, "icon": { "symbol": "#" } },
//!     { "range": { "single": { "x": 4, "y": 1 } }, "icon": { "symbol": "$" }, "action": "buy" }
//!   ],
//!   "policies": [{ "range": { "row": 2 }, "allowed": true }]
//! }
//! ```

use std::fmt;
use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::component::{Button, Component, Icon, Item, Reaction};
use crate::grid::{Coordinate, GridError, SlotRange};
use crate::host::Host;
use crate::panel::Panel;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Named button reactions a layout can refer to.
pub type Actions = FxHashMap<String, Reaction>;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read layout: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid layout: {}", e),
            ConfigError::Grid(e) => write!(f, "invalid layout geometry: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Grid(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        ConfigError::Grid(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeConfig {
    Single { x: i32, y: i32 },
    Linear { from: [i32; 2], to: [i32; 2] },
    Rectangle { from: [i32; 2], to: [i32; 2] },
    Row(i32),
    Column(i32),
    Full,
    Union(Vec<RangeConfig>),
}

impl RangeConfig {
    pub fn to_range(&self) -> std::result::Result<SlotRange, GridError> {
        let coord = |[x, y]: [i32; 2]| Coordinate::new(x, y);
        Ok(match self {
            RangeConfig::Single { x, y } => SlotRange::single(Coordinate::new(*x, *y)?),
            RangeConfig::Linear { from, to } => SlotRange::range(coord(*from)?, coord(*to)?),
            RangeConfig::Rectangle { from, to } => {
                SlotRange::rectangle(coord(*from)?, coord(*to)?)
            }
            RangeConfig::Row(row) => SlotRange::row(*row)?,
            RangeConfig::Column(column) => SlotRange::column(*column)?,
            RangeConfig::Full => SlotRange::full(),
            RangeConfig::Union(parts) => {
                let parts = parts
                    .iter()
                    .map(RangeConfig::to_range)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                SlotRange::union(&parts)
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub range: RangeConfig,
    pub icon: Icon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub range: RangeConfig,
    pub allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub title: String,
    pub rows: i32,
    #[serde(default)]
    pub allow_shift_click: bool,
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
    #[serde(default)]
    pub policies: Vec<PolicyConfig>,
}

impl LayoutConfig {
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the panel; entries apply in order, so later ones overwrite earlier ones.
    pub fn build(&self, host: &mut dyn Host, actions: &Actions) -> Result<Panel> {
        let panel = Panel::new(host, &self.title, self.rows)?;

        for entry in &self.components {
            let component = match entry.action.as_deref() {
                None => Component::Item(Item::new(entry.icon.clone())),
                Some(name) => match actions.get(name) {
                    Some(reaction) => Component::Button(Button::with_reaction(
                        entry.icon.clone(),
                        reaction.clone(),
                    )),
                    None => {
                        tracing::warn!(
                            action = name,
                            title = %self.title,
                            "unknown action, placing a plain item"
                        );
                        Component::Item(Item::new(entry.icon.clone()))
                    }
                },
            };
            panel.set_components(&entry.range.to_range()?, &component)?;
        }

        for entry in &self.policies {
            panel.set_interaction_policy(&entry.range.to_range()?, entry.allowed)?;
        }

        if self.allow_shift_click {
            panel.allow_shift_click();
        }

        Ok(panel)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
