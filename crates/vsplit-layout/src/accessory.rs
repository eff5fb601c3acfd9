#![forbid(unsafe_code)]

//! Accessory buttons around the handle, the pop-out menu, and pane titles.
//!
//! Accessories carry no callbacks. Tapping one queues a signal naming its
//! [`id`](SplitAccessory::id); the host dispatches on that.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default symbol of the button that opens the accessory menu.
pub const DEFAULT_MENU_SYMBOL: &str = "plus.circle.fill";

/// An sRGB tint for accessory labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A small button shown beside the handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitAccessory {
    pub title: String,
    pub symbol: String,
    #[serde(default)]
    pub tint: Tint,
}

impl SplitAccessory {
    /// An accessory titled after its symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            title: symbol.clone(),
            symbol,
            tint: Tint::WHITE,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    /// Identity used in signals: title followed by symbol.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}{}", self.title, self.symbol)
    }
}

/// A larger, titled button inside the pop-out menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuAccessory {
    pub title: String,
    pub symbol: String,
    #[serde(default)]
    pub tint: Tint,
}

impl MenuAccessory {
    /// A menu item titled after its symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            title: symbol.clone(),
            symbol,
            tint: Tint::WHITE,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    #[must_use]
    pub fn id(&self) -> String {
        format!("{}{}", self.title, self.symbol)
    }
}

/// Static presentation options of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Shown in the pill while the top pane is hidden.
    pub top_title: String,
    /// Shown in the pill while the bottom pane is hidden.
    pub bottom_title: String,
    pub leading: Vec<SplitAccessory>,
    pub trailing: Vec<SplitAccessory>,
    pub menu: Vec<MenuAccessory>,
    pub menu_symbol: String,
    /// Log accessory and menu actions at info level.
    pub debug: bool,
    /// Use the pane title as its mini overlay.
    pub auto_top_overlay: bool,
    pub auto_bottom_overlay: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            top_title: "Top".to_owned(),
            bottom_title: "Bottom".to_owned(),
            leading: Vec::new(),
            trailing: Vec::new(),
            menu: Vec::new(),
            menu_symbol: DEFAULT_MENU_SYMBOL.to_owned(),
            debug: false,
            auto_top_overlay: false,
            auto_bottom_overlay: false,
        }
    }
}

impl SplitOptions {
    /// Options with the given pane titles.
    #[must_use]
    pub fn new(top_title: impl Into<String>, bottom_title: impl Into<String>) -> Self {
        Self {
            top_title: top_title.into(),
            bottom_title: bottom_title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn leading_accessories(mut self, accessories: Vec<SplitAccessory>) -> Self {
        self.leading = accessories;
        self
    }

    #[must_use]
    pub fn trailing_accessories(mut self, accessories: Vec<SplitAccessory>) -> Self {
        self.trailing = accessories;
        self
    }

    /// Menu items plus the symbol of the trailing button that opens them.
    #[must_use]
    pub fn menu_accessories(
        mut self,
        symbol: impl Into<String>,
        accessories: Vec<MenuAccessory>,
    ) -> Self {
        self.menu_symbol = symbol.into();
        self.menu = accessories;
        self
    }

    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    #[must_use]
    pub fn auto_overlays(mut self, top: bool, bottom: bool) -> Self {
        self.auto_top_overlay = top;
        self.auto_bottom_overlay = bottom;
        self
    }

    #[must_use]
    pub fn has_menu(&self) -> bool {
        !self.menu.is_empty()
    }

    #[must_use]
    pub fn leading_count(&self) -> usize {
        self.leading.len()
    }

    /// Trailing buttons, including the menu button when there is a menu.
    #[must_use]
    pub fn trailing_count(&self) -> usize {
        self.trailing.len() + usize::from(self.has_menu())
    }

    /// Find a leading or trailing accessory by id.
    #[must_use]
    pub fn accessory(&self, id: &str) -> Option<&SplitAccessory> {
        self.leading
            .iter()
            .chain(&self.trailing)
            .find(|a| a.id() == id)
    }

    #[must_use]
    pub fn menu_item(&self, id: &str) -> Option<&MenuAccessory> {
        self.menu.iter().find(|m| m.id() == id)
    }

    /// Check titles and accessory ids.
    pub fn validate(&self) -> Result<(), SplitOptionsError> {
        if self.top_title.trim().is_empty() {
            return Err(SplitOptionsError::EmptyTitle { pane: Pane::Top });
        }
        if self.bottom_title.trim().is_empty() {
            return Err(SplitOptionsError::EmptyTitle { pane: Pane::Bottom });
        }
        if self.has_menu() && self.menu_symbol.is_empty() {
            return Err(SplitOptionsError::EmptyMenuSymbol);
        }

        let mut seen = HashSet::new();
        for id in self.leading.iter().chain(&self.trailing).map(SplitAccessory::id) {
            if !seen.insert(id.clone()) {
                return Err(SplitOptionsError::DuplicateAccessory { id });
            }
        }
        seen.clear();
        for id in self.menu.iter().map(MenuAccessory::id) {
            if !seen.insert(id.clone()) {
                return Err(SplitOptionsError::DuplicateAccessory { id });
            }
        }
        Ok(())
    }
}

/// One of the two panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    Top,
    Bottom,
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

/// Invalid [`SplitOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOptionsError {
    /// A pane title is empty or whitespace.
    EmptyTitle { pane: Pane },
    /// Two accessories in the same group share an id.
    DuplicateAccessory { id: String },
    /// Menu items were given without a symbol for the menu button.
    EmptyMenuSymbol,
}

impl fmt::Display for SplitOptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle { pane } => write!(f, "{pane} title must not be empty"),
            Self::DuplicateAccessory { id } => write!(f, "duplicate accessory id {id:?}"),
            Self::EmptyMenuSymbol => f.write_str("menu symbol must not be empty"),
        }
    }
}

impl std::error::Error for SplitOptionsError {}
