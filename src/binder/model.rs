use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use uuid::Uuid;

/// The fixed palette a tab can be colored with. Stored as lowercase names;
/// anything unrecognized reads back as [`TabColor::Accent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabColor {
    Black,
    Blue,
    Brown,
    Clear,
    Cyan,
    Gray,
    Green,
    Indigo,
    Mint,
    Orange,
    Pink,
    Purple,
    Red,
    Teal,
    White,
    Yellow,
    Accent,
}

impl TabColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabColor::Black => "black",
            TabColor::Blue => "blue",
            TabColor::Brown => "brown",
            TabColor::Clear => "clear",
            TabColor::Cyan => "cyan",
            TabColor::Gray => "gray",
            TabColor::Green => "green",
            TabColor::Indigo => "indigo",
            TabColor::Mint => "mint",
            TabColor::Orange => "orange",
            TabColor::Pink => "pink",
            TabColor::Purple => "purple",
            TabColor::Red => "red",
            TabColor::Teal => "teal",
            TabColor::White => "white",
            TabColor::Yellow => "yellow",
            TabColor::Accent => "accent",
        }
    }
}

impl Default for TabColor {
    fn default() -> Self {
        TabColor::Accent
    }
}

impl Serialize for TabColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TabColor {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_default())
    }
}

impl FromStr for TabColor {
    type Err = std::convert::Infallible;

    /// Never fails: unknown names fall back to the accent color.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "black" => TabColor::Black,
            "blue" => TabColor::Blue,
            "brown" => TabColor::Brown,
            "clear" => TabColor::Clear,
            "cyan" => TabColor::Cyan,
            "gray" => TabColor::Gray,
            "green" => TabColor::Green,
            "indigo" => TabColor::Indigo,
            "mint" => TabColor::Mint,
            "orange" => TabColor::Orange,
            "pink" => TabColor::Pink,
            "purple" => TabColor::Purple,
            "red" => TabColor::Red,
            "teal" => TabColor::Teal,
            "white" => TabColor::White,
            "yellow" => TabColor::Yellow,
            _ => TabColor::Accent,
        })
    }
}

/// A user-defined topic folder grouping items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: Uuid,
    pub title: String,
    pub icon: String,
    pub color: TabColor,
    pub is_pinned: bool,
}

impl Tab {
    pub fn new(title: &str, icon: &str, color: TabColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            icon: icon.trim().to_string(),
            color,
            is_pinned: false,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.trim().to_string();
    }

    pub fn set_icon(&mut self, icon: &str) {
        self.icon = icon.trim().to_string();
    }

    /// Title for display; an empty title shows the placeholder.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Glyph name for display; an empty icon shows the placeholder glyph.
    pub fn display_icon(&self) -> &str {
        if self.icon.is_empty() {
            "questionmark.folder"
        } else {
            &self.icon
        }
    }

    /// Display order for tab lists: pinned tabs first, then alphabetical by
    /// title (case-insensitive). Both store backends sort with this order.
    pub fn display_cmp(a: &Tab, b: &Tab) -> Ordering {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| cmp_titles(&a.title, &b.title))
    }
}

/// A single todo/note entry belonging to one tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub tab_id: Uuid,
    pub title: String,
    pub notes: String,
    pub icon: String,
    pub date_added: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_pinned: bool,
    pub is_done: bool,
}

impl Item {
    pub fn new(tab_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            tab_id,
            title: String::new(),
            notes: String::new(),
            icon: String::new(),
            date_added: Utc::now(),
            due_date: None,
            is_pinned: false,
            is_done: false,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.trim().to_string();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.trim().to_string();
    }

    pub fn set_icon(&mut self, icon: &str) {
        self.icon = icon.trim().to_string();
    }

    /// Sentinel for rows persisted without a creation timestamp.
    pub fn distant_past() -> DateTime<Utc> {
        DateTime::<Utc>::MIN_UTC
    }

    /// Display order within a tab: not-done before done; within each group
    /// newest due date first with undated items after all dated ones; then
    /// alphabetical by title (case-insensitive).
    pub fn display_cmp(a: &Item, b: &Item) -> Ordering {
        a.is_done
            .cmp(&b.is_done)
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| cmp_titles(&a.title, &b.title))
    }
}

fn cmp_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
