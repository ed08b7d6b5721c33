use crate::model::{Item, Tab, TabColor};
use chrono::{DateTime, Utc};

pub mod create;
pub mod delete;
pub mod done;
pub mod load;
pub mod pinning;
pub mod update;

/// Structured result of a command: the records a mutation touched and the
/// records a load listed, for the UI collaborator to render as it sees fit.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_tabs: Vec<Tab>,
    pub affected_items: Vec<Item>,
    pub listed_tabs: Vec<Tab>,
    pub listed_items: Vec<Item>,
}

impl CmdResult {
    pub fn with_affected_tabs(mut self, tabs: Vec<Tab>) -> Self {
        self.affected_tabs = tabs;
        self
    }

    pub fn with_affected_items(mut self, items: Vec<Item>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_listed_tabs(mut self, tabs: Vec<Tab>) -> Self {
        self.listed_tabs = tabs;
        self
    }

    pub fn with_listed_items(mut self, items: Vec<Item>) -> Self {
        self.listed_items = items;
        self
    }
}

/// User-entered tab fields, as collected by a tab sheet.
#[derive(Debug, Clone)]
pub struct TabDraft {
    pub title: String,
    pub icon: String,
    pub color: TabColor,
}

impl TabDraft {
    pub fn new(title: impl Into<String>, icon: impl Into<String>, color: TabColor) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            color,
        }
    }
}

/// User-entered item fields, as collected by an item sheet.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub title: String,
    pub notes: String,
    pub icon: String,
    pub due_date: Option<DateTime<Utc>>,
}

impl ItemDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }
}
