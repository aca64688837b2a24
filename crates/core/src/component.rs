//! The scaffold component entity and its enum-valued fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{DbId, Timestamp};

/// Physical category of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Tube,
    Board,
    Coupler,
    Jack,
    Frame,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Tube,
        Category::Board,
        Category::Coupler,
        Category::Jack,
        Category::Frame,
        Category::Other,
    ];

    /// The stored/displayed label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Tube => "Tube",
            Category::Board => "Board",
            Category::Coupler => "Coupler",
            Category::Jack => "Jack",
            Category::Frame => "Frame",
            Category::Other => "Other",
        }
    }

    /// Parse a label back into a member. Returns `None` for anything that is
    /// not a declared label (case-sensitive).
    pub fn parse(label: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse inspection status of a component.
///
/// Listing order sorts by the *label* (GOOD, NEW, REPAIR, SCRAP), not by
/// declaration order and not by severity. See `fleet::run_query`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    New,
    #[default]
    Good,
    Repair,
    Scrap,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::New,
        Condition::Good,
        Condition::Repair,
        Condition::Scrap,
    ];

    /// The stored/displayed label for this condition.
    pub fn label(self) -> &'static str {
        match self {
            Condition::New => "NEW",
            Condition::Good => "GOOD",
            Condition::Repair => "REPAIR",
            Condition::Scrap => "SCRAP",
        }
    }

    /// Parse a label back into a member.
    pub fn parse(label: &str) -> Option<Condition> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical work site where a component is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Site {
    Secunda,
    Sasolburg,
}

impl Site {
    pub const ALL: [Site; 2] = [Site::Secunda, Site::Sasolburg];

    /// The stored/displayed label for this site.
    pub fn label(self) -> &'static str {
        match self {
            Site::Secunda => "Secunda",
            Site::Sasolburg => "Sasolburg",
        }
    }

    /// Parse a label back into a member.
    pub fn parse(label: &str) -> Option<Site> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scaffold component record as persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaffoldComponent {
    pub id: DbId,
    pub asset_code: String,
    pub name: String,
    pub category: Category,
    pub length_mm: Option<i64>,
    pub weight_kg: Decimal,
    pub condition: Condition,
    pub site: Site,
    pub location: Option<String>,
    pub last_inspection: NaiveDate,
    pub next_inspection: NaiveDate,
    pub is_in_use: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
