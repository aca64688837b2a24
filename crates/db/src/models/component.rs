//! Row mapping for the `scaffold_components` table.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;

use scaffold_core::component::{Category, Condition, ScaffoldComponent, Site};
use scaffold_core::error::CoreError;
use scaffold_core::types::{DbId, Timestamp};

/// A raw row; enum-valued columns carry their TEXT labels.
#[derive(Debug, Clone, FromRow)]
pub struct ComponentRow {
    pub id: DbId,
    pub asset_code: String,
    pub name: String,
    pub category: String,
    pub length_mm: Option<i64>,
    pub weight_kg: Decimal,
    pub condition: String,
    pub site: String,
    pub location: Option<String>,
    pub last_inspection: NaiveDate,
    pub next_inspection: NaiveDate,
    pub is_in_use: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ComponentRow> for ScaffoldComponent {
    type Error = CoreError;

    fn try_from(row: ComponentRow) -> Result<Self, Self::Error> {
        let category = Category::parse(&row.category).ok_or_else(|| {
            CoreError::Internal(format!(
                "row {} has unknown category label: {}",
                row.id, row.category
            ))
        })?;
        let condition = Condition::parse(&row.condition).ok_or_else(|| {
            CoreError::Internal(format!(
                "row {} has unknown condition label: {}",
                row.id, row.condition
            ))
        })?;
        let site = Site::parse(&row.site).ok_or_else(|| {
            CoreError::Internal(format!(
                "row {} has unknown site label: {}",
                row.id, row.site
            ))
        })?;

        Ok(ScaffoldComponent {
            id: row.id,
            asset_code: row.asset_code,
            name: row.name,
            category,
            length_mm: row.length_mm,
            weight_kg: row.weight_kg,
            condition,
            site,
            location: row.location,
            last_inspection: row.last_inspection,
            next_inspection: row.next_inspection,
            is_in_use: row.is_in_use,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
