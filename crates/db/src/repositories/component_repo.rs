//! Repository for the `scaffold_components` table.
//!
//! Persists only records the validator approved (`ValidatedComponent`);
//! there is no write path that bypasses validation. `created_at` is set by
//! the column default at INSERT and never touched again; `updated_at` is
//! refreshed by every UPDATE.

use async_trait::async_trait;
use sqlx::PgPool;

use scaffold_core::component::{ScaffoldComponent, Site};
use scaffold_core::error::CoreError;
use scaffold_core::types::DbId;
use scaffold_core::validation::{ComponentDirectory, ValidatedComponent};

use crate::models::component::ComponentRow;

/// Column list for `scaffold_components` queries.
const COMPONENT_COLUMNS: &str = "\
    id, asset_code, name, category, length_mm, weight_kg, \
    condition, site, location, last_inspection, next_inspection, \
    is_in_use, created_at, updated_at";

/// Provides data access for scaffold components.
pub struct ComponentRepo;

impl ComponentRepo {
    /// Insert a new component.
    pub async fn create(
        pool: &PgPool,
        record: &ValidatedComponent,
    ) -> Result<ScaffoldComponent, sqlx::Error> {
        let query = format!(
            "INSERT INTO scaffold_components (\
                asset_code, name, category, length_mm, weight_kg, \
                condition, site, location, last_inspection, next_inspection, is_in_use\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COMPONENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ComponentRow>(&query)
            .bind(&record.asset_code)
            .bind(&record.name)
            .bind(record.category.label())
            .bind(record.length_mm)
            .bind(record.weight_kg)
            .bind(record.condition.label())
            .bind(record.site.label())
            .bind(record.location.as_deref())
            .bind(record.last_inspection)
            .bind(record.next_inspection)
            .bind(record.is_in_use)
            .fetch_one(pool)
            .await?;
        into_component(row)
    }

    /// Find a component by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ScaffoldComponent>, sqlx::Error> {
        let query = format!("SELECT {COMPONENT_COLUMNS} FROM scaffold_components WHERE id = $1");
        let row = sqlx::query_as::<_, ComponentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.map(into_component).transpose()
    }

    /// Replace an existing component. Returns `None` when the row is gone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        record: &ValidatedComponent,
    ) -> Result<Option<ScaffoldComponent>, sqlx::Error> {
        let query = format!(
            "UPDATE scaffold_components SET \
                asset_code = $2, name = $3, category = $4, length_mm = $5, \
                weight_kg = $6, condition = $7, site = $8, location = $9, \
                last_inspection = $10, next_inspection = $11, is_in_use = $12, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COMPONENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ComponentRow>(&query)
            .bind(id)
            .bind(&record.asset_code)
            .bind(&record.name)
            .bind(record.category.label())
            .bind(record.length_mm)
            .bind(record.weight_kg)
            .bind(record.condition.label())
            .bind(record.site.label())
            .bind(record.location.as_deref())
            .bind(record.last_inspection)
            .bind(record.next_inspection)
            .bind(record.is_in_use)
            .fetch_optional(pool)
            .await?;
        row.map(into_component).transpose()
    }

    /// Delete a component by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scaffold_components WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the entire fleet in the default listing order
    /// (condition label ascending, then name).
    pub async fn list_fleet(pool: &PgPool) -> Result<Vec<ScaffoldComponent>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPONENT_COLUMNS} FROM scaffold_components ORDER BY condition, name"
        );
        let rows = sqlx::query_as::<_, ComponentRow>(&query)
            .fetch_all(pool)
            .await?;
        rows.into_iter().map(into_component).collect()
    }

    /// Whether any record other than `exclude` uses `asset_code` at `site`.
    pub async fn code_exists_at_site(
        pool: &PgPool,
        asset_code: &str,
        site: Site,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM scaffold_components \
             WHERE asset_code = $1 AND site = $2 \
               AND ($3::BIGINT IS NULL OR id <> $3)",
        )
        .bind(asset_code)
        .bind(site.label())
        .bind(exclude)
        .fetch_one(pool)
        .await?;
        Ok(count.0 > 0)
    }
}

/// Convert a raw row, surfacing unknown enum labels as a decode error.
fn into_component(row: ComponentRow) -> Result<ScaffoldComponent, sqlx::Error> {
    ScaffoldComponent::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// [`ComponentDirectory`] backed by the live table, handed to the validator
/// for its uniqueness pre-check.
pub struct PgDirectory<'a> {
    pool: &'a PgPool,
}

impl<'a> PgDirectory<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComponentDirectory for PgDirectory<'_> {
    async fn code_exists_at_site(
        &self,
        asset_code: &str,
        site: Site,
        exclude: Option<DbId>,
    ) -> Result<bool, CoreError> {
        ComponentRepo::code_exists_at_site(self.pool, asset_code, site, exclude)
            .await
            .map_err(|e| CoreError::Internal(format!("uniqueness lookup failed: {e}")))
    }
}
