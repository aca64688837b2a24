//! Asset record validation.
//!
//! Collects ALL applicable violations into a field -> messages map instead of
//! failing on the first one, so callers can redisplay every error at once.
//! The uniqueness pre-check reads the current collection through an injected
//! [`ComponentDirectory`] capability; it is best-effort only, the storage
//! unique constraint on (asset_code, site) remains the authoritative guard.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::component::{Category, Condition, Site};
use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of `asset_code`.
pub const MAX_ASSET_CODE_LEN: usize = 50;

/// Maximum length of `name` and `location`.
pub const MAX_NAME_LEN: usize = 100;

/// Inclusive bounds for `length_mm` when present.
pub const MIN_LENGTH_MM: i64 = 1;
pub const MAX_LENGTH_MM: i64 = 6000;

/// Candidate payload for a create or update.
///
/// Enum-valued fields arrive as raw strings so an unrecognized value surfaces
/// as a field-level validation error rather than a deserialization fault.
/// `condition`, `last_inspection`, and `is_in_use` default to GOOD / today /
/// false when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateComponent {
    pub asset_code: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub length_mm: Option<i64>,
    pub weight_kg: Decimal,
    #[serde(default)]
    pub condition: Option<String>,
    pub site: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub last_inspection: Option<NaiveDate>,
    pub next_inspection: NaiveDate,
    #[serde(default)]
    pub is_in_use: Option<bool>,
}

/// A normalized record approved for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedComponent {
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
}

/// Accumulated field -> messages violations, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded against one field, empty when the field is clean.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Read access to the current collection, used for the uniqueness pre-check.
///
/// Injected rather than reached for ambiently so the validator can be tested
/// against an in-memory collection.
#[async_trait]
pub trait ComponentDirectory {
    /// Whether any record other than `exclude` already uses `asset_code` at
    /// `site`.
    async fn code_exists_at_site(
        &self,
        asset_code: &str,
        site: Site,
        exclude: Option<DbId>,
    ) -> Result<bool, CoreError>;
}

/// Validate a candidate record and normalize it for persistence.
///
/// `existing` is the id of the record being updated, so a record never
/// conflicts with itself; pass `None` for a create. All violations are
/// collected and returned together as [`CoreError::Invalid`]; a directory
/// failure propagates unchanged. No writes happen here -- persistence of the
/// approved record is the caller's responsibility.
pub async fn validate_and_prepare<D: ComponentDirectory + Sync>(
    candidate: &CandidateComponent,
    existing: Option<DbId>,
    directory: &D,
) -> Result<ValidatedComponent, CoreError> {
    let mut errors = FieldErrors::default();

    let asset_code = candidate.asset_code.trim();
    if asset_code.is_empty() {
        errors.add("asset_code", "This field is required.");
    } else if asset_code.chars().count() > MAX_ASSET_CODE_LEN {
        errors.add(
            "asset_code",
            format!("Ensure this value has at most {MAX_ASSET_CODE_LEN} characters."),
        );
    }

    let name = candidate.name.trim();
    if name.is_empty() {
        errors.add("name", "This field is required.");
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.add(
            "name",
            format!("Ensure this value has at most {MAX_NAME_LEN} characters."),
        );
    }

    let location = candidate
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());
    if let Some(loc) = location {
        if loc.chars().count() > MAX_NAME_LEN {
            errors.add(
                "location",
                format!("Ensure this value has at most {MAX_NAME_LEN} characters."),
            );
        }
    }

    if candidate.weight_kg <= Decimal::ZERO {
        errors.add("weight_kg", "Weight (kg) must be greater than 0.");
    }
    if candidate.weight_kg.normalize().scale() > 2 {
        errors.add(
            "weight_kg",
            "Ensure that there are no more than 2 decimal places.",
        );
    }
    if candidate.weight_kg.abs() >= Decimal::from(10_000) {
        errors.add(
            "weight_kg",
            "Ensure that there are no more than 6 digits in total.",
        );
    }

    if let Some(length) = candidate.length_mm {
        if !(MIN_LENGTH_MM..=MAX_LENGTH_MM).contains(&length) {
            errors.add("length_mm", "Length (mm) must be between 1 and 6000.");
        }
    }

    let category = match Category::parse(&candidate.category) {
        Some(category) => Some(category),
        None => {
            errors.add(
                "category",
                format!("\"{}\" is not a valid category.", candidate.category),
            );
            None
        }
    };

    let condition = match candidate
        .condition
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        None => Some(Condition::default()),
        Some(raw) => match Condition::parse(raw) {
            Some(condition) => Some(condition),
            None => {
                errors.add("condition", format!("\"{raw}\" is not a valid condition."));
                None
            }
        },
    };

    let site = match Site::parse(&candidate.site) {
        Some(site) => Some(site),
        None => {
            errors.add(
                "site",
                format!("\"{}\" is not a valid site.", candidate.site),
            );
            None
        }
    };

    let last_inspection = candidate
        .last_inspection
        .unwrap_or_else(|| Utc::now().date_naive());
    if candidate.next_inspection < last_inspection {
        errors.add(
            "next_inspection",
            "Next inspection date must be on or after the last inspection date.",
        );
    }

    // Best-effort uniqueness pre-check. Skipped when the site (or the code
    // itself) is already invalid -- those errors block the save anyway.
    if let Some(site) = site {
        if !asset_code.is_empty() {
            let taken = directory
                .code_exists_at_site(asset_code, site, existing)
                .await?;
            if taken {
                errors.add(
                    "asset_code",
                    "An asset with this code already exists at this site.",
                );
            }
        }
    }

    if !errors.is_empty() {
        return Err(CoreError::Invalid(errors));
    }

    let (Some(category), Some(condition), Some(site)) = (category, condition, site) else {
        // Unreachable: a missing enum member always records a field error.
        return Err(CoreError::Internal(
            "validation passed with unresolved enum fields".into(),
        ));
    };

    Ok(ValidatedComponent {
        asset_code: asset_code.to_string(),
        name: name.to_string(),
        category,
        length_mm: candidate.length_mm,
        weight_kg: candidate.weight_kg,
        condition,
        site,
        location: location.map(str::to_string),
        last_inspection,
        next_inspection: candidate.next_inspection,
        is_in_use: candidate.is_in_use.unwrap_or(false),
    })
}
