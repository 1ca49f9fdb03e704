// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The in-memory record of a property being created.

use std::str::FromStr;

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::preview::{ImagePreview, PreviewMeta};
use crate::blockchain::{parse_amount, TOKEN_DECIMALS};

/// Upper bound of the annual percentage yield.
pub const MAX_APY: f64 = 100.0;

/// Field-change event from the form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldChange {
    /// Field name: `title`, `location`, `tokenPrice` or `apy`
    pub name: String,
    /// Raw input value
    pub value: String,
}

impl FieldChange {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Editable draft fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Location,
    TokenPrice,
    Apy,
}

impl FromStr for DraftField {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(DraftField::Title),
            "location" => Ok(DraftField::Location),
            "tokenPrice" | "token_price" => Ok(DraftField::TokenPrice),
            "apy" => Ok(DraftField::Apy),
            other => Err(DraftError::UnknownField(other.to_string())),
        }
    }
}

/// Draft validation and editing errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("Unknown field `{0}`")]
    UnknownField(String),

    #[error("Token price must be a non-negative number: {0}")]
    InvalidTokenPrice(String),

    #[error("APY must be a number between 0 and 100: {0}")]
    InvalidApy(String),

    #[error("`{0}` is required")]
    MissingField(&'static str),

    #[error("No image at position {0}")]
    NoSuchImage(usize),
}

/// Snapshot of the draft's values.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DraftFields {
    pub title: String,
    pub location: String,
    /// Price per token in the display denomination
    pub token_price: String,
    pub apy: f64,
    pub images: Vec<PreviewMeta>,
}

/// A property being created. Images are owned previews and are revoked when
/// the draft is dropped or reset.
#[derive(Debug)]
pub struct PropertyDraft {
    title: String,
    location: String,
    token_price: String,
    apy: f64,
    images: Vec<ImagePreview>,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            token_price: "0".to_string(),
            apy: 0.0,
            images: Vec::new(),
        }
    }
}

impl PropertyDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn token_price(&self) -> &str {
        &self.token_price
    }

    pub fn apy(&self) -> f64 {
        self.apy
    }

    pub fn images(&self) -> &[ImagePreview] {
        &self.images
    }

    pub fn fields(&self) -> DraftFields {
        DraftFields {
            title: self.title.clone(),
            location: self.location.clone(),
            token_price: self.token_price.clone(),
            apy: self.apy,
            images: self.images.iter().map(|p| p.meta().clone()).collect(),
        }
    }

    /// Apply one field-change event. Invalid values leave the field untouched.
    pub fn apply(&mut self, change: &FieldChange) -> Result<(), DraftError> {
        match change.name.parse::<DraftField>()? {
            DraftField::Title => self.title = change.value.clone(),
            DraftField::Location => self.location = change.value.clone(),
            DraftField::TokenPrice => self.token_price = parse_token_price(&change.value)?,
            DraftField::Apy => self.apy = parse_apy(&change.value)?,
        }
        Ok(())
    }

    pub fn append_images(&mut self, previews: impl IntoIterator<Item = ImagePreview>) {
        self.images.extend(previews);
    }

    /// Remove the image at `index`, revoking its preview.
    pub fn remove_image(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.images.len() {
            return Err(DraftError::NoSuchImage(index));
        }
        self.images.remove(index);
        Ok(())
    }

    /// Check the draft is complete enough to submit.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingField("title"));
        }
        if self.location.trim().is_empty() {
            return Err(DraftError::MissingField("location"));
        }
        self.total_value()?;
        Ok(())
    }

    /// Token price in the smallest unit.
    pub fn total_value(&self) -> Result<U256, DraftError> {
        parse_amount(&self.token_price, TOKEN_DECIMALS)
            .map_err(|e| DraftError::InvalidTokenPrice(e.to_string()))
    }
}

/// Number inputs submit an empty string when cleared; that reads as zero.
fn parse_token_price(raw: &str) -> Result<String, DraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok("0".to_string());
    }
    parse_amount(trimmed, TOKEN_DECIMALS).map_err(|e| DraftError::InvalidTokenPrice(e.to_string()))?;
    Ok(trimmed.to_string())
}

fn parse_apy(raw: &str) -> Result<f64, DraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let apy: f64 = trimmed
        .parse()
        .map_err(|_| DraftError::InvalidApy(trimmed.to_string()))?;
    if !apy.is_finite() || !(0.0..=MAX_APY).contains(&apy) {
        return Err(DraftError::InvalidApy(trimmed.to_string()));
    }
    Ok(apy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::preview::{PreviewStore, SelectedFile};

    fn image(store: &PreviewStore, name: &str) -> ImagePreview {
        store.create(SelectedFile {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        })
    }

    #[test]
    fn defaults_are_empty() {
        let fields = PropertyDraft::default().fields();
        assert_eq!(fields.title, "");
        assert_eq!(fields.location, "");
        assert_eq!(fields.token_price, "0");
        assert_eq!(fields.apy, 0.0);
        assert!(fields.images.is_empty());
    }

    #[test]
    fn applies_field_changes() {
        let mut draft = PropertyDraft::default();
        draft.apply(&FieldChange::new("title", "Villa Azul")).unwrap();
        draft.apply(&FieldChange::new("location", "Lisbon")).unwrap();
        draft.apply(&FieldChange::new("tokenPrice", " 12.5 ")).unwrap();
        draft.apply(&FieldChange::new("apy", "7.25")).unwrap();

        assert_eq!(draft.title(), "Villa Azul");
        assert_eq!(draft.location(), "Lisbon");
        assert_eq!(draft.token_price(), "12.5");
        assert_eq!(draft.apy(), 7.25);
        assert_eq!(draft.total_value().unwrap(), U256::from(12_500_000_000_000_000_000u128));
    }

    #[test]
    fn rejects_out_of_range_values_and_keeps_previous() {
        let mut draft = PropertyDraft::default();
        draft.apply(&FieldChange::new("apy", "5")).unwrap();

        assert!(matches!(
            draft.apply(&FieldChange::new("apy", "100.5")),
            Err(DraftError::InvalidApy(_))
        ));
        assert!(matches!(
            draft.apply(&FieldChange::new("apy", "-1")),
            Err(DraftError::InvalidApy(_))
        ));
        assert!(matches!(
            draft.apply(&FieldChange::new("apy", "NaN")),
            Err(DraftError::InvalidApy(_))
        ));
        assert!(matches!(
            draft.apply(&FieldChange::new("tokenPrice", "-0.1")),
            Err(DraftError::InvalidTokenPrice(_))
        ));
        assert_eq!(draft.apy(), 5.0);
        assert_eq!(draft.token_price(), "0");
    }

    #[test]
    fn apy_bounds_are_inclusive() {
        let mut draft = PropertyDraft::default();
        draft.apply(&FieldChange::new("apy", "100")).unwrap();
        assert_eq!(draft.apy(), 100.0);
        draft.apply(&FieldChange::new("apy", "0")).unwrap();
        assert_eq!(draft.apy(), 0.0);
    }

    #[test]
    fn cleared_number_inputs_read_as_zero() {
        let mut draft = PropertyDraft::default();
        draft.apply(&FieldChange::new("tokenPrice", "3")).unwrap();
        draft.apply(&FieldChange::new("tokenPrice", "")).unwrap();
        assert_eq!(draft.token_price(), "0");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut draft = PropertyDraft::default();
        assert_eq!(
            draft.apply(&FieldChange::new("owner", "me")),
            Err(DraftError::UnknownField("owner".to_string()))
        );
    }

    #[test]
    fn validate_requires_title_and_location() {
        let mut draft = PropertyDraft::default();
        assert_eq!(draft.validate(), Err(DraftError::MissingField("title")));

        draft.apply(&FieldChange::new("title", "Loft")).unwrap();
        assert_eq!(draft.validate(), Err(DraftError::MissingField("location")));

        draft.apply(&FieldChange::new("location", "Porto")).unwrap();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn images_keep_order_and_revoke_on_removal() {
        let store = PreviewStore::new();
        let mut draft = PropertyDraft::default();
        draft.append_images([image(&store, "a.jpg"), image(&store, "b.jpg"), image(&store, "c.jpg")]);
        assert_eq!(store.live_count(), 3);

        draft.remove_image(1).unwrap();
        let names: Vec<_> = draft.fields().images.into_iter().map(|m| m.file_name).collect();
        assert_eq!(names, ["a.jpg", "c.jpg"]);
        assert_eq!(store.live_count(), 2);

        assert_eq!(draft.remove_image(5), Err(DraftError::NoSuchImage(5)));
    }

    #[test]
    fn dropping_draft_revokes_all_previews() {
        let store = PreviewStore::new();
        let mut draft = PropertyDraft::default();
        draft.append_images([image(&store, "a.jpg"), image(&store, "b.jpg")]);

        drop(draft);
        assert_eq!(store.live_count(), 0);
    }
}
