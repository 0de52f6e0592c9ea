// ABOUTME: Request payload types and the validation layer in front of the store
// ABOUTME: Turns raw JSON or form input into typed models or a 400 with field errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Input validation
//!
//! Every validator collects all field problems before failing, so a caller sees
//! the full list in `error.details.errors` rather than one problem per request.

use crate::errors::{AppError, AppResult, FieldError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use site_core::models::{
    HeroUpdate, NewDemoBooking, NewProduct, ProductFilter, ProductPatch, ProductStatus,
};

const VALIDATION_FAILED: &str = "Validation failed";

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`)
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Raw product fields as received from a JSON body or a multipart form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Marketing description
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form price
    #[serde(default)]
    pub price: Option<String>,
    /// Short label; `null` clears
    #[serde(default, deserialize_with = "double_option")]
    pub tag: Option<Option<String>>,
    /// `published` or `upcoming`
    #[serde(default)]
    pub status: Option<String>,
    /// Thumbnail URL; `null` clears
    #[serde(default, deserialize_with = "double_option")]
    pub thumbnail: Option<Option<String>>,
    /// Array of strings, or a JSON-encoded array string; `null` clears
    #[serde(default, deserialize_with = "double_option")]
    pub features: Option<Option<Value>>,
}

/// Hero update body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroPayload {
    /// Headline
    #[serde(default)]
    pub title: Option<String>,
    /// Supporting copy
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// Pricing update body; `price` may arrive as a string, number or boolean
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingPayload {
    /// New price
    #[serde(default)]
    pub price: Option<Value>,
}

/// Product listing query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Status filter
    pub status: Option<String>,
    /// Tag filter
    pub tag: Option<String>,
}

/// Demo booking body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    /// Contact name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Company
    #[serde(default)]
    pub company: Option<String>,
    /// Product of interest
    #[serde(default)]
    pub product_interest: Option<String>,
}

/// Chat widget body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    /// Visitor message
    #[serde(default)]
    pub message: Option<String>,
    /// Existing session, if any
    #[serde(default)]
    pub session_id: Option<String>,
    /// Company name for the persona prompt
    #[serde(default)]
    pub company_name: Option<String>,
}

/// A chat request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatInput {
    /// Trimmed visitor message
    pub message: String,
    /// Session to continue
    pub session_id: Option<String>,
    /// Company name override
    pub company_name: Option<String>,
}

/// Collects field errors across one validation pass
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Required, non-blank; returns the trimmed value
    fn required(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_owned()),
            Some(_) => {
                self.fail(field, format!("{field} must not be empty"));
                None
            }
            None => {
                self.fail(field, format!("{field} is required"));
                None
            }
        }
    }

    /// Optional but non-blank when present
    fn non_blank(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        value.and_then(|v| self.required(field, Some(v)))
    }

    fn status(&mut self, value: Option<&str>) -> Option<ProductStatus> {
        value.and_then(|raw| match raw.trim().parse() {
            Ok(status) => Some(status),
            Err(_) => {
                self.fail("status", "status must be one of: published, upcoming");
                None
            }
        })
    }

    fn features(&mut self, value: &Value) -> Option<Vec<String>> {
        let parsed;
        let value = match value {
            Value::String(encoded) => {
                if let Ok(decoded) = serde_json::from_str::<Value>(encoded) {
                    parsed = decoded;
                    &parsed
                } else {
                    self.fail("features", "features must be a JSON array of strings");
                    return None;
                }
            }
            other => other,
        };

        let items = value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
        });
        if items.is_none() {
            self.fail("features", "features must be an array of strings");
        }
        items
    }

    fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> AppResult<T> {
        if !self.errors.is_empty() {
            return Err(AppError::validation(VALIDATION_FAILED, self.errors));
        }
        value().ok_or_else(|| AppError::internal("validation produced no value"))
    }
}

fn optional_text(value: Option<&Option<String>>) -> Option<Option<String>> {
    value.map(|inner| {
        inner
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    })
}

/// Validate a product creation payload; `status` defaults to `published`
///
/// # Errors
///
/// Returns a validation error listing every invalid field
pub fn validate_new_product(payload: &ProductPayload) -> AppResult<NewProduct> {
    let mut check = Checker::default();
    let name = check.required("name", payload.name.as_deref());
    let description = check.required("description", payload.description.as_deref());
    let price = check.required("price", payload.price.as_deref());
    let status = check.status(payload.status.as_deref());
    let features = match &payload.features {
        Some(Some(value)) => check.features(value),
        _ => None,
    };

    check.finish(|| {
        Some(NewProduct {
            name: name?,
            description: description?,
            price: price?,
            tag: optional_text(payload.tag.as_ref()).flatten(),
            status: status.unwrap_or_default(),
            thumbnail: optional_text(payload.thumbnail.as_ref()).flatten(),
            features,
        })
    })
}

/// Validate a partial product update
///
/// An empty patch is valid and results in a no-op write.
///
/// # Errors
///
/// Returns a validation error if a supplied field is blank or malformed
pub fn validate_product_patch(payload: &ProductPayload) -> AppResult<ProductPatch> {
    let mut check = Checker::default();
    let name = check.non_blank("name", payload.name.as_deref());
    let description = check.non_blank("description", payload.description.as_deref());
    let price = check.non_blank("price", payload.price.as_deref());
    let status = check.status(payload.status.as_deref());
    let features = match &payload.features {
        Some(Some(value)) => check.features(value).map(Some),
        Some(None) => Some(None),
        None => None,
    };

    check.finish(|| {
        Some(ProductPatch {
            name,
            description,
            price,
            status,
            tag: optional_text(payload.tag.as_ref()),
            thumbnail: optional_text(payload.thumbnail.as_ref()),
            features,
        })
    })
}

/// Validate a hero update; both fields are required
///
/// # Errors
///
/// Returns a validation error if `title` or `subtitle` is missing or blank
pub fn validate_hero_update(payload: &HeroPayload) -> AppResult<HeroUpdate> {
    let mut check = Checker::default();
    let title = check.required("title", payload.title.as_deref());
    let subtitle = check.required("subtitle", payload.subtitle.as_deref());
    check.finish(|| {
        Some(HeroUpdate {
            title: Some(title?),
            subtitle: Some(subtitle?),
        })
    })
}

/// Coerce a pricing update to the stored string representation
///
/// # Errors
///
/// Returns a validation error for missing, null, blank or structured values
pub fn validate_price_update(payload: &PricingPayload) -> AppResult<String> {
    let mut check = Checker::default();
    let price = match &payload.price {
        None | Some(Value::Null) => {
            check.fail("price", "price is required");
            None
        }
        Some(Value::String(s)) => check.required("price", Some(s)),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => {
            check.fail("price", "price must be a string or number");
            None
        }
    };
    check.finish(|| price)
}

/// Validate product listing query parameters
///
/// # Errors
///
/// Returns a validation error for an unknown status or an empty tag
pub fn validate_product_query(query: &ProductQuery) -> AppResult<ProductFilter> {
    let mut check = Checker::default();
    let status = match query.status.as_deref() {
        Some(raw) if raw.trim().is_empty() => {
            check.fail("status", "status must be one of: published, upcoming");
            None
        }
        other => check.status(other),
    };
    let tag = check.non_blank("tag", query.tag.as_deref());
    check.finish(|| Some(ProductFilter { status, tag }))
}

fn looks_like_email(email: &str) -> bool {
    email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
    })
}

/// Validate a demo booking; a blank company is stored as null
///
/// # Errors
///
/// Returns a validation error listing every invalid field
pub fn validate_booking(payload: &BookingPayload) -> AppResult<NewDemoBooking> {
    let mut check = Checker::default();
    let full_name = check.required("fullName", payload.full_name.as_deref());
    let email = check.required("email", payload.email.as_deref());
    if let Some(email) = &email {
        if !looks_like_email(email) {
            check.fail("email", "email must be a valid email address");
        }
    }
    let product_interest = check.required("productInterest", payload.product_interest.as_deref());

    check.finish(|| {
        Some(NewDemoBooking {
            full_name: full_name?,
            email: email?,
            company: payload
                .company
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_owned),
            product_interest: product_interest?,
        })
    })
}

/// Validate a chat message
///
/// # Errors
///
/// Returns a validation error when `message` is missing or blank
pub fn validate_chat(payload: &ChatPayload) -> AppResult<ChatInput> {
    let message = payload
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            AppError::validation(
                "Message is required",
                vec![FieldError::new("message", "Message is required")],
            )
        })?;

    let non_blank = |value: Option<&String>| {
        value
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    Ok(ChatInput {
        message: message.to_owned(),
        session_id: non_blank(payload.session_id.as_ref()),
        company_name: non_blank(payload.company_name.as_ref()),
    })
}
