//! # Domain Types
//!
//! Core domain types of the motor product catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (serial)    │   │  code           │   │  location?      │       │
//! │  │  code           │   │  description?   │   │  price?         │       │
//! │  │  description?   │   │  location       │   └─────────────────┘       │
//! │  │  location       │   │  price          │                              │
//! │  │  price (Money)  │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │  ProductFilter  │       │
//! │                                              │  code?          │       │
//! │                                              │  location?      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! - `id`: assigned by storage, immutable, addresses a single product
//! - `code`: business identifier shared by a product family, addresses bulk
//!   updates and deletes

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A motor-insurance product catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Storage-generated identifier.
    pub id: i64,

    /// Product family code (e.g. "1000"). Not unique.
    pub code: String,

    /// Optional free text (e.g. "Sedan").
    pub description: Option<String>,

    /// Where the product is offered (e.g. "West Malaysia").
    pub location: String,

    /// Price with exactly two decimals.
    #[ts(as = "f64")]
    pub price: Money,
}

// =============================================================================
// Create Payload
// =============================================================================

/// Fields accepted when creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub code: String,

    #[serde(default)]
    #[ts(optional)]
    pub description: Option<String>,

    pub location: String,

    /// Rounded to the cent while deserializing.
    #[ts(as = "f64")]
    pub price: Money,
}

// =============================================================================
// Partial Update
// =============================================================================

/// A partial update of the mutable product fields.
///
/// `None` means "leave unchanged"; it never clears a column. A JSON `null`
/// and an omitted key both deserialize to `None`, since neither field is
/// nullable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<f64>")]
    pub price: Option<Money>,
}

impl ProductPatch {
    /// Names of the fields a patch may carry.
    pub const FIELDS: [&'static str; 2] = ["location", "price"];

    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.price.is_none()
    }

    /// Applies the supplied fields to a product, leaving the rest untouched.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(location) = &self.location {
            product.location = location.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// Optional narrowing of a product listing.
///
/// See [`crate::filter`] for how each field is matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub location: Option<String>,
}

impl ProductFilter {
    /// A filter selecting one product family by exact code.
    pub fn by_code(code: impl Into<String>) -> Self {
        ProductFilter {
            code: Some(code.into()),
            location: None,
        }
    }
}

/// The `code` selector of the bulk update/delete operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CodeSelector {
    pub code: String,
}

// =============================================================================
// Acknowledgements
// =============================================================================

/// Result of updating one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProduct {
    pub updated_id: i64,
}

/// Result of updating every product of a code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProducts {
    pub updated_ids: Vec<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================
