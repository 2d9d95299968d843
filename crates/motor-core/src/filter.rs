//! # Product Filter Rule
//!
//! Turns an optional [`ProductFilter`] into field predicates.
//!
//! ## Matching Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  field      mode                   example value   matches              │
//! │  ─────      ────                   ─────────────   ───────              │
//! │  code       exact, case-sensitive  "1000"          "1000" only          │
//! │  location   ILIKE pattern          "malaysia"      "Malaysia"           │
//! │  location   ILIKE pattern          "%malaysia"     "West Malaysia"      │
//! │  (none)     no predicate           -               every product        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `code` is the only exact field; any other filter field is a
//! case-insensitive pattern where `%` matches any run of characters and `_`
//! matches a single character.
//!
//! The storage layer renders the same predicates as SQL; [`FieldPredicate::matches`]
//! is the in-memory reading of that SQL and the two must agree.

use crate::types::{Product, ProductFilter};

// =============================================================================
// Fields and Modes
// =============================================================================

/// A filterable product column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Code,
    Location,
}

impl ProductField {
    /// Column name in the `products` table.
    pub const fn column(&self) -> &'static str {
        match self {
            ProductField::Code => "code",
            ProductField::Location => "location",
        }
    }

    /// How filter values for this field are compared.
    pub const fn match_mode(&self) -> MatchMode {
        match self {
            ProductField::Code => MatchMode::Exact,
            _ => MatchMode::InsensitivePattern,
        }
    }

    fn value_of<'a>(&self, product: &'a Product) -> &'a str {
        match self {
            ProductField::Code => &product.code,
            ProductField::Location => &product.location,
        }
    }
}

/// Comparison applied by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-for-byte equality.
    Exact,
    /// `ILIKE`: case-insensitive, `%` and `_` wildcards.
    InsensitivePattern,
}

// =============================================================================
// Predicate
// =============================================================================

/// One narrowing condition of a product query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPredicate {
    pub field: ProductField,
    pub mode: MatchMode,
    pub value: String,
}

impl FieldPredicate {
    /// Builds the predicate for a field using that field's match mode.
    pub fn for_field(field: ProductField, value: impl Into<String>) -> Self {
        FieldPredicate {
            field,
            mode: field.match_mode(),
            value: value.into(),
        }
    }

    /// Evaluates the predicate against a product.
    pub fn matches(&self, product: &Product) -> bool {
        let actual = self.field.value_of(product);
        match self.mode {
            MatchMode::Exact => actual == self.value,
            MatchMode::InsensitivePattern => ilike(&self.value, actual),
        }
    }
}

impl ProductFilter {
    /// One predicate per supplied field; empty when nothing was supplied.
    pub fn predicates(&self) -> Vec<FieldPredicate> {
        let mut predicates = Vec::with_capacity(2);
        if let Some(code) = &self.code {
            predicates.push(FieldPredicate::for_field(ProductField::Code, code.clone()));
        }
        if let Some(location) = &self.location {
            predicates.push(FieldPredicate::for_field(
                ProductField::Location,
                location.clone(),
            ));
        }
        predicates
    }

    /// True when the product satisfies every predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.predicates().iter().all(|p| p.matches(product))
    }
}

// =============================================================================
// Pattern Matching
// =============================================================================

/// SQL `ILIKE` without an escape character.
///
/// Case folding is ASCII-only, the same as SQLite's `LOWER()`.
pub fn ilike(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let text: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (mut p, mut t) = (0, 0);
    // Position of the last `%` seen and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('%') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '_' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '%')
}

// =============================================================================
// Unit Tests
// =============================================================================
