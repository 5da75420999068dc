//! Tenant aggregate.
//!
//! A tenant is the multi-tenancy boundary: every employee, policy and request
//! belongs to exactly one tenant.

use common::TenantId;
use thiserror::Error;

use crate::aggregate::Aggregate;

const MAX_SLUG_LEN: usize = 64;

/// Errors that can occur during tenant operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenantError {
    /// Display name is blank.
    #[error("Tenant name is required")]
    NameRequired,

    /// Slug is empty, too long, or contains characters other than `a-z`, `0-9` and `-`.
    #[error("Invalid tenant slug: {0:?}")]
    InvalidSlug(String),
}

/// Tenant aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    id: TenantId,
    name: String,
    slug: String,
}

impl Aggregate for Tenant {
    type Id = TenantId;
    type Error = TenantError;

    fn aggregate_type() -> &'static str {
        "Tenant"
    }

    fn id(&self) -> TenantId {
        self.id
    }

    fn validate_aggregate(&self) -> Result<(), TenantError> {
        if self.name.trim().is_empty() {
            return Err(TenantError::NameRequired);
        }
        if !is_valid_slug(&self.slug) {
            return Err(TenantError::InvalidSlug(self.slug.clone()));
        }
        Ok(())
    }
}

impl Tenant {
    /// Creates a tenant. A missing slug is derived from the name.
    pub fn new(
        id: TenantId,
        name: impl Into<String>,
        slug: Option<String>,
    ) -> Result<Self, TenantError> {
        let name = name.into().trim().to_string();
        let slug = match slug.map(|s| s.trim().to_string()) {
            Some(s) if !s.is_empty() => s,
            _ => slug_from_name(&name),
        };

        let tenant = Self { id, name, slug };
        tenant.validate_aggregate()?;
        Ok(tenant)
    }

    /// Renames the tenant. The slug is left unchanged.
    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, TenantError> {
        self.name = name.into().trim().to_string();
        self.validate_aggregate()?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// Lowercases a display name and collapses runs of non-alphanumerics into `-`.
pub fn slug_from_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
