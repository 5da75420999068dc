//! Paid time off policy aggregate.

use common::{PaidTimeOffPolicyId, TenantId};

use crate::aggregate::Aggregate;

use super::PaidTimeOffPolicyError;

/// Allowance rules referenced by one or more employees of a tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidTimeOffPolicy {
    id: PaidTimeOffPolicyId,
    tenant_id: TenantId,
    name: String,
    days_allowed_per_year: u32,
    allows_unlimited: bool,
    is_default: bool,
}

impl Aggregate for PaidTimeOffPolicy {
    type Id = PaidTimeOffPolicyId;
    type Error = PaidTimeOffPolicyError;

    fn aggregate_type() -> &'static str {
        "PaidTimeOffPolicy"
    }

    fn id(&self) -> PaidTimeOffPolicyId {
        self.id
    }

    fn validate_aggregate(&self) -> Result<(), PaidTimeOffPolicyError> {
        if self.name.trim().is_empty() {
            return Err(PaidTimeOffPolicyError::NameRequired);
        }
        Ok(())
    }
}

impl PaidTimeOffPolicy {
    /// Creates a capped, non-default policy.
    pub fn new(
        id: PaidTimeOffPolicyId,
        tenant_id: TenantId,
        name: impl Into<String>,
        days_allowed_per_year: u32,
    ) -> Result<Self, PaidTimeOffPolicyError> {
        let policy = Self {
            id,
            tenant_id,
            name: name.into().trim().to_string(),
            days_allowed_per_year,
            allows_unlimited: false,
            is_default: false,
        };
        policy.validate_aggregate()?;
        Ok(policy)
    }

    pub fn with_allows_unlimited(mut self, allows_unlimited: bool) -> Self {
        self.allows_unlimited = allows_unlimited;
        self
    }

    pub fn with_is_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn days_allowed_per_year(&self) -> u32 {
        self.days_allowed_per_year
    }

    pub fn allows_unlimited(&self) -> bool {
        self.allows_unlimited
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_policy_defaults() {
        let policy =
            PaidTimeOffPolicy::new(PaidTimeOffPolicyId::new(), TenantId::new(), " Standard ", 15)
                .unwrap();
        assert_eq!(policy.name(), "Standard");
        assert_eq!(policy.days_allowed_per_year(), 15);
        assert!(!policy.allows_unlimited());
        assert!(!policy.is_default());
    }

    #[test]
    fn test_flags() {
        let policy = PaidTimeOffPolicy::new(PaidTimeOffPolicyId::new(), TenantId::new(), "Exec", 0)
            .unwrap()
            .with_allows_unlimited(true)
            .with_is_default(true);
        assert!(policy.allows_unlimited());
        assert!(policy.is_default());
    }

    #[test]
    fn test_name_required() {
        let result = PaidTimeOffPolicy::new(PaidTimeOffPolicyId::new(), TenantId::new(), "", 10);
        assert_eq!(result, Err(PaidTimeOffPolicyError::NameRequired));
    }
}
