//! Unit-of-work write context.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    EmployeeEntity, Entity, PaidTimeOffPolicyEntity, PaidTimeOffRequestEntity, Result,
    TenantEntity,
};

/// A pending change to one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Change<T> {
    Added(T),
    Updated(T),
}

impl<T> Change<T> {
    pub fn entity(&self) -> &T {
        match self {
            Change::Added(e) | Change::Updated(e) => e,
        }
    }
}

/// Pending changes for one entity type, in the order they were made.
#[derive(Debug, Clone)]
pub struct EntitySet<T: Entity> {
    pending: Vec<Change<T>>,
}

impl<T: Entity> Default for EntitySet<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T: Entity> EntitySet<T> {
    /// Marks a new row for insertion.
    pub fn add(&mut self, entity: T) {
        self.pending.push(Change::Added(entity));
    }

    /// Marks an existing row for update.
    pub fn update(&mut self, entity: T) {
        self.pending.push(Change::Updated(entity));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change<T>> {
        self.pending.iter()
    }
}

/// Pending changes across all tables.
///
/// Applied in dependency order on save: tenants, policies, employees, requests.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub tenants: EntitySet<TenantEntity>,
    pub paid_time_off_policies: EntitySet<PaidTimeOffPolicyEntity>,
    pub employees: EntitySet<EmployeeEntity>,
    pub paid_time_off_requests: EntitySet<PaidTimeOffRequestEntity>,
}

impl ChangeSet {
    pub fn len(&self) -> usize {
        self.tenants.len()
            + self.paid_time_off_policies.len()
            + self.employees.len()
            + self.paid_time_off_requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every pending change.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// How to find an employee within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeLookup {
    /// The employee linked to a user account.
    ByUserAccount { user_account_id: Uuid, tenant_id: Uuid },

    /// The employee with a given id.
    ById { employee_id: Uuid, tenant_id: Uuid },
}

impl EmployeeLookup {
    pub fn tenant_id(&self) -> Uuid {
        match self {
            EmployeeLookup::ByUserAccount { tenant_id, .. }
            | EmployeeLookup::ById { tenant_id, .. } => *tenant_id,
        }
    }

    /// Returns true if the row is the one this lookup describes.
    pub fn matches(&self, employee: &EmployeeEntity) -> bool {
        match *self {
            EmployeeLookup::ByUserAccount {
                user_account_id,
                tenant_id,
            } => employee.user_account_id == Some(user_account_id) && employee.tenant_id == tenant_id,
            EmployeeLookup::ById {
                employee_id,
                tenant_id,
            } => employee.id == employee_id && employee.tenant_id == tenant_id,
        }
    }
}

/// Per-use-case unit of work.
///
/// Lookups read committed state; nothing is written until
/// [`save_changes`](WriteDbContext::save_changes) commits every pending
/// change atomically. Dropping the context discards pending changes.
#[async_trait]
pub trait WriteDbContext: Send + Sync {
    /// Finds an employee with their policy and the requests made for them.
    async fn find_employee(&self, lookup: EmployeeLookup) -> Result<Option<EmployeeEntity>>;

    async fn find_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantEntity>>;

    async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<TenantEntity>>;

    /// All tenants, ordered by name.
    async fn list_tenants(&self) -> Result<Vec<TenantEntity>>;

    async fn find_paid_time_off_policy(
        &self,
        policy_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<PaidTimeOffPolicyEntity>>;

    /// Pending changes, to add or update rows.
    fn changes(&mut self) -> &mut ChangeSet;

    /// Commits all pending changes and returns the number of rows affected.
    async fn save_changes(&mut self) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(name: &str) -> TenantEntity {
        TenantEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    #[test]
    fn test_change_set_counts_and_clears() {
        let mut changes = ChangeSet::default();
        assert!(changes.is_empty());

        changes.tenants.add(tenant("A"));
        changes.tenants.update(tenant("B"));
        assert_eq!(changes.len(), 2);
        assert!(matches!(changes.tenants.iter().nth(1), Some(Change::Updated(_))));

        changes.clear();
        assert!(changes.is_empty());
    }
}
