use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    ChangeSet, Database, EmployeeEntity, EmployeeLookup, Entity, EntitySet, PaidTimeOffPolicyEntity,
    PaidTimeOffRequestEntity, PersistenceError, Query, ReadDbFacade, Result, TenantEntity,
    WriteDbContext, context::Change,
};

type Table = BTreeMap<Uuid, serde_json::Value>;
type Tables = HashMap<&'static str, Table>;

/// In-memory database for tests and local runs.
///
/// Rows are kept as JSON objects keyed by table name and primary key, so the
/// read facade can evaluate a [`Query`] by comparing its named parameters
/// with row columns. The SQL text is ignored.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    /// Creates a new empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows in a table.
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, |t| t.len())
    }

    /// Returns every row of an entity type.
    pub async fn all<T: Entity>(&self) -> Result<Vec<T>> {
        let tables = self.tables.read().await;
        load(&tables, |_: &T| true)
    }

    /// Removes all rows.
    pub async fn clear(&self) {
        self.tables.write().await.clear();
    }
}

fn load<T: Entity>(tables: &Tables, filter: impl Fn(&T) -> bool) -> Result<Vec<T>> {
    let Some(table) = tables.get(T::TABLE) else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for value in table.values() {
        let row: T = serde_json::from_value(value.clone())?;
        if filter(&row) {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn stage<T: Entity>(tables: &mut Tables, set: &EntitySet<T>) -> Result<usize> {
    let table = tables.entry(T::TABLE).or_default();

    for change in set.iter() {
        let entity = change.entity();
        let id = entity.id();
        match change {
            Change::Added(_) if table.contains_key(&id) => {
                return Err(PersistenceError::DuplicateKey {
                    table: T::TABLE,
                    id,
                });
            }
            Change::Updated(_) if !table.contains_key(&id) => {
                return Err(PersistenceError::NotFound {
                    table: T::TABLE,
                    id,
                });
            }
            _ => {}
        }

        if let Some((constraint, key)) = entity.unique_key() {
            for value in table.values() {
                let row: T = serde_json::from_value(value.clone())?;
                if row.id() != id && row.unique_key().is_some_and(|(_, k)| k == key) {
                    return Err(PersistenceError::UniqueViolation {
                        table: T::TABLE,
                        constraint: constraint.to_string(),
                    });
                }
            }
        }

        table.insert(id, serde_json::to_value(entity)?);
    }

    Ok(set.len())
}

#[async_trait]
impl ReadDbFacade for InMemoryDatabase {
    async fn query_first_or_default<T: Entity>(&self, query: &Query) -> Result<Option<T>> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(T::TABLE) else {
            return Ok(None);
        };

        let row = table.values().find(|row| {
            query
                .params()
                .iter()
                .all(|(column, value)| row.get(*column) == Some(&value.to_json()))
        });

        Ok(row.map(|r| serde_json::from_value(r.clone())).transpose()?)
    }
}

impl Database for InMemoryDatabase {
    type Facade = InMemoryDatabase;
    type Context = InMemoryWriteContext;

    fn read_facade(&self) -> Self::Facade {
        self.clone()
    }

    fn write_context(&self) -> Self::Context {
        InMemoryWriteContext {
            db: self.clone(),
            changes: ChangeSet::default(),
        }
    }
}

/// Write context over an [`InMemoryDatabase`].
pub struct InMemoryWriteContext {
    db: InMemoryDatabase,
    changes: ChangeSet,
}

#[async_trait]
impl WriteDbContext for InMemoryWriteContext {
    async fn find_employee(&self, lookup: EmployeeLookup) -> Result<Option<EmployeeEntity>> {
        let tables = self.db.tables.read().await;

        let Some(mut employee) = load(&tables, |e: &EmployeeEntity| lookup.matches(e))?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };

        if let Some(policy_id) = employee.paid_time_off_policy_id {
            employee.paid_time_off_policy = load(&tables, |p: &PaidTimeOffPolicyEntity| {
                p.id == policy_id && p.tenant_id == employee.tenant_id
            })?
            .into_iter()
            .next();
        }

        let mut requests = load(&tables, |r: &PaidTimeOffRequestEntity| {
            r.for_employee_id == employee.id && r.tenant_id == employee.tenant_id
        })?;
        requests.sort_by_key(|r| r.start_date);
        employee.for_paid_time_off_requests = requests;

        Ok(Some(employee))
    }

    async fn find_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantEntity>> {
        let tables = self.db.tables.read().await;
        Ok(load(&tables, |t: &TenantEntity| t.id == tenant_id)?
            .into_iter()
            .next())
    }

    async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<TenantEntity>> {
        let tables = self.db.tables.read().await;
        Ok(load(&tables, |t: &TenantEntity| t.slug == slug)?
            .into_iter()
            .next())
    }

    async fn list_tenants(&self) -> Result<Vec<TenantEntity>> {
        let tables = self.db.tables.read().await;
        let mut tenants = load(&tables, |_: &TenantEntity| true)?;
        tenants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tenants)
    }

    async fn find_paid_time_off_policy(
        &self,
        policy_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<PaidTimeOffPolicyEntity>> {
        let tables = self.db.tables.read().await;
        Ok(load(&tables, |p: &PaidTimeOffPolicyEntity| {
            p.id == policy_id && p.tenant_id == tenant_id
        })?
        .into_iter()
        .next())
    }

    fn changes(&mut self) -> &mut ChangeSet {
        &mut self.changes
    }

    #[tracing::instrument(skip(self), fields(pending = self.changes.len()))]
    async fn save_changes(&mut self) -> Result<usize> {
        if self.changes.is_empty() {
            return Ok(0);
        }

        let mut tables = self.db.tables.write().await;

        // Stage on a copy so a failing change leaves the tables untouched.
        let mut staged = tables.clone();
        let mut rows = 0;
        rows += stage(&mut staged, &self.changes.tenants)?;
        rows += stage(&mut staged, &self.changes.paid_time_off_policies)?;
        rows += stage(&mut staged, &self.changes.employees)?;
        rows += stage(&mut staged, &self.changes.paid_time_off_requests)?;

        *tables = staged;
        self.changes.clear();

        metrics::counter!("persistence_rows_saved_total").increment(rows as u64);
        tracing::debug!(rows, "changes saved");

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AddressEntity;
    use chrono::NaiveDate;

    fn tenant() -> TenantEntity {
        let id = Uuid::new_v4();
        TenantEntity {
            id,
            name: "Acme".to_string(),
            slug: format!("acme-{}", &id.simple().to_string()[..8]),
        }
    }

    fn policy(tenant_id: Uuid) -> PaidTimeOffPolicyEntity {
        PaidTimeOffPolicyEntity {
            id: Uuid::new_v4(),
            tenant_id,
            name: "Standard".to_string(),
            days_allowed_per_year: 15,
            allows_unlimited: false,
            is_default: true,
        }
    }

    fn employee(tenant_id: Uuid, policy_id: Option<Uuid>) -> EmployeeEntity {
        EmployeeEntity {
            id: Uuid::new_v4(),
            tenant_id,
            user_account_id: Some(Uuid::new_v4()),
            paid_time_off_policy_id: policy_id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: AddressEntity {
                street1: "1 Main St".to_string(),
                street2: None,
                city: "Austin".to_string(),
                state: "TX".to_string(),
                zip_code: "78701".to_string(),
            },
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            paid_time_off_policy: None,
            for_paid_time_off_requests: Vec::new(),
        }
    }

    fn request(employee: &EmployeeEntity, day: u32) -> PaidTimeOffRequestEntity {
        let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        PaidTimeOffRequestEntity {
            id: Uuid::new_v4(),
            tenant_id: employee.tenant_id,
            for_employee_id: employee.id,
            submitted_by_id: employee.id,
            paid_time_off_policy_id: employee.paid_time_off_policy_id.unwrap_or_default(),
            start_date: date,
            end_date: date,
            status: "Approved".to_string(),
            notes: None,
            submitted_at: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_find_employee_eagerly() {
        let db = InMemoryDatabase::new();
        let tenant = tenant();
        let policy = policy(tenant.id);
        let employee = employee(tenant.id, Some(policy.id));

        let mut ctx = db.write_context();
        ctx.changes().tenants.add(tenant.clone());
        ctx.changes().paid_time_off_policies.add(policy.clone());
        ctx.changes().employees.add(employee.clone());
        ctx.changes().paid_time_off_requests.add(request(&employee, 20));
        ctx.changes().paid_time_off_requests.add(request(&employee, 5));
        assert_eq!(ctx.save_changes().await.unwrap(), 5);

        let found = db
            .write_context()
            .find_employee(EmployeeLookup::ByUserAccount {
                user_account_id: employee.user_account_id.unwrap(),
                tenant_id: tenant.id,
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, employee.id);
        assert_eq!(found.paid_time_off_policy, Some(policy));
        assert_eq!(found.for_paid_time_off_requests.len(), 2);
        assert!(
            found.for_paid_time_off_requests[0].start_date
                < found.for_paid_time_off_requests[1].start_date
        );
    }

    #[tokio::test]
    async fn test_lookup_is_tenant_scoped() {
        let db = InMemoryDatabase::new();
        let employee = employee(Uuid::new_v4(), None);

        let mut ctx = db.write_context();
        ctx.changes().employees.add(employee.clone());
        ctx.save_changes().await.unwrap();

        let other_tenant = db
            .write_context()
            .find_employee(EmployeeLookup::ById {
                employee_id: employee.id,
                tenant_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        assert!(other_tenant.is_none());
    }

    #[tokio::test]
    async fn test_save_is_atomic() {
        let db = InMemoryDatabase::new();
        let existing = tenant();

        let mut ctx = db.write_context();
        ctx.changes().tenants.add(existing.clone());
        ctx.save_changes().await.unwrap();

        let mut ctx = db.write_context();
        ctx.changes().tenants.add(tenant());
        ctx.changes().tenants.add(existing.clone());
        let err = ctx.save_changes().await.unwrap_err();

        assert!(matches!(err, PersistenceError::DuplicateKey { table: "tenants", .. }));
        assert_eq!(db.row_count("tenants").await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let db = InMemoryDatabase::new();
        let existing = tenant();

        let mut ctx = db.write_context();
        ctx.changes().tenants.add(existing.clone());
        ctx.save_changes().await.unwrap();

        let mut twin = tenant();
        twin.slug = existing.slug.clone();
        let mut ctx = db.write_context();
        ctx.changes().tenants.add(twin);
        let err = ctx.save_changes().await.unwrap_err();

        assert!(matches!(
            err,
            PersistenceError::UniqueViolation { table: "tenants", ref constraint }
                if constraint == "unique_tenant_slug"
        ));
        assert_eq!(db.row_count("tenants").await, 1);

        let found = db
            .write_context()
            .find_tenant_by_slug(&existing.slug)
            .await
            .unwrap();
        assert_eq!(found, Some(existing));
    }

    #[tokio::test]
    async fn test_user_account_is_unique_per_tenant() {
        let db = InMemoryDatabase::new();
        let tenant_id = Uuid::new_v4();
        let first = employee(tenant_id, None);

        let mut ctx = db.write_context();
        ctx.changes().employees.add(first.clone());
        ctx.save_changes().await.unwrap();

        let mut twin = employee(tenant_id, None);
        twin.user_account_id = first.user_account_id;
        let mut ctx = db.write_context();
        ctx.changes().employees.add(twin.clone());
        let err = ctx.save_changes().await.unwrap_err();
        assert!(matches!(err, PersistenceError::UniqueViolation { table: "employees", .. }));

        // The same account may belong to an employee of another tenant.
        twin.tenant_id = Uuid::new_v4();
        let mut ctx = db.write_context();
        ctx.changes().employees.add(twin);
        assert_eq!(ctx.save_changes().await.unwrap(), 1);

        // Re-saving a row does not collide with itself.
        let mut ctx = db.write_context();
        ctx.changes().employees.update(first);
        assert_eq!(ctx.save_changes().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let db = InMemoryDatabase::new();
        let mut ctx = db.write_context();
        ctx.changes().tenants.update(tenant());

        let err = ctx.save_changes().await.unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_replaces_row() {
        let db = InMemoryDatabase::new();
        let mut tenant = tenant();

        let mut ctx = db.write_context();
        ctx.changes().tenants.add(tenant.clone());
        ctx.save_changes().await.unwrap();

        tenant.name = "Acme Holdings".to_string();
        let mut ctx = db.write_context();
        ctx.changes().tenants.update(tenant.clone());
        assert_eq!(ctx.save_changes().await.unwrap(), 1);

        let found = db.write_context().find_tenant(tenant.id).await.unwrap();
        assert_eq!(found, Some(tenant));
    }

    #[tokio::test]
    async fn test_dropped_context_writes_nothing() {
        let db = InMemoryDatabase::new();
        {
            let mut ctx = db.write_context();
            ctx.changes().tenants.add(tenant());
        }
        assert_eq!(db.row_count("tenants").await, 0);
    }

    #[tokio::test]
    async fn test_facade_filters_on_named_params() {
        let db = InMemoryDatabase::new();
        let tenant_id = Uuid::new_v4();
        let first = employee(tenant_id, None);
        let second = employee(tenant_id, None);

        let mut ctx = db.write_context();
        ctx.changes().employees.add(first.clone());
        ctx.changes().employees.add(second.clone());
        ctx.save_changes().await.unwrap();

        let query = Query::new(
            "SELECT * FROM employees WHERE user_account_id = $1 AND tenant_id = $2 LIMIT 1",
        )
        .bind("user_account_id", second.user_account_id.unwrap())
        .bind("tenant_id", tenant_id);

        let found: Option<EmployeeEntity> =
            db.read_facade().query_first_or_default(&query).await.unwrap();
        assert_eq!(found.map(|e| e.id), Some(second.id));

        let miss = Query::new("SELECT * FROM employees WHERE tenant_id = $1")
            .bind("tenant_id", Uuid::new_v4());
        let found: Option<EmployeeEntity> =
            db.read_facade().query_first_or_default(&miss).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_tenants_sorted_by_name() {
        let db = InMemoryDatabase::new();
        let mut ctx = db.write_context();
        for name in ["Zeta", "Alpha", "Mid"] {
            ctx.changes().tenants.add(TenantEntity {
                id: Uuid::new_v4(),
                name: name.to_string(),
                slug: name.to_lowercase(),
            });
        }
        ctx.save_changes().await.unwrap();

        let names: Vec<String> = db
            .write_context()
            .list_tenants()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }
}
