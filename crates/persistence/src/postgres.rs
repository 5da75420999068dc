use async_trait::async_trait;
use sqlx::{
    PgPool, Postgres, Transaction,
    postgres::{PgArguments, PgPoolOptions, PgQueryResult},
    query::QueryAs,
};
use uuid::Uuid;

use crate::{
    ChangeSet, Database, EmployeeEntity, EmployeeLookup, Entity, PaidTimeOffPolicyEntity,
    PaidTimeOffRequestEntity, PersistenceError, Query, QueryValue, ReadDbFacade, Result,
    TenantEntity, WriteDbContext, context::Change,
};

/// PostgreSQL-backed database.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Creates a database over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn bind_value<'q, T>(
    query: QueryAs<'q, Postgres, T, PgArguments>,
    value: &QueryValue,
) -> QueryAs<'q, Postgres, T, PgArguments> {
    match value {
        QueryValue::Uuid(v) => query.bind(*v),
        QueryValue::Text(v) => query.bind(v.clone()),
        QueryValue::Int(v) => query.bind(*v),
        QueryValue::Bool(v) => query.bind(*v),
        QueryValue::Date(v) => query.bind(*v),
    }
}

#[async_trait]
impl ReadDbFacade for PostgresDatabase {
    #[tracing::instrument(skip(self, query), fields(table = T::TABLE))]
    async fn query_first_or_default<T: Entity>(&self, query: &Query) -> Result<Option<T>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL READ UNCOMMITTED, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let mut statement = sqlx::query_as::<_, T>(query.text());
        for (_, value) in query.params() {
            statement = bind_value(statement, value);
        }

        let row = statement.fetch_optional(&mut *tx).await?;
        tx.commit().await?;

        Ok(row)
    }
}

impl Database for PostgresDatabase {
    type Facade = PostgresDatabase;
    type Context = PostgresWriteContext;

    fn read_facade(&self) -> Self::Facade {
        self.clone()
    }

    fn write_context(&self) -> Self::Context {
        PostgresWriteContext {
            pool: self.pool.clone(),
            changes: ChangeSet::default(),
        }
    }
}

/// Write context that commits pending changes in one transaction.
pub struct PostgresWriteContext {
    pool: PgPool,
    changes: ChangeSet,
}

/// Maps a statement outcome for one change to an affected-row count.
fn affected<T: Entity>(
    result: std::result::Result<PgQueryResult, sqlx::Error>,
    change: &Change<T>,
) -> Result<u64> {
    let id = change.entity().id();
    match result {
        Ok(done) if done.rows_affected() == 0 && matches!(change, Change::Updated(_)) => {
            Err(PersistenceError::NotFound {
                table: T::TABLE,
                id,
            })
        }
        Ok(done) => Ok(done.rows_affected()),
        Err(sqlx::Error::Database(db_err))
            if db_err.is_unique_violation()
                && db_err.constraint().is_some_and(|c| c.ends_with("_pkey")) =>
        {
            Err(PersistenceError::DuplicateKey {
                table: T::TABLE,
                id,
            })
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(PersistenceError::UniqueViolation {
                table: T::TABLE,
                constraint: db_err.constraint().unwrap_or_default().to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

async fn save_tenant(
    tx: &mut Transaction<'_, Postgres>,
    change: &Change<TenantEntity>,
) -> Result<u64> {
    let result = match change {
        Change::Added(t) => {
            sqlx::query("INSERT INTO tenants (id, name, slug) VALUES ($1, $2, $3)")
                .bind(t.id)
                .bind(&t.name)
                .bind(&t.slug)
                .execute(&mut **tx)
                .await
        }
        Change::Updated(t) => {
            sqlx::query("UPDATE tenants SET name = $2, slug = $3 WHERE id = $1")
                .bind(t.id)
                .bind(&t.name)
                .bind(&t.slug)
                .execute(&mut **tx)
                .await
        }
    };
    affected(result, change)
}

async fn save_policy(
    tx: &mut Transaction<'_, Postgres>,
    change: &Change<PaidTimeOffPolicyEntity>,
) -> Result<u64> {
    let sql = match change {
        Change::Added(_) => {
            r#"
            INSERT INTO paid_time_off_policies
                (id, tenant_id, name, days_allowed_per_year, allows_unlimited, is_default)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#
        }
        Change::Updated(_) => {
            r#"
            UPDATE paid_time_off_policies
            SET tenant_id = $2, name = $3, days_allowed_per_year = $4,
                allows_unlimited = $5, is_default = $6
            WHERE id = $1
            "#
        }
    };
    let p = change.entity();
    let result = sqlx::query(sql)
        .bind(p.id)
        .bind(p.tenant_id)
        .bind(&p.name)
        .bind(p.days_allowed_per_year)
        .bind(p.allows_unlimited)
        .bind(p.is_default)
        .execute(&mut **tx)
        .await;
    affected(result, change)
}

async fn save_employee(
    tx: &mut Transaction<'_, Postgres>,
    change: &Change<EmployeeEntity>,
) -> Result<u64> {
    let sql = match change {
        Change::Added(_) => {
            r#"
            INSERT INTO employees
                (id, tenant_id, user_account_id, paid_time_off_policy_id, first_name, last_name,
                 street1, street2, city, state, zip_code, hire_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#
        }
        Change::Updated(_) => {
            r#"
            UPDATE employees
            SET tenant_id = $2, user_account_id = $3, paid_time_off_policy_id = $4,
                first_name = $5, last_name = $6, street1 = $7, street2 = $8, city = $9,
                state = $10, zip_code = $11, hire_date = $12
            WHERE id = $1
            "#
        }
    };
    let e = change.entity();
    let result = sqlx::query(sql)
        .bind(e.id)
        .bind(e.tenant_id)
        .bind(e.user_account_id)
        .bind(e.paid_time_off_policy_id)
        .bind(&e.first_name)
        .bind(&e.last_name)
        .bind(&e.address.street1)
        .bind(&e.address.street2)
        .bind(&e.address.city)
        .bind(&e.address.state)
        .bind(&e.address.zip_code)
        .bind(e.hire_date)
        .execute(&mut **tx)
        .await;
    affected(result, change)
}

async fn save_request(
    tx: &mut Transaction<'_, Postgres>,
    change: &Change<PaidTimeOffRequestEntity>,
) -> Result<u64> {
    let sql = match change {
        Change::Added(_) => {
            r#"
            INSERT INTO paid_time_off_requests
                (id, tenant_id, for_employee_id, submitted_by_id, paid_time_off_policy_id,
                 start_date, end_date, status, notes, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#
        }
        Change::Updated(_) => {
            r#"
            UPDATE paid_time_off_requests
            SET tenant_id = $2, for_employee_id = $3, submitted_by_id = $4,
                paid_time_off_policy_id = $5, start_date = $6, end_date = $7, status = $8,
                notes = $9, submitted_at = $10
            WHERE id = $1
            "#
        }
    };
    let r = change.entity();
    let result = sqlx::query(sql)
        .bind(r.id)
        .bind(r.tenant_id)
        .bind(r.for_employee_id)
        .bind(r.submitted_by_id)
        .bind(r.paid_time_off_policy_id)
        .bind(r.start_date)
        .bind(r.end_date)
        .bind(&r.status)
        .bind(&r.notes)
        .bind(r.submitted_at)
        .execute(&mut **tx)
        .await;
    affected(result, change)
}

#[async_trait]
impl WriteDbContext for PostgresWriteContext {
    #[tracing::instrument(skip(self))]
    async fn find_employee(&self, lookup: EmployeeLookup) -> Result<Option<EmployeeEntity>> {
        let employee = match lookup {
            EmployeeLookup::ByUserAccount {
                user_account_id,
                tenant_id,
            } => {
                sqlx::query_as::<_, EmployeeEntity>(
                    "SELECT * FROM employees WHERE user_account_id = $1 AND tenant_id = $2 LIMIT 1",
                )
                .bind(user_account_id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?
            }
            EmployeeLookup::ById {
                employee_id,
                tenant_id,
            } => {
                sqlx::query_as::<_, EmployeeEntity>(
                    "SELECT * FROM employees WHERE id = $1 AND tenant_id = $2",
                )
                .bind(employee_id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        let Some(mut employee) = employee else {
            return Ok(None);
        };

        if let Some(policy_id) = employee.paid_time_off_policy_id {
            employee.paid_time_off_policy = self
                .find_paid_time_off_policy(policy_id, employee.tenant_id)
                .await?;
        }

        employee.for_paid_time_off_requests = sqlx::query_as::<_, PaidTimeOffRequestEntity>(
            r#"
            SELECT * FROM paid_time_off_requests
            WHERE for_employee_id = $1 AND tenant_id = $2
            ORDER BY start_date ASC
            "#,
        )
        .bind(employee.id)
        .bind(employee.tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(employee))
    }

    async fn find_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantEntity>> {
        let tenant = sqlx::query_as::<_, TenantEntity>("SELECT * FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<TenantEntity>> {
        let tenant = sqlx::query_as::<_, TenantEntity>("SELECT * FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    async fn list_tenants(&self) -> Result<Vec<TenantEntity>> {
        let tenants = sqlx::query_as::<_, TenantEntity>("SELECT * FROM tenants ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tenants)
    }

    async fn find_paid_time_off_policy(
        &self,
        policy_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<PaidTimeOffPolicyEntity>> {
        let policy = sqlx::query_as::<_, PaidTimeOffPolicyEntity>(
            "SELECT * FROM paid_time_off_policies WHERE id = $1 AND tenant_id = $2",
        )
        .bind(policy_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(policy)
    }

    fn changes(&mut self) -> &mut ChangeSet {
        &mut self.changes
    }

    #[tracing::instrument(skip(self), fields(pending = self.changes.len()))]
    async fn save_changes(&mut self) -> Result<usize> {
        if self.changes.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut rows: u64 = 0;

        for change in self.changes.tenants.iter() {
            rows += save_tenant(&mut tx, change).await?;
        }
        for change in self.changes.paid_time_off_policies.iter() {
            rows += save_policy(&mut tx, change).await?;
        }
        for change in self.changes.employees.iter() {
            rows += save_employee(&mut tx, change).await?;
        }
        for change in self.changes.paid_time_off_requests.iter() {
            rows += save_request(&mut tx, change).await?;
        }

        tx.commit().await?;
        self.changes.clear();

        metrics::counter!("persistence_rows_saved_total").increment(rows);
        tracing::debug!(rows, "changes saved");

        Ok(rows as usize)
    }
}
