use std::sync::Arc;

use async_trait::async_trait;
use common::TenantId;
use domain::{Aggregate, Tenant};
use persistence::{Database, TenantEntity, WriteDbContext};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{Command, CommandHandler};
use crate::error::ApplicationError;
use crate::mapping::ModelMapper;
use crate::view_models::TenantViewModel;

/// Create a tenant when `tenant.id` is absent, otherwise update it.
#[derive(Debug, Clone)]
pub struct AddOrUpdateTenantCommand {
    pub tenant: TenantViewModel,
}

impl Command for AddOrUpdateTenantCommand {
    type Response = TenantViewModel;
}

/// List every tenant, ordered by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetTenantsQuery;

impl Command for GetTenantsQuery {
    type Response = Vec<TenantViewModel>;
}

#[derive(Debug, Clone, Copy)]
pub struct GetTenantQuery {
    pub tenant_id: TenantId,
}

impl Command for GetTenantQuery {
    type Response = Option<TenantViewModel>;
}

/// Handles the tenant management commands and queries.
pub struct TenantHandler<D: Database> {
    db: D,
    mapper: Arc<ModelMapper>,
}

impl<D: Database> TenantHandler<D> {
    pub fn new(db: D, mapper: Arc<ModelMapper>) -> Self {
        Self { db, mapper }
    }

    fn to_view_model(&self, entity: &TenantEntity) -> Result<TenantViewModel, ApplicationError> {
        let tenant: Tenant = self.mapper.map(entity)?;
        Ok(self.mapper.map(&tenant)?)
    }
}

#[async_trait]
impl<D: Database> CommandHandler<AddOrUpdateTenantCommand> for TenantHandler<D> {
    #[instrument(skip(self, command), fields(tenant_id = ?command.tenant.id))]
    async fn handle(
        &self,
        command: AddOrUpdateTenantCommand,
    ) -> Result<TenantViewModel, ApplicationError> {
        let mut ctx = self.db.write_context();
        let mut view_model = command.tenant;

        let existing = match view_model.id {
            Some(id) => {
                let found = ctx.find_tenant(id).await?;
                if found.is_none() {
                    return Err(ApplicationError::precondition(format!(
                        "tenant {id} not found"
                    )));
                }
                found
            }
            None => {
                view_model.id = Some(Uuid::new_v4());
                None
            }
        };

        let tenant: Tenant = self.mapper.map(&view_model)?;

        if let Some(owner) = ctx.find_tenant_by_slug(tenant.slug()).await? {
            if owner.id != tenant.id().as_uuid() {
                return Err(ApplicationError::conflict(format!(
                    "tenant slug '{}' is already taken",
                    tenant.slug()
                )));
            }
        }

        let entity: TenantEntity = self.mapper.map(&tenant)?;

        match existing {
            Some(_) => ctx.changes().tenants.update(entity),
            None => ctx.changes().tenants.add(entity),
        }
        ctx.save_changes().await?;

        info!(
            tenant_id = %tenant.id(),
            slug = tenant.slug(),
            updated = existing.is_some(),
            "tenant saved"
        );
        Ok(self.mapper.map(&tenant)?)
    }
}

#[async_trait]
impl<D: Database> CommandHandler<GetTenantsQuery> for TenantHandler<D> {
    async fn handle(&self, _query: GetTenantsQuery) -> Result<Vec<TenantViewModel>, ApplicationError> {
        let entities = self.db.write_context().list_tenants().await?;
        entities.iter().map(|e| self.to_view_model(e)).collect()
    }
}

#[async_trait]
impl<D: Database> CommandHandler<GetTenantQuery> for TenantHandler<D> {
    async fn handle(
        &self,
        query: GetTenantQuery,
    ) -> Result<Option<TenantViewModel>, ApplicationError> {
        let entity = self
            .db
            .write_context()
            .find_tenant(query.tenant_id.as_uuid())
            .await?;
        entity.as_ref().map(|e| self.to_view_model(e)).transpose()
    }
}
