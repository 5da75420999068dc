use std::sync::Arc;

use async_trait::async_trait;
use common::TenantId;
use domain::{Aggregate, PaidTimeOffPolicy};
use persistence::{Database, PaidTimeOffPolicyEntity, WriteDbContext};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{Command, CommandHandler};
use crate::error::ApplicationError;
use crate::mapping::ModelMapper;
use crate::view_models::PaidTimeOffPolicyViewModel;

/// Create a policy in a tenant. Any tenant id on the view-model is replaced.
#[derive(Debug, Clone)]
pub struct CreatePaidTimeOffPolicyCommand {
    pub tenant_id: TenantId,
    pub policy: PaidTimeOffPolicyViewModel,
}

impl Command for CreatePaidTimeOffPolicyCommand {
    type Response = PaidTimeOffPolicyViewModel;
}

pub struct CreatePaidTimeOffPolicyHandler<D: Database> {
    db: D,
    mapper: Arc<ModelMapper>,
}

impl<D: Database> CreatePaidTimeOffPolicyHandler<D> {
    pub fn new(db: D, mapper: Arc<ModelMapper>) -> Self {
        Self { db, mapper }
    }
}

#[async_trait]
impl<D: Database> CommandHandler<CreatePaidTimeOffPolicyCommand>
    for CreatePaidTimeOffPolicyHandler<D>
{
    #[instrument(skip(self, command), fields(tenant_id = %command.tenant_id))]
    async fn handle(
        &self,
        command: CreatePaidTimeOffPolicyCommand,
    ) -> Result<PaidTimeOffPolicyViewModel, ApplicationError> {
        let mut ctx = self.db.write_context();
        if ctx.find_tenant(command.tenant_id.as_uuid()).await?.is_none() {
            return Err(ApplicationError::precondition(format!(
                "tenant {} not found",
                command.tenant_id
            )));
        }

        let mut view_model = command.policy;
        view_model.tenant_id = Some(command.tenant_id.as_uuid());
        view_model.id.get_or_insert_with(Uuid::new_v4);

        let policy: PaidTimeOffPolicy = self.mapper.map(&view_model)?;
        let entity: PaidTimeOffPolicyEntity = self.mapper.map(&policy)?;
        ctx.changes().paid_time_off_policies.add(entity);
        ctx.save_changes().await?;

        info!(policy_id = %policy.id(), name = policy.name(), "paid time off policy created");
        Ok(self.mapper.map(&policy)?)
    }
}
