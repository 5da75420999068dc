use std::sync::Arc;

use async_trait::async_trait;
use common::{EmployeeId, PaidTimeOffPolicyId, TenantId, UserAccountId};
use domain::{
    Address, Aggregate, DomainError, DomainEventDispatcher, Employee, EmployeeEvent,
    EmployeeProfile,
};
use persistence::{Database, EmployeeEntity, EmployeeLookup, WriteDbContext};
use tracing::{info, instrument};

use super::{Command, CommandHandler};
use crate::clock::Clock;
use crate::error::ApplicationError;
use crate::mapping::ModelMapper;
use crate::view_models::EmployeeViewModel;

/// Register a new employee in a tenant.
#[derive(Debug, Clone)]
pub struct RegisterNewEmployeeCommand {
    pub tenant_id: TenantId,
    pub employee: EmployeeViewModel,
}

impl Command for RegisterNewEmployeeCommand {
    type Response = EmployeeViewModel;
}

/// Handles [`RegisterNewEmployeeCommand`].
///
/// The referenced policy, if any, must exist in the same tenant, and a user
/// account links to at most one employee per tenant. The employee id is
/// always generated here.
/// `EmployeeRegistered` is dispatched after the commit.
pub struct RegisterNewEmployeeHandler<D: Database> {
    db: D,
    mapper: Arc<ModelMapper>,
    dispatcher: DomainEventDispatcher<EmployeeEvent>,
    clock: Arc<dyn Clock>,
}

impl<D: Database> RegisterNewEmployeeHandler<D> {
    pub fn new(
        db: D,
        mapper: Arc<ModelMapper>,
        dispatcher: DomainEventDispatcher<EmployeeEvent>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            db,
            mapper,
            dispatcher,
            clock,
        }
    }
}

#[async_trait]
impl<D: Database> CommandHandler<RegisterNewEmployeeCommand> for RegisterNewEmployeeHandler<D> {
    #[instrument(skip(self, command), fields(tenant_id = %command.tenant_id))]
    async fn handle(
        &self,
        command: RegisterNewEmployeeCommand,
    ) -> Result<EmployeeViewModel, ApplicationError> {
        let tenant_id = command.tenant_id;
        let view_model = command.employee;

        let mut ctx = self.db.write_context();
        if ctx.find_tenant(tenant_id.as_uuid()).await?.is_none() {
            return Err(ApplicationError::precondition(format!(
                "tenant {tenant_id} not found"
            )));
        }

        if let Some(policy_id) = view_model.paid_time_off_policy_id {
            let policy = ctx
                .find_paid_time_off_policy(policy_id, tenant_id.as_uuid())
                .await?;
            if policy.is_none() {
                return Err(ApplicationError::precondition(format!(
                    "paid time off policy {policy_id} not found in tenant {tenant_id}"
                )));
            }
        }

        if let Some(user_account_id) = view_model.user_account_id {
            let linked = ctx
                .find_employee(EmployeeLookup::ByUserAccount {
                    user_account_id,
                    tenant_id: tenant_id.as_uuid(),
                })
                .await?;
            if let Some(linked) = linked {
                return Err(ApplicationError::conflict(format!(
                    "user account {user_account_id} is already linked to employee {} in tenant {tenant_id}",
                    linked.id
                )));
            }
        }

        let address: Address = self.mapper.map(&view_model.address)?;
        let profile = EmployeeProfile {
            first_name: view_model.first_name,
            last_name: view_model.last_name,
            address,
            hire_date: view_model.hire_date,
        };
        let (employee, events) = Employee::new(EmployeeId::new(), tenant_id, profile)
            .map_err(DomainError::from)?
            .with_user_account(view_model.user_account_id.map(UserAccountId::from_uuid))
            .with_paid_time_off_policy_id(
                view_model
                    .paid_time_off_policy_id
                    .map(PaidTimeOffPolicyId::from_uuid),
            )
            .register(self.clock.now())
            .map_err(DomainError::from)?
            .into_parts();

        let entity: EmployeeEntity = self.mapper.map(&employee)?;
        ctx.changes().employees.add(entity);
        ctx.save_changes().await?;

        info!(employee_id = %employee.id(), "employee registered");
        let response: EmployeeViewModel = self.mapper.map(&employee)?;

        self.dispatcher.dispatch(events).await?;

        Ok(response)
    }
}
