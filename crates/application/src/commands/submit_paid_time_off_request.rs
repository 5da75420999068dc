use std::sync::Arc;

use async_trait::async_trait;
use common::{TenantId, UserAccountId};
use domain::{
    Aggregate, DomainError, DomainEventDispatcher, Employee, PaidTimeOffPolicy,
    PaidTimeOffRequest, PaidTimeOffRequestEvent, PaidTimeOffRequestService,
    PaidTimeOffRequestValidationResult,
};
use persistence::{
    Database, EmployeeEntity, EmployeeLookup, PaidTimeOffRequestEntity, Query, ReadDbFacade,
    WriteDbContext,
};
use tracing::{info, instrument, warn};

use super::{Command, CommandHandler};
use crate::clock::Clock;
use crate::error::ApplicationError;
use crate::mapping::ModelMapper;
use crate::view_models::{PaidTimeOffRequestViewModel, SubmitNewPaidTimeOffRequestViewModel};

const SUBMITTER_QUERY: &str =
    "SELECT * FROM employees WHERE user_account_id = $1 AND tenant_id = $2 LIMIT 1";

/// Submit a new paid time off request on behalf of the acting user, or of
/// `paid_time_off_request.for_employee_id` when set.
#[derive(Debug, Clone)]
pub struct SubmitNewPaidTimeOffRequestCommand {
    pub user_account_id: UserAccountId,
    pub tenant_id: TenantId,
    pub paid_time_off_request: SubmitNewPaidTimeOffRequestViewModel,
}

impl Command for SubmitNewPaidTimeOffRequestCommand {
    type Response = SubmitNewPaidTimeOffRequestViewModel;
}

/// Handles [`SubmitNewPaidTimeOffRequestCommand`].
///
/// A business-rule rejection is not an error: the verdict is returned in
/// `result` and nothing is persisted. On `Ok` the request is saved, the
/// created request is returned in `created_paid_time_off_request` and the
/// `PaidTimeOffRequestSubmitted` event is dispatched after the commit.
pub struct SubmitNewPaidTimeOffRequestHandler<D: Database> {
    db: D,
    mapper: Arc<ModelMapper>,
    service: PaidTimeOffRequestService,
    dispatcher: DomainEventDispatcher<PaidTimeOffRequestEvent>,
    clock: Arc<dyn Clock>,
}

impl<D: Database> SubmitNewPaidTimeOffRequestHandler<D> {
    pub fn new(
        db: D,
        mapper: Arc<ModelMapper>,
        dispatcher: DomainEventDispatcher<PaidTimeOffRequestEvent>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            db,
            mapper,
            service: PaidTimeOffRequestService::new(),
            dispatcher,
            clock,
        }
    }

    async fn find_submitter(
        &self,
        command: &SubmitNewPaidTimeOffRequestCommand,
    ) -> Result<Option<EmployeeEntity>, ApplicationError> {
        let query = Query::new(SUBMITTER_QUERY)
            .bind("user_account_id", command.user_account_id.as_uuid())
            .bind("tenant_id", command.tenant_id.as_uuid());

        Ok(self.db.read_facade().query_first_or_default(&query).await?)
    }
}

#[async_trait]
impl<D: Database> CommandHandler<SubmitNewPaidTimeOffRequestCommand>
    for SubmitNewPaidTimeOffRequestHandler<D>
{
    #[instrument(
        skip(self, command),
        fields(
            tenant_id = %command.tenant_id,
            user_account_id = %command.user_account_id,
        )
    )]
    async fn handle(
        &self,
        mut command: SubmitNewPaidTimeOffRequestCommand,
    ) -> Result<SubmitNewPaidTimeOffRequestViewModel, ApplicationError> {
        command.paid_time_off_request.normalize_dates();
        let tenant_id = command.tenant_id.as_uuid();

        let submitter_entity = self.find_submitter(&command).await?.ok_or_else(|| {
            ApplicationError::precondition(format!(
                "no employee for user account {} in tenant {}",
                command.user_account_id, command.tenant_id
            ))
        })?;

        // TODO: check that the submitter may file requests for another
        // employee before honoring for_employee_id.
        let lookup = match command.paid_time_off_request.for_employee_id {
            Some(employee_id) => EmployeeLookup::ById {
                employee_id,
                tenant_id,
            },
            None => EmployeeLookup::ByUserAccount {
                user_account_id: command.user_account_id.as_uuid(),
                tenant_id,
            },
        };

        let mut ctx = self.db.write_context();
        let employee_entity = ctx.find_employee(lookup).await?.ok_or_else(|| {
            ApplicationError::precondition(format!(
                "employee not found in tenant {}",
                command.tenant_id
            ))
        })?;
        let policy_entity = employee_entity.paid_time_off_policy.as_ref().ok_or_else(|| {
            ApplicationError::precondition(format!(
                "employee {} has no paid time off policy",
                employee_entity.id
            ))
        })?;

        let employee: Employee = self.mapper.map(&employee_entity)?;
        let submitted_by: Employee = self.mapper.map(&submitter_entity)?;
        let policy: PaidTimeOffPolicy = self.mapper.map(policy_entity)?;
        let existing: Vec<PaidTimeOffRequest> = self
            .mapper
            .map_all::<PaidTimeOffRequestEntity, PaidTimeOffRequest>(
                &employee_entity.for_paid_time_off_requests,
            )?;

        let request = self
            .mapper
            .map::<SubmitNewPaidTimeOffRequestViewModel, PaidTimeOffRequest>(
                &command.paid_time_off_request,
            )?
            .with_for_employee(employee)
            .with_submitted_by(submitted_by)
            .with_paid_time_off_policy(policy.clone());
        request.validate_aggregate().map_err(DomainError::from)?;

        let mut response = command.paid_time_off_request;
        let verdict = self.service.validate_paid_time_off_request(
            &request,
            &existing,
            &policy,
            self.clock.today(),
        );
        response.result = Some(verdict);

        if verdict != PaidTimeOffRequestValidationResult::Ok {
            warn!(reason = verdict.as_str(), "paid time off request rejected");
            metrics::counter!("pto_requests_rejected_total", "reason" => verdict.as_str())
                .increment(1);
            return Ok(response);
        }

        let (request, events) = request
            .submit(self.clock.now())
            .map_err(DomainError::from)?
            .into_parts();

        let mut entity: PaidTimeOffRequestEntity = self.mapper.map(&request)?;
        entity.tenant_id = tenant_id;
        ctx.changes().paid_time_off_requests.add(entity);
        ctx.save_changes().await?;

        let created: PaidTimeOffRequestViewModel = self.mapper.map(&request)?;
        info!(
            request_id = %request.id(),
            days_requested = created.days_requested,
            "paid time off request submitted"
        );
        metrics::counter!("pto_requests_submitted_total").increment(1);
        response.created_paid_time_off_request = Some(created);

        self.dispatcher.dispatch(events).await?;

        Ok(response)
    }
}
