use common::{EmployeeId, PaidTimeOffPolicyId, PaidTimeOffRequestId, TenantId};
use domain::{
    Aggregate, DomainError, PaidTimeOffPolicy, PaidTimeOffRequest, PaidTimeOffRequestParts,
    PaidTimeOffRequestStatus,
};
use persistence::{PaidTimeOffPolicyEntity, PaidTimeOffRequestEntity};

use super::Mapper;
use crate::error::MappingError;
use crate::view_models::{
    PaidTimeOffPolicyViewModel, PaidTimeOffRequestViewModel, SubmitNewPaidTimeOffRequestViewModel,
};

pub struct PaidTimeOffPolicyEntityToPaidTimeOffPolicy;

impl Mapper<PaidTimeOffPolicyEntity, PaidTimeOffPolicy> for PaidTimeOffPolicyEntityToPaidTimeOffPolicy {
    fn map(&self, source: &PaidTimeOffPolicyEntity) -> Result<PaidTimeOffPolicy, MappingError> {
        let days = u32::try_from(source.days_allowed_per_year).map_err(|_| {
            MappingError::invalid(
                "days_allowed_per_year",
                format!("{} is negative", source.days_allowed_per_year),
            )
        })?;

        let policy = PaidTimeOffPolicy::new(
            PaidTimeOffPolicyId::from_uuid(source.id),
            TenantId::from_uuid(source.tenant_id),
            &source.name,
            days,
        )
        .map_err(DomainError::from)?
        .with_allows_unlimited(source.allows_unlimited)
        .with_is_default(source.is_default);
        Ok(policy)
    }
}

pub struct PaidTimeOffPolicyToPaidTimeOffPolicyEntity;

impl Mapper<PaidTimeOffPolicy, PaidTimeOffPolicyEntity> for PaidTimeOffPolicyToPaidTimeOffPolicyEntity {
    fn map(&self, source: &PaidTimeOffPolicy) -> Result<PaidTimeOffPolicyEntity, MappingError> {
        let days = i32::try_from(source.days_allowed_per_year()).map_err(|_| {
            MappingError::invalid("days_allowed_per_year", "does not fit in a 32-bit column")
        })?;

        Ok(PaidTimeOffPolicyEntity {
            id: source.id().as_uuid(),
            tenant_id: source.tenant_id().as_uuid(),
            name: source.name().to_string(),
            days_allowed_per_year: days,
            allows_unlimited: source.allows_unlimited(),
            is_default: source.is_default(),
        })
    }
}

pub struct PaidTimeOffPolicyToPaidTimeOffPolicyViewModel;

impl Mapper<PaidTimeOffPolicy, PaidTimeOffPolicyViewModel>
    for PaidTimeOffPolicyToPaidTimeOffPolicyViewModel
{
    fn map(&self, source: &PaidTimeOffPolicy) -> Result<PaidTimeOffPolicyViewModel, MappingError> {
        Ok(PaidTimeOffPolicyViewModel {
            id: Some(source.id().as_uuid()),
            tenant_id: Some(source.tenant_id().as_uuid()),
            name: source.name().to_string(),
            days_allowed_per_year: source.days_allowed_per_year(),
            allows_unlimited: source.allows_unlimited(),
            is_default: source.is_default(),
        })
    }
}

/// Requires both the policy id and the tenant id to be set.
pub struct PaidTimeOffPolicyViewModelToPaidTimeOffPolicy;

impl Mapper<PaidTimeOffPolicyViewModel, PaidTimeOffPolicy>
    for PaidTimeOffPolicyViewModelToPaidTimeOffPolicy
{
    fn map(&self, source: &PaidTimeOffPolicyViewModel) -> Result<PaidTimeOffPolicy, MappingError> {
        let id = source.id.ok_or(MappingError::MissingField("id"))?;
        let tenant_id = source.tenant_id.ok_or(MappingError::MissingField("tenant_id"))?;

        let policy = PaidTimeOffPolicy::new(
            PaidTimeOffPolicyId::from_uuid(id),
            TenantId::from_uuid(tenant_id),
            &source.name,
            source.days_allowed_per_year,
        )
        .map_err(DomainError::from)?
        .with_allows_unlimited(source.allows_unlimited)
        .with_is_default(source.is_default);
        Ok(policy)
    }
}

pub struct PaidTimeOffRequestEntityToPaidTimeOffRequest;

impl Mapper<PaidTimeOffRequestEntity, PaidTimeOffRequest>
    for PaidTimeOffRequestEntityToPaidTimeOffRequest
{
    fn map(&self, source: &PaidTimeOffRequestEntity) -> Result<PaidTimeOffRequest, MappingError> {
        let status: PaidTimeOffRequestStatus = source
            .status
            .parse()
            .map_err(|message: String| MappingError::invalid("status", message))?;

        Ok(PaidTimeOffRequest::restore(PaidTimeOffRequestParts {
            id: PaidTimeOffRequestId::from_uuid(source.id),
            tenant_id: TenantId::from_uuid(source.tenant_id),
            for_employee_id: EmployeeId::from_uuid(source.for_employee_id),
            submitted_by_id: EmployeeId::from_uuid(source.submitted_by_id),
            paid_time_off_policy_id: PaidTimeOffPolicyId::from_uuid(source.paid_time_off_policy_id),
            start_date: source.start_date,
            end_date: source.end_date,
            status,
            notes: source.notes.clone(),
            submitted_at: source.submitted_at,
        }))
    }
}

/// Fails if any of the request's references is still unset.
pub struct PaidTimeOffRequestToPaidTimeOffRequestEntity;

impl Mapper<PaidTimeOffRequest, PaidTimeOffRequestEntity>
    for PaidTimeOffRequestToPaidTimeOffRequestEntity
{
    fn map(&self, source: &PaidTimeOffRequest) -> Result<PaidTimeOffRequestEntity, MappingError> {
        let tenant_id = source.tenant_id().ok_or(MappingError::MissingField("tenant_id"))?;
        let for_employee_id = source
            .for_employee_id()
            .ok_or(MappingError::MissingField("for_employee_id"))?;
        let submitted_by_id = source
            .submitted_by_id()
            .ok_or(MappingError::MissingField("submitted_by_id"))?;
        let policy_id = source
            .paid_time_off_policy_id()
            .ok_or(MappingError::MissingField("paid_time_off_policy_id"))?;

        Ok(PaidTimeOffRequestEntity {
            id: source.id().as_uuid(),
            tenant_id: tenant_id.as_uuid(),
            for_employee_id: for_employee_id.as_uuid(),
            submitted_by_id: submitted_by_id.as_uuid(),
            paid_time_off_policy_id: policy_id.as_uuid(),
            start_date: source.start_date(),
            end_date: source.end_date(),
            status: source.status().as_str().to_string(),
            notes: source.notes().map(str::to_string),
            submitted_at: source.submitted_at(),
        })
    }
}

pub struct PaidTimeOffRequestToPaidTimeOffRequestViewModel;

impl Mapper<PaidTimeOffRequest, PaidTimeOffRequestViewModel>
    for PaidTimeOffRequestToPaidTimeOffRequestViewModel
{
    fn map(&self, source: &PaidTimeOffRequest) -> Result<PaidTimeOffRequestViewModel, MappingError> {
        Ok(PaidTimeOffRequestViewModel {
            id: source.id().as_uuid(),
            tenant_id: source.tenant_id().map(|id| id.as_uuid()),
            for_employee_id: source.for_employee_id().map(|id| id.as_uuid()),
            submitted_by_id: source.submitted_by_id().map(|id| id.as_uuid()),
            paid_time_off_policy_id: source.paid_time_off_policy_id().map(|id| id.as_uuid()),
            start_date: source.start_date(),
            end_date: source.end_date(),
            days_requested: source.days_requested(),
            status: source.status(),
            notes: source.notes().map(str::to_string),
            submitted_at: source.submitted_at(),
        })
    }
}

/// Builds a fresh draft request with a newly generated id. Only the dates and
/// notes are carried over; the handler attaches employees and policy.
pub struct SubmitNewPaidTimeOffRequestViewModelToPaidTimeOffRequest;

impl Mapper<SubmitNewPaidTimeOffRequestViewModel, PaidTimeOffRequest>
    for SubmitNewPaidTimeOffRequestViewModelToPaidTimeOffRequest
{
    fn map(
        &self,
        source: &SubmitNewPaidTimeOffRequestViewModel,
    ) -> Result<PaidTimeOffRequest, MappingError> {
        Ok(PaidTimeOffRequest::draft(
            PaidTimeOffRequestId::new(),
            source.start_date.date(),
            source.end_date.date(),
        )
        .with_notes(source.notes.clone()))
    }
}
