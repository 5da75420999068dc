use common::{EmployeeId, PaidTimeOffPolicyId, TenantId, UserAccountId};
use domain::{Aggregate, DomainError, Employee, EmployeeProfile};
use persistence::EmployeeEntity;

use super::Mapper;
use super::address::{AddressEntityToAddress, AddressToAddressEntity, AddressToAddressViewModel};
use crate::error::MappingError;
use crate::view_models::EmployeeViewModel;

pub struct EmployeeEntityToEmployee;

impl Mapper<EmployeeEntity, Employee> for EmployeeEntityToEmployee {
    fn map(&self, source: &EmployeeEntity) -> Result<Employee, MappingError> {
        let profile = EmployeeProfile {
            first_name: source.first_name.clone(),
            last_name: source.last_name.clone(),
            address: AddressEntityToAddress.map(&source.address)?,
            hire_date: source.hire_date,
        };

        let employee = Employee::new(
            EmployeeId::from_uuid(source.id),
            TenantId::from_uuid(source.tenant_id),
            profile,
        )
        .map_err(DomainError::from)?
        .with_user_account(source.user_account_id.map(UserAccountId::from_uuid))
        .with_paid_time_off_policy_id(source.paid_time_off_policy_id.map(PaidTimeOffPolicyId::from_uuid));

        Ok(employee)
    }
}

/// Navigation fields of the entity are left empty.
pub struct EmployeeToEmployeeEntity;

impl Mapper<Employee, EmployeeEntity> for EmployeeToEmployeeEntity {
    fn map(&self, source: &Employee) -> Result<EmployeeEntity, MappingError> {
        Ok(EmployeeEntity {
            id: source.id().as_uuid(),
            tenant_id: source.tenant_id().as_uuid(),
            user_account_id: source.user_account_id().map(|id| id.as_uuid()),
            paid_time_off_policy_id: source.paid_time_off_policy_id().map(|id| id.as_uuid()),
            first_name: source.first_name().to_string(),
            last_name: source.last_name().to_string(),
            address: AddressToAddressEntity.map(source.address())?,
            hire_date: source.hire_date(),
            paid_time_off_policy: None,
            for_paid_time_off_requests: Vec::new(),
        })
    }
}

pub struct EmployeeToEmployeeViewModel;

impl Mapper<Employee, EmployeeViewModel> for EmployeeToEmployeeViewModel {
    fn map(&self, source: &Employee) -> Result<EmployeeViewModel, MappingError> {
        Ok(EmployeeViewModel {
            id: Some(source.id().as_uuid()),
            tenant_id: Some(source.tenant_id().as_uuid()),
            user_account_id: source.user_account_id().map(|id| id.as_uuid()),
            paid_time_off_policy_id: source.paid_time_off_policy_id().map(|id| id.as_uuid()),
            first_name: source.first_name().to_string(),
            last_name: source.last_name().to_string(),
            full_name: source.full_name(),
            address: AddressToAddressViewModel.map(source.address())?,
            hire_date: source.hire_date(),
        })
    }
}
