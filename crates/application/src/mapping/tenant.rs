use common::TenantId;
use domain::{Aggregate, DomainError, Tenant};
use persistence::TenantEntity;

use super::Mapper;
use crate::error::MappingError;
use crate::view_models::TenantViewModel;

/// Requires an id; callers assign one before mapping a new tenant.
pub struct TenantViewModelToTenant;

impl Mapper<TenantViewModel, Tenant> for TenantViewModelToTenant {
    fn map(&self, source: &TenantViewModel) -> Result<Tenant, MappingError> {
        let id = source.id.ok_or(MappingError::MissingField("id"))?;
        let tenant = Tenant::new(TenantId::from_uuid(id), &source.name, source.slug.clone())
            .map_err(DomainError::from)?;
        Ok(tenant)
    }
}

pub struct TenantToTenantEntity;

impl Mapper<Tenant, TenantEntity> for TenantToTenantEntity {
    fn map(&self, source: &Tenant) -> Result<TenantEntity, MappingError> {
        Ok(TenantEntity {
            id: source.id().as_uuid(),
            name: source.name().to_string(),
            slug: source.slug().to_string(),
        })
    }
}

pub struct TenantEntityToTenant;

impl Mapper<TenantEntity, Tenant> for TenantEntityToTenant {
    fn map(&self, source: &TenantEntity) -> Result<Tenant, MappingError> {
        let tenant = Tenant::new(
            TenantId::from_uuid(source.id),
            &source.name,
            Some(source.slug.clone()),
        )
        .map_err(DomainError::from)?;
        Ok(tenant)
    }
}

pub struct TenantToTenantViewModel;

impl Mapper<Tenant, TenantViewModel> for TenantToTenantViewModel {
    fn map(&self, source: &Tenant) -> Result<TenantViewModel, MappingError> {
        Ok(TenantViewModel {
            id: Some(source.id().as_uuid()),
            name: source.name().to_string(),
            slug: Some(source.slug().to_string()),
        })
    }
}
