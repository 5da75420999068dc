//! Conversions between entities, aggregates, and view-models.
//!
//! Each ordered (source, target) pair has its own unit-struct [`Mapper`].
//! [`ModelMapper`] is a registry keyed by the pair's `TypeId`s, so a use case
//! asks for a conversion by type alone:
//!
//! ```
//! use application::mapping::ModelMapper;
//! use application::view_models::TenantViewModel;
//! use domain::Tenant;
//!
//! let mapper = ModelMapper::standard();
//! let vm = TenantViewModel {
//!     id: Some(uuid::Uuid::new_v4()),
//!     name: "Acme".to_string(),
//!     slug: None,
//! };
//! let tenant = mapper.map::<TenantViewModel, Tenant>(&vm).unwrap();
//! assert_eq!(tenant.slug(), "acme");
//! ```

mod address;
mod employee;
mod tenant;
mod time_off;

pub use address::{
    AddressEntityToAddress, AddressToAddressEntity, AddressToAddressViewModel,
    AddressViewModelToAddress,
};
pub use employee::{EmployeeEntityToEmployee, EmployeeToEmployeeEntity, EmployeeToEmployeeViewModel};
pub use tenant::{TenantEntityToTenant, TenantToTenantEntity, TenantToTenantViewModel, TenantViewModelToTenant};
pub use time_off::{
    PaidTimeOffPolicyEntityToPaidTimeOffPolicy, PaidTimeOffPolicyToPaidTimeOffPolicyEntity,
    PaidTimeOffPolicyToPaidTimeOffPolicyViewModel, PaidTimeOffPolicyViewModelToPaidTimeOffPolicy,
    PaidTimeOffRequestEntityToPaidTimeOffRequest, PaidTimeOffRequestToPaidTimeOffRequestEntity,
    PaidTimeOffRequestToPaidTimeOffRequestViewModel,
    SubmitNewPaidTimeOffRequestViewModelToPaidTimeOffRequest,
};

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use crate::error::MappingError;

/// Structural conversion from `S` to `T`. No I/O, no side effects.
pub trait Mapper<S, T>: Send + Sync {
    fn map(&self, source: &S) -> Result<T, MappingError>;
}

/// Registry of mappers keyed by (source type, target type).
#[derive(Default)]
pub struct ModelMapper {
    mappers: HashMap<(TypeId, TypeId), Box<dyn Any + Send + Sync>>,
}

impl ModelMapper {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every mapper the use cases need.
    pub fn standard() -> Self {
        Self::new()
            .with(AddressEntityToAddress)
            .with(AddressViewModelToAddress)
            .with(AddressToAddressEntity)
            .with(AddressToAddressViewModel)
            .with(EmployeeEntityToEmployee)
            .with(EmployeeToEmployeeEntity)
            .with(EmployeeToEmployeeViewModel)
            .with(PaidTimeOffPolicyEntityToPaidTimeOffPolicy)
            .with(PaidTimeOffPolicyToPaidTimeOffPolicyEntity)
            .with(PaidTimeOffPolicyToPaidTimeOffPolicyViewModel)
            .with(PaidTimeOffPolicyViewModelToPaidTimeOffPolicy)
            .with(PaidTimeOffRequestEntityToPaidTimeOffRequest)
            .with(PaidTimeOffRequestToPaidTimeOffRequestEntity)
            .with(PaidTimeOffRequestToPaidTimeOffRequestViewModel)
            .with(SubmitNewPaidTimeOffRequestViewModelToPaidTimeOffRequest)
            .with(TenantViewModelToTenant)
            .with(TenantToTenantEntity)
            .with(TenantEntityToTenant)
            .with(TenantToTenantViewModel)
    }

    /// Registers the mapper for `S -> T`, replacing any previous one.
    pub fn register<S, T, M>(&mut self, mapper: M)
    where
        S: 'static,
        T: 'static,
        M: Mapper<S, T> + 'static,
    {
        let boxed: Box<dyn Mapper<S, T>> = Box::new(mapper);
        self.mappers
            .insert((TypeId::of::<S>(), TypeId::of::<T>()), Box::new(boxed));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<S, T, M>(mut self, mapper: M) -> Self
    where
        S: 'static,
        T: 'static,
        M: Mapper<S, T> + 'static,
    {
        self.register(mapper);
        self
    }

    /// Returns true if a mapper for `S -> T` is registered.
    pub fn is_registered<S: 'static, T: 'static>(&self) -> bool {
        self.mappers
            .contains_key(&(TypeId::of::<S>(), TypeId::of::<T>()))
    }

    /// Maps `source` with the registered `S -> T` mapper.
    ///
    /// # Panics
    ///
    /// Panics if no mapper is registered for the pair. A missing registration
    /// is a wiring bug, not a data problem.
    pub fn map<S: 'static, T: 'static>(&self, source: &S) -> Result<T, MappingError> {
        let mapper = self
            .mappers
            .get(&(TypeId::of::<S>(), TypeId::of::<T>()))
            .and_then(|m| m.downcast_ref::<Box<dyn Mapper<S, T>>>());

        match mapper {
            Some(mapper) => mapper.map(source),
            None => panic!(
                "no mapper registered from {} to {}",
                type_name::<S>(),
                type_name::<T>()
            ),
        }
    }

    /// Maps every element of a slice.
    pub fn map_all<S: 'static, T: 'static>(&self, sources: &[S]) -> Result<Vec<T>, MappingError> {
        sources.iter().map(|s| self.map::<S, T>(s)).collect()
    }
}
