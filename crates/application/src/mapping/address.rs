use domain::{Address, DomainError, UsState, ZipCode};
use persistence::AddressEntity;

use super::Mapper;
use crate::error::MappingError;
use crate::view_models::AddressViewModel;

fn build(
    street1: &str,
    street2: Option<&str>,
    city: &str,
    state: &str,
    zip_code: &str,
) -> Result<Address, MappingError> {
    let state: UsState = state.parse().map_err(DomainError::from)?;
    let zip_code = ZipCode::new(zip_code).map_err(DomainError::from)?;
    let address = Address::new(street1, street2.map(str::to_string), city, state, zip_code)
        .map_err(DomainError::from)?;
    Ok(address)
}

pub struct AddressEntityToAddress;

impl Mapper<AddressEntity, Address> for AddressEntityToAddress {
    fn map(&self, source: &AddressEntity) -> Result<Address, MappingError> {
        build(
            &source.street1,
            source.street2.as_deref(),
            &source.city,
            &source.state,
            &source.zip_code,
        )
    }
}

pub struct AddressViewModelToAddress;

impl Mapper<AddressViewModel, Address> for AddressViewModelToAddress {
    fn map(&self, source: &AddressViewModel) -> Result<Address, MappingError> {
        build(
            &source.street1,
            source.street2.as_deref(),
            &source.city,
            &source.state,
            &source.zip_code,
        )
    }
}

pub struct AddressToAddressEntity;

impl Mapper<Address, AddressEntity> for AddressToAddressEntity {
    fn map(&self, source: &Address) -> Result<AddressEntity, MappingError> {
        Ok(AddressEntity {
            street1: source.street1().to_string(),
            street2: source.street2().map(str::to_string),
            city: source.city().to_string(),
            state: source.state().as_str().to_string(),
            zip_code: source.zip_code().to_string(),
        })
    }
}

pub struct AddressToAddressViewModel;

impl Mapper<Address, AddressViewModel> for AddressToAddressViewModel {
    fn map(&self, source: &Address) -> Result<AddressViewModel, MappingError> {
        Ok(AddressViewModel {
            street1: source.street1().to_string(),
            street2: source.street2().map(str::to_string),
            city: source.city().to_string(),
            state: source.state().as_str().to_string(),
            zip_code: source.zip_code().to_string(),
        })
    }
}
