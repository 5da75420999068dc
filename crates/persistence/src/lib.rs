//! Persistence gateway for the org manager.
//!
//! Two narrow interfaces over the database:
//! - [`ReadDbFacade`] for ad hoc, non-locking single-row lookups
//! - [`WriteDbContext`] for a per-use-case unit of work with eager loading
//!
//! Both are provided by [`InMemoryDatabase`] and [`PostgresDatabase`].

pub mod context;
pub mod entities;
pub mod error;
pub mod facade;
pub mod memory;
pub mod postgres;
pub mod query;

pub use context::{Change, ChangeSet, EmployeeLookup, EntitySet, WriteDbContext};
pub use entities::{
    AddressEntity, EmployeeEntity, Entity, PaidTimeOffPolicyEntity, PaidTimeOffRequestEntity,
    TenantEntity,
};
pub use error::{PersistenceError, Result};
pub use facade::ReadDbFacade;
pub use memory::{InMemoryDatabase, InMemoryWriteContext};
pub use postgres::{PostgresDatabase, PostgresWriteContext};
pub use query::{Query, QueryValue};

/// A database that hands out read facades and fresh write contexts.
///
/// A write context must not be shared between use cases.
pub trait Database: Clone + Send + Sync + 'static {
    type Facade: ReadDbFacade + 'static;
    type Context: WriteDbContext + 'static;

    fn read_facade(&self) -> Self::Facade;

    /// Creates a new, empty unit of work.
    fn write_context(&self) -> Self::Context;
}
