//! Identifier types shared by every layer of the org manager.

pub mod types;

pub use types::{EmployeeId, PaidTimeOffPolicyId, PaidTimeOffRequestId, TenantId, UserAccountId};
