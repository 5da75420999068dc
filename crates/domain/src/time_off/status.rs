//! Paid time off request status.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The status of a paid time off request.
///
/// ```text
/// Draft ──► Submitted ──┬──► Approved
///                       ├──► Rejected
///                       └──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaidTimeOffRequestStatus {
    /// Request is being composed and has not been submitted.
    #[default]
    Draft,

    /// Request was submitted and awaits a decision.
    Submitted,

    /// Request was approved.
    Approved,

    /// Request was rejected.
    Rejected,

    /// Request was withdrawn.
    Cancelled,
}

impl PaidTimeOffRequestStatus {
    /// Returns true if the request can be submitted in this status.
    pub fn can_submit(&self) -> bool {
        matches!(self, PaidTimeOffRequestStatus::Draft)
    }

    /// Returns true if the request books days against the employee's allowance.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            PaidTimeOffRequestStatus::Submitted | PaidTimeOffRequestStatus::Approved
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidTimeOffRequestStatus::Draft => "Draft",
            PaidTimeOffRequestStatus::Submitted => "Submitted",
            PaidTimeOffRequestStatus::Approved => "Approved",
            PaidTimeOffRequestStatus::Rejected => "Rejected",
            PaidTimeOffRequestStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for PaidTimeOffRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaidTimeOffRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(PaidTimeOffRequestStatus::Draft),
            "Submitted" => Ok(PaidTimeOffRequestStatus::Submitted),
            "Approved" => Ok(PaidTimeOffRequestStatus::Approved),
            "Rejected" => Ok(PaidTimeOffRequestStatus::Rejected),
            "Cancelled" => Ok(PaidTimeOffRequestStatus::Cancelled),
            other => Err(format!("unknown paid time off request status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PaidTimeOffRequestStatus; 5] = [
        PaidTimeOffRequestStatus::Draft,
        PaidTimeOffRequestStatus::Submitted,
        PaidTimeOffRequestStatus::Approved,
        PaidTimeOffRequestStatus::Rejected,
        PaidTimeOffRequestStatus::Cancelled,
    ];

    #[test]
    fn test_default_status_is_draft() {
        assert_eq!(PaidTimeOffRequestStatus::default(), PaidTimeOffRequestStatus::Draft);
    }

    #[test]
    fn test_only_draft_can_submit() {
        assert!(PaidTimeOffRequestStatus::Draft.can_submit());
        assert!(!PaidTimeOffRequestStatus::Submitted.can_submit());
        assert!(!PaidTimeOffRequestStatus::Approved.can_submit());
        assert!(!PaidTimeOffRequestStatus::Rejected.can_submit());
        assert!(!PaidTimeOffRequestStatus::Cancelled.can_submit());
    }

    #[test]
    fn test_active_statuses() {
        assert!(!PaidTimeOffRequestStatus::Draft.is_active());
        assert!(PaidTimeOffRequestStatus::Submitted.is_active());
        assert!(PaidTimeOffRequestStatus::Approved.is_active());
        assert!(!PaidTimeOffRequestStatus::Rejected.is_active());
        assert!(!PaidTimeOffRequestStatus::Cancelled.is_active());
    }

    #[test]
    fn test_text_form_parses_back() {
        for status in ALL {
            assert_eq!(status.to_string().parse::<PaidTimeOffRequestStatus>(), Ok(status));
        }
        assert!("Pending".parse::<PaidTimeOffRequestStatus>().is_err());
    }
}
