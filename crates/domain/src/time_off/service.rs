//! Business-rule validation of paid time off requests.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{PaidTimeOffPolicy, PaidTimeOffRequest};
use crate::aggregate::Aggregate;

/// Verdict of [`PaidTimeOffRequestService::validate_paid_time_off_request`].
///
/// A rejection is a normal outcome shown to the user, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaidTimeOffRequestValidationResult {
    /// The request can be submitted.
    Ok,

    /// The request starts before the reference date.
    StartDateInPast,

    /// The request shares at least one day with a submitted or approved request.
    OverlapsExistingRequest,

    /// The employee does not have enough days left this calendar year.
    InsufficientBalance,
}

impl PaidTimeOffRequestValidationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, PaidTimeOffRequestValidationResult::Ok)
    }

    /// Returns the verdict name, used as a metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidTimeOffRequestValidationResult::Ok => "Ok",
            PaidTimeOffRequestValidationResult::StartDateInPast => "StartDateInPast",
            PaidTimeOffRequestValidationResult::OverlapsExistingRequest => {
                "OverlapsExistingRequest"
            }
            PaidTimeOffRequestValidationResult::InsufficientBalance => "InsufficientBalance",
        }
    }
}

impl std::fmt::Display for PaidTimeOffRequestValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless evaluation of a candidate request against the employee's policy
/// and existing requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaidTimeOffRequestService;

impl PaidTimeOffRequestService {
    pub fn new() -> Self {
        Self
    }

    /// Checks a structurally valid request, in order:
    ///
    /// 1. start date before `as_of` → `StartDateInPast`
    /// 2. inclusive overlap with a submitted or approved request → `OverlapsExistingRequest`
    /// 3. unless the policy is unlimited, more days than remain in the start
    ///    date's calendar year → `InsufficientBalance`
    ///
    /// `as_of` must already be a calendar day. Entries in `existing_requests`
    /// with the candidate's id are ignored.
    pub fn validate_paid_time_off_request(
        &self,
        request: &PaidTimeOffRequest,
        existing_requests: &[PaidTimeOffRequest],
        policy: &PaidTimeOffPolicy,
        as_of: NaiveDate,
    ) -> PaidTimeOffRequestValidationResult {
        if request.start_date() < as_of {
            return PaidTimeOffRequestValidationResult::StartDateInPast;
        }

        let active: Vec<&PaidTimeOffRequest> = existing_requests
            .iter()
            .filter(|existing| existing.id() != request.id() && existing.status().is_active())
            .collect();

        if active.iter().any(|existing| existing.overlaps(request)) {
            return PaidTimeOffRequestValidationResult::OverlapsExistingRequest;
        }

        if !policy.allows_unlimited() {
            let year = request.start_date().year();
            let booked: u32 = active
                .iter()
                .filter(|existing| existing.start_date().year() == year)
                .map(|existing| existing.days_requested())
                .sum();
            let remaining = policy.days_allowed_per_year().saturating_sub(booked);

            if request.days_requested() > remaining {
                return PaidTimeOffRequestValidationResult::InsufficientBalance;
            }
        }

        PaidTimeOffRequestValidationResult::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_off::{PaidTimeOffRequestParts, PaidTimeOffRequestStatus};
    use common::{EmployeeId, PaidTimeOffPolicyId, PaidTimeOffRequestId, TenantId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy(days: u32) -> PaidTimeOffPolicy {
        PaidTimeOffPolicy::new(PaidTimeOffPolicyId::new(), TenantId::new(), "Standard", days)
            .unwrap()
    }

    fn candidate(start: NaiveDate, end: NaiveDate) -> PaidTimeOffRequest {
        PaidTimeOffRequest::draft(PaidTimeOffRequestId::new(), start, end)
    }

    fn existing(
        start: NaiveDate,
        end: NaiveDate,
        status: PaidTimeOffRequestStatus,
    ) -> PaidTimeOffRequest {
        PaidTimeOffRequest::restore(PaidTimeOffRequestParts {
            id: PaidTimeOffRequestId::new(),
            tenant_id: TenantId::new(),
            for_employee_id: EmployeeId::new(),
            submitted_by_id: EmployeeId::new(),
            paid_time_off_policy_id: PaidTimeOffPolicyId::new(),
            start_date: start,
            end_date: end,
            status,
            notes: None,
            submitted_at: None,
        })
    }

    fn as_of() -> NaiveDate {
        date(2024, 6, 1)
    }

    #[test]
    fn test_ok_for_valid_range() {
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(date(2024, 6, 10), date(2024, 6, 12)),
            &[],
            &policy(3),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::Ok);
        assert!(result.is_ok());
    }

    #[test]
    fn test_start_on_as_of_is_allowed() {
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(as_of(), as_of()),
            &[],
            &policy(1),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::Ok);
    }

    #[test]
    fn test_start_in_past() {
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(date(2024, 5, 31), date(2024, 6, 2)),
            &[],
            &policy(10),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::StartDateInPast);
    }

    #[test]
    fn test_overlap_with_approved_request() {
        let existing = [existing(
            date(2024, 6, 11),
            date(2024, 6, 13),
            PaidTimeOffRequestStatus::Approved,
        )];
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(date(2024, 6, 10), date(2024, 6, 12)),
            &existing,
            &policy(20),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::OverlapsExistingRequest);
    }

    #[test]
    fn test_overlap_on_shared_boundary_day() {
        let existing = [existing(
            date(2024, 6, 12),
            date(2024, 6, 12),
            PaidTimeOffRequestStatus::Submitted,
        )];
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(date(2024, 6, 10), date(2024, 6, 12)),
            &existing,
            &policy(20),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::OverlapsExistingRequest);
    }

    #[test]
    fn test_inactive_requests_are_ignored() {
        let existing = [
            existing(date(2024, 6, 10), date(2024, 6, 12), PaidTimeOffRequestStatus::Rejected),
            existing(date(2024, 6, 10), date(2024, 6, 12), PaidTimeOffRequestStatus::Cancelled),
            existing(date(2024, 6, 10), date(2024, 6, 12), PaidTimeOffRequestStatus::Draft),
        ];
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(date(2024, 6, 10), date(2024, 6, 12)),
            &existing,
            &policy(3),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::Ok);
    }

    #[test]
    fn test_insufficient_balance() {
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(date(2024, 6, 10), date(2024, 6, 14)),
            &[],
            &policy(4),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::InsufficientBalance);
    }

    #[test]
    fn test_balance_counts_same_year_bookings_only() {
        let existing = [
            existing(date(2024, 2, 1), date(2024, 2, 5), PaidTimeOffRequestStatus::Approved),
            existing(date(2023, 12, 1), date(2023, 12, 10), PaidTimeOffRequestStatus::Approved),
        ];
        let service = PaidTimeOffRequestService::new();

        // 10 allowed, 5 booked in 2024: 5 more fit, 6 do not.
        let fits = service.validate_paid_time_off_request(
            &candidate(date(2024, 7, 1), date(2024, 7, 5)),
            &existing,
            &policy(10),
            as_of(),
        );
        assert_eq!(fits, PaidTimeOffRequestValidationResult::Ok);

        let too_many = service.validate_paid_time_off_request(
            &candidate(date(2024, 7, 1), date(2024, 7, 6)),
            &existing,
            &policy(10),
            as_of(),
        );
        assert_eq!(too_many, PaidTimeOffRequestValidationResult::InsufficientBalance);
    }

    #[test]
    fn test_unlimited_policy_skips_balance() {
        let unlimited = policy(0).with_allows_unlimited(true);
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(date(2024, 6, 10), date(2024, 8, 10)),
            &[],
            &unlimited,
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::Ok);
    }

    #[test]
    fn test_past_start_wins_over_overlap() {
        let existing = [existing(
            date(2024, 5, 30),
            date(2024, 6, 2),
            PaidTimeOffRequestStatus::Approved,
        )];
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &candidate(date(2024, 5, 31), date(2024, 6, 1)),
            &existing,
            &policy(0),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::StartDateInPast);
    }

    #[test]
    fn test_same_id_is_not_an_overlap() {
        let request = candidate(date(2024, 6, 10), date(2024, 6, 12));
        let parts = PaidTimeOffRequestParts {
            id: request.id(),
            tenant_id: TenantId::new(),
            for_employee_id: EmployeeId::new(),
            submitted_by_id: EmployeeId::new(),
            paid_time_off_policy_id: PaidTimeOffPolicyId::new(),
            start_date: request.start_date(),
            end_date: request.end_date(),
            status: PaidTimeOffRequestStatus::Submitted,
            notes: None,
            submitted_at: None,
        };
        let result = PaidTimeOffRequestService::new().validate_paid_time_off_request(
            &request,
            &[PaidTimeOffRequest::restore(parts)],
            &policy(3),
            as_of(),
        );
        assert_eq!(result, PaidTimeOffRequestValidationResult::Ok);
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(
            PaidTimeOffRequestValidationResult::OverlapsExistingRequest.to_string(),
            "OverlapsExistingRequest"
        );
        assert!(!PaidTimeOffRequestValidationResult::InsufficientBalance.is_ok());
    }
}
