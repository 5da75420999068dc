use chrono::NaiveDate;
use common::{EmployeeId, PaidTimeOffPolicyId, PaidTimeOffRequestId, TenantId};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{
    PaidTimeOffPolicy, PaidTimeOffRequest, PaidTimeOffRequestParts, PaidTimeOffRequestService,
    PaidTimeOffRequestStatus,
};

fn history(tenant_id: TenantId, size: usize) -> Vec<PaidTimeOffRequest> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..size)
        .map(|i| {
            let start = base + chrono::Days::new((i as u64) * 3);
            PaidTimeOffRequest::restore(PaidTimeOffRequestParts {
                id: PaidTimeOffRequestId::new(),
                tenant_id,
                for_employee_id: EmployeeId::new(),
                submitted_by_id: EmployeeId::new(),
                paid_time_off_policy_id: PaidTimeOffPolicyId::new(),
                start_date: start,
                end_date: start,
                status: PaidTimeOffRequestStatus::Approved,
                notes: None,
                submitted_at: None,
            })
        })
        .collect()
}

fn bench_validate(c: &mut Criterion) {
    let tenant_id = TenantId::new();
    let policy =
        PaidTimeOffPolicy::new(PaidTimeOffPolicyId::new(), tenant_id, "Bench", 10_000).unwrap();
    let service = PaidTimeOffRequestService::new();
    let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let candidate = PaidTimeOffRequest::draft(
        PaidTimeOffRequestId::new(),
        NaiveDate::from_ymd_opt(2024, 12, 30).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    );

    let mut group = c.benchmark_group("time_off/validate");
    for size in [0usize, 10, 100] {
        let existing = history(tenant_id, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &existing, |b, existing| {
            b.iter(|| service.validate_paid_time_off_request(&candidate, existing, &policy, as_of));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
