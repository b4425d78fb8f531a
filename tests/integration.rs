//! Integration tests for the salary calculation engine.
//!
//! This test suite covers:
//! - The monthly overtime end-to-end scenario
//! - A full department run over the bundled demo snapshot
//! - First-calculation identity rows and repeat-run idempotence
//! - Abort-on-failure with no partial writes
//! - Null grades, night windows and the rest-day minimum through a run
//! - The HTTP API

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{Value, json};
use tower::ServiceExt;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::{ConfigLoader, EngineConfig};
use salary_engine::engine::SalaryCalculator;
use salary_engine::error::EngineError;
use salary_engine::models::{
    AttendanceRecord, CalculationRun, Employee, PayPeriod, RateTable, SalaryComponent,
    SalaryResult,
};
use salary_engine::store::{DataStore, InMemoryStore, StoreSnapshot, WriteEvent};

// =============================================================================
// Test Helpers
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn april() -> PayPeriod {
    PayPeriod::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap()
}

fn employee(id: i64, ability_grade: Option<i32>) -> Employee {
    Employee {
        id,
        department_id: 10,
        birth_date: date(1990, 6, 15),
        ability_grade,
        job_title_grade: None,
        special_work_grade: None,
    }
}

/// Three employees aged 33 in April 2024, rates for base pay.
fn base_snapshot() -> StoreSnapshot {
    let mut snapshot = StoreSnapshot::default();
    snapshot.employees = vec![employee(1, Some(3)), employee(2, Some(3)), employee(3, None)];
    snapshot.rates_mut(RateTable::Age).insert(33, 80_000);
    snapshot.rates_mut(RateTable::AbilityGrade).insert(3, 50_000);
    snapshot.rates_mut(RateTable::JobTitleGrade).insert(1, 10_000);
    snapshot
}

fn calculator_for(store: &Arc<InMemoryStore>) -> SalaryCalculator {
    SalaryCalculator::new(store.clone(), Arc::new(EngineConfig::default()))
}

fn stored(store: &InMemoryStore, employee_id: i64) -> SalaryResult {
    store
        .get_result(employee_id, april().start_date)
        .unwrap()
        .expect("result row should exist")
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn post_calculations(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/calculations")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

/// 22 working days of 09:00-18:30 against a 157.5 hour month.
#[test]
fn test_monthly_overtime_end_to_end() {
    let mut snapshot = base_snapshot();
    snapshot.employees.truncate(1);
    snapshot.attendance = (1..=22)
        .map(|d| AttendanceRecord::worked(1, date(2024, 4, d), time(9, 0), time(18, 30)))
        .collect();
    let store = Arc::new(InMemoryStore::from_snapshot(snapshot));

    let run = calculator_for(&store).run_calculation(10, &april(), true).unwrap();

    let result = run.result_for(1).unwrap();
    assert_eq!(result.get(SalaryComponent::AgeSalary), 80_000);
    assert_eq!(result.get(SalaryComponent::AbilitySalary), 50_000);
    assert_eq!(result.get(SalaryComponent::OvertimeHours), 51);
    // truncate(130000 / 157.5 * 1.25 * 51.5)
    assert_eq!(result.get(SalaryComponent::OvertimeSalary), 53_134);
    assert_eq!(&stored(&store, 1), result);
}

#[test]
fn test_demo_snapshot_department_run() {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let store = Arc::new(
        InMemoryStore::load("./config/default/snapshot.yaml").expect("Failed to load snapshot"),
    );
    let calculator = SalaryCalculator::new(store.clone(), Arc::new(config.into_config()));

    let run = calculator.run_calculation(10, &april(), true).unwrap();
    assert_eq!(run.employees.len(), 3);
    assert_eq!(run.identity_rows_inserted, 3);

    // 1001: age 33, ability 3, job title 2, two domestic trip days at tier 0
    let r = stored(&store, 1001);
    assert_eq!(r.get(SalaryComponent::AgeSalary), 80_000);
    assert_eq!(r.get(SalaryComponent::AbilitySalary), 50_000);
    assert_eq!(r.get(SalaryComponent::JobTitleSalary), 20_000);
    assert_eq!(r.get(SalaryComponent::CommuteSalary), 12_000);
    assert_eq!(r.get(SalaryComponent::BusinessTripSalary), 6_000);
    assert_eq!(r.get(SalaryComponent::OvertimeHours), 0);
    assert_eq!(r.get(SalaryComponent::HolidayWorkHours), 5);
    assert_eq!(r.get(SalaryComponent::HolidayWorkSalary), 412);
    assert_eq!(r.get(SalaryComponent::NightWorkHours), 0);
    assert_eq!(r.get(SalaryComponent::NightWorkSalary), 103);

    // 1002: age 38 before the November birthday, early starts, one closure day
    let r = stored(&store, 1002);
    assert_eq!(r.get(SalaryComponent::AgeSalary), 90_000);
    assert_eq!(r.get(SalaryComponent::AbilitySalary), 60_000);
    assert_eq!(r.get(SalaryComponent::SpecialWorkSalary), 8_000);
    assert_eq!(r.get(SalaryComponent::HolidayWorkHours), 0);
    assert_eq!(r.get(SalaryComponent::NightWorkHours), 2);
    assert_eq!(r.get(SalaryComponent::NightWorkSalary), 476);
    assert_eq!(r.get(SalaryComponent::SpecialHolidayDays), 1);
    // (90000 + 60000 + 8000 + 8500 + 476) / 21 = 7951; 7951 * 60 / 100 = 4770
    assert_eq!(r.get(SalaryComponent::SpecialHolidaySalary), 4_770);

    // 1003: no grades, birthday later in April, no recorded hours
    let r = stored(&store, 1003);
    assert_eq!(r.get(SalaryComponent::AgeSalary), 62_000);
    assert_eq!(r.get(SalaryComponent::AbilitySalary), 0);
    assert_eq!(r.get(SalaryComponent::CommuteSalary), 6_000);
    assert_eq!(r.get(SalaryComponent::OvertimeSalary), 0);

    // Department 20 was not in scope
    assert!(store.get_result(2001, april().start_date).unwrap().is_none());
}

// =============================================================================
// Result writing
// =============================================================================

#[test]
fn test_first_run_inserts_identity_rows_before_any_write() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()).with_write_log());

    let run = calculator_for(&store).run_calculation(10, &april(), true).unwrap();

    assert_eq!(run.identity_rows_inserted, 3);
    let log = store.write_log();
    assert_eq!(log.len(), 6);
    let first_write = log
        .iter()
        .position(|e| matches!(e, WriteEvent::WriteRow { .. }))
        .unwrap();
    assert_eq!(first_write, 3);
    assert!(log[..3].iter().all(|e| matches!(e, WriteEvent::InsertRow { .. })));
}

#[test]
fn test_repeat_run_inserts_no_identity_rows() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()).with_write_log());
    let calculator = calculator_for(&store);
    calculator.run_calculation(10, &april(), true).unwrap();

    let repeat = calculator.run_calculation(10, &april(), false).unwrap();

    assert_eq!(repeat.identity_rows_inserted, 0);
    assert_eq!(store.result_count().unwrap(), 3);
    let inserts = store
        .write_log()
        .iter()
        .filter(|e| matches!(e, WriteEvent::InsertRow { .. }))
        .count();
    assert_eq!(inserts, 3);
}

#[test]
fn test_repeat_runs_are_idempotent() {
    let mut snapshot = base_snapshot();
    snapshot.attendance = (1..=25)
        .map(|d| AttendanceRecord::worked(1, date(2024, 4, d), time(4, 0), time(23, 0)))
        .collect();
    let store = Arc::new(InMemoryStore::from_snapshot(snapshot));
    let calculator = calculator_for(&store);

    calculator.run_calculation(10, &april(), true).unwrap();
    let after_first: Vec<SalaryResult> = (1..=3).map(|id| stored(&store, id)).collect();
    calculator.run_calculation(10, &april(), false).unwrap();
    calculator.run_calculation(10, &april(), false).unwrap();
    let after_repeat: Vec<SalaryResult> = (1..=3).map(|id| stored(&store, id)).collect();

    assert_eq!(after_first, after_repeat);
    assert_eq!(store.result_count().unwrap(), 3);
}

#[test]
fn test_misused_first_flag_does_not_duplicate_rows() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()));
    let calculator = calculator_for(&store);

    calculator.run_calculation(10, &april(), true).unwrap();
    let again = calculator.run_calculation(10, &april(), true).unwrap();

    assert_eq!(again.identity_rows_inserted, 0);
    assert_eq!(store.result_count().unwrap(), 3);
}

#[test]
fn test_failure_aborts_run_without_partial_writes() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()).with_write_log());
    store.fail_operation("sum_allowance");

    let result = calculator_for(&store).run_calculation(10, &april(), true);

    match result {
        Err(EngineError::DataAccess { operation, .. }) => assert_eq!(operation, "sum_allowance"),
        other => panic!("Expected DataAccess error, got {:?}", other),
    }
    assert!(store.write_log().is_empty());
    assert_eq!(store.result_count().unwrap(), 0);
}

#[test]
fn test_employee_lookup_failure_aborts_run() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()).with_write_log());
    store.fail_operation("get_employee");

    assert!(calculator_for(&store).run_calculation(10, &april(), true).is_err());
    assert!(store.write_log().is_empty());
}

// =============================================================================
// Rule behaviour through a run
// =============================================================================

#[test]
fn test_null_grades_give_zero_components() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()));

    let run = calculator_for(&store).run_calculation(10, &april(), false).unwrap();

    let result = run.result_for(3).unwrap();
    assert_eq!(result.get(SalaryComponent::AbilitySalary), 0);
    assert_eq!(result.get(SalaryComponent::JobTitleSalary), 0);
    assert_eq!(result.get(SalaryComponent::SpecialWorkSalary), 0);
    assert_eq!(result.get(SalaryComponent::AgeSalary), 80_000);
}

#[test]
fn test_night_windows_both_counted() {
    let mut snapshot = base_snapshot();
    snapshot.attendance = vec![AttendanceRecord::worked(1, date(2024, 4, 1), time(4, 0), time(23, 0))];
    let store = Arc::new(InMemoryStore::from_snapshot(snapshot));

    let run = calculator_for(&store).run_calculation(10, &april(), false).unwrap();

    let result = run.result_for(1).unwrap();
    assert_eq!(result.get(SalaryComponent::NightWorkHours), 2);
    // truncate(130000 / 157.5 * 0.25 * 2)
    assert_eq!(result.get(SalaryComponent::NightWorkSalary), 412);
}

#[test]
fn test_rest_day_minimum_applies() {
    let mut snapshot = base_snapshot();
    snapshot.holidays.insert(date(2024, 4, 29));
    snapshot.attendance = vec![
        AttendanceRecord::worked(1, date(2024, 4, 6), time(9, 0), time(10, 30)), // Saturday 1.5h
        AttendanceRecord::worked(1, date(2024, 4, 29), time(9, 0), time(12, 0)), // holiday 3h
    ];
    let store = Arc::new(InMemoryStore::from_snapshot(snapshot));

    let run = calculator_for(&store).run_calculation(10, &april(), false).unwrap();

    let result = run.result_for(1).unwrap();
    assert_eq!(result.get(SalaryComponent::HolidayWorkHours), 3);
    // truncate(130000 / 157.5 * 0.1 * 3)
    assert_eq!(result.get(SalaryComponent::HolidayWorkSalary), 247);
}

#[test]
fn test_birthday_boundary_through_run() {
    let store = Arc::new(InMemoryStore::from_snapshot({
        let mut snapshot = base_snapshot();
        snapshot.rates_mut(RateTable::Age).insert(34, 82_000);
        snapshot
    }));
    let calculator = calculator_for(&store);

    let before = PayPeriod::new(date(2024, 6, 14), date(2024, 7, 13)).unwrap();
    let on = PayPeriod::new(date(2024, 6, 15), date(2024, 7, 14)).unwrap();

    let run_before = calculator.run_calculation(10, &before, true).unwrap();
    let run_on = calculator.run_calculation(10, &on, true).unwrap();

    assert_eq!(run_before.result_for(1).unwrap().get(SalaryComponent::AgeSalary), 80_000);
    assert_eq!(run_on.result_for(1).unwrap().get(SalaryComponent::AgeSalary), 82_000);
    assert_eq!(store.result_count().unwrap(), 6);
}

#[test]
fn test_unresolved_components_reported() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()));

    let run = calculator_for(&store).run_calculation(10, &april(), true).unwrap();

    assert_eq!(
        run.unresolved,
        vec![
            SalaryComponent::Deduction,
            SalaryComponent::NonWorkingTime,
            SalaryComponent::PaidHolidayDays,
        ]
    );
    for calculation in &run.employees {
        assert_eq!(calculation.audit_trace.warnings.len(), 3);
        assert_eq!(calculation.result.get(SalaryComponent::Deduction), 0);
    }
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_calculate_then_read_result() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()));
    let router = create_router(AppState::new(calculator_for(&store)));

    let (status, body) = send(
        router.clone(),
        post_calculations(json!({
            "department_id": 10,
            "period_start": "2024-04-01",
            "period_end": "2024-04-30",
            "first_calculation": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let run: CalculationRun = serde_json::from_value(body).unwrap();
    assert_eq!(run.identity_rows_inserted, 3);
    assert_eq!(run.employees[0].audit_trace.steps[0].rule_id, "age_salary");

    let (status, body) = send(
        router,
        Request::get("/results/1/2024-04-01").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employee_id"], 1);
    assert_eq!(body["components"]["age_salary"], 80_000);
    assert_eq!(body["components"]["ability_salary"], 50_000);
}

#[tokio::test]
async fn test_api_unknown_result_is_404() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()));
    let router = create_router(AppState::new(calculator_for(&store)));

    let (status, body) = send(
        router,
        Request::get("/results/99/2024-04-01").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RESULT_NOT_FOUND");
}

#[tokio::test]
async fn test_api_failure_leaves_store_untouched() {
    let store = Arc::new(InMemoryStore::from_snapshot(base_snapshot()));
    store.fail_operation("get_attendance");
    let router = create_router(AppState::new(calculator_for(&store)));

    let (status, body) = send(
        router,
        post_calculations(json!({
            "department_id": 10,
            "period_start": "2024-04-01",
            "period_end": "2024-04-30",
            "first_calculation": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "DATA_ACCESS_ERROR");
    assert_eq!(store.result_count().unwrap(), 0);
}
