//! Attendance service tests.

#![expect(
    clippy::float_arithmetic,
    reason = "percentages are compared within an epsilon"
)]

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use crate::attendance::{
    adapters::PlatformAttendanceRepository,
    domain::{AttendanceStatus, MarkAttendanceRequest},
    services::AttendanceService,
};
use crate::clock::ManualClock;
use crate::error::ErrorKind;
use crate::identity::{
    adapters::PlatformProfileRepository,
    domain::{Principal, ProfileId, Role},
};
use crate::platform::{adapters::memory::InMemoryDataStore, domain::Collection};
use crate::test_support::{manual_clock, seed_profile};

type TestService = AttendanceService<
    PlatformAttendanceRepository<InMemoryDataStore>,
    PlatformProfileRepository<InMemoryDataStore>,
    ManualClock,
>;

struct Harness {
    store: Arc<InMemoryDataStore>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryDataStore::new());
    let service = AttendanceService::new(
        Arc::new(PlatformAttendanceRepository::new(Arc::clone(&store))),
        Arc::new(PlatformProfileRepository::new(Arc::clone(&store))),
        manual_clock(),
    );
    Harness { store, service }
}

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, d).expect("valid date")
}

async fn mark(harness: &Harness, who: &Principal, status: AttendanceStatus, on: NaiveDate) {
    harness
        .service
        .mark_attendance(who, MarkAttendanceRequest::new(who.id(), status).on(on))
        .await
        .expect("mark");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remarking_a_day_overwrites_it(harness: Harness) {
    let mia = seed_profile(&harness.store, "Mia", Role::Member).await;

    harness
        .service
        .mark_attendance(&mia, MarkAttendanceRequest::new(mia.id(), AttendanceStatus::Present))
        .await
        .expect("present");
    let second = harness
        .service
        .mark_attendance(
            &mia,
            MarkAttendanceRequest::new(mia.id(), AttendanceStatus::Leave).with_remarks("flu"),
        )
        .await
        .expect("leave");

    assert_eq!(second.status(), AttendanceStatus::Leave);
    assert_eq!(second.date(), day(3, 2));
    assert_eq!(second.remarks(), Some("flu"));
    assert_eq!(second.user_name(), Some("Mia"));
    assert_eq!(
        harness
            .store
            .rows(Collection::DailyAttendance)
            .expect("rows")
            .len(),
        1
    );
    assert_eq!(
        harness.service.status_today(&mia).await.expect("today"),
        AttendanceStatus::Leave
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_mark_only_themselves(harness: Harness) {
    let mia = seed_profile(&harness.store, "Mia", Role::Member).await;
    let otto = seed_profile(&harness.store, "Otto", Role::Member).await;
    let ada = seed_profile(&harness.store, "Ada", Role::Admin).await;

    let denied = harness
        .service
        .mark_attendance(
            &mia,
            MarkAttendanceRequest::new(otto.id(), AttendanceStatus::Present),
        )
        .await
        .expect_err("not self");
    let by_admin = harness
        .service
        .mark_attendance(
            &ada,
            MarkAttendanceRequest::new(otto.id(), AttendanceStatus::Wfh),
        )
        .await
        .expect("admin marks anyone");

    assert_eq!(denied.kind(), ErrorKind::PermissionDenied);
    assert_eq!(by_admin.user_id(), otto.id());
    assert_eq!(by_admin.user_name(), Some("Otto"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn marking_unknown_member_is_not_found(harness: Harness) {
    let ada = seed_profile(&harness.store, "Ada", Role::Admin).await;

    let err = harness
        .service
        .mark_attendance(
            &ada,
            MarkAttendanceRequest::new(ProfileId::new(), AttendanceStatus::Present),
        )
        .await
        .expect_err("ghost");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unmarked_day_reads_as_absent(harness: Harness) {
    let mia = seed_profile(&harness.store, "Mia", Role::Member).await;

    let status = harness
        .service
        .status_on(&mia, mia.id(), day(3, 1))
        .await
        .expect("status");

    assert_eq!(status, AttendanceStatus::Absent);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_is_newest_first_within_window(harness: Harness) {
    let mia = seed_profile(&harness.store, "Mia", Role::Member).await;
    let otto = seed_profile(&harness.store, "Otto", Role::Member).await;
    for on in [day(1, 20), day(2, 10), day(3, 2), day(3, 1)] {
        mark(&harness, &mia, AttendanceStatus::Present, on).await;
    }

    let dates: Vec<NaiveDate> = harness
        .service
        .recent_history(&mia, mia.id())
        .await
        .expect("history")
        .iter()
        .map(|record| record.date())
        .collect();
    let denied = harness
        .service
        .history(&otto, mia.id(), 7)
        .await
        .expect_err("not self");

    assert_eq!(dates, [day(3, 2), day(3, 1), day(2, 10)]);
    assert_eq!(denied.kind(), ErrorKind::PermissionDenied);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_summary_covers_team_and_member_sees_self(harness: Harness) {
    let ada = seed_profile(&harness.store, "Ada", Role::Admin).await;
    let mia = seed_profile(&harness.store, "Mia", Role::Member).await;
    let ben = seed_profile(&harness.store, "Ben", Role::Member).await;
    mark(&harness, &mia, AttendanceStatus::Present, day(3, 2)).await;
    mark(&harness, &mia, AttendanceStatus::Present, day(3, 3)).await;
    mark(&harness, &mia, AttendanceStatus::Absent, day(3, 4)).await;
    mark(&harness, &mia, AttendanceStatus::Present, day(2, 27)).await;
    mark(&harness, &ben, AttendanceStatus::Wfh, day(3, 2)).await;

    let team = harness
        .service
        .monthly_summary(&ada, 3, 2026)
        .await
        .expect("team summary");
    let own = harness
        .service
        .monthly_summary(&mia, 3, 2026)
        .await
        .expect("own summary");

    let names: Vec<&str> = team.iter().map(|s| s.user_name.as_str()).collect();
    assert_eq!(names, ["Ben", "Mia"]);
    let mia_row = team.get(1).expect("mia");
    assert_eq!((mia_row.total_days, mia_row.present_days, mia_row.absent_days), (3, 2, 1));
    assert!((mia_row.attendance_percentage - 66.67).abs() < f64::EPSILON);
    assert_eq!(own.len(), 1);
    assert_eq!(own.first().map(|s| s.total_days), Some(3));
    assert_eq!(own.first().map(|s| s.user_id), Some(mia.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_month_is_a_validation_error(harness: Harness) {
    let ada = seed_profile(&harness.store, "Ada", Role::Admin).await;

    let err = harness
        .service
        .monthly_summary(&ada, 0, 2026)
        .await
        .expect_err("month zero");

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn csv_export_depends_on_role(harness: Harness) {
    let ada = seed_profile(&harness.store, "Ada", Role::Admin).await;
    let mia = seed_profile(&harness.store, "Mia", Role::Member).await;
    mark(&harness, &mia, AttendanceStatus::Present, day(3, 2)).await;
    mark(&harness, &mia, AttendanceStatus::Leave, day(3, 3)).await;

    let team = harness
        .service
        .monthly_report_csv(&ada, 3, 2026)
        .await
        .expect("team csv");
    let personal = harness
        .service
        .monthly_report_csv(&mia, 3, 2026)
        .await
        .expect("personal csv");

    assert_eq!(
        team,
        "User Name,Total Days,Present,Absent,Leave,WFH,Attendance %\nMia,2,1,0,1,0,50"
    );
    assert_eq!(
        personal,
        "Date,Status,Remarks\n2026-03-03,Leave,\n2026-03-02,Present,"
    );
}
