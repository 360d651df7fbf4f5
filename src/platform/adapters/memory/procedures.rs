//! Named procedures executed by the in-memory data store.
//!
//! Each procedure mirrors a function shipped in the `PostgreSQL` migrations
//! and runs inside the store's write lock, so it is atomic with respect to
//! other store calls.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde_json::{Map, Value, json};

use super::store::StoreState;
use crate::platform::{
    domain::{ChangeEvent, Collection, Direction, OnConflict, Procedure, Query, Record},
    ports::{StoreError, StoreResult},
};

/// Dispatches a procedure call.
pub(super) fn call(
    state: &mut StoreState,
    procedure: Procedure,
    raw: &Value,
    events: &mut Vec<ChangeEvent>,
) -> StoreResult<Value> {
    let params = Params::new(procedure, raw)?;
    match procedure {
        Procedure::MarkAttendance => mark_attendance(state, &params, events),
        Procedure::GetUserAttendanceHistory => user_attendance_history(state, &params),
        Procedure::GetMonthlyAttendanceSummary => monthly_attendance_summary(state, &params),
        Procedure::IncrementNoticeViews => increment_notice_views(state, &params, events),
    }
}

struct Params<'a> {
    procedure: Procedure,
    values: &'a Map<String, Value>,
}

impl<'a> Params<'a> {
    fn new(procedure: Procedure, params: &'a Value) -> StoreResult<Self> {
        let values = params
            .as_object()
            .ok_or_else(|| invalid(procedure, "parameters must be a JSON object"))?;
        Ok(Self { procedure, values })
    }

    fn value(&self, name: &str) -> Value {
        self.values.get(name).cloned().unwrap_or(Value::Null)
    }

    fn string(&self, name: &str) -> StoreResult<&'a str> {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(self.procedure, format!("missing string parameter {name}")))
    }

    fn integer(&self, name: &str) -> StoreResult<i64> {
        self.values
            .get(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| invalid(self.procedure, format!("missing integer parameter {name}")))
    }

    fn date(&self, name: &str) -> StoreResult<NaiveDate> {
        let raw = self.string(name)?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|err| invalid(self.procedure, format!("{name}: {err}")))
    }
}

fn invalid(procedure: Procedure, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidParameters {
        procedure: procedure.as_str().to_owned(),
        reason: reason.into(),
    }
}

fn mark_attendance(
    state: &mut StoreState,
    params: &Params<'_>,
    events: &mut Vec<ChangeEvent>,
) -> StoreResult<Value> {
    let mut row = Record::new();
    row.insert("user_id".to_owned(), json!(params.string("user_id_param")?));
    row.insert("user_name".to_owned(), params.value("user_name_param"));
    row.insert("status".to_owned(), json!(params.string("status_param")?));
    row.insert("remarks".to_owned(), params.value("remarks_param"));
    row.insert(
        "date".to_owned(),
        json!(params.date("date_param")?.to_string()),
    );
    row.insert("marked_at".to_owned(), json!(params.string("marked_at_param")?));

    let stored = state.upsert_row(
        Collection::DailyAttendance,
        row,
        &OnConflict::update(&["user_id", "date"]),
        events,
    )?;
    Ok(stored.map_or(Value::Null, Value::Object))
}

fn user_attendance_history(state: &StoreState, params: &Params<'_>) -> StoreResult<Value> {
    let user_id = params.string("user_id_param")?;
    let days_back = params.integer("days_back")?;
    let as_of = params.date("as_of_param")?;
    // A window reaching past the calendar range covers all history.
    let since = u64::try_from(days_back.max(0))
        .ok()
        .and_then(|days| as_of.checked_sub_days(Days::new(days)))
        .unwrap_or(NaiveDate::MIN);

    let query = Query::new()
        .eq("user_id", user_id)
        .gte("date", since.to_string())
        .lte("date", as_of.to_string())
        .order_by("date", Direction::Descending);
    let rows = query.apply(table(state, Collection::DailyAttendance));
    Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
}

#[derive(Default)]
struct Tally {
    user_name: String,
    total: u32,
    present: u32,
    absent: u32,
    leave: u32,
    wfh: u32,
}

fn monthly_attendance_summary(state: &StoreState, params: &Params<'_>) -> StoreResult<Value> {
    let month = u32::try_from(params.integer("month_param")?)
        .map_err(|err| invalid(params.procedure, format!("month_param: {err}")))?;
    let year = i32::try_from(params.integer("year_param")?)
        .map_err(|err| invalid(params.procedure, format!("year_param: {err}")))?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| invalid(params.procedure, format!("no such month {year}-{month}")))?;
    let prefix = format!("{}-", first.format("%Y-%m"));

    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    for row in table(state, Collection::DailyAttendance) {
        let in_month = row
            .get("date")
            .and_then(Value::as_str)
            .is_some_and(|date| date.starts_with(&prefix));
        let Some(user_id) = row.get("user_id").and_then(Value::as_str) else {
            continue;
        };
        if !in_month {
            continue;
        }
        let tally = tallies.entry(user_id.to_owned()).or_insert_with(|| Tally {
            user_name: profile_name(state, user_id)
                .or_else(|| row.get("user_name").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or_else(|| user_id.to_owned()),
            ..Tally::default()
        });
        tally.total += 1;
        match row.get("status").and_then(Value::as_str) {
            Some("Present") => tally.present += 1,
            Some("Absent") => tally.absent += 1,
            Some("Leave") => tally.leave += 1,
            Some("WFH") => tally.wfh += 1,
            _ => {}
        }
    }

    let mut summary: Vec<(String, Tally)> = tallies.into_iter().collect();
    summary.sort_by(|(_, left), (_, right)| left.user_name.cmp(&right.user_name));
    Ok(Value::Array(
        summary
            .into_iter()
            .map(|(user_id, tally)| {
                json!({
                    "user_id": user_id,
                    "user_name": tally.user_name,
                    "total_days": tally.total,
                    "present_days": tally.present,
                    "absent_days": tally.absent,
                    "leave_days": tally.leave,
                    "wfh_days": tally.wfh,
                    "attendance_percentage": percentage(tally.present, tally.total),
                })
            })
            .collect(),
    ))
}

#[expect(
    clippy::float_arithmetic,
    reason = "matches the rounding of the PostgreSQL procedure"
)]
fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(part) / f64::from(total) * 10_000.0).round() / 100.0
}

fn profile_name(state: &StoreState, user_id: &str) -> Option<String> {
    let profile = table(state, Collection::Profiles)
        .iter()
        .find(|row| row.get("id").and_then(Value::as_str) == Some(user_id))?;
    profile
        .get("full_name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .or_else(|| profile.get("email").and_then(Value::as_str))
        .map(str::to_owned)
}

fn increment_notice_views(
    state: &mut StoreState,
    params: &Params<'_>,
    events: &mut Vec<ChangeEvent>,
) -> StoreResult<Value> {
    let notice_id = params.string("notice_id_param")?;
    let query = Query::new().eq("id", notice_id);
    let Some(current) = query
        .apply(table(state, Collection::Notices))
        .into_iter()
        .next()
    else {
        return Ok(Value::Null);
    };
    let next = current
        .get("view_count")
        .and_then(Value::as_i64)
        .unwrap_or(0)
        + 1;

    let mut patch = Record::new();
    patch.insert("view_count".to_owned(), json!(next));
    state.update_rows(Collection::Notices, &query, &patch, events)?;
    Ok(json!(next))
}

fn table(state: &StoreState, collection: Collection) -> &[Record] {
    state.tables.get(&collection).map_or(&[], Vec::as_slice)
}
