//! Attendance repository backed by the platform data store and its
//! attendance procedures.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::attendance::{
    domain::{AttendanceRecord, AttendanceSummary, MarkedAttendance},
    ports::{AttendanceRepository, AttendanceRepositoryError, AttendanceRepositoryResult},
};
use crate::identity::domain::ProfileId;
use crate::platform::{
    domain::{Collection, Direction, Procedure, Query, from_record},
    ports::DataStore,
};

/// [`AttendanceRepository`] over `daily_attendance`.
///
/// Writes, history and the team summary go through platform procedures;
/// single-day and range reads query the collection directly.
#[derive(Debug)]
pub struct PlatformAttendanceRepository<S: DataStore> {
    store: Arc<S>,
}

impl<S: DataStore> Clone for PlatformAttendanceRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DataStore> PlatformAttendanceRepository<S> {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn select(&self, query: &Query) -> AttendanceRepositoryResult<Vec<AttendanceRecord>> {
        self.store
            .select(Collection::DailyAttendance, query)
            .await
            .map_err(AttendanceRepositoryError::persistence)?
            .into_iter()
            .map(|row| from_record(row).map_err(AttendanceRepositoryError::persistence))
            .collect()
    }

    async fn rpc_list<T: DeserializeOwned + Send>(
        &self,
        procedure: Procedure,
        params: Value,
    ) -> AttendanceRepositoryResult<Vec<T>> {
        let result = self
            .store
            .rpc(procedure, params)
            .await
            .map_err(AttendanceRepositoryError::persistence)?;
        if result.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(result).map_err(AttendanceRepositoryError::persistence)
    }
}

#[async_trait]
impl<S: DataStore> AttendanceRepository for PlatformAttendanceRepository<S> {
    async fn mark(
        &self,
        attendance: &MarkedAttendance,
    ) -> AttendanceRepositoryResult<AttendanceRecord> {
        let params = json!({
            "user_id_param": attendance.user_id,
            "user_name_param": attendance.user_name,
            "status_param": attendance.status,
            "remarks_param": attendance.remarks,
            "date_param": attendance.date,
            "marked_at_param": attendance.marked_at,
        });
        let stored = self
            .store
            .rpc(Procedure::MarkAttendance, params)
            .await
            .map_err(AttendanceRepositoryError::persistence)?;
        if stored.is_null() {
            return Err(AttendanceRepositoryError::MissingRow {
                user_id: attendance.user_id,
                date: attendance.date,
            });
        }
        serde_json::from_value(stored).map_err(AttendanceRepositoryError::persistence)
    }

    async fn find_on(
        &self,
        user_id: ProfileId,
        day: NaiveDate,
    ) -> AttendanceRepositoryResult<Option<AttendanceRecord>> {
        let query = Query::new()
            .eq("user_id", user_id.to_string())
            .eq("date", day.to_string())
            .limit(1);
        Ok(self.select(&query).await?.into_iter().next())
    }

    async fn history(
        &self,
        user_id: ProfileId,
        days_back: u32,
        as_of: NaiveDate,
    ) -> AttendanceRepositoryResult<Vec<AttendanceRecord>> {
        let params = json!({
            "user_id_param": user_id,
            "days_back": days_back,
            "as_of_param": as_of,
        });
        self.rpc_list(Procedure::GetUserAttendanceHistory, params)
            .await
    }

    async fn list_between(
        &self,
        user_id: ProfileId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> AttendanceRepositoryResult<Vec<AttendanceRecord>> {
        let query = Query::new()
            .eq("user_id", user_id.to_string())
            .gte("date", first.to_string())
            .lte("date", last.to_string())
            .order_by("date", Direction::Descending);
        self.select(&query).await
    }

    async fn monthly_summary(
        &self,
        month: u32,
        year: i32,
    ) -> AttendanceRepositoryResult<Vec<AttendanceSummary>> {
        let params = json!({ "month_param": month, "year_param": year });
        self.rpc_list(Procedure::GetMonthlyAttendanceSummary, params)
            .await
    }
}
