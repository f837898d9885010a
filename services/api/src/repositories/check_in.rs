//! Check-in queries

use chrono::NaiveDate;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{Postgres, QueryBuilder, Row, postgres::PgRow};
use stats::{Calendar, CheckIn, CheckInFilter, CheckInKind, NewCheckIn};
use uuid::Uuid;

use super::PgRecordStore;

const CHECK_IN_COLUMNS: &str = "id, user_id, task_id, type, duration, logged_at";

fn check_in_from_row(row: &PgRow) -> Result<CheckIn, sqlx::Error> {
    let kind: String = row.try_get("type")?;

    Ok(CheckIn {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        task_id: row.try_get("task_id")?,
        kind: kind
            .parse::<CheckInKind>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        duration: row.try_get("duration")?,
        timestamp: row.try_get("logged_at")?,
    })
}

/// Append `WHERE` clauses for every constraint set in `filter`
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &CheckInFilter, calendar: &Calendar) {
    builder.push(" WHERE TRUE");

    if let Some(user_id) = filter.user_id {
        builder.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(task_id) = filter.task_id {
        builder.push(" AND task_id = ").push_bind(task_id);
    }
    if let Some(kind) = filter.kind {
        builder.push(" AND type = ").push_bind(kind.as_str());
    }
    if let Some(day) = filter.on {
        let (start, end) = calendar.day_bounds(day);
        builder
            .push(" AND logged_at >= ")
            .push_bind(start)
            .push(" AND logged_at < ")
            .push_bind(end);
    }
}

impl PgRecordStore {
    pub(crate) async fn select_check_ins(
        &self,
        filter: &CheckInFilter,
    ) -> DatabaseResult<Vec<CheckIn>> {
        let mut builder = QueryBuilder::new(format!("SELECT {CHECK_IN_COLUMNS} FROM checkins"));
        push_filter(&mut builder, filter, &self.calendar);
        builder.push(" ORDER BY logged_at ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        rows.iter()
            .map(check_in_from_row)
            .collect::<Result<_, _>>()
            .map_err(DatabaseError::Query)
    }

    pub(crate) async fn sum_check_in_duration(&self, filter: &CheckInFilter) -> DatabaseResult<i64> {
        let mut builder = QueryBuilder::new("SELECT COALESCE(SUM(duration), 0)::BIGINT FROM checkins");
        push_filter(&mut builder, filter, &self.calendar);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    pub(crate) async fn count_matching_check_ins(
        &self,
        filter: &CheckInFilter,
    ) -> DatabaseResult<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM checkins");
        push_filter(&mut builder, filter, &self.calendar);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    /// Dates are shifted by the calendar's fixed offset before truncation
    pub(crate) async fn distinct_check_in_dates(
        &self,
        user_id: Uuid,
    ) -> DatabaseResult<Vec<NaiveDate>> {
        let offset_seconds = f64::from(self.calendar.offset().local_minus_utc());

        sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT DISTINCT ((logged_at AT TIME ZONE 'UTC') + make_interval(secs => $2))::date AS day
            FROM checkins
            WHERE user_id = $1
            ORDER BY day DESC
            "#,
        )
        .bind(user_id)
        .bind(offset_seconds)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    pub(crate) async fn create_check_in(&self, new_check_in: &NewCheckIn) -> DatabaseResult<CheckIn> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO checkins (id, user_id, task_id, type, duration, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CHECK_IN_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new_check_in.user_id)
        .bind(new_check_in.task_id)
        .bind(new_check_in.kind.as_str())
        .bind(new_check_in.duration)
        .bind(new_check_in.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        check_in_from_row(&row).map_err(DatabaseError::Query)
    }
}
