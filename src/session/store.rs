//! Session persistence and statistics
//!
//! The session store owns two persisted collections kept consistent by a
//! single transaction per append: the bounded session log (most recent 100
//! records, insertion order) and a daily-count index keyed by local
//! calendar day. The index survives log eviction, so streaks and per-day
//! counts stay correct after detailed records roll off.
//!
//! Reads are fail-open: absent, unreadable or malformed stored data is
//! treated as empty history. Writes never surface an error to the caller;
//! failures are logged and swallowed so the timer flow cannot be broken by
//! storage trouble. The store assumes a single logical owner and does not
//! serialize concurrent callers itself.

use crate::error::{FocustrackError, Result};
use crate::session::{SessionKind, SessionRecord};
use crate::storage;
use chrono::{DateTime, Duration, Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Maximum number of detailed records kept in the log
///
/// Older records are evicted FIFO on append; the daily-count index is
/// unaffected by eviction.
pub const MAX_RETAINED_RECORDS: usize = 100;

/// Aggregated numbers for one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayStat {
    /// The calendar day (local)
    pub date: NaiveDate,
    /// Sessions appended on that day (any kind, any completion state)
    pub sessions: u32,
    /// Total completed focus seconds on that day
    pub focus_time: f64,
}

/// Durable store for session records and daily counts
pub struct SessionStore {
    db_path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by the default database location
    ///
    /// Honors the `FOCUSTRACK_DB` environment override, otherwise uses the
    /// platform data directory.
    ///
    /// # Errors
    ///
    /// Returns `FocustrackError::Storage` if the location cannot be
    /// resolved or the schema cannot be initialized.
    pub fn new() -> Result<Self> {
        let db_path = storage::resolve_db_path(None)?;
        Self::new_with_path(db_path)
    }

    /// Create a store backed by the specified database file
    ///
    /// Primarily useful for tests and for the `--storage-path` CLI
    /// override.
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();
        storage::ensure_parent_dir(&db_path)?;

        let store = Self { db_path };
        store.init()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn init(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                duration_secs REAL NOT NULL,
                kind TEXT NOT NULL,
                completed INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS daily_counts (
                day TEXT PRIMARY KEY,
                count INTEGER NOT NULL
            );",
        )
        .map_err(|e| FocustrackError::Storage(format!("Failed to create tables: {}", e)))?;

        Ok(())
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .map_err(|e| FocustrackError::Storage(format!("Failed to open database: {}", e)).into())
    }

    // --- Appending ---

    /// Append a record to the log and bump the daily-count index
    ///
    /// Both effects are applied in one transaction: the count for the
    /// record's local calendar day is incremented (any kind, completed or
    /// not), the record is inserted, and the log is truncated to the most
    /// recent [`MAX_RETAINED_RECORDS`].
    ///
    /// Never fails visibly: storage errors are logged at `warn` and
    /// swallowed.
    pub fn append(&self, record: &SessionRecord) {
        if let Err(e) = self.try_append(record) {
            tracing::warn!("failed to persist session record {}: {}", record.id(), e);
        }
    }

    fn try_append(&self, record: &SessionRecord) -> Result<()> {
        let mut conn = self.open()?;
        let tx = conn
            .transaction()
            .map_err(|e| FocustrackError::Storage(format!("Failed to start transaction: {}", e)))?;

        let day = day_key(record.timestamp().date_naive());
        tx.execute(
            "INSERT INTO daily_counts (day, count) VALUES (?1, 1)
             ON CONFLICT(day) DO UPDATE SET count = count + 1",
            params![day],
        )
        .map_err(|e| FocustrackError::Storage(format!("Failed to bump daily count: {}", e)))?;

        tx.execute(
            "INSERT INTO sessions (id, recorded_at, duration_secs, kind, completed)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.id().to_string(),
                record.timestamp().to_rfc3339(),
                record.duration(),
                record.kind().as_str(),
                record.completed_successfully(),
            ],
        )
        .map_err(|e| FocustrackError::Storage(format!("Failed to insert record: {}", e)))?;

        tx.execute(
            "DELETE FROM sessions WHERE seq NOT IN
             (SELECT seq FROM sessions ORDER BY seq DESC LIMIT ?1)",
            params![MAX_RETAINED_RECORDS as i64],
        )
        .map_err(|e| FocustrackError::Storage(format!("Failed to truncate log: {}", e)))?;

        tx.commit()
            .map_err(|e| FocustrackError::Storage(format!("Failed to commit append: {}", e)))?;

        Ok(())
    }

    /// Build and append a focus record
    pub fn append_focus(&self, duration: f64, completed: bool) -> SessionRecord {
        let record = SessionRecord::new(duration, SessionKind::Focus, completed);
        self.append(&record);
        record
    }

    /// Build and append a completed break record
    pub fn append_break(&self, duration: f64, kind: SessionKind) -> SessionRecord {
        let record = SessionRecord::completed(duration, kind);
        self.append(&record);
        record
    }

    // --- Log queries ---

    /// The full retained log, insertion order
    pub fn records(&self) -> Vec<SessionRecord> {
        match self.try_records() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("failed to read session log, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn try_records(&self) -> Result<Vec<SessionRecord>> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, recorded_at, duration_secs, kind, completed
                 FROM sessions ORDER BY seq ASC",
            )
            .map_err(|e| FocustrackError::Storage(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                ))
            })
            .map_err(|e| FocustrackError::Storage(format!("Failed to query log: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            match row {
                Ok(raw) => match decode_row(raw) {
                    Some(record) => records.push(record),
                    None => tracing::warn!("skipping malformed session row"),
                },
                Err(e) => tracing::warn!("skipping unreadable session row: {}", e),
            }
        }

        Ok(records)
    }

    /// Records whose end time falls on the given local calendar day
    pub fn records_for_date(&self, day: NaiveDate) -> Vec<SessionRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.timestamp().date_naive() == day)
            .collect()
    }

    /// Focus records for the given day
    pub fn focus_records_for_date(&self, day: NaiveDate) -> Vec<SessionRecord> {
        self.records_for_date(day)
            .into_iter()
            .filter(|r| r.kind() == SessionKind::Focus)
            .collect()
    }

    /// Break records (short and long) for the given day
    pub fn break_records_for_date(&self, day: NaiveDate) -> Vec<SessionRecord> {
        self.records_for_date(day)
            .into_iter()
            .filter(|r| r.kind().is_break())
            .collect()
    }

    // --- Statistics ---

    /// Total seconds of successfully completed focus sessions in the log
    pub fn total_focus_time(&self) -> f64 {
        completed_seconds(&self.records(), |k| k == SessionKind::Focus)
    }

    /// Total completed focus seconds for the given day
    pub fn total_focus_time_for_date(&self, day: NaiveDate) -> f64 {
        completed_seconds(&self.records_for_date(day), |k| k == SessionKind::Focus)
    }

    /// Total seconds of successfully completed break sessions in the log
    pub fn total_break_time(&self) -> f64 {
        completed_seconds(&self.records(), |k| k.is_break())
    }

    /// Total completed break seconds for the given day
    pub fn total_break_time_for_date(&self, day: NaiveDate) -> f64 {
        completed_seconds(&self.records_for_date(day), |k| k.is_break())
    }

    /// Mean duration of successfully completed focus sessions
    ///
    /// Returns 0.0 when no such sessions exist.
    pub fn average_focus_session_duration(&self) -> f64 {
        let durations: Vec<f64> = self
            .records()
            .iter()
            .filter(|r| r.kind() == SessionKind::Focus && r.completed_successfully())
            .map(|r| r.duration())
            .collect();

        if durations.is_empty() {
            return 0.0;
        }
        durations.iter().sum::<f64>() / durations.len() as f64
    }

    /// Sessions appended on the given day, from the daily-count index
    ///
    /// Unlike the log queries this stays correct after old records are
    /// evicted.
    pub fn daily_count(&self, day: NaiveDate) -> u32 {
        match self.try_daily_count(day) {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("failed to read daily count, treating as 0: {}", e);
                0
            }
        }
    }

    fn try_daily_count(&self, day: NaiveDate) -> Result<u32> {
        let conn = self.open()?;
        let count: Option<u32> = conn
            .query_row(
                "SELECT count FROM daily_counts WHERE day = ?1",
                params![day_key(day)],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| FocustrackError::Storage(format!("Failed to query daily count: {}", e)))?;

        Ok(count.unwrap_or(0))
    }

    /// The whole daily-count index, keyed by `YYYY-MM-DD`
    pub fn all_daily_counts(&self) -> BTreeMap<String, u32> {
        match self.try_all_daily_counts() {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!("failed to read daily counts, treating as empty: {}", e);
                BTreeMap::new()
            }
        }
    }

    fn try_all_daily_counts(&self) -> Result<BTreeMap<String, u32>> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare("SELECT day, count FROM daily_counts")
            .map_err(|e| FocustrackError::Storage(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
            })
            .map_err(|e| FocustrackError::Storage(format!("Failed to query counts: {}", e)))?;

        let mut counts = BTreeMap::new();
        for row in rows {
            match row {
                Ok((day, count)) => {
                    counts.insert(day, count);
                }
                Err(e) => tracing::warn!("skipping unreadable daily count row: {}", e),
            }
        }

        Ok(counts)
    }

    /// Consecutive days with at least one session, counting back from today
    ///
    /// 0 when today has no sessions yet.
    pub fn current_streak(&self) -> u32 {
        self.streak_ending_on(Local::now().date_naive())
    }

    fn streak_ending_on(&self, last_day: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut day = last_day;

        while self.daily_count(day) > 0 {
            streak += 1;
            match day.pred_opt() {
                Some(previous) => day = previous,
                None => break,
            }
        }

        streak
    }

    /// Per-day stats for the 7 calendar days ending today, oldest first
    ///
    /// Always exactly 7 entries; days without sessions report zeros.
    pub fn weekly_stats(&self) -> Vec<DayStat> {
        self.weekly_stats_ending_on(Local::now().date_naive())
    }

    fn weekly_stats_ending_on(&self, last_day: NaiveDate) -> Vec<DayStat> {
        (0..7)
            .rev()
            .map(|back| {
                let date = last_day - Duration::days(back);
                DayStat {
                    date,
                    sessions: self.daily_count(date),
                    focus_time: self.total_focus_time_for_date(date),
                }
            })
            .collect()
    }

    // --- Data management ---

    /// Delete both persisted collections
    ///
    /// Idempotent; like `append`, failures are logged and swallowed.
    pub fn clear_all(&self) {
        if let Err(e) = self.try_clear_all() {
            tracing::warn!("failed to clear session history: {}", e);
        }
    }

    fn try_clear_all(&self) -> Result<()> {
        let mut conn = self.open()?;
        let tx = conn
            .transaction()
            .map_err(|e| FocustrackError::Storage(format!("Failed to start transaction: {}", e)))?;

        tx.execute("DELETE FROM sessions", [])
            .map_err(|e| FocustrackError::Storage(format!("Failed to clear log: {}", e)))?;
        tx.execute("DELETE FROM daily_counts", [])
            .map_err(|e| FocustrackError::Storage(format!("Failed to clear counts: {}", e)))?;

        tx.commit()
            .map_err(|e| FocustrackError::Storage(format!("Failed to commit clear: {}", e)))?;

        Ok(())
    }

    /// Everything the store holds, as a JSON value
    pub fn export_data(&self) -> serde_json::Value {
        serde_json::json!({
            "daily_counts": self.all_daily_counts(),
            "sessions": self.records(),
        })
    }
}

fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

fn completed_seconds(records: &[SessionRecord], matches: impl Fn(SessionKind) -> bool) -> f64 {
    records
        .iter()
        .filter(|r| matches(r.kind()) && r.completed_successfully())
        .map(|r| r.duration())
        .sum()
}

fn decode_row(
    (id, recorded_at, duration, kind, completed): (String, String, f64, String, bool),
) -> Option<SessionRecord> {
    let id = Uuid::parse_str(&id).ok()?;
    let timestamp = DateTime::parse_from_rfc3339(&recorded_at)
        .ok()?
        .with_timezone(&Local);
    let kind = SessionKind::parse(&kind)?;
    Some(SessionRecord::from_parts(
        id,
        timestamp,
        duration,
        kind,
        completed,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Helper: create a store backed by a temp directory.
    ///
    /// Returns the `TempDir` too so the caller keeps ownership of the
    /// directory (preventing it from being removed).
    fn create_test_store() -> (SessionStore, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let db_path = dir.path().join("focustrack.db");
        let store = SessionStore::new_with_path(db_path).expect("failed to create store");
        (store, dir)
    }

    /// Append a record whose timestamp lies `days_back` days in the past.
    fn append_backdated(store: &SessionStore, days_back: i64, kind: SessionKind, completed: bool) {
        let timestamp = Local::now() - Duration::days(days_back);
        let record =
            SessionRecord::from_parts(Uuid::new_v4(), timestamp, 1500.0, kind, completed);
        store.append(&record);
    }

    #[test]
    fn test_append_then_query_today_returns_record() {
        let (store, _dir) = create_test_store();
        let record = SessionRecord::new(1500.0, SessionKind::Focus, true);
        store.append(&record);

        let today = Local::now().date_naive();
        let found = store.records_for_date(today);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), record.id());
        assert_eq!(found[0].duration(), 1500.0);
        assert_eq!(found[0].kind(), SessionKind::Focus);
        assert!(found[0].completed_successfully());
    }

    #[test]
    fn test_store_round_trip_preserves_all_fields() {
        let (store, _dir) = create_test_store();
        let record = SessionRecord::new(123.75, SessionKind::LongBreak, false);
        store.append(&record);

        let restored = &store.records()[0];
        assert_eq!(restored.id(), record.id());
        assert_eq!(restored.timestamp(), record.timestamp());
        assert_eq!(restored.duration(), record.duration());
        assert_eq!(restored.kind(), record.kind());
        assert_eq!(
            restored.completed_successfully(),
            record.completed_successfully()
        );
    }

    #[test]
    fn test_log_keeps_only_most_recent_100() {
        let (store, _dir) = create_test_store();
        for i in 0..150 {
            let record = SessionRecord::new(f64::from(i), SessionKind::Focus, true);
            store.append(&record);
        }

        let records = store.records();
        assert_eq!(records.len(), MAX_RETAINED_RECORDS);
        // The 50 oldest (durations 0..49) are evicted.
        assert_eq!(records[0].duration(), 50.0);
        assert_eq!(records[99].duration(), 149.0);
    }

    #[test]
    fn test_daily_count_survives_log_truncation() {
        let (store, _dir) = create_test_store();
        for _ in 0..150 {
            store.append_focus(60.0, true);
        }

        let today = Local::now().date_naive();
        assert_eq!(store.records().len(), MAX_RETAINED_RECORDS);
        assert_eq!(store.daily_count(today), 150);
    }

    #[test]
    fn test_incomplete_sessions_excluded_from_totals_but_listed() {
        let (store, _dir) = create_test_store();
        store.append_focus(1500.0, true);
        store.append_focus(300.0, false);

        let today = Local::now().date_naive();
        assert_eq!(store.records_for_date(today).len(), 2);
        assert_eq!(store.total_focus_time_for_date(today), 1500.0);
        assert_eq!(store.total_focus_time(), 1500.0);
    }

    #[test]
    fn test_break_totals_split_from_focus() {
        let (store, _dir) = create_test_store();
        store.append_focus(1500.0, true);
        store.append_break(300.0, SessionKind::ShortBreak);
        store.append_break(900.0, SessionKind::LongBreak);

        let today = Local::now().date_naive();
        assert_eq!(store.total_break_time(), 1200.0);
        assert_eq!(store.total_break_time_for_date(today), 1200.0);
        assert_eq!(store.total_focus_time(), 1500.0);
        assert_eq!(store.focus_records_for_date(today).len(), 1);
        assert_eq!(store.break_records_for_date(today).len(), 2);
    }

    #[test]
    fn test_average_focus_duration_empty_store_is_zero() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.average_focus_session_duration(), 0.0);
    }

    #[test]
    fn test_average_focus_duration_ignores_breaks_and_incomplete() {
        let (store, _dir) = create_test_store();
        store.append_focus(1200.0, true);
        store.append_focus(1800.0, true);
        store.append_focus(100.0, false);
        store.append_break(300.0, SessionKind::ShortBreak);

        assert_eq!(store.average_focus_session_duration(), 1500.0);
    }

    #[test]
    fn test_daily_count_absent_day_is_zero() {
        let (store, _dir) = create_test_store();
        let today = Local::now().date_naive();
        assert_eq!(store.daily_count(today), 0);
    }

    #[test]
    fn test_streak_counts_consecutive_days_back_from_today() {
        let (store, _dir) = create_test_store();
        append_backdated(&store, 0, SessionKind::Focus, true);
        append_backdated(&store, 1, SessionKind::Focus, true);
        // Gap two days ago.
        append_backdated(&store, 3, SessionKind::Focus, true);

        assert_eq!(store.current_streak(), 2);
    }

    #[test]
    fn test_streak_is_zero_when_today_has_no_sessions() {
        let (store, _dir) = create_test_store();
        append_backdated(&store, 1, SessionKind::Focus, true);
        append_backdated(&store, 2, SessionKind::Focus, true);

        assert_eq!(store.current_streak(), 0);
    }

    #[test]
    fn test_streak_counts_early_stopped_sessions() {
        // Showing up counts: early-stopped sessions still bump the day
        // index, so they keep a streak alive.
        let (store, _dir) = create_test_store();
        append_backdated(&store, 0, SessionKind::Focus, false);
        append_backdated(&store, 1, SessionKind::ShortBreak, true);

        assert_eq!(store.current_streak(), 2);
    }

    #[test]
    fn test_weekly_stats_always_seven_days_ending_today() {
        let (store, _dir) = create_test_store();
        let stats = store.weekly_stats();

        assert_eq!(stats.len(), 7);
        let today = Local::now().date_naive();
        assert_eq!(stats[6].date, today);
        assert_eq!(stats[0].date, today - Duration::days(6));
        for pair in stats.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        for day in &stats {
            assert_eq!(day.sessions, 0);
            assert_eq!(day.focus_time, 0.0);
        }
    }

    #[test]
    fn test_weekly_stats_buckets_focus_time_per_day() {
        let (store, _dir) = create_test_store();
        append_backdated(&store, 0, SessionKind::Focus, true);
        append_backdated(&store, 2, SessionKind::Focus, true);
        append_backdated(&store, 2, SessionKind::ShortBreak, true);

        let stats = store.weekly_stats();
        assert_eq!(stats[6].sessions, 1);
        assert_eq!(stats[6].focus_time, 1500.0);
        assert_eq!(stats[4].sessions, 2);
        // Break time does not count toward focus totals.
        assert_eq!(stats[4].focus_time, 1500.0);
        assert_eq!(stats[5].sessions, 0);
        assert_eq!(stats[5].focus_time, 0.0);
    }

    #[test]
    fn test_clear_all_resets_to_fresh_state() {
        let (store, _dir) = create_test_store();
        store.append_focus(1500.0, true);
        store.append_break(300.0, SessionKind::ShortBreak);
        store.clear_all();

        let today = Local::now().date_naive();
        assert!(store.records().is_empty());
        assert_eq!(store.daily_count(today), 0);
        assert_eq!(store.current_streak(), 0);
        assert_eq!(store.total_focus_time(), 0.0);

        // Repeated clears are fine, and appending afterwards behaves fresh.
        store.clear_all();
        store.append_focus(600.0, true);
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.daily_count(today), 1);
    }

    #[test]
    fn test_malformed_rows_are_skipped_not_fatal() {
        let (store, _dir) = create_test_store();
        store.append_focus(1500.0, true);

        let conn = Connection::open(&store.db_path).expect("open connection");
        conn.execute(
            "INSERT INTO sessions (id, recorded_at, duration_secs, kind, completed)
             VALUES ('not-a-uuid', 'not-a-date', 60.0, 'nap', 1)",
            [],
        )
        .expect("insert corrupt row");

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].duration(), 1500.0);
    }

    #[test]
    fn test_export_data_contains_both_collections() {
        let (store, _dir) = create_test_store();
        store.append_focus(1500.0, true);
        store.append_break(300.0, SessionKind::ShortBreak);

        let exported = store.export_data();
        let sessions = exported["sessions"].as_array().expect("sessions array");
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0]["type"], "focus");

        let today = day_key(Local::now().date_naive());
        assert_eq!(exported["daily_counts"][&today], 2);
    }

    #[test]
    fn test_append_is_atomic_across_both_collections() {
        let (store, _dir) = create_test_store();
        store.append_focus(1500.0, true);

        let today = Local::now().date_naive();
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.daily_count(today), 1);
    }
}
