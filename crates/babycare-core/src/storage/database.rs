//! SQLite-based care log storage.
//!
//! Provides persistent storage for:
//! - Baby profiles
//! - Logged care activities
//! - Reminders
//! - Cry analyses
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text so that string
//! order is time order.

use std::path::Path;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{data_dir, CareStore};
use crate::care::{ActivityCategory, ActivityDetails, BabyProfile, CareActivity, Reminder, ReminderDraft, ReminderType};
use crate::cry::{CryAnalysis, CryAssessment, CryNeed};
use crate::error::{CoreError, Result, StorageError, ValidationError};

fn format_ts(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_ts(column: &'static str, raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt {
            column,
            message: format!("'{raw}': {e}"),
        })
}

fn parse_opt_ts(column: &'static str, raw: Option<String>) -> Result<Option<DateTime<Utc>>, StorageError> {
    raw.map(|s| parse_ts(column, &s)).transpose()
}

fn parse_enum<T>(column: &'static str, raw: &str) -> Result<T, StorageError>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    raw.parse().map_err(|e: ValidationError| StorageError::Corrupt {
        column,
        message: e.to_string(),
    })
}

struct BabyRow {
    id: String,
    name: String,
    birth_date: String,
    gender: Option<String>,
    created_at: String,
}

impl BabyRow {
    fn from_row(row: &rusqlite::Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            birth_date: row.get(2)?,
            gender: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn decode(self) -> Result<BabyProfile, StorageError> {
        let birth_date = NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d").map_err(|e| {
            StorageError::Corrupt {
                column: "birth_date",
                message: e.to_string(),
            }
        })?;
        Ok(BabyProfile {
            id: self.id,
            name: self.name,
            birth_date,
            gender: self.gender,
            created_at: parse_ts("created_at", &self.created_at)?,
        })
    }
}

struct ActivityRow {
    id: String,
    baby_id: String,
    activity_type: String,
    start_time: String,
    end_time: Option<String>,
    notes: Option<String>,
    details: Option<String>,
}

impl ActivityRow {
    fn from_row(row: &rusqlite::Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            baby_id: row.get(1)?,
            activity_type: row.get(2)?,
            start_time: row.get(3)?,
            end_time: row.get(4)?,
            notes: row.get(5)?,
            details: row.get(6)?,
        })
    }

    fn decode(self) -> Result<CareActivity, StorageError> {
        let details = self
            .details
            .map(|json| serde_json::from_str::<ActivityDetails>(&json))
            .transpose()
            .map_err(|e| StorageError::Corrupt {
                column: "details",
                message: e.to_string(),
            })?;
        Ok(CareActivity {
            id: self.id,
            baby_id: self.baby_id,
            category: parse_enum::<ActivityCategory>("activity_type", &self.activity_type)?,
            start_time: parse_ts("start_time", &self.start_time)?,
            end_time: parse_opt_ts("end_time", self.end_time)?,
            notes: self.notes,
            details,
        })
    }
}

struct ReminderRow {
    id: String,
    baby_id: String,
    title: String,
    message: String,
    reminder_type: String,
    scheduled_for: Option<String>,
    is_completed: bool,
    created_at: String,
}

impl ReminderRow {
    fn from_row(row: &rusqlite::Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            baby_id: row.get(1)?,
            title: row.get(2)?,
            message: row.get(3)?,
            reminder_type: row.get(4)?,
            scheduled_for: row.get(5)?,
            is_completed: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn decode(self) -> Result<Reminder, StorageError> {
        Ok(Reminder {
            id: self.id,
            baby_id: self.baby_id,
            title: self.title,
            message: self.message,
            reminder_type: parse_enum::<ReminderType>("reminder_type", &self.reminder_type)?,
            scheduled_for: parse_opt_ts("scheduled_for", self.scheduled_for)?,
            is_completed: self.is_completed,
            created_at: parse_ts("created_at", &self.created_at)?,
        })
    }
}

const BABY_COLUMNS: &str = "id, name, birth_date, gender, created_at";
const ACTIVITY_COLUMNS: &str = "id, baby_id, activity_type, start_time, end_time, notes, details";
const REMINDER_COLUMNS: &str =
    "id, baby_id, title, message, reminder_type, scheduled_for, is_completed, created_at";

/// SQLite database for the care log.
pub struct CareDb {
    conn: Connection,
}

impl CareDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/babycare/babycare.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("babycare.db"))
    }

    /// # Errors
    /// See [`CareDb::open`].
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        debug!(path = %path.display(), "care database opened");
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS babies (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                birth_date  TEXT NOT NULL,
                gender      TEXT,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS care_activities (
                id            TEXT PRIMARY KEY,
                baby_id       TEXT NOT NULL REFERENCES babies(id) ON DELETE CASCADE,
                activity_type TEXT NOT NULL,
                start_time    TEXT NOT NULL,
                end_time      TEXT,
                notes         TEXT,
                details       TEXT
            );

            CREATE TABLE IF NOT EXISTS reminders (
                id             TEXT PRIMARY KEY,
                baby_id        TEXT NOT NULL REFERENCES babies(id) ON DELETE CASCADE,
                title          TEXT NOT NULL,
                message        TEXT NOT NULL DEFAULT '',
                reminder_type  TEXT NOT NULL,
                scheduled_for  TEXT,
                is_completed   INTEGER NOT NULL DEFAULT 0,
                created_at     TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS cry_analyses (
                id               TEXT PRIMARY KEY,
                baby_id          TEXT NOT NULL REFERENCES babies(id) ON DELETE CASCADE,
                need             TEXT NOT NULL,
                confidence       REAL NOT NULL,
                description      TEXT NOT NULL,
                recommendations  TEXT NOT NULL,
                created_at       TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_activities_baby_start ON care_activities(baby_id, start_time);
            CREATE INDEX IF NOT EXISTS idx_reminders_baby ON reminders(baby_id, scheduled_for);
            CREATE INDEX IF NOT EXISTS idx_cry_baby_created ON cry_analyses(baby_id, created_at);",
        )?;
        Ok(())
    }

    // === Babies ===

    /// # Errors
    /// Returns an error if the insert fails, including a duplicate id.
    pub fn add_baby(&self, baby: &BabyProfile) -> Result<()> {
        self.conn.execute(
            "INSERT INTO babies (id, name, birth_date, gender, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                baby.id,
                baby.name,
                baby.birth_date.format("%Y-%m-%d").to_string(),
                baby.gender,
                format_ts(baby.created_at),
            ],
        )?;
        Ok(())
    }

    /// Overwrite name, birth date and gender of an existing baby.
    ///
    /// # Errors
    /// `NotFound` if the id is unknown.
    pub fn update_baby(&self, baby: &BabyProfile) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE babies SET name = ?2, birth_date = ?3, gender = ?4 WHERE id = ?1",
            params![
                baby.id,
                baby.name,
                baby.birth_date.format("%Y-%m-%d").to_string(),
                baby.gender,
            ],
        )?;
        if changed == 0 {
            return Err(not_found("baby", &baby.id));
        }
        Ok(())
    }

    /// Delete a baby together with its activities, reminders and analyses.
    ///
    /// # Errors
    /// `NotFound` if the id is unknown.
    pub fn delete_baby(&self, baby_id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM babies WHERE id = ?1", params![baby_id])?;
        if changed == 0 {
            return Err(not_found("baby", baby_id));
        }
        Ok(())
    }

    pub fn get_baby(&self, baby_id: &str) -> Result<Option<BabyProfile>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {BABY_COLUMNS} FROM babies WHERE id = ?1"),
                params![baby_id],
                BabyRow::from_row,
            )
            .optional()?;
        Ok(row.map(BabyRow::decode).transpose()?)
    }

    /// Oldest profile first.
    pub fn list_babies(&self) -> Result<Vec<BabyProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BABY_COLUMNS} FROM babies ORDER BY created_at, name"))?;
        let rows = stmt.query_map([], BabyRow::from_row)?;
        let mut babies = Vec::new();
        for row in rows {
            babies.push(row?.decode()?);
        }
        Ok(babies)
    }

    /// Resolve a baby by exact id, falling back to a case-insensitive name.
    ///
    /// # Errors
    /// `NotFound` when nothing matches; a validation error when the name is
    /// shared by several babies.
    pub fn find_baby(&self, id_or_name: &str) -> Result<BabyProfile> {
        if let Some(baby) = self.get_baby(id_or_name)? {
            return Ok(baby);
        }
        let mut matches: Vec<BabyProfile> = self
            .list_babies()?
            .into_iter()
            .filter(|b| b.name.eq_ignore_ascii_case(id_or_name.trim()))
            .collect();
        match matches.len() {
            0 => Err(not_found("baby", id_or_name)),
            1 => Ok(matches.remove(0)),
            n => Err(ValidationError::invalid(
                "baby",
                format!("{n} babies are named '{id_or_name}', use the id instead"),
            )
            .into()),
        }
    }

    // === Activities ===

    /// # Errors
    /// Rejects an invalid activity or an unknown baby.
    pub fn log_activity(&self, activity: &CareActivity) -> Result<()> {
        activity.validate()?;
        let details = activity.details.as_ref().map(serde_json::to_string).transpose()?;
        self.conn.execute(
            "INSERT INTO care_activities (id, baby_id, activity_type, start_time, end_time, notes, details)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                activity.id,
                activity.baby_id,
                activity.category.as_str(),
                format_ts(activity.start_time),
                activity.end_time.map(format_ts),
                activity.notes,
                details,
            ],
        )?;
        debug!(baby_id = %activity.baby_id, category = %activity.category, "activity logged");
        Ok(())
    }

    /// Newest first, at most `limit`.
    pub fn recent_activities(&self, baby_id: &str, limit: usize) -> Result<Vec<CareActivity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM care_activities
             WHERE baby_id = ?1
             ORDER BY start_time DESC
             LIMIT ?2"
        ))?;
        let rows = stmt.query_map(params![baby_id, limit as i64], ActivityRow::from_row)?;
        let mut activities = Vec::new();
        for row in rows {
            activities.push(row?.decode()?);
        }
        Ok(activities)
    }

    /// Activities that started at or after `since`, newest first.
    pub fn activities_since(&self, baby_id: &str, since: DateTime<Utc>) -> Result<Vec<CareActivity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM care_activities
             WHERE baby_id = ?1 AND start_time >= ?2
             ORDER BY start_time DESC"
        ))?;
        let rows = stmt.query_map(params![baby_id, format_ts(since)], ActivityRow::from_row)?;
        let mut activities = Vec::new();
        for row in rows {
            activities.push(row?.decode()?);
        }
        Ok(activities)
    }

    // === Reminders ===

    /// # Errors
    /// Returns an error if the insert fails.
    pub fn add_reminder(&self, reminder: &Reminder) -> Result<()> {
        self.conn.execute(
            "INSERT INTO reminders (id, baby_id, title, message, reminder_type, scheduled_for, is_completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                reminder.id,
                reminder.baby_id,
                reminder.title,
                reminder.message,
                reminder.reminder_type.as_str(),
                reminder.scheduled_for.map(format_ts),
                reminder.is_completed,
                format_ts(reminder.created_at),
            ],
        )?;
        Ok(())
    }

    /// # Errors
    /// `NotFound` if the id is unknown.
    pub fn set_reminder_completed(&self, reminder_id: &str, completed: bool) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE reminders SET is_completed = ?2 WHERE id = ?1",
            params![reminder_id, completed],
        )?;
        if changed == 0 {
            return Err(not_found("reminder", reminder_id));
        }
        Ok(())
    }

    /// # Errors
    /// `NotFound` if the id is unknown.
    pub fn delete_reminder(&self, reminder_id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?1", params![reminder_id])?;
        if changed == 0 {
            return Err(not_found("reminder", reminder_id));
        }
        Ok(())
    }

    /// Soonest first; unscheduled reminders last, oldest created first.
    pub fn list_reminders(&self, baby_id: &str) -> Result<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders
             WHERE baby_id = ?1
             ORDER BY scheduled_for IS NULL, scheduled_for, created_at"
        ))?;
        let rows = stmt.query_map(params![baby_id], ReminderRow::from_row)?;
        let mut reminders = Vec::new();
        for row in rows {
            reminders.push(row?.decode()?);
        }
        Ok(reminders)
    }

    // === Cry analyses ===

    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_cry_analysis(&self, analysis: &CryAnalysis) -> Result<()> {
        let recommendations = serde_json::to_string(&analysis.assessment.recommendations)?;
        self.conn.execute(
            "INSERT INTO cry_analyses (id, baby_id, need, confidence, description, recommendations, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                analysis.id,
                analysis.baby_id,
                analysis.assessment.need.as_str(),
                analysis.assessment.confidence,
                analysis.assessment.description,
                recommendations,
                format_ts(analysis.created_at),
            ],
        )?;
        Ok(())
    }

    /// Newest first, at most `limit`.
    pub fn recent_cry_analyses(&self, baby_id: &str, limit: usize) -> Result<Vec<CryAnalysis>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, baby_id, need, confidence, description, recommendations, created_at
             FROM cry_analyses
             WHERE baby_id = ?1
             ORDER BY created_at DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![baby_id, limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut analyses = Vec::new();
        for row in rows {
            let (id, baby_id, need, confidence, description, recommendations, created_at) = row?;
            let recommendations: Vec<String> =
                serde_json::from_str(&recommendations).map_err(|e| StorageError::Corrupt {
                    column: "recommendations",
                    message: e.to_string(),
                })?;
            analyses.push(CryAnalysis {
                id,
                baby_id,
                assessment: CryAssessment {
                    need: parse_enum::<CryNeed>("need", &need)?,
                    confidence,
                    description,
                    recommendations,
                },
                created_at: parse_ts("created_at", &created_at)?,
            });
        }
        Ok(analyses)
    }
}

fn not_found(entity: &'static str, id: &str) -> CoreError {
    CoreError::NotFound {
        entity,
        id: id.to_string(),
    }
}

impl CareStore for CareDb {
    fn babies(&self) -> Result<Vec<BabyProfile>> {
        self.list_babies()
    }

    fn baby(&self, baby_id: &str) -> Result<BabyProfile> {
        self.get_baby(baby_id)?
            .ok_or_else(|| not_found("baby", baby_id))
    }

    fn recent_activities(&self, baby_id: &str, limit: usize) -> Result<Vec<CareActivity>> {
        CareDb::recent_activities(self, baby_id, limit)
    }

    fn reminders(&self, baby_id: &str) -> Result<Vec<Reminder>> {
        self.list_reminders(baby_id)
    }

    fn create_reminder(&self, draft: ReminderDraft, now: DateTime<Utc>) -> Result<Reminder> {
        let reminder = draft.into_reminder(now);
        self.add_reminder(&reminder)?;
        debug!(reminder_id = %reminder.id, reminder_type = %reminder.reminder_type, "reminder created");
        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 30, 0).unwrap()
    }

    fn seeded() -> (CareDb, BabyProfile) {
        let db = CareDb::open_memory().unwrap();
        let baby = BabyProfile::new(
            "Ada",
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            Some("female".into()),
            now(),
        )
        .unwrap();
        db.add_baby(&baby).unwrap();
        (db, baby)
    }

    #[test]
    fn baby_round_trip() {
        let (db, baby) = seeded();
        assert_eq!(db.get_baby(&baby.id).unwrap(), Some(baby.clone()));
        assert_eq!(db.list_babies().unwrap(), vec![baby]);
        assert!(db.get_baby("missing").unwrap().is_none());
    }

    #[test]
    fn activity_details_survive_storage() {
        let (db, baby) = seeded();
        let activity = CareActivity::new(
            &baby.id,
            ActivityCategory::Feeding,
            now() - Duration::minutes(20),
            Some(now()),
            Some("left side".into()),
            Some(ActivityDetails::Feeding {
                method: Some(crate::care::FeedingMethod::Breast),
                amount: None,
            }),
        )
        .unwrap();
        db.log_activity(&activity).unwrap();
        assert_eq!(db.recent_activities(&baby.id, 10).unwrap(), vec![activity]);
    }

    #[test]
    fn activity_for_unknown_baby_is_rejected() {
        let db = CareDb::open_memory().unwrap();
        let activity =
            CareActivity::new("ghost", ActivityCategory::Play, now(), None, None, None).unwrap();
        assert!(matches!(db.log_activity(&activity), Err(CoreError::Storage(_))));
    }

    #[test]
    fn reminders_sorted_with_unscheduled_last() {
        let (db, baby) = seeded();
        let later = ReminderDraft::new(&baby.id, ReminderType::Feeding, "later", "", Some(now() + Duration::hours(3)))
            .unwrap();
        let sooner = ReminderDraft::new(&baby.id, ReminderType::Sleep, "sooner", "", Some(now() + Duration::hours(1)))
            .unwrap();
        let whenever = ReminderDraft::new(&baby.id, ReminderType::Tip, "whenever", "", None).unwrap();
        for draft in [whenever, later, sooner] {
            db.create_reminder(draft, now()).unwrap();
        }
        let titles: Vec<String> = db
            .list_reminders(&baby.id)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, ["sooner", "later", "whenever"]);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let (db, _) = seeded();
        assert!(matches!(
            db.set_reminder_completed("nope", true),
            Err(CoreError::NotFound { entity: "reminder", .. })
        ));
        assert!(matches!(db.delete_baby("nope"), Err(CoreError::NotFound { entity: "baby", .. })));
    }

    #[test]
    fn corrupt_timestamp_is_reported() {
        let (db, baby) = seeded();
        db.conn()
            .execute("UPDATE babies SET created_at = 'yesterday' WHERE id = ?1", params![baby.id])
            .unwrap();
        assert!(matches!(
            db.get_baby(&baby.id),
            Err(CoreError::Storage(StorageError::Corrupt { column: "created_at", .. }))
        ));
    }
}
