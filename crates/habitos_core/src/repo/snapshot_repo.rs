//! Snapshot repository contract, SQLite implementation and JSON codec.
//!
//! # Responsibility
//! - Store and retrieve the full application snapshot in one named slot.
//! - Encode/decode the snapshot JSON and run the versionless backfill
//!   pass over snapshots written by earlier schema versions.
//!
//! # Invariants
//! - `save_slot` overwrites the slot unconditionally; no partial writes.
//! - Backfill only adds missing fields; present data is never altered.
//! - A malformed payload is a fatal decode error, not a reinitialization.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::db::DbError;
use crate::model::month::MonthRecord;
use crate::model::profile::{UserProfile, DEFAULT_USER_NAME};
use crate::model::state::{AppState, MONTHS_PER_YEAR};

/// Name of the slot holding the tracker snapshot.
pub const SNAPSHOT_SLOT: &str = "habitos_pro_data";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence and codec operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted payload is malformed. Fatal: there is no recovery path.
    Decode(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "malformed snapshot payload: {err}"),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Raw slot access for the snapshot blob.
pub trait SnapshotRepository {
    fn load_slot(&self) -> RepoResult<Option<String>>;
    fn save_slot(&self, payload: &str) -> RepoResult<()>;
    fn clear_slot(&self) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
#[derive(Debug)]
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
    slot: String,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_slot(conn, SNAPSHOT_SLOT)
    }

    pub fn with_slot(conn: &'conn Connection, slot: impl Into<String>) -> Self {
        Self {
            conn,
            slot: slot.into(),
        }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_slot(&self) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE slot = ?1;",
                [self.slot.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save_slot(&self, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO snapshots (slot, payload)
             VALUES (?1, ?2)
             ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.slot.as_str(), payload],
        )?;
        Ok(())
    }

    fn clear_slot(&self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM snapshots WHERE slot = ?1;",
            [self.slot.as_str()],
        )?;
        Ok(())
    }
}

/// On-disk snapshot document.
///
/// Field names match the historical payload shape, with month records
/// keyed by their stringified calendar index under `data`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDoc {
    current_month: usize,
    year: i32,
    user: UserProfile,
    data: BTreeMap<String, MonthRecord>,
}

/// Encodes the full application state into the snapshot payload.
pub fn encode_snapshot(state: &AppState) -> RepoResult<String> {
    let data = state
        .months
        .iter()
        .enumerate()
        .map(|(index, month)| (index.to_string(), month.clone()))
        .collect();
    let doc = SnapshotDoc {
        current_month: state.current_month,
        year: state.year,
        user: state.user.clone(),
        data,
    };
    Ok(serde_json::to_string(&doc)?)
}

/// Decodes a snapshot payload into application state.
///
/// Runs the versionless backfill pass over the loosely-typed JSON value
/// before the typed decode, so snapshots written by earlier schema
/// versions (missing months, missing `todos`, blank user name) still
/// load. Malformed payloads are fatal.
pub fn decode_snapshot(payload: &str) -> RepoResult<AppState> {
    let mut root: Value = serde_json::from_str(payload)?;
    backfill_snapshot(&mut root);
    let doc: SnapshotDoc = serde_json::from_value(root)?;

    let mut months = Vec::with_capacity(MONTHS_PER_YEAR);
    for index in 0..MONTHS_PER_YEAR {
        let month = doc.data.get(&index.to_string()).cloned().ok_or_else(|| {
            // Backfill synthesizes every slot; reaching this means the
            // payload root was not an object shaped like a snapshot.
            RepoError::InvalidData(format!("month slot {index} missing after backfill"))
        })?;
        months.push(month);
    }

    Ok(AppState {
        current_month: doc.current_month.min(MONTHS_PER_YEAR - 1),
        year: doc.year,
        user: doc.user,
        months,
    })
}

/// Versionless migration pass over a decoded snapshot value.
///
/// - Absent month slots are synthesized empty.
/// - A month missing its `todos` array gets an empty one.
/// - An empty or absent user name becomes the fallback name.
fn backfill_snapshot(root: &mut Value) {
    let Some(root) = root.as_object_mut() else {
        return;
    };

    if let Some(user) = root.get_mut("user").and_then(Value::as_object_mut) {
        let name_missing = match user.get("name") {
            Some(Value::String(name)) => name.is_empty(),
            _ => true,
        };
        if name_missing {
            user.insert("name".to_string(), json!(DEFAULT_USER_NAME));
        }
    }

    let data = root
        .entry("data")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(data) = data.as_object_mut() else {
        return;
    };

    for index in 0..MONTHS_PER_YEAR {
        let slot = data
            .entry(index.to_string())
            .or_insert_with(empty_month_value);
        if let Some(month) = slot.as_object_mut() {
            month
                .entry("todos")
                .or_insert_with(|| Value::Array(Vec::new()));
        }
    }
}

fn empty_month_value() -> Value {
    json!({ "habits": [], "sleep": {}, "todos": [], "note": "" })
}

#[cfg(test)]
mod tests {
    use super::{backfill_snapshot, decode_snapshot, encode_snapshot};
    use crate::model::state::AppState;
    use serde_json::json;

    #[test]
    fn encode_decode_preserves_state() {
        let mut state = AppState::default_with_current_month(3);
        state.months[3].toggle_check(0, 5).unwrap();
        state.months[3].set_sleep(5, 8);
        state.months[3].set_note("rest week");

        let payload = encode_snapshot(&state).unwrap();
        let decoded = decode_snapshot(&payload).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn backfill_synthesizes_missing_month_slots() {
        let mut root = json!({
            "currentMonth": 0,
            "year": 2026,
            "user": { "name": "Ada", "xp": 0, "level": 1, "theme": "#6366f1" },
            "data": {}
        });
        backfill_snapshot(&mut root);
        for index in 0..12 {
            let month = &root["data"][index.to_string()];
            assert_eq!(month["habits"], json!([]));
            assert_eq!(month["todos"], json!([]));
        }
    }

    #[test]
    fn backfill_replaces_blank_user_name_only() {
        let mut root = json!({
            "user": { "name": "", "xp": 40, "level": 2, "theme": "#10b981" }
        });
        backfill_snapshot(&mut root);
        assert_eq!(root["user"]["name"], json!("Samar"));
        assert_eq!(root["user"]["xp"], json!(40));
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let err = decode_snapshot("{not json").unwrap_err();
        assert!(matches!(err, super::RepoError::Decode(_)));
    }
}
