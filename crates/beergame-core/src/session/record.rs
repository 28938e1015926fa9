use crate::error::{BeerGameError, Result};
use crate::game::Mode;
use crate::session::Session;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const RECORD_EXTENSION: &str = "csv";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const NAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One row of a persisted record. `role` holds the speaker for turn rows and
/// the metadata label for the trailing rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordRow {
    pub role: String,
    pub content: String,
}

impl RecordRow {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Metadata rows, in the order they follow the turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Mode,
    Role,
    StartTime,
    EndTime,
    Duration,
}

impl MetadataField {
    pub const ORDER: [MetadataField; 5] = [
        MetadataField::Mode,
        MetadataField::Role,
        MetadataField::StartTime,
        MetadataField::EndTime,
        MetadataField::Duration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mode => "Mode",
            Self::Role => "Player Role",
            Self::StartTime => "Start Time",
            Self::EndTime => "End Time",
            Self::Duration => "Duration",
        }
    }
}

/// A session flattened into rows: every turn, then the five metadata rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRecord {
    rows: Vec<RecordRow>,
    turn_count: usize,
}

impl PersistedRecord {
    pub fn from_session(session: &Session, ended_at: NaiveDateTime) -> Self {
        let started_at = session.started_at();
        let mut rows: Vec<RecordRow> = session
            .turns()
            .iter()
            .map(|t| RecordRow::new(t.speaker.as_str(), t.text.clone()))
            .collect();
        let turn_count = rows.len();

        for field in MetadataField::ORDER {
            let content = match field {
                MetadataField::Mode => session.mode().key().to_string(),
                MetadataField::Role => session.role().name().to_string(),
                MetadataField::StartTime => format_timestamp(started_at),
                MetadataField::EndTime => format_timestamp(ended_at),
                MetadataField::Duration => format_duration(ended_at - started_at),
            };
            rows.push(RecordRow::new(field.label(), content));
        }

        Self { rows, turn_count }
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn turn_rows(&self) -> &[RecordRow] {
        &self.rows[..self.turn_count]
    }

    pub fn metadata_rows(&self) -> &[RecordRow] {
        &self.rows[self.turn_count..]
    }

    /// UTF-8 CSV with a `role,content` header.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| BeerGameError::Io(e.into_error()))
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let bytes = self.to_csv()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn read_csv(path: &Path) -> Result<Vec<RecordRow>> {
        let mut reader = csv::Reader::from_path(path)?;
        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<RecordRow>, csv::Error>>()?;
        Ok(rows)
    }
}

/// `beergame_<mode>_P<id>_<YYYYMMDD_HHMMSS>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordName {
    stem: String,
}

impl RecordName {
    pub fn new(mode: Mode, external_id: &str, at: NaiveDateTime) -> Self {
        Self {
            stem: format!(
                "beergame_{}_{}_{}",
                mode.suffix(),
                participant_segment(external_id),
                at.format(NAME_TIMESTAMP_FORMAT)
            ),
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.stem, RECORD_EXTENSION)
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem)
    }
}

/// Trimmed id, or `None` when nothing usable was entered.
pub fn normalize_identifier(external_id: Option<&str>) -> Option<&str> {
    external_id.map(str::trim).filter(|id| !id.is_empty())
}

/// File-name segment for a participant id.
///
/// An id of the form `P<digits>` (e.g. `P7`) is kept as is; every other id
/// gets a `P` prefix, so `7` and `P7` both become `P7` while `Paris` becomes
/// `PParis`. Path separators are replaced with `_`.
pub fn participant_segment(external_id: &str) -> String {
    let id: String = external_id
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    if is_prefixed_number(&id) {
        id
    } else {
        format!("P{id}")
    }
}

fn is_prefixed_number(id: &str) -> bool {
    id.strip_prefix('P')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// `<days> days HH:MM:SS.ffffff`. Negative spans (clock moved back) print as zero.
pub fn format_duration(duration: Duration) -> String {
    let duration = duration.max(Duration::zero());
    let days = duration.num_days();
    let secs = duration.num_seconds() - days * 86_400;
    let micros = (duration - Duration::seconds(duration.num_seconds()))
        .num_microseconds()
        .unwrap_or(0);
    format!(
        "{} days {:02}:{:02}:{:02}.{:06}",
        days,
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60,
        micros
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_participant_segment() {
        assert_eq!(participant_segment("7"), "P7");
        assert_eq!(participant_segment("P7"), "P7");
        assert_eq!(participant_segment(" team-3 "), "Pteam-3");
        assert_eq!(participant_segment("a/b"), "Pa_b");
        assert_eq!(participant_segment("Paris"), "PParis");
        assert_eq!(participant_segment("Pteam"), "PPteam");
        assert_eq!(participant_segment("P"), "PP");
        assert_eq!(participant_segment(" P12 "), "P12");
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier(None), None);
        assert_eq!(normalize_identifier(Some("")), None);
        assert_eq!(normalize_identifier(Some("  ")), None);
        assert_eq!(normalize_identifier(Some(" 42 ")), Some("42"));
    }

    #[test]
    fn test_record_name() {
        let name = RecordName::new(Mode::Qualitative, "12", at(9, 5, 7));
        assert_eq!(name.stem(), "beergame_qualitative_P12_20250314_090507");
        assert_eq!(name.file_name(), "beergame_qualitative_P12_20250314_090507.csv");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(
            format_duration(at(10, 30, 15) - at(9, 0, 0)),
            "0 days 01:30:15.000000"
        );
        assert_eq!(
            format_duration(Duration::days(2) + Duration::milliseconds(1500)),
            "2 days 00:00:01.500000"
        );
        assert_eq!(format_duration(Duration::seconds(-5)), "0 days 00:00:00.000000");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(at(9, 5, 7)), "2025-03-14 09:05:07.000000");
    }
}
