//! Session record model
//!
//! A session record is an immutable value describing one timed interval
//! (focus work, short break, long break) that has ended, either by running
//! to completion or by being stopped early.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a timed session
///
/// Closed tag set; the wire form is `"focus"`, `"short_break"` or
/// `"long_break"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    /// Stable string form, identical to the serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Focus => "focus",
            SessionKind::ShortBreak => "short_break",
            SessionKind::LongBreak => "long_break",
        }
    }

    /// Parse the stable string form back into a kind
    ///
    /// Returns `None` for unknown tags so corrupt stored rows can be
    /// skipped instead of failing the read path.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "focus" => Some(SessionKind::Focus),
            "short_break" => Some(SessionKind::ShortBreak),
            "long_break" => Some(SessionKind::LongBreak),
            _ => None,
        }
    }

    /// Human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionKind::Focus => "Focus Session",
            SessionKind::ShortBreak => "Short Break",
            SessionKind::LongBreak => "Long Break",
        }
    }

    /// Whether this kind is one of the two break kinds
    pub fn is_break(&self) -> bool {
        matches!(self, SessionKind::ShortBreak | SessionKind::LongBreak)
    }
}

/// One completed or early-stopped timer interval
///
/// Records are immutable: the id and timestamp are assigned at construction
/// and no mutating API exists. The timestamp is the session end time in the
/// local timezone.
///
/// # Examples
///
/// ```
/// use focustrack::session::{SessionKind, SessionRecord};
///
/// let record = SessionRecord::new(1500.0, SessionKind::Focus, true);
/// assert_eq!(record.duration(), 1500.0);
/// assert_eq!(record.formatted_duration(), "25:00");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique record identifier, generated at construction
    id: Uuid,

    /// Session end time (local timezone)
    #[serde(rename = "date")]
    timestamp: DateTime<Local>,

    /// Elapsed seconds the session ran
    duration: f64,

    /// Session kind tag
    #[serde(rename = "type")]
    kind: SessionKind,

    /// True when the session ran to its planned end
    #[serde(rename = "completedSuccessfully")]
    completed_successfully: bool,
}

impl SessionRecord {
    /// Create a record for a session that just ended
    ///
    /// The id and timestamp are assigned here, never supplied by the
    /// caller. Negative durations are clamped to zero.
    pub fn new(duration: f64, kind: SessionKind, completed_successfully: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Local::now(),
            duration: duration.max(0.0),
            kind,
            completed_successfully,
        }
    }

    /// Create a record for a session that ran to its planned end
    pub fn completed(duration: f64, kind: SessionKind) -> Self {
        Self::new(duration, kind, true)
    }

    /// Rebuild a record from stored parts
    ///
    /// Only the store's decode path uses this; the public constructor is
    /// the sole way to mint new records.
    pub(crate) fn from_parts(
        id: Uuid,
        timestamp: DateTime<Local>,
        duration: f64,
        kind: SessionKind,
        completed_successfully: bool,
    ) -> Self {
        Self {
            id,
            timestamp,
            duration,
            kind,
            completed_successfully,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn completed_successfully(&self) -> bool {
        self.completed_successfully
    }

    /// Duration rendered as `MM:SS`
    pub fn formatted_duration(&self) -> String {
        let minutes = self.duration as i64 / 60;
        let seconds = self.duration as i64 % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// End date rendered as e.g. `Aug 07, 2025`
    pub fn date_string(&self) -> String {
        self.timestamp.format("%b %d, %Y").to_string()
    }

    /// End time rendered as `HH:MM`
    pub fn time_string(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
