use std::fmt;
use std::ops;

use chrono::Datelike as _;
use chrono::Offset;
use chrono::TimeZone;

/// Absolute timestamp, always held at UTC.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct DateTime(chrono::DateTime<chrono::FixedOffset>);

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

impl DateTime {
    pub fn now() -> Self {
        chrono::Utc::now().into()
    }

    /// Parse any of the accepted textual forms.
    ///
    /// Forms without an offset are read as UTC.
    pub fn parse<S: AsRef<str>>(d: S) -> Option<Self> {
        Self::parse_str(d.as_ref().trim()).and_then(Self::in_range)
    }

    fn parse_str(d: &str) -> Option<DateTime> {
        if let Ok(d) = chrono::DateTime::parse_from_rfc3339(d) {
            return Some(d.into());
        }
        if let Ok(d) = chrono::DateTime::parse_from_str(d, "%Y-%m-%d %H:%M:%S %z") {
            return Some(d.into());
        }
        for format in NAIVE_FORMATS {
            if let Ok(d) = chrono::NaiveDateTime::parse_from_str(d, format) {
                return Some(chrono::Utc.from_utc_datetime(&d).into());
            }
        }
        let d = chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()?;
        let d = d.and_hms_opt(0, 0, 0)?;
        Some(chrono::Utc.from_utc_datetime(&d).into())
    }

    pub fn from_timestamp(secs: i64) -> Option<Self> {
        chrono::DateTime::from_timestamp(secs, 0)
            .map(Self::from)
            .and_then(Self::in_range)
    }

    /// Only four-digit years can be written out as RFC 2822 and RFC 3339.
    fn in_range(self) -> Option<Self> {
        (0..=9999).contains(&self.0.year()).then_some(self)
    }

    /// Coerce a front matter `date` value.
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::String(s) => Self::parse(s),
            serde_yaml::Value::Number(n) => n.as_i64().and_then(Self::from_timestamp),
            _ => None,
        }
    }

    pub fn format(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S %z").to_string()
    }

    /// Calendar date only, `YYYY-MM-DD`.
    pub fn format_ymd(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl Default for DateTime {
    fn default() -> Self {
        chrono::DateTime::<chrono::Utc>::UNIX_EPOCH.into()
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl ops::Deref for DateTime {
    type Target = chrono::DateTime<chrono::FixedOffset>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<chrono::DateTime<chrono::FixedOffset>> for DateTime {
    fn from(v: chrono::DateTime<chrono::FixedOffset>) -> Self {
        DateTime(v.with_timezone(&chrono::Utc.fix()))
    }
}

impl From<chrono::DateTime<chrono::Utc>> for DateTime {
    fn from(v: chrono::DateTime<chrono::Utc>) -> Self {
        DateTime(v.with_timezone(&chrono::Utc.fix()))
    }
}

impl From<DateTime> for chrono::DateTime<chrono::FixedOffset> {
    fn from(v: DateTime) -> Self {
        v.0
    }
}
