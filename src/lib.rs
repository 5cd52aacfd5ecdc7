mod consts;
mod detect;
mod pattern;
mod prelude;
mod types;

pub use consts::*;
pub use detect::parse_known_format;
pub use pattern::{PatternError, format_with_pattern, parse_with_pattern};
pub use types::{Day, Hour, Minute, Month, Second, Year};

use crate::prelude::*;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// A point in civil (proleptic Gregorian) calendar time, with millisecond
/// precision and an optional UTC offset.
///
/// A value without an offset is *floating*: its fields name a wall-clock
/// reading that only becomes a concrete instant once an offset is supplied
/// through [`CivilDateTime::resolve_with`]. Values parsed from strings that
/// carry a `Z`/`±hh:mm`/`±hhhh` marker keep that offset, and it takes
/// precedence over anything injected later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CivilDateTime {
    year: Year,
    month: Month,
    day: Day,
    hour: Hour,
    minute: Minute,
    second: Second,
    millisecond: u16,
    offset: Option<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "No known date layout matches: {_0}")]
    UnknownLayout(String),
    #[display(fmt = "Year {} is outside 1-{}", "_0", MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Month {} is outside 1-{}", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Day {day} does not exist in {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Hour {} is outside 0-{}", "_0", MAX_HOUR)]
    InvalidHour(u8),
    #[display(fmt = "Minute {} is outside 0-{}", "_0", MAX_MINUTE)]
    InvalidMinute(u8),
    #[display(fmt = "Second {} is outside 0-{}", "_0", MAX_SECOND)]
    InvalidSecond(u8),
    #[display(fmt = "Millisecond {} is outside 0-{}", "_0", MAX_MILLISECOND)]
    InvalidMillisecond(u16),
}

impl std::error::Error for ParseError {}

impl CivilDateTime {
    /// Creates a floating value at midnight.
    pub fn from_date(year: Year, month: Month, day: Day) -> Self {
        Self {
            year,
            month,
            day,
            hour: Hour::default(),
            minute: Minute::default(),
            second: Second::default(),
            millisecond: 0,
            offset: None,
        }
    }

    /// Creates a floating value from already-validated fields.
    pub fn from_date_time(
        year: Year,
        month: Month,
        day: Day,
        hour: Hour,
        minute: Minute,
        second: Second,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond: 0,
            offset: None,
        }
    }

    /// Builds a value from raw numeric fields, validating each one.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first field that is out of range.
    pub fn from_fields(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, ParseError> {
        let y = Year::new(year)?;
        let m = Month::new(month)?;
        let d = Day::new(day, year, month)?;
        Ok(Self::from_date_time(
            y,
            m,
            d,
            Hour::new(hour)?,
            Minute::new(minute)?,
            Second::new(second)?,
        ))
    }

    /// Attaches an explicit UTC offset, replacing any previous one.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the sub-second precision in milliseconds.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMillisecond` past `MAX_MILLISECOND`.
    pub fn with_millisecond(mut self, millisecond: u16) -> Result<Self, ParseError> {
        if millisecond > MAX_MILLISECOND {
            return Err(ParseError::InvalidMillisecond(millisecond));
        }
        self.millisecond = millisecond;
        Ok(self)
    }

    /// Returns the year (1-9999)
    pub fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month (1-12)
    pub fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day of month (1-31)
    pub fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the hour (0-23)
    pub fn hour(&self) -> u8 {
        self.hour.get()
    }

    /// Returns the minute (0-59)
    pub fn minute(&self) -> u8 {
        self.minute.get()
    }

    /// Returns the second (0-59)
    pub fn second(&self) -> u8 {
        self.second.get()
    }

    /// Returns the millisecond (0-999); zero unless explicitly parsed or set
    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    /// Returns the embedded UTC offset, if the source text carried one
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// The civil fields as a `chrono` naive date-time, ignoring any offset.
    ///
    /// Field validation mirrors chrono's calendar rules, so values built
    /// through this crate's constructors always convert.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month.get()),
            u32::from(self.day.get()),
        )?
        .and_hms_milli_opt(
            u32::from(self.hour.get()),
            u32::from(self.minute.get()),
            u32::from(self.second.get()),
            u32::from(self.millisecond),
        )
    }

    /// Resolves the value to a concrete instant.
    ///
    /// The embedded offset governs when present; `fallback` covers floating
    /// values. The caller chooses the zone, never the process environment.
    pub fn resolve_with(&self, fallback: FixedOffset) -> Option<DateTime<FixedOffset>> {
        let offset = self.offset.unwrap_or(fallback);
        offset.from_local_datetime(&self.to_naive()?).single()
    }

    /// Resolves the value to a UTC instant, treating floating values as UTC.
    pub fn resolve_utc(&self) -> Option<DateTime<Utc>> {
        self.resolve_with(Utc.fix())
            .map(|instant| instant.with_timezone(&Utc))
    }

    fn sort_key(&self) -> (u16, u8, u8, u8, u8, u8, u16) {
        (
            self.year.get(),
            self.month.get(),
            self.day.get(),
            self.hour.get(),
            self.minute.get(),
            self.second.get(),
            self.millisecond,
        )
    }
}

/// Narrows a chrono field for re-validation; out-of-range values fall
/// through to the field constructors.
fn narrow(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

impl TryFrom<NaiveDateTime> for CivilDateTime {
    type Error = ParseError;

    fn try_from(naive: NaiveDateTime) -> Result<Self, Self::Error> {
        let year =
            u16::try_from(naive.year()).map_err(|_| ParseError::InvalidYear(naive.year()))?;
        let value = Self::from_fields(
            year,
            narrow(naive.month()),
            narrow(naive.day()),
            narrow(naive.hour()),
            narrow(naive.minute()),
            narrow(naive.second()),
        )?;
        // Leap-second nanos stay within the sub-second range after the modulo.
        let millisecond =
            u16::try_from((naive.nanosecond() % 1_000_000_000) / 1_000_000).unwrap_or(0);
        value.with_millisecond(millisecond)
    }
}

impl TryFrom<DateTime<FixedOffset>> for CivilDateTime {
    type Error = ParseError;

    fn try_from(instant: DateTime<FixedOffset>) -> Result<Self, Self::Error> {
        Ok(Self::try_from(instant.naive_local())?.with_offset(*instant.offset()))
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year.get(),
            self.month.get(),
            self.day.get(),
            self.hour.get(),
            self.minute.get(),
            self.second.get(),
        )?;
        if self.millisecond != 0 {
            write!(f, ".{:03}", self.millisecond)?;
        }
        match self.offset {
            Some(offset) if offset.local_minus_utc() == 0 => f.write_str("Z"),
            Some(offset) => write!(f, "{offset}"),
            None => Ok(()),
        }
    }
}

impl FromStr for CivilDateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_known_format(s.trim()).ok_or_else(|| ParseError::UnknownLayout(s.to_owned()))
    }
}

impl PartialOrd for CivilDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CivilDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        // Civil fields order the values; the offset only breaks exact ties.
        match self.sort_key().cmp(&other.sort_key()) {
            Ordering::Equal => {
                let a = self.offset.map(|offset| offset.local_minus_utc());
                let b = other.offset.map(|offset| offset.local_minus_utc());
                a.cmp(&b)
            }
            ord => ord,
        }
    }
}

impl serde::Serialize for CivilDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CivilDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
