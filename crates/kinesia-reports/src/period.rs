use jiff::civil::{Date, Weekday};
use jiff::tz::TimeZone;
use jiff::Span;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Named reporting periods, resolved to a concrete inclusive date range at
/// evaluation time. Weeks run Monday through Sunday (the clinic's locale
/// convention); calendar derivations are done in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimePeriod {
    CurrentWeek,
    LastWeek,
    CurrentMonth,
    #[default]
    All,
}

impl TimePeriod {
    /// Resolve against a reference date. `None` means unbounded.
    pub fn resolve(&self, today: Date) -> Result<Option<(Date, Date)>, ReportError> {
        let range = match self {
            TimePeriod::CurrentWeek => Some(week_of(today)?),
            TimePeriod::LastWeek => {
                let a_week_ago = today.checked_sub(Span::new().days(7))?;
                Some(week_of(a_week_ago)?)
            }
            TimePeriod::CurrentMonth => Some((today.first_of_month(), today.last_of_month())),
            TimePeriod::All => None,
        };
        Ok(range)
    }

    /// Whether a visit instant falls inside this period, bounds inclusive.
    pub fn contains(&self, at: jiff::Timestamp, today: Date) -> Result<bool, ReportError> {
        match self.resolve(today)? {
            Some((start, end)) => {
                let date = civil_date(at);
                Ok(date >= start && date <= end)
            }
            None => Ok(true),
        }
    }
}

/// The calendar date of an instant, in UTC.
pub fn civil_date(at: jiff::Timestamp) -> Date {
    at.to_zoned(TimeZone::UTC).date()
}

fn week_of(date: Date) -> Result<(Date, Date), ReportError> {
    let since_monday = date.weekday().since(Weekday::Monday);
    let monday = date.checked_sub(Span::new().days(i64::from(since_monday)))?;
    let sunday = monday.checked_add(Span::new().days(6))?;
    Ok((monday, sunday))
}
