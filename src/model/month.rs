use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::error::HrError;

/// Calendar month as stored on attendance and salary records.
///
/// Stored and rendered by its English name; parsing ignores ASCII case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
    sqlx::Type,
)]
#[strum(ascii_case_insensitive)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// 1-based calendar number, used for ordering.
    pub fn number(self) -> u32 {
        Month::iter().position(|m| m == self).unwrap_or(0) as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Self> {
        Month::iter().nth(number.checked_sub(1)? as usize)
    }

    /// Parses a month name, reporting failures against `field`.
    pub fn parse_field(field: &str, value: &str) -> Result<Self, HrError> {
        value.trim().parse().map_err(|_| {
            HrError::validation(field, format!("'{}' is not a month name", value.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_case() {
        assert_eq!("march".parse::<Month>().unwrap(), Month::March);
        assert_eq!("MARCH".parse::<Month>().unwrap(), Month::March);
        assert_eq!(Month::parse_field("month", " December ").unwrap(), Month::December);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = Month::parse_field("month", "Smarch").unwrap_err();
        assert_eq!(err.field(), Some("month"));
        assert!("Mar".parse::<Month>().is_err());
    }

    #[test]
    fn numbers_follow_the_calendar() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::December.number(), 12);
        assert_eq!(Month::from_number(3), Some(Month::March));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
        assert_eq!(Month::September.to_string(), "September");
    }
}
