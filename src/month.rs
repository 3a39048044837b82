//! Resolves month names from query strings into calendar months.
//!
//! Every endpoint filters transactions by the month of their sale date,
//! ignoring the year, so the only input needed is the month itself.

use serde::Deserialize;
use time::Month;

use crate::Error;

/// The twelve accepted month names, in calendar order.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse a full English month name, e.g. "March".
///
/// Matching is exact and case-sensitive, so "march", "Mar" and "Marchh" are
/// all rejected.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not one of [MONTH_NAMES].
pub fn parse_month(name: &str) -> Result<Month, Error> {
    MONTH_NAMES
        .iter()
        .position(|month_name| *month_name == name)
        .and_then(|index| Month::try_from(index as u8 + 1).ok())
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// The `month` query parameter shared by the chart endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month name, e.g. "March".
    pub month: Option<String>,
}

impl MonthQuery {
    /// Resolve the month, treating an absent month as [Error::MissingMonth].
    pub fn required(&self) -> Result<Month, Error> {
        required_month(self.month.as_deref())
    }

    /// Resolve the month, treating an absent month as an invalid one.
    pub fn valid(&self) -> Result<Month, Error> {
        parse_month(self.month.as_deref().unwrap_or_default())
    }
}

/// Resolve an optional month name, treating an absent or empty name as
/// [Error::MissingMonth] and anything else like [parse_month].
pub fn required_month(name: Option<&str>) -> Result<Month, Error> {
    match name {
        None | Some("") => Err(Error::MissingMonth),
        Some(name) => parse_month(name),
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::Error;

    use super::{MONTH_NAMES, MonthQuery, parse_month};

    #[test]
    fn parses_every_month_name_in_order() {
        let months = MONTH_NAMES
            .iter()
            .map(|name| parse_month(name).expect("Could not parse month name"))
            .collect::<Vec<_>>();

        let mut want = Vec::new();
        let mut month = Month::January;
        for _ in 0..12 {
            want.push(month);
            month = month.next();
        }

        assert_eq!(months, want);
    }

    #[test]
    fn rejects_wrong_case_and_typos() {
        for name in ["march", "MARCH", "Mar", "Marchh", " March", "13", ""] {
            assert_eq!(
                parse_month(name),
                Err(Error::InvalidMonth(name.to_owned())),
                "want {name:?} to be rejected"
            );
        }
    }

    #[test]
    fn required_month_reports_missing_month() {
        let query = MonthQuery { month: None };

        assert_eq!(query.required(), Err(Error::MissingMonth));
    }

    #[test]
    fn required_month_treats_empty_as_missing() {
        let query = MonthQuery {
            month: Some(String::new()),
        };

        assert_eq!(query.required(), Err(Error::MissingMonth));
    }

    #[test]
    fn valid_month_reports_missing_month_as_invalid() {
        let query = MonthQuery { month: None };

        assert_eq!(query.valid(), Err(Error::InvalidMonth(String::new())));
    }

    #[test]
    fn required_month_still_validates_names() {
        let query = MonthQuery {
            month: Some("Smarch".to_owned()),
        };

        assert_eq!(query.required(), Err(Error::InvalidMonth("Smarch".to_owned())));
    }
}
