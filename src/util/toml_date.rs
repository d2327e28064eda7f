use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// A TOML local date (`2009-05-01`) read into a chrono date.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TomlDate(pub NaiveDate);

impl TomlDate {
    /// Whole years between this date and `today`. Zero when `today` is earlier.
    pub fn years_until(&self, today: NaiveDate) -> u32 {
        let TomlDate(start) = *self;
        let mut years = today.year() - start.year();
        if (today.month(), today.day()) < (start.month(), start.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}

impl<'de> Deserialize<'de> for TomlDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let value = toml::value::Datetime::deserialize(deserializer)?;
        match value.date {
            Some(date) => {
                NaiveDate::from_ymd_opt(date.year as i32, date.month as u32, date.day as u32)
                    .map(TomlDate)
                    .ok_or_else(|| Error::custom(format!("Invalid date {}", value)))
            }
            None => Err(Error::custom(format!("Expected a date, found {}", value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Site {
        established: TomlDate,
    }

    #[test]
    fn test_toml_date() {
        let site: Site = toml::from_str("established = 2009-05-01").unwrap();
        assert_eq!(site.established, TomlDate(NaiveDate::from_ymd_opt(2009, 5, 1).unwrap()));
    }

    #[test]
    fn test_time_only_rejected() {
        assert!(toml::from_str::<Site>("established = 10:30:00").is_err());
    }

    #[test]
    fn test_years_until() {
        let established = TomlDate(NaiveDate::from_ymd_opt(2009, 5, 1).unwrap());
        assert_eq!(established.years_until(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()), 14);
        assert_eq!(established.years_until(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()), 15);
        assert_eq!(established.years_until(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap()), 0);
    }
}
