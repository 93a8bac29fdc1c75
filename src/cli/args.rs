use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use super::CliError;

/// Positional arguments plus `--name value` options.
///
/// An option followed by another option, or by nothing, is stored as a bare
/// switch with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    positional: Vec<String>,
    options: HashMap<String, String>,
}

impl ParsedArgs {
    pub fn parse(args: &[String]) -> Self {
        let mut parsed = Self::default();
        let mut iter = args.iter().peekable();
        while let Some(arg) = iter.next() {
            match arg.strip_prefix("--") {
                Some(name) if !name.is_empty() => {
                    let value = match iter.peek() {
                        Some(next) if !next.starts_with("--") => iter.next().cloned(),
                        _ => None,
                    };
                    parsed
                        .options
                        .insert(name.to_ascii_lowercase(), value.unwrap_or_default());
                }
                _ => parsed.positional.push(arg.clone()),
            }
        }
        parsed
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Positional argument that must be present; `usage` is reported otherwise.
    pub fn required(&self, index: usize, usage: &str) -> Result<&str, CliError> {
        self.positional(index)
            .ok_or_else(|| CliError::Usage(format!("usage: {usage}")))
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn flag(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }
}

pub fn parse_amount(raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
        .ok_or_else(|| CliError::Usage(format!("`{raw}` is not a positive amount")))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Usage(format!("`{raw}` is not a date (expected YYYY-MM-DD)")))
}

/// Noon local time on `date`, so the record stays on that calendar day in
/// nearby timezones.
pub fn local_noon(date: NaiveDate) -> DateTime<Utc> {
    match date.and_hms_opt(12, 0, 0) {
        Some(noon) => Local
            .from_local_datetime(&noon)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&noon)),
        None => Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn separates_positionals_options_and_switches() {
        let parsed = ParsedArgs::parse(&args(&[
            "expense", "120", "Food", "--note", "late lunch", "--yes",
        ]));
        assert_eq!(parsed.positional(0), Some("expense"));
        assert_eq!(parsed.positional(2), Some("Food"));
        assert_eq!(parsed.positional(3), None);
        assert_eq!(parsed.option("note"), Some("late lunch"));
        assert!(parsed.flag("yes"));
        assert_eq!(parsed.option("yes"), None);
        assert!(parsed.required(5, "add ...").is_err());
    }

    #[test]
    fn amounts_must_be_positive_numbers() {
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("lots").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn dates_are_iso_calendar_days() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!(local_noon(date).with_timezone(&Local).date_naive(), date);
        assert!(parse_date("29/02/2024").is_err());
    }
}
