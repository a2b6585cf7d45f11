//! Field validation and normalization.
//!
//! Every function here is pure and total: any input yields either a
//! normalized value or a [`RejectedInput`] carrying user-facing guidance.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::step::ValidationKind;

/// Reason an answer was not accepted. The display text is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectedInput {
    #[error("Please provide a valid date with month between 1-12 and day between 1-31.")]
    DateOutOfRange,

    #[error("Please provide a valid date in YYYY-MM-DD format. Examples: 2023-05-15, 05/15/2023, May 15, 2023.")]
    UnrecognizedDate,

    #[error("Please provide a valid hour between 0-23 (or 1-12 with AM/PM).")]
    HourOutOfRange,

    #[error("Please provide a valid minute between 0-59.")]
    MinuteOutOfRange,

    #[error("Please provide a valid time in HH:MM format, or with AM/PM. Examples: 14:30, 2:30 PM, noon.")]
    UnrecognizedTime,

    #[error("Please provide a valid age between 0-120 years.")]
    AgeOutOfRange,

    #[error("Please provide a valid numeric age. Example: 35.")]
    MissingAge,
}

/// Validates `raw` for `kind`, using the current year to expand two-digit years.
pub fn validate(raw: &str, kind: ValidationKind) -> Result<String, RejectedInput> {
    validate_at(raw, kind, Utc::now().year())
}

/// Same as [`validate`] with an explicit reference year.
pub fn validate_at(
    raw: &str,
    kind: ValidationKind,
    reference_year: i32,
) -> Result<String, RejectedInput> {
    match kind {
        ValidationKind::None => Ok(raw.to_string()),
        ValidationKind::Date => normalize_date(raw, reference_year),
        ValidationKind::Time => normalize_time(raw),
        ValidationKind::Age => normalize_age(raw),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Dates
// ════════════════════════════════════════════════════════════════════════════

static TEXT_DAY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?([a-zA-Z]+),?\s+([0-9]{4})")
        .expect("valid regex")
});

static TEXT_MONTH_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z]+)\s+([0-9]{1,2})(?:st|nd|rd|th)?,?\s+([0-9]{4})").expect("valid regex")
});

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("valid regex"));

#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    MonthDayYear,
    YearMonthDay,
}

static NUMERIC_DATES: Lazy<Vec<(Regex, FieldOrder)>> = Lazy::new(|| {
    [
        (r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$", FieldOrder::MonthDayYear),
        (r"^([0-9]{1,2})-([0-9]{1,2})-([0-9]{4})$", FieldOrder::MonthDayYear),
        (r"^([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{4})$", FieldOrder::MonthDayYear),
        (r"^([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})$", FieldOrder::YearMonthDay),
        (r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{2})$", FieldOrder::MonthDayYear),
    ]
    .into_iter()
    .map(|(pattern, order)| (Regex::new(pattern).expect("valid regex"), order))
    .collect()
});

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn expand_two_digit_year(two_digit: u32, reference_year: i32) -> u32 {
    let reference = reference_year.max(0) as u32;
    let century = reference / 100;
    if two_digit > reference % 100 {
        century.saturating_sub(1) * 100 + two_digit
    } else {
        century * 100 + two_digit
    }
}

fn format_date(year: u32, month: u32, day: u32) -> Result<String, RejectedInput> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(RejectedInput::DateOutOfRange);
    }
    Ok(format!("{:04}-{:02}-{:02}", year, month, day))
}

fn normalize_date(raw: &str, reference_year: i32) -> Result<String, RejectedInput> {
    let input = raw.trim();

    if let Some(caps) = TEXT_DAY_FIRST.captures(input) {
        if let Some(month) = month_number(&caps[2]) {
            return format_date(parse_number(&caps[3]), month, parse_number(&caps[1]));
        }
    }

    if let Some(caps) = TEXT_MONTH_FIRST.captures(input) {
        if let Some(month) = month_number(&caps[1]) {
            return format_date(parse_number(&caps[3]), month, parse_number(&caps[2]));
        }
    }

    if let Some(caps) = ISO_DATE.captures(input) {
        return format_date(
            parse_number(&caps[1]),
            parse_number(&caps[2]),
            parse_number(&caps[3]),
        );
    }

    for (pattern, order) in NUMERIC_DATES.iter() {
        let Some(caps) = pattern.captures(input) else {
            continue;
        };
        let (year, month, day) = match order {
            FieldOrder::YearMonthDay => (&caps[1], &caps[2], &caps[3]),
            FieldOrder::MonthDayYear => (&caps[3], &caps[1], &caps[2]),
        };
        let year = if year.len() == 2 {
            expand_two_digit_year(parse_number(year), reference_year)
        } else {
            parse_number(year)
        };
        return format_date(year, parse_number(month), parse_number(day));
    }

    Err(RejectedInput::UnrecognizedDate)
}

// Captures are at most four ASCII digits, so parsing cannot overflow.
fn parse_number(digits: &str) -> u32 {
    digits.parse().unwrap_or(0)
}

// ════════════════════════════════════════════════════════════════════════════
// Times
// ════════════════════════════════════════════════════════════════════════════

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?:\s*(am|pm))?$").expect("valid regex")
});

static HOUR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})\s*(am|pm)$").expect("valid regex"));

/// Descriptive terms, matched as substrings in order. A longer term must
/// precede any term it contains ("midnight" before "night").
const DESCRIPTIVE_TIMES: [(&str, &str); 6] = [
    ("midnight", "00:00"),
    ("afternoon", "15:00"),
    ("noon", "12:00"),
    ("morning", "09:00"),
    ("evening", "19:00"),
    ("night", "22:00"),
];

fn to_24_hour(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    }
}

fn normalize_time(raw: &str) -> Result<String, RejectedInput> {
    let input = raw.trim().to_lowercase();

    if let Some(caps) = CLOCK_TIME.captures(&input) {
        let hour = to_24_hour(parse_number(&caps[1]), caps.get(3).map(|m| m.as_str()));
        let minute = parse_number(&caps[2]);
        if hour > 23 {
            return Err(RejectedInput::HourOutOfRange);
        }
        if minute > 59 {
            return Err(RejectedInput::MinuteOutOfRange);
        }
        return Ok(format!("{:02}:{:02}", hour, minute));
    }

    if let Some(caps) = HOUR_ONLY.captures(&input) {
        let hour = to_24_hour(parse_number(&caps[1]), Some(&caps[2]));
        if hour > 23 {
            return Err(RejectedInput::HourOutOfRange);
        }
        return Ok(format!("{:02}:00", hour));
    }

    DESCRIPTIVE_TIMES
        .iter()
        .find(|(term, _)| input.contains(term))
        .map(|(_, time)| (*time).to_string())
        .ok_or(RejectedInput::UnrecognizedTime)
}

// ════════════════════════════════════════════════════════════════════════════
// Ages
// ════════════════════════════════════════════════════════════════════════════

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

fn normalize_age(raw: &str) -> Result<String, RejectedInput> {
    let digits = DIGIT_RUN
        .find(raw)
        .ok_or(RejectedInput::MissingAge)?
        .as_str();

    // A run too long for u32 is certainly above the limit.
    match digits.parse::<u32>() {
        Ok(age) if age <= 120 => Ok(age.to_string()),
        _ => Err(RejectedInput::AgeOutOfRange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(raw: &str) -> Result<String, RejectedInput> {
        validate_at(raw, ValidationKind::Date, 2024)
    }

    fn time(raw: &str) -> Result<String, RejectedInput> {
        validate(raw, ValidationKind::Time)
    }

    fn age(raw: &str) -> Result<String, RejectedInput> {
        validate(raw, ValidationKind::Age)
    }

    #[test]
    fn free_text_is_accepted_unchanged() {
        let raw = "  789 Elm Street, Apt 3C ";
        assert_eq!(validate(raw, ValidationKind::None), Ok(raw.to_string()));
    }

    // ─── dates ───

    #[test]
    fn text_dates_in_both_orders() {
        assert_eq!(date("May 5, 2023"), Ok("2023-05-05".to_string()));
        assert_eq!(date("15 January 2023"), Ok("2023-01-15".to_string()));
        assert_eq!(date("January 15, 2023"), Ok("2023-01-15".to_string()));
        assert_eq!(date("15th of Jan 2023"), Ok("2023-01-15".to_string()));
        assert_eq!(date("Dec 3rd 2021"), Ok("2021-12-03".to_string()));
        assert_eq!(date("it was on MARCH 9, 2020"), Ok("2020-03-09".to_string()));
    }

    #[test]
    fn iso_dates_are_zero_padded() {
        assert_eq!(date("2023-5-7"), Ok("2023-05-07".to_string()));
        assert_eq!(date(" 2023-10-15 "), Ok("2023-10-15".to_string()));
    }

    #[test]
    fn numeric_dates_with_separators() {
        assert_eq!(date("05/15/2023"), Ok("2023-05-15".to_string()));
        assert_eq!(date("5-15-2023"), Ok("2023-05-15".to_string()));
        assert_eq!(date("5.15.2023"), Ok("2023-05-15".to_string()));
        assert_eq!(date("2023/05/15"), Ok("2023-05-15".to_string()));
    }

    #[test]
    fn two_digit_years_pivot_on_reference_year() {
        assert_eq!(date("5/5/23"), Ok("2023-05-05".to_string()));
        assert_eq!(date("5/5/24"), Ok("2024-05-05".to_string()));
        assert_eq!(date("5/5/99"), Ok("1999-05-05".to_string()));
    }

    #[test]
    fn out_of_range_dates_are_rejected() {
        assert_eq!(date("13/45/2023"), Err(RejectedInput::DateOutOfRange));
        assert_eq!(date("2023-00-10"), Err(RejectedInput::DateOutOfRange));
        assert_eq!(date("May 40, 2023"), Err(RejectedInput::DateOutOfRange));
    }

    #[test]
    fn numeric_dates_are_month_first_only() {
        assert_eq!(date("3/4/2023"), Ok("2023-03-04".to_string()));
        assert_eq!(date("25/12/2023"), Err(RejectedInput::DateOutOfRange));
        assert_eq!(date("25.12.2023"), Err(RejectedInput::DateOutOfRange));
    }

    #[test]
    fn calendar_invalid_dates_are_tolerated() {
        assert_eq!(date("2023-02-30"), Ok("2023-02-30".to_string()));
    }

    #[test]
    fn unrecognized_dates_are_rejected() {
        assert_eq!(date("last tuesday"), Err(RejectedInput::UnrecognizedDate));
        assert_eq!(date("Smarch 5, 2023"), Err(RejectedInput::UnrecognizedDate));
        assert_eq!(date(""), Err(RejectedInput::UnrecognizedDate));
    }

    // ─── times ───

    #[test]
    fn clock_times() {
        assert_eq!(time("14:30"), Ok("14:30".to_string()));
        assert_eq!(time("2:30 PM"), Ok("14:30".to_string()));
        assert_eq!(time("12:15am"), Ok("00:15".to_string()));
        assert_eq!(time("12:00 pm"), Ok("12:00".to_string()));
        assert_eq!(time("7:05"), Ok("07:05".to_string()));
    }

    #[test]
    fn bare_hours_with_meridiem() {
        assert_eq!(time("9 pm"), Ok("21:00".to_string()));
        assert_eq!(time("12am"), Ok("00:00".to_string()));
    }

    #[test]
    fn descriptive_times() {
        assert_eq!(time("noon"), Ok("12:00".to_string()));
        assert_eq!(time("around midnight"), Ok("00:00".to_string()));
        assert_eq!(time("late afternoon"), Ok("15:00".to_string()));
        assert_eq!(time("Early Morning"), Ok("09:00".to_string()));
        assert_eq!(time("evening"), Ok("19:00".to_string()));
        assert_eq!(time("at night"), Ok("22:00".to_string()));
    }

    #[test]
    fn out_of_range_times_are_rejected() {
        assert_eq!(time("25:00"), Err(RejectedInput::HourOutOfRange));
        assert_eq!(time("10:75"), Err(RejectedInput::MinuteOutOfRange));
        assert_eq!(time("30 pm"), Err(RejectedInput::HourOutOfRange));
    }

    #[test]
    fn meridiem_is_ignored_for_afternoon_hours() {
        assert_eq!(time("13:00 pm"), Ok("13:00".to_string()));
    }

    #[test]
    fn unrecognized_times_are_rejected() {
        assert_eq!(time("sometime"), Err(RejectedInput::UnrecognizedTime));
    }

    // ─── ages ───

    #[test]
    fn ages_take_the_first_digit_run() {
        assert_eq!(age("around 35 years"), Ok("35".to_string()));
        assert_eq!(age("007"), Ok("7".to_string()));
        assert_eq!(age("0"), Ok("0".to_string()));
        assert_eq!(age("120"), Ok("120".to_string()));
    }

    #[test]
    fn out_of_range_ages_are_rejected() {
        assert_eq!(age("150"), Err(RejectedInput::AgeOutOfRange));
        assert_eq!(age("99999999999999999999"), Err(RejectedInput::AgeOutOfRange));
    }

    #[test]
    fn ages_without_digits_are_rejected() {
        assert_eq!(age("thirty five"), Err(RejectedInput::MissingAge));
    }

    #[test]
    fn rejection_text_is_user_facing() {
        assert_eq!(
            RejectedInput::AgeOutOfRange.to_string(),
            "Please provide a valid age between 0-120 years."
        );
    }

    proptest! {
        #[test]
        fn never_panics(raw in ".*") {
            for kind in [
                ValidationKind::Date,
                ValidationKind::Time,
                ValidationKind::Age,
                ValidationKind::None,
            ] {
                let _ = validate(&raw, kind);
            }
        }

        #[test]
        fn valid_iso_dates_normalize(year in 1000u32..=9999, month in 1u32..=12, day in 1u32..=31) {
            let raw = format!("{}-{}-{}", year, month, day);
            prop_assert_eq!(date(&raw), Ok(format!("{:04}-{:02}-{:02}", year, month, day)));
        }

        #[test]
        fn valid_clock_times_normalize(hour in 0u32..=23, minute in 0u32..=59) {
            let raw = format!("{}:{:02}", hour, minute);
            prop_assert_eq!(time(&raw), Ok(format!("{:02}:{:02}", hour, minute)));
        }

        #[test]
        fn ages_in_range_round_trip(value in 0u32..=120, prefix in "[a-z ]{0,10}") {
            let raw = format!("{}{} years old", prefix, value);
            prop_assert_eq!(age(&raw), Ok(value.to_string()));
        }

        #[test]
        fn ages_above_range_are_rejected(value in 121u32..100_000) {
            prop_assert_eq!(age(&value.to_string()), Err(RejectedInput::AgeOutOfRange));
        }
    }
}
