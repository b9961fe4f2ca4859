//! Date format micro-parser used by the `after`, `before` and `isdate` rules.
//!
//! A format is a string of single-character tokens from the PHP `date()`
//! alphabet. Every other character is matched literally.
//!
//! | token | meaning                       | accepts   |
//! |-------|-------------------------------|-----------|
//! | `Y`   | four digit year               | `2024`    |
//! | `y`   | two digit year (19xx)         | `24`      |
//! | `m`   | month, zero padded            | `01`–`12` |
//! | `n`   | month, no padding             | `1`–`12`  |
//! | `d`   | day, zero padded              | `01`–`31` |
//! | `j`   | day, no padding               | `1`–`31`  |
//! | `g`   | 12-hour hour, no padding      | `1`–`12`  |
//! | `G`   | 24-hour hour, no padding      | `0`–`23`  |
//! | `h`   | 12-hour hour, zero padded     | `01`–`12` |
//! | `H`   | 24-hour hour, zero padded     | `00`–`23` |
//! | `i`   | minutes                       | `00`–`59` |
//! | `s`   | seconds                       | `00`–`59` |
//!
//! The shape check alone would accept `2023-02-29`, so a successful match is
//! rebuilt on the calendar and rejected when the day-of-month drifts.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::value::{Value, as_text};

/// Which date component a capture group feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Year,
    ShortYear,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Component {
    fn for_token(token: char) -> Option<(Self, &'static str)> {
        let entry = match token {
            'Y' => (Self::Year, "([0-9]{4})"),
            'y' => (Self::ShortYear, "([0-9]{2})"),
            'n' => (Self::Month, "([1-9]|1[0-2])"),
            'm' => (Self::Month, "(0[1-9]|1[0-2])"),
            'd' => (Self::Day, "(0[1-9]|[12][0-9]|3[01])"),
            'j' => (Self::Day, "([1-9]|[12][0-9]|3[01])"),
            'g' => (Self::Hour, "([1-9]|1[0-2])"),
            'G' => (Self::Hour, "([0-9]|1[0-9]|2[0-3])"),
            'h' => (Self::Hour, "(0[1-9]|1[0-2])"),
            'H' => (Self::Hour, "([01][0-9]|2[0-3])"),
            'i' => (Self::Minute, "([0-5][0-9])"),
            's' => (Self::Second, "([0-5][0-9])"),
            _ => return None,
        };
        Some(entry)
    }
}

/// A compiled date format.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::date::DateFormat;
///
/// let format = DateFormat::compile("d/m/Y").unwrap();
/// assert!(format.parse("29/02/2024").is_some());
/// assert!(format.parse("29/02/2023").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DateFormat {
    source: String,
    pattern: Regex,
    components: Vec<Component>,
}

impl DateFormat {
    /// Compiles `format` into an anchored pattern plus a capture map.
    pub fn compile(format: &str) -> Result<Self, regex::Error> {
        let mut pattern = String::from("^");
        let mut components = Vec::new();

        for token in format.chars() {
            if let Some((component, sub)) = Component::for_token(token) {
                pattern.push_str(sub);
                components.push(component);
            } else {
                pattern.push_str(&regex::escape(token.encode_utf8(&mut [0; 4])));
            }
        }
        pattern.push('$');

        Ok(Self {
            source: format.to_string(),
            pattern: Regex::new(&pattern)?,
            components,
        })
    }

    /// The format string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parses `value`, returning `None` when it does not match the format or
    /// names a day that does not exist.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let caps = self.pattern.captures(value)?;

        let mut year = 0;
        let mut month = None;
        let mut day = None;
        let (mut hour, mut minute, mut second) = (0, 0, 0);

        for (index, component) in self.components.iter().enumerate() {
            let number: u32 = caps.get(index + 1)?.as_str().parse().ok()?;
            match component {
                Component::Year => year = number as i32,
                Component::ShortYear => year = 1900 + number as i32,
                Component::Month => month = Some(number),
                Component::Day => day = Some(number),
                Component::Hour => hour = number,
                Component::Minute => minute = number,
                Component::Second => second = number,
            }
        }

        let (month, day) = (month?, day?);
        let date = NaiveDate::from_ymd_opt(year, month, 1)?
            .checked_add_days(Days::new(u64::from(day.checked_sub(1)?)))?;

        // Day 31 of a 30-day month rolls into the next month.
        if date.day() != day {
            return None;
        }

        date.and_hms_opt(hour, minute, second)
    }
}

/// Parses a field value against `format`; non-string values never parse.
pub fn parse_date(value: Option<&Value>, format: &str) -> Option<NaiveDateTime> {
    let text = as_text(value)?;
    DateFormat::compile(format).ok()?.parse(text)
}
