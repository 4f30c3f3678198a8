use time::{format_description::FormatItem, macros::format_description, Date, Month};

/// Date text accepted on the wire, strict ISO first. Anything else is treated
/// as "not a date" by the caller, never an error.
const DATE_FORMATS: [&[FormatItem<'static>]; 3] = [
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]/[month]/[day]"),
    format_description!("[year][month][day]"),
];

/// Parse tolerant date text into a canonical calendar date.
///
/// `None` signals "not a valid date"; callers decide whether that is a
/// validation failure (start date) or a fallback to an open-ended range
/// (end date).
pub fn try_parse_date(text: &str) -> Option<Date> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(trimmed, format).ok())
}

/// Same month and day in the prior year. Feb 29 clamps to Feb 28, the only
/// day without a prior-year twin.
pub fn one_year_before(date: Date) -> Date {
    let year = date.year() - 1;
    Date::from_calendar_date(year, date.month(), date.day()).unwrap_or_else(|_| {
        Date::from_calendar_date(year, Month::February, 28).expect("Feb 28 is valid in every year")
    })
}
