use chrono::{Datelike, Duration, Local, NaiveDate};

const KEY_DATE_FORMAT: &str = "%B %-d, %Y";
const KEY_SEPARATOR: &str = " - ";

/// Monday of the week containing `date`, counting Sunday as day 0.
///
/// A Sunday therefore resolves to the Monday that follows it.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let day_of_week = date.weekday().num_days_from_sunday() as i64;
    date - Duration::days(day_of_week) + Duration::days(1)
}

pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Human-readable key such as "January 6, 2025 - January 12, 2025".
pub fn week_key(date: NaiveDate) -> String {
    format!(
        "{}{KEY_SEPARATOR}{}",
        week_start(date).format(KEY_DATE_FORMAT),
        week_end(date).format(KEY_DATE_FORMAT)
    )
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_week_key() -> String {
    week_key(today())
}

/// Monday named by a week key, or `None` if the key was not produced by
/// [`week_key`].
pub fn parse_week_key(key: &str) -> Option<NaiveDate> {
    let (start, end) = key.split_once(KEY_SEPARATOR)?;
    let start = NaiveDate::parse_from_str(start.trim(), "%B %d, %Y").ok()?;
    let end = NaiveDate::parse_from_str(end.trim(), "%B %d, %Y").ok()?;
    if start.weekday().num_days_from_monday() != 0 || end - start != Duration::days(6) {
        return None;
    }
    Some(start)
}

/// Orders keys oldest week first; keys that do not parse go last.
pub fn sort_week_keys(keys: &mut [String]) {
    keys.sort_by(|a, b| match (parse_week_key(a), parse_week_key(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn wednesday_spans_monday_through_sunday() {
        assert_eq!(
            week_key(date(2025, 1, 8)),
            "January 6, 2025 - January 12, 2025"
        );
        assert_eq!(week_start(date(2025, 1, 6)), date(2025, 1, 6));
        assert_eq!(week_end(date(2025, 1, 11)), date(2025, 1, 12));
    }

    #[test]
    fn sunday_rolls_forward_to_next_monday() {
        assert_eq!(week_start(date(2025, 1, 12)), date(2025, 1, 13));
        assert_eq!(
            week_key(date(2025, 1, 12)),
            "January 13, 2025 - January 19, 2025"
        );
    }

    #[test]
    fn key_spans_year_boundary() {
        assert_eq!(
            week_key(date(2025, 1, 1)),
            "December 30, 2024 - January 5, 2025"
        );
    }

    #[test]
    fn parse_week_key_reads_back_the_monday() {
        let key = week_key(date(2025, 3, 20));
        assert_eq!(parse_week_key(&key), Some(date(2025, 3, 17)));
        assert_eq!(parse_week_key("last week"), None);
        assert_eq!(
            parse_week_key("January 7, 2025 - January 13, 2025"),
            None
        );
    }

    #[test]
    fn sort_orders_chronologically_with_unparsed_last() {
        let mut keys = vec![
            "zzz".to_string(),
            week_key(date(2025, 2, 5)),
            week_key(date(2024, 12, 31)),
            week_key(date(2025, 1, 8)),
        ];
        sort_week_keys(&mut keys);
        assert_eq!(
            keys,
            [
                "December 30, 2024 - January 5, 2025",
                "January 6, 2025 - January 12, 2025",
                "February 3, 2025 - February 9, 2025",
                "zzz",
            ]
        );
    }
}
