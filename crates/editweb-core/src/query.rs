//! Query-string form of the view state
//!
//! The URL is the only place the view state persists. Parameters are
//! written in the fixed order `name, date, title, sort, dir, page`.
//! Missing or unreadable values fall back to the defaults; `dir=0` and
//! `page=0` read the same as an absent value.

use crate::view::{Filters, SortDirection, SortKey, ViewState};

impl ViewState {
    /// Serialize as `?name=..&date=..&title=..&sort=..&dir=..&page=..`
    pub fn to_query_string(&self) -> String {
        format!(
            "?name={}&date={}&title={}&sort={}&dir={}&page={}",
            urlencoding::encode(&self.filters.name),
            urlencoding::encode(&self.filters.date),
            urlencoding::encode(&self.filters.title),
            self.sort_key,
            self.sort_direction.multiplier(),
            self.current_page
        )
    }

    /// Parse a raw query string, with or without the leading `?`
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(part), String::new()),
            });
        Self::from_query_pairs(pairs)
    }

    /// Build a state from already-decoded key/value pairs
    ///
    /// The first occurrence of a key wins.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut name = None;
        let mut date = None;
        let mut title = None;
        let mut sort = None;
        let mut dir = None;
        let mut page = None;

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "name" => &mut name,
                "date" => &mut date,
                "title" => &mut title,
                "sort" => &mut sort,
                "dir" => &mut dir,
                "page" => &mut page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.as_ref().to_string());
            }
        }

        let sort_key = sort
            .and_then(|s| s.parse::<SortKey>().ok())
            .unwrap_or_default();

        let sort_direction = match dir.as_deref().and_then(parse_leading_int) {
            Some(n) if n < 0 => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };

        let current_page = page
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(1);

        ViewState {
            filters: Filters {
                name: name.unwrap_or_default(),
                date: date.unwrap_or_default(),
                title: title.unwrap_or_default(),
            },
            sort_key,
            sort_direction,
            current_page,
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Read an optional sign and the leading run of digits, ignoring the rest
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    // Only overflow can fail here; a huge number stays huge
    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
