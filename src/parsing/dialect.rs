//! KakaoTalk export dialects and line classification.
//!
//! KakaoTalk exports differ by client. Each client writes its own line
//! shape, and the desktop client omits the date entirely:
//!
//! - Mobile A (iOS): `2023. 8. 1. 오후 3:45:12, Alice : hello`
//! - Mobile B (Android): `2023년 8월 1일 오후 3:45, Alice : hello`
//! - Desktop (Windows): `[Alice] [오후 3:45] hello`
//! - Date header (Windows): `--------------- 2023년 8월 1일 화요일 ---------------`
//!
//! Lines are tested against the dialects in that order and the first match
//! wins.

use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};

use crate::config::LocaleConfig;
use crate::error::KakaopackError;

/// A recognized export line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Full timestamp with dotted date and optional seconds (iOS client)
    MobileA,
    /// Full timestamp with suffixed date, no seconds (Android client)
    MobileB,
    /// Bracketed sender and time, no date (Windows client)
    Desktop,
    /// Decorated separator announcing a new date (Windows client)
    DateHeader,
}

impl Dialect {
    /// All dialects in precedence order.
    pub fn all() -> &'static [Dialect] {
        &[
            Dialect::MobileA,
            Dialect::MobileB,
            Dialect::Desktop,
            Dialect::DateHeader,
        ]
    }

    /// Builds the regex pattern for this dialect from locale literals.
    pub fn pattern(self, locale: &LocaleConfig) -> String {
        let marker = format!(
            "({}|{})",
            regex::escape(&locale.morning),
            regex::escape(&locale.afternoon)
        );
        let year = regex::escape(&locale.year_suffix);
        let month = regex::escape(&locale.month_suffix);
        let day = regex::escape(&locale.day_suffix);

        // [0-9] rather than \d: Unicode digits would not parse as integers.
        match self {
            // 2023. 8. 1. 오후 3:45:12, Alice : hello
            Dialect::MobileA => format!(
                r"^([0-9]{{4}})\. ([0-9]{{1,2}})\. ([0-9]{{1,2}})\. {marker} ([0-9]{{1,2}}):([0-9]{{2}})(?::([0-9]{{2}}))?, (.*) : (.*)"
            ),
            // 2023년 8월 1일 오후 3:45, Alice : hello
            Dialect::MobileB => format!(
                r"^([0-9]{{4}}){year} ([0-9]{{1,2}}){month} ([0-9]{{1,2}}){day} {marker} ([0-9]{{1,2}}):([0-9]{{2}}), (.*) : (.*)"
            ),
            // [Alice] [오후 3:45] hello
            Dialect::Desktop => {
                format!(r"^\[(.*)\] \[{marker} ([0-9]{{1,2}}):([0-9]{{2}})\] (.*)")
            }
            // --------------- 2023년 8월 1일 화요일 ---------------
            Dialect::DateHeader => {
                let rule = regex::escape(&locale.header_rule);
                format!(
                    r"^{rule} ([0-9]{{4}}){year} ([0-9]{{1,2}}){month} ([0-9]{{1,2}}){day}.* {rule}"
                )
            }
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MobileA => write!(f, "Mobile A"),
            Dialect::MobileB => write!(f, "Mobile B"),
            Dialect::Desktop => write!(f, "Desktop"),
            Dialect::DateHeader => write!(f, "Date header"),
        }
    }
}

/// Half of the 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Morning,
    Afternoon,
}

/// Converts a 12-hour clock hour to 24-hour form.
///
/// ```rust
/// use kakaopack::parsing::{Meridiem, to_24_hour};
///
/// assert_eq!(to_24_hour(Meridiem::Morning, 12), 0);
/// assert_eq!(to_24_hour(Meridiem::Afternoon, 12), 12);
/// assert_eq!(to_24_hour(Meridiem::Afternoon, 3), 15);
/// ```
pub fn to_24_hour(meridiem: Meridiem, hour: u32) -> u32 {
    match (meridiem, hour) {
        (Meridiem::Afternoon, h) if h != 12 => h + 12,
        (Meridiem::Morning, 12) => 0,
        (_, h) => h,
    }
}

/// Calendar date as captured from a line, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateFields {
    /// Returns the date, or `None` if the fields do not form a real date.
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Time of day as captured from a line, in 12-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub meridiem: Meridiem,
    pub hour: u32,
    pub minute: u32,
    /// Zero when the dialect has no seconds field or it was omitted.
    pub second: u32,
}

impl ClockTime {
    /// Returns the 24-hour time, or `None` if a field is out of range.
    pub fn to_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(to_24_hour(self.meridiem, self.hour), self.minute, self.second)
    }
}

/// Result of classifying one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatMatch<'a> {
    MobileA {
        date: DateFields,
        time: ClockTime,
        sender: &'a str,
        message: &'a str,
    },
    MobileB {
        date: DateFields,
        time: ClockTime,
        sender: &'a str,
        message: &'a str,
    },
    Desktop {
        time: ClockTime,
        sender: &'a str,
        message: &'a str,
    },
    DateHeader {
        date: DateFields,
    },
    NoMatch,
}

impl FormatMatch<'_> {
    /// Returns the dialect that matched, if any.
    pub fn dialect(&self) -> Option<Dialect> {
        match self {
            FormatMatch::MobileA { .. } => Some(Dialect::MobileA),
            FormatMatch::MobileB { .. } => Some(Dialect::MobileB),
            FormatMatch::Desktop { .. } => Some(Dialect::Desktop),
            FormatMatch::DateHeader { .. } => Some(Dialect::DateHeader),
            FormatMatch::NoMatch => None,
        }
    }
}

/// One compiled dialect pattern.
#[derive(Clone)]
struct DialectMatcher {
    dialect: Dialect,
    regex: Regex,
    morning: String,
}

impl DialectMatcher {
    fn new(dialect: Dialect, locale: &LocaleConfig) -> Result<Self, KakaopackError> {
        Ok(Self {
            dialect,
            regex: Regex::new(&dialect.pattern(locale))?,
            morning: locale.morning.clone(),
        })
    }

    fn meridiem(&self, token: &str) -> Meridiem {
        // The pattern only admits the two configured markers.
        if token == self.morning {
            Meridiem::Morning
        } else {
            Meridiem::Afternoon
        }
    }

    fn captures<'a>(&self, line: &'a str) -> Option<FormatMatch<'a>> {
        let caps = self.regex.captures(line)?;
        let m = match self.dialect {
            Dialect::MobileA => FormatMatch::MobileA {
                date: date_fields(&caps, 1)?,
                time: ClockTime {
                    meridiem: self.meridiem(group(&caps, 4)),
                    hour: number(&caps, 5)?,
                    minute: number(&caps, 6)?,
                    second: caps
                        .get(7)
                        .map_or(Some(0), |m| m.as_str().parse().ok())?,
                },
                sender: group(&caps, 8),
                message: group(&caps, 9),
            },
            Dialect::MobileB => FormatMatch::MobileB {
                date: date_fields(&caps, 1)?,
                time: ClockTime {
                    meridiem: self.meridiem(group(&caps, 4)),
                    hour: number(&caps, 5)?,
                    minute: number(&caps, 6)?,
                    second: 0,
                },
                sender: group(&caps, 7),
                message: group(&caps, 8),
            },
            Dialect::Desktop => FormatMatch::Desktop {
                time: ClockTime {
                    meridiem: self.meridiem(group(&caps, 2)),
                    hour: number(&caps, 3)?,
                    minute: number(&caps, 4)?,
                    second: 0,
                },
                sender: group(&caps, 1),
                message: group(&caps, 5),
            },
            Dialect::DateHeader => FormatMatch::DateHeader {
                date: date_fields(&caps, 1)?,
            },
        };
        Some(m)
    }
}

fn group<'a>(caps: &Captures<'a>, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| m.as_str())
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

fn date_fields(caps: &Captures<'_>, first: usize) -> Option<DateFields> {
    Some(DateFields {
        year: number(caps, first)?,
        month: number(caps, first + 1)?,
        day: number(caps, first + 2)?,
    })
}

/// The ordered list of dialect matchers for one locale.
///
/// # Example
///
/// ```rust
/// use kakaopack::config::LocaleConfig;
/// use kakaopack::parsing::{Dialect, DialectSet};
///
/// let dialects = DialectSet::new(&LocaleConfig::korean())?;
/// let m = dialects.classify("[Alice] [오후 3:45] hi");
/// assert_eq!(m.dialect(), Some(Dialect::Desktop));
/// # Ok::<(), kakaopack::KakaopackError>(())
/// ```
#[derive(Clone)]
pub struct DialectSet {
    matchers: Vec<DialectMatcher>,
}

impl DialectSet {
    /// Compiles every dialect pattern for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::InvalidLocale`] if the locale fails validation.
    pub fn new(locale: &LocaleConfig) -> Result<Self, KakaopackError> {
        locale.validate()?;
        let matchers = Dialect::all()
            .iter()
            .map(|&d| DialectMatcher::new(d, locale))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { matchers })
    }

    /// Classifies a trimmed line. The first matching dialect wins.
    pub fn classify<'a>(&self, line: &'a str) -> FormatMatch<'a> {
        self.matchers
            .iter()
            .find_map(|m| m.captures(line))
            .unwrap_or(FormatMatch::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialects() -> DialectSet {
        DialectSet::new(&LocaleConfig::korean()).unwrap()
    }

    #[test]
    fn test_classify_mobile_a_with_seconds() {
        let set = dialects();
        let m = set.classify("2023. 8. 1. 오후 3:45:12, Alice : hello");
        assert_eq!(
            m,
            FormatMatch::MobileA {
                date: DateFields { year: 2023, month: 8, day: 1 },
                time: ClockTime { meridiem: Meridiem::Afternoon, hour: 3, minute: 45, second: 12 },
                sender: "Alice",
                message: "hello",
            }
        );
    }

    #[test]
    fn test_classify_mobile_a_without_seconds() {
        let set = dialects();
        match set.classify("2023. 12. 31. 오전 11:05, Bob : hi") {
            FormatMatch::MobileA { time, .. } => {
                assert_eq!(time.second, 0);
                assert_eq!(time.meridiem, Meridiem::Morning);
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn test_classify_mobile_b() {
        let set = dialects();
        match set.classify("2023년 8월 1일 오후 3:45, Alice : hello") {
            FormatMatch::MobileB { date, time, sender, message } => {
                assert_eq!(date, DateFields { year: 2023, month: 8, day: 1 });
                assert_eq!(time.hour, 3);
                assert_eq!(time.second, 0);
                assert_eq!(sender, "Alice");
                assert_eq!(message, "hello");
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn test_classify_desktop() {
        let set = dialects();
        match set.classify("[Alice] [오후 3:45] hello there") {
            FormatMatch::Desktop { time, sender, message } => {
                assert_eq!(time.meridiem, Meridiem::Afternoon);
                assert_eq!(time.minute, 45);
                assert_eq!(sender, "Alice");
                assert_eq!(message, "hello there");
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn test_classify_date_header() {
        let set = dialects();
        let m = set.classify("--------------- 2023년 8월 1일 화요일 ---------------");
        assert_eq!(
            m,
            FormatMatch::DateHeader {
                date: DateFields { year: 2023, month: 8, day: 1 }
            }
        );
    }

    #[test]
    fn test_classify_no_match() {
        let set = dialects();
        assert_eq!(set.classify(""), FormatMatch::NoMatch);
        assert_eq!(set.classify("just a continuation line"), FormatMatch::NoMatch);
        assert_eq!(set.classify("저장한 날짜 : 2023-08-01 12:00"), FormatMatch::NoMatch);
        // Header without the closing rule
        assert_eq!(
            set.classify("--------------- 2023년 8월 1일 화요일"),
            FormatMatch::NoMatch
        );
    }

    #[test]
    fn test_unicode_digits_do_not_match() {
        let set = dialects();
        // Full-width digits
        assert_eq!(
            set.classify("２０２３. 8. 1. 오후 3:45, Alice : hi"),
            FormatMatch::NoMatch
        );
    }

    #[test]
    fn test_sender_split_is_greedy() {
        let set = dialects();
        match set.classify("2023. 8. 1. 오후 3:45, Alice : a : b") {
            FormatMatch::MobileA { sender, message, .. } => {
                assert_eq!(sender, "Alice : a");
                assert_eq!(message, "b");
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn test_to_24_hour_table() {
        assert_eq!(to_24_hour(Meridiem::Morning, 12), 0);
        assert_eq!(to_24_hour(Meridiem::Afternoon, 12), 12);
        for h in 1..12 {
            assert_eq!(to_24_hour(Meridiem::Morning, h), h);
            assert_eq!(to_24_hour(Meridiem::Afternoon, h), h + 12);
        }
    }

    #[test]
    fn test_clock_time_out_of_range() {
        let t = ClockTime { meridiem: Meridiem::Afternoon, hour: 13, minute: 0, second: 0 };
        assert!(t.to_time().is_none());
        let t = ClockTime { meridiem: Meridiem::Morning, hour: 9, minute: 75, second: 0 };
        assert!(t.to_time().is_none());
    }

    #[test]
    fn test_date_fields_invalid() {
        assert!(DateFields { year: 2023, month: 2, day: 30 }.to_date().is_none());
        assert!(DateFields { year: 2024, month: 2, day: 29 }.to_date().is_some());
    }

    #[test]
    fn test_custom_locale() {
        let locale = LocaleConfig::korean()
            .with_markers("AM", "PM")
            .with_header_rule("=====");
        let set = DialectSet::new(&locale).unwrap();
        assert_eq!(
            set.classify("[Alice] [PM 3:45] hi").dialect(),
            Some(Dialect::Desktop)
        );
        assert_eq!(set.classify("[Alice] [오후 3:45] hi"), FormatMatch::NoMatch);
        assert_eq!(
            set.classify("===== 2023년 8월 1일 화요일 =====").dialect(),
            Some(Dialect::DateHeader)
        );
    }

    #[test]
    fn test_invalid_locale_rejected() {
        let locale = LocaleConfig::korean().with_markers("", "오후");
        assert!(DialectSet::new(&locale).is_err());
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::MobileA.to_string(), "Mobile A");
        assert_eq!(Dialect::DateHeader.to_string(), "Date header");
    }
}
