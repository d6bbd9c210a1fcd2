//! Timestamp formats used by the two note dialects

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Length of `YYYY-MM-DDTHH:MM:SS`, the part of a dump timestamp before the zone
const DUMP_DATETIME_LEN: usize = 19;

/// The date layout a dialect writes its timestamps in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2015-01-01 00:00:00 UTC`: space separated, trailing zone token
    Api,
    /// `2015-01-01T00:00:00Z`: ISO-8601, `Z` or a colon-less numeric offset
    Dump,
}

impl TimestampFormat {
    /// Parse a timestamp, normalized to UTC.
    ///
    /// Returns a description of the problem on mismatch; callers decide whether
    /// that is fatal.
    pub fn parse(&self, input: &str) -> Result<DateTime<Utc>, String> {
        let trimmed = input.trim();
        let (naive, offset) = match self {
            TimestampFormat::Api => {
                let (datetime, zone) = trimmed
                    .rsplit_once(' ')
                    .ok_or_else(|| format!("missing time zone in '{}'", input))?;
                let naive = NaiveDateTime::parse_from_str(datetime.trim_end(), "%Y-%m-%d %H:%M:%S")
                    .map_err(|e| format!("invalid date '{}': {}", input, e))?;
                let offset = parse_zone(zone, true)
                    .ok_or_else(|| format!("unknown time zone '{}' in '{}'", zone, input))?;
                (naive, offset)
            }
            TimestampFormat::Dump => {
                let datetime = trimmed
                    .get(..DUMP_DATETIME_LEN)
                    .ok_or_else(|| format!("truncated date '{}'", input))?;
                let zone = &trimmed[DUMP_DATETIME_LEN..];
                let naive = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S")
                    .map_err(|e| format!("invalid date '{}': {}", input, e))?;
                let offset = parse_zone(zone, false)
                    .ok_or_else(|| format!("invalid zone designator '{}' in '{}'", zone, input))?;
                (naive, offset)
            }
        };

        offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| format!("ambiguous local time '{}'", input))
    }
}

/// Zone abbreviations the API dialect understands, with their offset in minutes
const ZONE_NAMES: &[(&str, i32)] = &[
    ("UTC", 0),
    ("UT", 0),
    ("GMT", 0),
    ("WET", 0),
    ("WEST", 60),
    ("BST", 60),
    ("CET", 60),
    ("CEST", 120),
    ("EET", 120),
    ("EEST", 180),
    ("MSK", 180),
    ("IST", 330),
    ("JST", 540),
    ("AEST", 600),
    ("AEDT", 660),
    ("NZST", 720),
    ("NZDT", 780),
    ("AST", -240),
    ("EST", -300),
    ("EDT", -240),
    ("CST", -360),
    ("CDT", -300),
    ("MST", -420),
    ("MDT", -360),
    ("PST", -480),
    ("PDT", -420),
    ("AKST", -540),
    ("AKDT", -480),
    ("HST", -600),
];

/// Parse `Z`, `±hh` or `±hhmm`; zone names are accepted only when `allow_names`
fn parse_zone(zone: &str, allow_names: bool) -> Option<FixedOffset> {
    if zone == "Z" {
        return FixedOffset::east_opt(0);
    }
    if allow_names {
        if let Some((_, minutes)) = ZONE_NAMES.iter().find(|(name, _)| *name == zone) {
            return FixedOffset::east_opt(minutes * 60);
        }
    }

    let sign = match zone.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = &zone[1..];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes): (i32, i32) = match digits.len() {
        2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
