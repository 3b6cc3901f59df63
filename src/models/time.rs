use chrono::{NaiveTime, Timelike};
use serde::*;

/// Wall-clock time of day, no date or timezone attached.
/// Slot boundaries are nominal local times ("09:15", "09:50:00").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime(NaiveTime);

impl WallTime {
    /// Parse "HH:MM:SS" or "HH:MM".
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self)
    }

    pub fn from_hms(hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, min, sec).map(Self)
    }

    /// Underlying chrono time.
    pub fn value(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// "HH:MM" form used for display.
    pub fn hhmm(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl std::fmt::Display for WallTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl From<NaiveTime> for WallTime {
    fn from(t: NaiveTime) -> Self {
        Self(t)
    }
}

// Stored form keeps seconds, matching the store's time columns.
impl Serialize for WallTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.format("%H:%M:%S").to_string())
    }
}

impl<'de> Deserialize<'de> for WallTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        WallTime::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::WallTime;

    #[test]
    fn test_parse_with_seconds() {
        let t = WallTime::parse("09:15:00").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 15);
    }

    #[test]
    fn test_parse_without_seconds() {
        let t = WallTime::parse("09:15").unwrap();
        assert_eq!(t, WallTime::from_hms(9, 15, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(WallTime::parse("25:00").is_err());
        assert!(WallTime::parse("9am").is_err());
        assert!(WallTime::parse("").is_err());
    }

    #[test]
    fn test_display_truncates_seconds() {
        let t = WallTime::parse("09:50:30").unwrap();
        assert_eq!(t.to_string(), "09:50");
        assert_eq!(t.hhmm(), "09:50");
    }

    #[test]
    fn test_ordering() {
        let early = WallTime::parse("08:00").unwrap();
        let late = WallTime::parse("13:45").unwrap();
        assert!(early < late);
        assert!(late > early);
    }

    #[test]
    fn test_equality_ignores_input_precision() {
        let a = WallTime::parse("10:30").unwrap();
        let b = WallTime::parse("10:30:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialize_keeps_seconds() {
        let t = WallTime::parse("09:15").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"09:15:00\"");
    }

    #[test]
    fn test_deserialize_both_precisions() {
        let a: WallTime = serde_json::from_str("\"11:00:00\"").unwrap();
        let b: WallTime = serde_json::from_str("\"11:00\"").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deserialize_invalid_fails() {
        let res: Result<WallTime, _> = serde_json::from_str("\"noon\"");
        assert!(res.is_err());
    }
}
