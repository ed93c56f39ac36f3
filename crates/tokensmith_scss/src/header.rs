//! Generated-file header

use chrono::{DateTime, FixedOffset, Offset, Utc};

const DO_NOT_EDIT: &str = "Do not edit directly, this file was auto-generated.";

const SECONDS_PER_HOUR: i32 = 60 * 60;

/// Comment block placed at the top of every generated file
#[derive(Clone, Debug)]
pub struct FileHeader {
    offset: FixedOffset,
    created_at: Option<DateTime<Utc>>,
}

impl FileHeader {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            created_at: None,
        }
    }

    /// Header with timestamps at `hours` east of UTC; `None` when out of range
    pub fn with_utc_offset_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * SECONDS_PER_HOUR).map(Self::new)
    }

    /// Korea Standard Time (UTC+9)
    pub fn kst() -> Self {
        Self::with_utc_offset_hours(9).unwrap_or_else(|| Self::new(Utc.fix()))
    }

    /// Pin the timestamp instead of reading the clock at render time
    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn render(&self) -> String {
        let created = self
            .created_at
            .unwrap_or_else(Utc::now)
            .with_timezone(&self.offset)
            .format("%Y-%m-%d %H:%M:%S %:z");

        format!("/**\n * created at {created}\n * {}\n */\n\n", DO_NOT_EDIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_in_configured_offset() {
        let at = Utc.with_ymd_and_hms(2024, 5, 3, 18, 30, 0).unwrap();
        let header = FileHeader::kst().at(at).render();
        assert_eq!(
            header,
            "/**\n * created at 2024-05-04 03:30:00 +09:00\n * Do not edit directly, this file was auto-generated.\n */\n\n"
        );
    }

    #[test]
    fn utc_header() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let header = FileHeader::with_utc_offset_hours(0).unwrap().at(at).render();
        assert!(header.contains(" * created at 2024-01-01 00:00:00 +00:00\n"));
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(FileHeader::with_utc_offset_hours(30).is_none());
    }
}
