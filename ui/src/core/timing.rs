//! Load timestamps shown on panels.

use time::{macros::format_description, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadStamp {
    pub at: OffsetDateTime,
}

impl LoadStamp {
    pub fn now() -> Self {
        Self {
            at: OffsetDateTime::now_utc(),
        }
    }

    /// `14:05:09 UTC`
    pub fn badge(&self) -> String {
        self.at
            .format(&format_description!("[hour]:[minute]:[second] UTC"))
            .unwrap_or_else(|_| "—".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn badge_is_utc_clock_time() {
        let stamp = LoadStamp {
            at: datetime!(2024-03-01 09:07:05 UTC),
        };
        assert_eq!(stamp.badge(), "09:07:05 UTC");
    }
}
