use crate::utils::error::{DashboardError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 儀表板的錨點日期，接受已解析的日期或 `YYYY-MM-DD` 字串
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Date(NaiveDate),
    Text(String),
}

impl Anchor {
    /// 解析錨點，失敗時回傳 `InvalidDate`，不會碰任何資料來源
    pub fn resolve(&self) -> Result<NaiveDate> {
        match self {
            Anchor::Date(date) => Ok(*date),
            Anchor::Text(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
                DashboardError::InvalidDate {
                    value: text.clone(),
                }
            }),
        }
    }
}

impl From<NaiveDate> for Anchor {
    fn from(date: NaiveDate) -> Self {
        Anchor::Date(date)
    }
}

impl From<&str> for Anchor {
    fn from(text: &str) -> Self {
        Anchor::Text(text.to_string())
    }
}

impl From<String> for Anchor {
    fn from(text: String) -> Self {
        Anchor::Text(text)
    }
}

/// 統計粒度，決定時間窗、分桶方式與是否納入天氣分布
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    /// 由錨點日期解析出含首尾兩端的時間窗
    pub fn window_for(self, anchor: NaiveDate) -> DateWindow {
        match self {
            Granularity::Day => DateWindow::new(anchor, anchor),
            Granularity::Week => {
                let start = start_of_week(anchor);
                DateWindow::new(start, start + Duration::days(6))
            }
            Granularity::Month => month_window(anchor),
        }
    }

    pub fn bucket_kind(self) -> BucketKind {
        match self {
            Granularity::Day => BucketKind::Hourly,
            Granularity::Week => BucketKind::Daily,
            Granularity::Month => BucketKind::Weekly,
        }
    }

    /// 天氣分布只在週與月的儀表板出現
    pub fn includes_weather(self) -> bool {
        !matches!(self, Granularity::Day)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl FromStr for Granularity {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(DashboardError::UnsupportedGranularity {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 含首尾兩端的日期區間，start <= end 恆成立
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

/// 銷售走勢的分桶方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Hourly,
    Daily,
    Weekly,
}

/// 週一為一週的起點
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn month_window(anchor: NaiveDate) -> DateWindow {
    let start = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1).unwrap_or(anchor);
    let next_month_first = if anchor.month() == 12 {
        NaiveDate::from_ymd_opt(anchor.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(anchor.year(), anchor.month() + 1, 1)
    };
    let end = next_month_first
        .map(|d| d - Duration::days(1))
        .unwrap_or(anchor);
    DateWindow::new(start, end)
}

/// 把時間窗切成對齊週一的片段，首段可能不足一週
pub fn week_segments(window: DateWindow) -> Vec<DateWindow> {
    let mut segments = Vec::new();
    let mut cursor = window.start;
    while cursor <= window.end {
        let week_end = start_of_week(cursor) + Duration::days(6);
        let end = week_end.min(window.end);
        segments.push(DateWindow::new(cursor, end));
        cursor = end + Duration::days(1);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_window_collapses_to_anchor() {
        let window = Granularity::Day.window_for(date(2024, 3, 15));
        assert_eq!(window.start, date(2024, 3, 15));
        assert_eq!(window.end, date(2024, 3, 15));
        assert_eq!(window.num_days(), 1);
    }

    #[test]
    fn test_week_window_is_monday_to_sunday() {
        // 2024-03-15 是星期五
        let window = Granularity::Week.window_for(date(2024, 3, 15));
        assert_eq!(window.start, date(2024, 3, 11));
        assert_eq!(window.end, date(2024, 3, 17));
        assert_eq!(window.num_days(), 7);
    }

    #[test]
    fn test_week_window_monday_anchor_stays_put() {
        let window = Granularity::Week.window_for(date(2024, 3, 11));
        assert_eq!(window.start, date(2024, 3, 11));
        assert_eq!(window.end, date(2024, 3, 17));
    }

    #[test]
    fn test_week_window_crosses_month_boundary() {
        // 2024-04-01 是星期一，2024-03-31 是星期日
        let window = Granularity::Week.window_for(date(2024, 3, 31));
        assert_eq!(window.start, date(2024, 3, 25));
        assert_eq!(window.end, date(2024, 3, 31));

        let window = Granularity::Week.window_for(date(2024, 1, 1));
        assert_eq!(window.start, date(2024, 1, 1));
        assert_eq!(window.end, date(2024, 1, 7));
    }

    #[test]
    fn test_month_window_covers_whole_month() {
        let window = Granularity::Month.window_for(date(2024, 3, 15));
        assert_eq!(window.start, date(2024, 3, 1));
        assert_eq!(window.end, date(2024, 3, 31));
        assert_eq!(window.num_days(), 31);
    }

    #[test]
    fn test_month_window_leap_february() {
        let window = Granularity::Month.window_for(date(2024, 2, 10));
        assert_eq!(window.end, date(2024, 2, 29));

        let window = Granularity::Month.window_for(date(2023, 2, 10));
        assert_eq!(window.end, date(2023, 2, 28));
    }

    #[test]
    fn test_month_window_december_rolls_to_next_year() {
        let window = Granularity::Month.window_for(date(2024, 12, 25));
        assert_eq!(window.start, date(2024, 12, 1));
        assert_eq!(window.end, date(2024, 12, 31));
    }

    #[test]
    fn test_anchor_parses_iso_date() {
        let anchor = Anchor::from("2024-03-15");
        assert_eq!(anchor.resolve().unwrap(), date(2024, 3, 15));

        let anchor = Anchor::from(date(2024, 3, 15));
        assert_eq!(anchor.resolve().unwrap(), date(2024, 3, 15));
    }

    #[test]
    fn test_anchor_rejects_malformed_text() {
        for bad in ["not-a-date", "2024-13-01", "2024-02-30", "15/03/2024", ""] {
            let err = Anchor::from(bad).resolve().unwrap_err();
            match err {
                DashboardError::InvalidDate { value } => assert_eq!(value, bad),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!("Week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!(" month ".parse::<Granularity>().unwrap(), Granularity::Month);
        assert!("quarter".parse::<Granularity>().is_err());
        assert!("".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_weather_only_for_week_and_month() {
        assert!(!Granularity::Day.includes_weather());
        assert!(Granularity::Week.includes_weather());
        assert!(Granularity::Month.includes_weather());
    }

    #[test]
    fn test_bucket_kind_per_granularity() {
        assert_eq!(Granularity::Day.bucket_kind(), BucketKind::Hourly);
        assert_eq!(Granularity::Week.bucket_kind(), BucketKind::Daily);
        assert_eq!(Granularity::Month.bucket_kind(), BucketKind::Weekly);
    }

    #[test]
    fn test_week_segments_for_march_2024() {
        let window = Granularity::Month.window_for(date(2024, 3, 15));
        let segments = week_segments(window);

        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], DateWindow::new(date(2024, 3, 1), date(2024, 3, 3)));
        assert_eq!(segments[1], DateWindow::new(date(2024, 3, 4), date(2024, 3, 10)));
        assert_eq!(segments[4], DateWindow::new(date(2024, 3, 25), date(2024, 3, 31)));
    }

    #[test]
    fn test_week_segments_cover_window_without_gaps() {
        let window = Granularity::Month.window_for(date(2024, 7, 4));
        let segments = week_segments(window);

        let mut expected = window.start;
        for segment in &segments {
            assert_eq!(segment.start, expected);
            assert!(segment.end >= segment.start);
            expected = segment.end + Duration::days(1);
        }
        assert_eq!(expected, window.end + Duration::days(1));
    }

    #[test]
    fn test_window_contains_and_dates() {
        let window = DateWindow::new(date(2024, 3, 11), date(2024, 3, 17));
        assert!(window.contains(date(2024, 3, 11)));
        assert!(window.contains(date(2024, 3, 17)));
        assert!(!window.contains(date(2024, 3, 10)));
        assert!(!window.contains(date(2024, 3, 18)));

        let dates: Vec<NaiveDate> = window.dates().collect();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], date(2024, 3, 11));
        assert_eq!(dates[6], date(2024, 3, 17));
    }
}
