//! Weekly activity series for the personal progress screen.

use chrono::{Days, NaiveDate};

use crate::format;
use crate::models::{CompletedWorkout, DailyStats};

/// Completed workouts shown in the history list.
pub const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DayPoint {
    /// Short weekday, e.g. "Mon".
    pub label: String,
    pub date: NaiveDate,
    pub workouts: i64,
    pub calories: f64,
}

/// The seven days ending with `today`, oldest first.
pub fn last_seven_days(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7u64)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .collect()
}

/// One point per day of the last week. Days the server did not report are
/// zero. An empty server series yields no points at all.
pub fn weekly_series(today: NaiveDate, stats: &[DailyStats]) -> Vec<DayPoint> {
    if stats.is_empty() {
        return Vec::new();
    }

    last_seven_days(today)
        .into_iter()
        .map(|date| {
            let reported = stats
                .iter()
                .find(|s| format::parse_date(&s.date) == Some(date));
            DayPoint {
                label: date.format("%a").to_string(),
                date,
                workouts: reported.map(|s| s.workouts_completed).unwrap_or(0),
                calories: reported.map(|s| s.calories_burned).unwrap_or(0.0),
            }
        })
        .collect()
}

/// "25 Apr - 1 May" for the days the chart covers; nothing when the chart
/// has no points.
pub fn date_range(points: &[DayPoint]) -> Option<String> {
    let (first, last) = (points.first()?, points.last()?);
    Some(format!(
        "{} - {}",
        first.date.format("%-d %b"),
        last.date.format("%-d %b")
    ))
}

/// Bar height in percent of the tallest value.
pub fn scale(value: f64, max: f64) -> u8 {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    (value.min(max) / max * 100.0).round() as u8
}

pub fn recent_history(completed: &[CompletedWorkout]) -> Vec<CompletedWorkout> {
    completed.iter().take(HISTORY_LIMIT).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, workouts: i64, calories: f64) -> DailyStats {
        DailyStats {
            day_of_week: String::new(),
            date: date.to_string(),
            calories_burned: calories,
            workouts_completed: workouts,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_seven_days_ends_today() {
        let days = last_seven_days(ymd(2025, 3, 2));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], ymd(2025, 2, 24));
        assert_eq!(days[6], ymd(2025, 3, 2));
    }

    #[test]
    fn test_weekly_series_zero_fills_missing_days() {
        let today = ymd(2025, 5, 4);
        let stats = vec![
            day("2025-05-04T00:00:00", 2, 450.0),
            day("2025-05-01", 1, 200.0),
            day("2025-04-01", 9, 999.0),
        ];
        let series = weekly_series(today, &stats);
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].workouts, 2);
        assert_eq!(series[6].calories, 450.0);
        assert_eq!(series[6].label, "Sun");
        assert_eq!(series[3].date, ymd(2025, 5, 1));
        assert_eq!(series[3].workouts, 1);
        assert_eq!(series.iter().map(|p| p.workouts).sum::<i64>(), 3);
    }

    #[test]
    fn test_weekly_series_empty_without_data() {
        assert!(weekly_series(ymd(2025, 5, 4), &[]).is_empty());
    }

    #[test]
    fn test_date_range() {
        let points = weekly_series(ymd(2025, 5, 1), &[day("2025-04-30", 1, 200.0)]);
        assert_eq!(date_range(&points).as_deref(), Some("25 Apr - 1 May"));
    }

    #[test]
    fn test_date_range_hidden_without_data() {
        let points = weekly_series(ymd(2025, 5, 1), &[]);
        assert_eq!(date_range(&points), None);
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(50.0, 200.0), 25);
        assert_eq!(scale(3.0, 0.0), 0);
        assert_eq!(scale(200.0, 200.0), 100);
    }

    #[test]
    fn test_recent_history_limit() {
        let completed: Vec<_> = (0..8)
            .map(|i| CompletedWorkout {
                assignment_id: i,
                ..Default::default()
            })
            .collect();
        let recent = recent_history(&completed);
        assert_eq!(recent.len(), HISTORY_LIMIT);
        assert_eq!(recent[0].assignment_id, 0);
    }
}
