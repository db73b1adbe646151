//! Tray clock and calendar formatting.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Taskbar tray label, e.g. `09:05 Mar 7`.
pub fn tray_label(now: NaiveDateTime) -> String {
    now.format("%H:%M %b %-d").to_string()
}

/// Calendar header, e.g. `Thursday, March 7, 2024`.
pub fn long_date(now: NaiveDateTime) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

pub fn long_time(now: NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

pub const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Sunday-first weeks of the month containing `date`. Days outside the
/// month are `None`.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let Some(first) = date.with_day(1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first);

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = lead;
    for day in 1..=days {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map(|next| (next - Duration::days(1)).day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, s).unwrap())
    }

    #[test]
    fn formats_tray_and_calendar_text() {
        let now = at(2024, 3, 7, 9, 5, 42);
        assert_eq!(tray_label(now), "09:05 Mar 7");
        assert_eq!(long_date(now), "Thursday, March 7, 2024");
        assert_eq!(long_time(now), "09:05:42");
        assert_eq!(month_title(now.date()), "March 2024");
    }

    #[test]
    fn grid_starts_on_sunday() {
        // March 1st 2024 is a Friday.
        let grid = month_grid(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0][5], Some(1));
        assert_eq!(grid[0][4], None);
        assert_eq!(grid[5][0], Some(31));
        assert_eq!(grid[5][1], None);
    }

    #[test]
    fn leap_february_has_29_days() {
        let grid = month_grid(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let days: Vec<u32> = grid.iter().flatten().flatten().copied().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.last(), Some(&29));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let grid = month_grid(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        let days: Vec<u32> = grid.iter().flatten().flatten().copied().collect();
        assert_eq!(days.len(), 31);
    }
}
