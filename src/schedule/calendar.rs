//! Month grid generation for the schedule view

use chrono::{Datelike, Duration, NaiveDate};

/// Number of cells in a rendered month: six full weeks.
pub const GRID_CELLS: usize = 42;

/// A single cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    /// The date this cell represents
    pub date: NaiveDate,

    /// Whether the date belongs to the viewed month
    pub in_month: bool,

    /// Whether the date is the current calendar day
    pub today: bool,

    /// Whether the date is the currently selected one
    pub selected: bool,

    /// Whether the cell may not be selected
    pub disabled: bool,
}

/// Produce the 6x7 grid of dates for the month containing `viewed`.
///
/// The grid starts on a Sunday: the first row is left-padded with trailing
/// days of the previous month (ascending), followed by every day of the
/// viewed month, followed by leading days of the next month up to exactly
/// [`GRID_CELLS`] entries. Pure and idempotent for the same inputs.
///
/// A cell is disabled when its date falls strictly before `today` or outside
/// the viewed month.
pub fn month_grid(
    viewed: NaiveDate,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Vec<CalendarCell> {
    let first = NaiveDate::from_ymd_opt(viewed.year(), viewed.month(), 1).unwrap_or(viewed);
    let lead = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(lead);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let in_month = date.year() == viewed.year() && date.month() == viewed.month();
            CalendarCell {
                date,
                in_month,
                today: date == today,
                selected: selected == Some(date),
                disabled: date < today || !in_month,
            }
        })
        .collect()
}

/// First day of the month `months` after (or, negative, before) `viewed`.
pub fn shift_month(viewed: NaiveDate, months: i32) -> NaiveDate {
    let total = viewed.year() * 12 + viewed.month0() as i32 + months;
    let (year, month0) = (total.div_euclid(12), total.rem_euclid(12));
    NaiveDate::from_ymd_opt(year, month0 as u32 + 1, 1).unwrap_or(viewed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_always_has_42_cells() {
        let today = date(2026, 8, 6);
        for month in 1..=12 {
            let grid = month_grid(date(2026, month, 1), today, None);
            assert_eq!(grid.len(), GRID_CELLS, "month {}", month);
        }
    }

    #[test]
    fn month_cells_are_ascending_and_marked() {
        let grid = month_grid(date(2026, 8, 15), date(2026, 8, 6), None);
        let in_month: Vec<_> = grid.iter().filter(|c| c.in_month).collect();
        assert_eq!(in_month.len(), 31);
        assert_eq!(in_month[0].date, date(2026, 8, 1));
        assert_eq!(in_month[30].date, date(2026, 8, 31));
        assert!(in_month.windows(2).all(|w| w[0].date < w[1].date));
        assert!(grid
            .iter()
            .filter(|c| !c.in_month)
            .all(|c| c.date.month() != 8));
    }

    #[test]
    fn sunday_start_has_no_leading_pad() {
        // June 2025 begins on a Sunday.
        let grid = month_grid(date(2025, 6, 1), date(2025, 6, 1), None);
        assert_eq!(grid[0].date, date(2025, 6, 1));
        assert!(grid[0].in_month);
    }

    #[test]
    fn saturday_start_31_day_month_fills_six_rows() {
        // August 2026 begins on a Saturday and has 31 days: 6 + 31 > 35.
        let grid = month_grid(date(2026, 8, 1), date(2026, 8, 1), None);
        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0].date, date(2026, 7, 26));
        assert_eq!(grid[6].date, date(2026, 8, 1));
        assert_eq!(grid[41].date, date(2026, 9, 5));
    }

    #[test]
    fn past_and_out_of_month_cells_are_disabled() {
        let grid = month_grid(date(2026, 8, 1), date(2026, 8, 6), None);
        for cell in &grid {
            if cell.date < date(2026, 8, 6) || !cell.in_month {
                assert!(cell.disabled, "{} should be disabled", cell.date);
            } else {
                assert!(!cell.disabled, "{} should be selectable", cell.date);
            }
        }
    }

    #[test]
    fn today_and_selection_flags() {
        let grid = month_grid(date(2026, 8, 1), date(2026, 8, 6), Some(date(2026, 8, 15)));
        let today: Vec<_> = grid.iter().filter(|c| c.today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2026, 8, 6));
        let selected: Vec<_> = grid.iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, date(2026, 8, 15));
    }

    #[test]
    fn grid_is_idempotent() {
        let a = month_grid(date(2026, 2, 10), date(2026, 8, 6), None);
        let b = month_grid(date(2026, 2, 10), date(2026, 8, 6), None);
        assert_eq!(a, b);
    }

    #[test]
    fn shift_month_crosses_year_boundaries() {
        assert_eq!(shift_month(date(2026, 12, 20), 1), date(2027, 1, 1));
        assert_eq!(shift_month(date(2026, 1, 20), -1), date(2025, 12, 1));
        assert_eq!(shift_month(date(2026, 8, 6), 0), date(2026, 8, 1));
    }
}
