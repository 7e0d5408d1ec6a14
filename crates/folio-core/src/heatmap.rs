use chrono::{Datelike, Days, NaiveDate};
use folio_schema::{HeatmapCellView, HeatmapResponse, Tier, WeekStart};
use thiserror::Error;

pub const DAYS_PER_WEEK: u32 = 7;
pub const DEFAULT_WEEKS: u32 = 8;
pub const DEFAULT_SEED: u32 = 7;
/// One year of columns; anything wider is not a sensible widget.
pub const MAX_WEEKS: u32 = 53;

/// xorshift32 generator. Same seed, same sequence; a zero seed is remapped to 1
/// because zero is a fixed point of the shift.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Value in `[0, 1)` with three decimal digits of resolution.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32() % 1000) / 1000.0
    }
}

impl Iterator for SeededRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }
}

pub fn tier_for(intensity: f64) -> Tier {
    if intensity > 0.85 {
        Tier::Peak
    } else if intensity > 0.65 {
        Tier::High
    } else if intensity > 0.45 {
        Tier::Medium
    } else if intensity > 0.25 {
        Tier::Low
    } else {
        Tier::Idle
    }
}

/// Distance of `date` from the start of its week, `0..=6`.
pub fn weekday_offset(date: NaiveDate, start: WeekStart) -> u32 {
    match start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarCell {
    /// Column, 0 = oldest.
    pub week: u32,
    /// Row, 0 = first day of the configured week.
    pub weekday: u32,
    pub intensity: f64,
    pub date: NaiveDate,
}

impl CalendarCell {
    pub fn tier(&self) -> Tier {
        tier_for(self.intensity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapSpec {
    pub seed: u32,
    pub weeks: u32,
    pub start: WeekStart,
}

impl Default for HeatmapSpec {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            weeks: DEFAULT_WEEKS,
            start: WeekStart::Monday,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub spec: HeatmapSpec,
    pub anchor: NaiveDate,
    /// `weeks`, or `weeks + 1` when the window does not end on the last
    /// weekday and the oldest days spill into a partial leading column.
    pub columns: u32,
    /// Chronological, oldest first. The last cell is the anchor.
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeatmapError {
    #[error("weeks must be between 1 and {MAX_WEEKS}, got {0}")]
    InvalidWeeks(u32),
    #[error("date out of range: {days_back} days before {anchor}")]
    DateOutOfRange { anchor: NaiveDate, days_back: u32 },
}

/// Lays out the trailing `weeks * 7` days ending on `anchor` as a
/// column-per-week grid. A cell at `(column, row)` lies
/// `offset + (columns - 1 - column) * 7 - row` days before the anchor.
pub fn build_heatmap(spec: HeatmapSpec, anchor: NaiveDate) -> Result<Heatmap, HeatmapError> {
    if spec.weeks == 0 || spec.weeks > MAX_WEEKS {
        return Err(HeatmapError::InvalidWeeks(spec.weeks));
    }

    let offset = weekday_offset(anchor, spec.start);
    let columns = if offset == DAYS_PER_WEEK - 1 {
        spec.weeks
    } else {
        spec.weeks + 1
    };
    let total = spec.weeks * DAYS_PER_WEEK;

    let mut rng = SeededRng::new(spec.seed);
    let mut cells = Vec::with_capacity(total as usize);
    for days_back in (0..total).rev() {
        let date = anchor
            .checked_sub_days(Days::new(u64::from(days_back)))
            .ok_or(HeatmapError::DateOutOfRange { anchor, days_back })?;
        let position = (columns - 1) * DAYS_PER_WEEK + offset - days_back;
        cells.push(CalendarCell {
            week: position / DAYS_PER_WEEK,
            weekday: position % DAYS_PER_WEEK,
            intensity: rng.next_unit(),
            date,
        });
    }

    Ok(Heatmap {
        spec,
        anchor,
        columns,
        cells,
    })
}

impl Heatmap {
    pub fn newest(&self) -> Option<&CalendarCell> {
        self.cells.last()
    }

    pub fn to_response(&self) -> HeatmapResponse {
        HeatmapResponse {
            seed: self.spec.seed,
            weeks: self.spec.weeks,
            columns: self.columns,
            start: self.spec.start,
            cells: self
                .cells
                .iter()
                .map(|cell| HeatmapCellView {
                    week: cell.week,
                    weekday: cell.weekday,
                    intensity: cell.intensity,
                    tier: cell.tier(),
                    date: cell.date,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_seed_gives_fixed_sequence() {
        let seq: Vec<f64> = SeededRng::new(7).take(5).collect();
        assert_eq!(seq, vec![0.583, 0.255, 0.507, 0.445, 0.367]);

        let again: Vec<f64> = SeededRng::new(7).take(5).collect();
        assert_eq!(seq, again);
    }

    #[test]
    fn distinct_seeds_differ() {
        let a: Vec<u32> = {
            let mut rng = SeededRng::new(7);
            (0..8).map(|_| rng.next_u32()).collect()
        };
        let b: Vec<u32> = {
            let mut rng = SeededRng::new(8);
            (0..8).map(|_| rng.next_u32()).collect()
        };
        assert_ne!(a, b);
    }

    #[test]
    fn zero_seed_behaves_like_one() {
        let mut zero = SeededRng::new(0);
        let mut one = SeededRng::new(1);
        assert_eq!(zero.next_u32(), 270369);
        assert_eq!(one.next_u32(), 270369);
        assert_eq!(zero.next_unit(), one.next_unit());
    }

    #[test]
    fn output_stays_in_unit_interval() {
        for value in SeededRng::new(0xdead_beef).take(2000) {
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(tier_for(0.0), Tier::Idle);
        assert_eq!(tier_for(0.25), Tier::Idle);
        assert_eq!(tier_for(0.251), Tier::Low);
        assert_eq!(tier_for(0.45), Tier::Low);
        assert_eq!(tier_for(0.46), Tier::Medium);
        assert_eq!(tier_for(0.65), Tier::Medium);
        assert_eq!(tier_for(0.66), Tier::High);
        assert_eq!(tier_for(0.85), Tier::High);
        assert_eq!(tier_for(0.851), Tier::Peak);
        assert_eq!(tier_for(0.999), Tier::Peak);
    }

    #[test]
    fn tiers_are_monotonic() {
        let mut previous = Tier::Idle;
        for step in 0..1000 {
            let tier = tier_for(f64::from(step) / 1000.0);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn seed_seven_eight_weeks_ends_on_anchor() {
        // Wednesday.
        let anchor = date(2025, 10, 15);
        let map = build_heatmap(HeatmapSpec::default(), anchor).unwrap();

        assert_eq!(map.cells.len(), 56);
        assert_eq!(map.columns, 9);
        let newest = map.newest().unwrap();
        assert_eq!(newest.date, anchor);
        assert_eq!((newest.week, newest.weekday), (8, 2));
        assert!(map.cells.iter().all(|c| c.date <= anchor));
        assert_eq!(map.cells[0].date, date(2025, 8, 21));
        assert_eq!(map.cells[0].intensity, 0.583);
    }

    #[test]
    fn cells_follow_anchored_formula() {
        let anchor = date(2025, 10, 15);
        for start in [WeekStart::Monday, WeekStart::Sunday] {
            let spec = HeatmapSpec {
                seed: 3,
                weeks: 5,
                start,
            };
            let map = build_heatmap(spec, anchor).unwrap();
            let offset = weekday_offset(anchor, start);
            for cell in &map.cells {
                let days_back = offset + (map.columns - 1 - cell.week) * 7 - cell.weekday;
                assert_eq!(anchor - cell.date, chrono::Duration::days(i64::from(days_back)));
                assert_eq!(weekday_offset(cell.date, start), cell.weekday);
            }
        }
    }

    #[test]
    fn window_ending_on_last_weekday_fills_exact_columns() {
        // Sunday closes a Monday-start week.
        let anchor = date(2025, 10, 19);
        let map = build_heatmap(HeatmapSpec::default(), anchor).unwrap();
        assert_eq!(map.columns, 8);
        assert_eq!((map.cells[0].week, map.cells[0].weekday), (0, 0));
        assert_eq!(map.cells[0].date, date(2025, 8, 25));
        let newest = map.newest().unwrap();
        assert_eq!((newest.week, newest.weekday), (7, 6));
    }

    #[test]
    fn sunday_start_rows() {
        // Saturday closes a Sunday-start week.
        let anchor = date(2025, 10, 18);
        let spec = HeatmapSpec {
            start: WeekStart::Sunday,
            ..HeatmapSpec::default()
        };
        let map = build_heatmap(spec, anchor).unwrap();
        assert_eq!(map.columns, 8);
        assert_eq!(map.newest().unwrap().weekday, 6);
        assert_eq!(map.cells[0].date.weekday(), chrono::Weekday::Sun);
    }

    #[test]
    fn dates_cross_month_and_year_boundaries() {
        let anchor = date(2025, 1, 2);
        let map = build_heatmap(
            HeatmapSpec {
                seed: 1,
                weeks: 2,
                start: WeekStart::Monday,
            },
            anchor,
        )
        .unwrap();
        let dates: Vec<NaiveDate> = map.cells.iter().map(|c| c.date).collect();
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], date(2024, 12, 20));
        assert!(dates.windows(2).all(|w| w[1] - w[0] == chrono::Duration::days(1)));
    }

    #[test]
    fn rejects_invalid_weeks() {
        let anchor = date(2025, 10, 15);
        for weeks in [0, MAX_WEEKS + 1] {
            let spec = HeatmapSpec {
                weeks,
                ..HeatmapSpec::default()
            };
            assert_eq!(
                build_heatmap(spec, anchor).unwrap_err(),
                HeatmapError::InvalidWeeks(weeks)
            );
        }
    }

    #[test]
    fn response_carries_tiers() {
        let map = build_heatmap(HeatmapSpec::default(), date(2025, 10, 15)).unwrap();
        let resp = map.to_response();
        assert_eq!(resp.cells.len(), 56);
        assert_eq!(resp.columns, 9);
        assert_eq!(resp.cells[0].tier, Tier::Medium);
        assert_eq!(resp.cells[1].tier, Tier::Low);
    }
}
