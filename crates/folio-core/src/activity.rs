use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, Utc};
use folio_provider::{GithubClient, GithubEvent, UpstreamError};

pub const ACTIVITY_WINDOW_DAYS: u64 = 30;

/// Zero-filled `date -> count` map covering the 30 days ending on `today`.
pub fn empty_window(today: NaiveDate) -> BTreeMap<NaiveDate, u32> {
    (0..ACTIVITY_WINDOW_DAYS)
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| (day, 0))
        .collect()
}

/// Counts events by the date prefix of `created_at`. Events outside the
/// window or with an unparseable date are ignored.
pub fn count_events(events: &[GithubEvent], today: NaiveDate) -> BTreeMap<NaiveDate, u32> {
    let mut days = empty_window(today);
    for event in events {
        let Some(day) = event
            .day()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        else {
            continue;
        };
        if let Some(count) = days.get_mut(&day) {
            *count += 1;
        }
    }
    days
}

/// Fetches the public events of `user` and aggregates them over the last
/// 30 UTC days.
pub async fn fetch_activity(
    github: &GithubClient,
    user: &str,
) -> Result<BTreeMap<NaiveDate, u32>, UpstreamError> {
    let events = github.public_events(user).await?;
    tracing::debug!("Fetched {} public events for {user}", events.len());
    Ok(count_events(&events, Utc::now().date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(created_at: &str) -> GithubEvent {
        serde_json::from_value(serde_json::json!({
            "type": "PushEvent",
            "created_at": created_at
        }))
        .unwrap()
    }

    #[test]
    fn window_has_thirty_zeroed_days() {
        let days = empty_window(date(2025, 3, 1));
        assert_eq!(days.len(), 30);
        assert!(days.values().all(|&c| c == 0));
        assert_eq!(days.keys().next(), Some(&date(2025, 1, 31)));
        assert_eq!(days.keys().last(), Some(&date(2025, 3, 1)));
    }

    #[test]
    fn counts_only_events_inside_window() {
        let today = date(2025, 10, 15);
        let events = vec![
            event("2025-10-15T23:59:00Z"),
            event("2025-10-15T01:00:00Z"),
            event("2025-09-16T12:00:00Z"),
            event("2025-09-15T12:00:00Z"),
            event("2025-10-16T00:00:00Z"),
            event("garbage"),
        ];
        let days = count_events(&events, today);
        assert_eq!(days.len(), 30);
        assert_eq!(days[&date(2025, 10, 15)], 2);
        assert_eq!(days[&date(2025, 9, 16)], 1);
        assert!(!days.contains_key(&date(2025, 9, 15)));
        assert_eq!(days.values().sum::<u32>(), 3);
    }
}
