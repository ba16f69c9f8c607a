//! Day grouping for the activity timeline.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use super::CareActivity;

/// Activities sharing one UTC calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// "Today", "Yesterday" or the ISO date.
    pub label: String,
    pub activities: Vec<CareActivity>,
}

/// Group activities by the calendar day they started on.
///
/// Groups appear in order of first occurrence and keep the input order
/// inside each group, so newest-first input yields a newest-first timeline.
pub fn group_by_day(activities: &[CareActivity], now: DateTime<Utc>) -> Vec<DayGroup> {
    let today = now.date_naive();
    let yesterday = today.checked_sub_days(Days::new(1));

    let mut groups: Vec<DayGroup> = Vec::new();
    for activity in activities {
        let date = activity.start_time.date_naive();
        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.activities.push(activity.clone()),
            None => groups.push(DayGroup {
                date,
                label: day_label(date, today, yesterday),
                activities: vec![activity.clone()],
            }),
        }
    }
    groups
}

fn day_label(date: NaiveDate, today: NaiveDate, yesterday: Option<NaiveDate>) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == yesterday {
        "Yesterday".to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}
