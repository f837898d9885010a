//! Consecutive-day check-in streaks

use chrono::NaiveDate;

/// Length of the run of consecutive check-in days ending today or yesterday.
///
/// `dates` must be distinct and sorted most recent first. A streak whose last
/// day is yesterday is still alive; anything older counts as broken. Scanning
/// stops at the first gap.
pub fn compute_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some((&most_recent, older)) = dates.split_first() else {
        return 0;
    };

    if most_recent != today && Some(most_recent) != today.pred_opt() {
        return 0;
    }

    let mut streak = 1;
    let mut expected = most_recent.pred_opt();
    for &date in older {
        if Some(date) != expected {
            break;
        }
        streak += 1;
        expected = date.pred_opt();
    }

    streak
}
