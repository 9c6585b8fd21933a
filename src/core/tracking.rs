use chrono::NaiveDateTime;

use super::types::{BudgetUsage, GoalProgress, UsageStatus};

pub const WARNING_USAGE_PCT: f64 = 75.0;
pub const CRITICAL_USAGE_PCT: f64 = 95.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn budget_usage(spent: f64, budget: f64) -> BudgetUsage {
    let used_pct = if budget > 0.0 {
        spent / budget * 100.0
    } else {
        0.0
    };
    let status = if used_pct >= CRITICAL_USAGE_PCT {
        UsageStatus::Critical
    } else if used_pct >= WARNING_USAGE_PCT {
        UsageStatus::Warning
    } else {
        UsageStatus::OnTrack
    };

    BudgetUsage {
        spent,
        budget,
        used_pct,
        display_pct: used_pct.min(100.0),
        status,
    }
}

/// Progress of a savings goal. `days_left` is rounded up and goes negative
/// once the deadline has passed.
pub fn goal_progress(
    current: f64,
    target: f64,
    locked: bool,
    deadline: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> GoalProgress {
    let progress_pct = if target > 0.0 {
        current / target * 100.0
    } else {
        0.0
    };
    let days_left = deadline.map(|deadline| {
        let millis = (deadline - now).num_milliseconds() as f64;
        (millis / MILLIS_PER_DAY).ceil() as i64
    });

    let met = current >= target;

    GoalProgress {
        progress_pct,
        display_pct: progress_pct.min(100.0),
        met,
        locked,
        can_unlock: locked && met,
        days_left,
    }
}
