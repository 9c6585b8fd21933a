mod allocation;
mod budget;
mod format;
mod grouping;
mod investments;
mod projection;
mod tracking;
mod types;
mod wallet;

pub use allocation::{SliderBounds, SliderMoves, apply_slider_moves};
pub use budget::{SPENDING_CATEGORIES, build_budget, current_days_in_month, days_in_month};
pub use format::{format_inr, format_inr_paise};
pub use grouping::{group_expenses_by_date, group_transactions_by_date};
pub use investments::{INVESTMENT_OPTIONS, build_investment_plan, monthly_investment};
pub use projection::{PROJECTION_HORIZONS, future_value, project};
pub use tracking::{CRITICAL_USAGE_PCT, WARNING_USAGE_PCT, budget_usage, goal_progress};
pub use types::{
    AllocationSplit, BucketAmounts, BudgetBreakdown, BudgetUsage, CategoryAmount,
    DEFAULT_INVESTING_PCT, DEFAULT_SAVING_PCT, DEFAULT_SPENDING_PCT, Expense, ExpenseGroup,
    GoalProgress, InvestmentAllocation, InvestmentOption, InvestmentPlan, PinStep, ProjectionRow,
    RiskLevel, Screen, Transaction, TransactionGroup, TransactionKind, TransactionMeta,
    UsageStatus,
};
pub use wallet::{PIN_LENGTH, PIN_MISMATCH_MESSAGE, PinPad, PinSetup, describe_transaction};
