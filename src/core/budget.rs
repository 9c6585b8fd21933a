use chrono::{Datelike, NaiveDate};

use super::types::{AllocationSplit, BudgetBreakdown, CategoryAmount};

/// Recommended division of the spending bucket.
pub const SPENDING_CATEGORIES: [(&str, u32); 4] = [
    ("Food & Groceries", 40),
    ("Transport", 25),
    ("Education & Books", 20),
    ("Entertainment", 15),
];

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

pub fn current_days_in_month() -> u32 {
    days_in_month(chrono::Local::now().date_naive())
}

/// Monthly plan for `income` under `split`. Income that is not a positive
/// finite number is treated as zero.
pub fn build_budget(income: f64, split: AllocationSplit, days_in_month: u32) -> BudgetBreakdown {
    let income = if income.is_finite() && income > 0.0 {
        income
    } else {
        0.0
    };
    let amounts = split.amounts(income);
    let daily_spend_limit = if days_in_month == 0 {
        0.0
    } else {
        amounts.spending / f64::from(days_in_month)
    };

    let categories = SPENDING_CATEGORIES
        .iter()
        .map(|&(name, pct)| CategoryAmount {
            name,
            pct,
            amount: amounts.spending * f64::from(pct) / 100.0,
        })
        .collect();

    BudgetBreakdown {
        income,
        split,
        amounts,
        days_in_month,
        daily_spend_limit,
        yearly_saving: amounts.saving * 12.0,
        yearly_investing: amounts.investing * 12.0,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn days_in_month_handles_leap_years_and_december() {
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2025, 2, 1)), 28);
        assert_eq!(days_in_month(date(2025, 4, 30)), 30);
        assert_eq!(days_in_month(date(2025, 12, 31)), 31);
    }

    #[test]
    fn category_percentages_sum_to_one_hundred() {
        let total: u32 = SPENDING_CATEGORIES.iter().map(|(_, pct)| pct).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn budget_for_default_split() {
        let budget = build_budget(10_000.0, AllocationSplit::default(), 30);
        assert_approx(budget.amounts.spending, 5_000.0);
        assert_approx(budget.daily_spend_limit, 5_000.0 / 30.0);
        assert_approx(budget.yearly_saving, 36_000.0);
        assert_approx(budget.yearly_investing, 24_000.0);

        let food = &budget.categories[0];
        assert_eq!(food.name, "Food & Groceries");
        assert_approx(food.amount, 2_000.0);
        let spent: f64 = budget.categories.iter().map(|c| c.amount).sum();
        assert_approx(spent, budget.amounts.spending);
    }

    #[test]
    fn invalid_income_yields_zero_budget() {
        for income in [-500.0, f64::NAN, f64::INFINITY] {
            let budget = build_budget(income, AllocationSplit::default(), 31);
            assert_eq!(budget.income, 0.0);
            assert_eq!(budget.daily_spend_limit, 0.0);
            assert!(budget.categories.iter().all(|c| c.amount == 0.0));
        }
    }

    #[test]
    fn zero_days_does_not_divide() {
        let budget = build_budget(1_000.0, AllocationSplit::default(), 0);
        assert_eq!(budget.daily_spend_limit, 0.0);
    }
}
