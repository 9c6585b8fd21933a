use super::projection::project;
use super::types::{InvestmentAllocation, InvestmentOption, InvestmentPlan, RiskLevel};

/// Low-risk instruments offered to students, with the share of the monthly
/// investment budget routed to each.
pub const INVESTMENT_OPTIONS: [InvestmentOption; 3] = [
    InvestmentOption {
        key: "rd",
        name: "Recurring Deposit (RD)",
        return_range: "6–7%",
        annual_rate: 6.5,
        risk_level: RiskLevel::VeryLow,
        min_monthly: 500.0,
        share: 0.5,
    },
    InvestmentOption {
        key: "ppf",
        name: "Public Provident Fund (PPF)",
        return_range: "7–8%",
        annual_rate: 7.1,
        risk_level: RiskLevel::VeryLow,
        min_monthly: 500.0,
        share: 0.3,
    },
    InvestmentOption {
        key: "index",
        name: "Index Fund SIP",
        return_range: "10–12%",
        annual_rate: 11.0,
        risk_level: RiskLevel::Low,
        min_monthly: 100.0,
        share: 0.2,
    },
];

pub fn monthly_investment(total_income: f64, investing_pct: i32) -> f64 {
    total_income * f64::from(investing_pct) / 100.0
}

pub fn build_investment_plan(total_income: f64, investing_pct: i32) -> InvestmentPlan {
    let monthly = monthly_investment(total_income, investing_pct);
    let budget_set = monthly > 0.0;

    let allocations = if budget_set {
        INVESTMENT_OPTIONS
            .iter()
            .map(|option| {
                let monthly_amount = monthly * option.share;
                InvestmentAllocation {
                    option: *option,
                    monthly_amount,
                    projection: project(monthly_amount, option.annual_rate),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    InvestmentPlan {
        total_income,
        investing_pct,
        monthly_investment: monthly,
        budget_set,
        allocations,
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

    #[test]
    fn option_shares_cover_the_whole_budget() {
        let total: f64 = INVESTMENT_OPTIONS.iter().map(|o| o.share).sum();
        assert_approx(total, 1.0);
    }

    #[test]
    fn plan_splits_monthly_investment_across_options() {
        let plan = build_investment_plan(10_000.0, 20);
        assert!(plan.budget_set);
        assert_approx(plan.monthly_investment, 2_000.0);

        let amounts: Vec<f64> = plan.allocations.iter().map(|a| a.monthly_amount).collect();
        assert_eq!(amounts.len(), 3);
        assert_approx(amounts[0], 1_000.0);
        assert_approx(amounts[1], 600.0);
        assert_approx(amounts[2], 400.0);
    }

    #[test]
    fn plan_projects_each_option_at_its_own_rate() {
        let plan = build_investment_plan(10_000.0, 20);
        let index = &plan.allocations[2];
        assert_eq!(index.option.key, "index");
        assert_eq!(index.projection, project(index.monthly_amount, 11.0));
        assert_approx(index.projection[2].invested, 24_000.0);
    }

    #[test]
    fn zero_investing_share_has_no_allocations() {
        let plan = build_investment_plan(10_000.0, 0);
        assert!(!plan.budget_set);
        assert!(plan.allocations.is_empty());
        assert_eq!(plan.monthly_investment, 0.0);
    }
}
