use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPENDING_PCT: i32 = 50;
pub const DEFAULT_SAVING_PCT: i32 = 30;
pub const DEFAULT_INVESTING_PCT: i32 = 20;

/// Three-way division of monthly income into spending, saving and investing
/// buckets, in whole percentages.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSplit {
    pub spending: i32,
    pub saving: i32,
    pub investing: i32,
}

impl Default for AllocationSplit {
    fn default() -> Self {
        Self {
            spending: DEFAULT_SPENDING_PCT,
            saving: DEFAULT_SAVING_PCT,
            investing: DEFAULT_INVESTING_PCT,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Screen {
    Calculator,
    Onboarding,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketAmounts {
    pub spending: f64,
    pub saving: f64,
    pub investing: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    pub years: u32,
    pub invested: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmount {
    pub name: &'static str,
    pub pct: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub income: f64,
    pub split: AllocationSplit,
    pub amounts: BucketAmounts,
    pub days_in_month: u32,
    pub daily_spend_limit: f64,
    pub yearly_saving: f64,
    pub yearly_investing: f64,
    pub categories: Vec<CategoryAmount>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentOption {
    pub key: &'static str,
    pub name: &'static str,
    pub return_range: &'static str,
    pub annual_rate: f64,
    pub risk_level: RiskLevel,
    pub min_monthly: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAllocation {
    pub option: InvestmentOption,
    pub monthly_amount: f64,
    pub projection: [ProjectionRow; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlan {
    pub total_income: f64,
    pub investing_pct: i32,
    pub monthly_investment: f64,
    pub budget_set: bool,
    pub allocations: Vec<InvestmentAllocation>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UsageStatus {
    OnTrack,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub spent: f64,
    pub budget: f64,
    pub used_pct: f64,
    pub display_pct: f64,
    pub status: UsageStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub progress_pct: f64,
    pub display_pct: f64,
    pub met: bool,
    pub locked: bool,
    /// A locked goal can be unlocked only once it is met.
    pub can_unlock: bool,
    pub days_left: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseGroup {
    pub label: String,
    pub expenses: Vec<Expense>,
}

/// A wallet ledger entry as the backend returns it. `transaction_type` is kept
/// as the raw string so unknown kinds still round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub amount: f64,
    pub transaction_type: String,
    #[serde(default)]
    pub recipient_label: Option<String>,
    #[serde(default)]
    pub note: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Received,
    Sent,
    LockerTransfer,
    Other,
}

/// Display text for one transaction row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    pub kind: TransactionKind,
    pub label: String,
    pub sublabel: String,
    pub prefix: &'static str,
    pub badge: String,
    pub amount_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionGroup {
    pub label: String,
    pub transactions: Vec<Transaction>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PinStep {
    Enter,
    Confirm,
}
