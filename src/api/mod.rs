use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

mod error;

pub use error::{CliError, InputError};
use error::{non_negative, rate_within, within};

use crate::core::{
    AllocationSplit, BudgetBreakdown, BudgetUsage, DEFAULT_INVESTING_PCT, Expense, ExpenseGroup,
    GoalProgress, InvestmentPlan, ProjectionRow, Screen, SliderBounds, SliderMoves, Transaction,
    TransactionMeta, apply_slider_moves, budget_usage, build_budget, build_investment_plan,
    current_days_in_month, describe_transaction, format_inr, goal_progress,
    group_expenses_by_date, group_transactions_by_date, monthly_investment, project,
};

pub const DEFAULT_PORT: u16 = 8080;
const DEFAULT_INCOME: f64 = 10_000.0;
const DEFAULT_ANNUAL_RATE: f64 = 0.0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiScreen {
    #[default]
    Calculator,
    #[serde(alias = "onboard")]
    #[value(alias = "onboard")]
    Onboarding,
}

impl From<ApiScreen> for Screen {
    fn from(value: ApiScreen) -> Self {
        match value {
            ApiScreen::Calculator => Screen::Calculator,
            ApiScreen::Onboarding => Screen::Onboarding,
        }
    }
}

#[derive(Args, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AllocationPayload {
    #[arg(long, help = "Spending share before the move, defaults to 50")]
    from_spending: Option<i64>,
    #[arg(long, help = "Saving share before the move, defaults to 30")]
    from_saving: Option<i64>,
    #[arg(long, help = "Investing share before the move, defaults to 20")]
    from_investing: Option<i64>,
    #[arg(long, help = "New spending slider position in percent")]
    spending: Option<i64>,
    #[arg(long, help = "New saving slider position in percent")]
    saving: Option<i64>,
    #[arg(long, help = "New investing slider position in percent")]
    investing: Option<i64>,
    #[arg(long, value_enum, help = "Screen whose slider bounds apply")]
    screen: Option<ApiScreen>,
}

#[derive(Args, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectionPayload {
    #[arg(long = "monthly", help = "Monthly contribution, defaults to 20% of 10000")]
    monthly_amount: Option<f64>,
    #[arg(long = "rate", help = "Expected annual return in percent, e.g. 7.1")]
    annual_rate: Option<f64>,
}

#[derive(Args, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetPayload {
    #[arg(long, help = "Monthly income, defaults to 10000")]
    income: Option<f64>,
    #[arg(long)]
    spending: Option<i64>,
    #[arg(long)]
    saving: Option<i64>,
    #[arg(long)]
    investing: Option<i64>,
    #[arg(long = "days", help = "Days in the month, defaults to the current month")]
    days_in_month: Option<i64>,
}

#[derive(Args, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestPayload {
    #[arg(long, help = "Total monthly income, defaults to 10000")]
    income: Option<f64>,
    #[arg(long = "investing", help = "Investing share of income in percent, defaults to 20")]
    investing_pct: Option<i64>,
}

#[derive(Args, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsagePayload {
    #[arg(long, help = "Amount spent so far this month")]
    spent: Option<f64>,
    #[arg(long, help = "Spending budget for the month")]
    budget: Option<f64>,
}

#[derive(Args, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalPayload {
    #[arg(long, help = "Amount saved towards the goal")]
    current: Option<f64>,
    #[arg(long, help = "Goal target amount")]
    target: Option<f64>,
    #[arg(long, help = "Goal deadline as YYYY-MM-DD")]
    deadline: Option<NaiveDate>,
    #[arg(long, help = "Savings stay locked until the goal is met")]
    locked: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GroupPayload {
    expenses: Vec<Expense>,
    today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TransactionsPayload {
    transactions: Vec<Transaction>,
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebalance the spending/saving/investing split after slider moves
    Split(AllocationPayload),
    /// Project growth of a monthly contribution at 1, 3 and 5 years
    Project(ProjectionPayload),
    /// Break monthly income down into buckets, daily limit and categories
    Budget(BudgetPayload),
    /// Spread the monthly investment budget over the suggested instruments
    Invest(InvestPayload),
    /// Report how much of the monthly spending budget is used
    Usage(UsagePayload),
    /// Report savings goal progress and days left
    Goal(GoalPayload),
    /// Serve the calculators as a JSON HTTP API
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
#[command(
    name = "pocketplan",
    about = "Student budget calculator: allocation split, growth projections and investment plans"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Print results as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllocationResponse {
    #[serde(flatten)]
    split: AllocationSplit,
    total: i32,
    balanced: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    monthly_amount: f64,
    annual_rate: f64,
    rows: [ProjectionRow; 3],
}

#[derive(Debug, Serialize)]
struct GroupResponse {
    groups: Vec<ExpenseGroup>,
}

#[derive(Debug, Serialize)]
struct TransactionEntry {
    #[serde(flatten)]
    transaction: Transaction,
    meta: TransactionMeta,
}

#[derive(Debug, Serialize)]
struct TransactionGroupResponse {
    label: String,
    transactions: Vec<TransactionEntry>,
}

#[derive(Debug, Serialize)]
struct TransactionsResponse {
    groups: Vec<TransactionGroupResponse>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn percent(flag: &'static str, value: Option<i64>) -> Result<Option<i32>, InputError> {
    value
        .map(|v| within(flag, v, 0, 100).map(|v| v as i32))
        .transpose()
}

fn run_allocation(payload: AllocationPayload) -> Result<AllocationResponse, InputError> {
    let defaults = AllocationSplit::default();
    let start = AllocationSplit::new(
        percent("--from-spending", payload.from_spending)?.unwrap_or(defaults.spending),
        percent("--from-saving", payload.from_saving)?.unwrap_or(defaults.saving),
        percent("--from-investing", payload.from_investing)?.unwrap_or(defaults.investing),
    );
    if !start.is_balanced() {
        return Err(InputError::Unbalanced {
            total: start.total(),
        });
    }
    let moves = SliderMoves {
        spending: percent("--spending", payload.spending)?,
        saving: percent("--saving", payload.saving)?,
        investing: percent("--investing", payload.investing)?,
    };
    let bounds = SliderBounds::for_screen(payload.screen.unwrap_or_default().into());

    let split = apply_slider_moves(start, bounds, moves);
    Ok(AllocationResponse {
        split,
        total: split.total(),
        balanced: split.is_balanced(),
    })
}

fn run_projection(payload: ProjectionPayload) -> Result<ProjectionResponse, InputError> {
    let monthly_amount = non_negative(
        "--monthly",
        payload
            .monthly_amount
            .unwrap_or_else(|| monthly_investment(DEFAULT_INCOME, DEFAULT_INVESTING_PCT)),
    )?;
    let annual_rate = rate_within(
        "--rate",
        payload.annual_rate.unwrap_or(DEFAULT_ANNUAL_RATE),
        0,
        100,
    )?;

    Ok(ProjectionResponse {
        monthly_amount,
        annual_rate,
        rows: project(monthly_amount, annual_rate),
    })
}

fn run_budget(payload: BudgetPayload) -> Result<BudgetBreakdown, InputError> {
    let income = non_negative("--income", payload.income.unwrap_or(DEFAULT_INCOME))?;
    let moves = SliderMoves {
        spending: percent("--spending", payload.spending)?,
        saving: percent("--saving", payload.saving)?,
        investing: percent("--investing", payload.investing)?,
    };
    let days = match payload.days_in_month {
        Some(days) => within("--days", days, 1, 31)? as u32,
        None => current_days_in_month(),
    };

    let split = apply_slider_moves(
        AllocationSplit::default(),
        SliderBounds::for_screen(Screen::Calculator),
        moves,
    );
    Ok(build_budget(income, split, days))
}

fn run_invest(payload: InvestPayload) -> Result<InvestmentPlan, InputError> {
    let income = non_negative("--income", payload.income.unwrap_or(DEFAULT_INCOME))?;
    let investing_pct =
        percent("--investing", payload.investing_pct)?.unwrap_or(DEFAULT_INVESTING_PCT);
    Ok(build_investment_plan(income, investing_pct))
}

fn run_usage(payload: UsagePayload) -> Result<BudgetUsage, InputError> {
    let spent = non_negative("--spent", payload.spent.unwrap_or(0.0))?;
    let budget = non_negative("--budget", payload.budget.unwrap_or(0.0))?;
    Ok(budget_usage(spent, budget))
}

fn run_goal(payload: GoalPayload, now: NaiveDateTime) -> Result<GoalProgress, InputError> {
    let current = non_negative("--current", payload.current.unwrap_or(0.0))?;
    let target = non_negative("--target", payload.target.unwrap_or(0.0))?;
    let deadline = payload.deadline.map(|day| day.and_time(NaiveTime::MIN));
    Ok(goal_progress(current, target, payload.locked, deadline, now))
}

fn run_grouping(payload: GroupPayload, today: NaiveDate) -> Result<GroupResponse, InputError> {
    for expense in &payload.expenses {
        non_negative("amount", expense.amount)?;
    }
    let today = payload.today.unwrap_or(today);
    Ok(GroupResponse {
        groups: group_expenses_by_date(&payload.expenses, today),
    })
}

fn run_transactions(
    payload: TransactionsPayload,
    today: NaiveDate,
) -> Result<TransactionsResponse, InputError> {
    for transaction in &payload.transactions {
        non_negative("amount", transaction.amount)?;
    }
    let today = payload.today.unwrap_or(today);
    let groups = group_transactions_by_date(&payload.transactions, today)
        .into_iter()
        .map(|group| TransactionGroupResponse {
            label: group.label,
            transactions: group
                .transactions
                .into_iter()
                .map(|transaction| TransactionEntry {
                    meta: describe_transaction(&transaction),
                    transaction,
                })
                .collect(),
        })
        .collect();
    Ok(TransactionsResponse { groups })
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    match cli.command {
        Command::Split(payload) => emit(json, &run_allocation(payload)?, render_allocation)?,
        Command::Project(payload) => emit(json, &run_projection(payload)?, render_projection)?,
        Command::Budget(payload) => emit(json, &run_budget(payload)?, render_budget)?,
        Command::Invest(payload) => emit(json, &run_invest(payload)?, render_invest)?,
        Command::Usage(payload) => emit(json, &run_usage(payload)?, render_usage)?,
        Command::Goal(payload) => {
            let progress = run_goal(payload, Local::now().naive_local())?;
            emit(json, &progress, render_goal)?
        }
        Command::Serve(args) => run_http_server(args.port).await?,
    }
    Ok(())
}

fn emit<T: Serialize>(json: bool, body: &T, render: fn(&T) -> String) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(body)?);
    } else {
        println!("{}", render(body));
    }
    Ok(())
}

fn render_allocation(response: &AllocationResponse) -> String {
    let split = response.split;
    let mut out = format!(
        "Spending {}% | Saving {}% | Investing {}% (total {}%)",
        split.spending, split.saving, split.investing, response.total
    );
    if !response.balanced {
        out.push_str("\nWarning: split does not add up to 100%");
    }
    out
}

fn render_rows(rows: &[ProjectionRow]) -> String {
    let mut out = format!("{:<10} {:>14} {:>14}", "Period", "Invested", "Value");
    for row in rows {
        let period = if row.years > 1 {
            format!("{} Years", row.years)
        } else {
            format!("{} Year", row.years)
        };
        out.push_str(&format!(
            "\n{:<10} {:>14} {:>14}",
            period,
            format!("₹{}", format_inr(row.invested)),
            format!("₹{}", format_inr(row.value)),
        ));
    }
    out
}

fn render_projection(response: &ProjectionResponse) -> String {
    format!(
        "₹{}/month at {}% annual return\n{}",
        format_inr(response.monthly_amount),
        response.annual_rate,
        render_rows(&response.rows)
    )
}

fn render_budget(budget: &BudgetBreakdown) -> String {
    let split = budget.split;
    let mut out = format!(
        "Monthly income: ₹{}\n\
         Spending ({}%): ₹{} -> ₹{}/day over {} days\n\
         Saving ({}%): ₹{} -> ₹{}/year\n\
         Investing ({}%): ₹{} -> ₹{}/year\n\
         Recommended spending breakdown:",
        format_inr(budget.income),
        split.spending,
        format_inr(budget.amounts.spending),
        format_inr(budget.daily_spend_limit),
        budget.days_in_month,
        split.saving,
        format_inr(budget.amounts.saving),
        format_inr(budget.yearly_saving),
        split.investing,
        format_inr(budget.amounts.investing),
        format_inr(budget.yearly_investing),
    );
    for category in &budget.categories {
        out.push_str(&format!(
            "\n  {:<20} ₹{} ({}%)",
            category.name,
            format_inr(category.amount),
            category.pct
        ));
    }
    out
}

fn render_invest(plan: &InvestmentPlan) -> String {
    if !plan.budget_set {
        return format!(
            "No investment budget set: {}% of ₹{} income is ₹0",
            plan.investing_pct,
            format_inr(plan.total_income)
        );
    }
    let mut out = format!(
        "Monthly investment: ₹{} ({}% of ₹{} income)",
        format_inr(plan.monthly_investment),
        plan.investing_pct,
        format_inr(plan.total_income)
    );
    for allocation in &plan.allocations {
        let option = &allocation.option;
        out.push_str(&format!(
            "\n\n{} [{} risk, {} annual, min ₹{}/month]\nYour monthly allocation: ₹{}\n{}",
            option.name,
            option.risk_level.label(),
            option.return_range,
            format_inr(option.min_monthly),
            format_inr(allocation.monthly_amount),
            render_rows(&allocation.projection)
        ));
    }
    out
}

fn render_usage(usage: &BudgetUsage) -> String {
    format!(
        "Used {:.0}% of ₹{} budget (₹{} spent, {:?})",
        usage.display_pct,
        format_inr(usage.budget),
        format_inr(usage.spent),
        usage.status
    )
}

fn render_goal(progress: &GoalProgress) -> String {
    let mut out = format!("{:.0}% complete", progress.display_pct);
    if progress.met {
        out.push_str(", goal met");
    }
    if progress.can_unlock {
        out.push_str(", ready to unlock");
    } else if progress.locked {
        out.push_str(", locked until met");
    }
    match progress.days_left {
        Some(days) if days < 0 => out.push_str(&format!(", {} days overdue", -days)),
        Some(days) => out.push_str(&format!(", {days} days left")),
        None => {}
    }
    out
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/allocation",
            get(allocation_get_handler).post(allocation_post_handler),
        )
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .route(
            "/api/budget",
            get(budget_get_handler).post(budget_post_handler),
        )
        .route(
            "/api/investments",
            get(invest_get_handler).post(invest_post_handler),
        )
        .route("/api/usage", get(usage_get_handler).post(usage_post_handler))
        .route("/api/goal", get(goal_get_handler).post(goal_post_handler))
        .route("/api/expenses/grouped", post(group_post_handler))
        .route("/api/transactions/grouped", post(transactions_post_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("pocketplan HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/api/budget");

    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn allocation_get_handler(
    payload: Result<Query<AllocationPayload>, QueryRejection>,
) -> Response {
    respond("allocation", from_query(payload).and_then(run_allocation))
}

async fn allocation_post_handler(
    payload: Result<Json<AllocationPayload>, JsonRejection>,
) -> Response {
    respond("allocation", from_json(payload).and_then(run_allocation))
}

async fn projection_get_handler(
    payload: Result<Query<ProjectionPayload>, QueryRejection>,
) -> Response {
    respond("projection", from_query(payload).and_then(run_projection))
}

async fn projection_post_handler(
    payload: Result<Json<ProjectionPayload>, JsonRejection>,
) -> Response {
    respond("projection", from_json(payload).and_then(run_projection))
}

async fn budget_get_handler(payload: Result<Query<BudgetPayload>, QueryRejection>) -> Response {
    respond("budget", from_query(payload).and_then(run_budget))
}

async fn budget_post_handler(payload: Result<Json<BudgetPayload>, JsonRejection>) -> Response {
    respond("budget", from_json(payload).and_then(run_budget))
}

async fn invest_get_handler(payload: Result<Query<InvestPayload>, QueryRejection>) -> Response {
    respond("investments", from_query(payload).and_then(run_invest))
}

async fn invest_post_handler(payload: Result<Json<InvestPayload>, JsonRejection>) -> Response {
    respond("investments", from_json(payload).and_then(run_invest))
}

async fn usage_get_handler(payload: Result<Query<UsagePayload>, QueryRejection>) -> Response {
    respond("usage", from_query(payload).and_then(run_usage))
}

async fn usage_post_handler(payload: Result<Json<UsagePayload>, JsonRejection>) -> Response {
    respond("usage", from_json(payload).and_then(run_usage))
}

async fn goal_get_handler(payload: Result<Query<GoalPayload>, QueryRejection>) -> Response {
    let now = Local::now().naive_local();
    respond("goal", from_query(payload).and_then(|p| run_goal(p, now)))
}

async fn goal_post_handler(payload: Result<Json<GoalPayload>, JsonRejection>) -> Response {
    let now = Local::now().naive_local();
    respond("goal", from_json(payload).and_then(|p| run_goal(p, now)))
}

async fn group_post_handler(payload: Result<Json<GroupPayload>, JsonRejection>) -> Response {
    let today = Local::now().date_naive();
    respond(
        "expenses/grouped",
        from_json(payload).and_then(|p| run_grouping(p, today)),
    )
}

async fn transactions_post_handler(
    payload: Result<Json<TransactionsPayload>, JsonRejection>,
) -> Response {
    let today = Local::now().date_naive();
    respond(
        "transactions/grouped",
        from_json(payload).and_then(|p| run_transactions(p, today)),
    )
}

fn from_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, InputError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| InputError::Payload(rejection.body_text()))
}

fn from_query<T>(payload: Result<Query<T>, QueryRejection>) -> Result<T, InputError> {
    payload
        .map(|Query(payload)| payload)
        .map_err(|rejection| InputError::Payload(rejection.body_text()))
}

fn respond<T: Serialize>(route: &str, result: Result<T, InputError>) -> Response {
    match result {
        Ok(body) => {
            debug!("{route}: computed");
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            warn!("{route}: rejected request: {err}");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn payload_from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, InputError> {
    serde_json::from_str::<T>(json).map_err(|e| InputError::Payload(e.to_string()))
}
