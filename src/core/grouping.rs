use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use super::types::{Expense, ExpenseGroup, Transaction, TransactionGroup};

/// How dates older than yesterday are labelled.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum YearStyle {
    /// `"5 Mar"` in the current year, `"5 Mar 2024"` otherwise.
    WhenDifferent,
    /// Always `"5 Mar 2025"`.
    Always,
}

fn day_label(day: NaiveDate, today: NaiveDate, style: YearStyle) -> String {
    if day == today {
        return "Today".to_string();
    }
    if today.checked_sub_days(Days::new(1)) == Some(day) {
        return "Yesterday".to_string();
    }
    if style == YearStyle::WhenDifferent && day.year() == today.year() {
        day.format("%-d %b").to_string()
    } else {
        day.format("%-d %b %Y").to_string()
    }
}

// Stable sort newest first, then bucket by label in first-appearance order.
fn group_by_day<T: Clone>(
    items: &[T],
    today: NaiveDate,
    style: YearStyle,
    at: impl Fn(&T) -> NaiveDateTime,
) -> Vec<(String, Vec<T>)> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| at(b).cmp(&at(a)));

    let mut groups: Vec<(String, Vec<T>)> = Vec::new();
    for item in sorted {
        let label = day_label(at(&item).date(), today, style);
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, members)) => members.push(item),
            None => groups.push((label, vec![item])),
        }
    }
    groups
}

/// Groups expenses by calendar day, newest first. Groups appear in the order
/// their first expense does after sorting.
pub fn group_expenses_by_date(expenses: &[Expense], today: NaiveDate) -> Vec<ExpenseGroup> {
    group_by_day(expenses, today, YearStyle::WhenDifferent, |e| e.date)
        .into_iter()
        .map(|(label, expenses)| ExpenseGroup { label, expenses })
        .collect()
}

/// Wallet history grouping. Same ordering as expenses, but older days always
/// carry the year.
pub fn group_transactions_by_date(
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<TransactionGroup> {
    group_by_day(transactions, today, YearStyle::Always, |t| t.timestamp)
        .into_iter()
        .map(|(label, transactions)| TransactionGroup {
            label,
            transactions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .expect("valid timestamp")
    }

    fn expense(id: u64, date: NaiveDateTime) -> Expense {
        Expense {
            id,
            amount: 100.0,
            category: "Food".to_string(),
            description: String::new(),
            date,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
    }

    fn transaction(id: u64, timestamp: NaiveDateTime) -> Transaction {
        Transaction {
            id,
            amount: 250.0,
            transaction_type: "sent".to_string(),
            recipient_label: None,
            note: String::new(),
            timestamp,
        }
    }

    #[test]
    fn labels_relative_days() {
        let style = YearStyle::WhenDifferent;
        assert_eq!(day_label(today(), today(), style), "Today");
        assert_eq!(day_label(at(2025, 3, 9, 0).date(), today(), style), "Yesterday");
        assert_eq!(day_label(at(2025, 3, 5, 0).date(), today(), style), "5 Mar");
        assert_eq!(
            day_label(at(2024, 12, 31, 0).date(), today(), style),
            "31 Dec 2024"
        );
    }

    #[test]
    fn yesterday_crosses_month_and_year() {
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        let label = day_label(at(2024, 12, 31, 23).date(), new_year, YearStyle::Always);
        assert_eq!(label, "Yesterday");
    }

    #[test]
    fn groups_newest_first() {
        let expenses = vec![
            expense(1, at(2025, 3, 5, 9)),
            expense(2, at(2025, 3, 10, 8)),
            expense(3, at(2025, 3, 9, 20)),
            expense(4, at(2025, 3, 10, 18)),
            expense(5, at(2025, 3, 5, 21)),
        ];

        let groups = group_expenses_by_date(&expenses, today());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Yesterday", "5 Mar"]);

        let ids: Vec<u64> = groups[0].expenses.iter().map(|e| e.id).collect();
        assert_eq!(ids, [4, 2]);
        let ids: Vec<u64> = groups[2].expenses.iter().map(|e| e.id).collect();
        assert_eq!(ids, [5, 1]);
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_expenses_by_date(&[], today()).is_empty());
    }

    #[test]
    fn transaction_groups_always_show_year() {
        let transactions = vec![
            transaction(1, at(2025, 3, 5, 9)),
            transaction(2, at(2025, 3, 10, 8)),
            transaction(3, at(2025, 3, 9, 20)),
            transaction(4, at(2025, 3, 5, 21)),
        ];

        let groups = group_transactions_by_date(&transactions, today());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Yesterday", "5 Mar 2025"]);

        let ids: Vec<u64> = groups[2].transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, [4, 1]);
    }

    #[test]
    fn same_timestamp_keeps_input_order() {
        let when = at(2025, 3, 10, 12);
        let transactions = vec![transaction(7, when), transaction(3, when)];

        let groups = group_transactions_by_date(&transactions, today());
        let ids: Vec<u64> = groups[0].transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, [7, 3]);
    }
}
