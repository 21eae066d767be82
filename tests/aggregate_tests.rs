// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tallybook::aggregate::{
    MonthFilter, category_shares, daily_summary, expense_by_category, expense_by_day,
    monthly_summary,
};
use tallybook::{LedgerError, Transaction, TransactionId, TransactionInput};

fn tx(id: u64, date: &str, kind: &str, amount: &str, category: &str) -> Transaction {
    TransactionInput {
        date: date.into(),
        kind: kind.into(),
        amount: amount.into(),
        category: category.into(),
        ..Default::default()
    }
    .validate()
    .unwrap()
    .into_transaction(TransactionId(id))
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample() -> Vec<Transaction> {
    vec![
        tx(1, "2024-03-01", "Budget", "1000", ""),
        tx(2, "2024-03-05", "Expense", "200", "Food"),
        tx(3, "2024-04-01", "Expense", "50", "Food"),
    ]
}

fn month(s: &str) -> MonthFilter {
    s.parse().unwrap()
}

#[test]
fn monthly_summary_for_filtered_month() {
    let txs = sample();
    let rows = monthly_summary(&txs, Some(&month("2024-03")));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].period, "2024-03");
    assert_eq!(rows[0].budget, dec("1000"));
    assert_eq!(rows[0].expense, dec("200"));
    assert_eq!(rows[0].balance, dec("800"));
}

#[test]
fn monthly_summary_sorted_with_zero_buckets() {
    let mut txs = sample();
    txs.push(tx(4, "2023-12-31", "Budget", "10", ""));
    let rows = monthly_summary(&txs, None);
    let periods: Vec<&str> = rows.iter().map(|r| r.period.as_str()).collect();
    assert_eq!(periods, vec!["2023-12", "2024-03", "2024-04"]);
    assert_eq!(rows[0].expense, Decimal::ZERO);
    assert_eq!(rows[2].budget, Decimal::ZERO);
    assert_eq!(rows[2].balance, dec("-50"));
}

#[test]
fn category_series_filtered_and_unfiltered() {
    let txs = sample();
    let march = expense_by_category(&txs, Some(&month("2024-03")));
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].category, "Food");
    assert_eq!(march[0].amount, dec("200"));

    let all = expense_by_category(&txs, None);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, dec("250"));
}

#[test]
fn categories_keep_first_seen_order_and_raw_labels() {
    let txs = vec![
        tx(1, "2024-03-02", "Expense", "5", "Transit"),
        tx(2, "2024-03-01", "Expense", "7", ""),
        tx(3, "2024-03-03", "Expense", "1", " "),
        tx(4, "2024-03-04", "Expense", "3", "Transit"),
        tx(5, "2024-03-04", "Budget", "100", "Salary"),
    ];
    let cats = expense_by_category(&txs, None);
    let labels: Vec<&str> = cats.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(labels, vec!["Transit", "", " "]);
    assert_eq!(cats[0].amount, dec("8"));
}

#[test]
fn expense_by_day_ignores_budget_and_sorts() {
    let txs = vec![
        tx(1, "2024-03-09", "Expense", "4", "A"),
        tx(2, "2024-03-02", "Expense", "1.25", "B"),
        tx(3, "2024-03-09", "Expense", "6", "C"),
        tx(4, "2024-03-03", "Budget", "500", ""),
        tx(5, "2024-04-01", "Expense", "9", "A"),
    ];
    let days = expense_by_day(&txs, Some(&month("2024-03")));
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, "2024-03-02");
    assert_eq!(days[0].amount, dec("1.25"));
    assert_eq!(days[1].date, "2024-03-09");
    assert_eq!(days[1].amount, dec("10"));
}

#[test]
fn zero_expense_counts_as_expense() {
    let txs = vec![tx(1, "2024-03-01", "Expense", "0", "Misc")];
    let rows = daily_summary(&txs, None);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].budget, Decimal::ZERO);
    assert_eq!(rows[0].expense, Decimal::ZERO);
    let cats = expense_by_category(&txs, None);
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].category, "Misc");
}

#[test]
fn daily_balances_add_up_to_monthly_balance() {
    let txs = vec![
        tx(1, "2024-02-01", "Budget", "1500.10", ""),
        tx(2, "2024-02-03", "Expense", "0.1", "Food"),
        tx(3, "2024-02-03", "Expense", "0.2", "Food"),
        tx(4, "2024-02-29", "Expense", "99.99", "Rent"),
        tx(5, "2024-03-01", "Expense", "10", "Food"),
        tx(6, "2024-02-15", "Budget", "20", ""),
    ];
    for m in monthly_summary(&txs, None) {
        let filter = month(&m.period);
        let daily_total: Decimal = daily_summary(&txs, Some(&filter))
            .iter()
            .map(|d| d.balance)
            .sum();
        assert_eq!(daily_total, m.balance, "month {}", m.period);
    }
}

#[test]
fn daily_summary_is_repeatable() {
    let txs = sample();
    assert_eq!(daily_summary(&txs, None), daily_summary(&txs, None));
}

#[test]
fn shares_round_to_one_decimal() {
    let txs = vec![
        tx(1, "2024-03-01", "Expense", "1", "A"),
        tx(2, "2024-03-01", "Expense", "2", "B"),
    ];
    let shares = category_shares(&txs, None);
    assert_eq!(shares[0].share, dec("33.3"));
    assert_eq!(shares[1].share, dec("66.7"));

    let zero = category_shares(&[tx(1, "2024-03-01", "Expense", "0", "A")], None);
    assert_eq!(zero[0].share, Decimal::ZERO);
}

#[test]
fn month_filter_validation() {
    assert!(matches!(
        "2024-3".parse::<MonthFilter>(),
        Err(LedgerError::InvalidMonth(_))
    ));
    assert!("2024-13".parse::<MonthFilter>().is_err());
    assert!("2024".parse::<MonthFilter>().is_err());
    assert_eq!(month("2024-03").as_str(), "2024-03");
}

#[test]
fn largest_amounts_aggregate_without_overflow() {
    let max = "999999999999999.99";
    let txs: Vec<Transaction> = (1..=1000)
        .map(|i| tx(i, "2024-03-01", "Expense", max, "Big"))
        .collect();
    let monthly = monthly_summary(&txs, None);
    assert_eq!(monthly[0].expense, dec(max) * Decimal::from(1000));
    let shares = category_shares(&txs, None);
    assert_eq!(shares[0].share, Decimal::ONE_HUNDRED);
}
