use std::collections::BTreeMap;

use crate::transaction::{Transaction, TransactionKind};

/// Asset line of the simplified balance sheet.
pub(crate) const ASSET_LABEL: &str = "Trésorerie";
/// Liability line of the simplified balance sheet.
pub(crate) const LIABILITY_LABEL: &str = "Résultat net";

/// Period totals over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Totals {
    pub(crate) income: f64,
    pub(crate) expenses: f64,
    pub(crate) net_result: f64,
}

/// One row of the month-by-month cashflow pivot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyCashflow {
    /// Year-month bucket, e.g. "2024-01".
    pub(crate) month: String,
    pub(crate) income: f64,
    pub(crate) expenses: f64,
    pub(crate) balance: f64,
}

/// Simplified balance sheet: a single asset line (cash on hand) facing a
/// single liability line (net result). Both sides hold the same value by
/// construction; this is not a double-entry balance sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BalanceSheet {
    pub(crate) assets: f64,
    pub(crate) liabilities: f64,
}

/// Everything the dashboard shows, derived from one full read of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Report {
    pub(crate) totals: Totals,
    pub(crate) monthly_cashflow: Vec<MonthlyCashflow>,
    pub(crate) balance_sheet: BalanceSheet,
}

impl Report {
    /// `None` when the ledger has no rows: "no data yet" is a normal state
    /// of the tool, not an error.
    pub(crate) fn build(transactions: &[Transaction]) -> Option<Report> {
        if transactions.is_empty() {
            return None;
        }

        let totals = totals(transactions);
        Some(Report {
            totals,
            monthly_cashflow: monthly_cashflow(transactions),
            balance_sheet: balance_sheet(&totals),
        })
    }
}

pub(crate) fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expenses = 0.0;
    for t in transactions {
        match t.kind {
            TransactionKind::Income => income += t.amount,
            TransactionKind::Expense => expenses += t.amount,
        }
    }

    Totals { income, expenses, net_result: income - expenses }
}

/// Pivot the ledger into one row per distinct year-month, ascending.
/// A month with rows of only one kind gets 0 on the other side.
pub(crate) fn monthly_cashflow(transactions: &[Transaction]) -> Vec<MonthlyCashflow> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for t in transactions {
        let entry = months.entry(t.month_key()).or_insert((0.0, 0.0));
        match t.kind {
            TransactionKind::Income => entry.0 += t.amount,
            TransactionKind::Expense => entry.1 += t.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyCashflow {
            month,
            income,
            expenses,
            balance: income - expenses,
        })
        .collect()
}

pub(crate) fn balance_sheet(totals: &Totals) -> BalanceSheet {
    // Cash on hand is the accumulated net result; both sides carry the
    // same value.
    BalanceSheet { assets: totals.net_result, liabilities: totals.net_result }
}
