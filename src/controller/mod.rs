use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::Local;
use comfy_table::{Cell, CellAlignment, Table, TableComponent};
use log::info;

use crate::error::ValidationError;
use crate::export::{ExportBundle, EXPORT_FILE_NAME};
use crate::ledger::LedgerStore;
use crate::report::{Report, ASSET_LABEL, LIABILITY_LABEL};
use crate::transaction::{parse_entry_date, Transaction, TransactionKind};

const NO_DATA_MESSAGE: &str = "Aucune donnée disponible.";

/// Raw field values captured by the entry form, before validation.
pub(crate) struct EntryForm {
    /// Entry date; today when not given.
    pub(crate) date: Option<String>,
    pub(crate) kind: String,
    pub(crate) amount: f64,
    pub(crate) category: String,
    pub(crate) vat_rate: f64,
    pub(crate) description: String,
}

impl EntryForm {
    fn into_transaction(self) -> Result<Transaction, ValidationError> {
        let date = match &self.date {
            Some(s) => parse_entry_date(s)?,
            None => Local::now().date_naive(),
        };

        Ok(Transaction {
            date,
            kind: TransactionKind::parse(&self.kind)?,
            amount: self.amount,
            category: self.category,
            vat_rate: self.vat_rate,
            description: self.description,
        })
    }
}

/// Record one operation in the ledger.
pub(crate) fn add(store: &LedgerStore, form: EntryForm) -> anyhow::Result<()> {
    let transaction = form.into_transaction()?;
    store.append(&transaction)?;

    println!(
        "Opération ajoutée avec succès ! ({} {} de {:.2} €)",
        transaction.kind.as_str(),
        transaction.date.format("%Y-%m-%d"),
        transaction.amount
    );
    Ok(())
}

/// Print the dashboard: totals, monthly cashflow pivot and balance sheet.
pub(crate) fn report(store: &LedgerStore) -> anyhow::Result<()> {
    let transactions = store.load_all()?;

    match Report::build(&transactions) {
        None => println!("{NO_DATA_MESSAGE}"),
        Some(report) => print_report(&report),
    }
    Ok(())
}

/// Build the two-sheet Excel bundle and write it to disk.
pub(crate) fn export(store: &LedgerStore, output: Option<&Path>) -> anyhow::Result<()> {
    let transactions = store.load_all()?;

    let report = match Report::build(&transactions) {
        Some(report) => report,
        None => {
            println!("{NO_DATA_MESSAGE}");
            return Ok(());
        }
    };

    let bundle = ExportBundle::build(&transactions, &report.balance_sheet);
    let bytes = bundle.to_xlsx()?;

    let output = output.unwrap_or_else(|| Path::new(EXPORT_FILE_NAME));
    fs::write(output, &bytes)
        .with_context(|| format!("impossible d'écrire {}", output.display()))?;

    info!("Wrote {} transactions to {}", transactions.len(), output.display());
    println!("Export écrit dans {}", output.display());
    Ok(())
}

fn print_report(report: &Report) {
    println!("Vue d'ensemble");
    let mut overview = new_table();
    overview.set_header(vec!["Chiffre d'affaires", "Charges", "Résultat net"]);
    overview.add_row(vec![
        amount_cell(report.totals.income),
        amount_cell(report.totals.expenses),
        amount_cell(report.totals.net_result),
    ]);
    println!("{overview}");

    println!("\nCashflow mensuel");
    let mut pivot = new_table();
    pivot.set_header(vec!["Mois", "Recettes", "Dépenses", "Solde"]);
    for row in &report.monthly_cashflow {
        pivot.add_row(vec![
            Cell::new(row.month.as_str()),
            amount_cell(row.income),
            amount_cell(row.expenses),
            amount_cell(row.balance),
        ]);
    }
    println!("{pivot}");

    println!("\nBilan simplifié");
    let mut balance = new_table();
    balance.set_header(vec!["Actif", "Montant (€)", "Passif", "Montant (€)"]);
    balance.add_row(vec![
        Cell::new(ASSET_LABEL),
        amount_cell(report.balance_sheet.assets),
        Cell::new(LIABILITY_LABEL),
        amount_cell(report.balance_sheet.liabilities),
    ]);
    println!("{balance}");
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

fn amount_cell(amount: f64) -> Cell {
    Cell::new(format_amount(amount).as_str()).set_alignment(CellAlignment::Right)
}

/// Format € amount
fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;
    use crate::error::LedgerError;

    fn form(date: &str, kind: &str, amount: f64, vat_rate: f64) -> EntryForm {
        EntryForm {
            date: Some(date.to_string()),
            kind: kind.to_string(),
            amount,
            category: "Conseil".to_string(),
            vat_rate,
            description: "Mission client".to_string(),
        }
    }

    #[test]
    fn test_entry_form_builds_a_transaction() {
        let transaction = form("2024-01-15", "recette", 100.0, 20.0).into_transaction().unwrap();
        assert_eq!(transaction.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(transaction.kind, TransactionKind::Income);
        assert_eq!(transaction.amount, 100.0);
    }

    #[test]
    fn test_entry_form_defaults_to_today() {
        let mut form = form("", "depense", 10.0, 0.0);
        form.date = None;
        let transaction = form.into_transaction().unwrap();
        assert_eq!(transaction.date, Local::now().date_naive());
    }

    #[test]
    fn test_entry_form_rejects_bad_date_and_kind() {
        assert!(matches!(
            form("demain", "recette", 10.0, 0.0).into_transaction(),
            Err(ValidationError::InvalidDate(_))
        ));
        assert!(matches!(
            form("2024-01-15", "virement", 10.0, 0.0).into_transaction(),
            Err(ValidationError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_add_records_into_the_store() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("transactions.csv"));
        store.initialize().unwrap();

        add(&store, form("2024-01-15", "recette", 100.0, 20.0)).unwrap();
        add(&store, form("2024-01-20", "dépense", 40.0, 20.0)).unwrap();

        let transactions = store.load_all().unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].kind, TransactionKind::Expense);
    }

    #[test]
    fn test_add_surfaces_validation_errors() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("transactions.csv"));
        store.initialize().unwrap();

        let result = add(&store, form("2024-01-15", "recette", -1.0, 20.0));
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::Validation(ValidationError::AmountOutOfRange(_)))
        ));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_export_writes_the_artifact() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("transactions.csv"));
        store.initialize().unwrap();
        add(&store, form("2024-01-15", "recette", 100.0, 20.0)).unwrap();

        let output = dir.path().join(EXPORT_FILE_NAME);
        export(&store, Some(&output)).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_export_on_empty_ledger_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("transactions.csv"));
        store.initialize().unwrap();

        let output = dir.path().join(EXPORT_FILE_NAME);
        export(&store, Some(&output)).unwrap();

        assert!(!output.exists());
    }
}
