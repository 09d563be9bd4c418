use rust_xlsxwriter::{Workbook, XlsxError};

use crate::ledger::COLUMNS;
use crate::report::{BalanceSheet, ASSET_LABEL, LIABILITY_LABEL};
use crate::transaction::Transaction;

/// Fixed name of the downloadable artifact.
pub(crate) const EXPORT_FILE_NAME: &str = "vitecompta_export.xlsx";

/// MIME type of the artifact, for callers serving it over HTTP.
#[allow(dead_code)]
pub(crate) const EXPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const BALANCE_SHEET_COLUMNS: [&str; 4] =
    ["Actif", "Montant Actif (€)", "Passif", "Montant Passif (€)"];

pub(crate) enum Cell {
    Text(String),
    Number(f64),
}

/// One named sheet of the export: a header row plus data rows.
pub(crate) struct Sheet {
    pub(crate) name: &'static str,
    pub(crate) columns: Vec<&'static str>,
    pub(crate) rows: Vec<Vec<Cell>>,
}

/// In-memory spreadsheet bundle handed to the caller for download. The
/// caller decides where the bytes go; building the bundle writes nothing.
pub(crate) struct ExportBundle {
    pub(crate) sheets: Vec<Sheet>,
}

impl ExportBundle {
    /// Assemble the two sheets: the raw transaction rows (same columns as
    /// the ledger file) and the simplified balance sheet.
    pub(crate) fn build(transactions: &[Transaction], balance_sheet: &BalanceSheet) -> ExportBundle {
        let transaction_rows = transactions
            .iter()
            .map(|t| {
                vec![
                    Cell::Text(t.date.format("%Y-%m-%d").to_string()),
                    Cell::Text(t.kind.as_str().to_string()),
                    Cell::Number(t.amount),
                    Cell::Text(t.category.clone()),
                    Cell::Number(t.vat_rate),
                    Cell::Text(t.description.clone()),
                ]
            })
            .collect();

        let balance_row = vec![
            Cell::Text(ASSET_LABEL.to_string()),
            Cell::Number(balance_sheet.assets),
            Cell::Text(LIABILITY_LABEL.to_string()),
            Cell::Number(balance_sheet.liabilities),
        ];

        ExportBundle {
            sheets: vec![
                Sheet { name: "Transactions", columns: COLUMNS.to_vec(), rows: transaction_rows },
                Sheet {
                    name: "Bilan",
                    columns: BALANCE_SHEET_COLUMNS.to_vec(),
                    rows: vec![balance_row],
                },
            ],
        }
    }

    /// Encode the bundle as xlsx bytes, in memory.
    pub(crate) fn to_xlsx(&self) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet().set_name(sheet.name)?;

            for (col, title) in sheet.columns.iter().enumerate() {
                worksheet.write_string(0, col as u16, *title)?;
            }

            for (i, row) in sheet.rows.iter().enumerate() {
                let row_index = i as u32 + 1;
                for (col, cell) in row.iter().enumerate() {
                    match cell {
                        Cell::Text(s) => worksheet.write_string(row_index, col as u16, s.as_str())?,
                        Cell::Number(n) => worksheet.write_number(row_index, col as u16, *n)?,
                    };
                }
            }
        }

        workbook.save_to_buffer()
    }
}
