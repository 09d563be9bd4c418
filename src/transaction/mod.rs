use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One recorded operation. Serde renames map the fields to the French
/// column headers of the ledger file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    #[serde(rename = "Date")]
    pub(crate) date: NaiveDate,
    #[serde(rename = "Type")]
    pub(crate) kind: TransactionKind,
    #[serde(rename = "Montant")]
    pub(crate) amount: f64,
    #[serde(rename = "Catégorie")]
    pub(crate) category: String,
    #[serde(rename = "TVA")]
    pub(crate) vat_rate: f64,
    #[serde(rename = "Description")]
    pub(crate) description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum TransactionKind {
    #[serde(rename = "Recette")]
    Income,
    #[serde(rename = "Dépense")]
    Expense,
}

impl TransactionKind {
    /// Parse a kind typed in the entry form. Accent-less spellings are
    /// accepted so the flag can be typed on any keyboard.
    pub(crate) fn parse(s: &str) -> Result<TransactionKind, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "recette" => Ok(TransactionKind::Income),
            "dépense" | "depense" => Ok(TransactionKind::Expense),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }

    /// The literal string stored in the ledger file.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Recette",
            TransactionKind::Expense => "Dépense",
        }
    }
}

impl Transaction {
    /// Check the recording invariants. Runs before every append so a bad
    /// transaction never reaches the file.
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ValidationError::AmountOutOfRange(self.amount));
        }
        if !self.vat_rate.is_finite() || !(0.0..=100.0).contains(&self.vat_rate) {
            return Err(ValidationError::VatOutOfRange(self.vat_rate));
        }
        Ok(())
    }

    /// Year-month bucket used by the cashflow pivot, e.g. "2024-01".
    pub(crate) fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Parse a date typed in the entry form. Accepts ISO (2024-01-15) and the
/// French short form (15/01/2024). The ledger file always stores ISO.
pub(crate) fn parse_entry_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::InvalidDate(s.to_string()));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}
