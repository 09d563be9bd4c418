use std::fmt;
use std::io;

/// Invalid user input, rejected before anything is written to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ValidationError {
    AmountOutOfRange(f64),
    VatOutOfRange(f64),
    InvalidDate(String),
    UnknownKind(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::AmountOutOfRange(amount) => {
                write!(f, "montant invalide : {amount} (nombre positif attendu)")
            }
            ValidationError::VatOutOfRange(rate) => {
                write!(f, "taux de TVA invalide : {rate} (entre 0 et 100 attendu)")
            }
            ValidationError::InvalidDate(s) => {
                write!(f, "date invalide : '{s}' (format AAAA-MM-JJ attendu)")
            }
            ValidationError::UnknownKind(s) => {
                write!(f, "type d'opération inconnu : '{s}' (Recette ou Dépense attendu)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure while reading or writing the ledger file.
#[derive(Debug)]
pub(crate) enum LedgerError {
    Validation(ValidationError),
    /// A row of the backing file cannot be parsed. The whole read fails;
    /// rows are never silently skipped.
    CorruptData { line: usize, detail: String },
    Io(io::Error),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerError::Validation(e) => write!(f, "{e}"),
            LedgerError::CorruptData { line, detail } => {
                write!(f, "fichier de données corrompu (ligne {line}) : {detail}")
            }
            LedgerError::Io(e) => write!(f, "erreur d'accès au fichier : {e}"),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Validation(e) => Some(e),
            LedgerError::CorruptData { .. } => None,
            LedgerError::Io(e) => Some(e),
        }
    }
}

impl From<ValidationError> for LedgerError {
    fn from(e: ValidationError) -> Self {
        LedgerError::Validation(e)
    }
}

impl From<io::Error> for LedgerError {
    fn from(e: io::Error) -> Self {
        LedgerError::Io(e)
    }
}

impl From<csv::Error> for LedgerError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map_or(0, |p| p.line() as usize);
        let detail = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io_err) => LedgerError::Io(io_err),
            _ => LedgerError::CorruptData { line, detail },
        }
    }
}
