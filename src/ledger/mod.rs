use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use log::info;

use crate::error::LedgerError;
use crate::transaction::Transaction;

/// Column headers of the ledger file, in on-disk order.
pub(crate) const COLUMNS: [&str; 6] = ["Date", "Type", "Montant", "Catégorie", "TVA", "Description"];

/// Append-only transaction store backed by a single csv file.
///
/// The csv encoding keeps one header row on top, so every append re-reads
/// the rows and rewrites the whole file. That makes `append` O(n) in ledger
/// size, which is the accepted cost at single-user scale.
///
/// Nothing guards the file against two processes appending at once; the
/// last rewrite wins.
pub(crate) struct LedgerStore {
    file_path: PathBuf,
}

impl LedgerStore {
    pub(crate) fn new(file_path: impl Into<PathBuf>) -> LedgerStore {
        LedgerStore { file_path: file_path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.file_path
    }

    /// Create the backing file with the header row only. Does nothing when
    /// the file already exists; safe to call on every startup.
    pub(crate) fn initialize(&self) -> Result<(), LedgerError> {
        if self.file_path.exists() {
            return Ok(());
        }

        info!("Creating ledger file {}", self.file_path.display());
        self.write_all(&[])
    }

    /// Validate then durably record one transaction.
    ///
    /// Validation runs before the file is touched, so a rejected
    /// transaction leaves the ledger exactly as it was. There is no update
    /// or delete operation; recording is the only mutation.
    pub(crate) fn append(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        transaction.validate()?;

        let mut transactions = self.load_all()?;
        transactions.push(transaction.clone());
        self.write_all(&transactions)
    }

    /// Read and parse every row of the backing file, in file order.
    ///
    /// A row that cannot be parsed fails the whole read with
    /// `CorruptData`; there are no partial results.
    pub(crate) fn load_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_path(&self.file_path)?;

        let mut transactions = vec![];
        for row in rdr.deserialize() {
            let transaction: Transaction = row?;
            transactions.push(transaction);
        }

        Ok(transactions)
    }

    fn write_all(&self, transactions: &[Transaction]) -> Result<(), LedgerError> {
        // The header is written explicitly: serde only emits one when at
        // least one row is serialized, and an empty ledger still needs it.
        let mut writer = WriterBuilder::new().has_headers(false).from_path(&self.file_path)?;
        writer.write_record(COLUMNS)?;
        for transaction in transactions {
            writer.serialize(transaction)?;
        }
        writer.flush()?;

        Ok(())
    }
}
