//! Ledger domain model: daily records and records owning embedded transactions.
//!
//! A [`Record`] is the unit of persistence. Its [`Transaction`]s have their own
//! identities but are only ever written by rewriting the owning record.

use serde::{Deserialize, Serialize};

use super::{DocumentId, Timestamp};

// =============================================================================
// Daily Record
// =============================================================================

/// A day's income/expense summary. The balance is stored as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "_id")]
    pub daily_record_id: DocumentId,
    pub date: Timestamp,
    #[serde(rename = "ingreso")]
    pub income: f64,
    #[serde(rename = "gasto")]
    pub expense: f64,
    pub balance: f64,
    #[serde(
        rename = "nombreIngreso",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub income_label: Option<String>,
    #[serde(
        rename = "nombreGasto",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expense_label: Option<String>,
}

// =============================================================================
// Transaction
// =============================================================================

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "ingreso")]
    Income,
    #[serde(rename = "gasto")]
    Expense,
}

/// A single ledger movement embedded in a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub transaction_id: DocumentId,
    pub date: Timestamp,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
}

/// Fields of a transaction that may be changed in place. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
}

impl Transaction {
    /// Applies the fields present in `patch`.
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// A dated record owning an ordered list of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub record_id: DocumentId,
    pub date: Timestamp,
    #[serde(rename = "transacciones", default)]
    pub transactions: Vec<Transaction>,
}

impl Record {
    #[must_use]
    pub const fn new(record_id: DocumentId, date: Timestamp, transactions: Vec<Transaction>) -> Self {
        Self {
            record_id,
            date,
            transactions,
        }
    }

    /// Looks up an embedded transaction by identity.
    #[must_use]
    pub fn transaction(&self, transaction_id: &DocumentId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| &transaction.transaction_id == transaction_id)
    }

    /// Applies `patch` to the matching transaction and returns its new state.
    ///
    /// Returns `None` if no embedded transaction has that identity.
    pub fn patch_transaction(
        &mut self,
        transaction_id: &DocumentId,
        patch: TransactionPatch,
    ) -> Option<Transaction> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|transaction| &transaction.transaction_id == transaction_id)?;
        transaction.apply(patch);
        Some(transaction.clone())
    }

    /// Removes the first matching transaction, keeping the order of its siblings.
    ///
    /// Returns `false` if no embedded transaction has that identity.
    pub fn remove_transaction(&mut self, transaction_id: &DocumentId) -> bool {
        match self
            .transactions
            .iter()
            .position(|transaction| &transaction.transaction_id == transaction_id)
        {
            Some(index) => {
                self.transactions.remove(index);
                true
            }
            None => false,
        }
    }
}
