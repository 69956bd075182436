//! In-memory data store shared by the dashboard views.
//!
//! The store is an explicit owned value handed to the app state and passed to
//! views by reference; there is no ambient/global context. The only mutation
//! it supports is prepending a transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Currency, Money, Transaction, TransactionKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    Dark,
    Light,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub default_carbon_offset: f64,
    pub currency: Currency,
    pub theme: ThemePreference,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MfaMethod {
    Fingerprint,
    Voice,
    RetinalScan,
    NeuralPattern,
    Face,
}

impl MfaMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fingerprint => "fingerprint",
            Self::Voice => "voice",
            Self::RetinalScan => "retinal_scan",
            Self::NeuralPattern => "neural_pattern",
            Self::Face => "face",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSecurityProfile {
    pub mfa_methods: Vec<MfaMethod>,
    pub approval_required_by: Vec<String>,
}

/// Process-wide dashboard state: the ordered transaction list plus the two
/// static user records.
///
/// Invariants:
/// - transactions are ordered newest-first by insertion
/// - rows are immutable once appended and never removed
/// - preferences/security profile are set at construction and never mutated
#[derive(Debug)]
pub struct Store {
    transactions: Vec<Transaction>,
    preferences: UserPreferences,
    security_profile: UserSecurityProfile,
}

impl Store {
    /// Creates the store seeded with the initial sample row, dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        let seed = Transaction {
            id: "tx_init_1".to_string(),
            kind: TransactionKind::Expense,
            category: "Transfer".to_string(),
            description: "Initial balance seeding".to_string(),
            amount: Money::new(100_000),
            date: today,
            carbon_footprint_kg: 0.05,
            schedule: None,
        };

        Self {
            transactions: vec![seed],
            preferences: UserPreferences {
                default_carbon_offset: 0.15,
                currency: Currency::Usd,
                theme: ThemePreference::Dark,
            },
            security_profile: UserSecurityProfile {
                mfa_methods: vec![
                    MfaMethod::Face,
                    MfaMethod::Fingerprint,
                    MfaMethod::RetinalScan,
                ],
                approval_required_by: Vec::new(),
            },
        }
    }

    /// Prepends a transaction. Always succeeds; no validation beyond the
    /// shape already enforced by [`Transaction::new`], no deduplication.
    pub fn add_transaction(&mut self, tx: Transaction) {
        tracing::debug!(id = %tx.id, kind = tx.kind.as_str(), "ledger append");
        self.transactions.insert(0, tx);
    }

    /// Newest-first snapshot of the ledger.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    #[must_use]
    pub fn security_profile(&self) -> &UserSecurityProfile {
        &self.security_profile
    }

    /// Sum of all expense magnitudes (scheduled rows excluded).
    #[must_use]
    pub fn total_spent(&self) -> Money {
        self.transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Expense)
            .fold(Money::ZERO, |sum, tx| sum + tx.amount)
    }

    /// Sum of the carbon estimates across every row, in kg CO2e.
    #[must_use]
    pub fn total_carbon_kg(&self) -> f64 {
        self.transactions
            .iter()
            .map(|tx| tx.carbon_footprint_kg)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn expense(id: &str, minor: i64) -> Transaction {
        Transaction::new(
            id.to_string(),
            TransactionKind::Expense,
            "Transfer".to_string(),
            "test".to_string(),
            Money::new(minor),
            today(),
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn seeds_initial_row_and_static_records() {
        let store = Store::new(today());
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.transactions()[0].id, "tx_init_1");
        assert_eq!(store.preferences().currency, Currency::Usd);
        assert_eq!(store.security_profile().mfa_methods.len(), 3);
    }

    #[test]
    fn add_transaction_prepends() {
        let mut store = Store::new(today());
        store.add_transaction(expense("tx_a", 100));
        store.add_transaction(expense("tx_b", 200));

        let ids: Vec<&str> = store
            .transactions()
            .iter()
            .map(|tx| tx.id.as_str())
            .collect();
        assert_eq!(ids, ["tx_b", "tx_a", "tx_init_1"]);
    }

    #[test]
    fn totals_cover_expenses_and_carbon() {
        let mut store = Store::new(today());
        store.add_transaction(expense("tx_a", 50_000));

        // Seed (1000.00) + 500.00.
        assert_eq!(store.total_spent(), Money::new(150_000));
        assert!((store.total_carbon_kg() - 0.05).abs() < f64::EPSILON);
    }
}
