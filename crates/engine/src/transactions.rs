//! Ledger primitives.
//!
//! A `Transaction` is an immutable ledger row: once appended to the store it
//! is never modified or removed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
    ScheduledExpense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::ScheduledExpense => "scheduled_expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "scheduled_expense" => Ok(Self::ScheduledExpense),
            other => Err(EngineError::InvalidKind(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annually,
    OnceOnDate,
}

/// Recurrence rule for scheduled expenses.
///
/// Carried on the ledger row but not interpreted by the transfer flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRule {
    pub frequency: ScheduleFrequency,
    pub start_date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    /// Estimated emissions for this transaction, in kg CO2e.
    pub carbon_footprint_kg: f64,
    pub schedule: Option<ScheduleRule>,
}

impl Transaction {
    /// Builds a ledger row. Amounts are magnitudes: negative values are
    /// rejected here, the kind carries the direction.
    pub fn new(
        id: String,
        kind: TransactionKind,
        category: String,
        description: String,
        amount: Money,
        date: NaiveDate,
        carbon_footprint_kg: f64,
    ) -> ResultEngine<Self> {
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must be >= 0".to_string(),
            ));
        }
        if carbon_footprint_kg < 0.0 {
            return Err(EngineError::InvalidAmount(
                "carbon footprint must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id,
            kind,
            category,
            description,
            amount,
            date,
            carbon_footprint_kg,
            schedule: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn kind_round_trips_through_labels() {
        for kind in [
            TransactionKind::Expense,
            TransactionKind::Income,
            TransactionKind::ScheduledExpense,
        ] {
            assert_eq!(TransactionKind::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(TransactionKind::try_from("refund").is_err());
    }

    #[test]
    fn new_rejects_negative_magnitudes() {
        let err = Transaction::new(
            "tx_1".to_string(),
            TransactionKind::Expense,
            "Transfer".to_string(),
            "test".to_string(),
            Money::new(-1),
            date(),
            0.0,
        );
        assert!(err.is_err());

        let err = Transaction::new(
            "tx_1".to_string(),
            TransactionKind::Expense,
            "Transfer".to_string(),
            "test".to_string(),
            Money::new(100),
            date(),
            -0.5,
        );
        assert!(err.is_err());
    }
}
