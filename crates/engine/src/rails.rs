//! Transfer rails.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// The channel a transfer is dispatched over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRail {
    #[default]
    QuantumPay,
    CashApp,
    SwiftGlobal,
    BlockchainDlt,
    InterstellarP2p,
    NeuroLink,
    AiContractEscrow,
}

impl PaymentRail {
    /// Every rail, in the order the selector presents them.
    pub const ALL: [PaymentRail; 7] = [
        Self::QuantumPay,
        Self::CashApp,
        Self::SwiftGlobal,
        Self::BlockchainDlt,
        Self::InterstellarP2p,
        Self::NeuroLink,
        Self::AiContractEscrow,
    ];

    /// Canonical wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuantumPay => "quantumpay",
            Self::CashApp => "cashapp",
            Self::SwiftGlobal => "swift_global",
            Self::BlockchainDlt => "blockchain_dlt",
            Self::InterstellarP2p => "interstellar_p2p",
            Self::NeuroLink => "neuro_link",
            Self::AiContractEscrow => "ai_contract_escrow",
        }
    }

    /// Short label for the rail selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::QuantumPay => "QUANTUM",
            Self::CashApp => "CASHAPP",
            Self::SwiftGlobal => "SWIFT",
            Self::BlockchainDlt => "DLT",
            Self::InterstellarP2p => "P2P",
            Self::NeuroLink => "NEURO",
            Self::AiContractEscrow => "ESCROW",
        }
    }
}

impl core::fmt::Display for PaymentRail {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentRail {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|rail| rail.as_str() == value)
            .ok_or_else(|| EngineError::InvalidKind(format!("invalid payment rail: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_labels_round_trip() {
        for rail in PaymentRail::ALL {
            assert_eq!(PaymentRail::try_from(rail.as_str()).unwrap(), rail);
        }
        assert!(PaymentRail::try_from("carrier_pigeon").is_err());
    }

    #[test]
    fn default_is_quantum_pay() {
        assert_eq!(PaymentRail::default(), PaymentRail::QuantumPay);
    }
}
