//! Recipient reference data.
//!
//! The directory is a fixed sample set; the wizard resolves the search box
//! against it but never owns or mutates a profile.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Verified,
    Pending,
    Unverified,
}

impl KycStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Pending => "pending",
            Self::Unverified => "unverified",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipientProfile {
    pub id: String,
    pub name: String,
    pub quantum_tag: Option<String>,
    pub cashtag: Option<String>,
    pub neuro_link_address: Option<String>,
    /// 0-100, higher = more trusted.
    pub trust_score: u8,
    pub kyc_status: KycStatus,
}

/// Read-only lookup over the fixed recipient set.
#[derive(Clone, Debug)]
pub struct RecipientDirectory {
    profiles: Vec<RecipientProfile>,
}

impl Default for RecipientDirectory {
    fn default() -> Self {
        Self::with_profiles(sample_profiles())
    }
}

impl RecipientDirectory {
    #[must_use]
    pub fn with_profiles(profiles: Vec<RecipientProfile>) -> Self {
        Self { profiles }
    }

    #[must_use]
    pub fn profiles(&self) -> &[RecipientProfile] {
        &self.profiles
    }

    /// Resolves a search term to the first matching profile.
    ///
    /// Terms of 2 characters or fewer never resolve. Matching is a
    /// case-insensitive substring test against the display name and the
    /// quantum tag. Pure and synchronous: repeated calls with the same term
    /// yield the same profile.
    #[must_use]
    pub fn resolve(&self, term: &str) -> Option<&RecipientProfile> {
        if term.chars().count() <= 2 {
            return None;
        }
        let needle = term.to_lowercase();
        self.profiles.iter().find(|profile| {
            profile.name.to_lowercase().contains(&needle)
                || profile
                    .quantum_tag
                    .as_ref()
                    .is_some_and(|tag| tag.to_lowercase().contains(&needle))
        })
    }
}

fn sample_profiles() -> Vec<RecipientProfile> {
    vec![
        RecipientProfile {
            id: "r1".to_string(),
            name: "Alice Qubits".to_string(),
            quantum_tag: Some("@alice_q".to_string()),
            cashtag: None,
            neuro_link_address: None,
            trust_score: 98,
            kyc_status: KycStatus::Verified,
        },
        RecipientProfile {
            id: "r2".to_string(),
            name: "Bob Ledger".to_string(),
            quantum_tag: None,
            cashtag: Some("$bob_l".to_string()),
            neuro_link_address: None,
            trust_score: 92,
            kyc_status: KycStatus::Verified,
        },
        RecipientProfile {
            id: "r3".to_string(),
            name: "NeuroCorp Entity".to_string(),
            quantum_tag: None,
            cashtag: None,
            neuro_link_address: Some("NL_CORP_99".to_string()),
            trust_score: 75,
            kyc_status: KycStatus::Pending,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_terms_never_resolve() {
        let directory = RecipientDirectory::default();
        assert!(directory.resolve("").is_none());
        assert!(directory.resolve("al").is_none());
    }

    #[test]
    fn resolves_by_name_case_insensitive() {
        let directory = RecipientDirectory::default();
        let hit = directory.resolve("alice").unwrap();
        assert_eq!(hit.id, "r1");
        let hit = directory.resolve("ALICE").unwrap();
        assert_eq!(hit.id, "r1");
    }

    #[test]
    fn resolves_by_quantum_tag() {
        let directory = RecipientDirectory::default();
        let hit = directory.resolve("@alice_q").unwrap();
        assert_eq!(hit.id, "r1");
        // Cashtags are not part of the match set.
        assert!(directory.resolve("$bob_l").is_none());
    }

    #[test]
    fn resolution_is_idempotent() {
        let directory = RecipientDirectory::default();
        let first = directory.resolve("neuro").map(|p| p.id.clone());
        let second = directory.resolve("neuro").map(|p| p.id.clone());
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("r3"));
    }

    #[test]
    fn unknown_terms_resolve_to_none() {
        let directory = RecipientDirectory::default();
        assert!(directory.resolve("zzz_nobody").is_none());
    }
}
