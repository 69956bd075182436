//! The send-money wizard.
//!
//! A three-step state machine: parameter entry, review, confirmation. The
//! wizard itself is fully synchronous; asynchronous work (the audit delay,
//! the insight fetch, the biometric timers) is requested through tickets and
//! applied back through `apply_*` methods. Tickets carry a generation
//! counter, so a result that was superseded while in flight is rejected
//! instead of racing: last triggered wins.
//!
//! The wizard is created fresh when the send screen mounts and discarded when
//! it unmounts or after a successful commit navigates away.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::{
    audit::SecurityAuditResult,
    money::Money,
    rails::PaymentRail,
    recipients::{RecipientDirectory, RecipientProfile},
    store::Store,
    transactions::{Transaction, TransactionKind},
};

/// kg CO2e attributed per major unit transferred.
const CARBON_EMISSION_FACTOR: f64 = 0.002;

const TRANSFER_CATEGORY: &str = "Quantum Transfer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Entry,
    Review,
    Confirmed,
}

impl WizardStep {
    /// 1-based step number for the progress indicator.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Entry => 1,
            Self::Review => 2,
            Self::Confirmed => 3,
        }
    }
}

/// Claim on the audit slot for one in-flight refresh.
///
/// Only the ticket from the latest arming is accepted by
/// [`Wizard::apply_audit`]; earlier tickets are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuditTicket(u64);

/// Claim on the insight slot for one in-flight fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsightTicket(u64);

/// Settlement details shown on the confirmation screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitReceipt {
    pub transaction_id: String,
    pub dlt_hash: String,
}

#[derive(Debug)]
pub struct Wizard {
    directory: RecipientDirectory,
    step: WizardStep,
    rail: PaymentRail,
    amount_input: String,
    search_term: String,
    selected: Option<RecipientProfile>,
    insights: Vec<String>,
    loading_insights: bool,
    insight_epoch: u64,
    biometric_open: bool,
    audit: Option<SecurityAuditResult>,
    audit_pending: bool,
    audit_epoch: u64,
}

impl Wizard {
    pub fn new(directory: RecipientDirectory) -> Self {
        Self {
            directory,
            step: WizardStep::Entry,
            rail: PaymentRail::default(),
            amount_input: String::new(),
            search_term: String::new(),
            selected: None,
            insights: Vec::new(),
            loading_insights: false,
            insight_epoch: 0,
            biometric_open: false,
            audit: None,
            audit_pending: false,
            audit_epoch: 0,
        }
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn rail(&self) -> PaymentRail {
        self.rail
    }

    #[must_use]
    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn selected(&self) -> Option<&RecipientProfile> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn insights(&self) -> &[String] {
        &self.insights
    }

    #[must_use]
    pub fn loading_insights(&self) -> bool {
        self.loading_insights
    }

    #[must_use]
    pub fn biometric_open(&self) -> bool {
        self.biometric_open
    }

    #[must_use]
    pub fn audit(&self) -> Option<&SecurityAuditResult> {
        self.audit.as_ref()
    }

    /// Whether an armed audit refresh has not delivered yet.
    #[must_use]
    pub fn audit_pending(&self) -> bool {
        self.audit_pending
    }

    /// The amount input parsed as a positive transfer magnitude.
    #[must_use]
    pub fn parsed_amount(&self) -> Option<Money> {
        self.amount_input
            .parse::<Money>()
            .ok()
            .filter(|amount| amount.is_positive())
    }

    pub fn set_rail(&mut self, rail: PaymentRail) {
        self.rail = rail;
    }

    /// Updates the raw amount input.
    ///
    /// Returns an [`AuditTicket`] when the change re-arms the audit (both a
    /// positive amount and a resolved recipient present); the caller owes a
    /// delayed [`Wizard::apply_audit`] for it.
    pub fn set_amount(&mut self, input: &str) -> Option<AuditTicket> {
        if input == self.amount_input {
            return None;
        }
        self.amount_input = input.to_string();
        self.rearm_audit()
    }

    /// Updates the recipient search text and re-resolves the selection.
    ///
    /// Resolution is pure and last-write-wins: every keystroke re-evaluates
    /// the fixed directory. Returns an [`AuditTicket`] when the resolved
    /// recipient changed and the audit re-armed.
    pub fn set_search(&mut self, term: &str) -> Option<AuditTicket> {
        if term == self.search_term {
            return None;
        }
        self.search_term = term.to_string();

        let resolved = self.directory.resolve(&self.search_term).cloned();
        let changed = resolved.as_ref().map(|r| r.id.as_str())
            != self.selected.as_ref().map(|r| r.id.as_str());
        self.selected = resolved;

        if changed { self.rearm_audit() } else { None }
    }

    /// Clears the audit slot and issues a new ticket when the audit guard
    /// (positive amount + resolved recipient) holds.
    fn rearm_audit(&mut self) -> Option<AuditTicket> {
        if self.parsed_amount().is_none() || self.selected.is_none() {
            return None;
        }
        self.audit = None;
        self.audit_pending = true;
        self.audit_epoch += 1;
        tracing::debug!(epoch = self.audit_epoch, "audit re-armed");
        Some(AuditTicket(self.audit_epoch))
    }

    /// Delivers a delayed audit result. Stale tickets are dropped.
    pub fn apply_audit(&mut self, ticket: AuditTicket, result: SecurityAuditResult) -> bool {
        if ticket.0 != self.audit_epoch || !self.audit_pending {
            tracing::debug!(epoch = ticket.0, "stale audit result dropped");
            return false;
        }
        self.audit = Some(result);
        self.audit_pending = false;
        true
    }

    /// Submit guard: a positive amount and a resolved recipient.
    ///
    /// When this is false the send action is inert (the control renders
    /// disabled); no error is raised.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.parsed_amount().is_some() && self.selected.is_some()
    }

    /// `Entry -> Review`. Issues exactly one insight ticket per successful
    /// submit; the caller owes a fetch and an [`Wizard::apply_insights`].
    pub fn submit(&mut self) -> Option<InsightTicket> {
        if self.step != WizardStep::Entry || !self.can_submit() {
            return None;
        }
        self.step = WizardStep::Review;
        self.loading_insights = true;
        self.insight_epoch += 1;
        tracing::debug!(epoch = self.insight_epoch, "insight fetch requested");
        Some(InsightTicket(self.insight_epoch))
    }

    /// Delivers fetched insight strings. Stale tickets are dropped.
    pub fn apply_insights(&mut self, ticket: InsightTicket, insights: Vec<String>) -> bool {
        if ticket.0 != self.insight_epoch {
            tracing::debug!(epoch = ticket.0, "stale insights dropped");
            return false;
        }
        self.insights = insights;
        self.loading_insights = false;
        true
    }

    /// `Review -> Entry`. Amount, recipient and rail are all retained.
    pub fn adjust(&mut self) -> bool {
        if self.step != WizardStep::Review || self.biometric_open {
            return false;
        }
        self.step = WizardStep::Entry;
        true
    }

    /// Opens the biometric gate. The step stays `Review` until the capture
    /// sequence completes.
    pub fn authorize(&mut self) -> bool {
        if self.step != WizardStep::Review || self.biometric_open {
            return false;
        }
        self.biometric_open = true;
        true
    }

    /// Closes the biometric gate without success: back to `Review`, no other
    /// state change, nothing appended to the ledger.
    pub fn abort_biometric(&mut self) -> bool {
        if !self.biometric_open {
            return false;
        }
        self.biometric_open = false;
        true
    }

    /// Biometric success path: synthesizes the transaction, appends it to the
    /// store and moves to `Confirmed`.
    pub fn commit(&mut self, store: &mut Store, now: DateTime<Utc>) -> Option<CommitReceipt> {
        if self.step != WizardStep::Review || !self.biometric_open {
            return None;
        }
        let amount = self.parsed_amount()?;

        let recipient_label = self
            .selected
            .as_ref()
            .map(|r| r.name.clone())
            .unwrap_or_else(|| self.search_term.clone());

        let id = format!("RTX-{}", now.timestamp_millis());
        let tx = Transaction::new(
            id.clone(),
            TransactionKind::Expense,
            TRANSFER_CATEGORY.to_string(),
            format!("Sent to {recipient_label} via {}", self.rail.as_str()),
            amount,
            now.date_naive(),
            amount.major_f64() * CARBON_EMISSION_FACTOR,
        )
        .ok()?;
        store.add_transaction(tx);

        self.biometric_open = false;
        self.step = WizardStep::Confirmed;
        tracing::info!(id = %id, rail = self.rail.as_str(), "transfer committed");

        Some(CommitReceipt {
            transaction_id: id,
            dlt_hash: settlement_hash(),
        })
    }
}

/// Decorative ledger hash for the confirmation screen.
fn settlement_hash() -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    let digits: String = (0..24)
        .map(|_| HEX[rng.gen_range(0..16)] as char)
        .collect();
    format!("0x{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{FixedRiskSource, assess};

    fn wizard() -> Wizard {
        Wizard::new(RecipientDirectory::default())
    }

    #[test]
    fn submit_is_inert_without_amount_or_recipient() {
        let mut wizard = wizard();
        assert!(!wizard.can_submit());
        assert!(wizard.submit().is_none());

        wizard.set_amount("500");
        assert!(!wizard.can_submit());
        assert!(wizard.submit().is_none());
        assert_eq!(wizard.step(), WizardStep::Entry);

        wizard.set_search("Alice");
        assert!(wizard.can_submit());
    }

    #[test]
    fn submit_is_inert_for_non_numeric_amounts() {
        let mut wizard = wizard();
        wizard.set_search("Alice");
        wizard.set_amount("lots");
        assert!(!wizard.can_submit());
        wizard.set_amount("-5");
        assert!(!wizard.can_submit());
    }

    #[test]
    fn submit_issues_exactly_one_insight_ticket() {
        let mut wizard = wizard();
        wizard.set_amount("500");
        wizard.set_search("Alice");

        let ticket = wizard.submit();
        assert!(ticket.is_some());
        assert_eq!(wizard.step(), WizardStep::Review);
        assert!(wizard.loading_insights());

        // Already in review: no second fetch.
        assert!(wizard.submit().is_none());
    }

    #[test]
    fn adjust_retains_all_inputs() {
        let mut wizard = wizard();
        wizard.set_rail(PaymentRail::NeuroLink);
        wizard.set_amount("500");
        wizard.set_search("Alice");
        wizard.submit();

        assert!(wizard.adjust());
        assert_eq!(wizard.step(), WizardStep::Entry);
        assert_eq!(wizard.amount_input(), "500");
        assert_eq!(wizard.search_term(), "Alice");
        assert_eq!(wizard.rail(), PaymentRail::NeuroLink);
        assert_eq!(wizard.selected().map(|r| r.id.as_str()), Some("r1"));
    }

    #[test]
    fn audit_rearms_on_amount_and_recipient_changes_only() {
        let mut wizard = wizard();

        // No recipient yet: no arming.
        assert!(wizard.set_amount("500").is_none());
        let first = wizard.set_search("Alice");
        assert!(first.is_some());
        assert!(wizard.audit_pending());
        assert!(wizard.audit().is_none());

        // Same search text again: no change, no re-arm.
        assert!(wizard.set_search("Alice").is_none());

        // Search text change that resolves to the same recipient: no re-arm.
        assert!(wizard.set_search("Alice Q").is_none());

        // Amount change: re-arm.
        let second = wizard.set_amount("1500");
        assert!(second.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn stale_audit_tickets_are_dropped() {
        let mut wizard = wizard();
        wizard.set_search("Alice");
        let stale = wizard.set_amount("500").unwrap();
        let current = wizard.set_amount("1500").unwrap();

        let result = assess(&mut FixedRiskSource(3), Money::new(150_000));
        assert!(!wizard.apply_audit(stale, result.clone()));
        assert!(wizard.audit().is_none());

        assert!(wizard.apply_audit(current, result));
        assert!(!wizard.audit_pending());
        assert_eq!(wizard.audit().unwrap().risk_score, 3 + 15);
    }

    #[test]
    fn stale_insight_tickets_are_dropped() {
        let mut wizard = wizard();
        wizard.set_amount("500");
        wizard.set_search("Alice");

        let stale = wizard.submit().unwrap();
        wizard.adjust();
        let current = wizard.submit().unwrap();

        assert!(!wizard.apply_insights(stale, vec!["old".to_string()]));
        assert!(wizard.loading_insights());
        assert!(wizard.apply_insights(current, vec!["fresh".to_string()]));
        assert_eq!(wizard.insights(), ["fresh".to_string()]);
    }

    #[test]
    fn authorize_only_from_review() {
        let mut wizard = wizard();
        assert!(!wizard.authorize());

        wizard.set_amount("500");
        wizard.set_search("Alice");
        wizard.submit();
        assert!(wizard.authorize());
        assert!(wizard.biometric_open());
        // Re-entrant authorize is refused while the gate is open.
        assert!(!wizard.authorize());
    }
}
