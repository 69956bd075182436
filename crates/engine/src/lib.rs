pub use audit::{
    AUDIT_DELAY, BASELINE_CEILING, ComplianceVerdict, FixedRiskSource, HIGH_VALUE_PENALTY,
    HIGH_VALUE_THRESHOLD, RiskSource, ScreeningVerdict, SecurityAuditResult, ThreadRngSource,
    assess,
};
pub use biometric::{
    BiometricSequence, CameraFeed, CameraSource, DEFAULT_CAMERA_DEVICE, DeviceCamera, STAGES,
    ScanStage, ScanState,
};
pub use currency::Currency;
pub use error::EngineError;
pub use money::Money;
pub use rails::PaymentRail;
pub use recipients::{KycStatus, RecipientDirectory, RecipientProfile};
pub use store::{MfaMethod, Store, ThemePreference, UserPreferences, UserSecurityProfile};
pub use transactions::{ScheduleFrequency, ScheduleRule, Transaction, TransactionKind};
pub use wizard::{AuditTicket, CommitReceipt, InsightTicket, Wizard, WizardStep};

mod audit;
mod biometric;
mod currency;
mod error;
mod money;
mod rails;
mod recipients;
mod store;
mod transactions;
mod wizard;

type ResultEngine<T> = Result<T, EngineError>;
