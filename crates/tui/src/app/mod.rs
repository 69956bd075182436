use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyEvent};
use tokio::{sync::mpsc, task::JoinHandle, time::sleep};

use engine::{
    AUDIT_DELAY, AuditTicket, BiometricSequence, CommitReceipt, DeviceCamera, InsightTicket,
    PaymentRail, RecipientDirectory, ScanStage, Store, ThreadRngSource, Transaction,
    TransactionKind, Wizard, WizardStep, assess,
};
use insight::{InsightClient, InsightRequest};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Send,
    Ledger,
    Settings,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Send => "Send",
            Self::Ledger => "Ledger",
            Self::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerFilter {
    All,
    Expense,
    Income,
    Scheduled,
}

impl LedgerFilter {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
            Self::Scheduled => "SCHEDULED",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::All => Self::Expense,
            Self::Expense => Self::Income,
            Self::Income => Self::Scheduled,
            Self::Scheduled => Self::All,
        }
    }

    pub fn matches(self, tx: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Expense => tx.kind == TransactionKind::Expense,
            Self::Income => tx.kind == TransactionKind::Income,
            Self::Scheduled => tx.kind == TransactionKind::ScheduledExpense,
        }
    }
}

#[derive(Debug)]
pub struct LedgerState {
    pub filter: LedgerFilter,
    pub selected: usize,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            filter: LedgerFilter::All,
            selected: 0,
        }
    }
}

impl LedgerState {
    /// Newest-first view of the store under the active filter.
    pub fn filtered<'a>(&self, store: &'a Store) -> Vec<&'a Transaction> {
        store
            .transactions()
            .iter()
            .filter(|tx| self.filter.matches(tx))
            .collect()
    }

    fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected = 0;
    }

    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendFocus {
    Rail,
    Search,
    Amount,
}

impl SendFocus {
    fn next(self) -> Self {
        match self {
            Self::Rail => Self::Search,
            Self::Search => Self::Amount,
            Self::Amount => Self::Rail,
        }
    }
}

#[derive(Debug)]
pub struct SendState {
    pub wizard: Wizard,
    pub focus: SendFocus,
    pub receipt: Option<CommitReceipt>,
}

impl SendState {
    fn fresh() -> Self {
        Self {
            wizard: Wizard::new(RecipientDirectory::default()),
            focus: SendFocus::Search,
            receipt: None,
        }
    }
}

/// One open run of the biometric gate: the staged sequence plus the timer
/// task driving it. Aborting the task and closing the sequence must happen
/// on every exit path.
#[derive(Debug)]
pub struct BiometricGate {
    pub sequence: BiometricSequence,
    epoch: u64,
    timers: JoinHandle<()>,
}

impl BiometricGate {
    fn shut(mut self) {
        self.timers.abort();
        self.sequence.close();
    }
}

#[derive(Debug)]
pub struct AppState {
    pub store: Store,
    pub section: Section,
    pub ledger: LedgerState,
    pub send: SendState,
    pub biometric: Option<BiometricGate>,
}

/// Completions reported back by spawned tasks. Tasks never touch state;
/// every mutation happens on the update loop when these are drained.
enum AppEvent {
    AuditElapsed(AuditTicket),
    InsightsReady(InsightTicket, Vec<String>),
    BiometricStage(u64, ScanStage),
}

pub struct App {
    client: InsightClient,
    camera: DeviceCamera,
    risk: ThreadRngSource,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    audit_timer: Option<JoinHandle<()>>,
    biometric_epoch: u64,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = InsightClient::new(&config.insight_base_url, config.insight_api_key.clone())?;
        let camera = DeviceCamera::new(&config.camera_device);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let state = AppState {
            store: Store::new(Utc::now().date_naive()),
            section: Section::Overview,
            ledger: LedgerState::default(),
            send: SendState::fresh(),
            biometric: None,
        };

        Ok(Self {
            client,
            camera,
            risk: ThreadRngSource,
            events_tx,
            events_rx,
            audit_timer: None,
            biometric_epoch: 0,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        self.cancel_tasks();
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_app_event(event);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        use crate::ui::keymap::{AppAction, map_key};

        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        // The biometric modal is a blocking gate: only abort gets through.
        if self.state.biometric.is_some() {
            if action == AppAction::Cancel {
                self.abort_biometric();
            }
            return;
        }

        match self.state.section {
            Section::Send => self.handle_send_key(action),
            _ => self.handle_nav_key(action),
        }
    }

    fn handle_nav_key(&mut self, action: crate::ui::keymap::AppAction) {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Up => {
                if self.state.section == Section::Ledger {
                    self.state.ledger.select_prev();
                }
            }
            AppAction::Down => {
                if self.state.section == Section::Ledger {
                    let len = self.state.ledger.filtered(&self.state.store).len();
                    self.state.ledger.select_next(len);
                }
            }
            AppAction::Input(ch) => match ch {
                'q' | 'Q' => self.should_quit = true,
                'o' | 'O' => self.set_section(Section::Overview),
                's' | 'S' => self.set_section(Section::Send),
                'l' | 'L' => self.set_section(Section::Ledger),
                'g' | 'G' => self.set_section(Section::Settings),
                'c' | 'C' if self.state.section == Section::Ledger => {
                    self.state.ledger.cycle_filter();
                }
                'j' | 'J' if self.state.section == Section::Ledger => {
                    let len = self.state.ledger.filtered(&self.state.store).len();
                    self.state.ledger.select_next(len);
                }
                'k' | 'K' if self.state.section == Section::Ledger => {
                    self.state.ledger.select_prev();
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_send_key(&mut self, action: crate::ui::keymap::AppAction) {
        match self.state.send.wizard.step() {
            WizardStep::Entry => self.handle_entry_key(action),
            WizardStep::Review => self.handle_review_key(action),
            WizardStep::Confirmed => self.handle_confirmed_key(action),
        }
    }

    fn handle_entry_key(&mut self, action: crate::ui::keymap::AppAction) {
        use crate::ui::keymap::AppAction;

        match action {
            // Leaving the screen unmounts the wizard and discards the draft.
            AppAction::Cancel => self.set_section(Section::Overview),
            AppAction::NextField => {
                self.state.send.focus = self.state.send.focus.next();
            }
            AppAction::Submit => self.submit_wizard(),
            AppAction::Left => self.shift_rail(-1),
            AppAction::Right => self.shift_rail(1),
            AppAction::Backspace => match self.state.send.focus {
                SendFocus::Search => {
                    let mut term = self.state.send.wizard.search_term().to_string();
                    term.pop();
                    self.edit_search(term);
                }
                SendFocus::Amount => {
                    let mut input = self.state.send.wizard.amount_input().to_string();
                    input.pop();
                    self.edit_amount(input);
                }
                SendFocus::Rail => {}
            },
            AppAction::Input(ch) => match self.state.send.focus {
                SendFocus::Search => {
                    let mut term = self.state.send.wizard.search_term().to_string();
                    term.push(ch);
                    self.edit_search(term);
                }
                SendFocus::Amount => {
                    if ch.is_ascii_digit() || ch == '.' || ch == ',' {
                        let mut input = self.state.send.wizard.amount_input().to_string();
                        input.push(ch);
                        self.edit_amount(input);
                    }
                }
                SendFocus::Rail => {
                    if let Some(index) = ch.to_digit(10) {
                        let index = index as usize;
                        if (1..=PaymentRail::ALL.len()).contains(&index) {
                            self.state.send.wizard.set_rail(PaymentRail::ALL[index - 1]);
                        }
                    }
                }
            },
            _ => {}
        }
    }

    fn handle_review_key(&mut self, action: crate::ui::keymap::AppAction) {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Submit => self.open_biometric(),
            AppAction::Cancel => {
                self.state.send.wizard.adjust();
            }
            AppAction::Input('a' | 'A') => {
                self.state.send.wizard.adjust();
            }
            _ => {}
        }
    }

    fn handle_confirmed_key(&mut self, action: crate::ui::keymap::AppAction) {
        use crate::ui::keymap::AppAction;

        if matches!(action, AppAction::Submit | AppAction::Cancel) {
            self.set_section(Section::Overview);
        }
    }

    fn shift_rail(&mut self, delta: isize) {
        let rails = PaymentRail::ALL;
        let current = rails
            .iter()
            .position(|rail| *rail == self.state.send.wizard.rail())
            .unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(rails.len() as isize) as usize;
        self.state.send.wizard.set_rail(rails[next]);
    }

    fn edit_search(&mut self, term: String) {
        if let Some(ticket) = self.state.send.wizard.set_search(&term) {
            self.arm_audit(ticket);
        }
    }

    fn edit_amount(&mut self, input: String) {
        if let Some(ticket) = self.state.send.wizard.set_amount(&input) {
            self.arm_audit(ticket);
        }
    }

    /// Schedules the delayed audit delivery for `ticket`, aborting any timer
    /// from a superseded arming.
    fn arm_audit(&mut self, ticket: AuditTicket) {
        if let Some(task) = self.audit_timer.take() {
            task.abort();
        }
        let tx = self.events_tx.clone();
        self.audit_timer = Some(tokio::spawn(async move {
            sleep(AUDIT_DELAY).await;
            let _ = tx.send(AppEvent::AuditElapsed(ticket));
        }));
    }

    fn submit_wizard(&mut self) {
        let Some(ticket) = self.state.send.wizard.submit() else {
            return;
        };

        let wizard = &self.state.send.wizard;
        let request = InsightRequest {
            amount: wizard.amount_input().to_string(),
            currency: self.state.store.preferences().currency.code().to_string(),
            recipient_name: wizard
                .selected()
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            rail: wizard.rail().as_str().to_string(),
        };

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let insights = client.fetch(&request).await;
            let _ = tx.send(AppEvent::InsightsReady(ticket, insights));
        });
    }

    fn open_biometric(&mut self) {
        if !self.state.send.wizard.authorize() {
            return;
        }

        self.biometric_epoch += 1;
        let epoch = self.biometric_epoch;
        let sequence = BiometricSequence::open(&self.camera);

        let tx = self.events_tx.clone();
        let timers = tokio::spawn(async move {
            let mut elapsed = Duration::ZERO;
            for (at, stage) in engine::STAGES {
                sleep(at - elapsed).await;
                elapsed = at;
                if tx.send(AppEvent::BiometricStage(epoch, stage)).is_err() {
                    return;
                }
            }
        });

        self.state.biometric = Some(BiometricGate {
            sequence,
            epoch,
            timers,
        });
    }

    fn abort_biometric(&mut self) {
        if let Some(gate) = self.state.biometric.take() {
            gate.shut();
        }
        self.state.send.wizard.abort_biometric();
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AuditElapsed(ticket) => {
                let Some(amount) = self.state.send.wizard.parsed_amount() else {
                    return;
                };
                let result = assess(&mut self.risk, amount);
                self.state.send.wizard.apply_audit(ticket, result);
            }
            AppEvent::InsightsReady(ticket, insights) => {
                self.state.send.wizard.apply_insights(ticket, insights);
            }
            AppEvent::BiometricStage(epoch, stage) => {
                let Some(gate) = self.state.biometric.as_mut() else {
                    return;
                };
                if gate.epoch != epoch {
                    return;
                }
                if gate.sequence.advance(stage) {
                    self.state.biometric = None;
                    self.state.send.receipt = self
                        .state
                        .send
                        .wizard
                        .commit(&mut self.state.store, Utc::now());
                }
            }
        }
    }

    fn set_section(&mut self, section: Section) {
        if section == self.state.section {
            return;
        }
        if self.state.section == Section::Send {
            self.reset_send();
        }
        self.state.section = section;
    }

    /// Unmounts the wizard: cancels pending work and discards the draft.
    fn reset_send(&mut self) {
        self.cancel_tasks();
        self.state.send = SendState::fresh();
    }

    fn cancel_tasks(&mut self) {
        if let Some(task) = self.audit_timer.take() {
            task.abort();
        }
        if let Some(gate) = self.state.biometric.take() {
            gate.shut();
        }
    }
}
