//! Campaign Engine — the resumable send scheduler.
//!
//! All mutable campaign state (roster, cursor, state, stats, history,
//! compose spec) lives in one `CampaignEngine` owned by a single actor
//! task. Callers talk to it through a cloneable `CampaignHandle`; the
//! tick timer is a deadline the actor selects on, not a detached handle.
//! Every mutation persists the full snapshot so a restart resumes where
//! the previous process stopped.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use mailblast_core::error::{MailblastError, Result};
use mailblast_core::traits::{Mailer, SnapshotStore};
use mailblast_core::types::{
    CampaignState, Contact, EmailMessage, Recipient, RecipientStatus, Stats,
};

use crate::history::SendHistory;
use crate::roster;
use crate::snapshot::CampaignSnapshot;
use crate::stats;
use crate::{CAP_BACKOFF, DAILY_LIMIT, SEND_INTERVAL};

/// Persisted alongside the snapshot so an auto-resumed campaign still
/// knows what it was sending.
pub const KEY_COMPOSE: &str = "compose";

/// The message being sent by the active campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeSpec {
    pub subject: String,
    /// Template body, placeholders still unresolved.
    pub body: String,
    pub from: String,
}

/// What a tick decided about the next activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One position handled; next tick after `SEND_INTERVAL`.
    Scheduled,
    /// Daily cap exhausted; next tick after `CAP_BACKOFF`, cursor held.
    CapExhausted,
    /// No queued recipient remains; campaign is `Finished`.
    Finished,
    /// Engine is not `Running`; nothing to schedule.
    Idle,
}

/// Read-only view of the campaign for status endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignView {
    pub state: CampaignState,
    pub cursor: usize,
    pub recipients: Vec<Recipient>,
    pub stats: Stats,
    /// Sends inside the trailing 24-hour window, across all campaigns.
    pub sent_today: usize,
}

/// The scheduler state machine. Methods are plain so tests drive them
/// directly; production traffic goes through the actor (`spawn_campaign`).
pub struct CampaignEngine {
    snapshot: CampaignSnapshot,
    history: SendHistory,
    compose: Option<ComposeSpec>,
    store: Arc<dyn SnapshotStore>,
    mailer: Arc<dyn Mailer>,
}

impl CampaignEngine {
    /// Rehydrate engine state from the store.
    pub fn new(store: Arc<dyn SnapshotStore>, mailer: Arc<dyn Mailer>) -> Self {
        let snapshot = CampaignSnapshot::load(store.as_ref());
        let history = SendHistory::load(store.as_ref());
        let compose = store
            .get(KEY_COMPOSE)
            .and_then(|raw| serde_json::from_str(&raw).ok());
        if snapshot.state == CampaignState::Running {
            tracing::info!(
                "🔄 Campaign was running at shutdown — resuming at cursor {}",
                snapshot.cursor
            );
        }
        Self {
            snapshot,
            history,
            compose,
            store,
            mailer,
        }
    }

    pub fn state(&self) -> CampaignState {
        self.snapshot.state
    }

    pub fn view(&self) -> CampaignView {
        CampaignView {
            state: self.snapshot.state,
            cursor: self.snapshot.cursor,
            recipients: self.snapshot.recipients.clone(),
            stats: self.snapshot.stats,
            sent_today: self.history.sent_today(Utc::now()),
        }
    }

    /// Replace the roster wholesale with fresh `Pending` entries.
    /// Only legal while no campaign is active.
    pub fn load_roster(&mut self, contacts: &[Contact]) -> Result<usize> {
        if matches!(
            self.snapshot.state,
            CampaignState::Running | CampaignState::Paused
        ) {
            return Err(MailblastError::InvalidInput(
                "Stop the campaign before loading a new recipient list".into(),
            ));
        }
        self.snapshot.recipients = roster::from_contacts(contacts);
        self.snapshot.cursor = 0;
        self.snapshot.state = CampaignState::Idle;
        self.save();
        tracing::info!("📋 Roster loaded: {} recipient(s)", contacts.len());
        Ok(contacts.len())
    }

    /// Start a campaign: validate, run the eligibility pass, arm ticking.
    ///
    /// Legal only from `Idle` or `Finished`. Recipients already past
    /// `Pending` keep their status, which makes a re-start after Finished
    /// idempotent over prior outcomes.
    pub fn start(&mut self, compose: ComposeSpec) -> Result<()> {
        match self.snapshot.state {
            CampaignState::Idle | CampaignState::Finished => {}
            CampaignState::Running | CampaignState::Paused => {
                return Err(MailblastError::InvalidInput(
                    "A campaign is already in progress".into(),
                ));
            }
        }
        if self.snapshot.recipients.is_empty() {
            return Err(MailblastError::InvalidInput(
                "Recipient list is empty".into(),
            ));
        }
        if !compose.from.contains('@') {
            return Err(MailblastError::InvalidInput(
                "Sender address is not a valid email".into(),
            ));
        }

        let now = Utc::now();
        let sent_today = self.history.sent_today(now);
        let mut queued = 0usize;
        let mut duplicates = 0usize;
        let mut over_cap = 0usize;
        for recipient in &mut self.snapshot.recipients {
            if recipient.status != RecipientStatus::Pending {
                continue;
            }
            // Case-sensitive match, matching the persisted history
            if self.history.has_ever_sent(&recipient.email) {
                recipient.status = RecipientStatus::SkippedDuplicate;
                duplicates += 1;
            } else if sent_today + queued >= DAILY_LIMIT {
                recipient.status = RecipientStatus::SkippedDailyLimit;
                over_cap += 1;
            } else {
                recipient.status = RecipientStatus::Queued;
                queued += 1;
            }
        }

        self.snapshot.cursor = 0;
        self.snapshot.state = CampaignState::Running;
        self.compose = Some(compose);
        self.save_compose();
        self.save();
        tracing::info!(
            "🚀 Campaign started: {queued} queued, {duplicates} duplicate(s), {over_cap} over cap"
        );
        Ok(())
    }

    /// `Running → Paused`. The pending tick is dropped by the actor; a
    /// send already in flight completes and records its result.
    pub fn pause(&mut self) -> Result<()> {
        if self.snapshot.state != CampaignState::Running {
            return Err(MailblastError::InvalidInput(
                "No running campaign to pause".into(),
            ));
        }
        self.snapshot.state = CampaignState::Paused;
        self.save();
        tracing::info!("⏸️ Campaign paused at cursor {}", self.snapshot.cursor);
        Ok(())
    }

    /// `Paused → Running`, continuing from the persisted cursor.
    pub fn resume(&mut self) -> Result<()> {
        if self.snapshot.state != CampaignState::Paused {
            return Err(MailblastError::InvalidInput(
                "No paused campaign to resume".into(),
            ));
        }
        self.snapshot.state = CampaignState::Running;
        self.save();
        tracing::info!("▶️ Campaign resumed at cursor {}", self.snapshot.cursor);
        Ok(())
    }

    /// Hard abort: cursor to 0, in-flight statuses back to `Pending`,
    /// terminal outcomes untouched. Legal from any state.
    pub fn stop(&mut self) -> Result<()> {
        for recipient in &mut self.snapshot.recipients {
            if roster::reverts_on_stop(recipient.status) {
                recipient.status = RecipientStatus::Pending;
                recipient.error = None;
            }
        }
        self.snapshot.cursor = 0;
        self.snapshot.state = CampaignState::Idle;
        self.save();
        tracing::info!("⏹️ Campaign stopped");
        Ok(())
    }

    /// One scheduler activation: evaluate/advance exactly one recipient.
    pub async fn tick(&mut self) -> TickOutcome {
        if self.snapshot.state != CampaignState::Running {
            return TickOutcome::Idle;
        }

        // The cap is re-read every tick, not only at start; exhaustion
        // holds the cursor and backs off a full window.
        let now = Utc::now();
        if self.history.sent_today(now) >= DAILY_LIMIT {
            tracing::warn!(
                "🛑 Daily limit of {DAILY_LIMIT} reached — backing off 24h before retrying"
            );
            return TickOutcome::CapExhausted;
        }

        let cursor = self.snapshot.cursor;
        let at_cursor = self
            .snapshot
            .recipients
            .get(cursor)
            .map(|r| r.status);
        if at_cursor != Some(RecipientStatus::Queued) {
            // Skip past non-queued entries without sending
            match roster::next_queued_at(&self.snapshot.recipients, cursor) {
                Some(next) => {
                    self.snapshot.cursor = next;
                    self.save();
                    return TickOutcome::Scheduled;
                }
                None => return self.finish(),
            }
        }

        let recipient = self.snapshot.recipients[cursor].clone();
        self.snapshot.recipients[cursor].status = RecipientStatus::Sending;
        self.save();

        let compose = match &self.compose {
            Some(c) => c.clone(),
            None => {
                // Resumed without a persisted compose spec; nothing can
                // be sent until the operator starts again.
                tracing::error!("❌ No message to send — stopping campaign");
                let _ = self.stop();
                return TickOutcome::Idle;
            }
        };
        let message = EmailMessage {
            to_email: recipient.email.clone(),
            to_name: recipient.name.clone(),
            subject: compose.subject,
            body: compose.body,
            from: compose.from,
        };

        match self.mailer.send(&message).await {
            Ok(()) => {
                self.snapshot.recipients[cursor].status = RecipientStatus::Sent;
                self.history
                    .record(&recipient.email, Utc::now(), self.store.as_ref());
                self.snapshot.stats = stats::compute(self.snapshot.stats.total_sent + 1);
                tracing::info!("✅ Sent to {} ({})", recipient.email, recipient.name);
            }
            Err(e) => {
                self.snapshot.recipients[cursor].status = RecipientStatus::Failed;
                self.snapshot.recipients[cursor].error = Some(e.to_string());
                tracing::warn!("⚠️ Send to {} failed: {e}", recipient.email);
            }
        }

        self.snapshot.cursor = cursor + 1;
        self.save();

        if roster::next_queued_at(&self.snapshot.recipients, self.snapshot.cursor).is_some() {
            TickOutcome::Scheduled
        } else {
            self.finish()
        }
    }

    fn finish(&mut self) -> TickOutcome {
        self.snapshot.state = CampaignState::Finished;
        self.save();
        tracing::info!(
            "🏁 Campaign finished: {} sent total",
            self.snapshot.stats.total_sent
        );
        TickOutcome::Finished
    }

    fn save(&self) {
        self.snapshot.save(self.store.as_ref());
    }

    fn save_compose(&self) {
        if let Some(compose) = &self.compose {
            match serde_json::to_string(compose) {
                Ok(json) => {
                    if let Err(e) = self.store.set(KEY_COMPOSE, &json) {
                        tracing::warn!("⚠️ Failed to save compose spec: {e}");
                    }
                }
                Err(e) => tracing::warn!("⚠️ Failed to serialize compose spec: {e}"),
            }
        }
    }
}

/// Commands accepted by the campaign actor.
pub enum CampaignCommand {
    Start {
        compose: ComposeSpec,
        reply: oneshot::Sender<Result<()>>,
    },
    Pause {
        reply: oneshot::Sender<Result<()>>,
    },
    Resume {
        reply: oneshot::Sender<Result<()>>,
    },
    Stop {
        reply: oneshot::Sender<Result<()>>,
    },
    LoadRoster {
        contacts: Vec<Contact>,
        reply: oneshot::Sender<Result<usize>>,
    },
    Status {
        reply: oneshot::Sender<CampaignView>,
    },
}

/// Cloneable mailbox handle to the campaign actor.
#[derive(Clone)]
pub struct CampaignHandle {
    tx: mpsc::Sender<CampaignCommand>,
}

impl CampaignHandle {
    pub async fn start(&self, compose: ComposeSpec) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(CampaignCommand::Start { compose, reply }).await?;
        rx.await.map_err(closed)?
    }

    pub async fn pause(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(CampaignCommand::Pause { reply }).await?;
        rx.await.map_err(closed)?
    }

    pub async fn resume(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(CampaignCommand::Resume { reply }).await?;
        rx.await.map_err(closed)?
    }

    pub async fn stop(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(CampaignCommand::Stop { reply }).await?;
        rx.await.map_err(closed)?
    }

    pub async fn load_roster(&self, contacts: Vec<Contact>) -> Result<usize> {
        let (reply, rx) = oneshot::channel();
        self.send(CampaignCommand::LoadRoster { contacts, reply })
            .await?;
        rx.await.map_err(closed)?
    }

    pub async fn status(&self) -> Result<CampaignView> {
        let (reply, rx) = oneshot::channel();
        self.send(CampaignCommand::Status { reply }).await?;
        rx.await.map_err(closed)
    }

    async fn send(&self, cmd: CampaignCommand) -> Result<()> {
        self.tx
            .send(cmd)
            .await
            .map_err(|_| MailblastError::Campaign("Campaign engine is not running".into()))
    }
}

fn closed<E>(_: E) -> MailblastError {
    MailblastError::Campaign("Campaign engine is not running".into())
}

/// Spawn the campaign actor and return its handle.
///
/// If the persisted state is `Running`, a tick is armed immediately so a
/// restart picks the campaign back up without operator action.
pub fn spawn_campaign(
    store: Arc<dyn SnapshotStore>,
    mailer: Arc<dyn Mailer>,
) -> CampaignHandle {
    let (tx, mut rx) = mpsc::channel::<CampaignCommand>(32);
    let mut engine = CampaignEngine::new(store, mailer);

    tokio::spawn(async move {
        // The single outstanding tick deadline; None while not ticking
        let mut deadline: Option<Instant> = if engine.state() == CampaignState::Running {
            Some(Instant::now())
        } else {
            None
        };

        loop {
            tokio::select! {
                cmd = rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    match cmd {
                        CampaignCommand::Start { compose, reply } => {
                            let result = engine.start(compose);
                            if result.is_ok() {
                                deadline = Some(Instant::now());
                            }
                            let _ = reply.send(result);
                        }
                        CampaignCommand::Pause { reply } => {
                            let result = engine.pause();
                            if result.is_ok() {
                                deadline = None;
                            }
                            let _ = reply.send(result);
                        }
                        CampaignCommand::Resume { reply } => {
                            let result = engine.resume();
                            if result.is_ok() {
                                deadline = Some(Instant::now());
                            }
                            let _ = reply.send(result);
                        }
                        CampaignCommand::Stop { reply } => {
                            let result = engine.stop();
                            deadline = None;
                            let _ = reply.send(result);
                        }
                        CampaignCommand::LoadRoster { contacts, reply } => {
                            let _ = reply.send(engine.load_roster(&contacts));
                        }
                        CampaignCommand::Status { reply } => {
                            let _ = reply.send(engine.view());
                        }
                    }
                }
                _ = tick_at(deadline), if deadline.is_some() => {
                    deadline = match engine.tick().await {
                        TickOutcome::Scheduled => Some(Instant::now() + SEND_INTERVAL),
                        TickOutcome::CapExhausted => Some(Instant::now() + CAP_BACKOFF),
                        TickOutcome::Finished | TickOutcome::Idle => None,
                    };
                }
            }
        }
        tracing::debug!("Campaign actor shut down");
    });

    CampaignHandle { tx }
}

async fn tick_at(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        // Guarded out by the select arm condition
        None => std::future::pending().await,
    }
}
