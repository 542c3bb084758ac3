use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::entities::JobStatus;
use crate::services::totals::Totals;

/// Domain events published after a job card mutation commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    JobCardCreated {
        job_id: i64,
        job_no: i64,
    },
    LineItemsUpdated {
        job_id: i64,
        changes: usize,
    },
    JobStatusChanged {
        job_id: i64,
        from: JobStatus,
        to: JobStatus,
        actor_id: i64,
    },
    MechanicAssigned {
        job_id: i64,
        mechanic_id: Option<i64>,
    },
    TotalsRecalculated {
        job_id: i64,
        totals: Totals,
    },
    TaxRateUpdated {
        tax_rate: Decimal,
        jobs_recomputed: usize,
    },
    JobCardDeleted {
        job_id: i64,
        at: DateTime<Utc>,
    },
    JobCardRestored {
        job_id: i64,
    },
    JobCardUpdated {
        job_id: i64,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::JobCardCreated { .. } => "job_card_created",
            Event::LineItemsUpdated { .. } => "line_items_updated",
            Event::JobStatusChanged { .. } => "job_status_changed",
            Event::MechanicAssigned { .. } => "mechanic_assigned",
            Event::TotalsRecalculated { .. } => "totals_recalculated",
            Event::TaxRateUpdated { .. } => "tax_rate_updated",
            Event::JobCardDeleted { .. } => "job_card_deleted",
            Event::JobCardRestored { .. } => "job_card_restored",
            Event::JobCardUpdated { .. } => "job_card_updated",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Bounded channel plus the sender wrapping it.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the consumer is gone.
    pub async fn send_or_log(&self, event: Event) {
        let name = event.name();
        if let Err(e) = self.send(event).await {
            warn!(event = name, error = %e, "dropping domain event");
        }
    }
}

/// Drains the event channel until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::JobStatusChanged {
                job_id,
                from,
                to,
                actor_id,
            } => {
                info!(job_id, %from, %to, actor_id, "job card status changed");
            }
            Event::TaxRateUpdated {
                tax_rate,
                jobs_recomputed,
            } => {
                info!(%tax_rate, jobs_recomputed, "tax rate updated");
            }
            other => {
                debug!(event = other.name(), payload = ?other, "domain event");
            }
        }
    }

    info!("Event processing loop stopped");
}
