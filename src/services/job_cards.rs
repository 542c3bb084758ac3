use std::{sync::Arc, time::Instant};

use chrono::Utc;
use metrics::{counter, histogram};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::{
    assignment::{self, AssignmentOutcome},
    job_locks::JobLocks,
    job_status::{self, JobField, LockPolicy},
    ledger::{self, LineItem, LineItemChange, LineItemKind, NewLineItem},
    settings,
    totals::{self, PricedItem, Totals},
};
use crate::{
    auth::Principal,
    entities::{job_card, Customer, JobCard, JobCardModel, JobStatus, Vehicle},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Input for opening a new job card.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobInput {
    pub customer_id: i64,
    pub vehicle_id: i64,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub mechanic_notes: Option<String>,
}

/// A job card together with its ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCardDetails {
    pub job: JobCardModel,
    pub services: Vec<LineItem>,
    pub parts: Vec<LineItem>,
}

/// Filters for the active job card listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobCardQuery {
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub mechanic_id: Option<i64>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100))]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

impl Default for JobCardQuery {
    fn default() -> Self {
        Self {
            status: None,
            mechanic_id: None,
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCardPage {
    pub items: Vec<JobCardModel>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Result of a tax rate change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateUpdate {
    pub tax_rate: Decimal,
    pub jobs_recomputed: usize,
}

/// Job card lifecycle orchestrator.
///
/// Every mutation of a single job runs under that job's exclusive lock and
/// inside one database transaction: load, check the lock policy, mutate,
/// recompute totals when their inputs changed, commit. Events go out only
/// after the commit.
#[derive(Clone)]
pub struct JobCardService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    locks: JobLocks,
    creation_lock: Arc<AsyncMutex<()>>,
}

impl JobCardService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db,
            event_sender,
            locks: JobLocks::new(),
            creation_lock: Arc::new(AsyncMutex::new(())),
        }
    }

    /// Opens a job card with the next job number, status OPEN and zero totals.
    #[instrument(skip(self), err)]
    pub async fn create_job(&self, input: CreateJobInput) -> Result<JobCardModel, ServiceError> {
        input.validate()?;

        let job = {
            // Serializes number allocation in this process; the unique index
            // on job_no catches anything else.
            let _allocation = self.creation_lock.lock().await;

            let txn = self.db.begin().await?;
            ensure_vehicle_of_customer(&txn, input.customer_id, input.vehicle_id).await?;
            let job_no = next_job_no(&txn).await?;

            let now = Utc::now();
            let job = job_card::ActiveModel {
                job_no: Set(job_no),
                customer_id: Set(input.customer_id),
                vehicle_id: Set(input.vehicle_id),
                status: Set(JobStatus::Open),
                assigned_mechanic_id: Set(None),
                mechanic_notes: Set(input.mechanic_notes),
                services_amount: Set(Decimal::ZERO),
                parts_amount: Set(Decimal::ZERO),
                tax_amount: Set(Decimal::ZERO),
                grand_total: Set(Decimal::ZERO),
                deleted_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ServiceError::Conflict(format!("job number {} already taken", job_no))
                }
                _ => ServiceError::from(err),
            })?;

            txn.commit().await?;
            job
        };

        counter!("garage.job_cards.created", 1);
        self.event_sender
            .send_or_log(Event::JobCardCreated {
                job_id: job.id,
                job_no: job.job_no,
            })
            .await;

        info!(job_id = job.id, job_no = job.job_no, "Created job card");
        Ok(job)
    }

    #[instrument(skip(self), err)]
    pub async fn get_job(&self, job_id: i64) -> Result<JobCardDetails, ServiceError> {
        let job = load_active(&*self.db, job_id).await?;
        load_details(&*self.db, job).await
    }

    /// Active job cards, newest first.
    #[instrument(skip(self), err)]
    pub async fn list_jobs(&self, query: JobCardQuery) -> Result<JobCardPage, ServiceError> {
        query.validate()?;

        let mut select = JobCard::find().filter(job_card::Column::DeletedAt.is_null());
        if let Some(status) = query.status {
            select = select.filter(job_card::Column::Status.eq(status));
        }
        if let Some(mechanic_id) = query.mechanic_id {
            select = select.filter(job_card::Column::AssignedMechanicId.eq(mechanic_id));
        }

        let paginator = select
            .order_by_desc(job_card::Column::CreatedAt)
            .order_by_desc(job_card::Column::JobNo)
            .paginate(&*self.db, query.per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(query.page - 1).await?;

        Ok(JobCardPage {
            items,
            total,
            page: query.page,
            per_page: query.per_page,
        })
    }

    /// Soft-deleted job cards, most recently deleted first.
    #[instrument(skip(self), err)]
    pub async fn list_deleted(&self) -> Result<Vec<JobCardModel>, ServiceError> {
        Ok(JobCard::find()
            .filter(job_card::Column::DeletedAt.is_not_null())
            .order_by_desc(job_card::Column::DeletedAt)
            .all(&*self.db)
            .await?)
    }

    /// Applies a batch of ledger changes and recomputes totals, all or nothing.
    #[instrument(skip(self), err)]
    pub async fn update_line_items(
        &self,
        job_id: i64,
        changes: Vec<LineItemChange>,
        principal: Principal,
    ) -> Result<JobCardDetails, ServiceError> {
        if changes.is_empty() {
            return Err(ServiceError::ValidationError(
                "at least one line item change is required".to_string(),
            ));
        }
        for change in &changes {
            change.check()?;
        }

        let details = self
            .locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_active(&txn, job_id).await?;
                let policy = LockPolicy::for_job(job.status, principal.role);
                policy.ensure_editable(JobField::LineItems)?;

                for change in &changes {
                    ledger::apply_change(&txn, &policy, job_id, change).await?;
                }

                let job = recompute_totals(&txn, job).await?;
                let details = load_details(&txn, job).await?;
                txn.commit().await?;
                Ok::<_, ServiceError>(details)
            })
            .await
            .map_err(|err| log_rejection("update_line_items", job_id, err))?;

        self.event_sender
            .send_or_log(Event::LineItemsUpdated {
                job_id,
                changes: changes.len(),
            })
            .await;
        self.event_sender
            .send_or_log(Event::TotalsRecalculated {
                job_id,
                totals: details.job.totals(),
            })
            .await;

        info!(
            job_id,
            changes = changes.len(),
            grand_total = %details.job.grand_total,
            "Updated job card line items"
        );
        Ok(details)
    }

    pub async fn add_line_item(
        &self,
        job_id: i64,
        item: NewLineItem,
        principal: Principal,
    ) -> Result<JobCardDetails, ServiceError> {
        self.update_line_items(job_id, vec![LineItemChange::Add(item)], principal)
            .await
    }

    pub async fn remove_line_item(
        &self,
        job_id: i64,
        kind: LineItemKind,
        item_id: i64,
        principal: Principal,
    ) -> Result<JobCardDetails, ServiceError> {
        self.update_line_items(
            job_id,
            vec![LineItemChange::Remove { kind, id: item_id }],
            principal,
        )
        .await
    }

    /// Recomputes an active job's totals from its ledger and the current
    /// tax rate. Completed and billed jobs report their frozen totals.
    #[instrument(skip(self), err)]
    pub async fn recalculate_totals(&self, job_id: i64) -> Result<Totals, ServiceError> {
        self.locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_active(&txn, job_id).await?;
                if job.status.is_closed() {
                    return Ok(job.totals());
                }
                let job = recompute_totals(&txn, job).await?;
                txn.commit().await?;
                Ok::<_, ServiceError>(job.totals())
            })
            .await
    }

    /// Moves a job one step forward; entering COMPLETED recomputes totals.
    #[instrument(skip(self), err)]
    pub async fn change_status(
        &self,
        job_id: i64,
        target: JobStatus,
        principal: Principal,
    ) -> Result<JobCardModel, ServiceError> {
        let (from, job) = self
            .locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_active(&txn, job_id).await?;
                let from = job.status;
                let to = job_status::transition(from, target, principal.role)?;

                let mut active: job_card::ActiveModel = job.into();
                active.status = Set(to);
                active.updated_at = Set(Utc::now());
                let mut job = active.update(&txn).await?;

                if to == JobStatus::Completed {
                    job = recompute_totals(&txn, job).await?;
                }

                txn.commit().await?;
                Ok::<_, ServiceError>((from, job))
            })
            .await
            .map_err(|err| log_rejection("change_status", job_id, err))?;

        counter!("garage.job_cards.transitions", 1, "to" => job.status.to_string());
        self.event_sender
            .send_or_log(Event::JobStatusChanged {
                job_id,
                from,
                to: job.status,
                actor_id: principal.user_id,
            })
            .await;

        info!(job_id, %from, to = %job.status, "Changed job card status");
        Ok(job)
    }

    /// Same as [`change_status`](Self::change_status) with the target given by name.
    pub async fn change_status_named(
        &self,
        job_id: i64,
        target: &str,
        principal: Principal,
    ) -> Result<JobCardModel, ServiceError> {
        let target = job_status::parse_status(target)?;
        self.change_status(job_id, target, principal).await
    }

    #[instrument(skip(self), err)]
    pub async fn assign_mechanic(
        &self,
        job_id: i64,
        mechanic_id: i64,
        principal: Principal,
    ) -> Result<JobCardModel, ServiceError> {
        let outcome = self
            .locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_active(&txn, job_id).await?;
                let policy = LockPolicy::for_job(job.status, principal.role);
                let outcome = assignment::assign_mechanic(&txn, job, &policy, mechanic_id).await?;
                txn.commit().await?;
                Ok::<_, ServiceError>(outcome)
            })
            .await
            .map_err(|err| log_rejection("assign_mechanic", job_id, err))?;

        self.publish_assignment(&outcome).await;
        Ok(outcome.into_job())
    }

    #[instrument(skip(self), err)]
    pub async fn unassign_mechanic(
        &self,
        job_id: i64,
        principal: Principal,
    ) -> Result<JobCardModel, ServiceError> {
        let outcome = self
            .locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_active(&txn, job_id).await?;
                let policy = LockPolicy::for_job(job.status, principal.role);
                let outcome = assignment::unassign_mechanic(&txn, job, &policy).await?;
                txn.commit().await?;
                Ok::<_, ServiceError>(outcome)
            })
            .await
            .map_err(|err| log_rejection("unassign_mechanic", job_id, err))?;

        self.publish_assignment(&outcome).await;
        Ok(outcome.into_job())
    }

    async fn publish_assignment(&self, outcome: &AssignmentOutcome) {
        if !outcome.changed() {
            return;
        }
        let job = outcome.job();
        self.event_sender
            .send_or_log(Event::MechanicAssigned {
                job_id: job.id,
                mechanic_id: job.assigned_mechanic_id,
            })
            .await;
        info!(job_id = job.id, mechanic_id = ?job.assigned_mechanic_id, "Updated job card mechanic");
    }

    #[instrument(skip(self, notes), err)]
    pub async fn update_notes(
        &self,
        job_id: i64,
        notes: Option<String>,
        principal: Principal,
    ) -> Result<JobCardModel, ServiceError> {
        if notes.as_ref().is_some_and(|n| n.chars().count() > 5000) {
            return Err(ServiceError::ValidationError(
                "mechanic notes must be at most 5000 characters".to_string(),
            ));
        }

        let job = self
            .locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_active(&txn, job_id).await?;
                LockPolicy::for_job(job.status, principal.role).ensure_editable(JobField::Notes)?;

                let mut active: job_card::ActiveModel = job.into();
                active.mechanic_notes = Set(notes);
                active.updated_at = Set(Utc::now());
                let job = active.update(&txn).await?;
                txn.commit().await?;
                Ok::<_, ServiceError>(job)
            })
            .await
            .map_err(|err| log_rejection("update_notes", job_id, err))?;

        self.event_sender
            .send_or_log(Event::JobCardUpdated { job_id })
            .await;
        Ok(job)
    }

    /// Moves the job to another customer/vehicle pair while that is still allowed.
    #[instrument(skip(self), err)]
    pub async fn reassign_vehicle(
        &self,
        job_id: i64,
        customer_id: i64,
        vehicle_id: i64,
        principal: Principal,
    ) -> Result<JobCardModel, ServiceError> {
        let job = self
            .locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_active(&txn, job_id).await?;
                LockPolicy::for_job(job.status, principal.role)
                    .ensure_editable(JobField::CustomerVehicle)?;
                ensure_vehicle_of_customer(&txn, customer_id, vehicle_id).await?;

                let mut active: job_card::ActiveModel = job.into();
                active.customer_id = Set(customer_id);
                active.vehicle_id = Set(vehicle_id);
                active.updated_at = Set(Utc::now());
                let job = active.update(&txn).await?;
                txn.commit().await?;
                Ok::<_, ServiceError>(job)
            })
            .await
            .map_err(|err| log_rejection("reassign_vehicle", job_id, err))?;

        self.event_sender
            .send_or_log(Event::JobCardUpdated { job_id })
            .await;
        info!(job_id, customer_id, vehicle_id, "Reassigned job card vehicle");
        Ok(job)
    }

    /// Hides a job from active views. Totals and status are untouched.
    #[instrument(skip(self), err)]
    pub async fn soft_delete(
        &self,
        job_id: i64,
        principal: Principal,
    ) -> Result<JobCardModel, ServiceError> {
        let (job, changed) = self
            .locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_any(&txn, job_id).await?;
                LockPolicy::for_job(job.status, principal.role)
                    .ensure_editable(JobField::Lifecycle)?;
                if job.is_deleted() {
                    return Ok((job, false));
                }

                let now = Utc::now();
                let mut active: job_card::ActiveModel = job.into();
                active.deleted_at = Set(Some(now));
                active.updated_at = Set(now);
                let job = active.update(&txn).await?;
                txn.commit().await?;
                Ok::<_, ServiceError>((job, true))
            })
            .await
            .map_err(|err| log_rejection("soft_delete", job_id, err))?;

        if let (true, Some(at)) = (changed, job.deleted_at) {
            counter!("garage.job_cards.deleted", 1);
            self.event_sender
                .send_or_log(Event::JobCardDeleted { job_id, at })
                .await;
            info!(job_id, "Moved job card to trash");
        }
        Ok(job)
    }

    #[instrument(skip(self), err)]
    pub async fn restore(
        &self,
        job_id: i64,
        principal: Principal,
    ) -> Result<JobCardModel, ServiceError> {
        let (job, changed) = self
            .locks
            .run_exclusive(job_id, || async {
                let txn = self.db.begin().await?;
                let job = load_any(&txn, job_id).await?;
                LockPolicy::for_job(job.status, principal.role)
                    .ensure_editable(JobField::Lifecycle)?;
                if !job.is_deleted() {
                    return Ok((job, false));
                }

                let mut active: job_card::ActiveModel = job.into();
                active.deleted_at = Set(None);
                active.updated_at = Set(Utc::now());
                let job = active.update(&txn).await?;
                txn.commit().await?;
                Ok::<_, ServiceError>((job, true))
            })
            .await
            .map_err(|err| log_rejection("restore", job_id, err))?;

        if changed {
            self.event_sender
                .send_or_log(Event::JobCardRestored { job_id })
                .await;
            info!(job_id, "Restored job card from trash");
        }
        Ok(job)
    }

    /// Stores a new tax rate and recomputes every OPEN or IN_PROGRESS job.
    ///
    /// Each job is recomputed under its own lock and transaction; the fan-out
    /// stops at the first failure. Trashed jobs in an active status are
    /// included so that restoring them never shows stale totals.
    #[instrument(skip(self), err)]
    pub async fn update_tax_rate(
        &self,
        rate_percent: Decimal,
        principal: Principal,
    ) -> Result<TaxRateUpdate, ServiceError> {
        if !principal.role.is_admin() {
            warn!(user_id = principal.user_id, role = %principal.role, "Rejected tax rate change");
            return Err(ServiceError::Forbidden(
                "only an admin may change the tax rate".to_string(),
            ));
        }
        totals::check_tax_rate(rate_percent)?;

        let started = Instant::now();
        settings::set_tax_rate(&*self.db, rate_percent).await?;

        let job_ids: Vec<i64> = JobCard::find()
            .select_only()
            .column(job_card::Column::Id)
            .filter(job_card::Column::Status.is_in([JobStatus::Open, JobStatus::InProgress]))
            .order_by_asc(job_card::Column::Id)
            .into_tuple()
            .all(&*self.db)
            .await?;

        let mut jobs_recomputed = 0;
        for job_id in job_ids {
            let recomputed = self
                .locks
                .run_exclusive(job_id, || async {
                    let txn = self.db.begin().await?;
                    let Some(job) = JobCard::find_by_id(job_id).one(&txn).await? else {
                        return Ok(false);
                    };
                    // Completed or billed since the id scan: totals stay frozen.
                    if job.status.is_closed() {
                        return Ok(false);
                    }
                    recompute_totals(&txn, job).await?;
                    txn.commit().await?;
                    Ok::<_, ServiceError>(true)
                })
                .await?;
            if recomputed {
                jobs_recomputed += 1;
            }
        }

        histogram!("garage.tax_rate.fan_out_jobs", jobs_recomputed as f64);
        histogram!(
            "garage.tax_rate.fan_out_seconds",
            started.elapsed().as_secs_f64()
        );

        let update = TaxRateUpdate {
            tax_rate: rate_percent,
            jobs_recomputed,
        };
        self.event_sender
            .send_or_log(Event::TaxRateUpdated {
                tax_rate: update.tax_rate,
                jobs_recomputed,
            })
            .await;

        info!(tax_rate = %rate_percent, jobs_recomputed, "Updated tax rate");
        Ok(update)
    }

    pub async fn current_tax_rate(&self) -> Result<Decimal, ServiceError> {
        settings::get_tax_rate(&*self.db).await
    }
}

/// Recomputes and persists a job's totals from its ledger and the tax rate
/// visible on `conn`. Every write path that changes totals inputs ends here.
pub async fn recompute_totals<C: ConnectionTrait>(
    conn: &C,
    job: JobCardModel,
) -> Result<JobCardModel, ServiceError> {
    let tax_rate = settings::get_tax_rate(conn).await?;
    let items: Vec<PricedItem> = ledger::list_line_items(conn, job.id)
        .await?
        .iter()
        .map(LineItem::priced)
        .collect();
    let computed = totals::compute(&items, tax_rate)?;

    counter!("garage.job_cards.recomputed", 1);
    if computed == job.totals() {
        return Ok(job);
    }

    let mut active: job_card::ActiveModel = job.into();
    active.services_amount = Set(computed.services_amount);
    active.parts_amount = Set(computed.parts_amount);
    active.tax_amount = Set(computed.tax_amount);
    active.grand_total = Set(computed.grand_total);
    active.updated_at = Set(Utc::now());
    Ok(active.update(conn).await?)
}

async fn load_any<C: ConnectionTrait>(conn: &C, job_id: i64) -> Result<JobCardModel, ServiceError> {
    JobCard::find_by_id(job_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("job card {} not found", job_id)))
}

/// Loads a job that is not in the trash.
async fn load_active<C: ConnectionTrait>(
    conn: &C,
    job_id: i64,
) -> Result<JobCardModel, ServiceError> {
    let job = load_any(conn, job_id).await?;
    if job.is_deleted() {
        return Err(ServiceError::NotFound(format!(
            "job card {} is in the trash",
            job_id
        )));
    }
    Ok(job)
}

async fn load_details<C: ConnectionTrait>(
    conn: &C,
    job: JobCardModel,
) -> Result<JobCardDetails, ServiceError> {
    let (services, parts): (Vec<LineItem>, Vec<LineItem>) = ledger::list_line_items(conn, job.id)
        .await?
        .into_iter()
        .partition(|item| item.kind == LineItemKind::Service);
    Ok(JobCardDetails {
        job,
        services,
        parts,
    })
}

async fn next_job_no<C: ConnectionTrait>(conn: &C) -> Result<i64, ServiceError> {
    let max: Option<Option<i64>> = JobCard::find()
        .select_only()
        .column_as(job_card::Column::JobNo.max(), "max_job_no")
        .into_tuple()
        .one(conn)
        .await?;
    Ok(max.flatten().unwrap_or(0) + 1)
}

async fn ensure_vehicle_of_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: i64,
    vehicle_id: i64,
) -> Result<(), ServiceError> {
    Customer::find_by_id(customer_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("customer {} not found", customer_id)))?;
    let vehicle = Vehicle::find_by_id(vehicle_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("vehicle {} not found", vehicle_id)))?;

    if vehicle.customer_id != customer_id {
        return Err(ServiceError::ValidationError(format!(
            "vehicle {} does not belong to customer {}",
            vehicle_id, customer_id
        )));
    }
    Ok(())
}

fn log_rejection(operation: &'static str, job_id: i64, err: ServiceError) -> ServiceError {
    if err.is_policy_violation() {
        warn!(operation, job_id, error = %err, "Rejected job card mutation");
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_are_valid() {
        let query = JobCardQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 20);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn query_rejects_out_of_range_paging() {
        let zero_page = JobCardQuery {
            page: 0,
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());

        let huge_page = JobCardQuery {
            per_page: 101,
            ..Default::default()
        };
        assert!(huge_page.validate().is_err());
    }

    #[test]
    fn query_deserializes_status_filter() {
        let query: JobCardQuery =
            serde_json::from_value(serde_json::json!({ "status": "IN_PROGRESS" })).unwrap();
        assert_eq!(query.status, Some(JobStatus::InProgress));
        assert_eq!(query.per_page, 20);
    }
}
