//! Binding a mechanic to a job card.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use super::job_status::{JobField, LockPolicy};
use crate::{
    entities::{job_card, JobCardModel, User},
    errors::ServiceError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned(JobCardModel),
    /// The job already had this assignment.
    Unchanged(JobCardModel),
}

impl AssignmentOutcome {
    pub fn job(&self) -> &JobCardModel {
        match self {
            AssignmentOutcome::Assigned(job) | AssignmentOutcome::Unchanged(job) => job,
        }
    }

    pub fn into_job(self) -> JobCardModel {
        match self {
            AssignmentOutcome::Assigned(job) | AssignmentOutcome::Unchanged(job) => job,
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, AssignmentOutcome::Assigned(_))
    }
}

/// Assigns `user_id` as the job's mechanic.
///
/// The user must exist and hold a role that can be assigned. The lock
/// policy is checked before the idempotency shortcut, so a locked job
/// reports the lock even when the assignment would not change.
pub async fn assign_mechanic<C: ConnectionTrait>(
    conn: &C,
    job: JobCardModel,
    policy: &LockPolicy,
    user_id: i64,
) -> Result<AssignmentOutcome, ServiceError> {
    let user = User::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {} not found", user_id)))?;

    if !user.role.can_be_assigned() {
        return Err(ServiceError::InvalidMechanic(format!(
            "user {} has role {} and cannot be assigned to a job",
            user.id, user.role
        )));
    }

    policy.ensure_editable(JobField::Assignment)?;

    if job.assigned_mechanic_id == Some(user.id) {
        return Ok(AssignmentOutcome::Unchanged(job));
    }

    set_mechanic(conn, job, Some(user.id)).await.map(AssignmentOutcome::Assigned)
}

pub async fn unassign_mechanic<C: ConnectionTrait>(
    conn: &C,
    job: JobCardModel,
    policy: &LockPolicy,
) -> Result<AssignmentOutcome, ServiceError> {
    policy.ensure_editable(JobField::Assignment)?;

    if job.assigned_mechanic_id.is_none() {
        return Ok(AssignmentOutcome::Unchanged(job));
    }

    set_mechanic(conn, job, None).await.map(AssignmentOutcome::Assigned)
}

async fn set_mechanic<C: ConnectionTrait>(
    conn: &C,
    job: JobCardModel,
    mechanic_id: Option<i64>,
) -> Result<JobCardModel, ServiceError> {
    let mut active: job_card::ActiveModel = job.into();
    active.assigned_mechanic_id = Set(mechanic_id);
    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(conn).await?)
}
