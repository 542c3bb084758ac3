//! Job card state machine and the lock policy derived from it.
//!
//! Status only ever moves one step forward:
//! `OPEN -> IN_PROGRESS -> COMPLETED -> BILLED`. Which fields a caller may
//! edit is a pure function of the current status and the caller's role.

use std::str::FromStr;

use crate::{
    entities::{JobStatus, UserRole},
    errors::ServiceError,
};

impl JobStatus {
    /// The only status this one may move to, `None` once billed.
    pub fn successor(self) -> Option<JobStatus> {
        match self {
            JobStatus::Open => Some(JobStatus::InProgress),
            JobStatus::InProgress => Some(JobStatus::Completed),
            JobStatus::Completed => Some(JobStatus::Billed),
            JobStatus::Billed => None,
        }
    }

    /// Open and in-progress jobs still follow the live tax rate.
    pub fn is_active(self) -> bool {
        matches!(self, JobStatus::Open | JobStatus::InProgress)
    }

    /// Completed and billed jobs are read-only for everyone but admins.
    pub fn is_closed(self) -> bool {
        !self.is_active()
    }
}

/// Parses a requested target status, rejecting unknown names as bad input.
pub fn parse_status(raw: &str) -> Result<JobStatus, ServiceError> {
    JobStatus::from_str(raw.trim())
        .map_err(|_| ServiceError::ValidationError(format!("unknown job status '{}'", raw)))
}

/// Validates a move from `current` to `target` for the acting role.
pub fn transition(
    current: JobStatus,
    target: JobStatus,
    role: UserRole,
) -> Result<JobStatus, ServiceError> {
    if current.is_closed() && !role.is_admin() {
        return Err(ServiceError::ForbiddenTransition(format!(
            "only an admin may move a job out of {}",
            current
        )));
    }

    match current.successor() {
        Some(next) if next == target => Ok(target),
        Some(next) => Err(ServiceError::InvalidTransition(format!(
            "cannot move from {} to {}; next status is {}",
            current, target, next
        ))),
        None => Err(ServiceError::InvalidTransition(format!(
            "{} is terminal; cannot move to {}",
            current, target
        ))),
    }
}

/// Groups of job card fields that lock together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum JobField {
    CustomerVehicle,
    LineItems,
    Notes,
    Assignment,
    /// Soft delete and restore.
    Lifecycle,
}

/// What a given role may edit on a job in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPolicy {
    status: JobStatus,
    role: UserRole,
}

impl LockPolicy {
    pub fn for_job(status: JobStatus, role: UserRole) -> Self {
        Self { status, role }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn is_locked(&self, field: JobField) -> bool {
        if self.role.is_admin() {
            return false;
        }
        match self.status {
            JobStatus::Open => false,
            JobStatus::InProgress => field == JobField::CustomerVehicle,
            JobStatus::Completed | JobStatus::Billed => true,
        }
    }

    pub fn ensure_editable(&self, field: JobField) -> Result<(), ServiceError> {
        if self.is_locked(field) {
            return Err(ServiceError::JobLocked(format!(
                "{} cannot be changed while the job is {}",
                field, self.status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn stepwise_forward_path_succeeds() {
        let mut status = JobStatus::Open;
        for expected in [JobStatus::InProgress, JobStatus::Completed, JobStatus::Billed] {
            status = transition(status, expected, UserRole::Admin).unwrap();
            assert_eq!(status, expected);
        }
        assert_eq!(status.successor(), None);
    }

    #[test]
    fn skipping_is_invalid() {
        assert_matches!(
            transition(JobStatus::Open, JobStatus::Billed, UserRole::Staff),
            Err(ServiceError::InvalidTransition(_))
        );
        assert_matches!(
            transition(JobStatus::Open, JobStatus::Completed, UserRole::Admin),
            Err(ServiceError::InvalidTransition(_))
        );
    }

    #[test]
    fn backwards_and_self_moves_are_invalid() {
        assert_matches!(
            transition(JobStatus::InProgress, JobStatus::Open, UserRole::Mechanic),
            Err(ServiceError::InvalidTransition(_))
        );
        assert_matches!(
            transition(JobStatus::Open, JobStatus::Open, UserRole::Mechanic),
            Err(ServiceError::InvalidTransition(_))
        );
        assert_matches!(
            transition(JobStatus::Completed, JobStatus::InProgress, UserRole::Admin),
            Err(ServiceError::InvalidTransition(_))
        );
    }

    #[rstest]
    #[case(UserRole::Mechanic)]
    #[case(UserRole::Staff)]
    #[case(UserRole::Customer)]
    fn non_admins_cannot_leave_closed_states(#[case] role: UserRole) {
        for target in JobStatus::iter() {
            assert_matches!(
                transition(JobStatus::Completed, target, role),
                Err(ServiceError::ForbiddenTransition(_))
            );
            assert_matches!(
                transition(JobStatus::Billed, target, role),
                Err(ServiceError::ForbiddenTransition(_))
            );
        }
    }

    #[test]
    fn admin_bills_completed_job() {
        assert_eq!(
            transition(JobStatus::Completed, JobStatus::Billed, UserRole::Admin).unwrap(),
            JobStatus::Billed
        );
    }

    #[test]
    fn parses_status_names() {
        assert_eq!(parse_status("in_progress").unwrap(), JobStatus::InProgress);
        assert_eq!(parse_status("BILLED").unwrap(), JobStatus::Billed);
        assert_matches!(parse_status("DONE"), Err(ServiceError::ValidationError(_)));
    }

    #[rstest]
    #[case(JobStatus::Open, UserRole::Mechanic, [false, false, false, false, false])]
    #[case(JobStatus::Open, UserRole::Staff, [false, false, false, false, false])]
    #[case(JobStatus::InProgress, UserRole::Mechanic, [true, false, false, false, false])]
    #[case(JobStatus::InProgress, UserRole::Customer, [true, false, false, false, false])]
    #[case(JobStatus::Completed, UserRole::Mechanic, [true, true, true, true, true])]
    #[case(JobStatus::Completed, UserRole::Staff, [true, true, true, true, true])]
    #[case(JobStatus::Billed, UserRole::Mechanic, [true, true, true, true, true])]
    #[case(JobStatus::Billed, UserRole::Customer, [true, true, true, true, true])]
    #[case(JobStatus::InProgress, UserRole::Admin, [false, false, false, false, false])]
    #[case(JobStatus::Completed, UserRole::Admin, [false, false, false, false, false])]
    #[case(JobStatus::Billed, UserRole::Admin, [false, false, false, false, false])]
    fn lock_matrix(#[case] status: JobStatus, #[case] role: UserRole, #[case] locked: [bool; 5]) {
        let policy = LockPolicy::for_job(status, role);
        let fields = [
            JobField::CustomerVehicle,
            JobField::LineItems,
            JobField::Notes,
            JobField::Assignment,
            JobField::Lifecycle,
        ];
        for (field, expected) in fields.into_iter().zip(locked) {
            assert_eq!(policy.is_locked(field), expected, "{status} / {role} / {field}");
        }
    }

    #[test]
    fn locked_field_reports_job_locked() {
        let policy = LockPolicy::for_job(JobStatus::Billed, UserRole::Staff);
        assert_matches!(
            policy.ensure_editable(JobField::Notes),
            Err(ServiceError::JobLocked(msg)) if msg.contains("BILLED")
        );
    }
}
