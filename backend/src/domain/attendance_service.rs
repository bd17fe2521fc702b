//! Redemption engine and attendance reports.
//!
//! A redemption runs a fixed sequence of checks and stops at the first
//! failure. Only the final step writes, and it does so through an atomic
//! insert-if-absent so concurrent duplicates cannot both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    AttendanceCommand, AttendanceQuery, InsertOutcome, RedemptionRequest, StorePorts,
};
use crate::domain::store_access::{find_course, find_student, map_store_error};
use crate::domain::{
    CourseAttendance, Error, NewAttendanceRecord, RedemptionOutcome, RedemptionRejection,
};

/// Switches that alter the redemption pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedemptionPolicy {
    /// Refuse students who are not enrolled in the course.
    pub require_enrollment: bool,
}

impl Default for RedemptionPolicy {
    fn default() -> Self {
        Self {
            require_enrollment: true,
        }
    }
}

/// Redeems attendance codes and serves attendance reports.
#[derive(Clone)]
pub struct AttendanceService {
    store: StorePorts,
    clock: Arc<dyn Clock>,
    policy: RedemptionPolicy,
}

impl AttendanceService {
    /// Create the service with the default policy.
    pub fn new(store: StorePorts, clock: Arc<dyn Clock>) -> Self {
        Self::with_policy(store, clock, RedemptionPolicy::default())
    }

    /// Create the service with an explicit policy.
    pub fn with_policy(store: StorePorts, clock: Arc<dyn Clock>, policy: RedemptionPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    async fn run_checks(&self, request: &RedemptionRequest) -> Result<RedemptionOutcome, Error> {
        use RedemptionOutcome::Rejected;

        let Some(course) = find_course(self.store.courses.as_ref(), &request.course_code).await?
        else {
            return Ok(Rejected(RedemptionRejection::CourseNotFound));
        };
        let Some(student) = find_student(self.store.students.as_ref(), &request.student_id).await?
        else {
            return Ok(Rejected(RedemptionRejection::StudentNotFound));
        };

        if self.policy.require_enrollment {
            let enrolled = self
                .store
                .enrollments
                .exists(student.id, course.id)
                .await
                .map_err(map_store_error)?;
            if !enrolled {
                return Ok(Rejected(RedemptionRejection::NotEnrolled));
            }
        }

        let Some(current) = self
            .store
            .codes
            .latest_for_course(course.id)
            .await
            .map_err(map_store_error)?
        else {
            return Ok(Rejected(RedemptionRejection::NoCodeIssued));
        };
        if !current.code.matches(&request.submitted_code) {
            return Ok(Rejected(RedemptionRejection::InvalidCode));
        }

        let now = self.clock.utc();
        if current.is_expired_at(now) {
            return Ok(Rejected(RedemptionRejection::CodeExpired));
        }

        let record = NewAttendanceRecord {
            student_id: student.id,
            course_id: course.id,
            recorded_at: now,
        };
        match self
            .store
            .records
            .insert_if_absent(&record)
            .await
            .map_err(map_store_error)?
        {
            InsertOutcome::Inserted(()) => {
                info!(
                    student_id = %student.public_id,
                    course_code = %course.code,
                    "attendance recorded"
                );
                Ok(RedemptionOutcome::Accepted {
                    student_name: student.name,
                    recorded_at: now,
                })
            }
            InsertOutcome::AlreadyPresent => Ok(Rejected(RedemptionRejection::AlreadyRecorded)),
        }
    }
}

#[async_trait]
impl AttendanceCommand for AttendanceService {
    async fn redeem(&self, request: &RedemptionRequest) -> Result<RedemptionOutcome, Error> {
        let outcome = self.run_checks(request).await?;
        if let RedemptionOutcome::Rejected(rejection) = &outcome {
            debug!(
                student_id = %request.student_id,
                course_code = %request.course_code,
                ?rejection,
                "redemption rejected"
            );
        }
        Ok(outcome)
    }
}

#[async_trait]
impl AttendanceQuery for AttendanceService {
    async fn course_attendance(
        &self,
        course_code: &str,
    ) -> Result<Option<CourseAttendance>, Error> {
        let Some(course) = find_course(self.store.courses.as_ref(), course_code).await? else {
            return Ok(None);
        };
        let entries = self
            .store
            .records
            .list_for_course(course.id)
            .await
            .map_err(map_store_error)?;
        Ok(Some(CourseAttendance { course, entries }))
    }
}

#[cfg(test)]
#[path = "attendance_service_tests.rs"]
mod tests;
