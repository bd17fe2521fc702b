//! Code issuer service.
//!
//! Implements the attendance code driving ports: lecturers issue codes for
//! courses they own, and anyone may read a course's current code while it
//! is inside the validity window.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    AttendanceCodeCommand, AttendanceCodeQuery, CodeGenerator, IssueCodeRequest, StorePorts,
};
use crate::domain::store_access::{find_course, map_store_error};
use crate::domain::{CodeIssueOutcome, CurrentCodeOutcome, Error, NewIssuedCode};

/// Issues attendance codes and reports the current one.
#[derive(Clone)]
pub struct AttendanceCodeService {
    store: StorePorts,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
}

impl AttendanceCodeService {
    /// Create the service from the store bundle, a code source and a clock.
    pub fn new(store: StorePorts, generator: Arc<dyn CodeGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            generator,
            clock,
        }
    }
}

#[async_trait]
impl AttendanceCodeCommand for AttendanceCodeService {
    async fn issue_code(&self, request: &IssueCodeRequest) -> Result<CodeIssueOutcome, Error> {
        let course = find_course(self.store.courses.as_ref(), &request.course_code).await?;
        let Some(course) = course.filter(|course| course.is_owned_by(request.lecturer_id)) else {
            warn!(
                course_code = %request.course_code,
                lecturer_id = %request.lecturer_id,
                "code issuance refused"
            );
            return Ok(CodeIssueOutcome::Unauthorized);
        };

        let new_code = NewIssuedCode {
            course_id: course.id,
            code: self.generator.generate(),
            issued_at: self.clock.utc(),
        };
        let issued = self
            .store
            .codes
            .insert(&new_code)
            .await
            .map_err(map_store_error)?;

        info!(
            course_code = %course.code,
            lecturer_id = %request.lecturer_id,
            sequence = issued.sequence,
            "attendance code issued"
        );
        Ok(CodeIssueOutcome::Issued(issued))
    }
}

#[async_trait]
impl AttendanceCodeQuery for AttendanceCodeService {
    async fn current_code(&self, course_code: &str) -> Result<CurrentCodeOutcome, Error> {
        let Some(course) = find_course(self.store.courses.as_ref(), course_code).await? else {
            return Ok(CurrentCodeOutcome::CourseNotFound);
        };

        let latest = self
            .store
            .codes
            .latest_for_course(course.id)
            .await
            .map_err(map_store_error)?;

        Ok(match latest {
            Some(code) if !code.is_expired_at(self.clock.utc()) => CurrentCodeOutcome::Active(code),
            _ => CurrentCodeOutcome::NoActiveCode,
        })
    }
}

#[cfg(test)]
#[path = "attendance_code_service_tests.rs"]
mod tests;
