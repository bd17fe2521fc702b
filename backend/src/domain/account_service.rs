//! Account service: student and lecturer sign-in, student password changes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{AccountCommand, CredentialVerifier, PasswordChangeRequest, StorePorts};
use crate::domain::store_access::{find_student, map_store_error};
use crate::domain::{Error, LecturerCourses, LoginCredentials, Student, Username};

const INVALID_STUDENT_LOGIN: &str = "Invalid Student ID or password.";
const INVALID_LECTURER_LOGIN: &str = "Invalid credentials";

/// Authenticates accounts against the record store.
#[derive(Clone)]
pub struct AccountService {
    store: StorePorts,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AccountService {
    /// Create the service from the store bundle and password policy.
    pub fn new(store: StorePorts, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { store, verifier }
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn student_login(&self, credentials: &LoginCredentials) -> Result<Student, Error> {
        let student = find_student(self.store.students.as_ref(), credentials.identifier()).await?;
        match student {
            Some(student) if self.verifier.verify(&student.password, credentials.password()) => {
                info!(student_id = %student.public_id, "student signed in");
                Ok(student)
            }
            _ => {
                warn!(student_id = credentials.identifier(), "student sign-in rejected");
                Err(Error::unauthorized(INVALID_STUDENT_LOGIN))
            }
        }
    }

    async fn lecturer_login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<LecturerCourses, Error> {
        let Ok(username) = Username::parse(credentials.identifier()) else {
            return Err(Error::unauthorized(INVALID_LECTURER_LOGIN));
        };
        let lecturer = self
            .store
            .lecturers
            .find_by_username(&username)
            .await
            .map_err(map_store_error)?;
        let Some(lecturer) =
            lecturer.filter(|l| self.verifier.verify(&l.password, credentials.password()))
        else {
            warn!(username = %username, "lecturer sign-in rejected");
            return Err(Error::unauthorized(INVALID_LECTURER_LOGIN));
        };

        let courses = if lecturer.is_administrator() {
            Vec::new()
        } else {
            self.store
                .courses
                .list_for_lecturer(lecturer.id)
                .await
                .map_err(map_store_error)?
        };
        info!(username = %lecturer.username, "lecturer signed in");
        Ok(LecturerCourses { lecturer, courses })
    }

    async fn change_student_password(&self, request: &PasswordChangeRequest) -> Result<(), Error> {
        if request.new_password.is_empty() {
            return Err(Error::invalid_request("New password is required."));
        }
        let student = find_student(self.store.students.as_ref(), &request.student_id)
            .await?
            .ok_or_else(|| Error::not_found("Student not found."))?;
        if !self
            .verifier
            .verify(&student.password, &request.old_password)
        {
            warn!(student_id = %student.public_id, "password change rejected");
            return Err(Error::unauthorized("Incorrect old password."));
        }

        let sealed = self.verifier.seal(&request.new_password);
        let updated = self
            .store
            .students
            .update_password(student.id, &sealed)
            .await
            .map_err(map_store_error)?;
        if !updated {
            return Err(Error::not_found("Student not found."));
        }
        info!(student_id = %student.public_id, "student password changed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
