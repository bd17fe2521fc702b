//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, regenerate them with `diesel print-schema`
//! or update them by hand.

diesel::table! {
    /// Lecturer accounts, including the administrator.
    lecturers (id) {
        /// Primary key.
        id -> Int4,
        /// Unique lower-case username.
        username -> Varchar,
        /// Display name.
        name -> Text,
        /// Stored password material.
        password -> Text,
    }
}

diesel::table! {
    /// Courses, optionally owned by a lecturer.
    courses (id) {
        /// Primary key.
        id -> Int4,
        /// Unique upper-case course code, at most 10 characters.
        code -> Varchar,
        /// Display name.
        name -> Text,
        /// Owning lecturer.
        lecturer_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Students and their public identifiers.
    students (id) {
        /// Primary key.
        id -> Int4,
        /// Unique public identifier such as `S-001`.
        public_id -> Varchar,
        /// Display name.
        name -> Text,
        /// Stored password material.
        password -> Text,
    }
}

diesel::table! {
    /// Unique (student, course) enrollment pairs.
    enrollments (id) {
        /// Primary key.
        id -> Int4,
        /// Enrolled student.
        student_id -> Int4,
        /// Course joined.
        course_id -> Int4,
    }
}

diesel::table! {
    /// Append-only log of issued attendance codes.
    attendance_codes (id) {
        /// Primary key; doubles as the insertion sequence.
        id -> Int8,
        /// Course the code unlocks.
        course_id -> Int4,
        /// Six character code.
        code -> Varchar,
        /// Issue instant.
        issued_at -> Timestamptz,
    }
}

diesel::table! {
    /// One attendance record per (student, course).
    attendance_records (id) {
        /// Primary key.
        id -> Int8,
        /// Attending student.
        student_id -> Int4,
        /// Course attended.
        course_id -> Int4,
        /// Submission instant.
        recorded_at -> Timestamptz,
    }
}

diesel::joinable!(courses -> lecturers (lecturer_id));
diesel::joinable!(enrollments -> students (student_id));
diesel::joinable!(enrollments -> courses (course_id));
diesel::joinable!(attendance_codes -> courses (course_id));
diesel::joinable!(attendance_records -> students (student_id));
diesel::joinable!(attendance_records -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(
    lecturers,
    courses,
    students,
    enrollments,
    attendance_codes,
    attendance_records,
);
