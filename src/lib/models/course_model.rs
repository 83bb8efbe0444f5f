//! Module with course models compatible with the bundled `courses.json`
use serde::{Deserialize, Serialize};

/// A course with its weekly slot, `schedule` being `"<Day> <HH:MM>"`.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ScheduledCourse {
    pub course_id: String,
    pub course_name: String,
    pub schedule: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ScheduledDegree {
    pub curriculum: Vec<ScheduledCourse>,
}

/// Top level of `courses.json`.
#[derive(Deserialize, Debug, Serialize)]
pub struct CoursesFile {
    pub degrees: Vec<ScheduledDegree>,
}
