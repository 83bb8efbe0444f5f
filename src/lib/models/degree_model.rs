//! Module with degree models compatible with the curriculum catalog's REST API
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CurriculumCourse {
    pub course_id: String,
    pub course_name: String,
    pub credits: u32,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Degree {
    pub id: u32,
    pub name: String,
    pub level: String,
    pub years: u32,
    pub credits: u32,
    pub curriculum: Vec<CurriculumCourse>,
}

impl Degree {
    pub fn course(&self, course_id: &str) -> Option<&CurriculumCourse> {
        self.curriculum
            .iter()
            .find(|course| course.course_id == course_id)
    }
}

/// Body of `GET` on the catalog.
#[derive(Deserialize, Debug, Serialize)]
pub struct DegreesResponse {
    pub degrees: Vec<Degree>,
}
