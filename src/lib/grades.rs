use std::fmt;

use crate::models::{
    degree_model::{CurriculumCourse, Degree},
    identity_model::Student,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    Completed { grade: u8 },
    Ongoing,
    NotStarted,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseStatus::Completed { grade } => write!(f, "Grade: {}", grade),
            CourseStatus::Ongoing => write!(f, "Ongoing"),
            CourseStatus::NotStarted => write!(f, "Not Started"),
        }
    }
}

/// A completed course wins over the same course still listed as ongoing.
pub fn course_status(student: &Student, course_id: &str) -> CourseStatus {
    if let Some(completed) = student
        .courses_completed
        .iter()
        .find(|course| course.course_id == course_id)
    {
        return CourseStatus::Completed {
            grade: completed.grade,
        };
    }
    if student.courses_ongoing.iter().any(|id| id == course_id) {
        CourseStatus::Ongoing
    } else {
        CourseStatus::NotStarted
    }
}

/// Each course of the degree's curriculum, in curriculum order, with the student's status on it.
pub fn grade_report<'a>(
    student: &Student,
    degree: &'a Degree,
) -> Vec<(&'a CurriculumCourse, CourseStatus)> {
    degree
        .curriculum
        .iter()
        .map(|course| (course, course_status(student, &course.course_id)))
        .collect()
}

/// Mean grade over completed courses, `None` when nothing is completed yet.
pub fn average_grade(student: &Student) -> Option<f64> {
    if student.courses_completed.is_empty() {
        return None;
    }
    let total: u32 = student
        .courses_completed
        .iter()
        .map(|course| u32::from(course.grade))
        .sum();
    Some(f64::from(total) / student.courses_completed.len() as f64)
}

/// Names of the student's ongoing courses as listed in the degree's curriculum.
pub fn ongoing_course_names<'a>(student: &Student, degree: &'a Degree) -> Vec<&'a str> {
    student
        .courses_ongoing
        .iter()
        .map(|course_id| {
            degree
                .course(course_id)
                .map_or("Unknown Course", |course| course.course_name.as_str())
        })
        .collect()
}
