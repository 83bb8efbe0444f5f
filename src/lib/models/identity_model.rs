//! Module with identity models compatible with the bundled `students.json` and `teachers.json`
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCourse {
    pub course_id: String,
    pub grade: u8,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaughtCourse {
    pub course_id: String,
    pub students: Vec<String>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "DOB")]
    pub date_of_birth: String,
    pub degree_program_id: String,
    pub study_period: String,
    pub credits: u32,
    pub attendance: u32,
    #[serde(default)]
    pub courses_completed: Vec<CompletedCourse>,
    #[serde(default)]
    pub courses_ongoing: Vec<String>,
}

impl Student {
    /// `DOB` read as `YYYY-MM-DD`.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d").ok()
    }

    /// Attendance is a presence flag, `1` meaning present.
    pub fn is_present(&self) -> bool {
        self.attendance == 1
    }
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub teacher_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub courses_teaching: Vec<TaughtCourse>,
}

impl Teacher {
    /// Student ids enrolled on one of the teacher's courses, `None` if they do not teach it.
    pub fn roster(&self, course_id: &str) -> Option<&[String]> {
        self.courses_teaching
            .iter()
            .find(|course| course.course_id == course_id)
            .map(|course| course.students.as_slice())
    }
}

/// The authenticated user. Logged-out state is the absence of an `Identity`.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "userType", rename_all = "lowercase")]
pub enum Identity {
    Student(Student),
    Teacher(Teacher),
}

impl Identity {
    /// The reference stored as a reservation owner.
    pub fn id(&self) -> &str {
        match self {
            Identity::Student(student) => &student.student_id,
            Identity::Teacher(teacher) => &teacher.teacher_id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Identity::Student(student) => &student.email,
            Identity::Teacher(teacher) => &teacher.email,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Identity::Student(student) => &student.name,
            Identity::Teacher(teacher) => &teacher.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Identity::Student(_) => "student",
            Identity::Teacher(_) => "teacher",
        }
    }
}

/// Row of `students.json`: the student record plus its clear-text password.
#[derive(Deserialize, Debug, Clone)]
pub struct StudentRecord {
    #[serde(flatten)]
    pub student: Student,
    pub password: String,
}

/// Row of `teachers.json`.
#[derive(Deserialize, Debug, Clone)]
pub struct TeacherRecord {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub password: String,
}
