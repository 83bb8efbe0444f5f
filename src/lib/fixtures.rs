use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::{
    error::FixtureError,
    models::{
        identity_model::{Identity, Student, StudentRecord, Teacher, TeacherRecord},
        Args,
    },
};

const BUNDLED_STUDENTS: &str = include_str!("../../data/students.json");
const BUNDLED_TEACHERS: &str = include_str!("../../data/teachers.json");

/// Read-only directory of known students and teachers.
/// Emails are unique across both lists, and so are ids.
#[derive(Debug)]
pub struct FixtureDirectory {
    students: Vec<StudentRecord>,
    teachers: Vec<TeacherRecord>,
}

impl FixtureDirectory {
    pub fn new(
        students: Vec<StudentRecord>,
        teachers: Vec<TeacherRecord>,
    ) -> Result<Self, FixtureError> {
        let mut emails = HashSet::new();
        let mut ids = HashSet::new();
        let accounts = students
            .iter()
            .map(|record| (&record.student.email, &record.student.student_id))
            .chain(
                teachers
                    .iter()
                    .map(|record| (&record.teacher.email, &record.teacher.teacher_id)),
            );
        for (email, id) in accounts {
            if !emails.insert(email) {
                return Err(FixtureError::DuplicateEmail(email.to_owned()));
            }
            if !ids.insert(id) {
                return Err(FixtureError::DuplicateId(id.to_owned()));
            }
        }
        info!(
            "Fixture directory holds {} students and {} teachers",
            students.len(),
            teachers.len()
        );
        Ok(FixtureDirectory { students, teachers })
    }

    /// The fixtures compiled into the crate from `data/`.
    pub fn bundled() -> Result<Self, FixtureError> {
        let students = parse_fixture("bundled students.json", BUNDLED_STUDENTS)?;
        let teachers = parse_fixture("bundled teachers.json", BUNDLED_TEACHERS)?;
        Self::new(students, teachers)
    }

    pub fn from_files(students_path: &Path, teachers_path: &Path) -> Result<Self, FixtureError> {
        Self::new(read_fixture(students_path)?, read_fixture(teachers_path)?)
    }

    /// Files named on the command line, bundled data for whichever list is not given.
    pub fn from_args(args: &Args) -> Result<Self, FixtureError> {
        let students = match &args.students_json_path {
            Some(path) => read_fixture(path)?,
            None => parse_fixture("bundled students.json", BUNDLED_STUDENTS)?,
        };
        let teachers = match &args.teachers_json_path {
            Some(path) => read_fixture(path)?,
            None => parse_fixture("bundled teachers.json", BUNDLED_TEACHERS)?,
        };
        Self::new(students, teachers)
    }

    /// Students are checked before teachers; both fields must match exactly.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<Identity> {
        if let Some(record) = self
            .students
            .iter()
            .find(|record| record.student.email == email && record.password == password)
        {
            return Some(Identity::Student(record.student.clone()));
        }
        self.teachers
            .iter()
            .find(|record| record.teacher.email == email && record.password == password)
            .map(|record| Identity::Teacher(record.teacher.clone()))
    }

    pub fn student_by_id(&self, student_id: &str) -> Option<&Student> {
        self.students()
            .find(|student| student.student_id == student_id)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().map(|record| &record.student)
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.teachers.iter().map(|record| &record.teacher)
    }
}

pub(crate) fn read_fixture<T: DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let io_error = |source| FixtureError::Io {
        path: path.to_owned(),
        source,
    };
    info!(
        "Reading fixture from {}",
        std::path::absolute(path).map_err(io_error)?.display()
    );
    let file = BufReader::new(File::open(path).map_err(io_error)?);
    serde_json::from_reader(file).map_err(|source| FixtureError::Parse {
        name: path.display().to_string(),
        source,
    })
}

pub(crate) fn parse_fixture<T: DeserializeOwned>(
    name: &str,
    json: &str,
) -> Result<T, FixtureError> {
    debug!("Parsing {}", name);
    serde_json::from_str(json).map_err(|source| FixtureError::Parse {
        name: name.to_owned(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod tests;
