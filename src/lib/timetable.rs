use log::{info, warn};

use crate::{
    error::FixtureError,
    fixtures::{parse_fixture, read_fixture},
    models::{
        course_model::{CoursesFile, ScheduledCourse},
        identity_model::Student,
        Args,
    },
};

const BUNDLED_COURSES: &str = include_str!("../../data/courses.json");

/// One weekday of a student's calendar with its `"<course name>: <time>"` entries.
pub type CalendarDay = (String, Vec<String>);

/// Weekly slots of every course, in the order `courses.json` lists them.
#[derive(Debug)]
pub struct Timetable {
    courses: Vec<ScheduledCourse>,
}

impl Timetable {
    pub fn new(file: CoursesFile) -> Self {
        let courses: Vec<ScheduledCourse> = file
            .degrees
            .into_iter()
            .flat_map(|degree| degree.curriculum)
            .collect();
        info!("Timetable lists {} course slots", courses.len());
        Timetable { courses }
    }

    pub fn bundled() -> Result<Self, FixtureError> {
        Ok(Self::new(parse_fixture("bundled courses.json", BUNDLED_COURSES)?))
    }

    pub fn from_args(args: &Args) -> Result<Self, FixtureError> {
        match &args.courses_json_path {
            Some(path) => Ok(Self::new(read_fixture(path)?)),
            None => Self::bundled(),
        }
    }

    pub fn courses(&self) -> &[ScheduledCourse] {
        &self.courses
    }
}

/// The student's ongoing courses grouped by weekday, days in first-seen order.
pub fn calendar(student: &Student, timetable: &Timetable) -> Vec<CalendarDay> {
    let mut days: Vec<CalendarDay> = Vec::new();
    for course_id in &student.courses_ongoing {
        for course in timetable
            .courses()
            .iter()
            .filter(|course| course.course_id == *course_id)
        {
            let Some((day, time)) = course.schedule.split_once(' ') else {
                warn!(
                    "Course {} has a malformed schedule {:?}",
                    course.course_id, course.schedule
                );
                continue;
            };
            let entry = format!("{}: {}", course.course_name, time);
            match days.iter_mut().find(|(name, _)| name == day) {
                Some((_, entries)) => entries.push(entry),
                None => days.push((day.to_owned(), vec![entry])),
            }
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use crate::{fixtures::FixtureDirectory, models::course_model::ScheduledDegree};

    use super::*;

    fn slot(id: &str, name: &str, schedule: &str) -> ScheduledCourse {
        ScheduledCourse {
            course_id: id.to_string(),
            course_name: name.to_string(),
            schedule: schedule.to_string(),
        }
    }

    fn timetable() -> Timetable {
        Timetable::new(CoursesFile {
            degrees: vec![
                ScheduledDegree {
                    curriculum: vec![
                        slot("ART.101", "Origins of Pop Art", "Monday 10:00"),
                        slot("ART.202", "Mass Production in Art", "Wednesday 12:15"),
                    ],
                },
                ScheduledDegree {
                    curriculum: vec![
                        slot("ART.303", "From Cubism to Suprematism", "Monday 14:00"),
                        slot("ART.404", "Black Square", "Friday"),
                    ],
                },
            ],
        })
    }

    fn student(ongoing: &[&str]) -> Student {
        let directory = FixtureDirectory::bundled().unwrap();
        let mut student = directory.student_by_id("S1").unwrap().clone();
        student.courses_ongoing = ongoing.iter().map(|id| id.to_string()).collect();
        student
    }

    #[test]
    fn courses_on_the_same_day_are_grouped() {
        let days = calendar(&student(&["ART.101", "ART.202", "ART.303"]), &timetable());
        assert_eq!(
            days,
            vec![
                (
                    "Monday".to_string(),
                    vec![
                        "Origins of Pop Art: 10:00".to_string(),
                        "From Cubism to Suprematism: 14:00".to_string(),
                    ]
                ),
                (
                    "Wednesday".to_string(),
                    vec!["Mass Production in Art: 12:15".to_string()]
                ),
            ]
        );
    }

    #[test]
    fn days_follow_ongoing_order() {
        let days = calendar(&student(&["ART.202", "ART.101"]), &timetable());
        let names: Vec<&str> = days.iter().map(|(day, _)| day.as_str()).collect();
        assert_eq!(names, ["Wednesday", "Monday"]);
    }

    #[test]
    fn unscheduled_and_unknown_courses_are_skipped() {
        assert!(calendar(&student(&["ART.404", "ART.999"]), &timetable()).is_empty());
        assert!(calendar(&student(&[]), &timetable()).is_empty());
    }

    #[test]
    fn bundled_timetable_covers_bundled_students() {
        let timetable = Timetable::bundled().unwrap();
        let directory = FixtureDirectory::bundled().unwrap();
        for student in directory.students() {
            let entries: usize = calendar(student, &timetable)
                .iter()
                .map(|(_, entries)| entries.len())
                .sum();
            assert!(
                entries >= student.courses_ongoing.len(),
                "{} has unscheduled courses",
                student.student_id
            );
        }
    }
}
