use std::error::Error;

use log::info;

use crate::{
    catalog::{student_degree, DegreeSource},
    error::SyncError,
    fixtures::FixtureDirectory,
    grades::{average_grade, grade_report, ongoing_course_names},
    models::{
        identity_model::{Identity, Student},
        reservation_model::Reservation,
        Args, Command,
    },
    session::Session,
    store::ReservationStore,
    synchronizer::ReservationSynchronizer,
    timetable::{calendar, Timetable},
};

/* one table row per classroom, as seen by the viewer */
pub fn format_reservation_row(reservation: &Reservation, viewer: &Identity) -> String {
    let state = reservation.state_for(viewer.id());
    format!(
        "{} | {} people | {} | {}",
        reservation.classroom_name(),
        reservation.amount_of_people(),
        state.status_label(),
        state.action_label()
    )
}

pub fn describe_identity(identity: Option<&Identity>) -> String {
    match identity {
        Some(identity) => format!(
            "{} <{}> ({} {})",
            identity.name(),
            identity.email(),
            identity.kind(),
            identity.id()
        ),
        None => "Not logged in".to_owned(),
    }
}

/// Logs in with the credentials from `args`, runs its command and returns the lines to print.
pub async fn run<S: ReservationStore, D: DegreeSource>(
    store: S,
    degrees: D,
    directory: &FixtureDirectory,
    timetable: &Timetable,
    args: &Args,
) -> Result<Vec<String>, Box<dyn Error>> {
    let mut session = Session::new(directory);
    if let (Some(email), Some(password)) = (&args.email, &args.password) {
        if !session.login(email, password) {
            return Err("Invalid email or password".into());
        }
    }
    let board = ReservationSynchronizer::new(store);

    let lines = match &args.command {
        Command::Whoami => vec![describe_identity(session.identity())],
        Command::Dashboard => dashboard(&board, &degrees, &session).await?,
        Command::Reservations => {
            let viewer = session.identity().ok_or(SyncError::NotLoggedIn)?;
            board
                .load_snapshot()
                .await?
                .iter()
                .map(|reservation| format_reservation_row(reservation, viewer))
                .collect()
        }
        Command::Toggle { classroom } => {
            let viewer = session.identity().ok_or(SyncError::NotLoggedIn)?;
            board.load_snapshot().await?;
            board
                .toggle(&session, classroom)
                .await?
                .iter()
                .filter(|reservation| reservation.classroom_name() == classroom.as_str())
                .map(|reservation| format_reservation_row(reservation, viewer))
                .collect()
        }
        Command::Degrees => degrees
            .fetch_all_degrees()
            .await?
            .iter()
            .map(|degree| {
                format!(
                    "{} {} ({}, {} years, {} credits)",
                    degree.id, degree.name, degree.level, degree.years, degree.credits
                )
            })
            .collect(),
        Command::Grades => {
            let student = session.require_student()?;
            let degree = student_degree(&degrees, &session).await?;
            let mut lines = vec![format!("{} ({})", degree.name, student.student_id)];
            lines.extend(
                grade_report(student, &degree)
                    .into_iter()
                    .map(|(course, status)| format!("{}: {}", course.course_name, status)),
            );
            lines
        }
        Command::Calendar => {
            let days = calendar(session.require_student()?, timetable);
            if days.is_empty() {
                vec!["No scheduled courses".to_owned()]
            } else {
                days.into_iter()
                    .flat_map(|(day, entries)| {
                        let entries = entries.into_iter().map(|entry| format!("  {}", entry));
                        std::iter::once(day).chain(entries)
                    })
                    .collect()
            }
        }
    };
    info!("Command {:?} produced {} line(s)", args.command, lines.len());
    board.detach();
    Ok(lines)
}

/* reservations and the study program are fetched side by side */
async fn dashboard<S: ReservationStore, D: DegreeSource>(
    board: &ReservationSynchronizer<S>,
    degrees: &D,
    session: &Session<'_>,
) -> Result<Vec<String>, Box<dyn Error>> {
    let identity = session.require_identity()?;
    let mut lines = vec![format!("Welcome, {}", identity.name())];

    let (snapshot, degree) = futures::join!(board.load_snapshot(), async {
        match identity {
            Identity::Student(_) => Some(student_degree(degrees, session).await),
            Identity::Teacher(_) => None,
        }
    });

    match identity {
        Identity::Student(student) => {
            lines.extend(student_summary(student));
            match degree {
                Some(Ok(degree)) => {
                    lines.push(format!("Program: {} ({})", degree.name, degree.level));
                    let ongoing = ongoing_course_names(student, &degree);
                    if ongoing.is_empty() {
                        lines.push("No ongoing courses".to_owned());
                    }
                    lines.extend(ongoing.into_iter().map(|name| format!("Ongoing: {}", name)));
                }
                Some(Err(e)) => lines.push(format!("Program: {}", e)),
                None => {}
            }
        }
        Identity::Teacher(teacher) => {
            lines.push(format!("Teacher ID: {}", teacher.teacher_id));
            lines.push(format!("Teaching {} course(s)", teacher.courses_teaching.len()));
        }
    }

    match snapshot {
        Ok(snapshot) => {
            let free = snapshot.iter().filter(|r| !r.is_reserved()).count();
            let mine = snapshot
                .iter()
                .filter(|r| r.reserved_by() == Some(identity.id()))
                .count();
            lines.push(format!(
                "Rooms: {} of {} available, {} reserved by you",
                free,
                snapshot.len(),
                mine
            ));
        }
        Err(e) => lines.push(format!("Rooms: {}", e)),
    }
    Ok(lines)
}

/* personal card of the student dashboard */
fn student_summary(student: &Student) -> Vec<String> {
    let birthdate = match student.birth_date() {
        Some(date) => date.format("%-d %B %Y").to_string(),
        None => student.date_of_birth.clone(),
    };
    let gpa = match average_grade(student) {
        Some(average) => format!("{:.2}", average),
        None => "N/A".to_owned(),
    };
    vec![
        format!("Student ID: {}", student.student_id),
        format!("Birthdate: {}", birthdate),
        format!("Study Period: {}", student.study_period),
        format!("Credits: {}", student.credits),
        format!("G.P.A.: {}", gpa),
        format!(
            "Attendance: {}",
            if student.is_present() { "Present" } else { "Absent" }
        ),
    ]
}
