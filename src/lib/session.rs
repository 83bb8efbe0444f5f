use log::{info, warn};

use crate::{
    error::AccessError,
    fixtures::FixtureDirectory,
    models::identity_model::{Identity, Student, Teacher},
};

/// The portal session: at most one authenticated identity, checked against a fixture directory.
///
/// The session is passed by reference to whatever needs to know who is logged in;
/// nothing else changes the identity it holds.
#[derive(Debug)]
pub struct Session<'d> {
    directory: &'d FixtureDirectory,
    identity: Option<Identity>,
}

impl<'d> Session<'d> {
    /// A logged-out session.
    pub fn new(directory: &'d FixtureDirectory) -> Self {
        Session {
            directory,
            identity: None,
        }
    }

    /// Replaces the current identity on success. A failed attempt leaves the session untouched.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        match self.directory.authenticate(email, password) {
            Some(identity) => {
                info!("Logged in {} as {}", email, identity.kind());
                self.identity = Some(identity);
                true
            }
            None => {
                warn!("Rejected login for {}", email);
                false
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!("Logged out {}", identity.email());
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn directory(&self) -> &'d FixtureDirectory {
        self.directory
    }

    pub fn require_identity(&self) -> Result<&Identity, AccessError> {
        self.identity.as_ref().ok_or(AccessError::NotLoggedIn)
    }

    pub fn require_student(&self) -> Result<&Student, AccessError> {
        match self.require_identity()? {
            Identity::Student(student) => Ok(student),
            Identity::Teacher(_) => Err(AccessError::StudentsOnly),
        }
    }

    pub fn require_teacher(&self) -> Result<&Teacher, AccessError> {
        match self.require_identity()? {
            Identity::Teacher(teacher) => Ok(teacher),
            Identity::Student(_) => Err(AccessError::TeachersOnly),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn directory() -> FixtureDirectory {
        FixtureDirectory::from_files(
            &PathBuf::from("tests/test.students.json"),
            &PathBuf::from("tests/test.teachers.json"),
        )
        .unwrap()
    }

    #[test]
    fn new_session_is_logged_out() {
        let directory = directory();
        let session = Session::new(&directory);
        assert!(!session.is_logged_in());
        assert_eq!(session.require_identity(), Err(AccessError::NotLoggedIn));
        assert_eq!(session.require_student(), Err(AccessError::NotLoggedIn));
    }

    #[test]
    fn failed_login_keeps_previous_identity() {
        let directory = directory();
        let mut session = Session::new(&directory);
        assert!(session.login("warhol@factory.example", "soup"));
        assert!(!session.login("warhol@factory.example", "tomato"));
        assert_eq!(session.identity().unwrap().id(), "S1");
    }

    #[test]
    fn login_replaces_identity() {
        let directory = directory();
        let mut session = Session::new(&directory);
        assert!(session.login("warhol@factory.example", "soup"));
        assert!(session.login("kandinsky@bauhaus.example", "point-line-plane"));
        assert_eq!(session.identity().unwrap().id(), "T1");
        assert_eq!(session.require_student(), Err(AccessError::StudentsOnly));
        let teacher = session.require_teacher().unwrap();
        assert_eq!(
            teacher.roster("ART.202").unwrap(),
            ["S1".to_string(), "S2".to_string()]
        );
        assert_eq!(teacher.roster("ART.999"), None);
    }

    #[test]
    fn logout_clears_identity() {
        let directory = directory();
        let mut session = Session::new(&directory);
        assert!(session.login("malevich@suprematism.example", "square"));
        assert_eq!(session.require_student().unwrap().student_id, "S2");
        assert_eq!(session.require_teacher(), Err(AccessError::TeachersOnly));
        session.logout();
        assert!(session.identity().is_none());
        session.logout();
        assert!(!session.is_logged_in());
    }
}
