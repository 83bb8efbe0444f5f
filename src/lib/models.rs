use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use serde::Deserialize;

pub mod course_model;
pub mod degree_model;
pub mod identity_model;
pub mod reservation_model;

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Paths to students.json, teachers.json and courses.json. When omitted, the fixtures bundled into the binary are used.
/// 2. Path to config.json, that contains the addresses of the remote stores.
/// 3. Credentials of the portal user on whose behalf the command runs.
/// 4. The command itself.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE")]
    pub students_json_path: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    pub teachers_json_path: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    pub courses_json_path: Option<PathBuf>,
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show who is logged in
    Whoami,
    /// Overview of the logged-in user's program and free rooms
    Dashboard,
    /// List classroom reservations
    Reservations,
    /// Reserve a free classroom or cancel your own reservation
    Toggle { classroom: String },
    /// List all degree programs
    Degrees,
    /// Show the curriculum of the logged-in student with grades
    Grades,
    /// Weekly schedule of the logged-in student's ongoing courses
    Calendar,
}

/// Which flavour of remote reservation store to talk to.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Keyed realtime document store (`/reservations.json`)
    #[default]
    Realtime,
    /// Plain REST endpoint (`/public-api/reservations`)
    Rest,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Kind of the reservation store
/// 2. Base address of the reservation store
/// 3. Optional access token appended to realtime store requests
/// 4. Address of the degree catalog
#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub store_kind: StoreKind,
    pub store_url: String,
    #[serde(default)]
    pub store_auth: Option<String>,
    pub degrees_url: String,
}

impl Config {
    /// Reads `config.json`, letting `EDUHUB_*` environment variables override its fields.
    pub fn from_file(path: &Path) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Json::file(path))
            .merge(Env::prefixed("EDUHUB_"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_json() {
        let config = Config::from_file(Path::new("tests/test.config.json")).unwrap();
        assert_eq!(config.store_kind, StoreKind::Rest);
        assert_eq!(config.store_url, "http://127.0.0.1:9/");
        assert_eq!(config.store_auth, None);
        assert_eq!(config.degrees_url, "http://127.0.0.1:9/public-api");
    }

    #[test]
    fn non_existent_config_is_an_error() {
        assert!(Config::from_file(Path::new("non_existent.json")).is_err());
    }

    #[test]
    fn args_with_toggle_command() {
        let args = Args::try_parse_from([
            "eduhub",
            "--email",
            "warhol@factory.example",
            "--password",
            "soup",
            "toggle",
            "TB109",
        ])
        .unwrap();
        assert_eq!(args.config_json_path, PathBuf::from("config.json"));
        assert_eq!(args.students_json_path, None);
        assert_eq!(args.courses_json_path, None);
        assert_eq!(
            args.command,
            Command::Toggle {
                classroom: "TB109".to_string()
            }
        );
    }

    #[test]
    fn args_with_calendar_command() {
        let args = Args::try_parse_from([
            "eduhub",
            "--courses-json-path",
            "tests/test.courses.json",
            "calendar",
        ])
        .unwrap();
        assert_eq!(
            args.courses_json_path,
            Some(PathBuf::from("tests/test.courses.json"))
        );
        assert_eq!(args.command, Command::Calendar);
    }
}
