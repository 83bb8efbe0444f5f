//! Student and teacher portal: fixture-backed login, the degree catalog, grades,
//! the weekly course calendar, profile details and a write-through classroom
//! reservation board.
pub mod catalog;
pub mod error;
pub mod fixtures;
pub mod grades;
pub mod models;
pub mod profile;
pub mod run_tool;
pub mod session;
pub mod store;
pub mod synchronizer;
pub mod timetable;
