use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::reservation_model::InvalidReservation;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed {name}: {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },
    #[error("email {0} is registered more than once")]
    DuplicateEmail(String),
    #[error("id {0} is registered more than once")]
    DuplicateId(String),
}

/// Failures talking to a remote store, reservation or catalog alike.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store answered with status {0}")]
    Status(StatusCode),
    #[error("No data available.")]
    NoData,
    #[error("record {key} is malformed: {source}")]
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    #[error("record {key} is invalid: {source}")]
    InvalidRecord {
        key: String,
        source: InvalidReservation,
    },
    #[error("record {key} names classroom {classroom_name}")]
    KeyMismatch { key: String, classroom_name: String },
    #[error("classroom {0} appears more than once")]
    DuplicateClassroom(String),
    #[error("cannot build a request address from {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Please log in to manage reservations.")]
    NotLoggedIn,
    #[error("you may only cancel your own reservations")]
    NotOwner { classroom: String },
    #[error("classroom {0} is not in the current snapshot")]
    UnknownClassroom(String),
    #[error("a request for {0} is still in progress")]
    Pending(String),
    #[error("Error loading data: {0}")]
    LoadFailed(#[source] StoreError),
    #[error("Error reserving room: {0}")]
    ReserveFailed(#[source] StoreError),
    #[error("Error canceling reservation: {0}")]
    CancelFailed(#[source] StoreError),
    #[error("the reservation view was closed before the store answered")]
    Detached,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("Please log in first.")]
    NotLoggedIn,
    #[error("Access restricted to students only.")]
    StudentsOnly,
    #[error("Access restricted to teachers only.")]
    TeachersOnly,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("Error loading data: {0}")]
    Fetch(#[from] StoreError),
    #[error("No matching degree found for the given program ID {0}.")]
    NoMatchingDegree(String),
}
