use log::{debug, info};
use reqwest::Client;

use crate::{
    error::{CatalogError, StoreError},
    models::degree_model::{Degree, DegreesResponse},
    session::Session,
};

/// A trait, necessary for every entity that will be used for getting the degree catalog.
#[allow(async_fn_in_trait)]
pub trait DegreeSource {
    async fn fetch_all_degrees(&self) -> Result<Vec<Degree>, StoreError>;
}

/// Catalog served as `{ "degrees": [...] }` by a plain HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpDegreeSource {
    client: Client,
    url: String,
}

impl HttpDegreeSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        HttpDegreeSource {
            client,
            url: url.into(),
        }
    }
}

impl DegreeSource for HttpDegreeSource {
    async fn fetch_all_degrees(&self) -> Result<Vec<Degree>, StoreError> {
        info!("Getting degrees from {}", self.url);
        let response = self.client.get(self.url.as_str()).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }
        let body: DegreesResponse = response.json().await?;
        debug!("Catalog lists {} degrees", body.degrees.len());
        Ok(body.degrees)
    }
}

/// `Ok(None)` when the catalog has no degree with this id.
pub async fn get_degree_by_id<D: DegreeSource>(
    source: &D,
    id: u32,
) -> Result<Option<Degree>, StoreError> {
    let degrees = source.fetch_all_degrees().await?;
    Ok(degrees.into_iter().find(|degree| degree.id == id))
}

pub async fn fetch_course_name<D: DegreeSource>(
    source: &D,
    degree_id: u32,
    course_id: &str,
) -> Result<Option<String>, StoreError> {
    let degree = get_degree_by_id(source, degree_id).await?;
    Ok(degree
        .and_then(|degree| degree.course(course_id).map(|course| course.course_name.clone())))
}

/// The degree program the logged-in student is enrolled on. Students only.
pub async fn student_degree<D: DegreeSource>(
    source: &D,
    session: &Session<'_>,
) -> Result<Degree, CatalogError> {
    let student = session.require_student()?;
    let program_id = &student.degree_program_id;
    let degrees = source.fetch_all_degrees().await?;
    degrees
        .into_iter()
        .find(|degree| degree.id.to_string() == *program_id)
        .ok_or_else(|| CatalogError::NoMatchingDegree(program_id.clone()))
}
