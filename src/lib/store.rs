use log::{debug, info};
use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::{error::StoreError, models::reservation_model::ReservationRecord};

/// A remote key-value store of classroom reservations, keyed by classroom name.
#[allow(async_fn_in_trait)]
pub trait ReservationStore {
    /// Every reservation record, in the order the store returned them.
    async fn fetch_all(&self) -> Result<Vec<ReservationRecord>, StoreError>;
    /// Writes one record under its classroom name.
    async fn update(&self, record: &ReservationRecord) -> Result<(), StoreError>;
}

fn parse_base(base_url: &str) -> Result<Url, StoreError> {
    let url = Url::parse(base_url).map_err(|_| StoreError::InvalidUrl(base_url.to_owned()))?;
    if url.cannot_be_a_base() {
        return Err(StoreError::InvalidUrl(base_url.to_owned()));
    }
    Ok(url)
}

fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, StoreError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| StoreError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status))
    }
}

/// Realtime document store reached over its REST interface:
/// the collection lives at `reservations.json`, each room at `reservations/<name>.json`.
#[derive(Debug, Clone)]
pub struct RealtimeStore {
    client: Client,
    base: Url,
    auth: Option<String>,
}

impl RealtimeStore {
    pub fn new(client: Client, base_url: &str, auth: Option<String>) -> Result<Self, StoreError> {
        Ok(RealtimeStore {
            client,
            base: parse_base(base_url)?,
            auth,
        })
    }

    fn document_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = join_segments(&self.base, segments)?;
        if let Some(token) = &self.auth {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }
}

impl ReservationStore for RealtimeStore {
    async fn fetch_all(&self) -> Result<Vec<ReservationRecord>, StoreError> {
        let url = self.document_url(&["reservations.json"])?;
        info!("Getting reservations from {}", self.base);
        let response = check_status(self.client.get(url).send().await?)?;
        // An empty location reads back as `null`.
        let documents: Option<serde_json::Map<String, serde_json::Value>> =
            response.json().await?;
        let Some(documents) = documents else {
            return Err(StoreError::NoData);
        };
        documents
            .into_iter()
            .map(|(key, value)| {
                let mut record: ReservationRecord = serde_json::from_value(value)
                    .map_err(|source| StoreError::Malformed {
                        key: key.clone(),
                        source,
                    })?;
                if record.classroom_name.is_empty() {
                    record.classroom_name = key;
                } else if record.classroom_name != key {
                    // updates address the document by classroom name
                    return Err(StoreError::KeyMismatch {
                        key,
                        classroom_name: record.classroom_name,
                    });
                }
                Ok(record)
            })
            .collect()
    }

    async fn update(&self, record: &ReservationRecord) -> Result<(), StoreError> {
        let document = format!("{}.json", record.classroom_name);
        let url = self.document_url(&["reservations", &document])?;
        debug!("Patching reservation {}", record.classroom_name);
        check_status(self.client.patch(url).json(record).send().await?)?;
        Ok(())
    }
}

#[derive(Deserialize, Debug)]
struct RestReservations {
    #[serde(default)]
    reservations: Option<Vec<ReservationRecord>>,
}

/// REST reservation endpoint: `GET public-api/reservations`, `PUT public-api/reservation/<name>`.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base: Url,
}

impl RestStore {
    pub fn new(client: Client, base_url: &str) -> Result<Self, StoreError> {
        Ok(RestStore {
            client,
            base: parse_base(base_url)?,
        })
    }
}

impl ReservationStore for RestStore {
    async fn fetch_all(&self) -> Result<Vec<ReservationRecord>, StoreError> {
        let url = join_segments(&self.base, &["public-api", "reservations"])?;
        info!("Getting reservations from {}", url);
        let response = check_status(self.client.get(url).send().await?)?;
        let body: RestReservations = response.json().await?;
        body.reservations.ok_or(StoreError::NoData)
    }

    async fn update(&self, record: &ReservationRecord) -> Result<(), StoreError> {
        let url = join_segments(
            &self.base,
            &["public-api", "reservation", &record.classroom_name],
        )?;
        debug!("Putting reservation {}", record.classroom_name);
        check_status(self.client.put(url).json(record).send().await?)?;
        Ok(())
    }
}
