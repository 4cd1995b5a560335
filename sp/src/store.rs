//! Stored trip-request sources
//!
//! One deployment variant does not take the trip request from the HTTP body:
//! it reads the most recently created trip document out of a persisted store
//! and maps it into request shape. The store itself stays behind the
//! `RequestSource` trait; this module ships the document mapping plus a
//! JSON-file-backed source useful for local runs and tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::trip::{GroupProfile, RawDeparture, RawTripRequest};

/// Errors from a request source
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store document malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No trip documents in store")]
    Empty,
}

/// Read-only source of the latest stored trip request
#[async_trait]
pub trait RequestSource: Send + Sync {
    /// Return the most recently created trip document, mapped into request shape
    async fn latest(&self) -> Result<RawTripRequest, StoreError>;
}

/// A stored trip document, one entry per participating user
#[derive(Debug, Clone, Deserialize)]
pub struct TripDocument {
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub users: Vec<TripUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripUser {
    /// Origin airport code
    pub from: String,
    pub budget: BudgetRange,
    pub dates: DateRange,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetRange {
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Map a stored trip document into request shape
///
/// Each user contributes one departure and one interest profile; the date
/// range is taken from the users' shared trip dates.
pub fn map_document(doc: &TripDocument) -> RawTripRequest {
    debug!(user_count = doc.users.len(), "map_document: called");
    let mut request = RawTripRequest {
        departures: Some(Vec::with_capacity(doc.users.len())),
        group_profiles: Some(Vec::with_capacity(doc.users.len())),
        start_date: None,
        end_date: None,
    };

    for user in &doc.users {
        if let Some(departures) = request.departures.as_mut() {
            departures.push(RawDeparture {
                airport: Some(user.from.clone()),
                budget: Some(user.budget.max),
            });
        }
        if let Some(profiles) = request.group_profiles.as_mut() {
            profiles.push(GroupProfile {
                interests: user.interests.clone(),
            });
        }
        request.start_date = Some(user.dates.start.clone());
        request.end_date = Some(user.dates.end.clone());
    }

    request
}

/// Request source backed by a JSON file holding an array of trip documents
pub struct FileRequestSource {
    path: PathBuf,
}

impl FileRequestSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        debug!(?path, "FileRequestSource::new: called");
        Self { path }
    }
}

#[async_trait]
impl RequestSource for FileRequestSource {
    async fn latest(&self) -> Result<RawTripRequest, StoreError> {
        debug!(path = ?self.path, "latest: called");
        let content = tokio::fs::read_to_string(&self.path).await?;
        let documents: Vec<TripDocument> = serde_json::from_str(&content)?;

        let latest = documents
            .into_iter()
            .max_by_key(|d| d.created_at)
            .ok_or(StoreError::Empty)?;

        info!(
            created_at = %latest.created_at,
            user_count = latest.users.len(),
            "latest: found trip document"
        );
        Ok(map_document(&latest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn document(created_at: &str, airport: &str) -> serde_json::Value {
        serde_json::json!({
            "createdAt": created_at,
            "users": [
                {
                    "from": airport,
                    "budget": { "max": 800.0 },
                    "dates": { "start": "2025-07-01", "end": "2025-07-10" },
                    "interests": ["beach", "culture"]
                },
                {
                    "from": "MAN",
                    "budget": { "max": 650.0 },
                    "dates": { "start": "2025-07-01", "end": "2025-07-10" },
                    "interests": ["nightlife"]
                }
            ]
        })
    }

    #[test]
    fn test_map_document_shapes_request() {
        let doc: TripDocument = serde_json::from_value(document("2025-06-01T12:00:00Z", "LGW")).unwrap();
        let raw = map_document(&doc);

        let departures = raw.departures.unwrap();
        assert_eq!(departures.len(), 2);
        assert_eq!(departures[0].airport.as_deref(), Some("LGW"));
        assert_eq!(departures[0].budget, Some(800.0));

        let profiles = raw.group_profiles.unwrap();
        assert_eq!(profiles[0].interests, vec!["beach", "culture"]);
        assert_eq!(profiles[1].interests, vec!["nightlife"]);

        assert_eq!(raw.start_date.as_deref(), Some("2025-07-01"));
        assert_eq!(raw.end_date.as_deref(), Some("2025-07-10"));
    }

    #[tokio::test]
    async fn test_file_source_picks_latest_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let documents = serde_json::json!([
            document("2025-05-01T08:00:00Z", "EDI"),
            document("2025-06-01T12:00:00Z", "LGW"),
            document("2025-03-15T09:30:00Z", "BRS"),
        ]);
        write!(file, "{documents}").unwrap();

        let source = FileRequestSource::new(file.path());
        let raw = source.latest().await.unwrap();
        assert_eq!(raw.departures.unwrap()[0].airport.as_deref(), Some("LGW"));
    }

    #[tokio::test]
    async fn test_file_source_empty_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let source = FileRequestSource::new(file.path());
        let err = source.latest().await.unwrap_err();
        assert!(matches!(err, StoreError::Empty));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileRequestSource::new("/definitely/not/here.json");
        let err = source.latest().await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
