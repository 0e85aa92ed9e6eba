//! Pushes the local ledger to a remote collection.
//!
//! A run replaces the remote set with the current local snapshot of active
//! transactions:
//!
//! 1. `GET {endpoint}` lists the remote items. Any failure here aborts the run
//!    before anything else is sent.
//! 2. `DELETE {endpoint}/{id}` for every listed item, all in flight at once.
//! 3. The active local transactions are read.
//! 4. `POST {endpoint}` for every local transaction, all in flight at once.
//!
//! Steps 2 and 4 never abort. Each request ends up as an [`ItemOutcome`] in
//! the returned [`SyncReport`] and the caller decides what to do with
//! failures. There is no rollback: a run that stops after step 2 leaves the
//! remote collection partially or fully emptied.
use std::time::Duration;

use api_types::{
    ErrorBody,
    transaction::{RemoteId, RemoteItem, TransactionPayload, TransactionType},
};
use engine::{Repository, Transaction};
use futures::future::join_all;
use reqwest::{Response, Url};

pub use error::{Result, SyncError};

mod error;

/// Result of a single remote delete or upload.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemOutcome {
    pub id: RemoteId,
    /// `None` when the request succeeded.
    pub error: Option<String>,
}

impl ItemOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncReport {
    pub deleted: Vec<ItemOutcome>,
    pub uploaded: Vec<ItemOutcome>,
}

impl SyncReport {
    /// True when every delete and upload succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.deleted
            .iter()
            .chain(self.uploaded.iter())
            .filter(|outcome| !outcome.is_ok())
    }
}

#[derive(Debug, Clone)]
pub struct Syncer {
    endpoint: Url,
    http: reqwest::Client,
}

impl Syncer {
    /// Return a builder for `Syncer`.
    pub fn builder() -> SyncerBuilder {
        SyncerBuilder::default()
    }

    /// Runs one sync against `repository`. The local store is only read.
    pub async fn run(&self, repository: &Repository) -> Result<SyncReport> {
        tracing::info!("sync started against {}", self.endpoint);

        let remote = self.fetch_remote().await?;
        tracing::info!("removing {} remote item(s)", remote.len());
        let deleted = join_all(remote.iter().map(|item| self.delete_item(&item.id))).await;

        let local = repository.transactions(false).await?;
        tracing::info!("uploading {} local transaction(s)", local.len());
        let uploaded = join_all(local.iter().map(|tx| self.upload_item(tx))).await;

        let report = SyncReport { deleted, uploaded };
        match report.failures().count() {
            0 => tracing::info!("sync completed"),
            n => tracing::warn!("sync completed with {n} failed item(s)"),
        }
        Ok(report)
    }

    async fn fetch_remote(&self) -> Result<Vec<RemoteItem>> {
        let res = self.http.get(self.endpoint.clone()).send().await?;
        let res = ensure_success(res).await?;
        let body = res.bytes().await?;
        serde_json::from_slice::<Vec<RemoteItem>>(&body)
            .map_err(|err| SyncError::Payload(err.to_string()))
    }

    async fn delete_item(&self, id: &RemoteId) -> ItemOutcome {
        let res = match self.http.delete(self.item_url(id)).send().await {
            Ok(res) => ensure_success(res).await.map(|_| ()),
            Err(err) => Err(err.into()),
        };
        outcome("delete", id.clone(), res)
    }

    async fn upload_item(&self, tx: &Transaction) -> ItemOutcome {
        let res = match self
            .http
            .post(self.endpoint.clone())
            .json(&payload(tx))
            .send()
            .await
        {
            Ok(res) => ensure_success(res).await.map(|_| ()),
            Err(err) => Err(err.into()),
        };
        outcome("upload", RemoteId::Int(tx.id), res)
    }

    /// `{endpoint}/{id}`, with the id percent-encoded as one path segment and
    /// any query string of the endpoint kept.
    fn item_url(&self, id: &RemoteId) -> Url {
        let mut url = self.endpoint.clone();
        // http(s) urls always have a path, see `parse_endpoint`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }
}

fn outcome(action: &str, id: RemoteId, res: Result<()>) -> ItemOutcome {
    match res {
        Ok(()) => ItemOutcome { id, error: None },
        Err(err) => {
            tracing::warn!("{action} failed for {id}: {err}");
            ItemOutcome {
                id,
                error: Some(err.to_string()),
            }
        }
    }
}

async fn ensure_success(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = match res.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("remote error").to_string(),
    };
    Err(SyncError::Remote {
        status: status.as_u16(),
        message,
    })
}

fn payload(tx: &Transaction) -> TransactionPayload {
    TransactionPayload {
        id: tx.id,
        title: tx.title.clone(),
        amount: tx.amount,
        created_at: tx.created_at,
        kind: match tx.kind {
            engine::TransactionType::Income => TransactionType::Income,
            engine::TransactionType::Expense => TransactionType::Expense,
        },
        is_deleted: tx.is_deleted,
    }
}

/// The builder for `Syncer`
#[derive(Default)]
pub struct SyncerBuilder {
    endpoint: String,
    timeout: Option<Duration>,
}

impl SyncerBuilder {
    /// Collection URL, e.g. `https://example.com/transactions`.
    pub fn endpoint(mut self, endpoint: &str) -> SyncerBuilder {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Per-request timeout. Requests wait indefinitely when unset.
    pub fn timeout(mut self, timeout: Option<Duration>) -> SyncerBuilder {
        self.timeout = timeout;
        self
    }

    /// Construct `Syncer`
    pub fn build(self) -> Result<Syncer> {
        let endpoint = parse_endpoint(&self.endpoint)?;
        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        Ok(Syncer {
            endpoint,
            http: http.build()?,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SyncError::InvalidEndpoint(
            "endpoint must not be empty".to_string(),
        ));
    }
    let url = Url::parse(raw).map_err(|err| SyncError::InvalidEndpoint(format!("{raw}: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SyncError::InvalidEndpoint(format!(
            "unsupported scheme: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(endpoint: &str) -> Result<Syncer> {
        Syncer::builder().endpoint(endpoint).build()
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        for raw in ["", "   "] {
            assert!(matches!(build(raw), Err(SyncError::InvalidEndpoint(_))));
        }
    }

    #[test]
    fn endpoint_must_be_http_url() {
        assert!(matches!(build("not a url"), Err(SyncError::InvalidEndpoint(_))));
        assert!(matches!(
            build("ftp://example.com/transactions"),
            Err(SyncError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn item_url_appends_id() {
        let syncer = build(" https://example.com/api/transactions/ ").unwrap();
        assert_eq!(
            syncer.item_url(&RemoteId::Int(3)).as_str(),
            "https://example.com/api/transactions/3"
        );
        assert_eq!(
            syncer.item_url(&RemoteId::Str("ab12".to_string())).as_str(),
            "https://example.com/api/transactions/ab12"
        );
    }

    #[test]
    fn item_url_keeps_query_and_encodes_id() {
        let syncer = build("https://h/api/transactions?key=k").unwrap();
        assert_eq!(
            syncer.item_url(&RemoteId::Int(3)).as_str(),
            "https://h/api/transactions/3?key=k"
        );
        assert_eq!(
            syncer.item_url(&RemoteId::Str("a/b c".to_string())).as_str(),
            "https://h/api/transactions/a%2Fb%20c?key=k"
        );
    }

    #[test]
    fn report_lists_failures_from_both_phases() {
        let report = SyncReport {
            deleted: vec![
                ItemOutcome {
                    id: RemoteId::Int(1),
                    error: None,
                },
                ItemOutcome {
                    id: RemoteId::Int(2),
                    error: Some("boom".to_string()),
                },
            ],
            uploaded: vec![ItemOutcome {
                id: RemoteId::Int(5),
                error: Some("boom".to_string()),
            }],
        };
        assert!(!report.is_clean());
        let ids: Vec<RemoteId> = report.failures().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec![RemoteId::Int(2), RemoteId::Int(5)]);
        assert!(SyncReport::default().is_clean());
    }
}
