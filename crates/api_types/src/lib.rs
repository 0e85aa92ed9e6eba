use serde::{Deserialize, Serialize};

pub mod transaction {
    use std::fmt;

    use chrono::{DateTime, Utc};

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum TransactionType {
        Income,
        Expense,
    }

    /// One transaction as exchanged with a sync collection.
    ///
    /// Field names match the table columns (`createdAt`, `isDeleted`,
    /// `type`).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionPayload {
        pub id: i64,
        pub title: String,
        pub amount: f64,
        pub created_at: DateTime<Utc>,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub is_deleted: bool,
    }

    /// Identifier of an item in a remote collection.
    ///
    /// Collections backed by json-server style stores hand out string ids, so
    /// both forms are accepted.
    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum RemoteId {
        Int(i64),
        Str(String),
    }

    impl fmt::Display for RemoteId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Int(id) => write!(f, "{id}"),
                Self::Str(id) => f.write_str(id),
            }
        }
    }

    /// Remote item as listed by `GET {endpoint}`. Only the id is required.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct RemoteItem {
        pub id: RemoteId,
    }
}

/// Body of every non-success response from the reference endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
