//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense entry. The amount is stored
//! unsigned; whether it adds to or subtracts from the balance is carried by
//! its [`TransactionType`].

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Spelling stored in the `type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidType(other.to_string())),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = EngineError;

    /// Case-insensitive, for user input. Stored values go through `TryFrom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(EngineError::InvalidType(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub created_at: DateTimeUtc,
    pub kind: TransactionType,
    pub is_deleted: bool,
}

impl Transaction {
    /// Display form used by listings, e.g. `+$1200.00` or `-$4.50`.
    pub fn amount_label(&self) -> String {
        let sign = match self.kind {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        };
        format!("{sign}${:.2}", self.amount.abs())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub amount: f64,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTime,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    #[sea_orm(column_name = "isDeleted")]
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            amount: model.amount,
            created_at: model.created_at.and_utc(),
            kind: TransactionType::try_from(model.kind.as_str())?,
            is_deleted: model.is_deleted,
        })
    }
}

pub(crate) fn from_models(models: Vec<Model>) -> ResultEngine<Vec<Transaction>> {
    models.into_iter().map(Transaction::try_from).collect()
}
