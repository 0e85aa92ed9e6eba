//! Local ledger of income and expense transactions.
//!
//! [`Repository`] runs one parameterized statement per operation against the
//! `transactions` table. The table itself is created by the `migration`
//! crate; the repository assumes it exists.
use sea_orm::{ActiveValue, DatabaseConnection, QueryFilter, QueryOrder, prelude::*};

pub use draft::TransactionDraft;
pub use error::EngineError;
pub use filter::{Summary, TransactionFilter};
pub use transactions::{Transaction, TransactionType};

mod draft;
mod error;
mod filter;
mod transactions;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Data access over the transactions table.
///
/// Every method is a single statement, so each is atomic on its own and no
/// method spans a database transaction. Store failures are returned as
/// [`EngineError::Database`].
#[derive(Clone, Debug)]
pub struct Repository {
    database: DatabaseConnection,
}

impl Repository {
    /// Return a builder for `Repository`. Help to build the struct.
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::default()
    }

    /// Inserts a new transaction and returns its id.
    ///
    /// `createdAt` and `isDeleted` are left to the column defaults.
    pub async fn create(&self, draft: &TransactionDraft) -> ResultEngine<i64> {
        let model = transactions::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(draft.title().to_string()),
            amount: ActiveValue::Set(draft.amount()),
            created_at: ActiveValue::NotSet,
            kind: ActiveValue::Set(draft.kind().as_str().to_string()),
            is_deleted: ActiveValue::NotSet,
        };
        let res = transactions::Entity::insert(model)
            .exec(&self.database)
            .await?;
        tracing::debug!("created transaction {}", res.last_insert_id);
        Ok(res.last_insert_id)
    }

    /// Lists the transactions whose deletion flag equals `is_deleted`, by id.
    pub async fn transactions(&self, is_deleted: bool) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::IsDeleted.eq(is_deleted))
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?;
        transactions::from_models(models)
    }

    /// Fetches a transaction regardless of its deletion flag.
    ///
    /// A missing id is `Ok(None)`.
    pub async fn transaction(&self, id: i64) -> ResultEngine<Option<Transaction>> {
        transactions::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Transaction::try_from)
            .transpose()
    }

    /// Overwrites title, amount and type of the row with `id`.
    ///
    /// Returns whether a row matched; an unknown id is not an error.
    pub async fn update(&self, id: i64, draft: &TransactionDraft) -> ResultEngine<bool> {
        let changes = transactions::ActiveModel {
            title: ActiveValue::Set(draft.title().to_string()),
            amount: ActiveValue::Set(draft.amount()),
            kind: ActiveValue::Set(draft.kind().as_str().to_string()),
            ..Default::default()
        };
        self.update_where_id(id, changes).await
    }

    /// Marks the row as deleted. Nothing is ever removed from the table.
    pub async fn soft_delete(&self, id: i64) -> ResultEngine<bool> {
        self.set_deleted(id, true).await
    }

    /// Clears the deletion flag set by [`Repository::soft_delete`].
    pub async fn restore(&self, id: i64) -> ResultEngine<bool> {
        self.set_deleted(id, false).await
    }

    async fn set_deleted(&self, id: i64, is_deleted: bool) -> ResultEngine<bool> {
        let changes = transactions::ActiveModel {
            is_deleted: ActiveValue::Set(is_deleted),
            ..Default::default()
        };
        self.update_where_id(id, changes).await
    }

    async fn update_where_id(
        &self,
        id: i64,
        changes: transactions::ActiveModel,
    ) -> ResultEngine<bool> {
        let res = transactions::Entity::update_many()
            .set(changes)
            .filter(transactions::Column::Id.eq(id))
            .exec(&self.database)
            .await?;
        tracing::debug!("update on transaction {id} matched {} row(s)", res.rows_affected);
        Ok(res.rows_affected > 0)
    }
}

/// The builder for `Repository`
#[derive(Default)]
pub struct RepositoryBuilder {
    database: Option<DatabaseConnection>,
}

impl RepositoryBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> RepositoryBuilder {
        self.database = Some(db);
        self
    }

    /// Construct `Repository`
    pub fn build(self) -> ResultEngine<Repository> {
        let database = self
            .database
            .ok_or_else(|| DbErr::Custom("no database connection given".to_string()))?;
        Ok(Repository { database })
    }
}
