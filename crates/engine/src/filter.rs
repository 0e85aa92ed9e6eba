//! In-memory narrowing and totals over an already fetched list.

use crate::{Transaction, TransactionType};

/// Filters applied to a listed sequence of transactions.
///
/// Both predicates must hold. An empty `title` matches everything, and a
/// `kind` of `None` means "all types".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the title.
    pub title: String,
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let needle = self.title.to_lowercase();
        tx.title.to_lowercase().contains(&needle) && self.kind.is_none_or(|kind| kind == tx.kind)
    }

    pub fn apply(&self, txs: Vec<Transaction>) -> Vec<Transaction> {
        txs.into_iter().filter(|tx| self.matches(tx)).collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
}

impl Summary {
    pub fn of(txs: &[Transaction]) -> Self {
        txs.iter().fold(Self::default(), |mut acc, tx| {
            match tx.kind {
                TransactionType::Income => acc.income += tx.amount.abs(),
                TransactionType::Expense => acc.expense += tx.amount.abs(),
            }
            acc
        })
    }

    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tx(id: i64, title: &str, amount: f64, kind: TransactionType) -> Transaction {
        Transaction {
            id,
            title: title.to_string(),
            amount,
            created_at: Utc::now(),
            kind,
            is_deleted: false,
        }
    }

    fn fixtures() -> Vec<Transaction> {
        vec![
            tx(1, "Coffee", 4.5, TransactionType::Expense),
            tx(2, "Coffee beans refund", 12.0, TransactionType::Income),
            tx(3, "Iced COFFEE", 5.0, TransactionType::Expense),
            tx(4, "Salary", 1200.0, TransactionType::Income),
        ]
    }

    #[test]
    fn default_filter_keeps_everything() {
        assert_eq!(TransactionFilter::default().apply(fixtures()).len(), 4);
    }

    #[test]
    fn title_and_type_must_both_match() {
        let filter = TransactionFilter {
            title: "cof".to_string(),
            kind: Some(TransactionType::Expense),
        };
        let ids: Vec<i64> = filter.apply(fixtures()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn summary_totals_by_type() {
        let summary = Summary::of(&fixtures());
        assert_eq!(summary.income, 1212.0);
        assert_eq!(summary.expense, 9.5);
        assert_eq!(summary.balance(), 1202.5);
    }
}
