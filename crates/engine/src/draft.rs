//! User-supplied fields of a transaction, validated before any store call.

use crate::{EngineError, ResultEngine, TransactionType};

/// The three mutable fields of a transaction.
///
/// A draft can only be obtained through [`TransactionDraft::new`] or
/// [`TransactionDraft::parse`], so create and update never see an empty title
/// or a zero amount.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionDraft {
    title: String,
    amount: f64,
    kind: TransactionType,
}

impl TransactionDraft {
    pub fn new(title: &str, amount: f64, kind: TransactionType) -> ResultEngine<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EngineError::Validation("title must not be empty".to_string()));
        }
        if !amount.is_finite() || amount == 0.0 {
            return Err(EngineError::Validation(
                "amount must be a non-zero number".to_string(),
            ));
        }
        Ok(Self {
            title: title.to_string(),
            amount,
            kind,
        })
    }

    /// Builds a draft from raw form input.
    pub fn parse(title: &str, amount: &str, kind: TransactionType) -> ResultEngine<Self> {
        let amount = amount
            .trim()
            .parse::<f64>()
            .map_err(|_| EngineError::Validation(format!("invalid amount: {amount}")))?;
        Self::new(title, amount, kind)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        let draft = TransactionDraft::new("  Coffee ", 4.5, TransactionType::Expense).unwrap();
        assert_eq!(draft.title(), "Coffee");
        assert_eq!(draft.amount(), 4.5);
        assert_eq!(draft.kind(), TransactionType::Expense);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(
            TransactionDraft::new("   ", 1.0, TransactionType::Income),
            Err(EngineError::Validation("title must not be empty".to_string()))
        );
    }

    #[test]
    fn zero_or_non_finite_amount_is_rejected() {
        for amount in [0.0, f64::NAN, f64::INFINITY] {
            assert!(TransactionDraft::new("Rent", amount, TransactionType::Expense).is_err());
        }
    }

    #[test]
    fn parse_reads_form_input() {
        let draft =
            TransactionDraft::parse("Salary", " 1200.50 ", TransactionType::Income).unwrap();
        assert_eq!(draft.amount(), 1200.5);

        assert_eq!(
            TransactionDraft::parse("Salary", "12abc", TransactionType::Income),
            Err(EngineError::Validation("invalid amount: 12abc".to_string()))
        );
        assert!(TransactionDraft::parse("Salary", "", TransactionType::Income).is_err());
    }
}
