//! Answer ledger: the answers chosen so far, keyed by question.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::catalog::{Catalog, Category, QuestionId};
use crate::error::AssessmentError;

/// A recorded answer. The category is copied from the question when the
/// answer is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub value: u32,
    pub category: Category,
}

/// Mapping from question id to the selected option.
///
/// An entry exists only for questions that were explicitly answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerLedger {
    entries: BTreeMap<QuestionId, LedgerEntry>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the answer to `id`.
    ///
    /// Fails if the question is not in `catalog` or `value` is not one of
    /// its options; the ledger is left untouched in that case.
    pub fn record(
        &mut self,
        catalog: &Catalog,
        id: QuestionId,
        value: u32,
    ) -> Result<LedgerEntry, AssessmentError> {
        let question = catalog
            .get(id)
            .ok_or(AssessmentError::UnknownQuestion(id))?;
        if !question.has_option(value) {
            return Err(AssessmentError::InvalidOption {
                question: id,
                value,
            });
        }
        let entry = LedgerEntry {
            value,
            category: question.category,
        };
        self.entries.insert(id, entry);
        Ok(entry)
    }

    pub fn get(&self, id: QuestionId) -> Option<&LedgerEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in question-id order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &LedgerEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_copies_category_from_question() {
        let catalog = Catalog::builtin();
        let mut ledger = AnswerLedger::new();
        let entry = ledger.record(&catalog, QuestionId(7), 3).unwrap();
        assert_eq!(entry.category, Category::Focus);
        assert_eq!(ledger.get(QuestionId(7)), Some(&entry));
    }

    #[test]
    fn record_replaces_previous_answer() {
        let catalog = Catalog::builtin();
        let mut ledger = AnswerLedger::new();
        ledger.record(&catalog, QuestionId(1), 1).unwrap();
        ledger.record(&catalog, QuestionId(1), 3).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(QuestionId(1)).map(|e| e.value), Some(3));
    }

    #[test]
    fn zero_is_a_real_answer() {
        let catalog = Catalog::builtin();
        let mut ledger = AnswerLedger::new();
        ledger.record(&catalog, QuestionId(2), 0).unwrap();
        assert!(ledger.contains(QuestionId(2)));
    }

    #[test]
    fn rejects_unknown_question_and_foreign_value() {
        let catalog = Catalog::builtin();
        let mut ledger = AnswerLedger::new();
        assert_eq!(
            ledger.record(&catalog, QuestionId(42), 1),
            Err(AssessmentError::UnknownQuestion(QuestionId(42)))
        );
        assert_eq!(
            ledger.record(&catalog, QuestionId(1), 4),
            Err(AssessmentError::InvalidOption {
                question: QuestionId(1),
                value: 4
            })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn serializes_as_object_keyed_by_id() {
        let catalog = Catalog::builtin();
        let mut ledger = AnswerLedger::new();
        ledger.record(&catalog, QuestionId(3), 2).unwrap();
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "3": { "value": 2, "category": "stress" } })
        );
        let back: AnswerLedger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }
}
