//! Step-by-step questionnaire flow.

use chrono::Utc;

use crate::assessment::catalog::{Catalog, Question};
use crate::assessment::ledger::{AnswerLedger, LedgerEntry};
use crate::assessment::scoring::{MaxPolicy, ResultsSnapshot, score_with};
use crate::error::AssessmentError;

/// What happened after a successful [`AssessmentWizard::next`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Moved { index: usize },
    /// The last question was answered and the ledger was scored.
    Submitted(ResultsSnapshot),
}

/// Walks a catalog one question at a time.
///
/// Advancing requires an answer for the current question. Answering the
/// last question submits the assessment exactly once.
#[derive(Debug, Clone)]
pub struct AssessmentWizard {
    catalog: Catalog,
    current: usize,
    ledger: AnswerLedger,
    submitting: bool,
    policy: MaxPolicy,
}

impl AssessmentWizard {
    /// Start a wizard over `catalog`. Fails for an empty or malformed catalog.
    pub fn new(catalog: Catalog) -> Result<Self, AssessmentError> {
        catalog.validate()?;
        Ok(Self {
            catalog,
            current: 0,
            ledger: AnswerLedger::new(),
            submitting: false,
            policy: MaxPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: MaxPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.total()
    }

    pub fn current_question(&self) -> &Question {
        // `new` rejects empty catalogs and `current` never passes the end.
        &self.catalog.questions()[self.current]
    }

    /// `(index + 1) / total * 100`.
    pub fn progress_percent(&self) -> f64 {
        (self.current + 1) as f64 / self.total() as f64 * 100.0
    }

    /// The option value already chosen for the current question, if any.
    pub fn selected(&self) -> Option<u32> {
        self.ledger
            .get(self.current_question().id)
            .map(|entry| entry.value)
    }

    /// Answer the current question.
    pub fn select(&mut self, value: u32) -> Result<LedgerEntry, AssessmentError> {
        let id = self.current_question().id;
        self.ledger.record(&self.catalog, id, value)
    }

    /// Go back one question. Returns false at the first question or once
    /// the assessment has been submitted.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 || self.submitting {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Advance, or submit when the current question is the last one.
    ///
    /// Leaves all state untouched when the current question is unanswered
    /// or a submission already happened.
    pub fn next(&mut self) -> Result<Advance, AssessmentError> {
        if self.submitting {
            return Err(AssessmentError::AlreadySubmitting);
        }
        let id = self.current_question().id;
        if !self.ledger.contains(id) {
            return Err(AssessmentError::Unanswered(id));
        }

        if self.is_last() {
            self.submitting = true;
            let snapshot = score_with(&self.catalog, &self.ledger, self.policy, Utc::now());
            tracing::info!(answers = self.ledger.len(), "assessment submitted");
            return Ok(Advance::Submitted(snapshot));
        }

        self.current += 1;
        Ok(Advance::Moved {
            index: self.current,
        })
    }
}
