//! Self-assessment questionnaire: catalog, answers, scoring and tiers.

pub mod catalog;
pub mod ledger;
pub mod recommendations;
pub mod scoring;
pub mod tier;
pub mod wizard;

pub use catalog::{AnswerOption, Catalog, Category, Question, QuestionId};
pub use ledger::{AnswerLedger, LedgerEntry};
pub use recommendations::{Recommendation, Strategy, recommendation_for};
pub use scoring::{CategoryScore, MaxPolicy, ResultsSnapshot, ScoreRow, score, score_with};
pub use tier::{Classification, Polarity, StyleHint, Tier, classify};
pub use wizard::{Advance, AssessmentWizard};
