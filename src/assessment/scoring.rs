//! Scoring engine: aggregates a completed ledger into per-category scores.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::catalog::{Catalog, Category, Question};
use crate::assessment::ledger::AnswerLedger;
use crate::assessment::tier::{Classification, classify};

/// Aggregate for one category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScore {
    pub sum: u32,
    pub count: u32,
    pub max: u32,
    /// `sum / max * 100`, or 0 when `max` is 0. Not rounded.
    pub percentage: f64,
}

impl CategoryScore {
    /// Percentage rounded for display.
    pub fn rounded(&self) -> u32 {
        self.percentage.round() as u32
    }
}

/// Which maximum option value each answer adds to its category's denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxPolicy {
    /// The maximum of the first catalog question in the answer's category,
    /// whichever question was actually answered. This is what the shipped
    /// questionnaire has always produced.
    #[default]
    FirstInCategory,
    /// The maximum of the question that was answered.
    AnsweredQuestion,
}

/// Scores and answers captured at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSnapshot {
    pub scores: BTreeMap<Category, CategoryScore>,
    pub answers: AnswerLedger,
    pub timestamp: DateTime<Utc>,
}

/// A results row ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRow {
    pub category: Category,
    /// Rounded percentage.
    pub score: u32,
    pub classification: Classification,
}

impl ResultsSnapshot {
    pub fn score(&self, category: Category) -> CategoryScore {
        self.scores.get(&category).copied().unwrap_or_default()
    }

    /// One row per category, classified on the rounded percentage like the
    /// results dashboard does.
    pub fn rows(&self) -> Vec<ScoreRow> {
        self.scores
            .iter()
            .map(|(category, score)| {
                let rounded = score.rounded();
                ScoreRow {
                    category: *category,
                    score: rounded,
                    classification: classify(*category, f64::from(rounded)),
                }
            })
            .collect()
    }

    /// `(name, rounded score)` pairs for bar and radar charts (full mark 100).
    pub fn chart_series(&self) -> Vec<(&'static str, u32)> {
        self.scores
            .iter()
            .map(|(category, score)| (category.display_name(), score.rounded()))
            .collect()
    }
}

/// Score a ledger against a catalog, stamped with the current time.
pub fn score(catalog: &Catalog, ledger: &AnswerLedger) -> ResultsSnapshot {
    score_with(catalog, ledger, MaxPolicy::default(), Utc::now())
}

/// Score with an explicit denominator policy and timestamp.
///
/// Never fails. Categories without answers come out as all zeros, and
/// entries for ids the catalog does not know are skipped.
pub fn score_with(
    catalog: &Catalog,
    ledger: &AnswerLedger,
    policy: MaxPolicy,
    timestamp: DateTime<Utc>,
) -> ResultsSnapshot {
    let mut scores: BTreeMap<Category, CategoryScore> = Category::ALL
        .iter()
        .map(|category| (*category, CategoryScore::default()))
        .collect();

    for (id, entry) in ledger.iter() {
        let Some(question) = catalog.get(id) else {
            tracing::warn!(question = %id, "ignoring answer for unknown question");
            continue;
        };
        let max = match policy {
            MaxPolicy::FirstInCategory => catalog
                .first_in_category(entry.category)
                .map(Question::max_value),
            MaxPolicy::AnsweredQuestion => Some(question.max_value()),
        };

        let slot = scores.entry(entry.category).or_default();
        slot.sum += entry.value;
        slot.count += 1;
        if let Some(max) = max {
            slot.max += max;
        }
    }

    for slot in scores.values_mut() {
        slot.percentage = if slot.max > 0 {
            f64::from(slot.sum) / f64::from(slot.max) * 100.0
        } else {
            0.0
        };
    }

    tracing::debug!(answers = ledger.len(), "assessment scored");

    ResultsSnapshot {
        scores,
        answers: ledger.clone(),
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::{AnswerOption, QuestionId};
    use crate::assessment::tier::Tier;

    fn question(id: u32, category: Category, values: &[u32]) -> Question {
        Question {
            id: QuestionId(id),
            category,
            prompt: format!("q{id}"),
            help: String::new(),
            options: values
                .iter()
                .map(|v| AnswerOption {
                    value: *v,
                    label: v.to_string(),
                })
                .collect(),
        }
    }

    fn two_question_catalog() -> Catalog {
        Catalog::new(vec![
            question(1, Category::Anxiety, &[0, 1, 2, 3]),
            question(2, Category::Focus, &[0, 1, 2, 3, 4]),
        ])
        .unwrap()
    }

    #[test]
    fn empty_ledger_scores_zero_everywhere() {
        let snapshot = score(&Catalog::builtin(), &AnswerLedger::new());
        assert_eq!(snapshot.scores.len(), 4);
        for category in Category::ALL {
            assert_eq!(snapshot.score(category), CategoryScore::default());
        }
        let levels: Vec<Tier> = snapshot
            .rows()
            .iter()
            .map(|r| r.classification.level)
            .collect();
        assert_eq!(
            levels,
            vec![Tier::Low, Tier::Low, Tier::Low, Tier::NeedsImprovement]
        );
    }

    #[test]
    fn two_question_scenario() {
        let catalog = two_question_catalog();
        let mut ledger = AnswerLedger::new();
        ledger.record(&catalog, QuestionId(1), 2).unwrap();
        ledger.record(&catalog, QuestionId(2), 3).unwrap();

        let snapshot = score(&catalog, &ledger);
        let anxiety = snapshot.score(Category::Anxiety);
        assert_eq!((anxiety.sum, anxiety.count, anxiety.max), (2, 1, 3));
        assert!((anxiety.percentage - 66.666_666).abs() < 1e-3);
        assert_eq!(anxiety.rounded(), 67);

        let focus = snapshot.score(Category::Focus);
        assert_eq!(focus.percentage, 75.0);

        let rows = snapshot.rows();
        let anxiety_row = rows.iter().find(|r| r.category == Category::Anxiety).unwrap();
        let focus_row = rows.iter().find(|r| r.category == Category::Focus).unwrap();
        assert_eq!(anxiety_row.classification.level, Tier::High);
        assert_eq!(focus_row.classification.level, Tier::Excellent);
    }

    #[test]
    fn denominator_uses_first_question_in_category_by_default() {
        let catalog = Catalog::new(vec![
            question(1, Category::Stress, &[0, 1, 2]),
            question(2, Category::Stress, &[0, 1, 2, 3, 4, 5, 6]),
        ])
        .unwrap();
        let mut ledger = AnswerLedger::new();
        ledger.record(&catalog, QuestionId(2), 3).unwrap();

        let faithful = score(&catalog, &ledger);
        assert_eq!(faithful.score(Category::Stress).max, 2);
        assert_eq!(faithful.score(Category::Stress).percentage, 150.0);

        let corrected = score_with(&catalog, &ledger, MaxPolicy::AnsweredQuestion, Utc::now());
        assert_eq!(corrected.score(Category::Stress).max, 6);
        assert_eq!(corrected.score(Category::Stress).percentage, 50.0);
    }

    #[test]
    fn builtin_percentages_stay_in_range() {
        let catalog = Catalog::builtin();
        let mut worst = AnswerLedger::new();
        let mut best = AnswerLedger::new();
        for q in catalog.questions() {
            worst.record(&catalog, q.id, q.max_value()).unwrap();
            let min = q.options.iter().map(|o| o.value).min().unwrap();
            best.record(&catalog, q.id, min).unwrap();
        }
        for snapshot in [score(&catalog, &worst), score(&catalog, &best)] {
            for category in Category::ALL {
                let pct = snapshot.score(category).percentage;
                assert!((0.0..=100.0).contains(&pct), "{category}: {pct}");
            }
        }
        assert_eq!(score(&catalog, &worst).score(Category::Stress).percentage, 100.0);
        assert_eq!(score(&catalog, &best).score(Category::Anxiety).percentage, 0.0);
    }

    #[test]
    fn reversed_item_contributes_its_selected_value() {
        let catalog = Catalog::builtin();
        let mut ledger = AnswerLedger::new();
        // "Very often" on the positively phrased item maps to 0.
        ledger.record(&catalog, QuestionId(6), 0).unwrap();
        ledger.record(&catalog, QuestionId(3), 4).unwrap();
        let stress = score(&catalog, &ledger).score(Category::Stress);
        assert_eq!((stress.sum, stress.count, stress.max), (4, 2, 8));
        assert_eq!(stress.percentage, 50.0);
    }

    #[test]
    fn chart_series_is_in_category_order() {
        let snapshot = score(&Catalog::builtin(), &AnswerLedger::new());
        let names: Vec<&str> = snapshot.chart_series().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["Anxiety", "Depression", "Stress", "Focus"]);
    }

    #[test]
    fn snapshot_survives_json() {
        let catalog = Catalog::builtin();
        let mut ledger = AnswerLedger::new();
        ledger.record(&catalog, QuestionId(1), 3).unwrap();
        let snapshot = score(&catalog, &ledger);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"anxiety\""));
        let back: ResultsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
