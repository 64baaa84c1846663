//! Question catalog: the ordered, static list of questionnaire items.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assessment::tier::Polarity;
use crate::error::AssessmentError;

/// A psychological dimension that questions are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anxiety,
    Depression,
    Stress,
    Focus,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Anxiety,
        Category::Depression,
        Category::Stress,
        Category::Focus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anxiety => "anxiety",
            Self::Depression => "depression",
            Self::Stress => "stress",
            Self::Focus => "focus",
        }
    }

    /// Capitalised name used in tables and charts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Anxiety => "Anxiety",
            Self::Depression => "Depression",
            Self::Stress => "Stress",
            Self::Focus => "Focus",
        }
    }

    /// Whether a high percentage in this category is favourable.
    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Focus => Polarity::HigherIsBetter,
            Self::Anxiety | Self::Depression | Self::Stress => Polarity::LowerIsBetter,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anxiety" => Ok(Self::Anxiety),
            "depression" => Ok(Self::Depression),
            "stress" => Ok(Self::Stress),
            "focus" => Ok(Self::Focus),
            _ => Err(format!(
                "invalid category '{}', expected one of: anxiety, depression, stress, focus",
                s
            )),
        }
    }
}

/// Stable identifier of a question within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One selectable answer. Values are not necessarily ordered like labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: Category,
    pub prompt: String,
    /// Extra guidance shown next to the prompt.
    pub help: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Largest option value this question can contribute.
    pub fn max_value(&self) -> u32 {
        self.options.iter().map(|o| o.value).max().unwrap_or(0)
    }

    pub fn option(&self, value: u32) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn has_option(&self, value: u32) -> bool {
        self.option(value).is_some()
    }

    fn validate(&self) -> Result<(), AssessmentError> {
        if self.options.len() < 2 {
            return Err(AssessmentError::TooFewOptions { question: self.id });
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.value) {
                return Err(AssessmentError::DuplicateOption {
                    question: self.id,
                    value: option.value,
                });
            }
        }
        Ok(())
    }
}

/// Ordered list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and malformed option sets.
    pub fn new(questions: Vec<Question>) -> Result<Self, AssessmentError> {
        let catalog = Self { questions };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The ten-item questionnaire the application ships with.
    pub fn builtin() -> Self {
        let questions = BUILTIN_QUESTIONS
            .iter()
            .map(|def| Question {
                id: QuestionId(def.id),
                category: def.category,
                prompt: def.prompt.to_string(),
                help: def.help.to_string(),
                options: def
                    .options
                    .iter()
                    .map(|(value, label)| AnswerOption {
                        value: *value,
                        label: label.to_string(),
                    })
                    .collect(),
            })
            .collect();
        Self { questions }
    }

    pub fn validate(&self) -> Result<(), AssessmentError> {
        if self.questions.is_empty() {
            return Err(AssessmentError::EmptyCatalog);
        }
        let mut ids = HashSet::new();
        for question in &self.questions {
            if !ids.insert(question.id) {
                return Err(AssessmentError::DuplicateQuestion(question.id));
            }
            question.validate()?;
        }
        Ok(())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Question at a 0-based position.
    pub fn at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// First question tagged with `category`, in catalog order.
    pub fn first_in_category(&self, category: Category) -> Option<&Question> {
        self.questions.iter().find(|q| q.category == category)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

struct QuestionDef {
    id: u32,
    category: Category,
    prompt: &'static str,
    help: &'static str,
    options: &'static [(u32, &'static str)],
}

const TWO_WEEK_FREQUENCY: &[(u32, &str)] = &[
    (0, "Not at all"),
    (1, "Several days"),
    (2, "More than half the days"),
    (3, "Nearly every day"),
];

const PERCEIVED_STRESS: &[(u32, &str)] = &[
    (0, "Never"),
    (1, "Almost never"),
    (2, "Sometimes"),
    (3, "Fairly often"),
    (4, "Very often"),
];

// Positively phrased item: frequent agreement means less stress.
const PERCEIVED_STRESS_REVERSED: &[(u32, &str)] = &[
    (4, "Never"),
    (3, "Almost never"),
    (2, "Sometimes"),
    (1, "Fairly often"),
    (0, "Very often"),
];

const FOCUS_FREQUENCY: &[(u32, &str)] = &[
    (0, "Never"),
    (1, "Rarely"),
    (2, "Sometimes"),
    (3, "Often"),
    (4, "Very often"),
];

const PAST_TWO_WEEKS: &str = "Consider your experiences over the past two weeks";
const PAST_MONTH: &str = "Consider your experiences over the past month";
const GENERAL: &str = "Consider your general experiences";

const BUILTIN_QUESTIONS: &[QuestionDef] = &[
    QuestionDef {
        id: 1,
        category: Category::Anxiety,
        prompt: "How often do you feel nervous, anxious, or on edge?",
        help: PAST_TWO_WEEKS,
        options: TWO_WEEK_FREQUENCY,
    },
    QuestionDef {
        id: 2,
        category: Category::Depression,
        prompt: "How often do you feel down, depressed, or hopeless?",
        help: PAST_TWO_WEEKS,
        options: TWO_WEEK_FREQUENCY,
    },
    QuestionDef {
        id: 3,
        category: Category::Stress,
        prompt: "How often have you felt that you were unable to control the important things in your life?",
        help: PAST_MONTH,
        options: PERCEIVED_STRESS,
    },
    QuestionDef {
        id: 4,
        category: Category::Anxiety,
        prompt: "How often do you find yourself worrying too much about different things?",
        help: "Consider your general tendency",
        options: TWO_WEEK_FREQUENCY,
    },
    QuestionDef {
        id: 5,
        category: Category::Depression,
        prompt: "How often do you have little interest or pleasure in doing things?",
        help: PAST_TWO_WEEKS,
        options: TWO_WEEK_FREQUENCY,
    },
    QuestionDef {
        id: 6,
        category: Category::Stress,
        prompt: "How often have you felt that things were going your way?",
        help: "This is a positively phrased question. Consider your experiences over the past month",
        options: PERCEIVED_STRESS_REVERSED,
    },
    QuestionDef {
        id: 7,
        category: Category::Focus,
        prompt: "How often do you have trouble keeping your mind on what you're doing?",
        help: GENERAL,
        options: FOCUS_FREQUENCY,
    },
    QuestionDef {
        id: 8,
        category: Category::Anxiety,
        prompt: "How often do you have trouble relaxing?",
        help: PAST_TWO_WEEKS,
        options: TWO_WEEK_FREQUENCY,
    },
    QuestionDef {
        id: 9,
        category: Category::Depression,
        prompt: "How often do you feel tired or have little energy?",
        help: PAST_TWO_WEEKS,
        options: TWO_WEEK_FREQUENCY,
    },
    QuestionDef {
        id: 10,
        category: Category::Focus,
        prompt: "How often do you find yourself easily distracted by things around you?",
        help: GENERAL,
        options: FOCUS_FREQUENCY,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, options: &[u32]) -> Question {
        Question {
            id: QuestionId(id),
            category: Category::Anxiety,
            prompt: format!("q{id}"),
            help: String::new(),
            options: options
                .iter()
                .map(|v| AnswerOption {
                    value: *v,
                    label: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn builtin_reversed_item_keeps_label_order() {
        let catalog = Catalog::builtin();
        let q6 = catalog.get(QuestionId(6)).unwrap();
        assert_eq!(q6.category, Category::Stress);
        assert_eq!(q6.options[0].label, "Never");
        assert_eq!(q6.options[0].value, 4);
        assert_eq!(q6.max_value(), 4);
    }

    #[test]
    fn first_in_category_follows_catalog_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.first_in_category(Category::Focus).map(|q| q.id),
            Some(QuestionId(7))
        );
        assert_eq!(
            catalog.first_in_category(Category::Anxiety).map(|q| q.id),
            Some(QuestionId(1))
        );
    }

    #[test]
    fn rejects_single_option_question() {
        let err = Catalog::new(vec![question(1, &[0])]).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::TooFewOptions {
                question: QuestionId(1)
            }
        );
    }

    #[test]
    fn rejects_repeated_option_value() {
        let err = Catalog::new(vec![question(1, &[0, 1, 1])]).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::DuplicateOption {
                question: QuestionId(1),
                value: 1
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids_and_empty_catalog() {
        let err = Catalog::new(vec![question(3, &[0, 1]), question(3, &[0, 2])]).unwrap_err();
        assert_eq!(err, AssessmentError::DuplicateQuestion(QuestionId(3)));
        assert_eq!(
            Catalog::new(Vec::new()).unwrap_err(),
            AssessmentError::EmptyCatalog
        );
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Focus".parse::<Category>(), Ok(Category::Focus));
        assert!("mood".parse::<Category>().is_err());
    }
}
