//! Static guidance shown next to each category on the results page.

use crate::assessment::catalog::Category;

/// A titled self-help strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub category: Category,
    pub summary: &'static str,
    pub strategies: [Strategy; 2],
}

pub const PROFESSIONAL_HELP_TITLE: &str = "When to Seek Professional Help";

pub const PROFESSIONAL_HELP_NOTE: &str = "If you're experiencing persistent symptoms that interfere with your daily life, or if you have thoughts of harming yourself or others, please reach out to a mental health professional immediately.";

pub const DISCLAIMER: &str = "This assessment is for informational purposes only and is not a substitute for professional psychological or medical advice, diagnosis, or treatment. If you're experiencing severe symptoms, please consult with a healthcare professional.";

pub fn recommendation_for(category: Category) -> Recommendation {
    match category {
        Category::Anxiety => Recommendation {
            category,
            summary: "Based on your anxiety score, we recommend focusing on stress reduction techniques and mindfulness practices.",
            strategies: [
                Strategy {
                    title: "Deep Breathing",
                    body: "Practice 4-7-8 breathing: inhale for 4 counts, hold for 7, exhale for 8.",
                },
                Strategy {
                    title: "Progressive Muscle Relaxation",
                    body: "Tense and then release each muscle group to reduce physical tension.",
                },
            ],
        },
        Category::Depression => Recommendation {
            category,
            summary: "Your depression score suggests maintaining regular self-care routines and staying connected with supportive people.",
            strategies: [
                Strategy {
                    title: "Behavioral Activation",
                    body: "Schedule enjoyable activities, even when motivation is low.",
                },
                Strategy {
                    title: "Morning Sunlight",
                    body: "Get 15-30 minutes of morning sunlight to regulate your circadian rhythm.",
                },
            ],
        },
        Category::Stress => Recommendation {
            category,
            summary: "To manage your stress levels, consider implementing boundaries and regular relaxation techniques.",
            strategies: [
                Strategy {
                    title: "Time Boundaries",
                    body: "Set clear work/personal life boundaries and stick to them.",
                },
                Strategy {
                    title: "Nature Exposure",
                    body: "Spend time in natural settings to reduce cortisol levels.",
                },
            ],
        },
        Category::Focus => Recommendation {
            category,
            summary: "To enhance your focus, try incorporating structured time management and minimizing distractions.",
            strategies: [
                Strategy {
                    title: "Pomodoro Technique",
                    body: "Work in focused 25-minute intervals with 5-minute breaks.",
                },
                Strategy {
                    title: "Digital Minimalism",
                    body: "Reduce notifications and schedule specific times to check email/messages.",
                },
            ],
        },
    }
}

/// Recommendations for every category, in display order.
pub fn all() -> Vec<Recommendation> {
    Category::ALL.iter().map(|c| recommendation_for(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_two_distinct_strategies() {
        for rec in all() {
            assert_ne!(rec.strategies[0].title, rec.strategies[1].title);
            assert!(!rec.summary.is_empty());
        }
    }

    #[test]
    fn recommendation_is_tagged_with_its_category() {
        assert_eq!(recommendation_for(Category::Focus).category, Category::Focus);
        assert_eq!(
            recommendation_for(Category::Anxiety).strategies[0].title,
            "Deep Breathing"
        );
    }
}
