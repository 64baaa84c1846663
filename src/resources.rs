//! Built-in resource library: articles, guided exercises and external links.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Article {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub read_minutes: u32,
    pub published: (i32, u32, u32),
}

impl Article {
    pub fn published_on(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.published;
        NaiveDate::from_ymd_opt(y, m, d)
    }

    pub fn read_time(&self) -> String {
        format!("{} min read", self.read_minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// `None` for untimed exercises.
    pub minutes: Option<u32>,
    pub difficulty: Difficulty,
}

impl Exercise {
    pub fn duration(&self) -> String {
        match self.minutes {
            Some(m) => format!("{m} minutes"),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalLink {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub category: &'static str,
}

pub const ARTICLES: [Article; 6] = [
    Article {
        id: 1,
        title: "Understanding Anxiety: Causes, Symptoms, and Management",
        description: "Learn about the biological and psychological factors that contribute to anxiety disorders and effective strategies for managing symptoms.",
        category: "anxiety",
        read_minutes: 8,
        published: (2025, 4, 2),
    },
    Article {
        id: 2,
        title: "The Science of Stress: How It Affects Your Mind and Body",
        description: "Explore the physiological mechanisms of the stress response and its impact on physical and mental health over time.",
        category: "stress",
        read_minutes: 10,
        published: (2025, 3, 28),
    },
    Article {
        id: 3,
        title: "Mindfulness Meditation: A Beginner's Guide",
        description: "A step-by-step introduction to mindfulness meditation practices that can help reduce stress and improve focus.",
        category: "mindfulness",
        read_minutes: 7,
        published: (2025, 3, 25),
    },
    Article {
        id: 4,
        title: "Cognitive Behavioral Therapy: Principles and Applications",
        description: "An overview of cognitive behavioral therapy techniques and how they can be applied to various mental health challenges.",
        category: "therapy",
        read_minutes: 12,
        published: (2025, 3, 20),
    },
    Article {
        id: 5,
        title: "Building Emotional Resilience in Challenging Times",
        description: "Strategies for developing emotional resilience to better navigate life's difficulties and bounce back from setbacks.",
        category: "resilience",
        read_minutes: 9,
        published: (2025, 3, 15),
    },
    Article {
        id: 6,
        title: "The Connection Between Sleep and Mental Health",
        description: "Explore the bidirectional relationship between sleep quality and mental wellbeing, with practical tips for better sleep.",
        category: "sleep",
        read_minutes: 8,
        published: (2025, 3, 10),
    },
];

pub const EXERCISES: [Exercise; 6] = [
    Exercise {
        id: 1,
        title: "5-Minute Breathing Exercise",
        description: "A quick breathing technique to help calm your nervous system and reduce anxiety in the moment.",
        category: "anxiety",
        minutes: Some(5),
        difficulty: Difficulty::Beginner,
    },
    Exercise {
        id: 2,
        title: "Progressive Muscle Relaxation",
        description: "A systematic technique for releasing tension throughout your body to reduce physical symptoms of stress.",
        category: "stress",
        minutes: Some(15),
        difficulty: Difficulty::Beginner,
    },
    Exercise {
        id: 3,
        title: "Body Scan Meditation",
        description: "A mindfulness practice where you systematically bring attention to different parts of your body.",
        category: "mindfulness",
        minutes: Some(20),
        difficulty: Difficulty::Intermediate,
    },
    Exercise {
        id: 4,
        title: "Thought Record Exercise",
        description: "A cognitive behavioral technique for identifying and challenging unhelpful thoughts.",
        category: "therapy",
        minutes: Some(10),
        difficulty: Difficulty::Intermediate,
    },
    Exercise {
        id: 5,
        title: "Gratitude Journaling Practice",
        description: "A structured approach to cultivating gratitude through daily reflective writing.",
        category: "resilience",
        minutes: Some(5),
        difficulty: Difficulty::Beginner,
    },
    Exercise {
        id: 6,
        title: "Sleep Hygiene Checklist",
        description: "A practical checklist to optimize your sleeping environment and habits for better rest.",
        category: "sleep",
        minutes: None,
        difficulty: Difficulty::Beginner,
    },
];

pub const EXTERNAL_LINKS: [ExternalLink; 6] = [
    ExternalLink {
        id: 1,
        title: "National Institute of Mental Health",
        description: "Comprehensive information about mental health conditions, research, and treatments.",
        url: "https://www.nimh.nih.gov/",
        category: "Official",
    },
    ExternalLink {
        id: 2,
        title: "Mental Health America",
        description: "Resources for mental health screening, education, and finding help.",
        url: "https://www.mhanational.org/",
        category: "Nonprofit",
    },
    ExternalLink {
        id: 3,
        title: "Crisis Text Line",
        description: "Free 24/7 support for those in crisis via text message.",
        url: "https://www.crisistextline.org/",
        category: "Crisis Support",
    },
    ExternalLink {
        id: 4,
        title: "Headspace",
        description: "Guided meditation app for mindfulness and stress reduction.",
        url: "https://www.headspace.com/",
        category: "App",
    },
    ExternalLink {
        id: 5,
        title: "Psychology Today Therapist Finder",
        description: "Directory to find mental health professionals in your area.",
        url: "https://www.psychologytoday.com/us/therapists",
        category: "Directory",
    },
    ExternalLink {
        id: 6,
        title: "National Suicide Prevention Lifeline",
        description: "24/7 support for people in distress and suicide prevention.",
        url: "https://suicidepreventionlifeline.org/",
        category: "Crisis Support",
    },
];

/// Resources matching a search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub articles: Vec<&'static Article>,
    pub exercises: Vec<&'static Exercise>,
    pub links: Vec<&'static ExternalLink>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty() && self.exercises.is_empty() && self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.articles.len() + self.exercises.len() + self.links.len()
    }
}

fn matches(needle: &str, fields: [&str; 3]) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(needle))
}

/// Case-insensitive substring search over title, description and category.
/// An empty query matches everything.
pub fn search(query: &str) -> SearchResults {
    let needle = query.trim().to_lowercase();
    SearchResults {
        articles: ARTICLES
            .iter()
            .filter(|a| matches(&needle, [a.title, a.description, a.category]))
            .collect(),
        exercises: EXERCISES
            .iter()
            .filter(|e| matches(&needle, [e.title, e.description, e.category]))
            .collect(),
        links: EXTERNAL_LINKS
            .iter()
            .filter(|l| matches(&needle, [l.title, l.description, l.category]))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_everything() {
        let results = search("");
        assert_eq!(results.len(), 18);
        assert_eq!(search("   ").len(), 18);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let results = search("SLEEP");
        assert_eq!(results.articles.len(), 1);
        assert_eq!(results.exercises.len(), 1);
        assert!(results.links.is_empty());

        let crisis = search("crisis support");
        assert_eq!(crisis.links.len(), 2);
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(search("zebra").is_empty());
    }

    #[test]
    fn display_helpers() {
        assert_eq!(ARTICLES[1].read_time(), "10 min read");
        assert_eq!(
            ARTICLES[0].published_on(),
            NaiveDate::from_ymd_opt(2025, 4, 2)
        );
        assert_eq!(EXERCISES[5].duration(), "N/A");
        assert_eq!(EXERCISES[0].duration(), "5 minutes");
    }
}
