//! Application context: theme preference, notices and navigation.
//!
//! One context is created per run and passed to whatever needs it.

use std::path::PathBuf;

use crate::assessment::ResultsSnapshot;
use crate::error::StoreError;
use crate::llm::ExchangeOutcome;
use crate::settings::{Settings, Theme};
use crate::store::{self, SessionStore};

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Assessment,
    Results,
    Chat,
    Resources,
    NotFound,
}

impl View {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/assessment" => Self::Assessment,
            "/results" => Self::Results,
            "/chat" => Self::Chat,
            "/resources" => Self::Resources,
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Assessment => "/assessment",
            Self::Results => "/results",
            Self::Chat => "/chat",
            Self::Resources => "/resources",
            Self::NotFound => "/404",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.variant = NoticeVariant::Destructive;
        self
    }

    /// Shown when trying to advance past an unanswered question.
    pub fn unanswered() -> Self {
        Self::new(
            "Please select an answer",
            "You need to select an option before proceeding.",
        )
        .destructive()
    }

    /// Shown when a chat reply had to fall back.
    pub fn exchange_failed() -> Self {
        Self::new("Error", "Failed to get a response. Please try again.").destructive()
    }

    /// Shown when the results analysis had to fall back.
    pub fn analysis_failed() -> Self {
        Self::new(
            "Analysis unavailable",
            "Failed to generate your personalized analysis. Please try again later.",
        )
        .destructive()
    }
}

/// Holds at most one visible notice; a new notice replaces the old one.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    current: Option<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, "notice raised");
        self.current = Some(notice);
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Raise `notice` if `outcome` is a fallback. Returns whether it did.
    pub fn report_fallback(&mut self, outcome: &ExchangeOutcome, notice: fn() -> Notice) -> bool {
        if !outcome.is_fallback() {
            return false;
        }
        self.push(notice());
        true
    }

    /// Remove and return the visible notice.
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.current.take()
    }
}

/// What the results view should do on entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsEntry {
    Show(ResultsSnapshot),
    /// No assessment this session: send the user to take one.
    Redirect(View),
}

pub struct AppContext {
    settings: Settings,
    settings_path: PathBuf,
    view: View,
    pub notices: NoticeQueue,
}

impl AppContext {
    /// Context backed by the default settings file.
    pub fn load() -> Self {
        Self::with_settings_path(Settings::default_path())
    }

    pub fn with_settings_path(path: impl Into<PathBuf>) -> Self {
        let settings_path = path.into();
        let settings = Settings::load_from(&settings_path);
        Self {
            settings,
            settings_path,
            view: View::Home,
            notices: NoticeQueue::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    /// Change the theme and persist it.
    pub fn set_theme(&mut self, theme: Theme) -> std::io::Result<()> {
        self.settings.theme = theme;
        self.settings.save_to(&self.settings_path)?;
        tracing::info!("Theme set to {}", theme);
        Ok(())
    }

    /// Switch between light and dark, persisting the result.
    pub fn toggle_theme(&mut self) -> std::io::Result<Theme> {
        let theme = self.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn navigate(&mut self, view: View) {
        tracing::debug!(from = self.view.path(), to = view.path(), "navigate");
        self.view = view;
    }

    /// Store a freshly scored snapshot and move to the results view.
    pub fn submit_assessment(
        &mut self,
        store: &dyn SessionStore,
        snapshot: &ResultsSnapshot,
    ) -> Result<(), StoreError> {
        store::save_results(store, snapshot)?;
        self.navigate(View::Results);
        Ok(())
    }

    /// Load the session's snapshot, redirecting to the assessment when
    /// there is none.
    pub fn enter_results(&mut self, store: &dyn SessionStore) -> Result<ResultsEntry, StoreError> {
        match store::load_results(store)? {
            Some(snapshot) => {
                self.navigate(View::Results);
                Ok(ResultsEntry::Show(snapshot))
            }
            None => {
                tracing::info!("No results in this session, redirecting to the assessment");
                self.navigate(View::Assessment);
                Ok(ResultsEntry::Redirect(View::Assessment))
            }
        }
    }

    /// Forget everything stored for this session.
    pub fn end_session(&mut self, store: &dyn SessionStore) -> Result<(), StoreError> {
        store.clear()?;
        self.navigate(View::Home);
        Ok(())
    }
}
