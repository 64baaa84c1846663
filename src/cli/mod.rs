//! Terminal front end.
//!
//! Each subcommand maps onto one of the application's views. Results are
//! shared between invocations through the file-backed session store.

mod assess;
mod chat;
mod resources;
mod results;

pub use assess::run_assess;
pub use chat::run_chat;
pub use resources::run_resources;
pub use results::run_results;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use crossterm::style::{Stylize, style};

use crate::app::{AppContext, Notice, NoticeVariant, View};
use crate::assessment::MaxPolicy;
use crate::config::Config;
use crate::llm::{ExchangeClient, create_provider};
use crate::settings::Theme;
use crate::store::FileSessionStore;

#[derive(Parser, Debug)]
#[command(
    name = "mindbloom",
    version,
    about = "Psychological self-assessment and wellness chat in your terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Take the self-assessment questionnaire
    Assess {
        /// Score each answer against its own question's maximum
        #[arg(long)]
        per_question_max: bool,
    },

    /// Show this session's assessment results
    Results {
        /// Skip the generated narrative analysis
        #[arg(long)]
        no_analysis: bool,

        /// Print the analysis as an HTML fragment
        #[arg(long)]
        html: bool,
    },

    /// Chat with the wellness assistant
    Chat,

    /// Browse articles, exercises and external resources
    Resources {
        /// Only show resources matching this text
        query: Option<String>,
    },

    /// Show or set the colour theme
    Theme {
        /// "light" or "dark"
        theme: Option<Theme>,

        /// Switch between light and dark
        #[arg(long, conflicts_with = "theme")]
        toggle: bool,
    },

    /// Open a view by its path (e.g. "/results")
    Open {
        path: String,
    },

    /// Forget this session's results
    EndSession,
}

/// Everything a command needs, built once per run.
pub struct Runtime {
    pub ctx: AppContext,
    pub store: FileSessionStore,
    pub client: Arc<ExchangeClient>,
}

impl Runtime {
    /// Build from the environment.
    pub fn load() -> crate::Result<Self> {
        let config = Config::from_env()?;
        Self::from_config(&config, AppContext::load())
    }

    /// Build from `config`, dropping session entries older than its ttl.
    pub fn from_config(config: &Config, ctx: AppContext) -> crate::Result<Self> {
        let provider = create_provider(&config.llm)?;
        let store = FileSessionStore::new(config.session.dir.clone());
        let expired = store.expire_older_than(config.session.ttl)?;
        if expired > 0 {
            tracing::info!(expired, "Cleared expired session data");
        }
        Ok(Self {
            ctx,
            store,
            client: Arc::new(ExchangeClient::new(provider)),
        })
    }
}

/// Run the parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut rt = Runtime::load()?;

    match cli.command {
        None => open(&mut rt, View::Home).await,
        Some(Command::Assess { per_question_max }) => {
            let policy = if per_question_max {
                MaxPolicy::AnsweredQuestion
            } else {
                MaxPolicy::default()
            };
            run_assess(&mut rt.ctx, &rt.store, policy).await
        }
        Some(Command::Results { no_analysis, html }) => {
            run_results(&mut rt.ctx, &rt.store, &rt.client, !no_analysis, html).await
        }
        Some(Command::Chat) => open(&mut rt, View::Chat).await,
        Some(Command::Resources { query }) => {
            rt.ctx.navigate(View::Resources);
            run_resources(query.as_deref().unwrap_or(""));
            Ok(())
        }
        Some(Command::Theme { theme, toggle }) => {
            if toggle {
                rt.ctx.toggle_theme()?;
            } else if let Some(theme) = theme {
                rt.ctx.set_theme(theme)?;
            }
            println!("Theme: {}", rt.ctx.theme());
            Ok(())
        }
        Some(Command::Open { path }) => open(&mut rt, View::from_path(&path)).await,
        Some(Command::EndSession) => {
            rt.ctx.end_session(&rt.store)?;
            println!("Session cleared.");
            Ok(())
        }
    }
}

async fn open(rt: &mut Runtime, view: View) -> anyhow::Result<()> {
    match view {
        View::Home => {
            print_home(rt.ctx.theme());
            Ok(())
        }
        View::Assessment => run_assess(&mut rt.ctx, &rt.store, MaxPolicy::default()).await,
        View::Results => run_results(&mut rt.ctx, &rt.store, &rt.client, true, false).await,
        View::Chat => run_chat(&mut rt.ctx, rt.client.clone()).await,
        View::Resources => {
            rt.ctx.navigate(View::Resources);
            run_resources("");
            Ok(())
        }
        View::NotFound => {
            rt.ctx.navigate(View::NotFound);
            println!("{}", style("404").bold());
            println!("Oops! Page not found. Try `mindbloom --help`.");
            Ok(())
        }
    }
}

fn print_home(theme: Theme) {
    let title = style("MindBloom").bold();
    let title = match theme {
        Theme::Light => title.magenta(),
        Theme::Dark => title.cyan(),
    };
    println!("{title}");
    println!("Understand your mind, nurture your wellbeing.\n");
    println!("  mindbloom assess      take the self-assessment");
    println!("  mindbloom results     see your scores and personalised advice");
    println!("  mindbloom chat        talk with the wellness assistant");
    println!("  mindbloom resources   browse articles and exercises");
}

/// Print a notice to stderr.
pub(crate) fn print_notice(notice: &Notice) {
    let title = match notice.variant {
        NoticeVariant::Destructive => style(notice.title.as_str()).bold().red(),
        NoticeVariant::Default => style(notice.title.as_str()).bold(),
    };
    eprintln!("{title}: {}", notice.description);
}

/// Show and dismiss the current notice, if any.
pub(crate) fn flush_notices(ctx: &mut AppContext) {
    if let Some(notice) = ctx.notices.dismiss() {
        print_notice(&notice);
    }
}
