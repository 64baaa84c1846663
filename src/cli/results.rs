use crossterm::style::{Color, Stylize, style};

use crate::app::{AppContext, Notice, ResultsEntry};
use crate::assessment::recommendations::{self, DISCLAIMER, PROFESSIONAL_HELP_NOTE, PROFESSIONAL_HELP_TITLE};
use crate::assessment::{ResultsSnapshot, StyleHint};
use crate::cli::flush_notices;
use crate::error::LlmError;
use crate::format::{Variant, format};
use crate::llm::{ExchangeClient, ExchangeOutcome};
use crate::render;
use crate::store::SessionStore;

const BAR_WIDTH: u32 = 30;

fn color(hint: StyleHint) -> Color {
    match hint {
        StyleHint::Green => Color::Green,
        StyleHint::Blue => Color::Blue,
        StyleHint::Yellow => Color::Yellow,
        StyleHint::Orange => Color::DarkYellow,
        StyleHint::Red => Color::Red,
    }
}

fn bar(score: u32) -> String {
    let filled = (score.min(100) * BAR_WIDTH / 100) as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH as usize - filled)
    )
}

fn print_scores(snapshot: &ResultsSnapshot) {
    println!("{}", style("Your Assessment Results").bold().magenta());
    println!(
        "{}",
        style(format!(
            "Completed {}",
            snapshot.timestamp.format("%Y-%m-%d %H:%M UTC")
        ))
        .dim()
    );
    println!("Remember, this is not a clinical diagnosis.\n");

    for row in snapshot.rows() {
        let tint = color(row.classification.style);
        println!(
            "  {:<11} {} {:>3}%  {}",
            row.category.display_name(),
            style(bar(row.score)).with(tint),
            row.score,
            style(row.classification.level.label()).with(tint).bold()
        );
    }
    println!();
}

fn print_recommendations() {
    println!("{}", style("Recommendations").bold().underlined());
    for rec in recommendations::all() {
        println!("{}", style(rec.category.display_name()).bold().cyan());
        println!("  {}", rec.summary);
        for strategy in rec.strategies {
            println!("  • {}: {}", style(strategy.title).bold(), strategy.body);
        }
    }
    println!();
    println!("{}", style(PROFESSIONAL_HELP_TITLE).bold().yellow());
    println!("  {PROFESSIONAL_HELP_NOTE}");
    println!();
}

/// Request the narrative analysis. A fallback reply raises
/// [`Notice::analysis_failed`] on the context.
pub(crate) async fn request_analysis(
    ctx: &mut AppContext,
    client: &ExchangeClient,
    snapshot: &ResultsSnapshot,
) -> Result<ExchangeOutcome, LlmError> {
    let outcome = client.analyze_results(snapshot).await?;
    ctx.notices.report_fallback(&outcome, Notice::analysis_failed);
    Ok(outcome)
}

/// Show the stored results; redirects to the assessment when there are none.
pub async fn run_results(
    ctx: &mut AppContext,
    store: &dyn SessionStore,
    client: &ExchangeClient,
    with_analysis: bool,
    html: bool,
) -> anyhow::Result<()> {
    let snapshot = match ctx.enter_results(store)? {
        ResultsEntry::Show(snapshot) => snapshot,
        ResultsEntry::Redirect(_) => {
            println!("No assessment results found for this session.");
            println!("Run `mindbloom assess` to take the assessment first.");
            return Ok(());
        }
    };

    if !html {
        print_scores(&snapshot);
        print_recommendations();
    }

    if with_analysis {
        if !html {
            println!("{}", style("AI Analysis").bold().underlined());
            eprintln!("{}", style("Generating your personalized analysis...").dim());
        }
        let outcome = request_analysis(ctx, client, &snapshot).await?;
        let blocks = format(Some(outcome.text()), Variant::Analysis);
        if html {
            print!("{}", render::html(&blocks));
        } else {
            print!("{}", render::terminal(&blocks));
            println!();
        }
        flush_notices(ctx);
    }

    if !html {
        println!("{}", style(DISCLAIMER).dim().italic());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::app::NoticeVariant;
    use crate::assessment::{AnswerLedger, Catalog, score};
    use crate::llm::{ANALYSIS_FALLBACK, ChatMessage, GenerationParams, GenerationProvider};

    struct FixedProvider {
        reply: fn() -> Result<String, LlmError>,
    }

    #[async_trait]
    impl GenerationProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn model_name(&self) -> &str {
            "fixed-model"
        }

        async fn generate(
            &self,
            _messages: &[ChatMessage],
            _params: &GenerationParams,
        ) -> Result<String, LlmError> {
            (self.reply)()
        }
    }

    fn client(reply: fn() -> Result<String, LlmError>) -> ExchangeClient {
        ExchangeClient::new(Arc::new(FixedProvider { reply }))
    }

    fn context() -> (tempfile::TempDir, AppContext) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::with_settings_path(dir.path().join("settings.json"));
        (dir, ctx)
    }

    #[tokio::test]
    async fn failed_analysis_raises_destructive_notice() {
        let (_dir, mut ctx) = context();
        let client = client(|| {
            Err(LlmError::InvalidResponse {
                provider: "fixed".to_string(),
                reason: "Invalid response format".to_string(),
            })
        });
        let snapshot = score(&Catalog::builtin(), &AnswerLedger::new());

        let outcome = request_analysis(&mut ctx, &client, &snapshot).await.unwrap();
        assert_eq!(outcome.text(), ANALYSIS_FALLBACK);
        let notice = ctx.notices.current().unwrap();
        assert_eq!(notice.variant, NoticeVariant::Destructive);
        assert_eq!(notice.title, "Analysis unavailable");
    }

    #[tokio::test]
    async fn successful_analysis_raises_nothing() {
        let (_dir, mut ctx) = context();
        let client = client(|| Ok("# Your Analysis".to_string()));
        let snapshot = score(&Catalog::builtin(), &AnswerLedger::new());

        let outcome = request_analysis(&mut ctx, &client, &snapshot).await.unwrap();
        assert!(!outcome.is_fallback());
        assert!(ctx.notices.current().is_none());
    }

    #[test]
    fn bar_is_proportional_and_fixed_width() {
        assert_eq!(bar(0), "░".repeat(30));
        assert_eq!(bar(100), "█".repeat(30));
        assert_eq!(bar(50).chars().filter(|c| *c == '█').count(), 15);
        assert_eq!(bar(250).chars().count(), 30);
    }
}
