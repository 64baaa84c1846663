use crossterm::style::{Stylize, style};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::app::{AppContext, Notice, View};
use crate::assessment::{Advance, AssessmentWizard, Catalog, MaxPolicy};
use crate::cli::flush_notices;
use crate::error::AssessmentError;
use crate::store::SessionStore;

/// Parsed answer-prompt input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    /// 1-based option number.
    Choose(usize),
    Next,
    Back,
    Quit,
    Invalid,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" | "n" | "next" => Input::Next,
        "b" | "back" => Input::Back,
        "q" | "quit" => Input::Quit,
        other => other.parse().map(Input::Choose).unwrap_or(Input::Invalid),
    }
}

fn print_question(wizard: &AssessmentWizard) {
    let question = wizard.current_question();
    println!();
    println!(
        "{} {}",
        style(format!(
            "Question {} of {}",
            wizard.current_index() + 1,
            wizard.total()
        ))
        .bold(),
        style(format!("({:.0}% complete)", wizard.progress_percent())).dim()
    );
    println!("{}", style(question.prompt.as_str()).bold());
    println!("{}", style(question.help.as_str()).italic().dim());
    let selected = wizard.selected();
    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(option.value) { "●" } else { "○" };
        println!("  {marker} {}. {}", i + 1, option.label);
    }
}

/// Run the questionnaire interactively and store the results.
pub async fn run_assess(
    ctx: &mut AppContext,
    store: &dyn SessionStore,
    policy: MaxPolicy,
) -> anyhow::Result<()> {
    ctx.navigate(View::Assessment);
    let mut wizard = AssessmentWizard::new(Catalog::builtin())?.with_policy(policy);
    let mut rl = DefaultEditor::new()?;

    println!("{}", style("Psychological Assessment").bold().magenta());
    println!("Answer honestly; there are no right or wrong answers.");

    loop {
        print_question(&wizard);
        let prompt = if wizard.is_last() {
            "number to answer, Enter to submit, b back, q quit> "
        } else {
            "number to answer, Enter for next, b back, q quit> "
        };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        match parse_input(&line) {
            Input::Quit => {
                println!("Assessment abandoned; nothing was saved.");
                return Ok(());
            }
            Input::Back => {
                if !wizard.previous() {
                    println!("Already at the first question.");
                }
                continue;
            }
            Input::Invalid => {
                println!("Type an option number, Enter, b or q.");
                continue;
            }
            Input::Choose(n) => {
                let value = n
                    .checked_sub(1)
                    .and_then(|i| wizard.current_question().options.get(i))
                    .map(|o| o.value);
                match value {
                    Some(value) => {
                        wizard.select(value)?;
                    }
                    None => {
                        println!("There is no option {n}.");
                        continue;
                    }
                }
            }
            Input::Next => {}
        }

        match wizard.next() {
            Ok(Advance::Moved { .. }) => {}
            Ok(Advance::Submitted(snapshot)) => {
                ctx.submit_assessment(store, &snapshot)?;
                println!();
                println!("{}", style("Assessment complete.").bold().green());
                println!("Run `mindbloom results` to see your scores.");
                return Ok(());
            }
            Err(AssessmentError::Unanswered(_)) => {
                ctx.notices.push(Notice::unanswered());
                flush_notices(ctx);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prompt_input() {
        assert_eq!(parse_input("2"), Input::Choose(2));
        assert_eq!(parse_input(" 1 "), Input::Choose(1));
        assert_eq!(parse_input(""), Input::Next);
        assert_eq!(parse_input("b"), Input::Back);
        assert_eq!(parse_input("quit"), Input::Quit);
        assert_eq!(parse_input("maybe"), Input::Invalid);
    }
}
