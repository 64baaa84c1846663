use std::sync::Arc;

use crossterm::style::{Stylize, style};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::app::{AppContext, View};
use crate::cli::flush_notices;
use crate::conversation::{ChatSession, SUGGESTED_PROMPTS, SendOutcome};
use crate::format::format_chat;
use crate::llm::ExchangeClient;
use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatInput {
    Quit,
    Reset,
    Prompts,
    /// Send the n-th suggested prompt (1-based).
    Suggested(usize),
    Message(String),
}

fn parse_input(line: &str) -> ChatInput {
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => ChatInput::Quit,
        "/reset" => ChatInput::Reset,
        "/prompts" => ChatInput::Prompts,
        _ => match trimmed.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
            Some(n) => ChatInput::Suggested(n),
            None => ChatInput::Message(trimmed.to_string()),
        },
    }
}

fn print_assistant(text: &str) {
    println!("{}", style("MindBloom AI").bold().magenta());
    print!("{}", render::terminal(&format_chat(text)));
    println!();
}

fn print_prompts() {
    println!("{}", style("Suggested questions").bold());
    for (i, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
        println!("  /{} {}", i + 1, prompt);
    }
    println!();
}

/// Interactive chat loop.
pub async fn run_chat(ctx: &mut AppContext, client: Arc<ExchangeClient>) -> anyhow::Result<()> {
    ctx.navigate(View::Chat);
    let mut session = ChatSession::new(client);
    let mut rl = DefaultEditor::new()?;

    if let Some(greeting) = session.conversation().last() {
        print_assistant(&greeting.text);
    }
    print_prompts();
    println!(
        "{}",
        style("This assistant is not a substitute for professional care. In a crisis, contact local emergency services.").dim()
    );
    println!("{}", style("Commands: /prompts, /reset, /quit").dim());

    loop {
        let line = match rl.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let message = match parse_input(&line) {
            ChatInput::Quit => return Ok(()),
            ChatInput::Reset => {
                session.reset();
                if let Some(greeting) = session.conversation().last() {
                    print_assistant(&greeting.text);
                }
                continue;
            }
            ChatInput::Prompts => {
                print_prompts();
                continue;
            }
            ChatInput::Suggested(n) => match n.checked_sub(1).and_then(|i| SUGGESTED_PROMPTS.get(i)) {
                Some(prompt) => {
                    println!("you> {prompt}");
                    prompt.to_string()
                }
                None => {
                    println!("There is no suggestion {n}.");
                    continue;
                }
            },
            ChatInput::Message(text) => text,
        };
        let _ = rl.add_history_entry(message.as_str());

        match session.send(&message, &mut ctx.notices).await {
            SendOutcome::Ignored => {}
            SendOutcome::Busy => println!("Still waiting for the previous reply."),
            SendOutcome::Replied(outcome) => {
                print_assistant(outcome.text());
                flush_notices(ctx);
            }
        }
    }
}
