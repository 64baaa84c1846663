use crossterm::style::{Stylize, style};

use crate::resources::search;

/// Print the resource library, filtered by `query`.
pub fn run_resources(query: &str) {
    let results = search(query);
    if results.is_empty() {
        println!("No resources match \"{}\".", query.trim());
        return;
    }

    if !results.articles.is_empty() {
        println!("{}", style("Articles").bold().underlined());
        for article in &results.articles {
            println!(
                "  {} {}",
                style(article.title).bold(),
                style(format!("[{}]", article.category)).dim()
            );
            println!("    {}", article.description);
            let date = article
                .published_on()
                .map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_default();
            println!("    {} · {}", article.read_time(), date);
        }
        println!();
    }

    if !results.exercises.is_empty() {
        println!("{}", style("Exercises").bold().underlined());
        for exercise in &results.exercises {
            println!(
                "  {} {}",
                style(exercise.title).bold(),
                style(format!("[{}]", exercise.category)).dim()
            );
            println!("    {}", exercise.description);
            println!("    {} · {}", exercise.duration(), exercise.difficulty);
        }
        println!();
    }

    if !results.links.is_empty() {
        println!("{}", style("External Resources").bold().underlined());
        for link in &results.links {
            println!(
                "  {} {}",
                style(link.title).bold(),
                style(format!("[{}]", link.category)).dim()
            );
            println!("    {}", link.description);
            println!("    {}", style(link.url).blue().underlined());
        }
    }
}
