use anyhow::Result;

use siteadmin::auth::Route;
use siteadmin::screens::ContentScreen;
use siteadmin::views;

use crate::ContentCommands;
use crate::cli_runtime::{Ctx, print_json};

pub(super) fn handle_content_command(ctx: &Ctx, command: ContentCommands) -> Result<()> {
    let authed = ctx.require(Route::Content)?;
    let mut screen = ContentScreen::new(authed.store);
    if !screen.load() {
        anyhow::bail!("could not load content sections");
    }

    match command {
        ContentCommands::List { search, json } => {
            screen.set_search(search.as_deref().unwrap_or(""));
            let rows = screen.rows();
            if json {
                let sections: Vec<_> = rows.iter().map(|r| r.section).collect();
                return print_json(&sections, "content sections");
            }
            if rows.is_empty() {
                println!("{}", screen.empty_hint());
                return Ok(());
            }
            for (category, members) in views::group_by(&rows, |r| r.category) {
                println!("{}", category);
                for row in members {
                    println!(
                        "  {:<24} {:<24} {}",
                        row.section.section_key,
                        row.display_name,
                        preview(&row.section.content)
                    );
                }
            }
        }
        ContentCommands::Edit {
            section_key,
            content,
        } => {
            screen.begin_edit(&section_key)?;
            screen.set_content(&content)?;
            screen.save()?;
            println!("Saved {}", section_key);
        }
    }
    Ok(())
}

fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or("");
    let mut out: String = line.chars().take(60).collect();
    if line.chars().count() > 60 || content.lines().nth(1).is_some() {
        out.push_str("...");
    }
    out
}
