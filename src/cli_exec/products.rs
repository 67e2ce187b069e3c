use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use siteadmin::auth::Route;
use siteadmin::model::ProductCard;
use siteadmin::screens::{DeleteOutcome, ProductScreen};

use crate::ProductCommands;
use crate::cli_commands::parse_assignment;
use crate::cli_runtime::{Ctx, print_json};

pub(super) fn handle_product_command(ctx: &Ctx, command: ProductCommands) -> Result<()> {
    let authed = ctx.require(Route::Products)?;
    let mut screen = ProductScreen::new(authed.store);
    if !screen.load() {
        anyhow::bail!("could not load product cards");
    }

    match command {
        ProductCommands::List { json } => {
            if json {
                return print_json(screen.products(), "product cards");
            }
            if screen.products().is_empty() {
                println!("No products yet.");
            }
            for card in screen.products() {
                println!(
                    "{:>3}  {:<8} {}  ({})",
                    card.sort_order,
                    card.status.as_str(),
                    card.title,
                    card.id.as_deref().unwrap_or("-")
                );
            }
        }
        ProductCommands::Add { set } => {
            screen.begin_add();
            apply(&mut screen, &set)?;
            screen.save()?;
            let created = screen
                .products()
                .last()
                .context("created card missing from the list")?;
            println!(
                "Created {} ({})",
                created.title,
                created.id.as_deref().unwrap_or("-")
            );
        }
        ProductCommands::Edit { id, set } => {
            screen.begin_edit(&id)?;
            apply(&mut screen, &set)?;
            screen.save()?;
            println!("Saved {}", id);
        }
        ProductCommands::Delete { id, yes } => {
            let outcome = screen.delete(&id, |card| yes || confirm_delete(&id, card))?;
            match outcome {
                DeleteOutcome::Deleted => println!("Deleted {}", id),
                DeleteOutcome::Declined => println!("Cancelled"),
            }
        }
    }
    Ok(())
}

fn apply(screen: &mut ProductScreen, assignments: &[String]) -> Result<()> {
    for raw in assignments {
        let (field, value) = parse_assignment(raw)?;
        screen.update_field(&field, &value)?;
    }
    Ok(())
}

fn confirm_delete(id: &str, card: Option<&ProductCard>) -> bool {
    let name = card.map(|c| c.title.as_str()).unwrap_or(id);
    print!("Delete product \"{}\"? [y/N] ", name);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}
