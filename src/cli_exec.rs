use anyhow::Result;

use siteadmin::auth::{AuthProvider, Route};
use siteadmin::screens::{QUICK_ACTIONS, load_stats};

use crate::Commands;
use crate::cli_runtime::{Ctx, print_json};

mod account;
mod content;
mod products;
mod settings;

pub(crate) fn handle_command(ctx: &Ctx, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => account::handle_login_command(ctx, args, false),
        Commands::Signup(args) => account::handle_login_command(ctx, args, true),
        Commands::Logout => account::handle_logout_command(ctx),
        Commands::Whoami { json } => account::handle_whoami_command(ctx, json),
        Commands::Dashboard { json } => handle_dashboard_command(ctx, json),
        Commands::Content { command } => content::handle_content_command(ctx, command),
        Commands::Products { command } => products::handle_product_command(ctx, command),
        Commands::Settings { command } => settings::handle_settings_command(ctx, command),
    }
}

fn handle_dashboard_command(ctx: &Ctx, json: bool) -> Result<()> {
    let authed = ctx.require(Route::Dashboard)?;
    let stats = load_stats(authed.store.clone());
    let email = authed
        .session
        .current_user()
        .map(|u| u.email.clone())
        .unwrap_or_default();

    if json {
        let actions: Vec<serde_json::Value> = QUICK_ACTIONS
            .iter()
            .map(|a| {
                serde_json::json!({
                    "title": a.title,
                    "description": a.description,
                    "route": a.route.path(),
                })
            })
            .collect();
        return print_json(
            &serde_json::json!({
                "user": email,
                "stats": stats,
                "quick_actions": actions,
            }),
            "dashboard",
        );
    }

    println!("Welcome back, {}", email);
    println!("content sections: {}", stats.content_sections);
    println!("product cards: {}", stats.product_cards);
    println!(
        "last updated: {}",
        stats.last_updated.as_deref().unwrap_or("-")
    );
    println!();
    for action in QUICK_ACTIONS {
        println!(
            "{:<16} {:<10} {}",
            action.title,
            action.route.path(),
            action.description
        );
    }
    Ok(())
}
