use anyhow::Result;

use siteadmin::auth::Route;
use siteadmin::errors::AdminError;
use siteadmin::screens::SettingsScreen;
use siteadmin::views;

use crate::SettingsCommands;
use crate::cli_commands::parse_assignment;
use crate::cli_runtime::{Ctx, print_json};

pub(super) fn handle_settings_command(ctx: &Ctx, command: SettingsCommands) -> Result<()> {
    let authed = ctx.require(Route::Settings)?;
    let mut screen = SettingsScreen::new(authed.store);
    if !screen.load() {
        anyhow::bail!("could not load site settings");
    }

    match command {
        SettingsCommands::List { json } => {
            if json {
                return print_json(screen.settings(), "site settings");
            }
            let summary = screen.summary();
            println!(
                "{} settings in {} categories",
                summary.total, summary.categories
            );
            for (category, members) in screen.grouped() {
                println!("{}", category);
                for setting in members {
                    println!(
                        "  {:<24} {:<8} {}",
                        setting.setting_key,
                        setting.setting_type.as_str(),
                        display_value(&setting.setting_key, &setting.setting_value)
                    );
                }
            }
        }
        SettingsCommands::Set { pairs } => {
            for raw in &pairs {
                let (key, value) = parse_assignment(raw)?;
                screen.set_value(&key, &value)?;
            }
            match screen.save_all() {
                Ok(_) => println!("{}", screen.message().unwrap_or("")),
                Err(AdminError::BatchSave { failed, applied }) => {
                    let failed: Vec<String> = failed
                        .into_iter()
                        .map(|(key, err)| format!("{} ({})", key, err))
                        .collect();
                    anyhow::bail!(
                        "{} failed: {}; applied remotely: {}",
                        screen.message().unwrap_or("error saving settings"),
                        failed.join(", "),
                        if applied.is_empty() {
                            "none".to_string()
                        } else {
                            applied.join(", ")
                        }
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
    Ok(())
}

fn display_value(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("({})", views::placeholder(key))
    } else {
        value.to_string()
    }
}
