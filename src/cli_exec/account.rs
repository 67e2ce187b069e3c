use anyhow::{Context, Result};

use siteadmin::auth::AuthProvider;

use crate::cli_commands::CredentialArgs;
use crate::cli_runtime::{Ctx, print_json};

pub(super) fn handle_login_command(ctx: &Ctx, args: CredentialArgs, signup: bool) -> Result<()> {
    let mut session = ctx.session()?;
    let email = if signup {
        session.sign_up(&args.email, &args.password)?.email.clone()
    } else {
        session.sign_in(&args.email, &args.password)?.email.clone()
    };
    let grant = session.grant().context("sign-in returned no session")?;
    ctx.sessions.save(&ctx.config.base_url, grant)?;
    if signup {
        println!("Signed up as {}", email);
    } else {
        println!("Signed in as {}", email);
    }
    Ok(())
}

pub(super) fn handle_logout_command(ctx: &Ctx) -> Result<()> {
    let mut session = ctx.session()?;
    if let Err(err) = session.teardown() {
        tracing::warn!("remote sign-out failed: {}", err);
    }
    ctx.sessions.clear()?;
    println!("Signed out");
    Ok(())
}

pub(super) fn handle_whoami_command(ctx: &Ctx, json: bool) -> Result<()> {
    let session = ctx.resolved_session()?;
    let user = session
        .current_user()
        .context("not signed in (run `siteadmin login --email ... --password ...`)")?;
    if json {
        return print_json(user, "user");
    }
    println!("email: {}", user.email);
    println!("id: {}", user.id);
    println!("store: {}", ctx.config.base_url);
    Ok(())
}
