mod commands;
mod modal;

use anyhow::{Context as _, Error};
use modal::LogoGenerator;
use poise::serenity_prelude as serenity;
use shuttle_runtime::{SecretStore, Secrets};
use shuttle_serenity::ShuttleSerenity;
use tracing::{info, warn};

/// Application context built once at startup and handed to every command
/// invocation through poise's user data.
pub struct BotState {
    /// Handle to the deployed Modal generator. `None` when the handle could
    /// not be resolved at startup; `/logo` then refuses requests privately.
    pub generator: Option<LogoGenerator>,
}

type Context<'a> = poise::Context<'a, BotState, Error>;

/**
* Runtime for the logo bot. Runs on poise, a runtime framework for creating discord bots. Deploys
* using shuttle.
*/
#[shuttle_runtime::main]
async fn poise(#[Secrets] secret_store: SecretStore) -> ShuttleSerenity {
    // the original deployment stored the token under a misspelled key, so
    // honor that key first and keep existing secret stores working
    let discord_token = match secret_store.get("DISCORD_BOT_TOKE") {
        Some(token) => {
            warn!("token read from misspelled secret 'DISCORD_BOT_TOKE'; rename it to 'DISCORD_BOT_TOKEN'");
            token
        }
        None => secret_store
            .get("DISCORD_BOT_TOKEN")
            .context("neither 'DISCORD_BOT_TOKE' nor 'DISCORD_BOT_TOKEN' was found")?,
    };

    // optional identifiers, surfaced in the logs only
    if let Some(app_id) = secret_store.get("DISCORD_APP_ID") {
        info!("application id: {app_id}");
    }
    if let Some(install_link) = secret_store.get("DISCORD_INSTALL_LINK") {
        info!("install link: {install_link}");
    }

    // dial up the Modal generator; the bot still starts without it so the
    // command can tell users what is wrong instead of never appearing
    let generator = match LogoGenerator::connect(secret_store.get("MODAL_SERVER")) {
        Ok(generator) => Some(generator),
        Err(err) => {
            warn!("could not connect Modal app, /logo will refuse requests: {err}");
            None
        }
    };

    // initialize poise framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::logo()],
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                // register commands
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                // register slash commands
                let create_commands =
                    poise::builtins::create_application_commands(&framework.options().commands);
                serenity::Command::set_global_commands(ctx, create_commands).await?;

                info!(
                    "logged in as {}, synced {} command(s)",
                    ready.user.name,
                    framework.options().commands.len()
                );

                Ok(BotState { generator })
            })
        })
        .build();

    // build client
    let client =
        serenity::ClientBuilder::new(discord_token, serenity::GatewayIntents::non_privileged())
            .framework(framework)
            .await
            .map_err(shuttle_runtime::CustomError::new)?;

    Ok(client.into())
}
