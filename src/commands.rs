use std::future::Future;

use anyhow::{Error, Result};
use chrono::{NaiveDateTime, Utc};
use poise::serenity_prelude as serenity;
use poise::CreateReply;

use crate::Context;

const MODAL_DOWN_NOTICE: &str = "❌ Modal app not connected. Please check the bot logs.";

/// The fixed style presets offered on `/logo`. Discord enforces the choice
/// set, so no validation happens on our side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum LogoStyle {
    #[name = "Cyberpunk"]
    Cyberpunk,
    #[name = "Minimalist"]
    Minimalist,
    #[name = "Retro"]
    Retro,
    #[name = "Gaming"]
    Gaming,
    #[name = "Tech Startup"]
    TechStartup,
}

impl LogoStyle {
    /// The phrase spliced into the prompt sent to the generator.
    fn descriptor(self) -> &'static str {
        match self {
            LogoStyle::Cyberpunk => "cyberpunk neon with circuit patterns",
            LogoStyle::Minimalist => "minimalist geometric clean",
            LogoStyle::Retro => "retro 80s synthwave",
            LogoStyle::Gaming => "gaming esports bold",
            LogoStyle::TechStartup => "modern tech startup professional",
        }
    }
}

/// Outcome of one `/logo` request, decided before any Discord reply is built.
#[derive(Debug)]
pub enum LogoReply {
    BackendUnavailable,
    Generated {
        full_prompt: String,
        filename: String,
        svg: String,
    },
    Failed {
        error: String,
    },
}

fn compose_prompt(prompt: &str, style: Option<LogoStyle>) -> String {
    match style {
        Some(style) => format!("{prompt} in {} style", style.descriptor()),
        None => prompt.to_string(),
    }
}

fn timestamped_filename(now: NaiveDateTime) -> String {
    format!("logo_{}.svg", now.format("%Y%m%d_%H%M%S"))
}

/// Composes the full prompt and runs the generation backend, if there is one.
///
/// Errors from the backend are captured as their display text rather than
/// propagated, since the command reports them to the invoker instead of
/// failing the interaction.
async fn handle_logo_request<F, Fut>(
    backend: Option<F>,
    prompt: &str,
    style: Option<LogoStyle>,
    now: NaiveDateTime,
) -> LogoReply
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let full_prompt = compose_prompt(prompt, style);

    let Some(generate) = backend else {
        return LogoReply::BackendUnavailable;
    };

    match generate(full_prompt.clone()).await {
        Ok(svg) => LogoReply::Generated {
            filename: timestamped_filename(now),
            full_prompt,
            svg,
        },
        Err(err) => LogoReply::Failed {
            error: err.to_string(),
        },
    }
}

/// Generate an AI logo from your prompt
#[poise::command(slash_command)]
pub async fn logo(
    ctx: Context<'_>,
    #[description = "Describe the logo you want (e.g., 'cyberpunk neon logo with circuits')"]
    prompt: String,
    #[description = "Optional style preset"] style: Option<LogoStyle>,
) -> Result<(), Error> {
    // checked before deferring so the notice stays the first (ephemeral) response
    let Some(generator) = ctx.data().generator.as_ref() else {
        ctx.send(
            CreateReply::default()
                .content(MODAL_DOWN_NOTICE)
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    ctx.defer().await?; // the GPU call outlives the interaction deadline

    let backend = |full_prompt: String| async move {
        generator.generate_logo_svg(&full_prompt).await
    };

    match handle_logo_request(Some(backend), &prompt, style, Utc::now().naive_utc()).await {
        LogoReply::Generated {
            full_prompt,
            filename,
            svg,
        } => {
            let file = serenity::CreateAttachment::bytes(svg.into_bytes(), filename);
            let embed = serenity::CreateEmbed::new()
                .title("🎨 Logo Generated!")
                .description(format!("**Prompt:** {full_prompt}"))
                .colour(serenity::Colour::BLUE)
                .footer(serenity::CreateEmbedFooter::new("Powered by Modal + Qwen3-8B"));
            ctx.send(CreateReply::default().embed(embed).attachment(file))
                .await?;
        }
        LogoReply::Failed { error } => {
            let embed = serenity::CreateEmbed::new()
                .title("❌ Generation Failed")
                .description(format!("```{error}```"))
                .colour(serenity::Colour::RED);
            ctx.send(CreateReply::default().embed(embed).ephemeral(true))
                .await?;
        }
        LogoReply::BackendUnavailable => {
            ctx.send(
                CreateReply::default()
                    .content(MODAL_DOWN_NOTICE)
                    .ephemeral(true),
            )
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::future::{ready, Ready};

    use anyhow::anyhow;
    use chrono::NaiveDate;
    use futures::executor::block_on;

    use super::*;

    type NoBackend = fn(String) -> Ready<Result<String>>;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 29)
            .unwrap()
            .and_hms_opt(1, 2, 3)
            .unwrap()
    }

    #[test]
    fn prompt_without_style_is_passed_through() {
        assert_eq!(compose_prompt("a fox", None), "a fox");
    }

    #[test]
    fn prompt_with_style_appends_descriptor() {
        assert_eq!(
            compose_prompt("a fox", Some(LogoStyle::Retro)),
            "a fox in retro 80s synthwave style"
        );
    }

    #[test]
    fn every_style_has_its_preset_descriptor() {
        let expected = [
            (LogoStyle::Cyberpunk, "cyberpunk neon with circuit patterns"),
            (LogoStyle::Minimalist, "minimalist geometric clean"),
            (LogoStyle::Retro, "retro 80s synthwave"),
            (LogoStyle::Gaming, "gaming esports bold"),
            (LogoStyle::TechStartup, "modern tech startup professional"),
        ];
        for (style, descriptor) in expected {
            assert_eq!(style.descriptor(), descriptor);
        }
    }

    #[test]
    fn filename_carries_the_request_timestamp() {
        let filename = timestamped_filename(fixed_now());
        assert_eq!(filename, "logo_20260829_010203.svg");

        let digits: String = filename
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        assert_eq!(digits.len(), 14);
        assert!(filename.starts_with("logo_"));
        assert!(filename.ends_with(".svg"));
    }

    #[test]
    fn missing_backend_short_circuits() {
        let reply = block_on(handle_logo_request(
            None::<NoBackend>,
            "a fox",
            None,
            fixed_now(),
        ));
        assert!(matches!(reply, LogoReply::BackendUnavailable));
    }

    #[test]
    fn successful_generation_packages_the_svg() {
        let seen = RefCell::new(None);
        let backend = |full_prompt: String| {
            *seen.borrow_mut() = Some(full_prompt);
            ready(Ok("<svg>x</svg>".to_string()))
        };

        let reply = block_on(handle_logo_request(Some(backend), "a fox", None, fixed_now()));

        match reply {
            LogoReply::Generated {
                full_prompt,
                filename,
                svg,
            } => {
                assert_eq!(full_prompt, "a fox");
                assert_eq!(filename, "logo_20260829_010203.svg");
                assert_eq!(svg, "<svg>x</svg>");
            }
            other => panic!("expected Generated, got {other:?}"),
        }
        assert_eq!(seen.into_inner().as_deref(), Some("a fox"));
    }

    #[test]
    fn backend_receives_the_composed_prompt() {
        let seen = RefCell::new(None);
        let backend = |full_prompt: String| {
            *seen.borrow_mut() = Some(full_prompt);
            ready(Ok("<svg/>".to_string()))
        };

        let reply = block_on(handle_logo_request(
            Some(backend),
            "a fox",
            Some(LogoStyle::Retro),
            fixed_now(),
        ));

        assert!(matches!(reply, LogoReply::Generated { .. }));
        assert_eq!(
            seen.into_inner().as_deref(),
            Some("a fox in retro 80s synthwave style")
        );
    }

    #[test]
    fn backend_error_is_reported_as_text() {
        let backend = |_: String| ready(Err(anyhow!("gpu worker crashed")));

        let reply = block_on(handle_logo_request(Some(backend), "a fox", None, fixed_now()));

        match reply {
            LogoReply::Failed { error } => assert_eq!(error, "gpu worker crashed"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
