use anyhow::Result;
use tracing::debug;

/// Name of the deployed Modal app that owns the generation function.
pub const APP_NAME: &str = "logo-generator";

/// Handle to the remote GPU-backed SVG generator.
///
/// The generation function lives in the deployed Modal app; this side only
/// holds the call contract: one prompt string in, SVG markup out. The call
/// can take a long time (the deployment allows up to 600 seconds) and can
/// fail, so callers defer their platform response before invoking it.
#[derive(Debug)]
pub struct LogoGenerator {
    server: Option<String>,
}

impl LogoGenerator {
    /// Resolves a handle to the deployed app. `server` overrides the default
    /// Modal endpoint when set (the `MODAL_SERVER` secret).
    pub fn connect(server: Option<String>) -> Result<Self> {
        Ok(Self { server })
    }

    /// Generate SVG markup for `prompt`.
    ///
    /// Stub for the remote function; the real body runs on Modal's GPU
    /// workers and is out of scope here.
    pub async fn generate_logo_svg(&self, prompt: &str) -> Result<String> {
        debug!(
            app = APP_NAME,
            server = self.server.as_deref(),
            "dispatching prompt: {prompt}"
        );
        Ok("<svg>...</svg>".to_string())
    }
}
