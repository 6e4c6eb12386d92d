/// The configuration parameters for the application.
///
/// These can either be passed on the command line, or pulled from environment variables.
/// The latter is preferred as environment variables are one of the recommended ways to
/// get configuration from Kubernetes Secrets in deployment.
///
/// For development convenience, these can also be read from a `.env` file in the working
/// directory where the application is started.
///
/// See `.env.sample` in the repository root for details.
#[derive(clap::Parser, Clone)]
pub struct Config {
    /// API key sent as `x-api-key` on every call to the group-management cloud API.
    #[arg(long, env = "ROBLOX_API_KEY", hide_env_values = true)]
    pub roblox_api_key: String,

    /// Shared secret game servers present in the `x-game-auth` header.
    #[arg(long, env = "GAME_SHARED_SECRET", hide_env_values = true)]
    pub game_shared_secret: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(
        long,
        env = "CLOUD_BASE_URL",
        default_value = "https://apis.roblox.com/cloud/v2"
    )]
    pub cloud_base_url: String,

    /// Upper bound on membership pages scanned for a single lookup.
    #[arg(long, env = "MAX_MEMBERSHIP_PAGES", default_value_t = 500)]
    pub max_membership_pages: u32,
}

impl Config {
    /// Rejects values clap accepts but the relay cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.roblox_api_key.trim().is_empty() {
            anyhow::bail!("ROBLOX_API_KEY must not be empty");
        }
        if self.game_shared_secret.trim().is_empty() {
            anyhow::bail!("GAME_SHARED_SECRET must not be empty");
        }
        if self.max_membership_pages == 0 {
            anyhow::bail!("MAX_MEMBERSHIP_PAGES must be at least 1");
        }
        Ok(())
    }
}
