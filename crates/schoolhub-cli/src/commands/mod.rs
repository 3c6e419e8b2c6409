//! Command handlers.

mod admin;
mod auth;
mod coursework;
mod dashboard;

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use schoolhub_core::auth::{FileStorage, SessionStorage};
use schoolhub_core::models::Role;
use schoolhub_core::navigation::{guard, RouteDecision};
use schoolhub_core::{ApiClient, Config, Route, SessionStore};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::navigator::TerminalNavigator;

/// Shared state for one CLI invocation
pub struct Context {
    pub config: Config,
    pub session: SessionStore,
    pub api: ApiClient,
    pub navigator: Arc<TerminalNavigator>,
    pub json: bool,
}

impl Context {
    pub fn new(cli: &Cli, config: Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::in_dir(&data_dir));
        let session = SessionStore::open(storage);

        let navigator = Arc::new(TerminalNavigator::default());
        let api = ApiClient::from_config(
            &config,
            cli.api_url.as_deref(),
            session.clone(),
            navigator.clone(),
        )?;
        debug!(base_url = %api.base_url(), data_dir = %data_dir.display(), "Context ready");

        Ok(Self {
            config,
            session,
            api,
            navigator,
            json: cli.json,
        })
    }

    /// Fail unless the current session may use an area restricted to `roles`.
    pub fn require_role(&self, roles: &[Role]) -> Result<()> {
        match guard(&self.session.snapshot(), roles) {
            RouteDecision::Allow => Ok(()),
            RouteDecision::Redirect(Route::Login) => {
                bail!("Not logged in. Run `schoolhub login` first.")
            }
            RouteDecision::Redirect(_) => {
                let allowed: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
                bail!(
                    "This command is only available to: {}",
                    allowed.join(", ")
                )
            }
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let mut ctx = Context::new(&cli, config)?;

    let result = match cli.command {
        Commands::Login { email, remember } => auth::login(&mut ctx, email, remember).await,
        Commands::Logout { forget } => auth::logout(&ctx, forget),
        Commands::Whoami => auth::whoami(&ctx),
        Commands::Dashboard => dashboard::show(&ctx).await,
        Commands::Users(cmd) => admin::users(&ctx, cmd).await,
        Commands::Students(cmd) => admin::students(&ctx, cmd).await,
        Commands::Teachers(cmd) => admin::teachers(&ctx, cmd).await,
        Commands::Courses => coursework::courses(&ctx).await,
        Commands::Semesters => coursework::semesters(&ctx).await,
        Commands::Assignments(cmd) => coursework::assignments(&ctx, cmd).await,
        Commands::Materials => coursework::materials(&ctx).await,
    };

    if result.is_err() && ctx.navigator.last_route() == Some(Route::Login) {
        return result.context("Signed out: the stored session is no longer valid");
    }
    result
}
