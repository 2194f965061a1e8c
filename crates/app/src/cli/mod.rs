use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kopi::session::RouteDecision;
use kopi_app::{
    api::ApiError,
    context::{AppConfig, AppContext},
    session::SessionController,
};

mod auth;
mod products;
mod reports;
mod roles;
mod sell;
mod users;

#[derive(Debug, Parser)]
#[command(name = "kopi-app", about = "Kopi register CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// Backend API base URL
    #[arg(long, env = "KOPI_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Where the login session is stored
    #[arg(long, env = "KOPI_SESSION_FILE", default_value = ".kopi-session.json")]
    session_file: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// One-time administrator setup
    Setup(auth::SetupArgs),
    /// Log in and store the session
    Login(auth::LoginArgs),
    /// Log out and remove the stored session
    Logout,
    /// Show the logged-in user and their destinations
    Whoami,
    /// Manage the product catalog
    Products(products::ProductsCommand),
    /// Ring up a sale
    Sell(sell::SellArgs),
    /// Sales reports
    Reports(reports::ReportsCommand),
    /// Manage user accounts
    Users(users::UsersCommand),
    /// Manage roles and permissions
    Roles(roles::RolesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::new(&AppConfig {
            api_url: self.config.api_url,
            session_file: self.config.session_file,
        });

        let mut session = context.session();
        session.start().await;

        match self.command {
            Commands::Setup(args) => auth::setup(&mut session, args).await,
            Commands::Login(args) => auth::login(&mut session, args).await,
            Commands::Logout => auth::logout(&mut session),
            Commands::Whoami => auth::whoami(&session),
            Commands::Products(command) => {
                products::run(&context, &mut session, command).await
            }
            Commands::Sell(args) => sell::run(&context, &mut session, args).await,
            Commands::Reports(command) => reports::run(&context, &mut session, command).await,
            Commands::Users(command) => users::run(&context, &mut session, command).await,
            Commands::Roles(command) => roles::run(&context, &mut session, command).await,
        }
    }
}

/// Resolve a navigation to `path` before running its command, mirroring the
/// route guard: setup redirects, login redirects, and permission denials all
/// become actionable messages.
fn authorize(
    session: &SessionController,
    path: &str,
    required: Option<&str>,
) -> Result<(), String> {
    match session.machine().route(path, required) {
        RouteDecision::Allowed => Ok(()),
        RouteDecision::Redirect(kopi::access::SETUP_PATH) => {
            Err("no administrator configured yet; run `kopi-app setup` first".to_string())
        }
        RouteDecision::Redirect(kopi::access::LOGIN_PATH) => {
            Err("not logged in; run `kopi-app login` first".to_string())
        }
        RouteDecision::Redirect(path) => Err(format!(
            "you do not have permission for this command (try `{path}`)"
        )),
        RouteDecision::Pending => Err("session is still initializing".to_string()),
    }
}

/// Turn a failed API call into a terminal message. A 401 drops the stored
/// session first, so the next run lands on the login prompt instead of
/// restoring the revoked credential.
fn api_failure(session: &mut SessionController, action: &str, error: ApiError) -> String {
    session.observe_api_error(&error);

    if error.is_auth_failure() {
        return format!("{action}: {error}; run `kopi-app login` again");
    }

    format!("{action}: {error}")
}
