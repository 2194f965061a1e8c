use clap::Args;
use kopi::access;
use kopi_app::session::SessionController;
use zeroize::Zeroizing;

#[derive(Debug, Args)]
pub(crate) struct SetupArgs {
    /// Administrator display name
    #[arg(long)]
    name: String,

    /// Administrator email
    #[arg(long)]
    email: String,

    /// Administrator password
    #[arg(long)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Login email
    #[arg(long)]
    email: String,

    /// Login password
    #[arg(long)]
    password: String,
}

pub(crate) async fn setup(
    session: &mut SessionController,
    args: SetupArgs,
) -> Result<(), String> {
    super::authorize(session, access::SETUP_PATH, None)?;

    let password = Zeroizing::new(args.password);

    session
        .setup_admin(&args.name, &args.email, &password)
        .await
        .map_err(|error| format!("setup failed: {error}"))?;

    println!("administrator configured; log in with `kopi-app login`");

    Ok(())
}

pub(crate) async fn login(session: &mut SessionController, args: LoginArgs) -> Result<(), String> {
    let password = Zeroizing::new(args.password);

    let principal = session
        .login(&args.email, &password)
        .await
        .map_err(|error| format!("login failed: {error}"))?;

    println!("logged in as {} ({})", principal.name, principal.role);
    println!("landing destination: {}", access::first_available_route(principal));

    Ok(())
}

pub(crate) fn logout(session: &mut SessionController) -> Result<(), String> {
    session
        .logout()
        .map_err(|error| format!("logout failed: {error}"))?;

    println!("logged out");

    Ok(())
}

pub(crate) fn whoami(session: &SessionController) -> Result<(), String> {
    let Some(principal) = session.principal() else {
        return Err("not logged in".to_string());
    };

    println!("{} <{}>", principal.name, principal.email);
    println!("role: {}", principal.role);
    println!("destinations:");

    for route in access::visible_routes(principal) {
        println!("  {}  {}", route.path, route.label);
    }

    Ok(())
}
