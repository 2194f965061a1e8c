use clap::{Args, Subcommand};
use kopi_app::{
    context::AppContext,
    session::SessionController,
    users::{NewUser, UserPatch},
    validate,
};
use tabled::{Table, Tabled};
use zeroize::Zeroizing;

#[derive(Debug, Args)]
pub(crate) struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
enum UsersSubcommand {
    /// List user accounts
    List,
    /// Create a user account
    Create(CreateArgs),
    /// Update name, email or role of a user account
    Update(UpdateArgs),
    /// Activate or deactivate a user account
    SetActive(SetActiveArgs),
    /// Delete a user account
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    /// Role to grant
    #[arg(long)]
    role_id: i64,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: i64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// Role to grant
    #[arg(long)]
    role_id: Option<i64>,
}

#[derive(Debug, Args)]
struct SetActiveArgs {
    id: i64,

    #[arg(long)]
    active: bool,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    id: i64,
}

#[derive(Tabled)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    active: bool,
}

pub(crate) async fn run(
    context: &AppContext,
    session: &mut SessionController,
    command: UsersCommand,
) -> Result<(), String> {
    match &command.command {
        // Creation is gated separately, matching the roles screen's grant.
        UsersSubcommand::Create(_) => {
            super::authorize(session, "/users", Some("users:create"))?;
        }
        _ => super::authorize(session, "/users", Some("users:read"))?,
    }

    match command.command {
        UsersSubcommand::List => {
            let users = context
                .users
                .list_users()
                .await
                .map_err(|error| super::api_failure(session, "failed to list users", error))?;

            let rows: Vec<UserRow> = users
                .iter()
                .map(|user| UserRow {
                    id: user.id,
                    name: user.name.clone(),
                    email: user.email.clone(),
                    role: user.role.name.clone(),
                    active: user.is_active,
                })
                .collect();

            println!("{}", Table::new(rows));
        }
        UsersSubcommand::Create(args) => {
            let password = Zeroizing::new(args.password);

            validate::new_user(&args.name, &args.email, &password, args.role_id)
                .map_err(|errors| format!("invalid user: {errors}"))?;

            let created = context
                .users
                .create_user(&NewUser {
                    name: args.name,
                    email: args.email,
                    password: password.to_string(),
                    role_id: args.role_id,
                })
                .await
                .map_err(|error| super::api_failure(session, "failed to create user", error))?;

            println!("created user {} ({})", created.id, created.email);
        }
        UsersSubcommand::Update(args) => {
            if args.name.is_none() && args.email.is_none() && args.role_id.is_none() {
                return Err("nothing to update; pass --name, --email or --role-id".to_string());
            }

            validate::update_user(args.name.as_deref(), args.email.as_deref(), args.role_id)
                .map_err(|errors| format!("invalid user: {errors}"))?;

            let updated = context
                .users
                .update_user(
                    args.id,
                    &UserPatch {
                        name: args.name,
                        email: args.email,
                        role_id: args.role_id,
                        ..UserPatch::default()
                    },
                )
                .await
                .map_err(|error| super::api_failure(session, "failed to update user", error))?;

            println!(
                "updated user {}: {} <{}> ({})",
                updated.id, updated.name, updated.email, updated.role.name
            );
        }
        UsersSubcommand::SetActive(args) => {
            let updated = context
                .users
                .update_user(
                    args.id,
                    &UserPatch {
                        is_active: Some(args.active),
                        ..UserPatch::default()
                    },
                )
                .await
                .map_err(|error| super::api_failure(session, "failed to update user", error))?;

            println!(
                "user {} is now {}",
                updated.id,
                if updated.is_active { "active" } else { "inactive" }
            );
        }
        UsersSubcommand::Delete(args) => {
            context
                .users
                .delete_user(args.id)
                .await
                .map_err(|error| super::api_failure(session, "failed to delete user", error))?;

            println!("deleted user {}", args.id);
        }
    }

    Ok(())
}
