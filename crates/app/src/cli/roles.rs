use clap::{Args, Subcommand};
use kopi_app::{
    context::AppContext,
    roles::{NewRole, RolePatch},
    session::SessionController,
};
use tabled::{Table, Tabled};

#[derive(Debug, Args)]
pub(crate) struct RolesCommand {
    #[command(subcommand)]
    command: RolesSubcommand,
}

#[derive(Debug, Subcommand)]
enum RolesSubcommand {
    /// List roles and their permissions
    List,
    /// List all grantable permissions
    Permissions,
    /// Create a role
    Create(CreateArgs),
    /// Replace a role's permission grants
    Grant(GrantArgs),
    /// Delete a role
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    /// Permission ids to grant, repeatable
    #[arg(long = "permission")]
    permissions: Vec<i64>,
}

#[derive(Debug, Args)]
struct GrantArgs {
    id: i64,

    /// Permission ids to grant, repeatable
    #[arg(long = "permission")]
    permissions: Vec<i64>,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    id: i64,
}

#[derive(Tabled)]
struct RoleRow {
    id: i64,
    name: String,
    permissions: String,
}

#[derive(Tabled)]
struct PermissionRow {
    id: i64,
    slug: String,
}

pub(crate) async fn run(
    context: &AppContext,
    session: &mut SessionController,
    command: RolesCommand,
) -> Result<(), String> {
    super::authorize(session, "/roles", Some("users:create"))?;

    match command.command {
        RolesSubcommand::List => {
            let roles = context
                .roles
                .list_roles()
                .await
                .map_err(|error| super::api_failure(session, "failed to list roles", error))?;

            let rows: Vec<RoleRow> = roles
                .iter()
                .map(|role| RoleRow {
                    id: role.id,
                    name: role.name.clone(),
                    permissions: role.slugs().join(", "),
                })
                .collect();

            println!("{}", Table::new(rows));
        }
        RolesSubcommand::Permissions => {
            let permissions = context
                .roles
                .list_permissions()
                .await
                .map_err(|error| super::api_failure(session, "failed to list permissions", error))?;

            let rows: Vec<PermissionRow> = permissions
                .iter()
                .map(|permission| PermissionRow {
                    id: permission.id,
                    slug: permission.slug.clone(),
                })
                .collect();

            println!("{}", Table::new(rows));
        }
        RolesSubcommand::Create(args) => {
            let created = context
                .roles
                .create_role(&NewRole {
                    name: args.name,
                    permission_ids: args.permissions,
                })
                .await
                .map_err(|error| super::api_failure(session, "failed to create role", error))?;

            println!("created role {} ({})", created.id, created.name);
        }
        RolesSubcommand::Grant(args) => {
            let updated = context
                .roles
                .update_role(
                    args.id,
                    &RolePatch {
                        permission_ids: Some(args.permissions),
                        ..RolePatch::default()
                    },
                )
                .await
                .map_err(|error| super::api_failure(session, "failed to update role", error))?;

            println!(
                "role {} now grants: {}",
                updated.name,
                updated.slugs().join(", ")
            );
        }
        RolesSubcommand::Delete(args) => {
            context
                .roles
                .delete_role(args.id)
                .await
                .map_err(|error| super::api_failure(session, "failed to delete role", error))?;

            println!("deleted role {}", args.id);
        }
    }

    Ok(())
}
