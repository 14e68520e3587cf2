//! Command handler modules for the CLI.

mod completions;
mod edit;
mod init;
mod inspect;
mod region;
mod show;
mod validate;

use crate::cli::Commands;
use crate::error::CliError;
use crate::util::CliContext;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(context: &CliContext, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Init { force } => init::cmd_init(context, force),
        Commands::Show { format } => show::cmd_show(context, format),
        Commands::Validate => validate::cmd_validate(context),
        Commands::Containers => inspect::cmd_containers(context),
        Commands::Count { id } => inspect::cmd_count(context, &id),
        Commands::Move {
            from,
            to,
            region,
            index,
        } => edit::cmd_move(context, &from, &to, edit::drop_target(region, index)?),
        Commands::Close { id } => edit::cmd_close(context, &id),
        Commands::Append {
            group,
            id,
            renderer_type,
        } => edit::cmd_append(context, &group, &id, &renderer_type),
        Commands::Region {
            bounds,
            point,
            band,
        } => region::cmd_region(context, bounds, point, band),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
