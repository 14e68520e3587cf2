//! Read-only layout queries.

use tiledock_core::layout::content_container_ids;
use tiledock_core::{ItemId, count_instances};

use crate::error::CliError;
use crate::util::{CliContext, load_document};

/// Containers command handler: one `type:container:id` key per line.
pub fn cmd_containers(context: &CliContext) -> Result<(), CliError> {
    let document = load_document(&context.layout_path()?)?;
    for container in content_container_ids(document.layout.as_ref()) {
        println!("{}", container.key());
    }
    Ok(())
}

/// Count command handler
pub fn cmd_count(context: &CliContext, id: &str) -> Result<(), CliError> {
    let document = load_document(&context.layout_path()?)?;
    println!("{}", count_instances(document.layout.as_ref(), &ItemId::from(id)));
    Ok(())
}
