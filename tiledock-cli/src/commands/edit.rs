//! Layout editing commands: move, close and append.
//!
//! Each command loads the document, applies one tree transform, carries the
//! active tab table over to the new tree and writes the document back.

use std::sync::Arc;

use tiledock_core::layout::insert;
use tiledock_core::{
    DropRegion, DropTarget, ItemId, LayoutDocument, LayoutError, TabRef, apply_drop, apply_remove,
};

use crate::cli::RegionArg;
use crate::error::CliError;
use crate::util::{CliContext, activate_tab, carry_active_tabs, load_document, save_document};

/// Builds the drop target from the mutually exclusive `--region`/`--index`.
pub fn drop_target(region: Option<RegionArg>, index: Option<i64>) -> Result<DropTarget, CliError> {
    match (region, index) {
        (Some(region), None) => Ok(DropTarget::DropRegion(DropRegion::from(region))),
        (None, Some(index)) => Ok(DropTarget::TabIndex(index)),
        _ => Err(CliError::Usage("exactly one of --region or --index is required".to_string())),
    }
}

/// Move command handler
pub fn cmd_move(
    context: &CliContext,
    from: &str,
    to: &str,
    target: DropTarget,
) -> Result<(), CliError> {
    let path = context.layout_path()?;
    let document = load_document(&path)?;
    let from_id = ItemId::from(from);

    let layout = apply_drop(document.layout.as_ref(), &from_id, &ItemId::from(to), target)?;
    let mut active = carry_active_tabs(layout.as_ref(), &document.active_tabs);
    activate_tab(layout.as_ref(), &mut active, &from_id);

    save_document(&path, LayoutDocument { layout, active_tabs: active, ..document })?;
    context.info(&format!("Moved {from} to {to} ({target})"));
    Ok(())
}

/// Close command handler
pub fn cmd_close(context: &CliContext, id: &str) -> Result<(), CliError> {
    let path = context.layout_path()?;
    let document = load_document(&path)?;

    let layout = apply_remove(document.layout.as_ref(), &ItemId::from(id))?;
    let active = carry_active_tabs(layout.as_ref(), &document.active_tabs);
    let empty = layout.is_none();

    save_document(&path, LayoutDocument { layout, active_tabs: active, ..document })?;
    if empty {
        context.info(&format!("Closed {id}; the layout is now empty"));
    } else {
        context.info(&format!("Closed {id}"));
    }
    Ok(())
}

/// Append command handler
pub fn cmd_append(
    context: &CliContext,
    group: &str,
    id: &str,
    renderer_type: &str,
) -> Result<(), CliError> {
    let path = context.layout_path()?;
    let document = load_document(&path)?;
    let root = document.layout.as_ref().ok_or(LayoutError::EmptyLayout)?;
    let tab_id = ItemId::from(id);

    let inserted = insert(
        TabRef::new(tab_id.clone(), renderer_type),
        &ItemId::from(group),
        DropTarget::append(),
        root,
    )?;
    let held = Arc::ptr_eq(&inserted, root);
    let layout = Some(inserted);
    let mut active = carry_active_tabs(layout.as_ref(), &document.active_tabs);
    activate_tab(layout.as_ref(), &mut active, &tab_id);

    save_document(&path, LayoutDocument { layout, active_tabs: active, ..document })?;
    if held {
        context.info(&format!("{group} already holds {id}; made it the active tab"));
    } else {
        context.info(&format!("Appended {id} [{renderer_type}] to {group}"));
    }
    Ok(())
}
