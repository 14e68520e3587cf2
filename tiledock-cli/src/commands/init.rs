//! Sample layout creation command.

use std::sync::Arc;

use tiledock_core::{
    ActiveTabState, ItemId, LayoutDocument, LayoutNode, NodeRef, SplitDirection, SplitGroup,
    TabGroup, TabRef,
};

use crate::error::CliError;
use crate::util::{CliContext, save_document};

/// Two tab groups side by side.
pub fn sample_layout() -> NodeRef {
    let group = |id: &str, tabs: &[&str]| -> NodeRef {
        Arc::new(LayoutNode::TabGroup(TabGroup {
            id: ItemId::from(id),
            weight: Some(1.0),
            size: None,
            renderer_type: "document".to_string(),
            tabs: tabs.iter().map(|tab| TabRef::new(*tab, "document")).collect(),
        }))
    };
    Arc::new(LayoutNode::SplitGroup(SplitGroup {
        id: ItemId::from("root"),
        weight: Some(1.0),
        size: None,
        direction: SplitDirection::Row,
        gap: None,
        items: vec![group("left", &["welcome", "readme"]), group("right", &["notes"])],
    }))
}

/// Init command handler
pub fn cmd_init(context: &CliContext, force: bool) -> Result<(), CliError> {
    let path = context.layout_path()?;
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let layout = sample_layout();
    let active: ActiveTabState = [(ItemId::from("left"), 0), (ItemId::from("right"), 0)]
        .into_iter()
        .collect();
    save_document(&path, LayoutDocument::new(Some(layout), active))?;
    context.info(&format!("Wrote sample layout to {}", path.display()));
    Ok(())
}
