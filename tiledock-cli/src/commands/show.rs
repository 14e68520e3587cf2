//! Show layout command.

use std::fmt::Write as _;

use tiledock_core::{ActiveTabState, DocumentFormat, LayoutNode};

use crate::cli::ShowFormat;
use crate::error::CliError;
use crate::util::{CliContext, load_document};

/// Show command handler
pub fn cmd_show(context: &CliContext, format: ShowFormat) -> Result<(), CliError> {
    let document = load_document(&context.layout_path()?)?;
    match format {
        ShowFormat::Json => println!("{}", document.to_text(DocumentFormat::Json)?),
        ShowFormat::Tree => match &document.layout {
            Some(layout) => print!("{}", render_tree(layout, &document.active_tabs)),
            None => println!("(empty layout)"),
        },
    }
    Ok(())
}

/// Renders a layout as an indented tree; the active tab is starred.
pub fn render_tree(root: &LayoutNode, active: &ActiveTabState) -> String {
    let mut out = String::new();
    out.push_str(&describe(root));
    out.push('\n');
    render_children(root, active, "", &mut out);
    out
}

fn describe(node: &LayoutNode) -> String {
    let weight = node
        .weight()
        .map(|weight| format!(", weight {weight}"))
        .unwrap_or_default();
    match node {
        LayoutNode::SplitGroup(group) => format!("split {} ({}{weight})", group.id, group.direction),
        LayoutNode::TabGroup(group) => format!("tabs {} ({} tabs{weight})", group.id, group.tabs.len()),
        LayoutNode::Tile(tile) => format!("tile {} [{}]{weight}", tile.id, tile.renderer_type),
    }
}

fn render_children(node: &LayoutNode, active: &ActiveTabState, prefix: &str, out: &mut String) {
    match node {
        LayoutNode::SplitGroup(group) => {
            for (index, child) in group.items.iter().enumerate() {
                let last = index + 1 == group.items.len();
                let _ = writeln!(out, "{prefix}{}{}", branch(last), describe(child));
                let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
                render_children(child, active, &nested, out);
            }
        }
        LayoutNode::TabGroup(group) => {
            let current = active.get(&group.id).unwrap_or(0);
            for (index, tab) in group.tabs.iter().enumerate() {
                let last = index + 1 == group.tabs.len();
                let marker = if index == current { " *" } else { "" };
                let _ = writeln!(
                    out,
                    "{prefix}{}{} [{}]{marker}",
                    branch(last),
                    tab.id,
                    tab.renderer_type
                );
            }
        }
        LayoutNode::Tile(_) => {}
    }
}

const fn branch(last: bool) -> &'static str {
    if last { "└── " } else { "├── " }
}
