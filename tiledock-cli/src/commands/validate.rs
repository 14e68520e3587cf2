//! Validate layout document command.

use std::fs;

use tiledock_core::layout::{check_invariants, tab_groups};
use tiledock_core::persistence::{LAYOUT_SCHEMA_VERSION, migrate_document, needs_migration};
use tiledock_core::{DocumentFormat, LayoutDocument};

use crate::error::CliError;
use crate::util::CliContext;

/// Validate command handler
pub fn cmd_validate(context: &CliContext) -> Result<(), CliError> {
    let path = context.layout_path()?;
    if !path.exists() {
        return Err(CliError::NotFound(format!("layout document {}", path.display())));
    }
    let text = fs::read_to_string(&path)?;
    let document = LayoutDocument::parse(&text, DocumentFormat::from_path(&path))?;

    if needs_migration(&document) {
        context.info(&format!(
            "Schema version {} will be migrated to {LAYOUT_SCHEMA_VERSION} on next save",
            document.schema_version
        ));
    }
    let document = migrate_document(document)?.document;

    if let Some(layout) = &document.layout {
        let violations = check_invariants(layout);
        if !violations.is_empty() {
            for violation in &violations {
                eprintln!("  - {violation}");
            }
            return Err(CliError::Document(format!(
                "{} structural issue(s) in {}",
                violations.len(),
                path.display()
            )));
        }
    }
    document.validate()?;

    let stale = document.stale_active_tabs();
    if stale > 0 {
        context.info(&format!("Warning: {stale} active tab entries refer to missing groups"));
    }

    let (groups, tabs) = document.layout.as_ref().map_or((0, 0), |layout| {
        let groups = tab_groups(layout);
        let tabs = groups.iter().map(|group| group.tabs.len()).sum();
        (groups.len(), tabs)
    });
    context.info(&format!(
        "OK: schema v{LAYOUT_SCHEMA_VERSION}, {groups} tab group(s), {tabs} tab(s)"
    ));
    Ok(())
}
