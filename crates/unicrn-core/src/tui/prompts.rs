//! Interactive entry selection for `add` without names

use crate::registry::{EntryKind, Registry};
use anyhow::Result;

/// Let the user choose components and hooks; returns registry keys
pub fn pick_entries(registry: &Registry, display_name: &str) -> Result<Vec<String>> {
    cliclack::intro(display_name)?;

    let mut multi = cliclack::multiselect("Select components and hooks to add");
    for entry in registry.entries() {
        let info = entry.info();
        let label = match entry.kind() {
            EntryKind::Component => info.name.to_string(),
            EntryKind::Hook => format!("{} (hook)", info.name),
        };
        multi = multi.item(info.key, label, info.description);
    }

    let selected: Vec<&'static str> = multi.required(true).interact()?;

    cliclack::outro(format!("Adding {} item(s)", selected.len()))?;
    Ok(selected.into_iter().map(str::to_string).collect())
}
