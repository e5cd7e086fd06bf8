//! Barrel index generation
//!
//! An index is rebuilt from the directory listing every time, never patched, so it
//! always equals the set of exported files on disk. Files the export table does not
//! know about are skipped without error.

use crate::error::{CatalogError, CatalogResult};
use crate::registry::{EntryKind, Registry};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of every generated barrel
pub const INDEX_FILE: &str = "index.ts";

fn header(kind: EntryKind) -> [&'static str; 2] {
    match kind {
        EntryKind::Component => [
            "// UNICRN Component Library",
            "// Components are automatically exported when added via: npx unicrn add <component>",
        ],
        EntryKind::Hook => [
            "// UNICRN Hooks",
            "// Hooks are automatically exported when added via: npx unicrn add <hook>",
        ],
    }
}

/// Suffix of the source files that can appear in a directory's index
pub fn source_suffix(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Component => ".tsx",
        EntryKind::Hook => ".ts",
    }
}

fn export_statement(kind: EntryKind, file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(source_suffix(kind))?;
    Some(match kind {
        EntryKind::Component => format!("export * from './{}';", stem),
        EntryKind::Hook => format!("export {{ default as {} }} from './{}';", stem, stem),
    })
}

/// Fixed filename → export statement table for one kind of index
#[derive(Debug, Clone)]
pub struct ExportTable {
    kind: EntryKind,
    statements: BTreeMap<String, String>,
}

impl ExportTable {
    /// Every file owned by a registry entry of `kind`
    pub fn for_kind(registry: &Registry, kind: EntryKind) -> Self {
        let statements = registry
            .entries_of(kind)
            .flat_map(|info| info.files.iter())
            .filter_map(|&path| {
                let file_name = path.rsplit('/').next().unwrap_or(path);
                export_statement(kind, file_name).map(|stmt| (file_name.to_string(), stmt))
            })
            .collect();
        Self { kind, statements }
    }

    pub fn statement(&self, file_name: &str) -> Option<&str> {
        self.statements.get(file_name).map(String::as_str)
    }
}

/// Build index content for the given file names (order does not matter)
pub fn render_index<'a>(
    table: &ExportTable,
    file_names: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut names: Vec<&str> = file_names.into_iter().collect();
    names.sort_unstable();
    names.dedup();

    let mut out = header(table.kind).join("\n");
    out.push('\n');

    let exports: Vec<&str> = names
        .into_iter()
        .filter_map(|name| table.statement(name))
        .collect();
    if !exports.is_empty() {
        out.push('\n');
        for line in exports {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// List the candidate source files directly inside `dir`
pub fn scan_sources(dir: &Path, kind: EntryKind) -> CatalogResult<Vec<String>> {
    let suffix = source_suffix(kind);
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| CatalogError::io("read directory", dir, e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.ends_with(suffix) && name != INDEX_FILE {
            names.push(name.into_owned());
        }
    }

    Ok(names)
}

/// Rewrite `dir/index.ts` so it exports exactly the known files present in `dir`
pub fn regenerate_index(dir: &Path, table: &ExportTable) -> CatalogResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| CatalogError::io("create directory", dir, e))?;

    let names = scan_sources(dir, table.kind)?;
    let content = render_index(table, names.iter().map(String::as_str));

    let index_path = dir.join(INDEX_FILE);
    std::fs::write(&index_path, content)
        .map_err(|e| CatalogError::io("write", &index_path, e))?;
    Ok(index_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn components() -> ExportTable {
        ExportTable::for_kind(Registry::builtin(), EntryKind::Component)
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "// source").unwrap();
    }

    #[test]
    fn test_table_covers_registry_files() {
        let table = components();
        assert_eq!(table.statement("Button.tsx"), Some("export * from './Button';"));
        assert_eq!(table.statement("OTPInput.tsx"), Some("export * from './OTPInput';"));
        assert_eq!(table.statement("useDisclose.ts"), None);

        let hooks = ExportTable::for_kind(Registry::builtin(), EntryKind::Hook);
        assert_eq!(
            hooks.statement("useDisclose.ts"),
            Some("export { default as useDisclose } from './useDisclose';")
        );
    }

    #[test]
    fn test_exports_exactly_present_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Card.tsx");
        touch(dir.path(), "Button.tsx");
        touch(dir.path(), "Experimental.tsx");
        touch(dir.path(), "notes.md");

        let index = regenerate_index(dir.path(), &components()).unwrap();
        let content = std::fs::read_to_string(index).unwrap();

        assert_eq!(
            content,
            "// UNICRN Component Library\n\
             // Components are automatically exported when added via: npx unicrn add <component>\n\
             \n\
             export * from './Button';\n\
             export * from './Card';\n"
        );
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Switch.tsx");
        touch(dir.path(), "Avatar.tsx");

        let table = components();
        let first = std::fs::read(regenerate_index(dir.path(), &table).unwrap()).unwrap();
        let second = std::fs::read(regenerate_index(dir.path(), &table).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stale_index_is_replaced_not_appended() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Badge.tsx");
        std::fs::write(
            dir.path().join(INDEX_FILE),
            "export * from './Badge';\nexport * from './Badge';\nexport * from './Gone';\n",
        )
        .unwrap();

        regenerate_index(dir.path(), &components()).unwrap();
        let content = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();

        assert_eq!(content.matches("export * from './Badge';").count(), 1);
        assert!(!content.contains("Gone"));
    }

    #[test]
    fn test_missing_directory_gets_header_only_index() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("components/hooks");
        let hooks = ExportTable::for_kind(Registry::builtin(), EntryKind::Hook);

        regenerate_index(&dir, &hooks).unwrap();
        let content = std::fs::read_to_string(dir.join(INDEX_FILE)).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("// UNICRN Hooks\n"));
    }

    #[test]
    fn test_hook_index_ignores_its_own_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "useDisclose.ts");
        touch(dir.path(), INDEX_FILE);
        let hooks = ExportTable::for_kind(Registry::builtin(), EntryKind::Hook);

        let names = scan_sources(dir.path(), EntryKind::Hook).unwrap();
        assert_eq!(names, vec!["useDisclose.ts".to_string()]);

        let content = render_index(&hooks, names.iter().map(String::as_str));
        assert!(content.ends_with("export { default as useDisclose } from './useDisclose';\n"));
    }
}
