//! Static catalog of components, hooks and themes
//!
//! The registry is immutable data built once per process. Components and hooks
//! live in separate namespaces but are looked up through one combined table, so
//! construction rejects a key or file path claimed twice.

use crate::error::{CatalogError, CatalogResult};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Registry path of the shared theme configuration file
pub const THEME_FILE: &str = "unistyles.ts";

/// Which namespace an entry belongs to; decides target directory and index file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Component,
    Hook,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Component => "Component",
            EntryKind::Hook => "Hook",
        }
    }
}

/// Metadata shared by components and hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    /// Canonical lowercase key (e.g. `button`)
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// npm packages the consumer needs; reported, never resolved
    pub dependencies: &'static [&'static str],
    /// Registry-relative source paths owned by this entry
    pub files: &'static [&'static str],
}

/// A registry entry tagged with its namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry {
    Component(EntryInfo),
    Hook(EntryInfo),
}

impl CatalogEntry {
    pub fn info(&self) -> &EntryInfo {
        match self {
            CatalogEntry::Component(info) | CatalogEntry::Hook(info) => info,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            CatalogEntry::Component(_) => EntryKind::Component,
            CatalogEntry::Hook(_) => EntryKind::Hook,
        }
    }
}

/// A named theme; the colour table is opaque payload shown by `themes`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub colors: &'static [(&'static str, &'static str)],
}

impl Theme {
    /// `role value` pairs in declaration order, comma separated
    pub fn color_summary(&self) -> String {
        self.colors
            .iter()
            .map(|(role, value)| format!("{} {}", role, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug)]
pub struct Registry {
    entries: Vec<CatalogEntry>,
    themes: Vec<Theme>,
    by_key: HashMap<&'static str, usize>,
}

impl Registry {
    /// Build a registry, panicking if two entries claim the same key or file
    pub fn new(components: &[EntryInfo], hooks: &[EntryInfo], themes: &[Theme]) -> Self {
        let entries: Vec<CatalogEntry> = components
            .iter()
            .copied()
            .map(CatalogEntry::Component)
            .chain(hooks.iter().copied().map(CatalogEntry::Hook))
            .collect();

        let mut by_key = HashMap::new();
        let mut owners: HashMap<&'static str, &'static str> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let info = entry.info();
            assert_eq!(
                info.key,
                info.key.to_lowercase(),
                "registry key '{}' must be lowercase",
                info.key
            );
            if let Some(prev) = by_key.insert(info.key, idx) {
                panic!(
                    "registry key '{}' is declared twice ({} and {})",
                    info.key,
                    entries[prev].info().name,
                    info.name
                );
            }
            for &file in info.files {
                if let Some(owner) = owners.insert(file, info.key) {
                    panic!(
                        "registry file '{}' is claimed by both '{}' and '{}'",
                        file, owner, info.key
                    );
                }
            }
        }

        Self {
            entries,
            themes: themes.to_vec(),
            by_key,
        }
    }

    /// The catalog shipped with this tool
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(|| Registry::new(COMPONENTS, HOOKS, THEMES))
    }

    /// Case-insensitive lookup across components and hooks
    pub fn lookup(&self, name: &str) -> Option<CatalogEntry> {
        let key = name.to_lowercase();
        self.by_key.get(key.as_str()).map(|&idx| self.entries[idx])
    }

    /// Like [`lookup`](Self::lookup), but reports the valid names on a miss
    pub fn require(&self, name: &str) -> CatalogResult<CatalogEntry> {
        self.lookup(name).ok_or_else(|| CatalogError::NotFound {
            kind: "Component or hook",
            name: name.to_string(),
            available: self.entries.iter().map(|e| e.info().key.to_string()).collect(),
        })
    }

    pub fn theme(&self, name: &str) -> Option<&Theme> {
        let key = name.to_lowercase();
        self.themes.iter().find(|t| t.key == key)
    }

    pub fn require_theme(&self, name: &str) -> CatalogResult<&Theme> {
        self.theme(name).ok_or_else(|| CatalogError::NotFound {
            kind: "Theme",
            name: name.to_string(),
            available: self.themes.iter().map(|t| t.key.to_string()).collect(),
        })
    }

    /// All entries, components first, in declaration order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = &EntryInfo> {
        self.entries
            .iter()
            .filter(move |e| e.kind() == kind)
            .map(CatalogEntry::info)
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }
}

const UNISTYLES: &str = "react-native-unistyles";

const COMPONENTS: &[EntryInfo] = &[
    EntryInfo {
        key: "avatar",
        name: "Avatar",
        description: "An image element with a fallback for representing the user.",
        dependencies: &[UNISTYLES],
        files: &["lib/components/ui/Avatar.tsx"],
    },
    EntryInfo {
        key: "badge",
        name: "Badge",
        description: "Displays a badge or a component that looks like a badge.",
        dependencies: &[UNISTYLES],
        files: &["lib/components/ui/Badge.tsx"],
    },
    EntryInfo {
        key: "button",
        name: "Button",
        description: "Displays a button or a component that looks like a button.",
        dependencies: &[UNISTYLES],
        files: &["lib/components/ui/Button.tsx"],
    },
    EntryInfo {
        key: "card",
        name: "Card",
        description: "Displays a card with header, content, and footer.",
        dependencies: &[UNISTYLES],
        files: &["lib/components/ui/Card.tsx"],
    },
    EntryInfo {
        key: "checkbox",
        name: "Checkbox",
        description: "Checkbox input with multiple sizes and variants.",
        dependencies: &[UNISTYLES, "lucide-react-native"],
        files: &["lib/components/ui/Checkbox.tsx"],
    },
    EntryInfo {
        key: "dialog",
        name: "Dialog",
        description: "Modal dialog component with backdrop and animations.",
        dependencies: &[UNISTYLES, "lucide-react-native"],
        files: &["lib/components/ui/Dialog.tsx"],
    },
    EntryInfo {
        key: "input",
        name: "Input",
        description: "Displays a form input field or a component that looks like an input field.",
        dependencies: &[UNISTYLES],
        files: &["lib/components/ui/Input.tsx"],
    },
    EntryInfo {
        key: "otpinput",
        name: "OTPInput",
        description: "One-time password input component with multiple digits.",
        dependencies: &[UNISTYLES],
        files: &["lib/components/ui/OTPInput.tsx"],
    },
    EntryInfo {
        key: "radio",
        name: "Radio",
        description: "Radio button group component for single selection.",
        dependencies: &[UNISTYLES],
        files: &["lib/components/ui/Radio.tsx"],
    },
    EntryInfo {
        key: "switch",
        name: "Switch",
        description: "A control that allows the user to toggle between checked and not checked.",
        dependencies: &[UNISTYLES, "react-native-reanimated"],
        files: &["lib/components/ui/Switch.tsx"],
    },
    EntryInfo {
        key: "typography",
        name: "Typography",
        description: "Unified typography component with semantic variants like shadcn/ui.",
        dependencies: &[UNISTYLES],
        files: &["lib/components/ui/Typography.tsx"],
    },
];

const HOOKS: &[EntryInfo] = &[EntryInfo {
    key: "usedisclose",
    name: "useDisclose",
    description: "Open/close/toggle state for dialogs, sheets and menus.",
    dependencies: &[],
    files: &["lib/hooks/useDisclose.ts"],
}];

const THEMES: &[Theme] = &[
    Theme {
        key: "default",
        name: "Default",
        colors: &[
            ("primary", "#18181b"),
            ("secondary", "#f4f4f5"),
            ("destructive", "#ef4444"),
            ("background", "#ffffff"),
            ("foreground", "#18181b"),
        ],
    },
    Theme {
        key: "dark",
        name: "Dark",
        colors: &[
            ("primary", "#fafafa"),
            ("secondary", "#27272a"),
            ("destructive", "#ef4444"),
            ("background", "#09090b"),
            ("foreground", "#fafafa"),
        ],
    },
    Theme {
        key: "blue",
        name: "Blue",
        colors: &[
            ("primary", "#3b82f6"),
            ("secondary", "#e0e7ff"),
            ("destructive", "#ef4444"),
            ("background", "#ffffff"),
            ("foreground", "#1e293b"),
        ],
    },
    Theme {
        key: "green",
        name: "Green",
        colors: &[
            ("primary", "#22c55e"),
            ("secondary", "#dcfce7"),
            ("destructive", "#ef4444"),
            ("background", "#ffffff"),
            ("foreground", "#1e293b"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_consistent() {
        let registry = Registry::builtin();
        assert_eq!(registry.entries_of(EntryKind::Component).count(), 11);
        assert_eq!(registry.entries_of(EntryKind::Hook).count(), 1);
        assert_eq!(registry.themes().len(), 4);
    }

    #[test]
    fn test_color_summary_keeps_declaration_order() {
        let dark = Registry::builtin().require_theme("dark").unwrap();
        let summary = dark.color_summary();
        assert!(summary.starts_with("primary #fafafa, secondary #27272a"));
        assert_eq!(summary.matches(", ").count(), dark.colors.len() - 1);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = Registry::builtin();
        let entry = registry.lookup("OTPInput").unwrap();
        assert_eq!(entry.kind(), EntryKind::Component);
        assert_eq!(entry.info().files, &["lib/components/ui/OTPInput.tsx"]);

        let hook = registry.lookup("useDisclose").unwrap();
        assert_eq!(hook.kind(), EntryKind::Hook);
    }

    #[test]
    fn test_require_unknown_lists_valid_names() {
        let registry = Registry::builtin();
        match registry.require("carousel") {
            Err(CatalogError::NotFound { available, .. }) => {
                assert!(available.contains(&"button".to_string()));
                assert!(available.contains(&"usedisclose".to_string()));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(registry.require_theme("Dark").is_ok());
        assert!(registry.require_theme("neon").is_err());
    }

    #[test]
    #[should_panic(expected = "claimed by both")]
    fn test_duplicate_file_path_is_rejected() {
        let a = EntryInfo {
            key: "a",
            name: "A",
            description: "",
            dependencies: &[],
            files: &["lib/components/ui/Shared.tsx"],
        };
        let b = EntryInfo {
            key: "b",
            name: "B",
            ..a
        };
        Registry::new(&[a], &[b], &[]);
    }

    #[test]
    #[should_panic(expected = "declared twice")]
    fn test_key_collision_across_namespaces_is_rejected() {
        let component = EntryInfo {
            key: "toggle",
            name: "Toggle",
            description: "",
            dependencies: &[],
            files: &["lib/components/ui/Toggle.tsx"],
        };
        let hook = EntryInfo {
            files: &["lib/hooks/toggle.ts"],
            ..component
        };
        Registry::new(&[component], &[hook], &[]);
    }
}
