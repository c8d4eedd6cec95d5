// src/style/stylesheet.rs
use crate::blaze_render;
use crate::error::{CssomError, Result};
use crate::style::selector::{MergeMode, SelectorEntry};
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

/// An in-memory stylesheet: selector entries keyed by name, in insertion order.
///
/// Keeps a second index from selector id to name so entries can be looked up by
/// either. Both maps are only touched together, inside the methods below.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    name: Option<String>,
    entries: IndexMap<String, SelectorEntry>,
    /// Maps a selector id to the selector name that owns it.
    id_index: HashMap<String, String>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Stylesheet::default()
    }

    /// A stylesheet that carries a name, as handed out by the registry.
    pub fn named(name: impl Into<String>) -> Self {
        Stylesheet {
            name: Some(name.into()),
            ..Stylesheet::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds an empty selector. The id defaults to the hash of `name`.
    pub fn create_selector(&mut self, name: &str, id: Option<&str>) -> Result<&mut SelectorEntry> {
        if name.is_empty() {
            return Err(CssomError::MissingField("name"));
        }
        if self.entries.contains_key(name) {
            return Err(CssomError::DuplicateSelector(name.to_string()));
        }
        self.insert_entry(SelectorEntry::new(name, id))
    }

    /// Looks up a selector by name, then by id.
    pub fn get_selector(&self, name_or_id: &str) -> Result<&SelectorEntry> {
        let index = self.resolve(name_or_id)?;
        Ok(&self.entries[index])
    }

    pub fn get_selector_mut(&mut self, name_or_id: &str) -> Result<&mut SelectorEntry> {
        let index = self.resolve(name_or_id)?;
        Ok(&mut self.entries[index])
    }

    pub fn get_or_create_selector(&mut self, name: &str) -> Result<&mut SelectorEntry> {
        match self.entries.get_index_of(name) {
            Some(index) => Ok(&mut self.entries[index]),
            None => self.create_selector(name, None),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Removes a selector, by name or id, and returns it.
    pub fn remove_selector(&mut self, name_or_id: &str) -> Result<SelectorEntry> {
        let index = self.resolve(name_or_id)?;
        let (name, entry) = self
            .entries
            .shift_remove_index(index)
            .ok_or_else(|| CssomError::SelectorNotFound(name_or_id.to_string()))?;
        self.id_index.remove(entry.id());
        debug!("removed selector '{}' ({})", name, entry.id());
        Ok(entry)
    }

    /// Selectors in insertion order.
    pub fn selectors(&self) -> impl Iterator<Item = &SelectorEntry> {
        self.entries.values()
    }

    /// Copies of every selector, in insertion order.
    pub fn list_selectors(&self) -> Vec<SelectorEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Folds `other` into the stylesheet.
    ///
    /// An unknown name is inserted as-is. A known name either takes the
    /// incoming declarations it does not have yet ([`MergeMode::Merge`]; exact
    /// content duplicates are dropped, not overwritten) or has its
    /// declarations replaced ([`MergeMode::Replace`]; the existing id stays).
    pub fn merge_selector(
        &mut self,
        other: SelectorEntry,
        mode: MergeMode,
    ) -> Result<&mut SelectorEntry> {
        let Some(index) = self.entries.get_index_of(other.name()) else {
            return self.insert_entry(other);
        };

        let entry = &mut self.entries[index];
        let incoming = other.len();
        let dropped = entry.absorb(other, mode);
        if dropped > 0 {
            warn!(
                "merge into '{}' dropped {} of {} duplicate declarations",
                entry.name(),
                dropped,
                incoming
            );
        }
        debug!("merged selector '{}' ({:?})", entry.name(), mode);
        Ok(entry)
    }

    /// Copies every selector of `other` into this stylesheet.
    ///
    /// Fails with [`CssomError::DuplicateSelector`] if any name already exists
    /// (or [`CssomError::DuplicateId`] when an explicitly chosen id is taken).
    /// The copy is built aside and swapped in, so a failed merge leaves `self`
    /// unchanged.
    pub fn merge_model(&mut self, other: &Stylesheet) -> Result<()> {
        if let Some(entry) = other.selectors().find(|e| self.contains(e.name())) {
            return Err(CssomError::DuplicateSelector(entry.name().to_string()));
        }

        let mut merged = self.clone();
        for entry in other.selectors() {
            merged.insert_entry(entry.clone())?;
        }
        *self = merged;
        debug!("merged {} selectors into stylesheet", other.len());
        Ok(())
    }

    /// Renders the stylesheet; shorthand for [`blaze_render::render`].
    pub fn to_css(&self, minify: bool) -> String {
        blaze_render::render(self, minify)
    }

    fn resolve(&self, name_or_id: &str) -> Result<usize> {
        self.entries
            .get_index_of(name_or_id)
            .or_else(|| {
                self.id_index
                    .get(name_or_id)
                    .and_then(|name| self.entries.get_index_of(name))
            })
            .ok_or_else(|| CssomError::SelectorNotFound(name_or_id.to_string()))
    }

    /// Inserts an entry whose name is known to be free, registering its id.
    ///
    /// A derived id held by another name (two names with the same hash) is
    /// moved to the first free salted id. An explicit id is never moved.
    fn insert_entry(&mut self, mut entry: SelectorEntry) -> Result<&mut SelectorEntry> {
        if let Some(existing) = self.id_index.get(entry.id()) {
            if entry.has_explicit_id() {
                return Err(CssomError::DuplicateId {
                    id: entry.id().to_string(),
                    existing: existing.clone(),
                });
            }
            let mut attempt = 1;
            loop {
                entry.rederive_id(attempt);
                if !self.id_index.contains_key(entry.id()) {
                    break;
                }
                attempt += 1;
            }
            debug!(
                "id of '{}' collides with '{}', using {}",
                entry.name(),
                existing,
                entry.id()
            );
        }

        debug!("created selector '{}' ({})", entry.name(), entry.id());
        self.id_index
            .insert(entry.id().to_string(), entry.name().to_string());
        let (index, _) = self.entries.insert_full(entry.name().to_string(), entry);
        Ok(&mut self.entries[index])
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&blaze_render::render(self, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident;
    use crate::style::declaration::UnitKind;

    fn assert_index_consistent(sheet: &Stylesheet) {
        assert_eq!(sheet.id_index.len(), sheet.entries.len());
        for entry in sheet.selectors() {
            assert_eq!(sheet.id_index.get(entry.id()), Some(&entry.name().to_string()));
        }
    }

    #[test]
    fn test_create_and_lookup_by_name_or_id() {
        let mut sheet = Stylesheet::new();
        let id = sheet.create_selector("body", None).unwrap().id().to_string();

        let by_name = sheet.get_selector("body").unwrap();
        let by_id = sheet.get_selector(&id).unwrap();
        assert_eq!(by_name, by_id);
        assert_index_consistent(&sheet);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let mut sheet = Stylesheet::new();
        sheet.create_selector("h1", None).unwrap();
        assert_eq!(
            sheet.create_selector("h1", None).unwrap_err(),
            CssomError::DuplicateSelector("h1".into())
        );
        assert_eq!(
            sheet.create_selector("", None).unwrap_err(),
            CssomError::MissingField("name")
        );
    }

    #[test]
    fn test_create_with_taken_id_fails() {
        let mut sheet = Stylesheet::new();
        sheet.create_selector("h1", Some("title")).unwrap();
        assert_eq!(
            sheet.create_selector("h2", Some("title")).unwrap_err(),
            CssomError::DuplicateId {
                id: "title".into(),
                existing: "h1".into()
            }
        );
        assert!(!sheet.contains("h2"));
        assert_index_consistent(&sheet);
    }

    #[test]
    fn test_colliding_names_get_distinct_ids() {
        let mut sheet = Stylesheet::new();
        let first = sheet.create_selector(".Aa", None).unwrap().id().to_string();
        let second = sheet.create_selector(".BB", None).unwrap().id().to_string();
        assert_eq!(first, "c46318");
        assert_eq!(second, ident::salted_selector_id(".BB", 1));
        assert_eq!(sheet.get_selector(&second).unwrap().name(), ".BB");
        assert_eq!(sheet.get_selector(&first).unwrap().name(), ".Aa");
        assert_index_consistent(&sheet);

        // A third name with the same hash skips both taken ids.
        let third = sheet
            .merge_selector(SelectorEntry::new("-aB", None), MergeMode::Merge)
            .unwrap()
            .id()
            .to_string();
        assert_eq!(ident::hash("-aB"), ident::hash(".Aa"));
        assert_ne!(third, first);
        assert_ne!(third, second);

        // Colliding names inside the merged model are also accepted.
        let mut other = Stylesheet::new();
        other.create_selector(".Ab", None).unwrap();
        other.create_selector(".BC", None).unwrap();
        sheet.merge_model(&other).unwrap();
        assert_eq!(sheet.len(), 5);
        assert_index_consistent(&sheet);
    }

    #[test]
    fn test_merge_model_rejects_taken_explicit_id() {
        let mut left = Stylesheet::new();
        left.create_selector("h1", Some("title")).unwrap();

        let mut right = Stylesheet::new();
        right.create_selector("p", None).unwrap();
        right.create_selector("h2", Some("title")).unwrap();

        assert_eq!(
            left.merge_model(&right).unwrap_err(),
            CssomError::DuplicateId {
                id: "title".into(),
                existing: "h1".into()
            }
        );
        assert!(!left.contains("p"));
        assert_index_consistent(&left);
    }

    #[test]
    fn test_lookup_miss() {
        let sheet = Stylesheet::new();
        assert_eq!(
            sheet.get_selector("nav").unwrap_err(),
            CssomError::SelectorNotFound("nav".into())
        );
    }

    #[test]
    fn test_get_or_create_reuses_entry() {
        let mut sheet = Stylesheet::new();
        sheet
            .get_or_create_selector("p")
            .unwrap()
            .append_declaration("margin", 0, UnitKind::Pixels)
            .unwrap();
        sheet
            .get_or_create_selector("p")
            .unwrap()
            .append_declaration("padding", 0, UnitKind::Pixels)
            .unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get_selector("p").unwrap().len(), 2);
    }

    #[test]
    fn test_remove_selector_updates_both_maps() {
        let mut sheet = Stylesheet::new();
        let id = sheet.create_selector("a", None).unwrap().id().to_string();
        sheet.create_selector("b", None).unwrap();

        let removed = sheet.remove_selector(&id).unwrap();
        assert_eq!(removed.name(), "a");
        assert!(sheet.get_selector(&id).is_err());
        assert_index_consistent(&sheet);

        // The name can be taken again after removal.
        sheet.create_selector("a", None).unwrap();
        let names: Vec<_> = sheet.selectors().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_merge_selector_inserts_unknown_name() {
        let mut sheet = Stylesheet::new();
        let mut entry = SelectorEntry::new(".card", None);
        entry.append_declaration("padding", 8, UnitKind::Pixels).unwrap();

        sheet.merge_selector(entry, MergeMode::Merge).unwrap();
        assert_eq!(sheet.get_selector(".card").unwrap().len(), 1);
        assert_index_consistent(&sheet);
    }

    #[test]
    fn test_merge_selector_drops_duplicate_content() {
        let mut sheet = Stylesheet::new();
        sheet
            .create_selector("a", None)
            .unwrap()
            .append_declaration("color", "red", UnitKind::String)
            .unwrap();

        let mut incoming = SelectorEntry::new("a", None);
        incoming.append_important("color", "red", UnitKind::String).unwrap();
        incoming.append_declaration("display", "block", UnitKind::String).unwrap();

        let merged = sheet.merge_selector(incoming, MergeMode::Merge).unwrap();
        assert_eq!(merged.len(), 2);
        // The existing declaration wins over the incoming important copy.
        assert!(!merged.get_declaration("color").unwrap().is_important());
    }

    #[test]
    fn test_merge_selector_replace() {
        let mut sheet = Stylesheet::new();
        sheet
            .create_selector("a", None)
            .unwrap()
            .append_declaration("color", "red", UnitKind::String)
            .unwrap();

        let mut incoming = SelectorEntry::new("a", None);
        incoming.append_declaration("display", "none", UnitKind::String).unwrap();

        let merged = sheet.merge_selector(incoming, MergeMode::Replace).unwrap();
        assert_eq!(merged.len(), 1);
        assert!(merged.get_declaration("color").is_none());
    }

    #[test]
    fn test_merge_model_is_atomic() {
        let mut left = Stylesheet::new();
        left.create_selector("h1", None).unwrap();

        let mut right = Stylesheet::new();
        right.create_selector("p", None).unwrap();
        right.create_selector("h1", None).unwrap();

        assert_eq!(
            left.merge_model(&right).unwrap_err(),
            CssomError::DuplicateSelector("h1".into())
        );
        assert_eq!(left.len(), 1);
        assert!(!left.contains("p"));
        assert_index_consistent(&left);
    }

    #[test]
    fn test_merge_model_copies_in_order() {
        let mut left = Stylesheet::new();
        left.create_selector("body", None).unwrap();

        let mut right = Stylesheet::new();
        right.create_selector("h2", None).unwrap();
        right.create_selector("h1", None).unwrap();

        left.merge_model(&right).unwrap();
        let names: Vec<_> = left.selectors().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["body", "h2", "h1"]);
        assert_eq!(right.len(), 2);
        assert_index_consistent(&left);
    }
}
