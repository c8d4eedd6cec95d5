// src/style/registry.rs
use crate::style::stylesheet::Stylesheet;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Named stylesheets shared between callers.
///
/// Asking twice for the same name yields handles to the same stylesheet, so a
/// change made through one handle is visible through the other. The registry
/// is owned by the caller and is single-threaded.
#[derive(Debug, Default)]
pub struct StylesheetRegistry {
    sheets: HashMap<String, Rc<RefCell<Stylesheet>>>,
}

impl StylesheetRegistry {
    pub fn new() -> Self {
        StylesheetRegistry::default()
    }

    /// The stylesheet registered under `name`, created empty on first use.
    pub fn get_or_create(&mut self, name: &str) -> Rc<RefCell<Stylesheet>> {
        let sheet = self.sheets.entry(name.to_string()).or_insert_with(|| {
            debug!("registering stylesheet '{}'", name);
            Rc::new(RefCell::new(Stylesheet::named(name)))
        });
        Rc::clone(sheet)
    }

    pub fn get(&self, name: &str) -> Option<Rc<RefCell<Stylesheet>>> {
        self.sheets.get(name).map(Rc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sheets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::declaration::UnitKind;

    #[test]
    fn test_same_name_shares_state() {
        let mut registry = StylesheetRegistry::new();
        let first = registry.get_or_create("theme");
        let second = registry.get_or_create("theme");
        assert!(Rc::ptr_eq(&first, &second));

        first
            .borrow_mut()
            .create_selector("body", None)
            .unwrap()
            .append_declaration("margin", 0, UnitKind::Pixels)
            .unwrap();
        assert!(second.borrow().contains("body"));
        assert_eq!(second.borrow().name(), Some("theme"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_without_create() {
        let mut registry = StylesheetRegistry::new();
        assert!(registry.get("print").is_none());
        assert!(registry.is_empty());

        registry.get_or_create("screen");
        registry.get_or_create("print");
        assert!(registry.contains("print"));
        assert_eq!(registry.names(), vec!["print", "screen"]);
    }
}
