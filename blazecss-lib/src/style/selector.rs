// src/style/selector.rs
use crate::error::Result;
use crate::ident;
use crate::style::declaration::{Declaration, DeclarationInit, DeclarationList, UnitKind, Value};

/// How [`crate::Stylesheet::merge_selector`] treats an entry that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Append the incoming declarations whose content is not present yet.
    #[default]
    Merge,
    /// Throw away the existing declarations and take the incoming ones.
    Replace,
}

/// A named rule, e.g. `h1`, `.card` or `#header`, with its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorEntry {
    id: String,
    name: String,
    class_name: Option<String>,
    identifier_name: Option<String>,
    /// The caller chose the id; it is never rewritten on a clash.
    explicit_id: bool,
    declarations: DeclarationList,
}

impl SelectorEntry {
    /// A detached entry, id derived from the name unless one is given.
    /// An empty id counts as not given.
    ///
    /// Entries only get an owner through
    /// [`crate::Stylesheet::create_selector`] or
    /// [`crate::Stylesheet::merge_selector`].
    pub fn new(name: impl Into<String>, id: Option<&str>) -> Self {
        let name = name.into();
        let explicit_id = id.is_some_and(|id| !id.is_empty());
        let id = match id {
            Some(id) if explicit_id => id.to_string(),
            _ => ident::selector_id(&name),
        };
        let class_name = name.strip_prefix('.').map(str::to_string);
        let identifier_name = name.strip_prefix('#').map(str::to_string);
        SelectorEntry {
            id,
            name,
            class_name,
            identifier_name,
            explicit_id,
            declarations: DeclarationList::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Some("card")` for `.card`.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// `Some("header")` for `#header`.
    pub fn identifier_name(&self) -> Option<&str> {
        self.identifier_name.as_deref()
    }

    pub fn has_explicit_id(&self) -> bool {
        self.explicit_id
    }

    /// Moves a derived id aside when another selector already holds it.
    pub(crate) fn rederive_id(&mut self, attempt: u32) {
        self.id = ident::salted_selector_id(&self.name, attempt);
    }

    pub fn declarations(&self) -> &DeclarationList {
        &self.declarations
    }

    pub fn append(&mut self, init: impl Into<DeclarationInit>) -> Result<&Declaration> {
        self.declarations.append(init)
    }

    pub fn append_declaration(
        &mut self,
        property: impl Into<String>,
        value: impl Into<Value>,
        unit: UnitKind,
    ) -> Result<&Declaration> {
        self.declarations.append_declaration(property, value, unit)
    }

    pub fn append_important(
        &mut self,
        property: impl Into<String>,
        value: impl Into<Value>,
        unit: UnitKind,
    ) -> Result<&Declaration> {
        self.declarations.append_important(property, value, unit)
    }

    /// Appends each item in order. A failure partway leaves the earlier
    /// items in place; see [`DeclarationList::append_declarations`].
    pub fn append_declarations<I, D>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = D>,
        D: Into<DeclarationInit>,
    {
        self.declarations.append_declarations(items)
    }

    pub fn get_declaration(&self, property: &str) -> Option<&Declaration> {
        self.declarations.get_declaration(property)
    }

    /// Drops all declarations. The entry itself stays in its stylesheet.
    pub fn clear(&mut self) {
        self.declarations.clear();
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Folds `other`'s declarations into this entry. Returns the number of
    /// incoming declarations dropped as duplicates (always 0 for `Replace`).
    pub(crate) fn absorb(&mut self, other: SelectorEntry, mode: MergeMode) -> usize {
        match mode {
            MergeMode::Merge => self.declarations.merge_unique(&other.declarations),
            MergeMode::Replace => {
                self.declarations = other.declarations;
                0
            }
        }
    }
}
