//! Playset tree: sections of categories of selectable items.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;
use std::ops::Index;
use thiserror::Error;

/// Name of the reserved section that supplies relationship labels.
pub const RELATIONSHIPS: &str = "relationships";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("cannot draw from '{group}': it has no items")]
    Empty { group: String },
    #[error("playset has no sections to draw details from")]
    NoDetailSections,
    #[error("unknown section '{0}'")]
    UnknownSection(String),
}

/// Anything a single text item can be drawn from uniformly at random.
pub trait RandomDrawable {
    fn random_item(&self, rng: &mut StdRng) -> Result<&str, SelectionError>;
}

/// Children kept in declaration order with a lower-cased lookup index.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Keyed<T> {
    entries: Vec<T>,
    index: FxHashMap<String, usize>,
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T> Keyed<T> {
    /// Insert under `key`. An existing key is replaced in place so the
    /// original declaration position is kept.
    fn insert(&mut self, key: String, value: T) -> &mut T {
        let existing = self.index.get(&key).copied();
        let slot = match existing {
            Some(slot) => {
                self.entries[slot] = value;
                slot
            }
            None => {
                self.entries.push(value);
                let slot = self.entries.len() - 1;
                self.index.insert(key, slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.index
            .get(&key.trim().to_lowercase())
            .map(|&slot| &self.entries[slot])
    }

    fn get_mut_at(&mut self, slot: usize) -> Option<&mut T> {
        self.entries.get_mut(slot)
    }

    fn slot_of(&self, key: &str) -> Option<usize> {
        self.index.get(&key.trim().to_lowercase()).copied()
    }
}

/// A named list of selectable text items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub items: Vec<String>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: impl Into<String>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl RandomDrawable for Category {
    fn random_item(&self, rng: &mut StdRng) -> Result<&str, SelectionError> {
        self.items
            .choose(rng)
            .map(String::as_str)
            .ok_or_else(|| SelectionError::Empty {
                group: self.name.clone(),
            })
    }
}

/// A named group of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    categories: Keyed<Category>,
}

impl Section {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            categories: Keyed::default(),
        }
    }

    /// Declare a category. Re-declaring a name starts it over empty.
    pub fn new_category(&mut self, name: &str) -> &mut Category {
        let category = Category::new(name);
        self.categories.insert(category.name.clone(), category)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.entries.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories().map(|c| c.items.len()).sum()
    }

    pub(crate) fn category_at_mut(&mut self, slot: usize) -> Option<&mut Category> {
        self.categories.get_mut_at(slot)
    }

    pub(crate) fn category_slot(&self, name: &str) -> Option<usize> {
        self.categories.slot_of(name)
    }
}

impl RandomDrawable for Section {
    /// Picks a category uniformly among those holding items, then an item
    /// uniformly within it.
    fn random_item(&self, rng: &mut StdRng) -> Result<&str, SelectionError> {
        let stocked: Vec<&Category> = self.categories().filter(|c| !c.is_empty()).collect();
        match stocked.choose(rng).copied() {
            Some(category) => category.random_item(rng),
            None => Err(SelectionError::Empty {
                group: self.name.clone(),
            }),
        }
    }
}

impl Index<&str> for Section {
    type Output = Category;

    fn index(&self, name: &str) -> &Category {
        match self.category(name) {
            Some(category) => category,
            None => panic!("no category '{}' in section '{}'", name, self.name),
        }
    }
}

/// The full tree loaded from one playset document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playset {
    /// Display name, casing kept as written.
    pub name: String,
    sections: Keyed<Section>,
}

impl Playset {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            sections: Keyed::default(),
        }
    }

    /// Declare a section. Re-declaring a name starts it over empty.
    pub fn new_section(&mut self, name: &str) -> &mut Section {
        let section = Section::new(name);
        self.sections.insert(section.name.clone(), section)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        let slot = self.sections.slot_of(name)?;
        self.sections.get_mut_at(slot)
    }

    /// Sections in declaration order, the reserved one included.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.entries.iter()
    }

    /// Names of every section except the reserved relationships section.
    pub fn detail_section_names(&self) -> Vec<&str> {
        self.sections()
            .filter(|s| !is_relationships(&s.name))
            .map(|s| s.name.as_str())
            .collect()
    }

    /// The reserved section supplying relationship labels.
    pub fn relationships(&self) -> Result<&Section, SelectionError> {
        self.section(RELATIONSHIPS)
            .ok_or_else(|| SelectionError::UnknownSection(RELATIONSHIPS.to_string()))
    }

    /// Draw one item from the named section.
    pub fn random_item_from(
        &self,
        section: &str,
        rng: &mut StdRng,
    ) -> Result<&str, SelectionError> {
        self.section(section)
            .ok_or_else(|| SelectionError::UnknownSection(section.to_lowercase()))?
            .random_item(rng)
    }

    pub fn len(&self) -> usize {
        self.sections.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.entries.is_empty()
    }

    pub(crate) fn section_at_mut(&mut self, slot: usize) -> Option<&mut Section> {
        self.sections.get_mut_at(slot)
    }

    pub(crate) fn section_slot(&self, name: &str) -> Option<usize> {
        self.sections.slot_of(name)
    }
}

impl Index<&str> for Playset {
    type Output = Section;

    fn index(&self, name: &str) -> &Section {
        match self.section(name) {
            Some(section) => section,
            None => panic!("no section '{}' in playset '{}'", name, self.name),
        }
    }
}

/// Whether `name` is the reserved relationships section, ignoring case.
pub fn is_relationships(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(RELATIONSHIPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn mock() -> Playset {
        let mut p = Playset::new("foo");
        p.new_section("Relationships")
            .new_category("family")
            .add_item("Parent / Child")
            .add_item("Cousins");
        p.new_section("Test1")
            .new_category("foo")
            .add_item("ABC")
            .add_item("DEF");
        p.new_section("Test2")
            .new_category("bar")
            .add_item("BCD")
            .add_item("EFG");
        p
    }

    #[test]
    fn lookups_ignore_case() {
        let mut p = Playset::new("test");
        p.new_section("Relationships")
            .new_category("Family")
            .add_item("Cousins")
            .add_item("Spouses");
        assert_eq!(p["Relationships"]["Family"].items, vec!["Cousins", "Spouses"]);
        assert_eq!(p["RELATIONSHIPS"]["family"].items.len(), 2);
        assert_eq!(p["relationships"].name, "relationships");
    }

    #[test]
    fn playset_name_keeps_case() {
        let p = Playset::new("  Lakeside Motel ");
        assert_eq!(p.name, "Lakeside Motel");
    }

    #[test]
    fn sections_iterate_in_declaration_order() {
        let p = mock();
        let names: Vec<&str> = p.sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["relationships", "test1", "test2"]);
        assert_eq!(p.detail_section_names(), vec!["test1", "test2"]);
    }

    #[test]
    fn redeclared_section_keeps_position_and_starts_empty() {
        let mut p = mock();
        p.new_section("TEST1");
        let names: Vec<&str> = p.sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["relationships", "test1", "test2"]);
        assert!(p["test1"].is_empty());
    }

    #[test]
    fn category_draw_comes_from_items() {
        let p = mock();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let item = p["test1"]["foo"].random_item(&mut rng).unwrap();
            assert!(item == "ABC" || item == "DEF");
        }
    }

    #[test]
    fn empty_category_draw_fails() {
        let c = Category::new("Nothing");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            c.random_item(&mut rng),
            Err(SelectionError::Empty {
                group: "nothing".to_string()
            })
        );
    }

    #[test]
    fn section_draw_skips_empty_categories() {
        let mut s = Section::new("Needs");
        s.new_category("hollow");
        s.new_category("full").add_item("To get out");
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(s.random_item(&mut rng).unwrap(), "To get out");
        }
    }

    #[test]
    fn section_draw_visits_every_category() {
        let mut s = Section::new("Objects");
        s.new_category("a").add_item("knife");
        s.new_category("b").add_item("deed");
        let mut rng = StdRng::seed_from_u64(11);
        let drawn: Vec<&str> = (0..50).map(|_| s.random_item(&mut rng).unwrap()).collect();
        assert!(drawn.contains(&"knife"));
        assert!(drawn.contains(&"deed"));
    }

    #[test]
    fn section_without_items_fails() {
        let mut s = Section::new("Locations");
        s.new_category("empty");
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            s.random_item(&mut rng),
            Err(SelectionError::Empty { group }) if group == "locations"
        ));
    }

    #[test]
    fn missing_section_lookups() {
        let p = Playset::new("bare");
        assert_eq!(
            p.relationships(),
            Err(SelectionError::UnknownSection("relationships".to_string()))
        );
        let mut rng = StdRng::seed_from_u64(3);
        assert!(p.random_item_from("Needs", &mut rng).is_err());
    }

    #[test]
    fn reserved_name_matches_any_case() {
        assert!(is_relationships("RELATIONSHIPS"));
        assert!(is_relationships(" Relationships "));
        assert!(!is_relationships("relationship"));
    }
}
