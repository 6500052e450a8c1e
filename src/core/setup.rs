//! Setup generator: pairing strategy + section choice + random draws → connections.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::GeneratorConfig;
use crate::core::pairing::{PairingError, PairingStrategy};
use crate::core::section_choice::SectionChoice;
use crate::schema::connection::Connection;
use crate::schema::playset::{Playset, RandomDrawable, SelectionError};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("pairing error: {0}")]
    Pairing(#[from] PairingError),
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),
}

/// The setup for one table: a playset, the people at it, and how they get
/// connected.
#[derive(Debug, Clone)]
pub struct Setup<'a> {
    playset: &'a Playset,
    participants: Vec<String>,
    pairing: PairingStrategy,
    section_choice: SectionChoice,
    seed: Option<u64>,
}

impl<'a> Setup<'a> {
    /// Ring pairing and round-robin sections unless told otherwise.
    pub fn new<S: AsRef<str>>(playset: &'a Playset, participants: &[S]) -> Self {
        Self {
            playset,
            participants: participants.iter().map(|p| p.as_ref().to_string()).collect(),
            pairing: PairingStrategy::default(),
            section_choice: SectionChoice::default(),
            seed: None,
        }
    }

    pub fn pairing(mut self, pairing: PairingStrategy) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn section_choice(mut self, section_choice: SectionChoice) -> Self {
        self.section_choice = section_choice;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_config(mut self, config: &GeneratorConfig) -> Self {
        self.pairing = config.pairing;
        self.section_choice = config.section_choice;
        if let Some(seed) = config.seed {
            self.seed = Some(seed);
        }
        self
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Generate the connections, one per pair, in pairing order.
    ///
    /// Strategies are instantiated fresh on every call; with a fixed seed,
    /// repeated calls return identical tables.
    pub fn build(&self) -> Result<Vec<Connection>, SetupError> {
        let relationships = self.playset.relationships()?;
        let mut pairings = self.pairing.pairings(&self.participants)?;
        let mut sections = self.section_choice.cycle(self.playset)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut table = Vec::new();
        while let Some((left, right)) = pairings.next_pair(&mut rng)? {
            let section = sections.next_section(&mut rng).to_string();
            let relationship = relationships.random_item(&mut rng)?.to_string();
            let detail = self.playset.random_item_from(&section, &mut rng)?.to_string();
            debug!(%left, %right, %relationship, %section, %detail, "connection drawn");
            table.push(Connection {
                left,
                right,
                relationship,
                detail,
                detail_section: section,
            });
        }

        info!(
            playset = %self.playset.name,
            participants = self.participants.len(),
            connections = table.len(),
            pairing = self.pairing.name(),
            sections = self.section_choice.name(),
            "setup built"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock() -> Playset {
        let mut p = Playset::new("foo");
        p.new_section("Relationships")
            .new_category("family")
            .add_item("Parent / Child")
            .add_item("Cousins");
        p.section_mut("relationships")
            .unwrap()
            .new_category("work")
            .add_item("Co-workers")
            .add_item("boss / employee");
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
    fn ring_setup_follows_table_order() {
        let playset = mock();
        let table = Setup::new(&playset, &["Joebob", "Jimbob", "Sallybob"])
            .seed(42)
            .build()
            .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].left, "Sallybob");
        assert_eq!(table[0].right, "Joebob");
        assert_eq!(table[1].left, "Joebob");
        assert_eq!(table[1].right, "Jimbob");
        assert_eq!(table[2].left, "Jimbob");
        assert_eq!(table[2].right, "Sallybob");
    }

    #[test]
    fn relationships_come_from_every_category() {
        let playset = mock();
        let labels = ["Parent / Child", "Cousins", "Co-workers", "boss / employee"];
        let mut seen = Vec::new();
        for seed in 0..20 {
            let table = Setup::new(&playset, &["a", "b", "c"]).seed(seed).build().unwrap();
            for c in table {
                assert!(labels.contains(&c.relationship.as_str()));
                seen.push(c.relationship);
            }
        }
        assert!(seen.iter().any(|r| r == "Cousins" || r == "Parent / Child"));
        assert!(seen.iter().any(|r| r == "Co-workers" || r == "boss / employee"));
    }

    #[test]
    fn details_cycle_through_sections() {
        let playset = mock();
        let table = Setup::new(&playset, &["a", "b", "c", "d", "e"])
            .seed(3)
            .build()
            .unwrap();
        let sections: Vec<&str> = table.iter().map(|c| c.detail_section.as_str()).collect();
        assert_eq!(sections, vec!["test1", "test2", "test1", "test2", "test1"]);
        for c in &table {
            let expected = &playset[c.detail_section.as_str()];
            assert!(expected.categories().any(|cat| cat.items.contains(&c.detail)));
        }
    }

    #[test]
    fn same_seed_same_table() {
        let playset = mock();
        let setup = Setup::new(&playset, &["a", "b", "c", "d"])
            .pairing(PairingStrategy::RandomCoverage)
            .seed(77);
        assert_eq!(setup.build().unwrap(), setup.build().unwrap());
    }

    #[test]
    fn all_combinations_count() {
        let playset = mock();
        let table = Setup::new(&playset, &["a", "b", "c", "d"])
            .pairing(PairingStrategy::AllCombinations)
            .seed(0)
            .build()
            .unwrap();
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn config_applies() {
        let playset = mock();
        let config = GeneratorConfig {
            pairing: PairingStrategy::AllCombinations,
            section_choice: SectionChoice::Random,
            seed: Some(5),
        };
        let setup = Setup::new(&playset, &["a", "b", "c"]).with_config(&config);
        assert_eq!(setup.pairing, PairingStrategy::AllCombinations);
        assert_eq!(setup.section_choice, SectionChoice::Random);
        assert_eq!(setup.seed, Some(5));
    }

    #[test]
    fn missing_relationships_section_fails() {
        let mut playset = Playset::new("no ties");
        playset.new_section("Needs").new_category("x").add_item("y");
        let err = Setup::new(&playset, &["a", "b"]).seed(0).build().unwrap_err();
        assert!(matches!(
            err,
            SetupError::Selection(SelectionError::UnknownSection(_))
        ));
    }

    #[test]
    fn empty_relationships_section_fails() {
        let mut playset = Playset::new("hollow");
        playset.new_section("Relationships").new_category("family");
        playset.new_section("Needs").new_category("x").add_item("y");
        let err = Setup::new(&playset, &["a", "b"]).seed(0).build().unwrap_err();
        assert!(matches!(
            err,
            SetupError::Selection(SelectionError::Empty { .. })
        ));
    }

    #[test]
    fn coverage_with_two_participants_fails() {
        let playset = mock();
        let err = Setup::new(&playset, &["a", "b"])
            .pairing(PairingStrategy::RandomCoverage)
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::Pairing(_)));
    }

    #[test]
    fn no_participants_no_connections() {
        let playset = mock();
        let empty: [&str; 0] = [];
        assert!(Setup::new(&playset, &empty).seed(0).build().unwrap().is_empty());
    }
}
