//! Section choice: which detail section feeds each connection in turn.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::schema::playset::{Playset, SelectionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SectionChoice {
    /// Detail sections in playset order, wrapping forever.
    #[default]
    RoundRobin,
    /// A uniformly random detail section each time.
    Random,
}

impl SectionChoice {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round-robin",
            Self::Random => "random",
        }
    }

    /// Snapshot the playset's detail sections. Fails when there are none,
    /// since the cycle could never yield.
    pub fn cycle(self, playset: &Playset) -> Result<SectionCycle, SelectionError> {
        let sections: Vec<String> = playset
            .detail_section_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        if sections.is_empty() {
            return Err(SelectionError::NoDetailSections);
        }
        Ok(SectionCycle {
            choice: self,
            sections,
            cursor: 0,
        })
    }
}

/// Unbounded source of detail section names.
#[derive(Debug, Clone)]
pub struct SectionCycle {
    choice: SectionChoice,
    sections: Vec<String>,
    cursor: usize,
}

impl SectionCycle {
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Next section name. Round robin never touches `rng`.
    pub fn next_section(&mut self, rng: &mut StdRng) -> &str {
        let idx = match self.choice {
            SectionChoice::RoundRobin => {
                let idx = self.cursor;
                self.cursor = (self.cursor + 1) % self.sections.len();
                idx
            }
            SectionChoice::Random => rng.gen_range(0..self.sections.len()),
        };
        &self.sections[idx]
    }
}
