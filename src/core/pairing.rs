//! Pairing strategies: who at the table gets a connection with whom.
//!
//! Each strategy yields a single-use `Pairings` sequence driven by an explicit
//! `next_pair` step and an `is_done` check.

use rand::rngs::StdRng;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("coverage exhausted for {participants} participants after {attempts} rejected draws")]
    CoverageExhausted { participants: usize, attempts: usize },
}

/// Appearances every participant needs before random coverage stops.
pub const MIN_APPEARANCES: u32 = 2;
/// Rejected draws allowed while looking for one fresh pair.
pub const MAX_DRAW_ATTEMPTS: usize = 100_000;
/// Rejected draws after which a stall is logged.
const STALL_WARNING: usize = 1_000;

/// Which topology connects the participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PairingStrategy {
    /// Everyone paired with the next person around the table.
    #[default]
    Ring,
    /// Every unordered pair exactly once.
    AllCombinations,
    /// Random distinct pairs until everyone appears at least twice.
    RandomCoverage,
}

impl PairingStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ring => "ring",
            Self::AllCombinations => "all-combinations",
            Self::RandomCoverage => "random-coverage",
        }
    }

    /// Start a pairing sequence over `participants`.
    pub fn pairings(self, participants: &[String]) -> Result<Pairings, PairingError> {
        let n = participants.len();
        let state = match self {
            Self::Ring => PairingState::Ring { next: 0 },
            Self::AllCombinations => PairingState::AllCombinations { i: 0, j: 1 },
            Self::RandomCoverage => {
                // With fewer than three people nobody can reach two distinct pairs.
                if n < 3 {
                    return Err(PairingError::CoverageExhausted {
                        participants: n,
                        attempts: 0,
                    });
                }
                PairingState::RandomCoverage(Coverage::new(n))
            }
        };
        Ok(Pairings {
            participants: participants.to_vec(),
            state,
        })
    }
}

/// Every `(i, j)` with `i < j`, outer index ascending, inner ascending.
pub fn combinations(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// A single-use sequence of participant pairs.
#[derive(Debug, Clone)]
pub struct Pairings {
    participants: Vec<String>,
    state: PairingState,
}

#[derive(Debug, Clone)]
enum PairingState {
    Ring { next: usize },
    AllCombinations { i: usize, j: usize },
    RandomCoverage(Coverage),
}

impl Pairings {
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn is_done(&self) -> bool {
        let n = self.participants.len();
        match &self.state {
            PairingState::Ring { next } => *next >= n,
            PairingState::AllCombinations { j, .. } => *j >= n,
            PairingState::RandomCoverage(coverage) => coverage.is_done(),
        }
    }

    /// Produce the next pair, or `None` once the sequence has ended.
    pub fn next_pair(&mut self, rng: &mut StdRng) -> Result<Option<(String, String)>, PairingError> {
        if self.is_done() {
            return Ok(None);
        }
        let n = self.participants.len();
        let (a, b) = match &mut self.state {
            PairingState::Ring { next } => {
                let k = *next;
                *next += 1;
                ((k + n - 1) % n, k)
            }
            PairingState::AllCombinations { i, j } => {
                let pair = (*i, *j);
                *j += 1;
                if *j >= n {
                    *i += 1;
                    *j = *i + 1;
                }
                pair
            }
            PairingState::RandomCoverage(coverage) => coverage.draw(rng)?,
        };
        Ok(Some((
            self.participants[a].clone(),
            self.participants[b].clone(),
        )))
    }

    /// Drain the sequence.
    pub fn collect_pairs(mut self, rng: &mut StdRng) -> Result<Vec<(String, String)>, PairingError> {
        let mut pairs = Vec::new();
        while let Some(pair) = self.next_pair(rng)? {
            pairs.push(pair);
        }
        Ok(pairs)
    }
}

/// Random-coverage bookkeeping over participant indices.
#[derive(Debug, Clone)]
struct Coverage {
    combinations: Vec<(usize, usize)>,
    /// Per participant: indices into `combinations` containing them.
    candidates: Vec<Vec<usize>>,
    counts: Vec<u32>,
    emitted: FxHashSet<usize>,
}

impl Coverage {
    fn new(n: usize) -> Self {
        let combinations = combinations(n);
        let mut candidates = vec![Vec::new(); n];
        for (idx, &(a, b)) in combinations.iter().enumerate() {
            candidates[a].push(idx);
            candidates[b].push(idx);
        }
        Self {
            combinations,
            candidates,
            counts: vec![0; n],
            emitted: FxHashSet::default(),
        }
    }

    fn is_done(&self) -> bool {
        self.counts.iter().all(|&c| c >= MIN_APPEARANCES)
    }

    /// Uniform participant, then uniform pair among theirs; repeats are redrawn.
    fn draw(&mut self, rng: &mut StdRng) -> Result<(usize, usize), PairingError> {
        let n = self.counts.len();
        for attempt in 0..MAX_DRAW_ATTEMPTS {
            let who = rng.gen_range(0..n);
            let pool = &self.candidates[who];
            let combo = pool[rng.gen_range(0..pool.len())];
            if self.emitted.insert(combo) {
                let (a, b) = self.combinations[combo];
                self.counts[a] += 1;
                self.counts[b] += 1;
                return Ok((a, b));
            }
            if attempt == STALL_WARNING {
                warn!(
                    participants = n,
                    emitted = self.emitted.len(),
                    "random coverage is rejecting many draws"
                );
            }
        }
        Err(PairingError::CoverageExhausted {
            participants: n,
            attempts: MAX_DRAW_ATTEMPTS,
        })
    }
}
