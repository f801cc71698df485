//! Self-play solver.
//!
//! Plays toward a known target: each round takes the next forced guess or
//! picks one from the current candidates, scores it, and folds the score
//! back into the history and the mask of known letters.

use crate::constraints::{ConstraintSet, WordMask};
use crate::dictionary::Dictionary;
use crate::error::{AidError, Result};
use crate::feedback::Score;
use crate::filter::{filter_candidates, Policy, Restrictions};
use crate::is_valid_letter;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::VecDeque;
use std::str::FromStr;

/// How many top candidates a random pick draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Top {
    Count(usize),
    Percent(usize),
}

/// Rule for choosing the solver's next guess among the candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// Always the most frequent candidate
    #[default]
    Best,
    /// Uniformly among the top candidates
    Random(Top),
}

impl Selection {
    /// Pick from `candidates`, which are in ascending frequency order.
    ///
    /// At least the best candidate is always eligible.
    pub fn pick<'a, R: Rng>(&self, candidates: &'a [(String, u64)], rng: &mut R) -> Option<&'a str> {
        let len = candidates.len();
        if len == 0 {
            return None;
        }
        let n = match *self {
            Selection::Best => 1,
            Selection::Random(Top::Count(n)) => n,
            Selection::Random(Top::Percent(pct)) => len.saturating_mul(pct).saturating_add(50) / 100,
        };
        let n = rng.gen_range(1..=n.max(1).min(len));
        Some(candidates[len - n].0.as_str())
    }
}

impl FromStr for Selection {
    type Err = AidError;

    /// Parse `best`, a count such as `5`, or a percentage such as `10%`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AidError::InvalidSelection(s.to_string());
        if s.eq_ignore_ascii_case("best") {
            return Ok(Selection::Best);
        }
        let top = match s.strip_suffix('%') {
            Some(pct) => Top::Percent(pct.parse().map_err(|_| invalid())?),
            None => Top::Count(s.parse().map_err(|_| invalid())?),
        };
        Ok(match top {
            Top::Count(1) => Selection::Best,
            top => Selection::Random(top),
        })
    }
}

/// One played round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// 1-based round number
    pub index: usize,
    pub guess: String,
    /// The guess with letters present elsewhere in uppercase
    pub annotated_guess: String,
    pub score: Score,
    /// Letters known at each position after this round
    pub known: WordMask,
    pub solved: bool,
}

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved { rounds: usize },
    /// No forced guesses were left and no candidate matched, at this round.
    NoSolution { round: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub target: String,
    pub rounds: Vec<Round>,
    pub outcome: Outcome,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved { .. })
    }
}

/// Plays games against a dictionary with a fixed policy.
pub struct Solver<'a, R> {
    dictionary: &'a Dictionary,
    restrictions: &'a Restrictions,
    policy: &'a Policy,
    rng: R,
}

impl<'a, R: Rng> Solver<'a, R> {
    pub fn new(
        dictionary: &'a Dictionary,
        restrictions: &'a Restrictions,
        policy: &'a Policy,
        rng: R,
    ) -> Self {
        Self {
            dictionary,
            restrictions,
            policy,
            rng,
        }
    }

    /// Play toward `target`, starting with the `forced` guesses in order.
    pub fn solve<S: AsRef<str>>(&mut self, forced: &[S], target: &str) -> Result<Solution> {
        let target = target.to_lowercase();
        let len = target.chars().count();
        if let Some(ch) = target
            .chars()
            .find(|&c| !c.is_ascii() || !is_valid_letter(c as u8))
        {
            return Err(AidError::InvalidCharacter { word: target, ch });
        }

        let mut forced: VecDeque<String> = forced.iter().map(|g| g.as_ref().to_lowercase()).collect();
        let mut history: Vec<String> = Vec::new();
        let mut known = WordMask::blank(len);
        let mut rounds = Vec::new();

        for index in 1.. {
            let guess = match forced.pop_front() {
                Some(guess) => {
                    check_word(&guess, len)?;
                    guess
                }
                None => {
                    let constraints = ConstraintSet::build(&history, &known)?;
                    let candidates = filter_candidates(
                        &constraints,
                        self.dictionary.of_length(len),
                        self.restrictions,
                        self.policy,
                    );
                    match self.policy.selection.pick(&candidates, &mut self.rng) {
                        Some(guess) => guess.to_string(),
                        None => {
                            debug!("{}: no candidates at round {}", target, index);
                            return Ok(Solution {
                                target,
                                rounds,
                                outcome: Outcome::NoSolution { round: index },
                            });
                        }
                    }
                }
            };

            let score = Score::calculate(&guess, &target);
            for (pos, c) in score.correct_letters().enumerate() {
                if let Some(c) = c {
                    known.set(pos, c);
                }
            }
            let annotated_guess = score.annotated_guess();
            let solved = guess == target;
            debug!("{}: round {} guess {} scored {}", target, index, guess, score);

            rounds.push(Round {
                index,
                guess,
                annotated_guess: annotated_guess.clone(),
                score,
                known: known.clone(),
                solved,
            });

            if solved {
                break;
            }
            history.push(annotated_guess);
        }

        Ok(Solution {
            target,
            outcome: Outcome::Solved {
                rounds: rounds.len(),
            },
            rounds,
        })
    }
}

fn check_word(word: &str, len: usize) -> Result<()> {
    if word.chars().count() != len {
        return Err(AidError::LengthMismatch {
            word: word.to_string(),
            expected: len,
        });
    }
    if let Some(ch) = word.chars().find(|&c| !c.is_ascii() || !is_valid_letter(c as u8)) {
        return Err(AidError::InvalidCharacter {
            word: word.to_string(),
            ch,
        });
    }
    Ok(())
}

/// Rounds needed across many targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Benchmark {
    /// (rounds, number of targets solved in that many rounds)
    pub distribution: Vec<(usize, usize)>,
    pub unsolved: usize,
}

impl Benchmark {
    pub fn solved(&self) -> usize {
        self.distribution.iter().map(|(_, c)| c).sum()
    }

    pub fn average_rounds(&self) -> f64 {
        let solved = self.solved();
        if solved == 0 {
            return 0.0;
        }
        let total: usize = self.distribution.iter().map(|(r, c)| r * c).sum();
        total as f64 / solved as f64
    }
}

/// Solve every target in parallel, each with an RNG seeded from `seed` and
/// its index so results are reproducible.
pub fn benchmark<S: AsRef<str> + Sync>(
    dictionary: &Dictionary,
    restrictions: &Restrictions,
    policy: &Policy,
    forced: &[S],
    targets: &[String],
    seed: u64,
) -> Result<Benchmark> {
    let outcomes: Vec<Outcome> = targets
        .par_iter()
        .enumerate()
        .map(|(i, target)| {
            let rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let mut solver = Solver::new(dictionary, restrictions, policy, rng);
            solver.solve(forced, target).map(|s| s.outcome)
        })
        .collect::<Result<_>>()?;

    let mut counts: Vec<usize> = Vec::new();
    let mut unsolved = 0;
    for outcome in outcomes {
        match outcome {
            Outcome::Solved { rounds } => {
                if counts.len() <= rounds {
                    counts.resize(rounds + 1, 0);
                }
                counts[rounds] += 1;
            }
            Outcome::NoSolution { .. } => unsolved += 1,
        }
    }

    Ok(Benchmark {
        distribution: counts
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect(),
        unsolved,
    })
}
