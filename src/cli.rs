//! Command-line front end.
//!
//! [`run`] takes parsed arguments, a cache and an output stream, so it can
//! also be driven from code for simulation runs.

use crate::config::expand_home;
use crate::constraints::WordMask;
use crate::dictionary::DictionaryCache;
use crate::filter::{get_words, Policy, Restrictions};
use crate::solver::{self, Outcome, Round, Selection, Solver};
use crate::PLACEHOLDER;
use clap::{CommandFactory, FromArgMatches, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::{Path, PathBuf};

const COLOR_GREEN: &str = "\x1b[;42m";
const COLOR_YELLOW: &str = "\x1b[;43m";
const COLOR_RESET: &str = "\x1b[;49m";

/// Filter word choices to aid solving Wordle games.
#[derive(Parser, Debug, Clone)]
#[command(name = "wordle-aid", version, about, args_override_self = true)]
pub struct Args {
    /// Dictionary file of "word frequency" lines, default is the built-in list.
    /// Use multiple times to merge several files.
    #[arg(short, long)]
    pub dictionary: Vec<PathBuf>,

    /// Exclude words with less than this number of unique vowels
    #[arg(short, long)]
    pub vowels: Option<usize>,

    /// Exclude words with non-unique letters
    #[arg(short, long)]
    pub unique: bool,

    /// Filter dictionary to words in given text file. Use multiple times to
    /// specify multiple files.
    #[arg(short, long)]
    pub words_file: Vec<PathBuf>,

    /// Exclude words in given text file. Use multiple times to specify
    /// multiple files.
    #[arg(short, long)]
    pub exclude_words_file: Vec<PathBuf>,

    /// Solve to final given word, starting with earlier given words (if any)
    #[arg(short, long)]
    pub solve: bool,

    /// Choose word for solver at each step randomly from given number (or %)
    /// of top candidates
    #[arg(short, long, default_value = "1")]
    pub random: Selection,

    /// Seed for the solver's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Don't show colors in solver output
    #[arg(short = 'c', long)]
    pub no_colors: bool,

    /// Solve every current candidate as a target and report how many rounds
    /// each took
    #[arg(short, long, conflicts_with = "solve")]
    pub benchmark: bool,

    /// List of attempted words. Upper case letter is right letter but wrong
    /// place. Lower case letter is wrong letter anywhere. Last word is
    /// wildcards for current matches.
    #[arg(required = true)]
    pub words: Vec<String>,
}

impl Args {
    pub fn policy(&self) -> Policy {
        Policy {
            unique: self.unique,
            min_vowels: self.vowels,
            selection: self.random,
        }
    }
}

/// Parse `argv` with the start options in `flags` placed straight after the
/// program name. A later option replaces an earlier single-valued one, so
/// the real arguments win; list options such as `-w` accumulate.
pub fn parse_args<I>(flags: Vec<String>, argv: I, flags_path: Option<&Path>) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = String>,
{
    let mut argv = argv.into_iter();
    let mut full: Vec<String> = argv.next().into_iter().collect();
    full.extend(flags);
    full.extend(argv);

    let mut command = Args::command();
    if let Some(path) = flags_path {
        command = command.after_help(format!(
            "Note you can set default starting options in \"{}\".",
            path.display()
        ));
    }
    let matches = command.try_get_matches_from(full)?;
    Args::from_arg_matches(&matches)
}

/// Run with the given arguments, writing results to `out`.
pub fn run<W: Write>(args: &Args, cache: &mut DictionaryCache, out: &mut W) -> anyhow::Result<()> {
    let dictionary = cache.dictionary(&expand_all(&args.dictionary))?;
    let allow = cache.word_set(&expand_all(&args.words_file))?;
    let deny = cache.word_set(&expand_all(&args.exclude_words_file))?;
    let restrictions = Restrictions::new(allow, deny);
    let policy = args.policy();

    let (wordmask, guesses) = match args.words.split_last() {
        Some(split) => split,
        None => anyhow::bail!("must enter words"),
    };
    let wordmask = wordmask.to_lowercase();

    if args.benchmark {
        let mask = WordMask::parse(&wordmask);
        let targets: Vec<String> = get_words(guesses, &mask, &dictionary, &restrictions, &policy)?
            .into_iter()
            .map(|(word, _)| word)
            .collect();
        let seed = args.seed.unwrap_or_else(rand::random);
        let report = solver::benchmark(&dictionary, &restrictions, &policy, &[] as &[&str], &targets, seed)?;
        for (rounds, count) in &report.distribution {
            writeln!(out, "{:2} rounds: {}", rounds, count)?;
        }
        writeln!(out, "average {:.3} rounds over {} words", report.average_rounds(), report.solved())?;
        if report.unsolved > 0 {
            writeln!(out, "{} words not solved", report.unsolved)?;
        }
        return Ok(());
    }

    if !args.solve {
        let mask = WordMask::parse(&wordmask);
        for (word, freq) in get_words(guesses, &mask, &dictionary, &restrictions, &policy)? {
            writeln!(out, "{} {}", word, freq)?;
        }
        return Ok(());
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut solver = Solver::new(&dictionary, &restrictions, &policy, rng);
    let solution = solver.solve(guesses, &wordmask)?;

    for round in &solution.rounds {
        writeln!(out, "{}", format_round(round, !args.no_colors))?;
    }
    if let Outcome::NoSolution { round } = solution.outcome {
        writeln!(out, "{:2} {} NO SOLUTION", round, solution.target)?;
    }
    Ok(())
}

fn expand_all(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().map(|p| expand_home(p)).collect()
}

/// One solver line: `NN guess [annotated known]`, plus ` SOLVED` at the end.
pub fn format_round(round: &Round, colors: bool) -> String {
    let known = round.known.to_string();
    let annotated = if colors {
        insert_colors(&round.annotated_guess, &known)
    } else {
        round.annotated_guess.clone()
    };
    format!(
        "{:2} {} [{} {}]{}",
        round.index,
        round.guess,
        annotated,
        known,
        if round.solved { " SOLVED" } else { "" }
    )
}

/// Color known positions green and letters present elsewhere yellow.
pub fn insert_colors(guess: &str, known: &str) -> String {
    guess
        .chars()
        .zip(known.chars())
        .map(|(g, k)| {
            if k != PLACEHOLDER {
                format!("{}{}{}", COLOR_GREEN, k, COLOR_RESET)
            } else if g.is_ascii_uppercase() {
                format!("{}{}{}", COLOR_YELLOW, g, COLOR_RESET)
            } else {
                g.to_string()
            }
        })
        .collect()
}
