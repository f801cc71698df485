use clap::Parser;
use std::fs;
use std::sync::Arc;
use wordle_aid::cli::{format_round, parse_args, run, Args};
use wordle_aid::solver::Top;
use wordle_aid::{config, Dictionary, DictionaryCache, Policy, Restrictions, Selection, Solver};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run_to_string(argv: &[&str]) -> String {
    let args = Args::try_parse_from(argv).unwrap();
    let mut cache = DictionaryCache::new();
    let mut out = Vec::new();
    run(&args, &mut cache, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("wordle-aid-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_aid_lists_candidates_with_frequencies() {
    let dict = write_temp("aid-dict.txt", "crane, 10\nslate 20\ntrace,5\nnot a line\nfuzzy 3\n");
    let output = run_to_string(&["wordle-aid", "-d", dict.to_str().unwrap(), "....e"]);
    assert_eq!(output, "trace 5\ncrane 10\nslate 20\n");
}

#[test]
fn test_aid_with_guesses_and_deny_list() {
    let dict = write_temp("deny-dict.txt", "crane 10\ncrate 15\ngrade 12\nslate 20\n");
    let deny = write_temp("deny.txt", "grade  zebra\ncrate\n");
    let output = run_to_string(&[
        "wordle-aid",
        "-d",
        dict.to_str().unwrap(),
        "-e",
        deny.to_str().unwrap(),
        "slate",
        "..a.e",
    ]);
    assert_eq!(output, "crane 10\n");
}

#[test]
fn test_aid_with_allow_lists() {
    let dict = write_temp("allow-dict.txt", "crane 10\nslate 20\ntrace 5\n");
    let allow = write_temp("allow.txt", "Crane trace\nzebra\n");
    let output = run_to_string(&[
        "wordle-aid",
        "-d",
        dict.to_str().unwrap(),
        "-w",
        allow.to_str().unwrap(),
        ".....",
    ]);
    assert_eq!(output, "trace 5\ncrane 10\n");

    let more = write_temp("allow-more.txt", "slate\n");
    let output = run_to_string(&[
        "wordle-aid",
        "-d",
        dict.to_str().unwrap(),
        "-w",
        allow.to_str().unwrap(),
        "-w",
        more.to_str().unwrap(),
        ".....",
    ]);
    assert_eq!(output, "trace 5\ncrane 10\nslate 20\n");
}

#[test]
fn test_restrictions_share_cached_word_sets() {
    let allow = write_temp("shared-allow.txt", "crane trace\n");
    let paths = vec![allow];
    let mut cache = DictionaryCache::new();
    let words = cache.word_set(&paths).unwrap();
    let restrictions = Restrictions::new(Arc::clone(&words), cache.word_set(&[]).unwrap());

    assert!(Arc::ptr_eq(&restrictions.allow, &words));
    assert!(Arc::ptr_eq(&restrictions.allow, &cache.word_set(&paths).unwrap()));
    assert!(restrictions.permits("crane"));
    assert!(!restrictions.permits("slate"));
}

#[test]
fn test_start_options_come_first() {
    let args = parse_args(
        ["-u", "-r", "5", "--seed", "1"].map(String::from).to_vec(),
        ["wordle-aid", "-r", "10%", "....."].map(String::from),
        None,
    )
    .unwrap();
    assert!(args.unique);
    assert_eq!(args.random, Selection::Random(Top::Percent(10)));
    assert_eq!(args.seed, Some(1));
    assert_eq!(args.words, vec!["....."]);

    let args = parse_args(Vec::new(), ["wordle-aid", "-u", "-u", "....."].map(String::from), None).unwrap();
    assert!(args.unique);
}

#[test]
fn test_start_options_file_drives_run() {
    let dict = write_temp("flags-dict.txt", "crane 10\nslate 20\ntrace 5\n");
    let allow = write_temp("flags allow.txt", "crane trace\n");
    let flags_file = write_temp(
        "flags.conf",
        &format!(
            "# defaults\n-d \"{}\"\n-w \"{}\"  # quoted, has a space\n",
            dict.display(),
            allow.display()
        ),
    );

    let flags = config::read_flags(&flags_file).unwrap();
    let args = parse_args(flags, ["wordle-aid", "....e"].map(String::from), Some(&flags_file)).unwrap();
    assert_eq!(args.words_file, vec![allow]);

    let mut cache = DictionaryCache::new();
    let mut out = Vec::new();
    run(&args, &mut cache, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "trace 5\ncrane 10\n");
}

#[test]
fn test_solve_output() {
    let dict = write_temp("solve-dict.txt", "crane 10\nslate 20\ntrace 5\n");
    let output = run_to_string(&[
        "wordle-aid",
        "-d",
        dict.to_str().unwrap(),
        "-s",
        "-c",
        "--seed",
        "3",
        "slate",
        "crane",
    ]);
    assert_eq!(output, " 1 slate [slate ..a.e]\n 2 crane [crane crane] SOLVED\n");
}

#[test]
fn test_solve_reports_no_solution() {
    let dict = write_temp("nosol-dict.txt", "crane 10\nslate 20\n");
    let output = run_to_string(&["wordle-aid", "-d", dict.to_str().unwrap(), "-s", "-c", "fuzzy"]);
    assert_eq!(output, " 1 slate [slate .....]\n 2 fuzzy NO SOLUTION\n");
}

#[test]
fn test_solve_rejects_invalid_target() {
    let args = Args::try_parse_from(["wordle-aid", "-s", "cr.ne"]).unwrap();
    let mut cache = DictionaryCache::new();
    let mut out = Vec::new();
    assert!(run(&args, &mut cache, &mut out).is_err());
}

#[test]
fn test_missing_dictionary_file_is_an_error() {
    let args = Args::try_parse_from(["wordle-aid", "-d", "/nonexistent/dict.txt", "....."]).unwrap();
    let mut cache = DictionaryCache::new();
    let mut out = Vec::new();
    assert!(run(&args, &mut cache, &mut out).is_err());
}

#[test]
fn test_benchmark_output() {
    let dict = write_temp("bench-dict.txt", "crane 10\nslate 20\ntrace 5\n");
    let output = run_to_string(&["wordle-aid", "-d", dict.to_str().unwrap(), "-b", "--seed", "9", "....."]);
    assert!(output.contains(" 1 rounds: 1"));
    assert!(output.contains("over 3 words"));
    assert!(!output.contains("not solved"));
}

#[test]
fn test_cache_reuses_loads() {
    let dict = write_temp("cache-dict.txt", "crane 10\n");
    let paths = vec![dict];
    let mut cache = DictionaryCache::new();
    let first = cache.dictionary(&paths).unwrap();
    let second = cache.dictionary(&paths).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    let reloaded = cache.reload(&paths).unwrap();
    assert!(!std::sync::Arc::ptr_eq(&first, &reloaded));
    assert_eq!(*first, *reloaded);

    let embedded = cache.dictionary(&[]).unwrap();
    assert!(embedded.get("crane").is_some());
    assert!(cache.word_set(&[]).unwrap().is_empty());
}

#[test]
fn test_format_round_colors() {
    let dictionary: Dictionary = [("crane", 10), ("trace", 5)].into_iter().collect();
    let restrictions = Restrictions::default();
    let policy = Policy::default();
    let mut solver = Solver::new(&dictionary, &restrictions, &policy, StdRng::seed_from_u64(0));
    let solution = solver.solve(&["trace"], "crane").unwrap();

    let plain = format_round(&solution.rounds[0], false);
    assert_eq!(plain, " 1 trace [traCe .ra.e]");
    let colored = format_round(&solution.rounds[0], true);
    assert!(colored.starts_with(" 1 trace ["));
    assert!(colored.contains("\x1b[;43mC\x1b[;49m"));
    assert!(colored.ends_with(" .ra.e]"));
}
