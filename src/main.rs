//! Wordle Aid CLI

use anyhow::Context;
use std::io::{self, IsTerminal};
use wordle_aid::cli;
use wordle_aid::config;
use wordle_aid::DictionaryCache;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let flags_path = config::flags_path();
    let flags = match &flags_path {
        Some(path) => config::read_flags(path)
            .with_context(|| format!("reading start options from {}", path.display()))?,
        None => Vec::new(),
    };

    let mut args = match cli::parse_args(flags, std::env::args(), flags_path.as_deref()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    let stdout = io::stdout();
    if !stdout.is_terminal() {
        args.no_colors = true;
    }

    let mut cache = DictionaryCache::new();
    cli::run(&args, &mut cache, &mut stdout.lock())
}
