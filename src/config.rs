//! Default start options read from a flags file.
//!
//! The file holds command-line options, e.g. `-u -w "~/my words.txt"`, split
//! with shell quoting rules. `#` starts a comment. Its options go before the
//! real arguments, so the real ones win.

use crate::error::{AidError, Result};
use log::debug;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const FLAGS_FILE: &str = "wordle-aid-flags.conf";

/// Where the flags file lives: `$XDG_CONFIG_HOME`, else `$HOME/.config`.
pub fn flags_path() -> Option<PathBuf> {
    let dir = env::var_os("XDG_CONFIG_HOME")
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(dir.join(FLAGS_FILE))
}

/// Replace a leading `~` with the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Split flags file text into arguments, or `None` on unbalanced quotes.
pub fn parse_flags(text: &str) -> Option<Vec<String>> {
    let joined = text
        .lines()
        .map(|line| line.split_once('#').map_or(line, |(keep, _)| keep))
        .collect::<Vec<_>>()
        .join(" ");
    shlex::split(&joined)
}

/// Read the flags file at `path`. A missing file means no flags.
pub fn read_flags(path: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let flags = parse_flags(&text).ok_or_else(|| AidError::InvalidFlags(path.to_path_buf()))?;
            debug!("start options from {}: {:?}", path.display(), flags);
            Ok(flags)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(AidError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_joins_lines() {
        let text = "# defaults\n-u   # unique letters\n\n-r 5%\n-w words.txt";
        assert_eq!(parse_flags(text).unwrap(), vec!["-u", "-r", "5%", "-w", "words.txt"]);
    }

    #[test]
    fn keeps_quoted_paths_whole() {
        assert_eq!(
            parse_flags("-w \"/tmp/my words.txt\"\n-e '/tmp/deny list.txt'").unwrap(),
            vec!["-w", "/tmp/my words.txt", "-e", "/tmp/deny list.txt"]
        );
        assert_eq!(parse_flags("-w \"/tmp/my words.txt"), None);
    }

    #[test]
    fn unbalanced_quotes_in_file_are_an_error() {
        let path = std::env::temp_dir().join(format!("wordle-aid-{}-bad-flags.conf", std::process::id()));
        fs::write(&path, "-w \"/tmp/my words.txt\n").unwrap();
        assert!(matches!(read_flags(&path), Err(AidError::InvalidFlags(_))));
    }

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(expand_home(Path::new("/tmp/words.txt")), PathBuf::from("/tmp/words.txt"));
    }

    #[test]
    fn missing_file_is_empty() {
        let path = Path::new("/nonexistent/wordle-aid/flags.conf");
        assert!(read_flags(path).unwrap().is_empty());
    }
}
