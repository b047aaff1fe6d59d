//! Local score ledger
//!
//! A plain text file with one `name:score` entry per line. The ledger is read
//! in full and kept sorted by score, highest first; the top ten are what a
//! scores screen shows.
//!
//! A missing or unreadable file never blocks a game. When the file does not
//! exist a fixed seed set is written first; when it cannot be read the seed
//! set is used in memory. Write failures are reported to the caller, which
//! logs them and carries on.
//!
//! ```no_run
//! use tetrecs_ledger::ScoreLedger;
//!
//! let mut ledger = ScoreLedger::load_or_seed("Scores.txt");
//! if ledger.is_high_score(1200) {
//!     ledger.insert("Ada", 1200);
//!     if let Err(err) = ledger.save("Scores.txt") {
//!         eprintln!("could not save scores: {err}");
//!     }
//! }
//! for entry in ledger.top(10) {
//!     println!("{}: {}", entry.name, entry.score);
//! }
//! ```

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Number of entries shown on a scores screen
pub const TOP_SCORES: usize = 10;

/// Default ledger file name
pub const DEFAULT_LEDGER_PATH: &str = "Scores.txt";

/// Entries written when no ledger file exists yet
pub const SEED_SCORES: [(&str, u32); 10] = [
    ("Player1", 450),
    ("Player2", 200),
    ("Player3", 1500),
    ("Player5", 1000),
    ("Player4", 500),
    ("Player6", 680),
    ("Player7", 0),
    ("Player8", 450),
    ("Player9", 200),
    ("Player10", 1500),
];

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// One `name:score` line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Parse a `name:score` line; anything else is rejected
    pub fn parse(line: &str) -> Option<Self> {
        let (name, score) = line.trim().split_once(':')?;
        if name.is_empty() || score.contains(':') {
            return None;
        }
        let score = score.trim().parse().ok()?;
        Some(Self::new(name, score))
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.score)
    }
}

/// Sorted score list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    entries: Vec<ScoreEntry>,
}

impl ScoreLedger {
    /// Build from arbitrary entries, sorting them highest first
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        // Stable: equal scores keep file order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// The built-in seed set
    pub fn seeded() -> Self {
        Self::from_entries(
            SEED_SCORES
                .iter()
                .map(|&(name, score)| ScoreEntry::new(name, score))
                .collect(),
        )
    }

    /// Parse ledger text, skipping malformed lines
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let entry = ScoreEntry::parse(line);
                if entry.is_none() {
                    tracing::debug!(line, "skipping malformed ledger line");
                }
                entry
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Read the ledger at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Read the ledger, writing the seed set first if the file is absent
    ///
    /// Never fails: any I/O problem is logged and the seed set is returned.
    pub fn load_or_seed(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            let seeded = Self::seeded();
            match seeded.save(path) {
                Ok(()) => tracing::info!(path = %path.display(), "wrote seed score ledger"),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "could not write seed ledger")
                }
            }
            return seeded;
        }

        match Self::load(path) {
            Ok(ledger) => ledger,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "could not read score ledger, using seed scores"
                );
                Self::seeded()
            }
        }
    }

    /// Write every entry, one `name:score` per line
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LedgerError> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        for entry in &self.entries {
            writeln!(writer, "{entry}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Add an entry, keeping the ledger sorted
    ///
    /// A new entry goes after existing entries with the same score.
    pub fn insert(&mut self, name: impl Into<String>, score: u32) {
        let at = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(at, ScoreEntry::new(name, score));
    }

    /// Would `score` make it into the top ten?
    pub fn is_high_score(&self, score: u32) -> bool {
        match self.entries.get(TOP_SCORES - 1) {
            Some(tenth) => score > tenth.score,
            None => true,
        }
    }

    /// Highest `n` entries
    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
