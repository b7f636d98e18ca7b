//! Version parsing module
//!
//! A single left-to-right scan fills the sections
//! `MAJOR -> MINOR -> INCREMENTAL -> BRANCH -> QUALIFIER` from a pending
//! token buffer. The grammar policy decides what the trailing tokens mean:
//! nothing special, a `SNAPSHOT` marker, or a `timestamp-buildnumber` pair.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::{Branch, BranchError, Version, VersionBuilder};

/// Marker token of a snapshot version
pub const SNAPSHOT: &str = "SNAPSHOT";

lazy_static! {
    /// `yyyyMMdd.HHmmss` shaped build timestamp
    static ref TIMESTAMP_RE: Regex = Regex::new(r"^[0-9]{8}\.[0-9]{6}$").unwrap();
}

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("Unexpected character {character:?} at index {index} in version \"{input}\"")]
    UnexpectedCharacter {
        input: String,
        index: usize,
        character: char,
    },
    #[error("Invalid number \"{token}\" at index {index} in version \"{input}\"")]
    InvalidNumber {
        input: String,
        index: usize,
        token: String,
    },
    #[error("Unexpected '.' after the incremental version at index {index} in version \"{input}\"")]
    DotAfterIncremental { input: String, index: usize },
    #[error("Empty branch or qualifier at index {index} in version \"{input}\"")]
    EmptyToken { input: String, index: usize },
    #[error("Invalid branch at index {index} in version \"{input}\": {source}")]
    InvalidBranch {
        input: String,
        index: usize,
        source: BranchError,
    },
}

impl VersionParseError {
    /// Byte index of the offending character or token
    pub fn index(&self) -> usize {
        match self {
            VersionParseError::UnexpectedCharacter { index, .. }
            | VersionParseError::InvalidNumber { index, .. }
            | VersionParseError::DotAfterIncremental { index, .. }
            | VersionParseError::EmptyToken { index, .. }
            | VersionParseError::InvalidBranch { index, .. } => *index,
        }
    }
}

/// What the trailing tokens of a version may denote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarPolicy {
    /// Every token is a branch or a qualifier
    Release,
    /// A final `SNAPSHOT` token makes a snapshot
    ReleaseOrSnapshot,
    /// A final `timestamp-buildnumber` pair makes a concrete snapshot
    ReleaseOrConcreteSnapshot,
    /// Either snapshot form
    ReleaseOrAnySnapshot,
}

impl GrammarPolicy {
    fn accepts_snapshot(self) -> bool {
        matches!(self, GrammarPolicy::ReleaseOrSnapshot | GrammarPolicy::ReleaseOrAnySnapshot)
    }

    fn accepts_concrete(self) -> bool {
        matches!(
            self,
            GrammarPolicy::ReleaseOrConcreteSnapshot | GrammarPolicy::ReleaseOrAnySnapshot
        )
    }
}

/// Switches that control what gets stored, never what gets accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// Always produce the develop branch
    pub ignore_branch: bool,
    /// Never record qualifiers
    pub ignore_qualifiers: bool,
}

/// Version parser for one grammar policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionParser {
    policy: GrammarPolicy,
    options: ParserOptions,
}

impl VersionParser {
    /// Create a new version parser
    pub fn new(policy: GrammarPolicy) -> Self {
        VersionParser {
            policy,
            options: ParserOptions::default(),
        }
    }

    /// Create a parser with explicit options
    pub fn with_options(policy: GrammarPolicy, options: ParserOptions) -> Self {
        VersionParser { policy, options }
    }

    pub fn ignore_branch(mut self, ignore: bool) -> Self {
        self.options.ignore_branch = ignore;
        self
    }

    pub fn ignore_qualifiers(mut self, ignore: bool) -> Self {
        self.options.ignore_qualifiers = ignore;
        self
    }

    pub fn policy(&self) -> GrammarPolicy {
        self.policy
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parse a release; no token has a special meaning
    pub fn parse_release(version: &str) -> Result<Version, VersionParseError> {
        Self::new(GrammarPolicy::Release).parse(version)
    }

    /// Parse a release or a `-SNAPSHOT` version
    pub fn parse_base_version(version: &str) -> Result<Version, VersionParseError> {
        Self::new(GrammarPolicy::ReleaseOrSnapshot).parse(version)
    }

    /// Parse a release or a `-timestamp-buildnumber` concrete snapshot
    pub fn parse_concrete_version(version: &str) -> Result<Version, VersionParseError> {
        Self::new(GrammarPolicy::ReleaseOrConcreteSnapshot).parse(version)
    }

    /// Check if a version string is valid for this parser
    pub fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_ok()
    }

    /// Parse a version string
    pub fn parse(&self, version: &str) -> Result<Version, VersionParseError> {
        let mut scanner = Scanner::new(version, self.policy, self.options);

        for (index, c) in version.char_indices() {
            scanner.accept(index, c)?;
        }
        let parsed = scanner.finish()?;

        log::trace!("Parsed version \"{}\" as {:?}", version, parsed);
        Ok(parsed)
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new(GrammarPolicy::ReleaseOrSnapshot)
    }
}

/// Characters reserved for the specification grammar
fn is_reserved(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '[' | ']' | '(' | ')' | ',' | '*' | '\0')
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Major,
    Minor,
    Incremental,
    Branch,
    Qualifier,
}

/// Timestamp-shaped token waiting for its buildnumber
#[derive(Debug)]
struct PendingTimestamp {
    token: String,
    index: usize,
    role: Section,
}

struct Scanner<'a> {
    input: &'a str,
    policy: GrammarPolicy,
    options: ParserOptions,
    section: Section,
    token: String,
    token_start: usize,
    pending: Option<PendingTimestamp>,
    builder: VersionBuilder,
    qualifiers: Vec<String>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, policy: GrammarPolicy, options: ParserOptions) -> Self {
        Scanner {
            input,
            policy,
            options,
            section: Section::Major,
            token: String::new(),
            token_start: 0,
            pending: None,
            builder: VersionBuilder::new(),
            qualifiers: Vec::new(),
        }
    }

    fn accept(&mut self, index: usize, c: char) -> Result<(), VersionParseError> {
        if is_reserved(c) {
            return Err(VersionParseError::UnexpectedCharacter {
                input: self.input.to_string(),
                index,
                character: c,
            });
        }

        match c {
            '.' => match self.section {
                Section::Major | Section::Minor => {
                    self.commit(index, false)?;
                }
                Section::Incremental => {
                    return Err(VersionParseError::DotAfterIncremental {
                        input: self.input.to_string(),
                        index,
                    });
                }
                Section::Branch | Section::Qualifier => self.push(index, c),
            },
            '-' => {
                self.commit(index, false)?;
                if self.section < Section::Branch {
                    self.section = Section::Branch;
                }
            }
            _ => self.push(index, c),
        }
        Ok(())
    }

    fn push(&mut self, index: usize, c: char) {
        if self.token.is_empty() {
            self.token_start = index;
        }
        self.token.push(c);
    }

    fn finish(mut self) -> Result<Version, VersionParseError> {
        let end = self.input.len();
        self.commit(end, true)?;

        if let Some(pending) = self.pending.take() {
            self.record(pending.token, pending.index, pending.role)?;
        }

        self.builder.qualifiers(std::mem::take(&mut self.qualifiers));
        Ok(self.builder.build())
    }

    /// Commit the pending token to the active section. `at` is the index of
    /// the delimiter, or the input length at end of string.
    fn commit(&mut self, at: usize, last: bool) -> Result<(), VersionParseError> {
        let token = std::mem::take(&mut self.token);
        let start = if token.is_empty() { at } else { self.token_start };

        match self.section {
            Section::Major => {
                let value = self.number(&token, start)?;
                self.builder.major(value);
                self.section = Section::Minor;
            }
            Section::Minor => {
                let value = self.number(&token, start)?;
                self.builder.minor(value);
                self.section = Section::Incremental;
            }
            Section::Incremental => {
                let value = self.number(&token, start)?;
                self.builder.incremental(value);
                self.section = Section::Branch;
            }
            Section::Branch | Section::Qualifier => {
                if token.is_empty() {
                    return Err(VersionParseError::EmptyToken {
                        input: self.input.to_string(),
                        index: at,
                    });
                }
                self.commit_word(token, start, last)?;
            }
        }
        Ok(())
    }

    fn number(&self, token: &str, index: usize) -> Result<u64, VersionParseError> {
        if token.is_empty() {
            return Ok(0);
        }
        if !is_numeric(token) {
            return Err(self.invalid_number(token, index));
        }
        token.parse().map_err(|_| self.invalid_number(token, index))
    }

    fn invalid_number(&self, token: &str, index: usize) -> VersionParseError {
        VersionParseError::InvalidNumber {
            input: self.input.to_string(),
            index,
            token: token.to_string(),
        }
    }

    fn commit_word(
        &mut self,
        token: String,
        index: usize,
        last: bool,
    ) -> Result<(), VersionParseError> {
        let role = self.section;
        self.section = Section::Qualifier;

        if let Some(pending) = self.pending.take() {
            if last && is_numeric(&token) {
                let buildnumber = self.number(&token, index)?;
                self.builder.concrete(pending.token, buildnumber);
                return Ok(());
            }
            self.record(pending.token, pending.index, pending.role)?;
        }

        if self.policy.accepts_concrete() && TIMESTAMP_RE.is_match(&token) {
            self.pending = Some(PendingTimestamp { token, index, role });
            return Ok(());
        }
        if self.policy.accepts_snapshot() && last && token == SNAPSHOT {
            self.builder.snapshot();
            return Ok(());
        }
        self.record(token, index, role)
    }

    /// Store a word as branch or qualifier. Purely numeric words and the
    /// snapshot marker are never branch names.
    fn record(
        &mut self,
        token: String,
        index: usize,
        role: Section,
    ) -> Result<(), VersionParseError> {
        if role == Section::Branch && !is_numeric(&token) && token != SNAPSHOT {
            let branch = Branch::new(&token).map_err(|source| VersionParseError::InvalidBranch {
                input: self.input.to_string(),
                index,
                source,
            })?;
            if !self.options.ignore_branch {
                self.builder.branch(branch);
            }
        } else if !self.options.ignore_qualifiers {
            self.qualifiers.push(token);
        }
        Ok(())
    }
}
