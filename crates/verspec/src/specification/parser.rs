//! Parser for `<element>[, <element>]...` specifications

use super::{
    Boundary, Side, SpecificationElement, SpecificationError, VersionsSpecification,
    VersionsSpecificationBuilder,
};
use crate::{GrammarPolicy, Version, VersionParser};

/// Parses specifications such as `[1.0,2.0), 2.5, (3.0,)`.
///
/// Version tokens are read with qualifiers ignored, so qualifiers never
/// affect the identity of a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecificationParser {
    versions: VersionParser,
}

impl SpecificationParser {
    /// Parser reading releases, snapshots and concrete snapshots
    pub fn new() -> Self {
        Self::with_policy(GrammarPolicy::ReleaseOrAnySnapshot)
    }

    /// Parser reading version tokens with the given grammar
    pub fn with_policy(policy: GrammarPolicy) -> Self {
        SpecificationParser {
            versions: VersionParser::new(policy).ignore_qualifiers(true),
        }
    }

    /// Parse a specification
    pub fn parse(
        &self,
        specification: &str,
    ) -> Result<VersionsSpecification, SpecificationError> {
        let mut machine = Machine::new(specification, self.versions);

        for (index, c) in specification.char_indices() {
            machine.accept(index, c)?;
        }
        let parsed = machine.finish()?;

        log::trace!(
            "Parsed specification \"{}\" into {} element(s)",
            specification,
            parsed.len()
        );
        Ok(parsed)
    }
}

impl Default for SpecificationParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before an element
    Start,
    /// Inside a version without brackets
    Bare,
    /// After `[` or `(`
    LowerHalf,
    /// After the comma separating the two halves of a range
    UpperHalf,
    /// After `]` or `)`
    Closed,
}

struct Machine<'a> {
    input: &'a str,
    versions: VersionParser,
    state: State,
    /// Byte range of the version being read
    token: Option<(usize, usize)>,
    /// Whitespace seen after the token
    token_done: bool,
    lower_inclusive: bool,
    lower: Option<Version>,
    builder: VersionsSpecificationBuilder,
}

impl<'a> Machine<'a> {
    fn new(input: &'a str, versions: VersionParser) -> Self {
        Machine {
            input,
            versions,
            state: State::Start,
            token: None,
            token_done: false,
            lower_inclusive: false,
            lower: None,
            builder: VersionsSpecificationBuilder::new(),
        }
    }

    fn error(&self, index: usize, reason: &'static str) -> SpecificationError {
        SpecificationError::Parse {
            input: self.input.to_string(),
            index,
            reason,
        }
    }

    fn accept(&mut self, index: usize, c: char) -> Result<(), SpecificationError> {
        if c.is_whitespace() {
            if self.token.is_some() {
                self.token_done = true;
            }
            return Ok(());
        }

        match (c, self.state) {
            ('[' | '(', State::Start) => {
                self.lower_inclusive = c == '[';
                self.state = State::LowerHalf;
            }
            ('[' | '(', _) => return Err(self.error(index, "Unexpected opening bracket")),

            (',', State::Start) => return Err(self.error(index, "Missing element before comma")),
            (',', State::Bare) => {
                self.add_explicit(index)?;
                self.state = State::Start;
            }
            (',', State::LowerHalf) => {
                self.lower = self.take_version()?;
                self.state = State::UpperHalf;
            }
            (',', State::UpperHalf) => {
                return Err(self.error(index, "Unexpected comma inside range"));
            }
            (',', State::Closed) => self.state = State::Start,

            (']' | ')', State::UpperHalf) => {
                self.add_range(index, c == ']')?;
                self.state = State::Closed;
            }
            // Maven shorthand for a single version
            (']', State::LowerHalf) if self.lower_inclusive => {
                self.add_explicit(index)?;
                self.state = State::Closed;
            }
            (']' | ')', _) => return Err(self.error(index, "Unexpected closing bracket")),

            (_, State::Closed) => return Err(self.error(index, "Expected comma after range")),
            _ => {
                if self.token_done {
                    return Err(self.error(index, "Unexpected whitespace inside version"));
                }
                if self.state == State::Start {
                    self.state = State::Bare;
                }
                let end = index + c.len_utf8();
                self.token = Some(match self.token {
                    Some((start, _)) => (start, end),
                    None => (index, end),
                });
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<VersionsSpecification, SpecificationError> {
        let end = self.input.len();
        match self.state {
            State::Bare => self.add_explicit(end)?,
            State::LowerHalf | State::UpperHalf => return Err(self.error(end, "Unclosed range")),
            State::Start if !self.builder.is_empty() => {
                return Err(self.error(end, "Trailing comma"));
            }
            State::Start | State::Closed => {}
        }
        self.builder.build()
    }

    fn take_version(&mut self) -> Result<Option<Version>, SpecificationError> {
        self.token_done = false;
        let Some((start, end)) = self.token.take() else {
            return Ok(None);
        };

        self.versions
            .parse(&self.input[start..end])
            .map(Some)
            .map_err(|source| SpecificationError::InvalidVersion {
                index: start + source.index(),
                source,
            })
    }

    fn add_explicit(&mut self, index: usize) -> Result<(), SpecificationError> {
        let version = self
            .take_version()?
            .ok_or_else(|| self.error(index, "Missing version"))?;
        self.builder.add(SpecificationElement::explicit(version))?;
        Ok(())
    }

    fn add_range(&mut self, index: usize, upper_inclusive: bool) -> Result<(), SpecificationError> {
        let upper = self.take_version()?;
        let lower = self.lower.take();

        let lower = match lower {
            Some(version) if self.lower_inclusive => Boundary::inclusive(Side::Lower, version),
            Some(version) => Boundary::exclusive(Side::Lower, version),
            None if upper.is_none() => {
                return Err(self.error(index, "Both boundaries are unlimited"));
            }
            None => Boundary::unlimited(Side::Lower),
        };
        let upper = match upper {
            Some(version) if upper_inclusive => Boundary::inclusive(Side::Upper, version),
            Some(version) => Boundary::exclusive(Side::Upper, version),
            None => Boundary::unlimited(Side::Upper),
        };

        self.builder.add(SpecificationElement::range(lower, upper)?)?;
        Ok(())
    }
}
