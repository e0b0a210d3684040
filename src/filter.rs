//! Built-in `CommitFilter` implementations (§4.2, `SPEC_FULL.md` §S.5).
//!
//! Generalized from the teacher's `filter::regex_filter` /
//! `filter::date_filter` modules, which applied the same two predicates to
//! an already-laid-out `LayoutResult`. Here they run earlier in the
//! pipeline, directly over `Commit`, before lane allocation.

use regex::Regex;

use crate::dates::canonical_epoch;
use crate::model::{Commit, CommitFilter};

/// Which `Commit` field a `RegexFieldFilter` matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Message,
    Author,
    Hash,
}

impl FilterField {
    /// Parse the teacher's stringly-typed field names (`"message"`,
    /// `"author"`, `"sha"`, plus aliases) into a closed enum.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "message" | "subject" => Some(FilterField::Message),
            "author" => Some(FilterField::Author),
            "sha" | "hash" => Some(FilterField::Hash),
            _ => None,
        }
    }
}

/// Keep commits whose selected field matches a regex pattern.
pub struct RegexFieldFilter {
    field: FilterField,
    pattern: Regex,
}

impl RegexFieldFilter {
    pub fn new(field: FilterField, pattern: &str) -> Result<Self, regex::Error> {
        Ok(RegexFieldFilter {
            field,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Construct from the teacher's stringly-typed field name.
    pub fn from_field_name(field_name: &str, pattern: &str) -> Result<Self, String> {
        let field = FilterField::parse(field_name)
            .ok_or_else(|| format!("unsupported filter field: {field_name}"))?;
        RegexFieldFilter::new(field, pattern).map_err(|e| format!("invalid regex pattern: {e}"))
    }
}

impl CommitFilter for RegexFieldFilter {
    fn matches(&self, commit: &Commit) -> bool {
        let value = match self.field {
            FilterField::Message => &commit.message,
            FilterField::Author => match &commit.author {
                Some(author) => &author.name,
                None => return false,
            },
            FilterField::Hash => &commit.hash,
        };
        self.pattern.is_match(value)
    }
}

/// Keep commits whose committer date falls within an inclusive range.
///
/// `after`/`before` of `None` means "no constraint on that side", matching
/// the teacher's "0 means unbounded" convention translated to `Option`.
pub struct DateRangeFilter {
    pub after: Option<i64>,
    pub before: Option<i64>,
}

impl CommitFilter for DateRangeFilter {
    fn matches(&self, commit: &Commit) -> bool {
        let date = canonical_epoch(&commit.committer_date);
        let after_ok = self.after.map_or(true, |after| date >= after);
        let before_ok = self.before.map_or(true, |before| date <= before);
        after_ok && before_ok
    }
}
