//! Polling filters
//!
//! A filter set is a conjunction: a changelist is eligible only when every
//! rule lets it through. Rules are evaluated user, path, pattern, min change
//! (configuration order within a kind) and stop at the first rejection.

use depot_core::Changelist;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// A single exclusion rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Reject changes authored by this user (exact, case-sensitive)
    User { name: String },

    /// Reject changes touching any file under this prefix
    ///
    /// Matching is a plain string prefix test, not segment aware:
    /// `//depot/foo` also rejects `//depot/foobar/x`.
    Path { prefix: String },

    /// Keep only changes where some file matches some pattern
    ///
    /// Each entry may hold several newline-separated expressions. A pattern
    /// must match the whole depot path.
    Pattern {
        patterns: Vec<String>,
        #[serde(default = "default_true")]
        case_sensitive: bool,
    },

    /// Reject changes numbered below this one
    MinChange { change: u64 },
}

/// Filter configuration as read from the host configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub rules: Vec<Filter>,

    /// Only the newest surviving change is of interest
    #[serde(default)]
    pub latest_change_only: bool,

    /// Report every surviving change so each gets its own build
    #[serde(default)]
    pub per_change_only: bool,
}

impl FilterSet {
    pub fn new(rules: Vec<Filter>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Compile into a matcher, see `CompiledFilters::compile`
    pub fn compile(&self) -> (CompiledFilters, Vec<PatternWarning>) {
        CompiledFilters::compile(self)
    }
}

/// A pattern that failed to compile and was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternWarning {
    pub pattern: String,
    pub message: String,
}

#[derive(Debug, Clone)]
enum Rule {
    User(String),
    Path(String),
    Pattern(Vec<Regex>),
    MinChange(u64),
}

/// Filter set ready for matching
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    rules: Vec<Rule>,
    latest_change_only: bool,
    per_change_only: bool,
}

impl CompiledFilters {
    /// Compile every rule of `set`
    ///
    /// Malformed regular expressions are dropped and reported; they never fail
    /// the whole set. A pattern rule left without any valid expression is
    /// inactive.
    pub fn compile(set: &FilterSet) -> (Self, Vec<PatternWarning>) {
        let mut warnings = Vec::new();
        let mut rules = Vec::with_capacity(set.rules.len());

        for filter in &set.rules {
            match filter {
                Filter::User { name } => rules.push(Rule::User(name.clone())),
                Filter::Path { prefix } => rules.push(Rule::Path(prefix.clone())),
                Filter::MinChange { change } => rules.push(Rule::MinChange(*change)),
                Filter::Pattern {
                    patterns,
                    case_sensitive,
                } => {
                    let compiled = compile_patterns(patterns, *case_sensitive, &mut warnings);
                    if !compiled.is_empty() {
                        rules.push(Rule::Pattern(compiled));
                    }
                }
            }
        }

        rules.sort_by_key(Rule::rank);

        let compiled = Self {
            rules,
            latest_change_only: set.latest_change_only,
            per_change_only: set.per_change_only,
        };
        (compiled, warnings)
    }

    pub fn latest_change_only(&self) -> bool {
        self.latest_change_only
    }

    pub fn per_change_only(&self) -> bool {
        self.per_change_only
    }

    /// Number of active rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True if `change` passes every rule
    pub fn accepts(&self, change: &Changelist) -> bool {
        self.rules.iter().all(|rule| {
            let ok = rule.accepts(change);
            if !ok {
                tracing::debug!(change = change.id, rule = rule.name(), "change filtered");
            }
            ok
        })
    }
}

impl Rule {
    fn accepts(&self, change: &Changelist) -> bool {
        match self {
            Rule::User(name) => change.author != *name,
            Rule::Path(prefix) => !change.files.iter().any(|f| f.starts_with(prefix.as_str())),
            Rule::Pattern(patterns) => change
                .files
                .iter()
                .any(|f| patterns.iter().any(|p| p.is_match(f))),
            Rule::MinChange(min) => change.id >= *min,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Rule::User(_) => 0,
            Rule::Path(_) => 1,
            Rule::Pattern(_) => 2,
            Rule::MinChange(_) => 3,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Rule::User(_) => "user",
            Rule::Path(_) => "path",
            Rule::Pattern(_) => "pattern",
            Rule::MinChange(_) => "min_change",
        }
    }
}

fn compile_patterns(
    patterns: &[String],
    case_sensitive: bool,
    warnings: &mut Vec<PatternWarning>,
) -> Vec<Regex> {
    patterns
        .iter()
        .flat_map(|entry| entry.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let anchored = format!("^(?:{})$", line);
            match RegexBuilder::new(&anchored)
                .case_insensitive(!case_sensitive)
                .build()
            {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::warn!(pattern = line, error = %err, "skipping invalid filter pattern");
                    warnings.push(PatternWarning {
                        pattern: line.to_string(),
                        message: err.to_string(),
                    });
                    None
                }
            }
        })
        .collect()
}

fn default_true() -> bool {
    true
}
