//! The closed set of template variables and the tokenizer that finds them.
//!
//! Templates reference variables as `$NAME` or `${NAME}`. Bare tokens are
//! matched longest-first, so `$CCDNUM` is never read as `$CCD` followed by a
//! literal `NUM`. The braced form is only needed when a literal that could
//! extend a token name follows it directly.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// How a resolved value is rendered into the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    /// Stringified as-is.
    Identity,
    /// Cast to an integer and zero-padded to the given width.
    ZeroPad(usize),
    /// Lists are concatenated with no separator; scalars stringified as-is.
    Concat,
}

/// A named placeholder that may appear in a path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    DesData,
    DesRemote,
    TmpDir,
    Project,
    Run,
    CoaddRun,
    ExpName,
    TileName,
    Band,
    MedsConf,
    FileType,
    Ext,
    Ccd,
    CcdNum,
    ExpNum,
    ReqNum,
    AttNum,
    Start,
    End,
}

impl Variable {
    /// Every variable, in expansion order: roots, identifiers, then the
    /// formatting-sensitive numerics.
    pub const ALL: [Variable; 19] = [
        Variable::DesData,
        Variable::DesRemote,
        Variable::TmpDir,
        Variable::Project,
        Variable::Run,
        Variable::CoaddRun,
        Variable::ExpName,
        Variable::TileName,
        Variable::Band,
        Variable::MedsConf,
        Variable::FileType,
        Variable::Ext,
        Variable::Ccd,
        Variable::CcdNum,
        Variable::ExpNum,
        Variable::ReqNum,
        Variable::AttNum,
        Variable::Start,
        Variable::End,
    ];

    /// Canonical spelling, without the leading `$`.
    pub fn token(self) -> &'static str {
        match self {
            Variable::DesData => "DESDATA",
            Variable::DesRemote => "DESREMOTE",
            Variable::TmpDir => "TMPDIR",
            Variable::Project => "PROJECT",
            Variable::Run => "RUN",
            Variable::CoaddRun => "COADD_RUN",
            Variable::ExpName => "EXPNAME",
            Variable::TileName => "TILENAME",
            Variable::Band => "BAND",
            Variable::MedsConf => "MEDSCONF",
            Variable::FileType => "FILETYPE",
            Variable::Ext => "EXT",
            Variable::Ccd => "CCD",
            Variable::CcdNum => "CCDNUM",
            Variable::ExpNum => "EXPNUM",
            Variable::ReqNum => "REQNUM",
            Variable::AttNum => "ATTNUM",
            Variable::Start => "START",
            Variable::End => "END",
        }
    }

    /// The parameter key a caller supplies for this variable.
    pub fn param_name(self) -> &'static str {
        match self {
            Variable::DesData => "desdata",
            Variable::DesRemote => "desremote",
            Variable::TmpDir => "tmpdir",
            Variable::Project => "project",
            Variable::Run => "run",
            Variable::CoaddRun => "coadd_run",
            Variable::ExpName => "expname",
            Variable::TileName => "tilename",
            Variable::Band => "band",
            Variable::MedsConf => "medsconf",
            Variable::FileType => "filetype",
            Variable::Ext => "ext",
            Variable::Ccd => "ccd",
            Variable::CcdNum => "ccdnum",
            Variable::ExpNum => "expnum",
            Variable::ReqNum => "reqnum",
            Variable::AttNum => "attnum",
            Variable::Start => "start",
            Variable::End => "end",
        }
    }

    pub fn format_rule(self) -> FormatRule {
        match self {
            Variable::Ccd | Variable::CcdNum => FormatRule::ZeroPad(2),
            Variable::ReqNum | Variable::AttNum => FormatRule::ZeroPad(2),
            Variable::ExpNum => FormatRule::ZeroPad(8),
            Variable::Band => FormatRule::Concat,
            _ => FormatRule::Identity,
        }
    }

    /// Root markers resolve from configuration, never from the parameter bag.
    pub fn is_root(self) -> bool {
        matches!(
            self,
            Variable::DesData | Variable::DesRemote | Variable::TmpDir
        )
    }

    /// What the caller is told to send when the variable cannot be resolved.
    pub fn missing_hint(self) -> String {
        match self {
            Variable::ExpName => {
                "expname keyword or pointing,band,visit keywords".to_string()
            }
            Variable::Ccd | Variable::CcdNum => "ccd or ccdnum keyword".to_string(),
            Variable::Project => "project keyword or a default project".to_string(),
            other => format!("{} keyword", other.param_name()),
        }
    }

    pub fn from_token(token: &str) -> Option<Variable> {
        Variable::ALL.iter().copied().find(|v| v.token() == token)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.token())
    }
}

/// One recognized variable occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    pub variable: Variable,
    pub span: Range<usize>,
}

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut names: Vec<&str> = Variable::ALL.iter().map(|v| v.token()).collect();
    // Leftmost-first alternation: longer names must come first.
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = names.join("|");
    Regex::new(&format!(r"\$\{{({alternation})\}}|\$({alternation})"))
        .expect("variable token pattern is valid")
});

static LEFTOVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{[^}]*\}?|[A-Za-z0-9_]*)").expect("leftover pattern is valid")
});

/// Every recognized variable occurrence, in template order.
pub fn tokens(template: &str) -> Vec<TokenMatch> {
    TOKEN_RE
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1).or_else(|| caps.get(2))?;
            Some(TokenMatch {
                variable: Variable::from_token(name.as_str())?,
                span: whole.range(),
            })
        })
        .collect()
}

/// The distinct variables referenced by a template, in expansion order.
pub fn referenced(template: &str) -> Vec<Variable> {
    let found = tokens(template);
    Variable::ALL
        .iter()
        .copied()
        .filter(|v| found.iter().any(|m| m.variable == *v))
        .collect()
}

/// Replace each recognized token with the text `value` produces for it.
pub fn substitute<F>(template: &str, mut value: F) -> String
where
    F: FnMut(Variable) -> String,
{
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for m in tokens(template) {
        out.push_str(&template[last..m.span.start]);
        out.push_str(&value(m.variable));
        last = m.span.end;
    }
    out.push_str(&template[last..]);
    out
}

/// The first `$`-prefixed text that is not a recognized variable token.
pub fn unknown_token(template: &str) -> Option<String> {
    let known = tokens(template);
    template
        .match_indices('$')
        .map(|(idx, _)| idx)
        .find(|idx| !known.iter().any(|m| m.span.contains(idx)))
        .map(|idx| leftover_at(template, idx))
}

/// The first `$`-prefixed text anywhere in `text`, recognized or not.
pub fn first_dollar(text: &str) -> Option<String> {
    text.find('$').map(|idx| leftover_at(text, idx))
}

fn leftover_at(text: &str, idx: usize) -> String {
    LEFTOVER_RE
        .find_at(text, idx)
        .filter(|m| m.start() == idx)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "$".to_string())
}
