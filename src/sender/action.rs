use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Characters separating the tokens of an action list
pub const SEPARATORS: &[char] = &[' ', ',', '\t', '\n', '\r', '\u{c}'];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    CreateBucket,
    DeleteBucket,
    Upload,
    Download,
    Copy,
    Delete,
}

impl ActionKind {
    pub const ALL: [Self; 6] = [
        Self::CreateBucket,
        Self::DeleteBucket,
        Self::Upload,
        Self::Download,
        Self::Copy,
        Self::Delete,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateBucket => "createBucket",
            Self::DeleteBucket => "deleteBucket",
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Copy => "copy",
            Self::Delete => "delete",
        }
    }

    /// Every accepted token, sorted
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Self::ALL.iter().map(|a| a.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Bucket level actions work without an object key
    #[must_use]
    pub const fn needs_object_key(self) -> bool {
        !matches!(self, Self::CreateBucket | Self::DeleteBucket)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|action| action.as_str() == s)
            .copied()
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "invalid action [{s}], valid actions are: [{}]",
                    Self::names().join(", ")
                ))
            })
    }
}

/// Split a raw action list into actions, keeping the declared order.
///
/// # Errors
///
/// Will return `Err` if the list is empty or a token is not an action
pub fn parse_actions(raw: &str) -> Result<Vec<ActionKind>, Error> {
    let actions = raw
        .split(SEPARATORS)
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<ActionKind>, Error>>()?;

    if actions.is_empty() {
        return Err(Error::Configuration(format!(
            "no action specified, valid actions are: [{}]",
            ActionKind::names().join(", ")
        )));
    }

    Ok(actions)
}
