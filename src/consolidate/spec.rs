//! Destination specifications.
//!
//! A specification has the form `destination:account1,account2,...` and
//! says that the listed accounts are merged into one destination folder.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur while parsing a destination specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The `:` separating destination and accounts is missing.
    #[error("'{0}' is not of the form DESTINATION:ACCOUNT[,ACCOUNT...]")]
    MissingSeparator(String),

    /// More than one `:` was given.
    #[error("'{0}' contains more than one ':'")]
    ExtraSeparator(String),

    /// The destination name is empty or not a plain directory name.
    #[error("invalid destination name '{0}'")]
    InvalidDestination(String),

    /// An account name in the list is empty.
    #[error("empty account name in '{0}'")]
    EmptyAccount(String),
}

/// One `destination:accounts` specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationSpec {
    /// Name of the destination folder
    pub destination: String,
    /// Accounts merged into the destination
    pub accounts: Vec<String>,
}

impl FromStr for DestinationSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (destination, accounts) = s
            .split_once(':')
            .ok_or_else(|| SpecError::MissingSeparator(s.to_string()))?;
        if accounts.contains(':') {
            return Err(SpecError::ExtraSeparator(s.to_string()));
        }
        if !is_plain_name(destination) {
            return Err(SpecError::InvalidDestination(destination.to_string()));
        }

        let accounts: Vec<String> = accounts.split(',').map(str::to_string).collect();
        if accounts.iter().any(String::is_empty) {
            return Err(SpecError::EmptyAccount(s.to_string()));
        }

        Ok(Self {
            destination: destination.to_string(),
            accounts,
        })
    }
}

impl fmt::Display for DestinationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.destination, self.accounts.join(","))
    }
}

/// A single path component that stays inside its parent.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Lookup from account to destination, built from specifications.
#[derive(Debug, Clone, Default)]
pub struct DestinationMap {
    by_account: BTreeMap<String, String>,
    destinations: BTreeSet<String>,
}

impl DestinationMap {
    /// Build the lookup. When an account is listed twice the later
    /// specification wins.
    #[must_use]
    pub fn from_specs(specs: &[DestinationSpec]) -> Self {
        let mut map = Self::default();
        for spec in specs {
            map.destinations.insert(spec.destination.clone());
            for account in &spec.accounts {
                if let Some(previous) = map
                    .by_account
                    .insert(account.clone(), spec.destination.clone())
                {
                    if previous != spec.destination {
                        log::warn!(
                            "Account '{}' was mapped to '{}' and is now mapped to '{}'",
                            account,
                            previous,
                            spec.destination
                        );
                    }
                }
            }
        }
        map
    }

    /// Destination for `account`, if it is mapped.
    #[must_use]
    pub fn destination_for(&self, account: &str) -> Option<&str> {
        self.by_account.get(account).map(String::as_str)
    }

    /// Every destination named in the specifications.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.destinations.iter().map(String::as_str)
    }

    /// Whether no destinations were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
