// Member module
// Person identity with the canonical "company:last first" text form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A person work items can be assigned to. Identity is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Member {
    pub company: String,
    pub last_name: String,
    pub first_name: String,
}

impl Member {
    pub fn new(
        company: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }

    /// Short form without the company, used in column headers.
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() {
            self.last_name.clone()
        } else {
            format!("{} {}", self.last_name, self.first_name)
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.company, self.display_name())
    }
}

/// Error returned for member text without any name part.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized member text: {0}")]
pub struct ParseMemberError(pub String);

impl FromStr for Member {
    type Err = ParseMemberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (company, names) = match text.split_once(':') {
            Some((company, names)) => (company.trim(), names.trim()),
            None => ("", text),
        };
        let mut parts = names.split_whitespace();
        let last_name = parts.next().ok_or_else(|| ParseMemberError(s.to_string()))?;
        let first_name = parts.next().unwrap_or("");
        Ok(Member::new(company, last_name, first_name))
    }
}

/// Insertion-ordered list of unique members. Positions double as the stable
/// member ids the grid keys its caches by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Members {
    members: Vec<Member>,
}

impl Members {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn contains(&self, member: &Member) -> bool {
        self.members.contains(member)
    }

    /// Append a member unless it is already present. Returns true on growth.
    pub fn add(&mut self, member: Member) -> bool {
        if self.contains(&member) {
            return false;
        }
        self.members.push(member);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Member> {
        self.members.get(index)
    }

    pub fn index_of(&self, member: &Member) -> Option<usize> {
        self.members.iter().position(|m| m == member)
    }
}

impl FromIterator<Member> for Members {
    fn from_iter<T: IntoIterator<Item = Member>>(iter: T) -> Self {
        let mut members = Members::new();
        for member in iter {
            members.add(member);
        }
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_display_and_parse_round_trip() {
        let member = Member::new("Acme", "Sato", "Ken");
        assert_eq!(member.to_string(), "Acme:Sato Ken");
        assert_eq!(member.to_string().parse::<Member>().unwrap(), member);
    }

    #[test_case("Acme:Sato Ken", "Acme", "Sato", "Ken"; "full form")]
    #[test_case("Sato Ken", "", "Sato", "Ken"; "no company")]
    #[test_case("Acme:Sato", "Acme", "Sato", ""; "no first name")]
    #[test_case("  Acme : Sato Ken ", "Acme", "Sato", "Ken"; "stray whitespace")]
    fn test_parse_forms(text: &str, company: &str, last: &str, first: &str) {
        let member: Member = text.parse().unwrap();
        assert_eq!(member, Member::new(company, last, first));
    }

    #[test_case(""; "empty")]
    #[test_case("Acme:"; "company only")]
    #[test_case("   "; "blank")]
    fn test_parse_rejects_nameless_text(text: &str) {
        assert!(text.parse::<Member>().is_err());
    }

    #[test]
    fn test_members_keep_insertion_order_and_uniqueness() {
        let mut members = Members::new();
        let a = Member::new("Acme", "Aoki", "Mina");
        let b = Member::new("Acme", "Baba", "Jun");
        assert!(members.add(a.clone()));
        assert!(members.add(b.clone()));
        assert!(!members.add(a.clone()));
        assert_eq!(members.len(), 2);
        assert_eq!(members.index_of(&b), Some(1));
        assert_eq!(members.get(0), Some(&a));
    }
}
