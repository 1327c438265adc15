//! Canonical field roles and their vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical role of a metadata field.
///
/// Upstream keys are mapped onto these roles by the
/// [`FieldResolver`](crate::resolve::FieldResolver). Keys that match nothing become
/// [`FieldRole::Content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    /// Title of the work
    Title,
    /// Author names
    Authors,
    /// Contact email addresses
    Emails,
    /// Institutional affiliations
    Affiliations,
    /// Keywords or index terms
    Keywords,
    /// Abstract text
    Abstract,
    /// Any field matching no other role, displayed but never edited
    Content,
}

impl FieldRole {
    /// Roles that go through the confirm/lock workflow, in display order.
    pub const GOVERNED: [FieldRole; 4] = [
        FieldRole::Authors,
        FieldRole::Emails,
        FieldRole::Affiliations,
        FieldRole::Keywords,
    ];

    /// The fixed vocabulary: a key belongs to the first role whose term it contains,
    /// compared case-insensitively.
    pub const VOCABULARY: [(FieldRole, &'static str); 6] = [
        (FieldRole::Title, "title"),
        (FieldRole::Authors, "author"),
        (FieldRole::Emails, "email"),
        (FieldRole::Affiliations, "affiliation"),
        (FieldRole::Keywords, "keyword"),
        (FieldRole::Abstract, "abstract"),
    ];

    /// Human-readable label, as used for report sections.
    pub fn label(&self) -> &'static str {
        match self {
            FieldRole::Title => "Title",
            FieldRole::Authors => "Authors",
            FieldRole::Emails => "Emails",
            FieldRole::Affiliations => "Affiliations",
            FieldRole::Keywords => "Keywords",
            FieldRole::Abstract => "Abstract",
            FieldRole::Content => "Content",
        }
    }

    /// Check if the role goes through the confirm/lock workflow.
    pub fn is_governed(&self) -> bool {
        Self::GOVERNED.contains(self)
    }

    /// The vocabulary term a key must contain to resolve to this role.
    pub fn term(&self) -> Option<&'static str> {
        Self::VOCABULARY
            .iter()
            .find(|(role, _)| role == self)
            .map(|(_, term)| *term)
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(FieldRole::Authors, true)]
    #[case(FieldRole::Emails, true)]
    #[case(FieldRole::Affiliations, true)]
    #[case(FieldRole::Keywords, true)]
    #[case(FieldRole::Title, false)]
    #[case(FieldRole::Abstract, false)]
    #[case(FieldRole::Content, false)]
    fn test_is_governed(#[case] role: FieldRole, #[case] expected: bool) {
        assert_eq!(role.is_governed(), expected);
    }

    #[rstest]
    #[case(FieldRole::Title, Some("title"))]
    #[case(FieldRole::Affiliations, Some("affiliation"))]
    #[case(FieldRole::Content, None)]
    fn test_term(#[case] role: FieldRole, #[case] expected: Option<&str>) {
        assert_eq!(role.term(), expected);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(FieldRole::Keywords.to_string(), "Keywords");
        assert_eq!(
            serde_json::to_string(&FieldRole::Affiliations).unwrap(),
            "\"affiliations\""
        );
    }
}
