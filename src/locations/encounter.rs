//! Encounters and branches.

use serde::{Deserialize, Serialize};

use super::modifier::NodeModifier;
use crate::cards::SuitColor;

/// A fork in a location's route.
///
/// The path is chosen by the colour of the first card played when the
/// branching encounter is beaten.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    pub red: Vec<Encounter>,
    pub black: Vec<Encounter>,
}

impl Branch {
    pub fn new(red: Vec<Encounter>, black: Vec<Encounter>) -> Self {
        Self { red, black }
    }

    #[must_use]
    pub fn path(&self, color: SuitColor) -> &[Encounter] {
        match color {
            SuitColor::Red => &self.red,
            SuitColor::Black => &self.black,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Encounter {
    pub id: String,
    pub name: String,
    pub modifier: Option<NodeModifier>,
    pub branch: Option<Branch>,
}

impl Encounter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modifier: None,
            branch: None,
        }
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: NodeModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    #[must_use]
    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = Some(branch);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_path() {
        let branch = Branch::new(
            vec![Encounter::new("r1", "Ember Gate")],
            vec![Encounter::new("b1", "Night Gate"), Encounter::new("b2", "Crow Nest")],
        );
        assert_eq!(branch.path(SuitColor::Red).len(), 1);
        assert_eq!(branch.path(SuitColor::Black)[1].id, "b2");
    }

    #[test]
    fn test_builder() {
        let encounter = Encounter::new("e", "Gate").with_modifier(NodeModifier::MaxCards(2));
        assert_eq!(encounter.modifier, Some(NodeModifier::MaxCards(2)));
        assert!(encounter.branch.is_none());
    }
}
