//! Action kinds.

use serde::{Deserialize, Serialize};

use crate::locations::LocationId;

/// What the player spends cards on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Rest,
    Train,
    Loot,
    Study,
    Explore(LocationId),
}

impl ActionKind {
    /// The four actions that need no location.
    pub const SELF_ACTIONS: [ActionKind; 4] = [
        ActionKind::Rest,
        ActionKind::Train,
        ActionKind::Loot,
        ActionKind::Study,
    ];

    /// History label: `rest`, `train`, `loot`, `study` or `explore:<id>`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            ActionKind::Rest => "rest".to_string(),
            ActionKind::Train => "train".to_string(),
            ActionKind::Loot => "loot".to_string(),
            ActionKind::Study => "study".to_string(),
            ActionKind::Explore(id) => format!("explore:{}", id),
        }
    }

    #[must_use]
    pub const fn location(&self) -> Option<LocationId> {
        match self {
            ActionKind::Explore(id) => Some(*id),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rest" => Ok(ActionKind::Rest),
            "train" => Ok(ActionKind::Train),
            "loot" => Ok(ActionKind::Loot),
            "study" => Ok(ActionKind::Study),
            other => {
                let id = other
                    .strip_prefix("explore:")
                    .ok_or(anyhow::anyhow!("unknown action {other:?}"))?;
                let id: u16 = id
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid location id in {other:?}"))?;
                Ok(ActionKind::Explore(LocationId::new(id)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_back() {
        for action in ActionKind::SELF_ACTIONS {
            assert_eq!(action.label().parse::<ActionKind>().unwrap(), action);
        }
        let explore = ActionKind::Explore(LocationId::new(7));
        assert_eq!(explore.label(), "explore:7");
        assert_eq!("explore:7".parse::<ActionKind>().unwrap(), explore);
    }

    #[test]
    fn test_parse_errors() {
        assert!("dance".parse::<ActionKind>().is_err());
        assert!("explore:".parse::<ActionKind>().is_err());
        assert!("explore:woods".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_location() {
        assert_eq!(ActionKind::Rest.location(), None);
        assert_eq!(ActionKind::Explore(LocationId::new(1)).location(), Some(LocationId::new(1)));
    }
}
