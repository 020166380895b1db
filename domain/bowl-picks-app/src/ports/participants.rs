use std::collections::BTreeSet;

use bowl_picks_core::ParticipantName;

/// Read-only list of the names allowed to submit picks.
pub trait ParticipantDirectory {
    fn is_registered(&self, name: &str) -> bool;
    fn participants(&self) -> Vec<ParticipantName>;
}

/// Fixed directory, usually read from configuration. An empty directory puts no
/// restriction on who may pick.
pub struct StaticParticipantDirectory {
    names: BTreeSet<ParticipantName>,
}

impl StaticParticipantDirectory {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|n| n.into().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    pub fn open() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }
}

impl ParticipantDirectory for StaticParticipantDirectory {
    fn is_registered(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.contains(name)
    }

    fn participants(&self) -> Vec<ParticipantName> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_names_are_case_sensitive() {
        let directory = StaticParticipantDirectory::new(["Anna", " Billy ", ""]);
        assert!(directory.is_registered("Anna"));
        assert!(directory.is_registered("Billy"));
        assert!(!directory.is_registered("anna"));
        assert_eq!(directory.participants(), vec!["Anna", "Billy"]);
    }

    #[test]
    fn test_open_directory_admits_anyone() {
        let directory = StaticParticipantDirectory::open();
        assert!(directory.is_registered("Whoever"));
        assert!(directory.participants().is_empty());
    }
}
