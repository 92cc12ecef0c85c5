//! Mod entries and their enable state

use std::fmt;

/// Enable flag of a mod as stored in the workshop record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModState {
    Enabled,
    Disabled,
    /// Any other single digit found in a record, kept so saving reproduces it
    Other(char),
}

impl ModState {
    pub fn from_digit(digit: char) -> Self {
        match digit {
            '1' => ModState::Enabled,
            '0' => ModState::Disabled,
            other => ModState::Other(other),
        }
    }

    pub fn as_digit(&self) -> char {
        match self {
            ModState::Enabled => '1',
            ModState::Disabled => '0',
            ModState::Other(c) => *c,
        }
    }

    /// Enabled becomes disabled, everything else becomes enabled
    pub fn toggled(&self) -> Self {
        match self {
            ModState::Enabled => ModState::Disabled,
            _ => ModState::Enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self == ModState::Enabled
    }
}

impl fmt::Display for ModState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_digit())
    }
}

/// One (id, state) pair of the workshop record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub id: String,
    pub state: ModState,
}

impl RecordEntry {
    pub fn new(id: impl Into<String>, state: ModState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}

/// A row of the mod list
///
/// `title` is display data only. `None` means the lookup has not finished yet.
#[derive(Debug, Clone)]
pub struct ModEntry {
    pub id: String,
    pub title: Option<String>,
    pub state: ModState,
}

impl ModEntry {
    pub fn from_record(record: RecordEntry) -> Self {
        Self {
            id: record.id,
            title: None,
            state: record.state,
        }
    }

    pub fn to_record(&self) -> RecordEntry {
        RecordEntry::new(self.id.clone(), self.state)
    }

    pub fn is_pending(&self) -> bool {
        self.title.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_digits() {
        assert_eq!(ModState::from_digit('1'), ModState::Enabled);
        assert_eq!(ModState::from_digit('0'), ModState::Disabled);
        assert_eq!(ModState::from_digit('7'), ModState::Other('7'));
        assert_eq!(ModState::Other('7').as_digit(), '7');
        assert_eq!(ModState::Enabled.to_string(), "1");
    }

    #[test]
    fn test_state_toggle() {
        assert_eq!(ModState::Enabled.toggled(), ModState::Disabled);
        assert_eq!(ModState::Disabled.toggled(), ModState::Enabled);
        // Unknown digits are treated as "not enabled"
        assert_eq!(ModState::Other('2').toggled(), ModState::Enabled);
    }

    #[test]
    fn test_entry_record_conversion() {
        let entry = ModEntry::from_record(RecordEntry::new("42", ModState::Disabled));
        assert!(entry.is_pending());
        assert_eq!(entry.to_record(), RecordEntry::new("42", ModState::Disabled));
    }
}
