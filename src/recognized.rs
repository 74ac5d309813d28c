use std::fmt;

/// A value that was either recognized as a known variant `T`, or kept as the
/// raw value `Raw` it was parsed from.
///
/// Game data grows faster than this crate does. Nation letters and modifier
/// keys we have no typed representation for are preserved instead of being
/// rejected, so lookups keep working and callers can still report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recognized<T, Raw = String> {
    Known(T),
    Unknown(Raw),
}

impl<T: Copy, Raw: Copy> Copy for Recognized<T, Raw> {}

impl<T, Raw> Recognized<T, Raw> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Recognized::Known(t) => Some(t),
            Recognized::Unknown(_) => None,
        }
    }

    pub fn unknown(&self) -> Option<&Raw> {
        match self {
            Recognized::Known(_) => None,
            Recognized::Unknown(raw) => Some(raw),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Recognized::Known(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Recognized<U, Raw> {
        match self {
            Recognized::Known(t) => Recognized::Known(f(t)),
            Recognized::Unknown(raw) => Recognized::Unknown(raw),
        }
    }
}

impl<T, Raw> From<T> for Recognized<T, Raw> {
    fn from(value: T) -> Self {
        Recognized::Known(value)
    }
}

impl<T: fmt::Display, Raw: fmt::Display> fmt::Display for Recognized<T, Raw> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recognized::Known(t) => t.fmt(f),
            Recognized::Unknown(raw) => raw.fmt(f),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_and_unknown_accessors() {
        let known: Recognized<u8, char> = Recognized::Known(3);
        let unknown: Recognized<u8, char> = Recognized::Unknown('Q');
        assert_eq!(known.known(), Some(&3));
        assert!(known.unknown().is_none());
        assert_eq!(unknown.unknown(), Some(&'Q'));
        assert!(!unknown.is_known());
        assert_eq!(known.map(|v| v * 2), Recognized::Known(6));
        assert_eq!(unknown.to_string(), "Q");
    }
}
