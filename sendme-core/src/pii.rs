use serde::{Serialize, Serializer};
use std::fmt;

/// Wraps customer contact data (phone numbers, e-mail addresses) so it can
/// be handed to `tracing` without leaking.
///
/// `Debug` and `Display` print `********` followed by the last
/// [`VISIBLE_TAIL`] characters, enough to correlate a log line with a
/// customer on the phone. Serialization still emits the real value because
/// the outbound order message needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct Masked<T>(pub T);

/// Characters left readable at the end of a masked value
pub const VISIBLE_TAIL: usize = 3;

impl<T: AsRef<str>> Masked<T> {
    fn tail(&self) -> &str {
        let value = self.0.as_ref();
        let count = value.chars().count();
        if count <= VISIBLE_TAIL * 2 {
            return "";
        }
        let start = value
            .char_indices()
            .nth(count - VISIBLE_TAIL)
            .map(|(idx, _)| idx)
            .unwrap_or(value.len());
        &value[start..]
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********{}", self.tail())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********{}", self.tail())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_keeps_tail() {
        let phone = Masked("0977123456");
        assert_eq!(format!("{}", phone), "********456");
        assert_eq!(format!("{:?}", phone), "********456");
    }

    #[test]
    fn test_short_values_are_fully_hidden() {
        assert_eq!(Masked("a@b.c").to_string(), "********");
    }

    #[test]
    fn test_serialization_keeps_real_value() {
        let json = serde_json::to_string(&Masked("jane@example.com")).unwrap();
        assert_eq!(json, "\"jane@example.com\"");
    }
}
