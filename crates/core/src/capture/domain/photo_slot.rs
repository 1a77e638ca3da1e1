use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storage key of a captured still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSlot {
    /// Taken mid-way through the final numeral.
    Photo1,
    /// Taken when the countdown ends.
    Photo2,
}

impl PhotoSlot {
    pub const ALL: &[PhotoSlot] = &[PhotoSlot::Photo1, PhotoSlot::Photo2];

    pub fn key(self) -> &'static str {
        match self {
            PhotoSlot::Photo1 => "photo1",
            PhotoSlot::Photo2 => "photo2",
        }
    }
}

impl std::fmt::Display for PhotoSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PhotoSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "photo1" | "1" => Ok(PhotoSlot::Photo1),
            "photo2" | "2" => Ok(PhotoSlot::Photo2),
            other => Err(format!("Photo slot must be photo1 or photo2, got '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("photo1", PhotoSlot::Photo1)]
    #[case("PHOTO2", PhotoSlot::Photo2)]
    #[case("2", PhotoSlot::Photo2)]
    fn test_parse(#[case] input: &str, #[case] expected: PhotoSlot) {
        assert_eq!(input.parse::<PhotoSlot>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("photo3".parse::<PhotoSlot>().is_err());
    }

    #[test]
    fn test_display_is_key() {
        assert_eq!(PhotoSlot::Photo1.to_string(), "photo1");
    }
}
