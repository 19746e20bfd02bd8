use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned record identifier.
///
/// The backend hands ids out as JSON strings or numbers depending on how
/// the record was created; both forms deserialize to the same opaque
/// string. An empty id is rejected: persisted records always carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = UserId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-empty string or an integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<UserId, E> {
                if v.is_empty() {
                    return Err(E::custom("user id must not be empty"));
                }
                Ok(UserId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<UserId, E> {
                Ok(UserId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<UserId, E> {
                Ok(UserId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// The closed set of gender choices offered by the form.
///
/// Persisted records are backend-owned and may carry other values; those
/// render verbatim in the list and map back to "unselected" when editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Lgbtqia2sPlus,
    Unspecified,
}

impl Gender {
    pub const ALL: [Self; 4] = [
        Self::Male,
        Self::Female,
        Self::Lgbtqia2sPlus,
        Self::Unspecified,
    ];

    /// The value stored and transmitted for this choice.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Male => "ชาย",
            Self::Female => "หญิง",
            Self::Lgbtqia2sPlus => "lgbtqia2s+",
            Self::Unspecified => "ไม่ระบุ",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim() {
            "ชาย" => Some(Self::Male),
            "หญิง" => Some(Self::Female),
            "lgbtqia2s+" => Some(Self::Lgbtqia2sPlus),
            "ไม่ระบุ" => Some(Self::Unspecified),
            _ => None,
        }
    }
}

/// Icon for a stored gender value, tolerant of backend data outside the
/// form's closed set.
#[must_use]
pub fn gender_icon(raw: &str) -> &'static str {
    match raw.to_lowercase().as_str() {
        "male" | "ชาย" => "♂",
        "female" | "หญิง" => "♀",
        _ => "⚧",
    }
}

/// A persisted user record as the backend returns it.
///
/// Everything but the id is defaulted so one sparse row does not poison
/// the whole list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub description: String,
}

impl User {
    /// Interests as individual labels, split on commas.
    pub fn interest_labels(&self) -> Vec<&str> {
        self.interests
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_deserializes_from_string_and_number() {
        let from_string: UserId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(from_string.as_str(), "a1b2");

        let from_number: UserId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(from_number.as_str(), "42");
    }

    #[test]
    fn empty_user_id_is_rejected() {
        assert!(serde_json::from_value::<UserId>(json!("")).is_err());
    }

    #[test]
    fn sparse_record_fills_defaults() {
        let user: User = serde_json::from_value(json!({ "id": 7 })).unwrap();
        assert_eq!(user.id.as_str(), "7");
        assert_eq!(user.age, 0);
        assert!(user.gender.is_empty());
    }

    #[test]
    fn gender_wire_round_trip() {
        for gender in Gender::ALL {
            assert_eq!(Gender::from_wire(gender.as_wire()), Some(gender));
        }
        assert_eq!(Gender::from_wire("unknown"), None);
        assert_eq!(Gender::from_wire("  ชาย "), Some(Gender::Male));
    }

    #[test]
    fn gender_icon_maps_known_values_and_falls_back() {
        assert_eq!(gender_icon("ชาย"), "♂");
        assert_eq!(gender_icon("Male"), "♂");
        assert_eq!(gender_icon("หญิง"), "♀");
        assert_eq!(gender_icon("lgbtqia2s+"), "⚧");
        assert_eq!(gender_icon(""), "⚧");
    }

    #[test]
    fn interest_labels_split_and_trim() {
        let user = User {
            id: UserId::new("1"),
            firstname: String::new(),
            lastname: String::new(),
            age: 0,
            gender: String::new(),
            phone: String::new(),
            interests: "อ่านหนังสือ, เกม ,  ".to_string(),
            description: String::new(),
        };
        assert_eq!(user.interest_labels(), vec!["อ่านหนังสือ", "เกม"]);
    }
}
