use serde::Serialize;

use crate::users::model::{Gender, User};

/// Fixed message raised when submit-time validation fails.
pub const MSG_REQUIRED_FIELDS: &str = "กรุณากรอกข้อมูลที่จำเป็นให้ครบถ้วน";

/// Form field identity.
///
/// Field updates dispatch through this enum rather than field-name
/// strings; every field maps to one typed slot on the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Age,
    Gender,
    Phone,
    Interests,
    Description,
}

impl FormField {
    pub const ALL: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::Age,
        Self::Gender,
        Self::Phone,
        Self::Interests,
        Self::Description,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "ชื่อ (firstname)",
            Self::LastName => "นามสกุล (lastname)",
            Self::Age => "อายุ (age)",
            Self::Gender => "เพศ (gender)",
            Self::Phone => "เบอร์โทร (phone)",
            Self::Interests => "ความสนใจ (interests)",
            Self::Description => "รายละเอียด (description)",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Interests | Self::Description)
    }

    /// Phone and age accept a keystroke only when the full resulting
    /// value stays digits-only.
    #[must_use]
    pub const fn digits_only(self) -> bool {
        matches!(self, Self::Age | Self::Phone)
    }

    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// In-progress, not-yet-persisted field values for a create or edit
/// session. Age stays a string until submission; gender holds the
/// unselected sentinel as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub firstname: String,
    pub lastname: String,
    pub age: String,
    pub gender: Option<Gender>,
    pub phone: String,
    pub interests: String,
    pub description: String,
}

impl UserDraft {
    /// Pre-populate from a fetched record (edit mode). A stored gender
    /// outside the closed set maps back to unselected.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            age: user.age.to_string(),
            gender: Gender::from_wire(&user.gender),
            phone: user.phone.clone(),
            interests: user.interests.clone(),
            description: user.description.clone(),
        }
    }

    /// Submit-time validation, fully synchronous and before any I/O.
    ///
    /// First name, last name, age and phone must be non-empty after
    /// trimming; gender must be chosen. Returns the submission payload
    /// with age converted to its numeric type, or `None` when any check
    /// fails (the caller raises [`MSG_REQUIRED_FIELDS`] and makes no
    /// network call).
    #[must_use]
    pub fn validate(&self) -> Option<UserPayload> {
        if self.firstname.trim().is_empty()
            || self.lastname.trim().is_empty()
            || self.age.trim().is_empty()
            || self.phone.trim().is_empty()
        {
            return None;
        }
        let gender = self.gender?;
        let age = self.age.trim().parse::<u32>().ok()?;
        Some(UserPayload {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            age,
            gender: gender.as_wire().to_string(),
            interests: self.interests.clone(),
            description: self.description.clone(),
            phone: self.phone.clone(),
        })
    }
}

/// Body of a create or update request. Carries every field but the id;
/// the server assigns ids and never accepts one back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub firstname: String,
    pub lastname: String,
    pub age: u32,
    pub gender: String,
    pub interests: String,
    pub description: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::model::UserId;

    fn valid_draft() -> UserDraft {
        UserDraft {
            firstname: "Somchai".to_string(),
            lastname: "Srisuk".to_string(),
            age: "30".to_string(),
            gender: Some(Gender::Male),
            phone: "0812345678".to_string(),
            interests: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn valid_draft_builds_payload_with_numeric_age() {
        let payload = valid_draft().validate().expect("draft should validate");
        assert_eq!(payload.age, 30);
        assert_eq!(payload.gender, "ชาย");

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["age"], serde_json::json!(30));
        assert!(value["age"].is_u64(), "age must serialize as a number");
    }

    #[test]
    fn whitespace_only_required_field_fails_validation() {
        let mut draft = valid_draft();
        draft.firstname = "   ".to_string();
        assert!(draft.validate().is_none());

        let mut draft = valid_draft();
        draft.phone = String::new();
        assert!(draft.validate().is_none());
    }

    #[test]
    fn unselected_gender_fails_validation() {
        let mut draft = valid_draft();
        draft.gender = None;
        assert!(draft.validate().is_none());
    }

    #[test]
    fn optional_fields_may_stay_empty() {
        let draft = valid_draft();
        assert!(draft.interests.is_empty());
        assert!(draft.validate().is_some());
    }

    #[test]
    fn from_user_maps_unknown_gender_to_unselected() {
        let user = User {
            id: UserId::new("1"),
            firstname: "A".to_string(),
            lastname: "B".to_string(),
            age: 22,
            gender: "something-else".to_string(),
            phone: "123".to_string(),
            interests: String::new(),
            description: String::new(),
        };
        let draft = UserDraft::from_user(&user);
        assert_eq!(draft.age, "22");
        assert_eq!(draft.gender, None);
    }

    #[test]
    fn field_order_cycles_forward_and_back() {
        assert_eq!(FormField::FirstName.next(), FormField::LastName);
        assert_eq!(FormField::Description.next(), FormField::FirstName);
        assert_eq!(FormField::FirstName.previous(), FormField::Description);
    }

    #[test]
    fn required_and_filter_flags() {
        assert!(FormField::Phone.is_required());
        assert!(!FormField::Interests.is_required());
        assert!(FormField::Age.digits_only());
        assert!(FormField::Phone.digits_only());
        assert!(!FormField::FirstName.digits_only());
    }
}
