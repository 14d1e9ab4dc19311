//! Contact records and their uniqueness key

use serde::{Deserialize, Deserializer, Serialize};

/// A stored contact
///
/// Serialized field names are part of the on-disk snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Assigned by the book, never reused
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    /// Order as supplied; duplicates allowed
    #[serde(default, deserialize_with = "null_as_empty")]
    pub telephone_numbers: Vec<String>,
}

impl Contact {
    pub(crate) fn key(&self) -> ContactKey {
        ContactKey::new(&self.first_name, &self.last_name)
    }
}

// Older snapshots wrote `null` for a contact without numbers
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Caller-supplied contact fields, used for both add and update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub telephone_numbers: Vec<String>,
}

impl ContactDraft {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            telephone_numbers: Vec::new(),
        }
    }

    pub fn with_phone(mut self, number: impl Into<String>) -> Self {
        self.telephone_numbers.push(number.into());
        self
    }

    pub fn with_phones<I, T>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.telephone_numbers
            .extend(numbers.into_iter().map(Into::into));
        self
    }

    /// Trim names and numbers, dropping blank numbers
    pub(crate) fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            telephone_numbers: self
                .telephone_numbers
                .into_iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Rejected only when both names are blank
    pub(crate) fn is_valid(&self) -> bool {
        !(self.first_name.trim().is_empty() && self.last_name.trim().is_empty())
    }

    pub(crate) fn key(&self) -> ContactKey {
        ContactKey::new(&self.first_name, &self.last_name)
    }

    pub(crate) fn into_contact(self, id: u64) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            telephone_numbers: self.telephone_numbers,
        }
    }
}

/// Uniqueness key derived from the (first, last) name pair
///
/// Kept as a pair rather than a joined string so that names containing the
/// separator can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ContactKey {
    first_name: String,
    last_name: String,
}

impl ContactKey {
    fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_json_field_names() {
        let contact = ContactDraft::new("Ann", "Lee")
            .with_phone("123")
            .into_contact(7);

        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "first_name": "Ann",
                "last_name": "Lee",
                "telephone_numbers": ["123"]
            })
        );
    }

    #[test]
    fn test_contact_null_or_missing_numbers() {
        let with_null: Contact = serde_json::from_str(
            r#"{"id":1,"first_name":"Ann","last_name":"Lee","telephone_numbers":null}"#,
        )
        .unwrap();
        assert!(with_null.telephone_numbers.is_empty());

        let missing: Contact =
            serde_json::from_str(r#"{"id":2,"first_name":"Bo","last_name":""}"#).unwrap();
        assert!(missing.telephone_numbers.is_empty());
    }

    #[test]
    fn test_normalized_trims_and_drops_blank_numbers() {
        let draft = ContactDraft::new("  Ann ", "\tLee\n")
            .with_phones([" 123 ", "", "   ", "456", "123"])
            .normalized();

        assert_eq!(draft.first_name, "Ann");
        assert_eq!(draft.last_name, "Lee");
        assert_eq!(draft.telephone_numbers, vec!["123", "456", "123"]);
    }

    #[test]
    fn test_validation_needs_one_name() {
        assert!(ContactDraft::new("Ann", "").is_valid());
        assert!(ContactDraft::new("", "Lee").is_valid());
        assert!(!ContactDraft::new("", "").is_valid());
        assert!(!ContactDraft::new("  ", "\t").is_valid());
    }

    #[test]
    fn test_key_does_not_collide_on_separator() {
        let a = ContactDraft::new("a:b", "c").key();
        let b = ContactDraft::new("a", "b:c").key();
        assert_ne!(a, b);
    }
}
