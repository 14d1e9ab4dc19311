//! Helpers turning raw flag values into contact fields

use contacts_book_core::ContactDraft;

/// Split comma-separated phone flags, trimming and dropping empty entries
///
/// Each `--phone` occurrence may itself hold several numbers: `"1, 2"`.
pub fn parse_phones(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build a draft from the name and phone flags shared by `add` and `edit`
pub fn draft_from_flags(first_name: &str, last_name: &str, phones: &[String]) -> ContactDraft {
    ContactDraft::new(first_name.trim(), last_name.trim()).with_phones(parse_phones(phones))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_phones_splits_and_trims() {
        let phones = parse_phones(&[" 123 , 456,,".to_string(), "789".to_string()]);
        assert_eq!(phones, vec!["123", "456", "789"]);
    }

    #[test]
    fn test_parse_phones_empty() {
        assert!(parse_phones(&[]).is_empty());
        assert!(parse_phones(&[" , ".to_string()]).is_empty());
    }

    #[test]
    fn test_draft_from_flags_trims_names() {
        let draft = draft_from_flags("  Ann", "Lee ", &["1".to_string()]);
        assert_eq!(draft.first_name, "Ann");
        assert_eq!(draft.last_name, "Lee");
        assert_eq!(draft.telephone_numbers, vec!["1"]);
    }
}
