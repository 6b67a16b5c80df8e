//! Tests for backer domain models.

#[cfg(test)]
mod tests {
    use crate::backers::{Backer, NewBacker};
    use chrono::NaiveDateTime;

    fn test_backer(city: Option<&str>, state: Option<&str>) -> Backer {
        Backer {
            id: "b1".to_string(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_initial: "D".to_string(),
            phone: None,
            city: city.map(String::from),
            state: state.map(String::from),
            created_at: NaiveDateTime::default(),
        }
    }

    fn valid_new_backer() -> NewBacker {
        NewBacker {
            email: "Jane@Example.com".to_string(),
            first_name: "Jane".to_string(),
            last_initial: "D".to_string(),
            phone: None,
            city: None,
            state: None,
        }
    }

    #[test]
    fn test_display_name_composition() {
        assert_eq!(test_backer(None, None).display_name(), "Jane D.");
    }

    #[test]
    fn test_location_both_parts() {
        assert_eq!(
            test_backer(Some("Austin"), Some("TX")).location(),
            Some("Austin, TX".to_string())
        );
    }

    #[test]
    fn test_location_city_only() {
        assert_eq!(
            test_backer(Some("Austin"), None).location(),
            Some("Austin".to_string())
        );
    }

    #[test]
    fn test_location_absent() {
        assert_eq!(test_backer(None, None).location(), None);
    }

    #[test]
    fn test_validate_accepts_valid_backer() {
        assert!(valid_new_backer().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut backer = valid_new_backer();
        backer.email = "not-an-email".to_string();
        assert!(backer.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_long_last_initial() {
        let mut backer = valid_new_backer();
        backer.last_initial = "Do".to_string();
        assert!(backer.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_state_code() {
        let mut backer = valid_new_backer();
        backer.state = Some("Texas".to_string());
        assert!(backer.validate().is_err());
    }

    #[test]
    fn test_normalized_email_lowercases_and_trims() {
        let backer = valid_new_backer();
        assert_eq!(backer.normalized_email(), "jane@example.com");
    }
}
