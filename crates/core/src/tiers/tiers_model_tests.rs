//! Tests for tier catalog models, in particular the benefit descriptor
//! wire format.

#[cfg(test)]
mod tests {
    use crate::tiers::{BenefitDescriptor, Tier};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tier_with_capacity(max_backers: Option<i32>, current_backers: i32) -> Tier {
        Tier {
            id: "t1".to_string(),
            campaign_id: "camp1".to_string(),
            name: "Founding Member".to_string(),
            amount: dec!(250),
            max_backers,
            current_backers,
            benefits: vec![],
            is_active: true,
            display_order: 0,
        }
    }

    #[test]
    fn test_descriptor_deserializes_catalog_shape() {
        let descriptor: BenefitDescriptor = serde_json::from_str(
            r#"{"type":"t-shirt","details":{"sizes":["M","L"]},"lifetime":true}"#,
        )
        .unwrap();
        assert_eq!(descriptor.benefit_type, "t-shirt");
        assert!(descriptor.lifetime);
        assert_eq!(descriptor.expires_at, None);
        assert!(descriptor.details.is_some());
    }

    #[test]
    fn test_descriptor_defaults_without_optional_fields() {
        let descriptor: BenefitDescriptor =
            serde_json::from_str(r#"{"type":"open-play-pass"}"#).unwrap();
        assert!(!descriptor.lifetime);
        assert_eq!(descriptor.details, None);
        assert_eq!(descriptor.expires_at, None);
    }

    #[test]
    fn test_descriptor_parses_expiry_date() {
        let descriptor: BenefitDescriptor =
            serde_json::from_str(r#"{"type":"guest-pass","expiresAt":"2027-06-30"}"#).unwrap();
        assert_eq!(
            descriptor.expires_at,
            Some(NaiveDate::from_ymd_opt(2027, 6, 30).unwrap())
        );
    }

    #[test]
    fn test_spots_remaining_uncapped() {
        assert_eq!(tier_with_capacity(None, 12).spots_remaining(), None);
        assert!(!tier_with_capacity(None, 12).is_full());
    }

    #[test]
    fn test_spots_remaining_counts_down() {
        assert_eq!(tier_with_capacity(Some(10), 7).spots_remaining(), Some(3));
    }

    #[test]
    fn test_full_tier_clamps_at_zero() {
        let tier = tier_with_capacity(Some(10), 11);
        assert_eq!(tier.spots_remaining(), Some(0));
        assert!(tier.is_full());
    }
}
