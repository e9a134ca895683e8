//! Tests for wallet domain models.

#[cfg(test)]
mod tests {
    use crate::wallets::{NewWallet, Wallet, WalletFilter, WalletType, WalletUpdate};
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn new_wallet(name: &str, currency: &str) -> NewWallet {
        NewWallet {
            id: None,
            name: name.to_string(),
            wallet_type: WalletType::Bank,
            currency: currency.to_string(),
            initial_balance: dec!(0),
            color: None,
            icon: None,
        }
    }

    fn wallet(balance: rust_decimal::Decimal, is_active: bool) -> Wallet {
        Wallet {
            id: "w1".to_string(),
            name: "Main".to_string(),
            wallet_type: WalletType::Cash,
            balance,
            currency: "IDR".to_string(),
            color: None,
            icon: None,
            is_active,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_normalized_fills_default_currency_and_trims() {
        let normalized = new_wallet("  Savings ", " ").normalized("idr");
        assert_eq!(normalized.name, "Savings");
        assert_eq!(normalized.currency, "IDR");
        assert!(normalized.validate().is_ok());

        let usd = new_wallet("Travel", "usd").normalized("IDR");
        assert_eq!(usd.currency, "USD");
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(new_wallet("", "IDR").validate().is_err());
        assert!(new_wallet("Main", "RUPIAH").validate().is_err());
        assert!(new_wallet("Main", "I1R").validate().is_err());

        let mut negative = new_wallet("Main", "IDR");
        negative.initial_balance = dec!(-5);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_wallet_type_parsing() {
        assert_eq!(WalletType::from_str("EWallet").unwrap(), WalletType::Ewallet);
        assert_eq!(WalletType::from_str("bank").unwrap(), WalletType::Bank);
        assert!(WalletType::from_str("crypto").is_err());
        assert_eq!(
            serde_json::to_string(&WalletType::Ewallet).unwrap(),
            "\"ewallet\""
        );
    }

    #[test]
    fn test_ensure_can_cover_boundary() {
        let w = wallet(dec!(100), true);
        assert!(w.ensure_can_cover(dec!(100)).is_ok());
        assert!(w.ensure_can_cover(dec!(100.01)).unwrap_err().is_insufficient_balance());
    }

    #[test]
    fn test_ensure_active() {
        assert!(wallet(dec!(0), true).ensure_active().is_ok());
        assert!(matches!(
            wallet(dec!(0), false).ensure_active(),
            Err(crate::Error::InactiveWallet(id)) if id == "w1"
        ));
    }

    #[test]
    fn test_update_only_touches_cosmetic_fields() {
        let mut w = wallet(dec!(50), true);
        let update = WalletUpdate {
            id: "w1".to_string(),
            name: Some(" Daily ".to_string()),
            color: Some("#fff".to_string()),
            icon: None,
        };
        assert!(update.validate().is_ok());
        update.apply_to(&mut w);
        assert_eq!(w.name, "Daily");
        assert_eq!(w.color.as_deref(), Some("#fff"));
        assert_eq!(w.balance, dec!(50));
    }

    #[test]
    fn test_filter_matches() {
        let w = wallet(dec!(0), true);
        assert!(WalletFilter::default().matches(&w));
        assert!(WalletFilter::active().matches(&w));
        let filter = WalletFilter {
            currency: Some("idr".to_string()),
            wallet_type: Some(WalletType::Bank),
            ..Default::default()
        };
        assert!(!filter.matches(&w));
    }
}
