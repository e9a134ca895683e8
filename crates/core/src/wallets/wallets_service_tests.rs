#[cfg(test)]
mod tests {
    use crate::in_memory::InMemoryLedger;
    use crate::wallets::{
        NewWallet, WalletFilter, WalletService, WalletServiceTrait, WalletType, WalletUpdate,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service() -> WalletService {
        WalletService::new(Arc::new(InMemoryLedger::new()), "IDR".to_string())
    }

    fn new_wallet(name: &str, wallet_type: WalletType, balance: Decimal) -> NewWallet {
        NewWallet {
            id: None,
            name: name.to_string(),
            wallet_type,
            currency: String::new(),
            initial_balance: balance,
            color: None,
            icon: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_default_currency() {
        let service = service();
        let wallet = service
            .create_wallet(new_wallet("  Cash ", WalletType::Cash, dec!(50000)))
            .await
            .unwrap();
        assert_eq!(wallet.name, "Cash");
        assert_eq!(wallet.currency, "IDR");
        assert_eq!(wallet.balance, dec!(50000));
        assert!(wallet.is_active);

        let mut usd = new_wallet("Travel", WalletType::Bank, dec!(0));
        usd.currency = "usd".to_string();
        assert_eq!(service.create_wallet(usd).await.unwrap().currency, "USD");

        let err = service
            .create_wallet(new_wallet("Debt", WalletType::Bank, dec!(-1)))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_update_touches_cosmetic_fields_only() {
        let service = service();
        let wallet = service
            .create_wallet(new_wallet("Bank", WalletType::Bank, dec!(1000)))
            .await
            .unwrap();

        let updated = service
            .update_wallet(WalletUpdate {
                id: wallet.id.clone(),
                name: Some("Main Bank".to_string()),
                color: Some("#00aa00".to_string()),
                icon: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Main Bank");
        assert_eq!(updated.color.as_deref(), Some("#00aa00"));
        assert_eq!(updated.balance, dec!(1000));
        assert_eq!(updated.currency, "IDR");
    }

    #[tokio::test]
    async fn test_delete_is_soft_and_excluded_from_total() {
        let service = service();
        let cash = service
            .create_wallet(new_wallet("Cash", WalletType::Cash, dec!(200)))
            .await
            .unwrap();
        let bank = service
            .create_wallet(new_wallet("Bank", WalletType::Bank, dec!(800)))
            .await
            .unwrap();
        assert_eq!(service.get_total_balance().unwrap(), dec!(1000));

        service.delete_wallet(&cash.id).await.unwrap();
        assert!(!service.get_wallet(&cash.id).unwrap().is_active);
        assert_eq!(service.get_total_balance().unwrap(), dec!(800));
        assert!(service.delete_wallet(&cash.id).await.unwrap_err().is_not_found());

        let active = service.list_wallets(&WalletFilter::active()).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, bank.id);
        assert_eq!(service.list_wallets(&WalletFilter::default()).unwrap().len(), 2);
    }
}
