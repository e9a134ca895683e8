#[cfg(test)]
mod tests {
    use crate::in_memory::InMemoryLedger;
    use crate::transactions::{
        ListParams, NewTransaction, TransactionFilter, TransactionRepositoryTrait,
        TransactionType,
    };
    use crate::wallets::{NewWallet, Wallet, WalletType};
    use crate::{Error, LedgerConfig, LedgerServices};
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn setup() -> (InMemoryLedger, LedgerServices) {
        let ledger = InMemoryLedger::new();
        let services =
            LedgerServices::new(ledger.repositories(), ledger.clone(), &LedgerConfig::default())
                .unwrap();
        (ledger, services)
    }

    async fn create_wallet(services: &LedgerServices, name: &str, balance: Decimal) -> Wallet {
        services
            .wallet_service
            .create_wallet(NewWallet {
                id: None,
                name: name.to_string(),
                wallet_type: WalletType::Bank,
                currency: String::new(),
                initial_balance: balance,
                color: None,
                icon: None,
            })
            .await
            .unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn new_tx(wallet_id: &str, transaction_type: TransactionType, amount: Decimal) -> NewTransaction {
        NewTransaction {
            id: None,
            wallet_id: wallet_id.to_string(),
            category_id: None,
            transaction_type,
            amount,
            description: "  Groceries ".to_string(),
            tags: vec!["Food".to_string(), " food ".to_string(), "weekly".to_string()],
            transaction_date: Some(at(2026, 1, 10)),
        }
    }

    fn balance_of(services: &LedgerServices, wallet_id: &str) -> Decimal {
        services.wallet_service.get_wallet(wallet_id).unwrap().balance
    }

    #[tokio::test]
    async fn test_income_and_expense_adjust_balance() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(100000)).await;

        let income = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Income, dec!(50000)))
            .await
            .unwrap();
        assert_eq!(income.description, "Groceries");
        assert_eq!(income.tags, vec!["food".to_string(), "weekly".to_string()]);
        assert_eq!(balance_of(&services, &wallet.id), dec!(150000));

        services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Expense, dec!(30000.50)))
            .await
            .unwrap();
        assert_eq!(balance_of(&services, &wallet.id), dec!(119999.50));
    }

    #[tokio::test]
    async fn test_expense_exceeding_balance_is_rejected() {
        let (ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(1000000)).await;

        let err = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Expense, dec!(1500000)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InsufficientBalance { ref wallet_id, available, required }
                if wallet_id == &wallet.id && available == dec!(1000000) && required == dec!(1500000)
        ));
        assert_eq!(balance_of(&services, &wallet.id), dec!(1000000));
        let summary = TransactionRepositoryTrait::get_summary(&ledger, &TransactionFilter::default())
            .unwrap();
        assert_eq!(summary.count, 0);
    }

    #[tokio::test]
    async fn test_expense_equal_to_balance_empties_wallet() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(250.75)).await;

        services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Expense, dec!(250.75)))
            .await
            .unwrap();
        assert_eq!(balance_of(&services, &wallet.id), Decimal::ZERO);

        let err = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Expense, dec!(0.01)))
            .await
            .unwrap_err();
        assert!(err.is_insufficient_balance());
    }

    #[tokio::test]
    async fn test_failed_balance_update_rolls_back_insert() {
        let (ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(500)).await;
        ledger.fail_balance_updates(true);

        let err = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Income, dec!(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert!(err.to_string().contains("Failed to update wallet balance"));

        ledger.fail_balance_updates(false);
        let listed = services
            .transaction_service
            .list_transactions(&TransactionFilter::default(), ListParams::default())
            .unwrap();
        assert!(listed.is_empty());
        assert_eq!(balance_of(&services, &wallet.id), dec!(500));
    }

    #[tokio::test]
    async fn test_inactive_wallet_is_rejected() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Old", dec!(10)).await;
        services.wallet_service.delete_wallet(&wallet.id).await.unwrap();

        let err = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Income, dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InactiveWallet(id) if id == wallet.id));
    }

    #[tokio::test]
    async fn test_unknown_wallet_is_not_found() {
        let (_ledger, services) = setup();
        let err = services
            .transaction_service
            .create_transaction(new_tx("missing", TransactionType::Income, dec!(1)))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_write() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(10)).await;

        let err = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Income, dec!(0)))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(balance_of(&services, &wallet.id), dec!(10));
    }

    #[tokio::test]
    async fn test_delete_reverses_effect() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(1000)).await;

        let expense = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Expense, dec!(400)))
            .await
            .unwrap();
        let income = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Income, dec!(50)))
            .await
            .unwrap();
        assert_eq!(balance_of(&services, &wallet.id), dec!(650));

        services
            .transaction_service
            .delete_transaction(&expense.id)
            .await
            .unwrap();
        assert_eq!(balance_of(&services, &wallet.id), dec!(1050));

        services
            .transaction_service
            .delete_transaction(&income.id)
            .await
            .unwrap();
        assert_eq!(balance_of(&services, &wallet.id), dec!(1000));

        let err = services
            .transaction_service
            .delete_transaction(&income.id)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failed_reversal_keeps_transaction() {
        let (ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(100)).await;
        let tx = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Income, dec!(20)))
            .await
            .unwrap();

        ledger.fail_balance_updates(true);
        assert!(services
            .transaction_service
            .delete_transaction(&tx.id)
            .await
            .is_err());
        ledger.fail_balance_updates(false);

        assert!(services.transaction_service.get_transaction(&tx.id).is_ok());
        assert_eq!(balance_of(&services, &wallet.id), dec!(120));
    }

    #[tokio::test]
    async fn test_spent_income_cannot_be_reversed() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(0)).await;
        let income = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Income, dec!(100)))
            .await
            .unwrap();
        let expense = services
            .transaction_service
            .create_transaction(new_tx(&wallet.id, TransactionType::Expense, dec!(100)))
            .await
            .unwrap();
        assert_eq!(balance_of(&services, &wallet.id), dec!(0));

        let err = services
            .transaction_service
            .delete_transaction(&income.id)
            .await
            .unwrap_err();
        assert!(err.is_insufficient_balance());
        assert!(services.transaction_service.get_transaction(&income.id).is_ok());
        assert_eq!(balance_of(&services, &wallet.id), dec!(0));

        // Once the expense is gone the income can be taken back.
        services
            .transaction_service
            .delete_transaction(&expense.id)
            .await
            .unwrap();
        services
            .transaction_service
            .delete_transaction(&income.id)
            .await
            .unwrap();
        assert_eq!(balance_of(&services, &wallet.id), dec!(0));
    }

    #[tokio::test]
    async fn test_missing_date_defaults_to_now() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(0)).await;
        let mut input = new_tx(&wallet.id, TransactionType::Income, dec!(5));
        input.transaction_date = None;

        let before = crate::utils::time_utils::now();
        let tx = services
            .transaction_service
            .create_transaction(input)
            .await
            .unwrap();
        assert!(tx.transaction_date >= before);
    }

    #[tokio::test]
    async fn test_listing_filters_and_pagination() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(1000)).await;
        let other = create_wallet(&services, "Other", dec!(1000)).await;

        for (day, amount) in [(1, dec!(10)), (5, dec!(20)), (9, dec!(30))] {
            let mut input = new_tx(&wallet.id, TransactionType::Expense, amount);
            input.transaction_date = Some(at(2026, 2, day));
            input.description = format!("Coffee {}", day);
            services
                .transaction_service
                .create_transaction(input)
                .await
                .unwrap();
        }
        services
            .transaction_service
            .create_transaction(new_tx(&other.id, TransactionType::Income, dec!(99)))
            .await
            .unwrap();

        let filter = TransactionFilter {
            wallet_id: Some(wallet.id.clone()),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 5),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 9),
            search: Some("COFFEE".to_string()),
            tags: vec!["Food".to_string()],
            ..Default::default()
        };
        let listed = services
            .transaction_service
            .list_transactions(&filter, ListParams::default())
            .unwrap();
        let amounts: Vec<Decimal> = listed.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![dec!(30), dec!(20)]);

        let page = services
            .transaction_service
            .list_transactions(&TransactionFilter::default(), ListParams::new(2, 1))
            .unwrap();
        let page_amounts: Vec<Decimal> = page.iter().map(|t| t.amount).collect();
        assert_eq!(page_amounts, vec![dec!(20), dec!(10)]);
    }

    #[tokio::test]
    async fn test_monthly_summary() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, "Main", dec!(1000)).await;

        let entries = [
            (TransactionType::Income, dec!(500), at(2026, 3, 1)),
            (TransactionType::Expense, dec!(120), at(2026, 3, 31)),
            (TransactionType::Expense, dec!(80), at(2026, 4, 1)),
        ];
        for (transaction_type, amount, date) in entries {
            let mut input = new_tx(&wallet.id, transaction_type, amount);
            input.transaction_date = Some(date);
            services
                .transaction_service
                .create_transaction(input)
                .await
                .unwrap();
        }

        let march = services
            .transaction_service
            .get_monthly_summary(2026, 3)
            .unwrap();
        assert_eq!(march.total_income, dec!(500));
        assert_eq!(march.total_expense, dec!(120));
        assert_eq!(march.net, dec!(380));
        assert_eq!(march.count, 2);

        assert!(services
            .transaction_service
            .get_monthly_summary(2026, 13)
            .unwrap_err()
            .is_validation());
    }

    #[tokio::test]
    async fn test_inverted_date_range_is_rejected() {
        let (_ledger, services) = setup();
        let filter = TransactionFilter::for_period(
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert!(services
            .transaction_service
            .get_summary(&filter)
            .unwrap_err()
            .is_validation());
    }
}
