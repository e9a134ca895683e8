#[cfg(test)]
mod tests {
    use crate::in_memory::InMemoryLedger;
    use crate::recurring::{Frequency, NewRecurringTransaction, RecurringTransaction};
    use crate::transactions::{ListParams, TransactionFilter, TransactionType};
    use crate::wallets::{NewWallet, Wallet, WalletType};
    use crate::{LedgerConfig, LedgerServices};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn setup() -> (InMemoryLedger, LedgerServices) {
        let ledger = InMemoryLedger::new();
        let services =
            LedgerServices::new(ledger.repositories(), ledger.clone(), &LedgerConfig::default())
                .unwrap();
        (ledger, services)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn create_wallet(services: &LedgerServices, balance: Decimal) -> Wallet {
        services
            .wallet_service
            .create_wallet(NewWallet {
                id: None,
                name: "Payroll".to_string(),
                wallet_type: WalletType::Bank,
                currency: String::new(),
                initial_balance: balance,
                color: None,
                icon: None,
            })
            .await
            .unwrap()
    }

    async fn create_recurring(
        services: &LedgerServices,
        wallet_id: &str,
        transaction_type: TransactionType,
        amount: Decimal,
        next_due: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> RecurringTransaction {
        services
            .recurring_service
            .create_recurring(NewRecurringTransaction {
                id: None,
                wallet_id: wallet_id.to_string(),
                category_id: None,
                transaction_type,
                amount,
                description: " Rent ".to_string(),
                frequency: Frequency::Monthly,
                next_due,
                end_date,
            })
            .await
            .unwrap()
    }

    fn all_transactions(services: &LedgerServices) -> Vec<crate::transactions::Transaction> {
        services
            .transaction_service
            .list_transactions(&TransactionFilter::default(), ListParams::new(100, 0))
            .unwrap()
    }

    #[tokio::test]
    async fn test_monthly_template_runs_until_end_date() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, dec!(10000000)).await;
        let recurring = create_recurring(
            &services,
            &wallet.id,
            TransactionType::Expense,
            dec!(1500000),
            date(2026, 1, 25),
            Some(date(2026, 2, 28)),
        )
        .await;
        assert_eq!(recurring.description, "Rent");

        let processed = services
            .recurring_service
            .process_due_as_of(date(2026, 1, 26))
            .await
            .unwrap();
        assert_eq!(processed, 1);

        let transactions = all_transactions(&services);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction_date.date(), date(2026, 1, 25));
        assert_eq!(transactions[0].amount, dec!(1500000));

        let after_first = services.recurring_service.get_recurring(&recurring.id).unwrap();
        assert_eq!(after_first.next_due, date(2026, 2, 25));
        assert!(after_first.is_active);

        let processed = services
            .recurring_service
            .process_due_as_of(date(2026, 2, 25))
            .await
            .unwrap();
        assert_eq!(processed, 1);

        let after_second = services.recurring_service.get_recurring(&recurring.id).unwrap();
        assert_eq!(after_second.next_due, date(2026, 3, 25));
        assert!(!after_second.is_active);
        assert_eq!(
            services.wallet_service.get_wallet(&wallet.id).unwrap().balance,
            dec!(7000000)
        );

        let processed = services
            .recurring_service
            .process_due_as_of(date(2026, 12, 31))
            .await
            .unwrap();
        assert_eq!(processed, 0);
    }

    #[tokio::test]
    async fn test_failing_item_does_not_block_others() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, dec!(100)).await;
        let too_expensive = create_recurring(
            &services,
            &wallet.id,
            TransactionType::Expense,
            dec!(1000),
            date(2026, 1, 1),
            None,
        )
        .await;
        let salary = create_recurring(
            &services,
            &wallet.id,
            TransactionType::Income,
            dec!(500),
            date(2026, 1, 2),
            None,
        )
        .await;

        let processed = services
            .recurring_service
            .process_due_as_of(date(2026, 1, 5))
            .await
            .unwrap();
        assert_eq!(processed, 1);

        let skipped = services.recurring_service.get_recurring(&too_expensive.id).unwrap();
        assert_eq!(skipped.next_due, date(2026, 1, 1));
        let advanced = services.recurring_service.get_recurring(&salary.id).unwrap();
        assert_eq!(advanced.next_due, date(2026, 2, 2));
        assert_eq!(
            services.wallet_service.get_wallet(&wallet.id).unwrap().balance,
            dec!(600)
        );
    }

    #[tokio::test]
    async fn test_failed_advance_is_reprocessed_next_run() {
        let (ledger, services) = setup();
        let wallet = create_wallet(&services, dec!(0)).await;
        let recurring = create_recurring(
            &services,
            &wallet.id,
            TransactionType::Income,
            dec!(50),
            date(2026, 1, 1),
            None,
        )
        .await;
        ledger.fail_recurring_update(&recurring.id).unwrap();

        let processed = services
            .recurring_service
            .process_due_as_of(date(2026, 1, 1))
            .await
            .unwrap();
        assert_eq!(processed, 0);
        let processed = services
            .recurring_service
            .process_due_as_of(date(2026, 1, 1))
            .await
            .unwrap();
        assert_eq!(processed, 0);

        // The generated transaction is committed each time; the template never advances.
        assert_eq!(all_transactions(&services).len(), 2);
        assert_eq!(
            services.recurring_service.get_recurring(&recurring.id).unwrap().next_due,
            date(2026, 1, 1)
        );
    }

    #[tokio::test]
    async fn test_not_yet_due_is_left_alone() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, dec!(0)).await;
        create_recurring(
            &services,
            &wallet.id,
            TransactionType::Income,
            dec!(50),
            date(2026, 3, 1),
            None,
        )
        .await;

        let processed = services
            .recurring_service
            .process_due_as_of(date(2026, 2, 28))
            .await
            .unwrap();
        assert_eq!(processed, 0);
        assert!(all_transactions(&services).is_empty());
    }

    #[tokio::test]
    async fn test_create_validates_input_and_wallet() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, dec!(0)).await;

        let bad_end = services
            .recurring_service
            .create_recurring(NewRecurringTransaction {
                id: None,
                wallet_id: wallet.id.clone(),
                category_id: None,
                transaction_type: TransactionType::Income,
                amount: dec!(10),
                description: String::new(),
                frequency: Frequency::Weekly,
                next_due: date(2026, 1, 10),
                end_date: Some(date(2026, 1, 9)),
            })
            .await
            .unwrap_err();
        assert!(bad_end.is_validation());

        let missing_wallet = services
            .recurring_service
            .create_recurring(NewRecurringTransaction {
                id: None,
                wallet_id: "missing".to_string(),
                category_id: None,
                transaction_type: TransactionType::Income,
                amount: dec!(10),
                description: String::new(),
                frequency: Frequency::Weekly,
                next_due: date(2026, 1, 10),
                end_date: None,
            })
            .await
            .unwrap_err();
        assert!(missing_wallet.is_not_found());
    }

    #[tokio::test]
    async fn test_update_list_and_delete() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, dec!(0)).await;
        let recurring = create_recurring(
            &services,
            &wallet.id,
            TransactionType::Income,
            dec!(50),
            date(2026, 1, 1),
            None,
        )
        .await;

        let mut paused = recurring.clone();
        paused.is_active = false;
        paused.amount = dec!(75);
        let paused = services
            .recurring_service
            .update_recurring(paused)
            .await
            .unwrap();
        assert_eq!(paused.amount, dec!(75));
        assert!(services.recurring_service.list_recurring(true).unwrap().is_empty());
        assert_eq!(services.recurring_service.list_recurring(false).unwrap().len(), 1);

        let mut invalid = paused.clone();
        invalid.amount = dec!(0);
        assert!(services
            .recurring_service
            .update_recurring(invalid)
            .await
            .unwrap_err()
            .is_validation());

        services
            .recurring_service
            .delete_recurring(&recurring.id)
            .await
            .unwrap();
        assert!(services
            .recurring_service
            .get_recurring(&recurring.id)
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_month_end_template_keeps_its_day() {
        let (_ledger, services) = setup();
        let wallet = create_wallet(&services, dec!(1000)).await;
        let recurring = create_recurring(
            &services,
            &wallet.id,
            TransactionType::Expense,
            dec!(10),
            date(2026, 1, 31),
            None,
        )
        .await;
        assert_eq!(recurring.anchor_day, 31);

        for as_of in [date(2026, 1, 31), date(2026, 2, 28), date(2026, 3, 31)] {
            let processed = services
                .recurring_service
                .process_due_as_of(as_of)
                .await
                .unwrap();
            assert_eq!(processed, 1);
        }

        let mut dates: Vec<NaiveDate> = all_transactions(&services)
            .iter()
            .map(|t| t.transaction_date.date())
            .collect();
        dates.sort();
        assert_eq!(
            dates,
            vec![date(2026, 1, 31), date(2026, 2, 28), date(2026, 3, 31)]
        );
        let stored = services.recurring_service.get_recurring(&recurring.id).unwrap();
        assert_eq!(stored.next_due, date(2026, 4, 30));

        let mut moved = stored.clone();
        moved.next_due = date(2026, 5, 15);
        let moved = services
            .recurring_service
            .update_recurring(moved)
            .await
            .unwrap();
        assert_eq!(moved.anchor_day, 15);
    }
}
