//! Property-based integration tests for the ledger services.
//!
//! Random sequences of operations run against the in-memory ledger and the
//! money invariants are checked after every run.

use proptest::prelude::*;
use rust_decimal::Decimal;

use dompet_core::goals::NewGoal;
use dompet_core::in_memory::InMemoryLedger;
use dompet_core::transactions::{NewTransaction, TransactionType};
use dompet_core::transfers::NewTransfer;
use dompet_core::wallets::{NewWallet, WalletType};
use dompet_core::{LedgerConfig, LedgerServices};

// =============================================================================
// Generators
// =============================================================================

/// Positive amount with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_fee() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|cents| Decimal::new(cents, 2))
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Post(TransactionType, Decimal),
    /// Deletes the n-th surviving transaction, modulo the current count.
    Delete(usize),
}

fn arb_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        3 => (
            prop_oneof![Just(TransactionType::Income), Just(TransactionType::Expense)],
            arb_amount()
        )
            .prop_map(|(kind, amount)| LedgerOp::Post(kind, amount)),
        1 => any::<usize>().prop_map(LedgerOp::Delete),
    ]
}

// =============================================================================
// Helpers
// =============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn services() -> LedgerServices {
    let ledger = InMemoryLedger::new();
    LedgerServices::new(ledger.repositories(), ledger, &LedgerConfig::default()).unwrap()
}

async fn wallet(services: &LedgerServices, name: &str, balance: Decimal) -> String {
    services
        .wallet_service
        .create_wallet(NewWallet {
            id: None,
            name: name.to_string(),
            wallet_type: WalletType::Cash,
            currency: String::new(),
            initial_balance: balance,
            color: None,
            icon: None,
        })
        .await
        .unwrap()
        .id
}

fn signed(kind: TransactionType, amount: Decimal) -> Decimal {
    match kind {
        TransactionType::Income => amount,
        TransactionType::Expense => -amount,
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The balance always equals the opening balance plus the effect of the
    /// transactions that still exist, and rejected expenses change nothing.
    #[test]
    fn prop_balance_matches_surviving_transactions(
        opening in (0i64..500_000).prop_map(|c| Decimal::new(c, 2)),
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        runtime().block_on(async {
            let services = services();
            let wallet_id = wallet(&services, "Wallet", opening).await;
            let mut surviving: Vec<(String, Decimal)> = Vec::new();

            for op in ops {
                match op {
                    LedgerOp::Post(kind, amount) => {
                        let result = services
                            .transaction_service
                            .create_transaction(NewTransaction {
                                id: None,
                                wallet_id: wallet_id.clone(),
                                category_id: None,
                                transaction_type: kind,
                                amount,
                                description: String::new(),
                                tags: Vec::new(),
                                transaction_date: None,
                            })
                            .await;
                        match result {
                            Ok(tx) => surviving.push((tx.id, signed(kind, amount))),
                            Err(e) => {
                                prop_assert_eq!(kind, TransactionType::Expense);
                                prop_assert!(e.is_insufficient_balance());
                            }
                        }
                    }
                    LedgerOp::Delete(n) => {
                        if surviving.is_empty() {
                            continue;
                        }
                        let index = n % surviving.len();
                        let (id, effect) = surviving[index].clone();
                        match services.transaction_service.delete_transaction(&id).await {
                            Ok(()) => {
                                surviving.remove(index);
                            }
                            Err(e) => {
                                // Only an income larger than the current balance is refused.
                                prop_assert!(effect > Decimal::ZERO);
                                prop_assert!(e.is_insufficient_balance());
                            }
                        }
                    }
                }

                let expected = opening + surviving.iter().map(|(_, e)| *e).sum::<Decimal>();
                let balance = services.wallet_service.get_wallet(&wallet_id).unwrap().balance;
                prop_assert_eq!(balance, expected);
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Transfers only move money between wallets; fees are the only leak and
    /// no wallet goes negative.
    #[test]
    fn prop_transfers_conserve_money(
        balances in prop::collection::vec((0i64..200_000).prop_map(|c| Decimal::new(c, 2)), 3),
        transfers in prop::collection::vec((0usize..3, 0usize..3, arb_amount(), arb_fee()), 1..30),
    ) {
        runtime().block_on(async {
            let services = services();
            let mut ids = Vec::new();
            for (i, balance) in balances.iter().enumerate() {
                ids.push(wallet(&services, &format!("W{}", i), *balance).await);
            }
            let opening_total: Decimal = balances.iter().copied().sum();
            let mut fees = Decimal::ZERO;

            for (from, to, amount, fee) in transfers {
                let result = services
                    .transfer_service
                    .create_transfer(NewTransfer {
                        id: None,
                        from_wallet_id: ids[from].clone(),
                        to_wallet_id: ids[to].clone(),
                        amount,
                        fee,
                        note: String::new(),
                    })
                    .await;
                if result.is_ok() {
                    prop_assert_ne!(from, to);
                    fees += fee;
                }
            }

            let mut total = Decimal::ZERO;
            for id in &ids {
                let balance = services.wallet_service.get_wallet(id).unwrap().balance;
                prop_assert!(balance >= Decimal::ZERO);
                total += balance;
            }
            prop_assert_eq!(total + fees, opening_total);
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// A goal's saved amount is the sum of its recorded contributions.
    #[test]
    fn prop_goal_amount_is_sum_of_contributions(
        amounts in prop::collection::vec(arb_amount(), 1..20),
    ) {
        runtime().block_on(async {
            let services = services();
            let goal = services
                .goal_service
                .create_goal(NewGoal {
                    id: None,
                    name: "Trip".to_string(),
                    description: String::new(),
                    target_amount: Decimal::new(5_000, 0),
                    deadline: None,
                    color: None,
                    icon: None,
                })
                .await
                .unwrap();

            for amount in &amounts {
                services
                    .goal_service
                    .add_contribution(&goal.id, *amount, "")
                    .await
                    .unwrap();
            }

            let stored = services.goal_service.get_goal(&goal.id).unwrap();
            let contributions = services.goal_service.get_contributions(&goal.id).unwrap();
            let expected: Decimal = amounts.iter().copied().sum();
            prop_assert_eq!(stored.current_amount, expected);
            prop_assert_eq!(
                contributions.iter().map(|c| c.amount).sum::<Decimal>(),
                expected
            );
            prop_assert_eq!(stored.is_completed(), expected >= stored.target_amount);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
