// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use tempfile::tempdir;
use tripledger::commands::{currencies, exporter, locks, reports, tags, transactions};
use tripledger::ledger::Ledger;
use tripledger::models::base_currency;
use tripledger::store::MemoryStore;
use tripledger::{LedgerError, cli};

fn setup() -> Ledger<MemoryStore> {
    Ledger::load(MemoryStore::new()).unwrap()
}

fn run_tx(ledger: &mut Ledger<MemoryStore>, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(ledger, tx_m)
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn tx_add_trims_inputs_and_parses_separators() {
    let mut ledger = setup();
    run_tx(
        &mut ledger,
        &[
            "tripledger", "tx", "add", "--date", " 2025-01-02 ", "--person", " Kim ",
            "--amount", " 1,500 ", "--category", " Food ", "--currency", " thb ",
        ],
    )
    .unwrap();

    let day = ledger.transactions("2025-01-02");
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].person, "Kim");
    assert_eq!(day[0].category, "Food");
    assert_eq!(day[0].amount, 1500);
    assert_eq!(day[0].currency.code, "THB");
    assert!(day[0].is_expense);
    assert_eq!(ledger.last_currency().code, "THB");
}

#[test]
fn tx_add_defaults_to_last_person_and_currency() {
    let mut ledger = setup();
    run_tx(
        &mut ledger,
        &[
            "tripledger", "tx", "add", "--date", "2025-01-02", "--person", "Lee", "--amount",
            "20", "--category", "Taxi", "--currency", "USD",
        ],
    )
    .unwrap();
    run_tx(
        &mut ledger,
        &[
            "tripledger", "tx", "add", "--date", "2025-01-02", "--amount", "5", "--category",
            "Tip", "--income",
        ],
    )
    .unwrap();

    let newest = &ledger.transactions("2025-01-02")[0];
    assert_eq!(newest.person, "Lee");
    assert_eq!(newest.currency.code, "USD");
    assert!(!newest.is_expense);
    assert_eq!(ledger.tags().income_categories, vec!["Tip"]);
}

#[test]
fn tx_add_rejects_bad_amount_and_unknown_currency() {
    let mut ledger = setup();
    let err = run_tx(
        &mut ledger,
        &[
            "tripledger", "tx", "add", "--person", "Kim", "--amount", "abc", "--category",
            "Food",
        ],
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::Validation(_))
    ));

    let err = run_tx(
        &mut ledger,
        &[
            "tripledger", "tx", "add", "--person", "Kim", "--amount", "10", "--category",
            "Food", "--currency", "GBP",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown currency"));
    assert!(ledger.dates().is_empty());
}

#[test]
fn lock_toggle_blocks_tx_add() {
    let mut ledger = setup();
    let matches =
        cli::build_cli().get_matches_from(["tripledger", "lock", "toggle", "--date", "2025-01-02"]);
    if let Some(("lock", lock_m)) = matches.subcommand() {
        locks::handle(&mut ledger, lock_m).unwrap();
    } else {
        panic!("no lock subcommand");
    }

    let err = run_tx(
        &mut ledger,
        &[
            "tripledger", "tx", "add", "--date", "2025-01-02", "--person", "Kim", "--amount",
            "10", "--category", "Food",
        ],
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::LockedDate("2025-01-02".to_string()))
    );

    let matches = cli::build_cli().get_matches_from(["tripledger", "lock", "status"]);
    if let Some(("lock", lock_m)) = matches.subcommand() {
        if let Some(("status", status_m)) = lock_m.subcommand() {
            let rows = locks::status_rows(&ledger, status_m).unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].date, "2025-01-02");
            assert!(rows[0].locked);
        } else {
            panic!("no status subcommand");
        }
    }
}

#[test]
fn rejected_tx_add_keeps_default_currency() {
    let mut ledger = setup();
    ledger.toggle_lock("2025-01-02");
    let err = run_tx(
        &mut ledger,
        &[
            "tripledger", "tx", "add", "--date", "2025-01-02", "--person", "Kim", "--amount",
            "10", "--category", "Food", "--currency", "USD",
        ],
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::LockedDate(_))
    ));

    let err = run_tx(
        &mut ledger,
        &[
            "tripledger", "tx", "add", "--date", "2025-01-03", "--person", "Kim", "--amount",
            "10", "--category", " ", "--currency", "EUR",
        ],
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::Validation(_))
    ));
    assert_eq!(ledger.last_currency().code, "KRW");
    assert!(ledger.store().raw(tripledger::store::KEY_LAST_CURRENCY).is_none());
}

#[test]
fn tx_rm_deletes_by_id() {
    let mut ledger = setup();
    let t = ledger
        .add_transaction("2025-01-02", "Kim", 10, "Food", &base_currency(), true)
        .unwrap();
    let id = t.id.to_string();
    run_tx(
        &mut ledger,
        &["tripledger", "tx", "rm", "--date", "2025-01-02", "--id", &id],
    )
    .unwrap();
    assert!(ledger.transactions("2025-01-02").is_empty());
}

#[test]
fn report_rows_round_base_values() {
    let mut ledger = setup();
    let thb = tripledger::models::find_currency("THB").unwrap().clone();
    ledger.add_transaction("2025-01-02", "A", 1000, "Food", &thb, true).unwrap();
    ledger.add_transaction("2025-01-02", "B", 2000, "Food", &thb, true).unwrap();
    ledger.add_transaction("2025-01-02", "A", 500, "Food", &thb, true).unwrap();

    let rows = reports::day_rows(&ledger, "2025-01-02");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].expense, 3500);
    assert_eq!(rows[0].expense_base, 147000);
    assert_eq!(rows[0].balance_base, -147000);

    let matches = cli::build_cli().get_matches_from(["tripledger", "report", "spenders"]);
    if let Some(("report", rep_m)) = matches.subcommand() {
        if let Some(("spenders", sp_m)) = rep_m.subcommand() {
            let rows = reports::spender_rows(&ledger, sp_m).unwrap();
            assert_eq!(
                rows,
                vec![
                    reports::SpenderRow { person: "B".into(), amount: 84000 },
                    reports::SpenderRow { person: "A".into(), amount: 63000 },
                ]
            );
        } else {
            panic!("no spenders subcommand");
        }
    }

    let trip = reports::trip_row(&ledger);
    assert_eq!(trip.expense, 147000);
    assert_eq!(trip.income, 0);
}

#[test]
fn tags_rm_removes_from_income_list() {
    let mut ledger = setup();
    ledger.remember_category("Refund", tripledger::models::TransactionKind::Income);
    ledger.remember_category("Refund", tripledger::models::TransactionKind::Expense);
    let matches = cli::build_cli().get_matches_from([
        "tripledger", "tags", "rm", "--category", " Refund ", "--income",
    ]);
    if let Some(("tags", tags_m)) = matches.subcommand() {
        tags::handle(&mut ledger, tags_m).unwrap();
    } else {
        panic!("no tags subcommand");
    }
    assert!(ledger.tags().income_categories.is_empty());
    assert_eq!(ledger.tags().expense_categories, vec!["Refund"]);
}

#[test]
fn currency_use_sets_default() {
    let mut ledger = setup();
    currencies::select(&mut ledger, "eur").unwrap();
    assert_eq!(ledger.last_currency().code, "EUR");
    assert!(currencies::select(&mut ledger, "XYZ").is_err());
    assert_eq!(ledger.last_currency().code, "EUR");
}

#[test]
fn export_transactions_json() {
    let mut ledger = setup();
    let thb = tripledger::models::find_currency("THB").unwrap().clone();
    let t = ledger
        .add_transaction("2025-01-02", "Kim", 500, "Food", &thb, true)
        .unwrap();
    ledger.toggle_lock("2025-01-02");

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "tripledger", "export", "transactions", "--format", "json", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&ledger, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([{
            "id": t.id,
            "date": "2025-01-02",
            "kind": "expense",
            "person": "Kim",
            "category": "Food",
            "amount": 500,
            "currency": "THB",
            "base_amount": 21000,
            "locked": true
        }])
    );
}

#[test]
fn export_rejects_unknown_format() {
    let ledger = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.xml");
    let out_str = out_path.to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "tripledger", "export", "transactions", "--format", "xml", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&ledger, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
