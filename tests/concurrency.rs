use std::{sync::Arc, thread, time::Duration};

use bank_account::{AccountError, BankAccount, Currency};
use rstest::rstest;

const EURO: Currency = Currency::MAJOR_UNIT;
const CENT: Currency = Currency::MINOR_UNIT;

#[rstest]
#[case(10 * EURO, vec![], 10 * EURO)]
#[case(10 * EURO, vec![100 * EURO], 110 * EURO)]
#[case(10 * EURO, vec![100 * EURO, 30 * CENT], 110 * EURO + 30 * CENT)]
#[case(1000 * EURO, vec![150 * EURO, 50 * CENT, 720 * EURO], 1870 * EURO + 50 * CENT)]
#[case(
    1000 * EURO,
    vec![150 * EURO, 50 * CENT, 720 * EURO, 3 * CENT],
    1870 * EURO + 53 * CENT
)]
fn concurrent_deposits(
    #[case] start: Currency,
    #[case] deposits: Vec<Currency>,
    #[case] expected: Currency,
) {
    let acc = BankAccount::new();
    acc.open(start).unwrap();

    thread::scope(|s| {
        for (idx, amount) in deposits.into_iter().enumerate() {
            let acc = &acc;
            s.spawn(move || {
                // stagger the callers so they arrive in different orders
                thread::sleep(Duration::from_millis((idx as u64 * 7) % 5));
                acc.deposit(amount).unwrap();
            });
        }
    });

    assert_eq!(acc.balance(), Ok(expected));
}

#[test]
fn concurrent_deposits_and_withdrawals_are_serializable() {
    let acc = BankAccount::new();
    acc.open(100 * EURO).unwrap();

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..500 {
                    acc.deposit(3 * CENT).unwrap();
                }
            });
            s.spawn(|| {
                for _ in 0..500 {
                    acc.withdraw(CENT).unwrap();
                }
            });
            s.spawn(|| {
                for _ in 0..500 {
                    let balance = acc.balance().unwrap();
                    assert!(balance >= Currency::ZERO);
                }
            });
        }
    });

    assert_eq!(acc.balance(), Ok(100 * EURO + 8 * 500 * 2 * CENT));
}

#[test]
fn withdrawals_never_overdraw() {
    let acc = BankAccount::new();
    acc.open(10 * EURO).unwrap();

    let succeeded: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                s.spawn(|| {
                    (0..10)
                        .filter(|_| match acc.withdraw(EURO) {
                            Ok(_) => true,
                            Err(AccountError::InsufficientFunds) => false,
                            Err(err) => panic!("unexpected error: {err}"),
                        })
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(succeeded, 10);
    assert_eq!(acc.balance(), Ok(Currency::ZERO));
}

#[test]
fn opposite_transfers_do_not_deadlock() {
    let a = Arc::new(BankAccount::new());
    let b = Arc::new(BankAccount::new());
    a.open(1000 * EURO).unwrap();
    b.open(1000 * EURO).unwrap();

    let workers: Vec<_> = [(Arc::clone(&a), Arc::clone(&b)), (Arc::clone(&b), Arc::clone(&a))]
        .into_iter()
        .map(|(source, target)| {
            thread::spawn(move || {
                for _ in 0..1000 {
                    source.transfer(&target, EURO).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(a.balance(), Ok(1000 * EURO));
    assert_eq!(b.balance(), Ok(1000 * EURO));
}

#[test]
fn only_one_concurrent_open_wins() {
    let acc = BankAccount::new();

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (1..=8)
            .map(|n| {
                let acc = &acc;
                s.spawn(move || acc.open(n * EURO))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|err| *err == AccountError::AlreadyOpen)
    );
    let balance = acc.balance().unwrap();
    assert!(balance >= EURO && balance <= 8 * EURO);
}
