#![cfg(feature = "storage-rocksdb")]

use paperdesk::domain::order::{LineItem, NewOrder, PaymentStatus};
use paperdesk::domain::ports::{OrderStore, UserStore};
use paperdesk::domain::user::User;
use paperdesk::infrastructure::rocksdb::RocksDbStore;
use rust_decimal_macros::dec;

fn sample_order(user_id: &str) -> NewOrder {
    NewOrder::paid(
        user_id,
        vec![LineItem {
            id: "svc-essay".to_string(),
            name: "Essay".to_string(),
            price: dec!(50),
            quantity: 1,
            pages: 2,
            total_words: 0,
            attachment: None,
        }],
        dec!(50),
        "INTENT1",
        "TXN1",
    )
}

#[tokio::test]
async fn test_orders_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let order_id = {
        let store = RocksDbStore::open(dir.path()).unwrap();
        let order = OrderStore::insert(&store, sample_order("user-1")).await.unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        order.id
    };

    let store = RocksDbStore::open(dir.path()).unwrap();
    let reloaded = OrderStore::get(&store, &order_id).await.unwrap().unwrap();
    assert_eq!(reloaded.paypal_transaction_id, "TXN1");
    assert_eq!(reloaded.total, dec!(50));
}

#[tokio::test]
async fn test_get_for_user_scans_documents() {
    let dir = tempfile::tempdir().unwrap();
    let store = RocksDbStore::open(dir.path()).unwrap();

    OrderStore::insert(&store, sample_order("user-1")).await.unwrap();
    OrderStore::insert(&store, sample_order("user-1")).await.unwrap();
    OrderStore::insert(&store, sample_order("user-2")).await.unwrap();

    let orders = store.get_for_user("user-1").await.unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|order| order.user_id == "user-1"));
}

#[tokio::test]
async fn test_user_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = RocksDbStore::open(dir.path()).unwrap();

    let user = User::new("user-1", "student@example.com", "Sam");
    UserStore::insert(&store, user.clone()).await.unwrap();

    let reloaded = UserStore::get(&store, "user-1").await.unwrap();
    assert_eq!(reloaded, Some(user));
}
