//! End-to-end ledger scenarios against a real SQLite database.

use till_core::{CoreError, Money, ValidationError};
use till_db::{Database, DbConfig, Ledger, LedgerError};

const CUSTOMER_ID: &str = "1234567890";

async fn ledger() -> Ledger {
    Ledger::open(DbConfig::in_memory())
        .await
        .expect("in-memory ledger")
}

/// Product A1 at 10.00 with 5 in stock, and one registered customer.
async fn seed(ledger: &Ledger) {
    ledger.add_product("A1", "Widget", "10.00").await.unwrap();
    ledger.adjust_stock("A1", 5).await.unwrap();
    ledger
        .register_customer("Ana Torres", CUSTOMER_ID, "Av. Central 12", "0991234567")
        .await
        .unwrap();
}

async fn stock_of(ledger: &Ledger, code: &str) -> i64 {
    ledger
        .find_product(code)
        .await
        .unwrap()
        .expect("product exists")
        .stock_quantity
}

fn is_insufficient_stock(err: &LedgerError) -> bool {
    matches!(err.rejection(), Some(CoreError::InsufficientStock { .. }))
}

#[tokio::test]
async fn sale_within_stock_totals_and_decrements() {
    let ledger = ledger().await;
    seed(&ledger).await;

    let receipt = ledger.record_sale("A1", "3", CUSTOMER_ID).await.unwrap();

    assert_eq!(receipt.total, Money::from_cents(3000));
    assert_eq!(receipt.total.to_major_f64(), 30.0);
    assert_eq!(stock_of(&ledger, "A1").await, 2);
}

#[tokio::test]
async fn sale_over_stock_is_rejected_and_stock_unchanged() {
    let ledger = ledger().await;
    seed(&ledger).await;

    let err = ledger.record_sale("A1", "6", CUSTOMER_ID).await.unwrap_err();

    assert!(is_insufficient_stock(&err));
    assert_eq!(stock_of(&ledger, "A1").await, 5);
    assert!(ledger.list_sales().await.unwrap().is_empty());
}

#[tokio::test]
async fn every_quantity_up_to_stock_sells() {
    for quantity in 1..=5 {
        let ledger = ledger().await;
        seed(&ledger).await;

        let receipt = ledger
            .record_sale("A1", &quantity.to_string(), CUSTOMER_ID)
            .await
            .unwrap();

        assert_eq!(receipt.total, Money::from_cents(1000 * quantity));
        assert_eq!(stock_of(&ledger, "A1").await, 5 - quantity);
    }
}

#[tokio::test]
async fn selling_the_shelf_empty_then_one_more() {
    let ledger = ledger().await;
    seed(&ledger).await;

    ledger.record_sale("A1", "2", CUSTOMER_ID).await.unwrap();
    ledger.record_sale("A1", "3", CUSTOMER_ID).await.unwrap();
    assert_eq!(stock_of(&ledger, "A1").await, 0);

    let err = ledger.record_sale("A1", "1", CUSTOMER_ID).await.unwrap_err();
    assert!(is_insufficient_stock(&err));
    assert_eq!(ledger.list_sales().await.unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_national_ids_are_rejected_without_writing() {
    let ledger = ledger().await;

    for bad_id in ["123456789", "12345678901", "abcdefghij", "12345 7890"] {
        let err = ledger
            .register_customer("Ana Torres", bad_id, "Av. Central 12", "0991234567")
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.validation(),
                Some(ValidationError::InvalidNationalId { .. })
            ),
            "{bad_id} should be rejected"
        );
    }

    assert!(ledger.list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn reregistering_an_id_overwrites() {
    let ledger = ledger().await;
    seed(&ledger).await;

    ledger
        .register_customer("Ana T. Vega", CUSTOMER_ID, "Calle 5", "0987654321")
        .await
        .unwrap();

    let customers = ledger.list_customers().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].full_name, "Ana T. Vega");
    assert_eq!(customers[0].address, "Calle 5");
}

#[tokio::test]
async fn unknown_product_wins_regardless_of_customer() {
    let ledger = ledger().await;
    seed(&ledger).await;

    for customer in [CUSTOMER_ID, "0000000000", "not-an-id"] {
        let err = ledger.record_sale("NOPE", "1", customer).await.unwrap_err();
        assert!(matches!(
            err.rejection(),
            Some(CoreError::ProductNotFound(code)) if code == "NOPE"
        ));
    }
}

#[tokio::test]
async fn purge_clears_sales_only() {
    let ledger = ledger().await;
    seed(&ledger).await;
    ledger.record_sale("A1", "1", CUSTOMER_ID).await.unwrap();
    ledger.record_sale("A1", "1", CUSTOMER_ID).await.unwrap();

    assert_eq!(ledger.purge_sales().await.unwrap(), 2);

    assert!(ledger.list_sales().await.unwrap().is_empty());
    assert_eq!(ledger.list_products().await.unwrap().len(), 1);
    assert_eq!(ledger.list_customers().await.unwrap().len(), 1);
    assert_eq!(stock_of(&ledger, "A1").await, 3);
}

#[tokio::test]
async fn sale_ids_keep_increasing_after_purge() {
    let ledger = ledger().await;
    seed(&ledger).await;

    let first = ledger.record_sale("A1", "1", CUSTOMER_ID).await.unwrap();
    ledger.purge_sales().await.unwrap();
    let second = ledger.record_sale("A1", "1", CUSTOMER_ID).await.unwrap();

    assert!(second.sale_id > first.sale_id);
}

#[tokio::test]
async fn ledger_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("till.db");

    let receipt = {
        let ledger = Ledger::new(Database::new(DbConfig::new(&path)).await.unwrap());
        seed(&ledger).await;
        let receipt = ledger.record_sale("A1", "3", CUSTOMER_ID).await.unwrap();
        ledger.close().await;
        receipt
    };

    let reopened = Ledger::open(DbConfig::new(&path)).await.unwrap();

    let book = reopened.day_book().await.unwrap();
    assert_eq!(book.sales.len(), 1);
    assert_eq!(book.sales[0].id, receipt.sale_id);
    assert_eq!(book.sales[0].timestamp, receipt.timestamp);
    assert_eq!(book.total, Money::from_cents(3000));
    assert_eq!(stock_of(&reopened, "A1").await, 2);
    assert!(reopened.find_customer(CUSTOMER_ID).await.unwrap().is_some());

    reopened.close().await;
}
