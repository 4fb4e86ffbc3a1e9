use bangazon_server_lib::data::database::Database;
use diesel_async::RunQueryDsl;

#[tokio::test]
#[serial_test::serial]
async fn test_pool_hands_out_connections() {
    let db = Database::new().await;

    let conn = db.get_connection().await;
    assert!(conn.is_ok(), "Failed to get a database connection");
}

#[tokio::test]
#[serial_test::serial]
async fn test_schema_is_migrated() {
    use bangazon_server_lib::data::models::schema::order_products::dsl::order_products;
    use bangazon_server_lib::data::models::schema::orders::dsl::orders;
    use bangazon_server_lib::data::models::schema::payment_types::dsl::payment_types;
    use bangazon_server_lib::data::models::schema::product_types::dsl::product_types;
    use bangazon_server_lib::data::models::schema::products::dsl::products;
    use bangazon_server_lib::data::models::schema::users::dsl::users;

    let db = Database::new().await;
    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    // Counting against every table proves the migration created them all.
    use diesel::QueryDsl;
    users
        .count()
        .get_result::<i64>(&mut conn)
        .await
        .expect("users table missing");
    product_types
        .count()
        .get_result::<i64>(&mut conn)
        .await
        .expect("product_types table missing");
    products
        .count()
        .get_result::<i64>(&mut conn)
        .await
        .expect("products table missing");
    payment_types
        .count()
        .get_result::<i64>(&mut conn)
        .await
        .expect("payment_types table missing");
    orders
        .count()
        .get_result::<i64>(&mut conn)
        .await
        .expect("orders table missing");
    order_products
        .count()
        .get_result::<i64>(&mut conn)
        .await
        .expect("order_products table missing");
}
