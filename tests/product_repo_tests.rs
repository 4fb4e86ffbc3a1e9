use bangazon_server_lib::data::database::Database;
use bangazon_server_lib::data::models::money::Money;
use bangazon_server_lib::data::models::product::{NewProduct, UpdateProduct};
use bangazon_server_lib::data::models::product_type::NewProductType;
use bangazon_server_lib::data::models::user::NewUser;
use bangazon_server_lib::data::repos::implementors::product_repo::ProductRepo;
use bangazon_server_lib::data::repos::implementors::product_type_repo::ProductTypeRepo;
use bangazon_server_lib::data::repos::implementors::user_repo::UserRepo;
use bangazon_server_lib::data::repos::traits::repository::{Repository, VersionedUpdate};
use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;

async fn setup() -> Result<(), result::Error> {
    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use bangazon_server_lib::data::models::schema::order_products::dsl::order_products;
    use bangazon_server_lib::data::models::schema::orders::dsl::orders;
    use bangazon_server_lib::data::models::schema::payment_types::dsl::payment_types;
    use bangazon_server_lib::data::models::schema::product_types::dsl::product_types;
    use bangazon_server_lib::data::models::schema::products::dsl::products;
    use bangazon_server_lib::data::models::schema::users::dsl::users;

    // Clean up in order due to foreign key constraints
    diesel::delete(order_products).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(payment_types).execute(&mut conn).await?;
    diesel::delete(products).execute(&mut conn).await?;
    diesel::delete(product_types).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

async fn create_fixtures() -> (i32, i32) {
    let user_repo = UserRepo::new();
    user_repo
        .add(NewUser {
            username: "seller",
            password_hash: "not-a-real-hash",
            street_address: None,
        })
        .await
        .expect("Failed to add user");

    let user_id = user_repo
        .get_by_username("seller")
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .user_id;

    let type_repo = ProductTypeRepo::new();
    type_repo
        .add(NewProductType {
            label: "Outdoor Goods",
        })
        .await
        .expect("Failed to add product type");

    let product_type_id = type_repo
        .get_all()
        .await
        .expect("Failed to load product types")
        .expect("No product types")[0]
        .product_type_id;

    (user_id, product_type_id)
}

async fn add_product(user_id: i32, product_type_id: i32, title: &str, price: &str) -> i32 {
    let repo = ProductRepo::new();

    repo.add_returning_id(NewProduct {
        user_id,
        product_type_id,
        title,
        description: None,
        price: Money(BigDecimal::from_str(price).unwrap()),
        quantity: 5,
        city: None,
        image_path: None,
    })
    .await
    .expect("Failed to add product")
}

#[tokio::test]
#[serial_test::serial]
async fn test_get_all_orders_by_title() {
    setup().await.expect("Setup failed");
    let (user_id, product_type_id) = create_fixtures().await;

    add_product(user_id, product_type_id, "Wheelbarrow", "29.99").await;
    add_product(user_id, product_type_id, "Kite", "2.99").await;
    add_product(user_id, product_type_id, "iPod", "49.99").await;

    let repo = ProductRepo::new();
    let listing = repo
        .get_all()
        .await
        .expect("Failed to load products")
        .expect("Catalog should not be empty");

    let titles: Vec<&str> = listing.iter().map(|p| p.title.as_str()).collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted, "catalog listing is alphabetical");
}

#[tokio::test]
#[serial_test::serial]
async fn test_search_by_title_matches_substrings() {
    setup().await.expect("Setup failed");
    let (user_id, product_type_id) = create_fixtures().await;

    add_product(user_id, product_type_id, "Box Kite", "5.99").await;
    add_product(user_id, product_type_id, "Kite String", "1.99").await;
    add_product(user_id, product_type_id, "Wheelbarrow", "29.99").await;

    let repo = ProductRepo::new();

    let hits = repo
        .search_by_title("Kite")
        .await
        .expect("Search failed")
        .expect("Expected matches");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Box Kite");
    assert_eq!(hits[1].title, "Kite String");

    let misses = repo
        .search_by_title("Drone")
        .await
        .expect("Search failed");
    assert!(misses.is_none(), "no matches yields None");
}

#[tokio::test]
#[serial_test::serial]
async fn test_add_returning_id_round_trips() {
    setup().await.expect("Setup failed");
    let (user_id, product_type_id) = create_fixtures().await;

    let product_id = add_product(user_id, product_type_id, "Kite", "2.99").await;

    let repo = ProductRepo::new();
    let product = repo
        .get_by_id(product_id)
        .await
        .expect("Failed to get product")
        .expect("Product not found");

    assert_eq!(product.title, "Kite");
    assert_eq!(product.price, Money(BigDecimal::from_str("2.99").unwrap()));
    assert_eq!(product.version, 0);
}

#[tokio::test]
#[serial_test::serial]
async fn test_versioned_update_applies_and_bumps_version() {
    setup().await.expect("Setup failed");
    let (user_id, product_type_id) = create_fixtures().await;

    let product_id = add_product(user_id, product_type_id, "Kite", "2.99").await;
    let repo = ProductRepo::new();

    let outcome = repo
        .update_versioned(
            product_id,
            0,
            UpdateProduct {
                product_type_id: None,
                title: None,
                description: None,
                price: Some(Money(BigDecimal::from_str("3.49").unwrap())),
                quantity: None,
                city: None,
                image_path: None,
            },
        )
        .await
        .expect("Update failed");
    assert_eq!(outcome, VersionedUpdate::Updated);

    let product = repo
        .get_by_id(product_id)
        .await
        .expect("Failed to get product")
        .expect("Product not found");
    assert_eq!(product.price, Money(BigDecimal::from_str("3.49").unwrap()));
    assert_eq!(product.version, 1);
}

#[tokio::test]
#[serial_test::serial]
async fn test_versioned_update_with_stale_version_conflicts() {
    setup().await.expect("Setup failed");
    let (user_id, product_type_id) = create_fixtures().await;

    let product_id = add_product(user_id, product_type_id, "Kite", "2.99").await;
    let repo = ProductRepo::new();

    let first_edit = UpdateProduct {
        product_type_id: None,
        title: Some("Box Kite"),
        description: None,
        price: None,
        quantity: None,
        city: None,
        image_path: None,
    };
    let outcome = repo
        .update_versioned(product_id, 0, first_edit)
        .await
        .expect("Update failed");
    assert_eq!(outcome, VersionedUpdate::Updated);

    // Second writer still holds version 0
    let stale_edit = UpdateProduct {
        product_type_id: None,
        title: Some("Stunt Kite"),
        description: None,
        price: None,
        quantity: None,
        city: None,
        image_path: None,
    };
    let outcome = repo
        .update_versioned(product_id, 0, stale_edit)
        .await
        .expect("Update failed");
    assert_eq!(outcome, VersionedUpdate::Conflict);

    let product = repo
        .get_by_id(product_id)
        .await
        .expect("Failed to get product")
        .expect("Product not found");
    assert_eq!(product.title, "Box Kite", "stale write left no trace");
}

#[tokio::test]
#[serial_test::serial]
async fn test_versioned_update_on_missing_row() {
    setup().await.expect("Setup failed");
    create_fixtures().await;

    let repo = ProductRepo::new();
    let outcome = repo
        .update_versioned(
            9999,
            0,
            UpdateProduct {
                product_type_id: None,
                title: Some("Ghost"),
                description: None,
                price: None,
                quantity: None,
                city: None,
                image_path: None,
            },
        )
        .await
        .expect("Update failed");

    assert_eq!(outcome, VersionedUpdate::Missing);
}

#[tokio::test]
#[serial_test::serial]
async fn test_delete_removes_unreferenced_product() {
    setup().await.expect("Setup failed");
    let (user_id, product_type_id) = create_fixtures().await;

    let product_id = add_product(user_id, product_type_id, "Kite", "2.99").await;
    let repo = ProductRepo::new();

    repo.delete(product_id).await.expect("Delete failed");

    let gone = repo
        .get_by_id(product_id)
        .await
        .expect("Failed to get product");
    assert!(gone.is_none());
}
