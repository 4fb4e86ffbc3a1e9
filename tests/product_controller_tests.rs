use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use bangazon_server_lib::api::server::app;
use bangazon_server_lib::data::database::Database;
use bangazon_server_lib::data::models::money::Money;
use bangazon_server_lib::data::models::product::NewProduct;
use bangazon_server_lib::data::models::product_type::NewProductType;
use bangazon_server_lib::data::models::user::NewUser;
use bangazon_server_lib::data::repos::implementors::order_repo::OrderRepo;
use bangazon_server_lib::data::repos::implementors::product_repo::ProductRepo;
use bangazon_server_lib::data::repos::implementors::product_type_repo::ProductTypeRepo;
use bangazon_server_lib::data::repos::implementors::user_repo::UserRepo;
use bangazon_server_lib::data::repos::traits::repository::Repository;
use bangazon_server_lib::security::jwt::JwtService;
use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use http_body_util::BodyExt;
use serde_json::json;
use std::str::FromStr;
use tower::ServiceExt;

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

async fn create_user_with_token(username: &str) -> (i32, String) {
    let repo = UserRepo::new();

    repo.add(NewUser {
        username,
        password_hash: "not-a-real-hash",
        street_address: None,
    })
    .await
    .expect("Failed to add user");

    let user_id = repo
        .get_by_username(username)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .user_id;

    let token = JwtService::new()
        .generate_token(user_id)
        .expect("Failed to generate token");

    (user_id, token)
}

async fn create_product_type(label: &str) -> i32 {
    let repo = ProductTypeRepo::new();
    repo.add(NewProductType { label })
        .await
        .expect("Failed to add product type");

    repo.get_all()
        .await
        .expect("Failed to load product types")
        .expect("No product types")
        .into_iter()
        .find(|t| t.label == label)
        .expect("Product type not found")
        .product_type_id
}

async fn seed_product(owner: i32, product_type_id: i32, title: &str, price: &str) -> i32 {
    ProductRepo::new()
        .add_returning_id(NewProduct {
            user_id: owner,
            product_type_id,
            title,
            description: None,
            price: Money(BigDecimal::from_str(price).unwrap()),
            quantity: 10,
            city: None,
            image_path: None,
        })
        .await
        .expect("Failed to add product")
}

fn json_request(method: Method, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body was not valid JSON")
}

#[tokio::test]
#[serial_test::serial]
async fn test_browsing_the_catalog_needs_no_token() {
    setup().await.expect("Setup failed");

    let (user_id, _) = create_user_with_token("seller").await;
    let type_id = create_product_type("Outdoor Goods").await;
    seed_product(user_id, type_id, "Wheelbarrow", "29.99").await;
    seed_product(user_id, type_id, "Kite", "2.99").await;

    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/v1/products")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let listing = body.as_array().expect("Expected a product list");
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0]["title"], "Kite");
    assert_eq!(listing[1]["title"], "Wheelbarrow");
}

#[tokio::test]
#[serial_test::serial]
async fn test_search_filters_by_title_substring() {
    setup().await.expect("Setup failed");

    let (user_id, _) = create_user_with_token("seller").await;
    let type_id = create_product_type("Outdoor Goods").await;
    seed_product(user_id, type_id, "Box Kite", "5.99").await;
    seed_product(user_id, type_id, "Wheelbarrow", "29.99").await;

    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/v1/products/search?q=Kite")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let hits = body.as_array().expect("Expected a product list");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Box Kite");
}

#[tokio::test]
#[serial_test::serial]
async fn test_get_unknown_product_is_not_found() {
    setup().await.expect("Setup failed");

    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/v1/products/9999")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial_test::serial]
async fn test_creating_a_product_requires_a_token() {
    setup().await.expect("Setup failed");

    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/products")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "title": "Kite",
                        "price": "2.99",
                        "quantity": 1,
                        "product_type_id": 1
                    })
                    .to_string(),
                ))
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_product_round_trips() {
    setup().await.expect("Setup failed");

    let (user_id, token) = create_user_with_token("seller").await;
    let type_id = create_product_type("Outdoor Goods").await;

    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/products",
            &token,
            json!({
                "title": "Kite",
                "description": "A red kite",
                "price": "2.99",
                "quantity": 5,
                "product_type_id": type_id
            }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Kite");
    assert_eq!(body["price"], "2.99");
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["version"], 0);
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_product_validates_its_fields() {
    setup().await.expect("Setup failed");

    let (_, token) = create_user_with_token("seller").await;
    let type_id = create_product_type("Outdoor Goods").await;

    // Blank title
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/products",
            &token,
            json!({
                "title": "  ",
                "price": "2.99",
                "quantity": 5,
                "product_type_id": type_id
            }),
        ))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Non-positive price
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/products",
            &token,
            json!({
                "title": "Kite",
                "price": "0",
                "quantity": 5,
                "product_type_id": type_id
            }),
        ))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative quantity
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/products",
            &token,
            json!({
                "title": "Kite",
                "price": "2.99",
                "quantity": -1,
                "product_type_id": type_id
            }),
        ))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown product type
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/products",
            &token,
            json!({
                "title": "Kite",
                "price": "2.99",
                "quantity": 5,
                "product_type_id": 9999
            }),
        ))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial_test::serial]
async fn test_stale_product_edit_conflicts() {
    setup().await.expect("Setup failed");

    let (user_id, token) = create_user_with_token("seller").await;
    let type_id = create_product_type("Outdoor Goods").await;
    let product_id = seed_product(user_id, type_id, "Kite", "2.99").await;

    let uri = format!("/api/v1/products/{}", product_id);

    let response = app()
        .oneshot(json_request(
            Method::PUT,
            &uri,
            &token,
            json!({ "title": "Box Kite", "version": 0 }),
        ))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Replaying the same version is now stale
    let response = app()
        .oneshot(json_request(
            Method::PUT,
            &uri,
            &token,
            json!({ "title": "Stunt Kite", "version": 0 }),
        ))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Editing a product that never existed is a plain not-found
    let response = app()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/products/9999",
            &token,
            json!({ "title": "Ghost", "version": 0 }),
        ))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial_test::serial]
async fn test_deleting_a_product_in_a_cart_conflicts() {
    setup().await.expect("Setup failed");

    let (user_id, token) = create_user_with_token("seller").await;
    let type_id = create_product_type("Outdoor Goods").await;
    let product_id = seed_product(user_id, type_id, "Kite", "2.99").await;

    OrderRepo::new()
        .add_to_cart(user_id, product_id)
        .await
        .expect("Failed to add to cart");

    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/v1/products/{}", product_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[serial_test::serial]
async fn test_product_types_listing() {
    setup().await.expect("Setup failed");

    create_product_type("Electronics").await;
    create_product_type("Outdoor Goods").await;

    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/v1/product-types")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let listing = body.as_array().expect("Expected a list");
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0]["label"], "Electronics");
    assert_eq!(listing[1]["label"], "Outdoor Goods");
}
