use crate::api::controllers::dto::user_dto::{LoginDTO, NewUserDTO};
use crate::api::response::LoginResponse;
use crate::data::models::user::NewUser;
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::auth::AuthService;
use crate::security::jwt::JwtService;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use diesel::result;

pub async fn register_user(Json(new_user): Json<NewUserDTO>) -> impl IntoResponse {
    let auth = AuthService::new();
    let repo = UserRepo::new();

    if new_user.username.trim().is_empty() || new_user.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "Username and password are required").into_response();
    }

    let hashed_password = match auth.hash_password(&new_user.password).await {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Error hashing password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process password",
            )
                .into_response();
        }
    };

    let record = NewUser {
        username: &new_user.username,
        password_hash: &hashed_password,
        street_address: new_user.street_address.as_deref(),
    };

    match repo.add(record).await {
        Ok(_) => {
            tracing::info!("User created: {}", new_user.username);
            (StatusCode::CREATED, "User created").into_response()
        }
        Err(result::Error::DatabaseError(result::DatabaseErrorKind::UniqueViolation, _)) => {
            (StatusCode::CONFLICT, "Username already taken").into_response()
        }
        Err(e) => {
            tracing::error!("Error creating user: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user").into_response()
        }
    }
}

pub async fn login(Json(login_user): Json<LoginDTO>) -> impl IntoResponse {
    let auth = AuthService::new();
    let repo = UserRepo::new();
    let jwt = JwtService::new();

    let user = match repo.get_by_username(&login_user.username).await {
        Ok(Some(user)) => user,
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => {
            tracing::error!("Error fetching user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user").into_response();
        }
    };

    match auth
        .verify_password(&login_user.password, &user.password_hash)
        .await
    {
        Ok(true) => match jwt.generate_token(user.user_id) {
            Ok(token) => (
                StatusCode::OK,
                Json(LoginResponse {
                    token,
                    message: "Login successful".to_string(),
                }),
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Token generation error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create token").into_response()
            }
        },
        Ok(false) => (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response(),
        Err(e) => {
            tracing::error!("Error verifying password: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to verify password",
            )
                .into_response()
        }
    }
}
