use crate::api::controllers::dto::product_dto::{CreateProductRequest, UpdateProductRequest};
use crate::data::models::money::Money;
use crate::data::models::product::{NewProduct, Product, UpdateProduct};
use crate::data::models::product_type::ProductType;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::implementors::product_type_repo::ProductTypeRepo;
use crate::data::repos::traits::repository::{Repository, VersionedUpdate};
use crate::services::errors::CatalogServiceError;
use bigdecimal::BigDecimal;
use diesel::result;

pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        CatalogService
    }

    /// Full catalog, alphabetical by title.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let repo = ProductRepo::new();

        let products = repo
            .get_all()
            .await
            .map_err(|_| CatalogServiceError::DatabaseError)?;

        Ok(products.unwrap_or_default())
    }

    /// Substring search over titles. An empty result is a valid answer.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogServiceError> {
        let repo = ProductRepo::new();

        let products = repo
            .search_by_title(term)
            .await
            .map_err(|_| CatalogServiceError::DatabaseError)?;

        Ok(products.unwrap_or_default())
    }

    pub async fn get_product(&self, product_id: i32) -> Result<Option<Product>, CatalogServiceError> {
        let repo = ProductRepo::new();

        repo.get_by_id(product_id)
            .await
            .map_err(|_| CatalogServiceError::DatabaseError)
    }

    /// Creates a product owned by the acting user and returns it as stored.
    pub async fn create_product(
        &self,
        user_id: i32,
        request: &CreateProductRequest,
    ) -> Result<Product, CatalogServiceError> {
        validate_title(&request.title)?;
        validate_price(&request.price)?;
        validate_quantity(request.quantity)?;
        self.require_product_type(request.product_type_id).await?;

        let repo = ProductRepo::new();

        let new_product = NewProduct {
            user_id,
            product_type_id: request.product_type_id,
            title: &request.title,
            description: request.description.as_deref(),
            price: Money(request.price.clone()),
            quantity: request.quantity,
            city: request.city.as_deref(),
            image_path: request.image_path.as_deref(),
        };

        let new_id = repo
            .add_returning_id(new_product)
            .await
            .map_err(|_| CatalogServiceError::DatabaseError)?;

        repo.get_by_id(new_id)
            .await
            .map_err(|_| CatalogServiceError::DatabaseError)?
            .ok_or(CatalogServiceError::DatabaseError)
    }

    /// Versioned edit. A version miss on a live row is a conflict the
    /// caller reports once; a missing row is NotFound.
    pub async fn update_product(
        &self,
        product_id: i32,
        request: &UpdateProductRequest,
    ) -> Result<(), CatalogServiceError> {
        if let Some(title) = request.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(price) = request.price.as_ref() {
            validate_price(price)?;
        }
        if let Some(quantity) = request.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(product_type_id) = request.product_type_id {
            self.require_product_type(product_type_id).await?;
        }

        let repo = ProductRepo::new();

        let form = UpdateProduct {
            product_type_id: request.product_type_id,
            title: request.title.as_deref(),
            description: request.description.as_deref(),
            price: request.price.clone().map(Money),
            quantity: request.quantity,
            city: request.city.as_deref(),
            image_path: request.image_path.as_deref(),
        };

        match repo
            .update_versioned(product_id, request.version, form)
            .await
        {
            Ok(VersionedUpdate::Updated) => Ok(()),
            Ok(VersionedUpdate::Conflict) => Err(CatalogServiceError::ConcurrencyConflict),
            Ok(VersionedUpdate::Missing) => Err(CatalogServiceError::ProductNotFound),
            Err(e) => {
                tracing::error!(product_id, error = %e, "product update failed");
                Err(CatalogServiceError::DatabaseError)
            }
        }
    }

    /// Deletes a product; rejected while order line items reference it.
    pub async fn delete_product(&self, product_id: i32) -> Result<(), CatalogServiceError> {
        let repo = ProductRepo::new();

        repo.get_by_id(product_id)
            .await
            .map_err(|_| CatalogServiceError::DatabaseError)?
            .ok_or(CatalogServiceError::ProductNotFound)?;

        match repo.delete(product_id).await {
            Ok(()) => Ok(()),
            Err(result::Error::DatabaseError(
                result::DatabaseErrorKind::ForeignKeyViolation,
                _,
            )) => Err(CatalogServiceError::ProductInUse),
            Err(e) => {
                tracing::error!(product_id, error = %e, "product deletion failed");
                Err(CatalogServiceError::DatabaseError)
            }
        }
    }

    /// Reference data for the category select list on product forms.
    pub async fn list_product_types(&self) -> Result<Vec<ProductType>, CatalogServiceError> {
        let repo = ProductTypeRepo::new();

        let product_types = repo
            .get_all()
            .await
            .map_err(|_| CatalogServiceError::DatabaseError)?;

        Ok(product_types.unwrap_or_default())
    }

    async fn require_product_type(&self, product_type_id: i32) -> Result<(), CatalogServiceError> {
        let repo = ProductTypeRepo::new();

        repo.get_by_id(product_type_id)
            .await
            .map_err(|_| CatalogServiceError::DatabaseError)?
            .ok_or(CatalogServiceError::ProductTypeNotFound)?;

        Ok(())
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_title(title: &str) -> Result<(), CatalogServiceError> {
    if title.trim().is_empty() {
        return Err(CatalogServiceError::ValidationFailed(
            "title must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: &BigDecimal) -> Result<(), CatalogServiceError> {
    if price <= &BigDecimal::from(0) {
        return Err(CatalogServiceError::ValidationFailed(
            "price must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), CatalogServiceError> {
    if quantity < 0 {
        return Err(CatalogServiceError::ValidationFailed(
            "quantity must not be negative".to_string(),
        ));
    }
    Ok(())
}
