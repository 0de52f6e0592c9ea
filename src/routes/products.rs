// ABOUTME: Route handlers for product listings and admin product management
// ABOUTME: Accepts multipart forms with an optional thumbnail or JSON bodies for writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Product routes
//!
//! Listing is public. Create, update and delete sit behind the admin guard,
//! which runs as a route layer ahead of the [`ProductForm`] extractor, so an
//! unauthenticated upload is refused before any of its bytes are read.

use super::{json_rejection, query_rejection};
use crate::constants::{limits, uploads};
use crate::database_plugins::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::middleware::require_admin;
use crate::resources::ServerResources;
use crate::uploads::{multipart_error, read_thumbnail, ThumbnailUpload};
use crate::validation::{
    validate_new_product, validate_product_patch, validate_product_query, ProductPayload,
    ProductQuery,
};
use async_trait::async_trait;
use axum::extract::rejection::QueryRejection;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Path, Query, Request, State};
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::middleware;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::Value;
use site_core::models::Product;
use std::sync::Arc;
use tracing::info;

/// A product write body: JSON, or a multipart form with an optional thumbnail file
#[derive(Debug, Default)]
pub struct ProductForm {
    /// Text fields
    pub payload: ProductPayload,
    /// Uploaded image, if a file was attached
    pub thumbnail: Option<ThumbnailUpload>,
}

impl ProductForm {
    /// Blank values clear nullable fields
    fn nullable(value: String) -> Option<String> {
        (!value.trim().is_empty()).then_some(value)
    }

    fn set_text(&mut self, name: &str, value: String) {
        let payload = &mut self.payload;
        match name {
            "name" => payload.name = Some(value),
            "description" => payload.description = Some(value),
            "price" => payload.price = Some(value),
            "status" => payload.status = Some(value),
            "tag" => payload.tag = Some(Self::nullable(value)),
            "thumbnail" => payload.thumbnail = Some(Self::nullable(value)),
            // Only a literal `null` clears; an empty value means "not supplied"
            "features" => {
                payload.features = match value.trim() {
                    "" => None,
                    "null" => Some(None),
                    _ => Some(Some(Value::String(value))),
                };
            }
            _ => {}
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e))?
        {
            let name = field.name().unwrap_or_default().to_owned();

            if field.file_name().is_some() {
                if name != uploads::THUMBNAIL_FIELD || form.thumbnail.is_some() {
                    return Err(AppError::invalid_upload(uploads::UNEXPECTED_FILE_FIELD));
                }
                form.thumbnail = read_thumbnail(field).await?;
                continue;
            }

            let value = field.text().await.map_err(|e| multipart_error(&e))?;
            form.set_text(&name, value);
        }

        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_input(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Json(payload) = Json::<ProductPayload>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(Self {
            payload,
            thumbnail: None,
        })
    }
}

/// Product routes implementation
pub struct ProductRoutes;

impl ProductRoutes {
    /// Create the product routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let admin = middleware::from_fn_with_state(resources.clone(), require_admin);
        let body_limit =
            DefaultBodyLimit::max(limits::MAX_THUMBNAIL_BYTES + limits::MULTIPART_FORM_OVERHEAD_BYTES);

        Router::new()
            .route(
                "/api/products",
                get(Self::list_products).merge(
                    post(Self::create_product)
                        .layer(body_limit)
                        .route_layer(admin.clone()),
                ),
            )
            .route(
                "/api/products/:id",
                put(Self::update_product)
                    .layer(body_limit)
                    .delete(Self::delete_product)
                    .route_layer(admin),
            )
            .with_state(resources)
    }

    async fn list_products(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<ProductQuery>, QueryRejection>,
    ) -> AppResult<Json<Vec<Product>>> {
        let Query(query) = query.map_err(query_rejection)?;
        let filter = validate_product_query(&query)?;
        Ok(Json(resources.database.list_products(&filter).await?))
    }

    async fn create_product(
        State(resources): State<Arc<ServerResources>>,
        form: ProductForm,
    ) -> AppResult<(StatusCode, Json<Product>)> {
        let mut product = validate_new_product(&form.payload)?;

        // Written only once the fields are known to be valid
        if let Some(upload) = &form.thumbnail {
            product.thumbnail = Some(resources.uploads.save(upload).await?);
        }

        let product = resources.database.create_product(product).await?;
        info!(product.id = %product.id, product.status = %product.status, "Product created");
        Ok((StatusCode::CREATED, Json(product)))
    }

    async fn update_product(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        form: ProductForm,
    ) -> AppResult<Json<Product>> {
        let mut patch = validate_product_patch(&form.payload)?;

        if let Some(upload) = &form.thumbnail {
            if resources.database.get_product(&id).await?.is_none() {
                return Err(Self::not_found(&id));
            }
            patch.thumbnail = Some(Some(resources.uploads.save(upload).await?));
        }

        let product = resources
            .database
            .update_product(&id, &patch)
            .await?
            .ok_or_else(|| Self::not_found(&id))?;

        info!(product.id = %product.id, "Product updated");
        Ok(Json(product))
    }

    async fn delete_product(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> AppResult<StatusCode> {
        if !resources.database.delete_product(&id).await? {
            return Err(Self::not_found(&id));
        }
        info!(product.id = %id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    }

    fn not_found(id: &str) -> AppError {
        AppError::not_found(format!("Product '{id}'"))
    }
}
