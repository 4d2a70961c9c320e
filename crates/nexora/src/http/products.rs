//! `/api/products`: the catalogue.

use super::error::ApiError;
use super::extract::{ApiJson, AuthUser};
use super::validate::positive_amount;
use super::AppState;
use crate::model::{Currency, Price, ProductCreate, ProductId, ProductQuery, ProductUpdate, Role};
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

const MAX_IMAGES: usize = 5;
const MAX_DESCRIPTION: usize = 500;
const PAGE_LIMIT: usize = 20;
const MIB: usize = 1024 * 1024;
const MAX_IMAGE_BYTES: usize = 5 * MIB;
/// Five full-size images plus the text fields.
const MAX_UPLOAD_BYTES: usize = MAX_IMAGES * MAX_IMAGE_BYTES + MIB;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list)
                .post(create)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/seller", get(seller_products))
        .route("/:id", get(get_one).patch(update).delete(remove))
}

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid product id"))
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!(
            "Upload is larger than {} MB",
            MAX_UPLOAD_BYTES / MIB
        ))
    } else {
        ApiError::bad_request(e.body_text())
    }
}

/// Trimmed; blank means absent.
fn description(raw: Option<&str>) -> Result<Option<String>, ApiError> {
    let description = raw.map(str::trim).filter(|d| !d.is_empty());
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION) {
        return Err(ApiError::bad_request("Description max length is 500 characters"));
    }
    Ok(description.map(str::to_string))
}

/// Unparsable numbers fall back to their defaults.
fn page(params: &HashMap<String, String>) -> (usize, usize) {
    let number = |key: &str| params.get(key).and_then(|v| v.trim().parse::<usize>().ok());
    let skip = number("skip").unwrap_or(0);
    let limit = number("limit").filter(|l| *l > 0).unwrap_or(PAGE_LIMIT).min(PAGE_LIMIT);
    (skip, limit)
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let price = |key: &str| params.get(key).and_then(|v| v.trim().parse::<f64>().ok());
    let (skip, limit) = page(&params);
    let data = state
        .products
        .search(ProductQuery {
            text: params.get("q").map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
            min_price: price("minprice"),
            max_price: price("maxprice"),
            seller: None,
            skip,
            limit,
        })
        .await?;
    Ok(Json(json!({ "data": data })))
}

async fn seller_products(
    State(state): State<AppState>,
    caller: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::Seller])?;
    let (skip, limit) = page(&params);
    let data = state
        .products
        .search(ProductQuery {
            seller: Some(caller.id()),
            skip,
            limit,
            ..Default::default()
        })
        .await?;
    Ok(Json(json!({ "data": data })))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let product = state.products.product(parse_id(&id)?).await?;
    Ok(Json(json!({ "product": product })))
}

/// Multipart: `title`, `description`, `priceAmount`, `priceCurrency`, `stock`
/// and up to five `image` files.
async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    caller.require(&[Role::Admin, Role::Seller])?;

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut files: Vec<Vec<u8>> = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            if files.len() == MAX_IMAGES {
                return Err(ApiError::bad_request("You can upload at most 5 images"));
            }
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if bytes.len() > MAX_IMAGE_BYTES {
                return Err(ApiError::PayloadTooLarge(format!(
                    "Each image must be at most {} MB",
                    MAX_IMAGE_BYTES / MIB
                )));
            }
            files.push(bytes.to_vec());
        } else {
            let text = field.text().await.map_err(multipart_error)?;
            fields.insert(name, text);
        }
    }

    let title = fields.get("title").map(|t| t.trim()).unwrap_or_default();
    if title.is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }
    let description = description(fields.get("description").map(String::as_str))?;
    let amount = match fields.get("priceAmount").map(|a| a.trim()) {
        None | Some("") => return Err(ApiError::bad_request("price amount is required")),
        Some(raw) => positive_amount(&Value::String(raw.to_string()))
            .ok_or_else(|| ApiError::bad_request("price amount must be a positive number"))?,
    };
    let currency: Currency = match fields.get("priceCurrency") {
        None => Currency::default(),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ApiError::bad_request("price Currency must be USD or INR"))?,
    };
    let stock = match fields.get("stock").map(|s| s.trim()) {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| ApiError::bad_request("Stock must be a non-negative integer"))?,
    };

    let mut images = Vec::with_capacity(files.len());
    for bytes in files {
        images.push(state.images.upload(bytes).await?);
    }

    let product = state
        .products
        .create_product(ProductCreate {
            title: title.to_string(),
            description,
            price: Price::new(amount, currency),
            stock,
            seller: caller.id(),
            images,
        })
        .await?;
    info!(product = %product.id, seller = %product.seller, "Product created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product Created", "data": product })),
    ))
}

#[derive(Deserialize)]
struct PriceBody {
    amount: Option<Value>,
    currency: Option<String>,
}

/// Anything outside these fields is ignored.
#[derive(Deserialize)]
struct UpdateBody {
    title: Option<String>,
    description: Option<String>,
    price: Option<PriceBody>,
    stock: Option<Value>,
}

async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateBody>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::Seller])?;
    let id = parse_id(&id)?;

    let title = body.title.map(|t| t.trim().to_string());
    if title.as_ref().is_some_and(|t| t.is_empty()) {
        return Err(ApiError::bad_request("Title is required"));
    }
    let description = description(body.description.as_deref())?;
    let (price_amount, price_currency) = match body.price {
        None => (None, None),
        Some(price) => {
            let amount = price
                .amount
                .map(|raw| {
                    positive_amount(&raw).ok_or_else(|| {
                        ApiError::bad_request("price amount must be a positive number")
                    })
                })
                .transpose()?;
            let currency = price
                .currency
                .map(|raw| {
                    raw.parse::<Currency>()
                        .map_err(|_| ApiError::bad_request("price Currency must be USD or INR"))
                })
                .transpose()?;
            (amount, currency)
        }
    };
    let stock = body
        .stock
        .map(|raw| {
            raw.as_u64()
                .and_then(|s| u32::try_from(s).ok())
                .ok_or_else(|| ApiError::bad_request("Stock must be a non-negative integer"))
        })
        .transpose()?;

    let product = state
        .products
        .update_product(
            id,
            ProductUpdate {
                requested_by: caller.id(),
                title,
                description,
                price_amount,
                price_currency,
                stock,
            },
        )
        .await?;
    Ok(Json(json!({ "message": "Product updated successfully", "product": product })))
}

async fn remove(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::Seller])?;
    state.products.delete_product(parse_id(&id)?, caller.id()).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn paging_defaults_and_caps() {
        assert_eq!(page(&params(&[])), (0, 20));
        assert_eq!(page(&params(&[("skip", "5"), ("limit", "10")])), (5, 10));
        assert_eq!(page(&params(&[("limit", "100")])), (0, 20));
        assert_eq!(page(&params(&[("skip", "x"), ("limit", "y")])), (0, 20));
    }

    #[test]
    fn blank_descriptions_are_dropped() {
        assert_eq!(description(None).unwrap(), None);
        assert_eq!(description(Some("   ")).unwrap(), None);
        assert_eq!(
            description(Some("  Hand-thrown clay  ")).unwrap().as_deref(),
            Some("Hand-thrown clay")
        );
        let long = "x".repeat(MAX_DESCRIPTION + 1);
        assert_eq!(
            description(Some(&long)).unwrap_err().to_string(),
            "Description max length is 500 characters"
        );
    }

    #[test]
    fn product_ids_need_the_prefix() {
        assert_eq!(parse_id("product_4").unwrap(), ProductId(4));
        assert_eq!(
            parse_id("invalid-id").unwrap_err().to_string(),
            "Invalid product id"
        );
    }
}
