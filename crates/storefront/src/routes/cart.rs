//! Cart API handlers.
//!
//! Every handler resolves the cart from the path, turns the request into a
//! [`CartAction`] and dispatches it through the cart's store. Carts must be
//! created with `POST /api/carts` first; unknown ids answer 404. Actions on
//! one cart are serialized by the cart's mutex, which is held across every
//! check and the dispatch that depends on it. Responses carry the resulting
//! cart state.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use webshop_core::{CartAction, CartState, CartStore, CouponId, Price, ProductId};

use crate::error::{AppError, Result, cart_breadcrumb};
use crate::models::CartId;
use crate::state::{AppState, SharedCart};

/// Largest amount of a single product accepted in one cart.
pub const MAX_ITEM_AMOUNT: i64 = 999;

/// Cart as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_id: CartId,
    #[serde(flatten)]
    pub cart: CartState,
    pub item_count: u32,
    pub shipping_cost: Price,
}

impl CartResponse {
    fn new(state: &AppState, cart_id: CartId, cart: CartState) -> Self {
        Self {
            cart_id,
            item_count: cart.item_count(),
            shipping_cost: cart.shipping_cost(&state.config().shipping),
            cart,
        }
    }
}

/// Add item request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
}

/// Set amount request body.
#[derive(Debug, Deserialize)]
pub struct SetAmountRequest {
    pub amount: i64,
}

/// Add coupon request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCouponRequest {
    pub coupon_id: CouponId,
}

// =============================================================================
// Helpers
// =============================================================================

/// Live store of an existing cart, or 404.
async fn existing_cart(state: &AppState, cart_id: &CartId) -> Result<SharedCart> {
    state
        .cart(cart_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("cart {cart_id}")))
}

/// Run `f` against the cart's store while holding its lock for the whole
/// call. The work runs on the blocking pool since dispatching writes to disk.
async fn with_cart<F>(state: &AppState, cart_id: CartId, f: F) -> Result<Json<CartResponse>>
where
    F: FnOnce(&mut CartStore) -> Result<CartState> + Send + 'static,
{
    let cart = existing_cart(state, &cart_id).await?;
    let mut guard = cart.lock_owned().await;
    let next = tokio::task::spawn_blocking(move || f(&mut guard)).await??;
    Ok(Json(CartResponse::new(state, cart_id, next)))
}

/// Dispatch `action` against the cart identified by `cart_id`.
async fn dispatch(state: &AppState, cart_id: CartId, action: CartAction) -> Result<Json<CartResponse>> {
    with_cart(state, cart_id, move |store| Ok(store.dispatch(action).clone())).await
}

fn amount_limit_exceeded() -> AppError {
    AppError::BadRequest(format!("amount must be at most {MAX_ITEM_AMOUNT}"))
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a new empty cart and return its id.
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> Result<(StatusCode, Json<CartResponse>)> {
    let cart_id = CartId::generate();
    let cart = state.create_cart(&cart_id).await?;
    let current = cart.lock().await.state().clone();
    tracing::info!(cart_id = %cart_id, "Cart created");
    Ok((StatusCode::CREATED, Json(CartResponse::new(&state, cart_id, current))))
}

/// Show a cart.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let cart_id = CartId::parse(&cart_id)?;
    let cart = existing_cart(&state, &cart_id).await?;
    let current = cart.lock().await.state().clone();
    Ok(Json(CartResponse::new(&state, cart_id, current)))
}

/// Put one more unit of a catalog product into the cart.
#[instrument(skip(state))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    let cart_id = CartId::parse(&cart_id)?;
    let product = state
        .catalog()
        .product(&body.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    cart_breadcrumb(&cart_id, "Added item", ("product_id", product.id.as_str()));
    with_cart(&state, cart_id, move |store| {
        let amount = store.state().item(&product.id).map_or(0, |item| item.amount);
        if i64::from(amount) >= MAX_ITEM_AMOUNT {
            return Err(amount_limit_exceeded());
        }
        Ok(store.dispatch(CartAction::AddItem(product)).clone())
    })
    .await
}

/// Set the amount of a product already in the cart.
#[instrument(skip(state))]
pub async fn set_amount(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(String, String)>,
    Json(body): Json<SetAmountRequest>,
) -> Result<Json<CartResponse>> {
    if body.amount > MAX_ITEM_AMOUNT {
        return Err(amount_limit_exceeded());
    }

    let cart_id = CartId::parse(&cart_id)?;
    update_amount(&state, cart_id, ProductId::new(product_id), body.amount).await
}

/// Remove a product from the cart.
#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>> {
    let cart_id = CartId::parse(&cart_id)?;
    update_amount(&state, cart_id, ProductId::new(product_id), 0).await
}

/// Look up the cart item and dispatch `SET_AMOUNT` under one lock, so a
/// concurrent removal turns into a 404 rather than a silent no-op.
async fn update_amount(
    state: &AppState,
    cart_id: CartId,
    product_id: ProductId,
    amount: i64,
) -> Result<Json<CartResponse>> {
    with_cart(state, cart_id, move |store| {
        let product = store
            .state()
            .item(&product_id)
            .map(|item| item.product.clone())
            .ok_or_else(|| AppError::NotFound(format!("product {product_id} in cart")))?;
        Ok(store.dispatch(CartAction::SetAmount { product, amount }).clone())
    })
    .await
}

/// Apply a catalog coupon to the cart.
#[instrument(skip(state))]
pub async fn add_coupon(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Json(body): Json<AddCouponRequest>,
) -> Result<Json<CartResponse>> {
    let cart_id = CartId::parse(&cart_id)?;
    let coupon = state
        .catalog()
        .coupon(&body.coupon_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("coupon {}", body.coupon_id)))?;

    cart_breadcrumb(&cart_id, "Applied coupon", ("coupon_id", coupon.id.as_str()));
    dispatch(&state, cart_id, CartAction::AddCoupon(coupon)).await
}

/// Remove a coupon from the cart. Removing a coupon that is not applied is
/// not an error.
#[instrument(skip(state))]
pub async fn remove_coupon(
    State(state): State<AppState>,
    Path((cart_id, coupon_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>> {
    let cart_id = CartId::parse(&cart_id)?;
    dispatch(&state, cart_id, CartAction::RemoveCoupon(CouponId::new(coupon_id))).await
}

/// Reconcile the stored cart with the current catalog.
///
/// Items whose product left the catalog are dropped; the rest pick up current
/// prices and texts.
#[instrument(skip(state))]
pub async fn refresh(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let cart_id = CartId::parse(&cart_id)?;
    let products = state.catalog().products().to_vec();
    dispatch(&state, cart_id, CartAction::ProductsLoaded(products)).await
}
