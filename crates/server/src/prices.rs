use axum::{extract::{Path, Query, State}, Json};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use service::prices::PriceList;
use utoipa::IntoParams;

use crate::errors::JsonApiError;
use crate::state::ServerState;

// Query values stay as raw text and are parsed by the service layer. Path and
// query extractor rejections go through `JsonApiError` too, so every 4xx from
// these handlers carries a `{"message": ...}` body.

type FoodPath = WithRejection<Path<String>, JsonApiError>;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateQuery {
    /// Price of food to post
    #[serde(rename = "foodPrice")]
    #[param(value_type = Option<f64>)]
    pub food_price: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RenameQuery {
    /// Name to give the updated food
    #[serde(rename = "newName")]
    pub new_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RepriceQuery {
    /// Price to give the updated food
    #[serde(rename = "newPrice")]
    #[param(value_type = Option<f64>)]
    pub new_price: Option<String>,
}

#[utoipa::path(
    get,
    path = "/prices",
    tag = "prices",
    responses((status = 200, description = "Object food containing array of food prices", body = crate::openapi::PriceListDoc))
)]
pub async fn list(State(state): State<ServerState>) -> Json<PriceList> {
    Json(state.prices.list().await)
}

#[utoipa::path(
    post,
    path = "/prices/{foodItem}",
    tag = "prices",
    params(
        ("foodItem" = String, Path, description = "Name of food to post"),
        CreateQuery
    ),
    responses(
        (status = 200, description = "New food posted", body = crate::openapi::PriceListDoc),
        (status = 400, description = "Blank name, missing or non-numeric price", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Path(food_item), _): FoodPath,
    WithRejection(Query(q), _): WithRejection<Query<CreateQuery>, JsonApiError>,
) -> Result<Json<PriceList>, JsonApiError> {
    let list = state.prices.create(&food_item, q.food_price.as_deref()).await?;
    Ok(Json(list))
}

#[utoipa::path(
    patch,
    path = "/prices/{foodItem}",
    tag = "prices",
    params(
        ("foodItem" = String, Path, description = "Name of food to update"),
        RenameQuery
    ),
    responses(
        (status = 200, description = "Food name successfully updated", body = crate::openapi::PriceListDoc),
        (status = 400, description = "Missing or blank name", body = crate::openapi::MessageDoc),
        (status = 404, description = "Food not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn rename(
    State(state): State<ServerState>,
    WithRejection(Path(food_item), _): FoodPath,
    WithRejection(Query(q), _): WithRejection<Query<RenameQuery>, JsonApiError>,
) -> Result<Json<PriceList>, JsonApiError> {
    let list = state.prices.rename(&food_item, q.new_name.as_deref()).await?;
    Ok(Json(list))
}

#[utoipa::path(
    put,
    path = "/prices/{foodItem}",
    tag = "prices",
    params(
        ("foodItem" = String, Path, description = "Name of food to update"),
        RepriceQuery
    ),
    responses(
        (status = 200, description = "Food price successfully updated", body = crate::openapi::PriceListDoc),
        (status = 400, description = "Missing or non-numeric price", body = crate::openapi::MessageDoc),
        (status = 404, description = "Food not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn reprice(
    State(state): State<ServerState>,
    WithRejection(Path(food_item), _): FoodPath,
    WithRejection(Query(q), _): WithRejection<Query<RepriceQuery>, JsonApiError>,
) -> Result<Json<PriceList>, JsonApiError> {
    let list = state.prices.reprice(&food_item, q.new_price.as_deref()).await?;
    Ok(Json(list))
}

#[utoipa::path(
    delete,
    path = "/prices/{foodItem}",
    tag = "prices",
    params(("foodItem" = String, Path, description = "Name of food to delete")),
    responses(
        (status = 200, description = "Food successfully deleted", body = crate::openapi::PriceListDoc),
        (status = 404, description = "Food not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(food_item), _): FoodPath,
) -> Result<Json<PriceList>, JsonApiError> {
    let list = state.prices.delete(&food_item).await?;
    Ok(Json(list))
}
