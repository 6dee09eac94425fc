use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct FoodItemDoc { pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct PriceListDoc { pub food: Vec<FoodItemDoc> }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    info(title = "Personal Budget API", version = "1.0.0", description = "Food price list"),
    paths(
        crate::routes::health,
        crate::prices::list,
        crate::prices::create,
        crate::prices::rename,
        crate::prices::reprice,
        crate::prices::delete,
    ),
    components(
        schemas(
            HealthResponse,
            FoodItemDoc,
            PriceListDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "prices")
    )
)]
pub struct ApiDoc;
