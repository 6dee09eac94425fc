use serde::{Deserialize, Serialize, Serializer};

use crate::errors::ServiceError;

/// A single named price. Names are not unique.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    pub name: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Whole prices go out as JSON integers (`4`, not `4.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

impl FoodItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self { name: name.into(), price }
    }
}

/// The whole collection as it goes over the wire: `{"food": [...]}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceList {
    pub food: Vec<FoodItem>,
}

impl PriceList {
    pub fn len(&self) -> usize { self.food.len() }

    pub fn is_empty(&self) -> bool { self.food.is_empty() }

    /// First item with exactly this name.
    pub fn find(&self, name: &str) -> Option<&FoodItem> {
        self.food.iter().find(|item| item.name == name)
    }
}

/// Contents of a freshly started service.
pub fn default_seed() -> Vec<FoodItem> {
    vec![
        FoodItem::new("apple", 1.0),
        FoodItem::new("orange", 2.0),
        FoodItem::new("banana", 3.0),
    ]
}

/// Parse a price query value. Surrounding whitespace is ignored; anything
/// that is not a finite number is rejected.
pub fn parse_price(param: &str, raw: Option<&str>) -> Result<f64, ServiceError> {
    let raw = raw.ok_or_else(|| ServiceError::validation(format!("missing query parameter `{}`", param)))?;
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ServiceError::validation(format!("`{}` must be a number, got {:?}", param, raw))),
    }
}

/// Require a present, non-blank name value.
pub fn require_name(param: &str, raw: Option<&str>) -> Result<String, ServiceError> {
    match raw {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        Some(_) => Err(ServiceError::validation(format!("`{}` must not be blank", param))),
        None => Err(ServiceError::validation(format!("missing query parameter `{}`", param))),
    }
}
