//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product class, selects the cost formula applied to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductClass {
    Packaging,
    WideFormat,
    Leaflets,
    /// Any class without a dedicated formula
    Other,
}

impl ProductClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductClass::Packaging => "PACKAGING",
            ProductClass::WideFormat => "WIDE_FORMAT",
            ProductClass::Leaflets => "LEAFLETS",
            ProductClass::Other => "OTHER",
        }
    }

    /// Whether material cost is priced per square meter for this class
    pub fn is_area_priced(&self) -> bool {
        matches!(self, ProductClass::WideFormat)
    }
}

impl From<&str> for ProductClass {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "PACKAGING" => ProductClass::Packaging,
            "WIDE_FORMAT" => ProductClass::WideFormat,
            "LEAFLETS" => ProductClass::Leaflets,
            _ => ProductClass::Other,
        }
    }
}

impl From<String> for ProductClass {
    fn from(value: String) -> Self {
        ProductClass::from(value.as_str())
    }
}

impl From<ProductClass> for String {
    fn from(value: ProductClass) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ProductClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog product as seen by the cost calculator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub product_class: ProductClass,
    pub base_price: Decimal,
    /// Material cost per m², only meaningful for area-priced classes
    pub cost_per_sq_meter: Option<Decimal>,
    /// Default sheet length in meters
    pub default_length: Option<Decimal>,
    /// Default sheet width in meters
    pub default_width: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_class_from_tag() {
        assert_eq!(ProductClass::from("PACKAGING"), ProductClass::Packaging);
        assert_eq!(ProductClass::from("WIDE_FORMAT"), ProductClass::WideFormat);
        assert_eq!(ProductClass::from("leaflets"), ProductClass::Leaflets);
        assert_eq!(ProductClass::from("BUSINESS_CARDS"), ProductClass::Other);
        assert_eq!(ProductClass::from(""), ProductClass::Other);
    }

    #[test]
    fn test_product_class_serde() {
        let class: ProductClass = serde_json::from_str("\"WIDE_FORMAT\"").unwrap();
        assert_eq!(class, ProductClass::WideFormat);

        let unknown: ProductClass = serde_json::from_str("\"STICKERS\"").unwrap();
        assert_eq!(unknown, ProductClass::Other);

        assert_eq!(
            serde_json::to_string(&ProductClass::Packaging).unwrap(),
            "\"PACKAGING\""
        );
    }

    #[test]
    fn test_only_wide_format_is_area_priced() {
        assert!(ProductClass::WideFormat.is_area_priced());
        assert!(!ProductClass::Packaging.is_area_priced());
        assert!(!ProductClass::Leaflets.is_area_priced());
        assert!(!ProductClass::Other.is_area_priced());
    }
}
