use crate::utils::error::{ShopError, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ShopError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ShopError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Product names must contain something other than whitespace.
pub fn validate_product_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ShopError::validation("name", "Product name cannot be empty"));
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ShopError::validation(
            "price",
            format!("Price must not be negative, got {}", price),
        ));
    }
    Ok(())
}

/// Rejects batches in which two products share an id.
pub fn validate_unique_ids<I>(ids: I) -> Result<()>
where
    I: IntoIterator<Item = u32>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ShopError::validation(
                "id",
                format!("Duplicate product id {} in batch", id),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.endpoint", "https://example.com").is_ok());
        assert!(validate_url("source.endpoint", "http://example.com").is_ok());
        assert!(validate_url("source.endpoint", "").is_err());
        assert!(validate_url("source.endpoint", "invalid-url").is_err());
        assert!(validate_url("source.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Mug").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(1999, 2)).is_ok());
        assert!(validate_price(Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn test_validate_unique_ids() {
        assert!(validate_unique_ids([1, 2, 3]).is_ok());
        assert!(validate_unique_ids(Vec::<u32>::new()).is_ok());
        assert!(validate_unique_ids([1, 2, 1]).is_err());
    }
}
