use crate::utils::error::{Result, ZooError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ZooError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ZooError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ZooError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ZooError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ZooError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 浮點數欄位：NaN 與無限大一律拒絕
pub fn validate_finite_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ZooError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    validate_range(field_name, value, min, max)
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ZooError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// 名稱不分大小寫不可重複（圍欄、員工）
pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.to_lowercase()) {
            return Err(ZooError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Duplicate name".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("report", "./out/report.csv").is_ok());
        assert!(validate_path("report", "").is_err());
        assert!(validate_path("report", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("enclosures.capacity", 3, 1).is_ok());
        assert!(validate_positive_number("enclosures.capacity", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("animals.age", 12, 0, 50).is_ok());
        assert!(validate_range("animals.age", 51, 0, 50).is_err());
        assert!(validate_range("zoo.ticket_price", -1.0, 0.0, 1000.0).is_err());
    }

    #[test]
    fn test_validate_finite_range_rejects_nan_and_infinity() {
        assert!(validate_finite_range("zoo.initial_funds", 50_000.0, 0.0, f64::MAX).is_ok());
        assert!(validate_finite_range("zoo.initial_funds", f64::NAN, 0.0, f64::MAX).is_err());
        assert!(validate_finite_range("zoo.initial_funds", f64::INFINITY, 0.0, f64::MAX).is_err());
        assert!(validate_finite_range("zoo.initial_funds", -1.0, 0.0, f64::MAX).is_err());
    }

    #[test]
    fn test_validate_unique_names_ignores_case() {
        assert!(validate_unique_names("enclosures.name", ["Pool", "Peak"]).is_ok());
        assert!(validate_unique_names("enclosures.name", ["Pool", "pool"]).is_err());
    }
}
