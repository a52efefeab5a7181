use crate::domain::model::{EstimateForm, EstimateRequest};
use crate::utils::error::{EstimatorError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

// Upper bounds keep every intermediate product of the calculator well
// below `Decimal::MAX` (~7.9e28): admin <= 1e4 * 1e6 * 12, product
// savings <= (1e3 * 1e6) * 1e7 * 1e3 * 1e3.
pub const MAX_EMPLOYEE_COUNT: u32 = 10_000_000;
pub const MAX_ANNUAL_FREQUENCY: u32 = 1_000;
pub const MAX_HOURLY_RATE: Decimal = dec!(1000000);
pub const MAX_MONTHLY_HOURS: Decimal = dec!(10000);
pub const MAX_SELECTED_PRODUCTS: usize = 1_000;
pub const MAX_UNITS_PER_EMPLOYEE_PER_ORDER: u32 = 1_000;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Turns raw form values into a calculator request.
///
/// Rules: employee count is an integer >= 1, hourly rate and monthly hours
/// are decimals >= 0, frequency is an integer > 0, and at least one product
/// is selected. Every field is also capped by the `MAX_*` bounds above.
/// Blank product entries are dropped; duplicates are kept.
pub fn validate_form(form: &EstimateForm) -> Result<EstimateRequest> {
    let employee_count =
        parse_count("employee_count", &form.employee_count, 1, MAX_EMPLOYEE_COUNT)?;
    let hourly_rate =
        parse_non_negative_decimal("hourly_rate", &form.hourly_rate, MAX_HOURLY_RATE)?;
    let monthly_hours =
        parse_non_negative_decimal("monthly_hours", &form.monthly_hours, MAX_MONTHLY_HOURS)?;
    let annual_frequency = parse_count(
        "annual_frequency",
        &form.annual_frequency,
        1,
        MAX_ANNUAL_FREQUENCY,
    )?;

    let selected_products: Vec<String> = form
        .products
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if selected_products.is_empty() {
        return Err(EstimatorError::validation(
            "products",
            form.products.join(","),
            "select at least one product",
        ));
    }
    if selected_products.len() > MAX_SELECTED_PRODUCTS {
        return Err(EstimatorError::validation(
            "products",
            format!("{} entries", selected_products.len()),
            format!("select at most {} products", MAX_SELECTED_PRODUCTS),
        ));
    }

    Ok(EstimateRequest {
        employee_count,
        hourly_rate,
        monthly_hours,
        annual_frequency,
        selected_products,
    })
}

pub fn parse_count(field_name: &str, raw: &str, min_value: u32, max_value: u32) -> Result<u32> {
    let value = raw.trim();
    let parsed = value.parse::<u32>().map_err(|_| {
        EstimatorError::validation(field_name, value, "expected a whole number")
    })?;
    if parsed < min_value || parsed > max_value {
        return Err(EstimatorError::validation(
            field_name,
            value,
            format!("value must be between {} and {}", min_value, max_value),
        ));
    }
    Ok(parsed)
}

pub fn parse_non_negative_decimal(field_name: &str, raw: &str, max_value: Decimal) -> Result<Decimal> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(EstimatorError::validation(field_name, value, "value is required"));
    }
    let parsed = Decimal::from_str(value)
        .map_err(|_| EstimatorError::validation(field_name, value, "expected a number"))?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(EstimatorError::validation(
            field_name,
            value,
            "value cannot be negative",
        ));
    }
    if parsed > max_value {
        return Err(EstimatorError::validation(
            field_name,
            value,
            format!("value cannot exceed {}", max_value),
        ));
    }
    Ok(parsed)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EstimatorError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
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
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form() -> EstimateForm {
        EstimateForm {
            employee_count: "10".to_string(),
            hourly_rate: "20".to_string(),
            monthly_hours: "5".to_string(),
            annual_frequency: "4".to_string(),
            products: vec!["tshirt".to_string(), "hoodie".to_string()],
        }
    }

    #[test]
    fn test_valid_form() {
        let request = validate_form(&form()).unwrap();
        assert_eq!(request.employee_count, 10);
        assert_eq!(request.hourly_rate, dec!(20));
        assert_eq!(request.monthly_hours, dec!(5));
        assert_eq!(request.annual_frequency, 4);
        assert_eq!(request.selected_products, vec!["tshirt", "hoodie"]);
    }

    #[test]
    fn test_rejects_zero_employees() {
        let mut f = form();
        f.employee_count = "0".to_string();
        let err = validate_form(&f).unwrap_err();
        assert!(
            matches!(err, EstimatorError::ValidationError { ref field, .. } if field == "employee_count")
        );
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        let mut f = form();
        f.hourly_rate = "twenty".to_string();
        assert!(validate_form(&f).is_err());

        let mut f = form();
        f.monthly_hours = "NaN".to_string();
        assert!(validate_form(&f).is_err());

        let mut f = form();
        f.employee_count = "2.5".to_string();
        assert!(validate_form(&f).is_err());
    }

    #[test]
    fn test_rejects_negative_rate_and_hours() {
        let mut f = form();
        f.hourly_rate = "-1".to_string();
        assert!(validate_form(&f).is_err());

        let mut f = form();
        f.monthly_hours = "-0.5".to_string();
        assert!(validate_form(&f).is_err());
    }

    #[test]
    fn test_accepts_zero_rate_and_hours() {
        let mut f = form();
        f.hourly_rate = "0".to_string();
        f.monthly_hours = " 0.0 ".to_string();
        let request = validate_form(&f).unwrap();
        assert!(request.hourly_rate.is_zero());
        assert!(request.monthly_hours.is_zero());
    }

    #[test]
    fn test_rejects_values_that_would_overflow() {
        let mut f = form();
        f.employee_count = "1".to_string();
        f.annual_frequency = "1".to_string();
        f.hourly_rate = "1000000000000000".to_string();
        f.monthly_hours = "1000000000000000".to_string();
        let err = validate_form(&f).unwrap_err();
        assert!(
            matches!(err, EstimatorError::ValidationError { ref field, .. } if field == "hourly_rate")
        );

        let mut f = form();
        f.monthly_hours = "10000.01".to_string();
        assert!(validate_form(&f).is_err());

        let mut f = form();
        f.employee_count = "4000000000".to_string();
        assert!(validate_form(&f).is_err());

        let mut f = form();
        f.annual_frequency = "1001".to_string();
        assert!(validate_form(&f).is_err());

        let mut f = form();
        f.products = vec!["tshirt".to_string(); MAX_SELECTED_PRODUCTS + 1];
        assert!(validate_form(&f).is_err());
    }

    #[test]
    fn test_accepts_values_at_the_bounds() {
        let f = EstimateForm {
            employee_count: MAX_EMPLOYEE_COUNT.to_string(),
            hourly_rate: MAX_HOURLY_RATE.to_string(),
            monthly_hours: MAX_MONTHLY_HOURS.to_string(),
            annual_frequency: MAX_ANNUAL_FREQUENCY.to_string(),
            products: vec!["hoodie".to_string(); MAX_SELECTED_PRODUCTS],
        };
        let request = validate_form(&f).unwrap();
        assert_eq!(request.employee_count, MAX_EMPLOYEE_COUNT);
        assert_eq!(request.selected_products.len(), MAX_SELECTED_PRODUCTS);
    }

    #[test]
    fn test_rejects_zero_frequency() {
        let mut f = form();
        f.annual_frequency = "0".to_string();
        assert!(validate_form(&f).is_err());
    }

    #[test]
    fn test_requires_a_product() {
        let mut f = form();
        f.products = vec![" ".to_string()];
        assert!(validate_form(&f).is_err());
    }

    #[test]
    fn test_keeps_duplicates_and_unknown_ids() {
        let mut f = form();
        f.products = vec![
            "tshirt".to_string(),
            " tshirt ".to_string(),
            "unknown-id".to_string(),
        ];
        let request = validate_form(&f).unwrap();
        assert_eq!(request.selected_products, vec!["tshirt", "tshirt", "unknown-id"]);
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("assumptions.admin_recovery_rate", dec!(0.7), dec!(0), dec!(1)).is_ok());
        assert!(validate_range("assumptions.admin_recovery_rate", dec!(1.2), dec!(0), dec!(1)).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("batch.on_invalid_row", "skip", &["skip", "fail"]).is_ok());
        assert!(validate_one_of("batch.on_invalid_row", "ignore", &["skip", "fail"]).is_err());
    }
}
