//! Annual savings calculation.
//!
//! The calculator is a pure function of an [`EstimateRequest`], a
//! [`SavingsLookup`] and a set of [`SavingsAssumptions`]. It performs no
//! validation: callers are expected to pass requests produced by
//! [`crate::utils::validation::validate_form`], whose `MAX_*` bounds keep
//! every product here inside `Decimal` range.

use crate::domain::model::{EstimateRequest, EstimateResult};
use crate::domain::ports::SavingsLookup;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Share of annual administrative time recovered.
pub const DEFAULT_ADMIN_RECOVERY_RATE: Decimal = dec!(0.70);

/// Units ordered per employee on each order.
pub const DEFAULT_UNITS_PER_EMPLOYEE_PER_ORDER: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsAssumptions {
    pub admin_recovery_rate: Decimal,
    pub units_per_employee_per_order: u32,
}

impl Default for SavingsAssumptions {
    fn default() -> Self {
        Self {
            admin_recovery_rate: DEFAULT_ADMIN_RECOVERY_RATE,
            units_per_employee_per_order: DEFAULT_UNITS_PER_EMPLOYEE_PER_ORDER,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SavingsCalculator {
    assumptions: SavingsAssumptions,
}

impl SavingsCalculator {
    pub fn new(assumptions: SavingsAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &SavingsAssumptions {
        &self.assumptions
    }

    pub fn compute<L: SavingsLookup + ?Sized>(
        &self,
        request: &EstimateRequest,
        table: &L,
    ) -> EstimateResult {
        let admin_savings = self.admin_savings(request);
        let product_savings = self.product_savings(request, table);
        EstimateResult::new(admin_savings, product_savings)
    }

    pub fn admin_savings(&self, request: &EstimateRequest) -> Decimal {
        let annual_cost = request.monthly_hours * request.hourly_rate * MONTHS_PER_YEAR;
        annual_cost * self.assumptions.admin_recovery_rate
    }

    pub fn product_savings<L: SavingsLookup + ?Sized>(
        &self,
        request: &EstimateRequest,
        table: &L,
    ) -> Decimal {
        // Unknown ids contribute nothing.
        let per_employee: Decimal = request
            .selected_products
            .iter()
            .map(|id| table.unit_savings(id).unwrap_or(Decimal::ZERO))
            .sum();

        per_employee
            * Decimal::from(request.employee_count)
            * Decimal::from(request.annual_frequency)
            * Decimal::from(self.assumptions.units_per_employee_per_order)
    }
}

/// Computes an estimate with the default assumptions.
pub fn compute<L: SavingsLookup + ?Sized>(request: &EstimateRequest, table: &L) -> EstimateResult {
    SavingsCalculator::default().compute(request, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::savings_table::ProductSavingsTable;

    fn table() -> ProductSavingsTable {
        ProductSavingsTable::new([("tshirt", dec!(7)), ("hoodie", dec!(12))]).unwrap()
    }

    fn request(products: &[&str]) -> EstimateRequest {
        EstimateRequest {
            employee_count: 10,
            hourly_rate: dec!(20),
            monthly_hours: dec!(5),
            annual_frequency: 4,
            selected_products: products.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_reference_scenario() {
        let result = compute(&request(&["tshirt", "hoodie"]), &table());
        assert_eq!(result.admin_savings, dec!(840));
        assert_eq!(result.product_savings, dec!(760));
        assert_eq!(result.total_savings, dec!(1600));
    }

    #[test]
    fn test_duplicates_count_twice() {
        let result = compute(&request(&["tshirt", "tshirt"]), &table());
        assert_eq!(result.product_savings, dec!(14) * dec!(10) * dec!(4));
    }

    #[test]
    fn test_recovery_rate_override() {
        let calculator = SavingsCalculator::new(SavingsAssumptions {
            admin_recovery_rate: dec!(0.35),
            ..SavingsAssumptions::default()
        });
        let result = calculator.compute(&request(&["tshirt"]), &table());
        assert_eq!(result.admin_savings, dec!(420));
        assert_eq!(result.product_savings, dec!(280));
    }

    #[test]
    fn test_units_per_employee_override() {
        let calculator = SavingsCalculator::new(SavingsAssumptions {
            units_per_employee_per_order: 3,
            ..SavingsAssumptions::default()
        });
        let result = calculator.compute(&request(&["tshirt", "hoodie"]), &table());
        assert_eq!(result.product_savings, dec!(2280));
        assert_eq!(result.admin_savings, dec!(840));
    }

    #[test]
    fn test_zero_frequency_degrades_to_zero() {
        let mut req = request(&["hoodie"]);
        req.annual_frequency = 0;
        let result = compute(&req, &table());
        assert_eq!(result.product_savings, Decimal::ZERO);
        assert_eq!(result.total_savings, result.admin_savings);
    }
}
