use crate::domain::ports::SavingsLookup;
use crate::utils::error::{EstimatorError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};

/// Built-in per-unit savings, used when the configuration has no
/// `[products]` section.
pub const DEFAULT_PRODUCT_SAVINGS: &[(&str, Decimal)] = &[
    ("tshirt", dec!(7)),
    ("hoodie", dec!(12)),
    ("cap", dec!(4)),
    ("tote-bag", dec!(3)),
    ("water-bottle", dec!(5)),
    ("notebook", dec!(2)),
    ("pen", dec!(0.5)),
    ("jacket", dec!(18)),
];

/// Largest accepted per-unit savings.
pub const MAX_UNIT_SAVINGS: Decimal = dec!(1000000);

/// Immutable product id -> unit savings map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductSavingsTable {
    entries: HashMap<String, Decimal>,
}

impl ProductSavingsTable {
    /// Builds a table, rejecting empty identifiers and amounts outside
    /// `0..=MAX_UNIT_SAVINGS`.
    pub fn new<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        let mut map = HashMap::new();
        for (id, amount) in entries {
            let id: String = id.into();
            if id.trim().is_empty() {
                return Err(EstimatorError::InvalidConfigValueError {
                    field: "products".to_string(),
                    value: id,
                    reason: "product identifier cannot be empty".to_string(),
                });
            }
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(EstimatorError::InvalidConfigValueError {
                    field: format!("products.{}", id),
                    value: amount.to_string(),
                    reason: "unit savings cannot be negative".to_string(),
                });
            }
            if amount > MAX_UNIT_SAVINGS {
                return Err(EstimatorError::InvalidConfigValueError {
                    field: format!("products.{}", id),
                    value: amount.to_string(),
                    reason: format!("unit savings cannot exceed {}", MAX_UNIT_SAVINGS),
                });
            }
            map.insert(id, amount);
        }
        Ok(Self { entries: map })
    }

    pub fn builtin() -> Self {
        Self {
            entries: DEFAULT_PRODUCT_SAVINGS
                .iter()
                .map(|(id, amount)| (id.to_string(), *amount))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.contains_key(product_id)
    }

    /// Entries ordered by product id.
    pub fn sorted_entries(&self) -> BTreeMap<&str, Decimal> {
        self.entries
            .iter()
            .map(|(id, amount)| (id.as_str(), *amount))
            .collect()
    }
}

impl SavingsLookup for ProductSavingsTable {
    fn unit_savings(&self, product_id: &str) -> Option<Decimal> {
        self.entries.get(product_id).copied()
    }
}
