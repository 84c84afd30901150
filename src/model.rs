//! Core domain types for the vending engine.

use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

use crate::Money;

/// Position of a beverage type in the catalog.
pub type CatalogIndex = usize;

/// Identity of one physical unit in stock.
///
/// Minted in increasing order, so a lower id always means an earlier supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(pub u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Serving temperature of a coffee drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temperature {
    Hot,
    Cold,
}

/// Flavor strength of a strawberry milk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    None,
    Light,
    Rich,
}

/// Color of a banana milk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BananaColor {
    Yellow,
    LightYellow,
    White,
}

/// Milk variants and their own attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MilkKind {
    Plain,
    Strawberry { flavor: Flavor },
    /// Cocoa concentration in tenths of a percent.
    Chocolate { concentration_permille: u16 },
    Banana { color: BananaColor },
}

/// Category of a beverage with the attributes specific to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Soda {
        glycemic_index: u8,
    },
    Coffee {
        temperature: Temperature,
    },
    /// Fat content is in tenths of a percent.
    Milk {
        fat_permille: u16,
        kind: MilkKind,
    },
    Water,
}

/// Immutable descriptor of a purchasable beverage.
///
/// Two units are of the same type when every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeverageType {
    pub name: String,
    pub brand: String,
    pub price: Money,
    /// Capacity in milliliters.
    pub capacity: u32,
    pub manufactured: NaiveDate,
    /// `None` for non-perishable beverages.
    pub expires: Option<NaiveDate>,
    pub category: Category,
}

impl BeverageType {
    const LOW_FAT_PERMILLE: u16 = 3;
    const LOW_CONCENTRATION_PERMILLE: u16 = 3;
    const HIGH_GLYCEMIC_INDEX: u8 = 70;

    /// Expired when the expiration date is strictly before `today`.
    pub fn is_expired_at(&self, today: NaiveDate) -> bool {
        self.expires.is_some_and(|expires| expires < today)
    }

    pub fn is_buyable(&self, balance: Money) -> bool {
        self.price <= balance
    }

    pub fn is_hot(&self) -> bool {
        matches!(
            self.category,
            Category::Coffee {
                temperature: Temperature::Hot
            }
        )
    }

    pub fn is_low_fat(&self) -> bool {
        match self.category {
            Category::Milk { fat_permille, .. } => fat_permille <= Self::LOW_FAT_PERMILLE,
            _ => false,
        }
    }

    pub fn is_high_glycemic(&self) -> bool {
        match self.category {
            Category::Soda { glycemic_index } => glycemic_index >= Self::HIGH_GLYCEMIC_INDEX,
            _ => false,
        }
    }

    pub fn is_flavorless(&self) -> bool {
        matches!(
            self.category,
            Category::Milk {
                kind: MilkKind::Strawberry {
                    flavor: Flavor::None
                },
                ..
            }
        )
    }

    pub fn is_low_concentration(&self) -> bool {
        match self.category {
            Category::Milk {
                kind:
                    MilkKind::Chocolate {
                        concentration_permille,
                    },
                ..
            } => concentration_permille <= Self::LOW_CONCENTRATION_PERMILLE,
            _ => false,
        }
    }

    pub fn is_white(&self) -> bool {
        matches!(
            self.category,
            Category::Milk {
                kind: MilkKind::Banana {
                    color: BananaColor::White
                },
                ..
            }
        )
    }
}

impl fmt::Display for BeverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {}ml)", self.name, self.brand, self.capacity)
    }
}

/// One physical unit of a beverage type.
///
/// Units share their descriptor; equality is by [`UnitId`] only.
#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    beverage: Arc<BeverageType>,
}

impl Unit {
    pub(crate) fn new(id: UnitId, beverage: Arc<BeverageType>) -> Self {
        Self { id, beverage }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn beverage(&self) -> &Arc<BeverageType> {
        &self.beverage
    }

    pub fn price(&self) -> Money {
        self.beverage.price
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}

/// A command representing the possible inputs of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add `amount` fresh units of the catalog entry at `index`.
    Supply { index: CatalogIndex, amount: u64 },
    /// Credit the machine balance.
    InsertCoin { amount: u64 },
    /// Buy the earliest supplied unit of the catalog entry at `index`.
    Buy { index: CatalogIndex },
}

/// Management commands shown on the machine menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ManagementMenu {
    AddStock = 1,
    ShowExpired = 2,
    ShowHot = 3,
    ShowSales = 4,
}

impl ManagementMenu {
    pub const ALL: [ManagementMenu; 4] = [
        ManagementMenu::AddStock,
        ManagementMenu::ShowExpired,
        ManagementMenu::ShowHot,
        ManagementMenu::ShowSales,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ManagementMenu::AddStock => "Add stock",
            ManagementMenu::ShowExpired => "Show expired beverages",
            ManagementMenu::ShowHot => "Show hot beverages",
            ManagementMenu::ShowSales => "Show sale history",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn beverage(category: Category, expires: Option<NaiveDate>) -> BeverageType {
        BeverageType {
            name: "test".to_string(),
            brand: "brand".to_string(),
            price: Money::new(1000),
            capacity: 250,
            manufactured: date(2024, 1, 1),
            expires,
            category,
        }
    }

    #[test]
    fn expired_only_strictly_before_today() {
        let water = beverage(Category::Water, Some(date(2024, 3, 10)));
        assert!(!water.is_expired_at(date(2024, 3, 9)));
        assert!(!water.is_expired_at(date(2024, 3, 10)));
        assert!(water.is_expired_at(date(2024, 3, 11)));
    }

    #[test]
    fn non_perishable_never_expires() {
        let water = beverage(Category::Water, None);
        assert!(!water.is_expired_at(date(2999, 1, 1)));
    }

    #[test]
    fn hot_only_for_hot_coffee() {
        let hot = beverage(
            Category::Coffee {
                temperature: Temperature::Hot,
            },
            None,
        );
        let cold = beverage(
            Category::Coffee {
                temperature: Temperature::Cold,
            },
            None,
        );
        let soda = beverage(Category::Soda { glycemic_index: 60 }, None);
        assert!(hot.is_hot());
        assert!(!cold.is_hot());
        assert!(!soda.is_hot());
    }

    #[test]
    fn milk_predicates() {
        let strawberry = beverage(
            Category::Milk {
                fat_permille: 2,
                kind: MilkKind::Strawberry {
                    flavor: Flavor::None,
                },
            },
            None,
        );
        let chocolate = beverage(
            Category::Milk {
                fat_permille: 7,
                kind: MilkKind::Chocolate {
                    concentration_permille: 1,
                },
            },
            None,
        );
        let banana = beverage(
            Category::Milk {
                fat_permille: 4,
                kind: MilkKind::Banana {
                    color: BananaColor::White,
                },
            },
            None,
        );

        assert!(strawberry.is_low_fat());
        assert!(strawberry.is_flavorless());
        assert!(!chocolate.is_low_fat());
        assert!(chocolate.is_low_concentration());
        assert!(banana.is_white());
        assert!(!banana.is_low_concentration());
    }

    #[test]
    fn predicates_are_false_for_other_categories() {
        let water = beverage(Category::Water, None);
        assert!(!water.is_low_fat());
        assert!(!water.is_high_glycemic());
        assert!(!water.is_flavorless());
        assert!(!water.is_low_concentration());
        assert!(!water.is_white());
    }

    #[test]
    fn high_glycemic_threshold() {
        assert!(beverage(Category::Soda { glycemic_index: 70 }, None).is_high_glycemic());
        assert!(!beverage(Category::Soda { glycemic_index: 69 }, None).is_high_glycemic());
    }

    #[test]
    fn buyable_when_price_within_balance() {
        let water = beverage(Category::Water, None);
        assert!(water.is_buyable(Money::new(1000)));
        assert!(!water.is_buyable(Money::new(999)));
    }

    #[test]
    fn types_with_equal_fields_are_equal() {
        assert_eq!(
            beverage(Category::Water, None),
            beverage(Category::Water, None)
        );
        assert_ne!(
            beverage(Category::Water, None),
            beverage(Category::Water, Some(date(2024, 1, 2)))
        );
    }

    #[test]
    fn units_compare_by_id() {
        let kind = Arc::new(beverage(Category::Water, None));
        let a = Unit::new(UnitId(1), kind.clone());
        let b = Unit::new(UnitId(2), kind.clone());
        assert_ne!(a, b);
        assert_eq!(a, Unit::new(UnitId(1), kind));
    }

    #[test]
    fn menu_values_are_stable() {
        let values: Vec<u8> = ManagementMenu::ALL.iter().map(|m| *m as u8).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }
}
