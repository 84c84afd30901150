use crate::model::Unit;

/// Append-only record of sold units, oldest first.
#[derive(Debug, Default)]
pub struct SaleLog {
    sold: Vec<Unit>,
}

impl SaleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, unit: Unit) {
        self.sold.push(unit);
    }

    pub fn all(&self) -> &[Unit] {
        &self.sold
    }

    pub fn len(&self) -> usize {
        self.sold.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sold.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Money;
    use crate::model::{BeverageType, Category, UnitId};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn unit(id: u64) -> Unit {
        let water = Arc::new(BeverageType {
            name: "Water".to_string(),
            brand: "Spring".to_string(),
            price: Money::new(600),
            capacity: 500,
            manufactured: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            expires: None,
            category: Category::Water,
        });
        Unit::new(UnitId(id), water)
    }

    #[test]
    fn append_keeps_order() {
        let mut log = SaleLog::new();
        assert!(log.is_empty());

        log.append(unit(3));
        log.append(unit(1));

        let ids: Vec<_> = log.all().iter().map(Unit::id).collect();
        assert_eq!(ids, vec![UnitId(3), UnitId(1)]);
        assert_eq!(log.len(), 2);
    }
}
