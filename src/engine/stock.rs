use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::model::{BeverageType, Unit, UnitId};

/// Physical units currently held by the machine, oldest first.
///
/// Unit ids are minted here so that identity grows with supply order.
#[derive(Debug, Default)]
pub struct Stock {
    units: Vec<Unit>,
    next_id: u64,
}

impl Stock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fresh unit of `beverage` and return its id.
    pub fn add(&mut self, beverage: Arc<BeverageType>) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.push(Unit::new(id, beverage));
        id
    }

    /// Append `count` fresh units of `beverage`.
    pub fn add_many(&mut self, beverage: &Arc<BeverageType>, count: u64) {
        for _ in 0..count {
            self.add(Arc::clone(beverage));
        }
    }

    /// Remove the unit with the given id, if it is still in stock.
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let position = self.units.iter().position(|unit| unit.id() == id)?;
        Some(self.units.remove(position))
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id() == id)
    }

    /// Earliest supplied unit of `beverage`.
    pub fn first_of(&self, beverage: &BeverageType) -> Option<&Unit> {
        self.units
            .iter()
            .find(|unit| unit.beverage().as_ref() == beverage)
    }

    /// Number of units per beverage type. Types without units are absent.
    pub fn counts_by_type(&self) -> HashMap<Arc<BeverageType>, usize> {
        let mut counts = HashMap::new();
        for unit in &self.units {
            *counts.entry(Arc::clone(unit.beverage())).or_insert(0) += 1;
        }
        counts
    }

    /// Number of units of exactly `beverage`.
    pub fn count_of(&self, beverage: &BeverageType) -> usize {
        self.units
            .iter()
            .filter(|unit| unit.beverage().as_ref() == beverage)
            .count()
    }

    /// Distinct types with at least one unit matching `predicate`,
    /// in the order they first appear in stock.
    pub fn filter(&self, predicate: impl Fn(&BeverageType) -> bool) -> Vec<Arc<BeverageType>> {
        let mut seen = HashSet::new();
        self.units
            .iter()
            .map(Unit::beverage)
            .filter(|beverage| predicate(beverage))
            .filter(|beverage| seen.insert(Arc::clone(beverage)))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter()
    }
}
