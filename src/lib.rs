pub mod catalog;
pub mod csv;
pub mod engine;
pub mod events;
pub mod model;
pub mod money;

pub use catalog::Catalog;
pub use engine::{Engine, EngineError, SharedEngine};
pub use events::{Event, EventKind};
pub use model::{BeverageType, CatalogIndex, Command, Unit, UnitId};
pub use money::Money;
