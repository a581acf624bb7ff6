//! Value objects - immutable helpers shared by entities and ports.

mod attributes;
mod devotion;
mod filters;
mod page;
mod pair;

pub use attributes::Attributes;
pub use devotion::{
    is_within_bounds, DEFAULT_DEVOTION, DEFAULT_INDEPENDENT_THINKING, DEVOTION_MAX, DEVOTION_MIN,
};
pub use filters::{LocationFilter, NpcFilter, SettlementFilter};
pub use page::{Page, DEFAULT_HISTORY_LIMIT, DEFAULT_LIST_LIMIT};
pub use pair::CanonicalPair;
