//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Gap between sibling order indices after a renumber, leaving room for
/// manual inserts between neighbours.
pub const ORDER_INDEX_STEP: i32 = 10;

/// Redis channel the navigation cache listens on for invalidation events.
pub const NAVIGATION_INVALIDATION_CHANNEL: &str = "menukit:navigation:invalidate";

pub const MIN_CODE_LENGTH: usize = 2;
pub const MAX_CODE_LENGTH: usize = 100;
