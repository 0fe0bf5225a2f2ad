use std::time::Duration;

/// Default time-to-live for cached remote lookups.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Default interval between background cache sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Longest TTL or sweep period a cache honours. Larger values, such as
/// `u64::MAX` seconds meaning "never", are treated as this.
pub const MAX_CACHE_DURATION: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Name substituted when a remote payload omits one.
pub const UNNAMED: &str = "unnamed";

/// Smallest quantity step. Units are snapped to this grid before packs are
/// counted, so subtraction noise like `1000.2 - 1000.0` does not buy a pack.
pub const QUANTITY_RESOLUTION: f64 = 1e-10;

/// Minimum Jaro-Winkler score for a fuzzy name suggestion.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum number of fuzzy suggestions offered at once.
pub const MAX_SUGGESTIONS: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Remote resource paths
// ─────────────────────────────────────────────────────────────────────────────

pub const PRODUCTS_PATH: &str = "products";
pub const RECIPES_PATH: &str = "recipes";
pub const MENU_PATH: &str = "menu";
pub const PANTRY_PATH: &str = "pantry";
pub const SHOPPING_LIST_PATH: &str = "shopping-list";
