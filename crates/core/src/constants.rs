/// Currency assigned to wallets created without one.
pub const DEFAULT_CURRENCY: &str = "IDR";

/// Maximum length for wallet, category and goal names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Decimal precision for percentages shown to the user
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Page size used when a listing does not specify one.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Upper bound for a single listing page.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Label used in summaries for transactions without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
