//! Application-wide constants
//!
//! Centralized location for the business rules' magic values.

// =============================================================================
// Loyalty points & levels
// =============================================================================

/// Points needed to advance one level (level = points/500 + 1)
pub const POINTS_PER_LEVEL: i64 = 500;

/// Currency units (CLP) that earn one loyalty point on purchase
pub const CURRENCY_PER_POINT: f64 = 1000.0;

/// Flat bonus for leaving a product review
pub const REVIEW_BONUS_POINTS: i64 = 50;

/// Bonus granted to both parties when a referral code is redeemed
pub const REFERRAL_BONUS_POINTS: i64 = 100;

// =============================================================================
// DUOC student discount
// =============================================================================

/// Price multiplier applied for DUOC-eligible users (20% off)
pub const DUOC_DISCOUNT_MULTIPLIER: f64 = 0.8;

/// Email substring (case-insensitive) that marks a user as DUOC-eligible
pub const DUOC_EMAIL_MARKER: &str = "duoc";

// =============================================================================
// Referral codes
// =============================================================================

/// Prefix of every referral code (e.g. LUG7F3K9Q)
pub const REFERRAL_CODE_PREFIX: &str = "LUG";

/// Random suffix length after the prefix
pub const REFERRAL_CODE_SUFFIX_LEN: usize = 6;

/// Alphabet for the random suffix
pub const REFERRAL_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Attempts to find an unused code before giving up
pub const MAX_REFERRAL_CODE_ATTEMPTS: usize = 16;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum display-name length requirement
pub const MIN_NAME_LENGTH: usize = 3;

/// Minimum age to register
pub const MIN_AGE: u8 = 18;

/// Review rating bounds (whole stars)
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Review comment length bounds
pub const COMMENT_MIN_LENGTH: usize = 10;
pub const COMMENT_MAX_LENGTH: usize = 500;

// =============================================================================
// Admin session
// =============================================================================

/// Default admin credentials (overridable via environment)
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

// =============================================================================
// Remote catalog
// =============================================================================

/// Default base URL of the hosted product API
pub const DEFAULT_CATALOG_API_URL: &str =
    "https://api-dfs2-dm-production.up.railway.app/api/gaming";

// =============================================================================
// Queries
// =============================================================================

/// Default page size for the community's latest-reviews feed
pub const DEFAULT_LATEST_REVIEWS_LIMIT: usize = 10;
