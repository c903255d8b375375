//! Shared test utilities for the RSVP workspace
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: small assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let db = mongo.database("my_test");
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let title = builder.name("event", "main");
//!     let date = builder.date(3);
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;

/// Builder for test data with deterministic values
///
/// Seeded from the test name so reruns produce identical data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_event");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("event", "main");
    /// assert!(name.starts_with("test-event-"));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Database name unique to this builder's seed
    pub fn database_name(&self) -> String {
        format!("rsvp_test_{}", self.seed)
    }

    /// ISO `YYYY-MM-DD` date `offset_days` after 2025-01-01.
    ///
    /// Later offsets always sort after earlier ones, both as dates and as
    /// strings. Offsets wrap after 28 days per month to stay valid.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(1);
    /// assert_eq!(builder.date(0), "2025-01-01");
    /// assert_eq!(builder.date(29), "2025-02-02");
    /// ```
    pub fn date(&self, offset_days: u32) -> String {
        let month_index = offset_days / 28;
        let year = 2025 + month_index / 12;
        let month = month_index % 12 + 1;
        let day = offset_days % 28 + 1;
        format!("{:04}-{:02}-{:02}", year, month, day)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a slice is sorted ascending by `key`
    pub fn assert_sorted_by<T, K: PartialOrd>(items: &[T], key: impl Fn(&T) -> K, context: &str) {
        for pair in items.windows(2) {
            assert!(
                key(&pair[0]) <= key(&pair[1]),
                "{}: items are not sorted ascending",
                context
            );
        }
    }
}
