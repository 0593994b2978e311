//! Benchmark inputs for flatdoc.
//!
//! Provides pre-scanned token streams for the criterion benches:
//!
//! - [`wide_profile`]: one array of 10K primitives
//! - [`nested_profile`]: objects of arrays, three levels deep

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use flatdoc_core::Token;
use flatdoc_test_utils::fixtures::{scan, wide_array};

/// A scanned input and its tokens.
pub struct Profile {
    pub input: String,
    pub tokens: Vec<Token>,
}

impl Profile {
    fn from_input(input: String) -> Self {
        let tokens = scan(&input);
        Self { input, tokens }
    }
}

/// `[0,1,...,9999]`: 10,001 tokens, all siblings under the root.
pub fn wide_profile() -> Profile {
    Profile::from_input(wide_array(10_000))
}

/// `{"g0":{"r0":[..],...},...}`: 20 groups of 20 rows of 10 values.
pub fn nested_profile() -> Profile {
    let row = wide_array(10);
    let group: Vec<String> = (0..20).map(|r| format!("\"r{r}\":{row}")).collect();
    let group = format!("{{{}}}", group.join(","));
    let groups: Vec<String> = (0..20).map(|g| format!("\"g{g}\":{group}")).collect();
    Profile::from_input(format!("{{{}}}", groups.join(",")))
}
