//! Workload builders for dynarray benchmarks.
//!
//! - [`filled`]: an array of `0..len` built with a given growth policy
//! - [`GROWTH_POLICIES`]: every policy, labelled for benchmark ids

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarray::{ArrayConfig, DynArray, GrowthPolicy};

/// Every growth policy with a short label.
pub const GROWTH_POLICIES: [(&str, GrowthPolicy); 2] = [
    ("by_one", GrowthPolicy::ByOne),
    ("double", GrowthPolicy::Double),
];

/// Build an array holding `0..len`, appended one at a time under `growth`.
pub fn filled(len: u64, growth: GrowthPolicy) -> DynArray<u64> {
    let mut arr = DynArray::with_config(ArrayConfig::new(0).with_growth(growth));
    for i in 0..len {
        arr.push_back(i);
    }
    arr
}
