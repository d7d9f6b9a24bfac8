//! Static crop knowledge: display metadata per crop and input guidance ranges
//!
//! Both tables are compiled in and never change for the lifetime of the
//! process, so lookups hand out `&'static` references.

mod crops;
mod ranges;

pub use crops::{all_crops, lookup, CropInfo};
pub use ranges::{input_ranges, InputRange, InputRanges};
