//! CML Reconcile Common Library
//!
//! 新しい肉厚測定値と既存のモニタリング位置（CML）を照合するエンジン

pub mod types;
pub mod error;
pub mod normalizer;
pub mod similarity;
pub mod categorizer;
pub mod matcher;
pub mod export;

pub use types::{ComponentCategory, ExistingLocation, NewReading};
pub use error::{Error, Result};
pub use normalizer::normalize;
pub use normalizer::location_key::{extract_angular_position, extract_base_location};
pub use similarity::similarity;
pub use categorizer::{categorize, group_readings, Categorization, ComponentGroup};
pub use matcher::{match_locations, MatchOptions, MatchResult, MatchType};
