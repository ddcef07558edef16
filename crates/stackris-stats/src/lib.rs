//! Descriptive statistics for training progress reports.
//!
//! The trainer summarizes per-generation fitness and per-gene weight
//! distributions; [`descriptive::DescriptiveStats`] holds the measures those
//! reports print.
//!
//! # Examples
//!
//! ```
//! use stackris_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
