//! Multi-label classifier assessment
//!
//! - `tally`: (expected, predicted) combination counts and the species to evaluate
//! - `confusion`: binary per-class and global multi-label TP/FP/FN/TN
//! - `metrics`: sensitivity, specificity, precision, F1 and losses per class
//! - `report`: mapping table, confusion matrix and metrics table rendering
//!
//! ## Example
//!
//! ```
//! use barcode_assess::eval::{extract_global, Tally};
//!
//! let tally: Tally = [("A;B", "A;C", 1)].into_iter().collect();
//! let species: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
//! let counts = extract_global(&tally, &species);
//!
//! assert_eq!((counts.tp, counts.fp, counts.fn_, counts.tn), (1, 1, 1, 1));
//! ```

pub mod confusion;
pub mod metrics;
pub mod report;
pub mod tally;


pub use confusion::{extract_binary, extract_global, ConfusionCounts};
pub use metrics::{metrics_table, other_row_name, ClassMetrics, MetricsRow, OVERALL};
pub use report::{render_confusion_matrix, render_mapping, render_metrics, write_reports};
pub use tally::{build_tally, evaluation_species, tally_sequence_pairs, Tally, TallyKey};
