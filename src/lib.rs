//! YOLO dataset class sorter
//!
//! This library sorts YOLO image/annotation pairs into one folder per class
//! under a training root and a testing root, using a random split.

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod mapping;
pub mod routing;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::Args;
pub use dataset::{process_dataset, resolve_class_ids, run, split_samples};
pub use error::{LabelParseError, SortError};
pub use io::{collect_annotation_files, provision_class_dirs, setup_output_directories};
pub use mapping::{class_dir_name, ClassMapping};
pub use routing::{process_split, route_sample};
pub use types::{ClassId, OutputDirs, ProcessingStats, RawLabel, RouteOutcome, SplitData, Subset};
pub use utils::{parse_label_line, read_first_label};
