use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical class identifier a sample is filed under
pub type ClassId = u32;

/// Integer found at the start of an annotation file, before mapping
pub type RawLabel = i64;

/// Extension of the annotation files picked up from the input directory
pub const ANNOTATION_EXT: &str = "txt";

/// Extension of the paired image when none is configured
pub const DEFAULT_IMAGE_EXT: &str = "jpg";

// Which side of the split a sample belongs to
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Subset {
    Train,
    Test,
}

impl Subset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subset::Train => "train",
            Subset::Test => "test",
        }
    }

    /// Capitalized name used in status lines and progress bars
    pub fn label(&self) -> &'static str {
        match self {
            Subset::Train => "Train",
            Subset::Test => "Test",
        }
    }
}

// Struct to hold the train and test destination roots
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub train_dir: PathBuf,
    pub test_dir: PathBuf,
}

impl OutputDirs {
    pub fn root(&self, subset: Subset) -> &Path {
        match subset {
            Subset::Train => &self.train_dir,
            Subset::Test => &self.test_dir,
        }
    }
}

// Struct to hold the annotation files assigned to each split
#[derive(Debug, Clone)]
pub struct SplitData {
    pub train_files: Vec<PathBuf>,
    pub test_files: Vec<PathBuf>,
}

impl SplitData {
    pub fn files(&self, subset: Subset) -> &[PathBuf] {
        match subset {
            Subset::Train => &self.train_files,
            Subset::Test => &self.test_files,
        }
    }
}

/// Terminal state of a single sample after routing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Copied {
        subset: Subset,
        image_name: String,
        annotation_name: String,
        class_id: ClassId,
    },
    MissingImage {
        subset: Subset,
        image_name: String,
    },
    Unmapped {
        subset: Subset,
        /// Raw label as written, which may exceed [`RawLabel`]
        label: String,
    },
    Malformed {
        subset: Subset,
        annotation_name: String,
        reason: String,
    },
}

impl RouteOutcome {
    pub fn subset(&self) -> Subset {
        match self {
            RouteOutcome::Copied { subset, .. }
            | RouteOutcome::MissingImage { subset, .. }
            | RouteOutcome::Unmapped { subset, .. }
            | RouteOutcome::Malformed { subset, .. } => *subset,
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, RouteOutcome::Copied { .. })
    }
}

impl fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ", self.subset().label())?;
        match self {
            RouteOutcome::Copied {
                image_name,
                annotation_name,
                class_id,
                ..
            } => write!(
                f,
                "image {} and annotation {} copied to class folder {}.",
                image_name, annotation_name, class_id
            ),
            RouteOutcome::MissingImage { image_name, .. } => {
                write!(f, "image {} not found.", image_name)
            }
            RouteOutcome::Unmapped { label, .. } => {
                write!(f, "class not found for label {}.", label)
            }
            RouteOutcome::Malformed {
                annotation_name,
                reason,
                ..
            } => write!(
                f,
                "malformed annotation {} ({}), skipped.",
                annotation_name, reason
            ),
        }
    }
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total_files_processed: usize,
    pub copied_pairs: usize,
    pub skipped_unmapped_class: usize,
    pub skipped_missing_image: usize,
    pub skipped_malformed: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &RouteOutcome) {
        self.total_files_processed += 1;
        match outcome {
            RouteOutcome::Copied { .. } => self.copied_pairs += 1,
            RouteOutcome::MissingImage { .. } => self.skipped_missing_image += 1,
            RouteOutcome::Unmapped { .. } => self.skipped_unmapped_class += 1,
            RouteOutcome::Malformed { .. } => self.skipped_malformed += 1,
        }
    }

    pub fn merge(&mut self, other: &ProcessingStats) {
        self.total_files_processed += other.total_files_processed;
        self.copied_pairs += other.copied_pairs;
        self.skipped_unmapped_class += other.skipped_unmapped_class;
        self.skipped_missing_image += other.skipped_missing_image;
        self.skipped_malformed += other.skipped_malformed;
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped_unmapped_class + self.skipped_missing_image + self.skipped_malformed
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Total annotation files processed: {}", self.total_files_processed);
        log::info!("Copied image/annotation pairs: {}", self.copied_pairs);
        log::info!("Skipped (class not found): {}", self.skipped_unmapped_class);
        log::info!("Skipped (missing image file): {}", self.skipped_missing_image);
        log::info!("Skipped (malformed annotation): {}", self.skipped_malformed);

        if self.total_skipped() > 0 {
            log::warn!(
                "Total skipped samples: {} (class not found: {}, missing image: {}, malformed: {})",
                self.total_skipped(),
                self.skipped_unmapped_class,
                self.skipped_missing_image,
                self.skipped_malformed
            );
        }
    }
}
