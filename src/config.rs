use clap::Parser;
use std::path::Path;
use std::str::FromStr;

use crate::types::{ClassId, DEFAULT_IMAGE_EXT};

/// Sort YOLO image/annotation pairs into class folders under train and test roots.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory containing the .txt annotations and their paired images
    #[arg(short = 'i', long = "input_dir")]
    pub input_dir: String,

    /// Root directory of the training split
    #[arg(long = "train_dir", default_value = "datasets/train")]
    pub train_dir: String,

    /// Root directory of the testing split
    #[arg(long = "test_dir", default_value = "datasets/test")]
    pub test_dir: String,

    /// Proportion of the dataset to use for training
    #[arg(long = "train_size", default_value_t = 0.8, value_parser = validate_size)]
    pub train_size: f64,

    /// Seed for random shuffling; unseeded when omitted
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Extension of the image paired with each annotation
    #[arg(long = "image_ext", default_value = DEFAULT_IMAGE_EXT, value_parser = validate_extension)]
    pub image_ext: String,

    /// JSON file mapping raw labels to class ids, e.g. {"1": 6, "2": 8}
    #[arg(long = "mapping_file")]
    pub mapping_file: Option<String>,

    /// Abort the whole run on a malformed annotation instead of skipping it
    #[arg(long = "strict")]
    pub strict: bool,

    /// Class ids to create folders for; defaults to every id the mapping produces
    #[arg(use_value_delimiter = true)]
    pub class_ids: Vec<ClassId>,
}

impl Args {
    pub fn mapping_path(&self) -> Option<&Path> {
        self.mapping_file.as_deref().map(Path::new)
    }
}

// Validate that the size is between 0.0 and 1.0
fn validate_size(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SIZE must be between 0.0 and 1.0".to_string()),
    }
}

// Accept "jpg" or ".jpg", reject empty or path-like values
fn validate_extension(s: &str) -> Result<String, String> {
    let ext = s.trim().trim_start_matches('.');
    if ext.is_empty() || ext.contains(['/', '\\']) {
        Err("EXT must be a bare file extension such as jpg".to_string())
    } else {
        Ok(ext.to_string())
    }
}
