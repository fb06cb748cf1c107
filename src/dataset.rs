use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use crate::config::Args;
use crate::error::SortError;
use crate::io::{collect_annotation_files, setup_output_directories};
use crate::mapping::ClassMapping;
use crate::routing::process_split;
use crate::types::{ClassId, OutputDirs, ProcessingStats, SplitData, Subset};
use crate::utils::create_progress_bar;

/// Split the annotation files into training and testing sets.
///
/// The input is left untouched; a shuffled copy is cut after
/// `floor(len * train_size)` entries. Without a seed the shuffle draws
/// from OS entropy.
pub fn split_samples(files: &[PathBuf], train_size: f64, seed: Option<u64>) -> SplitData {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut train_files = files.to_vec();
    train_files.shuffle(&mut rng);

    let train_len = ((train_files.len() as f64) * train_size).floor() as usize;
    let test_files = train_files.split_off(train_len.min(train_files.len()));

    SplitData {
        train_files,
        test_files,
    }
}

/// Class ids to provision: the explicit list if any, the mapping's range otherwise.
///
/// Every class the mapping can produce must be in the list, or routed
/// samples would have no folder to land in.
pub fn resolve_class_ids(
    requested: &[ClassId],
    mapping: &ClassMapping,
) -> Result<Vec<ClassId>, SortError> {
    if requested.is_empty() {
        return Ok(mapping.class_ids());
    }
    if let Some(missing) = mapping
        .class_ids()
        .into_iter()
        .find(|class_id| !requested.contains(class_id))
    {
        return Err(SortError::UnprovisionedClass(missing));
    }
    Ok(requested.to_vec())
}

/// Split, then route the train files followed by the test files
pub fn process_dataset(
    input_dir: &Path,
    output_dirs: &OutputDirs,
    mapping: &ClassMapping,
    args: &Args,
) -> Result<ProcessingStats, SortError> {
    let files = collect_annotation_files(input_dir)?;
    info!("Found {} annotation files.", files.len());

    let split_data = split_samples(&files, args.train_size, args.seed);
    info!(
        "Split into {} train and {} test samples.",
        split_data.train_files.len(),
        split_data.test_files.len()
    );

    let mut stats = ProcessingStats::new();
    for subset in [Subset::Train, Subset::Test] {
        let subset_files = split_data.files(subset);
        let pb = create_progress_bar(subset_files.len() as u64, subset.label());
        let subset_stats = process_split(
            subset_files,
            subset,
            output_dirs.root(subset),
            mapping,
            args,
            &pb,
        )?;
        pb.finish_with_message(format!("{} processing complete", subset.label()));
        stats.merge(&subset_stats);
    }

    stats.print_summary();
    Ok(stats)
}

/// Main pipeline: load the mapping, provision the class folders, sort the samples
pub fn run(args: &Args) -> Result<ProcessingStats, SortError> {
    let input_dir = Path::new(&args.input_dir);
    if !input_dir.is_dir() {
        return Err(SortError::MissingInputDir(input_dir.to_path_buf()));
    }

    let mapping = ClassMapping::load(args.mapping_path())?;
    info!("Loaded class mapping with {} entries.", mapping.len());

    let class_ids = resolve_class_ids(&args.class_ids, &mapping)?;
    let output_dirs = setup_output_directories(
        Path::new(&args.train_dir),
        Path::new(&args.test_dir),
        &class_ids,
    )?;
    info!(
        "Class folders ready for {} classes under {} and {}.",
        class_ids.len(),
        output_dirs.train_dir.display(),
        output_dirs.test_dir.display()
    );

    let stats = process_dataset(input_dir, &output_dirs, &mapping, args)?;
    info!("Sorting completed successfully.");
    Ok(stats)
}
