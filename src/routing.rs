use indicatif::ProgressBar;
use log::debug;
use std::path::{Path, PathBuf};

use crate::config::Args;
use crate::error::{LabelParseError, SortError};
use crate::io::copy_into;
use crate::mapping::{class_dir_name, ClassMapping};
use crate::types::{ProcessingStats, RouteOutcome, Subset};
use crate::utils::{display_name, read_first_label};

/// Route the annotation files of one split, one after another.
///
/// Every outcome is printed as a status line on stdout. The first fatal
/// error stops the split and is returned to the caller.
pub fn process_split(
    annotation_files: &[PathBuf],
    subset: Subset,
    root: &Path,
    mapping: &ClassMapping,
    args: &Args,
    pb: &ProgressBar,
) -> Result<ProcessingStats, SortError> {
    let mut stats = ProcessingStats::new();
    debug!(
        "Routing {} {} samples into {}",
        annotation_files.len(),
        subset.as_str(),
        root.display()
    );

    for annotation_path in annotation_files {
        let outcome = route_sample(annotation_path, subset, root, mapping, args)?;
        pb.suspend(|| println!("{}", outcome));
        stats.record(&outcome);
        pb.inc(1);
    }

    Ok(stats)
}

/// Route a single annotation file and its paired image.
///
/// The image is checked before anything is copied, so a sample either
/// lands in `<root>/<class_id>` as a complete pair or not at all.
pub fn route_sample(
    annotation_path: &Path,
    subset: Subset,
    root: &Path,
    mapping: &ClassMapping,
    args: &Args,
) -> Result<RouteOutcome, SortError> {
    let annotation_name = display_name(annotation_path);

    let label = match read_first_label(annotation_path) {
        Ok(label) => label,
        Err(SortError::MalformedAnnotation {
            reason: LabelParseError::OutOfRange(label),
            ..
        }) => return Ok(RouteOutcome::Unmapped { subset, label }),
        Err(SortError::MalformedAnnotation { reason, .. }) if !args.strict => {
            return Ok(RouteOutcome::Malformed {
                subset,
                annotation_name,
                reason: reason.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    let Some(class_id) = mapping.resolve(label) else {
        return Ok(RouteOutcome::Unmapped {
            subset,
            label: label.to_string(),
        });
    };

    let image_path = annotation_path.with_extension(&args.image_ext);
    let image_name = display_name(&image_path);
    if !image_path.is_file() {
        return Ok(RouteOutcome::MissingImage { subset, image_name });
    }

    let destination = root.join(class_dir_name(class_id));
    copy_into(&image_path, &destination)?;
    copy_into(annotation_path, &destination)?;
    debug!(
        "Copied {} and {} to {}",
        image_name,
        annotation_name,
        destination.display()
    );

    Ok(RouteOutcome::Copied {
        subset,
        image_name,
        annotation_name,
        class_id,
    })
}
