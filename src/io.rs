use glob::{glob, Pattern};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SortError;
use crate::mapping::class_dir_name;
use crate::types::{ClassId, OutputDirs, ANNOTATION_EXT};

/// Ensure `<root>/<class_id>` exists for every class id.
///
/// Existing directories and their contents are left as they are, so the
/// call can be repeated over the same root.
pub fn provision_class_dirs(root: &Path, class_ids: &[ClassId]) -> Result<(), SortError> {
    for &class_id in class_ids {
        let class_dir = root.join(class_dir_name(class_id));
        fs::create_dir_all(&class_dir).map_err(|e| SortError::io(&class_dir, e))?;
    }
    debug!(
        "Provisioned {} class folders under {}",
        class_ids.len(),
        root.display()
    );
    Ok(())
}

/// Set up the class folders under both the train and test roots
pub fn setup_output_directories(
    train_dir: &Path,
    test_dir: &Path,
    class_ids: &[ClassId],
) -> Result<OutputDirs, SortError> {
    provision_class_dirs(train_dir, class_ids)?;
    provision_class_dirs(test_dir, class_ids)?;

    Ok(OutputDirs {
        train_dir: train_dir.to_path_buf(),
        test_dir: test_dir.to_path_buf(),
    })
}

/// List the annotation files directly inside `input_dir`, sorted by name
pub fn collect_annotation_files(input_dir: &Path) -> Result<Vec<PathBuf>, SortError> {
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&input_dir.to_string_lossy()),
        ANNOTATION_EXT
    );

    let mut files = Vec::new();
    for entry in glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy `src` into `dest_dir`, keeping its file name
pub fn copy_into(src: &Path, dest_dir: &Path) -> Result<PathBuf, SortError> {
    let file_name = src
        .file_name()
        .ok_or_else(|| SortError::io(src, std::io::ErrorKind::InvalidInput.into()))?;
    let dest = dest_dir.join(file_name);
    fs::copy(src, &dest).map_err(|e| SortError::io(&dest, e))?;
    Ok(dest)
}
