use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use yolo2classdirs::{
    class_dir_name, collect_annotation_files, parse_label_line, provision_class_dirs,
    read_first_label, resolve_class_ids, split_samples, ClassMapping, LabelParseError,
    ProcessingStats, RouteOutcome, SortError, Subset,
};

fn write_file(path: &Path, content: &str) {
    let mut file = File::create(path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

fn sample_files(n: usize) -> Vec<PathBuf> {
    (0..n).map(|i| PathBuf::from(format!("img_{:03}.txt", i))).collect()
}

#[test]
fn test_parse_label_line() {
    assert_eq!(parse_label_line("6 0.1 0.2 0.3 0.4"), Ok(6));
    assert_eq!(parse_label_line("  17\t0.5 0.5\n"), Ok(17));
    assert_eq!(parse_label_line("-3 0.1"), Ok(-3));
    assert_eq!(parse_label_line(""), Err(LabelParseError::Empty));
    assert_eq!(parse_label_line("\n"), Err(LabelParseError::NoTokens));
    assert_eq!(parse_label_line("   \t "), Err(LabelParseError::NoTokens));
    assert_eq!(
        parse_label_line("6.5 0.1"),
        Err(LabelParseError::InvalidInteger("6.5".to_string()))
    );
    assert_eq!(
        parse_label_line("cat 0.1"),
        Err(LabelParseError::InvalidInteger("cat".to_string()))
    );
}

#[test]
fn test_read_first_label_uses_only_first_line() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("a.txt");
    write_file(&path, "6 0.1 0.2 0.3 0.4\n999 0.1 0.2 0.3 0.4\n");

    assert_eq!(read_first_label(&path).unwrap(), 6);
}

#[test]
fn test_read_first_label_malformed() {
    let temp_dir = tempfile::tempdir().unwrap();

    let empty = temp_dir.path().join("empty.txt");
    write_file(&empty, "");
    match read_first_label(&empty) {
        Err(SortError::MalformedAnnotation { path, reason }) => {
            assert_eq!(path, empty);
            assert_eq!(reason, LabelParseError::Empty);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let blank = temp_dir.path().join("blank.txt");
    write_file(&blank, "\n6 0.1 0.2 0.3 0.4\n");
    assert!(matches!(
        read_first_label(&blank),
        Err(SortError::MalformedAnnotation {
            reason: LabelParseError::NoTokens,
            ..
        })
    ));

    let text = temp_dir.path().join("text.txt");
    write_file(&text, "person 0.1 0.2\n");
    assert!(matches!(
        read_first_label(&text),
        Err(SortError::MalformedAnnotation {
            reason: LabelParseError::InvalidInteger(_),
            ..
        })
    ));
}

#[test]
fn test_read_first_label_missing_file_is_io_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = read_first_label(&temp_dir.path().join("nope.txt"));
    assert!(matches!(result, Err(SortError::Io { .. })));
}

#[test]
fn test_split_sizes_follow_floor() {
    for (n, expected_train) in [(0, 0), (1, 0), (2, 1), (5, 4), (7, 5), (10, 8), (11, 8)] {
        let files = sample_files(n);
        let split = split_samples(&files, 0.8, Some(42));
        assert_eq!(split.train_files.len(), expected_train, "n = {}", n);
        assert_eq!(split.test_files.len(), n - expected_train, "n = {}", n);
    }
}

#[test]
fn test_split_is_a_partition() {
    let files = sample_files(23);
    let split = split_samples(&files, 0.8, None);

    let train: HashSet<_> = split.train_files.iter().collect();
    let test: HashSet<_> = split.test_files.iter().collect();
    assert!(train.is_disjoint(&test));
    assert_eq!(train.len() + test.len(), files.len());

    let union: HashSet<_> = train.union(&test).copied().collect();
    let input: HashSet<_> = files.iter().collect();
    assert_eq!(union, input);
}

#[test]
fn test_split_leaves_input_untouched() {
    let files = sample_files(10);
    let before = files.clone();
    let _ = split_samples(&files, 0.5, Some(1));
    assert_eq!(files, before);
}

#[test]
fn test_split_with_seed_is_reproducible() {
    let files = sample_files(50);
    let first = split_samples(&files, 0.8, Some(42));
    let second = split_samples(&files, 0.8, Some(42));
    assert_eq!(first.train_files, second.train_files);
    assert_eq!(first.test_files, second.test_files);
}

#[test]
fn test_split_extreme_ratios() {
    let files = sample_files(6);

    let all_train = split_samples(&files, 1.0, Some(3));
    assert_eq!(all_train.train_files.len(), 6);
    assert!(all_train.test_files.is_empty());

    let all_test = split_samples(&files, 0.0, Some(3));
    assert!(all_test.train_files.is_empty());
    assert_eq!(all_test.test_files.len(), 6);
}

#[test]
fn test_split_is_not_a_prefix_of_the_listing() {
    let files = sample_files(60);
    let split = split_samples(&files, 0.8, Some(42));
    let train_len = split.train_files.len();
    assert_eq!(train_len, 48);
    assert_ne!(split.train_files, files[..train_len].to_vec());
    assert_ne!(split.test_files, files[train_len..].to_vec());
}

#[test]
fn test_split_differs_between_seeds() {
    let files = sample_files(60);
    let first = split_samples(&files, 0.8, Some(1));
    let second = split_samples(&files, 0.8, Some(2));
    assert_ne!(first.train_files, second.train_files);
}

#[test]
fn test_parse_label_line_integer_forms() {
    assert_eq!(parse_label_line("+6 0.1"), Ok(6));
    assert_eq!(parse_label_line("6_0 0.1"), Ok(60));
    assert_eq!(parse_label_line("-1_000 0.1"), Ok(-1000));
    for token in ["_6", "6_", "6__0", "+", "-", "0x10", "+-6"] {
        assert_eq!(
            parse_label_line(token),
            Err(LabelParseError::InvalidInteger(token.to_string())),
            "token = {}",
            token
        );
    }
    assert_eq!(
        parse_label_line("99999999999999999999 0.1"),
        Err(LabelParseError::OutOfRange("99999999999999999999".to_string()))
    );
    assert_eq!(
        parse_label_line("-99_999_999_999_999_999_999 0.1"),
        Err(LabelParseError::OutOfRange("-99999999999999999999".to_string()))
    );
}

#[test]
fn test_resolver_is_pure() {
    let mapping = ClassMapping::from_pairs([(6, 6), (1, 8)]);
    assert_eq!(mapping.resolve(6), Some(6));
    assert_eq!(mapping.resolve(6), Some(6));
    assert_eq!(mapping.resolve(1), Some(8));
    assert_eq!(mapping.resolve(2), None);
    assert_eq!(mapping.resolve(2), None);
}

#[test]
fn test_mapping_from_json_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("mapping.json");
    write_file(&path, r#"{"1": 6, "2": 8, "3": 8}"#);

    let mapping = ClassMapping::from_json_file(&path).unwrap();
    assert_eq!(mapping.len(), 3);
    assert_eq!(mapping.resolve(2), Some(8));
    assert_eq!(mapping.resolve(4), None);
    assert_eq!(mapping.class_ids(), vec![6, 8]);
}

#[test]
fn test_mapping_file_rejects_non_integer_keys() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("mapping.json");
    write_file(&path, r#"{"one": 6}"#);
    assert!(matches!(
        ClassMapping::from_json_file(&path),
        Err(SortError::InvalidMapping { .. })
    ));

    write_file(&path, "[1, 2, 3]");
    assert!(matches!(
        ClassMapping::from_json_file(&path),
        Err(SortError::InvalidMapping { .. })
    ));
}

#[test]
fn test_mapping_file_rejects_duplicate_labels() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("mapping.json");

    for json in [r#"{"1": 6, "01": 8}"#, r#"{"1": 6, " 1": 6}"#] {
        write_file(&path, json);
        match ClassMapping::from_json_file(&path) {
            Err(SortError::InvalidMapping { reason, .. }) => {
                assert!(reason.contains("more than once"), "{}", reason);
            }
            other => panic!("unexpected result for {}: {:?}", json, other),
        }
    }
}

#[test]
fn test_load_without_file_uses_reference_table() {
    assert_eq!(ClassMapping::load(None).unwrap(), ClassMapping::reference());
}

#[test]
fn test_provision_class_dirs_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path().join("train");
    let class_ids = [6, 8, 290];

    provision_class_dirs(&root, &class_ids).unwrap();
    let kept = root.join(class_dir_name(8)).join("kept.txt");
    write_file(&kept, "1 0.5 0.5 0.1 0.1");

    provision_class_dirs(&root, &class_ids).unwrap();

    let mut names: Vec<_> = fs::read_dir(&root)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["290", "6", "8"]);
    assert_eq!(fs::read_to_string(&kept).unwrap(), "1 0.5 0.5 0.1 0.1");
}

#[test]
fn test_collect_annotation_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    write_file(&dir.join("b.txt"), "1");
    write_file(&dir.join("a.txt"), "1");
    write_file(&dir.join("a.jpg"), "jpeg");
    write_file(&dir.join("notes.md"), "");
    fs::create_dir(dir.join("folder.txt")).unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    write_file(&dir.join("nested").join("c.txt"), "1");

    let files = collect_annotation_files(dir).unwrap();
    assert_eq!(files, vec![dir.join("a.txt"), dir.join("b.txt")]);
}

#[test]
fn test_resolve_class_ids() {
    let mapping = ClassMapping::from_pairs([(1, 6), (2, 8)]);

    assert_eq!(resolve_class_ids(&[], &mapping).unwrap(), vec![6, 8]);
    assert_eq!(resolve_class_ids(&[8, 6, 10], &mapping).unwrap(), vec![8, 6, 10]);
    assert!(matches!(
        resolve_class_ids(&[6], &mapping),
        Err(SortError::UnprovisionedClass(8))
    ));
}

#[test]
fn test_outcome_status_lines() {
    let copied = RouteOutcome::Copied {
        subset: Subset::Train,
        image_name: "a.jpg".to_string(),
        annotation_name: "a.txt".to_string(),
        class_id: 6,
    };
    assert_eq!(
        copied.to_string(),
        "Train - image a.jpg and annotation a.txt copied to class folder 6."
    );

    let missing = RouteOutcome::MissingImage {
        subset: Subset::Test,
        image_name: "c.jpg".to_string(),
    };
    assert_eq!(missing.to_string(), "Test - image c.jpg not found.");

    let unmapped = RouteOutcome::Unmapped {
        subset: Subset::Test,
        label: "999".to_string(),
    };
    assert_eq!(unmapped.to_string(), "Test - class not found for label 999.");
}

#[test]
fn test_processing_stats() {
    let mut stats = ProcessingStats::new();
    stats.record(&RouteOutcome::Unmapped {
        subset: Subset::Train,
        label: "999".to_string(),
    });
    stats.record(&RouteOutcome::MissingImage {
        subset: Subset::Train,
        image_name: "c.jpg".to_string(),
    });

    let mut other = ProcessingStats::new();
    other.record(&RouteOutcome::Copied {
        subset: Subset::Test,
        image_name: "a.jpg".to_string(),
        annotation_name: "a.txt".to_string(),
        class_id: 6,
    });
    stats.merge(&other);

    assert_eq!(stats.total_files_processed, 3);
    assert_eq!(stats.copied_pairs, 1);
    assert_eq!(stats.skipped_unmapped_class, 1);
    assert_eq!(stats.skipped_missing_image, 1);
    assert_eq!(stats.skipped_malformed, 0);
    assert_eq!(stats.total_skipped(), 2);
}
