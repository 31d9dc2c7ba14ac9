//! Integration tests for flashcard-csv

use flashcard_csv::{ConversionOutcome, ConvertError, OutputMode, Pipeline};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn parse_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_tab_in_place_conversion() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deck.csv");
    fs::write(&path, "hello\tworld\textra\r\nsay\tshe said \"hi\", then left\n").unwrap();

    let reports = Pipeline::tab_source().run(&path).unwrap();

    assert_eq!(reports.len(), 1);
    assert!(matches!(reports[0].outcome, ConversionOutcome::Converted(2)));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "\"hello\",\"world\textra\"\n\"say\",\"she said \"\"hi\"\", then left\"\n"
    );
    assert_eq!(dir_entries(dir.path()), vec!["deck.csv"]);
}

#[test]
fn test_tab_conversion_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deck.csv");
    fs::write(&path, "a\tb\n\"c\"\t\"d, e\"\n").unwrap();

    let first = Pipeline::tab_source().run(&path).unwrap();
    assert!(matches!(first[0].outcome, ConversionOutcome::Converted(2)));
    let after_first = fs::read(&path).unwrap();

    let second = Pipeline::tab_source().run(&path).unwrap();
    assert!(matches!(second[0].outcome, ConversionOutcome::Empty));
    assert_eq!(fs::read(&path).unwrap(), after_first);
    assert_eq!(dir_entries(dir.path()), vec!["deck.csv"]);
}

#[test]
fn test_blank_file_left_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.csv");
    fs::write(&path, "\n\r\n\n").unwrap();

    let reports = Pipeline::tab_source().run(&path).unwrap();

    assert!(matches!(reports[0].outcome, ConversionOutcome::Empty));
    assert_eq!(fs::read(&path).unwrap(), b"\n\r\n\n");
    assert_eq!(
        reports[0].to_string(),
        "⚠ No valid records in blank.csv, left unchanged"
    );
}

#[test]
fn test_tab_invalid_utf8_fails_without_touching_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.csv");
    let original: &[u8] = b"caf\xe9\tcoffee\n";
    fs::write(&path, original).unwrap();

    let reports = Pipeline::tab_source().run(&path).unwrap();

    match &reports[0].outcome {
        ConversionOutcome::Failed(ConvertError::Decode { .. }) => {}
        other => panic!("expected decode failure, got {other:?}"),
    }
    assert_eq!(fs::read(&path).unwrap(), original);
    assert_eq!(dir_entries(dir.path()), vec!["latin1.csv"]);
}

#[test]
fn test_equals_example_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("french.txt");
    fs::write(&path, "Café=a coffee shop, \"cozy\"\n").unwrap();

    let reports = Pipeline::equals_source().run(&path).unwrap();

    let out = dir.path().join("french.csv");
    assert!(matches!(reports[0].outcome, ConversionOutcome::Converted(1)));
    assert_eq!(reports[0].destination.as_deref(), Some(out.as_path()));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "\"Café\",\"a coffee shop, \"\"cozy\"\"\"\n"
    );
    // Source is untouched in fresh-output mode
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Café=a coffee shop, \"cozy\"\n"
    );
}

#[cfg(unix)]
#[test]
fn test_equals_rerun_keeps_output_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let src = dir.path().join("deck.txt");
    let out = dir.path().join("deck.csv");
    fs::write(&src, "hola=hello\n").unwrap();
    fs::write(&out, "\"stale\",\"row\"\n").unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o644)).unwrap();
    fs::set_permissions(&out, fs::Permissions::from_mode(0o644)).unwrap();

    let reports = Pipeline::equals_source().run(&src).unwrap();

    assert!(matches!(reports[0].outcome, ConversionOutcome::Converted(1)));
    assert_eq!(parse_csv(&out), vec![vec!["hola", "hello"]]);
    let mode = fs::metadata(&out).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[test]
fn test_equals_output_directory() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("b.txt"), "two=2\n").unwrap();
    fs::write(src.join("a.txt"), "one = 1\n\nskip me\n").unwrap();
    fs::write(src.join("ignored.csv"), "x\ty\n").unwrap();

    let out = dir.path().join("out").join("cards");
    let mut pipeline = Pipeline::equals_source();
    pipeline.output_mode(OutputMode::Directory(out.clone()));
    let reports = pipeline.run(&src).unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].source, src.join("a.txt"));
    assert_eq!(reports[0].skipped_lines, 2);
    assert_eq!(parse_csv(&out.join("a.csv")), vec![vec!["one", "1"]]);
    assert_eq!(parse_csv(&out.join("b.csv")), vec![vec!["two", "2"]]);
    assert_eq!(fs::read_to_string(src.join("ignored.csv")).unwrap(), "x\ty\n");
}

#[test]
fn test_equals_combined_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("2_second.txt"), "c=3\n").unwrap();
    fs::write(dir.path().join("1_first.txt"), "a=1\nb=2\n").unwrap();

    let combined = dir.path().join("all").join("cards.csv");
    let mut pipeline = Pipeline::equals_source();
    pipeline.output_mode(OutputMode::Combined(combined.clone()));
    let reports = pipeline.run(dir.path()).unwrap();

    assert_eq!(reports.len(), 3);
    assert!(matches!(reports[0].outcome, ConversionOutcome::Read(2)));
    assert!(matches!(reports[1].outcome, ConversionOutcome::Read(1)));
    assert!(matches!(reports[2].outcome, ConversionOutcome::Converted(3)));
    assert_eq!(reports[2].source, dir.path());
    assert_eq!(
        fs::read_to_string(&combined).unwrap(),
        "\"a\",\"1\"\n\"b\",\"2\"\n\"c\",\"3\"\n"
    );
}

#[test]
fn test_equals_korean_fallback() {
    let dir = TempDir::new().unwrap();
    // "사과=apple" encoded as EUC-KR
    let mut data = vec![0xBB, 0xE7, 0xB0, 0xFA];
    data.extend_from_slice(b"=apple\r\n");
    fs::write(dir.path().join("korean.txt"), &data).unwrap();

    let reports = Pipeline::equals_source().run(dir.path()).unwrap();

    assert!(matches!(reports[0].outcome, ConversionOutcome::Converted(1)));
    assert_eq!(
        fs::read_to_string(dir.path().join("korean.csv")).unwrap(),
        "\"사과\",\"apple\"\n"
    );
}

#[test]
fn test_batch_isolation() {
    let dir = TempDir::new().unwrap();
    // A truncated multibyte sequence no encoding in the chain accepts
    fs::write(dir.path().join("a_bad.txt"), b"term=def\xc7").unwrap();
    fs::write(dir.path().join("b_good.txt"), "hola=hello\n").unwrap();

    let reports = Pipeline::equals_source().run(dir.path()).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(matches!(
        reports[0].outcome,
        ConversionOutcome::Failed(ConvertError::Decode { .. })
    ));
    assert!(matches!(reports[1].outcome, ConversionOutcome::Converted(1)));
    assert!(!dir.path().join("a_bad.csv").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("b_good.csv")).unwrap(),
        "\"hola\",\"hello\"\n"
    );
}

#[test]
fn test_combined_skips_unreadable_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_bad.txt"), b"x=y\xc7").unwrap();
    fs::write(dir.path().join("b_good.txt"), "k=v\n").unwrap();

    let combined = dir.path().join("out.csv");
    let mut pipeline = Pipeline::equals_source();
    pipeline.output_mode(OutputMode::Combined(combined.clone()));
    let reports = pipeline.run(dir.path()).unwrap();

    assert_eq!(reports.len(), 3);
    assert!(reports[0].outcome.is_failure());
    assert!(matches!(reports[2].outcome, ConversionOutcome::Converted(1)));
    assert_eq!(fs::read_to_string(&combined).unwrap(), "\"k\",\"v\"\n");
}

#[test]
fn test_directory_of_quizlet_exports() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one.csv"), "a\tb\n").unwrap();
    fs::write(dir.path().join("two.CSV"), "\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "a\tb\n").unwrap();

    let reports = Pipeline::tab_source().run(dir.path()).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(matches!(reports[0].outcome, ConversionOutcome::Converted(1)));
    assert!(matches!(reports[1].outcome, ConversionOutcome::Empty));
    assert_eq!(reports[0].to_string(), "✔ Overwrote one.csv (1 line)");
    assert_eq!(fs::read_to_string(dir.path().join("notes.txt")).unwrap(), "a\tb\n");
}

#[test]
fn test_every_output_line_has_two_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("messy.csv");
    fs::write(
        &path,
        "\"quoted\"\t,comma,\n  spaced  \t\"\"\t\"\nterm\t=\"eq\"=\n",
    )
    .unwrap();

    Pipeline::tab_source().run(&path).unwrap();

    let rows = parse_csv(&path);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.len() == 2));
    assert_eq!(rows[0], vec!["quoted", ",comma,"]);
    assert_eq!(rows[1], vec!["spaced", "\"\t"]);
    assert_eq!(rows[2], vec!["term", "=\"eq\"="]);
}
