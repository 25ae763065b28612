use dupscan::{
    CancellationToken, DocumentParser, EngineMisuse, IngestConfig, NoProgress, ParseError,
    PipelineError, ProgressUpdate, ScanConfig, ScanError, ScanMode, SourceFile, check_files,
    read_sources,
};
use std::sync::atomic::{AtomicUsize, Ordering};

const LINE_A: &str = "Which gas do plants absorb during photosynthesis?";
const LINE_B: &str = "Which gas do animals exhale during respiration?";

fn bank(name: &str) -> SourceFile {
    SourceFile::new(name, format!("{LINE_A}\n{LINE_B}\n"))
}

async fn check(files: &[SourceFile], cfg: &ScanConfig) -> Result<dupscan::CheckReport, PipelineError> {
    check_files(
        files,
        &DocumentParser::default(),
        cfg,
        &NoProgress,
        &CancellationToken::new(),
    )
    .await
}

#[tokio::test]
async fn unsupported_extension_is_reported() {
    let err = check(&[bank("slides.pptx")], &ScanConfig::default())
        .await
        .unwrap_err();
    match err {
        PipelineError::Parse(ParseError::UnsupportedFormat { name, supported }) => {
            assert_eq!(name, "slides.pptx");
            assert!(supported.contains("txt"));
            assert!(supported.contains("md"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn first_failing_file_aborts_the_check() {
    let files = [
        bank("good.txt"),
        SourceFile::new("broken.txt", vec![0x66, 0x6f, 0xff, 0xfe]),
        SourceFile::new("empty.txt", ""),
    ];
    let err = check(&files, &ScanConfig::default()).await.unwrap_err();
    match err {
        PipelineError::Parse(ParseError::Corrupt { name, .. }) => assert_eq!(name, "broken.txt"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn oversized_file_is_rejected() {
    let parser = DocumentParser::new(IngestConfig::default().with_max_file_bytes(Some(16)));
    let err = check_files(
        &[bank("big.txt")],
        &parser,
        &ScanConfig::new(ScanMode::Single, 0.75),
        &NoProgress,
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Parse(ParseError::TooLarge { limit: 16, .. })
    ));
}

#[tokio::test]
async fn whitespace_only_file_has_no_paragraphs() {
    let err = check(&[SourceFile::new("blank.txt", "  \n\t\n   \n")], &ScanConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "parse failure: no usable paragraphs found in \"blank.txt\"");
}

#[tokio::test]
async fn single_mode_rejects_several_files_before_parsing() {
    let calls = AtomicUsize::new(0);
    let observer = |_: &ProgressUpdate| {
        calls.fetch_add(1, Ordering::SeqCst);
    };
    // The second file would fail to parse; the mode check must come first.
    let files = [bank("a.txt"), bank("slides.pptx")];
    let err = check_files(
        &files,
        &DocumentParser::default(),
        &ScanConfig::new(ScanMode::Single, 0.75),
        &observer,
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        PipelineError::Scan(ScanError::EngineMisuse(EngineMisuse::SingleModeDocumentCount(2)))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_threshold_fails_before_parsing() {
    let calls = AtomicUsize::new(0);
    let observer = |_: &ProgressUpdate| {
        calls.fetch_add(1, Ordering::SeqCst);
    };
    for threshold in [-0.1, 1.01, f64::NAN] {
        let err = check_files(
            &[bank("a.txt")],
            &DocumentParser::default(),
            &ScanConfig::new(ScanMode::Single, threshold),
            &observer,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Scan(ScanError::EngineMisuse(EngineMisuse::InvalidThreshold(_)))
        ));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_path_maps_to_io_error() {
    let err = read_sources(&["/definitely/not/here/bank.txt"]).unwrap_err();
    match err {
        PipelineError::Parse(ParseError::Io { name, .. }) => assert_eq!(name, "bank.txt"),
        other => panic!("unexpected error: {other:?}"),
    }
}
