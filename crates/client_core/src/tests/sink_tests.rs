use super::*;

#[tokio::test]
async fn saves_under_artifact_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = FsArtifactSink::new(dir.path());

    let path = sink
        .save("report_123.xlsx", b"artifact-bytes")
        .await
        .expect("save");

    assert_eq!(path, dir.path().join("report_123.xlsx"));
    assert_eq!(
        tokio::fs::read(&path).await.expect("read back"),
        b"artifact-bytes"
    );
}

#[tokio::test]
async fn creates_missing_target_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("exports").join("today");
    let sink = FsArtifactSink::new(&nested);

    sink.save("a.xlsx", b"x").await.expect("save");
    assert!(nested.join("a.xlsx").exists());
}

#[test]
fn name_cannot_escape_target_directory() {
    let sink = FsArtifactSink::new("/tmp/exports");
    assert_eq!(
        sink.target_path("../../etc/passwd").expect("path"),
        Path::new("/tmp/exports").join("passwd")
    );
    assert_eq!(
        sink.target_path("nested/report.xlsx").expect("path"),
        Path::new("/tmp/exports").join("report.xlsx")
    );
}

#[test]
fn name_without_file_component_is_rejected() {
    let sink = FsArtifactSink::new("/tmp/exports");
    let err = sink.target_path("..").expect_err("must reject");
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}
