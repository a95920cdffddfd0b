use super::*;

#[test]
fn test_absent_blob_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube_config");

    let result = materialize_kubeconfig(None, &path).unwrap();

    assert!(result.is_none());
    assert!(!path.exists());
}

#[test]
fn test_blob_round_trips_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube_config");
    let encoded = STANDARD.encode(b"fake-kube-config");

    let result = materialize_kubeconfig(Some(&encoded), &path).unwrap();

    assert_eq!(result.as_deref(), Some(path.as_path()));
    assert_eq!(std::fs::read(&path).unwrap(), b"fake-kube-config");
}

#[test]
fn test_arbitrary_bytes_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube_config");
    let raw: Vec<u8> = (0..=255u8).chain([0, 0xff, b'\n']).collect();

    materialize_kubeconfig(Some(&STANDARD.encode(&raw)), &path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), raw);
}

#[test]
fn test_empty_payload_writes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube_config");

    materialize_kubeconfig(Some(""), &path).unwrap();

    assert!(std::fs::read(&path).unwrap().is_empty());
}

#[test]
fn test_line_wrapped_blob_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube_config");
    let encoded = STANDARD.encode(b"apiVersion: v1\nkind: Config\nclusters: []\n");
    let (head, tail) = encoded.split_at(12);
    let wrapped = format!("{}\n{}\n", head, tail);

    materialize_kubeconfig(Some(&wrapped), &path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "apiVersion: v1\nkind: Config\nclusters: []\n"
    );
}

#[test]
fn test_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube_config");
    std::fs::write(&path, b"stale contents that are longer").unwrap();

    materialize_kubeconfig(Some(&STANDARD.encode(b"fresh")), &path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"fresh");
}

#[test]
fn test_malformed_base64_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube_config");

    let err = materialize_kubeconfig(Some("not base64!!"), &path).unwrap_err();

    assert!(matches!(err, KubeconfigError::Decode(_)));
    assert!(err.to_string().contains("KUBE_CONFIG"));
    assert!(!path.exists());
}

#[test]
fn test_unwritable_path_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("kube_config");

    let err = materialize_kubeconfig(Some(&STANDARD.encode(b"x")), &path).unwrap_err();

    match err {
        KubeconfigError::Write { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected write error, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kube_config");

    materialize_kubeconfig(Some(&STANDARD.encode(b"secret")), &path).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
