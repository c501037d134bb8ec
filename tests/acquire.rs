use std::path::{Path, PathBuf};
use std::sync::Arc;

use imagevault::acquire::*;
use imagevault::store::ImageSource;
use tempfile::tempdir;

mod common;
use common::{solid_image, write_image};

#[test]
fn batch_keeps_only_image_items_in_order() {
    let items = vec![
        DroppedItem::Path(PathBuf::from("first.png")),
        DroppedItem::Path(PathBuf::from("notes.txt")),
        DroppedItem::Path(PathBuf::from("second.jpg")),
        DroppedItem::Path(PathBuf::from("third.webp")),
    ];
    let accepted = accept_items(items);

    let names: Vec<_> = accepted.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["first.png", "second.jpg", "third.webp"]);
}

#[test]
fn path_metadata_comes_from_disk() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("sample.PNG");
    write_image(&path, &solid_image(4, 4, [10, 20, 30, 255]));
    let on_disk = std::fs::metadata(&path).unwrap().len();

    let accepted = accept_items(vec![DroppedItem::Path(path)]);
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].name, "sample.PNG");
    assert_eq!(accepted[0].size, Some(on_disk));
    assert_eq!(accepted[0].kind.as_deref(), Some("png"));
    assert!(matches!(accepted[0].source, ImageSource::Path(_)));
}

#[test]
fn missing_file_still_yields_a_record_without_size() {
    // The type filter is on the declared type; the unreadable file shows
    // up later as a per-item decode failure, not a batch failure.
    let accepted = accept_items(vec![DroppedItem::Path(PathBuf::from("/no/such/pic.png"))]);
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].size, None);
}

#[test]
fn memory_drops_are_filtered_by_mime() {
    let items = vec![
        DroppedItem::Bytes {
            name: "pasted.png".to_string(),
            mime: "image/png".to_string(),
            bytes: Arc::from(b"pngbytes".as_slice()),
        },
        DroppedItem::Bytes {
            name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
            bytes: Arc::from(b"hello".as_slice()),
        },
    ];
    let accepted = accept_items(items);

    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].name, "pasted.png");
    assert_eq!(accepted[0].size, Some(8));
    assert_eq!(accepted[0].kind.as_deref(), Some("image/png"));
}

#[test]
fn memory_drop_with_empty_name_gets_the_default_label() {
    let accepted = accept_items(vec![DroppedItem::Bytes {
        name: String::new(),
        mime: "image/jpeg".to_string(),
        bytes: Arc::from(b"jpegbytes".as_slice()),
    }]);
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].name, DEFAULT_NAME);
}

#[test]
fn is_supported_image_matches_extensions_case_insensitively() {
    assert!(is_supported_image(Path::new("photo.JPG")));
    assert!(is_supported_image(Path::new("scan.TiF")));
    assert!(is_supported_image(Path::new("anim.gif")));
    assert!(!is_supported_image(Path::new("movie.mp4")));
    assert!(!is_supported_image(Path::new("README")));
}

#[test]
fn collect_paths_keeps_plain_files_in_input_order() {
    let tmp = tempdir().unwrap();
    let z = tmp.path().join("z.png");
    let a = tmp.path().join("a.png");
    write_image(&z, &solid_image(1, 1, [0, 0, 0, 255]));
    write_image(&a, &solid_image(1, 1, [0, 0, 0, 255]));

    let files = collect_paths(&[z.clone(), a.clone()], false).unwrap();
    assert_eq!(files, vec![z, a]);
}

#[test]
fn collect_paths_expands_directories_in_name_order() {
    let tmp = tempdir().unwrap();
    write_image(tmp.path().join("b.png"), &solid_image(1, 1, [0, 0, 0, 255]));
    write_image(tmp.path().join("a.png"), &solid_image(1, 1, [0, 0, 0, 255]));

    let files = collect_paths(&[tmp.path().to_path_buf()], false).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.png", "b.png"]);
}

#[test]
fn collect_paths_recurses_only_when_asked() {
    let tmp = tempdir().unwrap();
    let nested = tmp.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    write_image(tmp.path().join("top.png"), &solid_image(1, 1, [0, 0, 0, 255]));
    write_image(nested.join("deep.png"), &solid_image(1, 1, [0, 0, 0, 255]));

    let flat = collect_paths(&[tmp.path().to_path_buf()], false).unwrap();
    assert_eq!(flat.len(), 1);

    let deep = collect_paths(&[tmp.path().to_path_buf()], true).unwrap();
    assert_eq!(deep.len(), 2);
}

#[test]
fn collect_paths_errors_for_missing_input() {
    let err = collect_paths(&[PathBuf::from("/does/not/exist")], false).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
