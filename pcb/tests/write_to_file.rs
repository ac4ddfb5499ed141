//! Tests for writing rendered files to disk.

use std::fs;

use phpclassbuilder::{ClassNode, CommentNode, Error, FileNode, FunctionNode, InterfaceNode};
use tempfile::TempDir;

#[test]
fn test_class_file_written() {
    let dir = TempDir::new().unwrap();
    let mut class = ClassNode::new("Foo").unwrap();
    class.set_namespace("App").unwrap();

    let path = class.into_file().write_to_file(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("Foo.php"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "<?php namespace App;\n\nclass Foo\n{\n\n}\n"
    );
}

#[test]
fn test_interface_file_written() {
    let dir = TempDir::new().unwrap();
    let path = InterfaceNode::new("Marker")
        .unwrap()
        .into_file()
        .write_to_file(dir.path())
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "Marker.php");
    assert!(fs::read_to_string(path).unwrap().contains("interface Marker\n{\n\n}"));
}

#[test]
fn test_file_name_override() {
    let dir = TempDir::new().unwrap();
    let mut file = FileNode::new();
    file.set_file_name("helpers.php");
    file.add_before_comment(CommentNode::from_text("Helper functions."));
    file.add_item(FunctionNode::new("boot").unwrap()).unwrap();

    let path = file.write_to_file(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("helpers.php"));
    assert_eq!(
        fs::read_to_string(path).unwrap(),
        "<?php\n\n/**\n * Helper functions.\n */\n\nfunction boot()\n{\n\n}\n\n"
    );
}

#[test]
fn test_not_a_directory() {
    let file = ClassNode::new("Foo").unwrap().into_file();
    let err = file.write_to_file("/not/a/directory").unwrap_err();

    assert!(matches!(err, Error::InvalidOutputPath { .. }));
    assert!(!std::path::Path::new("/not/a/directory").exists());
}

#[test]
fn test_regular_file_is_not_a_directory() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let file = ClassNode::new("Foo").unwrap().into_file();
    let err = file.write_to_file(&blocker).unwrap_err();

    assert!(matches!(err, Error::InvalidOutputPath { ref path } if *path == blocker));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "");
}

#[test]
fn test_unnamed_file_rejected() {
    let dir = TempDir::new().unwrap();
    let err = FileNode::new().write_to_file(dir.path()).unwrap_err();

    assert!(matches!(err, Error::MissingName { .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
