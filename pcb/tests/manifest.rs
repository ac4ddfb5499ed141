//! Generating PHP files from TOML manifests.

use std::fs;

use phpclassbuilder::{Error, Manifest, Template};

const USER_MANIFEST: &str = r#"
[file]
before = ["Generated file, do not edit."]

[class]
name = "User"
namespace = "App\\Model"
extends = "\\App\\Model\\Base"
implements = ["\\JsonSerializable"]

[[class.properties]]
name = "id"
type = "int"
scope = "private"
default = "0"

[[class.methods]]
name = "getId"
returns = "int"
return = "$this->id"

[options]
include_default_value = false
"#;

const USER_PHP: &str = r"<?php namespace App\Model;

/**
 * Generated file, do not edit.
 */

use JsonSerializable;

class User extends Base implements JsonSerializable
{
    /**
     * @var int
     */
    private $id;

    /**
     * @return int
     */
    public function getId()
    {
        return $this->id;

    }
}
";

#[test]
fn test_render_class_manifest() {
    let manifest: Manifest = USER_MANIFEST.parse().unwrap();
    assert_eq!(manifest.render().unwrap(), USER_PHP);
}

#[test]
fn test_options_override_defaults() {
    let manifest: Manifest = USER_MANIFEST.parse().unwrap();
    let opts = manifest.options().unwrap();
    assert!(!opts.include_default_value());
    assert!(opts.include_comment());

    // The built file renders the default when the manifest's options are not applied.
    let rendered = manifest.build().unwrap().render().unwrap();
    assert!(rendered.contains("    private $id = 0;\n"));
}

#[test]
fn test_interface_manifest() {
    let manifest: Manifest = r#"
[interface]
name = "Shape"
namespace = "Geometry"
extends = ["\\Countable"]
doc = ["A closed figure.", "", "@api"]

[[interface.methods]]
name = "scale"
returns = "static"

[[interface.methods.params]]
name = "factor"
type = "float"
default = "1.0"
"#
    .parse()
    .unwrap();

    assert_eq!(
        manifest.render().unwrap(),
        "<?php namespace Geometry;\n\n\
         use Countable;\n\n\
         /**\n * A closed figure.\n *\n * @api\n */\n\
         interface Shape extends Countable\n{\n\
         \x20   /**\n\
         \x20    * @param float $factor\n\
         \x20    * @return static\n\
         \x20    */\n\
         \x20   public function scale($factor = 1.0);\n}\n"
    );
}

#[test]
fn test_from_file_and_write() {
    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("user.toml");
    fs::write(&manifest_path, USER_MANIFEST).unwrap();

    let manifest = Manifest::from_file(&manifest_path).unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let written = manifest.write_to_file(&out).unwrap();
    assert_eq!(written, out.join("User.php"));
    assert_eq!(fs::read_to_string(written).unwrap(), USER_PHP);
}

#[test]
fn test_file_name_override() {
    let dir = tempfile::tempdir().unwrap();
    let manifest: Manifest = "[file]\nname = \"bootstrap\"\n\n[class]\nname = \"Kernel\""
        .parse()
        .unwrap();

    let written = manifest.write_to_file(dir.path()).unwrap();
    assert_eq!(written, dir.path().join("bootstrap.php"));
}

#[test]
fn test_missing_manifest_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Manifest::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_write_to_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let manifest: Manifest = USER_MANIFEST.parse().unwrap();
    let missing = dir.path().join("missing");

    let err = manifest.write_to_file(&missing).unwrap_err();
    assert!(matches!(err, Error::InvalidOutputPath { .. }));
    assert!(!missing.exists());
}
