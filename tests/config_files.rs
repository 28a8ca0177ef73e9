//! Loading linker configuration from disk.

use anno_coref::{Error, Linker, LinkerConfig, LinkerMode};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_full_config() {
    let file = write_config(
        r#"
mode = "train"
use_discourse_model = false
remove_unresolved_mentions = false
"#,
    );
    let config = LinkerConfig::load(file.path()).unwrap();

    assert_eq!(config.mode, LinkerMode::Train);
    assert!(!config.use_discourse_model);
    assert!(!config.remove_unresolved_mentions);
}

#[test]
fn load_partial_config_uses_defaults() {
    let file = write_config("mode = \"eval\"\n");
    let config = LinkerConfig::load(file.path()).unwrap();

    assert_eq!(config.mode, LinkerMode::Eval);
    assert!(config.use_discourse_model);
    assert!(config.remove_unresolved_mentions);
}

#[test]
fn saved_config_loads_back() {
    let original = LinkerConfig::new(LinkerMode::Sim).with_discourse_model(false);
    let file = write_config(&original.to_toml_string().unwrap());
    assert_eq!(LinkerConfig::load(file.path()).unwrap(), original);
}

#[test]
fn unknown_mode_is_rejected() {
    let file = write_config("mode = \"predict\"\n");
    let err = LinkerConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = LinkerConfig::load(dir.path().join("linker.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn loaded_config_drives_linker() {
    let file = write_config("remove_unresolved_mentions = false\n");
    let config = LinkerConfig::load(file.path()).unwrap();
    let linker = Linker::default_cascade(config);
    assert!(!linker.config().remove_unresolved_mentions);
    assert_eq!(linker.mode(), LinkerMode::Test);
}
