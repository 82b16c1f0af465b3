//! End-to-end tests against the real working directory and environment.
//!
//! These tests change process-global state (cwd and env vars), so every test
//! is marked `#[serial]`.

use envfill::{Error, Record};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
#[allow(non_snake_case)]
struct AppConfig {
    ENVFILL_TEST_FOO: String,
    ENVFILL_TEST_BAZ: String,
}

#[derive(Debug, Default, PartialEq, Record)]
#[allow(non_snake_case)]
struct NumericConfig {
    ENVFILL_TEST_FOO: String,
    ENVFILL_TEST_N: i32,
}

#[test]
#[serial]
fn test_load_from_default_env_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "ENVFILL_TEST_FOO=bar\n").unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let mut config = AppConfig::default();
    envfill::load(&mut config, None).unwrap();

    assert_eq!(config.ENVFILL_TEST_FOO, "bar");
    assert_eq!(config.ENVFILL_TEST_BAZ, "");
}

#[test]
#[serial]
fn test_file_wins_over_environment() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "ENVFILL_TEST_FOO=file\n").unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    temp_env::with_vars(
        [
            ("ENVFILL_TEST_FOO", Some("env")),
            ("ENVFILL_TEST_BAZ", Some("env")),
        ],
        || {
            let mut config = AppConfig::default();
            envfill::load(&mut config, None).unwrap();

            assert_eq!(config.ENVFILL_TEST_FOO, "file");
            // The environment is not consulted at all when the file exists
            assert_eq!(config.ENVFILL_TEST_BAZ, "");
        },
    );
}

#[test]
#[serial]
fn test_load_from_override_file_name() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("staging.env"),
        "ENVFILL_TEST_FOO=staging\nENVFILL_TEST_BAZ=qux\n",
    )
    .unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let mut config = AppConfig::default();
    envfill::load(&mut config, Some("staging.env")).unwrap();

    assert_eq!(config.ENVFILL_TEST_FOO, "staging");
    assert_eq!(config.ENVFILL_TEST_BAZ, "qux");
}

#[test]
#[serial]
fn test_falls_back_to_environment() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    temp_env::with_vars(
        [
            ("ENVFILL_TEST_FOO", Some("envval")),
            ("ENVFILL_TEST_BAZ", None),
        ],
        || {
            let mut config = AppConfig::default();
            envfill::load(&mut config, None).unwrap();

            assert_eq!(config.ENVFILL_TEST_FOO, "envval");
            assert_eq!(config.ENVFILL_TEST_BAZ, "");
        },
    );
}

#[test]
#[serial]
fn test_multiple_equals_line_is_whole_key() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        "ENVFILL_TEST_FOO=a=b\nENVFILL_TEST_BAZ=ok\n",
    )
    .unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let mut config = AppConfig::default();
    envfill::load(&mut config, None).unwrap();

    assert_eq!(config.ENVFILL_TEST_FOO, "");
    assert_eq!(config.ENVFILL_TEST_BAZ, "ok");
}

#[test]
#[serial]
fn test_unsupported_field_from_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        "ENVFILL_TEST_FOO=set\nENVFILL_TEST_N=3\n",
    )
    .unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let mut config = NumericConfig::default();
    let err = envfill::load(&mut config, None).unwrap_err();

    assert!(matches!(
        err,
        Error::UnsupportedFieldType { ref field, ref type_name }
            if field == "ENVFILL_TEST_N" && type_name == "i32"
    ));
    assert_eq!(config.ENVFILL_TEST_FOO, "set");
}

#[test]
#[serial]
fn test_unsupported_field_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    // Every field name is present in the environment map, set or not
    temp_env::with_vars_unset(["ENVFILL_TEST_FOO", "ENVFILL_TEST_N"], || {
        let mut config = NumericConfig::default();
        let err = envfill::load(&mut config, None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFieldType { .. }));
    });
}

#[test]
#[serial]
fn test_load_into_none_is_nil_reference() {
    let err = envfill::load_into::<AppConfig>(None, None).unwrap_err();
    assert!(matches!(err, Error::NilReference));
}

#[test]
#[serial]
fn test_load_into_some() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "ENVFILL_TEST_BAZ=baz\n").unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let mut config = AppConfig::default();
    envfill::load_into(Some(&mut config), None).unwrap();
    assert_eq!(config.ENVFILL_TEST_BAZ, "baz");
}

#[test]
#[serial]
fn test_load_scalar_is_not_a_struct() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let mut n = 0i32;
    let err = envfill::load(&mut n, None).unwrap_err();
    assert!(matches!(err, Error::NotAStruct(_)));
}

#[test]
#[serial]
fn test_repeated_loads_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        "ENVFILL_TEST_FOO=one\nENVFILL_TEST_BAZ=two\n",
    )
    .unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let mut first = AppConfig::default();
    let mut second = AppConfig::default();
    envfill::load(&mut first, None).unwrap();
    envfill::load(&mut second, None).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.ENVFILL_TEST_FOO, "one");
}

#[cfg(unix)]
#[test]
#[serial]
fn test_unreadable_file_is_open_error() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, "ENVFILL_TEST_FOO=x\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can open the file regardless of its mode
    if fs::File::open(&path).is_ok() {
        return;
    }

    let _cwd = CwdGuard::new(&temp_dir);
    let mut config = AppConfig::default();
    let err = envfill::load(&mut config, None).unwrap_err();
    assert!(matches!(err, Error::FileOpen { .. }));
}
