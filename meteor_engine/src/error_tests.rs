use super::*;

#[test]
fn display_window_creation_failed() {
    let err = Error::WindowCreationFailed("width is zero".to_string());
    assert_eq!(err.to_string(), "Window creation failed: width is zero");
}

#[test]
fn display_load_failed() {
    let err = Error::LoadFailed("libdei.so: no such file".to_string());
    assert_eq!(err.to_string(), "Module load failed: libdei.so: no such file");
}

#[test]
fn display_update_failed() {
    assert_eq!(Error::UpdateFailed.to_string(), "Module update failed");
}

#[test]
fn display_reload_failed() {
    let err = Error::ReloadFailed("entry symbol missing".to_string());
    assert_eq!(err.to_string(), "Module reload failed: entry symbol missing");
}

#[test]
fn display_initialization_failed() {
    let err = Error::InitializationFailed("reload interval must be non-zero".to_string());
    assert!(err.to_string().starts_with("Initialization failed"));
}

#[test]
fn display_backend_error() {
    let err = Error::BackendError("no physical devices".to_string());
    assert_eq!(err.to_string(), "Backend error: no physical devices");
}

#[test]
fn errors_are_cloneable_and_comparable_via_debug() {
    let err = Error::ReloadFailed("abi mismatch".to_string());
    let clone = err.clone();
    assert_eq!(format!("{:?}", err), format!("{:?}", clone));
}

#[test]
fn error_implements_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::UpdateFailed);
}
