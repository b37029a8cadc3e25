use super::*;

#[test]
#[cfg(target_os = "linux")]
fn library_filepath_on_linux() {
    let path = make_library_filepath("/opt/meteor", "dei");
    assert_eq!(path, PathBuf::from("/opt/meteor/libdei.so"));
}

#[test]
#[cfg(target_os = "macos")]
fn library_filepath_on_macos() {
    let path = make_library_filepath("/opt/meteor", "dei");
    assert_eq!(path, PathBuf::from("/opt/meteor/libdei.dylib"));
}

#[test]
#[cfg(windows)]
fn library_filepath_on_windows() {
    let path = make_library_filepath("C:\\meteor", "dei");
    assert_eq!(path, PathBuf::from("C:\\meteor\\dei.dll"));
}

#[test]
fn library_filepath_keeps_basename_verbatim() {
    // No mangling beyond the platform prefix/suffix.
    let path = make_library_filepath("/tmp", "meteor_guest");
    let filename = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(filename.contains("meteor_guest"));
    assert_eq!(path.parent(), Some(Path::new("/tmp")));
}

#[test]
fn native_loader_fails_on_missing_file() {
    let mut loader = NativeLoader;
    let result = loader.load(Path::new("/nonexistent/libnope.so"));
    match result {
        Err(Error::LoadFailed(msg)) => assert!(msg.contains("libnope")),
        other => panic!("Expected LoadFailed, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn native_loader_modified_time_fails_on_missing_file() {
    let loader = NativeLoader;
    assert!(loader.modified_time(Path::new("/nonexistent/libnope.so")).is_err());
}

#[test]
fn plugin_op_values_are_stable() {
    // The ABI tags are fixed; a module compiled against them must keep
    // matching the host.
    assert_eq!(PluginOp::Load as u32, 0);
    assert_eq!(PluginOp::Step as u32, 1);
    assert_eq!(PluginOp::Unload as u32, 2);
    assert_eq!(PluginOp::Close as u32, 3);
}
