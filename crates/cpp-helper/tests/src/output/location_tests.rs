use std::path::{Path, PathBuf};

use super::*;

#[test]
fn gcc_location() {
    let location = parse_location("../../../src/kit/test_format.cpp:14:5: error: boom").unwrap();
    assert_eq!(location.text, "../../../src/kit/test_format.cpp:14:5");
    assert_eq!(location.path, "../../../src/kit/test_format.cpp");
    assert_eq!((location.line, location.column), (14, 5));
}

#[test]
fn msvc_location() {
    let location = parse_location(r"D:\code\kit\src\Json.hpp(233): warning C4996: old").unwrap();
    assert_eq!(location.text, r"D:\code\kit\src\Json.hpp(233)");
    assert_eq!(location.path, r"D:\code\kit\src\Json.hpp");
    assert_eq!((location.line, location.column), (233, 1));
}

#[test]
fn no_location() {
    assert_eq!(parse_location("Build finished with exit code 0"), None);
    assert_eq!(parse_location(""), None);
}

#[test]
fn relative_paths_join_workspace_root() {
    let root = Path::new("/work/project");
    assert_eq!(
        resolve_build_path("../../../src/kit/a.cpp", root),
        PathBuf::from("/work/project/src/kit/a.cpp")
    );
    assert_eq!(resolve_build_path("../.././src/a.cpp", root), PathBuf::from("/work/project/src/a.cpp"));
    assert_eq!(resolve_build_path("src/a.cpp", root), PathBuf::from("/work/project/src/a.cpp"));
}

#[test]
fn absolute_paths_are_normalised() {
    let root = Path::new("/work/project");
    assert_eq!(resolve_build_path("/usr/include/./c++/../stdio.h", root), PathBuf::from("/usr/include/stdio.h"));
    assert_eq!(resolve_build_path("/opt/a.cpp", root), PathBuf::from("/opt/a.cpp"));
}

#[test]
fn collapses_first_current_dir_only() {
    assert_eq!(collapse_current_dir("a/./b/./c"), "a/b/./c");
    assert_eq!(collapse_current_dir(r"a\.\b"), r"a\b");
}
