// Shared build script helper that turns a crate README into its rustdoc front page.
// Include this in build.rs files with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Write `README_GENERATED.md` to `OUT_DIR` from the crate's README.md.
///
/// Links such as `](src/download/hook.rs)` are rewritten to `](download/hook)`
/// so rustdoc resolves them as module paths. A missing README produces an
/// empty page rather than a build failure.
fn render_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");

    let content = fs::read_to_string(Path::new(crate_dir).join("README.md")).unwrap_or_default();
    let rustdoc = content.replace("](src/", "](").replace(".rs)", ")");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo for build scripts");
    fs::write(Path::new(&out_dir).join("README_GENERATED.md"), rustdoc)
        .expect("OUT_DIR is writable");
}
