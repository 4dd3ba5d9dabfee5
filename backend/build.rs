use std::fs;
use std::path::Path;

// Copies the trunk build of the frontend into static/dist so it can be
// embedded with include_dir. Without a build, the checked-in fallback page
// is served.
fn main() {
    let out_dir = Path::new("static/dist");
    let dist_dir = Path::new("../frontend/dist");

    println!("cargo:rerun-if-changed=../frontend/dist");
    if !dist_dir.exists() {
        return;
    }

    let copied = fs::remove_dir_all(out_dir)
        .or_else(|e| if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) })
        .and_then(|_| fs::create_dir_all(out_dir))
        .map_err(|e| e.to_string())
        .and_then(|_| {
            let options = fs_extra::dir::CopyOptions::new().overwrite(true).content_only(true);
            fs_extra::dir::copy(dist_dir, out_dir, &options).map_err(|e| e.to_string())
        });
    if let Err(e) = copied {
        println!("cargo:warning=could not embed frontend build: {}", e);
    }
}
