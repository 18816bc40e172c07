use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Fetches a prebuilt PDFium into vendor/pdfium for the preview renderer.
// pdfium-render binds to the library at runtime, so a failed download only
// disables the preview; the build itself goes on.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target = env::var("TARGET").unwrap_or_default();
    let pdfium_version = "chromium/7543";

    let Some((platform, arch, lib_name)) = platform_for(&target) else {
        println!("cargo:warning=Unsupported target platform for PDFium: {}", target);
        return;
    };

    let Some(workspace_root) = env::var("CARGO_MANIFEST_DIR")
        .ok()
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().and_then(Path::parent).map(Path::to_path_buf))
    else {
        println!("cargo:warning=Could not locate workspace root, skipping PDFium download");
        return;
    };

    let pdfium_dir = workspace_root.join("vendor").join("pdfium");
    let lib_path = pdfium_dir.join("lib").join(lib_name);
    if lib_path.exists() {
        return;
    }

    if let Err(e) = install(pdfium_version, platform, arch, &pdfium_dir) {
        println!("cargo:warning=PDFium download failed: {}", e);
        println!("cargo:warning=Preview rendering will use a system PDFium if one is installed");
        return;
    }

    if !lib_path.exists() {
        println!(
            "cargo:warning=PDFium archive did not contain {}",
            lib_path.display()
        );
        return;
    }

    fix_library_install_name(&lib_path, platform);
    println!(
        "cargo:warning=PDFium installed to {}",
        pdfium_dir.display()
    );
}

fn platform_for(target: &str) -> Option<(&'static str, &'static str, &'static str)> {
    let arm = target.contains("aarch64");
    if target.contains("apple") {
        Some(("mac", if arm { "arm64" } else { "x64" }, "libpdfium.dylib"))
    } else if target.contains("linux") {
        Some(("linux", if arm { "arm64" } else { "x64" }, "libpdfium.so"))
    } else if target.contains("windows") {
        let arch = if arm {
            "arm64"
        } else if target.contains("i686") {
            "x86"
        } else {
            "x64"
        };
        Some(("win", arch, "pdfium.dll"))
    } else {
        None
    }
}

fn install(version: &str, platform: &str, arch: &str, dest: &Path) -> Result<(), String> {
    let url = format!(
        "https://github.com/bblanchon/pdfium-binaries/releases/download/{}/pdfium-{}-{}.tgz",
        version, platform, arch
    );
    println!("cargo:warning=Downloading PDFium from {}", url);

    fs::create_dir_all(dest).map_err(|e| e.to_string())?;
    let tarball = env::temp_dir().join("pdfium.tgz");

    download_file(&url, &tarball)?;
    let result = extract_tarball(&tarball, dest);
    let _ = fs::remove_file(&tarball);
    result
}

fn download_file(url: &str, dest: &Path) -> Result<(), String> {
    use std::io::Write;

    let response = ureq::get(url)
        .call()
        .map_err(|e| format!("{}: {}", url, e))?;

    let mut file = fs::File::create(dest).map_err(|e| e.to_string())?;
    std::io::copy(&mut response.into_reader(), &mut file).map_err(|e| e.to_string())?;
    file.flush().map_err(|e| e.to_string())
}

fn extract_tarball(tarball: &Path, dest: &Path) -> Result<(), String> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let tar_gz = fs::File::open(tarball).map_err(|e| e.to_string())?;
    Archive::new(GzDecoder::new(tar_gz))
        .unpack(dest)
        .map_err(|e| e.to_string())
}

fn fix_library_install_name(lib_path: &Path, platform: &str) {
    if platform != "mac" {
        return;
    }

    let output = std::process::Command::new("install_name_tool")
        .arg("-id")
        .arg("@rpath/libpdfium.dylib")
        .arg(lib_path)
        .output();

    if let Ok(result) = output {
        if !result.status.success() {
            println!(
                "cargo:warning=Failed to fix install name: {}",
                String::from_utf8_lossy(&result.stderr)
            );
        }
    }
}
