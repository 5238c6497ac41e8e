//! Build script for drivesync-simulator
//!
//! On Windows, links against the SDL2 import library in `vendor/sdl2/` and
//! copies SDL2.dll next to the built binary. Other platforms use the system SDL2.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let Some(workspace_dir) = Path::new(&manifest_dir).parent() else {
        return;
    };
    let vendor_sdl2 = workspace_dir.join("vendor").join("sdl2");
    println!("cargo:rerun-if-changed={}", vendor_sdl2.display());

    if !vendor_sdl2.exists() {
        println!("cargo:warning=SDL2 not found at {}", vendor_sdl2.display());
        println!("cargo:warning=Place SDL2.lib and SDL2.dll in vendor/sdl2/ to build the simulator");
        return;
    }
    println!("cargo:rustc-link-search=native={}", vendor_sdl2.display());

    if let Some(profile_dir) = profile_dir() {
        copy_dll(&vendor_sdl2.join("SDL2.dll"), &profile_dir.join("SDL2.dll"));
    }
}

/// `target/<profile>`, found by walking up from `OUT_DIR`
/// (`target/<profile>/build/drivesync-simulator-<hash>/out`).
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    out_dir
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
        .map(Path::to_path_buf)
}

fn copy_dll(
    src: &Path,
    dst: &Path,
) {
    if !src.exists() || dst.exists() {
        return;
    }
    match fs::copy(src, dst) {
        Ok(_) => println!("cargo:warning=Copied SDL2.dll to {}", dst.display()),
        Err(e) => println!("cargo:warning=Failed to copy SDL2.dll: {e}"),
    }
}
