// File: crates/minichart-core/build.rs
// Summary: Links the Windows system libraries skia-safe's prebuilt binaries expect.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends
        println!("cargo:rustc-link-lib=advapi32");
    }
}
