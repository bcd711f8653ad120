use std::process::Command;

fn git_tag() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--abbrev=0"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let tag = String::from_utf8(output.stdout).ok()?;
    let tag = tag.trim();
    (!tag.is_empty()).then(|| tag.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // bundled model parameters are embedded at compile time
    println!("cargo:rerun-if-changed=assets");
    if let Some(tag) = git_tag() {
        println!("cargo:rustc-env=GIT_TAG={tag}");
    }
}
