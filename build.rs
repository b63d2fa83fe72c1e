use std::process::Command;

/// Run `git rev-parse` with the given args, falling back to "unknown".
fn git_hash(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // Capture git commit hashes at build time for debug reports
    let short = git_hash(&["rev-parse", "--short", "HEAD"]);
    let full = git_hash(&["rev-parse", "HEAD"]);

    println!("cargo:rustc-env=GIT_HASH={short}");
    println!("cargo:rustc-env=GIT_HASH_FULL={full}");

    // rerun build script if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
}
