
use std::error::Error;
use vergen_gitcl::{Emitter, GitclBuilder};

/// Fallback describe string when git metadata is unavailable (e.g., source tarballs)
const UNKNOWN_DESCRIBE: &str = "unknown";

/// Emits the VERGEN_GIT_* instructions used to build the full version string.
/// # Errors
/// * if `git` is not installed
/// * if the build is not happening inside a git checkout
fn emit_git() -> Result<(), Box<dyn Error>> {
    let gitcl = GitclBuilder::default()
        .all()
        .describe(false, true, Some("ThisPatternShouldNotMatchAnythingEver"))
        .build()?;

    Emitter::default()
        .fail_on_error()
        .add_instructions(&gitcl)?
        .emit()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    if emit_git().is_err() {
        // no git info, so allow an override from the environment before falling back
        let git_desc = option_env!("CUSTOM_VERGEN_GIT_DESCRIBE")
            .unwrap_or(UNKNOWN_DESCRIBE);
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE={git_desc}");
    }

    // vergen only tracks the git state, we also want rebuilds on manifest and source changes
    for tracked in ["Cargo.toml", "src"] {
        println!("cargo:rerun-if-changed={tracked}");
    }

    Ok(())
}
