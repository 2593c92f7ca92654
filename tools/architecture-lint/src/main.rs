//! Command-line runner: checks the `users-api` sources under `backend/src`
//! against the layer rules and exits non-zero on any violation.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const BACKEND_DIR: &str = "backend";

fn main() -> ExitCode {
    let outcome = locate_workspace()
        .map(|root| root.join(BACKEND_DIR))
        .map_err(|err| err.to_string())
        .and_then(|backend| {
            architecture_lint::lint_backend_sources(&backend).map_err(|err| err.to_string())
        });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            let _ = writeln!(io::stderr().lock(), "architecture lint failed: {message}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct WorkspaceNotFound;

impl fmt::Display for WorkspaceNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no Cargo.toml declaring [workspace] above the current directory")
    }
}

impl std::error::Error for WorkspaceNotFound {}

/// Search upwards from `CARGO_WORKSPACE_DIR`, the working directory and this
/// crate's manifest directory, in that order.
fn locate_workspace() -> Result<PathBuf, WorkspaceNotFound> {
    let starts = [
        std::env::var_os("CARGO_WORKSPACE_DIR").map(PathBuf::from),
        std::env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];

    starts
        .iter()
        .flatten()
        .find_map(|start| start.ancestors().find(|dir| declares_workspace(dir)))
        .map(Path::to_path_buf)
        .ok_or(WorkspaceNotFound)
}

fn declares_workspace(dir: &Path) -> bool {
    std::fs::read_to_string(dir.join("Cargo.toml"))
        .is_ok_and(|manifest| manifest.lines().any(|line| line.trim() == "[workspace]"))
}
