//! Layer guardrails for the `users-api` backend.
//!
//! `backend/src` is split into three layers by top-level directory:
//!
//! | Layer      | May not name                          | May not use crates                    |
//! |------------|---------------------------------------|---------------------------------------|
//! | `domain`   | `inbound`, `outbound`                 | Actix, `awc`, `utoipa`, the MongoDB driver |
//! | `inbound`  | `outbound`                            | the MongoDB driver                    |
//! | `outbound` | `inbound`                             | Actix, `awc`                          |
//!
//! Every `use` tree and every path expression in a layer's files is checked,
//! so fully qualified calls are caught as well as imports. Run it with
//! `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library name of the linted crate when it appears in absolute paths.
const CRATE_NAME: &str = "users_api";

const ACTIX_CRATES: [&str; 5] = ["actix", "actix_service", "actix_web", "actix_web_prom", "awc"];
const DRIVER_CRATES: [&str; 2] = ["bson", "mongodb"];
const OPENAPI_CRATES: [&str; 2] = ["utoipa", "utoipa_swagger_ui"];

/// A boundary rule broken by one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Which rule was broken.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Reasons the lint did not pass.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Reading the source tree failed.
    Io(io::Error),
    /// A file could not be parsed or placed in a layer.
    Parse { file: PathBuf, message: String },
    /// The tree breaks one or more layer rules.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read backend sources: {err}"),
            Self::Parse { file, message } => {
                write!(f, "could not lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                write!(f, "{} layer violation(s):", violations.len())?;
                violations
                    .iter()
                    .try_for_each(|violation| write!(f, "\n- {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { .. } | Self::Violations(_) => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust file handed to [`lint_sources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`; its first component names the layer.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint every layer under `backend_dir/src`.
///
/// Files outside the three layer directories are not inspected.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let sources = read_layer_sources(&backend_dir.join("src"))?;
    lint_sources(&sources)
}

/// Lint in-memory sources.
///
/// # Errors
///
/// Returns [`ArchitectureLintError::Parse`] for a file outside a known layer
/// or with invalid syntax, and [`ArchitectureLintError::Violations`] listing
/// every broken rule otherwise.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        violations.extend(check_source(source)?);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn named(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.dir() == segment)
    }

    fn of_file(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?;
        Self::named(first.as_os_str().to_str()?)
    }

    fn may_name(self, other: Self) -> bool {
        match self {
            Self::Domain => other == Self::Domain,
            Self::Inbound => other != Self::Outbound,
            Self::Outbound => other != Self::Inbound,
        }
    }

    fn may_use_crate(self, name: &str) -> bool {
        let banned: &[&[&str]] = match self {
            Self::Domain => &[&ACTIX_CRATES, &DRIVER_CRATES, &OPENAPI_CRATES],
            Self::Inbound => &[&DRIVER_CRATES],
            Self::Outbound => &[&ACTIX_CRATES],
        };
        !banned.iter().any(|group| group.contains(&name))
    }
}

/// What a path's leading segments resolve to.
enum Target<'a> {
    Layer(Layer),
    Crate(&'a str),
    Local,
}

fn resolve(segments: &[String]) -> Target<'_> {
    let Some(first) = segments.first().map(String::as_str) else {
        return Target::Local;
    };
    let module = match first {
        "crate" | "self" | "super" => segments
            .iter()
            .map(String::as_str)
            .find(|segment| !matches!(*segment, "crate" | "self" | "super")),
        CRATE_NAME => segments.get(1).map(String::as_str),
        _ => {
            return Layer::named(first).map_or(Target::Crate(first), Target::Layer);
        }
    };
    module.and_then(Layer::named).map_or(Target::Local, Target::Layer)
}

fn check_source(source: &LintSource) -> Result<Vec<Violation>, ArchitectureLintError> {
    let parse_error = |message: String| ArchitectureLintError::Parse {
        file: source.file.clone(),
        message,
    };
    let layer = Layer::of_file(&source.file)
        .ok_or_else(|| parse_error("file is not under domain/, inbound/ or outbound/".to_owned()))?;
    let syntax = syn::parse_file(&source.contents).map_err(|err| parse_error(err.to_string()))?;

    let mut paths = PathCollector::default();
    paths.visit_file(&syntax);

    let messages: BTreeSet<String> = paths
        .seen
        .iter()
        .filter_map(|segments| match resolve(segments) {
            Target::Layer(target) if !layer.may_name(target) => Some(format!(
                "{} module must not depend on crate::{}",
                layer.dir(),
                target.dir()
            )),
            Target::Crate(name) if !layer.may_use_crate(name) => Some(format!(
                "{} module must not depend on external crate `{name}`",
                layer.dir()
            )),
            Target::Layer(_) | Target::Crate(_) | Target::Local => None,
        })
        .collect();

    Ok(messages
        .into_iter()
        .map(|message| Violation {
            file: source.file.clone(),
            message,
        })
        .collect())
}

/// Every path mentioned in a file, as identifier segments.
#[derive(Default)]
struct PathCollector {
    seen: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn flatten_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        let leaf = match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.flatten_use(&path.tree, prefix);
                prefix.pop();
                return;
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.flatten_use(item, prefix);
                }
                return;
            }
            syn::UseTree::Name(name) => name.ident.to_string(),
            syn::UseTree::Rename(rename) => rename.ident.to_string(),
            syn::UseTree::Glob(_) => "*".to_owned(),
        };
        let mut segments = prefix.clone();
        segments.push(leaf);
        self.seen.insert(segments);
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        if !node.segments.is_empty() {
            self.seen
                .insert(node.segments.iter().map(|s| s.ident.to_string()).collect());
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.flatten_use(&node.tree, &mut Vec::new());
    }
}

fn read_layer_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut pending: Vec<PathBuf> = Layer::ALL
        .iter()
        .map(|layer| src_dir.join(layer.dir()))
        .filter(|dir| dir.is_dir())
        .collect();
    let mut sources = Vec::new();

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let file = path
                    .strip_prefix(src_dir)
                    .map_err(|err| ArchitectureLintError::Parse {
                        file: path.clone(),
                        message: err.to_string(),
                    })?
                    .to_path_buf();
                let contents = fs::read_to_string(&path)?;
                sources.push(LintSource { file, contents });
            }
        }
    }

    sources.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(sources)
}
