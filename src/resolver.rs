//! Import resolution for Solidity sources
//!
//! The compiler's standard-JSON interface expects every source unit up
//! front, so the full import closure of the entry source is collected
//! before invocation. Import paths are looked up against an ordered list
//! of base directories; a path that resolves nowhere is recorded as a
//! [`ResolutionError`] and handed back to the compiler adapter as a
//! diagnostic rather than raised as a fault.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{constants::NODE_MODULES_DIR, errors::ScriptError};

/// A failed import lookup, surfaced to the compiler as a per-import
/// error diagnostic
#[derive(Debug, Clone)]
pub struct ResolutionError {
    /// The import path that could not be resolved
    pub import_path: String,
}

/// The import closure of an entry source
#[derive(Debug)]
pub struct ResolvedSources {
    /// Source contents keyed by their virtual path, as the compiler
    /// will see them
    pub sources: BTreeMap<String, String>,
    /// Imports that resolved nowhere
    pub failures: Vec<ResolutionError>,
}

/// Resolve an import path to file content, trying each search root in order
pub fn resolve(import_path: &str, search_roots: &[PathBuf]) -> Result<String, ResolutionError> {
    for root in search_roots {
        if let Ok(content) = fs::read_to_string(root.join(import_path)) {
            return Ok(content);
        }
    }

    Err(ResolutionError {
        import_path: import_path.to_string(),
    })
}

/// The ordered base directories searched when resolving an import:
/// the entry source's own directory, the project root, then the
/// dependency directory
pub fn search_roots(project_root: &Path, entry_source: &str) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(parent) = Path::new(entry_source).parent() {
        if !parent.as_os_str().is_empty() {
            roots.push(project_root.join(parent));
        }
    }
    roots.push(project_root.to_path_buf());
    roots.push(project_root.join(NODE_MODULES_DIR));
    roots
}

/// Read the entry source and collect its transitive import closure
///
/// An unreadable entry source is a fatal error; unresolvable imports are
/// returned as [`ResolutionError`]s so the compile stage can report them
/// alongside the compiler's own diagnostics.
pub fn collect_sources(project_root: &Path, entry_source: &str) -> Result<ResolvedSources, ScriptError> {
    let entry_disk_path = project_root.join(entry_source);
    let entry_content = fs::read_to_string(&entry_disk_path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {e}", entry_disk_path.display())))?;

    let entry_name = Path::new(entry_source)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(entry_source)
        .to_string();

    let roots = search_roots(project_root, entry_source);

    let mut sources = BTreeMap::new();
    let mut failures = Vec::new();
    let mut pending = pending_imports(&entry_name, &entry_content);
    sources.insert(entry_name, entry_content);

    while let Some(virtual_path) = pending.pop() {
        if sources.contains_key(&virtual_path)
            || failures
                .iter()
                .any(|f: &ResolutionError| f.import_path == virtual_path)
        {
            continue;
        }

        match resolve(&virtual_path, &roots) {
            Ok(content) => {
                pending.extend(pending_imports(&virtual_path, &content));
                sources.insert(virtual_path, content);
            }
            Err(failure) => failures.push(failure),
        }
    }

    Ok(ResolvedSources { sources, failures })
}

/// The virtual paths imported by one source unit, with relative imports
/// rebased onto the importing unit's directory
fn pending_imports(importer_virtual_path: &str, content: &str) -> Vec<String> {
    let base = virtual_dir(importer_virtual_path);
    import_paths(content)
        .into_iter()
        .map(|import| {
            if import.starts_with("./") || import.starts_with("../") {
                normalize_virtual_path(&format!("{base}/{import}"))
            } else {
                import
            }
        })
        .collect()
}

/// Extract the import paths named by a Solidity source
///
/// Matches both plain (`import "X";`) and aliased
/// (`import {A} from "X";`) forms; the path is the first quoted string
/// on an `import` line.
pub fn import_paths(source: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for line in source.lines() {
        let line = line.trim_start();
        let Some(rest) = line.strip_prefix("import") else {
            continue;
        };
        // Require a token boundary so identifiers like `imports` don't match
        if !rest.starts_with([' ', '\t', '"', '\'', '{']) {
            continue;
        }
        let Some(open) = rest.find(['"', '\'']) else {
            continue;
        };
        let quote = rest[open..].chars().next().unwrap_or('"');
        let rest = &rest[open + 1..];
        let Some(close) = rest.find(quote) else {
            continue;
        };
        paths.push(rest[..close].to_string());
    }
    paths
}

/// The directory portion of a virtual path, empty for top-level names
fn virtual_dir(virtual_path: &str) -> &str {
    virtual_path
        .rfind('/')
        .map(|idx| &virtual_path[..idx])
        .unwrap_or("")
}

/// Collapse `.` and `..` segments the way the compiler's own import
/// resolution does
fn normalize_virtual_path(virtual_path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in virtual_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
