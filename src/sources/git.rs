//! Prior-revision retrieval through the `git` command line.

use super::RevisionSpec;
use crate::error::{DeckDiffError, Result, SourceErrorKind};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

/// Contents of a file at some earlier revision, held in a temp file.
///
/// The temp file is removed when this value is dropped.
#[derive(Debug)]
pub struct RetrievedRevision {
    file: NamedTempFile,
    label: String,
}

impl RetrievedRevision {
    /// Path of the temp file; keeps the original extension.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Human readable `name@rev` label for reports.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Fetch `path` as of `spec` into a temp file.
pub fn retrieve_revision(path: &Path, spec: &RevisionSpec) -> Result<RetrievedRevision> {
    spec.check()?;
    let absolute = path
        .canonicalize()
        .map_err(|e| DeckDiffError::io(path, e))?;
    let dir = absolute.parent().unwrap_or(Path::new("."));
    let root = repository_root(dir)?;
    let relative = relative_git_path(&root, &absolute)?;

    let rev = match spec {
        RevisionSpec::Commit(rev) => rev.clone(),
        RevisionSpec::PullRequest { number, remote } => {
            let refspec = format!("pull/{number}/head");
            tracing::info!("Fetching {refspec} from {remote}");
            git(&root, &["fetch", "--quiet", remote, &refspec])?;
            "FETCH_HEAD".to_string()
        }
    };

    let object = format!("{rev}:{relative}");
    let bytes = git(&root, &["show", &object]).map_err(|e| match e {
        DeckDiffError::Source {
            source: SourceErrorKind::GitFailed { stderr, .. },
            ..
        } if is_missing_path(&stderr) => DeckDiffError::revision(
            format!("reading {}", path.display()),
            SourceErrorKind::MissingAtRevision {
                rev: spec.to_string(),
                path: relative.clone(),
            },
        ),
        other => other,
    })?;

    let suffix = absolute
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let mut file = tempfile::Builder::new()
        .prefix("deck-diff-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(&bytes)?;
    file.flush()?;

    let name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::debug!("retrieved {} bytes of {relative} at {spec}", bytes.len());
    Ok(RetrievedRevision {
        file,
        label: format!("{name}@{spec}"),
    })
}

/// Top-level directory of the work tree containing `dir`.
pub fn repository_root(dir: &Path) -> Result<PathBuf> {
    let out = git(dir, &["rev-parse", "--show-toplevel"]).map_err(|_| {
        DeckDiffError::revision(
            "locating repository",
            SourceErrorKind::NotARepository(dir.display().to_string()),
        )
    })?;
    let root = String::from_utf8_lossy(&out).trim().to_string();
    PathBuf::from(root)
        .canonicalize()
        .map_err(|e| DeckDiffError::io(dir, e))
}

/// `path` relative to `root`, with `/` separators as git expects.
fn relative_git_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        DeckDiffError::validation(format!(
            "{} is outside repository {}",
            path.display(),
            root.display()
        ))
    })?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn is_missing_path(stderr: &str) -> bool {
    stderr.contains("does not exist") || stderr.contains("exists on disk, but not in")
}

/// Run git in `dir` and return stdout.
fn git(dir: &Path, args: &[&str]) -> Result<Vec<u8>> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|e| DeckDiffError::io("git", e))?;
    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(DeckDiffError::revision(
            format!("in {}", dir.display()),
            SourceErrorKind::GitFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::command_exists;
    use std::fs;

    fn git_ok(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    #[test]
    fn test_relative_git_path() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_git_path(root, Path::new("/repo/decks/q3.pptx")).unwrap(),
            "decks/q3.pptx"
        );
        assert!(relative_git_path(root, Path::new("/elsewhere/q3.pptx")).is_err());
    }

    #[test]
    fn test_missing_path_messages() {
        assert!(is_missing_path("fatal: path 'a.pptx' does not exist in 'HEAD'"));
        assert!(is_missing_path("fatal: path 'a.pptx' exists on disk, but not in 'HEAD'"));
        assert!(!is_missing_path("fatal: bad revision"));
    }

    #[test]
    fn test_retrieves_committed_content() {
        if !command_exists("git") {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path();
        git_ok(repo, &["init", "--quiet"]);
        let file = repo.join("deck.manifest");
        fs::write(&file, "old\n").unwrap();
        git_ok(repo, &["add", "deck.manifest"]);
        git_ok(repo, &["commit", "--quiet", "-m", "first"]);
        fs::write(&file, "new\n").unwrap();

        let retrieved = retrieve_revision(&file, &RevisionSpec::head()).unwrap();
        assert_eq!(fs::read_to_string(retrieved.path()).unwrap(), "old\n");
        assert_eq!(retrieved.path().extension().unwrap(), "manifest");
        assert_eq!(retrieved.label(), "deck.manifest@HEAD");
    }

    #[test]
    fn test_untracked_file_is_missing_at_revision() {
        if !command_exists("git") {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path();
        git_ok(repo, &["init", "--quiet"]);
        fs::write(repo.join("a.txt"), "a").unwrap();
        git_ok(repo, &["add", "a.txt"]);
        git_ok(repo, &["commit", "--quiet", "-m", "first"]);
        let file = repo.join("b.txt");
        fs::write(&file, "b").unwrap();

        let err = retrieve_revision(&file, &RevisionSpec::head()).unwrap_err();
        assert!(matches!(
            err,
            DeckDiffError::Source {
                source: SourceErrorKind::MissingAtRevision { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_option_like_revision_never_reaches_git() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("deck.pdf");
        fs::write(&file, "x").unwrap();
        let err = retrieve_revision(&file, &RevisionSpec::Commit("--output=/tmp/x".into())).unwrap_err();
        assert!(matches!(err, DeckDiffError::Validation(_)));
    }

    #[test]
    fn test_outside_repository() {
        if !command_exists("git") {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("deck.pdf");
        fs::write(&file, "x").unwrap();
        // A temp dir may itself sit inside a work tree on some machines
        if repository_root(dir.path()).is_ok() {
            return;
        }
        let err = retrieve_revision(&file, &RevisionSpec::head()).unwrap_err();
        assert!(matches!(
            err,
            DeckDiffError::Source {
                source: SourceErrorKind::NotARepository(_),
                ..
            }
        ));
    }
}
