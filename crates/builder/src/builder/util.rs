//! Process and filesystem helpers shared by the build steps.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// An external command exited non-zero. Carries the child's exit code so
/// `main` can propagate it as the process exit code.
#[derive(Debug, Error)]
#[error("{program} exited with code {code}")]
pub struct CommandFailed {
    pub program: String,
    pub code: i32,
}

/// Exit code for a top-level error: the child's code for a failed external
/// command, 1 for everything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CommandFailed>().map_or(1, |failed| failed.code)
}

/// Run an external command, echoing it first. Blocks until it exits;
/// non-zero exit becomes a [`CommandFailed`] error.
pub fn run<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<()> {
    echo(program, args);
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run {program}"))?;

    if !status.success() {
        return Err(CommandFailed {
            program: program.to_string(),
            code: status.code().unwrap_or(1),
        }
        .into());
    }
    Ok(())
}

/// Run an external command and capture its trimmed stdout.
pub fn run_capture<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run {program}"))?;

    if !output.status.success() {
        return Err(CommandFailed {
            program: program.to_string(),
            code: output.status.code().unwrap_or(1),
        }
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn echo<S: AsRef<OsStr>>(program: &str, args: &[S]) {
    let rendered: Vec<String> = args
        .iter()
        .map(|arg| arg.as_ref().to_string_lossy().into_owned())
        .collect();
    println!("{} {}", program, rendered.join(" "));
}

/// Change into a directory, restoring the previous working directory on
/// drop. Build steps run external tools relative to the directory they
/// enter; the guard keeps the process cwd consistent on every exit path.
pub struct ScopedDir {
    previous: PathBuf,
}

impl ScopedDir {
    pub fn enter(path: &Path) -> Result<Self> {
        let previous = std::env::current_dir().context("Reading current directory")?;
        std::env::set_current_dir(path)
            .with_context(|| format!("Entering {}", path.display()))?;
        println!("cd {}", path.display());
        Ok(Self { previous })
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

/// Create a directory and its parents. Already existing is fine; any other
/// filesystem error propagates.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("Creating directory {}", path.display()))
}

/// Copy a single file, echoing the operation.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    println!("  cp {} {}", src.display(), dst.display());
    std::fs::copy(src, dst)
        .with_context(|| format!("Copying {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Copy every file matching `pattern` into `dest_dir`. Returns the number
/// of files copied.
pub fn glob_copy(pattern: &str, dest_dir: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in glob::glob(pattern).with_context(|| format!("Bad glob pattern: {pattern}"))? {
        let path = entry.context("Reading glob entry")?;
        let name = path
            .file_name()
            .with_context(|| format!("Invalid path: {}", path.display()))?;
        copy_file(&path, &dest_dir.join(name))?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");

        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_command_failed_exit_code_survives_downcast() {
        let err: anyhow::Error = CommandFailed {
            program: "cmake".to_string(),
            code: 7,
        }
        .into();
        assert_eq!(exit_code(&err), 7);

        let other = anyhow::anyhow!("not a command failure");
        assert_eq!(exit_code(&other), 1);
    }

    #[test]
    fn test_scoped_dir_restores_previous_cwd() {
        let tmp = TempDir::new().unwrap();
        let before = std::env::current_dir().unwrap();

        {
            let _guard = ScopedDir::enter(tmp.path()).unwrap();
            let inside = std::env::current_dir().unwrap();
            assert_eq!(inside, tmp.path().canonicalize().unwrap());
        }

        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_copy_file_preserves_contents() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("dst.txt");
        std::fs::write(&src, "payload").unwrap();

        copy_file(&src, &dst).unwrap();
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "payload");
    }

    #[test]
    fn test_copy_file_missing_source_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("absent.txt");
        let dst = tmp.path().join("dst.txt");

        assert!(copy_file(&src, &dst).is_err());
    }

    #[test]
    fn test_glob_copy_matches_only_pattern() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("data");
        let dest = tmp.path().join("dest");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::create_dir_all(&dest).unwrap();

        std::fs::write(data.join("housing.txt.train"), "a").unwrap();
        std::fs::write(data.join("housing.txt.test"), "b").unwrap();
        std::fs::write(data.join("unrelated.csv"), "c").unwrap();

        let pattern = data.join("housing.txt.t*");
        let copied = glob_copy(pattern.to_string_lossy().as_ref(), &dest).unwrap();

        assert_eq!(copied, 2);
        assert!(dest.join("housing.txt.train").is_file());
        assert!(dest.join("housing.txt.test").is_file());
        assert!(!dest.join("unrelated.csv").exists());
    }
}
