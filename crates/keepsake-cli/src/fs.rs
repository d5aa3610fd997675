//! Token files: exclusive creation with owner-only permissions.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::errors::CliError;

/// Write `token` to a new file at `destination`.
///
/// The file is created exclusively, so an existing file at that path (or one
/// that appears concurrently) is never replaced. On Unix it is created with
/// mode 0600. A failed write removes the file it created.
pub fn write_token_file(destination: &Path, token: &str) -> anyhow::Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create token directory {}: {}",
                    parent.display(),
                    e
                )
            })?;
        }
    }

    let mut file = create_owner_only(destination).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            anyhow::anyhow!("Token file already exists: {}", destination.display())
        } else {
            anyhow::anyhow!(
                "Failed to create token file {}: {}",
                destination.display(),
                e
            )
        }
    })?;

    let written = file
        .write_all(format!("{}\n", token).as_bytes())
        .and_then(|_| file.sync_all());
    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(destination);
        return Err(anyhow::anyhow!(
            "Failed to write token file {}: {}",
            destination.display(),
            e
        ));
    }
    Ok(())
}

/// Read a token file written by [`write_token_file`] (or any text file).
pub fn read_token_file(path: &Path) -> anyhow::Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents.trim().to_string()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(CliError::not_found(
            format!("Token file not found: {}", path.display()),
            "Hint: Pass the token directly, or check the --input path.",
        )
        .into()),
        Err(err) => Err(anyhow::anyhow!(
            "Failed to read token {}: {}",
            path.display(),
            err
        )),
    }
}

fn create_owner_only(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_token() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("nested").join("secret.token");

        write_token_file(&dest, "abc-_=").unwrap();

        assert!(dest.exists());
        assert_eq!(read_token_file(&dest).unwrap(), "abc-_=");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("secret.token");
        fs::write(&dest, "old").unwrap();

        let err = write_token_file(&dest, "new").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
    }

    #[test]
    fn test_neighbouring_tmp_file_is_untouched() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("secret.token");
        let sibling = dir.path().join("secret.token.tmp");
        fs::write(&sibling, "user data").unwrap();

        write_token_file(&dest, "tok").unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "user data");
        assert_eq!(read_token_file(&dest).unwrap(), "tok");
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let dest = dir.path().join("secret.token");
        write_token_file(&dest, "token").unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_missing_token_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = read_token_file(&dir.path().join("missing.token")).unwrap_err();

        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(cli_err, CliError::NotFound { .. }));
    }
}
