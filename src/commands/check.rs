use crate::areas::conflicts::Conflicts;
use crate::domain::prompt::Prompt;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

impl<P: Prompt> Conflicts<P> {
    /// Checks `paths` against the destination, prints every accepted file
    /// to `out` and, with `write`, copies the accepted files into place.
    pub async fn check(
        &mut self,
        paths: &[PathBuf],
        write: bool,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let expanded = expand_paths(&self.options().cwd, paths)?;
        let dest = self.options().destination()?.clone();

        let accepted = self.files(&expanded).await?;

        for mut file in accepted {
            writeln!(out, "{}", file.relative())?;

            if write {
                let target = self.existing_for(&dest, &file)?;
                let target = target
                    .path()
                    .map(Path::to_path_buf)
                    .with_context(|| format!("no target path for {}", file.relative()))?;
                file.write_to(&target)?;
            }
        }

        Ok(())
    }
}

/// Replaces every directory with the files below it, in file name order.
fn expand_paths(cwd: &Path, paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut expanded = Vec::new();

    for path in paths {
        let absolute = cwd.join(path);
        if !absolute.is_dir() {
            expanded.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(&absolute).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk {}", absolute.display()))?;
            if entry.file_type().is_file() {
                expanded.push(entry.into_path());
            }
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn directories_expand_to_their_files() -> anyhow::Result<()> {
        let workdir = TempDir::new()?;
        workdir.child("src/b.txt").write_str("b")?;
        workdir.child("src/a.txt").write_str("a")?;
        workdir.child("src/nested/c.txt").write_str("c")?;
        workdir.child("top.txt").write_str("t")?;

        let expanded = expand_paths(
            workdir.path(),
            &[PathBuf::from("top.txt"), PathBuf::from("src")],
        )?;

        let src = workdir.path().join("src");
        assert_eq!(
            expanded,
            vec![
                PathBuf::from("top.txt"),
                src.join("a.txt"),
                src.join("b.txt"),
                src.join("nested").join("c.txt"),
            ]
        );

        Ok(())
    }
}
