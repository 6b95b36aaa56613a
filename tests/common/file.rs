use assert_fs::TempDir;
use derive_new::new;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn workdir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: &FileSpec) {
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

/// Writes `files_count` text files with random lorem contents into `dir`.
/// Names are numbered so their order is predictable.
pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    (0..files_count)
        .map(|i| {
            let file_name = format!("{i}_{}.txt", Word().fake::<String>());
            let file_content = Words(5..10).fake::<Vec<String>>().join(" ");

            let file_spec = FileSpec::new(dir.join(file_name), file_content);
            write_file(&file_spec);

            file_spec
        })
        .collect()
}

/// Writes a file of the same name as `spec` into `dest` with different contents.
pub fn write_conflicting_copy(spec: &FileSpec, dest: &Path) -> FileSpec {
    let name = spec.path.file_name().expect("generated files have names");
    let copy = FileSpec::new(dest.join(name), format!("{}\nchanged", spec.content));
    write_file(&copy);
    copy
}

/// Minimal PNG header: signature plus an IHDR chunk.
pub fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    data
}
