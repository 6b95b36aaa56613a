//! The conflict engine
//!
//! - `conflicts`: the engine itself and the per-pair decision procedure
//! - `actions`: what each action does to the session, plus its status line
//! - `batch`: running the engine over a list or a stream of proposed files

pub mod actions;
pub mod batch;
pub mod conflicts;

#[cfg(test)]
pub(crate) mod test_support {
    use assert_fs::TempDir;
    use rstest::fixture;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[fixture]
    pub fn workdir() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    /// Status sink the test keeps a handle to after the engine takes its box.
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("buffer lock poisoned")).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("buffer lock poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
