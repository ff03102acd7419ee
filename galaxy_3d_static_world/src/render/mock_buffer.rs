/// Mock visibility buffer for unit tests (no GPU)

use std::sync::Mutex;
use crate::error::{Error, Result};
use super::buffer::{BufferUsage, VisibilityBuffer};

/// Records every upload it receives
pub struct MockVisibilityBuffer {
    uploads: Mutex<Vec<(Vec<u8>, BufferUsage)>>,
    fail_uploads: bool,
}

impl MockVisibilityBuffer {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail_uploads: false,
        }
    }

    /// A buffer whose every upload fails with `BackendError`
    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail_uploads: true,
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// Contents and usage of the most recent upload
    pub fn last_upload(&self) -> Option<(Vec<u8>, BufferUsage)> {
        self.uploads.lock().unwrap().last().cloned()
    }
}

impl VisibilityBuffer for MockVisibilityBuffer {
    fn replace_contents(&self, data: &[u8], usage: BufferUsage) -> Result<()> {
        if self.fail_uploads {
            return Err(Error::BackendError("mock upload failure".to_string()));
        }
        self.uploads.lock().unwrap().push((data.to_vec(), usage));
        Ok(())
    }
}
