use std::io::ErrorKind;

use crate::error::{ClientError, Result};

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>>;
    fn set_config_content(&self, content: &str) -> Result<()>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ClientError::ConfigRead(err)),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<()> {
        std::fs::write(self.file_path.as_str(), content).map_err(ClientError::ConfigWrite)
    }
}
