use serde::{Deserialize, Serialize};

use super::Validate;

pub const CONFIG_FILE: &str = "oxo_config.yaml";
pub const MAX_BOARD_SIZE: usize = 10;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayer {
    Computer,
    Human,
    Random,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct OxoConfig {
    pub board_size: usize,
    pub first_player: FirstPlayer,
    pub noughts_start: bool,
    pub verbose: bool,
    pub opening_shortcut: bool,
}

impl Validate for OxoConfig {
    fn validate(&self) -> Result<(), String> {
        if self.board_size == 0 {
            return Err("board_size must be at least 1".to_string());
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(format!("board_size must not exceed {}", MAX_BOARD_SIZE));
        }
        Ok(())
    }
}

impl Default for OxoConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            first_player: FirstPlayer::Computer,
            noughts_start: false,
            verbose: false,
            opening_shortcut: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConfigContentProvider, ConfigManager, ConfigSerializer, FileContentConfigProvider,
        YamlConfigSerializer,
    };
    use crate::error::{ClientError, Result};
    use std::cell::RefCell;

    struct InMemoryConfigProvider {
        content: RefCell<Option<String>>,
    }

    impl InMemoryConfigProvider {
        fn new(content: Option<&str>) -> Self {
            Self {
                content: RefCell::new(content.map(str::to_string)),
            }
        }
    }

    impl ConfigContentProvider for InMemoryConfigProvider {
        fn get_config_content(&self) -> Result<Option<String>> {
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<()> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_oxo_config_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(OxoConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_board_size_bounds() {
        let config = OxoConfig { board_size: 0, ..OxoConfig::default() };
        assert!(config.validate().is_err());
        let config = OxoConfig { board_size: MAX_BOARD_SIZE + 1, ..OxoConfig::default() };
        assert!(config.validate().is_err());
        let config = OxoConfig { board_size: MAX_BOARD_SIZE, ..OxoConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_survives_yaml() {
        let config = OxoConfig::default();
        let serializer = YamlConfigSerializer::new();
        let yaml = serializer.serialize(&config).unwrap();
        assert!(yaml.contains("first_player: computer"));
        let loaded: OxoConfig = serializer.deserialize(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_manager_saves_and_loads_file() {
        let config = OxoConfig {
            board_size: 4,
            first_player: FirstPlayer::Random,
            ..OxoConfig::default()
        };
        let file_path = get_temp_file_path();
        let manager = ConfigManager::new(
            FileContentConfigProvider::new(file_path.clone()),
            YamlConfigSerializer::new(),
        );

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let fresh: ConfigManager<_, OxoConfig, _> = ConfigManager::from_yaml_file(&file_path);
        assert_eq!(fresh.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_missing_file_returns_default_config() {
        let manager: ConfigManager<_, OxoConfig, _> =
            ConfigManager::from_yaml_file("this_oxo_config_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), OxoConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let content = r#"
board_size: 0
first_player: human
noughts_start: false
verbose: false
opening_shortcut: true
"#;
        let manager: ConfigManager<_, OxoConfig, _> = ConfigManager::new(
            InMemoryConfigProvider::new(Some(content)),
            YamlConfigSerializer::new(),
        );
        assert!(matches!(manager.get_config(), Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_incomplete_config_cant_be_read() {
        let content = "board_size: 3\n";
        let manager: ConfigManager<_, OxoConfig, _> = ConfigManager::new(
            InMemoryConfigProvider::new(Some(content)),
            YamlConfigSerializer::new(),
        );
        assert!(matches!(manager.get_config(), Err(ClientError::ConfigDeserialize(_))));
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let provider = InMemoryConfigProvider::new(None);
        let manager = ConfigManager::new(provider, YamlConfigSerializer::new());
        let config = OxoConfig { board_size: 0, ..OxoConfig::default() };
        assert!(matches!(manager.set_config(&config), Err(ClientError::InvalidConfig(_))));
    }
}
