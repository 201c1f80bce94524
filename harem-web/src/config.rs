//! Configuração do servidor via variáveis de ambiente.

use std::path::PathBuf;

use harem_core::{ConfigError, ProcessorConfig};

/// Configuração do servidor
#[derive(Clone, Debug)]
pub struct WebConfig {
    /// Endereço de escuta (`HAREM_WEB_ADDR`)
    pub addr: String,
    /// JSON com a configuração do processador (`HAREM_CONFIG`)
    pub processor_config: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
            processor_config: None,
        }
    }
}

impl WebConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            addr: std::env::var("HAREM_WEB_ADDR").unwrap_or(default.addr),
            processor_config: std::env::var_os("HAREM_CONFIG")
                .map(PathBuf::from)
                .or(default.processor_config),
        }
    }

    /// Carrega a configuração do processador, ou a padrão se nenhum arquivo foi indicado.
    pub fn load_processor_config(&self) -> Result<ProcessorConfig, ConfigError> {
        match &self.processor_config {
            Some(path) => ProcessorConfig::from_json_file(path),
            None => Ok(ProcessorConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_without_file() {
        let config = WebConfig::default();
        assert_eq!(config.addr, "0.0.0.0:3000");
        assert_eq!(
            config.load_processor_config().unwrap(),
            ProcessorConfig::default()
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let config = WebConfig {
            processor_config: Some(PathBuf::from("/nao/existe/harem.json")),
            ..WebConfig::default()
        };
        assert!(matches!(
            config.load_processor_config(),
            Err(ConfigError::Io(_))
        ));
    }
}
