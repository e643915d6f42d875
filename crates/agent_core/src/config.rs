//! Configuração tipada do agente.
//!
//! O arquivo de configuração é texto plano `chave=valor`, uma chave por
//! linha. Linhas vazias e linhas iniciadas com `#` são ignoradas. O resultado
//! é uma struct explícita construída no startup e passada por referência —
//! sem estado global.

use crate::types::Location;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Valor da chave `id` que seleciona o serial de hardware como identidade.
pub const HARDWARE_SERIAL_MODE: &str = "rpi-serial";

/// Erros fatais de configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("falha ao ler {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("chave obrigatória ausente: {0}")]
    MissingKey(&'static str),

    #[error("valor numérico inválido para {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Configuração do agente, imutável após o startup.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// URL base da API de telemetria
    pub api: String,
    /// Credencial enviada em toda requisição
    pub key: String,
    /// Modo de identidade (`rpi-serial` ou identidade da máquina)
    pub id: String,
    /// Caminho do arquivo de sensores
    pub sensors_path: PathBuf,
    /// Intervalo entre ciclos (segundos)
    pub interval_secs: f64,
    /// Rótulo do tipo de sensor no servidor
    pub sensor_type: String,
    /// Coordenadas fixas carimbadas em cada medição
    pub location: Location,
    /// Caminho do arquivo de estado dos LEDs
    pub leds_path: PathBuf,
}

impl AgentConfig {
    /// Carrega a configuração de um arquivo `chave=valor`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::parse(&content)?;
        info!("Configuração carregada de {}", path.display());
        Ok(config)
    }

    /// Interpreta o conteúdo `chave=valor` já lido.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut pairs: HashMap<String, String> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((name, value)) = line.split_once('=') {
                pairs.insert(name.trim().to_string(), value.trim().to_string());
            }
        }

        let required = |key: &'static str| -> Result<String, ConfigError> {
            pairs.get(key).cloned().ok_or(ConfigError::MissingKey(key))
        };
        let number = |key: &'static str, default: f64| -> Result<f64, ConfigError> {
            match pairs.get(key) {
                Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidNumber {
                    key,
                    value: raw.clone(),
                }),
                None => Ok(default),
            }
        };
        let path_or = |key: &str, default: &str| -> PathBuf {
            pairs.get(key).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(default))
        };

        Ok(Self {
            api: required("api")?,
            key: required("key")?,
            id: required("id")?,
            sensors_path: path_or("sensors", "sensors"),
            interval_secs: number("interval_secs", 10.0)?,
            sensor_type: pairs
                .get("sensor_type")
                .cloned()
                .unwrap_or_else(|| "ebottle".into()),
            location: Location {
                latitude: number("latitude", 46.042767)?,
                longitude: number("longitude", 14.487632)?,
            },
            leds_path: path_or("leds", "/tmp/ebottle/leds"),
        })
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.api.is_empty() {
            errors.push("URL da API não pode ser vazia".into());
        } else if !self.api.starts_with("http://") && !self.api.starts_with("https://") {
            errors.push(format!("URL da API inválida: {}", self.api));
        }
        if self.key.is_empty() {
            errors.push("Credencial da API não pode ser vazia".into());
        }
        if self.interval_secs < 1.0 || self.interval_secs > 3600.0 {
            errors.push(format!(
                "Intervalo inválido: {} (1–3600s)",
                self.interval_secs
            ));
        }

        errors
    }
}
