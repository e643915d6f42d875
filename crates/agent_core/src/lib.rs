//! # Agent Core
//!
//! Crate compartilhada que define os tipos de telemetria, a configuração
//! `chave=valor` e o parser do arquivo de sensores do Sensor Agent.
//!
//! ## Módulos
//! - [`types`] – Structs de telemetria (leituras, medições, node remoto)
//! - [`config`] – Configuração tipada do agente
//! - [`reading`] – Parser do arquivo de sensores e inferência de unidade

pub mod config;
pub mod reading;
pub mod types;

// Re-exports convenientes
pub use config::{AgentConfig, ConfigError};
pub use reading::{read_sensors, SensorFileError};
pub use types::{Location, Measurement, NodeRecord, SensorReading, Unit};
