//! Cliente HTTP da API de telemetria remota.
//!
//! Todas as operações são bloqueantes e carregam a credencial no header
//! `X-Api-Key`. O contrato com o servidor:
//!
//! ```text
//! GET  /api/v1/status                                      → liveness
//! GET  /api/v1/nodes/hardware/{hw_id}                      → registro do node
//! GET  /api/v1/nodes/{node}/sensors/{type}/{name}/id       → id do sensor (404 = ausente)
//! POST /api/v1/nodes/{node_id}/sensors                     → registra sensor
//! POST /api/v1/nodes/{node_id}/sensors/{id}/measurements   → lote de medições
//! ```

use agent_core::{Measurement, NodeRecord, Unit};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Timeout por requisição.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Erros do cliente da API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("resposta inesperada do servidor: HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Cliente bloqueante da API de telemetria.
pub struct ApiClient {
    base: String,
    key: String,
    http: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct SensorIdResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct NewSensor<'a> {
    sensor_type: &'a str,
    name: &'a str,
    unit: &'a str,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base: normalize_base(base_url),
            key: api_key.to_string(),
            http,
        })
    }

    fn get(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.http
            .get(format!("{}{path}", self.base))
            .header("X-Api-Key", &self.key)
    }

    fn post(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.http
            .post(format!("{}{path}", self.base))
            .header("X-Api-Key", &self.key)
    }

    /// Checagem de liveness. Qualquer falha conta como offline.
    pub fn server_online(&self) -> bool {
        match self.get("/api/v1/status").send() {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Liveness falhou: {e}");
                false
            }
        }
    }

    /// Busca o registro do node pelo identificador de hardware.
    pub fn node_by_hardware_id(&self, hardware_id: &str) -> Result<NodeRecord, ApiError> {
        let resp = self
            .get(&format!("/api/v1/nodes/hardware/{hardware_id}"))
            .send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json()?)
    }

    /// Busca o id do sensor. `None` quando o sensor ainda não existe.
    pub fn sensor_id(
        &self,
        node: &str,
        sensor_type: &str,
        name: &str,
    ) -> Result<Option<String>, ApiError> {
        let resp = self
            .get(&format!("/api/v1/nodes/{node}/sensors/{sensor_type}/{name}/id"))
            .send()?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }

        let body: SensorIdResponse = resp.json()?;
        Ok(Some(body.id))
    }

    /// Registra um sensor novo no node.
    pub fn create_sensor(
        &self,
        node_id: i64,
        sensor_type: &str,
        name: &str,
        unit: Unit,
    ) -> Result<(), ApiError> {
        let resp = self
            .post(&format!("/api/v1/nodes/{node_id}/sensors"))
            .json(&NewSensor {
                sensor_type,
                name,
                unit: unit.as_str(),
            })
            .send()?;

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }

    /// Envia um lote de medições de um sensor.
    pub fn upload_measurements(
        &self,
        batch: &[Measurement],
        node_id: i64,
        sensor_id: &str,
    ) -> Result<(), ApiError> {
        let resp = self
            .post(&format!(
                "/api/v1/nodes/{node_id}/sensors/{sensor_id}/measurements"
            ))
            .json(batch)
            .send()?;

        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }
}

/// Remove barras finais da URL base para concatenação previsível.
fn normalize_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_strips_trailing_slash() {
        assert_eq!(normalize_base("http://host/"), "http://host");
        assert_eq!(normalize_base("http://host"), "http://host");
        assert_eq!(normalize_base("http://host//"), "http://host");
    }

    #[test]
    fn new_sensor_body_shape() {
        let body = serde_json::to_value(NewSensor {
            sensor_type: "ebottle",
            name: "temperature_cpu",
            unit: "C",
        })
        .unwrap();
        assert_eq!(body["sensor_type"], "ebottle");
        assert_eq!(body["name"], "temperature_cpu");
        assert_eq!(body["unit"], "C");
    }

    #[test]
    fn sensor_id_response_decodes() {
        let body: SensorIdResponse = serde_json::from_str(r#"{"id": "s-42"}"#).unwrap();
        assert_eq!(body.id, "s-42");
    }

    // Porta 1 é reservada; a conexão é recusada imediatamente.
    #[test]
    fn unreachable_server_is_offline() {
        let api = ApiClient::new("http://127.0.0.1:1", "k").unwrap();
        assert!(!api.server_online());
    }

    #[test]
    fn unreachable_server_is_transport_error() {
        let api = ApiClient::new("http://127.0.0.1:1", "k").unwrap();
        assert!(matches!(
            api.node_by_hardware_id("abcd"),
            Err(ApiError::Transport(_))
        ));
    }
}
