//! Orquestrador de upload.
//!
//! Para cada leitura: resolve o id do sensor remoto (criando-o uma única vez
//! se ausente), constrói a medição com timestamp UTC e envia o lote unitário.
//! Nenhum id é cacheado entre leituras ou ciclos — o servidor é a fonte da
//! verdade do registro.

use crate::api::{ApiClient, ApiError};
use agent_core::{Location, Measurement, NodeRecord, SensorReading};
use chrono::Utc;
use tracing::{debug, error};

/// Resultado de um ciclo de upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: usize,
    pub failed: usize,
}

/// Falhas no envio de uma leitura.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("sensor ausente no servidor mesmo após criação")]
    SensorMissing,
}

/// Envia cada leitura para a API. Falhas são isoladas por leitura: a leitura
/// falha é registrada no log e as demais seguem normalmente.
pub fn upload_readings(
    api: &ApiClient,
    node: &NodeRecord,
    sensor_type: &str,
    readings: &[SensorReading],
    location: Location,
) -> UploadReport {
    let mut report = UploadReport::default();

    for reading in readings {
        match upload_one(api, node, sensor_type, reading, location) {
            Ok(()) => {
                report.uploaded += 1;
                debug!("{} = {} {} enviado", reading.name, reading.value, reading.unit);
            }
            Err(e) => {
                report.failed += 1;
                error!("Falha ao enviar {}: {e}", reading.name);
            }
        }
    }

    report
}

fn upload_one(
    api: &ApiClient,
    node: &NodeRecord,
    sensor_type: &str,
    reading: &SensorReading,
    location: Location,
) -> Result<(), UploadError> {
    // Exatamente um create+relookup quando o sensor ainda não existe
    let sensor_id = match api.sensor_id(&node.name, sensor_type, &reading.name)? {
        Some(id) => id,
        None => {
            api.create_sensor(node.id, sensor_type, &reading.name, reading.unit)?;
            api.sensor_id(&node.name, sensor_type, &reading.name)?
                .ok_or(UploadError::SensorMissing)?
        }
    };

    let measurement = build_measurement(reading.value, location);
    api.upload_measurements(&[measurement], node.id, &sensor_id)?;
    Ok(())
}

/// Constrói a medição carimbada com o momento do upload em UTC.
fn build_measurement(value: f64, location: Location) -> Measurement {
    Measurement {
        latitude: location.latitude,
        longitude: location.longitude,
        ts: Utc::now(),
        value,
    }
}
