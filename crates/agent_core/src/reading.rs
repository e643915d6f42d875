//! Leitura do arquivo de sensores.
//!
//! O arquivo é texto plano `nome=valor`, uma leitura por linha. O parser é
//! tolerante por linha: linhas malformadas são puladas com aviso, mas a
//! falha de abertura do arquivo é sinalizada de forma tipada para o chamador
//! decidir (o loop principal trata como "sem leituras neste ciclo").

use crate::types::{SensorReading, Unit};
use std::path::Path;
use tracing::warn;

/// Falhas ao abrir o arquivo de sensores.
#[derive(Debug, thiserror::Error)]
pub enum SensorFileError {
    #[error("arquivo de sensores não encontrado: {0}")]
    NotFound(String),

    #[error("falha ao ler arquivo de sensores {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Lê o arquivo de sensores e produz as leituras do ciclo.
pub fn read_sensors(path: &Path) -> Result<Vec<SensorReading>, SensorFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SensorFileError::NotFound(path.display().to_string())
        } else {
            SensorFileError::Io {
                path: path.display().to_string(),
                source,
            }
        }
    })?;

    Ok(parse_sensors(&content))
}

/// Converte o conteúdo `nome=valor` em leituras.
///
/// Valores são arredondados para 2 casas decimais e a unidade é inferida do
/// nome. Linhas vazias ou malformadas são puladas.
pub fn parse_sensors(content: &str) -> Vec<SensorReading> {
    let mut readings = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((name, raw_value)) = line.split_once('=') else {
            warn!("Linha de sensor sem '=' ignorada: {line}");
            continue;
        };

        let name = name.trim();
        let value: f64 = match raw_value.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("Valor inválido para {name}: {}", raw_value.trim());
                continue;
            }
        };

        readings.push(SensorReading {
            name: name.to_string(),
            value: round2(value),
            unit: Unit::infer(name),
        });
    }

    readings
}

/// Arredonda para 2 casas decimais.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(42.567), 42.57);
        assert_eq!(round2(42.564), 42.56);
        assert_eq!(round2(-1.005), -1.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn parse_well_formed_lines() {
        let readings = parse_sensors("temperature_cpu=42.567\nbattery = 87.1\n");
        assert_eq!(readings.len(), 2);
        assert_eq!(
            readings[0],
            SensorReading {
                name: "temperature_cpu".into(),
                value: 42.57,
                unit: Unit::Celsius,
            }
        );
        assert_eq!(readings[1].name, "battery");
        assert_eq!(readings[1].value, 87.1);
        assert_eq!(readings[1].unit, Unit::Percent);
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let readings = parse_sensors("temperature=20\nsem-igual\nluminance=abc\n\nposition_x=0.98\n");
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].name, "temperature");
        assert_eq!(readings[1].name, "position_x");
        assert_eq!(readings[1].unit, Unit::GForce);
    }

    #[test]
    fn parse_unmatched_name_gets_none_unit() {
        let readings = parse_sensors("humidity=55.5\n");
        assert_eq!(readings[0].unit, Unit::None);
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let err = read_sensors(Path::new("/caminho/inexistente/sensors")).unwrap_err();
        assert!(matches!(err, SensorFileError::NotFound(_)));
    }

    #[test]
    fn read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"temperature_cpu=42.567\n").unwrap();

        let readings = read_sensors(file.path()).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].value, 42.57);
        assert_eq!(readings[0].unit, Unit::Celsius);
    }
}
