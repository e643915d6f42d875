//! Definição de tipos/structs de telemetria.
//!
//! Tudo que trafega entre o agente e a API remota passa por aqui: leituras
//! locais, medições carimbadas com timestamp UTC e o registro do node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ──────────────────────────────────────────────
// Unidade de medida
// ──────────────────────────────────────────────

/// Unidade de medida de um sensor, inferida pelo nome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Temperatura (°C)
    Celsius,
    /// Nível de bateria (%)
    Percent,
    /// Luminância (lm)
    Lumen,
    /// Aceleração (G)
    GForce,
    /// Nenhum padrão casou com o nome
    None,
}

impl Unit {
    /// Infere a unidade por substring do nome do sensor.
    ///
    /// Precedência fixa: temperature → battery → luminance → position.
    /// Nomes sem padrão recebem a unidade explícita `none`.
    pub fn infer(name: &str) -> Unit {
        if name.contains("temperature") {
            Unit::Celsius
        } else if name.contains("battery") {
            Unit::Percent
        } else if name.contains("luminance") {
            Unit::Lumen
        } else if name.contains("position") {
            Unit::GForce
        } else {
            Unit::None
        }
    }

    /// Rótulo enviado à API no registro do sensor.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Celsius => "C",
            Unit::Percent => "%",
            Unit::Lumen => "lm",
            Unit::GForce => "G",
            Unit::None => "none",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ──────────────────────────────────────────────
// Leitura local
// ──────────────────────────────────────────────

/// Uma leitura produzida a cada ciclo a partir do arquivo de sensores.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Nome do sensor (lado esquerdo da linha `nome=valor`)
    pub name: String,
    /// Valor arredondado para 2 casas decimais
    pub value: f64,
    /// Unidade inferida do nome
    pub unit: Unit,
}

// ──────────────────────────────────────────────
// Coordenadas
// ──────────────────────────────────────────────

/// Coordenadas fixas carimbadas em cada medição.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

// ──────────────────────────────────────────────
// Medição enviada à API
// ──────────────────────────────────────────────

/// Medição individual enviada em lote unitário à API.
///
/// Efêmera: construída no momento do upload e descartada em seguida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub latitude: f64,
    pub longitude: f64,
    /// Momento do upload em UTC (RFC 3339)
    pub ts: DateTime<Utc>,
    pub value: f64,
}

// ──────────────────────────────────────────────
// Node remoto
// ──────────────────────────────────────────────

/// Registro do node mantido pela API, buscado a cada ciclo pelo id de hardware.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: i64,
    pub name: String,
    /// Campos livres definidos no servidor (ex.: estado dos LEDs)
    #[serde(default)]
    pub extra_fields: Vec<HashMap<String, serde_json::Value>>,
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
