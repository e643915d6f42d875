//! Resolução da identidade do dispositivo.
//!
//! A identidade é resolvida uma única vez por processo: ou o serial de
//! hardware extraído do pseudo-arquivo de CPU da plataforma, ou a primeira
//! linha do arquivo de identidade da máquina. Falha de qualquer fonte nunca
//! derruba o processo; o sentinela toma o lugar do identificador.

use agent_core::config::HARDWARE_SERIAL_MODE;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Pseudo-arquivo de CPU da plataforma (contém a linha `Serial` no RPi).
const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Arquivo de identidade genérico da máquina.
const MACHINE_ID_PATH: &str = "/etc/machine-id";

/// Sentinela usado quando nenhuma fonte de identidade está acessível.
pub const IDENTITY_ERROR: &str = "ERROR000000000";

/// Faixa fixa de bytes do serial na linha `Serial\t\t: xxxxxxxxxxxxxxxx`.
const SERIAL_RANGE: std::ops::Range<usize> = 10..26;

/// Resolve o identificador estável do dispositivo conforme o modo.
pub fn resolve(mode: &str) -> String {
    let resolved = if mode == HARDWARE_SERIAL_MODE {
        serial_from_cpuinfo(Path::new(CPUINFO_PATH))
    } else {
        machine_id_from(Path::new(MACHINE_ID_PATH))
    };

    resolved.unwrap_or_else(|| {
        warn!("Identidade não resolvida (modo {mode}); usando sentinela");
        IDENTITY_ERROR.to_string()
    })
}

/// Extrai o serial de 16 caracteres da última linha `Serial` do arquivo.
fn serial_from_cpuinfo(path: &Path) -> Option<String> {
    let file = std::fs::File::open(path).ok()?;

    let mut serial = None;
    for line in BufReader::new(file).lines() {
        let line = line.ok()?;
        if line.starts_with("Serial") {
            if let Some(s) = line.get(SERIAL_RANGE) {
                serial = Some(s.to_string());
            }
        }
    }

    serial
}

/// Primeira linha do arquivo de identidade, sem espaços nas pontas.
fn machine_id_from(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let id = content.lines().next()?.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
