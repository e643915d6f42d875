//! # Sensor Agent
//!
//! Lê sensores locais (arquivo `nome=valor`), registra o dispositivo e seus
//! sensores na API de telemetria remota e envia medições em ciclo fixo.
//!
//! ## Uso
//! ```bash
//! sensor_agent                  # usa o arquivo de configuração ./conf
//! sensor_agent /etc/agent/conf
//! ```
//!
//! Códigos de saída: 0 em encerramento limpo, 1 se o servidor estiver
//! offline no startup, 2 para configuração inválida.

mod api;
mod identity;
mod leds;
mod scheduler;
mod uploader;

use agent_core::{AgentConfig, reading};
use api::ApiClient;
use scheduler::Ticker;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Carregar config ──
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("conf"));

    let config = match AgentConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuração inválida ({}): {e}", config_path.display());
            std::process::exit(2);
        }
    };

    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            error!("Config: {problem}");
        }
        std::process::exit(2);
    }

    // ── Identidade do dispositivo (uma vez por processo) ──
    let machine_id = identity::resolve(&config.id);
    info!("Identidade do dispositivo: {machine_id}");

    // ── Cliente da API ──
    let api = match ApiClient::new(&config.api, &config.key) {
        Ok(api) => api,
        Err(e) => {
            error!("Falha ao criar cliente HTTP: {e}");
            std::process::exit(2);
        }
    };

    // ── Liveness (checada uma única vez) ──
    if !api.server_online() {
        error!("Servidor de telemetria offline em {}", config.api);
        std::process::exit(1);
    }
    info!("Servidor de telemetria online");

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   ⚡ SENSOR AGENT – ATIVO (Rust)");
    println!("══════════════════════════════════════════════");
    println!("  API:       {}", config.api);
    println!("  Sensores:  {}", config.sensors_path.display());
    println!("  Tipo:      {}", config.sensor_type);
    println!("  Intervalo: {:.1}s", config.interval_secs);
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    let (ticker, _shutdown) = Ticker::new(Duration::from_secs_f64(config.interval_secs));
    loop {
        run_cycle(&api, &config, &machine_id);
        if !ticker.wait() {
            break;
        }
    }

    info!("Agente encerrado");
}

/// Executa um ciclo completo: node → LEDs → leitura → upload.
fn run_cycle(api: &ApiClient, config: &AgentConfig, machine_id: &str) {
    // O node é rebuscado a cada ciclo: o servidor pode renomeá-lo ou
    // alterar os extra_fields entre ciclos
    let node = match api.node_by_hardware_id(machine_id) {
        Ok(node) => node,
        Err(e) => {
            error!("Falha ao buscar node {machine_id}: {e}");
            return;
        }
    };

    leds::write_state(&node.extra_fields, &config.leds_path);

    let readings = match reading::read_sensors(&config.sensors_path) {
        Ok(readings) => readings,
        Err(e) => {
            warn!("Sem leituras neste ciclo: {e}");
            Vec::new()
        }
    };

    let report = uploader::upload_readings(
        api,
        &node,
        &config.sensor_type,
        &readings,
        config.location,
    );
    info!(
        "→ {} medições enviadas, {} falhas | node {} ({})",
        report.uploaded, report.failed, node.name, node.id
    );
}
