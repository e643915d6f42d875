//! Ticker de ciclo com cancelamento cooperativo.
//!
//! Substitui o sleep fixo entre ciclos por um par tick + canal de shutdown:
//! o loop principal dorme em `wait()` e pode ser encerrado limpo ao fim do
//! ciclo corrente por qualquer detentor do [`ShutdownHandle`].

use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use std::time::{Duration, Instant};

/// Ticker do loop principal.
pub struct Ticker {
    ticks: Receiver<Instant>,
    shutdown: Receiver<()>,
    // Mantém o canal aberto mesmo se todos os handles forem descartados
    _keepalive: Sender<()>,
}

/// Handle para encerrar o loop após o ciclo corrente.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

impl ShutdownHandle {
    /// Sinaliza o encerramento. Idempotente.
    pub fn trigger(&self) {
        let _ = self.tx.try_send(());
    }
}

impl Ticker {
    pub fn new(interval: Duration) -> (Self, ShutdownHandle) {
        let (tx, rx) = bounded(1);
        let ticker = Ticker {
            ticks: tick(interval),
            shutdown: rx,
            _keepalive: tx.clone(),
        };
        (ticker, ShutdownHandle { tx })
    }

    /// Bloqueia até o próximo tick (`true`) ou até o shutdown (`false`).
    pub fn wait(&self) -> bool {
        select! {
            recv(self.ticks) -> _ => true,
            recv(self.shutdown) -> _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_returns_true_on_tick() {
        let (ticker, _shutdown) = Ticker::new(Duration::from_millis(5));
        assert!(ticker.wait());
        assert!(ticker.wait());
    }

    #[test]
    fn trigger_stops_the_wait() {
        let (ticker, shutdown) = Ticker::new(Duration::from_secs(3600));
        shutdown.trigger();
        assert!(!ticker.wait());
    }

    #[test]
    fn trigger_is_idempotent() {
        let (ticker, shutdown) = Ticker::new(Duration::from_secs(3600));
        shutdown.trigger();
        shutdown.trigger();
        assert!(!ticker.wait());
    }

    #[test]
    fn dropping_the_handle_keeps_ticking() {
        let (ticker, shutdown) = Ticker::new(Duration::from_millis(5));
        drop(shutdown);
        assert!(ticker.wait());
    }

    #[test]
    fn clone_can_trigger() {
        let (ticker, shutdown) = Ticker::new(Duration::from_secs(3600));
        let other = shutdown.clone();
        other.trigger();
        assert!(!ticker.wait());
    }
}
