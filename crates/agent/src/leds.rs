//! Escrita do estado dos LEDs.
//!
//! O servidor pode anotar o node com um campo livre `LEDs`; quando presente,
//! o valor é espelhado num arquivo de estado local consumido pelo hardware.
//! Falhas de escrita nunca abortam o ciclo.

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Espelha o estado dos LEDs vindo dos `extra_fields` do node.
pub fn write_state(extra_fields: &[HashMap<String, Value>], path: &Path) {
    let Some(value) = led_value(extra_fields) else {
        return;
    };

    if let Err(e) = write_value(path, &value) {
        warn!("Falha ao escrever estado dos LEDs em {}: {e}", path.display());
    }
}

/// Primeiro valor string da chave `LEDs` entre os campos livres.
fn led_value(extra_fields: &[HashMap<String, Value>]) -> Option<String> {
    extra_fields
        .iter()
        .find_map(|fields| fields.get("LEDs").and_then(Value::as_str))
        .map(str::to_string)
}

fn write_value(path: &Path, value: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{value}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Vec<HashMap<String, Value>> {
        let mut map = HashMap::new();
        map.insert("LEDs".to_string(), value);
        vec![map]
    }

    #[test]
    fn writes_led_value_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estado/leds");

        write_state(&fields(json!("verde")), &path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "verde\n");
    }

    #[test]
    fn absent_field_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leds");

        write_state(&[], &path);
        write_state(&[HashMap::new()], &path);
        assert!(!path.exists());
    }

    #[test]
    fn non_string_value_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leds");

        write_state(&fields(json!(7)), &path);
        assert!(!path.exists());
    }

    #[test]
    fn first_matching_field_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leds");

        let mut first = HashMap::new();
        first.insert("LEDs".to_string(), json!("azul"));
        let mut second = HashMap::new();
        second.insert("LEDs".to_string(), json!("verde"));

        write_state(&[first, second], &path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "azul\n");
    }
}
