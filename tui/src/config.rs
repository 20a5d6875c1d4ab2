use anyhow::{bail, Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_STORE_URL: &str = "FAVLIST_STORE_URL";
pub const ENV_STORE_KEY: &str = "FAVLIST_STORE_KEY";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Rest,
    Sqlite,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub api_key: String,
    pub sqlite_path: PathBuf,
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("favlist.db")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Rest,
            url: String::new(),
            api_key: String::new(),
            sqlite_path: default_sqlite_path(),
        }
    }
}

impl StoreConfig {
    /// Replace url/key with values from the environment when present
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_STORE_URL).filter(|v| !v.is_empty()) {
            self.url = url;
        }
        if let Some(key) = lookup(ENV_STORE_KEY).filter(|v| !v.is_empty()) {
            self.api_key = key;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Keymap {
    pub quit: String,
    pub submit: String,
    pub next_field: String,
    pub prev_field: String,
    pub scroll_up: String,
    pub scroll_down: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: "esc".to_string(),
            submit: "ctrl-s".to_string(),
            next_field: "tab".to_string(),
            prev_field: "backtab".to_string(),
            scroll_up: "up".to_string(),
            scroll_down: "down".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub keymap: Keymap,
}

/// Load the config at `path`, writing the defaults there if it is missing
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config).context("Failed to serialize default config")?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// A single key chord such as `ctrl-s` or `backtab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim().to_ascii_lowercase();
        if spec.is_empty() {
            bail!("empty key binding");
        }
        if spec == "-" {
            return Ok(Self {
                code: KeyCode::Char('-'),
                modifiers: KeyModifiers::NONE,
            });
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut parts: Vec<&str> = spec.split('-').collect();
        // "ctrl--" binds the minus key
        let key = if spec.ends_with("--") {
            parts.truncate(parts.len().saturating_sub(2));
            "-"
        } else {
            parts.pop().unwrap_or_default()
        };

        for modifier in parts {
            modifiers |= match modifier {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => bail!("unknown modifier '{other}' in key binding '{spec}'"),
            };
        }

        let code = match key {
            "esc" | "escape" => KeyCode::Esc,
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" => KeyCode::Backspace,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "space" => KeyCode::Char(' '),
            single if single.chars().count() == 1 => {
                KeyCode::Char(single.chars().next().unwrap_or(' '))
            }
            other => bail!("unknown key '{other}' in key binding '{spec}'"),
        };

        Ok(Self { code, modifiers })
    }

    /// Whether a key event triggers this binding. Shift is ignored for
    /// characters and BackTab since terminals disagree on reporting it.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let lenient = matches!(self.code, KeyCode::Char(_) | KeyCode::BackTab);
        let (want, got) = if lenient {
            (
                self.modifiers - KeyModifiers::SHIFT,
                key.modifiers - KeyModifiers::SHIFT,
            )
        } else {
            (self.modifiers, key.modifiers)
        };

        let code_matches = match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        code_matches && want == got
    }
}

/// The keymap with every entry parsed.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub quit: KeyBinding,
    pub submit: KeyBinding,
    pub next_field: KeyBinding,
    pub prev_field: KeyBinding,
    pub scroll_up: KeyBinding,
    pub scroll_down: KeyBinding,
}

impl KeyBindings {
    pub fn from_keymap(keymap: &Keymap) -> Result<Self> {
        let parse = |name: &str, spec: &str| {
            KeyBinding::parse(spec).with_context(|| format!("invalid keymap.{name}"))
        };
        Ok(Self {
            quit: parse("quit", &keymap.quit)?,
            submit: parse("submit", &keymap.submit)?,
            next_field: parse("next_field", &keymap.next_field)?,
            prev_field: parse("prev_field", &keymap.prev_field)?,
            scroll_up: parse("scroll_up", &keymap.scroll_up)?,
            scroll_down: parse("scroll_down", &keymap.scroll_down)?,
        })
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let binding = |code| KeyBinding {
            code,
            modifiers: KeyModifiers::NONE,
        };
        Self {
            quit: binding(KeyCode::Esc),
            submit: KeyBinding {
                code: KeyCode::Char('s'),
                modifiers: KeyModifiers::CONTROL,
            },
            next_field: binding(KeyCode::Tab),
            prev_field: binding(KeyCode::BackTab),
            scroll_up: binding(KeyCode::Up),
            scroll_down: binding(KeyCode::Down),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favlist.toml");

        let config = load_config(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_config_reads_sqlite_backend() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favlist.toml");
        fs::write(
            &path,
            "[store]\nbackend = \"sqlite\"\nsqlite_path = \"data/favs.db\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.store.sqlite_path, PathBuf::from("data/favs.db"));
        assert_eq!(config.keymap, Keymap::default());
    }

    #[test]
    fn test_load_config_fills_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favlist.toml");
        fs::write(
            &path,
            "[store]\nurl = \"https://abc.supabase.co\"\napi_key = \"anon\"\n\n[keymap]\nquit = \"q\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Rest);
        assert_eq!(config.store.url, "https://abc.supabase.co");
        assert_eq!(config.store.sqlite_path, PathBuf::from("favlist.db"));
        assert_eq!(config.keymap.quit, "q");
        assert_eq!(config.keymap.submit, Keymap::default().submit);
        assert_eq!(config.keymap.scroll_down, Keymap::default().scroll_down);
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favlist.toml");
        fs::write(&path, "[store\nbackend = ").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_STORE_URL, "https://abc.supabase.co"),
            (ENV_STORE_KEY, ""),
        ]);
        let mut store = StoreConfig {
            api_key: "from-file".to_string(),
            ..StoreConfig::default()
        };

        store.apply_env_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(store.url, "https://abc.supabase.co");
        assert_eq!(store.api_key, "from-file");
    }

    #[test]
    fn test_parse_key_bindings() {
        let ctrl_s = KeyBinding::parse("ctrl-s").unwrap();
        assert_eq!(ctrl_s.code, KeyCode::Char('s'));
        assert_eq!(ctrl_s.modifiers, KeyModifiers::CONTROL);

        let esc = KeyBinding::parse("Esc").unwrap();
        assert_eq!(esc.code, KeyCode::Esc);
        assert_eq!(esc.modifiers, KeyModifiers::NONE);

        let minus = KeyBinding::parse("alt--").unwrap();
        assert_eq!(minus.code, KeyCode::Char('-'));
        assert_eq!(minus.modifiers, KeyModifiers::ALT);

        let bare_minus = KeyBinding::parse("-").unwrap();
        assert_eq!(bare_minus.code, KeyCode::Char('-'));
        assert_eq!(bare_minus.modifiers, KeyModifiers::NONE);

        assert!(KeyBinding::parse("hyper-x").is_err());
        assert!(KeyBinding::parse("f13x").is_err());
        assert!(KeyBinding::parse("").is_err());
    }

    #[test]
    fn test_binding_matches() {
        let submit = KeyBinding::parse("ctrl-s").unwrap();
        assert!(submit.matches(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!submit.matches(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE)));

        let backtab = KeyBinding::parse("backtab").unwrap();
        assert!(backtab.matches(&KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_default_keymap_parses_to_default_bindings() {
        let parsed = KeyBindings::from_keymap(&Keymap::default()).unwrap();
        let defaults = KeyBindings::default();
        assert_eq!(parsed.quit, defaults.quit);
        assert_eq!(parsed.submit, defaults.submit);
        assert_eq!(parsed.prev_field, defaults.prev_field);
    }
}
