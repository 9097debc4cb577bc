use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings {
    /// sqlx connection string, e.g. `sqlite:trivia.db`
    pub url: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Defaults, then the optional file at `path`, then `TRIVIA_*` variables
    /// (`TRIVIA_DATABASE__URL`, `TRIVIA_APPLICATION__PORT`, ...).
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("database.max_connections", 5)?
            .set_default("database.run_migrations", false)?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("TRIVIA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[application]
port = "9090"

[database]
url = "sqlite:trivia.db"
run_migrations = true
"#
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.application.address(), "0.0.0.0:9090");
        assert_eq!(settings.database.url.expose_secret(), "sqlite:trivia.db");
        assert_eq!(settings.database.max_connections, 5);
        assert!(settings.database.run_migrations);
    }

    #[test]
    #[serial]
    fn database_url_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    #[serial]
    fn database_url_is_redacted_in_debug_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.toml");
        std::fs::write(&path, "[database]\nurl = \"sqlite:secret.db\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(!format!("{settings:?}").contains("secret.db"));
    }

    #[test]
    #[serial]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.toml");
        std::fs::write(
            &path,
            "[application]\nport = 9090\n\n[database]\nurl = \"sqlite:file.db\"\n",
        )
        .unwrap();

        std::env::set_var("TRIVIA_DATABASE__URL", "sqlite:env.db");
        std::env::set_var("TRIVIA_APPLICATION__PORT", "7070");
        let settings = Settings::load(&path);
        std::env::remove_var("TRIVIA_DATABASE__URL");
        std::env::remove_var("TRIVIA_APPLICATION__PORT");

        let settings = settings.unwrap();
        assert_eq!(settings.database.url.expose_secret(), "sqlite:env.db");
        assert_eq!(settings.application.port, 7070);
    }
}
