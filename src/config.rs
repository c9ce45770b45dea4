use anyhow::{anyhow, Result};
use serenity::all::GuildId;
use std::path::{Path, PathBuf};

const CONFIG_PATH_REL_HOME: &str = ".config/shemha/config.toml";

/// Bot configuration
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub general: General,
    /// Directory holding `config.toml`.  Relative file names resolve against it.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct General {
    /// Guild the slash commands are registered in.
    pub guild_id: u64,
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
    #[serde(default = "default_parameters_file")]
    pub parameters_file: PathBuf,
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("tokens.json")
}

fn default_parameters_file() -> PathBuf {
    PathBuf::from("parameters.json")
}

/// Secrets read once at boot.  Never written back.
#[derive(serde::Deserialize)]
pub struct Credentials {
    #[serde(rename = "DiscordToken")]
    pub discord_token: String,
    /// Token for the completion service.  Not used by the command layer.
    #[allow(dead_code)]
    #[serde(rename = "GPT3Token")]
    pub completion_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("discord_token", &"<redacted>")
            .field("completion_token", &"<redacted>")
            .finish()
    }
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            anyhow!(
                "Could not read configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let mut config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow!(
                "Could not parse configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        if config.general.guild_id == 0 {
            return Err(anyhow!(
                "Invalid configuration at `{}`: `guild_id` must not be 0",
                path.to_string_lossy()
            ));
        }

        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(config)
    }

    pub fn guild_id(&self) -> GuildId {
        GuildId::new(self.general.guild_id)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.base_dir.join(&self.general.credentials_file)
    }

    pub fn parameters_path(&self) -> PathBuf {
        self.base_dir.join(&self.general.parameters_file)
    }
}

impl Credentials {
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            anyhow!(
                "Could not read credentials at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            anyhow!(
                "Could not parse credentials at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn config_defaults_file_names_next_to_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[general]\nguild_id = 1001077854936760352\n").unwrap();

        let cfg = Config::load_from(&path).await.unwrap();
        assert_eq!(cfg.guild_id(), GuildId::new(1001077854936760352));
        assert_eq!(cfg.credentials_path(), tmp.path().join("tokens.json"));
        assert_eq!(cfg.parameters_path(), tmp.path().join("parameters.json"));
    }

    #[tokio::test]
    async fn config_absolute_file_names_are_kept() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\nguild_id = 42\ncredentials_file = \"/srv/bot/tokens.json\"\nparameters_file = \"state/params.json\"\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).await.unwrap();
        assert_eq!(cfg.credentials_path(), PathBuf::from("/srv/bot/tokens.json"));
        assert_eq!(cfg.parameters_path(), tmp.path().join("state/params.json"));
    }

    #[tokio::test]
    async fn zero_guild_id_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[general]\nguild_id = 0\n").unwrap();

        assert!(Config::load_from(&path).await.is_err());
    }

    #[tokio::test]
    async fn missing_config_names_the_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");

        let err = Config::load_from(&path).await.err().unwrap();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[tokio::test]
    async fn credentials_parse_and_stay_out_of_debug_output() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tokens.json");
        std::fs::write(&path, r#"{"DiscordToken":"abc.def","GPT3Token":"sk-123"}"#).unwrap();

        let credentials = Credentials::load(&path).await.unwrap();
        assert_eq!(credentials.discord_token, "abc.def");
        assert_eq!(credentials.completion_token, "sk-123");

        let shown = format!("{credentials:?}");
        assert!(!shown.contains("abc.def"));
        assert!(!shown.contains("sk-123"));
    }

    #[tokio::test]
    async fn malformed_credentials_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tokens.json");
        std::fs::write(&path, r#"{"DiscordToken":"abc"}"#).unwrap();

        let err = Credentials::load(&path).await.err().unwrap();
        assert!(err.to_string().contains("Could not parse credentials"));
    }
}
