use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Operator-tunable values for the response generator
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parameters {
    /// Percent chance of replying to a message, 0 to 100.
    #[serde(rename = "Chance", serialize_with = "serialize_chance")]
    pub chance: f64,
    /// Maximum reply length in tokens, 60 to 512.
    #[serde(rename = "Length")]
    pub length: i64,
}

/// Whole numbers are written as `55`, not `55.0`.
fn serialize_chance<S>(chance: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if chance.fract() == 0.0 && chance.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*chance as i64)
    } else {
        serializer.serialize_f64(*chance)
    }
}

/// State which persists across sessions
pub struct PersistentState {
    path: PathBuf,
    parameters: Parameters,
}

impl PersistentState {
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            anyhow!(
                "Could not read parameters at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let parameters: Parameters = serde_json::from_str(&contents).map_err(|e| {
            anyhow!(
                "Could not parse parameters at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            parameters,
        })
    }

    pub fn parameters(&self) -> Parameters {
        self.parameters
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store a new response chance.  Memory is only updated once the file is written.
    pub async fn set_chance(&mut self, chance: f64) -> Result<()> {
        let next = Parameters {
            chance,
            ..self.parameters
        };
        self.commit(next).await
    }

    /// Store a new response length.  Memory is only updated once the file is written.
    pub async fn set_length(&mut self, length: i64) -> Result<()> {
        let next = Parameters {
            length,
            ..self.parameters
        };
        self.commit(next).await
    }

    async fn commit(&mut self, next: Parameters) -> Result<()> {
        save(&self.path, &next).await?;
        self.parameters = next;
        Ok(())
    }
}

async fn save(path: &Path, parameters: &Parameters) -> Result<()> {
    let contents = serde_json::to_string(parameters)
        .map_err(|e| anyhow!("Could not serialize parameters: {}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            anyhow!(
                "Could not create directory `{}`: {}",
                parent.to_string_lossy(),
                e
            )
        })?;
    }

    // Create a temporary file in the same directory.
    let tmp_path = path.with_extension("json.new");

    tokio::fs::write(&tmp_path, contents).await.map_err(|e| {
        anyhow!(
            "Could not write parameters to temporary file `{}`: {}",
            tmp_path.to_string_lossy(),
            e
        )
    })?;

    // Atomically rename the temporary file over the target file.
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        // Best effort, the rename error is the one worth reporting.
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(anyhow!(
            "Could not rename temporary file `{}` to `{}`: {}",
            tmp_path.to_string_lossy(),
            path.to_string_lossy(),
            e
        ));
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Writes `{"Chance": chance, "Length": length}` into `dir` and loads it.
    pub(crate) async fn state_in(dir: &TempDir, chance: f64, length: i64) -> PersistentState {
        let path = dir.path().join("parameters.json");
        std::fs::write(
            &path,
            format!(r#"{{"Chance":{chance},"Length":{length}}}"#),
        )
        .unwrap();
        PersistentState::load(&path).await.unwrap()
    }

    pub(crate) fn on_disk(path: &Path) -> Parameters {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn load_reads_both_fields() {
        let tmp = TempDir::new().unwrap();
        let pstate = state_in(&tmp, 10.0, 100).await;

        assert_eq!(
            pstate.parameters(),
            Parameters {
                chance: 10.0,
                length: 100
            }
        );
    }

    #[tokio::test]
    async fn load_rejects_missing_field() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("parameters.json");
        std::fs::write(&path, r#"{"Chance":10}"#).unwrap();

        let err = PersistentState::load(&path).await.err().unwrap();
        assert!(err.to_string().contains("Could not parse parameters"));
    }

    #[tokio::test]
    async fn load_rejects_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = PersistentState::load(&tmp.path().join("parameters.json"))
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("Could not read parameters"));
    }

    #[tokio::test]
    async fn set_chance_overwrites_file_and_keeps_length() {
        let tmp = TempDir::new().unwrap();
        let mut pstate = state_in(&tmp, 10.0, 100).await;

        pstate.set_chance(55.5).await.unwrap();

        let expected = Parameters {
            chance: 55.5,
            length: 100,
        };
        assert_eq!(pstate.parameters(), expected);
        assert_eq!(on_disk(pstate.path()), expected);
        assert!(!tmp.path().join("parameters.json.new").exists());
    }

    #[tokio::test]
    async fn set_length_overwrites_file_and_keeps_chance() {
        let tmp = TempDir::new().unwrap();
        let mut pstate = state_in(&tmp, 10.0, 100).await;

        pstate.set_length(512).await.unwrap();

        let expected = Parameters {
            chance: 10.0,
            length: 512,
        };
        assert_eq!(pstate.parameters(), expected);
        assert_eq!(on_disk(pstate.path()), expected);
    }

    #[tokio::test]
    async fn whole_chance_is_written_without_fraction() {
        let tmp = TempDir::new().unwrap();
        let mut pstate = state_in(&tmp, 10.0, 100).await;

        pstate.set_chance(55.0).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(pstate.path()).unwrap(),
            r#"{"Chance":55,"Length":100}"#
        );

        pstate.set_chance(12.5).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(pstate.path()).unwrap(),
            r#"{"Chance":12.5,"Length":100}"#
        );
    }

    #[tokio::test]
    async fn failed_rename_removes_temporary_file() {
        let tmp = TempDir::new().unwrap();
        let mut pstate = state_in(&tmp, 10.0, 100).await;

        // A non-empty directory where the file should be makes the rename fail.
        let params = tmp.path().join("parameters.json");
        std::fs::remove_file(&params).unwrap();
        std::fs::create_dir(&params).unwrap();
        std::fs::write(params.join("occupied"), "").unwrap();

        assert!(pstate.set_length(300).await.is_err());
        assert!(!tmp.path().join("parameters.json.new").exists());
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_untouched() {
        let tmp = TempDir::new().unwrap();
        let mut pstate = state_in(&tmp, 10.0, 100).await;

        // A regular file where the parent directory should be makes every write fail.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        pstate.path = blocker.join("parameters.json");

        assert!(pstate.set_chance(80.0).await.is_err());
        assert!(pstate.set_length(300).await.is_err());
        assert_eq!(
            pstate.parameters(),
            Parameters {
                chance: 10.0,
                length: 100
            }
        );
    }
}
