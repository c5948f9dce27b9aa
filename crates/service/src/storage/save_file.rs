use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

use crate::errors::{Result, ServiceError};

/// Every save keyed by player id. Keeps insertion order when written back.
pub type SaveMap = serde_json::Map<String, Value>;

/// JSON file-backed map of player saves.
///
/// Nothing is cached: `read` loads the whole file and `write` replaces it.
/// Read-modify-write cycles go through [`SaveFileStore::update_map`], which
/// holds a single-writer lock so concurrent saves to different players
/// cannot drop each other's entries.
pub struct SaveFileStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl SaveFileStore {
    /// Records the backing path. The file is created lazily on first write.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), write_lock: Mutex::new(()) }
    }

    /// Load the full map. A missing, empty or unparsable file reads as empty.
    pub async fn read(&self) -> Result<SaveMap> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SaveMap::new()),
            Err(e) => {
                return Err(ServiceError::Io(format!("read {}: {e}", self.file_path.display())))
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!(path = %self.file_path.display(), "save file is empty");
            return Ok(SaveMap::new());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => {
                warn!(
                    event = "save_file_corrupt",
                    path = %self.file_path.display(),
                    found = json_kind(&other),
                    "save file is not a JSON object; treating as empty"
                );
                Ok(SaveMap::new())
            }
            Err(e) => {
                warn!(
                    event = "save_file_corrupt",
                    path = %self.file_path.display(),
                    error = %e,
                    "save file is not valid JSON; treating as empty"
                );
                Ok(SaveMap::new())
            }
        }
    }

    /// Replace the file with `map`, pretty-printed with two-space indentation.
    ///
    /// Bytes go to `<file>.tmp` first and are renamed over the target, so a
    /// failed write never leaves a truncated save file behind.
    pub async fn write(&self, map: &SaveMap) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ServiceError::Io(format!("create {}: {e}", parent.display())))?;
            }
        }

        let data = serde_json::to_vec_pretty(map).map_err(|e| ServiceError::Serialize(e.to_string()))?;
        let tmp = tmp_path(&self.file_path);
        fs::write(&tmp, &data)
            .await
            .map_err(|e| ServiceError::Io(format!("write {}: {e}", tmp.display())))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::Io(format!("replace {}: {e}", self.file_path.display())));
        }
        debug!(path = %self.file_path.display(), records = map.len(), bytes = data.len(), "save file written");
        Ok(())
    }

    /// Apply a mutation to the on-disk map and persist it, one writer at a time.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut SaveMap) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read().await?;
        let out = f(&mut map);
        self.write(&map).await?;
        Ok(out)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    path.with_extension(format!("{ext}.tmp"))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
