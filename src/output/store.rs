use super::model::SessionOutput;
use crate::Result;
use crate::error::RecipeError;
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use url::form_urlencoded;

/// 在锁内根据旧列表计算新列表
pub type UpdateFn<'a> =
    Box<dyn FnOnce(Option<Vec<SessionOutput>>) -> Vec<SessionOutput> + Send + 'a>;

/// 会话输出存储，以会话 ID 为键
pub trait OutputStore: Send + Sync {
    fn get(&self, session_id: &str) -> Result<Option<Vec<SessionOutput>>>;
    fn put(&self, session_id: &str, outputs: Vec<SessionOutput>) -> Result<()>;

    /// 读取、修改、写回在同一把锁内完成，并发调用不会丢失写入
    fn update(&self, session_id: &str, f: UpdateFn<'_>) -> Result<()>;

    fn delete(&self, session_id: &str) -> Result<()>;
    fn sessions(&self) -> Result<Vec<String>>;
}

#[derive(Default)]
pub struct InMemoryOutputStore {
    data: RwLock<HashMap<String, Vec<SessionOutput>>>,
}

impl InMemoryOutputStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> RecipeError {
    RecipeError::Other("output store lock poisoned".to_string())
}

impl OutputStore for InMemoryOutputStore {
    fn get(&self, session_id: &str) -> Result<Option<Vec<SessionOutput>>> {
        let guard = self.data.read().map_err(poisoned)?;
        Ok(guard.get(session_id).cloned())
    }

    fn put(&self, session_id: &str, outputs: Vec<SessionOutput>) -> Result<()> {
        let mut guard = self.data.write().map_err(poisoned)?;
        guard.insert(session_id.to_string(), outputs);
        Ok(())
    }

    fn update(&self, session_id: &str, f: UpdateFn<'_>) -> Result<()> {
        let mut guard = self.data.write().map_err(poisoned)?;
        let outputs = f(guard.remove(session_id));
        guard.insert(session_id.to_string(), outputs);
        Ok(())
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let mut guard = self.data.write().map_err(poisoned)?;
        guard.remove(session_id);
        Ok(())
    }

    fn sessions(&self) -> Result<Vec<String>> {
        let guard = self.data.read().map_err(poisoned)?;
        let mut sessions: Vec<String> = guard.keys().cloned().collect();
        sessions.sort();
        Ok(sessions)
    }
}

const SESSION_FILE_SUFFIX: &str = ".json";

/// 每个会话一个 JSON 文件
///
/// # Concurrency Strategy
/// 写入方持有 `fs2::lock_exclusive` 并原地重写文件，读取方持有共享锁，
/// 因此多个进程可以共用同一目录。`update` 在一次独占锁内完成读改写。
pub struct FileOutputStore {
    dir: PathBuf,
}

impl FileOutputStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(RecipeError::IoError)?;
        }
        Ok(())
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}", file_stem(session_id), SESSION_FILE_SUFFIX))
    }

    fn open_for_write(&self, session_id: &str) -> Result<fs::File> {
        self.ensure_dir()?;
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.session_path(session_id))
            .map_err(RecipeError::IoError)
    }
}

/// 会话 ID 编码为文件名 (可逆)，`/` 等字符不会进入路径
fn file_stem(session_id: &str) -> String {
    form_urlencoded::byte_serialize(session_id.as_bytes()).collect()
}

/// 编码后的文件名不含 `=` 和 `&`，解析结果只有一个键
fn session_id_from_stem(stem: &str) -> String {
    form_urlencoded::parse(stem.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

fn read_outputs(file: &mut fs::File) -> Result<Option<Vec<SessionOutput>>> {
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(RecipeError::IoError)?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&content)?))
}

/// 调用方须已持有独占锁
fn rewrite(file: &mut fs::File, outputs: &[SessionOutput]) -> Result<()> {
    let json = serde_json::to_string(outputs)?;
    file.set_len(0).map_err(RecipeError::IoError)?;
    file.seek(SeekFrom::Start(0))
        .map_err(RecipeError::IoError)?;
    file.write_all(json.as_bytes())
        .map_err(RecipeError::IoError)?;
    file.flush().map_err(RecipeError::IoError)?;
    Ok(())
}

impl OutputStore for FileOutputStore {
    fn get(&self, session_id: &str) -> Result<Option<Vec<SessionOutput>>> {
        let path = self.session_path(session_id);
        let mut file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RecipeError::IoError(e)),
        };
        file.lock_shared().map_err(RecipeError::IoError)?;
        // Unlock on drop
        read_outputs(&mut file)
    }

    fn put(&self, session_id: &str, outputs: Vec<SessionOutput>) -> Result<()> {
        let mut file = self.open_for_write(session_id)?;
        // 持有锁之后才截断
        file.lock_exclusive().map_err(RecipeError::IoError)?;
        rewrite(&mut file, &outputs)
    }

    fn update(&self, session_id: &str, f: UpdateFn<'_>) -> Result<()> {
        let mut file = self.open_for_write(session_id)?;
        file.lock_exclusive().map_err(RecipeError::IoError)?;

        let current = read_outputs(&mut file)?;
        let outputs = f(current);
        rewrite(&mut file, &outputs)
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        match fs::remove_file(self.session_path(session_id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RecipeError::IoError(e)),
        }
    }

    fn sessions(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(RecipeError::IoError)? {
            let name = entry.map_err(RecipeError::IoError)?.file_name();
            if let Some(stem) = name
                .to_str()
                .and_then(|n| n.strip_suffix(SESSION_FILE_SUFFIX))
            {
                sessions.push(session_id_from_stem(stem));
            }
        }
        sessions.sort();
        Ok(sessions)
    }
}
