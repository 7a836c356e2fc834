//! 유스케이스 테스트용 포트 가짜 구현.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{
    CapturedOutput, CommandRunner, CredentialPrompter, ProcessEnvironment,
    ProfileStore, RcReader, ReportWriter, Reporter, ToolLocation, ToolLocator,
};
use crate::domain::credentials::EnvLookup;
use crate::domain::environment::ProcessEnv;
use crate::domain::error::OsscError;
use crate::domain::profiles::{deep_merge, ensure_structure};
use crate::domain::rc::RcEnvironment;

/// 메모리 문서 + 저장 기록.
pub struct FakeStore {
    document: Mutex<Value>,
    saved: Mutex<Vec<Value>>,
}

impl FakeStore {
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Mutex::new(document),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// `save`에 전달된 patch 목록.
    pub fn saved(&self) -> Vec<Value> {
        self.saved.lock().unwrap().clone()
    }

    /// 병합이 반영된 현재 문서.
    pub fn document(&self) -> Value {
        self.document.lock().unwrap().clone()
    }
}

impl ProfileStore for FakeStore {
    fn load(&self) -> Result<Value> {
        Ok(self.document())
    }

    fn save(&self, patch: &Value) -> Result<PathBuf> {
        self.saved.lock().unwrap().push(patch.clone());
        let mut doc = self.document.lock().unwrap();
        *doc = deep_merge(ensure_structure(doc.take()), patch.clone());
        Ok(PathBuf::from("/config/ossc/profiles.json"))
    }
}

/// 경로별로 미리 준비한 RC 환경을 돌려준다. `None` 값은 파싱 실패 파일.
#[derive(Default)]
pub struct FakeRcReader {
    files: BTreeMap<PathBuf, Option<RcEnvironment>>,
}

impl FakeRcReader {
    pub fn with_file(path: &str, pairs: &[(&str, &str)]) -> Self {
        let mut reader = Self::default();
        reader.add(path, pairs);
        reader
    }

    pub fn add(&mut self, path: &str, pairs: &[(&str, &str)]) {
        let env = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.files.insert(PathBuf::from(path), Some(env));
    }

    pub fn add_unreadable(&mut self, path: &str) {
        self.files.insert(PathBuf::from(path), None);
    }
}

impl RcReader for FakeRcReader {
    fn read(&self, path: &Path) -> Result<RcEnvironment> {
        match self.files.get(path) {
            Some(Some(env)) => Ok(env.clone()),
            Some(None) => anyhow::bail!("failed to read RC file {}", path.display()),
            None => Err(OsscError::RcNotFound {
                path: path.to_path_buf(),
            }
            .into()),
        }
    }

    fn list_scripts(&self, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        let scripts: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect();
        Ok(if scripts.is_empty() { None } else { Some(scripts) })
    }
}

#[derive(Default)]
pub struct FakeEnvironment {
    vars: BTreeMap<String, String>,
}

impl FakeEnvironment {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvLookup for FakeEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl ProcessEnvironment for FakeEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

pub struct FakePrompter {
    interactive: bool,
    username: Option<String>,
    password: Option<String>,
}

impl FakePrompter {
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            username: None,
            password: None,
        }
    }

    pub fn answering(username: Option<&str>, password: Option<&str>) -> Self {
        Self {
            interactive: true,
            username: username.map(ToString::to_string),
            password: password.map(ToString::to_string),
        }
    }
}

impl CredentialPrompter for FakePrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn prompt_username(&self, _default: Option<&str>) -> Result<Option<String>> {
        Ok(self.username.clone())
    }

    fn prompt_password(&self) -> Result<Option<String>> {
        Ok(self.password.clone())
    }
}

pub struct FakeToolLocator {
    executable: Option<PathBuf>,
}

impl FakeToolLocator {
    pub fn found(path: &str) -> Self {
        Self {
            executable: Some(PathBuf::from(path)),
        }
    }

    pub fn missing() -> Self {
        Self { executable: None }
    }
}

impl ToolLocator for FakeToolLocator {
    fn ensure_available(&self, _root: &Path, env: ProcessEnv) -> Result<ToolLocation> {
        Ok(ToolLocation {
            env,
            executable: self.executable.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RunnerCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: ProcessEnv,
}

/// 호출을 기록하고 고정 결과를 돌려주는 실행기.
pub struct FakeRunner {
    output: CapturedOutput,
    calls: Mutex<Vec<RunnerCall>>,
}

impl FakeRunner {
    pub fn exiting(status: i32) -> Self {
        Self::with_output(CapturedOutput {
            status,
            stdout: String::new(),
            stderr: String::new(),
        })
    }

    pub fn with_output(output: CapturedOutput) -> Self {
        Self {
            output,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RunnerCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, program: &Path, args: &[String], env: &ProcessEnv) {
        self.calls.lock().unwrap().push(RunnerCall {
            program: program.to_path_buf(),
            args: args.to_vec(),
            env: env.clone(),
        });
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run_inherited(
        &self,
        program: &Path,
        args: &[String],
        env: &ProcessEnv,
    ) -> Result<i32> {
        self.record(program, args, env);
        Ok(self.output.status)
    }

    async fn run_captured(
        &self,
        program: &Path,
        args: &[String],
        env: &ProcessEnv,
    ) -> Result<CapturedOutput> {
        self.record(program, args, env);
        Ok(self.output.clone())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn joined(&self) -> String {
        self.lines().join("\n")
    }
}

impl Reporter for RecordingReporter {
    fn status(&self, scope: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("[{scope}] {message}"));
    }

    fn raw(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// 기록한 파일 내용을 메모리에 보관한다.
#[derive(Default)]
pub struct MemoryReportWriter {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryReportWriter {
    pub fn get(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

impl ReportWriter for MemoryReportWriter {
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
