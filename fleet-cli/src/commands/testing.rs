//! In-memory collaborators for exercising actions without a terminal or network.

use std::sync::{
    Mutex,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};

use anyhow::Result;
use async_trait::async_trait;
use fleet_shared::{application::Application, device::DeviceType};

use super::{Context, Invocation};
use crate::{
    error::CliError,
    prompt::{InputSource, Prompter},
    server::Platform,
};

pub fn application(id: u64, name: &str) -> Application {
    Application {
        id,
        app_name: name.to_string(),
        device_type: "raspberry-pi".to_string(),
        git_repository: Some(format!("git@git.fleet.example.com:me/{}.git", name.to_lowercase())),
        commit: None,
        online_devices: 0,
        devices_length: 0,
    }
}

/// Platform double that records one line per call.
pub struct FakePlatform {
    apps: Mutex<Vec<Application>>,
    device_types: Vec<DeviceType>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicU64,
    unavailable: bool,
    /// Name another client "creates" between our existence check and create
    racing: Option<String>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            apps: Mutex::new(Vec::new()),
            device_types: vec![
                DeviceType {
                    slug: "raspberry-pi".to_string(),
                    name: "Raspberry Pi".to_string(),
                },
                DeviceType {
                    slug: "intel-nuc".to_string(),
                    name: "Intel NUC".to_string(),
                },
            ],
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(Self::FIRST_ID),
            unavailable: false,
            racing: None,
        }
    }
}

impl FakePlatform {
    pub const FIRST_ID: u64 = 1001;

    pub fn with_apps(apps: Vec<Application>) -> Self {
        Self {
            apps: Mutex::new(apps),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn racing(mut self, name: &str) -> Self {
        self.racing = Some(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        if self.unavailable {
            return Err(CliError::Remote {
                status: 503,
                message: "Service Unavailable".to_string(),
            }
            .into());
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }

    fn find(&self, name: &str) -> Option<Application> {
        self.apps
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.app_name == name)
            .cloned()
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn has_application(&self, name: &str) -> Result<bool> {
        self.record(format!("has {name}"))?;
        Ok(self.find(name).is_some())
    }

    async fn create_application(&self, name: &str, device_type: &str) -> Result<Application> {
        self.record(format!("create {name} {device_type}"))?;
        if self.find(name).is_some() || self.racing.as_deref() == Some(name) {
            return Err(CliError::Remote {
                status: 409,
                message: "Application name must be unique".to_string(),
            }
            .into());
        }
        let app = Application {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            device_type: device_type.to_string(),
            ..application(0, name)
        };
        self.apps.lock().unwrap().push(app.clone());
        Ok(app)
    }

    async fn list_applications(&self) -> Result<Vec<Application>> {
        self.record("list".to_string())?;
        Ok(self.apps.lock().unwrap().clone())
    }

    async fn get_application(&self, name: &str) -> Result<Application> {
        self.record(format!("get {name}"))?;
        self.find(name)
            .ok_or_else(|| CliError::ApplicationNotFound(name.to_string()).into())
    }

    async fn restart_application(&self, name: &str) -> Result<()> {
        self.record(format!("restart {name}"))
    }

    async fn remove_application(&self, name: &str) -> Result<()> {
        self.record(format!("remove {name}"))?;
        self.apps.lock().unwrap().retain(|a| a.app_name != name);
        Ok(())
    }

    async fn set_device_note(&self, uuid: &str, note: &str) -> Result<()> {
        self.record(format!("note {uuid} {note}"))
    }

    async fn supported_device_types(&self) -> Result<Vec<DeviceType>> {
        self.record("device-types".to_string())?;
        Ok(self.device_types.clone())
    }
}

/// Answers every prompt with a fixed reply.
pub struct ScriptedPrompter {
    confirm_answer: bool,
    select_answer: usize,
    confirmations: AtomicUsize,
    selections: AtomicUsize,
    last_message: Mutex<String>,
    last_choices: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(confirm_answer: bool, select_answer: usize) -> Self {
        Self {
            confirm_answer,
            select_answer,
            confirmations: AtomicUsize::new(0),
            selections: AtomicUsize::new(0),
            last_message: Mutex::new(String::new()),
            last_choices: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self::new(false, 0)
    }

    pub fn accepting() -> Self {
        Self::new(true, 0)
    }

    pub fn selecting(index: usize) -> Self {
        Self::new(false, index)
    }

    pub fn confirmations(&self) -> usize {
        self.confirmations.load(Ordering::SeqCst)
    }

    pub fn selections(&self) -> usize {
        self.selections.load(Ordering::SeqCst)
    }

    pub fn last_message(&self) -> String {
        self.last_message.lock().unwrap().clone()
    }

    pub fn last_choices(&self) -> Vec<String> {
        self.last_choices.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        self.confirmations.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock().unwrap() = message.to_string();
        Ok(self.confirm_answer)
    }

    fn select(&self, message: &str, choices: &[String]) -> Result<usize> {
        self.selections.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock().unwrap() = message.to_string();
        *self.last_choices.lock().unwrap() = choices.to_vec();
        Ok(self.select_answer)
    }
}

/// Stdin double: `None` behaves like an interactive terminal.
pub struct StaticInput {
    content: Option<String>,
    reads: AtomicUsize,
}

impl StaticInput {
    pub fn terminal() -> Self {
        Self {
            content: None,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn piped(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl InputSource for StaticInput {
    fn read_piped(&self) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.content.clone())
    }
}

/// Run an invocation and capture what it printed.
pub async fn run_with(
    invocation: Invocation,
    platform: &FakePlatform,
    prompter: &ScriptedPrompter,
    input: &StaticInput,
) -> (Result<()>, String) {
    let mut out = Vec::new();
    let res = {
        let mut ctx = Context {
            platform,
            prompter,
            input,
            out: &mut out,
            ansi: false,
        };
        invocation.run(&mut ctx).await
    };
    (res, String::from_utf8(out).unwrap())
}
