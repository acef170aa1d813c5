//! 测试替身：脚本化文本模型、图片模型、内存存储、记录停顿的 Pacer

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::application::ports::{
    CompletionRequest, GeneratedImage, ImageModelPort, ImageRequest, ImageStorageError,
    ImageStoragePort, ModelError, PacePoint, PacerPort, TextModelPort,
};
use crate::domain::dataset::{EntityRecord, ReferenceDataset};

/// 请求类型（按提示词开头识别）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Selection,
    BookTitle,
    ChapterTitles,
    Section,
    Summary,
    ImagePrompt,
    Unknown,
}

impl PromptKind {
    pub fn of(request: &CompletionRequest) -> Self {
        let prompt = request.prompt.trim_start();
        if prompt.starts_with("Based on the user's story prompt") {
            Self::Selection
        } else if prompt.starts_with("Generate a short") {
            Self::BookTitle
        } else if prompt.starts_with("I am writing a") {
            Self::ChapterTitles
        } else if prompt.starts_with("You are a novelist") {
            Self::Section
        } else if prompt.starts_with("Summarize the following") {
            Self::Summary
        } else if prompt.starts_with("Based on the following chapter summary") {
            Self::ImagePrompt
        } else {
            Self::Unknown
        }
    }
}

/// 外部调用事件（跨替身共享，用于断言调用顺序）
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Text(PromptKind, String),
    Image,
    Pause(PacePoint),
}

#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }
}

type Responder = dyn Fn(usize, &CompletionRequest) -> Result<String, ModelError> + Send + Sync;

/// 脚本化文本模型
///
/// 记录所有请求；responder 收到的序号是同类请求中的第几个（从 1 开始）
pub struct ScriptedTextModel {
    requests: Mutex<Vec<CompletionRequest>>,
    responder: Box<Responder>,
    log: Option<EventLog>,
}

impl ScriptedTextModel {
    pub fn new() -> Self {
        Self::with_responder(Self::default_response)
    }

    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(usize, &CompletionRequest) -> Result<String, ModelError> + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            log: None,
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn default_response(ordinal: usize, request: &CompletionRequest) -> Result<String, ModelError> {
        let response = match PromptKind::of(request) {
            PromptKind::Selection => {
                r#"{"people": ["Luke Skywalker"], "planets": ["Tatooine"], "starships": []}"#.to_string()
            }
            PromptKind::BookTitle => "\"# The Long Night\"".to_string(),
            PromptKind::ChapterTitles => "1. One\n2. Two\n3. Three\n4. Four".to_string(),
            PromptKind::Section => format!("section {}", ordinal),
            PromptKind::Summary => format!("summary {}", ordinal),
            PromptKind::ImagePrompt => "A dramatic digital painting of a desert at dusk.".to_string(),
            PromptKind::Unknown => "ok".to_string(),
        };
        Ok(response)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, kind: PromptKind) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| PromptKind::of(r) == kind)
            .count()
    }
}

#[async_trait]
impl TextModelPort for ScriptedTextModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let kind = PromptKind::of(&request);
        if let Some(log) = &self.log {
            log.push(Event::Text(kind, request.prompt.clone()));
        }
        let ordinal = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.iter().filter(|r| PromptKind::of(r) == kind).count()
        };
        (self.responder)(ordinal, &request)
    }
}

/// 假图片模型
pub struct FakeImageModel {
    fail: bool,
    prompts: Mutex<Vec<String>>,
    log: Option<EventLog>,
}

impl FakeImageModel {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            prompts: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            prompts: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// 成功提交的画面描述
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageModelPort for FakeImageModel {
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage, ModelError> {
        if let Some(log) = &self.log {
            log.push(Event::Image);
        }
        if self.fail {
            return Err(ModelError::ServiceError("image rejected".to_string()));
        }
        self.prompts.lock().unwrap().push(request.prompt);
        Ok(GeneratedImage {
            data: vec![0x89, b'P', b'N', b'G'],
            source_url: Some("https://images.example/1.png".to_string()),
        })
    }
}

/// 内存图片存储
pub struct MemoryImageStorage {
    fail: bool,
    saved: Mutex<Vec<PathBuf>>,
}

impl MemoryImageStorage {
    pub fn new() -> Self {
        Self {
            fail: false,
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn saved(&self) -> Vec<PathBuf> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStoragePort for MemoryImageStorage {
    async fn save_image(&self, data: &[u8]) -> Result<PathBuf, ImageStorageError> {
        if self.fail {
            return Err(ImageStorageError::IoError("disk full".to_string()));
        }
        let mut saved = self.saved.lock().unwrap();
        let path = PathBuf::from(format!("generated_images/test_{}_{}.png", saved.len(), data.len()));
        saved.push(path.clone());
        Ok(path)
    }
}

/// 记录停顿点的 Pacer（不真正等待）
pub struct RecordingPacer {
    pauses: Mutex<Vec<PacePoint>>,
    log: Option<EventLog>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self {
            pauses: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn pauses(&self) -> Vec<PacePoint> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl PacerPort for RecordingPacer {
    async fn pause(&self, point: PacePoint) {
        if let Some(log) = &self.log {
            log.push(Event::Pause(point));
        }
        self.pauses.lock().unwrap().push(point);
    }
}

/// 小型参考数据集
pub fn sample_dataset() -> ReferenceDataset {
    fn records(values: Vec<serde_json::Value>) -> Vec<EntityRecord> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    let mut categories = BTreeMap::new();
    categories.insert(
        "people".to_string(),
        records(vec![
            json!({"name": "Luke Skywalker", "height": "172", "homeworld": "Tatooine"}),
            json!({"name": "Leia Organa", "height": "150"}),
            json!({"name": "Darth Vader", "height": "202"}),
        ]),
    );
    categories.insert(
        "planets".to_string(),
        records(vec![json!({"name": "Tatooine"}), json!({"name": "Hoth"})]),
    );
    categories.insert(
        "starships".to_string(),
        records(vec![json!({"name": "X-wing"}), json!({"name": "Millennium Falcon"})]),
    );
    categories.insert(
        "films".to_string(),
        records(vec![json!({"title": "A New Hope", "episode_id": 4})]),
    );
    ReferenceDataset::new(categories)
}
