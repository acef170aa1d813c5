//! Holonovel - 主题小说生成服务
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book: 篇幅规划、章节、书名处理
//! - Dataset: 参考数据集与实体上下文
//! - Continuity: 连续性摘要
//! - Prompts: 提示词模板
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextModel, ImageModel, ImageStorage, BookRenderer, Pacer）
//! - Generation: 实体选择、章节流水线、插图
//! - Commands: GenerateBook 命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 静态文件
//! - Adapters: OpenAI 兼容客户端, 数据集加载/抓取, 图片存储, PDF 渲染
//! - Pacing: 固定冷却与请求限速

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
