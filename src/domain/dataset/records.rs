//! Dataset Context - 参考数据记录与实体上下文

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 解析失败时返回的空上下文类别
pub const DEFAULT_CONTEXT_CATEGORIES: &[&str] = &["people", "planets", "starships"];

/// 实体记录 - 原样保留数据源中的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(Map<String, Value>);

impl EntityRecord {
    /// 显示名：优先 `name`，其次 `title`
    pub fn display_name(&self) -> Option<&str> {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| self.0.get("title").and_then(Value::as_str))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// 是否被选中（name 或 title 出现在名单中）
    fn matches_any(&self, names: &[String]) -> bool {
        ["name", "title"].iter().any(|field| {
            self.0
                .get(*field)
                .and_then(Value::as_str)
                .map_or(false, |value| names.iter().any(|n| n == value))
        })
    }
}

/// 模型返回的实体选择：类别 -> 名称列表
pub type EntitySelection = BTreeMap<String, Vec<String>>;

/// 参考数据集
///
/// 进程启动时加载一次，之后只读共享
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceDataset {
    categories: BTreeMap<String, Vec<EntityRecord>>,
}

impl ReferenceDataset {
    pub fn new(categories: BTreeMap<String, Vec<EntityRecord>>) -> Self {
        Self { categories }
    }

    pub fn category(&self, name: &str) -> Option<&[EntityRecord]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 紧凑索引：每个类别只保留显示名
    pub fn name_index(&self) -> BTreeMap<&str, Vec<&str>> {
        self.categories
            .iter()
            .map(|(category, records)| {
                let names = records.iter().filter_map(EntityRecord::display_name).collect();
                (category.as_str(), names)
            })
            .collect()
    }

    /// 按选择结果过滤出实体上下文，未知类别被忽略，记录顺序与数据集一致
    pub fn select(&self, selection: &EntitySelection) -> EntityContext {
        let categories = selection
            .iter()
            .filter_map(|(category, names)| {
                self.categories.get(category).map(|records| {
                    let chosen = records
                        .iter()
                        .filter(|record| record.matches_any(names))
                        .cloned()
                        .collect();
                    (category.clone(), chosen)
                })
            })
            .collect();

        EntityContext { categories }
    }
}

/// 实体上下文 - 本次故事的角色与场景
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityContext {
    categories: BTreeMap<String, Vec<EntityRecord>>,
}

impl EntityContext {
    /// 给定类别的空上下文
    pub fn empty_for(categories: &[&str]) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|c| (c.to_string(), Vec::new()))
                .collect(),
        }
    }

    pub fn category(&self, name: &str) -> &[EntityRecord] {
        self.categories.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// 某类别下所有实体的显示名
    pub fn names(&self, category: &str) -> Vec<&str> {
        self.category(category)
            .iter()
            .filter_map(EntityRecord::display_name)
            .collect()
    }

    pub fn entity_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
