//! 实体选择器
//!
//! 让文本模型从参考数据集中挑选一小组实体作为故事的角色与场景。
//! 选择是尽力而为的：响应无法解析时返回空上下文，不影响后续生成。

use serde_json::Value;
use std::sync::Arc;

use super::GenerationError;
use crate::application::ports::{CompletionRequest, TextModelPort};
use crate::domain::dataset::{
    EntityContext, EntitySelection, ReferenceDataset, DEFAULT_CONTEXT_CATEGORIES,
};
use crate::domain::prompts;

/// 实体选择器
pub struct EntitySelector {
    theme: String,
    text_model: Arc<dyn TextModelPort>,
    dataset: Arc<ReferenceDataset>,
}

impl EntitySelector {
    pub fn new(
        theme: impl Into<String>,
        text_model: Arc<dyn TextModelPort>,
        dataset: Arc<ReferenceDataset>,
    ) -> Self {
        Self {
            theme: theme.into(),
            text_model,
            dataset,
        }
    }

    /// 根据用户提示选择实体上下文
    ///
    /// 模型调用失败会向上传播；响应解析失败退化为空上下文
    pub async fn select(&self, user_prompt: &str) -> Result<EntityContext, GenerationError> {
        let request = CompletionRequest::new(
            prompts::data_selection(&self.theme, user_prompt, &self.dataset),
            0.3,
        )
        .json();

        let content = self
            .text_model
            .complete(request)
            .await
            .map_err(|e| GenerationError::new("entity selection", e))?;

        let Some(selection) = parse_selection(&content) else {
            tracing::warn!(
                response_len = content.len(),
                "Entity selection response is not a JSON object, using empty context"
            );
            return Ok(EntityContext::empty_for(DEFAULT_CONTEXT_CATEGORIES));
        };

        tracing::info!(
            selection = %prompts::describe_selection(&selection),
            "Entities selected"
        );

        Ok(self.dataset.select(&selection))
    }
}

/// 解析 `{"类别": ["名称", ...]}`，非数组字段和非字符串元素被忽略
fn parse_selection(content: &str) -> Option<EntitySelection> {
    let Value::Object(map) = serde_json::from_str::<Value>(content.trim()).ok()? else {
        return None;
    };

    let selection = map
        .into_iter()
        .filter_map(|(category, value)| match value {
            Value::Array(items) => {
                let names = items
                    .into_iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect();
                Some((category, names))
            }
            _ => None,
        })
        .collect();

    Some(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generation::testing::{sample_dataset, PromptKind, ScriptedTextModel};
    use crate::application::ports::ModelError;

    fn selector(model: Arc<ScriptedTextModel>) -> EntitySelector {
        EntitySelector::new("Star Wars", model, Arc::new(sample_dataset()))
    }

    #[tokio::test]
    async fn test_select_filters_dataset() {
        let model = Arc::new(ScriptedTextModel::with_responder(|_, _| {
            Ok(r#"{"people": ["Leia Organa"], "planets": ["Hoth"], "starships": ["X-wing", "Unknown"]}"#.to_string())
        }));

        let context = selector(model.clone()).select("rebels hide on an ice world").await.unwrap();

        assert_eq!(context.names("people"), vec!["Leia Organa"]);
        assert_eq!(context.names("planets"), vec!["Hoth"]);
        assert_eq!(context.names("starships"), vec!["X-wing"]);

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].json_mode);
        assert_eq!(PromptKind::of(&requests[0]), PromptKind::Selection);
        // 索引只包含名称，不包含完整记录
        assert!(requests[0].prompt.contains("Luke Skywalker"));
        assert!(!requests[0].prompt.contains("\"height\""));
    }

    #[tokio::test]
    async fn test_unparseable_response_falls_back_to_empty_context() {
        let model = Arc::new(ScriptedTextModel::with_responder(|_, _| {
            Ok("Sure! Luke and Leia would be great.".to_string())
        }));

        let context = selector(model).select("anything").await.unwrap();

        assert_eq!(context.entity_count(), 0);
        let categories: Vec<&str> = context.category_names().collect();
        assert_eq!(categories, vec!["people", "planets", "starships"]);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = Arc::new(ScriptedTextModel::with_responder(|_, _| Err(ModelError::Timeout)));
        let err = selector(model).select("anything").await.unwrap_err();
        assert_eq!(err.unit, "entity selection");
    }

    #[test]
    fn test_parse_selection_skips_non_array_fields() {
        let selection =
            parse_selection(r#"{"people": ["A", 3, "B"], "note": "ignored"}"#).unwrap();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection["people"], vec!["A", "B"]);
        assert!(parse_selection("[1, 2]").is_none());
    }
}
