#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_resolve_application::ports::RecordResolver;
use ferrous_resolve_domain::{DomainError, Question, ResourceRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Scripted resolver: direct answers come from a table, recursive answers
/// record the requested depth.
#[derive(Clone, Default)]
pub struct MockRecordResolver {
    responses: Arc<RwLock<HashMap<Question, Vec<ResourceRecord>>>>,
    should_fail: Arc<RwLock<bool>>,
    last_depth: Arc<RwLock<Option<usize>>>,
}

impl MockRecordResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_response(&self, question: Question, records: Vec<ResourceRecord>) {
        self.responses.write().await.insert(question, records);
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn last_depth(&self) -> Option<usize> {
        *self.last_depth.read().await
    }
}

#[async_trait]
impl RecordResolver for MockRecordResolver {
    async fn direct_resolve(&self, question: &Question) -> Result<Vec<ResourceRecord>, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::CnameLoop {
                host: question.host_name().to_string(),
            });
        }
        Ok(self
            .responses
            .read()
            .await
            .get(question)
            .cloned()
            .unwrap_or_default())
    }

    async fn recursive_resolve(
        &self,
        question: &Question,
        max_indirection: usize,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        *self.last_depth.write().await = Some(max_indirection);
        self.direct_resolve(question).await
    }
}
