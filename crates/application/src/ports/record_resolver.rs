use async_trait::async_trait;
use ferrous_resolve_domain::{DomainError, Question, ResourceRecord};

#[async_trait]
pub trait RecordResolver: Send + Sync {
    /// Records for `question`, CNAMEs of the asked host included but not
    /// followed. Empty when nothing could be learned.
    async fn direct_resolve(&self, question: &Question) -> Result<Vec<ResourceRecord>, DomainError>;

    /// Like `direct_resolve`, following CNAME targets at most
    /// `max_indirection` times.
    async fn recursive_resolve(
        &self,
        question: &Question,
        max_indirection: usize,
    ) -> Result<Vec<ResourceRecord>, DomainError>;
}
