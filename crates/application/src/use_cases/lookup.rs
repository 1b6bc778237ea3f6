use ferrous_resolve_domain::{DomainError, Question, RecordType, ResourceRecord};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::RecordResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Answer only what the asked host's nameservers return.
    Direct,
    /// Follow CNAMEs up to `max_indirection` levels.
    Recursive { max_indirection: usize },
}

/// Use case for answering a user's lookup.
///
/// Results come back ready for display: CNAME records first, then the
/// rest, each group ordered by host name.
pub struct LookupUseCase {
    resolver: Arc<dyn RecordResolver>,
}

impl LookupUseCase {
    pub fn new(resolver: Arc<dyn RecordResolver>) -> Self {
        Self { resolver }
    }

    #[instrument(skip(self, question), fields(question = %question))]
    pub async fn execute(
        &self,
        question: &Question,
        mode: LookupMode,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut records = match mode {
            LookupMode::Direct => self.resolver.direct_resolve(question).await?,
            LookupMode::Recursive { max_indirection } => {
                self.resolver
                    .recursive_resolve(question, max_indirection)
                    .await?
            }
        };

        records.sort_by(|a, b| {
            let a_cname = a.record_type() == RecordType::CNAME;
            let b_cname = b.record_type() == RecordType::CNAME;
            b_cname
                .cmp(&a_cname)
                .then_with(|| a.host_name().cmp(b.host_name()))
        });

        debug!(count = records.len(), "Lookup complete");
        Ok(records)
    }
}
