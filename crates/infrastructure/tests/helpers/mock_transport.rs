use super::ResponseBuilder;
use async_trait::async_trait;
use ferrous_resolve_application::ports::DnsTransport;
use ferrous_resolve_domain::{DnsResponse, DomainError, Question};
use ferrous_resolve_infrastructure::dns::wire::ResponseParser;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;

/// Scripted transport: answers per (server address, question), silence
/// otherwise. Scripted replies still go through the wire decoder.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<(IpAddr, Question), Vec<u8>>>,
    calls: Mutex<Vec<(Question, SocketAddr)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, server: &str, question: Question, response: ResponseBuilder) {
        let ip: IpAddr = server.parse().expect("server must be an IP address");
        self.responses
            .lock()
            .unwrap()
            .insert((ip, question), response.build());
    }

    pub fn calls(&self) -> Vec<(Question, SocketAddr)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn servers_contacted(&self) -> Vec<IpAddr> {
        self.calls().iter().map(|(_, server)| server.ip()).collect()
    }
}

#[async_trait]
impl DnsTransport for MockTransport {
    async fn exchange(
        &self,
        question: &Question,
        server: SocketAddr,
    ) -> Result<Option<DnsResponse>, DomainError> {
        self.calls.lock().unwrap().push((question.clone(), server));

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get(&(server.ip(), question.clone()))
            .cloned();
        match scripted {
            Some(bytes) => ResponseParser::parse(&bytes).map(Some),
            None => Ok(None),
        }
    }
}
