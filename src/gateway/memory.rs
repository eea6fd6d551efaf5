//! In-memory gateway
//!
//! Applies actions the way the spreadsheet store does: `create` appends a row,
//! updates and deletes act on the first row with a matching register number
//! and silently do nothing when there is none.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{Gateway, GatewayError};
use crate::records::{DecodedRecords, Mutation, StudentRecord};

/// Process-local records store
#[derive(Default)]
pub struct InMemoryGateway {
    rows: RwLock<Vec<StudentRecord>>,
    log: RwLock<Vec<Mutation>>,
    fetches: AtomicUsize,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of rows
    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            rows: RwLock::new(records),
            ..Default::default()
        }
    }

    /// Every mutation received, in arrival order
    pub async fn mutation_log(&self) -> Vec<Mutation> {
        self.log.read().await.clone()
    }

    /// Number of completed reads
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn apply(rows: &mut Vec<StudentRecord>, mutation: &Mutation) {
        let position = rows
            .iter()
            .position(|r| r.register_number == mutation.register_number());

        match (mutation, position) {
            (
                Mutation::Create {
                    register_number,
                    name,
                    scores,
                },
                _,
            ) => rows.push(StudentRecord {
                register_number: register_number.clone(),
                name: name.clone(),
                scores: *scores,
                assignment: String::new(),
            }),
            (Mutation::UpdateScore { scores, .. }, Some(idx)) => rows[idx].scores = *scores,
            (Mutation::UpdateAssignment { assignment, .. }, Some(idx)) => {
                rows[idx].assignment = assignment.clone()
            }
            (Mutation::Delete { .. }, Some(idx)) => {
                rows.remove(idx);
            }
            (_, None) => {
                tracing::debug!(
                    action = %mutation.kind(),
                    register_number = %mutation.register_number(),
                    "No matching row"
                );
            }
        }
    }
}

#[async_trait]
impl Gateway for InMemoryGateway {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_all(&self) -> Result<DecodedRecords, GatewayError> {
        let records = self.rows.read().await.clone();
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(DecodedRecords {
            records,
            rejected: Vec::new(),
        })
    }

    async fn mutate(&self, mutation: &Mutation) -> Result<(), GatewayError> {
        let mut rows = self.rows.write().await;
        Self::apply(&mut rows, mutation);
        self.log.write().await.push(mutation.clone());
        Ok(())
    }
}
