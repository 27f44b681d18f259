//! Application state for the copilot server

use std::sync::Arc;

use compliance_engine::ComplianceEngine;
use ledger_core::{
    ConsensusBoard, ContractRegistry, LedgerError, MemoryStub, Notifier, ProposalToken,
};
use tokio::sync::RwLock;
use tracing::info;

/// One chaincode per channel, each with its own state and event log
pub struct Ledger {
    pub token: ProposalToken<MemoryStub>,
    pub registry: ContractRegistry<MemoryStub>,
    pub consensus: ConsensusBoard<MemoryStub>,
    pub notifier: Notifier<MemoryStub>,
}

impl Ledger {
    pub fn new() -> Result<Self, LedgerError> {
        let mut token = ProposalToken::new(MemoryStub::new());
        token.init_ledger()?;
        info!("In-memory ledger initialized");

        Ok(Self {
            token,
            registry: ContractRegistry::new(MemoryStub::new()),
            consensus: ConsensusBoard::new(MemoryStub::new()),
            notifier: Notifier::new(MemoryStub::new()),
        })
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ComplianceEngine>,
    pub ledger: Arc<RwLock<Ledger>>,
}

impl AppState {
    /// Fresh engine and an initialized in-memory ledger
    pub fn new() -> Result<Self, LedgerError> {
        Ok(Self {
            engine: Arc::new(ComplianceEngine::new()),
            ledger: Arc::new(RwLock::new(Ledger::new()?)),
        })
    }
}

