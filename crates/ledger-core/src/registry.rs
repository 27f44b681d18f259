//! On-chain contract registry
//!
//! Records each submitted contract under `contract~<id>` and tracks its
//! approval status as consensus is reached.

use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{require_non_empty, LedgerError, Result};
use crate::stub::{decode_json, put_json, ChaincodeStub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    OnChain,
    Approved,
    Rejected,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::OnChain => "on_chain",
            ContractStatus::Approved => "approved",
            ContractStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ContractStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(ContractStatus::Draft),
            "on_chain" => Ok(ContractStatus::OnChain),
            "approved" => Ok(ContractStatus::Approved),
            "rejected" => Ok(ContractStatus::Rejected),
            other => Err(LedgerError::InvalidArgument(format!(
                "unknown contract status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contract as submitted by a bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSubmission {
    pub contract_id: String,
    #[serde(default)]
    pub bank_org: String,
    #[serde(default)]
    pub standard_code: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    pub contract_id: String,
    pub bank_org: String,
    pub standard_code: String,
    pub status: ContractStatus,
    pub created_at: String,
    pub last_updated_at: String,
}

#[derive(Debug)]
pub struct ContractRegistry<S> {
    stub: S,
}

impl<S: ChaincodeStub> ContractRegistry<S> {
    pub fn new(stub: S) -> Self {
        Self { stub }
    }

    pub fn stub(&self) -> &S {
        &self.stub
    }

    /// Record a submission as `on_chain`. Registering an id again replaces it.
    pub fn register_contract(&mut self, submission: ContractSubmission) -> Result<ContractRecord> {
        require_non_empty("contract id", &submission.contract_id)?;

        let record = ContractRecord {
            contract_id: submission.contract_id,
            bank_org: submission.bank_org,
            standard_code: submission.standard_code,
            status: ContractStatus::OnChain,
            created_at: submission.created_at,
            last_updated_at: now(),
        };
        put_json(&mut self.stub, &contract_key(&record.contract_id), &record)?;

        info!(contract_id = %record.contract_id, bank_org = %record.bank_org, "contract registered");
        Ok(record)
    }

    pub fn update_status(
        &mut self,
        contract_id: &str,
        status: ContractStatus,
    ) -> Result<ContractRecord> {
        let mut record = self.get_contract(contract_id)?;
        record.status = status;
        record.last_updated_at = now();
        put_json(&mut self.stub, &contract_key(contract_id), &record)?;

        info!(contract_id, %status, "contract status updated");
        Ok(record)
    }

    pub fn get_contract(&self, contract_id: &str) -> Result<ContractRecord> {
        let key = contract_key(contract_id);
        let bytes = self
            .stub
            .get_state(&key)?
            .ok_or_else(|| LedgerError::NotFound(format!("contract {}", contract_id)))?;
        decode_json(&key, &bytes)
    }
}

fn contract_key(contract_id: &str) -> String {
    format!("contract~{}", contract_id)
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
