//! Bank approval consensus
//!
//! Each organisation casts one vote per contract, stored under
//! `<contract>~<org>`. A level is approved once two votes at that level
//! carry the `approved` decision.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{require_non_empty, Result};
use crate::stub::{decode_json, put_json, ChaincodeStub};

pub const VOTE_SUBMITTED_EVENT: &str = "VoteSubmitted";

/// Decision that counts toward consensus
pub const APPROVED_DECISION: &str = "approved";

/// Approvals needed at one level (two of three)
pub const APPROVALS_REQUIRED: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusVote {
    pub contract_id: String,
    pub voter_org: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusStatus {
    Approved,
    Pending,
}

#[derive(Debug)]
pub struct ConsensusBoard<S> {
    stub: S,
}

impl<S: ChaincodeStub> ConsensusBoard<S> {
    pub fn new(stub: S) -> Self {
        Self { stub }
    }

    pub fn stub(&self) -> &S {
        &self.stub
    }

    /// Store a vote and publish it. A later vote from the same org replaces
    /// the earlier one, whatever its level.
    pub fn submit_vote(&mut self, vote: &ConsensusVote) -> Result<()> {
        require_non_empty("contract id", &vote.contract_id)?;
        require_non_empty("voter org", &vote.voter_org)?;

        let key = format!("{}~{}", vote.contract_id, vote.voter_org);
        let bytes = put_json(&mut self.stub, &key, vote)?;
        self.stub.set_event(VOTE_SUBMITTED_EVENT, &bytes)?;

        info!(
            contract_id = %vote.contract_id,
            voter_org = %vote.voter_org,
            level = vote.level,
            decision = %vote.decision,
            "consensus vote submitted"
        );
        Ok(())
    }

    pub fn check_consensus(&self, contract_id: &str, level: u32) -> Result<ConsensusStatus> {
        require_non_empty("contract id", contract_id)?;

        let mut approvals = 0;
        for (key, bytes) in self.stub.get_state_by_prefix(&format!("{}~", contract_id))? {
            let vote: ConsensusVote = decode_json(&key, &bytes)?;
            if vote.level == level && vote.decision == APPROVED_DECISION {
                approvals += 1;
            }
        }
        debug!(contract_id, level, approvals, "counted approvals");

        if approvals >= APPROVALS_REQUIRED {
            Ok(ConsensusStatus::Approved)
        } else {
            Ok(ConsensusStatus::Pending)
        }
    }
}
