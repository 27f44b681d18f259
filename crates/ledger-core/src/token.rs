//! Proposal approval token chaincode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{require_non_empty, LedgerError, Result};
use crate::stub::ChaincodeStub;

pub const TOTAL_SUPPLY_KEY: &str = "totalSupply";

pub const MINTED_EVENT: &str = "FatwaMinted";
pub const VOTE_EVENT: &str = "FatwaVote";
pub const APPROVED_EVENT: &str = "FatwaApproved";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Yes,
    No,
}

impl Vote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Yes => "yes",
            Vote::No => "no",
        }
    }
}

impl FromStr for Vote {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yes" => Ok(Vote::Yes),
            "no" => Ok(Vote::No),
            other => Err(LedgerError::InvalidVote(other.to_string())),
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a quorum check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuorumOutcome {
    Approved,
}

#[derive(Serialize)]
struct MintedPayload<'a> {
    #[serde(rename = "proposalID")]
    proposal_id: &'a str,
    amount: &'a str,
}

#[derive(Serialize)]
struct VotePayload<'a> {
    #[serde(rename = "proposalID")]
    proposal_id: &'a str,
    org: &'a str,
    vote: Vote,
}

/// Chaincode that tokenizes proposals and records organisation votes
#[derive(Debug)]
pub struct ProposalToken<S> {
    stub: S,
}

impl<S: ChaincodeStub> ProposalToken<S> {
    pub fn new(stub: S) -> Self {
        Self { stub }
    }

    pub fn stub(&self) -> &S {
        &self.stub
    }

    pub fn init_ledger(&mut self) -> Result<()> {
        self.stub.put_state(TOTAL_SUPPLY_KEY, b"0")
    }

    /// Issue `amount` tokens for a proposal, replacing any earlier mint
    pub fn mint(&mut self, proposal_id: &str, amount: &str) -> Result<()> {
        require_non_empty("proposal id", proposal_id)?;
        amount
            .parse::<u64>()
            .map_err(|_| LedgerError::InvalidAmount(amount.to_string()))?;

        self.stub
            .put_state(&minted_key(proposal_id), amount.as_bytes())?;
        self.emit(
            MINTED_EVENT,
            &MintedPayload {
                proposal_id,
                amount,
            },
        )?;

        info!(proposal_id, amount, "minted proposal tokens");
        Ok(())
    }

    /// Record an organisation's vote; a later vote from the same org replaces it
    pub fn vote(&mut self, proposal_id: &str, org: &str, vote: &str) -> Result<()> {
        require_non_empty("proposal id", proposal_id)?;
        require_non_empty("org", org)?;
        let vote: Vote = vote.parse()?;

        self.stub
            .put_state(&vote_key(proposal_id, org), vote.as_str().as_bytes())?;
        self.emit(
            VOTE_EVENT,
            &VotePayload {
                proposal_id,
                org,
                vote,
            },
        )?;

        info!(proposal_id, org, %vote, "recorded vote");
        Ok(())
    }

    /// Announce approval of a proposal.
    ///
    /// Votes are not counted: every check emits the approval event.
    pub fn check_quorum(&mut self, proposal_id: &str) -> Result<QuorumOutcome> {
        require_non_empty("proposal id", proposal_id)?;
        self.stub.set_event(APPROVED_EVENT, proposal_id.as_bytes())?;

        info!(proposal_id, "proposal approved");
        Ok(QuorumOutcome::Approved)
    }

    pub fn minted_amount(&self, proposal_id: &str) -> Result<Option<u64>> {
        self.read_state(&minted_key(proposal_id))?
            .map(|raw| {
                raw.parse()
                    .map_err(|_| LedgerError::State(format!("corrupt mint record: {}", raw)))
            })
            .transpose()
    }

    pub fn vote_of(&self, proposal_id: &str, org: &str) -> Result<Option<Vote>> {
        self.read_state(&vote_key(proposal_id, org))?
            .map(|raw| raw.parse())
            .transpose()
    }

    fn read_state(&self, key: &str) -> Result<Option<String>> {
        self.stub
            .get_state(key)?
            .map(|bytes| {
                String::from_utf8(bytes)
                    .map_err(|_| LedgerError::State(format!("value at {} is not UTF-8", key)))
            })
            .transpose()
    }

    fn emit<T: Serialize>(&mut self, name: &str, payload: &T) -> Result<()> {
        let bytes =
            serde_json::to_vec(payload).map_err(|e| LedgerError::State(e.to_string()))?;
        self.stub.set_event(name, &bytes)
    }
}

fn minted_key(proposal_id: &str) -> String {
    format!("fatwa_{}", proposal_id)
}

fn vote_key(proposal_id: &str, org: &str) -> String {
    format!("vote_{}_{}", proposal_id, org)
}
