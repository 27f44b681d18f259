//! Ledger capability for contract approval
//!
//! [`ChaincodeStub`] is the narrow key-value and event interface a ledger
//! peer exposes to chaincode. The chaincodes built on it:
//!
//! - [`ProposalToken`] mints approval tokens for proposals, records votes
//!   and announces approval.
//! - [`ContractRegistry`] tracks submitted contracts and their status.
//! - [`ConsensusBoard`] collects bank votes and reports two-of-three consensus.
//! - [`Notifier`] keeps per-country bank subscriptions and broadcasts approvals.

pub mod consensus;
pub mod error;
pub mod notify;
pub mod registry;
pub mod stub;
pub mod token;

pub use consensus::{ConsensusBoard, ConsensusStatus, ConsensusVote};
pub use error::LedgerError;
pub use notify::{Notifier, Subscriber};
pub use registry::{ContractRecord, ContractRegistry, ContractStatus, ContractSubmission};
pub use stub::{ChaincodeStub, LedgerEvent, MemoryStub};
pub use token::{ProposalToken, QuorumOutcome, Vote};
