//! API handlers for the copilot server

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use compliance_engine::copilot::CopilotMessage;
use compliance_engine::CopilotSession;
use ledger_core::{
    ConsensusStatus, ConsensusVote, ContractRecord, ContractStatus, ContractSubmission,
    LedgerEvent, MemoryStub, QuorumOutcome, Subscriber, Vote,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Clause, ClauseAnalysis, ClauseAssessment, ContractReview};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "copilot-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /api/clauses/analyze
pub async fn handle_analyze_clause(
    State(state): State<AppState>,
    payload: Result<Json<Clause>, JsonRejection>,
) -> Result<Json<ClauseAnalysis>, ApiError> {
    let Json(clause) = payload?;
    debug!(clause_id = ?clause.clause_id, "analyze request");

    Ok(Json(state.engine.analyze(&clause)))
}

/// Handler: POST /api/clauses/assess
///
/// Accepts any JSON; clauses that do not decode are scored by the fallback.
pub async fn handle_assess_clause(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClauseAssessment>, ApiError> {
    let Json(value) = payload?;
    Ok(Json(state.engine.assess_value(&value)))
}

#[derive(Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub contract_id: Option<String>,
    pub clauses: Vec<Value>,
}

/// Handler: POST /api/contracts/review
pub async fn handle_review_contract(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<ContractReview>, ApiError> {
    let Json(req) = payload?;
    if req.clauses.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Contract has no clauses to review".into(),
        ));
    }

    let review = state.engine.review(req.contract_id, &req.clauses);
    info!(
        contract_id = ?review.contract_id,
        clauses = review.assessments.len(),
        flagged = review.flagged_count,
        "contract reviewed"
    );

    Ok(Json(review))
}

#[derive(Deserialize)]
pub struct RegenerateRequest {
    #[serde(default)]
    pub clause_id: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct RegenerateResponse {
    pub clause_id: Option<String>,
    pub improved_version: String,
    pub analysis: ClauseAnalysis,
    pub messages: Vec<CopilotMessage>,
}

/// Handler: POST /api/copilot/regenerate
pub async fn handle_regenerate(
    payload: Result<Json<RegenerateRequest>, JsonRejection>,
) -> Result<Json<RegenerateResponse>, ApiError> {
    let Json(req) = payload?;
    if req.text.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Clause text is empty".into()));
    }

    let mut session = CopilotSession::open(req.clause_id, &req.text);
    let analysis = session.regenerate().clone();

    Ok(Json(RegenerateResponse {
        clause_id: session.clause_id().map(str::to_string),
        improved_version: analysis.improved_version.clone(),
        analysis,
        messages: session.messages().to_vec(),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitResponse {
    pub total_supply: u64,
}

/// Handler: POST /api/ledger/init
pub async fn handle_init_ledger(
    State(state): State<AppState>,
) -> Result<Json<InitResponse>, ApiError> {
    state.ledger.write().await.token.init_ledger()?;
    Ok(Json(InitResponse { total_supply: 0 }))
}

/// Amount as sent by clients: `"250"` or `250`
#[derive(Deserialize)]
#[serde(untagged)]
pub enum AmountArg {
    Text(String),
    Number(serde_json::Number),
}

impl AmountArg {
    fn into_string(self) -> String {
        match self {
            AmountArg::Text(s) => s,
            AmountArg::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct MintRequest {
    pub amount: AmountArg,
}

#[derive(Serialize)]
pub struct MintResponse {
    pub proposal_id: String,
    pub amount: Option<u64>,
}

/// Handler: POST /api/ledger/proposals/:id/mint
pub async fn handle_mint(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
    payload: Result<Json<MintRequest>, JsonRejection>,
) -> Result<Json<MintResponse>, ApiError> {
    let Json(req) = payload?;
    let mut ledger = state.ledger.write().await;
    ledger.token.mint(&proposal_id, &req.amount.into_string())?;
    let amount = ledger.token.minted_amount(&proposal_id)?;

    Ok(Json(MintResponse {
        proposal_id,
        amount,
    }))
}

#[derive(Deserialize)]
pub struct VoteRequest {
    pub org: String,
    pub vote: String,
}

#[derive(Serialize)]
pub struct VoteResponse {
    pub proposal_id: String,
    pub org: String,
    pub vote: Option<Vote>,
}

/// Handler: POST /api/ledger/proposals/:id/votes
pub async fn handle_vote(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<VoteResponse>, ApiError> {
    let Json(req) = payload?;
    let mut ledger = state.ledger.write().await;
    ledger.token.vote(&proposal_id, &req.org, &req.vote)?;
    let vote = ledger.token.vote_of(&proposal_id, &req.org)?;

    Ok(Json(VoteResponse {
        proposal_id,
        org: req.org,
        vote,
    }))
}

#[derive(Serialize)]
pub struct QuorumResponse {
    pub proposal_id: String,
    pub outcome: QuorumOutcome,
}

/// Handler: POST /api/ledger/proposals/:id/quorum
pub async fn handle_check_quorum(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
) -> Result<Json<QuorumResponse>, ApiError> {
    let outcome = state.ledger.write().await.token.check_quorum(&proposal_id)?;
    Ok(Json(QuorumResponse {
        proposal_id,
        outcome,
    }))
}

/// An event tagged with the chaincode that emitted it
#[derive(Serialize)]
pub struct ChaincodeEvent {
    pub chaincode: &'static str,
    #[serde(flatten)]
    pub event: LedgerEvent,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub events: Vec<ChaincodeEvent>,
    pub count: usize,
}

fn tagged<'a>(
    chaincode: &'static str,
    stub: &'a MemoryStub,
) -> impl Iterator<Item = ChaincodeEvent> + 'a {
    stub.events()
        .iter()
        .cloned()
        .map(move |event| ChaincodeEvent { chaincode, event })
}

/// Handler: GET /api/ledger/events
pub async fn handle_list_events(State(state): State<AppState>) -> Json<EventsResponse> {
    let ledger = state.ledger.read().await;
    let events: Vec<ChaincodeEvent> = tagged("token", ledger.token.stub())
        .chain(tagged("registry", ledger.registry.stub()))
        .chain(tagged("consensus", ledger.consensus.stub()))
        .chain(tagged("notifications", ledger.notifier.stub()))
        .collect();
    let count = events.len();
    Json(EventsResponse { events, count })
}

/// Handler: POST /api/registry/contracts
pub async fn handle_register_contract(
    State(state): State<AppState>,
    payload: Result<Json<ContractSubmission>, JsonRejection>,
) -> Result<Json<ContractRecord>, ApiError> {
    let Json(submission) = payload?;
    let record = state
        .ledger
        .write()
        .await
        .registry
        .register_contract(submission)?;
    Ok(Json(record))
}

/// Handler: GET /api/registry/contracts/:id
pub async fn handle_get_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<String>,
) -> Result<Json<ContractRecord>, ApiError> {
    let record = state.ledger.read().await.registry.get_contract(&contract_id)?;
    Ok(Json(record))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Handler: PUT /api/registry/contracts/:id/status
pub async fn handle_update_contract_status(
    State(state): State<AppState>,
    Path(contract_id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<ContractRecord>, ApiError> {
    let Json(req) = payload?;
    let status: ContractStatus = req.status.parse()?;
    let record = state
        .ledger
        .write()
        .await
        .registry
        .update_status(&contract_id, status)?;
    Ok(Json(record))
}

/// Handler: POST /api/consensus/votes
pub async fn handle_submit_consensus_vote(
    State(state): State<AppState>,
    payload: Result<Json<ConsensusVote>, JsonRejection>,
) -> Result<Json<ConsensusVote>, ApiError> {
    let Json(vote) = payload?;
    state.ledger.write().await.consensus.submit_vote(&vote)?;
    Ok(Json(vote))
}

#[derive(Serialize)]
pub struct ConsensusResponse {
    pub contract_id: String,
    pub level: u32,
    pub status: ConsensusStatus,
}

/// Handler: GET /api/consensus/:contract_id/levels/:level
pub async fn handle_check_consensus(
    State(state): State<AppState>,
    Path((contract_id, level)): Path<(String, u32)>,
) -> Result<Json<ConsensusResponse>, ApiError> {
    let status = state
        .ledger
        .read()
        .await
        .consensus
        .check_consensus(&contract_id, level)?;
    Ok(Json(ConsensusResponse {
        contract_id,
        level,
        status,
    }))
}

/// Handler: POST /api/notifications/subscribers
pub async fn handle_subscribe(
    State(state): State<AppState>,
    payload: Result<Json<Subscriber>, JsonRejection>,
) -> Result<Json<Subscriber>, ApiError> {
    let Json(subscriber) = payload?;
    state.ledger.write().await.notifier.subscribe(&subscriber)?;
    Ok(Json(subscriber))
}

#[derive(Serialize)]
pub struct SubscribersResponse {
    pub country: String,
    pub subscribers: Vec<Subscriber>,
    pub count: usize,
}

/// Handler: GET /api/notifications/subscribers/:country
pub async fn handle_list_subscribers(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<SubscribersResponse>, ApiError> {
    let subscribers = state.ledger.read().await.notifier.get_subscribers(&country)?;
    let count = subscribers.len();
    Ok(Json(SubscribersResponse {
        country,
        subscribers,
        count,
    }))
}

#[derive(Deserialize)]
pub struct BroadcastRequest {
    pub contract_id: String,
    pub country: String,
}

#[derive(Serialize)]
pub struct BroadcastResponse {
    pub contract_id: String,
    pub country: String,
    pub notified: Vec<Subscriber>,
}

/// Handler: POST /api/notifications/broadcast
pub async fn handle_broadcast(
    State(state): State<AppState>,
    payload: Result<Json<BroadcastRequest>, JsonRejection>,
) -> Result<Json<BroadcastResponse>, ApiError> {
    let Json(req) = payload?;
    let mut ledger = state.ledger.write().await;
    ledger.notifier.broadcast(&req.contract_id, &req.country)?;
    let notified = ledger.notifier.get_subscribers(&req.country)?;

    Ok(Json(BroadcastResponse {
        contract_id: req.contract_id,
        country: req.country,
        notified,
    }))
}
