//! Approval broadcast to subscribed banks

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{require_non_empty, LedgerError, Result};
use crate::stub::{decode_json, put_json, ChaincodeStub};

pub const CONTRACT_APPROVED_EVENT: &str = "ContractApproved";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub country_code: String,
    pub bank_org: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastPayload<'a> {
    contract_id: &'a str,
    country: &'a str,
}

/// Subscriptions are stored under `sub~<country>~<org>`
#[derive(Debug)]
pub struct Notifier<S> {
    stub: S,
}

impl<S: ChaincodeStub> Notifier<S> {
    pub fn new(stub: S) -> Self {
        Self { stub }
    }

    pub fn stub(&self) -> &S {
        &self.stub
    }

    pub fn subscribe(&mut self, subscriber: &Subscriber) -> Result<()> {
        require_non_empty("country code", &subscriber.country_code)?;
        require_non_empty("bank org", &subscriber.bank_org)?;

        let key = format!("sub~{}~{}", subscriber.country_code, subscriber.bank_org);
        put_json(&mut self.stub, &key, subscriber)?;

        info!(country = %subscriber.country_code, bank_org = %subscriber.bank_org, "bank subscribed");
        Ok(())
    }

    /// Announce an approved contract to banks in `country_code`
    pub fn broadcast(&mut self, contract_id: &str, country_code: &str) -> Result<()> {
        require_non_empty("contract id", contract_id)?;
        require_non_empty("country code", country_code)?;

        let payload = BroadcastPayload {
            contract_id,
            country: country_code,
        };
        let bytes = serde_json::to_vec(&payload).map_err(|e| LedgerError::State(e.to_string()))?;
        self.stub.set_event(CONTRACT_APPROVED_EVENT, &bytes)?;

        info!(contract_id, country = country_code, "approval broadcast");
        Ok(())
    }

    /// Subscribers for one country, ordered by bank
    pub fn get_subscribers(&self, country_code: &str) -> Result<Vec<Subscriber>> {
        self.stub
            .get_state_by_prefix(&format!("sub~{}~", country_code))?
            .into_iter()
            .map(|(key, bytes)| decode_json(&key, &bytes))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::MemoryStub;
    use pretty_assertions::assert_eq;

    fn subscriber(country: &str, bank: &str) -> Subscriber {
        Subscriber {
            country_code: country.into(),
            bank_org: bank.into(),
        }
    }

    #[test]
    fn test_subscribers_are_grouped_by_country() {
        let mut notifier = Notifier::new(MemoryStub::new());
        notifier.subscribe(&subscriber("MY", "BankB")).unwrap();
        notifier.subscribe(&subscriber("MY", "BankA")).unwrap();
        notifier.subscribe(&subscriber("AE", "BankC")).unwrap();
        notifier.subscribe(&subscriber("MY", "BankA")).unwrap();

        assert_eq!(
            notifier.get_subscribers("MY").unwrap(),
            vec![subscriber("MY", "BankA"), subscriber("MY", "BankB")]
        );
        assert!(notifier.get_subscribers("SA").unwrap().is_empty());
        assert!(notifier.stub().events().is_empty());
    }

    #[test]
    fn test_broadcast_emits_event() {
        let mut notifier = Notifier::new(MemoryStub::new());
        notifier.broadcast("k-1", "MY").unwrap();

        let event = &notifier.stub().events()[0];
        assert_eq!(event.name, CONTRACT_APPROVED_EVENT);
        assert_eq!(event.payload, r#"{"contractId":"k-1","country":"MY"}"#);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut notifier = Notifier::new(MemoryStub::new());
        assert!(matches!(
            notifier.subscribe(&subscriber("", "BankA")),
            Err(LedgerError::InvalidArgument(_))
        ));
        assert!(matches!(
            notifier.broadcast("k-1", " "),
            Err(LedgerError::InvalidArgument(_))
        ));
    }
}
