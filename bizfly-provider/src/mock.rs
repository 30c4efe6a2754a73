//! In-memory client used by the unit tests; records every remote call.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::{
    BizflyClient, ClientError, ClientResult, CreateVpcPayload, Schedule, ScheduleService,
    UpdateVpcPayload, Vpc, VpcService,
};

#[derive(Debug, Clone, PartialEq)]
pub enum VpcCall {
    Create(CreateVpcPayload),
    Get(String),
    Update(String, UpdateVpcPayload),
    Delete(String),
}

#[derive(Default)]
pub struct MockVpcService {
    networks: Mutex<HashMap<String, Vpc>>,
    next_ids: Mutex<VecDeque<String>>,
    failures: Mutex<HashMap<&'static str, ClientError>>,
    update_response: Mutex<Option<Vpc>>,
    calls: Mutex<Vec<VpcCall>>,
}

impl MockVpcService {
    /// Identifier handed out by the next create call
    pub fn with_next_id(self, id: &str) -> Self {
        self.next_ids.lock().unwrap().push_back(id.to_string());
        self
    }

    pub fn with_network(self, vpc: Vpc) -> Self {
        self.networks.lock().unwrap().insert(vpc.id.clone(), vpc);
        self
    }

    /// Return `vpc` from update calls instead of the stored network
    pub fn with_update_response(self, vpc: Vpc) -> Self {
        *self.update_response.lock().unwrap() = Some(vpc);
        self
    }

    /// Make every call of `op` ("create", "get", "update", "delete") fail
    pub fn failing(self, op: &'static str, error: ClientError) -> Self {
        self.failures.lock().unwrap().insert(op, error);
        self
    }

    pub fn calls(&self) -> Vec<VpcCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<VpcCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, VpcCall::Update(..)))
            .collect()
    }

    pub fn network(&self, id: &str) -> Option<Vpc> {
        self.networks.lock().unwrap().get(id).cloned()
    }

    fn record(&self, op: &'static str, call: VpcCall) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(op) {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VpcService for MockVpcService {
    async fn create(&self, payload: &CreateVpcPayload) -> ClientResult<Vpc> {
        self.record("create", VpcCall::Create(payload.clone()))?;
        let mut networks = self.networks.lock().unwrap();
        let id = self
            .next_ids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| format!("vpc-{}", networks.len() + 1));
        let vpc = Vpc {
            id: id.clone(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            cidr: payload.cidr.clone(),
            is_default: payload.is_default,
        };
        networks.insert(id, vpc.clone());
        Ok(vpc)
    }

    async fn get(&self, id: &str) -> ClientResult<Vpc> {
        self.record("get", VpcCall::Get(id.to_string()))?;
        self.network(id).ok_or(ClientError::NotFound)
    }

    async fn update(&self, id: &str, payload: &UpdateVpcPayload) -> ClientResult<Vpc> {
        self.record("update", VpcCall::Update(id.to_string(), payload.clone()))?;
        let mut networks = self.networks.lock().unwrap();
        let vpc = networks.get_mut(id).ok_or(ClientError::NotFound)?;
        if let Some(name) = &payload.name {
            vpc.name = name.clone();
        }
        if let Some(description) = &payload.description {
            vpc.description = description.clone();
        }
        let response = self.update_response.lock().unwrap().clone();
        Ok(response.unwrap_or_else(|| vpc.clone()))
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.record("delete", VpcCall::Delete(id.to_string()))?;
        self.networks
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(ClientError::NotFound)
    }
}

#[derive(Default)]
pub struct MockScheduleService {
    schedules: Mutex<HashMap<String, Schedule>>,
    failure: Mutex<Option<ClientError>>,
    calls: Mutex<Vec<String>>,
}

impl MockScheduleService {
    pub fn with_schedule(self, id: &str, name: &str) -> Self {
        self.with_record(
            id,
            Schedule {
                id: id.to_string(),
                name: name.to_string(),
            },
        )
    }

    /// Answer lookups of `key` with `schedule`, whatever its own id
    pub fn with_record(self, key: &str, schedule: Schedule) -> Self {
        self.schedules
            .lock()
            .unwrap()
            .insert(key.to_string(), schedule);
        self
    }

    pub fn failing(self, error: ClientError) -> Self {
        *self.failure.lock().unwrap() = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScheduleService for MockScheduleService {
    async fn get(&self, id: &str) -> ClientResult<Schedule> {
        self.calls.lock().unwrap().push(id.to_string());
        if let Some(e) = self.failure.lock().unwrap().clone() {
            return Err(e);
        }
        self.schedules
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(ClientError::NotFound)
    }
}

pub fn client(vpc: Arc<MockVpcService>, schedules: Arc<MockScheduleService>) -> BizflyClient {
    BizflyClient::new(vpc, schedules)
}
