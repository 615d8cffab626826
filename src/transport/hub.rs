use super::Outbound;
use dashmap::DashMap;
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Hub {
    connections: DashMap<String, UnboundedSender<String>>,
    groups: DashMap<String, HashSet<String>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, sender: UnboundedSender<String>) -> String {
        let connection_id = Uuid::new_v4().to_string();
        self.connections.insert(connection_id.clone(), sender);
        connection_id
    }

    pub fn unregister(&self, connection_id: &str) {
        self.connections.remove(connection_id);
        self.groups.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn deliver(&self, connection_id: &str, payload: String) {
        let failed = match self.connections.get(connection_id) {
            Some(sender) => sender.send(payload).is_err(),
            None => false,
        };
        if failed {
            tracing::debug!(connection_id, "dropping closed connection");
            self.connections.remove(connection_id);
        }
    }
}

impl Outbound for Hub {
    fn send_to(&self, connection_id: &str, payload: String) {
        self.deliver(connection_id, payload);
    }

    fn send_group(&self, group: &str, payload: String) {
        let members: Vec<String> = match self.groups.get(group) {
            Some(members) => members.iter().cloned().collect(),
            None => return,
        };
        for connection_id in members {
            self.deliver(&connection_id, payload.clone());
        }
    }

    fn send_all(&self, payload: String) {
        let connection_ids: Vec<String> = self
            .connections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        for connection_id in connection_ids {
            self.deliver(&connection_id, payload.clone());
        }
    }

    fn join_group(&self, connection_id: &str, group: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(connection_id.to_string());
    }

    fn leave_group(&self, connection_id: &str, group: &str) {
        let now_empty = match self.groups.get_mut(group) {
            Some(mut members) => {
                members.remove(connection_id);
                members.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.groups.remove_if(group, |_, members| members.is_empty());
        }
    }
}
