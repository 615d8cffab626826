pub mod hub;
pub mod ws_session;

/// What the lobby needs from the connection layer: addressed delivery of encoded
/// frames and group membership keyed by room id.
pub trait Outbound: Send + Sync {
    fn send_to(&self, connection_id: &str, payload: String);
    fn send_group(&self, group: &str, payload: String);
    fn send_all(&self, payload: String);
    fn join_group(&self, connection_id: &str, group: &str);
    fn leave_group(&self, connection_id: &str, group: &str);
}
