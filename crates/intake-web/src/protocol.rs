//! Real-time channel protocol.
//!
//! Every frame on the WebSocket is a tagged envelope so the server can
//! reject anything it cannot decode instead of silently accepting it.

use intake_core::{PatientCandidate, PatientRecord};
use serde::{Deserialize, Serialize};

/// Messages sent from the server to a client.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// Full record history, sent once right after a channel is registered.
    InitialSnapshot(Vec<PatientRecord>),
    /// A newly appended record, fanned out to every registered channel,
    /// including the submitter's.
    RecordAdded(PatientRecord),
    /// A submission failed validation or could not be decoded. Sent only to
    /// the offending channel.
    SubmitRejected { reason: String },
}

/// Messages sent from a client to the server.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    /// A patient record candidate, without id or timestamp.
    Submit(PatientCandidate),
}
