//! Schema for a structured Statement of Facts document.
//!
//! Every leaf field is optional: the extraction contract is "populate when
//! the source text carries evidence, otherwise leave the field absent" —
//! never a guessed or sentinel value. The same types drive serde
//! (de)serialization and the JSON-Schema descriptor sent to the model, so
//! the wire constraint and the validated shape cannot drift apart.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Complete structured form of one Statement of Facts document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    pub document_details: Option<DocumentDetails>,
    /// Operational events in the order the extraction emitted them —
    /// chronological per the source text, but not guaranteed sorted.
    #[serde(default)]
    pub events: Vec<Event>,
    pub laytime_notes: Option<LaytimeNotes>,
    pub approvals: Option<Vec<Signatory>>,
}

/// Header-level facts: vessel, voyage, port, parties, cargo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDetails {
    pub document_source: Option<String>,
    pub date_of_document: Option<String>,
    pub port_name: Option<String>,
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    pub parties: Option<PartyDetails>,
    pub cargo: Option<CargoDetails>,
    pub confidence: Option<f32>,
}

/// Parties named on the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyDetails {
    pub shipowner_name: Option<String>,
    pub charterer_name: Option<String>,
    pub port_agent_name: Option<String>,
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoDetails {
    pub operation_type: Option<String>,
    pub cargo_type: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub confidence: Option<f32>,
}

/// One timestamped port/vessel operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: Option<i64>,
    pub event_type: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    /// Difference between start and end in hours, computed by the
    /// extraction when both timestamps are present.
    pub duration_hours: Option<f64>,
    pub weather_conditions: Option<String>,
    pub remarks: Option<String>,
    pub confidence: Option<f32>,
}

/// Free-text laytime summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaytimeNotes {
    pub free_time_periods_identified: Option<String>,
    pub suspension_periods_identified: Option<String>,
    pub remarks_on_interruptions_or_delays: Option<String>,
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signatory {
    pub role: Option<String>,
    pub name: Option<String>,
    pub date_signed: Option<String>,
}

fn nullable(ty: &str) -> Value {
    json!({ "type": [ty, "null"] })
}

fn confidence_property() -> Value {
    // Advisory score, not validated or clamped on the way back in.
    json!({ "type": ["number", "null"], "minimum": 0.0, "maximum": 1.0 })
}

/// JSON-Schema descriptor for [`StructuredDocument`], passed to the model
/// as its response constraint.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "document_details": {
                "type": ["object", "null"],
                "properties": {
                    "document_source": nullable("string"),
                    "date_of_document": nullable("string"),
                    "port_name": nullable("string"),
                    "vessel_name": nullable("string"),
                    "voyage_number": nullable("string"),
                    "parties": {
                        "type": ["object", "null"],
                        "properties": {
                            "shipowner_name": nullable("string"),
                            "charterer_name": nullable("string"),
                            "port_agent_name": nullable("string"),
                            "confidence": confidence_property(),
                        }
                    },
                    "cargo": {
                        "type": ["object", "null"],
                        "properties": {
                            "operation_type": nullable("string"),
                            "cargo_type": nullable("string"),
                            "quantity": nullable("number"),
                            "unit": nullable("string"),
                            "confidence": confidence_property(),
                        }
                    },
                    "confidence": confidence_property(),
                }
            },
            "events": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "event_id": nullable("integer"),
                        "event_type": nullable("string"),
                        "start_date": nullable("string"),
                        "start_time": nullable("string"),
                        "end_date": nullable("string"),
                        "end_time": nullable("string"),
                        "duration_hours": nullable("number"),
                        "weather_conditions": nullable("string"),
                        "remarks": nullable("string"),
                        "confidence": confidence_property(),
                    }
                }
            },
            "laytime_notes": {
                "type": ["object", "null"],
                "properties": {
                    "free_time_periods_identified": nullable("string"),
                    "suspension_periods_identified": nullable("string"),
                    "remarks_on_interruptions_or_delays": nullable("string"),
                    "confidence": confidence_property(),
                }
            },
            "approvals": {
                "type": ["array", "null"],
                "items": {
                    "type": "object",
                    "properties": {
                        "role": nullable("string"),
                        "name": nullable("string"),
                        "date_signed": nullable("string"),
                    }
                }
            }
        },
        "required": ["document_details", "events", "laytime_notes"]
    })
}
