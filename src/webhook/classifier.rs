use crate::domain::event::{CustomData, Event, EventKind, Payload};
use crate::domain::money::{MoneyAmount, PaymentOption};
use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum MalformedEvent {
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("body must be a non-empty JSON array")]
    NotAnArray,
    #[error("first array element must be an object")]
    NotAnObject,
    #[error("missing or invalid field `{0}`")]
    Field(&'static str),
    #[error("invalid timestamp in `{field}`: {value:?}")]
    Timestamp { field: &'static str, value: String },
}

/// Parse a verified raw notification body into a typed [`Event`].
///
/// The provider posts a JSON array; only element 0 is consulted. An
/// unrecognized `type` string classifies as [`EventKind::Unknown`] rather
/// than failing.
pub fn classify(raw: &[u8]) -> Result<Event, MalformedEvent> {
    let root: Value = serde_json::from_slice(raw)?;
    let first = root
        .as_array()
        .and_then(|items| items.first())
        .ok_or(MalformedEvent::NotAnArray)?;
    let event = first.as_object().ok_or(MalformedEvent::NotAnObject)?;

    let event_id = match event.get("eventId") {
        Some(Value::String(s)) => s.clone(),
        // The provider sends numeric event ids; carry them as strings.
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(MalformedEvent::Field("eventId")),
    };

    let event_timestamp = required_timestamp(event.get("eventDateTime"), "eventDateTime")?;

    let kind = event
        .get("type")
        .and_then(Value::as_str)
        .map(EventKind::from_raw)
        .ok_or(MalformedEvent::Field("type"))?;

    let payload = event
        .get("payload")
        .and_then(Value::as_object)
        .ok_or(MalformedEvent::Field("payload"))?;

    let order_id = payload
        .get("id")
        .and_then(Value::as_i64)
        .ok_or(MalformedEvent::Field("payload.id"))?;
    let order_number = payload
        .get("number")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(MalformedEvent::Field("payload.number"))?;
    let external_id = payload
        .get("externalId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(MalformedEvent::Field("payload.externalId"))?;

    let status = match payload.get("status") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(MalformedEvent::Field("payload.status")),
    };

    let order_amount: MoneyAmount = payload
        .get("orderAmount")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|_| MalformedEvent::Field("payload.orderAmount"))?
        .ok_or(MalformedEvent::Field("payload.orderAmount"))?;

    let selected_payment_option: Option<PaymentOption> = match payload.get("selectedPaymentOption")
    {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value(value.clone())
                .map_err(|_| MalformedEvent::Field("payload.selectedPaymentOption"))?,
        ),
    };

    let completed_at = match payload.get("completedDateTime") {
        None | Some(Value::Null) => None,
        Some(value) => Some(required_timestamp(Some(value), "completedDateTime")?),
    };

    Ok(Event {
        event_id,
        event_timestamp,
        kind,
        payload: Payload {
            order_id,
            order_number,
            external_id,
            status,
            custom_data: custom_data(payload.get("customData")),
            order_amount,
            selected_payment_option,
            completed_at,
        },
    })
}

fn required_timestamp(
    value: Option<&Value>,
    field: &'static str,
) -> Result<DateTime<Utc>, MalformedEvent> {
    let raw = value
        .and_then(Value::as_str)
        .ok_or(MalformedEvent::Field(field))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| MalformedEvent::Timestamp {
            field,
            value: raw.to_string(),
        })
}

/// Custom data never fails classification: JSON-shaped strings decode, other
/// strings stay verbatim, absent or empty values yield `None`.
fn custom_data(value: Option<&Value>) -> Option<CustomData> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => match serde_json::from_str(s) {
            Ok(parsed) => Some(CustomData::Json(parsed)),
            Err(_) => Some(CustomData::Text(s.clone())),
        },
        Some(other) => Some(CustomData::Json(other.clone())),
    }
}
