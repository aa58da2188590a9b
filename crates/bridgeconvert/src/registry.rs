use serde_json::{Map, Value};

/// Display metadata for a node type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub label: String,
    pub description: String,
}

/// Catalogue entry as listed by [`known_types`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub type_id: &'static str,
    pub label: &'static str,
    /// Parameter interpolated into the description, if any
    pub parameter: Option<&'static str>,
}

struct TypeEntry {
    type_id: &'static str,
    label: &'static str,
    generic: &'static str,
    detail: Option<Detail>,
}

/// `template` holds a single `{}` that receives the parameter value
struct Detail {
    parameter: &'static str,
    template: &'static str,
}

const fn plain(type_id: &'static str, label: &'static str, generic: &'static str) -> TypeEntry {
    TypeEntry {
        type_id,
        label,
        generic,
        detail: None,
    }
}

const fn detailed(
    type_id: &'static str,
    label: &'static str,
    generic: &'static str,
    parameter: &'static str,
    template: &'static str,
) -> TypeEntry {
    TypeEntry {
        type_id,
        label,
        generic,
        detail: Some(Detail {
            parameter,
            template,
        }),
    }
}

static KNOWN_TYPES: &[TypeEntry] = &[
    plain(
        "n8n-nodes-base.start",
        "Start Trigger",
        "Starts the workflow when it is run manually.",
    ),
    plain(
        "n8n-nodes-base.manualTrigger",
        "Manual Trigger",
        "Starts the workflow when the run button is pressed.",
    ),
    detailed(
        "n8n-nodes-base.webhook",
        "Webhook",
        "Starts the workflow when an HTTP request arrives.",
        "path",
        "Starts the workflow when a request arrives at /{}.",
    ),
    plain(
        "n8n-nodes-base.cron",
        "Cron",
        "Starts the workflow on a fixed schedule.",
    ),
    plain(
        "n8n-nodes-base.scheduleTrigger",
        "Schedule Trigger",
        "Starts the workflow at scheduled intervals.",
    ),
    detailed(
        "n8n-nodes-base.httpRequest",
        "HTTP Request",
        "Sends an HTTP request and returns the response.",
        "url",
        "Sends an HTTP request to {} and returns the response.",
    ),
    detailed(
        "n8n-nodes-base.emailSend",
        "Send Email",
        "Sends an email message.",
        "toEmail",
        "Sends an email message to {}.",
    ),
    detailed(
        "n8n-nodes-base.slack",
        "Slack",
        "Posts a message to Slack.",
        "channel",
        "Posts a message to the Slack channel {}.",
    ),
    detailed(
        "n8n-nodes-base.postgres",
        "Postgres",
        "Runs a query against a Postgres database.",
        "table",
        "Runs a query against the Postgres table {}.",
    ),
    plain(
        "n8n-nodes-base.set",
        "Set",
        "Sets fields on every incoming item.",
    ),
    plain(
        "n8n-nodes-base.if",
        "IF",
        "Routes items down the true or the false branch.",
    ),
    plain(
        "n8n-nodes-base.switch",
        "Switch",
        "Routes items to one of several outputs.",
    ),
    plain(
        "n8n-nodes-base.merge",
        "Merge",
        "Combines the items of two inputs.",
    ),
    plain(
        "n8n-nodes-base.function",
        "Function",
        "Runs custom JavaScript over all items.",
    ),
    plain(
        "n8n-nodes-base.code",
        "Code",
        "Runs custom code over the incoming items.",
    ),
    plain(
        "n8n-nodes-base.wait",
        "Wait",
        "Pauses the workflow before continuing.",
    ),
    plain(
        "n8n-nodes-base.noOp",
        "No Operation",
        "Passes items through unchanged.",
    ),
];

/// Resolve display metadata without looking at parameters
pub fn resolve(type_id: &str) -> TypeInfo {
    resolve_with(type_id, &Map::new())
}

/// Resolve display metadata for `type_id`.
///
/// Known types may name one parameter in their description. Unknown types
/// get a label humanized from the last dotted segment.
pub fn resolve_with(type_id: &str, parameters: &Map<String, Value>) -> TypeInfo {
    match KNOWN_TYPES.iter().find(|e| e.type_id == type_id) {
        Some(entry) => TypeInfo {
            label: entry.label.to_string(),
            description: describe(entry, parameters),
        },
        None => fallback(type_id),
    }
}

/// Every type in the catalogue, in table order
pub fn known_types() -> Vec<TypeDescriptor> {
    KNOWN_TYPES
        .iter()
        .map(|e| TypeDescriptor {
            type_id: e.type_id,
            label: e.label,
            parameter: e.detail.as_ref().map(|d| d.parameter),
        })
        .collect()
}

pub fn is_known(type_id: &str) -> bool {
    KNOWN_TYPES.iter().any(|e| e.type_id == type_id)
}

fn describe(entry: &TypeEntry, parameters: &Map<String, Value>) -> String {
    let Some(detail) = &entry.detail else {
        return entry.generic.to_string();
    };

    match parameters.get(detail.parameter).and_then(display_value) {
        Some(value) => detail.template.replacen("{}", &value, 1),
        None => entry.generic.to_string(),
    }
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn fallback(type_id: &str) -> TypeInfo {
    let mut label = humanize(type_id);
    if label.is_empty() {
        label = "Node".to_string();
    }
    let description = format!("Runs the {} step.", label.to_lowercase());
    TypeInfo { label, description }
}

/// `myPlugin.customNode` -> `custom Node`
fn humanize(type_id: &str) -> String {
    let tail = match type_id.rfind('.') {
        Some(dot) => &type_id[dot + 1..],
        None => type_id,
    };

    let mut out = String::with_capacity(tail.len() + 4);
    for (i, ch) in tail.chars().enumerate() {
        if i > 0 && ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out.trim().to_string()
}
