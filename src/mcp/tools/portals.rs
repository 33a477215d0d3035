//! Organization (portal) lookup.

use serde_json::{json, Value};

use crate::mcp::context::ToolContext;
use crate::mcp::registry::{RegisteredTool, ToolBuilder, ToolOutcome, ToolRegistry, ToolResult};

/// Register portal tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register_tool(get_org_id_tool());
}

fn get_org_id_tool() -> RegisteredTool {
    ToolBuilder::new("tc_get_org_id")
        .description("Get organizations. Call FIRST in every conversation.")
        .input_schema(json!({
            "type": "object",
            "properties": {},
            "required": []
        }))
        .no_org_required()
        .build(get_org_id_handler)
}

async fn get_org_id_handler(ctx: ToolContext, _params: Value) -> ToolResult {
    let portals_data = ctx.api.get_portals(&ctx.access_token).await?;

    let portals = portals_data
        .get("portals")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let all_org_ids: Vec<String> = portals.iter().filter_map(extract_org_id).collect();
    let default_org_id = default_org_id(&portals);

    Ok(ToolOutcome::Plain(json!({
        "portals": portals,
        "default_org_id": default_org_id,
        "all_org_ids": all_org_ids,
        "total_portals": portals.len(),
    })))
}

/// Org ids arrive as strings or numbers depending on the portal record.
fn extract_org_id(portal: &Value) -> Option<String> {
    match portal.get("orgId") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// The portal flagged as default, falling back to the first one.
fn default_org_id(portals: &[Value]) -> Option<String> {
    portals
        .iter()
        .find(|p| p.get("isDefault").and_then(Value::as_bool) == Some(true))
        .and_then(extract_org_id)
        .or_else(|| portals.first().and_then(extract_org_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_org_id_string_and_number() {
        assert_eq!(
            extract_org_id(&json!({"orgId": "60058756004"})),
            Some("60058756004".to_string())
        );
        assert_eq!(
            extract_org_id(&json!({"orgId": 60058756004u64})),
            Some("60058756004".to_string())
        );
        assert_eq!(extract_org_id(&json!({"name": "x"})), None);
    }

    #[test]
    fn test_default_org_prefers_flagged_portal() {
        let portals = vec![
            json!({"orgId": "1"}),
            json!({"orgId": "2", "isDefault": true}),
        ];
        assert_eq!(default_org_id(&portals), Some("2".to_string()));
    }

    #[test]
    fn test_default_org_falls_back_to_first() {
        let portals = vec![json!({"orgId": "1"}), json!({"orgId": "2"})];
        assert_eq!(default_org_id(&portals), Some("1".to_string()));
        assert_eq!(default_org_id(&[]), None);
    }
}
