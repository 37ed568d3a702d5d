use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
        Tool,
    },
    service::RequestContext,
    RoleServer, ServerHandler,
};
use serde_json::{json, Value};

use crate::config::{ServerConfig, ThinkingConfig};
use crate::handlers::ThinkingHandler;

pub const TOOL_NAME: &str = "sequentialthinking";

const TOOL_DESCRIPTION: &str = "A detailed tool for dynamic and reflective problem-solving through thoughts.
This tool helps analyze problems through a flexible thinking process that can adapt and evolve.
Each thought can build on, question, or revise previous insights as understanding deepens.

When to use this tool:
- Breaking down complex problems into steps
- Planning and design with room for revision
- Analysis that might need course correction
- Problems where the full scope might not be clear initially
- Tasks that need to maintain context over multiple steps
- Situations where irrelevant information needs to be filtered out

Key features:
- You can adjust total_thoughts up or down as you progress
- You can question or revise previous thoughts
- You can add more thoughts even after reaching what seemed like the end
- You can express uncertainty and explore alternative approaches
- Not every thought needs to build linearly - you can branch or backtrack

Parameters explained:
- thought: Your current thinking step
- nextThoughtNeeded: True if you need more thinking, even if at what seemed like the end
- thoughtNumber: Current number in sequence (can go beyond initial total if needed)
- totalThoughts: Current estimate of thoughts needed (can be adjusted up/down)
- isRevision: A boolean indicating if this thought revises previous thinking
- revisesThought: If isRevision is true, which thought number is being reconsidered
- branchFromThought: If branching, which thought number is the branching point
- branchId: Identifier for the current branch (if any)
- needsMoreThoughts: If reaching end but realizing more thoughts needed

You should:
1. Start with an initial estimate of needed thoughts, but be ready to adjust
2. Feel free to question or revise previous thoughts
3. Don't hesitate to add more thoughts if needed, even at the \"end\"
4. Express uncertainty when present
5. Mark thoughts that revise previous thinking or branch into new paths
6. Only set nextThoughtNeeded to false when truly done";

/// MCP service exposing the sequentialthinking tool
#[derive(Clone)]
pub struct SequentialThinkingService {
    handler: Arc<ThinkingHandler>,
    server: ServerConfig,
}

impl SequentialThinkingService {
    pub fn new(config: ThinkingConfig) -> Self {
        let log_thoughts = config.thought_logging_enabled();
        tracing::info!(
            "Initializing {} {} (thought logging: {})",
            config.server.name,
            config.server.version,
            if log_thoughts { "on" } else { "off" }
        );
        Self {
            handler: Arc::new(ThinkingHandler::new(log_thoughts)),
            server: config.server,
        }
    }

    pub fn handler(&self) -> &ThinkingHandler {
        &self.handler
    }

    /// Route a call by tool name
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        if name != TOOL_NAME {
            tracing::warn!("Unknown tool requested: {}", name);
            return CallToolResult::error(vec![Content::text(format!("Unknown tool: {}", name))]);
        }
        let input = Value::Object(arguments.unwrap_or_default());
        self.handler.handle_call(&input).await
    }
}

/// Definition advertised through tools/list
pub fn sequential_thinking_tool() -> Tool {
    Tool::new(TOOL_NAME, TOOL_DESCRIPTION, Arc::new(input_schema()))
}

fn input_schema() -> JsonObject {
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert(
        "properties".to_string(),
        json!({
            "thought": {
                "type": "string",
                "description": "Your current thinking step"
            },
            "nextThoughtNeeded": {
                "type": "boolean",
                "description": "Whether another thought step is needed"
            },
            "thoughtNumber": {
                "type": "integer",
                "description": "Current thought number",
                "minimum": 1
            },
            "totalThoughts": {
                "type": "integer",
                "description": "Estimated total thoughts needed",
                "minimum": 1
            },
            "isRevision": {
                "type": "boolean",
                "description": "Whether this revises previous thinking"
            },
            "revisesThought": {
                "type": "integer",
                "description": "Which thought is being reconsidered",
                "minimum": 1
            },
            "branchFromThought": {
                "type": "integer",
                "description": "Branching point thought number",
                "minimum": 1
            },
            "branchId": {
                "type": "string",
                "description": "Branch identifier"
            },
            "needsMoreThoughts": {
                "type": "boolean",
                "description": "If more thoughts are needed"
            }
        }),
    );
    schema.insert(
        "required".to_string(),
        json!(["thought", "nextThoughtNeeded", "thoughtNumber", "totalThoughts"]),
    );
    schema
}

impl ServerHandler for SequentialThinkingService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            server_info: Implementation {
                name: self.server.name.clone(),
                version: self.server.version.clone(),
            },
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "Sequential thinking: record numbered thoughts, revisions and branches with the sequentialthinking tool".into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: vec![sequential_thinking_tool()],
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.dispatch(&request.name, request.arguments).await)
    }
}
