//! Protocol Dispatcher
//!
//! Maps MCP requests onto the widget registry and the offer store. Every
//! operation is read-only, and per-request failures come back as protocol
//! results rather than Rust errors.

use super::{helpers::*, models::*};
use crate::offers::{FilterQuery, OfferStore};
use crate::widgets::{WidgetDescriptor, WidgetRegistry};
use serde_json::{json, Value};

/// Request router over the startup snapshot.
#[derive(Debug, Clone, Copy)]
pub struct McpDispatcher<'a> {
    widgets: &'a WidgetRegistry,
    offers: &'a OfferStore,
}

impl<'a> McpDispatcher<'a> {
    pub fn new(widgets: &'a WidgetRegistry, offers: &'a OfferStore) -> Self {
        Self { widgets, offers }
    }

    /// Handles `tools/list`.
    pub fn list_tools(&self) -> ListToolsResult {
        let tools = self
            .widgets
            .iter()
            .map(|widget| Tool {
                name: widget.identifier.clone(),
                title: widget.title.clone(),
                description: widget.title.clone(),
                input_schema: tool_input_schema(),
                annotations: ToolAnnotations::read_only(),
                meta: widget_meta(widget),
            })
            .collect();

        ListToolsResult { tools }
    }

    /// Handles `resources/list`.
    pub fn list_resources(&self) -> ListResourcesResult {
        let resources = self
            .widgets
            .iter()
            .map(|widget| Resource {
                name: widget.title.clone(),
                title: widget.title.clone(),
                uri: widget.template_uri.clone(),
                description: resource_description(widget),
                mime_type: WIDGET_MIME_TYPE.to_string(),
                meta: widget_meta(widget),
            })
            .collect();

        ListResourcesResult { resources }
    }

    /// Handles `resources/templates/list`.
    pub fn list_resource_templates(&self) -> ListResourceTemplatesResult {
        let resource_templates = self
            .widgets
            .iter()
            .map(|widget| ResourceTemplate {
                name: widget.title.clone(),
                title: widget.title.clone(),
                uri_template: widget.template_uri.clone(),
                description: resource_description(widget),
                mime_type: WIDGET_MIME_TYPE.to_string(),
                meta: widget_meta(widget),
            })
            .collect();

        ListResourceTemplatesResult { resource_templates }
    }

    /// Handles `resources/read`. Unknown URIs yield an empty result with an
    /// error annotation.
    pub fn read_resource(&self, uri: &str) -> ReadResourceResult {
        let Some(widget) = self.widgets.by_template_uri(uri) else {
            tracing::warn!(uri, "unknown resource requested");
            return ReadResourceResult {
                contents: Vec::new(),
                meta: Some(json!({ "error": format!("Unknown resource: {uri}") })),
            };
        };

        ReadResourceResult {
            contents: vec![TextResourceContents {
                uri: widget.template_uri.clone(),
                mime_type: WIDGET_MIME_TYPE.to_string(),
                text: widget.html.clone(),
                title: None,
                meta: Some(widget_meta(widget)),
            }],
            meta: None,
        }
    }

    /// Handles `tools/call`.
    ///
    /// Missing or `null` arguments mean no filter. Arguments are validated
    /// before any offer is touched.
    pub fn call_tool(&self, name: &str, arguments: Option<Value>) -> CallToolResult {
        let Some(widget) = self.widgets.by_identifier(name) else {
            tracing::warn!(tool = name, "unknown tool requested");
            return CallToolResult::error(format!("Unknown tool: {name}"));
        };

        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(arguments) => arguments,
        };
        // Only objects are accepted; serde would also take the sequence form.
        let filter = if arguments.is_object() {
            serde_json::from_value::<FilterQuery>(arguments).map_err(|err| err.to_string())
        } else {
            Err(format!("arguments must be an object, got {arguments}"))
        };
        let filter = match filter {
            Ok(filter) => filter,
            Err(detail) => {
                tracing::warn!(tool = name, error = %detail, "rejected tool arguments");
                return CallToolResult::error(format!("Input validation error: {detail}"));
            }
        };

        self.render_offers(widget, &filter)
    }

    fn render_offers(&self, widget: &WidgetDescriptor, filter: &FilterQuery) -> CallToolResult {
        let payload = self.offers.query(filter);
        let structured_content = match serde_json::to_value(&payload) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(tool = %widget.identifier, error = %err, "failed to encode offers");
                return CallToolResult::error(format!("Failed to encode offers: {err}"));
            }
        };

        tracing::debug!(
            tool = %widget.identifier,
            offers = payload.offers.len(),
            cabin = %payload.selected_cabin,
            "rendered flight offers"
        );

        CallToolResult {
            content: vec![Content::text(widget.response_text.clone())],
            structured_content: Some(structured_content),
            meta: Some(widget_result_meta(widget)),
            is_error: false,
        }
    }
}

fn resource_description(widget: &WidgetDescriptor) -> String {
    format!("{} widget markup", widget.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{WidgetDescriptor, WIDGET_SEEDS};

    fn fixtures() -> (WidgetRegistry, OfferStore) {
        let widget = WidgetDescriptor::from_seed(&WIDGET_SEEDS[0], "<main>offers</main>".into());
        (
            WidgetRegistry::from_descriptors(vec![widget]),
            OfferStore::seeded().unwrap(),
        )
    }

    const TOOL: &str = "skyward-flight-offers";
    const URI: &str = "ui://widget/skyward-flight-offers.html";

    #[test]
    fn lists_one_read_only_tool_per_widget() {
        let (widgets, offers) = fixtures();
        let result = McpDispatcher::new(&widgets, &offers).list_tools();

        assert_eq!(result.tools.len(), 1);
        let tool = &result.tools[0];
        assert_eq!(tool.name, TOOL);
        assert_eq!(tool.description, "Skyward Flight Offers");
        assert_eq!(tool.input_schema["additionalProperties"], false);
        assert_eq!(tool.input_schema["properties"]["fareCabin"]["type"], "string");
        assert_eq!(tool.annotations, ToolAnnotations::read_only());
        assert_eq!(tool.meta["openai/widgetAccessible"], true);
    }

    #[test]
    fn resources_and_templates_share_the_registry() {
        let (widgets, offers) = fixtures();
        let dispatcher = McpDispatcher::new(&widgets, &offers);

        let resources = dispatcher.list_resources().resources;
        let templates = dispatcher.list_resource_templates().resource_templates;

        assert_eq!(resources.len(), 1);
        assert_eq!(templates.len(), 1);
        assert_eq!(resources[0].uri, URI);
        assert_eq!(templates[0].uri_template, URI);
        assert_eq!(resources[0].mime_type, "text/html+skybridge");
        assert_eq!(resources[0].description, "Skyward Flight Offers widget markup");
        assert_eq!(templates[0].description, resources[0].description);
    }

    #[test]
    fn reads_widget_html_by_uri() {
        let (widgets, offers) = fixtures();
        let result = McpDispatcher::new(&widgets, &offers).read_resource(URI);

        assert_eq!(result.contents.len(), 1);
        assert_eq!(result.contents[0].text, "<main>offers</main>");
        assert_eq!(result.contents[0].mime_type, WIDGET_MIME_TYPE);
        assert!(result.meta.is_none());
    }

    #[test]
    fn unknown_resource_is_annotated_not_raised() {
        let (widgets, offers) = fixtures();
        let result = McpDispatcher::new(&widgets, &offers).read_resource("ui://widget/nope.html");

        assert!(result.contents.is_empty());
        assert_eq!(
            result.meta.unwrap()["error"],
            "Unknown resource: ui://widget/nope.html"
        );
    }

    #[test]
    fn call_without_arguments_returns_every_offer() {
        let (widgets, offers) = fixtures();
        let result = McpDispatcher::new(&widgets, &offers).call_tool(TOOL, None);

        assert!(!result.is_error);
        assert_eq!(
            result.content,
            vec![Content::text("Rendered the Skyward Rewards flight explorer.")]
        );
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["offers"].as_array().unwrap().len(), 3);
        assert_eq!(structured["selectedCabin"], "All cabins");
        assert_eq!(
            structured["availableCabins"],
            json!(["Business Flex", "Premium Select", "SkyComfort"])
        );
        assert_eq!(
            result.meta.unwrap()["openai.com/widget"]["resource"]["text"],
            "<main>offers</main>"
        );
    }

    #[test]
    fn cabin_filter_ignores_case() {
        let (widgets, offers) = fixtures();
        let result = McpDispatcher::new(&widgets, &offers)
            .call_tool(TOOL, Some(json!({ "fareCabin": "business flex" })));

        let structured = result.structured_content.unwrap();
        let listed = structured["offers"].as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["fareClass"], "Business Flex");
        assert_eq!(listed[0]["departure"], "2024-07-12T09:30:00-07:00");
        assert_eq!(listed[0]["arrival"], "2024-07-12T17:50:00-04:00");
        assert_eq!(structured["selectedCabin"], "business flex");
        assert_eq!(structured["availableCabins"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn unmatched_cabin_returns_no_offers() {
        let (widgets, offers) = fixtures();
        let result = McpDispatcher::new(&widgets, &offers)
            .call_tool(TOOL, Some(json!({ "fareCabin": "Economy" })));

        let structured = result.structured_content.unwrap();
        assert!(structured["offers"].as_array().unwrap().is_empty());
        assert_eq!(structured["selectedCabin"], "Economy");
    }

    #[test]
    fn unknown_fields_fail_validation() {
        let (widgets, offers) = fixtures();
        let result = McpDispatcher::new(&widgets, &offers)
            .call_tool(TOOL, Some(json!({ "unknownField": 1 })));

        assert!(result.is_error);
        assert!(result.structured_content.is_none());
        assert!(result.meta.is_none());
        let Content::Text { text } = &result.content[0];
        assert!(text.starts_with("Input validation error:"));
        assert!(text.contains("unknownField"));
    }

    #[test]
    fn wrong_argument_types_fail_validation() {
        let (widgets, offers) = fixtures();
        let dispatcher = McpDispatcher::new(&widgets, &offers);

        for arguments in [json!({ "fareCabin": 3 }), json!(["Business Flex"]), json!("x")] {
            let result = dispatcher.call_tool(TOOL, Some(arguments));
            assert!(result.is_error);
            assert!(result.structured_content.is_none());
        }
    }

    #[test]
    fn unknown_tool_names_the_request() {
        let (widgets, offers) = fixtures();
        let result = McpDispatcher::new(&widgets, &offers).call_tool("book-flight", None);

        assert!(result.is_error);
        assert_eq!(result.content, vec![Content::text("Unknown tool: book-flight")]);
    }
}
