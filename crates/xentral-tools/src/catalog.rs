//! The tool catalog: definitions plus the discovery step that registers them.

use std::sync::Arc;

use xentral_core::{ParamType, ToolDefinition, ToolParameter};
use xentral_mcp::ToolRegistry;

use crate::client::XentralClient;
use crate::config::SharedConfig;
use crate::error::Error;
use crate::placeholder::PlaceholderTool;
use crate::search::SearchTool;

const CUSTOMER_FILTERS: &[(&str, &str)] = &[
    ("customer_id", "id"),
    ("customer_number", "number"),
    ("name", "name"),
    ("email", "email"),
    ("phone", "phone"),
    ("city", "city"),
];

const PRODUCT_FILTERS: &[(&str, &str)] = &[
    ("product_id", "id"),
    ("article_number", "article_number"),
    ("name", "name"),
    ("type", "type"),
    ("device_type", "device_type"),
];

/// Tools advertised ahead of their implementation.
const PLANNED_TOOLS: &[(&str, &str)] = &[
    ("get_order_overview", "Get an overview of a sales order"),
    ("get_customer_history", "Get the order and ticket history of a customer"),
    ("track_order_progress", "Track the fulfilment progress of an order"),
    ("check_product_availability", "Check stock availability of a product"),
];

fn listing_params() -> Vec<ToolParameter> {
    vec![
        ToolParameter::new("page", ParamType::Integer, "Page Number"),
        ToolParameter::new("limit", ParamType::Integer, "Results Limit"),
        ToolParameter::new("sort", ParamType::String, "Sort Field"),
        ToolParameter::new("raw", ParamType::Boolean, "Show raw API response"),
    ]
}

/// # Errors
///
/// Only if the static definition is malformed.
pub fn search_customers_definition() -> Result<ToolDefinition, xentral_core::Error> {
    let mut params = vec![
        ToolParameter::new("customer_id", ParamType::Integer, "Customer ID"),
        ToolParameter::new("customer_number", ParamType::String, "Customer Number"),
        ToolParameter::new("name", ParamType::String, "Customer Name"),
        ToolParameter::new("email", ParamType::String, "Email Address"),
        ToolParameter::new("phone", ParamType::String, "Phone Number"),
        ToolParameter::new("city", ParamType::String, "City"),
    ];
    params.extend(listing_params());
    ToolDefinition::new(
        "search_customers",
        "Search and find customers by various criteria",
        params,
    )
}

/// # Errors
///
/// Only if the static definition is malformed.
pub fn search_products_definition() -> Result<ToolDefinition, xentral_core::Error> {
    let mut params = vec![
        ToolParameter::new("product_id", ParamType::Integer, "Product ID"),
        ToolParameter::new("article_number", ParamType::String, "Article Number"),
        ToolParameter::new("name", ParamType::String, "Product Name"),
        ToolParameter::new("type", ParamType::String, "Product Type"),
        ToolParameter::new("device_type", ParamType::String, "Device Type"),
    ];
    params.extend(listing_params());
    ToolDefinition::new(
        "search_products",
        "Search and find products by various criteria",
        params,
    )
}

fn planned_definition(name: &str, description: &str) -> Result<ToolDefinition, xentral_core::Error> {
    ToolDefinition::new(
        name,
        description,
        vec![
            ToolParameter::new("id", ParamType::Integer, "Record ID"),
            ToolParameter::new("page", ParamType::Integer, "Page Number"),
            ToolParameter::new("limit", ParamType::Integer, "Results Limit"),
        ],
    )
}

/// Register every ERP tool with `registry`.
///
/// Runs once at startup, before the transport accepts requests. With
/// `include_planned`, placeholder bindings for unimplemented tools are added too.
///
/// # Errors
///
/// Fails if the HTTP client cannot be built.
pub fn register_default_tools(
    registry: &ToolRegistry,
    config: SharedConfig,
    include_planned: bool,
) -> Result<(), Error> {
    let client = XentralClient::new(config)?;

    let customers = search_customers_definition()?;
    registry.register(
        customers.clone(),
        Arc::new(SearchTool::new(
            customers,
            "api/v2/customers",
            CUSTOMER_FILTERS,
            client.clone(),
        )),
    );

    let products = search_products_definition()?;
    registry.register(
        products.clone(),
        Arc::new(SearchTool::new(
            products,
            "api/v2/products",
            PRODUCT_FILTERS,
            client,
        )),
    );

    if include_planned {
        for (name, description) in PLANNED_TOOLS {
            registry.register(
                planned_definition(name, description)?,
                Arc::new(PlaceholderTool::new(*name)),
            );
        }
    }

    tracing::info!(count = registry.len(), "Initialized MCP tools");
    Ok(())
}
