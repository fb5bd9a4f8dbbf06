// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed tool inventory exposed to LLM providers.
//!
//! Tool dispatch is a compile-time-checked enum, not a string-keyed method
//! lookup: an unknown tool name is a typed error. Each kind carries a
//! JSON-schema-shaped parameter declaration that provider adapters
//! translate to their vendor's function-calling wire format.

use reva_core::ToolDefinition;
use serde_json::{Value, json};

/// Every tool the assistant can call, as a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    SearchProperties,
    GetMarketStats,
    GetPropertyDetails,
    GetNeighborhoodInfo,
    GetPriceTrends,
    FindSimilarProperties,
    TextSearch,
    ScheduleTour,
    ContactAgent,
    ResolvePropertyReference,
    GetPropertyCategory,
}

impl ToolKind {
    /// All tool kinds in declaration order.
    pub const ALL: &[ToolKind] = &[
        ToolKind::SearchProperties,
        ToolKind::GetMarketStats,
        ToolKind::GetPropertyDetails,
        ToolKind::GetNeighborhoodInfo,
        ToolKind::GetPriceTrends,
        ToolKind::FindSimilarProperties,
        ToolKind::TextSearch,
        ToolKind::ScheduleTour,
        ToolKind::ContactAgent,
        ToolKind::ResolvePropertyReference,
        ToolKind::GetPropertyCategory,
    ];

    /// Look up a kind by wire name. `None` means the model asked for a tool
    /// outside the closed set.
    pub fn from_name(name: &str) -> Option<ToolKind> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Wire name sent to providers.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::SearchProperties => "search_properties",
            ToolKind::GetMarketStats => "get_market_stats",
            ToolKind::GetPropertyDetails => "get_property_details",
            ToolKind::GetNeighborhoodInfo => "get_neighborhood_info",
            ToolKind::GetPriceTrends => "get_price_trends",
            ToolKind::FindSimilarProperties => "find_similar_properties",
            ToolKind::TextSearch => "text_search",
            ToolKind::ScheduleTour => "schedule_tour",
            ToolKind::ContactAgent => "contact_agent",
            ToolKind::ResolvePropertyReference => "resolve_property_reference",
            ToolKind::GetPropertyCategory => "get_property_category",
        }
    }

    /// Natural-language description shown to the model.
    pub fn description(self) -> &'static str {
        match self {
            ToolKind::SearchProperties => {
                "Search active listings by criteria such as city, price range, bedrooms, \
                 bathrooms, and property type. Criteria merge with earlier searches in \
                 this conversation."
            }
            ToolKind::GetMarketStats => {
                "Get a single market statistic (median price, average days on market, \
                 inventory count), optionally scoped to a city and property type."
            }
            ToolKind::GetPropertyDetails => {
                "Get the full record for one listing by its listing id. Makes that \
                 listing the active property for follow-up questions."
            }
            ToolKind::GetNeighborhoodInfo => {
                "Get aggregate stats for a neighborhood: median price, active listings, \
                 school rating, walk score."
            }
            ToolKind::GetPriceTrends => {
                "Get a monthly median-price series, optionally scoped to a city and \
                 property type."
            }
            ToolKind::FindSimilarProperties => {
                "Find comparable listings for a given listing id."
            }
            ToolKind::TextSearch => {
                "Free-text search over listing descriptions and addresses."
            }
            ToolKind::ScheduleTour => {
                "Schedule a property tour for the user. Requires listing id and the \
                 user's name, email, and phone."
            }
            ToolKind::ContactAgent => {
                "Send the user's question or request to a human agent. Requires name, \
                 email, and a message."
            }
            ToolKind::ResolvePropertyReference => {
                "Resolve a user's reference to a previously shown listing, such as \
                 'the second one', '#3', or a partial address."
            }
            ToolKind::GetPropertyCategory => {
                "Get one category of fields (basic, financial, location, features, \
                 schools) for the property currently being discussed."
            }
        }
    }

    /// JSON-schema-shaped parameter declaration.
    pub fn parameters(self) -> Value {
        match self {
            ToolKind::SearchProperties => json!({
                "type": "object",
                "properties": {
                    "city": { "type": "string" },
                    "neighborhood": { "type": "string" },
                    "property_type": {
                        "type": "string",
                        "enum": ["house", "condo", "townhouse", "apartment", "land"]
                    },
                    "min_price": { "type": "integer" },
                    "max_price": { "type": "integer" },
                    "min_bedrooms": { "type": "integer" },
                    "min_bathrooms": { "type": "number" },
                    "keywords": { "type": "string" }
                },
                "required": []
            }),
            ToolKind::GetMarketStats => json!({
                "type": "object",
                "properties": {
                    "stat_type": {
                        "type": "string",
                        "enum": ["median_price", "average_price", "days_on_market", "inventory"]
                    },
                    "city": { "type": "string" },
                    "property_type": { "type": "string" }
                },
                "required": ["stat_type"]
            }),
            ToolKind::GetPropertyDetails => json!({
                "type": "object",
                "properties": {
                    "listing_id": { "type": "string" }
                },
                "required": ["listing_id"]
            }),
            ToolKind::GetNeighborhoodInfo => json!({
                "type": "object",
                "properties": {
                    "neighborhood": { "type": "string" }
                },
                "required": ["neighborhood"]
            }),
            ToolKind::GetPriceTrends => json!({
                "type": "object",
                "properties": {
                    "city": { "type": "string" },
                    "property_type": { "type": "string" },
                    "timeframe_months": { "type": "integer" }
                },
                "required": []
            }),
            ToolKind::FindSimilarProperties => json!({
                "type": "object",
                "properties": {
                    "listing_id": { "type": "string" },
                    "count": { "type": "integer" }
                },
                "required": ["listing_id"]
            }),
            ToolKind::TextSearch => json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" }
                },
                "required": ["query"]
            }),
            ToolKind::ScheduleTour => json!({
                "type": "object",
                "properties": {
                    "listing_id": { "type": "string" },
                    "name": { "type": "string" },
                    "email": { "type": "string" },
                    "phone": { "type": "string" },
                    "date": { "type": "string" },
                    "time": { "type": "string" },
                    "message": { "type": "string" }
                },
                "required": ["listing_id", "name", "email", "phone"]
            }),
            ToolKind::ContactAgent => json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "email": { "type": "string" },
                    "message": { "type": "string" },
                    "phone": { "type": "string" },
                    "listing_id": { "type": "string" },
                    "inquiry_type": {
                        "type": "string",
                        "enum": ["buying", "selling", "renting", "general"]
                    }
                },
                "required": ["name", "email", "message"]
            }),
            ToolKind::ResolvePropertyReference => json!({
                "type": "object",
                "properties": {
                    "reference": { "type": "string" }
                },
                "required": ["reference"]
            }),
            ToolKind::GetPropertyCategory => json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "enum": ["basic", "financial", "location", "features", "schools"]
                    }
                },
                "required": ["category"]
            }),
        }
    }

    /// The neutral declaration handed to provider adapters.
    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Declarations for the full inventory, in declaration order.
pub fn all_definitions() -> Vec<ToolDefinition> {
    ToolKind::ALL.iter().map(|k| k.definition()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_round_trips_every_kind() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(ToolKind::from_name("frobnicate"), None);
        assert_eq!(ToolKind::from_name(""), None);
        assert_eq!(ToolKind::from_name("SearchProperties"), None);
    }

    #[test]
    fn inventory_has_eleven_tools() {
        assert_eq!(ToolKind::ALL.len(), 11);
        assert_eq!(all_definitions().len(), 11);
    }

    #[test]
    fn every_declaration_is_a_schema_object() {
        for def in all_definitions() {
            assert!(!def.description.is_empty());
            assert_eq!(def.parameters["type"], "object");
            assert!(def.parameters["properties"].is_object());
            assert!(def.parameters["required"].is_array());
        }
    }

    #[test]
    fn required_fields_are_declared_properties() {
        for def in all_definitions() {
            let props = def.parameters["properties"].as_object().unwrap();
            for required in def.parameters["required"].as_array().unwrap() {
                let name = required.as_str().unwrap();
                assert!(props.contains_key(name), "{}: {name}", def.name);
            }
        }
    }
}
