//! The compiler defaults supplied by the host at startup.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use query_engine_plan::plan::ast::OrderElement;

/// Defaults and reserved names the compiler consults for every request.
///
/// These are explicit values passed into the compiler's construction, so
/// tests can supply distinct configurations without shared fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompilerOptions {
    /// The page size applied when the request carries no limit directive.
    /// Absent means unlimited.
    #[serde(default)]
    pub default_limit: Option<u64>,
    /// The ordering applied when the request carries no order directive.
    #[serde(default)]
    pub default_order: Vec<OrderElement>,
    /// Parameter names never treated as filters, even when present in the
    /// raw parameter bag.
    #[serde(default = "default_excluded_parameters")]
    pub excluded_parameters: Vec<String>,
}

fn default_excluded_parameters() -> Vec<String> {
    vec!["token".to_string()]
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            default_limit: None,
            default_order: vec![],
            excluded_parameters: default_excluded_parameters(),
        }
    }
}
