mod fragment_tests;

use serde_json::Value;

use crate::parser::{Parse, parse};

impl Parse {
    /// Strict parse that must succeed. Returns the root as JSON.
    pub fn expect_valid(src: &str) -> Value {
        let parse = parse(src, true);
        if parse.has_error() {
            panic!(
                "Expected valid body, got errors:\n{}",
                parse.diagnostics().render(src)
            );
        }
        parse.tree().root_json().expect("valid body has a root")
    }

    /// Strict parse that must fail. Returns one line per diagnostic.
    pub fn expect_invalid(src: &str) -> String {
        let parse = parse(src, true);
        if !parse.has_error() {
            panic!("Expected invalid body, got {:?}", parse.tree().root_json());
        }
        parse.dump_diagnostics()
    }

    /// Fragment parse that must not report anything. Returns the root as JSON.
    pub fn expect_fragment(src: &str) -> Option<Value> {
        let parse = parse(src, false);
        if parse.has_error() {
            panic!(
                "Expected silent fragment parse, got errors:\n{}",
                parse.diagnostics().render(src)
            );
        }
        parse.tree().root_json()
    }

    pub fn dump_diagnostics(&self) -> String {
        self.errors()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
