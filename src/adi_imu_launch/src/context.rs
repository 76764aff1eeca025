//! Launch context holding resolved argument values

use crate::actions::LaunchArgument;
use std::collections::HashMap;

/// Resolved launch configurations, as seen by a consumer at spawn time
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    configurations: HashMap<String, String>,
}

impl LaunchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve declared arguments: overrides win, otherwise the default.
    /// Overrides naming undeclared arguments are ignored.
    pub fn from_arguments(
        arguments: &[LaunchArgument],
        overrides: &HashMap<String, String>,
    ) -> Self {
        let mut context = Self::new();
        for argument in arguments {
            let value = overrides
                .get(&argument.name)
                .cloned()
                .unwrap_or_else(|| argument.default_value.to_string());
            context.set_configuration(argument.name.clone(), value);
        }

        for name in overrides.keys() {
            if !arguments.iter().any(|a| &a.name == name) {
                log::warn!("Ignoring override for undeclared launch argument '{}'", name);
            }
        }

        context
    }

    pub fn set_configuration(&mut self, name: String, value: String) {
        self.configurations.insert(name, value);
    }

    pub fn get_configuration(&self, name: &str) -> Option<&str> {
        self.configurations.get(name).map(String::as_str)
    }

    pub fn configurations(&self) -> &HashMap<String, String> {
        &self.configurations
    }
}
